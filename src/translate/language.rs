//! # DeepL 语言代码
//!
//! 在发送任何请求之前校验源语言和目标语言代码。
//! 输入不区分大小写，发送给 API 时使用大写。
//!
//! ## 依赖关系
//! - 被 `translate/deepl.rs` 和 `commands/` 使用

use crate::error::{RecapError, Result};

const SOURCE_LANGUAGES: &[&str] = &[
    "ar", "bg", "cs", "da", "de", "el", "en", "es", "et", "fi", "fr", "hu", "id", "it", "ja", "ko",
    "lt", "lv", "nb", "nl", "pl", "pt", "ro", "ru", "sk", "sl", "sv", "tr", "uk", "zh",
];

/// 仅可作为目标语言的变体
const TARGET_VARIANTS: &[&str] = &["en-gb", "en-us", "pt-br", "pt-pt", "zh-hans", "zh-hant"];

/// 语言角色
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageRole {
    Source,
    Target,
}

impl std::fmt::Display for LanguageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LanguageRole::Source => write!(f, "source"),
            LanguageRole::Target => write!(f, "target"),
        }
    }
}

/// 已校验的语言代码
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Language {
    code: String,
}

impl Language {
    pub fn parse(code: &str, role: LanguageRole) -> Result<Self> {
        let normalized = code.trim().to_lowercase().replace('_', "-");

        let known = SOURCE_LANGUAGES.contains(&normalized.as_str())
            || (role == LanguageRole::Target && TARGET_VARIANTS.contains(&normalized.as_str()));

        if !known {
            return Err(RecapError::UnsupportedLanguage {
                role: role.to_string(),
                code: code.to_string(),
            });
        }

        Ok(Language { code: normalized })
    }

    /// API 使用的大写代码（如 `EN-GB`）
    pub fn api_code(&self) -> String {
        self.code.to_uppercase()
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code)
    }
}
