//! # 翻译模块
//!
//! 翻译服务抽象与 DeepL 实现，以及论证图的逐字段翻译。
//!
//! ## 依赖关系
//! - 被 `commands/graph/translate.rs`, `commands/text.rs` 使用
//! - 子模块: deepl, graph, language

pub mod deepl;
pub mod graph;
pub mod language;

pub use deepl::{DeeplClient, DeeplConfig};
pub use graph::GraphTranslator;
pub use language::{Language, LanguageRole};

use crate::error::{RecapError, Result};

/// 文本处理模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextMode {
    /// 纯文本，保留格式
    Plain,
    /// 带 XML 标签的文本，标签原样保留
    Xml,
}

/// 翻译服务
///
/// 结果与输入按位置一一对应。
pub trait TranslationService: Sync {
    fn translate_texts(&self, texts: &[String], mode: TextMode) -> Result<Vec<String>>;

    fn translate_text(&self, text: &str, mode: TextMode) -> Result<String> {
        self.translate_texts(&[text.to_string()], mode)?
            .pop()
            .ok_or_else(|| RecapError::TranslationServiceError("Empty response".to_string()))
    }
}
