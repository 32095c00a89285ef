//! # 通用 CLI 参数
//!
//! 批处理命令共享的输入/输出目录、断点续跑参数，以及翻译服务参数。
//!
//! ## 依赖关系
//! - 被 `cli/graph.rs`, `cli/text.rs` 使用

use clap::Args;
use std::path::PathBuf;

/// 批处理通用参数
#[derive(Args, Debug, Clone)]
pub struct BatchArgs {
    /// Folder containing the input files
    pub folder_in: PathBuf,

    /// Folder for the output files (mirrors the input structure)
    pub folder_out: PathBuf,

    /// Glob pattern for input files; patterns with '/' match the relative path
    #[arg(long)]
    pub input_glob: Option<String>,

    /// Remove all contents of FOLDER_OUT before processing
    #[arg(long, overrides_with = "no_clean")]
    pub clean: bool,

    /// Keep existing contents of FOLDER_OUT (default)
    #[arg(long, overrides_with = "clean")]
    pub no_clean: bool,

    /// Recompute outputs that already exist
    #[arg(long, overrides_with = "no_overwrite")]
    pub overwrite: bool,

    /// Skip outputs that already exist (default)
    #[arg(long, overrides_with = "overwrite")]
    pub no_overwrite: bool,

    /// 1-based index of the first file to process
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
    pub start: u64,
}

impl BatchArgs {
    pub fn clean(&self) -> bool {
        self.clean && !self.no_clean
    }

    pub fn overwrite(&self) -> bool {
        self.overwrite && !self.no_overwrite
    }

    pub fn start(&self) -> usize {
        self.start as usize
    }

    /// 输入匹配模式，未指定时使用命令的默认值
    pub fn pattern_or(&self, default: &str) -> String {
        self.input_glob
            .clone()
            .unwrap_or_else(|| default.to_string())
    }
}

/// 翻译服务参数
#[derive(Args, Debug, Clone)]
pub struct TranslationArgs {
    /// Lowercase code, i.e. en for English
    #[arg(long)]
    pub source_lang: String,

    /// Lowercase code, i.e. en for English
    #[arg(long)]
    pub target_lang: String,

    /// DeepL API key
    #[arg(long, env = "DEEPL_AUTH_KEY", hide_env_values = true)]
    pub auth_key: String,

    /// Override the DeepL endpoint
    #[arg(long, env = "DEEPL_API_URL")]
    pub api_url: Option<String>,

    /// Timeout per request in seconds
    #[arg(long, default_value_t = 60)]
    pub timeout: u64,

    /// Retries for rate-limited, failed or timed-out requests
    #[arg(long, default_value_t = 3)]
    pub retries: u32,
}
