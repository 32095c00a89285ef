//! # text 子命令 CLI 定义
//!
//! 纯文本命令组：`translate`
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/text.rs`

use super::common::{BatchArgs, TranslationArgs};
use clap::{Args, Subcommand};

/// text 主命令参数
#[derive(Args, Debug)]
pub struct TextArgs {
    #[command(subcommand)]
    pub command: TextCommands,
}

/// text 子命令
#[derive(Subcommand, Debug)]
pub enum TextCommands {
    /// Translate plain text files via DeepL
    Translate(TextTranslateArgs),
}

/// text translate 参数
#[derive(Args, Debug)]
pub struct TextTranslateArgs {
    #[command(flatten)]
    pub batch: BatchArgs,

    #[command(flatten)]
    pub translation: TranslationArgs,

    /// Suffix of the input and output files
    #[arg(long, default_value = ".txt")]
    pub suffix: String,
}
