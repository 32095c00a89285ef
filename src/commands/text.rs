//! # text 命令实现
//!
//! 使用 DeepL 批量翻译纯文本文件，输出目录镜像输入目录结构。
//!
//! ## 依赖关系
//! - 使用 `cli/text.rs` 定义的参数
//! - 使用 `translate/` 的翻译服务
//! - 使用 `commands/mod.rs` 的批处理流程

use crate::batch::PathPair;
use crate::cli::text::{TextArgs, TextCommands, TextTranslateArgs};
use crate::commands::{deepl_client, prepare_pairs, run_batch};
use crate::error::Result;
use crate::translate::{TextMode, TranslationService};
use crate::utils::{fs, output};

/// 执行 text 子命令
pub fn execute(args: TextArgs) -> Result<()> {
    match args.command {
        TextCommands::Translate(args) => translate(args),
    }
}

fn translate(args: TextTranslateArgs) -> Result<()> {
    output::print_header("Translating text files");

    let client = deepl_client(&args.translation)?;
    let suffix = normalize_suffix(&args.suffix);
    let pairs = prepare_pairs(&args.batch, &format!("*{}", suffix), &suffix)?;

    run_batch(&args.batch, &pairs, "Translating", |pair| {
        translate_file(&client, pair)
    })?;

    Ok(())
}

/// 翻译单个文本文件；空白文件原样写出，不发送请求
pub fn translate_file(service: &dyn TranslationService, pair: &PathPair) -> Result<()> {
    let text = fs::read_text(&pair.source)?;

    let translated = if text.trim().is_empty() {
        text
    } else {
        service.translate_text(&text, TextMode::Plain)?
    };

    fs::write_atomic(&pair.target, translated)
}

/// 后缀统一以 '.' 开头
fn normalize_suffix(suffix: &str) -> String {
    if suffix.starts_with('.') {
        suffix.to_string()
    } else {
        format!(".{}", suffix)
    }
}
