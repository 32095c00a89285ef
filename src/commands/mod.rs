//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑，以及批处理命令共用的准备与执行流程。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `batch/`, `parsers/`, `translate/`, `render/`, `utils/`
//! - 子模块: graph, text

pub mod graph;
pub mod text;

use crate::batch::{self, BatchRunner, BatchSummary, PathPair};
use crate::cli::common::{BatchArgs, TranslationArgs};
use crate::cli::Commands;
use crate::error::{RecapError, Result};
use crate::translate::{DeeplClient, DeeplConfig, Language, LanguageRole};
use crate::utils::{fs, output, progress};

use std::time::Duration;

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Graph(args) => graph::execute(args),
        Commands::Text(args) => text::execute(args),
    }
}

/// 准备批处理：校验输入目录、按需清空输出目录、解析路径对
pub(crate) fn prepare_pairs(
    batch: &BatchArgs,
    default_pattern: &str,
    output_suffix: &str,
) -> Result<Vec<PathPair>> {
    if !batch.folder_in.is_dir() {
        return Err(RecapError::DirectoryNotFound {
            path: batch.folder_in.display().to_string(),
        });
    }

    fs::check_output_location(&batch.folder_out, &batch.folder_in)?;

    if batch.clean() {
        output::print_warning(&format!(
            "Removing all contents of '{}'",
            batch.folder_out.display()
        ));
        fs::clean_output_dir(&batch.folder_out, &batch.folder_in)?;
    } else {
        fs::ensure_dir(&batch.folder_out)?;
    }

    let pattern = batch.pattern_or(default_pattern);
    let pairs = batch::resolve(&batch.folder_in, &batch.folder_out, &pattern, output_suffix)?;

    if pairs.is_empty() {
        output::print_warning(&format!(
            "No files matched '{}' under {}",
            pattern,
            batch.folder_in.display()
        ));
    } else {
        output::print_info(&format!("Found {} files", pairs.len()));
    }

    Ok(pairs)
}

/// 带进度条地顺序执行批处理，第一个错误中止运行
pub(crate) fn run_batch<F>(
    batch: &BatchArgs,
    pairs: &[PathPair],
    message: &str,
    mut operation: F,
) -> Result<BatchSummary>
where
    F: FnMut(&PathPair) -> Result<()>,
{
    let runner = BatchRunner::new(batch.start(), batch.overwrite())?;
    let pb = progress::create_progress_bar(pairs.len() as u64, message);

    let result = runner.run(
        pairs,
        |pair| {
            operation(pair).map_err(|e| {
                pb.suspend(|| {
                    output::print_error(&format!("Aborted at '{}'", pair.source.display()));
                });
                e
            })
        },
        |event| progress::observe(&pb, event),
    );

    if result.is_err() {
        pb.abandon();
    }
    let summary = result?;

    output::print_done(&format!(
        "{} of {} file(s) processed into '{}' ({} skipped)",
        summary.processed,
        summary.total(),
        batch.folder_out.display(),
        summary.skipped
    ));

    Ok(summary)
}

/// 根据命令行参数创建 DeepL 客户端（先校验语言代码）
pub(crate) fn deepl_client(args: &TranslationArgs) -> Result<DeeplClient> {
    let source = Language::parse(&args.source_lang, LanguageRole::Source)?;
    let target = Language::parse(&args.target_lang, LanguageRole::Target)?;

    output::print_info(&format!("Translating from '{}' to '{}'", source, target));

    DeeplClient::new(DeeplConfig {
        auth_key: args.auth_key.clone(),
        source,
        target,
        endpoint: args.api_url.clone(),
        timeout: Duration::from_secs(args.timeout),
        max_retries: args.retries,
    })
}
