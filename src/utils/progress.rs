//! # 进度条工具
//!
//! 封装 `indicatif` 提供统一的进度条样式。
//! stderr 不是终端时（重定向、测试）进度条被隐藏。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 使用 `indicatif`, `console` crate

use crate::batch::BatchEvent;

use indicatif::{ProgressBar, ProgressStyle};

/// 创建标准进度条
pub fn create_progress_bar(len: u64, message: &str) -> ProgressBar {
    let pb = if console::user_attended_stderr() {
        ProgressBar::new(len)
    } else {
        ProgressBar::hidden()
    };
    if let Ok(style) = ProgressStyle::with_template(
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}",
    ) {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb.set_message(message.to_string());
    pb
}

/// 将批处理事件映射到进度条
///
/// 每个被检查的文件（包括跳过的）推进一格，消息显示当前文件名。
pub fn observe(pb: &ProgressBar, event: &BatchEvent) {
    match event {
        BatchEvent::Started { total } => pb.set_length(*total as u64),
        BatchEvent::Processed { index, label } => {
            pb.set_message(format!("#{} {}", index, label));
            pb.inc(1);
        }
        BatchEvent::Skipped { index, label } => {
            pb.set_message(format!("#{} {} (skipped)", index, label));
            pb.inc(1);
        }
        BatchEvent::Finished => pb.finish_and_clear(),
    }
}
