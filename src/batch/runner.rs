//! # 批量执行器
//!
//! 按顺序对路径对执行操作。
//!
//! ## 功能
//! - 从 1 开始的起始偏移（断点续跑）
//! - 目标已存在且未要求覆盖时跳过
//! - 通过观察者回调报告进度，不依赖全局状态
//! - 第一个失败的操作中止整个运行，之前写入的输出保留
//!
//! ## 依赖关系
//! - 被 `commands/` 调用
//! - 使用 `batch/pairs.rs` 的 PathPair

use super::pairs::PathPair;
use crate::error::{RecapError, Result};

/// 批处理进度事件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchEvent {
    /// 开始处理，`total` 为选中范围内的路径对数
    Started { total: usize },
    /// 已执行操作（`index` 为在完整序列中从 1 开始的位置）
    Processed { index: usize, label: String },
    /// 目标已存在，跳过
    Skipped { index: usize, label: String },
    Finished,
}

/// 批量处理结果统计
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    pub processed: usize,
    pub skipped: usize,
}

impl BatchSummary {
    pub fn total(&self) -> usize {
        self.processed + self.skipped
    }
}

/// 批量执行器
#[derive(Debug, Clone)]
pub struct BatchRunner {
    /// 起始位置（从 1 开始）
    start: usize,
    /// 是否覆盖已存在的输出
    overwrite: bool,
}

impl BatchRunner {
    /// 创建新的批量执行器，`start` 必须 >= 1
    pub fn new(start: usize, overwrite: bool) -> Result<Self> {
        if start == 0 {
            return Err(RecapError::InvalidArgument(
                "Start index is 1-based and must be at least 1".to_string(),
            ));
        }
        Ok(Self { start, overwrite })
    }

    /// 选中的路径对范围；超出末尾时为空
    pub fn select<'a>(&self, pairs: &'a [PathPair]) -> &'a [PathPair] {
        let offset = (self.start - 1).min(pairs.len());
        &pairs[offset..]
    }

    /// 顺序处理路径对
    pub fn run<F, O>(&self, pairs: &[PathPair], mut operation: F, mut observer: O) -> Result<BatchSummary>
    where
        F: FnMut(&PathPair) -> Result<()>,
        O: FnMut(&BatchEvent),
    {
        let selected = self.select(pairs);
        let mut summary = BatchSummary::default();

        observer(&BatchEvent::Started {
            total: selected.len(),
        });

        for (offset, pair) in selected.iter().enumerate() {
            let index = self.start + offset;
            let label = pair.label();

            if !self.overwrite && pair.target.exists() {
                summary.skipped += 1;
                observer(&BatchEvent::Skipped { index, label });
                continue;
            }

            operation(pair)?;
            summary.processed += 1;
            observer(&BatchEvent::Processed { index, label });
        }

        observer(&BatchEvent::Finished);
        Ok(summary)
    }
}
