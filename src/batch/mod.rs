//! # 批量处理模块
//!
//! 提供统一的文件批量处理能力。
//!
//! ## 功能
//! - 收集匹配文件并计算镜像输出路径
//! - 断点续跑（起始偏移 / 跳过已有输出）
//! - 进度事件回调
//!
//! ## 依赖关系
//! - 被各命令模块使用
//! - 使用 `walkdir`, `glob`

pub mod pairs;
pub mod runner;

pub use pairs::{collect_files, resolve, PathPair};
pub use runner::{BatchEvent, BatchRunner, BatchSummary};
