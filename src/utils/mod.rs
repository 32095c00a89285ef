//! # 工具函数模块
//!
//! 提供美化输出、进度条、原子写入等文件操作工具。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 子模块: fs, output, progress

pub mod fs;
pub mod output;
pub mod progress;
