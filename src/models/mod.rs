//! # 数据模型模块
//!
//! 定义统一的论证图和统计结果数据模型。
//!
//! ## 依赖关系
//! - 被 `parsers/` 和 `commands/` 使用
//! - 子模块: graph, statistics

pub mod graph;
pub mod statistics;

pub use graph::{
    ArgumentGraph, AtomNode, Edge, GraphFormat, SchemeKind, SchemeNode, SourceDocument,
};
pub use statistics::StatisticsReport;
