//! # graph 命令实现
//!
//! 论证图命令组统一入口。
//!
//! ## 依赖关系
//! - 使用 `cli/graph.rs` 定义的参数
//! - 子模块: translate, render, convert, statistics

pub mod convert;
pub mod render;
pub mod statistics;
pub mod translate;

use crate::cli::graph::{GraphArgs, GraphCommands};
use crate::error::Result;

/// 执行 graph 子命令
pub fn execute(args: GraphArgs) -> Result<()> {
    match args.command {
        GraphCommands::Translate(args) => translate::execute(args),
        GraphCommands::Render(args) => render::execute(args),
        GraphCommands::Convert(args) => convert::execute(args),
        GraphCommands::Statistics(args) => statistics::execute(args),
    }
}
