//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `graph`: 论证图命令组（嵌套子命令）
//!   - `translate`, `render`, `convert`, `statistics` (`count`)
//! - `text`: 纯文本命令组
//!   - `translate`
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: common, graph, text

pub mod common;
pub mod graph;
pub mod text;

use clap::{Parser, Subcommand};

/// recap-utils - 论证图批处理工具
#[derive(Parser, Debug)]
#[command(name = "recap-utils")]
#[command(version)]
#[command(about = "Batch utilities for argument graphs and plain texts", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Command group for dealing with argument graphs
    Graph(graph::GraphArgs),

    /// Command group for dealing with plain texts
    Text(text::TextArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::graph::{FormatArg, GraphCommands};
    use crate::render::NodeLabel;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_render_flags() {
        let cli = Cli::try_parse_from([
            "recap-utils",
            "graph",
            "render",
            "in",
            "out",
            "--start",
            "2",
            "--node-label",
            "id",
            "--node-label",
            "text",
            "--clean",
            "--no-clean",
        ])
        .unwrap();

        let Commands::Graph(graph) = cli.command else {
            panic!("expected graph command");
        };
        let GraphCommands::Render(args) = graph.command else {
            panic!("expected render command");
        };
        assert_eq!(args.batch.start(), 2);
        assert_eq!(args.node_labels, vec![NodeLabel::Id, NodeLabel::Text]);
        assert!(!args.batch.clean());
        assert!(!args.batch.overwrite());
    }

    #[test]
    fn test_start_zero_rejected() {
        let result = Cli::try_parse_from([
            "recap-utils",
            "graph",
            "convert",
            "in",
            "out",
            "--output-format",
            "aif",
            "--start",
            "0",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_count_alias_and_translate_defaults() {
        let cli = Cli::try_parse_from(["recap-utils", "graph", "count", "in"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Graph(graph::GraphArgs {
                command: GraphCommands::Statistics(_)
            })
        ));

        let cli = Cli::try_parse_from([
            "recap-utils",
            "graph",
            "translate",
            "in",
            "out",
            "--source-lang",
            "en",
            "--target-lang",
            "de",
            "--auth-key",
            "secret",
            "--sequential",
            "--output-format",
            "ova",
        ])
        .unwrap();
        let Commands::Graph(graph) = cli.command else {
            panic!("expected graph command");
        };
        let GraphCommands::Translate(args) = graph.command else {
            panic!("expected translate command");
        };
        assert!(!args.parallel());
        assert_eq!(args.output_format, Some(FormatArg::Ova));
        assert_eq!(args.translation.timeout, 60);
    }
}
