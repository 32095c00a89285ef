//! # graph 子命令 CLI 定义
//!
//! 论证图命令组：
//! - `translate`: 翻译图中全部文本
//! - `render`: 渲染为图像
//! - `convert`: 格式转换
//! - `statistics` (`count`): 语料库统计
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/graph/` 相应模块

use super::common::{BatchArgs, TranslationArgs};
use crate::models::GraphFormat;
use crate::render::{NodeLabel, RankDir, RenderFormat};

use clap::{Args, Subcommand, ValueEnum};
use std::path::PathBuf;

/// graph 主命令参数
#[derive(Args, Debug)]
pub struct GraphArgs {
    #[command(subcommand)]
    pub command: GraphCommands,
}

/// graph 子命令
#[derive(Subcommand, Debug)]
pub enum GraphCommands {
    /// Translate all texts of each graph via DeepL
    Translate(TranslateArgs),

    /// Render each graph to PDF/PNG/SVG (Graphviz) or DOT
    Render(RenderArgs),

    /// Convert each graph to another serialization format
    Convert(ConvertArgs),

    /// Count atom nodes, scheme nodes and edges across all graphs
    #[command(alias = "count")]
    Statistics(StatisticsArgs),
}

/// 命令行可选的图格式
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum FormatArg {
    /// Argument Interchange Format
    Aif,
    /// Online Visualisation of Argument
    Ova,
    /// arguebuf JSON
    Arguebuf,
}

impl From<FormatArg> for GraphFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Aif => GraphFormat::Aif,
            FormatArg::Ova => GraphFormat::Ova,
            FormatArg::Arguebuf => GraphFormat::Arguebuf,
        }
    }
}

// ─────────────────────────────────────────────────────────────
// translate
// ─────────────────────────────────────────────────────────────

/// graph translate 参数
#[derive(Args, Debug)]
pub struct TranslateArgs {
    #[command(flatten)]
    pub batch: BatchArgs,

    #[command(flatten)]
    pub translation: TranslationArgs,

    /// Send multiple requests to DeepL at the same time (default)
    #[arg(long, overrides_with = "sequential")]
    pub parallel: bool,

    /// Translate node texts one request at a time
    #[arg(long, overrides_with = "parallel")]
    pub sequential: bool,

    /// Number of concurrent requests in parallel mode (0 = auto)
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,

    /// Save translated graphs in this format (default: keep the input format)
    #[arg(long, value_enum)]
    pub output_format: Option<FormatArg>,
}

impl TranslateArgs {
    pub fn parallel(&self) -> bool {
        !self.sequential || self.parallel
    }
}

// ─────────────────────────────────────────────────────────────
// render
// ─────────────────────────────────────────────────────────────

/// graph render 参数
#[derive(Args, Debug)]
pub struct RenderArgs {
    #[command(flatten)]
    pub batch: BatchArgs,

    /// Output image format
    #[arg(long, value_enum, default_value_t = RenderFormat::Pdf)]
    pub output_format: RenderFormat,

    /// Node attribute used as label; repeat to join several attributes
    #[arg(long = "node-label", value_enum, default_values_t = [NodeLabel::Text])]
    pub node_labels: Vec<NodeLabel>,

    /// Separator between joined label attributes
    #[arg(long, default_value = "\n", hide_default_value = true)]
    pub label_separator: String,

    /// Remove scheme nodes and connect premises directly to conclusions
    #[arg(long, default_value_t = false)]
    pub strip_schemes: bool,

    /// Minimum space between nodes of the same rank (inches)
    #[arg(long, default_value_t = 0.25)]
    pub nodesep: f64,

    /// Minimum space between ranks (inches)
    #[arg(long, default_value_t = 0.5)]
    pub ranksep: f64,

    /// Wrap node labels after this many characters (0 = no wrapping)
    #[arg(long, default_value_t = 36)]
    pub wrap_col: usize,

    /// Margin around the drawing (inches)
    #[arg(long, default_value_t = 0.0)]
    pub margin: f64,

    /// Font used for labels
    #[arg(long, default_value = "Arial")]
    pub font_name: String,

    /// Font size in points
    #[arg(long, default_value_t = 11.0)]
    pub font_size: f64,

    /// Layout direction
    #[arg(long, value_enum, default_value_t = RankDir::Bt)]
    pub rankdir: RankDir,
}

// ─────────────────────────────────────────────────────────────
// convert
// ─────────────────────────────────────────────────────────────

/// graph convert 参数
#[derive(Args, Debug)]
pub struct ConvertArgs {
    #[command(flatten)]
    pub batch: BatchArgs,

    /// Desired output format of the json files
    #[arg(long, value_enum)]
    pub output_format: FormatArg,
}

// ─────────────────────────────────────────────────────────────
// statistics
// ─────────────────────────────────────────────────────────────

/// graph statistics 参数
#[derive(Args, Debug)]
pub struct StatisticsArgs {
    /// Folder containing the graphs
    pub folder_in: PathBuf,

    /// Glob pattern for input files
    #[arg(long, default_value = "*.json")]
    pub input_glob: String,

    /// Write per-graph counts to this CSV file
    #[arg(long)]
    pub output_csv: Option<PathBuf>,
}
