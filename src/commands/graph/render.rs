//! # graph render 命令实现
//!
//! 批量渲染论证图为 PDF / PNG / SVG（需要 Graphviz）或 DOT 源文件。
//!
//! ## 依赖关系
//! - 使用 `cli/graph.rs` 定义的 RenderArgs
//! - 使用 `render/` 生成输出
//! - 使用 `commands/mod.rs` 的批处理流程

use crate::cli::graph::RenderArgs;
use crate::commands::{prepare_pairs, run_batch};
use crate::error::Result;
use crate::parsers;
use crate::render::{self, RenderFormat, RenderOptions};
use crate::utils::output;

/// 执行 render 命令
pub fn execute(args: RenderArgs) -> Result<()> {
    output::print_header(&format!("Rendering graphs to {}", args.output_format));

    if args.output_format != RenderFormat::Dot {
        output::print_info("Image output is produced by Graphviz 'dot'");
    }

    let options = render_options(&args);
    let pairs = prepare_pairs(&args.batch, "*.json", args.output_format.suffix())?;

    run_batch(&args.batch, &pairs, "Rendering", |pair| {
        let graph = parsers::load_graph(&pair.source)?;
        render::render_graph(&graph, &options, &pair.target)
    })?;

    Ok(())
}

fn render_options(args: &RenderArgs) -> RenderOptions {
    RenderOptions {
        node_labels: args.node_labels.clone(),
        label_separator: args.label_separator.clone(),
        strip_schemes: args.strip_schemes,
        nodesep: args.nodesep,
        ranksep: args.ranksep,
        wrap_col: args.wrap_col,
        margin: args.margin,
        font_name: args.font_name.clone(),
        font_size: args.font_size,
        rankdir: args.rankdir,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{batch_args, write_file};
    use crate::render::{NodeLabel, RankDir};

    const AIF_GRAPH: &str = r#"{
        "nodes": [
            {"nodeID": "1", "text": "Claim", "type": "I"},
            {"nodeID": "2", "text": "Premise", "type": "I"},
            {"nodeID": "3", "text": "Default Inference", "type": "RA"}
        ],
        "edges": [
            {"edgeID": "1", "fromID": "2", "toID": "3"},
            {"edgeID": "2", "fromID": "3", "toID": "1"}
        ],
        "locutions": []
    }"#;

    fn args(batch: crate::cli::common::BatchArgs) -> RenderArgs {
        RenderArgs {
            batch,
            output_format: RenderFormat::Dot,
            node_labels: vec![NodeLabel::Text],
            label_separator: "\n".to_string(),
            strip_schemes: false,
            nodesep: 0.25,
            ranksep: 0.5,
            wrap_col: 36,
            margin: 0.0,
            font_name: "Arial".to_string(),
            font_size: 11.0,
            rankdir: RankDir::Bt,
        }
    }

    #[test]
    fn test_render_from_start_index() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        for name in ["g1.json", "g2.json", "g3.json"] {
            write_file(input.path(), name, AIF_GRAPH);
        }

        let mut batch = batch_args(input.path(), output.path());
        batch.start = 2;
        execute(args(batch)).unwrap();

        assert!(!output.path().join("g1.dot").exists());
        assert!(output.path().join("g2.dot").exists());
        assert!(output.path().join("g3.dot").exists());
    }

    #[test]
    fn test_render_options_from_args() {
        let output = tempfile::tempdir().unwrap();
        let mut render_args = args(batch_args(output.path(), output.path()));
        render_args.strip_schemes = true;
        render_args.node_labels = vec![NodeLabel::Id, NodeLabel::Text];

        let options = render_options(&render_args);

        assert!(options.strip_schemes);
        assert_eq!(options.node_labels, vec![NodeLabel::Id, NodeLabel::Text]);
        assert_eq!(options.rankdir, RankDir::Bt);
    }
}
