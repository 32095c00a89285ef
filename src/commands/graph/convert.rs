//! # graph convert 命令实现
//!
//! 批量转换论证图的序列化格式（AIF / OVA / arguebuf）。
//! 纯格式转换，不改变图的内容。
//!
//! ## 依赖关系
//! - 使用 `cli/graph.rs` 定义的 ConvertArgs
//! - 使用 `parsers/` 读写图
//! - 使用 `commands/mod.rs` 的批处理流程

use crate::batch::PathPair;
use crate::cli::graph::ConvertArgs;
use crate::commands::{prepare_pairs, run_batch};
use crate::error::Result;
use crate::models::GraphFormat;
use crate::parsers;
use crate::utils::output;

/// 执行 convert 命令
pub fn execute(args: ConvertArgs) -> Result<()> {
    let format = GraphFormat::from(args.output_format);
    output::print_header(&format!("Converting graphs to {} format", format));

    let pairs = prepare_pairs(&args.batch, "*.json", ".json")?;

    run_batch(&args.batch, &pairs, "Converting", |pair| {
        convert_graph(pair, format)
    })?;

    Ok(())
}

/// 转换单个图
pub fn convert_graph(pair: &PathPair, format: GraphFormat) -> Result<()> {
    let mut graph = parsers::load_graph(&pair.source)?;
    graph.category = format;
    parsers::save_graph(&graph, &pair.target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::graph::FormatArg;
    use crate::commands::testing::{batch_args, write_file};
    use crate::error::RecapError;

    const OVA_GRAPH: &str = r#"{
        "nodes": [
            {"id": 1, "text": "Claim", "type": "I"},
            {"id": 2, "text": "Premise", "type": "I"}
        ],
        "edges": [{"from": {"id": 2}, "to": {"id": 1}}],
        "analysis": {"txt": "", "plain_txt": "Claim. Premise."}
    }"#;

    #[test]
    fn test_convert_mirrors_tree_and_changes_format() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        write_file(input.path(), "a.json", OVA_GRAPH);
        write_file(input.path(), "b/c.json", OVA_GRAPH);

        execute(ConvertArgs {
            batch: batch_args(input.path(), output.path()),
            output_format: FormatArg::Aif,
        })
        .unwrap();

        for relative in ["a.json", "b/c.json"] {
            let original = parsers::load_graph(&input.path().join(relative)).unwrap();
            let converted = parsers::load_graph(&output.path().join(relative)).unwrap();

            assert_eq!(original.category, GraphFormat::Ova);
            assert_eq!(converted.category, GraphFormat::Aif);
            assert_eq!(converted.atom_count(), original.atom_count());
            assert_eq!(converted.scheme_count(), original.scheme_count());
            assert_eq!(converted.edge_count(), original.edge_count());
            assert_eq!(converted.text, "Claim. Premise.");
        }
    }

    #[test]
    fn test_convert_to_same_format_keeps_document() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        write_file(
            input.path(),
            "a.json",
            r#"{
                "nodes": [{"id": 1, "x": 17, "y": 42, "color": "b", "text": "Claim", "type": "I"}],
                "edges": [],
                "analysis": {"txt": "", "plain_txt": "Claim.", "documentSource": "http://src"}
            }"#,
        );

        execute(ConvertArgs {
            batch: batch_args(input.path(), output.path()),
            output_format: FormatArg::Ova,
        })
        .unwrap();

        let content = std::fs::read_to_string(output.path().join("a.json")).unwrap();
        let saved: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(saved["nodes"][0]["x"], 17);
        assert_eq!(saved["analysis"]["documentSource"], "http://src");
    }

    #[test]
    fn test_convert_skips_existing_outputs() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        write_file(input.path(), "a.json", OVA_GRAPH);
        write_file(output.path(), "a.json", "already converted");

        execute(ConvertArgs {
            batch: batch_args(input.path(), output.path()),
            output_format: FormatArg::Arguebuf,
        })
        .unwrap();

        let content = std::fs::read_to_string(output.path().join("a.json")).unwrap();
        assert_eq!(content, "already converted");
    }

    #[test]
    fn test_convert_aborts_on_invalid_graph() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        write_file(input.path(), "a.json", OVA_GRAPH);
        write_file(input.path(), "b.json", "{ broken");
        write_file(input.path(), "c.json", OVA_GRAPH);

        let result = execute(ConvertArgs {
            batch: batch_args(input.path(), output.path()),
            output_format: FormatArg::Aif,
        });

        assert!(matches!(result, Err(RecapError::ParseError { .. })));
        assert!(output.path().join("a.json").exists());
        assert!(!output.path().join("b.json").exists());
        assert!(!output.path().join("c.json").exists());
    }
}
