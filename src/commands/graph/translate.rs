//! # graph translate 命令实现
//!
//! 使用 DeepL 批量翻译论证图的文档文本、标注文本和原子节点文本。
//!
//! ## 功能
//! - 语言代码在开始处理前校验
//! - 并行模式下节点文本分块并发请求（rayon 线程池，`--jobs` 控制并发数）
//! - 可选更改输出格式
//!
//! ## 依赖关系
//! - 使用 `cli/graph.rs` 定义的 TranslateArgs
//! - 使用 `translate/` 模块
//! - 使用 `commands/mod.rs` 的批处理流程

use crate::batch::PathPair;
use crate::cli::graph::TranslateArgs;
use crate::commands::{deepl_client, prepare_pairs, run_batch};
use crate::error::{RecapError, Result};
use crate::models::GraphFormat;
use crate::parsers;
use crate::translate::GraphTranslator;
use crate::utils::output;

use rayon::ThreadPool;

/// 执行 translate 命令
pub fn execute(args: TranslateArgs) -> Result<()> {
    output::print_header("Translating argument graphs");

    let client = deepl_client(&args.translation)?;
    let pool = build_pool(args.jobs)?;
    let parallel = args.parallel();
    let format = args.output_format.map(GraphFormat::from);

    if parallel {
        output::print_info(&format!(
            "Parallel mode: up to {} concurrent requests",
            pool.current_num_threads()
        ));
    }

    let pairs = prepare_pairs(&args.batch, "*.json", ".json")?;
    let translator = GraphTranslator::new(&client);

    run_batch(&args.batch, &pairs, "Translating", |pair| {
        translate_pair(&translator, &pool, pair, parallel, format)
    })?;

    Ok(())
}

/// 翻译单个图并写入目标路径
pub fn translate_pair(
    translator: &GraphTranslator<'_>,
    pool: &ThreadPool,
    pair: &PathPair,
    parallel: bool,
    format: Option<GraphFormat>,
) -> Result<()> {
    let mut graph = parsers::load_graph(&pair.source)?;

    pool.install(|| translator.translate_graph(&mut graph, parallel))?;

    if let Some(format) = format {
        graph.category = format;
    }
    parsers::save_graph(&graph, &pair.target)
}

/// 创建并发请求使用的线程池（0 = CPU 核数）
fn build_pool(jobs: usize) -> Result<ThreadPool> {
    let num_threads = if jobs == 0 { num_cpus::get() } else { jobs };

    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build()
        .map_err(|e| RecapError::InvalidArgument(format!("Cannot create thread pool: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::write_file;
    use crate::translate::testing::UppercaseService;

    const ARGUEBUF_GRAPH: &str = r#"{
        "nodes": {
            "c": {"atom": {"text": "Claim"}},
            "p": {"atom": {"text": "Premise"}},
            "s": {"scheme": {"support": {}}}
        },
        "edges": {
            "e1": {"source": "p", "target": "s"},
            "e2": {"source": "s", "target": "c"}
        },
        "text": "Claim because premise.",
        "highlightedText": "<b>Claim</b><br>because premise."
    }"#;

    #[test]
    fn test_translate_pair_writes_translated_graph() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "in/g.json", ARGUEBUF_GRAPH);
        std::fs::create_dir_all(dir.path().join("out")).unwrap();
        let pair = PathPair {
            source: dir.path().join("in/g.json"),
            target: dir.path().join("out/g.json"),
        };

        let service = UppercaseService::default();
        let translator = GraphTranslator::new(&service);
        let pool = build_pool(2).unwrap();

        translate_pair(&translator, &pool, &pair, true, Some(GraphFormat::Ova)).unwrap();

        let graph = parsers::load_graph(&pair.target).unwrap();
        assert_eq!(graph.category, GraphFormat::Ova);
        assert_eq!(graph.text, "CLAIM BECAUSE PREMISE.");
        assert_eq!(
            graph.highlighted_text.as_deref(),
            Some("<B>CLAIM</B><br>BECAUSE PREMISE.")
        );
        let mut texts: Vec<&str> = graph.atoms.iter().map(|a| a.text.as_str()).collect();
        texts.sort();
        assert_eq!(texts, vec!["CLAIM", "PREMISE"]);
        assert_eq!(graph.scheme_count(), 1);
        assert_eq!(graph.edge_count(), 2);
    }

    fn translate_in_place(content: &str) -> serde_json::Value {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "in/g.json", content);
        std::fs::create_dir_all(dir.path().join("out")).unwrap();
        let pair = PathPair {
            source: dir.path().join("in/g.json"),
            target: dir.path().join("out/g.json"),
        };

        let service = UppercaseService::default();
        let pool = build_pool(1).unwrap();
        translate_pair(&GraphTranslator::new(&service), &pool, &pair, false, None).unwrap();

        serde_json::from_str(&std::fs::read_to_string(&pair.target).unwrap()).unwrap()
    }

    #[test]
    fn test_translate_keeps_ova_layout() {
        let saved = translate_in_place(
            r#"{
                "nodes": [{"id": 1, "x": 17, "y": 42, "color": "b", "text": "Claim", "type": "I", "scheme": ""}],
                "edges": [],
                "analysis": {"txt": "", "plain_txt": "Claim.", "documentTitle": "T", "documentSource": "http://src"}
            }"#,
        );

        assert_eq!(saved["nodes"][0]["text"], "CLAIM");
        assert_eq!(saved["nodes"][0]["x"], 17);
        assert_eq!(saved["nodes"][0]["y"], 42);
        assert_eq!(saved["analysis"]["plain_txt"], "CLAIM.");
        assert_eq!(saved["analysis"]["documentTitle"], "T");
        assert_eq!(saved["analysis"]["documentSource"], "http://src");
    }

    #[test]
    fn test_translate_keeps_aif_locutions() {
        let saved = translate_in_place(
            r#"{
                "nodes": [
                    {"nodeID": "1", "text": "Claim", "type": "I", "timestamp": "2020-05-01 12:00:00"},
                    {"nodeID": "2", "text": "Ann: claim", "type": "L", "timestamp": "2020-05-01 12:00:00"},
                    {"nodeID": "3", "text": "Asserting", "type": "YA", "timestamp": "2020-05-01 12:00:00"}
                ],
                "edges": [
                    {"edgeID": "1", "fromID": "2", "toID": "3", "formEdgeID": null},
                    {"edgeID": "2", "fromID": "3", "toID": "1", "formEdgeID": null}
                ],
                "locutions": [{"nodeID": "2", "personID": "1"}]
            }"#,
        );

        assert_eq!(saved["nodes"].as_array().unwrap().len(), 3);
        assert_eq!(saved["nodes"][0]["text"], "CLAIM");
        assert_eq!(saved["nodes"][0]["timestamp"], "2020-05-01 12:00:00");
        assert_eq!(saved["edges"].as_array().unwrap().len(), 2);
        assert_eq!(saved["locutions"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_build_pool_sizes() {
        assert_eq!(build_pool(3).unwrap().current_num_threads(), 3);
        assert!(build_pool(0).unwrap().current_num_threads() >= 1);
    }
}
