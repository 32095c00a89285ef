//! # graph statistics 命令实现
//!
//! 统计语料库中每个图的原子节点、方案节点和边的数量。
//!
//! ## 功能
//! - 先加载全部匹配的图，再计算汇总
//! - 终端表格显示总数、平均值、最大值、最小值
//! - 可选导出每个图的计数到 CSV
//!
//! ## 依赖关系
//! - 使用 `cli/graph.rs` 定义的 StatisticsArgs
//! - 使用 `models/statistics.rs` 汇总
//! - 使用 `tabled` 显示表格，`csv` 导出

use crate::batch::collect_files;
use crate::cli::graph::StatisticsArgs;
use crate::error::{RecapError, Result};
use crate::models::statistics::Extremum;
use crate::models::{ArgumentGraph, StatisticsReport};
use crate::parsers;
use crate::utils::{output, progress};

use std::path::{Path, PathBuf};
use tabled::{Table, Tabled};

/// 汇总表格行
#[derive(Debug, Clone, Tabled)]
struct SummaryRow {
    #[tabled(rename = "Metric")]
    metric: String,
    #[tabled(rename = "Total")]
    total: usize,
    #[tabled(rename = "Mean")]
    mean: String,
    #[tabled(rename = "Max")]
    max: String,
    #[tabled(rename = "Min")]
    min: String,
}

/// 执行 statistics 命令
pub fn execute(args: StatisticsArgs) -> Result<()> {
    output::print_header("Argument Graph Statistics");

    let files = collect_files(&args.folder_in, &args.input_glob)?;
    if files.is_empty() {
        output::print_warning(&format!(
            "No files matched '{}' under {}",
            args.input_glob,
            args.folder_in.display()
        ));
    }

    let report = statistics(&args.folder_in, &files)?;

    output::print_info(&format!("Graphs: {}", report.graph_count()));
    println!("{}", Table::new(summary_rows(&report)));

    if let Some(ref csv_path) = args.output_csv {
        save_counts_csv(&report, csv_path)?;
        output::print_success(&format!(
            "Per-graph counts saved to '{}'",
            csv_path.display()
        ));
    }

    Ok(())
}

/// 加载全部文件后汇总计数
pub fn statistics(root: &Path, files: &[PathBuf]) -> Result<StatisticsReport> {
    let graphs = load_all(root, files)?;
    Ok(StatisticsReport::from_graphs(&graphs))
}

/// 加载全部图；图名使用相对于输入目录的路径，避免不同子目录中的同名文件混淆
fn load_all(root: &Path, files: &[PathBuf]) -> Result<Vec<ArgumentGraph>> {
    let pb = progress::create_progress_bar(files.len() as u64, "Loading");

    let mut graphs = Vec::with_capacity(files.len());
    for file in files {
        let mut graph = parsers::load_graph(file)?;
        if let Ok(relative) = file.strip_prefix(root) {
            graph.name = relative.display().to_string();
        }
        graphs.push(graph);
        pb.inc(1);
    }

    pb.finish_and_clear();
    Ok(graphs)
}

fn format_extremum(extremum: &Option<Extremum>) -> String {
    match extremum {
        Some(e) => format!("{} ({})", e.value, e.graph),
        None => "-".to_string(),
    }
}

fn summary_rows(report: &StatisticsReport) -> Vec<SummaryRow> {
    report
        .summaries
        .iter()
        .map(|s| SummaryRow {
            metric: s.metric.to_string(),
            total: s.total,
            mean: format!("{:.2}", s.mean),
            max: format_extremum(&s.max),
            min: format_extremum(&s.min),
        })
        .collect()
}

/// 保存每个图的计数到 CSV（空语料库也写表头）
fn save_counts_csv(report: &StatisticsReport, output_path: &Path) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(output_path)
        .map_err(RecapError::CsvError)?;

    wtr.write_record(["name", "atoms", "schemes", "edges"])
        .map_err(RecapError::CsvError)?;
    for counts in &report.graphs {
        wtr.serialize(counts).map_err(RecapError::CsvError)?;
    }

    wtr.flush().map_err(|e| RecapError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}
