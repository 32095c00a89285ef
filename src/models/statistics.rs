//! # 图统计数据模型
//!
//! 统计每个图的原子节点、方案节点和边的数量，并汇总整个语料库的
//! 总数、平均值、最大值和最小值。
//!
//! ## 依赖关系
//! - 被 `commands/graph/statistics.rs` 使用
//! - 使用 `models/graph.rs`

use super::graph::ArgumentGraph;
use serde::Serialize;

/// 单个图的计数
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphCounts {
    pub name: String,
    pub atoms: usize,
    pub schemes: usize,
    pub edges: usize,
}

impl GraphCounts {
    pub fn from_graph(graph: &ArgumentGraph) -> Self {
        GraphCounts {
            name: graph.name.clone(),
            atoms: graph.atom_count(),
            schemes: graph.scheme_count(),
            edges: graph.edge_count(),
        }
    }
}

/// 统计指标
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Atoms,
    Schemes,
    Edges,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::Atoms, Metric::Schemes, Metric::Edges];

    pub fn of(&self, counts: &GraphCounts) -> usize {
        match self {
            Metric::Atoms => counts.atoms,
            Metric::Schemes => counts.schemes,
            Metric::Edges => counts.edges,
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Metric::Atoms => write!(f, "Atom nodes"),
            Metric::Schemes => write!(f, "Scheme nodes"),
            Metric::Edges => write!(f, "Edges"),
        }
    }
}

/// 极值及其所在的图
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extremum {
    pub value: usize,
    pub graph: String,
}

/// 单个指标的汇总
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSummary {
    pub metric: Metric,
    pub total: usize,
    pub mean: f64,
    pub max: Option<Extremum>,
    pub min: Option<Extremum>,
}

/// 语料库统计报告
#[derive(Debug, Clone, PartialEq)]
pub struct StatisticsReport {
    pub graphs: Vec<GraphCounts>,
    pub summaries: Vec<MetricSummary>,
}

impl StatisticsReport {
    /// 汇总所有图的计数
    ///
    /// 空输入返回零图、零均值且无极值的报告。
    pub fn from_counts(graphs: Vec<GraphCounts>) -> Self {
        let summaries = Metric::ALL
            .iter()
            .map(|&metric| summarize(metric, &graphs))
            .collect();
        StatisticsReport { graphs, summaries }
    }

    pub fn from_graphs(graphs: &[ArgumentGraph]) -> Self {
        Self::from_counts(graphs.iter().map(GraphCounts::from_graph).collect())
    }

    pub fn graph_count(&self) -> usize {
        self.graphs.len()
    }
}

#[cfg(test)]
impl StatisticsReport {
    pub(crate) fn summary(&self, metric: Metric) -> Option<&MetricSummary> {
        self.summaries.iter().find(|s| s.metric == metric)
    }
}

fn summarize(metric: Metric, graphs: &[GraphCounts]) -> MetricSummary {
    let total: usize = graphs.iter().map(|g| metric.of(g)).sum();
    let mean = if graphs.is_empty() {
        0.0
    } else {
        total as f64 / graphs.len() as f64
    };

    // 相同值时保留最先出现的图
    let mut max: Option<Extremum> = None;
    let mut min: Option<Extremum> = None;
    for g in graphs {
        let value = metric.of(g);
        if max.as_ref().map_or(true, |m| value > m.value) {
            max = Some(Extremum {
                value,
                graph: g.name.clone(),
            });
        }
        if min.as_ref().map_or(true, |m| value < m.value) {
            min = Some(Extremum {
                value,
                graph: g.name.clone(),
            });
        }
    }

    MetricSummary {
        metric,
        total,
        mean,
        max,
        min,
    }
}
