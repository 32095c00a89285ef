//! # OVA 格式解析器
//!
//! 解析 OVA 标注工具保存的 JSON 格式。
//!
//! ## 格式说明
//! ```text
//! {
//!   "nodes": [{"id": 1, "x": 0, "y": 0, "color": "b", "text": "...", "type": "I", "scheme": ""}],
//!   "edges": [{"from": {"id": 1}, "to": {"id": 2}, "visible": true}],
//!   "analysis": {"txt": "<span>...</span><br>...", "plain_txt": "...", ...}
//! }
//! ```
//! `analysis.txt` 是带标注的文本，`analysis.plain_txt` 是纯文本。
//! OVA 节点 id 为整数，新建文档时非数字 id 会被重新编号。
//! 以 OVA 保存 OVA 来源的图时写回原始文档，节点坐标、颜色与分析元数据保持不变。
//!
//! ## 依赖关系
//! - 被 `parsers/mod.rs` 使用
//! - 使用 `models/graph.rs`

use super::{decode_error, flexible_id, id_string, set_text, GraphCodec};
use crate::error::Result;
use crate::models::{ArgumentGraph, AtomNode, Edge, GraphFormat, SchemeKind, SchemeNode};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Serialize, Deserialize)]
struct OvaDocument {
    nodes: Vec<OvaNode>,
    #[serde(default)]
    edges: Vec<OvaEdge>,
    #[serde(default)]
    analysis: OvaAnalysis,
}

#[derive(Debug, Serialize, Deserialize)]
struct OvaNode {
    #[serde(deserialize_with = "flexible_id")]
    id: String,
    #[serde(default)]
    x: f64,
    #[serde(default)]
    y: f64,
    #[serde(default)]
    color: String,
    #[serde(default)]
    text: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    scheme: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct OvaEdgeEnd {
    #[serde(deserialize_with = "flexible_id")]
    id: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct OvaEdge {
    from: OvaEdgeEnd,
    to: OvaEdgeEnd,
    #[serde(default = "visible_default")]
    visible: bool,
}

fn visible_default() -> bool {
    true
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct OvaAnalysis {
    #[serde(default)]
    txt: String,
    #[serde(default)]
    plain_txt: String,
    #[serde(rename = "documentTitle", default)]
    document_title: String,
    #[serde(rename = "documentSource", default)]
    document_source: String,
}

/// OVA 节点颜色代码
fn node_color(kind: Option<SchemeKind>) -> &'static str {
    match kind {
        None => "b",
        Some(SchemeKind::Support) => "g",
        Some(SchemeKind::Attack) => "r",
        Some(SchemeKind::Preference) => "p",
        Some(SchemeKind::Rephrase) => "y",
    }
}

/// 为所有节点分配整数 id：原 id 全部为唯一整数时保留，否则按顺序重新编号
fn numeric_ids(graph: &ArgumentGraph) -> HashMap<String, i64> {
    let ids: Vec<&str> = graph
        .atoms
        .iter()
        .map(|a| a.id.as_str())
        .chain(graph.schemes.iter().map(|s| s.id.as_str()))
        .collect();

    let parsed: Vec<Option<i64>> = ids.iter().map(|id| id.parse::<i64>().ok()).collect();
    let unique: HashSet<i64> = parsed.iter().flatten().copied().collect();

    if parsed.iter().all(Option::is_some) && unique.len() == ids.len() {
        ids.iter()
            .zip(parsed)
            .filter_map(|(id, n)| n.map(|n| (id.to_string(), n)))
            .collect()
    } else {
        ids.iter()
            .enumerate()
            .map(|(i, id)| (id.to_string(), i as i64 + 1))
            .collect()
    }
}

pub struct OvaCodec;

impl GraphCodec for OvaCodec {
    fn format(&self) -> GraphFormat {
        GraphFormat::Ova
    }

    fn decode(&self, value: Value, name: &str, origin: &str) -> Result<ArgumentGraph> {
        let doc: OvaDocument =
            serde_json::from_value(value).map_err(|e| decode_error(GraphFormat::Ova, origin, e))?;

        let mut graph = ArgumentGraph::new(name, GraphFormat::Ova);
        graph.text = doc.analysis.plain_txt;
        if !doc.analysis.txt.is_empty() {
            graph.highlighted_text = Some(doc.analysis.txt);
        }

        for node in doc.nodes {
            if node.kind == "I" || node.kind == "EN" {
                graph.atoms.push(AtomNode {
                    id: node.id,
                    text: node.text,
                });
            } else if let Some(kind) = SchemeKind::from_aif_code(&node.kind) {
                // 新版 OVA 在 scheme 字段保存方案名称，旧版写在 text 中
                let scheme = [node.scheme, node.text]
                    .into_iter()
                    .find(|s| !s.is_empty() && !s.starts_with("Default "));
                graph.schemes.push(SchemeNode {
                    id: node.id,
                    kind,
                    scheme,
                });
            }
        }

        graph.edges = doc
            .edges
            .into_iter()
            .enumerate()
            .map(|(i, e)| Edge {
                id: (i + 1).to_string(),
                source: e.from.id,
                target: e.to.id,
            })
            .collect();
        graph.prune_dangling_edges();

        Ok(graph)
    }

    fn encode(&self, graph: &ArgumentGraph) -> Result<Value> {
        let ids = numeric_ids(graph);
        let id_of = |id: &str| ids.get(id).copied().unwrap_or_default().to_string();

        let mut nodes = Vec::new();
        for (i, atom) in graph.atoms.iter().enumerate() {
            nodes.push(OvaNode {
                id: id_of(&atom.id),
                x: i as f64 * 250.0,
                y: 300.0,
                color: node_color(None).to_string(),
                text: atom.text.clone(),
                kind: "I".to_string(),
                scheme: String::new(),
            });
        }
        for (i, scheme) in graph.schemes.iter().enumerate() {
            nodes.push(OvaNode {
                id: id_of(&scheme.id),
                x: i as f64 * 250.0,
                y: 150.0,
                color: node_color(Some(scheme.kind)).to_string(),
                text: scheme
                    .scheme
                    .clone()
                    .unwrap_or_else(|| scheme.kind.aif_code().to_string()),
                kind: scheme.kind.aif_code().to_string(),
                scheme: scheme.scheme.clone().unwrap_or_default(),
            });
        }

        let edges = graph
            .edges
            .iter()
            .map(|e| OvaEdge {
                from: OvaEdgeEnd {
                    id: id_of(&e.source),
                },
                to: OvaEdgeEnd {
                    id: id_of(&e.target),
                },
                visible: true,
            })
            .collect();

        let doc = OvaDocument {
            nodes,
            edges,
            analysis: OvaAnalysis {
                txt: graph.highlighted_text.clone().unwrap_or_default(),
                plain_txt: graph.text.clone(),
                document_title: graph.name.clone(),
                document_source: String::new(),
            },
        };

        let mut value = serde_json::to_value(doc)?;
        integer_ids(&mut value);
        Ok(value)
    }

    fn write_back(&self, mut original: Value, graph: &ArgumentGraph) -> Result<Value> {
        if let Some(nodes) = original.get_mut("nodes").and_then(Value::as_array_mut) {
            for node in nodes {
                let atom = node
                    .get("id")
                    .and_then(id_string)
                    .and_then(|id| graph.atom(&id));
                if let Some(atom) = atom {
                    set_text(node, "text", &atom.text);
                }
            }
        }

        if let Some(root) = original.as_object_mut() {
            let analysis = root
                .entry("analysis")
                .or_insert_with(|| Value::Object(Map::new()));
            set_text(analysis, "plain_txt", &graph.text);
            if let Some(ref highlighted) = graph.highlighted_text {
                set_text(analysis, "txt", highlighted);
            }
        }

        Ok(original)
    }
}

/// 将序列化后的字符串 id 改写为 OVA 要求的整数
fn integer_ids(value: &mut Value) {
    let rewrite = |v: &mut Value| {
        if let Some(n) = v.as_str().and_then(|s| s.parse::<i64>().ok()) {
            *v = Value::from(n);
        }
    };

    if let Some(nodes) = value.get_mut("nodes").and_then(Value::as_array_mut) {
        for node in nodes {
            if let Some(id) = node.get_mut("id") {
                rewrite(id);
            }
        }
    }
    if let Some(edges) = value.get_mut("edges").and_then(Value::as_array_mut) {
        for edge in edges {
            for end in ["from", "to"] {
                if let Some(id) = edge.get_mut(end).and_then(|e| e.get_mut("id")) {
                    rewrite(id);
                }
            }
        }
    }
}
