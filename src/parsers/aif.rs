//! # AIF 格式解析器
//!
//! 解析 AIFdb 导出的 JSON 格式。
//!
//! ## 格式说明
//! ```text
//! {
//!   "nodes": [{"nodeID": "1", "text": "...", "type": "I", "timestamp": "..."}],
//!   "edges": [{"edgeID": "1", "fromID": "1", "toID": "2", "formEdgeID": null}],
//!   "locutions": []
//! }
//! ```
//! 节点类型 `I` 为原子节点，`RA`/`CA`/`PA`/`MA` 为方案节点。
//! 其他类型（`L`, `YA`, `TA` 等对话层节点）及与之相连的边不进入统一模型，
//! 以 AIF 保存时通过写回原始文档保留。
//! 方案节点的 `text` 保存方案名称，`Default ...` 视为未命名。
//!
//! ## 依赖关系
//! - 被 `parsers/mod.rs` 使用
//! - 使用 `models/graph.rs`

use super::{decode_error, flexible_id, id_string, set_text, GraphCodec};
use crate::error::Result;
use crate::models::{ArgumentGraph, AtomNode, Edge, GraphFormat, SchemeKind, SchemeNode};

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize, Deserialize)]
struct AifDocument {
    nodes: Vec<AifNode>,
    #[serde(default)]
    edges: Vec<AifEdge>,
    #[serde(default)]
    locutions: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct AifNode {
    #[serde(rename = "nodeID", deserialize_with = "flexible_id")]
    node_id: String,
    #[serde(default)]
    text: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    timestamp: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct AifEdge {
    #[serde(rename = "edgeID", deserialize_with = "flexible_id")]
    edge_id: String,
    #[serde(rename = "fromID", deserialize_with = "flexible_id")]
    from_id: String,
    #[serde(rename = "toID", deserialize_with = "flexible_id")]
    to_id: String,
    #[serde(rename = "formEdgeID", default)]
    form_edge_id: Option<Value>,
}

/// 未命名方案节点在 AIF 中使用的默认文本
fn default_scheme_text(kind: SchemeKind) -> &'static str {
    match kind {
        SchemeKind::Support => "Default Inference",
        SchemeKind::Attack => "Default Conflict",
        SchemeKind::Preference => "Default Preference",
        SchemeKind::Rephrase => "Default Rephrase",
    }
}

pub struct AifCodec;

impl GraphCodec for AifCodec {
    fn format(&self) -> GraphFormat {
        GraphFormat::Aif
    }

    fn decode(&self, value: Value, name: &str, origin: &str) -> Result<ArgumentGraph> {
        let doc: AifDocument =
            serde_json::from_value(value).map_err(|e| decode_error(GraphFormat::Aif, origin, e))?;

        let mut graph = ArgumentGraph::new(name, GraphFormat::Aif);
        graph.text = doc.text.unwrap_or_default();

        for node in doc.nodes {
            if node.kind == "I" {
                graph.atoms.push(AtomNode {
                    id: node.node_id,
                    text: node.text,
                });
            } else if let Some(kind) = SchemeKind::from_aif_code(&node.kind) {
                let scheme = if node.text.is_empty() || node.text.starts_with("Default ") {
                    None
                } else {
                    Some(node.text)
                };
                graph.schemes.push(SchemeNode {
                    id: node.node_id,
                    kind,
                    scheme,
                });
            }
        }

        graph.edges = doc
            .edges
            .into_iter()
            .map(|e| Edge {
                id: e.edge_id,
                source: e.from_id,
                target: e.to_id,
            })
            .collect();
        graph.prune_dangling_edges();

        Ok(graph)
    }

    fn encode(&self, graph: &ArgumentGraph) -> Result<Value> {
        let atoms = graph.atoms.iter().map(|a| AifNode {
            node_id: a.id.clone(),
            text: a.text.clone(),
            kind: "I".to_string(),
            timestamp: String::new(),
        });
        let schemes = graph.schemes.iter().map(|s| AifNode {
            node_id: s.id.clone(),
            text: s
                .scheme
                .clone()
                .unwrap_or_else(|| default_scheme_text(s.kind).to_string()),
            kind: s.kind.aif_code().to_string(),
            timestamp: String::new(),
        });

        let doc = AifDocument {
            nodes: atoms.chain(schemes).collect(),
            edges: graph
                .edges
                .iter()
                .map(|e| AifEdge {
                    edge_id: e.id.clone(),
                    from_id: e.source.clone(),
                    to_id: e.target.clone(),
                    form_edge_id: None,
                })
                .collect(),
            locutions: Vec::new(),
            text: if graph.text.is_empty() {
                None
            } else {
                Some(graph.text.clone())
            },
        };

        Ok(serde_json::to_value(doc)?)
    }

    fn write_back(&self, mut original: Value, graph: &ArgumentGraph) -> Result<Value> {
        if let Some(nodes) = original.get_mut("nodes").and_then(Value::as_array_mut) {
            for node in nodes {
                let atom = node
                    .get("nodeID")
                    .and_then(id_string)
                    .and_then(|id| graph.atom(&id));
                if let Some(atom) = atom {
                    set_text(node, "text", &atom.text);
                }
            }
        }
        set_text(&mut original, "text", &graph.text);

        Ok(original)
    }
}
