//! # arguebuf 格式解析器
//!
//! ## 格式说明
//! ```text
//! {
//!   "nodes": {
//!     "a1": {"atom": {"text": "..."}},
//!     "s1": {"scheme": {"support": {}, "name": "..."}}
//!   },
//!   "edges": {"e1": {"source": "a1", "target": "s1"}},
//!   "text": "...",
//!   "highlightedText": "..."
//! }
//! ```
//! 方案节点的关系类型由 `support` / `attack` / `preference` / `rephrase` 键给出。
//!
//! ## 依赖关系
//! - 被 `parsers/mod.rs` 使用
//! - 使用 `models/graph.rs`

use super::{decode_error, set_text, GraphCodec};
use crate::error::{RecapError, Result};
use crate::models::{ArgumentGraph, AtomNode, Edge, GraphFormat, SchemeKind, SchemeNode};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct ArguebufDocument {
    #[serde(rename = "schemaVersion", default)]
    schema_version: u32,
    nodes: BTreeMap<String, ArguebufNode>,
    #[serde(default)]
    edges: BTreeMap<String, ArguebufEdge>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    text: String,
    #[serde(
        rename = "highlightedText",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    highlighted_text: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum ArguebufNode {
    Atom { text: String },
    Scheme(ArguebufScheme),
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct ArguebufScheme {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    support: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    attack: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    preference: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    rephrase: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

impl ArguebufScheme {
    fn new(kind: SchemeKind, name: Option<String>) -> Self {
        let marker = Some(Value::Object(Map::new()));
        let mut scheme = ArguebufScheme {
            name,
            ..Default::default()
        };
        match kind {
            SchemeKind::Support => scheme.support = marker,
            SchemeKind::Attack => scheme.attack = marker,
            SchemeKind::Preference => scheme.preference = marker,
            SchemeKind::Rephrase => scheme.rephrase = marker,
        }
        scheme
    }

    fn kind(&self) -> Option<SchemeKind> {
        [
            (&self.support, SchemeKind::Support),
            (&self.attack, SchemeKind::Attack),
            (&self.preference, SchemeKind::Preference),
            (&self.rephrase, SchemeKind::Rephrase),
        ]
        .into_iter()
        .find(|(value, _)| value.is_some())
        .map(|(_, kind)| kind)
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct ArguebufEdge {
    source: String,
    target: String,
}

pub struct ArguebufCodec;

impl GraphCodec for ArguebufCodec {
    fn format(&self) -> GraphFormat {
        GraphFormat::Arguebuf
    }

    fn decode(&self, value: Value, name: &str, origin: &str) -> Result<ArgumentGraph> {
        let doc: ArguebufDocument = serde_json::from_value(value)
            .map_err(|e| decode_error(GraphFormat::Arguebuf, origin, e))?;

        let mut graph = ArgumentGraph::new(name, GraphFormat::Arguebuf);
        graph.text = doc.text;
        graph.highlighted_text = doc.highlighted_text;

        for (id, node) in doc.nodes {
            match node {
                ArguebufNode::Atom { text } => graph.atoms.push(AtomNode { id, text }),
                ArguebufNode::Scheme(scheme) => {
                    let kind = scheme.kind().ok_or_else(|| RecapError::ParseError {
                        format: GraphFormat::Arguebuf.to_string(),
                        path: origin.to_string(),
                        reason: format!("scheme node '{}' has no relation type", id),
                    })?;
                    graph.schemes.push(SchemeNode {
                        id,
                        kind,
                        scheme: scheme.name,
                    });
                }
            }
        }

        graph.edges = doc
            .edges
            .into_iter()
            .map(|(id, e)| Edge {
                id,
                source: e.source,
                target: e.target,
            })
            .collect();
        graph.prune_dangling_edges();

        Ok(graph)
    }

    fn encode(&self, graph: &ArgumentGraph) -> Result<Value> {
        let mut nodes = BTreeMap::new();
        for atom in &graph.atoms {
            nodes.insert(
                atom.id.clone(),
                ArguebufNode::Atom {
                    text: atom.text.clone(),
                },
            );
        }
        for scheme in &graph.schemes {
            nodes.insert(
                scheme.id.clone(),
                ArguebufNode::Scheme(ArguebufScheme::new(scheme.kind, scheme.scheme.clone())),
            );
        }

        let edges = graph
            .edges
            .iter()
            .map(|e| {
                (
                    e.id.clone(),
                    ArguebufEdge {
                        source: e.source.clone(),
                        target: e.target.clone(),
                    },
                )
            })
            .collect();

        let doc = ArguebufDocument {
            schema_version: SCHEMA_VERSION,
            nodes,
            edges,
            text: graph.text.clone(),
            highlighted_text: graph.highlighted_text.clone(),
        };

        Ok(serde_json::to_value(doc)?)
    }

    fn write_back(&self, mut original: Value, graph: &ArgumentGraph) -> Result<Value> {
        if let Some(nodes) = original.get_mut("nodes").and_then(Value::as_object_mut) {
            for (id, node) in nodes.iter_mut() {
                if let (Some(atom), Some(content)) = (graph.atom(id), node.get_mut("atom")) {
                    set_text(content, "text", &atom.text);
                }
            }
        }

        set_text(&mut original, "text", &graph.text);
        if let Some(ref highlighted) = graph.highlighted_text {
            set_text(&mut original, "highlightedText", highlighted);
        }

        Ok(original)
    }
}
