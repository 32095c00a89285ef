//! # Graphviz DOT 生成
//!
//! 将论证图转换为 DOT 描述。
//!
//! ## 样式
//! - 原子节点：圆角矩形，标签按列宽自动换行
//! - 方案节点：支持为绿色、攻击为红色、偏好为蓝色、改述为黄色
//!
//! ## 依赖关系
//! - 被 `render/mod.rs` 使用
//! - 使用 `models/graph.rs`

use super::{NodeLabel, RenderOptions};
use crate::models::{ArgumentGraph, AtomNode, SchemeKind, SchemeNode};

/// 方案节点填充颜色
fn scheme_color(kind: SchemeKind) -> &'static str {
    match kind {
        SchemeKind::Support => "#4CAF50",
        SchemeKind::Attack => "#F44336",
        SchemeKind::Preference => "#2196F3",
        SchemeKind::Rephrase => "#FFEB3B",
    }
}

/// 按单词把文本折行到指定列宽（0 表示不折行）
pub fn wrap_text(text: &str, width: usize) -> String {
    if width == 0 {
        return text.split_whitespace().collect::<Vec<_>>().join(" ");
    }

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let current_len = current.chars().count();
        if current_len > 0 && current_len + 1 + word.chars().count() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }

    lines.join("\n")
}

/// 每个属性单独折行后再用分隔符连接
fn join_wrapped(parts: &[String], options: &RenderOptions) -> String {
    parts
        .iter()
        .map(|p| wrap_text(p, options.wrap_col))
        .collect::<Vec<_>>()
        .join(&options.label_separator)
}

/// DOT 字符串转义
fn escape(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

fn atom_label(atom: &AtomNode, options: &RenderOptions) -> String {
    let parts: Vec<String> = options
        .node_labels
        .iter()
        .filter_map(|attr| match attr {
            NodeLabel::Id => Some(atom.id.clone()),
            NodeLabel::Text => Some(atom.text.clone()),
            NodeLabel::Kind => Some("atom".to_string()),
            NodeLabel::Scheme => None,
        })
        .filter(|s| !s.is_empty())
        .collect();

    join_wrapped(&parts, options)
}

fn scheme_label(scheme: &SchemeNode, options: &RenderOptions) -> String {
    let parts: Vec<String> = options
        .node_labels
        .iter()
        .filter_map(|attr| match attr {
            NodeLabel::Id => Some(scheme.id.clone()),
            // 方案节点没有文本，使用方案名称或关系类型
            NodeLabel::Text | NodeLabel::Scheme => Some(
                scheme
                    .scheme
                    .clone()
                    .unwrap_or_else(|| scheme.kind.to_string()),
            ),
            NodeLabel::Kind => Some(scheme.kind.to_string()),
        })
        .collect();

    let mut deduped: Vec<String> = Vec::new();
    for part in parts {
        if !deduped.contains(&part) {
            deduped.push(part);
        }
    }

    join_wrapped(&deduped, options)
}

/// 生成 DOT 描述
pub fn to_dot(graph: &ArgumentGraph, options: &RenderOptions) -> String {
    let mut out = String::new();

    out.push_str(&format!("digraph \"{}\" {{\n", escape(&graph.name)));
    out.push_str(&format!(
        "  graph [rankdir={}, nodesep={}, ranksep={}, margin={}];\n",
        options.rankdir, options.nodesep, options.ranksep, options.margin
    ));
    out.push_str(&format!(
        "  node [fontname=\"{}\", fontsize={}, style=\"filled,rounded\", shape=box];\n",
        escape(&options.font_name),
        options.font_size
    ));
    out.push_str(&format!(
        "  edge [fontname=\"{}\", fontsize={}];\n",
        escape(&options.font_name),
        options.font_size
    ));

    for atom in &graph.atoms {
        out.push_str(&format!(
            "  \"{}\" [label=\"{}\", fillcolor=\"#E0E0E0\"];\n",
            escape(&atom.id),
            escape(&atom_label(atom, options))
        ));
    }

    for scheme in &graph.schemes {
        out.push_str(&format!(
            "  \"{}\" [label=\"{}\", fillcolor=\"{}\", style=\"filled\", shape=ellipse];\n",
            escape(&scheme.id),
            escape(&scheme_label(scheme, options)),
            scheme_color(scheme.kind)
        ));
    }

    for edge in &graph.edges {
        out.push_str(&format!(
            "  \"{}\" -> \"{}\";\n",
            escape(&edge.source),
            escape(&edge.target)
        ));
    }

    out.push_str("}\n");
    out
}
