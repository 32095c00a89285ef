//! # 解析器模块
//!
//! 提供论证图 JSON 交换格式的读写。
//!
//! ## 支持格式
//! - AIF (Argument Interchange Format)
//! - OVA (Online Visualisation of Argument)
//! - arguebuf
//!
//! 加载时根据内容自动识别格式；保存时使用图的 `category` 对应的编解码器。
//! 以原格式保存时只把文本写回原始文档，其余内容原样保留。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 使用 `models/` 数据模型
//! - 子模块: aif, ova, arguebuf

pub mod aif;
pub mod arguebuf;
pub mod ova;

use crate::error::{RecapError, Result};
use crate::models::{ArgumentGraph, GraphFormat, SourceDocument};
use crate::utils::fs::{read_text, write_atomic};

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::path::Path;

/// 格式编解码器
pub trait GraphCodec: Sync {
    fn format(&self) -> GraphFormat;

    /// 从 JSON 值解码，`origin` 用于错误信息
    fn decode(&self, value: Value, name: &str, origin: &str) -> Result<ArgumentGraph>;

    /// 从统一模型构建新文档
    fn encode(&self, graph: &ArgumentGraph) -> Result<Value>;

    /// 将图中的文本写回同格式的原始文档
    fn write_back(&self, original: Value, graph: &ArgumentGraph) -> Result<Value>;
}

/// 格式到编解码器的映射
pub fn codec(format: GraphFormat) -> &'static dyn GraphCodec {
    match format {
        GraphFormat::Aif => &aif::AifCodec,
        GraphFormat::Ova => &ova::OvaCodec,
        GraphFormat::Arguebuf => &arguebuf::ArguebufCodec,
    }
}

/// 根据 JSON 结构识别格式
pub fn detect_format(value: &Value) -> Option<GraphFormat> {
    let nodes = value.get("nodes")?;

    if nodes.is_object() {
        return Some(GraphFormat::Arguebuf);
    }

    let nodes = nodes.as_array()?;
    match nodes.first() {
        Some(node) if node.get("nodeID").is_some() => Some(GraphFormat::Aif),
        Some(node) if node.get("id").is_some() => Some(GraphFormat::Ova),
        Some(_) => None,
        None if value.get("analysis").is_some() => Some(GraphFormat::Ova),
        None => Some(GraphFormat::Aif),
    }
}

/// 从字符串内容解析论证图
pub fn parse_graph_str(content: &str, name: &str, origin: &str) -> Result<ArgumentGraph> {
    let value: Value = serde_json::from_str(content).map_err(|e| RecapError::ParseError {
        format: "json".to_string(),
        path: origin.to_string(),
        reason: e.to_string(),
    })?;

    let format = detect_format(&value).ok_or_else(|| RecapError::ParseError {
        format: "graph".to_string(),
        path: origin.to_string(),
        reason: "Unrecognized argument graph layout (expected AIF, OVA or arguebuf)".to_string(),
    })?;

    let codec = codec(format);
    let mut graph = codec.decode(value.clone(), name, origin)?;
    graph.source = Some(SourceDocument {
        format: codec.format(),
        value,
    });
    Ok(graph)
}

/// 加载论证图文件
pub fn load_graph(path: &Path) -> Result<ArgumentGraph> {
    let content = read_text(path)?;
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("graph");

    parse_graph_str(&content, name, &path.display().to_string())
}

/// 序列化为 JSON 字符串（使用图的 `category` 格式）
pub fn to_graph_string(graph: &ArgumentGraph) -> Result<String> {
    let codec = codec(graph.category);
    let value = match graph.source_for(codec.format()) {
        Some(original) => codec.write_back(original.clone(), graph)?,
        None => codec.encode(graph)?,
    };
    Ok(serde_json::to_string_pretty(&value)?)
}

/// 保存论证图文件
pub fn save_graph(graph: &ArgumentGraph, path: &Path) -> Result<()> {
    let content = to_graph_string(graph)?;
    write_atomic(path, content)
}

/// 节点 id 在不同工具导出的文件中可能是字符串或数字
pub(crate) fn flexible_id<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(i64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    })
}

/// 读取字符串或数字形式的 id
pub(crate) fn id_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// 写入文本字段；原文档没有该字段且文本为空时不添加
pub(crate) fn set_text(target: &mut Value, key: &str, text: &str) {
    if let Some(object) = target.as_object_mut() {
        if object.contains_key(key) || !text.is_empty() {
            object.insert(key.to_string(), Value::from(text));
        }
    }
}

pub(crate) fn decode_error(format: GraphFormat, origin: &str, e: serde_json::Error) -> RecapError {
    RecapError::ParseError {
        format: format.to_string(),
        path: origin.to_string(),
        reason: e.to_string(),
    }
}
