//! # 论证图数据模型
//!
//! 定义统一的论证图表示，可以从 AIF / OVA / arguebuf 格式解析并转换为其他格式。
//!
//! ## 结构
//! - 原子节点 (atom)：主张或前提的自然语言文本
//! - 方案节点 (scheme)：支持 / 攻击 / 偏好 / 改述关系
//! - 边：节点之间的有向连接
//!
//! ## 依赖关系
//! - 被 `parsers/`, `translate/`, `render/` 和 `commands/` 使用
//! - 无外部模块依赖

use serde_json::Value;
use std::collections::{HashMap, HashSet};

/// 图的序列化格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GraphFormat {
    Aif,
    Ova,
    Arguebuf,
}

impl std::fmt::Display for GraphFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphFormat::Aif => write!(f, "aif"),
            GraphFormat::Ova => write!(f, "ova"),
            GraphFormat::Arguebuf => write!(f, "arguebuf"),
        }
    }
}

/// 方案节点的关系类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemeKind {
    Support,
    Attack,
    Preference,
    Rephrase,
}

impl SchemeKind {
    /// AIF / OVA 中使用的节点类型代码
    pub fn aif_code(&self) -> &'static str {
        match self {
            SchemeKind::Support => "RA",
            SchemeKind::Attack => "CA",
            SchemeKind::Preference => "PA",
            SchemeKind::Rephrase => "MA",
        }
    }

    /// 从 AIF 类型代码解析，非方案类型返回 None
    pub fn from_aif_code(code: &str) -> Option<Self> {
        match code {
            "RA" => Some(SchemeKind::Support),
            "CA" => Some(SchemeKind::Attack),
            "PA" => Some(SchemeKind::Preference),
            "MA" => Some(SchemeKind::Rephrase),
            _ => None,
        }
    }
}

impl std::fmt::Display for SchemeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchemeKind::Support => write!(f, "support"),
            SchemeKind::Attack => write!(f, "attack"),
            SchemeKind::Preference => write!(f, "preference"),
            SchemeKind::Rephrase => write!(f, "rephrase"),
        }
    }
}

/// 原子节点
#[derive(Debug, Clone, PartialEq)]
pub struct AtomNode {
    pub id: String,
    pub text: String,
}

/// 方案节点
#[derive(Debug, Clone, PartialEq)]
pub struct SchemeNode {
    pub id: String,
    pub kind: SchemeKind,
    /// 论证方案名称（如 "Argument From Expert Opinion"）
    pub scheme: Option<String>,
}

/// 有向边
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
}

/// 解析得到图的原始 JSON 文档
///
/// 以相同格式保存时，只把文本写回该文档，布局、元数据和对话层节点等
/// 统一模型不表示的内容原样保留。
#[derive(Debug, Clone, PartialEq)]
pub struct SourceDocument {
    pub format: GraphFormat,
    pub value: Value,
}

/// 论证图
#[derive(Debug, Clone, PartialEq)]
pub struct ArgumentGraph {
    /// 图名称（默认为文件名）
    pub name: String,

    /// 完整文档文本
    pub text: String,

    /// 带标注的文档文本（OVA 的 `txt` 字段，含 `<br>` 与高亮标签）
    pub highlighted_text: Option<String>,

    pub atoms: Vec<AtomNode>,
    pub schemes: Vec<SchemeNode>,
    pub edges: Vec<Edge>,

    /// 保存时使用的格式
    pub category: GraphFormat,

    /// 原始文档（由解析器设置，手工构造的图为 None）
    pub source: Option<SourceDocument>,
}

impl ArgumentGraph {
    pub fn new(name: impl Into<String>, category: GraphFormat) -> Self {
        ArgumentGraph {
            name: name.into(),
            text: String::new(),
            highlighted_text: None,
            atoms: Vec::new(),
            schemes: Vec::new(),
            edges: Vec::new(),
            category,
            source: None,
        }
    }

    /// 以原格式保存时可复用的原始文档
    pub fn source_for(&self, format: GraphFormat) -> Option<&Value> {
        self.source
            .as_ref()
            .filter(|doc| doc.format == format)
            .map(|doc| &doc.value)
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn scheme_count(&self) -> usize {
        self.schemes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn atom(&self, id: &str) -> Option<&AtomNode> {
        self.atoms.iter().find(|a| a.id == id)
    }


    /// 删除指向不存在节点的边
    pub fn prune_dangling_edges(&mut self) {
        let ids: HashSet<String> = self
            .atoms
            .iter()
            .map(|a| a.id.clone())
            .chain(self.schemes.iter().map(|s| s.id.clone()))
            .collect();
        self.edges
            .retain(|e| ids.contains(&e.source) && ids.contains(&e.target));
    }

    /// 移除所有方案节点
    ///
    /// 每条 前提 -> 方案 -> 结论 路径被替换为 前提 -> 结论 的直接边。
    /// 方案之间的连接（如攻击一个推理）在移除后没有对应的原子端点，因此被丢弃。
    pub fn strip_schemes(&mut self) {
        let scheme_ids: HashSet<&str> = self.schemes.iter().map(|s| s.id.as_str()).collect();

        let mut incoming: HashMap<&str, Vec<&str>> = HashMap::new();
        let mut outgoing: HashMap<&str, Vec<&str>> = HashMap::new();
        let mut direct = Vec::new();

        for edge in &self.edges {
            let from_scheme = scheme_ids.contains(edge.source.as_str());
            let to_scheme = scheme_ids.contains(edge.target.as_str());
            match (from_scheme, to_scheme) {
                (false, false) => direct.push(edge.clone()),
                (false, true) => incoming
                    .entry(edge.target.as_str())
                    .or_default()
                    .push(edge.source.as_str()),
                (true, false) => outgoing
                    .entry(edge.source.as_str())
                    .or_default()
                    .push(edge.target.as_str()),
                (true, true) => {}
            }
        }

        let mut edges = direct;
        let mut seen: HashSet<(String, String)> = edges
            .iter()
            .map(|e| (e.source.clone(), e.target.clone()))
            .collect();

        // 保持方案节点原有顺序，使输出稳定
        for scheme in &self.schemes {
            let premises = incoming.get(scheme.id.as_str());
            let conclusions = outgoing.get(scheme.id.as_str());
            if let (Some(premises), Some(conclusions)) = (premises, conclusions) {
                for premise in premises {
                    for conclusion in conclusions {
                        let key = (premise.to_string(), conclusion.to_string());
                        if seen.insert(key) {
                            edges.push(Edge {
                                id: format!("{}-{}", premise, conclusion),
                                source: premise.to_string(),
                                target: conclusion.to_string(),
                            });
                        }
                    }
                }
            }
        }

        self.edges = edges;
        self.schemes.clear();
    }
}

#[cfg(test)]
impl ArgumentGraph {
    pub(crate) fn scheme(&self, id: &str) -> Option<&SchemeNode> {
        self.schemes.iter().find(|s| s.id == id)
    }
}
