//! # 渲染模块
//!
//! 将论证图渲染为图像或 DOT 源文件。
//!
//! ## 功能
//! - 根据目标后缀选择输出格式 (.pdf, .png, .svg, .dot/.gv)
//! - 可选先移除方案节点
//! - 标签属性、间距、折行列宽、边距、字体等样式参数
//!
//! ## 依赖关系
//! - 被 `commands/graph/render.rs` 使用
//! - 使用 `models/graph.rs`
//! - 子模块: dot, graphviz

pub mod dot;
pub mod graphviz;

use crate::error::{RecapError, Result};
use crate::models::ArgumentGraph;
use crate::utils::fs::write_atomic;

use clap::ValueEnum;
use std::path::Path;

/// 渲染输出格式
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum RenderFormat {
    /// Portable Document Format (requires Graphviz)
    Pdf,
    /// Portable Network Graphics (requires Graphviz)
    Png,
    /// Scalable Vector Graphics (requires Graphviz)
    Svg,
    /// Graphviz DOT source
    Dot,
}

impl RenderFormat {
    /// 输出文件后缀
    pub fn suffix(&self) -> &'static str {
        match self {
            RenderFormat::Pdf => ".pdf",
            RenderFormat::Png => ".png",
            RenderFormat::Svg => ".svg",
            RenderFormat::Dot => ".dot",
        }
    }

    /// 从目标路径后缀推断格式
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|s| s.to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "pdf" => Ok(RenderFormat::Pdf),
            "png" => Ok(RenderFormat::Png),
            "svg" => Ok(RenderFormat::Svg),
            "dot" | "gv" => Ok(RenderFormat::Dot),
            _ => Err(RecapError::UnsupportedFormat(format!(
                "Cannot render to '{}'",
                path.display()
            ))),
        }
    }
}

impl std::fmt::Display for RenderFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.suffix().trim_start_matches('.'))
    }
}

/// 节点标签可用的属性
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum NodeLabel {
    /// Node identifier
    Id,
    /// Atom text (scheme nodes fall back to their scheme name)
    Text,
    /// Node kind (atom, support, attack, ...)
    Kind,
    /// Argumentation scheme name (scheme nodes only)
    Scheme,
}

/// 布局方向
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum RankDir {
    #[value(name = "TB")]
    Tb,
    #[value(name = "BT")]
    Bt,
    #[value(name = "LR")]
    Lr,
    #[value(name = "RL")]
    Rl,
}

impl std::fmt::Display for RankDir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RankDir::Tb => write!(f, "TB"),
            RankDir::Bt => write!(f, "BT"),
            RankDir::Lr => write!(f, "LR"),
            RankDir::Rl => write!(f, "RL"),
        }
    }
}

/// 渲染样式参数
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// 作为标签的属性，多个属性用分隔符连接
    pub node_labels: Vec<NodeLabel>,
    pub label_separator: String,
    /// 渲染前移除方案节点
    pub strip_schemes: bool,
    pub nodesep: f64,
    pub ranksep: f64,
    /// 标签折行列宽（0 表示不折行）
    pub wrap_col: usize,
    pub margin: f64,
    pub font_name: String,
    pub font_size: f64,
    pub rankdir: RankDir,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            node_labels: vec![NodeLabel::Text],
            label_separator: "\n".to_string(),
            strip_schemes: false,
            nodesep: 0.25,
            ranksep: 0.5,
            wrap_col: 36,
            margin: 0.0,
            font_name: "Arial".to_string(),
            font_size: 11.0,
            rankdir: RankDir::Bt,
        }
    }
}

/// 渲染论证图到目标文件，格式由目标后缀决定
pub fn render_graph(graph: &ArgumentGraph, options: &RenderOptions, target: &Path) -> Result<()> {
    let format = RenderFormat::from_path(target)?;

    let dot_source = if options.strip_schemes {
        let mut stripped = graph.clone();
        stripped.strip_schemes();
        dot::to_dot(&stripped, options)
    } else {
        dot::to_dot(graph, options)
    };

    match format {
        RenderFormat::Dot => write_atomic(target, dot_source),
        RenderFormat::Pdf | RenderFormat::Png | RenderFormat::Svg => {
            graphviz::run_dot(&dot_source, &format.to_string(), target)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::graph::tests::sample_graph;
    use std::fs;
    use std::path::PathBuf;

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            RenderFormat::from_path(Path::new("a/b.PDF")).unwrap(),
            RenderFormat::Pdf
        );
        assert_eq!(
            RenderFormat::from_path(Path::new("b.gv")).unwrap(),
            RenderFormat::Dot
        );
        assert!(matches!(
            RenderFormat::from_path(Path::new("b.docx")),
            Err(RecapError::UnsupportedFormat(_))
        ));
        assert!(RenderFormat::from_path(&PathBuf::from("noext")).is_err());
    }

    #[test]
    fn test_render_dot_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("graph.dot");

        render_graph(&sample_graph(), &RenderOptions::default(), &target).unwrap();

        let content = fs::read_to_string(&target).unwrap();
        assert!(content.contains("digraph"));
        assert!(content.contains("\"s1\""));
    }

    #[test]
    fn test_render_strip_schemes() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("graph.dot");
        let options = RenderOptions {
            strip_schemes: true,
            ..RenderOptions::default()
        };
        let graph = sample_graph();

        render_graph(&graph, &options, &target).unwrap();

        let content = fs::read_to_string(&target).unwrap();
        assert!(!content.contains("\"s1\""));
        assert!(content.contains("\"a2\" -> \"a1\";"));
        // 原图不被修改
        assert_eq!(graph.scheme_count(), 2);
    }

    #[test]
    fn test_unsupported_target_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("graph.bmp");
        let result = render_graph(&sample_graph(), &RenderOptions::default(), &target);
        assert!(matches!(result, Err(RecapError::UnsupportedFormat(_))));
        assert!(!target.exists());
    }
}
