//! # 论证图翻译
//!
//! ## 功能
//! - 文档纯文本按纯文本模式翻译
//! - 标注文本：`<br>` 先替换为换行，按 XML 模式翻译，再把换行还原为 `<br>`
//! - 原子节点文本：并行模式下按块（每块最多 50 条）并发请求，否则逐条顺序请求
//! - 空字符串不发送
//!
//! ## 依赖关系
//! - 被 `commands/graph/translate.rs` 使用
//! - 使用 `rayon` 并发发送分块请求，`regex` 处理换行标记

use super::{TextMode, TranslationService};
use crate::error::Result;
use crate::models::ArgumentGraph;

use rayon::prelude::*;
use regex::Regex;
use std::sync::OnceLock;

/// DeepL 单次请求允许的最大文本数
pub const MAX_TEXTS_PER_REQUEST: usize = 50;

const LINE_BREAK: &str = "<br>";

fn line_break_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)<br\s*/?>").expect("line break pattern is valid"))
}

/// 论证图翻译器
pub struct GraphTranslator<'a> {
    service: &'a dyn TranslationService,
}

impl<'a> GraphTranslator<'a> {
    pub fn new(service: &'a dyn TranslationService) -> Self {
        Self { service }
    }

    /// 翻译图中的全部文本
    pub fn translate_graph(&self, graph: &mut ArgumentGraph, parallel: bool) -> Result<()> {
        graph.text = self.translate_single(&graph.text, TextMode::Plain)?;

        if let Some(highlighted) = graph.highlighted_text.take() {
            graph.highlighted_text = Some(self.translate_highlighted(&highlighted)?);
        }

        let texts: Vec<String> = graph.atoms.iter().map(|a| a.text.clone()).collect();
        let translations = if parallel {
            self.translate_batched(&texts)?
        } else {
            self.translate_sequential(&texts)?
        };

        for (atom, translation) in graph.atoms.iter_mut().zip(translations) {
            atom.text = translation;
        }

        Ok(())
    }

    /// 翻译带标注的文本，保留标签与 `<br>` 换行
    pub fn translate_highlighted(&self, text: &str) -> Result<String> {
        let with_newlines = line_break_pattern().replace_all(text, "\n");
        let translated = self.translate_single(&with_newlines, TextMode::Xml)?;
        Ok(translated.replace('\n', LINE_BREAK))
    }

    fn translate_single(&self, text: &str, mode: TextMode) -> Result<String> {
        if text.trim().is_empty() {
            return Ok(text.to_string());
        }
        self.service.translate_text(text, mode)
    }

    fn translate_sequential(&self, texts: &[String]) -> Result<Vec<String>> {
        texts
            .iter()
            .map(|t| self.translate_single(t, TextMode::Plain))
            .collect()
    }

    /// 非空文本分块并发翻译，结果按原位置写回
    fn translate_batched(&self, texts: &[String]) -> Result<Vec<String>> {
        let (indices, pending): (Vec<usize>, Vec<String>) = texts
            .iter()
            .enumerate()
            .filter(|(_, t)| !t.trim().is_empty())
            .map(|(i, t)| (i, t.clone()))
            .unzip();

        let chunks: Vec<Vec<String>> = pending
            .par_chunks(MAX_TEXTS_PER_REQUEST)
            .map(|chunk| self.service.translate_texts(chunk, TextMode::Plain))
            .collect::<Result<Vec<_>>>()?;

        let mut results = texts.to_vec();
        for (index, translation) in indices.into_iter().zip(chunks.into_iter().flatten()) {
            results[index] = translation;
        }
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RecapError;
    use crate::models::graph::tests::sample_graph;
    use crate::models::AtomNode;
    use crate::translate::testing::{FailingService, UppercaseService};

    #[test]
    fn test_translates_text_and_atoms() {
        let service = UppercaseService::default();
        let mut graph = sample_graph();

        GraphTranslator::new(&service)
            .translate_graph(&mut graph, false)
            .unwrap();

        assert_eq!(graph.text, "CATS ARE GREAT. THEY PURR. THEY ARE INDEPENDENT.");
        assert_eq!(graph.atoms[0].text, "CATS ARE GREAT.");
        assert_eq!(graph.atoms[2].text, "THEY ARE INDEPENDENT.");
        // 1 次文档文本 + 3 次原子文本
        assert_eq!(service.call_count(), 4);
    }

    #[test]
    fn test_absent_highlighted_text_stays_absent() {
        let service = UppercaseService::default();
        let mut graph = sample_graph();
        assert!(graph.highlighted_text.is_none());

        GraphTranslator::new(&service)
            .translate_graph(&mut graph, true)
            .unwrap();

        assert!(graph.highlighted_text.is_none());
        assert_eq!(graph.text, "CATS ARE GREAT. THEY PURR. THEY ARE INDEPENDENT.");
    }

    #[test]
    fn test_highlighted_text_keeps_line_breaks() {
        let service = UppercaseService::default();
        let mut graph = sample_graph();
        graph.highlighted_text =
            Some("<span class=\"highlighted\">Cats</span><br><br>purr<br/>a lot".to_string());

        GraphTranslator::new(&service)
            .translate_graph(&mut graph, false)
            .unwrap();

        let highlighted = graph.highlighted_text.unwrap();
        assert_eq!(highlighted.matches("<br>").count(), 3);
        assert!(highlighted.ends_with("PURR<br>A LOT"));

        let calls = service.calls.lock().unwrap();
        let (sent, mode) = calls
            .iter()
            .find(|(_, mode)| *mode == TextMode::Xml)
            .unwrap();
        assert_eq!(*mode, TextMode::Xml);
        assert!(!sent[0].contains("<br"));
        assert!(sent[0].contains('\n'));
    }

    #[test]
    fn test_parallel_batches_by_position() {
        let service = UppercaseService::default();
        let mut graph = sample_graph();
        graph.text.clear();
        for i in 0..120 {
            graph.atoms.push(AtomNode {
                id: format!("x{}", i),
                text: if i % 7 == 0 {
                    String::new()
                } else {
                    format!("atom {}", i)
                },
            });
        }

        GraphTranslator::new(&service)
            .translate_graph(&mut graph, true)
            .unwrap();

        assert_eq!(graph.atoms[0].text, "CATS ARE GREAT.");
        for (i, atom) in graph.atoms.iter().skip(3).enumerate() {
            if i % 7 == 0 {
                assert_eq!(atom.text, "");
            } else {
                assert_eq!(atom.text, format!("ATOM {}", i));
            }
        }

        let calls = service.calls.lock().unwrap();
        assert!(calls.iter().all(|(texts, _)| texts.len() <= MAX_TEXTS_PER_REQUEST));
        assert!(calls.iter().all(|(texts, _)| texts.iter().all(|t| !t.is_empty())));
        // 3 + 102 条非空文本 -> 3 个请求
        assert_eq!(calls.len(), 3);
    }

    #[test]
    fn test_service_error_propagates() {
        let mut graph = sample_graph();
        let result = GraphTranslator::new(&FailingService).translate_graph(&mut graph, true);
        assert!(matches!(
            result,
            Err(RecapError::TranslationServiceError(_))
        ));
    }
}
