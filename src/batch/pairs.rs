//! # 输入/输出路径对解析
//!
//! 根据输入目录和 glob 模式收集待处理文件，并为每个文件计算
//! 保持目录结构的输出路径。
//!
//! ## 功能
//! - 递归遍历输入目录，按路径字典序排序（`--start` 偏移可复现）
//! - 不含 `/` 的模式匹配文件名（任意深度），含 `/` 的模式匹配相对路径
//! - 替换扩展名并在输出目录下重建子目录
//!
//! ## 依赖关系
//! - 被 `commands/` 调用
//! - 使用 `walkdir` 遍历目录，`glob` 匹配模式

use crate::error::{RecapError, Result};
use crate::utils::fs::ensure_dir;

use glob::{MatchOptions, Pattern};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 一个批处理单元：源文件与对应的输出文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPair {
    pub source: PathBuf,
    pub target: PathBuf,
}

impl PathPair {
    /// 进度显示用的标签（源文件名）
    pub fn label(&self) -> String {
        self.source
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.source.display().to_string())
    }
}

/// 输入文件匹配器
pub struct FileMatcher {
    pattern: Pattern,
    match_relative_path: bool,
}

impl FileMatcher {
    pub fn new(pattern: &str) -> Result<Self> {
        let compiled = Pattern::new(pattern).map_err(|e| {
            RecapError::InvalidArgument(format!("Invalid pattern '{}': {}", pattern, e))
        })?;
        Ok(FileMatcher {
            pattern: compiled,
            match_relative_path: pattern.contains('/'),
        })
    }

    /// 检查相对于输入根目录的路径是否匹配
    pub fn matches(&self, relative: &Path) -> bool {
        if self.match_relative_path {
            let options = MatchOptions {
                require_literal_separator: true,
                ..MatchOptions::new()
            };
            let normalized = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            self.pattern.matches_with(&normalized, options)
        } else {
            relative
                .file_name()
                .and_then(|n| n.to_str())
                .map_or(false, |name| self.pattern.matches(name))
        }
    }
}

/// 收集输入目录下所有匹配的文件（按路径排序）
pub fn collect_files(input_root: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    if !input_root.is_dir() {
        return Err(RecapError::DirectoryNotFound {
            path: input_root.display().to_string(),
        });
    }

    let matcher = FileMatcher::new(pattern)?;

    let mut files: Vec<PathBuf> = WalkDir::new(input_root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            e.path()
                .strip_prefix(input_root)
                .map_or(false, |rel| matcher.matches(rel))
        })
        .map(|e| e.path().to_path_buf())
        .collect();

    files.sort();
    Ok(files)
}

/// 计算镜像输出路径：相对路径移到输出目录下，并替换扩展名
pub fn mirror_path(
    source: &Path,
    input_root: &Path,
    output_root: &Path,
    output_suffix: &str,
) -> Result<PathBuf> {
    let relative = source.strip_prefix(input_root).map_err(|_| {
        RecapError::InvalidArgument(format!(
            "'{}' is not inside '{}'",
            source.display(),
            input_root.display()
        ))
    })?;

    let extension = output_suffix.trim_start_matches('.');
    Ok(output_root.join(relative).with_extension(extension))
}

/// 解析全部路径对，并提前创建所需的输出子目录
pub fn resolve(
    input_root: &Path,
    output_root: &Path,
    input_pattern: &str,
    output_suffix: &str,
) -> Result<Vec<PathPair>> {
    let files = collect_files(input_root, input_pattern)?;

    let pairs = files
        .into_iter()
        .map(|source| {
            let target = mirror_path(&source, input_root, output_root, output_suffix)?;
            Ok(PathPair { source, target })
        })
        .collect::<Result<Vec<_>>>()?;

    let parents: BTreeSet<&Path> = pairs.iter().filter_map(|p| p.target.parent()).collect();
    for parent in parents {
        ensure_dir(parent)?;
    }

    Ok(pairs)
}
