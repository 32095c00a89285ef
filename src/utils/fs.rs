//! # 文件系统工具
//!
//! - 原子写入：先写入同目录下的临时文件，再重命名到目标路径，
//!   中断的运行不会留下被误认为已完成的截断文件
//! - 输出目录清理
//! - 输出目录位置检查（不能位于输入目录内，否则再次运行会把上次的输出当作输入）
//!
//! ## 依赖关系
//! - 被 `batch/`, `parsers/`, `render/` 和 `commands/` 使用

use crate::error::{RecapError, Result};

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

/// 目标文件对应的临时文件路径（同一目录，保证 rename 不跨文件系统）
pub fn temp_path_for(target: &Path) -> PathBuf {
    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "output".to_string());
    target.with_file_name(format!(".{}.{}.part", name, process::id()))
}

/// 原子写入文件
pub fn write_atomic(target: &Path, contents: impl AsRef<[u8]>) -> Result<()> {
    let temp = temp_path_for(target);

    fs::write(&temp, contents).map_err(|e| RecapError::FileWriteError {
        path: temp.display().to_string(),
        source: e,
    })?;

    commit_temp(&temp, target)
}

/// 将已写好的临时文件移动到目标路径，失败时删除临时文件
pub fn commit_temp(temp: &Path, target: &Path) -> Result<()> {
    fs::rename(temp, target).map_err(|e| {
        let _ = fs::remove_file(temp);
        RecapError::FileWriteError {
            path: target.display().to_string(),
            source: e,
        }
    })
}

/// 读取 UTF-8 文本文件
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| RecapError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })
}

/// 创建目录（含父目录），已存在时直接返回
pub fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| RecapError::FileWriteError {
        path: path.display().to_string(),
        source: e,
    })
}

/// 清空输出目录的全部内容，并保留目录本身
///
/// 输出目录与输入目录相同或包含输入目录时拒绝执行。
pub fn clean_output_dir(output: &Path, input: &Path) -> Result<()> {
    if !output.exists() {
        return ensure_dir(output);
    }

    let output_abs = canonical(output)?;
    let input_abs = canonical(input)?;
    if input_abs.starts_with(&output_abs) {
        return Err(RecapError::InvalidArgument(format!(
            "Refusing to clean '{}': it contains the input folder '{}'",
            output.display(),
            input.display()
        )));
    }

    let entries = fs::read_dir(output).map_err(|e| RecapError::FileReadError {
        path: output.display().to_string(),
        source: e,
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| RecapError::FileReadError {
            path: output.display().to_string(),
            source: e,
        })?;
        let path = entry.path();
        let removed = if path.is_dir() {
            fs::remove_dir_all(&path)
        } else {
            fs::remove_file(&path)
        };
        removed.map_err(|e| RecapError::FileWriteError {
            path: path.display().to_string(),
            source: e,
        })?;
    }

    Ok(())
}

/// 拒绝与输入目录相同或位于输入目录内的输出目录
pub fn check_output_location(output: &Path, input: &Path) -> Result<()> {
    let output_abs = absolute(output)?;
    let input_abs = canonical(input)?;

    if output_abs.starts_with(&input_abs) {
        return Err(RecapError::InvalidArgument(format!(
            "Output folder '{}' must not be inside the input folder '{}'",
            output.display(),
            input.display()
        )));
    }
    Ok(())
}

/// 绝对路径；不存在的部分接在最近的已存在祖先目录之后
fn absolute(path: &Path) -> Result<PathBuf> {
    let mut existing = path.to_path_buf();
    let mut missing = Vec::new();

    while !existing.exists() {
        let Some(name) = existing.file_name().map(|n| n.to_os_string()) else {
            break;
        };
        missing.push(name);
        existing.pop();
        if existing.as_os_str().is_empty() {
            existing.push(".");
        }
    }

    let mut resolved = canonical(&existing)?;
    for name in missing.into_iter().rev() {
        resolved.push(name);
    }
    Ok(resolved)
}

fn canonical(path: &Path) -> Result<PathBuf> {
    path.canonicalize().map_err(|e| RecapError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })
}
