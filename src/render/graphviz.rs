//! # Graphviz 外部命令调用
//!
//! 将 DOT 描述通过标准输入传给 `dot`，输出写入目标目录中的临时文件，
//! 成功后再重命名为目标文件。
//!
//! ## 依赖关系
//! - 被 `render/mod.rs` 使用
//! - 需要 PATH 中存在 `dot`

use crate::error::{RecapError, Result};
use crate::utils::fs::{commit_temp, temp_path_for};

use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

const DOT_COMMAND: &str = "dot";

/// 调用 `dot -T<format>` 渲染到目标文件
pub fn run_dot(dot_source: &str, format: &str, target: &Path) -> Result<()> {
    let temp = temp_path_for(target);

    let mut child = Command::new(DOT_COMMAND)
        .arg(format!("-T{}", format))
        .arg("-o")
        .arg(&temp)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|_| RecapError::CommandNotFound {
            command: DOT_COMMAND.to_string(),
        })?;

    let written = match child.stdin.take() {
        // 写完后 stdin 在此处被关闭，dot 才会开始输出
        Some(mut stdin) => stdin.write_all(dot_source.as_bytes()),
        None => Ok(()),
    };
    if let Err(e) = written {
        let _ = child.kill();
        let _ = child.wait();
        discard_temp(&temp);
        return Err(RecapError::CommandFailed {
            command: DOT_COMMAND.to_string(),
            stderr: e.to_string(),
        });
    }

    let output = child.wait_with_output().map_err(|e| {
        discard_temp(&temp);
        RecapError::CommandFailed {
            command: DOT_COMMAND.to_string(),
            stderr: e.to_string(),
        }
    })?;

    if output.status.success() {
        commit_temp(&temp, target)
    } else {
        discard_temp(&temp);
        Err(RecapError::CommandFailed {
            command: format!("{} -T{}", DOT_COMMAND, format),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

/// 删除未完成的临时输出（可能尚未创建）
fn discard_temp(temp: &Path) {
    if temp.exists() {
        let _ = fs::remove_file(temp);
    }
}
