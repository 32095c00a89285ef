//! # recap-utils - 论证图批处理工具
//!
//! 对目录中的论证图或纯文本文件执行可断点续跑的批处理，
//! 输出目录镜像输入目录结构。
//!
//! ## 子命令
//! - `graph` - 论证图命令组
//!   - `translate` - 使用 DeepL 翻译
//!   - `render` - 渲染为 PDF / PNG / SVG / DOT
//!   - `convert` - 格式转换 (AIF, OVA, arguebuf)
//!   - `statistics` (`count`) - 节点与边计数统计
//! - `text` - 纯文本命令组
//!   - `translate` - 使用 DeepL 翻译
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── batch/     (路径解析与批处理执行)
//!   │     ├── parsers/   (图格式编解码)
//!   │     ├── translate/ (翻译服务)
//!   │     ├── render/    (DOT 生成与 Graphviz)
//!   │     └── models/    (数据模型)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod error;
mod models;
mod parsers;
mod render;
mod translate;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
