//! # xestool - XES/XANES 谱仪数据工具箱
//!
//! 定位样品数据、累加扫描、Bragg 角 / 能量 / 平台步数换算、
//! 在步数空间中平移能量轴，并绘制与导出谱图。
//!
//! ## 子命令
//! - `locate`  - 定位样品数据目录
//! - `samples` - 列出数据根目录下的样品
//! - `plot`    - 快速绘图
//! - `sum`     - 累加扫描并导出 / 保存会话
//! - `export`  - 多样品并行导出
//! - `shift`   - 能量平移
//! - `convert` - 能量 / 角度 / 步数换算
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── batch/     (样品定位与并行处理)
//!   │     ├── parsers/   (扫描文件解析器)
//!   │     ├── xes/       (Bragg 换算、绘图、导出)
//!   │     └── models/    (谱图与会话模型)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod error;
mod models;
mod parsers;
mod utils;
mod xes;

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
