//! # plot 子命令 CLI 定义
//!
//! 快速绘制一个或多个样品的谱图
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/plot.rs`

use super::{Normalization, RootArgs, RunArgs};
use clap::Args;
use std::path::PathBuf;

/// plot 子命令参数
#[derive(Args, Debug)]
pub struct PlotArgs {
    /// Sample names; several samples are overlaid on one chart
    #[arg(required = true, num_args = 1..)]
    pub samples: Vec<String>,

    #[command(flatten)]
    pub root: RootArgs,

    #[command(flatten)]
    pub runs: RunArgs,

    /// Plot every run separately instead of their sum
    #[arg(long, default_value_t = false)]
    pub individual: bool,

    /// Intensity normalization
    #[arg(long, value_enum, default_value = "none")]
    pub normalize: Normalization,

    /// Output image (PNG, or SVG by extension)
    #[arg(short, long, default_value = "xes_spectrum.png")]
    pub output: PathBuf,

    /// Figure width in pixels (for PNG) or points (for SVG)
    #[arg(long, default_value_t = 1200)]
    pub width: u32,

    /// Figure height in pixels (for PNG) or points (for SVG)
    #[arg(long, default_value_t = 800)]
    pub height: u32,

    /// Title for the plot (default: sample names)
    #[arg(long)]
    pub title: Option<String>,
}
