//! # sum / export 子命令 CLI 定义
//!
//! 累加扫描并导出谱图；export 为多样品并行版本
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/sum.rs`, `commands/export.rs`

use super::{Normalization, OutputFormat, RootArgs, RunArgs};
use clap::Args;
use std::path::PathBuf;

/// sum 子命令参数
#[derive(Args, Debug)]
pub struct SumArgs {
    /// Sample name
    pub sample: String,

    #[command(flatten)]
    pub root: RootArgs,

    #[command(flatten)]
    pub runs: RunArgs,

    /// Intensity normalization
    #[arg(long, value_enum, default_value = "none")]
    pub normalize: Normalization,

    /// Output file (default: '<sample>_sum.csv')
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format (auto-detected from extension if not specified)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Also save the analysis session (all runs + sum) as JSON
    #[arg(long)]
    pub save: Option<PathBuf>,

    /// Figure width in pixels (image output)
    #[arg(long, default_value_t = 1200)]
    pub width: u32,

    /// Figure height in pixels (image output)
    #[arg(long, default_value_t = 800)]
    pub height: u32,
}

/// export 子命令参数
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Sample names
    #[arg(required = true, num_args = 1..)]
    pub samples: Vec<String>,

    #[command(flatten)]
    pub root: RootArgs,

    #[command(flatten)]
    pub runs: RunArgs,

    /// Intensity normalization
    #[arg(long, value_enum, default_value = "none")]
    pub normalize: Normalization,

    /// Output directory
    #[arg(short, long, default_value = "xes_export")]
    pub output: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    pub format: OutputFormat,

    /// Number of parallel jobs (0 = auto)
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,

    /// Overwrite existing output files
    #[arg(long, default_value_t = false)]
    pub overwrite: bool,
}
