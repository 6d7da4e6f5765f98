//! # shift 子命令 CLI 定义
//!
//! 通过平台步数平移谱图能量轴
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/shift.rs`

use super::{AnalyzerArgs, GeometryArgs, OutputFormat, RunArgs};
use clap::{ArgGroup, Args};
use std::path::PathBuf;

/// shift 子命令参数
#[derive(Args, Debug)]
#[command(group(ArgGroup::new("source").required(true).args(["sample", "input"])))]
pub struct ShiftArgs {
    /// Sample name (summed runs are shifted)
    #[arg(long)]
    pub sample: Option<String>,

    /// Spectrum file (.csv, .xy, .dat, alldata .txt, or session .json)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Root directory searched for sample data (with --sample)
    #[arg(long, env = "XES_ROOT")]
    pub root: Option<PathBuf>,

    #[command(flatten)]
    pub runs: RunArgs,

    /// Energy of the feature to align (eV)
    #[arg(long)]
    pub reference: f64,

    /// Amount to move the feature by (eV)
    #[arg(long, allow_negative_numbers = true)]
    pub amount: f64,

    #[command(flatten)]
    pub analyzer: AnalyzerArgs,

    #[command(flatten)]
    pub geometry: GeometryArgs,

    /// Output file
    #[arg(short, long, default_value = "shifted.csv")]
    pub output: PathBuf,

    /// Output format (auto-detected from extension if not specified)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Figure width in pixels (image output)
    #[arg(long, default_value_t = 1200)]
    pub width: u32,

    /// Figure height in pixels (image output)
    #[arg(long, default_value_t = 800)]
    pub height: u32,
}
