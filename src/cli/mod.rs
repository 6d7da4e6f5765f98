//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `locate`: 定位样品数据目录
//! - `samples`: 列出根目录下的样品
//! - `plot`: 快速绘图（累加或单次扫描）
//! - `sum`: 累加扫描并导出
//! - `export`: 批量导出多个样品
//! - `shift`: 在平台步数空间中平移能量轴
//! - `convert`: 能量 / 角度 / 步数换算
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: locate, plot, sum, shift, convert

pub mod convert;
pub mod locate;
pub mod plot;
pub mod shift;
pub mod sum;

use crate::batch::RunSelection;
use crate::error::{Result, XesError};
use crate::xes::{AnalyzerConfig, SpectrometerGeometry};

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// xestool - XES/XANES 谱仪数据工具箱
#[derive(Parser)]
#[command(name = "xestool")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "XES/XANES spectrometer data toolkit", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Locate the data directory of a sample
    Locate(locate::LocateArgs),

    /// List samples found under the data root
    Samples(locate::SamplesArgs),

    /// Quick plot of one or more samples (summed or individual runs)
    Plot(plot::PlotArgs),

    /// Sum the runs of a sample and export the spectrum
    Sum(sum::SumArgs),

    /// Export summed spectra of many samples in parallel
    Export(sum::ExportArgs),

    /// Shift a spectrum's energy axis through the spectrometer stage position
    Shift(shift::ShiftArgs),

    /// Convert between energy, Bragg angle and stage steps
    Convert(convert::ConvertArgs),
}

// ─────────────────────────────────────────────────────────────
// 共享参数
// ─────────────────────────────────────────────────────────────

/// 数据根目录
#[derive(Args, Debug, Clone)]
pub struct RootArgs {
    /// Root directory searched for sample data
    #[arg(long, env = "XES_ROOT")]
    pub root: PathBuf,
}

/// 批次与扫描选择
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Batch number (the '<sample>_<batch>' directory)
    #[arg(long, default_value_t = 1)]
    pub batch: u32,

    /// Runs to load: '3' starts at run 3, '1,2,5' or '2-5' lists runs, 'all' loads every run
    #[arg(long, default_value = "all")]
    pub runs: String,
}

impl RunArgs {
    pub fn selection(&self) -> Result<RunSelection> {
        RunSelection::parse(&self.runs)
    }
}

/// 分析晶体参数
#[derive(Args, Debug, Clone)]
pub struct AnalyzerArgs {
    /// Analyzer crystal material (si, ge)
    #[arg(long, default_value = "si")]
    pub material: String,

    /// Reflection Miller indices (e.g., "4,4,4" or "444")
    #[arg(long, default_value = "4,4,4")]
    pub hkl: String,
}

impl AnalyzerArgs {
    pub fn analyzer(&self) -> Result<AnalyzerConfig> {
        let (h, k, l) = parse_miller(&self.hkl)?;
        AnalyzerConfig::from_name(&self.material, h, k, l)
    }
}

/// 谱仪几何参数（默认值为本仪器标定值）
#[derive(Args, Debug, Clone)]
pub struct GeometryArgs {
    /// Linear stage travel per revolution (mm)
    #[arg(long, default_value_t = -2.54, allow_negative_numbers = true)]
    pub mm_per_rev: f64,

    /// Encoder steps per revolution
    #[arg(long, default_value_t = 10000.0)]
    pub steps_per_rev: f64,

    /// Fixed positional offset (mm)
    #[arg(long, default_value_t = 86.36, allow_negative_numbers = true)]
    pub fixed_offset: f64,

    /// Fixed angular offset psi (degrees)
    #[arg(long, default_value_t = 40.0, allow_negative_numbers = true)]
    pub psi: f64,
}

impl GeometryArgs {
    pub fn geometry(&self) -> Result<SpectrometerGeometry> {
        SpectrometerGeometry::new(
            self.mm_per_rev,
            self.steps_per_rev,
            self.fixed_offset,
            self.psi,
        )
    }
}

/// 谱图输出格式
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    /// PNG image
    Png,
    /// SVG vector image
    Svg,
    /// CSV data file (energy, intensity)
    Csv,
    /// XY data file (commented header, tab-separated)
    Xy,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Svg => "svg",
            OutputFormat::Csv => "csv",
            OutputFormat::Xy => "xy",
        }
    }

    pub fn is_image(self) -> bool {
        matches!(self, OutputFormat::Png | OutputFormat::Svg)
    }
}

/// 强度归一化方式
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
pub enum Normalization {
    /// Raw counts per live second
    #[default]
    None,
    /// Divide by the summed intensity
    Integral,
}

/// 解析 Miller 指数："4,4,4" / "4 4 4" / "444"
pub fn parse_miller(input: &str) -> Result<(i32, i32, i32)> {
    let invalid = || {
        XesError::InvalidArgument(format!(
            "Invalid Miller indices '{}' (expected e.g. '4,4,4' or '444')",
            input
        ))
    };

    let trimmed = input.trim();
    let parts: Vec<i32> = if trimmed.contains(',') || trimmed.contains(' ') {
        trimmed
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .map(|s| s.parse::<i32>().map_err(|_| invalid()))
            .collect::<Result<_>>()?
    } else {
        trimmed
            .chars()
            .map(|c| c.to_digit(10).map(|d| d as i32).ok_or_else(invalid))
            .collect::<Result<_>>()?
    };

    match parts.as_slice() {
        [h, k, l] => Ok((*h, *k, *l)),
        _ => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_miller() {
        assert_eq!(parse_miller("4,4,4").unwrap(), (4, 4, 4));
        assert_eq!(parse_miller("6 2 0").unwrap(), (6, 2, 0));
        assert_eq!(parse_miller("111").unwrap(), (1, 1, 1));
        assert_eq!(parse_miller("-1,1,1").unwrap(), (-1, 1, 1));
        assert!(parse_miller("11").is_err());
        assert!(parse_miller("1,1,x").is_err());
    }

    #[test]
    fn test_analyzer_args() {
        let args = AnalyzerArgs {
            material: "ge".to_string(),
            hkl: "620".to_string(),
        };
        assert_eq!(args.analyzer().unwrap().to_string(), "ge(620)");

        let bad = AnalyzerArgs {
            material: "quartz".to_string(),
            hkl: "111".to_string(),
        };
        assert!(matches!(bad.analyzer(), Err(XesError::Configuration(_))));
    }

    #[test]
    fn test_cli_parses() {
        use clap::CommandFactory;
        Cli::command().debug_assert();

        let cli = Cli::parse_from([
            "xestool",
            "shift",
            "--input",
            "cuo.csv",
            "--reference",
            "8333",
            "--amount",
            "-1.5",
            "--mm-per-rev",
            "-2.54",
        ]);
        match cli.command {
            Commands::Shift(args) => {
                assert_eq!(args.amount, -1.5);
                assert_eq!(args.geometry.mm_per_rev, -2.54);
            }
            _ => panic!("expected shift"),
        }
    }
}
