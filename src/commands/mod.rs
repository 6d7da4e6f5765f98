//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `batch/`, `parsers/`, `models/`, `xes/`, `utils/`
//! - 子模块: locate, plot, sum, export, shift, convert

pub mod convert;
pub mod export;
pub mod locate;
pub mod plot;
pub mod shift;
pub mod sum;

use crate::cli::{Commands, OutputFormat};
use crate::error::Result;
use crate::models::Spectrum;
use crate::xes::{self, plot::PlotOptions};

use std::path::Path;

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Locate(args) => locate::execute(args),
        Commands::Samples(args) => locate::execute_samples(args),
        Commands::Plot(args) => plot::execute(args),
        Commands::Sum(args) => sum::execute(args),
        Commands::Export(args) => export::execute(args),
        Commands::Shift(args) => shift::execute(args),
        Commands::Convert(args) => convert::execute(args),
    }
}

/// 从文件扩展名推断输出格式
pub(crate) fn guess_format_from_extension(path: &Path) -> OutputFormat {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
        .as_deref()
    {
        Some("png") => OutputFormat::Png,
        Some("svg") => OutputFormat::Svg,
        Some("xy") | Some("dat") | Some("txt") => OutputFormat::Xy,
        _ => OutputFormat::Csv,
    }
}

/// 按格式写出谱图（图像格式绘制全部谱线，数据格式只写第一条）
pub(crate) fn write_spectra(
    series: &[(String, Spectrum)],
    output: &Path,
    format: OutputFormat,
    options: PlotOptions,
) -> Result<()> {
    match format {
        OutputFormat::Png | OutputFormat::Svg => {
            let options = PlotOptions {
                use_svg: format == OutputFormat::Svg,
                ..options
            };
            xes::plot::plot_spectra(series, output, &options)
        }
        OutputFormat::Csv | OutputFormat::Xy => {
            let (name, spectrum) = match series.first() {
                Some(first) => first,
                None => return Ok(()),
            };
            if format == OutputFormat::Csv {
                xes::export::to_csv(spectrum, output)
            } else {
                xes::export::to_xy(spectrum, name, output)
            }
        }
    }
}
