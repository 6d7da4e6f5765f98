//! # 谱图数据导出
//!
//! 导出谱图到 CSV 和 XY 格式。
//!
//! ## 支持格式
//! - CSV: `energy_ev,intensity` 表头
//! - XY: `#` 注释头 + 制表符分隔的两列
//!
//! ## 依赖关系
//! - 被 `commands/` 调用
//! - 使用 `models/spectrum.rs`
//! - 使用 `csv` 库写入 CSV 文件

use crate::error::{Result, XesError};
use crate::models::Spectrum;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// 导出为 CSV 格式
pub fn to_csv(spectrum: &Spectrum, output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    wtr.write_record(["energy_ev", "intensity"])?;
    for (energy, intensity) in spectrum.points() {
        wtr.write_record(&[format!("{:.4}", energy), format!("{:.6e}", intensity)])?;
    }

    wtr.flush().map_err(|e| XesError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

/// 导出为 XY 格式
pub fn to_xy(spectrum: &Spectrum, name: &str, output_path: &Path) -> Result<()> {
    let write_error = |e: std::io::Error| XesError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    };

    let file = File::create(output_path).map_err(write_error)?;
    let mut out = BufWriter::new(file);

    writeln!(out, "# XES Spectrum: {}", name).map_err(write_error)?;
    writeln!(out, "# Points: {}", spectrum.len()).map_err(write_error)?;
    writeln!(out, "# Columns: Energy (eV), Intensity").map_err(write_error)?;
    writeln!(out, "#").map_err(write_error)?;

    for (energy, intensity) in spectrum.points() {
        writeln!(out, "{:.4}\t{:.6e}", energy, intensity).map_err(write_error)?;
    }

    out.flush().map_err(write_error)?;
    Ok(())
}
