//! # 两列谱图文件解析器
//!
//! 读回 `xes/export.rs` 导出的谱图，也可读取其他程序的两列数据。
//!
//! ## 支持格式
//! - CSV: 首行表头，取前两列
//! - XY: `#` 注释行，空白分隔，取前两列
//!
//! ## 依赖关系
//! - 被 `parsers/mod.rs` 使用
//! - 使用 `csv` 读取 CSV

use crate::error::{Result, XesError};
use crate::models::Spectrum;

use std::fs;
use std::path::Path;

/// 解析 CSV 谱图文件
pub fn parse_csv_file(path: &Path) -> Result<Spectrum> {
    let parse_error = |reason: String| XesError::ParseError {
        format: "CSV".to_string(),
        path: path.display().to_string(),
        reason,
    };

    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;

    let mut points = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let record = record?;
        if record.len() < 2 {
            return Err(parse_error(format!("Line {}: expected 2 columns", i + 2)));
        }
        let x: f64 = record[0]
            .parse()
            .map_err(|_| parse_error(format!("Line {}: invalid number '{}'", i + 2, &record[0])))?;
        let y: f64 = record[1]
            .parse()
            .map_err(|_| parse_error(format!("Line {}: invalid number '{}'", i + 2, &record[1])))?;
        points.push((x, y));
    }

    Ok(Spectrum::from_points(points))
}

/// 解析 XY 谱图文件
pub fn parse_xy_file(path: &Path) -> Result<Spectrum> {
    let content = fs::read_to_string(path).map_err(|e| XesError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_xy_content(&content).map_err(|reason| XesError::ParseError {
        format: "XY".to_string(),
        path: path.display().to_string(),
        reason,
    })
}

/// 从字符串内容解析 XY 格式
pub fn parse_xy_content(content: &str) -> std::result::Result<Spectrum, String> {
    let mut points = Vec::new();

    for (i, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 2 {
            return Err(format!("Line {}: expected 2 columns", i + 1));
        }

        let x: f64 = parts[0]
            .parse()
            .map_err(|_| format!("Line {}: invalid number '{}'", i + 1, parts[0]))?;
        let y: f64 = parts[1]
            .parse()
            .map_err(|_| format!("Line {}: invalid number '{}'", i + 1, parts[1]))?;
        points.push((x, y));
    }

    Ok(Spectrum::from_points(points))
}
