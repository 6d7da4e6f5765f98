//! # EDX alldata 扫描文件解析器
//!
//! 解析采集软件写出的 `<sample><batch>_alldata_<run>.txt`。
//!
//! ## 格式说明
//! ```text
//! <preamble line 1>
//! <preamble line 2>
//! Energy_(eV)\tcnts_per_live\t...
//! 8300.0\t12.5\t...
//! ...
//! ```
//! 制表符分隔；只取 `Energy_(eV)` 与 `cnts_per_live` 两列，其余列忽略。
//!
//! ## 依赖关系
//! - 被 `parsers/mod.rs` 使用
//! - 使用 `csv` 读取表格
//! - 使用 `models/spectrum.rs`

use crate::error::{Result, XesError};
use crate::models::Spectrum;

use std::fs;
use std::path::Path;

/// 能量列名
pub const ENERGY_COLUMN: &str = "Energy_(eV)";
/// 强度列名
pub const INTENSITY_COLUMN: &str = "cnts_per_live";

/// 表头前的说明行数
const PREAMBLE_LINES: usize = 2;

/// 解析 alldata 文件
pub fn parse_alldata_file(path: &Path) -> Result<Spectrum> {
    let content = fs::read_to_string(path).map_err(|e| XesError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_alldata_content(&content).map_err(|reason| XesError::ParseError {
        format: "alldata".to_string(),
        path: path.display().to_string(),
        reason,
    })
}

/// 从字符串内容解析 alldata 格式
pub fn parse_alldata_content(content: &str) -> std::result::Result<Spectrum, String> {
    let table: String = content
        .lines()
        .skip(PREAMBLE_LINES)
        .collect::<Vec<_>>()
        .join("\n");

    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(table.as_bytes());

    let headers = rdr.headers().map_err(|e| e.to_string())?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| format!("Missing column '{}'", name))
    };
    let energy_idx = column(ENERGY_COLUMN)?;
    let intensity_idx = column(INTENSITY_COLUMN)?;

    let mut points = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let record = record.map_err(|e| e.to_string())?;
        // 空行
        if record.iter().all(|f| f.is_empty()) {
            continue;
        }

        let line = i + PREAMBLE_LINES + 2;
        let field = |idx: usize, name: &str| -> std::result::Result<f64, String> {
            let raw = record
                .get(idx)
                .ok_or_else(|| format!("Line {}: missing '{}' value", line, name))?;
            raw.parse::<f64>()
                .map_err(|_| format!("Line {}: invalid '{}' value '{}'", line, name, raw))
        };

        points.push((
            field(energy_idx, ENERGY_COLUMN)?,
            field(intensity_idx, INTENSITY_COLUMN)?,
        ));
    }

    Ok(Spectrum::from_points(points))
}
