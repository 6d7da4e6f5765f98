//! # 解析器模块
//!
//! 提供扫描数据文件和导出谱图文件的解析器。
//!
//! ## 依赖关系
//! - 被 `commands/` 和 `batch/locator.rs` 使用
//! - 使用 `models/` 数据模型
//! - 子模块: alldata, columns

pub mod alldata;
pub mod columns;

use crate::error::{Result, XesError};
use crate::models::{Spectrum, XesSession};
use std::path::Path;

/// 从文件路径推断格式并读取谱图
///
/// 会话文件 (.json) 取其累加谱。
pub fn parse_spectrum_file(path: &Path) -> Result<Spectrum> {
    if !path.is_file() {
        return Err(XesError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "csv" => columns::parse_csv_file(path),
        "xy" | "dat" => columns::parse_xy_file(path),
        "json" => Ok(XesSession::load_from_file(path)?.spectrum),
        "txt" => {
            // alldata 扫描文件也是 .txt
            let is_alldata = path
                .file_name()
                .and_then(|n| n.to_str())
                .map(|n| n.contains("_alldata_"))
                .unwrap_or(false);
            if is_alldata {
                alldata::parse_alldata_file(path)
            } else {
                columns::parse_xy_file(path)
            }
        }
        _ => Err(XesError::UnsupportedFormat(format!(
            "Cannot determine spectrum format for: {}",
            path.display()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_dispatch_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let xy = dir.path().join("a.xy");
        fs::write(&xy, "1 2\n3 4\n").unwrap();
        assert_eq!(parse_spectrum_file(&xy).unwrap().len(), 2);

        let alldata = dir.path().join("CuO1_alldata_0.txt");
        fs::write(&alldata, "p\nq\nEnergy_(eV)\tcnts_per_live\n8300\t1\n").unwrap();
        assert_eq!(parse_spectrum_file(&alldata).unwrap().energy(), &[8300.0]);

        let unknown = dir.path().join("a.spe");
        fs::write(&unknown, "").unwrap();
        assert!(matches!(
            parse_spectrum_file(&unknown),
            Err(XesError::UnsupportedFormat(_))
        ));

        assert!(matches!(
            parse_spectrum_file(&dir.path().join("missing.xy")),
            Err(XesError::FileNotFound { .. })
        ));
    }
}
