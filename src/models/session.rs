//! # 分析会话
//!
//! 一个样品一个批次的全部扫描及其累加谱，可保存为 JSON 并重新载入。
//!
//! ## 依赖关系
//! - 被 `commands/sum.rs`, `commands/plot.rs`, `parsers/mod.rs` 使用
//! - 使用 `batch/locator.rs` 加载扫描
//! - 使用 `serde_json` 持久化

use crate::batch::{RunSelection, SampleLocator};
use crate::error::{Result, XesError};
use crate::models::Spectrum;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// XES 分析会话
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct XesSession {
    /// 样品名
    pub sample: String,
    /// 批次号
    pub batch: u32,
    /// 各次扫描
    pub runs: BTreeMap<u32, Spectrum>,
    /// 累加谱
    pub spectrum: Spectrum,
}

impl XesSession {
    /// 由已加载的扫描构造
    pub fn from_runs(sample: &str, batch: u32, runs: BTreeMap<u32, Spectrum>) -> Result<Self> {
        let spectrum = Spectrum::sum(&runs, sample)?;
        Ok(Self {
            sample: sample.to_string(),
            batch,
            runs,
            spectrum,
        })
    }

    /// 定位样品并加载扫描
    pub fn load(
        locator: &mut SampleLocator,
        sample: &str,
        selection: &RunSelection,
        batch: u32,
    ) -> Result<Self> {
        let runs = locator.load_runs(sample, selection, batch)?;
        Self::from_runs(sample, batch, runs)
    }

    /// 用于绘图的谱图
    pub fn plot_spectrum(&self, normalize: bool) -> Result<Spectrum> {
        if normalize {
            self.spectrum.integral_normalize()
        } else {
            Ok(self.spectrum.clone())
        }
    }

    /// 保存为 JSON
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|e| XesError::FileWriteError {
            path: path.display().to_string(),
            source: e,
        })?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }

    /// 从 JSON 载入
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| XesError::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;
        let session: XesSession = serde_json::from_reader(BufReader::new(file))?;

        for spectrum in session.runs.values().chain(std::iter::once(&session.spectrum)) {
            if spectrum.energy().len() != spectrum.intensity().len() {
                return Err(XesError::LengthMismatch {
                    energy: spectrum.energy().len(),
                    intensity: spectrum.intensity().len(),
                });
            }
        }

        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> XesSession {
        let mut runs = BTreeMap::new();
        runs.insert(0, Spectrum::new(vec![1.0, 2.0], vec![1.0, 2.0]).unwrap());
        runs.insert(1, Spectrum::new(vec![1.0, 2.0], vec![3.0, 4.0]).unwrap());
        XesSession::from_runs("CuO", 1, runs).unwrap()
    }

    #[test]
    fn test_from_runs_sums() {
        let s = session();
        assert_eq!(s.spectrum.intensity(), &[4.0, 6.0]);
        assert_eq!(s.runs.len(), 2);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cuo.json");
        let s = session();
        s.save_to_file(&path).unwrap();
        assert_eq!(XesSession::load_from_file(&path).unwrap(), s);
    }

    #[test]
    fn test_load_rejects_corrupt_spectrum() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(
            &path,
            r#"{"sample":"x","batch":1,"runs":{},"spectrum":{"energy":[1.0,2.0],"intensity":[1.0]}}"#,
        )
        .unwrap();
        assert!(matches!(
            XesSession::load_from_file(&path),
            Err(XesError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn test_empty_runs() {
        assert!(matches!(
            XesSession::from_runs("CuO", 1, BTreeMap::new()),
            Err(XesError::NoRuns { .. })
        ));
    }
}
