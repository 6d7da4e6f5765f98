//! # 谱图数据模型
//!
//! 能量轴 (eV) 与强度轴 (cnts/live s) 的成对序列。
//!
//! ## 依赖关系
//! - 被 `parsers/`, `xes/`, `models/session.rs` 使用
//! - 被所有 `commands/` 模块使用

use crate::error::{Result, XesError};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 谱图：等长的能量与强度序列
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spectrum {
    energy: Vec<f64>,
    intensity: Vec<f64>,
}

impl Spectrum {
    /// 创建谱图，两轴长度必须一致
    pub fn new(energy: Vec<f64>, intensity: Vec<f64>) -> Result<Self> {
        if energy.len() != intensity.len() {
            return Err(XesError::LengthMismatch {
                energy: energy.len(),
                intensity: intensity.len(),
            });
        }
        Ok(Self { energy, intensity })
    }

    /// 从 (energy, intensity) 点列创建
    pub fn from_points(points: impl IntoIterator<Item = (f64, f64)>) -> Self {
        let (energy, intensity) = points.into_iter().unzip();
        Self { energy, intensity }
    }

    pub fn energy(&self) -> &[f64] {
        &self.energy
    }

    pub fn intensity(&self) -> &[f64] {
        &self.intensity
    }

    pub fn len(&self) -> usize {
        self.energy.len()
    }

    pub fn is_empty(&self) -> bool {
        self.energy.is_empty()
    }

    /// (energy, intensity) 点迭代器
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.energy.iter().copied().zip(self.intensity.iter().copied())
    }

    /// 能量范围 (min, max)
    pub fn energy_range(&self) -> Option<(f64, f64)> {
        if self.is_empty() {
            return None;
        }
        let min = self.energy.iter().copied().fold(f64::INFINITY, f64::min);
        let max = self.energy.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Some((min, max))
    }

    /// 最大强度
    pub fn intensity_max(&self) -> Option<f64> {
        self.intensity.iter().copied().reduce(f64::max)
    }

    /// 总强度
    pub fn total_intensity(&self) -> f64 {
        self.intensity.iter().sum()
    }

    /// 替换能量轴，强度保持不变
    pub fn with_energy(&self, energy: Vec<f64>) -> Result<Self> {
        Self::new(energy, self.intensity.clone())
    }

    /// 积分归一化：强度除以总和
    pub fn integral_normalize(&self) -> Result<Self> {
        let total = self.total_intensity();
        if total == 0.0 || !total.is_finite() {
            return Err(XesError::domain(
                "integral_normalize",
                "total intensity",
                total,
                total,
            ));
        }
        Ok(Self {
            energy: self.energy.clone(),
            intensity: self.intensity.iter().map(|y| y / total).collect(),
        })
    }

    /// 累加多次扫描（能量轴必须完全一致）
    pub fn sum(runs: &BTreeMap<u32, Spectrum>, sample: &str) -> Result<Self> {
        let mut iter = runs.iter();
        let (_, first) = iter.next().ok_or_else(|| XesError::NoRuns {
            sample: sample.to_string(),
        })?;

        let mut total = first.clone();
        for (&run, spectrum) in iter {
            if spectrum.energy != total.energy {
                return Err(XesError::EnergyMismatch { run });
            }
            for (acc, y) in total.intensity.iter_mut().zip(&spectrum.intensity) {
                *acc += y;
            }
        }

        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runs(spectra: Vec<Spectrum>) -> BTreeMap<u32, Spectrum> {
        spectra
            .into_iter()
            .enumerate()
            .map(|(i, s)| (i as u32, s))
            .collect()
    }

    #[test]
    fn test_length_mismatch() {
        let err = Spectrum::new(vec![1.0, 2.0], vec![1.0]).unwrap_err();
        assert!(matches!(
            err,
            XesError::LengthMismatch {
                energy: 2,
                intensity: 1
            }
        ));
    }

    #[test]
    fn test_sum_runs() {
        let a = Spectrum::new(vec![1.0, 2.0, 3.0], vec![1.0, 2.0, 3.0]).unwrap();
        let b = Spectrum::new(vec![1.0, 2.0, 3.0], vec![10.0, 20.0, 30.0]).unwrap();
        let total = Spectrum::sum(&runs(vec![a, b]), "CuO").unwrap();
        assert_eq!(total.energy(), &[1.0, 2.0, 3.0]);
        assert_eq!(total.intensity(), &[11.0, 22.0, 33.0]);
    }

    #[test]
    fn test_sum_rejects_mismatched_energy() {
        let a = Spectrum::new(vec![1.0, 2.0], vec![1.0, 1.0]).unwrap();
        let b = Spectrum::new(vec![1.0, 2.5], vec![1.0, 1.0]).unwrap();
        let c = Spectrum::new(vec![1.0], vec![1.0]).unwrap();
        assert!(matches!(
            Spectrum::sum(&runs(vec![a.clone(), b]), "x"),
            Err(XesError::EnergyMismatch { run: 1 })
        ));
        assert!(matches!(
            Spectrum::sum(&runs(vec![a, c]), "x"),
            Err(XesError::EnergyMismatch { run: 1 })
        ));
    }

    #[test]
    fn test_sum_empty() {
        let err = Spectrum::sum(&BTreeMap::new(), "NiO").unwrap_err();
        assert!(matches!(err, XesError::NoRuns { sample } if sample == "NiO"));
    }

    #[test]
    fn test_integral_normalize() {
        let s = Spectrum::new(vec![1.0, 2.0, 3.0, 4.0], vec![1.0, 3.0, 4.0, 2.0]).unwrap();
        let n = s.integral_normalize().unwrap();
        assert!((n.total_intensity() - 1.0).abs() < 1e-12);
        assert!((n.intensity()[2] - 0.4).abs() < 1e-12);
        assert_eq!(n.energy(), s.energy());

        let zero = Spectrum::new(vec![1.0], vec![0.0]).unwrap();
        assert!(matches!(
            zero.integral_normalize(),
            Err(XesError::Domain { .. })
        ));
    }

    #[test]
    fn test_ranges() {
        let s = Spectrum::from_points(vec![(8330.0, 5.0), (8320.0, 9.0), (8340.0, 1.0)]);
        assert_eq!(s.energy_range(), Some((8320.0, 8340.0)));
        assert_eq!(s.intensity_max(), Some(9.0));
        assert_eq!(Spectrum::from_points(Vec::new()).energy_range(), None);
    }
}
