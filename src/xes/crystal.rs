//! # 分析晶体配置
//!
//! 晶体材料与 Miller 指数，决定 Bragg 反射的 d 间距。
//!
//! ## 晶格常数来源
//! - 2d(111) 取自 X-ray data booklet
//! - 立方晶格常数 a = 2d(111) / 2 × √3
//! - Si 使用仪器标定值 5.43095 Å 覆盖
//!
//! ## 依赖关系
//! - 被 `xes/bragg.rs` 使用
//! - 被 `commands/shift.rs`, `commands/convert.rs` 使用

use crate::error::{Result, XesError};

use std::fmt;
use std::str::FromStr;

/// hc (eV·Å)
pub const HC: f64 = 12398.425;

/// 仪器标定的 Si 晶格常数 (Å)
const SI_CALIBRATED_LATTICE: f64 = 5.43095;

/// 分析晶体材料
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Material {
    Si,
    Ge,
}

impl Material {
    /// 2d(111) 间距 (Å)
    pub fn two_d_111(self) -> f64 {
        match self {
            Material::Si => 6.2712,
            Material::Ge => 6.532,
        }
    }

    /// 立方晶格常数 (Å)
    pub fn lattice_constant(self) -> f64 {
        match self {
            Material::Si => SI_CALIBRATED_LATTICE,
            Material::Ge => self.two_d_111() / 2.0 * 3.0_f64.sqrt(),
        }
    }
}

impl FromStr for Material {
    type Err = XesError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "si" | "silicon" => Ok(Material::Si),
            "ge" | "germanium" => Ok(Material::Ge),
            other => Err(XesError::Configuration(format!(
                "Unknown crystal material '{}' (expected: si, ge)",
                other
            ))),
        }
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Material::Si => write!(f, "si"),
            Material::Ge => write!(f, "ge"),
        }
    }
}

/// 分析晶体：材料 + 反射面 (hkl)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalyzerConfig {
    pub material: Material,
    pub h: i32,
    pub k: i32,
    pub l: i32,
}

impl AnalyzerConfig {
    /// 创建分析晶体配置，(000) 不是合法反射面
    pub fn new(material: Material, h: i32, k: i32, l: i32) -> Result<Self> {
        if h == 0 && k == 0 && l == 0 {
            return Err(XesError::Configuration(
                "Miller indices (0 0 0) do not define a crystal plane".to_string(),
            ));
        }
        Ok(Self { material, h, k, l })
    }

    /// 从材料名称创建
    pub fn from_name(material: &str, h: i32, k: i32, l: i32) -> Result<Self> {
        Self::new(material.parse()?, h, k, l)
    }

    /// d 间距 (Å)
    pub fn d_spacing(&self) -> f64 {
        let (h, k, l) = (self.h as f64, self.k as f64, self.l as f64);
        self.material.lattice_constant() / (h * h + k * k + l * l).sqrt()
    }

    /// 参考能量 hc / 2d (eV)，即 θ = 90° 时的反射能量
    pub fn reference_energy(&self) -> f64 {
        HC / (2.0 * self.d_spacing())
    }
}

impl fmt::Display for AnalyzerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}{}{})", self.material, self.h, self.k, self.l)
    }
}
