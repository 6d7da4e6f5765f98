//! # 谱仪几何参数
//!
//! 直线平台 + Rowland 圆几何的仪器常数。
//!
//! ## 依赖关系
//! - 被 `xes/bragg.rs` 使用
//! - 被 `cli/mod.rs` 的 GeometryArgs 构造

use crate::error::{Result, XesError};

/// Rowland 圆直径（与 mm/rev 同单位）
pub const ROWLAND_DIAMETER: f64 = 1000.0;

/// 谱仪几何参数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpectrometerGeometry {
    /// 丝杠每转行程 (mm)
    pub mm_per_rev: f64,
    /// 编码器每转步数
    pub steps_per_rev: f64,
    /// 固定位置偏移 (mm)
    pub fixed_offset: f64,
    /// 固定角度偏移 ψ（度）
    pub psi_degrees: f64,
}

impl Default for SpectrometerGeometry {
    fn default() -> Self {
        SpectrometerGeometry {
            mm_per_rev: -2.54,
            steps_per_rev: 10000.0,
            fixed_offset: 86.36,
            psi_degrees: 40.0,
        }
    }
}

impl SpectrometerGeometry {
    /// 创建并校验几何参数
    pub fn new(mm_per_rev: f64, steps_per_rev: f64, fixed_offset: f64, psi_degrees: f64) -> Result<Self> {
        let geometry = Self {
            mm_per_rev,
            steps_per_rev,
            fixed_offset,
            psi_degrees,
        };
        geometry.validate()?;
        Ok(geometry)
    }

    /// 检查是否存在使所有换算退化的参数
    pub fn validate(&self) -> Result<()> {
        let values = [
            ("mm_per_rev", self.mm_per_rev),
            ("steps_per_rev", self.steps_per_rev),
            ("fixed_offset", self.fixed_offset),
            ("psi", self.psi_degrees),
        ];
        for (name, value) in values {
            if !value.is_finite() {
                return Err(XesError::Configuration(format!(
                    "Geometry value {} = {} is not finite",
                    name, value
                )));
            }
        }
        if self.mm_per_rev == 0.0 {
            return Err(XesError::Configuration(
                "Geometry value mm_per_rev must be nonzero".to_string(),
            ));
        }
        if self.steps_per_rev == 0.0 {
            return Err(XesError::Configuration(
                "Geometry value steps_per_rev must be nonzero".to_string(),
            ));
        }
        if self.cos_psi().abs() < 1e-12 {
            return Err(XesError::Configuration(format!(
                "Geometry value psi = {}° makes cos(psi) vanish",
                self.psi_degrees
            )));
        }
        Ok(())
    }

    /// cos(ψ)
    pub fn cos_psi(&self) -> f64 {
        self.psi_degrees.to_radians().cos()
    }

    /// 每步对应的平台位移 (mm)
    pub fn mm_per_step(&self) -> f64 {
        self.mm_per_rev / self.steps_per_rev
    }

    /// 投影到中心面的固定偏移
    pub fn midplane_offset(&self) -> f64 {
        self.fixed_offset / self.cos_psi()
    }
}
