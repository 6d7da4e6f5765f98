//! # XES 计算模块
//!
//! 分析晶体 Bragg 换算、能量平移与谱图输出。
//!
//! ## 子模块
//! - `crystal`: 分析晶体材料与 (hkl)
//! - `geometry`: 谱仪几何参数
//! - `bragg`: 步数 / 角度 / 能量换算与能量平移
//! - `plot`: 图表生成
//! - `export`: 数据导出
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 使用 `models/spectrum.rs`

pub mod bragg;
pub mod crystal;
pub mod export;
pub mod geometry;
pub mod plot;

pub use bragg::{
    angle_from_steps, bragg_angle, bragg_energy, shift_spectrum, steps_from_angle,
    steps_from_energy, BraggBranch,
};
pub use crystal::{AnalyzerConfig, Material};
pub use geometry::SpectrometerGeometry;
