//! # convert 子命令 CLI 定义
//!
//! 能量、Bragg 角与平台步数之间的换算
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/convert.rs`

use super::{AnalyzerArgs, GeometryArgs};
use clap::{Args, ValueEnum};

/// 输入量类型
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum Quantity {
    /// Photon energy (eV)
    Energy,
    /// Bragg angle (degrees)
    Angle,
    /// Linear stage encoder steps
    Steps,
}

impl std::fmt::Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Quantity::Energy => write!(f, "energy"),
            Quantity::Angle => write!(f, "angle"),
            Quantity::Steps => write!(f, "steps"),
        }
    }
}

/// convert 子命令参数
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Quantity the values are given in
    #[arg(long, value_enum)]
    pub from: Quantity,

    /// Values to convert
    #[arg(required = true, num_args = 1.., allow_negative_numbers = true)]
    pub values: Vec<f64>,

    #[command(flatten)]
    pub analyzer: AnalyzerArgs,

    #[command(flatten)]
    pub geometry: GeometryArgs,
}
