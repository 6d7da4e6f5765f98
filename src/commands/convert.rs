//! # convert 命令实现
//!
//! 能量、Bragg 角与平台步数互相换算并以表格输出。
//!
//! ## 依赖关系
//! - 使用 `cli/convert.rs` 定义的 ConvertArgs
//! - 使用 `xes/bragg.rs`

use crate::cli::convert::{ConvertArgs, Quantity};
use crate::error::Result;
use crate::utils::output;
use crate::xes::{self, AnalyzerConfig, BraggBranch, SpectrometerGeometry};

use tabled::{Table, Tabled};

/// 换算结果行
#[derive(Debug, Clone, PartialEq, Tabled)]
struct ConversionRow {
    #[tabled(rename = "Energy (eV)")]
    energy: String,
    #[tabled(rename = "θ (°)")]
    angle: String,
    #[tabled(rename = "Steps")]
    steps: String,
}

/// 执行 convert 命令
pub fn execute(args: ConvertArgs) -> Result<()> {
    output::print_header("Energy / Angle / Steps Conversion");

    let analyzer = args.analyzer.analyzer()?;
    let geometry = args.geometry.geometry()?;

    output::print_field("Analyzer", &analyzer.to_string());
    output::print_field(
        "E0 = hc/2d",
        &format!("{:.3} eV", analyzer.reference_energy()),
    );
    output::print_field("Input", &args.from.to_string());

    let mut rows = Vec::with_capacity(args.values.len());
    let mut low_branch = false;
    for &value in &args.values {
        let (energy, angle, steps) = convert_value(args.from, value, &analyzer, &geometry)?;
        low_branch |= BraggBranch::of(angle) == BraggBranch::Low;
        rows.push(ConversionRow {
            energy: format!("{:.4}", energy),
            angle: format!("{:.6}", angle),
            steps: format!("{:.1}", steps),
        });
    }

    println!("{}", Table::new(&rows));

    if low_branch {
        output::print_warning(
            "Angles below 45° share their stage position with 90° − θ; steps map back to the high-angle branch",
        );
    }

    Ok(())
}

/// 单值换算，返回 (energy, angle, steps)
fn convert_value(
    from: Quantity,
    value: f64,
    analyzer: &AnalyzerConfig,
    geometry: &SpectrometerGeometry,
) -> Result<(f64, f64, f64)> {
    match from {
        Quantity::Energy => {
            let angle = xes::bragg_angle(value, analyzer)?;
            Ok((value, angle, xes::steps_from_angle(angle, geometry)?))
        }
        Quantity::Angle => Ok((
            xes::bragg_energy(value, analyzer)?,
            value,
            xes::steps_from_angle(value, geometry)?,
        )),
        Quantity::Steps => {
            let angle = xes::angle_from_steps(value, geometry)?;
            Ok((xes::bragg_energy(angle, analyzer)?, angle, value))
        }
    }
}
