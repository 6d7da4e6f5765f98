//! # shift 命令实现
//!
//! 把参考能量处的特征平移指定能量，平移在平台步数空间中完成。
//!
//! ## 依赖关系
//! - 使用 `cli/shift.rs` 定义的 ShiftArgs
//! - 使用 `xes/bragg.rs` 进行换算
//! - 使用 `parsers/` 或 `batch/locator.rs` 获取输入谱图

use crate::batch::SampleLocator;
use crate::cli::shift::ShiftArgs;
use crate::commands::{guess_format_from_extension, write_spectra};
use crate::error::{Result, XesError};
use crate::models::{Spectrum, XesSession};
use crate::parsers;
use crate::utils::output;
use crate::xes::plot::PlotOptions;
use crate::xes::{self, BraggBranch};

/// 执行 shift 命令
pub fn execute(args: ShiftArgs) -> Result<()> {
    output::print_header("Energy Shift via Stage Steps");

    let analyzer = args.analyzer.analyzer()?;
    let geometry = args.geometry.geometry()?;

    let (name, spectrum) = load_input(&args)?;
    output::print_success(&format!("Loaded '{}' ({} points)", name, spectrum.len()));

    output::print_field("Analyzer", &analyzer.to_string());
    output::print_field("d-spacing", &format!("{:.6} Å", analyzer.d_spacing()));
    output::print_field(
        "Geometry",
        &format!(
            "{} mm/rev, {} steps/rev, offset {} mm, psi {}°",
            geometry.mm_per_rev, geometry.steps_per_rev, geometry.fixed_offset, geometry.psi_degrees
        ),
    );

    let reference_angle = xes::bragg_angle(args.reference, &analyzer)?;
    let current = xes::steps_from_energy(args.reference, &analyzer, &geometry)?;
    let target = xes::steps_from_energy(args.reference + args.amount, &analyzer, &geometry)?;
    output::print_field(
        "Reference",
        &format!("{:.3} eV at θ = {:.4}°", args.reference, reference_angle),
    );
    output::print_field(
        "Stage move",
        &format!("{:.1} -> {:.1} ({:+.1} steps)", current, target, target - current),
    );

    if BraggBranch::of(reference_angle) == BraggBranch::Low {
        output::print_warning(&format!(
            "Bragg angle {:.2}° is below 45°; stage positions are shared with {:.2}°",
            reference_angle,
            90.0 - reference_angle
        ));
    }

    let shifted = xes::shift_spectrum(&spectrum, args.reference, args.amount, &analyzer, &geometry)?;

    if let (Some((lo, hi)), Some((new_lo, new_hi))) = (spectrum.energy_range(), shifted.energy_range()) {
        output::print_field(
            "Energy range",
            &format!("{:.3} - {:.3} eV -> {:.3} - {:.3} eV", lo, hi, new_lo, new_hi),
        );
    }

    let format = args
        .format
        .unwrap_or_else(|| guess_format_from_extension(&args.output));

    // 图像同时画出原谱作对照
    let series = if format.is_image() {
        vec![
            (format!("{} (shifted {:+} eV)", name, args.amount), shifted),
            (name.clone(), spectrum),
        ]
    } else {
        vec![(format!("{} (shifted {:+} eV)", name, args.amount), shifted)]
    };

    let options = PlotOptions {
        title: format!("{} shifted at {:.2} eV", name, args.reference),
        width: args.width,
        height: args.height,
        normalized: false,
        use_svg: false,
    };
    write_spectra(&series, &args.output, format, options)?;

    output::print_done(&format!("Shifted spectrum saved to '{}'", args.output.display()));
    Ok(())
}

/// 读取输入谱图：样品（累加谱）或文件
fn load_input(args: &ShiftArgs) -> Result<(String, Spectrum)> {
    if let Some(ref sample) = args.sample {
        let root = args.root.as_ref().ok_or_else(|| {
            XesError::InvalidArgument("--sample requires --root or XES_ROOT".to_string())
        })?;
        let mut locator = SampleLocator::new(root)?;
        let session = XesSession::load(&mut locator, sample, &args.runs.selection()?, args.runs.batch)?;
        return Ok((sample.clone(), session.spectrum));
    }

    match args.input {
        Some(ref path) => {
            let name = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("spectrum")
                .to_string();
            Ok((name, parsers::parse_spectrum_file(path)?))
        }
        None => Err(XesError::InvalidArgument(
            "Either --sample or --input is required".to_string(),
        )),
    }
}
