//! # plot 命令实现
//!
//! 快速绘制样品谱图：默认绘制累加谱，`--individual` 绘制每次扫描。
//!
//! ## 依赖关系
//! - 使用 `cli/plot.rs` 定义的 PlotArgs
//! - 使用 `batch/locator.rs`, `models/session.rs`
//! - 使用 `xes/plot.rs` 绘图

use crate::batch::SampleLocator;
use crate::cli::plot::PlotArgs;
use crate::cli::{Normalization, OutputFormat};
use crate::commands::write_spectra;
use crate::error::Result;
use crate::models::{Spectrum, XesSession};
use crate::utils::output;
use crate::xes::plot::PlotOptions;

/// 执行 plot 命令
pub fn execute(args: PlotArgs) -> Result<()> {
    output::print_header("XES Quick Plot");

    let mut locator = SampleLocator::new(&args.root.root)?;
    let selection = args.runs.selection()?;
    let normalize = args.normalize == Normalization::Integral;

    let mut series: Vec<(String, Spectrum)> = Vec::new();
    for sample in &args.samples {
        let session = XesSession::load(&mut locator, sample, &selection, args.runs.batch)?;
        output::print_success(&format!(
            "Loaded '{}' batch {}: {} runs, {} points",
            sample,
            session.batch,
            session.runs.len(),
            session.spectrum.len()
        ));

        if args.individual {
            for (run, spectrum) in &session.runs {
                let spectrum = if normalize {
                    spectrum.integral_normalize()?
                } else {
                    spectrum.clone()
                };
                series.push((format!("{}{}", sample, run), spectrum));
            }
        } else {
            series.push((sample.clone(), session.plot_spectrum(normalize)?));
        }
    }

    let format = if super::guess_format_from_extension(&args.output) == OutputFormat::Svg {
        OutputFormat::Svg
    } else {
        OutputFormat::Png
    };

    let options = PlotOptions {
        title: args.title.clone().unwrap_or_else(|| args.samples.join(", ")),
        width: args.width,
        height: args.height,
        normalized: normalize,
        use_svg: false,
    };

    write_spectra(&series, &args.output, format, options)?;

    output::print_done(&format!(
        "Plotted {} spectra to '{}'",
        series.len(),
        args.output.display()
    ));
    Ok(())
}
