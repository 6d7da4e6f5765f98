//! # sum 命令实现
//!
//! 累加一个样品的全部扫描并导出；可同时保存分析会话。
//!
//! ## 依赖关系
//! - 使用 `cli/sum.rs` 定义的 SumArgs
//! - 使用 `batch/locator.rs`, `models/session.rs`
//! - 使用 `xes/export.rs`, `xes/plot.rs`

use crate::batch::SampleLocator;
use crate::cli::sum::SumArgs;
use crate::cli::Normalization;
use crate::commands::{guess_format_from_extension, write_spectra};
use crate::error::Result;
use crate::models::XesSession;
use crate::utils::output;
use crate::xes::plot::PlotOptions;

use std::path::PathBuf;
use tabled::{Table, Tabled};

/// 扫描汇总行
#[derive(Tabled)]
struct RunRow {
    #[tabled(rename = "Run")]
    run: u32,
    #[tabled(rename = "Points")]
    points: usize,
    #[tabled(rename = "Energy range (eV)")]
    range: String,
    #[tabled(rename = "Peak (cnts/live)")]
    peak: String,
    #[tabled(rename = "Total (cnts/live)")]
    total: String,
}

/// 执行 sum 命令
pub fn execute(args: SumArgs) -> Result<()> {
    output::print_header("Summing XES Runs");

    let mut locator = SampleLocator::new(&args.root.root)?;
    let selection = args.runs.selection()?;

    let session = XesSession::load(&mut locator, &args.sample, &selection, args.runs.batch)?;
    output::print_success(&format!(
        "Loaded {} runs of '{}' (batch {})",
        session.runs.len(),
        session.sample,
        session.batch
    ));
    print_run_table(&session);

    if let Some(ref path) = args.save {
        session.save_to_file(path)?;
        output::print_success(&format!("Session saved to '{}'", path.display()));
    }

    let normalize = args.normalize == Normalization::Integral;
    let spectrum = session.plot_spectrum(normalize)?;

    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("{}_sum.csv", args.sample)));
    let format = args
        .format
        .unwrap_or_else(|| guess_format_from_extension(&output_path));

    let options = PlotOptions {
        title: format!("{} (sum of {} runs)", session.sample, session.runs.len()),
        width: args.width,
        height: args.height,
        normalized: normalize,
        use_svg: false,
    };
    write_spectra(
        &[(session.sample.clone(), spectrum)],
        &output_path,
        format,
        options,
    )?;

    output::print_done(&format!("Summed spectrum saved to '{}'", output_path.display()));
    Ok(())
}

/// 打印扫描汇总表
fn print_run_table(session: &XesSession) {
    let rows: Vec<RunRow> = session
        .runs
        .iter()
        .map(|(run, spectrum)| RunRow {
            run: *run,
            points: spectrum.len(),
            range: spectrum
                .energy_range()
                .map(|(lo, hi)| format!("{:.2} - {:.2}", lo, hi))
                .unwrap_or_else(|| "-".to_string()),
            peak: spectrum
                .intensity_max()
                .map(|y| format!("{:.3e}", y))
                .unwrap_or_else(|| "-".to_string()),
            total: format!("{:.3e}", spectrum.total_intensity()),
        })
        .collect();

    if !rows.is_empty() {
        println!("{}", Table::new(&rows));
    }
}
