//! # export 命令实现
//!
//! 多个样品的累加谱并行导出，每个样品一个文件。
//!
//! ## 功能
//! - 先串行定位样品（定位缓存不跨线程共享）
//! - 并行加载、累加、写出（rayon）
//! - 已存在的输出默认跳过
//!
//! ## 依赖关系
//! - 使用 `cli/sum.rs` 定义的 ExportArgs
//! - 使用 `batch/` 模块进行定位与并行处理
//! - 使用 `xes/export.rs`, `xes/plot.rs`

use crate::batch::locator::load_runs_from;
use crate::batch::{BatchRunner, ProcessResult, RunSelection, SampleLocator};
use crate::cli::sum::ExportArgs;
use crate::cli::{Normalization, OutputFormat};
use crate::commands::write_spectra;
use crate::error::{Result, XesError};
use crate::models::XesSession;
use crate::utils::output;
use crate::xes::plot::PlotOptions;

use std::fs;
use std::path::{Path, PathBuf};

/// 批量导出配置
struct ExportConfig {
    output_dir: PathBuf,
    selection: RunSelection,
    batch: u32,
    normalize: bool,
    format: OutputFormat,
    overwrite: bool,
}

/// 执行 export 命令
pub fn execute(args: ExportArgs) -> Result<()> {
    output::print_header("Batch Export of Summed Spectra");

    let mut locator = SampleLocator::new(&args.root.root)?;

    let mut jobs: Vec<(String, PathBuf)> = Vec::new();
    for sample in &args.samples {
        if locator.is_cached(sample) {
            output::print_warning(&format!("Sample '{}' listed twice, exporting once", sample));
            continue;
        }
        match locator.locate(sample) {
            Ok(path) => jobs.push((sample.clone(), path)),
            Err(e) => output::print_warning(&e.to_string()),
        }
    }

    if jobs.is_empty() {
        output::print_warning("None of the requested samples were found");
        return Ok(());
    }
    output::print_info(&format!("Located {} of {} samples", jobs.len(), args.samples.len()));

    fs::create_dir_all(&args.output).map_err(|e| XesError::FileWriteError {
        path: args.output.display().to_string(),
        source: e,
    })?;

    let config = ExportConfig {
        output_dir: args.output.clone(),
        selection: args.runs.selection()?,
        batch: args.runs.batch,
        normalize: args.normalize == Normalization::Integral,
        format: args.format,
        overwrite: args.overwrite,
    };

    let runner = BatchRunner::new(args.jobs);
    output::print_info(&format!("Output format: {:?}, {} jobs", config.format, runner.jobs()));
    let result = runner.run(jobs, |(sample, path)| export_sample(sample, path, &config))?;

    output::print_separator();
    output::print_success(&format!(
        "Batch complete: {} samples, {} success, {} skipped, {} failed",
        result.total(),
        result.success,
        result.skipped,
        result.failed
    ));

    if !result.failures.is_empty() {
        output::print_warning("Failed samples:");
        for (sample, err) in result.failures.iter().take(10) {
            output::print_error(&format!("  {}: {}", sample, err));
        }
        if result.failures.len() > 10 {
            output::print_warning(&format!("  ... and {} more", result.failures.len() - 10));
        }
    }

    Ok(())
}

/// 导出单个样品
fn export_sample(sample: &str, sample_path: &Path, config: &ExportConfig) -> ProcessResult {
    let output_file = config
        .output_dir
        .join(format!("{}_sum.{}", sample, config.format.extension()));

    if output_file.exists() && !config.overwrite {
        return ProcessResult::Skipped(format!(
            "Output exists, skipping: {}",
            output_file.display()
        ));
    }

    let written = load_runs_from(sample_path, sample, &config.selection, config.batch)
        .and_then(|runs| XesSession::from_runs(sample, config.batch, runs))
        .and_then(|session| {
            let spectrum = session.plot_spectrum(config.normalize)?;
            let options = PlotOptions {
                title: sample.to_string(),
                width: 1200,
                height: 800,
                normalized: config.normalize,
                use_svg: false,
            };
            write_spectra(
                &[(sample.to_string(), spectrum)],
                &output_file,
                config.format,
                options,
            )
        });

    match written {
        Ok(()) => ProcessResult::Success(format!("{} -> {}", sample, output_file.display())),
        Err(e) => ProcessResult::Failed(sample.to_string(), e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::locator::run_file_path;

    #[test]
    fn test_export_sample_and_skip() {
        let root = tempfile::tempdir().unwrap();
        let sample_path = root.path().join("FeO");
        fs::create_dir_all(sample_path.join("FeO_1")).unwrap();
        for run in 0..2 {
            fs::write(
                run_file_path(&sample_path, "FeO", 1, run),
                "a\nb\nEnergy_(eV)\tcnts_per_live\n7050\t1\n7051\t2\n",
            )
            .unwrap();
        }

        let out = tempfile::tempdir().unwrap();
        let config = ExportConfig {
            output_dir: out.path().to_path_buf(),
            selection: RunSelection::All,
            batch: 1,
            normalize: false,
            format: OutputFormat::Xy,
            overwrite: false,
        };

        let first = export_sample("FeO", &sample_path, &config);
        assert!(matches!(first, ProcessResult::Success(_)), "{:?}", first);
        let text = fs::read_to_string(out.path().join("FeO_sum.xy")).unwrap();
        assert!(text.contains("7051.0000\t4.000000e0"));

        let second = export_sample("FeO", &sample_path, &config);
        assert!(matches!(second, ProcessResult::Skipped(_)));

        let missing = export_sample("FeO", &root.path().join("nowhere"), &ExportConfig {
            overwrite: true,
            ..config
        });
        assert!(matches!(missing, ProcessResult::Failed(..)));
    }
}
