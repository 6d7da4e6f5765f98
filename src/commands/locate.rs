//! # locate / samples 命令实现
//!
//! 在数据根目录中定位样品目录，或列出全部样品。
//!
//! ## 依赖关系
//! - 使用 `cli/locate.rs` 定义的参数
//! - 使用 `batch/locator.rs`
//! - 使用 `utils/output.rs`, `utils/progress.rs`

use crate::batch::{count_batches, SampleLocator};
use crate::cli::locate::{LocateArgs, SamplesArgs};
use crate::error::Result;
use crate::utils::{output, progress};

use tabled::{Table, Tabled};

/// 样品列表行
#[derive(Tabled)]
struct SampleRow {
    #[tabled(rename = "Sample")]
    sample: String,
    #[tabled(rename = "Batches")]
    batches: String,
    #[tabled(rename = "Directory")]
    directory: String,
}

/// 执行 locate 命令
pub fn execute(args: LocateArgs) -> Result<()> {
    output::print_header("Locating Sample Data");

    let mut locator = SampleLocator::new(&args.root.root)?;

    let spinner = progress::create_spinner(&format!(
        "Searching '{}' for sample '{}'...",
        locator.root().display(),
        args.sample
    ));
    let located = locator.locate(&args.sample);
    spinner.finish_and_clear();
    let sample_path = located?;

    output::print_success(&format!(
        "Sample '{}' found at '{}'",
        args.sample,
        sample_path.display()
    ));
    output::print_field("Batches", &count_batches(&sample_path)?.to_string());

    let mut run = 0;
    while locator.run_file(&args.sample, args.batch, run)?.is_file() {
        run += 1;
    }
    if run == 0 {
        output::print_warning(&format!("No run files in batch {}", args.batch));
    } else {
        output::print_field(
            &format!("Runs (batch {})", args.batch),
            &format!("{} (0..={})", run, run - 1),
        );
    }

    Ok(())
}

/// 执行 samples 命令
pub fn execute_samples(args: SamplesArgs) -> Result<()> {
    output::print_header("Samples Under Data Root");

    let mut locator = SampleLocator::new(&args.root.root)?;

    let spinner = progress::create_spinner(&format!("Scanning '{}'...", locator.root().display()));
    let discovered = locator.discover(&args.pattern);
    spinner.finish_and_clear();
    let samples = discovered?;

    if samples.is_empty() {
        output::print_warning(&format!("No samples matching '{}'", args.pattern));
        return Ok(());
    }

    let rows: Vec<SampleRow> = samples
        .iter()
        .map(|(sample, path)| SampleRow {
            sample: sample.clone(),
            batches: count_batches(path)
                .map(|n| n.to_string())
                .unwrap_or_else(|_| "?".to_string()),
            directory: path.display().to_string(),
        })
        .collect();

    println!("{}", Table::new(&rows));
    output::print_done(&format!("Found {} samples", rows.len()));

    Ok(())
}
