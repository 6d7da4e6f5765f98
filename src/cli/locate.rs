//! # locate / samples 子命令 CLI 定义
//!
//! 在数据根目录中定位样品
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/locate.rs`

use super::RootArgs;
use clap::Args;

/// locate 子命令参数
#[derive(Args, Debug)]
pub struct LocateArgs {
    /// Sample name (as used in '<sample>_<n>__EDX_<m>.txt')
    pub sample: String,

    #[command(flatten)]
    pub root: RootArgs,

    /// Batch whose run files are listed
    #[arg(long, default_value_t = 1)]
    pub batch: u32,
}

/// samples 子命令参数
#[derive(Args, Debug)]
pub struct SamplesArgs {
    #[command(flatten)]
    pub root: RootArgs,

    /// Glob pattern on sample names (e.g., "Cu*")
    #[arg(short, long, default_value = "*")]
    pub pattern: String,
}
