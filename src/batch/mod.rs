//! # 批量处理模块
//!
//! 提供样品定位与批量处理能力。
//!
//! ## 功能
//! - 在数据根目录中定位样品（带缓存）
//! - 按扫描选择加载数据
//! - 并行处理多个样品
//! - 进度反馈与统计
//!
//! ## 依赖关系
//! - 被各命令模块使用
//! - 使用 `rayon` 进行并行处理
//! - 使用 `indicatif` 显示进度

pub mod locator;
pub mod runner;

pub use locator::{count_batches, RunSelection, SampleLocator};
pub use runner::{BatchResult, BatchRunner, ProcessResult};
