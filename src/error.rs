//! # 统一错误处理模块
//!
//! 定义 xestool 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// xestool 统一错误类型
#[derive(Error, Debug)]
pub enum XesError {
    // ─────────────────────────────────────────────────────────────
    // 数值定义域错误
    // ─────────────────────────────────────────────────────────────
    #[error("Domain error in {operation}: {quantity} = {value} is outside the valid domain (input {input})")]
    Domain {
        operation: &'static str,
        quantity: &'static str,
        value: f64,
        input: f64,
    },

    #[error("Configuration error: {0}")]
    Configuration(String),

    // ─────────────────────────────────────────────────────────────
    // 谱图数据错误
    // ─────────────────────────────────────────────────────────────
    #[error("Spectrum length mismatch: {energy} energy values vs {intensity} intensity values")]
    LengthMismatch { energy: usize, intensity: usize },

    #[error("Run {run} has a different energy axis than the other runs")]
    EnergyMismatch { run: u32 },

    #[error("No runs loaded for sample '{sample}'")]
    NoRuns { sample: String },

    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: String },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("No data directory for sample '{sample}' found under {root}")]
    SampleNotFound { sample: String, root: String },

    // ─────────────────────────────────────────────────────────────
    // 解析错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to parse {format} file: {path}\nReason: {reason}")]
    ParseError {
        format: String,
        path: String,
        reason: String,
    },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid range format: {0}")]
    InvalidRange(String),

    // ─────────────────────────────────────────────────────────────
    // 序列化错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    // ─────────────────────────────────────────────────────────────
    // 其他
    // ─────────────────────────────────────────────────────────────
    #[error("Plot error: {0}")]
    PlotError(String),

    #[error("{0}")]
    Other(String),
}

impl XesError {
    /// 构造定义域错误
    pub fn domain(
        operation: &'static str,
        quantity: &'static str,
        value: f64,
        input: f64,
    ) -> Self {
        XesError::Domain {
            operation,
            quantity,
            value,
            input,
        }
    }
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, XesError>;
