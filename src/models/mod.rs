//! # 数据模型模块
//!
//! 定义谱图与分析会话数据模型。
//!
//! ## 依赖关系
//! - 被 `parsers/`, `xes/` 和 `commands/` 使用
//! - 子模块: spectrum, session

pub mod session;
pub mod spectrum;

pub use session::XesSession;
pub use spectrum::Spectrum;
