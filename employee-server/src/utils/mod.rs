//! 工具模块 - 通用工具函数和类型
//!
//! - [`AppError`] - 处理器错误类型
//! - 日志初始化

pub mod error;
pub mod logger;

pub use error::{AppError, AppResult};
