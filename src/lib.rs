//! stacklog - 分级日志库
//!
//! 具名 Logger + 有序处理器栈 + 可选格式化器。
//!
//! ## 模块
//!
//! - **cfg**: 组件配置（`TypeOptions` 与按类型名构造的注册表）
//! - **log**: 日志级别、记录、处理器、格式化器、Logger 与 Logger 管理
//!
//! 日志宏（`info!`、`errorf!` 等）和 `args!` 导出在 crate 根。

pub mod cfg;
pub mod log;

// 重新导出主要的公共 API
pub use cfg::{create_trait_from_type_options, register_trait, TypeOptions};

pub use log::{
    Args, ConsoleHandler, ConsoleHandlerConfig, LogError, LogFormatter, LogHandler, LogLevel,
    LogRecord, Logger, LoggerConfig, TextFormatter, Value,
};
