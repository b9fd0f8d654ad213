//! 日志模块
//!
//! 具名 Logger 把每次日志调用构造成一条 [`LogRecord`]，
//! 再按处理器栈的顺序分发给阈值满足的处理器。
//!
//! # 特性
//!
//! - 六个日志级别：Critical, Error, Warning, Notice, Info, Debug
//! - 每个级别有普通形式（参数以空格拼接）和 printf 形式（`infof` 等）
//! - 处理器可自带格式化器，格式化结果只对该处理器可见
//! - 内置 ConsoleHandler（按级别着色）与 TextFormatter
//! - 基于配置的动态创建，命名 Logger 管理与全局默认 Logger
//! - `log` crate 桥接
//!
//! # 快速开始
//!
//! ```rust,no_run
//! use stacklog::args;
//! use stacklog::log::*;
//! use std::sync::Arc;
//!
//! fn main() -> anyhow::Result<()> {
//!     let logger = Logger::new("svc");
//!     logger.push_handler(Arc::new(ConsoleHandler::new(ConsoleHandlerConfig {
//!         level: LogLevel::Info,
//!         ..Default::default()
//!     })?));
//!
//!     logger.info("Application started")?;
//!     logger.errorf("connect %s failed: %d", args!["db", 111])?;
//!     logger.close()?;
//!     Ok(())
//! }
//! ```
//!
//! 也可以从配置创建：
//!
//! ```rust,no_run
//! use stacklog::log::*;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config: LoggerCreateConfig = json5::from_str(r#"
//!         {
//!             name: "svc",
//!             handlers: [{
//!                 type: "ConsoleHandler",
//!                 options: {
//!                     level: "debug",
//!                     formatter: { type: "TextFormatter", options: { template: "{time} {message}" } }
//!                 }
//!             }]
//!         }
//!     "#)?;
//!
//!     let logger = Logger::from_config(config)?;
//!     logger.debug("ready")?;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod facade;
pub mod formatter;
pub mod global_logger_manager;
pub mod handler;
pub mod level;
pub mod logger;
pub mod logger_manager;
pub mod macros;
pub mod printf;
pub mod record;
pub mod sequence;
pub mod value;

// 重新导出核心类型
pub use error::{HandlerFailure, LogError};
pub use facade::LogBridge;
pub use formatter::{
    create_formatter_from_options, register_formatters, LogFormatter, TextFormatter,
    TextFormatterConfig,
};
pub use handler::{
    create_handler_from_options, register_handlers, ConsoleHandler, ConsoleHandlerConfig,
    LogHandler, Target,
};
pub use level::LogLevel;
pub use logger::{Logger, LoggerConfig, LoggerCreateConfig};
pub use logger_manager::{LoggerManager, LoggerManagerConfig};
pub use printf::sprintf;
pub use record::LogRecord;
pub use sequence::{global_sequence, SequenceCounter};
pub use value::{Args, Value};

pub use global_logger_manager::{
    add, contains, get, get_default, get_or_default, global_logger_manager, init, keys, remove,
    set_default,
    // 默认 logger 的便捷 log 方法
    critical, criticalf, debug, debugf, error, errorf, fatal, fatalf, info, infof, log, notice,
    noticef, warning, warningf,
};
