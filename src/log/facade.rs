//! `log` crate 桥接
//!
//! 把 `log::info!` 等宏的输出转发到一个 [`Logger`]，
//! 便于第三方库的日志进入同一条处理器链。

use crate::log::level::LogLevel;
use crate::log::logger::Logger;
use ::log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::sync::Arc;

impl From<Level> for LogLevel {
    fn from(level: Level) -> Self {
        match level {
            Level::Error => LogLevel::Error,
            Level::Warn => LogLevel::Warning,
            Level::Info => LogLevel::Info,
            Level::Debug | Level::Trace => LogLevel::Debug,
        }
    }
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Critical | LogLevel::Error => Level::Error,
            LogLevel::Warning => Level::Warn,
            LogLevel::Notice | LogLevel::Info => Level::Info,
            LogLevel::Debug => Level::Debug,
        }
    }
}

/// 实现 [`log::Log`] 的桥接器
pub struct LogBridge {
    logger: Arc<Logger>,
    max_level: LevelFilter,
}

impl LogBridge {
    pub fn new(logger: Arc<Logger>, max_level: LevelFilter) -> Self {
        Self { logger, max_level }
    }

    /// 安装为全局 `log` 实现，每个进程只能成功一次
    pub fn init(logger: Arc<Logger>, max_level: LevelFilter) -> Result<(), SetLoggerError> {
        ::log::set_boxed_logger(Box::new(Self::new(logger, max_level)))?;
        ::log::set_max_level(max_level);
        Ok(())
    }

    pub fn logger(&self) -> &Arc<Logger> {
        &self.logger
    }
}

impl Log for LogBridge {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.max_level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        // 处理器失败或 Logger 已关闭时丢弃，log 门面没有返回错误的途径
        let _ = self
            .logger
            .log(record.level().into(), None, record.args().to_string());
    }

    fn flush(&self) {}
}
