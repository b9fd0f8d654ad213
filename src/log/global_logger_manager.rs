use crate::log::error::LogError;
use crate::log::handler::ConsoleHandler;
use crate::log::level::LogLevel;
use crate::log::logger::Logger;
use crate::log::logger_manager::{LoggerManager, LoggerManagerConfig};
use crate::log::value::Args;
use anyhow::Result;
use once_cell::sync::Lazy;
use std::sync::{Arc, PoisonError};

/// 全局 LoggerManager 单例
///
/// 默认包含一个输出到终端的 INFO 级别 logger
static GLOBAL_LOGGER_MANAGER: Lazy<Arc<LoggerManager>> = Lazy::new(|| {
    let manager = LoggerManager::new(LoggerManagerConfig::default()).unwrap_or_else(|e| {
        ::log::warn!("failed to build default logger manager: {:#}", e);
        let logger = Logger::new("default");
        logger.push_handler(Arc::new(ConsoleHandler::stdout(LogLevel::Info)));
        LoggerManager::with_default(Arc::new(logger))
    });
    Arc::new(manager)
});

/// 初始化全局 LoggerManager
///
/// 配置中的 logger 合并到全局单例，同名覆盖；默认 logger 被替换。
///
/// # 示例
///
/// ```ignore
/// let config: LoggerManagerConfig = json5::from_str(r#"{
///     default: { level: "info" },
///     loggers: { db: { handlers: [{ type: "ConsoleHandler", options: { level: "debug" } }] } }
/// }"#)?;
/// stacklog::log::init(config)?;
/// ```
pub fn init(config: LoggerManagerConfig) -> Result<()> {
    let manager = LoggerManager::new(config)?;
    let global = global_logger_manager();

    {
        let loggers = manager.loggers.read().unwrap_or_else(PoisonError::into_inner);
        for (key, logger) in loggers.iter() {
            global.add_logger(key.clone(), Arc::clone(logger));
        }
    }

    global.set_default(manager.get_default());
    Ok(())
}

/// 获取全局 LoggerManager
pub fn global_logger_manager() -> Arc<LoggerManager> {
    Arc::clone(&GLOBAL_LOGGER_MANAGER)
}

/// 获取指定 key 的 logger（全局）
pub fn get(key: &str) -> Option<Arc<Logger>> {
    GLOBAL_LOGGER_MANAGER.get_logger(key)
}

/// 获取指定 key 的 logger，如果不存在则返回默认 logger（全局）
pub fn get_or_default(key: &str) -> Arc<Logger> {
    GLOBAL_LOGGER_MANAGER.get_or_default(key)
}

/// 获取默认 logger（全局）
pub fn get_default() -> Arc<Logger> {
    GLOBAL_LOGGER_MANAGER.get_default()
}

/// 设置默认 logger（全局）
pub fn set_default(logger: Arc<Logger>) {
    GLOBAL_LOGGER_MANAGER.set_default(logger)
}

/// 动态添加 logger（全局）
pub fn add(key: impl Into<String>, logger: Arc<Logger>) -> Option<Arc<Logger>> {
    GLOBAL_LOGGER_MANAGER.add_logger(key, logger)
}

/// 检查指定 key 的 logger 是否存在（全局）
pub fn contains(key: &str) -> bool {
    GLOBAL_LOGGER_MANAGER.contains(key)
}

/// 获取所有 logger 的 key 列表（全局）
pub fn keys() -> Vec<String> {
    GLOBAL_LOGGER_MANAGER.keys()
}

/// 移除指定 key 的 logger（全局）
pub fn remove(key: &str) -> Option<Arc<Logger>> {
    GLOBAL_LOGGER_MANAGER.remove_logger(key)
}

// ========== 默认 logger 的便捷 log 方法 ==========

/// 使用默认 logger 记录日志
pub fn log(level: LogLevel, template: Option<&str>, args: impl Into<Args>) -> Result<(), LogError> {
    get_default().log(level, template, args)
}

macro_rules! default_logger_functions {
    ($($plain:ident, $printf:ident;)*) => {
        $(
            #[doc = concat!("使用默认 logger 调用 [`Logger::", stringify!($plain), "`]")]
            pub fn $plain(args: impl Into<Args>) -> Result<(), LogError> {
                get_default().$plain(args)
            }

            #[doc = concat!("使用默认 logger 调用 [`Logger::", stringify!($printf), "`]")]
            pub fn $printf(template: &str, args: impl Into<Args>) -> Result<(), LogError> {
                get_default().$printf(template, args)
            }
        )*
    };
}

default_logger_functions! {
    critical, criticalf;
    error, errorf;
    warning, warningf;
    notice, noticef;
    info, infof;
    debug, debugf;
}

/// 使用默认 logger 记录后退出进程
pub fn fatal(args: impl Into<Args>) -> ! {
    get_default().fatal(args)
}

/// 使用默认 logger 记录后退出进程（printf 形式）
pub fn fatalf(template: &str, args: impl Into<Args>) -> ! {
    get_default().fatalf(template, args)
}
