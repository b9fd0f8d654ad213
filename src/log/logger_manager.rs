use crate::log::logger::{Logger, LoggerConfig, LoggerCreateConfig};
use anyhow::{anyhow, Result};
use serde::Deserialize;
use smart_default::SmartDefault;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Logger Manager 配置
///
/// 用于统一管理多个 Logger 实例
#[derive(Debug, Clone, Deserialize, SmartDefault)]
#[serde(default)]
pub struct LoggerManagerConfig {
    /// 全局默认配置（如果未配置则使用默认值）
    pub default: LoggerConfig,

    /// 命名 logger 配置映射
    pub loggers: HashMap<String, LoggerConfig>,
}

/// Logger 管理器
///
/// 按名称维护多个 Logger 实例，并始终持有一个默认 Logger
pub struct LoggerManager {
    pub(crate) loggers: RwLock<HashMap<String, Arc<Logger>>>,
    default: RwLock<Arc<Logger>>,
}

impl LoggerManager {
    /// 从配置创建 LoggerManager
    ///
    /// 先创建所有 Create 模式的 logger，再解析 Reference 模式的引用。
    /// 引用先在本配置中查找，再到全局管理器中查找。
    pub fn new(config: LoggerManagerConfig) -> Result<Self> {
        let mut loggers_map = HashMap::new();
        let mut reference_configs: Vec<(String, String)> = Vec::new();

        for (key, logger_config) in config.loggers {
            match logger_config {
                LoggerConfig::Reference { instance } => reference_configs.push((key, instance)),
                LoggerConfig::Create(create_config) => {
                    let logger = Arc::new(Self::create_named(&key, create_config)?);
                    loggers_map.insert(key, logger);
                }
            }
        }

        for (key, instance) in reference_configs {
            let logger = Self::resolve_logger_config_by_name(&instance, &loggers_map)?;
            loggers_map.insert(key, logger);
        }

        let default_logger = match config.default {
            LoggerConfig::Reference { instance } => {
                Self::resolve_logger_config_by_name(&instance, &loggers_map)?
            }
            LoggerConfig::Create(create_config) => {
                Arc::new(Self::create_named("default", create_config)?)
            }
        };

        ::log::debug!(
            "logger manager created with {} named logger(s)",
            loggers_map.len()
        );

        Ok(Self {
            loggers: RwLock::new(loggers_map),
            default: RwLock::new(default_logger),
        })
    }

    /// 只有默认 logger 的管理器
    pub fn with_default(default: Arc<Logger>) -> Self {
        Self {
            loggers: RwLock::new(HashMap::new()),
            default: RwLock::new(default),
        }
    }

    // 未指定名称时使用配置键名
    fn create_named(key: &str, mut config: LoggerCreateConfig) -> Result<Logger> {
        config.name.get_or_insert_with(|| key.to_string());
        Logger::from_config(config)
    }

    /// 根据名称解析 Logger 实例
    ///
    /// 先从已创建的 loggers 中查找，再从全局管理器中查找
    fn resolve_logger_config_by_name(
        instance: &str,
        created_loggers: &HashMap<String, Arc<Logger>>,
    ) -> Result<Arc<Logger>> {
        if let Some(logger) = created_loggers.get(instance) {
            return Ok(Arc::clone(logger));
        }

        if let Some(logger) = crate::log::get(instance) {
            return Ok(logger);
        }

        Err(anyhow!(
            "Logger instance '{}' not found (neither in current config nor in global manager)",
            instance
        ))
    }

    /// 获取指定 key 的 logger
    ///
    /// 如果 key 不存在，返回 None
    pub fn get_logger(&self, key: &str) -> Option<Arc<Logger>> {
        let loggers = self.loggers.read().unwrap_or_else(PoisonError::into_inner);
        loggers.get(key).cloned()
    }

    /// 获取指定 key 的 logger，不存在时返回默认 logger
    pub fn get_or_default(&self, key: &str) -> Arc<Logger> {
        self.get_logger(key).unwrap_or_else(|| {
            ::log::debug!("logger '{}' not found, falling back to default", key);
            self.get_default()
        })
    }

    /// 获取默认 logger
    pub fn get_default(&self) -> Arc<Logger> {
        let default = self.default.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&default)
    }

    /// 设置默认 logger
    pub fn set_default(&self, logger: Arc<Logger>) {
        let mut default = self.default.write().unwrap_or_else(PoisonError::into_inner);
        *default = logger;
    }

    /// 动态添加 logger，同名时覆盖并返回旧实例
    pub fn add_logger(&self, key: impl Into<String>, logger: Arc<Logger>) -> Option<Arc<Logger>> {
        let mut loggers = self.loggers.write().unwrap_or_else(PoisonError::into_inner);
        loggers.insert(key.into(), logger)
    }

    /// 检查指定 key 的 logger 是否存在
    pub fn contains(&self, key: &str) -> bool {
        let loggers = self.loggers.read().unwrap_or_else(PoisonError::into_inner);
        loggers.contains_key(key)
    }

    /// 获取所有 logger 的 key 列表（已排序）
    pub fn keys(&self) -> Vec<String> {
        let loggers = self.loggers.read().unwrap_or_else(PoisonError::into_inner);
        let mut keys: Vec<String> = loggers.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// 移除指定 key 的 logger（不会关闭它）
    pub fn remove_logger(&self, key: &str) -> Option<Arc<Logger>> {
        let mut loggers = self.loggers.write().unwrap_or_else(PoisonError::into_inner);
        loggers.remove(key)
    }

    /// 关闭所有命名 logger 和默认 logger
    ///
    /// 每个 logger 都会被关闭，失败的 logger 名称汇总在返回的错误中。
    pub fn close_all(&self) -> Result<()> {
        let mut targets: Vec<Arc<Logger>> = {
            let loggers = self.loggers.read().unwrap_or_else(PoisonError::into_inner);
            loggers.values().cloned().collect()
        };
        targets.push(self.get_default());

        let failed: Vec<String> = targets
            .iter()
            .filter_map(|logger| logger.close().err().map(|e| e.to_string()))
            .collect();

        if failed.is_empty() {
            Ok(())
        } else {
            Err(anyhow!("failed to close loggers: {}", failed.join("; ")))
        }
    }
}
