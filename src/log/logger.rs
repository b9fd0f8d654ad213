use crate::cfg::TypeOptions;
use crate::log::error::{HandlerFailure, LogError};
use crate::log::handler::{create_handler_from_options, LogHandler};
use crate::log::level::LogLevel;
use crate::log::record::{render_args, LogRecord};
use crate::log::sequence::{global_sequence, SequenceCounter};
use crate::log::value::Args;
use anyhow::{anyhow, Result};
use serde::Deserialize;
use smart_default::SmartDefault;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

/// Logger 创建配置（用于创建新的 Logger 实例）
#[derive(Debug, Clone, Deserialize, SmartDefault, PartialEq)]
#[serde(default)]
pub struct LoggerCreateConfig {
    /// Logger 名称，未指定时由 LoggerManager 使用配置键名，单独创建时为 `default`
    pub name: Option<String>,

    /// Logger 级别（仅作标记，过滤由各处理器的阈值决定）
    #[default(LogLevel::Info)]
    pub level: LogLevel,

    /// 处理器配置，按顺序入栈
    #[default(vec![TypeOptions::of("ConsoleHandler")])]
    pub handlers: Vec<TypeOptions>,
}

/// Logger 配置
///
/// 支持两种模式：
/// - Reference: 引用已存在的 logger 实例（通过 $instance 字段）
/// - Create: 创建新的 logger 实例
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum LoggerConfig {
    /// 引用一个已存在的 logger 实例
    Reference {
        /// 引用的 logger 实例名称
        #[serde(rename = "$instance")]
        instance: String,
    },

    /// 创建新的 logger 实例
    Create(LoggerCreateConfig),
}

impl Default for LoggerConfig {
    fn default() -> Self {
        LoggerConfig::Create(LoggerCreateConfig::default())
    }
}

// 写时复制：分发时只克隆外层 Arc，入栈出栈不会影响正在进行的分发
#[derive(Default, Clone)]
struct HandlerStack {
    handlers: Arc<Vec<Arc<dyn LogHandler>>>,
}

impl HandlerStack {
    fn insert_back(&mut self, handler: Arc<dyn LogHandler>) {
        Arc::make_mut(&mut self.handlers).push(handler);
    }

    fn remove_back(&mut self) -> Option<Arc<dyn LogHandler>> {
        Arc::make_mut(&mut self.handlers).pop()
    }

    fn replace(&mut self, handlers: Vec<Arc<dyn LogHandler>>) {
        self.handlers = Arc::new(handlers);
    }

    fn snapshot(&self) -> Arc<Vec<Arc<dyn LogHandler>>> {
        Arc::clone(&self.handlers)
    }

    fn len(&self) -> usize {
        self.handlers.len()
    }
}

/// 核心日志器
///
/// 持有名称和一个有序的处理器栈。每次日志调用构造一条 [`LogRecord`]，
/// 按栈的顺序（先入栈的先调用）交给阈值满足 `handler.level() >= record.level()`
/// 的处理器。处理器带格式化器时，先格式化再调用 `handle`。
///
/// 分发在调用线程上同步完成。`close` 之后 Logger 不再接收日志。
pub struct Logger {
    name: Arc<str>,
    level: RwLock<LogLevel>,
    handlers: RwLock<HandlerStack>,
    closed: AtomicBool,
    sequence: Arc<SequenceCounter>,
}

macro_rules! level_methods {
    ($($level:ident => $plain:ident, $printf:ident;)*) => {
        $(
            #[doc = concat!("记录 `", stringify!($level), "` 级别日志，参数以空格拼接")]
            pub fn $plain(&self, args: impl Into<Args>) -> Result<(), LogError> {
                self.log(LogLevel::$level, None, args)
            }

            #[doc = concat!("记录 `", stringify!($level), "` 级别日志，参数按 printf 模板替换")]
            pub fn $printf(&self, template: &str, args: impl Into<Args>) -> Result<(), LogError> {
                self.log(LogLevel::$level, Some(template), args)
            }
        )*
    };
}

impl Logger {
    /// 创建没有处理器的 Logger，记录序号取自进程级分配器
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self::with_sequence(name, global_sequence())
    }

    /// 使用指定的序号分配器
    pub fn with_sequence(name: impl Into<Arc<str>>, sequence: Arc<SequenceCounter>) -> Self {
        Self {
            name: name.into(),
            level: RwLock::new(LogLevel::Info),
            handlers: RwLock::new(HandlerStack::default()),
            closed: AtomicBool::new(false),
            sequence,
        }
    }

    /// 从创建配置创建 Logger，处理器按配置顺序入栈
    pub fn from_config(config: LoggerCreateConfig) -> Result<Self> {
        let name = config.name.unwrap_or_else(|| "default".to_string());
        let logger = Logger::new(name);
        logger.set_level(config.level);

        for options in &config.handlers {
            let handler = create_handler_from_options(options).map_err(|e| {
                anyhow!(
                    "logger [{}]: failed to create handler '{}': {:#}",
                    logger.name,
                    options.type_name,
                    e
                )
            })?;
            logger.push_handler(Arc::from(handler));
        }

        ::log::debug!(
            "logger [{}] created with {} handler(s)",
            logger.name,
            logger.len()
        );
        Ok(logger)
    }

    /// 从配置解析 Logger
    ///
    /// 如果配置是 Reference 模式，从全局管理器获取已存在的 logger
    /// 如果配置是 Create 模式，创建新的 logger
    pub fn resolve(config: LoggerConfig) -> Result<Arc<Self>> {
        match config {
            LoggerConfig::Reference { instance } => crate::log::get(&instance).ok_or_else(|| {
                anyhow!("Logger instance '{}' not found in global manager", instance)
            }),
            LoggerConfig::Create(create_config) => Ok(Arc::new(Logger::from_config(create_config)?)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> LogLevel {
        *self.level.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_level(&self, level: LogLevel) {
        *self.level.write().unwrap_or_else(PoisonError::into_inner) = level;
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// 处理器入栈（放到栈顶，最后被调用）
    pub fn push_handler(&self, handler: Arc<dyn LogHandler>) {
        self.handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert_back(handler);
    }

    /// 弹出栈顶（最近一次入栈）的处理器
    ///
    /// # Panics
    ///
    /// 栈为空时 panic。
    pub fn pop_handler(&self) -> Arc<dyn LogHandler> {
        let popped = self
            .handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove_back();
        match popped {
            Some(handler) => handler,
            None => panic!("pop_handler called on an empty handler stack"),
        }
    }

    /// 整体替换处理器栈，`handlers[0]` 最先被调用
    pub fn set_handlers(&self, handlers: Vec<Arc<dyn LogHandler>>) {
        self.handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(handlers);
    }

    /// 当前处理器栈的快照，顺序即调用顺序
    pub fn handlers(&self) -> Vec<Arc<dyn LogHandler>> {
        self.snapshot().as_ref().clone()
    }

    /// 处理器数量
    pub fn len(&self) -> usize {
        self.handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn snapshot(&self) -> Arc<Vec<Arc<dyn LogHandler>>> {
        self.handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .snapshot()
    }

    /// 关闭 Logger 和其全部处理器
    ///
    /// 只有第一次调用生效。某个处理器关闭失败不影响后续处理器关闭，
    /// 失败汇总在 [`LogError::Close`] 中返回。
    pub fn close(&self) -> Result<(), LogError> {
        if self.closed.swap(true, Ordering::AcqRel) {
            return Ok(());
        }

        let failures: Vec<HandlerFailure> = self
            .snapshot()
            .iter()
            .enumerate()
            .filter_map(|(position, handler)| {
                handler
                    .close()
                    .err()
                    .map(|error| HandlerFailure { position, error })
            })
            .collect();

        if failures.is_empty() {
            return Ok(());
        }

        for failure in &failures {
            ::log::warn!("logger [{}] close: {}", self.name, failure);
        }
        Err(LogError::Close {
            logger: self.name.to_string(),
            failures,
        })
    }

    /// 按级别记录一条日志
    ///
    /// `template` 为 `None` 时参数以空格拼接，否则做 printf 替换。
    /// 已关闭时返回 [`LogError::Closed`]，不分配序号。
    pub fn log(
        &self,
        level: LogLevel,
        template: Option<&str>,
        args: impl Into<Args>,
    ) -> Result<(), LogError> {
        if self.is_closed() {
            return Err(LogError::Closed);
        }
        self.dispatch(self.new_record(level, template, args.into()))
    }

    fn new_record(&self, level: LogLevel, template: Option<&str>, args: Args) -> LogRecord {
        LogRecord::new(
            self.sequence.allocate_next_id(),
            Arc::clone(&self.name),
            level,
            args,
            template.map(str::to_string),
        )
    }

    fn dispatch(&self, mut record: LogRecord) -> Result<(), LogError> {
        let handlers = self.snapshot();
        let mut failures = Vec::new();

        for (position, handler) in handlers.iter().enumerate() {
            if !handler.level().accepts(record.level()) {
                continue;
            }

            // 格式化文本只对当前处理器可见
            let formatted = match handler.formatter().map(|f| f.format(&record)).transpose() {
                Ok(formatted) => formatted,
                Err(error) => {
                    failures.push(HandlerFailure { position, error });
                    continue;
                }
            };
            record.set_formatted(formatted);

            if let Err(error) = handler.handle(&record) {
                failures.push(HandlerFailure { position, error });
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(LogError::Dispatch {
                logger: self.name.to_string(),
                record_id: record.id(),
                failures,
            })
        }
    }

    level_methods! {
        Critical => critical, criticalf;
        Error => error, errorf;
        Warning => warning, warningf;
        Notice => notice, noticef;
        Info => info, infof;
        Debug => debug, debugf;
    }

    /// 以 CRITICAL 级别记录后以状态码 1 退出进程
    ///
    /// 记录失败不影响退出，失败原因通过 `log` 门面输出。
    pub fn fatal(&self, args: impl Into<Args>) -> ! {
        self.log_then_exit(None, args.into())
    }

    /// 同 [`fatal`](Self::fatal)，参数按 printf 模板替换
    pub fn fatalf(&self, template: &str, args: impl Into<Args>) -> ! {
        self.log_then_exit(Some(template), args.into())
    }

    fn log_then_exit(&self, template: Option<&str>, args: Args) -> ! {
        if let Err(e) = self.log(LogLevel::Critical, template, args) {
            ::log::warn!("fatal log on '{}' not delivered: {}", self.name, e);
        }
        std::process::exit(1)
    }

    /// 以 CRITICAL 级别记录后 panic，panic 负载为渲染后的消息（`String`）
    pub fn panic(&self, args: impl Into<Args>) -> ! {
        self.log_then_panic(None, args.into())
    }

    /// 同 [`panic`](Self::panic)，参数按 printf 模板替换
    pub fn panicf(&self, template: &str, args: impl Into<Args>) -> ! {
        self.log_then_panic(Some(template), args.into())
    }

    // 已关闭时只渲染消息，不分配序号也不分发
    fn log_then_panic(&self, template: Option<&str>, args: Args) -> ! {
        if self.is_closed() {
            std::panic::panic_any(render_args(template, &args))
        }
        let record = self.new_record(LogLevel::Critical, template, args);
        let message = record.render().to_string();
        if let Err(e) = self.dispatch(record) {
            ::log::warn!("panic log on '{}' not delivered: {}", self.name, e);
        }
        std::panic::panic_any(message)
    }
}

impl TryFrom<LoggerCreateConfig> for Logger {
    type Error = anyhow::Error;

    fn try_from(config: LoggerCreateConfig) -> Result<Self> {
        Logger::from_config(config)
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("level", &self.level())
            .field("handlers", &self.len())
            .field("closed", &self.is_closed())
            .finish()
    }
}
