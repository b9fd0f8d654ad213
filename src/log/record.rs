use chrono::{DateTime, Local};
use once_cell::sync::OnceCell;
use std::sync::Arc;

use crate::log::level::LogLevel;
use crate::log::printf;
use crate::log::value::{Args, Value};

/// 日志记录
///
/// 每次日志调用在 Logger 内部构造一条，分发给处理器时以 `&LogRecord` 借出，
/// 处理器需要保留内容时必须自行拷贝。
///
/// 原始消息（[`render`](Self::render)）首次访问时计算并缓存，之后不再变化。
/// 带格式化器的处理器收到的记录上会附加该处理器专属的格式化文本，
/// 通过 [`message`](Self::message) 读取。
#[derive(Debug, Clone)]
pub struct LogRecord {
    id: u64,
    time: DateTime<Local>,
    thread_id: String,
    name: Arc<str>,
    level: LogLevel,
    args: Args,
    template: Option<String>,
    rendered: OnceCell<String>,
    formatted: Option<String>,
}

impl LogRecord {
    /// 创建日志记录，时间戳取构造时刻
    pub fn new(
        id: u64,
        name: impl Into<Arc<str>>,
        level: LogLevel,
        args: impl Into<Args>,
        template: Option<String>,
    ) -> Self {
        Self {
            id,
            time: Local::now(),
            thread_id: format!("{:?}", std::thread::current().id()),
            name: name.into(),
            level,
            args: args.into(),
            template,
            rendered: OnceCell::new(),
            formatted: None,
        }
    }

    /// 覆盖时间戳（用于回放或测试固定时间）
    pub fn with_time(mut self, time: DateTime<Local>) -> Self {
        self.time = time;
        self
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn time(&self) -> &DateTime<Local> {
        &self.time
    }

    pub fn thread_id(&self) -> &str {
        &self.thread_id
    }

    /// 产生这条记录的 Logger 名称
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn level_name(&self) -> &'static str {
        self.level.name()
    }

    pub fn args(&self) -> &[Value] {
        &self.args
    }

    pub fn template(&self) -> Option<&str> {
        self.template.as_deref()
    }

    /// 原始消息
    ///
    /// 有模板时做 printf 替换，否则以单个空格拼接参数。
    /// 结果只计算一次。
    pub fn render(&self) -> &str {
        self.rendered
            .get_or_init(|| render_args(self.template.as_deref(), &self.args))
    }

    /// 当前处理器看到的消息：有格式化文本时返回格式化文本，否则返回原始消息
    pub fn message(&self) -> &str {
        match &self.formatted {
            Some(text) => text,
            None => self.render(),
        }
    }

    /// 当前附加的格式化文本
    pub fn formatted(&self) -> Option<&str> {
        self.formatted.as_deref()
    }

    pub(crate) fn set_formatted(&mut self, formatted: Option<String>) {
        self.formatted = formatted;
    }
}

/// 按有无模板渲染参数
pub(crate) fn render_args(template: Option<&str>, args: &Args) -> String {
    match template {
        Some(template) => printf::sprintf(template, args),
        None => args.join(),
    }
}
