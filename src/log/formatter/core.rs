use crate::log::record::LogRecord;
use anyhow::Result;

/// 日志格式化器 trait
///
/// 把 LogRecord 渲染成处理器要输出的文本，只读取记录字段，不修改记录。
pub trait LogFormatter: Send + Sync {
    fn format(&self, record: &LogRecord) -> Result<String>;
}
