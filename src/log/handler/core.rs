use crate::log::formatter::LogFormatter;
use crate::log::level::LogLevel;
use crate::log::record::LogRecord;
use anyhow::Result;

/// 日志处理器 trait
///
/// Logger 按处理器栈的顺序依次调用各处理器。
/// 只有 `level() >= record.level()` 的处理器会收到记录。
pub trait LogHandler: Send + Sync {
    /// 处理器阈值
    fn level(&self) -> LogLevel;

    /// 处理一条日志记录
    ///
    /// 记录以借用方式传入，需要保留时自行拷贝。
    fn handle(&self, record: &LogRecord) -> Result<()>;

    /// 释放处理器持有的资源（默认实现为空操作）
    fn close(&self) -> Result<()> {
        Ok(())
    }

    /// 处理器自带的格式化器
    ///
    /// 返回 `Some` 时，Logger 在调用 `handle` 前先用它格式化记录，
    /// 处理器通过 [`LogRecord::message`] 读取格式化结果。
    fn formatter(&self) -> Option<&dyn LogFormatter> {
        None
    }
}
