use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::str::FromStr;

/// 日志级别
///
/// 按紧急程度排序，数值越小越紧急：
/// `Critical < Error < Warning < Notice < Info < Debug`。
/// 处理器的阈值语义是 `handler.level() >= record.level()` 时接收，
/// 所以阈值为 `Debug` 的处理器接收全部日志。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, SerializeDisplay, DeserializeFromStr,
)]
#[repr(u8)]
pub enum LogLevel {
    /// 最严重，Fatal/Panic 也记录在这一级
    Critical = 0,
    Error = 1,
    Warning = 2,
    Notice = 3,
    Info = 4,
    /// 最详细
    Debug = 5,
}

const LEVEL_NAMES: [&str; 6] = ["CRITICAL", "ERROR", "WARNING", "NOTICE", "INFO", "DEBUG"];

impl LogLevel {
    /// 全部级别，从最严重到最详细
    pub const ALL: [LogLevel; 6] = [
        LogLevel::Critical,
        LogLevel::Error,
        LogLevel::Warning,
        LogLevel::Notice,
        LogLevel::Info,
        LogLevel::Debug,
    ];

    /// 级别的规范名称（大写）
    pub fn name(self) -> &'static str {
        LEVEL_NAMES[self as usize]
    }

    /// 按数值查名称，超出范围时返回 `"UNKNOWN"`
    pub fn name_of(rank: u8) -> &'static str {
        LEVEL_NAMES.get(rank as usize).copied().unwrap_or("UNKNOWN")
    }

    pub fn rank(self) -> u8 {
        self as u8
    }

    /// 以 `self` 为阈值时是否接收 `level` 级别的日志
    pub fn accepts(self, level: LogLevel) -> bool {
        self >= level
    }
}

impl TryFrom<u8> for LogLevel {
    type Error = String;

    fn try_from(rank: u8) -> Result<Self, String> {
        LogLevel::ALL
            .get(rank as usize)
            .copied()
            .ok_or_else(|| format!("invalid log level rank: {}", rank))
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "critical" => Ok(LogLevel::Critical),
            "error" => Ok(LogLevel::Error),
            "warning" | "warn" => Ok(LogLevel::Warning),
            "notice" => Ok(LogLevel::Notice),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            _ => Err(format!("invalid log level: {}", s)),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}
