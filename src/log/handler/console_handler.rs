use crate::cfg::TypeOptions;
use crate::log::formatter::{create_formatter_from_options, LogFormatter};
use crate::log::handler::LogHandler;
use crate::log::level::LogLevel;
use crate::log::record::LogRecord;
use anyhow::Result;
use colored::{ColoredString, Colorize};
use serde::Deserialize;
use smart_default::SmartDefault;
use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

/// 输出目标
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    #[default]
    Stdout,
    Stderr,
}

/// ConsoleHandler 配置
#[derive(Debug, Clone, Deserialize, SmartDefault)]
#[serde(default)]
pub struct ConsoleHandlerConfig {
    /// 阈值，默认 INFO
    #[default(LogLevel::Info)]
    pub level: LogLevel,

    /// 关闭级别标签的颜色
    pub disable_color: bool,

    pub target: Target,

    /// 可选的格式化器，未配置时直接输出原始消息
    pub formatter: Option<TypeOptions>,
}

/// 终端处理器
///
/// 每条记录输出一行 `[LEVEL] message`，级别名按严重程度着色：
///
/// | 级别 | 颜色 |
/// | --- | --- |
/// | DEBUG / INFO / NOTICE | 蓝底白字 |
/// | WARNING | 黄底黑字 |
/// | ERROR / CRITICAL | 红底白字 |
///
/// Windows 上不着色。颜色输出同时受 `colored` 的全局开关约束（如 `NO_COLOR`）。
pub struct ConsoleHandler {
    level: LogLevel,
    colored: bool,
    formatter: Option<Box<dyn LogFormatter>>,
    writer: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleHandler {
    pub fn new(config: ConsoleHandlerConfig) -> Result<Self> {
        let writer: Box<dyn Write + Send> = match config.target {
            Target::Stdout => Box::new(io::stdout()),
            Target::Stderr => Box::new(io::stderr()),
        };
        Self::with_writer(config, writer)
    }

    /// 输出到任意 writer，`target` 配置被忽略
    pub fn with_writer(
        config: ConsoleHandlerConfig,
        writer: impl Write + Send + 'static,
    ) -> Result<Self> {
        let formatter = config
            .formatter
            .as_ref()
            .map(create_formatter_from_options)
            .transpose()?;

        Ok(Self {
            level: config.level,
            colored: !cfg!(windows) && !config.disable_color,
            formatter,
            writer: Mutex::new(Box::new(writer)),
        })
    }

    /// 输出到标准输出、不带格式化器的处理器
    pub fn stdout(level: LogLevel) -> Self {
        Self {
            level,
            colored: !cfg!(windows),
            formatter: None,
            writer: Mutex::new(Box::new(io::stdout())),
        }
    }

    pub fn is_colored(&self) -> bool {
        self.colored
    }

    // 只给级别名着色，方括号保持原样
    fn tag(&self, level: LogLevel) -> String {
        if self.colored {
            format!("[{}]", colorize(level.name(), level))
        } else {
            format!("[{}]", level)
        }
    }
}

fn colorize(name: &str, level: LogLevel) -> ColoredString {
    match level {
        LogLevel::Debug | LogLevel::Info | LogLevel::Notice => name.bright_white().on_blue(),
        LogLevel::Warning => name.bright_black().on_yellow(),
        LogLevel::Error | LogLevel::Critical => name.bright_white().on_red(),
    }
}

impl LogHandler for ConsoleHandler {
    fn level(&self) -> LogLevel {
        self.level
    }

    fn handle(&self, record: &LogRecord) -> Result<()> {
        let line = format!("{} {}\n", self.tag(record.level()), record.message());

        // 某个线程写入时 panic 不应让处理器永久不可用
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writer.write_all(line.as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    fn close(&self) -> Result<()> {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writer.flush()?;
        Ok(())
    }

    fn formatter(&self) -> Option<&dyn LogFormatter> {
        self.formatter.as_deref()
    }
}

crate::impl_try_from!(ConsoleHandlerConfig => ConsoleHandler);
crate::impl_box_from!(ConsoleHandler => dyn LogHandler);

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn plain_config(level: LogLevel) -> ConsoleHandlerConfig {
        ConsoleHandlerConfig {
            level,
            disable_color: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_console_handler_config_default() {
        let config = ConsoleHandlerConfig::default();
        assert_eq!(config.level, LogLevel::Info);
        assert!(!config.disable_color);
        assert_eq!(config.target, Target::Stdout);
        assert!(config.formatter.is_none());
    }

    #[test]
    fn test_console_handler_config_from_json5() {
        let config: ConsoleHandlerConfig = json5::from_str(
            r#"{ level: "debug", disable_color: true, target: "stderr" }"#,
        )
        .unwrap();
        assert_eq!(config.level, LogLevel::Debug);
        assert!(config.disable_color);
        assert_eq!(config.target, Target::Stderr);
    }

    #[test]
    fn test_console_handler_plain_line() -> Result<()> {
        let buffer = SharedBuffer::default();
        let handler = ConsoleHandler::with_writer(plain_config(LogLevel::Debug), buffer.clone())?;
        assert!(!handler.is_colored());

        let record = LogRecord::new(1, "svc", LogLevel::Error, "boom now", None);
        handler.handle(&record)?;

        assert_eq!(buffer.contents(), "[ERROR] boom now\n");
        Ok(())
    }

    #[test]
    #[serial]
    fn test_console_handler_colored_tags() -> Result<()> {
        colored::control::set_override(true);

        let buffer = SharedBuffer::default();
        let config = ConsoleHandlerConfig {
            level: LogLevel::Debug,
            ..Default::default()
        };
        let handler = ConsoleHandler::with_writer(config, buffer.clone())?;

        handler.handle(&LogRecord::new(1, "svc", LogLevel::Warning, "disk", None))?;
        handler.handle(&LogRecord::new(2, "svc", LogLevel::Critical, "down", None))?;
        handler.handle(&LogRecord::new(3, "svc", LogLevel::Notice, "up", None))?;

        let expected = format!(
            "[{}] disk\n[{}] down\n[{}] up\n",
            "WARNING".bright_black().on_yellow(),
            "CRITICAL".bright_white().on_red(),
            "NOTICE".bright_white().on_blue(),
        );
        colored::control::unset_override();

        if cfg!(windows) {
            assert_eq!(buffer.contents(), "[WARNING] disk\n[CRITICAL] down\n[NOTICE] up\n");
        } else {
            assert_eq!(buffer.contents(), expected);
            assert!(buffer.contents().starts_with("[\x1b["));
        }
        Ok(())
    }

    #[test]
    fn test_console_handler_with_formatter() -> Result<()> {
        let buffer = SharedBuffer::default();
        let config: ConsoleHandlerConfig = json5::from_str(
            r#"{
                level: "info",
                disable_color: true,
                formatter: {
                    type: "TextFormatter",
                    options: { template: "{name}#{id}: {message}" }
                }
            }"#,
        )?;
        let handler = ConsoleHandler::with_writer(config, buffer.clone())?;
        let formatter = handler.formatter().expect("formatter configured");

        // Logger 负责把格式化结果挂到记录上，这里手动模拟
        let mut record = LogRecord::new(9, "db", LogLevel::Info, "ready", None);
        let text = formatter.format(&record)?;
        record.set_formatted(Some(text));
        handler.handle(&record)?;

        assert_eq!(buffer.contents(), "[INFO] db#9: ready\n");
        Ok(())
    }

    #[test]
    fn test_console_handler_unknown_formatter_fails() {
        let config = ConsoleHandlerConfig {
            formatter: Some(TypeOptions::of("NoSuchFormatter")),
            ..Default::default()
        };
        assert!(ConsoleHandler::new(config).is_err());
    }

    #[test]
    fn test_console_handler_stdout() -> Result<()> {
        let handler = ConsoleHandler::stdout(LogLevel::Warning);
        assert_eq!(handler.level(), LogLevel::Warning);
        assert!(handler.formatter().is_none());
        handler.close()?;
        Ok(())
    }

    #[test]
    fn test_console_handler_try_from_config() -> Result<()> {
        let handler = ConsoleHandler::try_from(plain_config(LogLevel::Notice))?;
        assert_eq!(handler.level(), LogLevel::Notice);
        Ok(())
    }
}
