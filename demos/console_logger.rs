//! 控制台日志示例
//!
//! ```sh
//! cargo run --example console_logger
//! ```

use anyhow::Result;
use stacklog::log::{self, ConsoleHandler, ConsoleHandlerConfig, LogBridge, LogLevel, Logger, LoggerManagerConfig};
use stacklog::{args, infof, warning};
use std::sync::Arc;

fn main() -> Result<()> {
    // 手动组装：两个处理器，一个全量带格式化，一个只看 WARNING 以上
    let logger = Arc::new(Logger::new("demo"));
    logger.push_handler(Arc::new(ConsoleHandler::new(json5::from_str::<ConsoleHandlerConfig>(
        r#"{
            level: "debug",
            formatter: { type: "TextFormatter", options: { template: "{time} #{id} {name} {message}", time_format: "%H:%M:%S%.3f" } }
        }"#,
    )?)?));
    logger.push_handler(Arc::new(ConsoleHandler::stdout(LogLevel::Warning)));

    logger.debug("starting up")?;
    logger.infof("listening on %s:%d", args!["0.0.0.0", 8080])?;
    warning!(logger, "disk usage", 91, "percent")?;
    logger.errorf("%-6s|%6.2f|%x", args!["cpu", 97.5, 255])?;

    // 第三方库通过 log 门面输出到同一个 logger
    LogBridge::init(Arc::clone(&logger), ::log::LevelFilter::Info)?;
    ::log::info!("forwarded through the log facade");

    // 配置驱动：全局默认 logger
    log::init(json5::from_str::<LoggerManagerConfig>(
        r#"{
            default: {
                name: "app",
                handlers: [{ type: "ConsoleHandler", options: { level: "notice", disable_color: true } }]
            }
        }"#,
    )?)?;
    log::notice("global default logger ready")?;
    infof!(log::get_default(), "filtered: %d", 1)?;

    logger.close()?;
    log::get_default().close()?;
    Ok(())
}
