//! 日志宏模块
//!
//! 每个级别提供两个宏：`info!` 以空格拼接参数，`infof!` 按 printf 模板替换。
//! 参数可以是任意实现了 `Into<Value>` 的表达式。
//!
//! # 示例
//!
//! ```ignore
//! use stacklog::{info, errorf};
//!
//! let logger = stacklog::log::get_default();
//! info!(logger, "listening on", 8080)?;
//! errorf!(logger, "query %s failed after %dms", "users", 1500)?;
//! ```

/// 构造 [`Args`](crate::log::Args)
///
/// ```ignore
/// let args = args!["user", 42, true];
/// ```
#[macro_export]
macro_rules! args {
    () => {
        $crate::log::Args::new()
    };
    ($($arg:expr),+ $(,)?) => {
        $crate::log::Args::from(vec![$($crate::log::Value::from($arg)),+])
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __log_at {
    ($logger:expr, $level:ident, $template:expr $(, $arg:expr)*) => {
        $logger.log($crate::log::LogLevel::$level, $template, $crate::args![$($arg),*])
    };
}

/// 记录 CRITICAL 级别日志
#[macro_export]
macro_rules! critical {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $crate::__log_at!($logger, Critical, None $(, $arg)*)
    };
}

/// 记录 CRITICAL 级别日志（printf 模板）
#[macro_export]
macro_rules! criticalf {
    ($logger:expr, $template:expr $(, $arg:expr)* $(,)?) => {
        $crate::__log_at!($logger, Critical, Some($template) $(, $arg)*)
    };
}

/// 记录 ERROR 级别日志
///
/// ```ignore
/// error!(logger, "database connection failed")?;
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $crate::__log_at!($logger, Error, None $(, $arg)*)
    };
}

/// 记录 ERROR 级别日志（printf 模板）
#[macro_export]
macro_rules! errorf {
    ($logger:expr, $template:expr $(, $arg:expr)* $(,)?) => {
        $crate::__log_at!($logger, Error, Some($template) $(, $arg)*)
    };
}

/// 记录 WARNING 级别日志
#[macro_export]
macro_rules! warning {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $crate::__log_at!($logger, Warning, None $(, $arg)*)
    };
}

/// 记录 WARNING 级别日志（printf 模板）
///
/// ```ignore
/// warningf!(logger, "slow query: %dms > %dms", 1500, 1000)?;
/// ```
#[macro_export]
macro_rules! warningf {
    ($logger:expr, $template:expr $(, $arg:expr)* $(,)?) => {
        $crate::__log_at!($logger, Warning, Some($template) $(, $arg)*)
    };
}

/// 记录 NOTICE 级别日志
#[macro_export]
macro_rules! notice {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $crate::__log_at!($logger, Notice, None $(, $arg)*)
    };
}

/// 记录 NOTICE 级别日志（printf 模板）
#[macro_export]
macro_rules! noticef {
    ($logger:expr, $template:expr $(, $arg:expr)* $(,)?) => {
        $crate::__log_at!($logger, Notice, Some($template) $(, $arg)*)
    };
}

/// 记录 INFO 级别日志
///
/// ```ignore
/// info!(logger, "user logged in", user_id)?;
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $crate::__log_at!($logger, Info, None $(, $arg)*)
    };
}

/// 记录 INFO 级别日志（printf 模板）
#[macro_export]
macro_rules! infof {
    ($logger:expr, $template:expr $(, $arg:expr)* $(,)?) => {
        $crate::__log_at!($logger, Info, Some($template) $(, $arg)*)
    };
}

/// 记录 DEBUG 级别日志
#[macro_export]
macro_rules! debug {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $crate::__log_at!($logger, Debug, None $(, $arg)*)
    };
}

/// 记录 DEBUG 级别日志（printf 模板）
#[macro_export]
macro_rules! debugf {
    ($logger:expr, $template:expr $(, $arg:expr)* $(,)?) => {
        $crate::__log_at!($logger, Debug, Some($template) $(, $arg)*)
    };
}

#[cfg(test)]
mod tests {
    use crate::log::{Args, LogHandler, LogLevel, LogRecord, Logger, Value};
    use anyhow::Result;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct Lines(Mutex<Vec<String>>);

    impl LogHandler for Lines {
        fn level(&self) -> LogLevel {
            LogLevel::Debug
        }

        fn handle(&self, record: &LogRecord) -> Result<()> {
            self.0
                .lock()
                .unwrap()
                .push(format!("{} {}", record.level(), record.message()));
            Ok(())
        }
    }

    #[test]
    fn test_args_macro() {
        let empty: Args = args![];
        assert!(empty.is_empty());

        let args = args!["user", 42, true, 1.5];
        assert_eq!(
            args.to_vec(),
            vec![
                Value::from("user"),
                Value::from(42),
                Value::from(true),
                Value::from(1.5)
            ]
        );
    }

    #[test]
    fn test_level_macros() -> Result<()> {
        let lines = Arc::new(Lines::default());
        let logger = Arc::new(Logger::new("macros"));
        logger.push_handler(lines.clone());

        critical!(logger, "a")?;
        errorf!(logger, "%s-%d", "b", 2)?;
        warning!(logger, "c", 3)?;
        noticef!(logger, "%v", 'd')?;
        info!(logger)?;
        infof!(logger, "no args")?;
        debug!(logger, "e", false,)?;
        criticalf!(logger, "%x", 255u8)?;
        warningf!(logger, "%.2f", 0.5)?;
        notice!(&*logger, "f")?;
        debugf!(logger, "%q", "g")?;

        assert_eq!(
            *lines.0.lock().unwrap(),
            vec![
                "CRITICAL a",
                "ERROR b-2",
                "WARNING c 3",
                "NOTICE d",
                "INFO ",
                "INFO no args",
                "DEBUG e false",
                "CRITICAL ff",
                "WARNING 0.50",
                "NOTICE f",
                "DEBUG \"g\"",
            ]
        );
        Ok(())
    }
}
