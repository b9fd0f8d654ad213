use anyhow::Result;
use once_cell::sync::OnceCell;

use crate::cfg::{create_trait_from_type_options, register_trait, TypeOptions};
use crate::log::formatter::text_formatter::{TextFormatter, TextFormatterConfig};
use crate::log::formatter::LogFormatter;

static REGISTERED: OnceCell<()> = OnceCell::new();

/// 注册所有 Formatter 实现
pub fn register_formatters() -> Result<()> {
    register_trait::<TextFormatter, dyn LogFormatter, TextFormatterConfig>("TextFormatter")?;
    Ok(())
}

/// 从 TypeOptions 创建 Formatter
///
/// 首次调用时自动注册内置 Formatter。
pub fn create_formatter_from_options(options: &TypeOptions) -> Result<Box<dyn LogFormatter>> {
    REGISTERED.get_or_try_init(register_formatters)?;
    create_trait_from_type_options(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::level::LogLevel;
    use crate::log::record::LogRecord;

    #[test]
    fn test_register_formatters() -> Result<()> {
        register_formatters()?;
        assert!(crate::cfg::is_registered::<dyn LogFormatter>("TextFormatter"));
        Ok(())
    }

    #[test]
    fn test_create_text_formatter() -> Result<()> {
        let opts = TypeOptions::from_json(
            r#"
            {
                type: "TextFormatter",
                options: {
                    template: "[{level}] {name} {message}"
                }
            }
        "#,
        )?;

        let formatter = create_formatter_from_options(&opts)?;
        let record = LogRecord::new(1, "svc", LogLevel::Warning, "disk full", None);
        assert_eq!(formatter.format(&record)?, "[WARNING] svc disk full");

        Ok(())
    }

    #[test]
    fn test_create_text_formatter_without_options() -> Result<()> {
        let formatter = create_formatter_from_options(&TypeOptions::of("TextFormatter"))?;
        let record = LogRecord::new(1, "svc", LogLevel::Info, "ok", None);
        assert!(formatter.format(&record)?.ends_with(" svc INFO ok"));
        Ok(())
    }

    #[test]
    fn test_create_unknown_formatter() {
        let result = create_formatter_from_options(&TypeOptions::of("XmlFormatter"));
        assert!(result.is_err());
    }
}
