use anyhow::Result;
use once_cell::sync::OnceCell;

use crate::cfg::{create_trait_from_type_options, register_trait, TypeOptions};
use crate::log::handler::console_handler::{ConsoleHandler, ConsoleHandlerConfig};
use crate::log::handler::LogHandler;

static REGISTERED: OnceCell<()> = OnceCell::new();

/// 注册所有 Handler 实现
pub fn register_handlers() -> Result<()> {
    register_trait::<ConsoleHandler, dyn LogHandler, ConsoleHandlerConfig>("ConsoleHandler")?;
    Ok(())
}

/// 从 TypeOptions 创建 Handler
///
/// 首次调用时自动注册内置 Handler，自定义 Handler 需先通过
/// [`register_trait`] 注册到 `dyn LogHandler` 下。
pub fn create_handler_from_options(options: &TypeOptions) -> Result<Box<dyn LogHandler>> {
    REGISTERED.get_or_try_init(register_handlers)?;
    create_trait_from_type_options(options)
}
