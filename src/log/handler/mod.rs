mod console_handler;
mod core;
mod registry;

pub use self::core::LogHandler;
pub use console_handler::{ConsoleHandler, ConsoleHandlerConfig, Target};
pub use registry::{create_handler_from_options, register_handlers};
