//! cfg 模块 - 组件配置
//!
//! 日志处理器、格式化器等组件都用 `TypeOptions` 描述，
//! 由注册表按类型名构造成对应的 trait object。

#[macro_use]
mod macros;
pub mod registry;
pub mod type_options;

pub use registry::{create_trait_from_type_options, is_registered, register_trait};
pub use type_options::TypeOptions;
