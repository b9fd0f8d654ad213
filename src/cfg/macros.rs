//! 组件构造相关的宏
//!
//! 注册表通过 `TryFrom<Config>` 构造组件，再通过 `Box<T>: Into<Box<dyn Trait>>`
//! 转成 trait object。这里的宏负责生成这些样板实现。

/// 为配置类型实现 `From<Config>`
///
/// - `impl_from!(Config => Type)`：调用 `Type::new(config)`
/// - `impl_from!(Config => Type, |config| expr)`：用给定表达式构造
#[macro_export]
macro_rules! impl_from {
    ($config_type:ty => $target_type:ty) => {
        impl From<$config_type> for $target_type {
            fn from(config: $config_type) -> Self {
                <$target_type>::new(config)
            }
        }
    };

    ($config_type:ty => $target_type:ty, |$config:ident| $body:expr) => {
        impl From<$config_type> for $target_type {
            fn from($config: $config_type) -> Self {
                $body
            }
        }
    };
}

/// 为构造可能失败的类型实现 `TryFrom<Config>`
///
/// `impl_try_from!(Config => Type)` 调用 `Type::new(config)`，
/// 其返回值必须是 `anyhow::Result<Type>`。
#[macro_export]
macro_rules! impl_try_from {
    ($config_type:ty => $target_type:ty) => {
        impl TryFrom<$config_type> for $target_type {
            type Error = anyhow::Error;

            fn try_from(config: $config_type) -> anyhow::Result<Self> {
                <$target_type>::new(config)
            }
        }
    };
}

/// 实现 `Box<Type>` 到 `Box<dyn Trait>` 的转换
#[macro_export]
macro_rules! impl_box_from {
    ($source_type:ty => dyn $trait_name:path) => {
        impl From<Box<$source_type>> for Box<dyn $trait_name> {
            fn from(source: Box<$source_type>) -> Self {
                source as Box<dyn $trait_name>
            }
        }
    };
}
