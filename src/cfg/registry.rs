// 组件注册表：按 trait 分组，按类型名构造 trait object

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::RwLock;

use anyhow::{anyhow, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

use super::type_options::TypeOptions;

// 返回的 Box<dyn Any> 里装的是 Box<dyn Trait>
type Constructor = Box<dyn Fn(JsonValue) -> Result<Box<dyn Any + Send + Sync>> + Send + Sync>;

// 外层 key 是 trait 的 TypeId，内层 key 是类型名
static REGISTRY: Lazy<RwLock<HashMap<TypeId, HashMap<String, Constructor>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// 为 `Trait` 注册一个名为 `type_name` 的实现
///
/// 实现类型通过 `TryFrom<Config>` 构造，构造失败的错误原样返回给调用方。
/// 重复注册同名类型会覆盖之前的构造函数。
///
/// # 示例
/// ```ignore
/// register_trait::<ConsoleHandler, dyn LogHandler, ConsoleHandlerConfig>("ConsoleHandler")?;
/// let handler: Box<dyn LogHandler> = create_trait_from_type_options(&options)?;
/// ```
pub fn register_trait<T, Trait, Config>(type_name: &str) -> Result<()>
where
    T: Send + Sync + 'static,
    Trait: ?Sized + Send + Sync + 'static,
    Config: DeserializeOwned + Send + Sync + 'static,
    T: TryFrom<Config>,
    <T as TryFrom<Config>>::Error: Into<anyhow::Error>,
    Box<T>: Into<Box<Trait>>,
{
    let constructor: Constructor = Box::new(move |value| {
        let config: Config = serde_json::from_value(value)?;
        let instance = T::try_from(config).map_err(Into::into)?;
        let trait_object: Box<Trait> = Box::new(instance).into();
        Ok(Box::new(trait_object) as Box<dyn Any + Send + Sync>)
    });

    let mut registry = REGISTRY
        .write()
        .map_err(|_| anyhow!("Failed to acquire registry write lock"))?;
    registry
        .entry(TypeId::of::<Trait>())
        .or_default()
        .insert(type_name.to_string(), constructor);
    Ok(())
}

/// 检查 `Trait` 下是否注册了 `type_name`
pub fn is_registered<Trait>(type_name: &str) -> bool
where
    Trait: ?Sized + 'static,
{
    REGISTRY
        .read()
        .map(|registry| {
            registry
                .get(&TypeId::of::<Trait>())
                .map_or(false, |types| types.contains_key(type_name))
        })
        .unwrap_or(false)
}

/// 根据 TypeOptions 创建 `Trait` 的实现
pub fn create_trait_from_type_options<Trait>(type_options: &TypeOptions) -> Result<Box<Trait>>
where
    Trait: ?Sized + Send + Sync + 'static,
{
    let registry = REGISTRY
        .read()
        .map_err(|_| anyhow!("Failed to acquire registry read lock"))?;

    let constructor = registry
        .get(&TypeId::of::<Trait>())
        .and_then(|types| types.get(&type_options.type_name))
        .ok_or_else(|| {
            anyhow!(
                "Type '{}' not registered for this trait",
                type_options.type_name
            )
        })?;

    constructor(type_options.options.clone())?
        .downcast::<Box<Trait>>()
        .map(|boxed| *boxed)
        .map_err(|_| anyhow!("Failed to downcast '{}' to target trait", type_options.type_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    trait Sink: Send + Sync {
        fn describe(&self) -> String;
    }

    #[derive(Debug, Clone, Deserialize)]
    struct PrefixConfig {
        prefix: String,
    }

    struct PrefixSink {
        prefix: String,
    }

    impl Sink for PrefixSink {
        fn describe(&self) -> String {
            format!("prefix:{}", self.prefix)
        }
    }

    crate::impl_from!(PrefixConfig => PrefixSink, |config| PrefixSink { prefix: config.prefix });
    crate::impl_box_from!(PrefixSink => dyn Sink);

    #[derive(Debug, Clone, Deserialize)]
    struct StrictConfig {
        width: usize,
    }

    struct StrictSink {
        width: usize,
    }

    impl TryFrom<StrictConfig> for StrictSink {
        type Error = anyhow::Error;

        fn try_from(config: StrictConfig) -> Result<Self> {
            if config.width == 0 {
                return Err(anyhow!("width must be positive"));
            }
            Ok(Self {
                width: config.width,
            })
        }
    }

    impl Sink for StrictSink {
        fn describe(&self) -> String {
            format!("strict:{}", self.width)
        }
    }

    crate::impl_box_from!(StrictSink => dyn Sink);

    #[test]
    fn test_register_and_create() -> Result<()> {
        register_trait::<PrefixSink, dyn Sink, PrefixConfig>("PrefixSink")?;
        assert!(is_registered::<dyn Sink>("PrefixSink"));

        let opts = TypeOptions::from_json(r#"{ type: "PrefixSink", options: { prefix: "svc" } }"#)?;
        let sink: Box<dyn Sink> = create_trait_from_type_options(&opts)?;
        assert_eq!(sink.describe(), "prefix:svc");
        Ok(())
    }

    #[test]
    fn test_fallible_constructor_error_is_returned() -> Result<()> {
        register_trait::<StrictSink, dyn Sink, StrictConfig>("StrictSink")?;

        let ok = TypeOptions::from_json(r#"{ type: "StrictSink", options: { width: 4 } }"#)?;
        assert_eq!(create_trait_from_type_options::<dyn Sink>(&ok)?.describe(), "strict:4");

        let bad = TypeOptions::from_json(r#"{ type: "StrictSink", options: { width: 0 } }"#)?;
        let err = create_trait_from_type_options::<dyn Sink>(&bad)
            .err()
            .map(|e| e.to_string())
            .unwrap_or_default();
        assert!(err.contains("width must be positive"));
        Ok(())
    }

    #[test]
    fn test_unregistered_type() {
        let opts = TypeOptions::of("NoSuchSink");
        let result = create_trait_from_type_options::<dyn Sink>(&opts);
        let message = result.err().map(|e| e.to_string()).unwrap_or_default();
        assert!(message.contains("not registered"));
        assert!(message.contains("NoSuchSink"));
        assert!(!is_registered::<dyn Sink>("NoSuchSink"));
    }

    #[test]
    fn test_invalid_options() -> Result<()> {
        register_trait::<PrefixSink, dyn Sink, PrefixConfig>("PrefixSink")?;
        let opts = TypeOptions::from_json(r#"{ type: "PrefixSink", options: { wrong: 1 } }"#)?;
        assert!(create_trait_from_type_options::<dyn Sink>(&opts).is_err());
        Ok(())
    }

    #[test]
    fn test_registries_are_separate_per_trait() -> Result<()> {
        trait Other: Send + Sync {}

        register_trait::<PrefixSink, dyn Sink, PrefixConfig>("PrefixSink")?;
        assert!(!is_registered::<dyn Other>("PrefixSink"));
        Ok(())
    }
}
