use std::fmt;
use std::ops::Deref;

/// 日志调用的单个参数
///
/// 日志调用的参数列表是异构的，每个参数在进入 Record 时转换为 `Value`，
/// 渲染（空格拼接或 printf 模板替换）时再按类型格式化。
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
    Char(char),
    Null,
    /// 任意实现 Debug 的值，构造时即渲染成字符串
    Debug(String),
}

impl Value {
    /// 从任意 `Debug` 值构造
    pub fn debug<T: fmt::Debug + ?Sized>(value: &T) -> Self {
        Value::Debug(format!("{:?}", value))
    }

    /// 类型名，用于 printf 的错误标记（如 `%!d(string=abc)`）
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Str(_) => "string",
            Value::Int(_) => "int",
            Value::Uint(_) => "uint",
            Value::Float(_) => "float64",
            Value::Bool(_) => "bool",
            Value::Char(_) => "char",
            Value::Null => "nil",
            Value::Debug(_) => "debug",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => f.write_str(s),
            Value::Int(n) => write!(f, "{}", n),
            Value::Uint(n) => write!(f, "{}", n),
            Value::Float(n) => write!(f, "{}", n),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Char(c) => write!(f, "{}", c),
            Value::Null => f.write_str("<nil>"),
            Value::Debug(s) => f.write_str(s),
        }
    }
}

macro_rules! impl_value_from {
    ($variant:ident as $target:ty: $($source:ty),+) => {
        $(
            impl From<$source> for Value {
                fn from(v: $source) -> Self {
                    Value::$variant(v as $target)
                }
            }
        )+
    };
}

impl_value_from!(Int as i64: i8, i16, i32, i64, isize);
impl_value_from!(Uint as u64: u8, u16, u32, u64, usize);
impl_value_from!(Float as f64: f32, f64);

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::Char(c)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::Str(s.clone())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// 一次日志调用的参数列表
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args(Vec<Value>);

impl Args {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, value: impl Into<Value>) {
        self.0.push(value.into());
    }

    pub fn into_vec(self) -> Vec<Value> {
        self.0
    }

    /// 以单个空格拼接所有参数，无结尾换行
    pub fn join(&self) -> String {
        let mut out = String::new();
        for (i, value) in self.0.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            use std::fmt::Write;
            let _ = write!(out, "{}", value);
        }
        out
    }
}

impl Deref for Args {
    type Target = [Value];

    fn deref(&self) -> &[Value] {
        &self.0
    }
}

impl FromIterator<Value> for Args {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<Vec<Value>> for Args {
    fn from(values: Vec<Value>) -> Self {
        Self(values)
    }
}

impl<const N: usize> From<[Value; N]> for Args {
    fn from(values: [Value; N]) -> Self {
        Self(values.into())
    }
}

impl From<Value> for Args {
    fn from(value: Value) -> Self {
        Self(vec![value])
    }
}

/// 空参数列表：`logger.info(())`
impl From<()> for Args {
    fn from(_: ()) -> Self {
        Self::new()
    }
}

macro_rules! impl_args_from_scalar {
    ($($source:ty),+) => {
        $(
            impl From<$source> for Args {
                fn from(v: $source) -> Self {
                    Self(vec![Value::from(v)])
                }
            }
        )+
    };
}

// 单个参数的调用可以直接传值：`logger.info("started")`、`logger.debugf("x=%d", 1)`
impl_args_from_scalar!(
    &str, String, &String, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64, bool,
    char
);
