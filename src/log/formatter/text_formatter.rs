use crate::log::formatter::LogFormatter;
use crate::log::record::LogRecord;
use anyhow::{anyhow, Result};
use chrono::Utc;
use serde::Deserialize;
use smart_default::SmartDefault;
use std::fmt::Write;

/// TextFormatter 配置
#[derive(Debug, Clone, Deserialize, SmartDefault)]
#[serde(default)]
pub struct TextFormatterConfig {
    /// 输出模板
    ///
    /// 占位符：`{id}` `{time}` `{name}` `{level}` `{message}` `{thread}`，
    /// `{{` 与 `}}` 输出字面量花括号，未知占位符原样输出。
    #[default = "{time} {name} {level} {message}"]
    pub template: String,

    /// `{time}` 使用的 strftime 格式
    #[default = "%Y-%m-%dT%H:%M:%S%.3f%:z"]
    pub time_format: String,

    /// 时间以 UTC 输出（默认本地时间）
    #[default = false]
    pub utc: bool,
}

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Literal(String),
    Id,
    Time,
    Name,
    Level,
    Message,
    Thread,
}

/// 文本格式化器
///
/// 模板在构造时解析为片段列表，格式化时按片段顺序拼接。
pub struct TextFormatter {
    config: TextFormatterConfig,
    segments: Vec<Segment>,
}

impl TextFormatter {
    pub fn new(config: TextFormatterConfig) -> Self {
        let segments = parse_template(&config.template);
        Self { config, segments }
    }

    /// 只指定模板，其余取默认值
    pub fn with_template(template: impl Into<String>) -> Self {
        Self::new(TextFormatterConfig {
            template: template.into(),
            ..Default::default()
        })
    }

    pub fn template(&self) -> &str {
        &self.config.template
    }
}

fn parse_template(template: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut rest = template;

    while let Some(pos) = rest.find(|c: char| c == '{' || c == '}') {
        literal.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        if tail.starts_with("{{") {
            literal.push('{');
            rest = &tail[2..];
        } else if tail.starts_with("}}") {
            literal.push('}');
            rest = &tail[2..];
        } else if tail.starts_with('}') {
            literal.push('}');
            rest = &tail[1..];
        } else {
            match tail.find('}') {
                Some(end) => {
                    let segment = match &tail[1..end] {
                        "id" => Some(Segment::Id),
                        "time" => Some(Segment::Time),
                        "name" => Some(Segment::Name),
                        "level" => Some(Segment::Level),
                        "message" => Some(Segment::Message),
                        "thread" => Some(Segment::Thread),
                        _ => None,
                    };
                    match segment {
                        Some(segment) => {
                            if !literal.is_empty() {
                                segments.push(Segment::Literal(std::mem::take(&mut literal)));
                            }
                            segments.push(segment);
                        }
                        None => literal.push_str(&tail[..=end]),
                    }
                    rest = &tail[end + 1..];
                }
                None => {
                    // 未闭合的 '{' 之后全部按字面量处理
                    literal.push_str(tail);
                    rest = "";
                }
            }
        }
    }

    literal.push_str(rest);
    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }
    segments
}

impl LogFormatter for TextFormatter {
    fn format(&self, record: &LogRecord) -> Result<String> {
        let mut result = String::with_capacity(64 + record.render().len());

        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => result.push_str(text),
                Segment::Id => write!(result, "{}", record.id())?,
                Segment::Time => {
                    let written = if self.config.utc {
                        let utc = record.time().with_timezone(&Utc);
                        write!(result, "{}", utc.format(&self.config.time_format))
                    } else {
                        write!(result, "{}", record.time().format(&self.config.time_format))
                    };
                    written.map_err(|_| {
                        anyhow!("invalid time format '{}'", self.config.time_format)
                    })?;
                }
                Segment::Name => result.push_str(record.name()),
                Segment::Level => result.push_str(record.level_name()),
                Segment::Message => result.push_str(record.render()),
                Segment::Thread => result.push_str(record.thread_id()),
            }
        }

        Ok(result)
    }
}

crate::impl_from!(TextFormatterConfig => TextFormatter);
crate::impl_box_from!(TextFormatter => dyn LogFormatter);
