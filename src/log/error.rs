use thiserror::Error;

/// 单个处理器的失败
///
/// `position` 是处理器在栈中的下标（从 0 开始）。
#[derive(Error, Debug)]
#[error("handler #{position}: {error:#}")]
pub struct HandlerFailure {
    pub position: usize,
    #[source]
    pub error: anyhow::Error,
}

/// Logger 操作的错误类型
#[derive(Error, Debug)]
pub enum LogError {
    #[error("Logger 已关闭")]
    Closed,

    /// 分发过程中部分处理器失败，其余处理器已正常调用
    #[error("日志分发失败 [{logger}] 记录 #{record_id}: {}", join_failures(.failures))]
    Dispatch {
        logger: String,
        record_id: u64,
        failures: Vec<HandlerFailure>,
    },

    /// 关闭时部分处理器失败，其余处理器已正常关闭
    #[error("关闭处理器失败 [{logger}]: {}", join_failures(.failures))]
    Close {
        logger: String,
        failures: Vec<HandlerFailure>,
    },

    #[error("配置错误: {0:#}")]
    Config(#[from] anyhow::Error),
}

impl LogError {
    /// 失败的处理器列表，`Closed` 与 `Config` 返回空切片
    pub fn failures(&self) -> &[HandlerFailure] {
        match self {
            LogError::Dispatch { failures, .. } | LogError::Close { failures, .. } => failures,
            LogError::Closed | LogError::Config(_) => &[],
        }
    }
}

fn join_failures(failures: &[HandlerFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
