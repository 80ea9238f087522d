//! 错误类型

use thiserror::Error;

use crate::request::ValidationError;

/// 调用外部工具时的错误
#[derive(Debug, Error)]
pub enum InvokeError {
    /// 进程无法启动（例如找不到keytool）
    #[error("failed to launch {program}: {reason}")]
    Launch { program: String, reason: String },

    /// 工具以非零状态退出，detail为工具自身的错误输出
    #[error("{detail}")]
    ToolFailed { code: Option<i32>, detail: String },

    /// 已有生成任务在运行
    #[error("A keystore generation is already in progress.")]
    Busy,

    /// 后台任务异常结束
    #[error("background task failed: {0}")]
    Task(String),
}

/// 一次生成尝试的错误
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Failed to generate keystore: {0}")]
    Invoke(#[from] InvokeError),
}
