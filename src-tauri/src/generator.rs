//! Keystore生成流程
//! 校验 → 后台调用keytool → 通知用户

use log::warn;
use serde::Serialize;

use crate::error::GenerateError;
use crate::invoker::{join, KeystoreInvoker};
use crate::notify::{Notice, Notifier, SUCCESS_MESSAGE};
use crate::request::{validate, RawFields};
use crate::runner::ToolRunner;

/// 生成结果结构体
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct GenerateResult {
    /// 是否成功
    pub success: bool,
    /// 消息
    pub message: String,
    /// 输出文件路径
    pub output_path: String,
}

/// 生成Keystore的内部实现
///
/// 校验失败时不会启动任何进程；keytool失败时不清理它可能已写出的文件。
pub async fn generate_keystore_internal<R, N>(
    fields: RawFields,
    invoker: &KeystoreInvoker<R>,
    notifier: &N,
) -> Result<GenerateResult, GenerateError>
where
    R: ToolRunner,
    N: Notifier + ?Sized,
{
    let outcome = run(fields, invoker).await;

    match &outcome {
        Ok(result) => notifier.notify(&Notice::Success(result.message.clone())),
        Err(e) => {
            warn!("keystore generation failed: {}", e);
            notifier.notify(&Notice::Failure(e.to_string()));
        }
    }

    outcome
}

async fn run<R: ToolRunner>(
    fields: RawFields,
    invoker: &KeystoreInvoker<R>,
) -> Result<GenerateResult, GenerateError> {
    let request = validate(fields)?;
    let handle = invoker.submit(request)?;
    let generated = join(handle).await?;

    Ok(GenerateResult {
        success: true,
        message: SUCCESS_MESSAGE.to_string(),
        output_path: generated.path,
    })
}
