//! 外部进程执行模块
//! ShellRunner 通过tauri-plugin-shell运行keytool

use std::future::Future;

use tauri::AppHandle;
use tauri_plugin_shell::ShellExt;

use crate::error::InvokeError;
use crate::keytool::Invocation;

/// 进程结束后的输出
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    /// 退出码是否为0
    pub success: bool,
    /// 退出码 (被信号终止时为None)
    pub code: Option<i32>,
    /// 标准输出
    pub stdout: String,
    /// 标准错误
    pub stderr: String,
}

impl ToolOutput {
    /// 由退出状态和原始输出字节构建
    pub fn from_parts(code: Option<i32>, success: bool, stdout: &[u8], stderr: &[u8]) -> Self {
        ToolOutput {
            success,
            code,
            stdout: String::from_utf8_lossy(stdout).into_owned(),
            stderr: String::from_utf8_lossy(stderr).into_owned(),
        }
    }

    /// 失败时展示给用户的原始信息
    ///
    /// keytool 有时把错误写到标准输出，所以stderr为空时退回stdout。
    pub fn failure_detail(&self) -> String {
        if !self.stderr.trim().is_empty() {
            self.stderr.clone()
        } else if !self.stdout.trim().is_empty() {
            self.stdout.clone()
        } else {
            match self.code {
                Some(code) => format!("keytool exited with status {}", code),
                None => "keytool was terminated by a signal".to_string(),
            }
        }
    }
}

/// 运行一次外部调用，直到进程结束
pub trait ToolRunner: Send + Sync + 'static {
    fn run(
        &self,
        invocation: Invocation,
    ) -> impl Future<Output = Result<ToolOutput, InvokeError>> + Send;
}

/// 通过shell插件启动子进程
pub struct ShellRunner {
    app: AppHandle,
}

impl ShellRunner {
    pub fn new(app: AppHandle) -> Self {
        Self { app }
    }
}

impl ToolRunner for ShellRunner {
    async fn run(&self, invocation: Invocation) -> Result<ToolOutput, InvokeError> {
        let program = invocation.program.clone();
        let output = self
            .app
            .shell()
            .command(invocation.program)
            .args(invocation.args)
            .output()
            .await
            .map_err(|e| InvokeError::Launch {
                program,
                reason: e.to_string(),
            })?;

        Ok(ToolOutput::from_parts(
            output.status.code(),
            output.status.success(),
            &output.stdout,
            &output.stderr,
        ))
    }
}
