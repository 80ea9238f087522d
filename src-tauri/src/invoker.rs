//! Keystore生成调用模块
//! 每个通过校验的请求启动一个后台任务，结果通过JoinHandle一次性返回

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{info, warn};
use tauri::async_runtime::{self, JoinHandle};

use crate::config::InvokerConfig;
use crate::error::InvokeError;
use crate::keytool::{build_invocation, Invocation};
use crate::request::KeystoreRequest;
use crate::runner::ToolRunner;

/// 成功生成的Keystore
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedKeystore {
    /// Keystore文件路径
    pub path: String,
    /// 别名
    pub alias: String,
}

/// 后台任务的结果
pub type GenerationOutcome = Result<GeneratedKeystore, InvokeError>;

/// 同一时间只允许一个生成任务
#[derive(Debug, Default)]
struct InFlight(AtomicBool);

/// 任务结束（包括panic）时释放占用
struct InFlightGuard(Arc<InFlight>);

impl InFlight {
    fn try_acquire(self: &Arc<Self>) -> Option<InFlightGuard> {
        self.0
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlightGuard(Arc::clone(self)))
    }

    fn is_set(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    fn release(&self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.release();
    }
}

/// 调用keytool生成Keystore
pub struct KeystoreInvoker<R: ToolRunner> {
    runner: Arc<R>,
    config: InvokerConfig,
    in_flight: Arc<InFlight>,
}

impl<R: ToolRunner> KeystoreInvoker<R> {
    pub fn new(runner: R, config: InvokerConfig) -> Self {
        Self {
            runner: Arc::new(runner),
            config,
            in_flight: Arc::new(InFlight::default()),
        }
    }

    /// 构建该请求对应的调用
    pub fn invocation(&self, request: &KeystoreRequest) -> Invocation {
        build_invocation(&self.config.program, request)
    }

    /// 是否有任务正在运行
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_set()
    }

    /// 提交请求，在后台运行keytool
    ///
    /// 已有任务运行时返回 [`InvokeError::Busy`]，不会启动新进程。
    pub fn submit(
        &self,
        request: KeystoreRequest,
    ) -> Result<JoinHandle<GenerationOutcome>, InvokeError> {
        let Some(guard) = self.in_flight.try_acquire() else {
            warn!("rejected keystore request for {}: generation in progress", request.path());
            return Err(InvokeError::Busy);
        };

        let invocation = self.invocation(&request);
        let runner = Arc::clone(&self.runner);

        info!(
            "generating keystore {} (alias {}, {} years)",
            request.path(),
            request.alias(),
            request.validity_years()
        );

        Ok(async_runtime::spawn(async move {
            let _guard = guard;
            let output = runner.run(invocation).await?;

            if !output.success {
                warn!("keytool failed with status {:?}", output.code);
                return Err(InvokeError::ToolFailed {
                    code: output.code,
                    detail: output.failure_detail(),
                });
            }

            info!("keystore written to {}", request.path());
            Ok(GeneratedKeystore {
                path: request.path().to_string(),
                alias: request.alias().to_string(),
            })
        }))
    }
}

/// 等待后台任务结束
pub async fn join(handle: JoinHandle<GenerationOutcome>) -> GenerationOutcome {
    handle
        .await
        .map_err(|e| InvokeError::Task(e.to_string()))?
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::request::{sample_fields, validate};
    use crate::runner::ToolOutput;
    use std::sync::Mutex;
    use tauri::async_runtime::block_on;

    /// 记录调用并返回预设结果
    #[derive(Default)]
    pub(crate) struct FakeRunner {
        pub calls: Mutex<Vec<Invocation>>,
        pub exit_code: i32,
        pub stderr: String,
        pub release: Option<Mutex<Option<std::sync::mpsc::Receiver<()>>>>,
    }

    impl FakeRunner {
        pub(crate) fn exiting(exit_code: i32, stderr: &str) -> Self {
            Self {
                exit_code,
                stderr: stderr.to_string(),
                ..Default::default()
            }
        }
    }

    impl ToolRunner for Arc<FakeRunner> {
        async fn run(&self, invocation: Invocation) -> Result<ToolOutput, InvokeError> {
            self.calls.lock().unwrap().push(invocation);
            let release = self
                .release
                .as_ref()
                .and_then(|slot| slot.lock().unwrap().take());
            if let Some(rx) = release {
                async_runtime::spawn_blocking(move || rx.recv().ok())
                    .await
                    .unwrap();
            }
            Ok(ToolOutput {
                success: self.exit_code == 0,
                code: Some(self.exit_code),
                stdout: String::new(),
                stderr: self.stderr.clone(),
            })
        }
    }

    fn invoker(runner: &Arc<FakeRunner>) -> KeystoreInvoker<Arc<FakeRunner>> {
        KeystoreInvoker::new(Arc::clone(runner), InvokerConfig::default())
    }

    #[test]
    fn test_success() {
        let runner = Arc::new(FakeRunner::exiting(0, ""));
        let invoker = invoker(&runner);
        let request = validate(sample_fields()).unwrap();
        let expected = invoker.invocation(&request);

        let outcome = block_on(join(invoker.submit(request).unwrap())).unwrap();
        assert_eq!(outcome.path, "/tmp/a.jks");
        assert_eq!(outcome.alias, "app");
        assert_eq!(*runner.calls.lock().unwrap(), vec![expected]);
        assert!(!invoker.is_busy());
    }

    #[test]
    fn test_failure_passes_detail_through() {
        let runner = Arc::new(FakeRunner::exiting(1, "keytool error: bad password\n"));
        let invoker = invoker(&runner);
        let request = validate(sample_fields()).unwrap();

        let err = block_on(join(invoker.submit(request).unwrap())).unwrap_err();
        match err {
            InvokeError::ToolFailed { code, detail } => {
                assert_eq!(code, Some(1));
                assert_eq!(detail, "keytool error: bad password\n");
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(runner.calls.lock().unwrap().len(), 1);
        assert!(!invoker.is_busy());
    }

    #[test]
    fn test_overlapping_submit_is_rejected() {
        let (tx, rx) = std::sync::mpsc::channel();
        let runner = Arc::new(FakeRunner {
            release: Some(Mutex::new(Some(rx))),
            ..Default::default()
        });
        let invoker = invoker(&runner);

        let first = invoker
            .submit(validate(sample_fields()).unwrap())
            .unwrap();
        assert!(invoker.is_busy());

        let second = invoker.submit(validate(sample_fields()).unwrap());
        assert!(matches!(second, Err(InvokeError::Busy)));

        tx.send(()).unwrap();
        block_on(join(first)).unwrap();
        assert_eq!(runner.calls.lock().unwrap().len(), 1);

        // 任务结束后可以再次提交
        block_on(join(invoker.submit(validate(sample_fields()).unwrap()).unwrap())).unwrap();
        assert_eq!(runner.calls.lock().unwrap().len(), 2);
    }
}
