//! 生成结果通知

use tauri::AppHandle;
use tauri_plugin_dialog::{DialogExt, MessageDialogKind};

/// 成功提示文本
pub const SUCCESS_MESSAGE: &str = "Keystore generated successfully!";

/// 展示给用户的通知
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Failure(String),
}

impl Notice {
    /// 对话框标题
    pub fn title(&self) -> &'static str {
        match self {
            Notice::Success(_) => "Success",
            Notice::Failure(_) => "Error",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Notice::Success(message) | Notice::Failure(message) => message,
        }
    }
}

/// 通知的展示方式
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: &Notice);
}

/// 使用原生消息对话框展示通知
pub struct DialogNotifier {
    app: AppHandle,
}

impl DialogNotifier {
    pub fn new(app: AppHandle) -> Self {
        Self { app }
    }
}

impl Notifier for DialogNotifier {
    fn notify(&self, notice: &Notice) {
        let kind = match notice {
            Notice::Success(_) => MessageDialogKind::Info,
            Notice::Failure(_) => MessageDialogKind::Error,
        };

        // 非阻塞显示，不等待用户关闭
        self.app
            .dialog()
            .message(notice.message())
            .title(notice.title())
            .kind(kind)
            .show(|_| {});
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::Mutex;

    /// 记录收到的通知
    #[derive(Default)]
    pub(crate) struct RecordingNotifier {
        pub notices: Mutex<Vec<Notice>>,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, notice: &Notice) {
            self.notices.lock().unwrap().push(notice.clone());
        }
    }

    #[test]
    fn test_notice_titles() {
        let ok = Notice::Success(SUCCESS_MESSAGE.to_string());
        assert_eq!(ok.title(), "Success");
        assert_eq!(ok.message(), "Keystore generated successfully!");

        let failed = Notice::Failure("Failed to generate keystore: boom".to_string());
        assert_eq!(failed.title(), "Error");
        assert_eq!(failed.message(), "Failed to generate keystore: boom");
    }
}
