//! Keystore保存路径选择

use std::path::PathBuf;

use log::warn;
use tauri::AppHandle;
use tauri_plugin_dialog::DialogExt;

/// 默认扩展名
pub const DEFAULT_EXTENSION: &str = "jks";

/// 选择保存路径，用户取消时返回None
pub trait PathPicker: Send + Sync {
    fn pick_save_path(&self) -> Option<PathBuf>;
}

/// 原生另存为对话框
///
/// 会阻塞当前线程直到用户关闭对话框，不能在主线程调用。
pub struct DialogPathPicker {
    app: AppHandle,
}

impl DialogPathPicker {
    pub fn new(app: AppHandle) -> Self {
        Self { app }
    }
}

impl PathPicker for DialogPathPicker {
    fn pick_save_path(&self) -> Option<PathBuf> {
        self.app
            .dialog()
            .file()
            .add_filter("Java Keystore files", &[DEFAULT_EXTENSION])
            .add_filter("All files", &["*"])
            .blocking_save_file()
            .and_then(|file| match file.into_path() {
                Ok(path) => Some(path),
                Err(e) => {
                    warn!("selected keystore location is not a local path: {}", e);
                    None
                }
            })
            .map(with_default_extension)
    }
}

/// 没有扩展名时补上 .jks
pub fn with_default_extension(path: PathBuf) -> PathBuf {
    if path.extension().is_some() {
        path
    } else {
        path.with_extension(DEFAULT_EXTENSION)
    }
}

/// 在阻塞线程池中弹出选择框
pub async fn pick_in_background<P>(picker: P) -> Option<String>
where
    P: PathPicker + 'static,
{
    match tauri::async_runtime::spawn_blocking(move || picker.pick_save_path()).await {
        Ok(path) => path.map(|path| path.to_string_lossy().into_owned()),
        Err(e) => {
            warn!("save dialog task failed: {}", e);
            None
        }
    }
}
