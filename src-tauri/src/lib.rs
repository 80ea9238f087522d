//! Android Keystore生成器 - Rust后端
//! 功能：校验用户填写的表单，在后台调用keytool生成JKS格式的Keystore
//! 密钥固定为RSA 2048，证书主题只有CN来自用户输入

pub mod config;
pub mod error;
pub mod generator;
pub mod invoker;
pub mod keytool;
pub mod notify;
pub mod picker;
pub mod request;
pub mod runner;

use anyhow::Context;
use tauri::{AppHandle, Manager, State};

use config::InvokerConfig;
use generator::{generate_keystore_internal, GenerateResult};
use invoker::KeystoreInvoker;
use notify::DialogNotifier;
use picker::{pick_in_background, DialogPathPicker};
use request::RawFields;
use runner::ShellRunner;

/// 应用中托管的调用器
type AppInvoker = KeystoreInvoker<ShellRunner>;

/// 生成Keystore的Tauri命令
#[tauri::command]
async fn generate_keystore(
    app: AppHandle,
    invoker: State<'_, AppInvoker>,
    fields: RawFields,
) -> Result<GenerateResult, String> {
    let notifier = DialogNotifier::new(app);
    generate_keystore_internal(fields, invoker.inner(), &notifier)
        .await
        .map_err(|e| e.to_string())
}

/// 选择Keystore保存路径的Tauri命令
#[tauri::command]
async fn pick_keystore_path(app: AppHandle) -> Option<String> {
    pick_in_background(DialogPathPicker::new(app)).await
}

/// 运行Tauri应用
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = build_and_run() {
        log::error!("{:#}", e);
        std::process::exit(1);
    }
}

/// 启动时解析keytool位置；找不到时只记录警告，生成时再报告启动失败
fn startup_config() -> InvokerConfig {
    match InvokerConfig::from_env() {
        Ok(config) => {
            log::info!("using keytool: {}", config.program);
            config
        }
        Err(e) => {
            log::warn!("{:#}", e);
            InvokerConfig::default()
        }
    }
}

fn build_and_run() -> anyhow::Result<()> {
    tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .plugin(tauri_plugin_shell::init())
        .setup(|app| {
            app.manage(KeystoreInvoker::new(
                ShellRunner::new(app.handle().clone()),
                startup_config(),
            ));
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            generate_keystore,
            pick_keystore_path
        ])
        .run(tauri::generate_context!())
        .context("运行Tauri应用时发生错误")
}
