//! 运行配置
//! keytool 位置：环境变量 > $JAVA_HOME/bin/keytool > PATH 中的 keytool

use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// 指定keytool路径的环境变量
pub const KEYTOOL_ENV: &str = "KEYSTORE_GENERATOR_KEYTOOL";
/// 默认程序名，从PATH中查找
pub const DEFAULT_KEYTOOL: &str = "keytool";

/// 调用keytool的配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvokerConfig {
    /// keytool可执行文件
    pub program: String,
}

impl Default for InvokerConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_KEYTOOL.to_string(),
        }
    }
}

impl InvokerConfig {
    /// 从进程环境读取配置，找不到keytool时返回错误
    pub fn from_env() -> Result<Self> {
        let cwd = env::current_dir().context("Failed to read current directory")?;
        let program = resolve_program(
            env::var(KEYTOOL_ENV).ok(),
            env::var_os("JAVA_HOME").map(PathBuf::from),
            env::var_os("PATH"),
            &cwd,
        )?;
        Ok(Self { program })
    }
}

/// 按优先级确定keytool路径
pub fn resolve_program(
    explicit: Option<String>,
    java_home: Option<PathBuf>,
    search_path: Option<OsString>,
    cwd: &Path,
) -> Result<String> {
    if let Some(program) = explicit.filter(|p| !p.trim().is_empty()) {
        return Ok(program);
    }

    if let Some(candidate) = java_home
        .map(|home| java_home_keytool(&home))
        .filter(|candidate| candidate.is_file())
    {
        return Ok(candidate.to_string_lossy().into_owned());
    }

    let keytool = which::which_in(DEFAULT_KEYTOOL, search_path, cwd)
        .context("keytool not found in PATH. Install a JDK.")?;
    Ok(keytool.to_string_lossy().into_owned())
}

fn java_home_keytool(java_home: &Path) -> PathBuf {
    let name = if cfg!(windows) {
        "keytool.exe"
    } else {
        "keytool"
    };
    java_home.join("bin").join(name)
}
