//! keytool命令构建模块
//! 根据校验后的请求生成确定的参数列表

use crate::request::KeystoreRequest;

/// 密钥算法
pub const KEY_ALGORITHM: &str = "RSA";
/// 密钥长度
pub const KEY_SIZE: u32 = 2048;
/// Keystore类型
pub const STORE_TYPE: &str = "JKS";
/// 每年按365天计算，不考虑闰年
pub const DAYS_PER_YEAR: u32 = 365;

/// 一次外部工具调用：程序名和参数列表
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// 可执行程序
    pub program: String,
    /// 参数列表，逐个传递，不经过shell
    pub args: Vec<String>,
}

/// 将有效期年数换算为天数
pub fn validity_days(years: u32) -> u32 {
    years.saturating_mul(DAYS_PER_YEAR)
}

/// 构建证书主题 (只有CN来自用户输入，其余固定为Unknown)
pub fn distinguished_name(first_name: &str, last_name: &str) -> String {
    format!(
        "CN={} {}, OU=Unknown, O=Unknown, L=Unknown, S=Unknown, C=Unknown",
        first_name, last_name
    )
}

/// 构建keytool -genkey 调用
pub fn build_invocation(program: &str, request: &KeystoreRequest) -> Invocation {
    let args = vec![
        "-genkey".to_string(),
        "-v".to_string(),
        "-keystore".to_string(),
        request.path().to_string(),
        "-alias".to_string(),
        request.alias().to_string(),
        "-keyalg".to_string(),
        KEY_ALGORITHM.to_string(),
        "-keysize".to_string(),
        KEY_SIZE.to_string(),
        "-validity".to_string(),
        validity_days(request.validity_years()).to_string(),
        "-storepass".to_string(),
        request.password().to_string(),
        "-keypass".to_string(),
        request.password().to_string(),
        "-dname".to_string(),
        distinguished_name(request.first_name(), request.last_name()),
        "-storetype".to_string(),
        STORE_TYPE.to_string(),
    ];

    Invocation {
        program: program.to_string(),
        args,
    }
}
