//! 表单输入校验模块
//! 将界面上收集的六个字段校验为一个不可变的 KeystoreRequest

use serde::Deserialize;
use thiserror::Error;

/// 密码最小长度
pub const MIN_PASSWORD_LEN: usize = 6;
/// 有效期上限（年）
pub const MAX_VALIDITY_YEARS: u32 = 100;

/// 前端提交的原始表单字段
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawFields {
    /// Keystore文件路径
    pub path: String,
    /// 别名
    pub alias: String,
    /// 密码
    pub password: String,
    /// 有效期（年），未解析的原始文本
    pub validity: String,
    /// 名
    pub first_name: String,
    /// 姓
    pub last_name: String,
}

/// 表单字段，顺序即校验顺序
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Path,
    Alias,
    Password,
    Validity,
    FirstName,
    LastName,
}

impl Field {
    /// 全部字段，按表单顺序排列
    pub const ALL: [Field; 6] = [
        Field::Path,
        Field::Alias,
        Field::Password,
        Field::Validity,
        Field::FirstName,
        Field::LastName,
    ];

    /// 获取界面上显示的字段名
    pub fn label(&self) -> &'static str {
        match self {
            Field::Path => "Keystore File Path",
            Field::Alias => "Alias",
            Field::Password => "Password",
            Field::Validity => "Validity (years)",
            Field::FirstName => "First Name",
            Field::LastName => "Last Name",
        }
    }

    fn value<'a>(&self, fields: &'a RawFields) -> &'a str {
        match self {
            Field::Path => &fields.path,
            Field::Alias => &fields.alias,
            Field::Password => &fields.password,
            Field::Validity => &fields.validity,
            Field::FirstName => &fields.first_name,
            Field::LastName => &fields.last_name,
        }
    }
}

/// 校验失败的原因
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please fill in {}.", .0.label())]
    MissingField(Field),

    #[error("Key password must be at least 6 characters.")]
    PasswordTooShort,

    #[error("Validity must be a positive integer less than or equal to 100.")]
    InvalidValidity,
}

/// 通过校验的生成请求
///
/// 只能由 [`validate`] 构造，因此持有者可以假定所有字段都满足约束。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeystoreRequest {
    path: String,
    alias: String,
    password: String,
    validity_years: u32,
    first_name: String,
    last_name: String,
}

impl KeystoreRequest {
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn validity_years(&self) -> u32 {
        self.validity_years
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }
}

/// 校验原始字段，返回第一个不满足的规则
pub fn validate(fields: RawFields) -> Result<KeystoreRequest, ValidationError> {
    // 所有字段必须非空（不做trim，纯空格视为已填写）
    if let Some(field) = Field::ALL
        .iter()
        .find(|field| field.value(&fields).is_empty())
    {
        return Err(ValidationError::MissingField(*field));
    }

    if fields.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort);
    }

    let validity_years = parse_validity(&fields.validity)?;

    Ok(KeystoreRequest {
        path: fields.path,
        alias: fields.alias,
        password: fields.password,
        validity_years,
        first_name: fields.first_name,
        last_name: fields.last_name,
    })
}

/// 解析有效期，范围 1..=100
fn parse_validity(raw: &str) -> Result<u32, ValidationError> {
    let years: i64 = raw
        .trim()
        .parse()
        .map_err(|_| ValidationError::InvalidValidity)?;

    if !(1..=i64::from(MAX_VALIDITY_YEARS)).contains(&years) {
        return Err(ValidationError::InvalidValidity);
    }

    u32::try_from(years).map_err(|_| ValidationError::InvalidValidity)
}

#[cfg(test)]
pub(crate) fn sample_fields() -> RawFields {
    RawFields {
        path: "/tmp/a.jks".to_string(),
        alias: "app".to_string(),
        password: "secret1".to_string(),
        validity: "25".to_string(),
        first_name: "Jane".to_string(),
        last_name: "Doe".to_string(),
    }
}

/// 示例字段中替换一个字段的值
#[cfg(test)]
pub(crate) fn with_field(field: Field, value: &str) -> RawFields {
    let mut fields = sample_fields();
    let slot = match field {
        Field::Path => &mut fields.path,
        Field::Alias => &mut fields.alias,
        Field::Password => &mut fields.password,
        Field::Validity => &mut fields.validity,
        Field::FirstName => &mut fields.first_name,
        Field::LastName => &mut fields.last_name,
    };
    *slot = value.to_string();
    fields
}
