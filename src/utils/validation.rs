use crate::utils::error::{ApiError, Result};
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

static UUID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$")
        .unwrap()
});

static CELLPHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^09+[0-9]{8}$").unwrap());

// 區碼-號碼 開頭即可，總長另外檢查
static TELEPHONE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{2,4}-[0-9]{6,8}").unwrap());

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(ApiError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(ApiError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(ApiError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(ApiError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(ApiError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// 驗證 UUID 格式，失敗時回傳指定的錯誤訊息
pub fn validate_uuid(field_name: &str, value: &str, error_message: &str) -> Result<()> {
    if UUID_PATTERN.is_match(value) {
        Ok(())
    } else {
        Err(ApiError::validation(field_name, error_message))
    }
}

/// Mobile numbers look like `0912345678`. Empty means "not provided".
pub fn validate_cellphone(field_name: &str, value: &str) -> Result<()> {
    if value.is_empty() || CELLPHONE_PATTERN.is_match(value) {
        Ok(())
    } else {
        Err(ApiError::validation(field_name, "Invalid cellphone number format"))
    }
}

/// Landlines look like `02-12345678`, 10 to 11 characters. Empty means
/// "not provided".
pub fn validate_telephone(field_name: &str, value: &str) -> Result<()> {
    let length = value.chars().count();
    if value.is_empty() || (TELEPHONE_PREFIX.is_match(value) && (10..=11).contains(&length)) {
        Ok(())
    } else {
        Err(ApiError::validation(field_name, "Invalid telephone number format"))
    }
}

pub fn validate_email(field_name: &str, value: &str) -> Result<()> {
    if EMAIL_PATTERN.is_match(value) {
        Ok(())
    } else {
        Err(ApiError::validation(field_name, "請輸入正確的 Email 格式"))
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ApiError::validation(
            field_name,
            format!("{} cannot be empty or whitespace-only", field_name),
        ));
    }
    Ok(())
}

pub fn validate_password(field_name: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(ApiError::validation(field_name, "密碼欄位不能為空"));
    }
    Ok(())
}
