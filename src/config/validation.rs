use thiserror::Error;

/// 配置驗證錯誤
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("缺少必要配置項: {0}")]
    MissingField(String),

    #[error("無效的配置值: {0}")]
    InvalidValue(String),

    #[error("配置範圍錯誤: {field} 的值 {value} 不在範圍 {min}..{max} 內")]
    RangeError {
        field: String,
        value: String,
        min: String,
        max: String,
    },
}

/// 配置驗證器trait
pub trait Validator {
    /// 驗證配置
    fn validate(&self) -> Result<(), ValidationError>;
}

/// 驗證配置區段
pub fn validate_config<T>(config: &T) -> Result<(), ValidationError>
where
    T: Validator,
{
    config.validate()
}

/// 驗證工具函數
pub struct ValidationUtils;

impl ValidationUtils {
    /// 驗證配置值是否在指定範圍內
    pub fn in_range<T>(value: T, min: T, max: T, field_name: &str) -> Result<(), ValidationError>
    where
        T: PartialOrd + ToString,
    {
        if value < min || value > max {
            return Err(ValidationError::RangeError {
                field: field_name.to_string(),
                value: value.to_string(),
                min: min.to_string(),
                max: max.to_string(),
            });
        }
        Ok(())
    }

    /// 驗證字串是否為允許值之一（不分大小寫）
    pub fn one_of(value: &str, options: &[&str], field_name: &str) -> Result<(), ValidationError> {
        let lowered = value.to_lowercase();
        if !options.contains(&lowered.as_str()) {
            return Err(ValidationError::InvalidValue(format!(
                "{} 的值 {} 不是有效選項: {:?}",
                field_name, value, options
            )));
        }
        Ok(())
    }

    /// 檢查必要的字串欄位是否有值
    pub fn not_empty(value: &str, field_name: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::MissingField(field_name.to_string()));
        }
        Ok(())
    }

    /// 檢查值能否解析為指定型別
    pub fn parses_as<T: std::str::FromStr>(value: &str, field_name: &str) -> Result<(), ValidationError> {
        value.parse::<T>().map(|_| ()).map_err(|_| {
            ValidationError::InvalidValue(format!("{} 的值 {} 無法解析", field_name, value))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain_types::Granularity;

    #[test]
    fn test_in_range() {
        // 測試有效範圍
        assert!(ValidationUtils::in_range(5, 1, 10, "test_field").is_ok());

        // 測試無效範圍
        let err = ValidationUtils::in_range(15, 1, 10, "test_field").unwrap_err();
        assert_eq!(
            err,
            ValidationError::RangeError {
                field: "test_field".into(),
                value: "15".into(),
                min: "1".into(),
                max: "10".into(),
            }
        );
    }

    #[test]
    fn test_one_of() {
        assert!(ValidationUtils::one_of("INFO", &["debug", "info"], "log.level").is_ok());
        assert!(ValidationUtils::one_of("verbose", &["debug", "info"], "log.level").is_err());
    }

    #[test]
    fn test_not_empty() {
        // 測試非空字串
        assert!(ValidationUtils::not_empty("test", "test_field").is_ok());

        // 測試空字串
        assert!(ValidationUtils::not_empty("", "test_field").is_err());
        assert!(ValidationUtils::not_empty("   ", "test_field").is_err());
    }

    #[test]
    fn test_parses_as() {
        assert!(ValidationUtils::parses_as::<Granularity>("bulanan", "dashboard.default_granularity").is_ok());
        assert!(ValidationUtils::parses_as::<Granularity>("yearly", "dashboard.default_granularity").is_err());
    }
}
