use config::ConfigError;
use once_cell::sync::OnceCell;
use std::path::Path;
use tracing::{debug, warn};

use crate::config::loader::{ConfigLoader, Environment};
use crate::config::types::ApplicationConfig;
use crate::config::validation::Validator;

// 全局配置實例
static CONFIG: OnceCell<ApplicationConfig> = OnceCell::new();

/// 獲取應用程序配置實例，尚未初始化時使用預設值
pub fn get_config() -> &'static ApplicationConfig {
    CONFIG.get_or_init(|| {
        ApplicationConfig::load_from_env().unwrap_or_else(|err| {
            warn!("無法加載應用程序配置，使用預設值: {}", err);
            ApplicationConfig::default()
        })
    })
}

/// 初始化配置（在應用程序啟動時調用）
pub fn init_config() -> Result<&'static ApplicationConfig, ConfigError> {
    let app_config = ApplicationConfig::load_from_env()?;

    // 嘗試初始化全局配置
    if CONFIG.set(app_config).is_err() {
        warn!("配置已經被初始化，跳過重複初始化");
    } else {
        debug!("配置初始化成功，環境：{:?}", Environment::from_env());
    }

    Ok(get_config())
}

/// ApplicationConfig 加載方法實現
impl ApplicationConfig {
    /// 從環境變數指定的環境加載配置
    pub fn load_from_env() -> Result<Self, ConfigError> {
        let env = Environment::from_env();
        debug!("從環境加載配置: {:?}", env);
        Self::load_from_dir(&ConfigLoader::config_dir(), env)
    }

    /// 從指定目錄與環境加載配置，驗證失敗時回傳錯誤
    pub fn load_from_dir(dir: &Path, env: Environment) -> Result<Self, ConfigError> {
        let config_source = ConfigLoader::load_from_dir(dir, env)?;

        // 使用 serde 反序列化配置
        let app_config: ApplicationConfig = config_source.try_deserialize()?;

        app_config
            .validate()
            .map_err(|err| ConfigError::Message(err.to_string()))?;
        debug!("配置驗證通過");

        Ok(app_config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_load_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("development.toml"),
            r#"
[data]
path = "data/harga.csv"
thousands_separator = "."
delimiter = ";"

[dashboard]
default_granularity = "bulanan"
default_commodities = ["Beras Kualitas Medium I"]

[cache]
max_aggregations = 8
"#,
        )
        .unwrap();

        let config = ApplicationConfig::load_from_dir(dir.path(), Environment::Development).unwrap();

        assert_eq!(config.data.path, "data/harga.csv");
        assert_eq!(config.data.thousands_separator, '.');
        assert_eq!(config.data.table_format().delimiter, ';');
        // 未指定的欄位使用預設值
        assert_eq!(config.data.label_column, "Komoditas (Rp)");
        assert_eq!(config.dashboard.granularity(), crate::domain_types::Granularity::Monthly);
        assert_eq!(config.dashboard.default_commodities.len(), 1);
        assert_eq!(config.cache.max_aggregations, 8);
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn test_invalid_config_rejected() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("development.toml"), "[log]\nlevel = \"loud\"\n").unwrap();

        let result = ApplicationConfig::load_from_dir(dir.path(), Environment::Development);
        assert!(matches!(result, Err(ConfigError::Message(_))));
    }
}
