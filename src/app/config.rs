use crate::domain::article::{CatalogOptions, DeleteMode, SeedSource};
use crate::types::{ConfigError, ConfigResult};
use std::env;
use std::path::Path;

const ENV_DATABASE_URL: &str = "DATABASE_URL";
const ENV_RESET_ON_STARTUP: &str = "ARTICLE_RESET_ON_STARTUP";
const ENV_DELETE_MODE: &str = "ARTICLE_DELETE_MODE";
const ENV_SEED_FILE: &str = "ARTICLE_SEED_FILE";

/// 実行時設定
/// .envファイルは呼び出し側（main）でdotenvyにより読み込む
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database_url: String,
    pub catalog: CatalogOptions,
}

impl AppConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// 任意の参照関数から設定を読み込む
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup(ENV_DATABASE_URL)
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| ConfigError::missing_env_var(ENV_DATABASE_URL))?;

        let reset_on_startup = match lookup(ENV_RESET_ON_STARTUP) {
            Some(value) => parse_bool(ENV_RESET_ON_STARTUP, &value)?,
            None => true,
        };

        let delete_mode = match lookup(ENV_DELETE_MODE) {
            Some(value) => value.parse::<DeleteMode>().map_err(|reason| {
                ConfigError::invalid_value(ENV_DELETE_MODE, value.as_str(), reason)
            })?,
            None => DeleteMode::default(),
        };

        let seed_source = match lookup(ENV_SEED_FILE) {
            Some(path) if !path.trim().is_empty() => {
                if !Path::new(&path).is_file() {
                    return Err(ConfigError::missing_config_file(path));
                }
                SeedSource::File(path)
            }
            _ => SeedSource::Embedded,
        };

        Ok(Self {
            database_url,
            catalog: CatalogOptions {
                reset_on_startup,
                delete_mode,
                seed_source,
            },
        })
    }
}

fn parse_bool(name: &str, value: &str) -> ConfigResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::invalid_value(
            name,
            value,
            "true/falseのいずれかを指定してください",
        )),
    }
}
