use crate::types::{StoreError, StoreResult};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use std::fmt;
use std::str::FromStr;
use tokio::sync::watch;

const KEY_NOTIFICATIONS: &str = "notifications";
const KEY_SOUND: &str = "sound";
const KEY_LANGUAGE: &str = "language";
const KEY_THEME: &str = "theme";

/// 既定の表示言語（ウクライナ語）
pub const DEFAULT_LANGUAGE: &str = "uk";

/// 画面テーマ
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    /// 端末の設定に従う
    #[default]
    System,
}

impl Theme {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::System => "system",
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            "system" => Ok(Self::System),
            other => Err(format!("未知のテーマです: {}", other)),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// アプリ設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub notifications: bool,
    pub sound: bool,
    pub language: String,
    pub theme: Theme,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            notifications: true,
            sound: true,
            language: DEFAULT_LANGUAGE.to_string(),
            theme: Theme::default(),
        }
    }
}

impl Settings {
    // 保存済みのキーと値を反映する。解釈できない値は既定値のまま残す
    fn apply(&mut self, key: &str, value: &str) {
        match key {
            KEY_NOTIFICATIONS => match value.parse() {
                Ok(enabled) => self.notifications = enabled,
                Err(_) => warn_invalid(key, value),
            },
            KEY_SOUND => match value.parse() {
                Ok(enabled) => self.sound = enabled,
                Err(_) => warn_invalid(key, value),
            },
            KEY_LANGUAGE => {
                if value.trim().is_empty() {
                    warn_invalid(key, value);
                } else {
                    self.language = value.trim().to_string();
                }
            }
            KEY_THEME => match value.parse() {
                Ok(theme) => self.theme = theme,
                Err(_) => warn_invalid(key, value),
            },
            _ => tracing::debug!(key, "未知の設定キーを無視しました"),
        }
    }
}

fn warn_invalid(key: &str, value: &str) {
    tracing::warn!(key, value, "設定値が解釈できないため既定値を使用します");
}

/// キーバリュー形式の設定ストア
///
/// 記事と同じSQLiteデータベースのsettingsテーブルに保存し、
/// 書き込みが成功した後に最新の設定をwatchチャンネルで公開する。
pub struct SettingsStore {
    pool: SqlitePool,
    current: watch::Sender<Settings>,
}

impl SettingsStore {
    /// 保存済みの設定を読み込んでストアを作成する
    pub async fn open(pool: SqlitePool) -> StoreResult<Self> {
        let settings = read_settings(&pool).await?;
        let (current, _) = watch::channel(settings);
        Ok(Self { pool, current })
    }

    /// 保存済みの設定を読み直す
    pub async fn load(&self) -> StoreResult<Settings> {
        let settings = read_settings(&self.pool).await?;
        self.current.send_replace(settings.clone());
        Ok(settings)
    }

    /// 現在の設定
    pub fn current(&self) -> Settings {
        self.current.borrow().clone()
    }

    /// 設定の変更を購読する
    pub fn subscribe(&self) -> watch::Receiver<Settings> {
        self.current.subscribe()
    }

    pub async fn set_notifications(&self, enabled: bool) -> StoreResult<()> {
        self.write(KEY_NOTIFICATIONS, &enabled.to_string()).await?;
        self.current.send_modify(|s| s.notifications = enabled);
        Ok(())
    }

    pub async fn set_sound(&self, enabled: bool) -> StoreResult<()> {
        self.write(KEY_SOUND, &enabled.to_string()).await?;
        self.current.send_modify(|s| s.sound = enabled);
        Ok(())
    }

    /// 表示言語を設定する（"uk"、"en" などの言語コード）
    /// 空白のみのコードは既定の言語として保存する
    pub async fn set_language(&self, language: &str) -> StoreResult<()> {
        let language = match language.trim() {
            "" => DEFAULT_LANGUAGE,
            code => code,
        };
        self.write(KEY_LANGUAGE, language).await?;
        self.current.send_modify(|s| s.language = language.to_string());
        Ok(())
    }

    pub async fn set_theme(&self, theme: Theme) -> StoreResult<()> {
        self.write(KEY_THEME, theme.code()).await?;
        self.current.send_modify(|s| s.theme = theme);
        Ok(())
    }

    /// 通知設定を反転し、新しい値を返す
    pub async fn toggle_notifications(&self) -> StoreResult<bool> {
        let enabled = !self.current().notifications;
        self.set_notifications(enabled).await?;
        Ok(enabled)
    }

    /// 効果音設定を反転し、新しい値を返す
    pub async fn toggle_sound(&self) -> StoreResult<bool> {
        let enabled = !self.current().sound;
        self.set_sound(enabled).await?;
        Ok(enabled)
    }

    async fn write(&self, key: &str, value: &str) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO settings (key, value) VALUES (?, ?)
            ON CONFLICT (key) DO UPDATE SET value = excluded.value
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::database(format!("設定の保存: {}", key), e))?;

        tracing::debug!(key, value, "設定を保存しました");
        Ok(())
    }
}

async fn read_settings(pool: &SqlitePool) -> StoreResult<Settings> {
    let rows: Vec<(String, String)> = sqlx::query_as("SELECT key, value FROM settings")
        .fetch_all(pool)
        .await
        .map_err(|e| StoreError::database("設定の読み込み", e))?;

    let mut settings = Settings::default();
    for (key, value) in &rows {
        settings.apply(key, value);
    }
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_codes() {
        for theme in [Theme::Light, Theme::Dark, Theme::System] {
            assert_eq!(theme.code().parse::<Theme>(), Ok(theme));
        }
        assert!("sepia".parse::<Theme>().is_err());
    }

    #[test]
    fn test_apply_falls_back_on_invalid_values() {
        let mut settings = Settings::default();
        settings.apply(KEY_NOTIFICATIONS, "maybe");
        settings.apply(KEY_THEME, "sepia");
        settings.apply(KEY_LANGUAGE, "  ");
        settings.apply("unknown", "value");
        assert_eq!(settings, Settings::default());

        settings.apply(KEY_SOUND, "false");
        settings.apply(KEY_LANGUAGE, "en");
        assert!(!settings.sound);
        assert_eq!(settings.language, "en");
    }

    #[sqlx::test]
    async fn test_defaults_when_empty(pool: SqlitePool) -> Result<(), anyhow::Error> {
        let store = SettingsStore::open(pool).await?;
        let settings = store.current();

        assert!(settings.notifications);
        assert!(settings.sound);
        assert_eq!(settings.language, "uk");
        assert_eq!(settings.theme, Theme::System);
        Ok(())
    }

    #[sqlx::test]
    async fn test_settings_persist_across_reopen(pool: SqlitePool) -> Result<(), anyhow::Error> {
        let store = SettingsStore::open(pool.clone()).await?;
        store.set_language("en").await?;
        store.set_theme(Theme::Dark).await?;
        assert!(!store.toggle_sound().await?);
        assert!(!store.toggle_notifications().await?);

        let reopened = SettingsStore::open(pool).await?;
        assert_eq!(
            reopened.current(),
            Settings {
                notifications: false,
                sound: false,
                language: "en".to_string(),
                theme: Theme::Dark,
            }
        );
        println!("✅ 設定の永続化テスト成功");
        Ok(())
    }

    #[sqlx::test]
    async fn test_blank_language_matches_after_reopen(pool: SqlitePool) -> Result<(), anyhow::Error> {
        let store = SettingsStore::open(pool.clone()).await?;
        store.set_language("en").await?;
        store.set_language("   ").await?;
        let published = store.current().language;

        let reopened = SettingsStore::open(pool).await?;
        assert_eq!(published, reopened.current().language);
        assert_eq!(published, DEFAULT_LANGUAGE);
        Ok(())
    }

    #[sqlx::test]
    async fn test_subscriber_receives_updates(pool: SqlitePool) -> Result<(), anyhow::Error> {
        let store = SettingsStore::open(pool).await?;
        let mut receiver = store.subscribe();

        store.set_theme(Theme::Light).await?;
        assert!(receiver.has_changed()?);
        assert_eq!(receiver.borrow_and_update().theme, Theme::Light);
        Ok(())
    }

    #[sqlx::test]
    async fn test_corrupt_value_uses_default(pool: SqlitePool) -> Result<(), anyhow::Error> {
        sqlx::query("INSERT INTO settings (key, value) VALUES ('sound', 'loud')")
            .execute(&pool)
            .await?;

        let store = SettingsStore::open(pool).await?;
        assert!(store.load().await?.sound, "解釈できない値は既定値(true)になるべき");
        Ok(())
    }
}
