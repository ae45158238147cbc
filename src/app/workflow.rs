use crate::{
    app::config::AppConfig,
    domain::{
        article::{Article, ArticleCatalog, ArticleView, SqliteArticleStore},
        settings::{Settings, SettingsStore},
    },
    infra::db::setup_database,
    types::SeedResult,
};
use anyhow::{Context, Result};
use std::sync::Arc;

/// 起動ワークフローの実行結果
#[derive(Debug, Clone)]
pub struct StartupReport {
    pub seed: SeedResult,
    pub articles: Vec<Article>,
    pub settings: Settings,
}

/// 起動ワークフローのメイン実行関数
///
/// 1. データベースの接続とマイグレーション
/// 2. 記事カタログの初期化（リセット・初期記事の投入・一覧の読み込み）
/// 3. 保存済み設定の読み込み
pub async fn execute_startup_workflow(config: &AppConfig) -> Result<StartupReport> {
    tracing::info!("=== 起動ワークフロー開始 ===");

    let pool = setup_database(&config.database_url)
        .await
        .context("データベースのセットアップに失敗")?;

    let store = Arc::new(SqliteArticleStore::new(pool.clone()));
    let catalog = ArticleCatalog::new(store, config.catalog.clone());
    let seed = catalog
        .initialize()
        .await
        .context("記事カタログの初期化に失敗")?;

    let settings = SettingsStore::open(pool)
        .await
        .context("設定の読み込みに失敗")?
        .current();
    tracing::info!(
        language = %settings.language,
        theme = %settings.theme,
        notifications = settings.notifications,
        sound = settings.sound,
        "設定を読み込みました"
    );

    let articles = catalog.articles().as_ref().clone();
    for article in &articles {
        tracing::info!("{}", format_article_line(article));
    }

    tracing::info!("=== 起動ワークフロー完了: 記事{}件 ===", articles.len());
    Ok(StartupReport {
        seed,
        articles,
        settings,
    })
}

/// 一覧表示用の1行（タイトル・年代・読了時間）
pub fn format_article_line<T: ArticleView>(article: &T) -> String {
    format!(
        "{} | {} | {}分",
        article.get_title(),
        article.get_period().year_range(),
        article.read_time_minutes()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::article::CatalogOptions;
    use crate::domain::period::HistoricalPeriod;

    fn memory_config() -> AppConfig {
        AppConfig {
            database_url: "sqlite::memory:".to_string(),
            catalog: CatalogOptions::default(),
        }
    }

    #[tokio::test]
    async fn test_startup_workflow_seeds_catalog() -> Result<(), anyhow::Error> {
        let report = execute_startup_workflow(&memory_config()).await?;

        assert_eq!(report.seed, SeedResult::new(3, 0));
        assert_eq!(report.articles.len(), 3);
        assert_eq!(report.settings, Settings::default());

        println!("✅ 起動ワークフローテスト成功: {}", report.seed);
        Ok(())
    }

    #[test]
    fn test_format_article_line() {
        let article = Article::new(
            "Київська Русь",
            HistoricalPeriod::KyivRus,
            "Нестор Літописець",
            900,
            vec![],
        );
        assert_eq!(
            format_article_line(&article),
            "Київська Русь | Київська Русь (882-1240 рр). | 5分"
        );
    }
}
