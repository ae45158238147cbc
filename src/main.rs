use anyhow::Context;
use ukraine_history_learner::app::{execute_startup_workflow, AppConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 環境変数を読み込み（.envファイルがあれば使用）
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("ukraine_history_learner=info".parse()?),
        )
        .init();

    let config = AppConfig::from_env().context("設定の読み込みに失敗")?;
    let report = execute_startup_workflow(&config).await?;

    println!("{}", report.seed.display_with_domain("記事"));
    println!("記事数: {}件", report.articles.len());
    Ok(())
}
