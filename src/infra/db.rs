use crate::types::{InfraError, InfraResult};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

/// プロセス内で共有する接続数の上限
const MAX_CONNECTIONS: u32 = 5;

/// SQLiteの接続プールを作成
/// ファイルが存在しない場合は新規に作成する。
/// インメモリDBは接続ごとに別のDBになるため、接続数を1に制限する
pub async fn create_pool(database_url: &str) -> InfraResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| InfraError::database_connection(database_url, e))?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool_options = if database_url.contains(":memory:") {
        // 接続が破棄されるとDBの内容も失われる
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(MAX_CONNECTIONS)
    };

    pool_options
        .connect_with(options)
        .await
        .map_err(|e| InfraError::database_connection(database_url, e))
}

/// データベースの初期化（マイグレーション実行）
pub async fn initialize_database(pool: &SqlitePool) -> InfraResult<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(InfraError::migration)
}

/// プールの作成とデータベース初期化を一括で行う便利関数
pub async fn setup_database(database_url: &str) -> InfraResult<SqlitePool> {
    let pool = create_pool(database_url).await?;
    initialize_database(&pool).await?;
    tracing::debug!(database_url, "データベースの初期化が完了しました");
    Ok(pool)
}
