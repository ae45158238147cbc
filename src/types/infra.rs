use thiserror::Error;

/// インフラストラクチャ層のエラー型
/// データベース接続、ファイルシステム、YAML読み込みなど基盤的なエラーを定義
#[derive(Error, Debug)]
pub enum InfraError {
    /// ファイルシステムエラー
    #[error("ファイルシステムエラー: {path} - {source}")]
    FileSystem {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// データベース接続エラー
    #[error("データベース接続エラー: {url} - {source}")]
    DatabaseConnection {
        url: String,
        #[source]
        source: sqlx::Error,
    },

    /// マイグレーション実行エラー
    #[error("データベースマイグレーションエラー: {source}")]
    Migration {
        #[source]
        source: sqlx::migrate::MigrateError,
    },

    /// YAMLの解析エラー
    #[error("YAML解析エラー: {context} - {source}")]
    Yaml {
        context: String,
        #[source]
        source: serde_yaml::Error,
    },
}

impl InfraError {
    /// ファイルシステムエラーを作成
    pub fn file_system<P: Into<String>>(path: P, source: std::io::Error) -> Self {
        Self::FileSystem {
            path: path.into(),
            source,
        }
    }

    /// データベース接続エラーを作成
    pub fn database_connection<U: Into<String>>(url: U, source: sqlx::Error) -> Self {
        Self::DatabaseConnection {
            url: url.into(),
            source,
        }
    }

    /// マイグレーションエラーを作成
    pub fn migration(source: sqlx::migrate::MigrateError) -> Self {
        Self::Migration { source }
    }

    /// YAML解析エラーを作成
    pub fn yaml<C: Into<String>>(context: C, source: serde_yaml::Error) -> Self {
        Self::Yaml {
            context: context.into(),
            source,
        }
    }
}

/// インフラエラーのResult型エイリアス
pub type InfraResult<T> = std::result::Result<T, InfraError>;

/// 更新系操作の結果
/// 影響を受けた行数を保持し、「対象なし」と「失敗」を区別するために使う
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MutationOutcome {
    /// 影響を受けた行数
    pub rows_affected: u64,
}

impl MutationOutcome {
    pub fn new(rows_affected: u64) -> Self {
        Self { rows_affected }
    }

    /// 何も変更されなかったかどうか
    pub fn is_noop(&self) -> bool {
        self.rows_affected == 0
    }
}

impl std::fmt::Display for MutationOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}件の行に反映", self.rows_affected)
    }
}

/// 初期データ投入の結果を表す構造体
/// 新規挿入した件数と、投入前からストアにあった件数を記録
/// 既存の行が1件でもあれば投入は行わない
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SeedResult {
    /// 新規挿入された件数
    pub inserted: usize,
    /// 投入前から保存されていた件数
    pub existing: usize,
}

impl SeedResult {
    /// 新しい投入結果を作成
    pub fn new(inserted: usize, existing: usize) -> Self {
        Self { inserted, existing }
    }

    /// 空の結果（全て0）を作成
    pub fn empty() -> Self {
        Self::new(0, 0)
    }

    /// ドメイン名を指定して表示用の文字列を生成
    pub fn display_with_domain(&self, domain_name: &str) -> String {
        format!(
            "{}初期化完了: 新規{}件、既存{}件",
            domain_name, self.inserted, self.existing
        )
    }
}

// 汎用的なDisplay実装（デフォルトでは「データ」という名称を使用）
impl std::fmt::Display for SeedResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_with_domain("データ"))
    }
}
