use thiserror::Error;

/// ドメイン値の解釈に関するエラー型
/// 時代区分など閉じた列挙値の変換失敗を定義
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// 未知の時代区分名
    #[error("未知の時代区分です: {name}")]
    UnknownPeriod { name: String },

    /// 未知の年代ラベル
    #[error("未知の年代ラベルです: {label}")]
    UnknownYearRange { label: String },
}

impl DomainError {
    /// 未知の時代区分名エラーを作成
    pub fn unknown_period<N: Into<String>>(name: N) -> Self {
        Self::UnknownPeriod { name: name.into() }
    }

    /// 未知の年代ラベルエラーを作成
    pub fn unknown_year_range<L: Into<String>>(label: L) -> Self {
        Self::UnknownYearRange {
            label: label.into(),
        }
    }
}

/// 記事ストア層のエラー型
/// SQLiteへのクエリ失敗と、保存済み行の破損を区別する
#[derive(Error, Debug)]
pub enum StoreError {
    /// データベースクエリエラー
    #[error("データベースエラー: {operation} - {source}")]
    Database {
        operation: String,
        #[source]
        source: sqlx::Error,
    },

    /// 保存済みの行が解釈できない（データ破損）
    #[error("破損したレコードです: id={id} - {reason}")]
    CorruptRecord { id: String, reason: String },

    /// 連結形式で保存すると値が変わってしまうタグ
    #[error("保存できないタグです: id={id} - {tag:?}")]
    UnencodableTag { id: String, tag: String },
}

impl StoreError {
    /// データベースエラーを作成
    pub fn database<O: Into<String>>(operation: O, source: sqlx::Error) -> Self {
        Self::Database {
            operation: operation.into(),
            source,
        }
    }

    /// データ破損エラーを作成
    pub fn corrupt_record<I: Into<String>, R: Into<String>>(id: I, reason: R) -> Self {
        Self::CorruptRecord {
            id: id.into(),
            reason: reason.into(),
        }
    }

    /// 保存できないタグのエラーを作成
    pub fn unencodable_tag<I: Into<String>, T: Into<String>>(id: I, tag: T) -> Self {
        Self::UnencodableTag {
            id: id.into(),
            tag: tag.into(),
        }
    }

    /// データ破損によるエラーかどうか
    pub fn is_corruption(&self) -> bool {
        matches!(self, Self::CorruptRecord { .. })
    }
}

/// ストアエラーのResult型エイリアス
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// 記事カタログサービスのエラー型
/// 呼び出し側が「何も変わらなかった」と「失敗した」を区別できるよう、
/// 失敗した操作名を保持する
#[derive(Error, Debug)]
pub enum CatalogError {
    /// ストア操作の失敗
    #[error("記事カタログの操作に失敗しました: {operation} - {source}")]
    Store {
        operation: String,
        #[source]
        source: StoreError,
    },

    /// 初期データの読み込み失敗
    #[error("初期記事データの読み込みに失敗しました: {reason}")]
    Seed { reason: String },
}

impl CatalogError {
    /// ストア操作エラーを作成
    pub fn store<O: Into<String>>(operation: O, source: StoreError) -> Self {
        Self::Store {
            operation: operation.into(),
            source,
        }
    }

    /// 初期データエラーを作成
    pub fn seed<R: Into<String>>(reason: R) -> Self {
        Self::Seed {
            reason: reason.into(),
        }
    }

    /// 失敗した操作名
    pub fn operation(&self) -> &str {
        match self {
            Self::Store { operation, .. } => operation,
            Self::Seed { .. } => "seed",
        }
    }
}

/// カタログエラーのResult型エイリアス
pub type CatalogResult<T> = std::result::Result<T, CatalogError>;
