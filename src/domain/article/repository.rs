use super::model::{decode_tags, find_unencodable_tag, ArticleRecord};
use crate::domain::period::HistoricalPeriod;
use crate::types::{StoreError, StoreResult};
use async_trait::async_trait;
use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};

const SELECT_ARTICLE_ENTRY: &str =
    "SELECT id, title, period, author, word_count, tags FROM article_entry";

// article_entryテーブルの生の行
// period・tags・word_countはArticleRecordへの変換時に検証する
#[derive(Debug, Clone, FromRow)]
struct ArticleRow {
    id: String,
    title: String,
    period: String,
    author: String,
    word_count: i64,
    tags: String,
}

impl TryFrom<ArticleRow> for ArticleRecord {
    type Error = StoreError;

    fn try_from(row: ArticleRow) -> StoreResult<Self> {
        let period = row
            .period
            .parse::<HistoricalPeriod>()
            .map_err(|e| StoreError::corrupt_record(&row.id, e.to_string()))?;
        let word_count = u32::try_from(row.word_count).map_err(|_| {
            StoreError::corrupt_record(&row.id, format!("語数が不正です: {}", row.word_count))
        })?;

        Ok(ArticleRecord {
            tags: decode_tags(&row.tags),
            id: row.id,
            title: row.title,
            period,
            author: row.author,
            word_count,
        })
    }
}

// 書き込む前に、読み戻したときに同じ値になるタグかを確認する
fn ensure_encodable_tags(record: &ArticleRecord) -> StoreResult<()> {
    match find_unencodable_tag(&record.tags) {
        Some(tag) => Err(StoreError::unencodable_tag(&record.id, tag)),
        None => Ok(()),
    }
}

fn into_records(rows: Vec<ArticleRow>) -> StoreResult<Vec<ArticleRecord>> {
    rows.into_iter().map(ArticleRecord::try_from).collect()
}

// 記事検索のフィルター条件を表す構造体
// 両方とも指定された場合はAND条件になる
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleFilter {
    pub period: Option<HistoricalPeriod>,
    /// タイトル・著者・タグのいずれかに含まれる文字列（大文字小文字を区別）
    pub query: Option<String>,
}

impl ArticleFilter {
    pub fn by_period(period: HistoricalPeriod) -> Self {
        Self {
            period: Some(period),
            query: None,
        }
    }

    pub fn by_query<Q: Into<String>>(query: Q) -> Self {
        Self {
            period: None,
            query: Some(query.into()),
        }
    }

    pub fn by_both<Q: Into<String>>(period: HistoricalPeriod, query: Q) -> Self {
        Self {
            period: Some(period),
            query: Some(query.into()),
        }
    }
}

/// 記事の永続化を抽象化するトレイト
///
/// 本番ではSQLite実装を使い、テストでは障害を注入する実装を
/// DIできるようにするためのインターフェースです。
#[async_trait]
pub trait ArticleStore: Send + Sync {
    /// 記事を挿入する。同じIDが存在する場合は置き換える
    async fn insert(&self, record: &ArticleRecord) -> StoreResult<()>;

    /// 全フィールドが一致する行を削除し、削除件数を返す
    async fn delete(&self, record: &ArticleRecord) -> StoreResult<u64>;

    /// IDが一致する行を削除し、削除件数を返す
    async fn delete_by_id(&self, id: &str) -> StoreResult<u64>;

    /// IDが一致する行を置き換え、更新件数を返す
    async fn update(&self, record: &ArticleRecord) -> StoreResult<u64>;

    /// 全件削除する
    async fn delete_all(&self) -> StoreResult<()>;

    /// IDで1件取得する。存在しない場合はNone
    async fn get_by_id(&self, id: &str) -> StoreResult<Option<ArticleRecord>>;

    /// フィルター条件で検索する
    async fn search(&self, filter: &ArticleFilter) -> StoreResult<Vec<ArticleRecord>>;

    /// 保存件数
    async fn count(&self) -> StoreResult<u64>;

    /// 全件取得（挿入順）
    async fn get_all(&self) -> StoreResult<Vec<ArticleRecord>> {
        self.search(&ArticleFilter::default()).await
    }

    /// 時代区分で絞り込む
    async fn get_by_period(&self, period: HistoricalPeriod) -> StoreResult<Vec<ArticleRecord>> {
        self.search(&ArticleFilter::by_period(period)).await
    }

    /// タイトル・著者・タグの部分一致で絞り込む
    async fn get_by_query(&self, query: &str) -> StoreResult<Vec<ArticleRecord>> {
        self.search(&ArticleFilter::by_query(query)).await
    }

    /// 時代区分と部分一致の両方で絞り込む
    async fn get_filtered(
        &self,
        period: HistoricalPeriod,
        query: &str,
    ) -> StoreResult<Vec<ArticleRecord>> {
        self.search(&ArticleFilter::by_both(period, query)).await
    }
}

/// SQLiteを使用した記事ストアの実装
/// プールはプロセス起動時に一度だけ作成して注入する
#[derive(Debug, Clone)]
pub struct SqliteArticleStore {
    pool: SqlitePool,
}

impl SqliteArticleStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ArticleStore for SqliteArticleStore {
    async fn insert(&self, record: &ArticleRecord) -> StoreResult<()> {
        ensure_encodable_tags(record)?;
        sqlx::query(
            r#"
            INSERT INTO article_entry (id, title, period, author, word_count, tags)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT (id) DO UPDATE SET
                title = excluded.title,
                period = excluded.period,
                author = excluded.author,
                word_count = excluded.word_count,
                tags = excluded.tags
            "#,
        )
        .bind(record.id.as_str())
        .bind(record.title.as_str())
        .bind(record.period.name())
        .bind(record.author.as_str())
        .bind(i64::from(record.word_count))
        .bind(record.encoded_tags())
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::database("記事の挿入", e))?;

        Ok(())
    }

    async fn delete(&self, record: &ArticleRecord) -> StoreResult<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM article_entry
            WHERE id = ? AND title = ? AND period = ? AND author = ?
                AND word_count = ? AND tags = ?
            "#,
        )
        .bind(record.id.as_str())
        .bind(record.title.as_str())
        .bind(record.period.name())
        .bind(record.author.as_str())
        .bind(i64::from(record.word_count))
        .bind(record.encoded_tags())
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::database("記事の削除", e))?;

        Ok(result.rows_affected())
    }

    async fn delete_by_id(&self, id: &str) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM article_entry WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::database("IDによる記事の削除", e))?;

        Ok(result.rows_affected())
    }

    async fn update(&self, record: &ArticleRecord) -> StoreResult<u64> {
        ensure_encodable_tags(record)?;
        let result = sqlx::query(
            r#"
            UPDATE article_entry
            SET title = ?, period = ?, author = ?, word_count = ?, tags = ?
            WHERE id = ?
            "#,
        )
        .bind(record.title.as_str())
        .bind(record.period.name())
        .bind(record.author.as_str())
        .bind(i64::from(record.word_count))
        .bind(record.encoded_tags())
        .bind(record.id.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::database("記事の更新", e))?;

        Ok(result.rows_affected())
    }

    async fn delete_all(&self) -> StoreResult<()> {
        sqlx::query("DELETE FROM article_entry")
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::database("記事の全件削除", e))?;

        Ok(())
    }

    async fn get_by_id(&self, id: &str) -> StoreResult<Option<ArticleRecord>> {
        let row = sqlx::query_as::<_, ArticleRow>(&format!("{SELECT_ARTICLE_ENTRY} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::database("IDによる記事の取得", e))?;

        row.map(ArticleRecord::try_from).transpose()
    }

    async fn search(&self, filter: &ArticleFilter) -> StoreResult<Vec<ArticleRecord>> {
        // QueryBuilderベースで動的にクエリを構築
        let mut qb = QueryBuilder::<Sqlite>::new(SELECT_ARTICLE_ENTRY);

        let has_cond = filter.period.is_some() || filter.query.is_some();
        if has_cond {
            qb.push(" WHERE ");
            let mut separated = qb.separated(" AND ");

            if let Some(period) = filter.period {
                separated
                    .push("period = ")
                    .push_bind_unseparated(period.name());
            }
            if let Some(ref query) = filter.query {
                // LIKEはASCIIの大文字小文字を区別しないためinstrを使う
                separated
                    .push("(instr(title, ")
                    .push_bind_unseparated(query.clone())
                    .push_unseparated(") > 0 OR instr(author, ")
                    .push_bind_unseparated(query.clone())
                    .push_unseparated(") > 0 OR instr(tags, ")
                    .push_bind_unseparated(query.clone())
                    .push_unseparated(") > 0)");
            }
        }

        qb.push(" ORDER BY rowid");

        let rows = qb
            .build_query_as::<ArticleRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::database("記事の検索", e))?;

        let records = into_records(rows)?;
        tracing::debug!(?filter, count = records.len(), "記事を検索しました");
        Ok(records)
    }

    async fn count(&self) -> StoreResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM article_entry")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StoreError::database("記事件数の取得", e))?;

        Ok(count.max(0) as u64)
    }
}
