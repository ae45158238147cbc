use super::model::{Article, ArticleRecord};
use super::repository::ArticleStore;
use super::seed::SeedSource;
use crate::domain::period::HistoricalPeriod;
use crate::types::{CatalogError, CatalogResult, MutationOutcome, SeedResult};
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// 記事一覧のスナップショット
pub type ArticleSnapshot = Arc<Vec<Article>>;

/// 記事削除時の一致条件
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DeleteMode {
    /// IDのみで一致させる
    #[default]
    ById,
    /// 全フィールドが一致する行のみ削除する。
    /// 読み込み後にフィールドが変わった記事は削除されない
    FullRecord,
}

impl FromStr for DeleteMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "id" => Ok(Self::ById),
            "full" => Ok(Self::FullRecord),
            other => Err(format!("idまたはfullを指定してください: {}", other)),
        }
    }
}

/// カタログの動作設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogOptions {
    /// 起動時に既存の記事を全件削除するか
    pub reset_on_startup: bool,
    pub delete_mode: DeleteMode,
    pub seed_source: SeedSource,
}

impl Default for CatalogOptions {
    fn default() -> Self {
        Self {
            reset_on_startup: true,
            delete_mode: DeleteMode::default(),
            seed_source: SeedSource::default(),
        }
    }
}

/// 記事カタログサービス
///
/// ストアへの全ての更新を仲介し、最新の記事一覧をwatchチャンネルで公開する。
/// 一覧は更新のたびに全件読み直して差し替える（差分更新はしない）。
/// ストアの障害はパニックにせず、操作名付きの`CatalogError`として返す。
pub struct ArticleCatalog {
    store: Arc<dyn ArticleStore>,
    options: CatalogOptions,
    articles: watch::Sender<ArticleSnapshot>,
}

impl ArticleCatalog {
    pub fn new(store: Arc<dyn ArticleStore>, options: CatalogOptions) -> Self {
        let (articles, _) = watch::channel(Arc::new(Vec::new()));
        Self {
            store,
            options,
            articles,
        }
    }

    /// 現在の記事一覧
    pub fn articles(&self) -> ArticleSnapshot {
        self.articles.borrow().clone()
    }

    /// 記事一覧の変更を購読する
    pub fn subscribe(&self) -> watch::Receiver<ArticleSnapshot> {
        self.articles.subscribe()
    }

    /// 起動時の初期化
    ///
    /// 1. 設定に応じて既存記事を全件削除
    /// 2. ストアが空なら初期記事を投入
    /// 3. 記事一覧を読み込む
    pub async fn initialize(&self) -> CatalogResult<SeedResult> {
        if self.options.reset_on_startup {
            self.store
                .delete_all()
                .await
                .map_err(|e| CatalogError::store("delete_all", e))?;
            tracing::info!("起動時のリセットで記事を全件削除しました");
        }

        let seed_result = self.seed_if_empty().await?;
        tracing::info!("{}", seed_result.display_with_domain("記事"));

        self.refresh().await?;
        Ok(seed_result)
    }

    /// 初期化をバックグラウンドで実行する（呼び出し側は待たない）
    pub fn spawn_initialize(self: &Arc<Self>) -> JoinHandle<()> {
        let catalog = Arc::clone(self);
        tokio::spawn(async move {
            if let Err(e) = catalog.initialize().await {
                tracing::error!(error = %e, "記事カタログの初期化に失敗しました");
            }
        })
    }

    async fn seed_if_empty(&self) -> CatalogResult<SeedResult> {
        let existing = self
            .store
            .count()
            .await
            .map_err(|e| CatalogError::store("count", e))?;
        if existing > 0 {
            return Ok(SeedResult::new(0, existing as usize));
        }

        let seeds = self.options.seed_source.load()?;
        let mut inserted = 0;
        for article in &seeds {
            self.store
                .insert(&article.to_record())
                .await
                .map_err(|e| CatalogError::store("seed", e))?;
            inserted += 1;
        }
        Ok(SeedResult::new(inserted, 0))
    }

    /// ストアから全件を読み直し、記事一覧を差し替える
    /// 失敗した場合、一覧は以前の内容のまま残る
    pub async fn refresh(&self) -> CatalogResult<usize> {
        let records = self.store.get_all().await.map_err(|e| {
            tracing::warn!(error = %e, "記事一覧の再読み込みに失敗しました");
            CatalogError::store("refresh", e)
        })?;

        let articles: Vec<Article> = records.into_iter().map(Article::from).collect();
        let count = articles.len();
        self.articles.send_replace(Arc::new(articles));
        tracing::debug!(count, "記事一覧を更新しました");
        Ok(count)
    }

    // 更新成功後の再読み込み。失敗しても更新自体は成功として扱う
    async fn refresh_after(&self, operation: &str) {
        if let Err(e) = self.refresh().await {
            tracing::warn!(operation, error = %e, "更新後の記事一覧の再読み込みに失敗しました");
        }
    }

    /// 記事を追加する（同じIDがあれば置き換え）
    pub async fn add(&self, article: &Article) -> CatalogResult<MutationOutcome> {
        let record = article.to_record();
        self.store.insert(&record).await.map_err(|e| {
            tracing::warn!(title = %article.title, error = %e, "記事の追加に失敗しました");
            CatalogError::store("add", e)
        })?;

        self.refresh_after("add").await;
        Ok(MutationOutcome::new(1))
    }

    /// 記事を削除する。一致条件は`DeleteMode`に従う
    pub async fn remove(&self, article: &Article) -> CatalogResult<MutationOutcome> {
        let record = article.to_record();
        let result = match self.options.delete_mode {
            DeleteMode::ById => self.store.delete_by_id(&record.id).await,
            DeleteMode::FullRecord => self.store.delete(&record).await,
        };
        let rows_deleted = result.map_err(|e| {
            tracing::warn!(title = %article.title, error = %e, "記事の削除に失敗しました");
            CatalogError::store("remove", e)
        })?;
        tracing::debug!(id = %record.id, rows_deleted, "記事を削除しました");

        self.refresh_after("remove").await;
        Ok(MutationOutcome::new(rows_deleted))
    }

    /// IDが一致する記事を置き換える
    /// 該当IDが無い場合も成功として扱い、影響行数0を返す
    pub async fn update(&self, article: &Article) -> CatalogResult<MutationOutcome> {
        let record = article.to_record();
        let rows_updated = self.store.update(&record).await.map_err(|e| {
            tracing::warn!(id = %record.id, error = %e, "記事の更新に失敗しました");
            CatalogError::store("update", e)
        })?;
        if rows_updated == 0 {
            tracing::warn!(id = %record.id, "更新対象の記事が見つかりませんでした");
        }

        self.refresh_after("update").await;
        Ok(MutationOutcome::new(rows_updated))
    }

    /// 時代区分と検索文字列で記事を絞り込む
    ///
    /// - 両方指定: 時代区分かつ部分一致
    /// - 時代区分のみ（検索文字列が空白）: 時代区分で一致
    /// - 検索文字列のみ: 部分一致
    /// - どちらも無し: 全件
    pub async fn get_filtered(
        &self,
        period: Option<HistoricalPeriod>,
        query: &str,
    ) -> CatalogResult<Vec<Article>> {
        let has_query = !query.trim().is_empty();
        let result = match (period, has_query) {
            (Some(period), true) => self.store.get_filtered(period, query).await,
            (Some(period), false) => self.store.get_by_period(period).await,
            (None, true) => self.store.get_by_query(query).await,
            (None, false) => self.store.get_all().await,
        };

        let records = result.map_err(|e| {
            tracing::warn!(?period, query, error = %e, "記事の絞り込みに失敗しました");
            CatalogError::store("get_filtered", e)
        })?;
        Ok(records.into_iter().map(Article::from).collect())
    }

    /// IDで保存済みレコードを取得する
    pub async fn get_by_id(&self, id: &str) -> CatalogResult<Option<ArticleRecord>> {
        self.store
            .get_by_id(id)
            .await
            .map_err(|e| CatalogError::store("get_by_id", e))
    }
}
