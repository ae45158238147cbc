pub mod model;
pub mod repository;
pub mod seed;
pub mod service;

// 公開APIの再エクスポート

// model.rsから
pub use model::{
    decode_tags, encode_tags, find_unencodable_tag, generate_article_id, Article, ArticleRecord,
    ArticleView,
};

// repository.rsから
pub use repository::{ArticleFilter, ArticleStore, SqliteArticleStore};

// seed.rsから
pub use seed::{SeedArticle, SeedSource};

// service.rsから
pub use service::{ArticleCatalog, ArticleSnapshot, CatalogOptions, DeleteMode};
