//! 型定義モジュール
//!
//! アプリケーション全体で使用される共通的な型定義を管理します。
//! - エラー型: ドメイン・ストア・カタログ・設定・インフラ
//! - 更新系操作の結果型

pub mod config;
pub mod error;
pub mod infra;

// 便利な再エクスポート
pub use config::{ConfigError, ConfigResult};
pub use error::{CatalogError, CatalogResult, DomainError, StoreError, StoreResult};
pub use infra::{InfraError, InfraResult, MutationOutcome, SeedResult};
