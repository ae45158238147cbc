//! ウクライナ史学習アプリのデータ層
//!
//! - `domain`: 時代区分・記事・設定のドメインロジック
//! - `infra`: SQLite接続とファイル読み込み
//! - `app`: 実行時設定と起動ワークフロー
//! - `types`: エラー型と操作結果型

pub mod app;
pub mod domain;
pub mod infra;
pub mod types;
