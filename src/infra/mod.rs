pub mod db;
pub mod loader;

// 便利のため、よく使用される関数を再エクスポート
pub use db::setup_database;
pub use loader::{load_yaml_from_file, load_yaml_from_str};
