pub mod config;
pub mod workflow;

pub use config::AppConfig;
pub use workflow::{execute_startup_workflow, StartupReport};
