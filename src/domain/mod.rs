pub mod article;
pub mod period;
pub mod settings;

pub use period::HistoricalPeriod;
