pub mod browse;
pub mod config;
pub mod context;
pub mod progress;
pub mod prompts;
pub mod tables;
pub mod watchlist;
