use async_trait::async_trait;
use epicscreen_models::{Genre, Movie, MovieCredits, MovieDetails, Page, Review};
use std::fmt;
use std::str::FromStr;
use crate::error::CatalogError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeWindow {
    Day,
    #[default]
    Week,
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeWindow::Day => write!(f, "day"),
            TimeWindow::Week => write!(f, "week"),
        }
    }
}

impl FromStr for TimeWindow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "day" => Ok(TimeWindow::Day),
            "week" => Ok(TimeWindow::Week),
            _ => Err(format!("Invalid time window: {}. Use 'day' or 'week'", s)),
        }
    }
}

/// Read-only access to a remote movie catalog
#[async_trait]
pub trait CatalogSource: Send + Sync {
    fn source_name(&self) -> &str;

    async fn trending(&self, window: TimeWindow) -> Result<Page<Movie>, CatalogError>;
    async fn popular(&self, page: u32) -> Result<Page<Movie>, CatalogError>;
    async fn top_rated(&self, page: u32) -> Result<Page<Movie>, CatalogError>;
    async fn upcoming(&self, page: u32) -> Result<Page<Movie>, CatalogError>;
    async fn search(&self, query: &str, page: u32) -> Result<Page<Movie>, CatalogError>;

    /// Details with trailers and other videos attached
    async fn details(&self, movie_id: u64) -> Result<MovieDetails, CatalogError>;
    async fn genres(&self) -> Result<Vec<Genre>, CatalogError>;
    async fn credits(&self, movie_id: u64) -> Result<MovieCredits, CatalogError>;
    async fn reviews(&self, movie_id: u64, page: u32) -> Result<Page<Review>, CatalogError>;
    async fn similar(&self, movie_id: u64, page: u32) -> Result<Page<Movie>, CatalogError>;
}
