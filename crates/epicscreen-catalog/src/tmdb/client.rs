use crate::error::CatalogError;
use crate::tmdb::api;
use crate::traits::{CatalogSource, TimeWindow};
use async_trait::async_trait;
use epicscreen_config::TmdbConfig;
use epicscreen_models::{Genre, GenreList, Movie, MovieCredits, MovieDetails, Page, Review};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Client for The Movie Database v3 API
#[derive(Clone)]
pub struct TmdbClient {
    client: Arc<Client>,
    api_key: String,
    base_url: String,
    language: Option<String>,
}

impl TmdbClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, CatalogError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(CatalogError::MissingApiKey);
        }

        Ok(Self {
            client: Arc::new(api::create_tmdb_client()),
            api_key,
            base_url: api::DEFAULT_BASE_URL.to_string(),
            language: None,
        })
    }

    /// `api_key` is the already-resolved key (config file or environment)
    pub fn from_config(config: &TmdbConfig, api_key: Option<String>) -> Result<Self, CatalogError> {
        let client = Self::new(api_key.unwrap_or_default())?.with_base_url(config.base_url.clone());
        Ok(if config.language.is_empty() {
            client
        } else {
            client.with_language(config.language.clone())
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get<T>(&self, endpoint: &str, mut params: Vec<(&str, String)>) -> Result<T, CatalogError>
    where
        T: DeserializeOwned,
    {
        if let Some(language) = &self.language {
            params.push(("language", language.clone()));
        }
        let url = api::build_url(&self.base_url, endpoint, &self.api_key, &params)?;
        api::get_json(&self.client, url, endpoint).await
    }
}

#[async_trait]
impl CatalogSource for TmdbClient {
    fn source_name(&self) -> &str {
        "tmdb"
    }

    async fn trending(&self, window: TimeWindow) -> Result<Page<Movie>, CatalogError> {
        self.get(&format!("/trending/movie/{}", window), Vec::new()).await
    }

    async fn popular(&self, page: u32) -> Result<Page<Movie>, CatalogError> {
        self.get("/movie/popular", vec![("page", page.to_string())]).await
    }

    async fn top_rated(&self, page: u32) -> Result<Page<Movie>, CatalogError> {
        self.get("/movie/top_rated", vec![("page", page.to_string())]).await
    }

    async fn upcoming(&self, page: u32) -> Result<Page<Movie>, CatalogError> {
        self.get("/movie/upcoming", vec![("page", page.to_string())]).await
    }

    async fn search(&self, query: &str, page: u32) -> Result<Page<Movie>, CatalogError> {
        self.get(
            "/search/movie",
            vec![("query", query.to_string()), ("page", page.to_string())],
        )
        .await
    }

    async fn details(&self, movie_id: u64) -> Result<MovieDetails, CatalogError> {
        self.get(
            &format!("/movie/{}", movie_id),
            vec![("append_to_response", "videos".to_string())],
        )
        .await
    }

    async fn genres(&self) -> Result<Vec<Genre>, CatalogError> {
        let list: GenreList = self.get("/genre/movie/list", Vec::new()).await?;
        Ok(list.genres)
    }

    async fn credits(&self, movie_id: u64) -> Result<MovieCredits, CatalogError> {
        self.get(&format!("/movie/{}/credits", movie_id), Vec::new()).await
    }

    async fn reviews(&self, movie_id: u64, page: u32) -> Result<Page<Review>, CatalogError> {
        self.get(&format!("/movie/{}/reviews", movie_id), vec![("page", page.to_string())]).await
    }

    async fn similar(&self, movie_id: u64, page: u32) -> Result<Page<Movie>, CatalogError> {
        self.get(&format!("/movie/{}/similar", movie_id), vec![("page", page.to_string())]).await
    }
}
