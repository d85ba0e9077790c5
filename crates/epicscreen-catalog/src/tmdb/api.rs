use crate::error::CatalogError;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Longest slice of an error body kept in `CatalogError::Status`
const MAX_ERROR_BODY: usize = 200;

/// Create a reqwest Client identifying this application
pub fn create_tmdb_client() -> Client {
    Client::builder()
        .user_agent(concat!("epicscreen/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// `{base_url}{endpoint}?api_key=...&{params}`
pub fn build_url(
    base_url: &str,
    endpoint: &str,
    api_key: &str,
    params: &[(&str, String)],
) -> Result<Url, CatalogError> {
    let raw = format!("{}{}", base_url.trim_end_matches('/'), endpoint);
    let mut url = Url::parse(&raw).map_err(|e| CatalogError::InvalidUrl(format!("{}: {}", raw, e)))?;

    {
        let mut query = url.query_pairs_mut();
        query.append_pair("api_key", api_key);
        for (key, value) in params {
            query.append_pair(key, value);
        }
    }

    Ok(url)
}

pub async fn get_json<T>(client: &Client, url: Url, endpoint: &str) -> Result<T, CatalogError>
where
    T: DeserializeOwned,
{
    // The URL carries the API key, so only the endpoint is logged
    debug!("GET {}", endpoint);

    let response = client
        .get(url)
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|e| CatalogError::Http { endpoint: endpoint.to_string(), source: e })?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| CatalogError::Http { endpoint: endpoint.to_string(), source: e })?;

    if !status.is_success() {
        warn!("Catalog request {} failed with {}", endpoint, status);
        return Err(CatalogError::Status {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
            body: body.chars().take(MAX_ERROR_BODY).collect(),
        });
    }

    decode(endpoint, &body)
}

pub fn decode<T>(endpoint: &str, body: &str) -> Result<T, CatalogError>
where
    T: DeserializeOwned,
{
    serde_json::from_str(body).map_err(|e| CatalogError::Decode {
        endpoint: endpoint.to_string(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use epicscreen_models::{Movie, Page};

    #[test]
    fn test_build_url_adds_key_and_params() {
        let url = build_url(
            DEFAULT_BASE_URL,
            "/search/movie",
            "secret",
            &[("query", "blade runner".to_string()), ("page", "2".to_string())],
        )
        .unwrap();

        assert_eq!(url.path(), "/3/search/movie");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("api_key".to_string(), "secret".to_string()),
                ("query".to_string(), "blade runner".to_string()),
                ("page".to_string(), "2".to_string()),
            ]
        );
    }

    #[test]
    fn test_build_url_trailing_slash() {
        let url = build_url("http://localhost:8080/3/", "/movie/550", "k", &[]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/3/movie/550?api_key=k");
    }

    #[test]
    fn test_build_url_invalid_base() {
        let err = build_url("not a url", "/movie/1", "k", &[]).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidUrl(_)));
    }

    #[test]
    fn test_decode_page() {
        let body = r#"{
            "page": 1,
            "results": [{"id": 550, "title": "Fight Club", "vote_average": 8.4, "release_date": "1999-10-15"}],
            "total_pages": 500,
            "total_results": 10000
        }"#;
        let page: Page<Movie> = decode("/movie/popular", body).unwrap();

        assert_eq!(page.results.len(), 1);
        assert_eq!(page.results[0].title, "Fight Club");
        assert!(!page.is_last());
    }

    #[test]
    fn test_decode_error_names_endpoint() {
        let err = decode::<Page<Movie>>("/movie/popular", "<html>").unwrap_err();
        assert!(err.to_string().contains("/movie/popular"));
    }
}
