//! Multi-request views fetched concurrently.

use crate::error::CatalogError;
use crate::images::trailer_url;
use crate::traits::{CatalogSource, TimeWindow};
use epicscreen_models::{CastMember, Movie, MovieDetails, Review};
use tracing::info;

pub const TOP_CAST_LIMIT: usize = 12;
pub const REVIEW_LIMIT: usize = 6;
pub const SIMILAR_LIMIT: usize = 12;

/// The four listing rows on the home screen plus the featured title
#[derive(Debug, Clone)]
pub struct HomeSections {
    pub hero: Option<Movie>,
    pub trending: Vec<Movie>,
    pub popular: Vec<Movie>,
    pub top_rated: Vec<Movie>,
    pub upcoming: Vec<Movie>,
}

/// Everything shown for a single movie
#[derive(Debug, Clone)]
pub struct MoviePage {
    pub details: MovieDetails,
    pub cast: Vec<CastMember>,
    pub reviews: Vec<Review>,
    pub similar: Vec<Movie>,
    pub trailer_url: Option<String>,
}

/// Fails if any of the four listings fails
pub async fn home_sections<S>(source: &S) -> Result<HomeSections, CatalogError>
where
    S: CatalogSource + ?Sized,
{
    let (trending, popular, top_rated, upcoming) = futures::try_join!(
        source.trending(TimeWindow::Week),
        source.popular(1),
        source.top_rated(1),
        source.upcoming(1)
    )?;

    info!(
        "Loaded home sections from {}: {} trending, {} popular, {} top rated, {} upcoming",
        source.source_name(),
        trending.results.len(),
        popular.results.len(),
        top_rated.results.len(),
        upcoming.results.len()
    );

    Ok(HomeSections {
        hero: trending.results.first().cloned(),
        trending: trending.results,
        popular: popular.results,
        top_rated: top_rated.results,
        upcoming: upcoming.results,
    })
}

pub async fn movie_page<S>(source: &S, movie_id: u64) -> Result<MoviePage, CatalogError>
where
    S: CatalogSource + ?Sized,
{
    let (details, credits, reviews, similar) = futures::try_join!(
        source.details(movie_id),
        source.credits(movie_id),
        source.reviews(movie_id, 1),
        source.similar(movie_id, 1)
    )?;

    let trailer_url = trailer_url(details.videos());

    Ok(MoviePage {
        cast: credits.top_cast(TOP_CAST_LIMIT),
        reviews: reviews.truncated(REVIEW_LIMIT).results,
        similar: similar.truncated(SIMILAR_LIMIT).results,
        trailer_url,
        details,
    })
}
