pub mod aggregate;
pub mod error;
pub mod format;
pub mod images;
pub mod tmdb;
pub mod traits;

pub use aggregate::{home_sections, movie_page, HomeSections, MoviePage};
pub use error::CatalogError;
pub use format::{format_rating, format_release_date, format_runtime};
pub use images::{trailer_url, BackdropSize, ImageUrls, PosterSize, ProfileSize};
pub use tmdb::TmdbClient;
pub use traits::{CatalogSource, TimeWindow};
