pub mod credits;
pub mod movie;
pub mod page;
pub mod review;
pub mod sort;
pub mod watchlist;

pub use credits::{CastMember, CrewMember, MovieCredits};
pub use movie::{Genre, GenreList, Movie, MovieDetails, ProductionCompany, ProductionCountry, SpokenLanguage, Video, VideoList};
pub use page::Page;
pub use review::{AuthorDetails, Review};
pub use sort::WatchlistSort;
pub use watchlist::WatchlistItem;
