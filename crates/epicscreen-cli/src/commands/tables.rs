use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Attribute, Cell, Color, Table};
use epicscreen_catalog::{format_rating, format_release_date, format_runtime, ImageUrls, MoviePage, PosterSize};
use epicscreen_core::WatchlistStore;
use epicscreen_models::{CastMember, Movie, Review, WatchlistItem};

const REVIEW_EXCERPT_CHARS: usize = 160;

fn styled(mut table: Table) -> Table {
    table.load_preset(UTF8_FULL);
    table.apply_modifier(UTF8_ROUND_CORNERS);
    table
}

fn header(cells: &[&str]) -> Vec<Cell> {
    cells
        .iter()
        .map(|c| Cell::new(c).add_attribute(Attribute::Bold))
        .collect()
}

fn year(release_date: &str) -> String {
    release_date.get(..4).unwrap_or("-").to_string()
}

/// Catalog listing; a heart marks titles already on the watchlist
pub fn movie_table(movies: &[Movie], store: &WatchlistStore) -> Table {
    let saved: Vec<u64> = store.list().iter().map(|i| i.id).collect();

    let mut table = Table::new();
    table.set_header(header(&["", "ID", "Title", "Year", "Rating"]));
    for movie in movies {
        let mark = if saved.contains(&movie.id) {
            Cell::new("♥").fg(Color::Red)
        } else {
            Cell::new("")
        };
        table.add_row(vec![
            mark,
            Cell::new(movie.id),
            Cell::new(&movie.title),
            Cell::new(year(&movie.release_date)),
            Cell::new(format_rating(movie.vote_average)),
        ]);
    }
    styled(table)
}

pub fn watchlist_table(items: &[WatchlistItem], images: &ImageUrls) -> Table {
    let mut table = Table::new();
    table.set_header(header(&["ID", "Title", "Released", "Rating", "Added", "Poster"]));
    for item in items {
        table.add_row(vec![
            Cell::new(item.id),
            Cell::new(&item.title),
            Cell::new(if item.release_date.is_empty() {
                "TBA".to_string()
            } else {
                format_release_date(&item.release_date)
            }),
            Cell::new(format_rating(item.vote_average)),
            Cell::new(item.added_at.format("%Y-%m-%d %H:%M").to_string()),
            Cell::new(images.poster(item.poster_path.as_deref(), PosterSize::W200)),
        ]);
    }
    styled(table)
}

pub fn details_table(page: &MoviePage, in_watchlist: bool, images: &ImageUrls) -> Table {
    let details = &page.details;
    let movie = details.as_movie();

    let mut table = Table::new();
    table.set_header(vec![
        Cell::new(&movie.title).fg(Color::Cyan).add_attribute(Attribute::Bold),
        Cell::new(if in_watchlist { "♥ In Watchlist" } else { "+ Add to Watchlist" }),
    ]);

    if let Some(tagline) = details.tagline.as_deref().filter(|t| !t.is_empty()) {
        table.add_row(vec![Cell::new("Tagline"), Cell::new(tagline)]);
    }
    table.add_row(vec![Cell::new("Released"), Cell::new(format_release_date(&movie.release_date))]);
    if let Some(runtime) = details.runtime.filter(|r| *r > 0) {
        table.add_row(vec![Cell::new("Runtime"), Cell::new(format_runtime(runtime))]);
    }
    table.add_row(vec![
        Cell::new("Rating"),
        Cell::new(format!("{} ({} votes)", format_rating(movie.vote_average), movie.vote_count)),
    ]);
    if !details.genres.is_empty() {
        let genres: Vec<&str> = details.genres.iter().map(|g| g.name.as_str()).collect();
        table.add_row(vec![Cell::new("Genres"), Cell::new(genres.join(", "))]);
    }
    table.add_row(vec![Cell::new("Overview"), Cell::new(&movie.overview)]);
    table.add_row(vec![
        Cell::new("Poster"),
        Cell::new(images.poster(movie.poster_path.as_deref(), PosterSize::default())),
    ]);
    if let Some(trailer) = &page.trailer_url {
        table.add_row(vec![Cell::new("Trailer"), Cell::new(trailer)]);
    }
    styled(table)
}

pub fn cast_table(cast: &[CastMember]) -> Table {
    let mut table = Table::new();
    table.set_header(header(&["Actor", "Character"]));
    for member in cast {
        table.add_row(vec![Cell::new(&member.name), Cell::new(&member.character)]);
    }
    styled(table)
}

pub fn reviews_table(reviews: &[Review]) -> Table {
    let mut table = Table::new();
    table.set_header(header(&["Author", "Rating", "Review"]));
    for review in reviews {
        let rating = review
            .author_details
            .rating
            .map(format_rating)
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            Cell::new(&review.author),
            Cell::new(rating),
            Cell::new(excerpt(&review.content, REVIEW_EXCERPT_CHARS)),
        ]);
    }
    styled(table)
}

fn excerpt(text: &str, max_chars: usize) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= max_chars {
        return flat;
    }
    let mut cut: String = flat.chars().take(max_chars).collect();
    cut.push('…');
    cut
}
