use super::context::AppContext;
use super::progress::Spinner;
use super::tables;
use crate::output::Output;
use crate::Category;
use color_eyre::Result;
use epicscreen_catalog::{home_sections, movie_page, CatalogSource, TimeWindow};
use epicscreen_models::{Movie, Page};
use owo_colors::OwoColorize;
use serde_json::json;

fn section(output: &Output, ctx: &AppContext, title: &str, movies: &[Movie]) {
    output.block(format!("\n{}", title.bright_cyan().bold()));
    if movies.is_empty() {
        output.block("  Nothing to show".bright_black().to_string());
    } else {
        output.block(tables::movie_table(movies, &ctx.store).to_string());
    }
}

pub async fn run_home(output: &Output) -> Result<()> {
    let ctx = AppContext::load()?;
    let catalog = ctx.catalog()?;

    let spinner = Spinner::start("Loading movies...", output.is_human());
    let sections = home_sections(&catalog).await;
    spinner.finish();
    let sections = sections.map_err(|e| color_eyre::eyre::eyre!("Failed to load movies: {}", e))?;

    output.json(&json!({
        "hero": &sections.hero,
        "trending": &sections.trending,
        "popular": &sections.popular,
        "top_rated": &sections.top_rated,
        "upcoming": &sections.upcoming,
    }));

    if let Some(hero) = &sections.hero {
        output.block(format!(
            "{} {} ({})\n{}",
            "Featured:".bright_white().bold(),
            hero.title.bright_cyan(),
            hero.release_year().map(|y| y.to_string()).unwrap_or_else(|| "TBA".to_string()),
            hero.overview
        ));
    }
    section(output, &ctx, "Trending This Week", &sections.trending);
    section(output, &ctx, "Popular Movies", &sections.popular);
    section(output, &ctx, "Top Rated", &sections.top_rated);
    section(output, &ctx, "Coming Soon", &sections.upcoming);
    Ok(())
}

pub async fn run_browse(category: Category, page: u32, window: TimeWindow, output: &Output) -> Result<()> {
    let ctx = AppContext::load()?;
    let catalog = ctx.catalog()?;

    let (title, result) = {
        let spinner = Spinner::start("Loading movies...", output.is_human());
        let fetched = match category {
            Category::Trending => ("Trending", catalog.trending(window).await),
            Category::Popular => ("Popular Movies", catalog.popular(page).await),
            Category::TopRated => ("Top Rated", catalog.top_rated(page).await),
            Category::Upcoming => ("Coming Soon", catalog.upcoming(page).await),
        };
        spinner.finish();
        fetched
    };
    let listing = result.map_err(|e| color_eyre::eyre::eyre!("Failed to load {}: {}", title, e))?;

    show_page(output, &ctx, title, &listing);
    Ok(())
}

pub async fn run_search(query: &str, page: u32, output: &Output) -> Result<()> {
    let query = query.trim();
    if query.is_empty() {
        return Err(color_eyre::eyre::eyre!("Search query cannot be empty"));
    }

    let ctx = AppContext::load()?;
    let catalog = ctx.catalog()?;

    let spinner = Spinner::start(format!("Searching for \"{}\"...", query), output.is_human());
    let result = catalog.search(query, page).await;
    spinner.finish();
    let listing = result.map_err(|e| color_eyre::eyre::eyre!("Search failed: {}", e))?;

    if listing.results.is_empty() {
        output.json(&json!({ "query": query, "results": [] }));
        output.info(format!("No movies found for \"{}\"", query));
        return Ok(());
    }
    show_page(output, &ctx, &format!("Results for \"{}\"", query), &listing);
    Ok(())
}

fn show_page(output: &Output, ctx: &AppContext, title: &str, listing: &Page<Movie>) {
    output.json(&json!({
        "title": title,
        "page": listing.page,
        "total_pages": listing.total_pages,
        "total_results": listing.total_results,
        "results": &listing.results,
    }));

    section(output, ctx, title, &listing.results);
    output.block(
        format!("Page {} of {} ({} movies)", listing.page, listing.total_pages, listing.total_results)
            .bright_black()
            .to_string(),
    );
}

pub async fn run_movie(id: u64, output: &Output) -> Result<()> {
    let ctx = AppContext::load()?;
    let catalog = ctx.catalog()?;

    let spinner = Spinner::start(format!("Loading movie {}...", id), output.is_human());
    let page = movie_page(&catalog, id).await;
    spinner.finish();
    let page = page.map_err(|e| {
        if e.is_not_found() {
            color_eyre::eyre::eyre!("No movie with id {} in the catalog", id)
        } else {
            color_eyre::eyre::eyre!("Failed to load movie {}: {}", id, e)
        }
    })?;

    let in_watchlist = ctx.store.contains(id);
    output.json(&json!({
        "details": &page.details,
        "cast": &page.cast,
        "reviews": &page.reviews,
        "similar": &page.similar,
        "trailer_url": &page.trailer_url,
        "in_watchlist": in_watchlist,
    }));

    let images = ctx.images();
    output.block(tables::details_table(&page, in_watchlist, &images).to_string());
    if !page.cast.is_empty() {
        output.block(format!("\n{}", "Cast".bright_cyan().bold()));
        output.block(tables::cast_table(&page.cast).to_string());
    }
    if !page.reviews.is_empty() {
        output.block(format!("\n{}", "Reviews".bright_cyan().bold()));
        output.block(tables::reviews_table(&page.reviews).to_string());
    }
    section(output, &ctx, "Similar Movies", &page.similar);
    Ok(())
}
