use super::context::AppContext;
use super::progress::Spinner;
use super::{prompts, tables};
use crate::output::Output;
use crate::WatchlistCommands;
use color_eyre::Result;
use epicscreen_catalog::CatalogSource;
use epicscreen_core::WatchlistStore;
use epicscreen_models::{Movie, WatchlistItem, WatchlistSort};
use serde_json::json;
use std::process::ExitCode;
use std::sync::Arc;

pub async fn run_watchlist(cmd: WatchlistCommands, output: &Output) -> Result<ExitCode> {
    let ctx = AppContext::load()?;
    let subscription = announce_changes(&ctx.store, *output);

    let result = match cmd {
        WatchlistCommands::List { sort } => list(&ctx, sort, output).map(|_| ExitCode::SUCCESS),
        WatchlistCommands::Add { id } => add(&ctx, id, output).await.map(|_| ExitCode::SUCCESS),
        WatchlistCommands::Remove { id } => remove(&ctx, id, output).map(|_| ExitCode::SUCCESS),
        WatchlistCommands::Toggle { id } => toggle(&ctx, id, output).await.map(|_| ExitCode::SUCCESS),
        WatchlistCommands::Contains { id } => Ok(contains(&ctx, id, output)),
        WatchlistCommands::Clear { yes } => clear(&ctx, yes, output).map(|_| ExitCode::SUCCESS),
    };

    ctx.store.unsubscribe(subscription);
    result
}

/// Report every change the store broadcasts, the way an open watchlist view re-renders
fn announce_changes(store: &Arc<WatchlistStore>, output: Output) -> epicscreen_core::SubscriptionId {
    let weak = Arc::downgrade(store);
    store.subscribe(move || {
        if let Some(store) = weak.upgrade() {
            let count = store.len();
            tracing::debug!("Watchlist changed, now {} movies", count);
            output.info(format!("Watchlist updated ({} {})", count, movies_word(count)));
        }
    })
}

fn movies_word(count: usize) -> &'static str {
    if count == 1 {
        "movie"
    } else {
        "movies"
    }
}

fn list(ctx: &AppContext, sort: WatchlistSort, output: &Output) -> Result<()> {
    let items = ctx.store.sorted(sort);

    output.json(&json!({
        "sort": sort.to_string(),
        "count": items.len(),
        "items": &items,
    }));

    if items.is_empty() {
        output.info("Your watchlist is empty. Add movies with 'epicscreen watchlist add <id>'.");
        return Ok(());
    }

    output.block(format!("My Watchlist: {} {} ({})", items.len(), movies_word(items.len()), sort.label()));
    output.block(tables::watchlist_table(&items, &ctx.images()).to_string());
    Ok(())
}

async fn fetch_movie(ctx: &AppContext, id: u64, output: &Output) -> Result<Movie> {
    let catalog = ctx.catalog()?;
    let spinner = Spinner::start(format!("Fetching movie {}...", id), output.is_human());
    let details = catalog.details(id).await;
    spinner.finish();

    match details {
        Ok(details) => Ok(details.movie),
        Err(e) if e.is_not_found() => Err(color_eyre::eyre::eyre!("No movie with id {} in the catalog", id)),
        Err(e) => Err(color_eyre::eyre::eyre!("Failed to fetch movie {}: {}", id, e)),
    }
}

async fn add(ctx: &AppContext, id: u64, output: &Output) -> Result<()> {
    if ctx.store.contains(id) {
        output.info(format!("Movie {} is already in your watchlist", id));
        return Ok(());
    }

    let movie = fetch_movie(ctx, id, output).await?;
    ctx.store.add(&movie);

    if ctx.store.contains(id) {
        output.success(format!("Added \"{}\" to your watchlist", movie.title));
    } else {
        output.warn(format!("\"{}\" could not be saved; local storage is unavailable", movie.title));
    }
    Ok(())
}

fn remove(ctx: &AppContext, id: u64, output: &Output) -> Result<()> {
    let title = ctx.store.list().into_iter().find(|i| i.id == id).map(|i| i.title);
    let Some(title) = title else {
        output.info(format!("Movie {} is not in your watchlist", id));
        return Ok(());
    };

    ctx.store.remove(id);
    if ctx.store.contains(id) {
        output.warn(format!("\"{}\" could not be removed; local storage is unavailable", title));
    } else {
        output.success(format!("Removed \"{}\" from your watchlist", title));
    }
    Ok(())
}

async fn toggle(ctx: &AppContext, id: u64, output: &Output) -> Result<()> {
    // Removal only needs the id, so the catalog is consulted for adds alone
    let (movie, was_saved) = match ctx.store.list().into_iter().find(|i| i.id == id) {
        Some(saved) => (saved_movie(&saved), true),
        None => (fetch_movie(ctx, id, output).await?, false),
    };

    let saved = ctx.store.toggle(&movie);
    match (was_saved, saved) {
        (false, true) => output.success(format!("Added \"{}\" to your watchlist", movie.title)),
        (true, false) => output.success(format!("Removed \"{}\" from your watchlist", movie.title)),
        _ => output.warn(format!(
            "\"{}\" could not be updated; local storage is unavailable",
            movie.title
        )),
    }
    Ok(())
}

/// Rebuild the catalog record a saved entry was taken from
fn saved_movie(item: &WatchlistItem) -> Movie {
    Movie {
        id: item.id,
        title: item.title.clone(),
        poster_path: item.poster_path.clone(),
        release_date: item.release_date.clone(),
        vote_average: item.vote_average,
        ..Movie::default()
    }
}

/// Exit code 1 when the movie is not saved, for use in scripts
fn contains(ctx: &AppContext, id: u64, output: &Output) -> ExitCode {
    let saved = ctx.store.contains(id);
    output.json(&json!({ "id": id, "in_watchlist": saved }));

    if saved {
        output.block(format!("Movie {} is in your watchlist", id));
        ExitCode::SUCCESS
    } else {
        output.block(format!("Movie {} is not in your watchlist", id));
        ExitCode::FAILURE
    }
}

fn clear(ctx: &AppContext, yes: bool, output: &Output) -> Result<()> {
    let count = ctx.store.len();
    if count == 0 {
        output.info("Your watchlist is already empty");
        return Ok(());
    }

    if !yes {
        let prompt = format!(
            "Remove all {} {} from your watchlist? This cannot be undone.",
            count,
            movies_word(count)
        );
        if !prompts::prompt_yes_no(&prompt, false, output)? {
            output.info("Watchlist left unchanged");
            return Ok(());
        }
    }

    ctx.store.clear();
    if ctx.store.is_empty() {
        output.success(format!("Cleared {} {} from your watchlist", count, movies_word(count)));
    } else {
        output.warn("The watchlist could not be cleared; local storage is unavailable");
    }
    Ok(())
}
