use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use commands::{browse, config, watchlist};
use epicscreen_catalog::TimeWindow;
use epicscreen_models::WatchlistSort;
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "epicscreen")]
#[command(about = "EpicScreen - Discover movies and keep a watchlist")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Write logs to a daily-rotated file instead of stderr
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Category {
    Trending,
    Popular,
    TopRated,
    Upcoming,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage your saved movies
    #[command(long_about = "Add, remove and list the movies saved on this device. The watchlist is stored locally and never leaves the machine.")]
    Watchlist {
        #[command(subcommand)]
        cmd: WatchlistCommands,
    },
    /// Show trending, popular, top rated and upcoming movies at once
    Home,
    /// Browse one catalog listing
    Browse {
        /// Which listing to show
        #[arg(value_enum, default_value = "popular")]
        category: Category,

        /// Page number
        #[arg(long, default_value_t = 1)]
        page: u32,

        /// Time window for trending movies (day or week)
        #[arg(long, default_value = "week")]
        window: TimeWindow,
    },
    /// Search movies by title
    Search {
        query: String,

        /// Page number
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Show details, cast, reviews and similar titles for one movie
    Movie {
        /// TMDB movie id
        id: u64,
    },
    /// View or create the configuration file
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
pub enum WatchlistCommands {
    /// List saved movies
    List {
        /// Sort order: added, title, rating or release
        #[arg(long, default_value = "added")]
        sort: WatchlistSort,
    },
    /// Save a movie (details are fetched from the catalog)
    Add { id: u64 },
    /// Remove a saved movie
    Remove { id: u64 },
    /// Save the movie if it is not saved yet, otherwise remove it
    Toggle { id: u64 },
    /// Exit successfully if the movie is saved
    Contains { id: u64 },
    /// Remove every saved movie
    Clear {
        /// Do not ask for confirmation
        #[arg(long, short = 'y', action = ArgAction::SetTrue)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the current configuration (the API key is masked)
    Show {
        /// Show the API key unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },
    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long, action = ArgAction::SetTrue)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<ExitCode> {
    color_eyre::install()?;

    let cli = Cli::parse();

    logging::init_logging(cli.verbose, cli.quiet, cli.log_file.as_deref())
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Watchlist { cmd } => return watchlist::run_watchlist(cmd, &output).await,
        Commands::Home => browse::run_home(&output).await?,
        Commands::Browse { category, page, window } => browse::run_browse(category, page, window, &output).await?,
        Commands::Search { query, page } => browse::run_search(&query, page, &output).await?,
        Commands::Movie { id } => browse::run_movie(id, &output).await?,
        Commands::Config { cmd } => {
            let cmd = cmd.unwrap_or(ConfigCommands::Show { full: false });
            config::run_config(cmd, &output)?
        }
    }

    Ok(ExitCode::SUCCESS)
}
