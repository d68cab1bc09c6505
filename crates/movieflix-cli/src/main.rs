use clap::{ArgAction, Parser, Subcommand};
use commands::catalog::{self, ListKind};
use commands::context::App;
use commands::{clear, config, library, theme};
use movieflix_models::{MovieId, Theme};
use std::path::PathBuf;
use tracing::debug;

mod commands;
mod format;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "movieflix")]
#[command(about = "MovieFlix - browse movies, watch trailers and keep a watchlist from your terminal")]
#[command(version)]
struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Keep preferences in memory for this run only
    #[arg(long, global = true)]
    ephemeral: bool,

    /// Also write logs to this file (rotated daily)
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse curated movie lists
    Browse {
        #[arg(value_enum, default_value = "trending")]
        list: ListKind,

        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Search movies by title
    Search {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// List movie genres and their ids
    Genres,
    /// Movies in a genre (see `genres` for ids)
    Discover {
        genre_id: u32,

        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Details, cast and recommendations for a movie
    Show { id: MovieId },
    /// Find a trailer for a movie
    #[command(long_about = "Find a trailer for a movie. Trailers listed by TMDB are preferred; otherwise YouTube is searched when a YouTube API key is configured.")]
    Trailer { id: MovieId },
    /// Manage your watchlist
    Watchlist {
        #[command(subcommand)]
        cmd: Option<WatchlistCommands>,
    },
    /// Rate a movie from 1 to 5 stars
    Rate {
        id: MovieId,

        #[arg(allow_negative_numbers = true)]
        stars: i64,
    },
    /// Show your rating for a movie, or all ratings
    Rating {
        id: Option<MovieId>,

        /// Remove the rating instead
        #[arg(long, requires = "id")]
        remove: bool,
    },
    /// Track how far you got into a movie
    Progress {
        #[command(subcommand)]
        cmd: Option<ProgressCommands>,
    },
    /// Light or dark theme
    Theme {
        #[command(subcommand)]
        cmd: Option<ThemeCommands>,
    },
    /// Clear stored preferences or credentials
    #[command(long_about = "Clear stored preferences (watchlist, ratings, continue watching, theme) with --store, stored API keys with --credentials, or both with --all.")]
    Clear {
        /// Clear preferences and credentials
        #[arg(long, action = ArgAction::SetTrue, conflicts_with_all = ["store", "credentials"])]
        all: bool,

        /// Clear watchlist, ratings, continue watching and theme
        #[arg(long, action = ArgAction::SetTrue)]
        store: bool,

        /// Clear stored API keys
        #[arg(long, action = ArgAction::SetTrue)]
        credentials: bool,

        /// Don't ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// View or change configuration and API keys
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
pub enum WatchlistCommands {
    /// Show the watchlist (default)
    List,
    /// Add a movie by id
    Add { id: MovieId },
    /// Remove a movie by id
    Remove { id: MovieId },
    /// Re-fetch saved movies to pick up catalog changes
    Refresh,
    /// Remove every movie from the watchlist
    Clear,
}

#[derive(Subcommand)]
pub enum ProgressCommands {
    /// Movies in progress (default)
    List,
    /// Record progress as a fraction between 0 and 1
    Set { id: MovieId, progress: f64 },
    /// Forget progress for a movie
    Remove { id: MovieId },
}

#[derive(Subcommand)]
pub enum ThemeCommands {
    /// Show the theme in effect (default)
    Show,
    /// Save a theme preference
    Set { theme: Theme },
    /// Switch between light and dark
    Toggle,
    /// Forget the saved preference and follow the system
    Reset,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration (masks API keys)
    Show {
        /// Show API keys unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },
    /// Set the TMDB API key and language
    Tmdb {
        /// TMDB API key (prompted for if omitted)
        #[arg(long)]
        api_key: Option<String>,

        /// Response language, e.g. en-US
        #[arg(long)]
        language: Option<String>,
    },
    /// Set the YouTube API key or toggle trailer search
    Youtube {
        /// YouTube Data API key (prompted for if omitted)
        #[arg(long)]
        api_key: Option<String>,

        #[arg(long, conflicts_with = "disable")]
        enable: bool,

        #[arg(long)]
        disable: bool,
    },
    /// Set where and under which key prefix preferences are stored
    Storage {
        #[arg(long)]
        key_prefix: Option<String>,

        #[arg(long)]
        dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    logging::init_logging(cli.verbose, cli.quiet, cli.log_file.as_deref())
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let mut output = output::Output::new(cli.output, cli.quiet);

    // Commands that must work even before the store or config is usable
    let command = match cli.command {
        Commands::Config { cmd } => {
            return config::run_config(cmd.unwrap_or(ConfigCommands::Show { full: false }), &output);
        }
        Commands::Clear {
            all,
            store,
            credentials,
            yes,
        } => return clear::run_clear(all, store, credentials, yes, cli.ephemeral, &output),
        other => other,
    };

    let mut app = App::load(cli.ephemeral)?;
    output.set_theme(app.store.theme().get());

    let result = match command {
        Commands::Browse { list, page } => catalog::run_browse(&mut app, list, page, &output).await,
        Commands::Search { query, page } => {
            catalog::run_search(&mut app, &query.join(" "), page, &output).await
        }
        Commands::Genres => catalog::run_genres(&app, &output).await,
        Commands::Discover { genre_id, page } => {
            catalog::run_discover(&mut app, genre_id, page, &output).await
        }
        Commands::Show { id } => catalog::run_show(&mut app, id, &output).await,
        Commands::Trailer { id } => catalog::run_trailer(&app, id, &output).await,
        Commands::Watchlist { cmd } => {
            library::run_watchlist(&mut app, cmd.unwrap_or(WatchlistCommands::List), &output).await
        }
        Commands::Rate { id, stars } => library::run_rate(&mut app, id, stars, &output),
        Commands::Rating { id, remove } => library::run_rating(&mut app, id, remove, &output),
        Commands::Progress { cmd } => {
            library::run_progress(&mut app, cmd.unwrap_or(ProgressCommands::List), &output).await
        }
        Commands::Theme { cmd } => {
            theme::run_theme(&mut app, cmd.unwrap_or(ThemeCommands::Show), &mut output)
        }
        Commands::Config { .. } | Commands::Clear { .. } => Ok(()),
    };

    debug!(changes = app.changes(), "Preference changes saved this run");
    result
}
