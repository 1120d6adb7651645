use clap::{ArgAction, Parser, Subcommand};
use commands::{account, browse, config, mock, notifications, watchlist};
use context::{AppContext, SourceKind};
use std::path::PathBuf;

mod commands;
mod context;
mod logging;
mod output;
mod render;
mod ui;

#[derive(Parser)]
#[command(name = "streamsavvy")]
#[command(about = "StreamSavvy - Browse what's trending, top rated and coming soon")]
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

    /// Path to config.toml (defaults to the platform config directory)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write logs to a daily-rotated file instead of stderr
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Catalog backend for browsing commands
    #[arg(long, global = true, default_value = "tmdb", value_enum)]
    source: SourceKind,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the home page: featured title and all sections
    #[command(long_about = "Render the featured title and the six home sections. New trending titles are added to your notifications.")]
    Home,
    /// Search for movies or series
    Search {
        /// Search terms
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// Search series instead of movies
        #[arg(long, action = ArgAction::SetTrue)]
        tv: bool,
    },
    /// List available genres
    Genres {
        #[arg(long, action = ArgAction::SetTrue)]
        tv: bool,
    },
    /// Browse popular titles in a genre ('all' clears the filter)
    Genre {
        /// Genre id or 'all'
        genre: String,

        #[arg(long, action = ArgAction::SetTrue)]
        tv: bool,
    },
    /// Show full details for a title
    Details {
        id: u64,

        #[arg(long, action = ArgAction::SetTrue)]
        tv: bool,
    },
    /// Manage your watchlist
    Watchlist {
        #[command(subcommand)]
        cmd: WatchlistCommands,
    },
    /// Sign up, pay, sign in and out
    Account {
        #[command(subcommand)]
        cmd: AccountCommands,
    },
    /// Show notifications (opening them marks all as read)
    Notifications {
        /// Leave notifications unread
        #[arg(long, action = ArgAction::SetTrue)]
        keep_unread: bool,
    },
    /// Work with the local mock movie backend
    Mock {
        #[command(subcommand)]
        cmd: MockCommands,
    },
    /// Show or initialize configuration
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum WatchlistCommands {
    /// List saved titles
    List,
    /// Save a title by id
    Add {
        id: u64,

        #[arg(long, action = ArgAction::SetTrue)]
        tv: bool,
    },
    /// Remove a saved title
    Remove { id: u64 },
}

#[derive(Subcommand)]
pub enum AccountCommands {
    /// Create an account (prompts for anything not given)
    Signup {
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        email: Option<String>,
    },
    /// Complete the membership payment
    Pay,
    /// Sign in with email and password
    Signin {
        #[arg(long)]
        email: Option<String>,
    },
    /// Sign out
    Signout,
    /// Show account details and membership status
    Show,
}

#[derive(clap::Args)]
pub struct MovieArgs {
    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    /// Comma-separated genres
    #[arg(long)]
    pub genre: Option<String>,

    #[arg(long)]
    pub year: Option<i32>,

    #[arg(long)]
    pub rating: Option<f32>,

    #[arg(long)]
    pub poster_url: Option<String>,
}

#[derive(Subcommand)]
pub enum MockCommands {
    /// List movies
    List {
        /// Title substring
        #[arg(long)]
        search: Option<String>,

        /// Genre substring
        #[arg(long)]
        genre: Option<String>,

        /// Sort by rating, best first
        #[arg(long, action = ArgAction::SetTrue)]
        top_rated: bool,

        #[arg(long)]
        page: Option<u32>,

        #[arg(long, default_value = "20")]
        limit: u32,
    },
    /// Show one movie
    Get { id: u64 },
    /// Add a movie
    Add {
        #[command(flatten)]
        movie: MovieArgs,
    },
    /// Replace a movie
    Update {
        id: u64,

        #[command(flatten)]
        movie: MovieArgs,
    },
    /// Change selected fields of a movie
    Patch {
        id: u64,

        #[command(flatten)]
        movie: MovieArgs,
    },
    /// Delete a movie
    Delete { id: u64 },
    /// Build a database file from TMDB popular movies
    Seed {
        /// Output file
        #[arg(long, default_value = "db.json")]
        out: PathBuf,

        /// Number of popular pages to fetch
        #[arg(long, default_value = "1")]
        pages: u32,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration (API key masked)
    Show,
    /// Write a default config file if none exists
    Init {
        /// TMDB API key to store
        #[arg(long)]
        api_key: Option<String>,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    logging::init_logging(cli.verbose, cli.quiet, cli.log_file.as_deref())
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);
    let ctx = AppContext::load(cli.config, cli.source)?;

    let result = match cli.command {
        Commands::Home => browse::run_home(&ctx, &output).await,
        Commands::Search { query, tv } => browse::run_search(&ctx, &query.join(" "), tv, &output).await,
        Commands::Genres { tv } => browse::run_genres(&ctx, tv, &output).await,
        Commands::Genre { genre, tv } => browse::run_genre(&ctx, &genre, tv, &output).await,
        Commands::Details { id, tv } => browse::run_details(&ctx, id, tv, &output).await,
        Commands::Watchlist { cmd } => watchlist::run_watchlist(&ctx, cmd, &output).await,
        Commands::Account { cmd } => account::run_account(&ctx, cmd, &output),
        Commands::Notifications { keep_unread } => notifications::run_notifications(&ctx, keep_unread, &output),
        Commands::Mock { cmd } => mock::run_mock(&ctx, cmd, &output).await,
        Commands::Config { cmd } => config::run_config(&ctx, cmd, &output),
    };

    if let Err(e) = &result {
        tracing::error!("Command failed: {}", e);
        if !output.is_human() {
            output.error(e.to_string());
        }
    }
    result
}
