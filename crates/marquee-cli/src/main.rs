//! Marquee CLI — browse movies and keep a list of liked ones

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use marquee::ThemeMode;
use marquee_app::config::catalog::CATALOG_URL_ENV;
use marquee_app::config::storage::DATA_DIR_ENV;
use marquee_app::screens::MovieRow;
use marquee_app::{App, AppConfig};

#[derive(Parser)]
#[command(name = "marquee", about = "Browse movies and keep a list of liked ones", version)]
struct Cli {
    /// Directory holding the preference files
    #[arg(long, global = true, env = DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,

    /// Endpoint returning the movie list as JSON
    #[arg(long, global = true, env = CATALOG_URL_ENV)]
    catalog_url: Option<String>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List movies not yet liked
    Movies,
    /// List liked movies found in the catalog
    Likes,
    /// Print every liked title, including ones missing from the catalog
    Liked,
    /// Mark a movie as liked
    Like { title: String },
    /// Unmark a liked movie
    Unlike { title: String },
    /// Show or change the display theme
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },
}

#[derive(Subcommand)]
enum ThemeAction {
    /// Switch between light and dark
    Toggle,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_rows(rows: &[MovieRow], mode: ThemeMode, empty: &str) {
    if rows.is_empty() {
        println!("{empty}");
        return;
    }
    let marker = if mode.is_dark() { "*" } else { "-" };
    for row in rows {
        let heart = if row.liked { " <3" } else { "" };
        println!(
            "{marker} {} ({}, {}){heart}",
            row.movie.title, row.movie.year, row.movie.runtime
        );
    }
}

async fn run(app: &App, command: Command) {
    let theme = app.theme();
    let liked = app.liked();

    match command {
        Command::Movies => {
            let rows = app.movies_screen().await;
            print_rows(&rows, theme.mode(), "No movies left to like.");
        }
        Command::Likes => {
            let rows = app.likes_screen().await;
            print_rows(&rows, theme.mode(), "No liked movies yet.");
        }
        Command::Liked => {
            for title in liked.liked_movies() {
                println!("{title}");
            }
        }
        Command::Like { title } => {
            if liked.add_liked_movie(&title) {
                println!("Liked {title:?}");
            } else {
                println!("{title:?} was already liked");
            }
        }
        Command::Unlike { title } => {
            if liked.remove_liked_movie(&title) {
                println!("Unliked {title:?}");
            } else {
                println!("{title:?} was not liked");
            }
        }
        Command::Theme { action: None } => {
            println!("{}", theme.mode());
        }
        Command::Theme {
            action: Some(ThemeAction::Toggle),
        } => {
            println!("{}", theme.toggle_theme());
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = AppConfig::from_env();
    if let Some(dir) = cli.data_dir {
        config = config.with_data_dir(dir);
    }
    if let Some(url) = cli.catalog_url {
        config = config.with_catalog_url(url);
    }
    tracing::debug!(?config, "starting");

    let app = match App::open(&config).await {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    run(&app, cli.command).await;

    match app.shutdown().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error saving preferences: {e}");
            ExitCode::FAILURE
        }
    }
}
