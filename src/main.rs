//! Media Explorer CLI
//!
//! Browse, search and favorite movies and TV shows from TMDB in the terminal.

use clap::Parser;
use media_explorer::cli::{
    args::{Cli, Commands, FavoritesAction},
    commands::{browse, details, explore, favorites},
};
use media_explorer::models::config::{self, Config};
use media_explorer::preflight;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    let config = config::load_config(cli.config.as_deref());

    // Listing favorites is purely local
    let needs_network = !matches!(
        cli.command,
        Commands::Favorites {
            action: FavoritesAction::List
        }
    );
    if needs_network && !cli.skip_preflight {
        run_preflight_checks(&config).await?;
    }

    // Run the appropriate command
    match cli.command {
        Commands::Home { page } => {
            browse::home(&config, page).await?;
        }

        Commands::Search { query, page } => {
            browse::search(&config, &query, page).await?;
        }

        Commands::Details {
            kind,
            id,
            provider,
            recommend,
        } => {
            details::show(&config, kind, id, provider, recommend).await?;
        }

        Commands::Favorites { action } => match action {
            FavoritesAction::List => {
                favorites::list(&config)?;
            }
            FavoritesAction::Toggle { kind, id } => {
                favorites::toggle(&config, kind, id).await?;
            }
        },

        Commands::Explore => {
            explore::run(&config).await?;
        }
    }

    Ok(())
}

/// Initialize the logging system.
fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("media_explorer=debug")
    } else {
        EnvFilter::new("media_explorer=info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time())
        .with(filter)
        .init();
}

/// Run preflight checks and exit if any required one fails.
async fn run_preflight_checks(config: &Config) -> anyhow::Result<()> {
    use colored::Colorize;

    println!("{}", "Running preflight checks...".bold());
    println!();

    let results = preflight::run_preflight_checks(config).await;
    preflight::print_results(&results);

    println!();

    if !preflight::all_passed(&results) {
        anyhow::bail!("Preflight checks failed. Fix the issues above and try again.");
    }

    Ok(())
}
