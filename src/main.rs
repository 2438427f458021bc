//! # Proof of Hustle CLI (`poh`)
//!
//! Runs the authenticated proxy server and reads dashboard data through the
//! resilient client.
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `poh serve` | Start the proxy server |
//! | `poh dashboard` | Print a full dashboard snapshot |
//! | `poh streak <file>` | Compute streaks from a contributions JSON file |
//! | `poh leaderboard` | Print the leaderboard |
//! | `poh sync` | Trigger a GitHub sync and print the NFT update |
//! | `poh github <user>` | Show a GitHub profile |
//!
//! ## Examples
//!
//! ```bash
//! poh --config ./config/poh.toml serve
//! poh dashboard --username octocat --user-id 42
//! poh streak contributions.json --today 2024-12-15
//! ```

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use proof_of_hustle::config::{self, Config};
use proof_of_hustle::logging::{init_logging, LogFormat, LogLevel};
use proof_of_hustle::protocol::DEFAULT_LEADERBOARD_LIMIT;
use proof_of_hustle::{dashboard, github, proxy, streak_cmd};

/// Proof of Hustle: developer reputation proxy and dashboard client.
#[derive(Parser)]
#[command(name = "poh", version, about)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// If the file does not exist, built-in defaults are used with
    /// credentials taken from the environment.
    #[arg(long, global = true, default_value = "./config/poh.toml")]
    config: PathBuf,

    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,

    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Plaintext)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the authenticated proxy server.
    ///
    /// Binds to `[server].bind` and forwards requests to `[api].base_url`.
    Serve,

    /// Fetch every dashboard resource and print a snapshot.
    ///
    /// Resources that fail to load are replaced with placeholder data and
    /// listed at the end.
    Dashboard {
        #[arg(long)]
        username: String,

        #[arg(long)]
        user_id: String,

        /// Print the snapshot as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Compute current and longest streaks from a JSON array of
    /// contribution records.
    Streak {
        file: PathBuf,

        /// Date to treat as today (YYYY-MM-DD). Defaults to the local date.
        #[arg(long)]
        today: Option<NaiveDate>,

        #[arg(long)]
        json: bool,
    },

    /// Print the leaderboard.
    Leaderboard {
        #[arg(long, default_value_t = DEFAULT_LEADERBOARD_LIMIT)]
        limit: u32,
    },

    /// Sync GitHub data and print the resulting NFT update.
    Sync {
        #[arg(long)]
        username: String,

        #[arg(long)]
        user_id: String,
    },

    /// Show a GitHub user's profile and repositories.
    Github { username: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level, cli.log_format)?;

    // Streaks are computed from a local file and need no config.
    if let Commands::Streak { file, today, json } = &cli.command {
        return streak_cmd::run_streak(file, *today, *json);
    }

    let cfg = if cli.config.exists() {
        config::load_config(&cli.config)?
    } else {
        tracing::debug!(path = %cli.config.display(), "config file not found, using defaults");
        Config::minimal()
    };

    match cli.command {
        Commands::Serve => {
            proxy::run_server(&cfg).await?;
        }
        Commands::Dashboard {
            username,
            user_id,
            json,
        } => {
            dashboard::run_dashboard(&cfg, &username, &user_id, json).await?;
        }
        Commands::Leaderboard { limit } => {
            dashboard::run_leaderboard(&cfg, limit).await?;
        }
        Commands::Sync { username, user_id } => {
            dashboard::run_sync(&cfg, &username, &user_id).await?;
        }
        Commands::Github { username } => {
            github::run_github(&cfg, &username).await?;
        }
        Commands::Streak { .. } => {
            // Handled above (before config loading)
            unreachable!()
        }
    }

    Ok(())
}
