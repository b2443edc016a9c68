use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use edustem::{Config, ProgressManager};

mod cli;

#[derive(Parser)]
#[command(name = "edustem")]
#[command(about = "EduSTEM learner progress - XP, levels, streaks and achievements")]
#[command(version)]
struct Cli {
    /// Path to the config file (defaults to ~/.edustem/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default config file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },

    /// Record a learning activity (video_watched, game_played, time_spent)
    Record {
        /// Activity type; `video`, `game` and `time` are accepted as short forms
        activity: String,

        /// Subject: science, mathematics, technology or engineering
        #[arg(short, long)]
        subject: Option<String>,

        /// XP earned by a game (defaults to 20)
        #[arg(long)]
        xp: Option<u32>,

        /// Minutes spent (defaults to 1)
        #[arg(long)]
        minutes: Option<u32>,
    },

    /// Grant a one-off XP bonus
    Bonus {
        amount: u32,
    },

    /// Mark a content item as completed
    Content {
        id: String,
    },

    /// Show the progress summary
    Show {
        /// Print the raw progress record as JSON
        #[arg(long)]
        json: bool,
    },

    /// List all achievements with their status
    Achievements {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show which recent days had activity
    Calendar {
        #[arg(long, default_value_t = edustem::progress::DEFAULT_CALENDAR_DAYS)]
        days: u32,
    },

    /// Export progress as JSON
    Export {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Replace progress with a previously exported snapshot
    Import {
        file: PathBuf,
    },

    /// Delete all progress
    Reset {
        /// Skip the confirmation check
        #[arg(long)]
        yes: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config.unwrap_or_else(Config::global_config_path);

    let command = match cli.command {
        Some(Commands::Init { force }) => {
            return cli::init::init_command(&config_path, force);
        }
        Some(command) => command,
        None => Commands::Show { json: false },
    };

    let config = Config::load_from(&config_path)?;
    let manager = ProgressManager::from_config(&config)?;

    match command {
        Commands::Record {
            activity,
            subject,
            xp,
            minutes,
        } => cli::record::record_command(&manager, &activity, subject, xp, minutes),
        Commands::Bonus { amount } => cli::record::bonus_command(&manager, amount),
        Commands::Content { id } => cli::record::content_command(&manager, &id),
        Commands::Show { json } => cli::show::show_command(&manager, json),
        Commands::Achievements { json } => cli::show::achievements_command(&manager, json),
        Commands::Calendar { days } => cli::show::calendar_command(&manager, days),
        Commands::Export { output } => cli::transfer::export_command(&manager, output.as_deref()),
        Commands::Import { file } => cli::transfer::import_command(&manager, &file),
        Commands::Reset { yes } => cli::transfer::reset_command(&manager, yes),
        Commands::Init { .. } => Ok(()),
    }
}
