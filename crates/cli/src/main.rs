//! Levelgate CLI - points, levels, and resource unlocks.

use anyhow::Result;
use clap::{Parser, Subcommand};
use levelgate_core::{LevelProgress, ProgressionConfig};
use levelgate_storage::JsonStorage;
use levelgate_tracker::{ProgressTracker, TerminalNotifier};
use std::sync::Arc;
use tracing::Level;

#[derive(Parser)]
#[command(name = "levelgate")]
#[command(about = "Points, levels, and resource unlocks", long_about = None)]
struct Cli {
    /// Data directory
    #[arg(long, default_value = ".levelgate")]
    data_dir: std::path::PathBuf,

    /// Progression config file (JSON); defaults built in
    #[arg(long)]
    config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in as a user, creating the profile on first login
    Login {
        /// User name
        name: String,
    },
    /// Log out the active user
    Logout,
    /// Track an activity for the active user
    Track {
        /// Activity kind (e.g. chat_message, mission_complete)
        activity: String,
    },
    /// Show the active user's progression
    Status,
    /// List unlocked and locked resources for the active user
    Pages,
    /// List the configured activities and their rewards
    Activities,
    /// List all known users
    Users,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)?;
            ProgressionConfig::from_json_str(&json)?
        }
        None => ProgressionConfig::default(),
    };

    let storage = JsonStorage::new(&cli.data_dir).await?;
    let tracker =
        ProgressTracker::new(storage, config).with_notifier(Arc::new(TerminalNotifier));

    match cli.command {
        Commands::Login { name } => {
            let profile = tracker.login(&name).await?;
            println!(
                "Logged in: {} (level {}, {} points)",
                profile.name, profile.level, profile.points
            );
        }
        Commands::Logout => {
            tracker.logout().await?;
            println!("Logged out");
        }
        Commands::Track { activity } => {
            let Some(outcome) = tracker.track_activity(&activity).await? else {
                println!("Nobody is logged in");
                return Ok(());
            };
            if outcome.points_gained == 0 {
                println!("'{}' is not a known activity", activity);
            }
            println!(
                "{}: {} points, level {}",
                outcome.user.name, outcome.user.points, outcome.user.level
            );
        }
        Commands::Status => {
            let Some(user) = tracker.current_user().await? else {
                println!("Nobody is logged in");
                return Ok(());
            };

            println!("User: {}", user.name);
            println!("  Points: {}", user.points);
            println!("  Level: {}", user.level);
            match tracker.next_level_progress(&user) {
                LevelProgress::MaxLevel { max_threshold, .. } => {
                    println!("  Max level reached ({} point threshold)", max_threshold);
                }
                LevelProgress::Toward {
                    next_level,
                    points_needed,
                    percent,
                    ..
                } => {
                    println!(
                        "  Next level: {} ({} points to go, {:.0}% through this band)",
                        next_level, points_needed, percent
                    );
                }
            }
        }
        Commands::Pages => {
            let level = tracker.current_user().await?.map(|u| u.level);

            match level {
                Some(level) => {
                    println!("Unlocked (level {})", level);
                    for resource in tracker.unlocked_resources(level) {
                        println!("  {}", resource);
                    }
                    println!("Locked");
                    for resource in tracker.locked_resources(level) {
                        println!("  {}", resource);
                    }
                }
                None => {
                    println!("Public (not logged in)");
                    for resource in &tracker.config().public_resources {
                        println!("  {}", resource);
                    }
                }
            }
        }
        Commands::Activities => {
            println!("Activities");
            for (kind, points) in tracker.config().rewards.iter() {
                println!("  {} | +{}", kind, points);
            }
        }
        Commands::Users => {
            let profiles = tracker.known_users().await?;
            println!("Users ({})", profiles.len());
            for profile in profiles {
                println!(
                    "  {} | level {} | {} points | {}",
                    profile.name, profile.level, profile.points, profile.id
                );
            }
        }
    }

    Ok(())
}
