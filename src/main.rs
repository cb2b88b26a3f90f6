//! # Gloom Main Entry Point
//!
//! Parses the command line, sets up logging and runs the scene loop.

use clap::Parser;
use gloom::{GloomError, GloomResult, InputHandler, SceneManager};
use log::info;
use macroquad::prelude::*;
use std::path::PathBuf;

/// Command line arguments for Gloom.
#[derive(Parser, Debug)]
#[command(name = "gloom")]
#[command(about = "A turn-based dungeon crawler with procedural floors and save games")]
#[command(version)]
struct Args {
    /// Random seed for new games
    #[arg(short, long)]
    seed: Option<u64>,

    /// Where the game is saved and loaded from
    #[arg(long, default_value = gloom::config::SAVE_FILE_NAME)]
    save_file: PathBuf,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn window_conf() -> Conf {
    Conf {
        window_title: "Gloom".to_string(),
        window_width: 960,
        window_height: 600,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() -> GloomResult<()> {
    let args = Args::parse();

    initialize_logging(&args.log_level)?;

    info!("Starting Gloom v{}", gloom::VERSION);

    let mut scenes = SceneManager::new(InputHandler::new(), args.save_file, args.seed);
    scenes.run().await?;

    info!("Game loop ended");
    Ok(())
}

/// Initializes the logging system based on the specified log level.
fn initialize_logging(log_level: &str) -> GloomResult<()> {
    #[cfg(feature = "dev-tools")]
    {
        use tracing::Level;

        let level = match log_level.to_lowercase().as_str() {
            "error" => Level::ERROR,
            "warn" => Level::WARN,
            "info" => Level::INFO,
            "debug" => Level::DEBUG,
            "trace" => Level::TRACE,
            _ => Level::INFO,
        };

        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_target(false)
            .try_init()
            .map_err(|e| GloomError::InvalidConfig(format!("Logging setup failed: {}", e)))?;
    }

    #[cfg(not(feature = "dev-tools"))]
    {
        env_logger::Builder::new()
            .parse_filters(log_level)
            .try_init()
            .map_err(|e| GloomError::InvalidConfig(format!("Logging setup failed: {}", e)))?;
    }

    Ok(())
}
