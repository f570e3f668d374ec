// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug, Clone)]
#[command(name = "termarcade", version)]
#[command(about = "Hangman, Pong, Snake and Zombie Attack in the terminal", long_about = None)]
pub struct Cli {
    /// Game to launch directly; without one the launcher opens
    #[command(subcommand)]
    pub game: Option<GameCommand>,

    /// Seed for food, zombie and word selection (random when omitted)
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Override the game's tick interval in milliseconds
    #[arg(long = "tick-ms", global = true, value_parser = clap::value_parser!(u64).range(10..=2000))]
    pub tick_ms: Option<u64>,

    /// Write logs to this file (filter with RUST_LOG)
    #[arg(long = "log-file", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum GameCommand {
    /// Guess the word before the gallows are complete
    Hangman {
        /// Directory holding the hangman0..hangman9 drawings
        #[arg(long, default_value = "states")]
        assets: PathBuf,
        /// Word list file, one word per line
        #[arg(long)]
        words: Option<PathBuf>,
        /// Line-based prompt on stdin/stdout instead of the full-screen UI
        #[arg(long)]
        plain: bool,
    },
    /// Two-player Pong
    Pong {
        #[arg(long = "win-score", default_value_t = 3)]
        win_score: u32,
        #[arg(long = "paddle-height", default_value_t = 4)]
        paddle_height: i32,
    },
    /// Classic Snake
    Snake {
        #[arg(long, default_value_t = 40)]
        width: i32,
        #[arg(long, default_value_t = 20)]
        height: i32,
    },
    /// Shoot the zombies before they reach the bottom
    Zombies {
        #[arg(long, default_value_t = 40)]
        width: i32,
        #[arg(long, default_value_t = 20)]
        height: i32,
        /// Size of the horde
        #[arg(long = "zombies", default_value_t = 5)]
        zombie_count: usize,
        #[arg(long, default_value_t = 3)]
        health: u32,
    },
}
