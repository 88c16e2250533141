//! # Tic-Tac-Toe Minimax Engine
//!
//! This is the main entry point for a terminal tic-tac-toe game with
//! two-player and player-vs-AI modes, session score tracking, and an
//! exhaustive minimax opponent.
//!
//! The game logic is pure and lives behind the `GameController`; this binary
//! wires it to a line-oriented terminal interface.
//!
//! ## Usage
//! ```text
//! play [--mode <player|ai>] [--ai-delay-ms <ms>] [--no-color]
//! ```
//!
//! Set `RUST_LOG=debug` to see move rejections and search decisions.

pub mod game_controller;
pub mod games;
pub mod repl;

use clap::Parser;
use game_controller::{GameController, GameMode};
use std::io;
use std::time::Duration;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Opponent mode: 'player' for two humans, 'ai' for the minimax engine
    #[clap(short, long, default_value = "player")]
    mode: GameMode,

    /// Pause before the AI replies, in milliseconds (pacing only; 0 is valid)
    #[clap(long, default_value_t = 600)]
    ai_delay_ms: u64,

    /// Disable colored output
    #[clap(long, action = clap::ArgAction::SetTrue)]
    no_color: bool,
}

fn main() -> io::Result<()> {
    env_logger::init();
    let args = Args::parse();
    if args.no_color {
        colored::control::set_override(false);
    }

    let mut controller = GameController::new(args.mode);
    repl::run(&mut controller, Duration::from_millis(args.ai_delay_ms))
}
