//! # REPL Module - Terminal Presentation Adapter
//!
//! Line-oriented interface over the [`GameController`]. This layer renders
//! the board, scores, and status, and forwards parsed commands into the
//! controller; it performs no game logic of its own.
//!
//! Rejected moves are a deliberate no-op here: the controller already logged
//! the reason at debug level, and the session simply waits for the next
//! command, mirroring a click on a dead cell being ignored.
//!
//! The AI pacing delay also lives here. The controller exposes the
//! scheduling boundary (`ai_turn`/`ai_move`); this adapter decides to sleep
//! before invoking the engine, and a zero delay gives fully synchronous
//! headless behavior.

use crate::game_controller::{GameController, GameMode, GameStatus, MoveResult};
use crate::games::tictactoe::{Mark, TicTacToeMove};
use colored::Colorize;
use std::io::{self, BufRead, Write};
use std::str::FromStr;
use std::thread;
use std::time::Duration;

/// A parsed user command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Place the current mark on a cell (0-8).
    Move(usize),
    /// Start a fresh game; scores are kept.
    Reset,
    /// Switch opponent mode; starts a fresh game, scores are kept.
    Mode(GameMode),
    /// Reprint the board.
    Board,
    /// Print the move transcript of the current game.
    History,
    /// Print command help.
    Help,
    /// Leave the session.
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        match words.next() {
            Some("move") => {
                let arg = words
                    .next()
                    .ok_or_else(|| String::from("move requires a cell index (0-8)"))?;
                let mv = TicTacToeMove::from_str(arg)?;
                Ok(Command::Move(mv.0))
            }
            Some("mode") => {
                let arg = words
                    .next()
                    .ok_or_else(|| String::from("mode requires 'player' or 'ai'"))?;
                Ok(Command::Mode(GameMode::from_str(arg)?))
            }
            Some("reset") => Ok(Command::Reset),
            Some("board") => Ok(Command::Board),
            Some("history") => Ok(Command::History),
            Some("help") => Ok(Command::Help),
            Some("quit") | Some("exit") => Ok(Command::Quit),
            Some(other) => Err(format!("unknown command '{}' (try 'help')", other)),
            None => Err(String::from("empty command")),
        }
    }
}

/// Renders the board as a 3x3 grid.
///
/// Empty cells show their index so the player knows what to type; the
/// winning line, if any, is highlighted.
pub fn render_board(controller: &GameController) -> String {
    let winning = controller.winning_line();
    let mut out = String::new();
    for row in 0..3 {
        out.push(' ');
        for col in 0..3 {
            let index = row * 3 + col;
            let on_line = winning.is_some_and(|line| line.contains(&index));
            let symbol = match controller.board().cells()[index] {
                Some(Mark::X) => "X".red().bold(),
                Some(Mark::O) => "O".blue().bold(),
                None => index.to_string().dimmed(),
            };
            let symbol = if on_line { symbol.on_green() } else { symbol };
            out.push_str(&symbol.to_string());
            if col < 2 {
                out.push_str(" | ");
            }
        }
        out.push('\n');
        if row < 2 {
            out.push_str("---+---+---\n");
        }
    }
    out
}

/// The one-line game status, phrased like the original status display.
pub fn status_line(controller: &GameController) -> String {
    match controller.status() {
        GameStatus::Win(mark) => format!("Player {} wins!", mark),
        GameStatus::Draw => String::from("It's a draw!"),
        GameStatus::InProgress => format!("Player {}'s turn", controller.current_mark()),
    }
}

/// The session scoreboard line.
pub fn score_line(controller: &GameController) -> String {
    format!(
        "Score  X: {}  O: {}",
        controller.scores().get(Mark::X),
        controller.scores().get(Mark::O)
    )
}

fn print_view(controller: &GameController) {
    println!();
    println!("{}", render_board(controller));
    println!("{}", score_line(controller));
    println!("{}", status_line(controller));
    if !controller.is_active() {
        println!("{}", "Type 'reset' for a new game.".dimmed());
    }
}

fn print_help() {
    println!("Commands:");
    println!("  move <0-8>          place your mark on a cell");
    println!("  mode <player|ai>    switch opponent (starts a new game)");
    println!("  reset               start a new game (scores are kept)");
    println!("  board               reprint the board");
    println!("  history             print the current game's transcript");
    println!("  help                show this help");
    println!("  quit                leave");
}

/// Runs the command loop until `quit` or end of input.
///
/// After every applied human move, if the AI is to move the loop sleeps for
/// `ai_delay` and then invokes the engine before reading further input.
pub fn run(controller: &mut GameController, ai_delay: Duration) -> io::Result<()> {
    println!("Tic-Tac-Toe (vs {})", controller.mode());
    print_help();
    print_view(controller);

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let command = match Command::from_str(trimmed) {
            Ok(command) => command,
            Err(message) => {
                println!("{}", message.dimmed());
                continue;
            }
        };
        match command {
            Command::Quit => break,
            Command::Help => print_help(),
            Command::Board => print_view(controller),
            Command::History => println!("{}", controller.format_history()),
            Command::Reset => {
                controller.reset();
                print_view(controller);
            }
            Command::Mode(mode) => {
                controller.set_mode(mode);
                print_view(controller);
            }
            Command::Move(index) => {
                match controller.try_make_move(index) {
                    // Rejections are ignored, never surfaced as errors.
                    MoveResult::Rejected { .. } => continue,
                    MoveResult::Success { .. } => print_view(controller),
                }
                if controller.ai_turn() {
                    thread::sleep(ai_delay);
                    controller.ai_move();
                    print_view(controller);
                }
            }
        }
        io::stdout().flush()?;
    }
    Ok(())
}
