//! # Game Controller Module - Central Game State Management
//!
//! This module provides the `GameController` which serves as the single source
//! of truth for the authoritative game state. It ensures proper separation
//! between:
//!
//! - **Authoritative Game State**: The "real" game state owned by the controller
//! - **AI Search States**: Snapshots explored during minimax search
//! - **UI Render States**: Read-only views used for display purposes
//!
//! All moves are validated here before application: an out-of-range index, an
//! occupied cell, or a finished game yields a [`MoveResult::Rejected`], which
//! the presentation layer treats as a no-op. The controller also owns turn
//! orchestration for the vs-AI mode: after a human move it reports whether
//! the AI is to move via [`GameController::ai_turn`], and the presentation
//! layer decides when to call the synchronous [`GameController::ai_move`].

use crate::games::tictactoe::{InvalidMove, Mark, TicTacToeMove, TicTacToeState};
use minimax::Minimax;
use std::fmt;
use std::str::FromStr;
use std::time::SystemTime;

/// The mark the AI opponent plays. The human in vs-AI mode is always X, and
/// X always opens, so the engine is only ever consulted on O's turn.
pub const AI_MARK: Mark = Mark::O;

/// Who sits across the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    /// Two humans alternating at the same terminal.
    PlayerVsPlayer,
    /// A human as X against the minimax engine as O.
    PlayerVsAi,
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameMode::PlayerVsPlayer => write!(f, "player"),
            GameMode::PlayerVsAi => write!(f, "ai"),
        }
    }
}

impl FromStr for GameMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "player" => Ok(GameMode::PlayerVsPlayer),
            "ai" => Ok(GameMode::PlayerVsAi),
            other => Err(format!("unknown mode '{}' (expected 'player' or 'ai')", other)),
        }
    }
}

/// Result of attempting to apply a move
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveResult {
    /// Move was successfully applied
    Success {
        /// The cell that was filled
        index: usize,
        /// The mark that was placed
        mark: Mark,
        /// Whether the game is now over
        game_over: bool,
        /// Winner if game is over (None for draw or ongoing)
        winner: Option<Mark>,
    },
    /// Move was rejected; the game state is unchanged
    Rejected {
        /// Reason the move was rejected
        reason: RejectReason,
    },
}

/// Why a move was rejected.
///
/// Every rejection is recoverable and local: the presentation layer ignores
/// it and the session continues. The variants exist for diagnostics only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The cell index is outside 0-8.
    OutOfRange(usize),
    /// The cell already holds a mark.
    Occupied(usize),
    /// The game has ended; reset to continue.
    Inactive,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::OutOfRange(index) => write!(f, "cell index {} out of range", index),
            RejectReason::Occupied(index) => write!(f, "cell {} is already occupied", index),
            RejectReason::Inactive => write!(f, "game is not active"),
        }
    }
}

impl From<InvalidMove> for RejectReason {
    fn from(invalid: InvalidMove) -> Self {
        match invalid {
            InvalidMove::OutOfRange(index) => RejectReason::OutOfRange(index),
            InvalidMove::Occupied(index) => RejectReason::Occupied(index),
        }
    }
}

/// A single entry in the move history
#[derive(Debug, Clone)]
pub struct MoveHistoryEntry {
    /// When the move was made
    pub timestamp: SystemTime,
    /// The mark that moved
    pub mark: Mark,
    /// The cell that was filled
    pub index: usize,
    /// Move number (1-indexed)
    pub move_number: usize,
}

impl MoveHistoryEntry {
    /// Create a new move history entry
    pub fn new(mark: Mark, index: usize, move_number: usize) -> Self {
        Self {
            timestamp: SystemTime::now(),
            mark,
            index,
            move_number,
        }
    }
}

/// Current game status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    /// Game is still in progress
    InProgress,
    /// Game ended with a winner
    Win(Mark),
    /// Game ended in a draw
    Draw,
}

impl GameStatus {
    /// Check if the game is over
    pub fn is_game_over(&self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

/// Win counts per mark, carried across games within a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scoreboard {
    x: u32,
    o: u32,
}

impl Scoreboard {
    /// The win count for a mark.
    pub fn get(&self, mark: Mark) -> u32 {
        match mark {
            Mark::X => self.x,
            Mark::O => self.o,
        }
    }

    fn record_win(&mut self, mark: Mark) {
        match mark {
            Mark::X => self.x += 1,
            Mark::O => self.o += 1,
        }
    }
}

/// The central game controller that owns the authoritative game state
///
/// This is the single source of truth for the session. All moves must go
/// through the controller, which validates them before application.
///
/// # Usage
/// ```rust,ignore
/// let mut controller = GameController::new(GameMode::PlayerVsAi);
///
/// match controller.try_make_move(4) {
///     MoveResult::Success { game_over, winner, .. } => {
///         // Move was applied
///     }
///     MoveResult::Rejected { reason } => {
///         // Move was ignored; state unchanged
///     }
/// }
///
/// if controller.ai_turn() {
///     // Presentation layer controls pacing, then:
///     controller.ai_move();
/// }
/// ```
#[derive(Debug)]
pub struct GameController {
    /// The authoritative game state
    state: TicTacToeState,
    /// Current game status
    status: GameStatus,
    /// The completed line of the winning mark, if any
    winning_line: Option<[usize; 3]>,
    /// Who plays O
    mode: GameMode,
    /// Session win counts; survive resets and mode switches
    scores: Scoreboard,
    /// Complete history of moves made in the current game
    move_history: Vec<MoveHistoryEntry>,
    /// The AI opponent, maximizing for `AI_MARK`
    engine: Minimax<TicTacToeState>,
}

impl GameController {
    /// Create a new controller with an empty board, X to move.
    pub fn new(mode: GameMode) -> Self {
        Self {
            state: TicTacToeState::new(),
            status: GameStatus::InProgress,
            winning_line: None,
            mode,
            scores: Scoreboard::default(),
            move_history: Vec::new(),
            engine: Minimax::new(AI_MARK.id()),
        }
    }

    /// Validate a move without applying it
    ///
    /// Returns Ok(()) if the move is valid, or the reason it would be rejected.
    pub fn validate_move(&self, index: usize) -> Result<(), RejectReason> {
        if self.status.is_game_over() {
            return Err(RejectReason::Inactive);
        }
        if index >= 9 {
            return Err(RejectReason::OutOfRange(index));
        }
        if !self.state.is_legal(&TicTacToeMove(index)) {
            return Err(RejectReason::Occupied(index));
        }
        Ok(())
    }

    /// Attempt to make a move for the mark whose turn it is
    ///
    /// Validates the move and applies it if valid. A winning move freezes the
    /// game, records the completed line, and credits the winner's score; a
    /// board-filling move freezes the game as a draw; any other move passes
    /// the turn.
    pub fn try_make_move(&mut self, index: usize) -> MoveResult {
        if let Err(reason) = self.validate_move(index) {
            log::debug!("move {} rejected: {}", index, reason);
            return MoveResult::Rejected { reason };
        }

        let mark = self.state.current_mark();
        let next = match self.state.apply(index) {
            Ok(next) => next,
            // Unreachable after validation, but mapped rather than assumed.
            Err(invalid) => {
                return MoveResult::Rejected {
                    reason: RejectReason::from(invalid),
                }
            }
        };

        let move_number = self.move_history.len() + 1;
        self.move_history
            .push(MoveHistoryEntry::new(mark, index, move_number));

        if let Some((winner, line)) = next.winner_line() {
            self.status = GameStatus::Win(winner);
            self.winning_line = Some(line);
            self.scores.record_win(winner);
            log::info!("{} wins on line {:?}", winner, line);
        } else if next.is_full() {
            self.status = GameStatus::Draw;
            log::info!("game drawn");
        }
        self.state = next;

        MoveResult::Success {
            index,
            mark,
            game_over: self.status.is_game_over(),
            winner: self.winner(),
        }
    }

    /// True when the engine should move: vs-AI mode, game active, O's turn.
    ///
    /// The controller never schedules the AI itself; the presentation layer
    /// polls this after every applied move and controls the pacing of the
    /// [`GameController::ai_move`] call.
    pub fn ai_turn(&self) -> bool {
        self.mode == GameMode::PlayerVsAi
            && !self.status.is_game_over()
            && self.state.current_mark() == AI_MARK
    }

    /// Run the minimax search and apply its move, synchronously.
    ///
    /// On an active board there is always at least one empty cell, so the
    /// search cannot come back empty; a finished game is rejected like any
    /// other move.
    pub fn ai_move(&mut self) -> MoveResult {
        if self.status.is_game_over() {
            return MoveResult::Rejected {
                reason: RejectReason::Inactive,
            };
        }
        match self.engine.search(&self.state) {
            Some(TicTacToeMove(index)) => self.try_make_move(index),
            None => MoveResult::Rejected {
                reason: RejectReason::Inactive,
            },
        }
    }

    /// Get a read-only view of the board for rendering
    pub fn board(&self) -> &TicTacToeState {
        &self.state
    }

    /// The mark whose turn it is
    pub fn current_mark(&self) -> Mark {
        self.state.current_mark()
    }

    /// Get the current game status
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// True while moves are being accepted
    pub fn is_active(&self) -> bool {
        !self.status.is_game_over()
    }

    /// Get the winner if the game is over
    pub fn winner(&self) -> Option<Mark> {
        match self.status {
            GameStatus::Win(mark) => Some(mark),
            _ => None,
        }
    }

    /// The completed line of the winning mark, if the game ended in a win
    pub fn winning_line(&self) -> Option<[usize; 3]> {
        self.winning_line
    }

    /// The current game mode
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// Session win counts
    pub fn scores(&self) -> &Scoreboard {
        &self.scores
    }

    /// Get the complete move history of the current game
    pub fn move_history(&self) -> &[MoveHistoryEntry] {
        &self.move_history
    }

    /// Get the number of moves made in the current game
    pub fn move_count(&self) -> usize {
        self.move_history.len()
    }

    /// Reset the board for a new game
    ///
    /// Clears the board and history and gives X the opening move. Scores are
    /// deliberately untouched: they accumulate across games in a session.
    pub fn reset(&mut self) {
        self.state = TicTacToeState::new();
        self.status = GameStatus::InProgress;
        self.winning_line = None;
        self.move_history.clear();
    }

    /// Switch between vs-player and vs-AI, starting a fresh game
    ///
    /// Scores persist across mode switches, same as across resets.
    pub fn set_mode(&mut self, mode: GameMode) {
        self.mode = mode;
        self.reset();
    }

    /// Format the move history as a printable transcript
    pub fn format_history(&self) -> String {
        if self.move_history.is_empty() {
            return String::from("No moves made yet.");
        }

        let mut output = String::from("=== Tic-Tac-Toe Game History ===\n\n");
        for entry in &self.move_history {
            output.push_str(&format!(
                "{}. {} - cell {}\n",
                entry.move_number, entry.mark, entry.index
            ));
        }

        match self.status {
            GameStatus::Win(winner) => {
                output.push_str(&format!("\nResult: {} wins!\n", winner));
            }
            GameStatus::Draw => {
                output.push_str("\nResult: Draw\n");
            }
            GameStatus::InProgress => {
                output.push_str(&format!(
                    "\n(Game in progress - {} to move)\n",
                    self.current_mark()
                ));
            }
        }

        output
    }
}
