//! # Tic-Tac-Toe Game Implementation
//!
//! This module implements classic 3x3 tic-tac-toe.
//! Players alternate placing their mark on an empty cell, trying to complete
//! a row, column, or diagonal.
//!
//! ## Rules
//! - X always moves first
//! - A mark may only be placed on an empty cell
//! - Three in a line (row, column, or diagonal) wins
//! - Game is a draw if the board fills up with no line complete
//!
//! Cells are indexed 0-8 in row-major order:
//!
//! ```text
//!  0 | 1 | 2
//! ---+---+---
//!  3 | 4 | 5
//! ---+---+---
//!  6 | 7 | 8
//! ```

use minimax::GameState;
use std::fmt;
use std::str::FromStr;

/// A player's mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    /// Returns the opposing mark.
    pub fn opponent(self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    /// The player id seen by the search engine: X is 1, O is -1.
    pub fn id(self) -> i32 {
        match self {
            Mark::X => 1,
            Mark::O => -1,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mark::X => write!(f, "X"),
            Mark::O => write!(f, "O"),
        }
    }
}

/// One board cell: empty, or holding a mark.
pub type Cell = Option<Mark>;

/// The 8 winning lines in canonical order: rows, then columns, then
/// diagonals. Winner detection scans them in this order, which fixes the
/// tie-break should more than one line ever complete at once.
pub const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// Represents a move in tic-tac-toe
///
/// Contains the cell index (0-8, row-major) where the current player wants
/// to place their mark.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct TicTacToeMove(pub usize);

impl fmt::Display for TicTacToeMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cell {}", self.0)
    }
}

impl FromStr for TicTacToeMove {
    type Err = String;

    /// Parses a move from its cell index (e.g. "4").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let index = s.trim().parse::<usize>().map_err(|e| e.to_string())?;
        Ok(TicTacToeMove(index))
    }
}

/// A move rejected by the board rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidMove {
    /// The index is outside 0-8.
    OutOfRange(usize),
    /// The cell already holds a mark.
    Occupied(usize),
}

impl fmt::Display for InvalidMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidMove::OutOfRange(index) => write!(f, "cell index {} out of range", index),
            InvalidMove::Occupied(index) => write!(f, "cell {} is already occupied", index),
        }
    }
}

/// Represents the complete state of a tic-tac-toe board
///
/// Contains the 9 cells and the mark whose turn it is. State transitions go
/// through [`TicTacToeState::apply`], which returns a new state and leaves
/// the original untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TicTacToeState {
    /// The cells in row-major order.
    board: [Cell; 9],
    /// The mark to move next.
    current_mark: Mark,
}

impl TicTacToeState {
    /// Creates an empty board with X to move.
    pub fn new() -> Self {
        TicTacToeState {
            board: [None; 9],
            current_mark: Mark::X,
        }
    }

    /// The cells in row-major order.
    pub fn cells(&self) -> &[Cell; 9] {
        &self.board
    }

    /// The mark whose turn it is.
    pub fn current_mark(&self) -> Mark {
        self.current_mark
    }

    /// Returns the winning mark and its completed line, if any.
    ///
    /// Lines are checked in the canonical order of [`LINES`], so the first
    /// complete line decides (relevant only for boards not reachable through
    /// valid play, where two lines could complete together).
    pub fn winner_line(&self) -> Option<(Mark, [usize; 3])> {
        for line in LINES {
            let [a, b, c] = line;
            if let Some(mark) = self.board[a] {
                if self.board[b] == Some(mark) && self.board[c] == Some(mark) {
                    return Some((mark, line));
                }
            }
        }
        None
    }

    /// Returns true if no cell is empty.
    pub fn is_full(&self) -> bool {
        self.board.iter().all(|cell| cell.is_some())
    }

    /// Checks if a move is legal in the current board state.
    pub fn is_legal(&self, mv: &TicTacToeMove) -> bool {
        mv.0 < 9 && self.board[mv.0].is_none()
    }

    /// Applies a move for the current mark, returning the resulting state.
    ///
    /// Pure: the receiver is never modified. Rejects indices outside 0-8 and
    /// occupied cells. The turn passes to the opponent only while the game
    /// continues; a winning or drawing move leaves the mover's mark current.
    pub fn apply(&self, index: usize) -> Result<TicTacToeState, InvalidMove> {
        if index >= 9 {
            return Err(InvalidMove::OutOfRange(index));
        }
        if self.board[index].is_some() {
            return Err(InvalidMove::Occupied(index));
        }
        let mut next = self.clone();
        next.board[index] = Some(self.current_mark);
        if next.winner_line().is_none() && !next.is_full() {
            next.current_mark = self.current_mark.opponent();
        }
        Ok(next)
    }
}

impl Default for TicTacToeState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TicTacToeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3 {
            for col in 0..3 {
                let symbol = match self.board[row * 3 + col] {
                    Some(Mark::X) => "X",
                    Some(Mark::O) => "O",
                    None => ".",
                };
                write!(f, "{} ", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl GameState for TicTacToeState {
    type Move = TicTacToeMove;

    fn get_possible_moves(&self) -> Vec<Self::Move> {
        (0..9)
            .filter(|&index| self.board[index].is_none())
            .map(TicTacToeMove)
            .collect()
    }

    fn make_move(&mut self, mv: &Self::Move) {
        // Illegal moves leave the state unchanged.
        if let Ok(next) = self.apply(mv.0) {
            *self = next;
        }
    }

    fn is_terminal(&self) -> bool {
        self.winner_line().is_some() || self.is_full()
    }

    fn get_winner(&self) -> Option<i32> {
        self.winner_line().map(|(mark, _)| mark.id())
    }

    fn get_current_player(&self) -> i32 {
        self.current_mark.id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds a board from a compact pattern string of X, O, and `.`.
    /// The mark to move is whoever has fewer marks on the board (X on ties).
    fn board(pattern: &str) -> TicTacToeState {
        let cells: Vec<char> = pattern.chars().filter(|c| !c.is_whitespace()).collect();
        assert_eq!(cells.len(), 9);
        let mut state = TicTacToeState::new();
        let mut xs = 0;
        let mut os = 0;
        for (index, c) in cells.iter().enumerate() {
            state.board[index] = match c {
                'X' => {
                    xs += 1;
                    Some(Mark::X)
                }
                'O' => {
                    os += 1;
                    Some(Mark::O)
                }
                _ => None,
            };
        }
        state.current_mark = if xs > os { Mark::O } else { Mark::X };
        state
    }

    #[test]
    fn test_new_game() {
        let state = TicTacToeState::new();
        assert_eq!(state.cells(), &[None; 9]);
        assert_eq!(state.current_mark(), Mark::X);
        assert!(!state.is_terminal());
        assert_eq!(state.get_possible_moves().len(), 9);
    }

    #[test]
    fn test_apply_flips_turn() {
        let state = TicTacToeState::new();
        let next = state.apply(4).unwrap();
        assert_eq!(next.cells()[4], Some(Mark::X));
        assert_eq!(next.current_mark(), Mark::O);
        // The original state is untouched.
        assert_eq!(state.cells()[4], None);
        assert_eq!(state.current_mark(), Mark::X);
    }

    #[test]
    fn test_apply_rejects_occupied() {
        let state = TicTacToeState::new().apply(4).unwrap();
        assert_eq!(state.apply(4), Err(InvalidMove::Occupied(4)));
    }

    #[test]
    fn test_apply_rejects_out_of_range() {
        let state = TicTacToeState::new();
        assert_eq!(state.apply(9), Err(InvalidMove::OutOfRange(9)));
        assert_eq!(state.apply(42), Err(InvalidMove::OutOfRange(42)));
    }

    #[test]
    fn test_all_winning_lines_detected() {
        for line in LINES {
            for mark in [Mark::X, Mark::O] {
                let mut state = TicTacToeState::new();
                for index in line {
                    state.board[index] = Some(mark);
                }
                let (winner, winning) = state.winner_line().unwrap();
                assert_eq!(winner, mark, "line {:?} should win for {}", line, mark);
                assert_eq!(winning, line);
                assert!(state.is_terminal());
            }
        }
    }

    #[test]
    fn test_tie_break_prefers_canonical_order() {
        // Unreachable in valid play: X completes both the top row and the
        // left column. Rows come first in canonical order.
        let state = board(
            "XXX\
             X..\
             X..",
        );
        let (winner, line) = state.winner_line().unwrap();
        assert_eq!(winner, Mark::X);
        assert_eq!(line, [0, 1, 2]);
    }

    #[test]
    fn test_draw_board() {
        let state = board(
            "XOX\
             XOO\
             OXX",
        );
        assert!(state.winner_line().is_none());
        assert!(state.is_full());
        assert!(state.is_terminal());
        assert!(state.get_possible_moves().is_empty());
    }

    #[test]
    fn test_winning_move_keeps_mover_current() {
        // X to move with two in the top row.
        let state = board(
            "XX.\
             OO.\
             ...",
        );
        assert_eq!(state.current_mark(), Mark::X);
        let next = state.apply(2).unwrap();
        let (winner, line) = next.winner_line().unwrap();
        assert_eq!(winner, Mark::X);
        assert_eq!(line, [0, 1, 2]);
        // The turn does not pass on a terminal move.
        assert_eq!(next.current_mark(), Mark::X);
    }

    #[test]
    fn test_move_parse_round_trip() {
        for index in 0..9 {
            let mv = TicTacToeMove::from_str(&index.to_string()).unwrap();
            assert_eq!(mv, TicTacToeMove(index));
        }
        assert!(TicTacToeMove::from_str("not a move").is_err());
        assert_eq!(TicTacToeMove(4).to_string(), "cell 4");
    }

    #[test]
    fn test_game_state_ids() {
        let state = TicTacToeState::new();
        assert_eq!(state.get_current_player(), 1);
        let next = state.apply(0).unwrap();
        assert_eq!(next.get_current_player(), -1);
        assert_eq!(next.get_winner(), None);
    }
}
