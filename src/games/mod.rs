//! # Game Implementations Module
//!
//! This module contains the concrete game played by the engine. The game
//! implements the `minimax::GameState` trait, which provides the consistent
//! interface the search algorithm and the user interface operate on:
//! - Move generation and validation
//! - State transitions and game rules
//! - Terminal state detection and winner determination
//! - Current player tracking

pub mod tictactoe;
