use std::marker::PhantomData;

/// The state of the game. Must be cloneable so the search can explore
/// child positions on private snapshots without touching the original.
pub trait GameState: Clone {
    /// The type of a move in the game.
    type Move: Clone + Eq + std::hash::Hash + std::fmt::Debug;

    /// Returns a vector of all possible moves from the current state.
    fn get_possible_moves(&self) -> Vec<Self::Move>;
    /// Applies a move to the state, modifying it.
    fn make_move(&mut self, mv: &Self::Move);
    /// Returns true if the game is over.
    fn is_terminal(&self) -> bool;
    /// Returns the winner of the game, if any.
    /// Should return `Some(player_id)` if a player has won, `None` for a draw or if the game is not over.
    fn get_winner(&self) -> Option<i32>;
    /// Returns the player whose turn it is to move.
    fn get_current_player(&self) -> i32;
}

/// Base score for a won position. A win at depth `d` scores `WIN_SCORE - d`
/// and a loss scores `d - WIN_SCORE`, so the engine prefers faster wins and
/// slower losses.
pub const WIN_SCORE: i32 = 10;

/// The minimax engine.
///
/// Performs a full-width, full-depth search of the game tree. No pruning and
/// no depth limit: intended for games whose complete tree is small enough to
/// enumerate (tic-tac-toe tops out at 9! leaf positions).
#[derive(Debug)]
pub struct Minimax<S: GameState> {
    /// The player id the engine maximizes for.
    max_player: i32,
    _game: PhantomData<S>,
}

impl<S: GameState> Minimax<S> {
    /// Creates a new minimax engine.
    ///
    /// # Arguments
    /// * `max_player` - The player id (as reported by `get_current_player`)
    ///   whose outcome the engine maximizes.
    pub fn new(max_player: i32) -> Self {
        Minimax {
            max_player,
            _game: PhantomData,
        }
    }

    /// Returns the player id this engine maximizes for.
    pub fn max_player(&self) -> i32 {
        self.max_player
    }

    /// Searches for the best move from the given state.
    ///
    /// Candidates are evaluated in the order `get_possible_moves` yields
    /// them, and a later candidate replaces the incumbent only on a strictly
    /// greater score. The result is therefore deterministic: the first-found
    /// maximal move wins ties.
    ///
    /// Returns `None` only when the state has no moves (terminal position).
    /// Must be invoked on states where `max_player` is to move.
    pub fn search(&self, state: &S) -> Option<S::Move> {
        let mut best: Option<(S::Move, i32)> = None;
        for mv in state.get_possible_moves() {
            let mut child = state.clone();
            child.make_move(&mv);
            let score = self.score(&child, 0);
            log::trace!("candidate {:?} scores {}", mv, score);
            let improves = match best {
                Some((_, best_score)) => score > best_score,
                None => true,
            };
            if improves {
                best = Some((mv, score));
            }
        }
        if let Some((ref mv, score)) = best {
            log::debug!("search chose {:?} with score {}", mv, score);
        }
        best.map(|(mv, _)| mv)
    }

    /// Scores a position by exhaustive recursion.
    ///
    /// Terminal positions are scored directly; otherwise the mover's best
    /// reply decides: `max_player` takes the maximum over children, the
    /// opponent takes the minimum. `depth` grows by one per ply.
    fn score(&self, state: &S, depth: i32) -> i32 {
        if let Some(winner) = state.get_winner() {
            return if winner == self.max_player {
                WIN_SCORE - depth
            } else {
                depth - WIN_SCORE
            };
        }
        let moves = state.get_possible_moves();
        if moves.is_empty() {
            // Board full with no winner: a draw.
            return 0;
        }
        let maximizing = state.get_current_player() == self.max_player;
        let mut best = if maximizing { i32::MIN } else { i32::MAX };
        for mv in moves {
            let mut child = state.clone();
            child.make_move(&mv);
            let score = self.score(&child, depth + 1);
            best = if maximizing {
                best.max(score)
            } else {
                best.min(score)
            };
        }
        best
    }
}
