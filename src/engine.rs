//! Core state model for the ball-sort puzzle.
//!
//! This module defines the puzzle's fundamental components:
//! - `Capacity`: the ball limit of a tube, either a fixed count or unlimited.
//! - `Move`: a single relocation of the top ball of one tube onto another.
//! - `State`: a snapshot of every tube's contents and limit, with equality
//!   and hashing that ignore tube order.
//! - `Game`: an interactive session over a `State`, with move history and undo.
use crate::error::{GenerateError, MoveError};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A ball is identified by its color symbol.
pub type Ball = char;

/// Symbols handed out by the random generator, in order.
const RANDOM_BALL_SYMBOLS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Token used to render an unlimited capacity.
pub const UNLIMITED_TOKEN: &str = "oo";

/// The number of balls a tube can hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Capacity {
    /// The tube holds at most this many balls.
    Limited(usize),
    /// The tube never fills up.
    Unlimited,
}

impl Capacity {
    /// Returns `true` if a tube currently holding `len` balls can accept one more.
    ///
    /// # Examples
    ///
    /// ```
    /// use ballsort_solver::engine::Capacity;
    /// assert!(Capacity::Limited(3).admits(2));
    /// assert!(!Capacity::Limited(3).admits(3));
    /// assert!(Capacity::Unlimited.admits(1_000));
    /// ```
    pub fn admits(&self, len: usize) -> bool {
        match self {
            Capacity::Limited(limit) => len < *limit,
            Capacity::Unlimited => true,
        }
    }
}

impl fmt::Display for Capacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capacity::Limited(limit) => write!(f, "{}", limit),
            Capacity::Unlimited => f.write_str(UNLIMITED_TOKEN),
        }
    }
}

/// Moves the top ball of tube `from` onto tube `to`.
///
/// Rendered as `from->to`, which is the notation printed by the solver binary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Move {
    pub from: usize,
    pub to: usize,
}

impl Move {
    pub fn new(from: usize, to: usize) -> Self {
        Move { from, to }
    }

    /// The move that undoes this one, if it is legal in the resulting state.
    pub fn reverse(&self) -> Self {
        Move {
            from: self.to,
            to: self.from,
        }
    }
}

impl From<(usize, usize)> for Move {
    fn from((from, to): (usize, usize)) -> Self {
        Move { from, to }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.from, self.to)
    }
}

/// Counts the distinct colors in one tube.
pub fn distinct_colors(tube: &[Ball]) -> usize {
    let mut seen: Vec<Ball> = Vec::with_capacity(tube.len());
    for &ball in tube {
        if !seen.contains(&ball) {
            seen.push(ball);
        }
    }
    seen.len()
}

/// A snapshot of every tube in a puzzle.
///
/// Tubes keep their index, which is how moves address them, but two states
/// compare equal (and hash identically) whenever one is a reordering of the
/// other's `(contents, capacity)` pairs. The sorted form of those pairs is
/// computed once on construction and drives `PartialEq` and `Hash`.
///
/// States are never mutated; `apply` returns a fresh copy.
#[derive(Clone, Debug)]
pub struct State {
    bins: Vec<Vec<Ball>>,
    limits: Vec<Capacity>,
    num_colors: usize,
    canonical: Vec<(Vec<Ball>, Capacity)>,
}

impl State {
    /// Creates a state from parallel tube and capacity lists.
    ///
    /// Each tube lists its balls bottom-to-top; the last element is the top.
    ///
    /// # Panics
    /// Panics if `bins` and `limits` have different lengths.
    ///
    /// # Examples
    /// ```
    /// use ballsort_solver::engine::{Capacity, State};
    /// let state = State::new(vec![vec!['A', 'B'], vec![]], vec![Capacity::Limited(2); 2]);
    /// assert_eq!(state.num_bins(), 2);
    /// assert_eq!(state.num_colors(), 2);
    /// assert!(!state.is_goal());
    /// ```
    pub fn new(bins: Vec<Vec<Ball>>, limits: Vec<Capacity>) -> Self {
        assert_eq!(
            bins.len(),
            limits.len(),
            "every tube needs exactly one capacity"
        );
        let num_colors = bins
            .iter()
            .flatten()
            .copied()
            .collect::<HashSet<Ball>>()
            .len();
        Self::with_colors(bins, limits, num_colors)
    }

    /// Creates a state from `(contents, capacity)` pairs in tube order.
    pub fn from_tubes(tubes: Vec<(Vec<Ball>, Capacity)>) -> Self {
        let (bins, limits) = tubes.into_iter().unzip();
        Self::new(bins, limits)
    }

    // Moves never add or remove colors, so successors inherit the count.
    fn with_colors(bins: Vec<Vec<Ball>>, limits: Vec<Capacity>, num_colors: usize) -> Self {
        let mut canonical: Vec<(Vec<Ball>, Capacity)> = bins
            .iter()
            .cloned()
            .zip(limits.iter().copied())
            .collect();
        canonical.sort_unstable();
        State {
            bins,
            limits,
            num_colors,
            canonical,
        }
    }

    /// Generates a shuffled puzzle from a seed.
    ///
    /// `colors * height` balls (`height` of each color) are shuffled and dealt
    /// into `colors` tubes of capacity `height`, followed by `empty` empty tubes
    /// of the same capacity. The same arguments always produce the same state.
    ///
    /// # Errors
    /// Returns a `GenerateError` if `colors` is zero or exceeds the available
    /// symbols, or if `height` is zero.
    pub fn new_random_with_seed(
        colors: usize,
        height: usize,
        empty: usize,
        seed: u64,
    ) -> Result<Self, GenerateError> {
        if colors == 0 {
            return Err(GenerateError::NoColors);
        }
        if height == 0 {
            return Err(GenerateError::ZeroHeight);
        }
        let max = RANDOM_BALL_SYMBOLS.chars().count();
        if colors > max {
            return Err(GenerateError::TooManyColors { colors, max });
        }

        let mut balls: Vec<Ball> = RANDOM_BALL_SYMBOLS
            .chars()
            .take(colors)
            .flat_map(|symbol| std::iter::repeat(symbol).take(height))
            .collect();
        let mut rng = SmallRng::seed_from_u64(seed);
        balls.shuffle(&mut rng);

        let mut bins: Vec<Vec<Ball>> = balls.chunks(height).map(|c| c.to_vec()).collect();
        bins.extend(std::iter::repeat_with(Vec::new).take(empty));
        let limits = vec![Capacity::Limited(height); bins.len()];
        Ok(Self::new(bins, limits))
    }

    /// Tube contents in index order, each listed bottom-to-top.
    pub fn bins(&self) -> &[Vec<Ball>] {
        &self.bins
    }

    /// Tube capacities in index order.
    pub fn limits(&self) -> &[Capacity] {
        &self.limits
    }

    pub fn num_bins(&self) -> usize {
        self.bins.len()
    }

    /// Number of distinct colors across all tubes, fixed at construction.
    pub fn num_colors(&self) -> usize {
        self.num_colors
    }

    /// Moves the top ball of `mv.from` onto `mv.to`, returning the new state.
    ///
    /// The receiver is left untouched.
    ///
    /// # Errors
    /// * `MoveError::OutOfRange` if either index does not name a tube.
    /// * `MoveError::EmptySource` if the source tube has no ball.
    /// * `MoveError::DestinationFull` if the destination is at its limit.
    ///
    /// # Examples
    /// ```
    /// use ballsort_solver::engine::{Capacity, Move, State};
    /// let state = State::new(vec![vec!['A', 'B'], vec![]], vec![Capacity::Limited(2); 2]);
    /// let next = state.apply(Move::new(0, 1)).unwrap();
    /// assert_eq!(next.bins(), &[vec!['A'], vec!['B']]);
    /// assert!(state.apply(Move::new(1, 0)).is_err());
    /// ```
    pub fn apply(&self, mv: Move) -> Result<State, MoveError> {
        let bins = self.bins.len();
        for index in [mv.from, mv.to] {
            if index >= bins {
                return Err(MoveError::OutOfRange { index, bins });
            }
        }
        if self.bins[mv.from].is_empty() {
            return Err(MoveError::EmptySource { from: mv.from });
        }
        if !self.limits[mv.to].admits(self.bins[mv.to].len()) {
            return Err(MoveError::DestinationFull { to: mv.to });
        }

        let mut next = self.bins.clone();
        if let Some(ball) = next[mv.from].pop() {
            next[mv.to].push(ball);
        }
        Ok(State::with_colors(next, self.limits.clone(), self.num_colors))
    }

    /// Applies `moves` in order, stopping at the first illegal one.
    pub fn replay(&self, moves: &[Move]) -> Result<State, MoveError> {
        moves
            .iter()
            .try_fold(self.clone(), |state, &mv| state.apply(mv))
    }

    /// Enumerates every legal move and the state it leads to.
    ///
    /// Candidate pairs are tried in ascending `(from, to)` order with
    /// `from != to`. Illegal candidates are skipped. When two moves lead to
    /// equal states, only the first one is kept, so the result never holds two
    /// equal successors.
    ///
    /// # Examples
    /// ```
    /// use ballsort_solver::engine::{Capacity, Move, State};
    /// // Moving 'A' into either empty tube yields equal states.
    /// let state = State::new(vec![vec!['A'], vec![], vec![]], vec![Capacity::Unlimited; 3]);
    /// let moves: Vec<Move> = state.neighbors().into_iter().map(|(mv, _)| mv).collect();
    /// assert_eq!(moves, vec![Move::new(0, 1)]);
    /// ```
    pub fn neighbors(&self) -> Vec<(Move, State)> {
        let n = self.bins.len();
        let mut seen: HashSet<State> = HashSet::new();
        let mut successors = Vec::new();
        for from in 0..n {
            for to in (0..n).filter(|&to| to != from) {
                let mv = Move::new(from, to);
                let Ok(next) = self.apply(mv) else {
                    continue;
                };
                if seen.insert(next.clone()) {
                    successors.push((mv, next));
                }
            }
        }
        successors
    }

    /// Returns `true` if the puzzle is sorted.
    ///
    /// Every non-empty tube must hold a single color, and exactly
    /// `num_bins - num_colors` tubes must be empty, i.e. no color is split
    /// across two tubes.
    pub fn is_goal(&self) -> bool {
        let uniform = self.bins.iter().all(|tube| distinct_colors(tube) <= 1);
        let empty = self.bins.iter().filter(|tube| tube.is_empty()).count();
        uniform && empty + self.num_colors == self.bins.len()
    }
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.canonical == other.canonical
    }
}

impl Eq for State {}

impl Hash for State {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical.hash(state);
    }
}

impl fmt::Display for State {
    /// One line per tube: the right-aligned capacity, then `[` and the balls
    /// from bottom to top. This is also the puzzle file format.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tokens: Vec<String> = self.limits.iter().map(|l| l.to_string()).collect();
        let width = tokens.iter().map(|t| t.len()).max().unwrap_or(0);
        for (i, (token, tube)) in tokens.iter().zip(&self.bins).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let balls: String = tube.iter().collect();
            write!(f, "{:>width$} [{}", token, balls, width = width)?;
        }
        Ok(())
    }
}

/// An interactive session over a puzzle, with undo.
///
/// # Examples
/// ```
/// use ballsort_solver::engine::{Capacity, Game, Move, State};
/// let start = State::new(vec![vec!['A', 'B'], vec![]], vec![Capacity::Limited(2); 2]);
/// let mut game = Game::new(start);
/// assert!(game.process_move(Move::new(0, 1)).is_ok());
/// assert!(game.is_solved());
/// assert!(game.undo_last_move());
/// assert_eq!(game.steps(), 0);
/// ```
#[derive(Clone, Debug)]
pub struct Game {
    state: State,
    history: Vec<(State, Move)>, // (state before the move, the move)
}

impl Game {
    pub fn new(initial: State) -> Self {
        Game {
            state: initial,
            history: Vec::new(),
        }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    /// Number of moves currently on the history stack.
    pub fn steps(&self) -> usize {
        self.history.len()
    }

    /// Moves made so far, in order.
    pub fn moves(&self) -> Vec<Move> {
        self.history.iter().map(|(_, mv)| *mv).collect()
    }

    /// Applies `mv` to the current state and records it for undo.
    ///
    /// On error the session is unchanged.
    pub fn process_move(&mut self, mv: Move) -> Result<(), MoveError> {
        let next = self.state.apply(mv)?;
        let prev = std::mem::replace(&mut self.state, next);
        self.history.push((prev, mv));
        Ok(())
    }

    /// Reverts the last move. Returns `false` if there is nothing to undo.
    pub fn undo_last_move(&mut self) -> bool {
        match self.history.pop() {
            Some((prev, _)) => {
                self.state = prev;
                true
            }
            None => false,
        }
    }

    pub fn is_solved(&self) -> bool {
        self.state.is_goal()
    }
}
