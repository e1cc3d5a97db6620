//! # Ball-Sort Solver Library
//!
//! This library provides the state model for ball-sort puzzles and a greedy
//! best-first search that finds a sequence of single-ball moves sorting every
//! tube down to one color.
//!
//! It is used by three binaries:
//! - `ballsort_solver`: Reads puzzle blocks from a file (or stdin) and prints
//!   a move list for each.
//! - `human_player`: Lets you play a loaded puzzle interactively, with undo
//!   and solver hints.
//! - `heuristic_evaluator`: Solves seeded random puzzles and compares the
//!   search heuristics.
//!
//! ## Modules
//! - `engine`: Tube capacities (`Capacity`), moves (`Move`), the puzzle state
//!   (`State`) with move generation and the goal test, and the interactive `Game`.
//! - `heuristics`: Scoring functions used to order the search.
//! - `solver`: The best-first search (`solve_best_first`, `solve_with_config`).
//! - `utils`: Parsing the puzzle text format and rendering move lists.
//! - `error`: Error types.
//! - `logging`: Shared `tracing` setup for the binaries.

pub mod engine;
pub mod error;
pub mod heuristics;
pub mod logging;
pub mod solver;
pub mod utils;
