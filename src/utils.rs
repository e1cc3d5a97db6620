//! Puzzle file loading and solution rendering.
//!
//! A puzzle file holds one or more problem blocks separated by lines starting
//! with `-`. Lines starting with `#` are comments and blank lines are ignored.
//! Every other line describes one tube as `<limit> [<balls>`, where `<limit>`
//! is a positive integer or any non-numeric token (conventionally `oo`)
//! meaning unlimited, and `<balls>` lists single-character colors from the
//! bottom of the tube to the top.
use crate::engine::{Ball, Capacity, Move, State};
use crate::error::ParseError;
use std::io::BufRead;
use std::num::IntErrorKind;

/// Printed in place of a move list when a puzzle has no solution.
pub const NO_SOLUTION: &str = "<no solution>";

/// Printed after each puzzle's output.
pub const PUZZLE_SEPARATOR: &str = "---";

/// Parses a capacity token. Non-numeric tokens mean unlimited.
///
/// Returns `None` for the numeric limit `0`, which could never hold a ball,
/// and for decimal limits too large to represent.
///
/// # Examples
/// ```
/// use ballsort_solver::engine::Capacity;
/// use ballsort_solver::utils::parse_capacity;
/// assert_eq!(parse_capacity("4"), Some(Capacity::Limited(4)));
/// assert_eq!(parse_capacity("oo"), Some(Capacity::Unlimited));
/// assert_eq!(parse_capacity("0"), None);
/// assert_eq!(parse_capacity("99999999999999999999999"), None);
/// ```
pub fn parse_capacity(token: &str) -> Option<Capacity> {
    match token.parse::<usize>() {
        Ok(0) => None,
        Ok(limit) => Some(Capacity::Limited(limit)),
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => None,
        Err(_) => Some(Capacity::Unlimited),
    }
}

/// Parses one `<limit> [<balls>` line. `line_no` is used in error messages.
pub fn parse_tube(line_no: usize, line: &str) -> Result<(Vec<Ball>, Capacity), ParseError> {
    let line = line.trim();
    let (token, rest) = line
        .split_once(char::is_whitespace)
        .ok_or(ParseError::MissingTube { line: line_no })?;
    let balls = rest
        .trim_start()
        .strip_prefix('[')
        .ok_or(ParseError::MissingBracket { line: line_no })?;
    let capacity = parse_capacity(token).ok_or_else(|| ParseError::InvalidLimit {
        line: line_no,
        token: token.to_string(),
    })?;
    Ok((balls.chars().collect(), capacity))
}

/// Builds a state from numbered tube lines, in file order.
pub fn state_from_lines(lines: &[(usize, &str)]) -> Result<State, ParseError> {
    let tubes = lines
        .iter()
        .map(|&(line_no, line)| parse_tube(line_no, line))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(State::from_tubes(tubes))
}

/// Parses every problem block in `input`.
///
/// # Examples
/// ```
/// use ballsort_solver::utils::parse_puzzles;
/// let input = "# two tubes\noo [AB\noo [\n---\n3 [ABC\n4 [\n5 [B\n";
/// let puzzles = parse_puzzles(input).unwrap();
/// assert_eq!(puzzles.len(), 2);
/// assert_eq!(puzzles[1].num_bins(), 3);
/// ```
pub fn parse_puzzles(input: &str) -> Result<Vec<State>, ParseError> {
    let mut states = Vec::new();
    let mut block: Vec<(usize, &str)> = Vec::new();

    for (i, raw) in input.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if line.starts_with('-') {
            if !block.is_empty() {
                states.push(state_from_lines(&block)?);
                block.clear();
            }
            continue;
        }
        block.push((i + 1, line));
    }
    if !block.is_empty() {
        states.push(state_from_lines(&block)?);
    }
    Ok(states)
}

/// Reads all of `reader` and parses its problem blocks.
pub fn read_puzzles<R: BufRead>(mut reader: R) -> Result<Vec<State>, ParseError> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;
    parse_puzzles(&input)
}

/// Renders a solver result as printed by the solver binary.
///
/// Each move goes on its own line as `from->to`; a missing route becomes
/// [`NO_SOLUTION`]. The output always ends with the [`PUZZLE_SEPARATOR`] line.
///
/// # Examples
/// ```
/// use ballsort_solver::engine::Move;
/// use ballsort_solver::utils::render_solution;
/// assert_eq!(render_solution(Some(&[Move::new(0, 1), Move::new(0, 2)])), "0->1\n0->2\n---\n");
/// assert_eq!(render_solution(None), "<no solution>\n---\n");
/// ```
pub fn render_solution(route: Option<&[Move]>) -> String {
    let mut output = String::new();
    match route {
        Some(moves) => {
            for mv in moves {
                output.push_str(&mv.to_string());
                output.push('\n');
            }
        }
        None => {
            output.push_str(NO_SOLUTION);
            output.push('\n');
        }
    }
    output.push_str(PUZZLE_SEPARATOR);
    output.push('\n');
    output
}
