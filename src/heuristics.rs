use crate::engine::{distinct_colors, State};

/// Scores a state for the search; the lowest score is expanded first.
pub type HeuristicFn = fn(&State) -> u32;

/// Scores how mixed a state's tubes are. Lower is better.
///
/// Each tube contributes `(distinct_colors - 1)^2`, or nothing if it holds at
/// most one color. A score of zero means every tube is single-colored, which
/// is necessary but not sufficient for a goal: a color may still be split
/// across tubes. The score does not bound the remaining number of moves.
///
/// # Examples
/// ```
/// use ballsort_solver::engine::{Capacity, State};
/// use ballsort_solver::heuristics::heuristic;
/// let tubes = vec!["ABC".chars().collect(), "AB".chars().collect()];
/// let state = State::new(tubes, vec![Capacity::Unlimited; 2]);
/// assert_eq!(heuristic(&state), 4 + 1);
/// ```
pub fn heuristic(state: &State) -> u32 {
    state
        .bins()
        .iter()
        .map(|tube| {
            let excess = distinct_colors(tube).saturating_sub(1) as u32;
            excess * excess
        })
        .sum()
}

/// Scores every state equally, so the search expands in discovery order.
pub fn uninformed(_state: &State) -> u32 {
    0
}

/// Counts the tubes holding more than one color.
pub fn count_mixed_bins(state: &State) -> usize {
    state
        .bins()
        .iter()
        .filter(|tube| distinct_colors(tube) > 1)
        .count()
}

/// Counts the empty tubes.
pub fn count_empty_bins(state: &State) -> usize {
    state.bins().iter().filter(|tube| tube.is_empty()).count()
}
