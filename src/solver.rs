//! Greedy best-first search over puzzle states.
//!
//! The search always expands the frontier state with the lowest
//! [`heuristic`](crate::heuristics::heuristic) score, breaking ties by
//! discovery order. It finds *a* solution, not necessarily the shortest one.
//! Because expanded states are never re-expanded and the state space of a
//! finite puzzle is finite, the search either finds a goal or exhausts every
//! reachable state.
use crate::engine::{Move, State};
use crate::heuristics::{heuristic, HeuristicFn};
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::rc::Rc;
use tracing::{debug, trace};

/// Represents a solution found by the solver.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    /// Moves leading from the initial state to a goal, in execution order.
    pub moves: Vec<Move>,
    /// Number of states that were expanded (had their neighbors generated).
    pub expanded: usize,
    /// Number of distinct states discovered, including the initial one.
    pub discovered: usize,
}

/// Tuning knobs for a single solve.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SolverConfig {
    /// Give up after expanding this many states. `None` searches exhaustively.
    pub max_expansions: Option<usize>,
}

type NodeId = usize;

struct SearchNode {
    state: Rc<State>,
    parent: Option<(NodeId, Move)>,
}

/// Bookkeeping for one solve. Node ids double as discovery order.
struct SearchSpace {
    score: HeuristicFn,
    nodes: Vec<SearchNode>,
    index: HashMap<Rc<State>, NodeId>,
    open: HashSet<NodeId>,
    closed: HashSet<NodeId>,
    frontier: BinaryHeap<Reverse<(u32, NodeId)>>,
}

impl SearchSpace {
    fn new(root: &State, score: HeuristicFn) -> Self {
        let mut space = SearchSpace {
            score,
            nodes: Vec::new(),
            index: HashMap::new(),
            open: HashSet::new(),
            closed: HashSet::new(),
            frontier: BinaryHeap::new(),
        };
        space.discover(root.clone(), None);
        space
    }

    /// Returns `true` if `state` is on the frontier or already expanded.
    fn is_known(&self, state: &State) -> bool {
        self.index
            .get(state)
            .is_some_and(|id| self.open.contains(id) || self.closed.contains(id))
    }

    fn discover(&mut self, state: State, parent: Option<(NodeId, Move)>) {
        let id = self.nodes.len();
        let score = (self.score)(&state);
        let state = Rc::new(state);
        self.index.insert(Rc::clone(&state), id);
        self.nodes.push(SearchNode { state, parent });
        self.open.insert(id);
        self.frontier.push(Reverse((score, id)));
    }

    /// Removes the cheapest frontier node; earliest discovered wins ties.
    fn pop(&mut self) -> Option<NodeId> {
        let Reverse((_, id)) = self.frontier.pop()?;
        self.open.remove(&id);
        Some(id)
    }

    fn path_to(&self, goal: NodeId) -> Vec<Move> {
        let mut moves = Vec::new();
        let mut current = goal;
        while let Some((parent, mv)) = self.nodes[current].parent {
            moves.push(mv);
            current = parent;
        }
        moves.reverse();
        moves
    }
}

/// Solves the puzzle starting at `root`.
///
/// Returns the moves to a goal state, an empty list if `root` is already a
/// goal, or `None` if no goal is reachable.
///
/// # Examples
/// ```
/// use ballsort_solver::engine::{Capacity, Move, State};
/// use ballsort_solver::solver::solve_best_first;
/// let root = State::new(vec![vec!['A', 'B'], vec![]], vec![Capacity::Limited(2); 2]);
/// assert_eq!(solve_best_first(&root), Some(vec![Move::new(0, 1)]));
/// ```
pub fn solve_best_first(root: &State) -> Option<Vec<Move>> {
    solve_with_config(root, &SolverConfig::default()).map(|solution| solution.moves)
}

/// Solves the puzzle starting at `root`, reporting search statistics.
///
/// Returns `None` if the reachable states are exhausted without finding a
/// goal, or if `config.max_expansions` is reached first.
pub fn solve_with_config(root: &State, config: &SolverConfig) -> Option<Solution> {
    solve_with_heuristic(root, config, heuristic)
}

/// Runs the search ordered by a custom scoring function.
///
/// With [`uninformed`](crate::heuristics::uninformed) every state ties and the
/// search degrades to breadth-first order, which yields shortest routes.
pub fn solve_with_heuristic(
    root: &State,
    config: &SolverConfig,
    score: HeuristicFn,
) -> Option<Solution> {
    debug!(
        bins = root.num_bins(),
        colors = root.num_colors(),
        "starting best-first search"
    );
    let mut space = SearchSpace::new(root, score);
    let mut expanded = 0usize;

    while let Some(id) = space.pop() {
        let state = Rc::clone(&space.nodes[id].state);
        // Goal test comes before the closed-set check.
        if state.is_goal() {
            let moves = space.path_to(id);
            debug!(
                moves = moves.len(),
                expanded,
                discovered = space.nodes.len(),
                "goal reached"
            );
            return Some(Solution {
                moves,
                expanded,
                discovered: space.nodes.len(),
            });
        }
        if !space.closed.insert(id) {
            continue;
        }
        if config.max_expansions.is_some_and(|limit| expanded >= limit) {
            debug!(expanded, "expansion limit reached");
            return None;
        }
        expanded += 1;
        trace!(node = id, score = score(&state), "expanding");

        for (mv, next) in state.neighbors() {
            if !space.is_known(&next) {
                space.discover(next, Some((id, mv)));
            }
        }
    }

    debug!(
        expanded,
        discovered = space.nodes.len(),
        "search space exhausted"
    );
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Capacity;
    use crate::heuristics::uninformed;
    use std::collections::VecDeque;

    fn state_of(spec: &[&str], limit: usize) -> State {
        State::new(
            spec.iter().map(|s| s.chars().collect()).collect(),
            vec![Capacity::Limited(limit); spec.len()],
        )
    }

    fn any_goal_reachable(root: &State) -> bool {
        let mut seen = HashSet::new();
        let mut queue = VecDeque::new();
        seen.insert(root.clone());
        queue.push_back(root.clone());
        while let Some(state) = queue.pop_front() {
            if state.is_goal() {
                return true;
            }
            for (_, next) in state.neighbors() {
                if seen.insert(next.clone()) {
                    queue.push_back(next);
                }
            }
        }
        false
    }

    // Re-sorts a plain list before every extraction; the sort is stable, so
    // equal scores keep their discovery order.
    fn stable_sort_search(root: &State) -> Option<Vec<Move>> {
        let mut back: HashMap<State, (State, Move)> = HashMap::new();
        let mut queue = vec![root.clone()];
        let mut open: HashSet<State> = HashSet::from([root.clone()]);
        let mut closed: HashSet<State> = HashSet::new();
        while !queue.is_empty() {
            queue.sort_by_key(heuristic);
            let current = queue.remove(0);
            open.remove(&current);
            if current.is_goal() {
                let mut route = Vec::new();
                let mut node = current;
                while node != *root {
                    let (prev, mv) = back[&node].clone();
                    route.push(mv);
                    node = prev;
                }
                route.reverse();
                return Some(route);
            }
            if !closed.insert(current.clone()) {
                continue;
            }
            for (mv, next) in current.neighbors() {
                if !closed.contains(&next) && !open.contains(&next) {
                    back.insert(next.clone(), (current.clone(), mv));
                    open.insert(next.clone());
                    queue.push(next);
                }
            }
        }
        None
    }

    #[test]
    fn test_ties_expand_in_discovery_order() {
        for seed in 0..20 {
            let root = State::new_random_with_seed(3, 3, 2, seed).unwrap();
            assert_eq!(solve_best_first(&root), stable_sort_search(&root), "seed {}", seed);
        }
        for seed in 0..10 {
            let root = State::new_random_with_seed(4, 2, 1, seed).unwrap();
            assert_eq!(solve_best_first(&root), stable_sort_search(&root), "seed {}", seed);
        }
        let root = state_of(&["PGYA", "PPBG", "", "BYRY", "YRRB", "GGBP", ""], 4);
        assert_eq!(solve_best_first(&root), stable_sort_search(&root));
    }

    #[test]
    fn test_solve_single_move() {
        let root = state_of(&["AB", ""], 2);
        assert_eq!(solve_best_first(&root), Some(vec![Move::new(0, 1)]));
    }

    #[test]
    fn test_solve_three_colors_replays_to_goal() {
        let root = state_of(&["ABC", "", ""], 3);
        let route = solve_best_first(&root).unwrap();
        assert!(!route.is_empty());
        assert!(root.replay(&route).unwrap().is_goal());
    }

    #[test]
    fn test_solve_seven_tubes() {
        let root = state_of(&["PGYA", "PPBG", "", "BYRY", "YRRB", "GGBP", ""], 4);
        let route = solve_best_first(&root).unwrap();
        assert!(!route.is_empty());
        assert!(root.replay(&route).unwrap().is_goal());
    }

    #[test]
    fn test_solve_already_sorted() {
        let root = state_of(&["AA", "", "BB"], 2);
        let solution = solve_with_config(&root, &SolverConfig::default()).unwrap();
        assert!(solution.moves.is_empty());
        assert_eq!(solution.expanded, 0);
        assert_eq!(solution.discovered, 1);
    }

    #[test]
    fn test_solve_unsolvable() {
        // Three colors but only two tubes.
        let root = state_of(&["ABC", ""], 3);
        assert_eq!(solve_best_first(&root), None);
    }

    #[test]
    fn test_solve_no_legal_moves() {
        let root = State::new(
            vec!["AB".chars().collect(), vec!['C']],
            vec![Capacity::Limited(2), Capacity::Limited(1)],
        );
        assert_eq!(solve_best_first(&root), None);
    }

    #[test]
    fn test_solve_with_unlimited_tubes() {
        let root = State::new(
            vec!["AAB".chars().collect(), vec![], vec!['B']],
            vec![Capacity::Unlimited; 3],
        );
        let route = solve_best_first(&root).unwrap();
        assert!(root.replay(&route).unwrap().is_goal());
    }

    #[test]
    fn test_expansion_limit() {
        let root = state_of(&["ABC", "", ""], 3);
        let config = SolverConfig {
            max_expansions: Some(0),
        };
        assert_eq!(solve_with_config(&root, &config), None);

        let sorted = state_of(&["AAA", "", ""], 3);
        assert!(solve_with_config(&sorted, &config).is_some());
    }

    #[test]
    fn test_solution_statistics() {
        let root = state_of(&["ABC", "", ""], 3);
        let solution = solve_with_config(&root, &SolverConfig::default()).unwrap();
        assert!(solution.expanded >= 1);
        assert!(solution.discovered > solution.expanded);
    }

    #[test]
    fn test_finds_goal_whenever_one_is_reachable() {
        for seed in 0..12 {
            let root = State::new_random_with_seed(3, 2, 1, seed).unwrap();
            let route = solve_best_first(&root);
            assert_eq!(route.is_some(), any_goal_reachable(&root), "seed {}", seed);
            if let Some(route) = route {
                assert!(root.replay(&route).unwrap().is_goal(), "seed {}", seed);
            }
        }
    }

    #[test]
    fn test_uninformed_search_finds_shortest_route() {
        let root = state_of(&["AB", "BA", ""], 2);
        let solution = solve_with_heuristic(&root, &SolverConfig::default(), uninformed).unwrap();
        let greedy = solve_best_first(&root).unwrap();
        assert!(root.replay(&solution.moves).unwrap().is_goal());
        assert!(solution.moves.len() <= greedy.len());
        assert_eq!(solution.moves.len(), 3);
    }
}
