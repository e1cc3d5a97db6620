use ballsort_solver::engine::State;
use ballsort_solver::heuristics::{
    count_empty_bins, count_mixed_bins, heuristic, uninformed, HeuristicFn,
};
use ballsort_solver::logging;
use ballsort_solver::solver::{solve_with_heuristic, SolverConfig};
use clap::Parser;
use std::collections::HashMap;
use std::process;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Compare search heuristics on random puzzles", long_about = None)]
struct Args {
    /// Number of random puzzles to evaluate
    #[clap(short, long, default_value_t = 20)]
    puzzles: u64,

    /// Colors per puzzle
    #[clap(short, long, default_value_t = 4)]
    colors: usize,

    /// Balls per color, which is also every tube's capacity
    #[clap(long, default_value_t = 4)]
    height: usize,

    /// Extra empty tubes
    #[clap(short, long, default_value_t = 2)]
    empty: usize,

    /// Seed of the first puzzle; puzzle i uses seed + i
    #[clap(short, long, default_value_t = 0)]
    seed: u64,

    /// Give up on a puzzle after expanding this many states
    #[clap(long)]
    max_expansions: Option<usize>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Default)]
struct Totals {
    solved: usize,
    moves: usize,
    expanded: usize,
}

fn main() {
    let args = Args::parse();
    logging::init(args.verbose);

    let strategies: Vec<(&str, HeuristicFn)> = vec![("MIXED", heuristic), ("BFS", uninformed)];
    let config = SolverConfig {
        max_expansions: args.max_expansions,
    };
    let mut totals: HashMap<&str, Totals> = HashMap::new();

    println!("Starting heuristic evaluation for {} puzzles...", args.puzzles);

    for puzzle_idx in 0..args.puzzles {
        let current_seed = args.seed + puzzle_idx;
        let generated =
            State::new_random_with_seed(args.colors, args.height, args.empty, current_seed);
        let root = match generated {
            Ok(state) => state,
            Err(err) => {
                eprintln!("Error: {}", err);
                process::exit(1);
            }
        };

        println!("\nEvaluating Puzzle {} (Seed: {})", puzzle_idx, current_seed);
        println!(
            "  Mixed tubes: {}, Empty tubes: {}, Initial score: {}",
            count_mixed_bins(&root),
            count_empty_bins(&root),
            heuristic(&root)
        );

        for (name, score) in &strategies {
            let entry = totals.entry(*name).or_default();
            match solve_with_heuristic(&root, &config, *score) {
                Some(solution) => {
                    println!(
                        "  Strategy: {:<6}, Moves: {:<5}, Expanded: {}",
                        name,
                        solution.moves.len(),
                        solution.expanded
                    );
                    entry.solved += 1;
                    entry.moves += solution.moves.len();
                    entry.expanded += solution.expanded;
                }
                None => println!("  Strategy: {:<6}, no solution", name),
            }
        }
    }

    println!("\n--- Evaluation Complete ---");
    println!("Number of puzzles evaluated: {}", args.puzzles);
    println!(
        "Strategies evaluated: {}",
        strategies.iter().map(|(name, _)| *name).collect::<Vec<&str>>().join(", ")
    );
    println!("\n--- Averages over solved puzzles ---");

    for (name, _) in &strategies {
        let Some(t) = totals.get(name) else {
            continue;
        };
        if t.solved == 0 {
            println!("Strategy {:<6}: no puzzles solved.", name);
            continue;
        }
        println!(
            "Strategy {:<6}: Solved = {}, Average Moves = {:.2}, Average Expanded = {:.2}",
            name,
            t.solved,
            t.moves as f64 / t.solved as f64,
            t.expanded as f64 / t.solved as f64
        );
    }
}
