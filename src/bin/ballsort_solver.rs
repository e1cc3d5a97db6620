use ballsort_solver::logging;
use ballsort_solver::solver::{solve_with_config, SolverConfig};
use ballsort_solver::utils::{read_puzzles, render_solution};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::process;

const FORMAT_HELP: &str = "\
Problems in FILE are split by lines starting with a hyphen, and a line
starting with '#' is a comment. Each remaining line describes one tube as
`<limit> [<balls>`, where <limit> is the tube capacity or `oo` for unlimited,
and the balls are listed from the bottom of the tube to the top:

    # Problem 1: two unlimited tubes, the first holding 'A' under 'B'.
    oo [AB
    oo [
    ---
    # Problem 2: tubes holding at most 3, 4 and 5 balls.
    3 [ABC
    4 [
    5 [B

Tubes are numbered from 0. `X->Y` in the answer moves the top ball of tube X
onto tube Y. Each answer is followed by a `---` line, and an unsolvable
problem prints `<no solution>`. A problem that is already sorted needs no
moves, so its answer is just the `---` line.";

#[derive(Parser, Debug)]
#[clap(
    author,
    version,
    about = "Ball sort puzzle solver",
    long_about = None,
    after_help = FORMAT_HELP
)]
struct Args {
    /// Path to the FILE containing problems to solve, or `-` to read from stdin
    #[clap(value_name = "FILE")]
    problems: String,

    /// Give up on a problem after expanding this many states
    #[clap(long)]
    max_expansions: Option<usize>,

    /// Print search statistics for each problem to stderr
    #[clap(long)]
    stats: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let puzzles = if args.problems == "-" {
        read_puzzles(io::stdin().lock())?
    } else {
        let file = File::open(&args.problems)
            .map_err(|e| format!("failed to open {}: {}", args.problems, e))?;
        read_puzzles(BufReader::new(file))?
    };
    tracing::info!(count = puzzles.len(), "loaded problems");

    let config = SolverConfig {
        max_expansions: args.max_expansions,
    };
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for (i, state) in puzzles.iter().enumerate() {
        let solution = solve_with_config(state, &config);
        if args.stats {
            match &solution {
                Some(s) => eprintln!(
                    "problem {}: {} moves, {} expanded, {} discovered",
                    i,
                    s.moves.len(),
                    s.expanded,
                    s.discovered
                ),
                None => eprintln!("problem {}: no solution", i),
            }
        }
        let route = solution.as_ref().map(|s| s.moves.as_slice());
        out.write_all(render_solution(route).as_bytes())?;
        out.flush()?;
    }
    Ok(())
}

fn main() {
    let args = Args::parse();
    logging::init(args.verbose);

    if let Err(err) = run(&args) {
        if let Some(io_err) = err.downcast_ref::<io::Error>() {
            if io_err.kind() == io::ErrorKind::BrokenPipe {
                return;
            }
        }
        eprintln!("Error: {}", err);
        process::exit(1);
    }
}
