use ballsort_solver::engine::{Game, Move};
use ballsort_solver::logging;
use ballsort_solver::solver::solve_best_first;
use ballsort_solver::utils::read_puzzles;
use clap::Parser;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;
use std::process;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Play a ball sort puzzle interactively", long_about = None)]
struct Args {
    /// Path to the puzzle file
    puzzle_file: PathBuf,

    /// Which problem block of the file to play (0-based)
    #[clap(short, long, default_value_t = 0)]
    index: usize,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn load_game(args: &Args) -> Result<Game, String> {
    let file = File::open(&args.puzzle_file)
        .map_err(|e| format!("Failed to read file {}: {}", args.puzzle_file.display(), e))?;
    let puzzles =
        read_puzzles(BufReader::new(file)).map_err(|e| format!("Invalid puzzle file: {}", e))?;
    let count = puzzles.len();
    puzzles
        .into_iter()
        .nth(args.index)
        .map(Game::new)
        .ok_or_else(|| format!("Problem {} not found (file holds {})", args.index, count))
}

fn main() {
    let args = Args::parse();
    logging::init(args.verbose);

    let mut game = match load_game(&args) {
        Ok(game) => game,
        Err(err) => {
            eprintln!("{}", err);
            process::exit(1);
        }
    };
    println!("Welcome to Ball Sort!");

    loop {
        println!("---------------------");
        println!("Steps: {}", game.steps());
        for (i, line) in game.state().to_string().lines().enumerate() {
            println!("{:>2}: {}", i, line);
        }

        if game.is_solved() {
            println!("---------------------");
            println!("🎉 SORTED! 🎉");
            println!("Total Steps: {}", game.steps());
            for mv in game.moves() {
                println!("  {}", mv);
            }
            break;
        }

        print!("Enter your move (from to), 'h' for a hint, 'u' to undo, 'q' to quit: ");
        if io::stdout().flush().is_err() {
            break;
        }

        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(0) => break,
            Ok(_) => {}
            Err(_) => {
                println!("Error reading input. Please try again.");
                continue;
            }
        }

        match input.trim() {
            "q" => {
                println!("Thanks for playing!");
                break;
            }
            "u" => {
                if game.undo_last_move() {
                    println!("Move undone.");
                } else {
                    println!("Cannot undo further (no moves made).");
                }
            }
            "h" => match solve_best_first(game.state()).and_then(|route| route.first().copied()) {
                Some(mv) => println!("Hint: {}", mv),
                None => println!("No solution from here. Try undoing."),
            },
            other => {
                let parts: Vec<&str> = other.split_whitespace().collect();
                let parsed = match parts.as_slice() {
                    [from, to] => from.parse::<usize>().ok().zip(to.parse::<usize>().ok()),
                    _ => None,
                };
                match parsed {
                    Some((from, to)) => match game.process_move(Move::new(from, to)) {
                        Ok(()) => println!("Moved {}.", Move::new(from, to)),
                        Err(err) => println!("Invalid move: {}.", err),
                    },
                    None => println!("Invalid input format. Use 'from to', 'h', 'u', or 'q'."),
                }
            }
        }
    }
}
