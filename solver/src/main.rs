use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use hashi::{Board, Puzzle, SolverConfig, Step};

/// Solve a Hashiwokakero board stored in a text file.
///
/// The file starts with a `rows,cols` line followed by one line of digits per row, `0` for open water.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Board file to solve.
    board: PathBuf,
    /// Give up after visiting this many search nodes.
    #[arg(long, default_value_t = SolverConfig::default().max_iterations)]
    max_iterations: usize,
    /// Skip the forced-move pass and go straight to searching.
    #[arg(long)]
    no_propagate: bool,
    /// Print every bridge in the order it was laid.
    #[arg(long)]
    steps: bool,
    /// Increase log verbosity; repeat for more.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = match args.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::from_default_env().filter_level(level).init();

    let text = match std::fs::read_to_string(&args.board) {
        Ok(text) => text,
        Err(err) => {
            eprintln!("cannot read {}: {err}", args.board.display());
            return ExitCode::FAILURE;
        }
    };

    let board: Board = match text.parse() {
        Ok(board) => board,
        Err(err) => {
            eprintln!("cannot load {}: {err}", args.board.display());
            return ExitCode::FAILURE;
        }
    };

    println!("{board}");

    let config = SolverConfig {
        max_iterations: args.max_iterations,
        propagate: !args.no_propagate,
        ..SolverConfig::default()
    };

    let mut puzzle = Puzzle::new(board);
    match puzzle.solve(&config) {
        Ok(stats) => {
            log::info!("{stats:?}");
            if args.steps {
                for (index, Step::Added { from, to }) in puzzle.steps().iter().enumerate() {
                    println!("{:>4}: {from} -> {to}", index + 1);
                }
                println!();
            }
            print!("{puzzle}");
            ExitCode::SUCCESS
        }
        Err(failure) => {
            eprintln!("{failure}");
            ExitCode::FAILURE
        }
    }
}
