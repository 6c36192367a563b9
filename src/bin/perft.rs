use std::process::ExitCode;
use std::time::Instant;

use chess_core::{Position, START_FEN};
use chess_engine::{divide, perft_parallel, PERFT_SUITE};
use clap::Parser;
use log::{error, info};

#[derive(Parser, Debug)]
#[command(author, version, about = "Count move-generation leaf nodes", long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = String::from(START_FEN))]
    fen: String,

    #[arg(short, long, default_value_t = 4)]
    depth: u8,

    /// Print the node count below each root move
    #[arg(long)]
    divide: bool,

    /// Check the built-in reference positions up to `depth`
    #[arg(long)]
    suite: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if args.suite {
        return run_suite(args.depth);
    }

    let mut position = match Position::from_fen(&args.fen) {
        Ok(position) => position,
        Err(e) => {
            error!("Invalid position '{}': {e}", args.fen);
            return ExitCode::FAILURE;
        }
    };
    println!("Running perft on FEN: '{}' at depth {}", args.fen, args.depth);

    let start = Instant::now();
    let nodes = if args.divide {
        let counts = divide(&mut position, args.depth);
        for (mv, count) in &counts {
            println!("{mv}: {count}");
        }
        counts.iter().map(|(_, count)| count).sum()
    } else {
        perft_parallel(&position, args.depth)
    };
    let duration = start.elapsed();

    println!(
        "perft({}) = {} nodes ({} ms, {:.2} Mnps)",
        args.depth,
        nodes,
        duration.as_millis(),
        nodes as f64 / (duration.as_micros().max(1) as f64)
    );
    ExitCode::SUCCESS
}

fn run_suite(max_depth: u8) -> ExitCode {
    let (mut passed, mut failed) = (0, 0);
    for case in PERFT_SUITE {
        let position = match Position::from_fen(case.fen) {
            Ok(position) => position,
            Err(e) => {
                error!("{}: invalid position: {e}", case.name);
                failed += 1;
                continue;
            }
        };
        for (depth, &expected) in (1..=max_depth).zip(case.counts) {
            let start = Instant::now();
            let nodes = perft_parallel(&position, depth);
            if nodes == expected {
                passed += 1;
                info!("{} depth {depth}: {nodes} ok ({:?})", case.name, start.elapsed());
            } else {
                failed += 1;
                error!("{} depth {depth}: got {nodes}, expected {expected}", case.name);
            }
        }
    }

    println!("{passed} passed, {failed} failed");
    if failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
