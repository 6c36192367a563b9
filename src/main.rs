use std::io::{self, BufRead, Write};

use chess_engine::{SearchAlgorithm, SearchConfig};
use clap::Parser;
use log::info;

mod uci;

use uci::{parse_command, UciEngine};

/// UCI chess engine on a 0x88 board.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Search depth in plies, clamped to 1..=8
    #[arg(short, long, default_value_t = 4)]
    depth: u8,

    /// Search algorithm: negamax or alphabeta
    #[arg(short, long, default_value_t = SearchAlgorithm::AlphaBeta)]
    algorithm: SearchAlgorithm,
}

fn main() -> io::Result<()> {
    // Logs go to stderr so they never mix with protocol output
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let mut engine = UciEngine::new(SearchConfig {
        depth: args.depth,
        algorithm: args.algorithm,
    });
    info!("Starting with {} at depth {}", args.algorithm, args.depth);

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    for line in stdin.lock().lines() {
        let Some(cmd) = parse_command(&line?) else {
            continue;
        };
        for out in engine.handle_command(cmd) {
            writeln!(stdout, "{out}")?;
        }
        stdout.flush()?;
        if !engine.is_running() {
            break;
        }
    }
    Ok(())
}
