//! Minimal UCI command parser and engine state machine.

use chess_core::{Position, START_FEN};
use chess_engine::{game_outcome, perft, ChessAI, SearchConfig};
use log::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UciCommand {
    Uci,
    IsReady,
    UciNewGame,
    Position { fen: Option<String>, moves: Vec<String> },
    Go { depth: Option<u8> },
    Stop,
    Quit,
    // Debugging extensions: print the board, count leaf nodes
    Display,
    Perft(u8),
    Unknown(String),
}

/// Parses one input line; blank lines yield `None`.
pub fn parse_command(line: &str) -> Option<UciCommand> {
    let mut tokens = line.split_whitespace();
    let command = tokens.next()?;
    let rest: Vec<&str> = tokens.collect();

    let parsed = match command {
        "uci" => UciCommand::Uci,
        "isready" => UciCommand::IsReady,
        "ucinewgame" => UciCommand::UciNewGame,
        "position" => parse_position(&rest),
        "go" => UciCommand::Go {
            depth: rest
                .iter()
                .position(|&t| t == "depth")
                .and_then(|i| rest.get(i + 1))
                .and_then(|d| d.parse().ok()),
        },
        "stop" => UciCommand::Stop,
        "quit" => UciCommand::Quit,
        "d" => UciCommand::Display,
        "perft" => match rest.first().and_then(|d| d.parse().ok()) {
            Some(depth) => UciCommand::Perft(depth),
            None => UciCommand::Unknown(line.trim().to_string()),
        },
        _ => UciCommand::Unknown(line.trim().to_string()),
    };
    Some(parsed)
}

fn parse_position(tokens: &[&str]) -> UciCommand {
    let moves_at = tokens.iter().position(|&t| t == "moves");
    let (setup, moves) = match moves_at {
        Some(i) => (&tokens[..i], &tokens[i + 1..]),
        None => (tokens, &[][..]),
    };
    let fen = match setup.first() {
        Some(&"fen") => Some(setup[1..].join(" ")),
        _ => None,
    };
    UciCommand::Position {
        fen,
        moves: moves.iter().map(|m| m.to_string()).collect(),
    }
}

pub struct UciEngine {
    position: Position,
    ai: ChessAI,
    running: bool,
}

impl UciEngine {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            position: Position::new(),
            ai: ChessAI::new(config),
            running: true,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Handles one command and returns the lines to print.
    pub fn handle_command(&mut self, cmd: UciCommand) -> Vec<String> {
        let mut res = Vec::new();
        match cmd {
            UciCommand::Uci => {
                res.push(format!("id name x88-chess {}", env!("CARGO_PKG_VERSION")));
                res.push("id author x88-chess developers".to_string());
                res.push("uciok".to_string());
            }
            UciCommand::IsReady => res.push("readyok".to_string()),
            UciCommand::UciNewGame => self.position = Position::new(),
            UciCommand::Position { fen, moves } => {
                if let Err(message) = self.set_position(fen.as_deref(), &moves) {
                    warn!("{message}");
                    res.push(format!("info string {message}"));
                }
            }
            UciCommand::Go { depth } => {
                let mut ai = self.ai.clone();
                if let Some(depth) = depth {
                    ai.set_depth(depth);
                }
                match ai.get_move(&mut self.position) {
                    Some(mv) => res.push(format!("bestmove {mv}")),
                    None => {
                        if let Some(outcome) = game_outcome(&mut self.position) {
                            res.push(format!("info string {outcome:?}"));
                        }
                        res.push("bestmove 0000".to_string());
                    }
                }
            }
            // Searches run to completion before the next command is read
            UciCommand::Stop => {}
            UciCommand::Quit => self.running = false,
            UciCommand::Display => {
                res.extend(self.position.to_string().lines().map(str::to_string));
                res.push(format!("Fen: {}", self.position.to_fen()));
            }
            UciCommand::Perft(depth) => {
                let nodes = perft(&mut self.position, depth);
                res.push(format!("Nodes searched: {nodes}"));
            }
            UciCommand::Unknown(text) => debug!("Ignoring unknown command '{text}'"),
        }
        res
    }

    // Builds the new position on the side so a bad move keeps the old one
    fn set_position(&mut self, fen: Option<&str>, moves: &[String]) -> Result<(), String> {
        let mut position = Position::from_fen(fen.unwrap_or(START_FEN)).map_err(|e| format!("bad position: {e}"))?;
        for text in moves {
            let mv = position.parse_move(text).map_err(|e| format!("bad move list: {e}"))?;
            position.make_move(mv);
        }
        self.position = position;
        Ok(())
    }
}
