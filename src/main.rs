use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::Level;

use reversi_engine::config::AppConfig;
use reversi_engine::game::{Board, MoveOutcome, PlayerId};

/// Query and play moves on Reversi-style capture boards.
#[derive(Parser)]
#[command(name = "reversi", about = "Reversi-style capture game engine")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "reversi.toml")]
    config: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print a freshly created board
    New {
        #[arg(long)]
        width: Option<usize>,
        #[arg(long)]
        height: Option<usize>,
        #[arg(long)]
        players: Option<usize>,
        /// Skip the standard opening
        #[arg(long)]
        empty: bool,
    },
    /// List every cell where a seat may legally play
    Plays {
        #[command(flatten)]
        board: BoardArgs,
    },
    /// List the directions a placement would capture along
    Check {
        #[command(flatten)]
        board: BoardArgs,
        #[arg(long)]
        x: usize,
        #[arg(long)]
        y: usize,
    },
    /// Apply a move and print the result as JSON
    Apply {
        #[command(flatten)]
        board: BoardArgs,
        #[arg(long)]
        x: usize,
        #[arg(long)]
        y: usize,
    },
}

#[derive(clap::Args)]
struct BoardArgs {
    /// Board text file, or `-` for stdin
    #[arg(long)]
    board: PathBuf,

    /// Seat of the acting player
    #[arg(long)]
    seat: usize,

    /// Number of seated players (defaults to the configured value)
    #[arg(long)]
    players: Option<usize>,
}

/// JSON reply for `apply`, shaped like the move controller's response.
#[derive(Serialize)]
struct MoveReply {
    status: u16,
    message: &'static str,
    board: Vec<String>,
    outcome: MoveOutcome,
    scores: Vec<i32>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    match cli.command {
        Command::New {
            width,
            height,
            players,
            empty,
        } => {
            let mut board_config = config.board.clone();
            board_config.width = width.unwrap_or(board_config.width);
            board_config.height = height.unwrap_or(board_config.height);
            board_config.num_players = players.unwrap_or(board_config.num_players);
            board_config.default_start = !empty;
            let board = board_config.build().context("creating board")?;
            println!("{}", board.serialize());
        }
        Command::Plays { board: args } => {
            let (board, player) = load_board(&args, &config)?;
            for coord in board.get_valid_plays(player)? {
                println!("{} {}", coord.x, coord.y);
            }
        }
        Command::Check { board: args, x, y } => {
            let (board, player) = load_board(&args, &config)?;
            for direction in board.is_valid_move(x, y, player)?.iter() {
                println!("{} {}", direction.dx(), direction.dy());
            }
        }
        Command::Apply { board: args, x, y } => {
            let (mut board, player) = load_board(&args, &config)?;
            let outcome = board.apply_move(x, y, player)?;
            let reply = MoveReply {
                status: if outcome.is_applied() { 200 } else { 400 },
                message: match outcome {
                    MoveOutcome::Applied { .. } => "OK",
                    MoveOutcome::Rejected => "Invalid move",
                },
                board: board.serialize().lines().map(str::to_owned).collect(),
                scores: board.scores(),
                outcome,
            };
            println!("{}", serde_json::to_string_pretty(&reply)?);
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_board(args: &BoardArgs, config: &AppConfig) -> Result<(Board, PlayerId)> {
    let text = read_source(&args.board)?;
    let num_players = args.players.unwrap_or(config.board.num_players);
    let board = Board::parse(&text, num_players)
        .with_context(|| format!("parsing board from {}", args.board.display()))?;
    let player = board.player(args.seat).with_context(|| {
        format!(
            "seat {} is not at this board ({} players)",
            args.seat,
            board.num_players()
        )
    })?;
    Ok((board, player))
}

fn read_source(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("reading board from stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}
