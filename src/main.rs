use std::io;

use clap::{Parser, Subcommand, ValueEnum};
use engine::connect_four::C4Board;
use engine::tictactoe::TTTBoard;
use tracing_subscriber::EnvFilter;

use crate::game::{Playable, Tally};

mod game;

#[derive(Parser, Debug)]
#[command(
    name = "rs-minimax",
    about = "Play tic-tac-toe or connect four against an alpha-beta minimax search"
)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play against the computer in the terminal
    Play {
        #[arg(long, value_enum, default_value_t = GameKind::Ttt)]
        game: GameKind,

        /// Search depth (default: 9 for ttt, 7 for c4)
        #[arg(long)]
        depth: Option<u32>,

        /// Let the computer make the first move
        #[arg(long)]
        computer_first: bool,
    },
    /// Pit the computer against a random mover
    Selfplay {
        #[arg(long, value_enum, default_value_t = GameKind::Ttt)]
        game: GameKind,

        /// Search depth (default: 9 for ttt, 7 for c4)
        #[arg(long)]
        depth: Option<u32>,

        /// Number of games to play
        #[arg(long, default_value_t = 10)]
        games: usize,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum GameKind {
    Ttt,
    C4,
}

fn run_play<P: Playable>(depth: Option<u32>, computer_first: bool) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    game::play::<P, _, _>(stdin.lock(), &mut stdout, depth.unwrap_or(P::DEFAULT_DEPTH), computer_first)?;
    Ok(())
}

fn run_selfplay<P: Playable>(depth: Option<u32>, games: usize) -> anyhow::Result<()> {
    let depth = depth.unwrap_or(P::DEFAULT_DEPTH);
    let Tally { wins, losses, draws } = game::selfplay::<P>(games, depth)?;
    println!("{}: {games} games at depth {depth}", P::NAME);
    println!("computer wins {wins}, losses {losses}, draws {draws}");
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    match args.command {
        Command::Play { game: GameKind::Ttt, depth, computer_first } => run_play::<TTTBoard>(depth, computer_first),
        Command::Play { game: GameKind::C4, depth, computer_first } => run_play::<C4Board>(depth, computer_first),
        Command::Selfplay { game: GameKind::Ttt, depth, games } => run_selfplay::<TTTBoard>(depth, games),
        Command::Selfplay { game: GameKind::C4, depth, games } => run_selfplay::<C4Board>(depth, games),
    }
}
