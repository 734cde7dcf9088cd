/*
 * 终端对局
 *
 * - play：人机对战，人输入格子/列号，电脑用 find_best_move 应手
 * - selfplay：电脑对随机走子的对手，统计胜负
 */
use std::fmt::Display;
use std::io::{BufRead, Write};

use anyhow::{bail, Context};
use common::Position;
use engine::connect_four::C4Board;
use engine::find_best_move;
use engine::tictactoe::TTTBoard;
use engine::GameError;
use rand::seq::SliceRandom;
use tracing::{debug, info};

/// 可以在终端里下的棋
pub trait Playable: Position<Move = usize, Error = GameError> + Display + Default {
    const NAME: &'static str;
    const PROMPT: &'static str;
    const DEFAULT_DEPTH: u32;
}

impl Playable for TTTBoard {
    const NAME: &'static str = "tic-tac-toe";
    const PROMPT: &'static str = "Enter a legal square (0-8):";
    const DEFAULT_DEPTH: u32 = 9;
}

impl Playable for C4Board {
    const NAME: &'static str = "connect four";
    const PROMPT: &'static str = "Enter a legal column (0-6):";
    const DEFAULT_DEPTH: u32 = 7;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// 人（selfplay 中是随机对手）获胜
    OpponentWins,
    ComputerWins,
    Draw,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Tally {
    pub wins: usize,
    pub losses: usize,
    pub draws: usize,
}

// 一直读到合法的走法为止；输入结束则报错
fn read_human_move<P: Playable, R: BufRead, W: Write>(
    board: &P,
    lines: &mut std::io::Lines<R>,
    out: &mut W,
) -> anyhow::Result<usize> {
    let legal = board.legal_moves();
    loop {
        writeln!(out, "{}", P::PROMPT)?;
        out.flush()?;
        let line = lines.next().context("input closed")??;
        match line.trim().parse::<usize>() {
            Ok(mv) if legal.contains(&mv) => return Ok(mv),
            _ => debug!(input = line.trim(), "rejected human move"),
        }
    }
}

/// Human against computer until someone wins or the board fills up.
pub fn play<P: Playable, R: BufRead, W: Write>(
    input: R,
    out: &mut W,
    depth: u32,
    computer_first: bool,
) -> anyhow::Result<Outcome> {
    let mut board = P::default();
    let mut lines = input.lines();
    let mut human_turn = !computer_first;
    info!(game = P::NAME, depth, computer_first, "new game");

    if computer_first {
        writeln!(out, "{board}")?;
    }
    loop {
        if human_turn {
            let mv = read_human_move(&board, &mut lines, out)?;
            board = board.apply_move(mv)?;
            if board.is_win() {
                writeln!(out, "Human wins!")?;
                return Ok(Outcome::OpponentWins);
            }
        } else {
            let mv = find_best_move(&board, depth)?;
            writeln!(out, "Computer move is {mv}")?;
            board = board.apply_move(mv)?;
            writeln!(out, "{board}")?;
            if board.is_win() {
                writeln!(out, "Computer wins!")?;
                return Ok(Outcome::ComputerWins);
            }
        }
        if board.is_draw() {
            writeln!(out, "Draw!")?;
            return Ok(Outcome::Draw);
        }
        human_turn = !human_turn;
    }
}

// 电脑对随机对手下一盘，返回电脑视角的结果
fn play_random<P: Playable>(depth: u32, computer_first: bool) -> anyhow::Result<Outcome> {
    let mut rng = rand::thread_rng();
    let mut board = P::default();
    let mut computer_turn = computer_first;
    loop {
        let mv = if computer_turn {
            find_best_move(&board, depth)?
        } else {
            match board.legal_moves().choose(&mut rng) {
                Some(&mv) => mv,
                None => bail!("no legal move for the random player"),
            }
        };
        board = board.apply_move(mv)?;
        if board.is_win() {
            return Ok(if computer_turn { Outcome::ComputerWins } else { Outcome::OpponentWins });
        }
        if board.is_draw() {
            return Ok(Outcome::Draw);
        }
        computer_turn = !computer_turn;
    }
}

/// Computer against a uniformly random mover; the first move alternates.
pub fn selfplay<P: Playable>(games: usize, depth: u32) -> anyhow::Result<Tally> {
    let mut tally = Tally::default();
    for game in 0..games {
        let outcome = play_random::<P>(depth, game % 2 == 0)?;
        info!(game, ?outcome, "game finished");
        match outcome {
            Outcome::ComputerWins => tally.wins += 1,
            Outcome::OpponentWins => tally.losses += 1,
            Outcome::Draw => tally.draws += 1,
        }
    }
    Ok(tally)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_computer_never_loses_tictactoe() {
        // 人总是按顺序尝试 0..8，非法的输入会被跳过
        let script = "abc\n0 1 2\n".to_owned() + &"0\n1\n2\n3\n4\n5\n6\n7\n8\n".repeat(5);
        let mut out = Vec::new();
        let outcome = play::<TTTBoard, _, _>(script.as_bytes(), &mut out, 9, false).unwrap();
        assert_ne!(outcome, Outcome::OpponentWins);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Computer move is"));
        assert!(text.contains("Enter a legal square (0-8):"));
    }

    #[test]
    fn test_closed_input_is_an_error() {
        let mut out = Vec::new();
        let err = play::<TTTBoard, _, _>("".as_bytes(), &mut out, 9, false).unwrap_err();
        assert!(err.to_string().contains("input closed"));
    }

    #[test]
    fn test_computer_first_opens_in_corner() {
        let mut out = Vec::new();
        // 电脑先走；没有输入时在人该走的时候报错
        let result = play::<TTTBoard, _, _>("".as_bytes(), &mut out, 9, true);
        assert!(result.is_err());
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Computer move is 0"));
    }

    #[test]
    fn test_selfplay_tictactoe_never_loses() {
        let tally = selfplay::<TTTBoard>(4, 9).unwrap();
        assert_eq!(tally.losses, 0);
        assert_eq!(tally.wins + tally.draws, 4);
    }

    #[test]
    fn test_random_opponent_games_finish() {
        // 深度 0 时电脑只看一步，随机对手也有机会赢，三种结果都记进对应的栏
        let tally = selfplay::<TTTBoard>(20, 0).unwrap();
        assert_eq!(tally.wins + tally.losses + tally.draws, 20);
        let tally = selfplay::<C4Board>(2, 1).unwrap();
        assert_eq!(tally.wins + tally.losses + tally.draws, 2);
    }
}
