/* 引擎外壳：按行读取文本命令，设置局面并搜索最佳走法 */
use std::io::{BufRead, Write};
use std::sync::LazyLock;

use common::Position;
use regex::Regex;
use thiserror::Error;
use tracing::{trace, warn};

use crate::connect_four::{C4Board, C4Piece};
use crate::search::{find_best_move_scored, SearchError};
use crate::tictactoe::{TTTBoard, TTTPiece};
use crate::GameError;

static POSITION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<game>ttt|c4) (?:(?P<startpos>startpos)|board (?P<board>[XxOoBbRr./]+) (?P<turn>[XxOoBbRr]))(?: moves (?P<moves>\d+(?: \d+)*))?$",
    )
    .expect("position regex is valid")
});

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("cannot parse command: {0}")]
    BadCommand(String),
    #[error(transparent)]
    Game(#[from] GameError),
}

/// 引擎当前持有的局面
#[derive(Clone, Debug, PartialEq)]
pub enum Game {
    TicTacToe(TTTBoard),
    ConnectFour(C4Board),
}

impl Game {
    fn apply_move(&self, mv: usize) -> Result<Game, GameError> {
        Ok(match self {
            Game::TicTacToe(b) => Game::TicTacToe(b.apply_move(mv)?),
            Game::ConnectFour(b) => Game::ConnectFour(b.apply_move(mv)?),
        })
    }
}

impl std::fmt::Display for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Game::TicTacToe(b) => write!(f, "{b}"),
            Game::ConnectFour(b) => write!(f, "{b}"),
        }
    }
}

pub struct GameEngine {
    pub game: Game,
}

impl Default for GameEngine {
    fn default() -> Self {
        GameEngine {
            game: Game::TicTacToe(TTTBoard::default()),
        }
    }
}

impl GameEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads commands line by line until `quit` or end of input.
    ///
    /// A malformed or illegal command is answered with an `error` line and
    /// the loop carries on; only I/O failures end it early.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<(), EngineError> {
        for line in input.lines() {
            let line = line?;
            let cmd = line.trim();
            if cmd.is_empty() {
                continue;
            }
            trace!(cmd, "command");
            if cmd == "quit" {
                writeln!(out, "bye")?;
                break;
            }
            let mut token = cmd.splitn(2, ' ');
            let head = token.next().unwrap_or_default();
            let rest = token.next().unwrap_or_default().trim();
            let result = match head {
                "info" => self.info(out),
                "isready" => self.is_ready(out),
                "position" => self.position(rest),
                "display" => writeln!(out, "{}", self.game).map_err(EngineError::from),
                "go" => match parse_depth(rest) {
                    Some(depth) => self.go(depth, out),
                    None => Err(EngineError::BadCommand(cmd.to_owned())),
                },
                _ => writeln!(out, "not support").map_err(EngineError::from),
            };
            match result {
                Err(EngineError::Io(e)) => return Err(EngineError::Io(e)),
                Err(e) => {
                    warn!(error = %e, cmd, "command rejected");
                    writeln!(out, "error {e}")?;
                }
                Ok(()) => {}
            }
            out.flush()?;
        }
        Ok(())
    }

    pub fn info<W: Write>(&self, out: &mut W) -> Result<(), EngineError> {
        writeln!(out, "id name rs-minimax {}", env!("CARGO_PKG_VERSION"))?;
        writeln!(out, "id games ttt c4")?;
        writeln!(out, "infook")?;
        Ok(())
    }

    pub fn is_ready<W: Write>(&self, out: &mut W) -> Result<(), EngineError> {
        writeln!(out, "readyok")?;
        Ok(())
    }

    // 解析 position 命令，例如：
    //   ttt startpos moves 4 0
    //   c4 board ......./......./......./......./......./...B... r
    // 任何一步走法不合法，整条命令作废，局面保持不变
    pub fn position(&mut self, param: &str) -> Result<(), EngineError> {
        let captures = POSITION_RE
            .captures(param)
            .ok_or_else(|| EngineError::BadCommand(format!("position {param}")))?;

        let turn = captures.name("turn").map(|t| t.as_str());
        let board = captures.name("board").map(|b| b.as_str());
        let mut game = match (&captures["game"], board, turn) {
            ("ttt", None, _) => Game::TicTacToe(TTTBoard::default()),
            ("c4", None, _) => Game::ConnectFour(C4Board::default()),
            ("ttt", Some(cells), Some(turn)) => {
                let turn = match turn {
                    "x" | "X" => TTTPiece::X,
                    "o" | "O" => TTTPiece::O,
                    _ => return Err(GameError::Notation(format!("bad turn {turn:?}")).into()),
                };
                Game::TicTacToe(TTTBoard::from_notation(cells, turn)?)
            }
            ("c4", Some(rows), Some(turn)) => {
                let turn = match turn {
                    "b" | "B" => C4Piece::B,
                    "r" | "R" => C4Piece::R,
                    _ => return Err(GameError::Notation(format!("bad turn {turn:?}")).into()),
                };
                Game::ConnectFour(C4Board::from_notation(rows, turn)?)
            }
            _ => return Err(EngineError::BadCommand(format!("position {param}"))),
        };

        if let Some(moves) = captures.name("moves") {
            for m in moves.as_str().split(' ') {
                let mv: usize = m
                    .parse()
                    .map_err(|_| EngineError::BadCommand(format!("bad move {m}")))?;
                game = game.apply_move(mv)?;
            }
        }

        self.game = game;
        Ok(())
    }

    // 执行搜索并输出最佳走法
    // 参数 depth: 搜索深度
    pub fn go<W: Write>(&self, depth: u32, out: &mut W) -> Result<(), EngineError> {
        match &self.game {
            Game::TicTacToe(b) => go_on(b, depth, out),
            Game::ConnectFour(b) => go_on(b, depth, out),
        }
    }
}

fn go_on<P, W>(board: &P, depth: u32, out: &mut W) -> Result<(), EngineError>
where
    P: Position<Move = usize, Error = GameError>,
    W: Write,
{
    if board.is_win() {
        writeln!(out, "nobestmove")?;
        return Ok(());
    }
    match find_best_move_scored(board, depth) {
        Ok((mv, value)) => writeln!(out, "bestmove {mv} value {value}")?,
        Err(SearchError::NoLegalMoves) => writeln!(out, "nobestmove")?,
        Err(SearchError::Position(e)) => return Err(e.into()),
    }
    Ok(())
}

// "depth 8" 或者直接 "8"
fn parse_depth(param: &str) -> Option<u32> {
    param.split_whitespace().last()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(script: &str) -> (GameEngine, String) {
        let mut engine = GameEngine::new();
        let mut out = Vec::new();
        engine.run(script.as_bytes(), &mut out).unwrap();
        (engine, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_handshake() {
        let (_, out) = run("info\nisready\nquit\n");
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].starts_with("id name"));
        assert!(lines.contains(&"infook"));
        assert!(lines.contains(&"readyok"));
        assert_eq!(lines.last(), Some(&"bye"));
    }

    #[test]
    fn test_go_finds_winning_cell() {
        let (_, out) = run("position ttt board XOXX.O..O x\ngo depth 8\n");
        assert_eq!(out.trim(), "bestmove 6 value 3");
    }

    #[test]
    fn test_position_with_moves() {
        let (engine, _) = run("position ttt startpos moves 4 0 8\n");
        let expected = TTTBoard::from_notation("O...X...X", TTTPiece::O).unwrap();
        assert_eq!(engine.game, Game::TicTacToe(expected));

        let (engine, _) = run("position c4 startpos moves 3 3 2\n");
        match engine.game {
            Game::ConnectFour(b) => {
                assert_eq!(b.column_height(3), 2);
                assert_eq!(b.column_height(2), 1);
                assert_eq!(b.turn(), C4Piece::R);
            }
            other => panic!("unexpected game {other:?}"),
        }
    }

    #[test]
    fn test_illegal_move_keeps_previous_position() {
        let (engine, out) = run("position ttt startpos moves 4\nposition ttt startpos moves 0 0\n");
        assert!(out.starts_with("error illegal move 0"));
        let expected = TTTBoard::default().apply_move(4).unwrap();
        assert_eq!(engine.game, Game::TicTacToe(expected));
    }

    #[test]
    fn test_connect_four_block() {
        let (_, out) = run("position c4 board ......./......./......./...R.../...R.../BB.R..B b\ngo depth 3\n");
        assert!(out.starts_with("bestmove 3 "), "{out}");
    }

    #[test]
    fn test_finished_game_has_no_best_move() {
        let (_, out) = run("position ttt board XXXOO.... o\ngo depth 4\nposition ttt board XOXXOOOXX o\ngo 4\n");
        assert_eq!(out.lines().collect::<Vec<_>>(), vec!["nobestmove", "nobestmove"]);
    }

    #[test]
    fn test_unknown_and_malformed_commands() {
        let (_, out) = run("hello\nposition chess startpos\ngo deep\n");
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "not support");
        assert!(lines[1].starts_with("error cannot parse command"));
        assert!(lines[2].starts_with("error cannot parse command"));
    }

    #[test]
    fn test_parse_depth() {
        assert_eq!(parse_depth("depth 7"), Some(7));
        assert_eq!(parse_depth("5"), Some(5));
        assert_eq!(parse_depth(""), None);
    }
}
