/*
 * 井字棋棋盘
 *
 * - 9 个格子，从左到右、从上到下编号 0~8
 * - X 先手；走法就是要落子的格子编号
 * - 评估只看胜负：连成一线的一方得 1 + 剩余空格数，另一方得相反数，其余为 0
 *   赢得越早空格越多，分数越高
 */

use std::fmt;

use common::{Player, Position};

use crate::constant::{TTT_LINES, TTT_SQUARES};
use crate::GameError;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TTTPiece {
    X,
    O,
    /// 空格
    E,
}

impl Player for TTTPiece {
    fn opposite(self) -> Self {
        match self {
            TTTPiece::X => TTTPiece::O,
            TTTPiece::O => TTTPiece::X,
            TTTPiece::E => TTTPiece::E,
        }
    }
}

impl TTTPiece {
    fn from_char(c: char) -> Option<Self> {
        match c {
            'X' | 'x' => Some(TTTPiece::X),
            'O' | 'o' => Some(TTTPiece::O),
            '.' | ' ' => Some(TTTPiece::E),
            _ => None,
        }
    }
}

impl fmt::Display for TTTPiece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TTTPiece::X => write!(f, "X"),
            TTTPiece::O => write!(f, "O"),
            TTTPiece::E => write!(f, " "),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TTTBoard {
    position: [TTTPiece; TTT_SQUARES],
    turn: TTTPiece,
}

impl Default for TTTBoard {
    fn default() -> Self {
        TTTBoard {
            position: [TTTPiece::E; TTT_SQUARES],
            turn: TTTPiece::X,
        }
    }
}

impl TTTBoard {
    pub fn new(position: [TTTPiece; TTT_SQUARES], turn: TTTPiece) -> Self {
        TTTBoard { position, turn }
    }

    /// Parses nine cells such as `"XO.X.O..O"`; `.` or a space is empty.
    pub fn from_notation(cells: &str, turn: TTTPiece) -> Result<Self, GameError> {
        if turn == TTTPiece::E {
            return Err(GameError::Notation("turn must be X or O".into()));
        }
        let pieces = cells
            .chars()
            .map(|c| TTTPiece::from_char(c).ok_or_else(|| GameError::Notation(format!("bad cell {c:?}"))))
            .collect::<Result<Vec<_>, _>>()?;
        let position: [TTTPiece; TTT_SQUARES] = pieces
            .try_into()
            .map_err(|v: Vec<_>| GameError::Notation(format!("expected {TTT_SQUARES} cells, got {}", v.len())))?;
        Ok(TTTBoard::new(position, turn))
    }

    pub fn piece_at(&self, square: usize) -> TTTPiece {
        self.position[square]
    }

    fn check_pos(&self, [p0, p1, p2]: [usize; 3]) -> bool {
        let b = &self.position;
        b[p0] == b[p1] && b[p0] == b[p2] && b[p0] != TTTPiece::E
    }
}

impl Position for TTTBoard {
    type Move = usize;
    type Player = TTTPiece;
    type Error = GameError;

    fn turn(&self) -> TTTPiece {
        self.turn
    }

    // 所有空着的格子
    fn legal_moves(&self) -> Vec<usize> {
        (0..TTT_SQUARES)
            .filter(|&i| self.position[i] == TTTPiece::E)
            .collect()
    }

    fn apply_move(&self, mv: usize) -> Result<Self, GameError> {
        if mv >= TTT_SQUARES || self.position[mv] != TTTPiece::E {
            return Err(GameError::IllegalMove(mv));
        }
        let mut position = self.position;
        position[mv] = self.turn;
        Ok(TTTBoard::new(position, self.turn.opposite()))
    }

    fn is_win(&self) -> bool {
        TTT_LINES.iter().any(|&line| self.check_pos(line))
    }

    fn evaluate(&self, player: TTTPiece) -> f64 {
        if !self.is_win() {
            return 0.0;
        }
        let score = 1.0 + self.legal_moves().len() as f64;
        if self.turn == player {
            // 连成一线的是对手
            -score
        } else {
            score
        }
    }
}

impl fmt::Display for TTTBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3 {
            let cells = &self.position[row * 3..row * 3 + 3];
            writeln!(f, "{}|{}|{}", cells[0], cells[1], cells[2])?;
            if row != 2 {
                writeln!(f, "-----")?;
            }
        }
        Ok(())
    }
}
