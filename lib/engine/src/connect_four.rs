/*
 * 四子棋棋盘
 *
 * 设计要点
 * - 7 列 x 6 行，棋子从列顶落下，停在该列现有棋子之上；走法就是列号 0~6
 * - 黑子（B）先手
 * - 评估：遍历全部 69 条长度为 4 的线段，只含一种颜色的线段按子数计分
 *   2 子 1 分，3 子 100 分，4 子（已经获胜）1000000 分，对手的线段记负分
 */

use std::fmt;

use common::{Player, Position};

use crate::constant::{C4Segment, C4_COLUMNS, C4_ROWS, C4_SEGMENTS, C4_SEGMENT_LENGTH};
use crate::GameError;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum C4Piece {
    B,
    R,
    /// 空格
    E,
}

impl Player for C4Piece {
    fn opposite(self) -> Self {
        match self {
            C4Piece::B => C4Piece::R,
            C4Piece::R => C4Piece::B,
            C4Piece::E => C4Piece::E,
        }
    }
}

impl C4Piece {
    fn from_char(c: char) -> Option<Self> {
        match c {
            'B' | 'b' => Some(C4Piece::B),
            'R' | 'r' => Some(C4Piece::R),
            '.' | ' ' => Some(C4Piece::E),
            _ => None,
        }
    }
}

impl fmt::Display for C4Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            C4Piece::B => write!(f, "B"),
            C4Piece::R => write!(f, "R"),
            C4Piece::E => write!(f, " "),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct C4Board {
    // position[column][row]，row 0 在最底下
    position: [[C4Piece; C4_ROWS]; C4_COLUMNS],
    // 每列已有的棋子数
    column_count: [usize; C4_COLUMNS],
    turn: C4Piece,
}

impl Default for C4Board {
    fn default() -> Self {
        C4Board {
            position: [[C4Piece::E; C4_ROWS]; C4_COLUMNS],
            column_count: [0; C4_COLUMNS],
            turn: C4Piece::B,
        }
    }
}

impl C4Board {
    pub fn new(position: [[C4Piece; C4_ROWS]; C4_COLUMNS], turn: C4Piece) -> Self {
        let column_count = position.map(|col| col.iter().filter(|&&p| p != C4Piece::E).count());
        C4Board {
            position,
            column_count,
            turn,
        }
    }

    /// Parses six `/`-separated rows of seven cells, top row first,
    /// e.g. `"......./......./......./......./......./BR....."`.
    ///
    /// Pieces must rest on the bottom or on another piece.
    pub fn from_notation(rows: &str, turn: C4Piece) -> Result<Self, GameError> {
        if turn == C4Piece::E {
            return Err(GameError::Notation("turn must be B or R".into()));
        }
        let rows: Vec<&str> = rows.split('/').collect();
        if rows.len() != C4_ROWS {
            return Err(GameError::Notation(format!("expected {C4_ROWS} rows, got {}", rows.len())));
        }

        let mut position = [[C4Piece::E; C4_ROWS]; C4_COLUMNS];
        for (i, row) in rows.iter().enumerate() {
            let r = C4_ROWS - 1 - i;
            let cells: Vec<char> = row.chars().collect();
            if cells.len() != C4_COLUMNS {
                return Err(GameError::Notation(format!("row {i} has {} cells", cells.len())));
            }
            for (c, ch) in cells.into_iter().enumerate() {
                position[c][r] = C4Piece::from_char(ch).ok_or_else(|| GameError::Notation(format!("bad cell {ch:?}")))?;
            }
        }

        // 悬空的棋子不合法
        for (c, col) in position.iter().enumerate() {
            let height = col.iter().take_while(|&&p| p != C4Piece::E).count();
            if col[height..].iter().any(|&p| p != C4Piece::E) {
                return Err(GameError::Notation(format!("column {c} has a floating piece")));
            }
        }

        Ok(C4Board::new(position, turn))
    }

    pub fn piece_at(&self, column: usize, row: usize) -> C4Piece {
        self.position[column][row]
    }

    pub fn column_height(&self, column: usize) -> usize {
        self.column_count[column]
    }

    // 线段里某种颜色的棋子数
    fn count_segment(&self, segment: &C4Segment, color: C4Piece) -> usize {
        segment
            .iter()
            .filter(|&&(c, r)| self.position[c][r] == color)
            .count()
    }

    fn evaluate_segment(&self, segment: &C4Segment, player: C4Piece) -> f64 {
        let black_count = self.count_segment(segment, C4Piece::B);
        let red_count = self.count_segment(segment, C4Piece::R);
        if black_count > 0 && red_count > 0 {
            return 0.0;
        }
        let score = match black_count.max(red_count) {
            2 => 1.0,
            3 => 100.0,
            4 => 1_000_000.0,
            _ => 0.0,
        };
        let color = if red_count > black_count { C4Piece::R } else { C4Piece::B };
        if color != player {
            -score
        } else {
            score
        }
    }
}

impl Position for C4Board {
    type Move = usize;
    type Player = C4Piece;
    type Error = GameError;

    fn turn(&self) -> C4Piece {
        self.turn
    }

    // 还没有填满的列
    fn legal_moves(&self) -> Vec<usize> {
        (0..C4_COLUMNS)
            .filter(|&c| self.column_count[c] < C4_ROWS)
            .collect()
    }

    fn apply_move(&self, column: usize) -> Result<Self, GameError> {
        if column >= C4_COLUMNS || self.column_count[column] >= C4_ROWS {
            return Err(GameError::IllegalMove(column));
        }
        let mut next = self.clone();
        next.position[column][self.column_count[column]] = self.turn;
        next.column_count[column] += 1;
        next.turn = self.turn.opposite();
        Ok(next)
    }

    fn is_win(&self) -> bool {
        C4_SEGMENTS.iter().any(|segment| {
            self.count_segment(segment, C4Piece::B) == C4_SEGMENT_LENGTH
                || self.count_segment(segment, C4Piece::R) == C4_SEGMENT_LENGTH
        })
    }

    fn evaluate(&self, player: C4Piece) -> f64 {
        C4_SEGMENTS
            .iter()
            .map(|segment| self.evaluate_segment(segment, player))
            .sum()
    }
}

impl fmt::Display for C4Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in (0..C4_ROWS).rev() {
            write!(f, "|")?;
            for c in 0..C4_COLUMNS {
                write!(f, "{}|", self.position[c][r])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
