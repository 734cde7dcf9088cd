/*
 * 引擎核心库入口
 *
 * 说明
 * - search：与具体游戏无关的极小化极大 / alpha-beta 搜索
 * - tictactoe, connect_four：两个实现了 common::Position 的具体棋盘
 * - engine：基于文本协议的引擎外壳
 * - constant：搜索边界与棋盘连线表
 */
pub mod connect_four;
pub mod constant;
pub mod engine;
pub mod search;
pub mod tictactoe;

use thiserror::Error;

pub use search::{alphabeta, alphabeta_bounded, find_best_move, find_best_move_scored, minimax, SearchError};

/// 具体棋盘上的错误
#[derive(Debug, Error)]
pub enum GameError {
    #[error("illegal move {0}")]
    IllegalMove(usize),
    #[error("malformed position: {0}")]
    Notation(String),
}
