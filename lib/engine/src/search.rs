/*
 * Search Module - 极小化极大搜索
 *
 * 对任意实现了 common::Position 的局面进行博弈树搜索：
 * - minimax：不剪枝的基准实现
 * - alphabeta：带 alpha-beta 剪枝，返回值与 minimax 完全相同，只是访问的节点更少
 * - find_best_move：对根节点的每个走法独立打分，选出得分最高的走法
 *
 * 搜索是无状态的纯函数：没有置换表，不在多次调用之间保留任何东西。
 * 递归深度等于传入的 depth，调用方需要自己保证深度不会把栈撑爆。
 */

use common::Position;
use thiserror::Error;
use tracing::{debug, info};

use crate::constant::{MAX, MIN};

#[derive(Debug, Error)]
pub enum SearchError<E> {
    #[error("no legal moves to choose from")]
    NoLegalMoves,
    #[error("position rejected a move: {0}")]
    Position(#[source] E),
}

// 叶子节点：已分胜负、平局或深度用完
fn is_leaf<P: Position>(position: &P, depth: u32) -> bool {
    depth == 0 || position.is_win() || position.is_draw()
}

/// Game-theoretic value of `position` seen from `original_player`,
/// looking at most `depth` plies ahead.
///
/// `maximizing` says whether the side to move in `position` is trying to
/// raise or lower the score. It is tracked separately from
/// `position.turn()`: a caller that has already played one ply for
/// `original_player` passes `false`.
///
/// Recursion goes `depth` frames deep.
pub fn minimax<P: Position>(
    position: &P,
    maximizing: bool,
    original_player: P::Player,
    depth: u32,
) -> Result<f64, P::Error> {
    if is_leaf(position, depth) {
        return Ok(position.evaluate(original_player));
    }

    if maximizing {
        // 求最大值
        let mut best_eval = MIN;
        for mv in position.legal_moves() {
            let child = position.apply_move(mv)?;
            let result = minimax(&child, false, original_player, depth - 1)?;
            best_eval = best_eval.max(result);
        }
        Ok(best_eval)
    } else {
        // 求最小值
        let mut worst_eval = MAX;
        for mv in position.legal_moves() {
            let child = position.apply_move(mv)?;
            let result = minimax(&child, true, original_player, depth - 1)?;
            worst_eval = worst_eval.min(result);
        }
        Ok(worst_eval)
    }
}

/// Same value as [`minimax`], computed with an open `[MIN, MAX]` window.
pub fn alphabeta<P: Position>(
    position: &P,
    maximizing: bool,
    original_player: P::Player,
    depth: u32,
) -> Result<f64, P::Error> {
    alphabeta_bounded(position, maximizing, original_player, depth, MIN, MAX)
}

/// Alpha-beta search inside the window `[alpha, beta]`.
///
/// `alpha` is the score the maximizer can already guarantee, `beta` the
/// one the minimizer can. Both are passed by value, so siblings never see
/// each other's updates. Siblings are skipped as soon as `beta <= alpha`.
pub fn alphabeta_bounded<P: Position>(
    position: &P,
    maximizing: bool,
    original_player: P::Player,
    depth: u32,
    mut alpha: f64,
    mut beta: f64,
) -> Result<f64, P::Error> {
    if is_leaf(position, depth) {
        return Ok(position.evaluate(original_player));
    }

    if maximizing {
        for mv in position.legal_moves() {
            let child = position.apply_move(mv)?;
            let v = alphabeta_bounded(&child, false, original_player, depth - 1, alpha, beta)?;
            alpha = alpha.max(v);
            // 剩下的兄弟节点不可能再影响结果
            if beta <= alpha {
                break;
            }
        }
        Ok(alpha)
    } else {
        for mv in position.legal_moves() {
            let child = position.apply_move(mv)?;
            let v = alphabeta_bounded(&child, true, original_player, depth - 1, alpha, beta)?;
            beta = beta.min(v);
            if beta <= alpha {
                break;
            }
        }
        Ok(beta)
    }
}

/// Picks the best move for the side to move in `position`.
///
/// Every root move is scored in its own full window, so root moves never
/// prune each other. Ties keep the move that `legal_moves()` lists first.
pub fn find_best_move<P: Position>(
    position: &P,
    max_depth: u32,
) -> Result<P::Move, SearchError<P::Error>> {
    find_best_move_scored(position, max_depth).map(|(mv, _)| mv)
}

/// [`find_best_move`], also returning the winning move's score.
pub fn find_best_move_scored<P: Position>(
    position: &P,
    max_depth: u32,
) -> Result<(P::Move, f64), SearchError<P::Error>> {
    let original_player = position.turn();
    let mut best: Option<(P::Move, f64)> = None;

    for mv in position.legal_moves() {
        let child = position.apply_move(mv).map_err(SearchError::Position)?;
        // 根节点已经替 original_player 走了一步，所以这里从极小层开始
        let value = alphabeta(&child, false, original_player, max_depth)
            .map_err(SearchError::Position)?;
        debug!(?mv, value, "root move scored");

        match best {
            Some((_, best_value)) if value <= best_value => {}
            _ => best = Some((mv, value)),
        }
    }

    let (mv, value) = best.ok_or(SearchError::NoLegalMoves)?;
    info!(?mv, value, max_depth, "best move");
    Ok((mv, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tictactoe::{TTTBoard, TTTPiece};
    use common::Position;

    fn board(cells: &str, turn: TTTPiece) -> TTTBoard {
        TTTBoard::from_notation(cells, turn).unwrap()
    }

    #[test]
    fn test_depth_zero_is_static_evaluation() {
        let b = board("X...O....", TTTPiece::X);
        for maximizing in [true, false] {
            assert_eq!(minimax(&b, maximizing, TTTPiece::X, 0).unwrap(), b.evaluate(TTTPiece::X));
            assert_eq!(alphabeta(&b, maximizing, TTTPiece::O, 0).unwrap(), b.evaluate(TTTPiece::O));
        }
    }

    #[test]
    fn test_won_position_is_not_expanded() {
        // X 已经连成一行，轮到 O
        let b = board("XXXOO....", TTTPiece::O);
        assert!(b.is_win());
        assert_eq!(minimax(&b, true, TTTPiece::X, 9).unwrap(), 5.0);
        assert_eq!(alphabeta(&b, false, TTTPiece::O, 9).unwrap(), -5.0);
    }

    #[test]
    fn test_draw_is_terminal() {
        let b = board("XOXXOOOXX", TTTPiece::O);
        assert!(b.is_draw());
        assert_eq!(minimax(&b, true, TTTPiece::X, 5).unwrap(), 0.0);
        assert_eq!(alphabeta(&b, true, TTTPiece::X, 5).unwrap(), 0.0);
    }

    #[test]
    fn test_find_best_move_no_legal_moves() {
        let b = board("XOXXOOOXX", TTTPiece::O);
        assert!(matches!(find_best_move(&b, 4), Err(SearchError::NoLegalMoves)));
    }

    #[test]
    fn test_bounded_window_matches_default() {
        let b = board("X....O...", TTTPiece::X);
        let open = alphabeta(&b, true, TTTPiece::X, 9).unwrap();
        let explicit = alphabeta_bounded(&b, true, TTTPiece::X, 9, MIN, MAX).unwrap();
        assert_eq!(open, explicit);
        assert_eq!(open, minimax(&b, true, TTTPiece::X, 9).unwrap());
    }
}
