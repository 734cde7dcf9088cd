/*
 * 公共契约库（common）- 可搜索局面的能力接口
 *
 * 说明
 * - 任何两人、完全信息、零和的游戏局面，只要实现这里的 Position trait，就可以交给引擎搜索
 * - 本库不包含任何搜索逻辑，只约定局面必须提供的查询与变换
 * - 局面是不可变的值：apply_move 返回新局面，绝不修改自身
 */

use std::fmt::Debug;

/// 棋手（执子方）
pub trait Player: Copy + Eq + Debug {
    /// 下一步轮到的一方
    fn opposite(self) -> Self;
}

/// Read-only capability set a game state must expose to be searchable.
///
/// Every method is a pure query, except `apply_move`, which is a pure
/// transformation: it returns a brand new position and leaves `self`
/// untouched, so sibling branches of a search never observe each other.
pub trait Position: Clone {
    type Move: Copy + PartialEq + Debug;
    type Player: Player;
    type Error: std::error::Error + Send + Sync + 'static;

    /// 轮到谁走棋
    fn turn(&self) -> Self::Player;

    /// 当前局面下所有合法走法，可能为空
    fn legal_moves(&self) -> Vec<Self::Move>;

    /// 走一步，得到新的局面；走法不在 `legal_moves()` 中时返回错误
    fn apply_move(&self, mv: Self::Move) -> Result<Self, Self::Error>;

    /// 最后一步是否刚刚完成了胜利
    fn is_win(&self) -> bool;

    /// 平局：没有胜负且无子可走
    fn is_draw(&self) -> bool {
        !self.is_win() && self.legal_moves().is_empty()
    }

    /// Heuristic score from `perspective`'s point of view, higher is better.
    ///
    /// A decided position must score beyond anything the heuristic can
    /// produce for an undecided one, otherwise a depth-limited search can
    /// mistake a strong position for a won one.
    fn evaluate(&self, perspective: Self::Player) -> f64;
}
