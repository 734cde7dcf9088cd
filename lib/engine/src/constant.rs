use std::sync::LazyLock;

/// 搜索窗口的下界与上界
pub const MIN: f64 = f64::NEG_INFINITY;
pub const MAX: f64 = f64::INFINITY;

pub const TTT_SQUARES: usize = 9;

// 井字棋的 8 条连线：三行、三列、两条对角线
pub const TTT_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

pub const C4_COLUMNS: usize = 7;
pub const C4_ROWS: usize = 6;
pub const C4_SEGMENT_LENGTH: usize = 4;

/// (column, row)，row 0 是最底下一行
pub type C4Location = (usize, usize);
pub type C4Segment = [C4Location; C4_SEGMENT_LENGTH];

pub static C4_SEGMENTS: LazyLock<Vec<C4Segment>> = LazyLock::new(generate_segments);

fn generate_segments() -> Vec<C4Segment> {
    let mut segments = vec![];
    let span = C4_SEGMENT_LENGTH;

    // 垂直
    for c in 0..C4_COLUMNS {
        for r in 0..=C4_ROWS - span {
            segments.push(std::array::from_fn(|i| (c, r + i)));
        }
    }
    // 水平
    for c in 0..=C4_COLUMNS - span {
        for r in 0..C4_ROWS {
            segments.push(std::array::from_fn(|i| (c + i, r)));
        }
    }
    // 左下到右上
    for c in 0..=C4_COLUMNS - span {
        for r in 0..=C4_ROWS - span {
            segments.push(std::array::from_fn(|i| (c + i, r + i)));
        }
    }
    // 左上到右下
    for c in (0..=C4_COLUMNS - span).rev() {
        for r in span - 1..C4_ROWS {
            segments.push(std::array::from_fn(|i| (c + i, r - i)));
        }
    }
    segments
}
