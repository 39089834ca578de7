use crate::game::{BOARD_SIZE, Cell};

/// Terrain class of every cell, indexed `[row][col]` (row 0 is rank 1).
///
/// The class is both the exact distance a piece standing on the cell must
/// travel and the constraint handed to the opponent when a move ends there.
pub const TERRAIN_MAP: [[u8; BOARD_SIZE]; BOARD_SIZE] = [
    [1, 2, 2, 3, 1, 2],
    [3, 1, 3, 1, 3, 2],
    [2, 3, 1, 2, 1, 3],
    [2, 1, 3, 2, 3, 1],
    [1, 3, 1, 3, 1, 2],
    [3, 2, 2, 1, 3, 2],
];

/// Terrain class (1, 2 or 3) of a cell.
pub fn terrain_of(cell: Cell) -> u8 {
    TERRAIN_MAP[cell.row][cell.col]
}

/// Render the terrain map with rank 6 at the top.
pub fn render_map() -> String {
    let mut result = String::new();
    result.push_str("  A B C D E F\n");
    for row in (0..BOARD_SIZE).rev() {
        result.push_str(&format!("{} ", row + 1));
        for col in 0..BOARD_SIZE {
            result.push_str(&format!("{} ", TERRAIN_MAP[row][col]));
        }
        result.push_str(&format!("{}\n", row + 1));
    }
    result.push_str("  A B C D E F\n");
    result
}
