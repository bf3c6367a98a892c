//! Text rendering of lock maps

use ndarray::Array2;

/// Character drawn for a locked tile
pub const LOCKED_GLYPH: char = '#';
/// Character drawn for an unlocked tile
pub const UNLOCKED_GLYPH: char = '.';

/// Render one line per row, row 0 first
pub fn render_lock_map(map: &Array2<bool>) -> String {
    let mut out = String::with_capacity(map.len() + map.nrows());
    for row in map.rows() {
        out.extend(
            row.iter()
                .map(|&locked| if locked { LOCKED_GLYPH } else { UNLOCKED_GLYPH }),
        );
        out.push('\n');
    }
    out
}

/// Count of (locked, unlocked) tiles
pub fn lock_counts(map: &Array2<bool>) -> (usize, usize) {
    let locked = map.iter().filter(|&&locked| locked).count();
    (locked, map.len() - locked)
}
