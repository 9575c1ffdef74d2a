//! Positional template colors for placeholder tiles
//!
//! Every slot `(i, j)` of a 32x8 tile gets a unique synthetic color
//! `(xi + 1, 0, j + 1, 1)`. The placeholder texture in the game is painted
//! with exactly these colors, so a `?replace` directive keyed by them can
//! recolor any slot individually.
//!
//! `xi` skips the red values whose hex form would start with a letter
//! (`0A..0F`, `1A..1F`, `2A..2F`), so every red byte renders as two decimal
//! digits for the whole `i < 32` domain.

use image::Rgba;

/// Width of a tile in pixels.
pub const TILE_WIDTH: u32 = 32;

/// Height of a tile in pixels.
pub const TILE_HEIGHT: u32 = 8;

/// Number of slots in a tile.
pub const TILE_SLOTS: usize = (TILE_WIDTH * TILE_HEIGHT) as usize;

/// Precomputed template colors, indexed `[i][j]`.
pub static TEMPLATE: [[Rgba<u8>; TILE_HEIGHT as usize]; TILE_WIDTH as usize] = build_table();

/// Template color for slot `(i, j)`.
///
/// `i` must be below [`TILE_WIDTH`] and `j` below [`TILE_HEIGHT`].
pub const fn template_color(i: u32, j: u32) -> Rgba<u8> {
    let mut xi = i;
    if i >= 9 {
        xi += 6;
    }
    if i >= 19 {
        xi += 6;
    }
    if i >= 29 {
        xi += 6;
    }
    Rgba([(xi + 1) as u8, 0, (j + 1) as u8, 1])
}

/// Reverse lookup: the slot a template color belongs to, if any.
pub fn template_slot(color: Rgba<u8>) -> Option<(u32, u32)> {
    let [r, g, b, a] = color.0;
    if g != 0 || a != 1 || b == 0 || u32::from(b) > TILE_HEIGHT {
        return None;
    }
    let j = u32::from(b) - 1;
    let xi = u32::from(r).checked_sub(1)?;
    // Undo the skips in reverse; values that land inside a gap are not template colors.
    let i = match xi {
        0..=8 => xi,
        15..=24 => xi - 6,
        31..=40 => xi - 12,
        47..=49 => xi - 18,
        _ => return None,
    };
    Some((i, j))
}

const fn build_table() -> [[Rgba<u8>; TILE_HEIGHT as usize]; TILE_WIDTH as usize] {
    let mut table = [[Rgba([0, 0, 0, 0]); TILE_HEIGHT as usize]; TILE_WIDTH as usize];
    let mut i = 0;
    while i < TILE_WIDTH {
        let mut j = 0;
        while j < TILE_HEIGHT {
            table[i as usize][j as usize] = template_color(i, j);
            j += 1;
        }
        i += 1;
    }
    table
}
