//! Data models for compiled drawables

use serde::{Deserialize, Serialize};

use crate::template::{TILE_HEIGHT, TILE_WIDTH};

/// Number of game pixels in one block.
pub const PIXELS_PER_BLOCK: f64 = 8.0;

/// Round to three decimals, the precision the game reads offsets with.
pub(crate) fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Convert a pixel distance to blocks, rounded to three decimals.
pub fn pixels_to_blocks(pixels: f64) -> f64 {
    round3(pixels / PIXELS_PER_BLOCK)
}

/// One recolored placeholder tile.
///
/// `texture` is the asset path of the placeholder; `directives` is the
/// `?replace` chain that paints this tile's pixels onto it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Drawable {
    pub texture: String,
    pub directives: String,
    /// Horizontal position in game pixels.
    pub pixel_x: i32,
    /// Vertical position in game pixels, Y increasing upward.
    pub pixel_y: i32,
}

impl Drawable {
    pub fn new(texture: impl Into<String>, directives: impl Into<String>, x: i32, y: i32) -> Self {
        Self { texture: texture.into(), directives: directives.into(), pixel_x: x, pixel_y: y }
    }

    /// Texture plus directives, ready to be used as an image reference.
    pub fn result_image(&self) -> String {
        format!("{}{}", self.texture, self.directives)
    }

    pub fn block_x(&self) -> f64 {
        pixels_to_blocks(f64::from(self.pixel_x))
    }

    pub fn block_y(&self) -> f64 {
        pixels_to_blocks(f64::from(self.pixel_y))
    }

    /// Tile column this drawable was cut from.
    pub fn frame_x(&self) -> u32 {
        (self.pixel_x.max(0) as u32) / TILE_WIDTH
    }

    /// Tile row this drawable was cut from (row 0 is the bottom of the image).
    pub fn frame_y(&self) -> u32 {
        (self.pixel_y.max(0) as u32) / TILE_HEIGHT
    }
}

/// Result of compiling one image.
///
/// Produced once by the compiler and only read afterwards; every renderer
/// takes it by reference.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompiledOutput {
    /// Non-empty tiles ordered by `(frame_x, frame_y)` ascending.
    pub drawables: Vec<Drawable>,
    pub image_width: u32,
    pub image_height: u32,
    /// Hand offset in pixels.
    pub offset_x: f64,
    pub offset_y: f64,
}

impl CompiledOutput {
    /// Number of tile columns covering the image.
    pub fn frame_count_x(&self) -> u32 {
        self.image_width.div_ceil(TILE_WIDTH)
    }

    /// Number of tile rows covering the image.
    pub fn frame_count_y(&self) -> u32 {
        self.image_height.div_ceil(TILE_HEIGHT)
    }

    pub fn is_empty(&self) -> bool {
        self.drawables.is_empty()
    }

    /// Hand offset converted to blocks.
    pub fn block_offset(&self) -> (f64, f64) {
        (pixels_to_blocks(self.offset_x), pixels_to_blocks(self.offset_y))
    }
}

/// One entry of an inventory icon: an image reference drawn at a pixel position.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InventoryIconEntry {
    pub image: String,
    pub position: [i32; 2],
}
