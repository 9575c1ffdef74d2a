//! Image to drawable compiler
//!
//! Slices an RGBA image into 32x8 tiles and encodes every visible pixel of a
//! tile as one `?replace` entry keyed by the slot's template color. Tiles
//! without a single visible pixel are dropped.
//!
//! Raster images grow downward while the game's Y axis grows upward, so the
//! image is read bottom-up: tile row 0 holds the bottom eight rows of the
//! image and slot `j = 0` is the lowest row of its tile.

use image::{Rgba, RgbaImage};
use thiserror::Error;

use crate::color::{parse_ignore_color, to_hex8, ColorError, NEAR_WHITE, WHITE};
use crate::models::{CompiledOutput, Drawable};
use crate::template::{TEMPLATE, TILE_HEIGHT, TILE_WIDTH};

/// Highest number of pixels an image may have.
pub const PIXEL_LIMIT: u64 = 32768;

/// Placeholder texture shipped with the game whose pixels carry the template colors.
pub const DEFAULT_TEXTURE: &str = "/objects/outpost/customsign/signplaceholder.png";

/// Error type for compile failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// The image has more pixels than [`PIXEL_LIMIT`]
    #[error(
        "the image exceeds the limit of {limit} pixels (width: {width}, height: {height}, pixels: {pixels})"
    )]
    ImageTooLarge { width: u32, height: u32, pixels: u64, limit: u64 },
    /// The ignore color could not be parsed
    #[error("invalid ignore color: {0}")]
    InvalidColor(#[from] ColorError),
}

/// Options controlling how pixels are encoded.
#[derive(Debug, Clone, PartialEq)]
pub struct CompileOptions {
    /// Horizontal hand offset, in pixels.
    pub hand_offset_x: i32,
    /// Vertical hand offset, in pixels.
    pub hand_offset_y: i32,
    /// Pixels of exactly this color are skipped.
    pub ignore_color: Option<Rgba<u8>>,
    /// Encode fully transparent pixels too, and substitute near-white for white.
    pub replace_blank: bool,
    /// Substitute near-white for white without encoding transparent pixels.
    pub replace_white: bool,
    /// Asset path of the placeholder texture.
    pub texture: String,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            hand_offset_x: 0,
            hand_offset_y: 0,
            ignore_color: None,
            replace_blank: false,
            replace_white: false,
            texture: DEFAULT_TEXTURE.to_string(),
        }
    }
}

impl CompileOptions {
    pub fn with_offsets(mut self, x: i32, y: i32) -> Self {
        self.hand_offset_x = x;
        self.hand_offset_y = y;
        self
    }

    pub fn with_replace_blank(mut self, replace_blank: bool) -> Self {
        self.replace_blank = replace_blank;
        self
    }

    /// Set the ignore color from user input (`RRGGBB` or `RRGGBBAA`, optional `#`).
    /// A blank string clears it.
    pub fn with_ignore_color_str(mut self, s: &str) -> Result<Self, ColorError> {
        self.ignore_color = parse_ignore_color(s)?;
        Ok(self)
    }

    fn substitutes_white(&self) -> bool {
        self.replace_blank || self.replace_white
    }
}

/// Fail with [`CompileError::ImageTooLarge`] if `width * height` is over the limit.
pub fn check_dimensions(width: u32, height: u32) -> Result<(), CompileError> {
    let pixels = u64::from(width) * u64::from(height);
    if pixels > PIXEL_LIMIT {
        return Err(CompileError::ImageTooLarge { width, height, pixels, limit: PIXEL_LIMIT });
    }
    Ok(())
}

/// Compile an image into drawables.
///
/// The image is only borrowed for the duration of the call.
///
/// # Examples
///
/// ```
/// use drawables::compiler::{compile, CompileOptions};
/// use image::{Rgba, RgbaImage};
///
/// let image = RgbaImage::from_pixel(1, 1, Rgba([255, 0, 0, 255]));
/// let output = compile(&image, &CompileOptions::default()).unwrap();
/// assert_eq!(output.drawables.len(), 1);
/// assert_eq!(output.drawables[0].directives, "?replace;01000101=FF0000FF");
/// ```
///
/// # Errors
///
/// Returns [`CompileError::ImageTooLarge`] before any tile is produced when the
/// image has more than [`PIXEL_LIMIT`] pixels.
pub fn compile(image: &RgbaImage, options: &CompileOptions) -> Result<CompiledOutput, CompileError> {
    let (width, height) = image.dimensions();
    check_dimensions(width, height)?;

    if let Some(ignore) = options.ignore_color {
        if ignore.0[3] == 0 && !options.replace_blank {
            log::warn!(
                "ignore color {} is fully transparent; such pixels are skipped anyway",
                to_hex8(ignore)
            );
        }
    }

    let frames_x = width.div_ceil(TILE_WIDTH);
    let frames_y = height.div_ceil(TILE_HEIGHT);

    let mut drawables = Vec::new();
    for frame_x in 0..frames_x {
        for frame_y in 0..frames_y {
            if let Some(directives) = compile_tile(image, frame_x, frame_y, options) {
                let x = (frame_x * TILE_WIDTH) as i32;
                let y = (frame_y * TILE_HEIGHT) as i32;
                log::trace!("tile ({}, {}) kept, {} bytes of directives", frame_x, frame_y, directives.len());
                drawables.push(Drawable::new(options.texture.clone(), directives, x, y));
            }
        }
    }

    log::debug!(
        "compiled {}x{} image into {} of {} tiles",
        width,
        height,
        drawables.len(),
        frames_x * frames_y
    );

    Ok(CompiledOutput {
        drawables,
        image_width: width,
        image_height: height,
        offset_x: f64::from(options.hand_offset_x),
        offset_y: f64::from(options.hand_offset_y),
    })
}

/// Parse the ignore color from user input and compile.
pub fn compile_with_ignore_str(
    image: &RgbaImage,
    options: &CompileOptions,
    ignore_color: &str,
) -> Result<CompiledOutput, CompileError> {
    let options = options.clone().with_ignore_color_str(ignore_color)?;
    compile(image, &options)
}

/// Build the directive chain of one tile, or `None` if nothing in it is visible.
fn compile_tile(
    image: &RgbaImage,
    frame_x: u32,
    frame_y: u32,
    options: &CompileOptions,
) -> Option<String> {
    let (width, height) = image.dimensions();
    let mut directives = String::from("?replace");
    let mut contains_pixels = false;

    for i in 0..TILE_WIDTH {
        for j in 0..TILE_HEIGHT {
            // Flipped coordinates: y counts up from the bottom of the image.
            let x = frame_x * TILE_WIDTH + i;
            let y = frame_y * TILE_HEIGHT + j;
            if x >= width || y >= height {
                continue;
            }

            let mut color = *image.get_pixel(x, height - 1 - y);

            if options.ignore_color == Some(color) || (color.0[3] < 1 && !options.replace_blank) {
                continue;
            }
            if options.substitutes_white() && color == WHITE {
                color = NEAR_WHITE;
            }

            let template = TEMPLATE[i as usize][j as usize];
            directives.push(';');
            directives.push_str(&to_hex8(template));
            directives.push('=');
            directives.push_str(&to_hex8(color));

            if color.0[3] > 1 {
                contains_pixels = true;
            }
        }
    }

    contains_pixels.then_some(directives)
}
