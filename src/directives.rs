//! Reading `?replace` directive chains back
//!
//! The compiler writes chains of the form
//! `?replace;KKKKKKKK=VVVVVVVV;KKKKKKKK=VVVVVVVV...`. This module parses them
//! again, maps keys back to tile slots, and rebuilds the source image from a
//! [`CompiledOutput`], which is how previews are produced.

use image::{Rgba, RgbaImage};
use thiserror::Error;

use crate::color::{parse_hex_color, to_hex8, ColorError};
use crate::models::CompiledOutput;
use crate::template::{template_color, template_slot};

/// Operator every tile chain starts with.
pub const REPLACE: &str = "?replace";

/// Error type for malformed directive chains
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectiveError {
    #[error("directives must start with '?replace'")]
    MissingReplace,
    #[error("entry {index} ('{entry}') is not of the form KEY=VALUE")]
    MalformedEntry { index: usize, entry: String },
    #[error("entry {index} has an invalid color: {source}")]
    InvalidColor {
        index: usize,
        #[source]
        source: ColorError,
    },
    #[error("entry {index} key {key} is not a template color")]
    UnknownSlot { index: usize, key: String },
}

/// One decoded `key=value` pair.
pub type ReplaceEntry = (Rgba<u8>, Rgba<u8>);

/// Parse a `?replace` chain into its key/value pairs, in order.
pub fn parse_replace_chain(directives: &str) -> Result<Vec<ReplaceEntry>, DirectiveError> {
    let body = directives.strip_prefix(REPLACE).ok_or(DirectiveError::MissingReplace)?;

    body.split(';')
        .skip(1)
        .enumerate()
        .map(|(index, entry)| {
            let (key, value) = entry
                .split_once('=')
                .ok_or_else(|| DirectiveError::MalformedEntry { index, entry: entry.to_string() })?;
            let key = parse_hex_color(key).map_err(|source| DirectiveError::InvalidColor { index, source })?;
            let value =
                parse_hex_color(value).map_err(|source| DirectiveError::InvalidColor { index, source })?;
            Ok((key, value))
        })
        .collect()
}

/// Write key/value pairs as a `?replace` chain.
pub fn encode_replace_chain(entries: &[ReplaceEntry]) -> String {
    let mut out = String::from(REPLACE);
    for (key, value) in entries {
        out.push(';');
        out.push_str(&to_hex8(*key));
        out.push('=');
        out.push_str(&to_hex8(*value));
    }
    out
}

/// Decode a tile chain into `(i, j, color)` slot assignments.
pub fn decode_tile(directives: &str) -> Result<Vec<(u32, u32, Rgba<u8>)>, DirectiveError> {
    parse_replace_chain(directives)?
        .into_iter()
        .enumerate()
        .map(|(index, (key, value))| {
            let (i, j) = template_slot(key)
                .ok_or_else(|| DirectiveError::UnknownSlot { index, key: to_hex8(key) })?;
            Ok((i, j, value))
        })
        .collect()
}

/// Encode slot assignments back into a tile chain.
pub fn encode_tile(slots: &[(u32, u32, Rgba<u8>)]) -> String {
    let entries: Vec<ReplaceEntry> =
        slots.iter().map(|&(i, j, color)| (template_color(i, j), color)).collect();
    encode_replace_chain(&entries)
}

/// Rebuild the image a [`CompiledOutput`] was compiled from.
///
/// Pixels that were skipped (transparent or ignored) come back fully
/// transparent, and white comes back as near-white when it was substituted.
pub fn reconstruct(output: &CompiledOutput) -> Result<RgbaImage, DirectiveError> {
    let (width, height) = (output.image_width, output.image_height);
    let mut image = RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 0]));

    for drawable in &output.drawables {
        for (i, j, color) in decode_tile(&drawable.directives)? {
            let x = drawable.pixel_x.max(0) as u32 + i;
            let y = drawable.pixel_y.max(0) as u32 + j;
            if x < width && y < height {
                image.put_pixel(x, height - 1 - y, color);
            }
        }
    }

    Ok(image)
}
