//! Single texture directives
//!
//! Folds every drawable into one directive string that can be appended to
//! any texture. The base texture is first turned into a solid white canvas of
//! the image's size, then each tile is multiplied onto it with `?blendmult`,
//! carrying its own `?replace` chain inside the blend argument.

use thiserror::Error;

use crate::models::CompiledOutput;

/// Default base scale: the largest dimension of the texture the directives are applied to.
pub const DEFAULT_BASE_SCALE: u32 = 64;

/// Fade applied after every blend when [`SingleTextureOptions::fade`] is set.
const FADE: &str = "?fade;80ff80;0.0001518";

/// Turns the white canvas transparent again once all tiles are blended.
const CLEAR_BACKGROUND: &str = "?replace;ffffffff=00000000";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SingleTextureError {
    #[error("base scale must be at least 1")]
    InvalidBaseScale,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SingleTextureOptions {
    pub base_scale: u32,
    pub fade: bool,
    pub clear_background: bool,
}

impl Default for SingleTextureOptions {
    fn default() -> Self {
        Self { base_scale: DEFAULT_BASE_SCALE, fade: false, clear_background: false }
    }
}

/// Scale factor applied to a base texture so it covers the whole image.
pub fn scale_for(output: &CompiledOutput, base_scale: u32) -> Result<u32, SingleTextureError> {
    if base_scale == 0 {
        return Err(SingleTextureError::InvalidBaseScale);
    }
    let max = output.image_width.max(output.image_height);
    Ok(max.div_ceil(base_scale))
}

/// Compose a single directive string with the default options.
///
/// Intended for output compiled with `replace_blank` set, so white and
/// transparent pixels are painted rather than left to the canvas.
pub fn compose(output: &CompiledOutput, base_scale: u32) -> Result<String, SingleTextureError> {
    compose_with(output, &SingleTextureOptions { base_scale, ..Default::default() })
}

pub fn compose_with(
    output: &CompiledOutput,
    options: &SingleTextureOptions,
) -> Result<String, SingleTextureError> {
    let scale = scale_for(output, options.base_scale)?;
    let (w, h) = (output.image_width, output.image_height);

    let mut dir = format!(
        "?setcolor=ffffff?replace;00000000=ffffff;ffffff00=ffffff?setcolor=ffffff?scalenearest={}?crop=0;0;{};{}",
        scale, w, h
    );

    for drawable in &output.drawables {
        dir.push_str(&format!(
            "?blendmult={};{};{}{}",
            drawable.texture, -drawable.pixel_x, -drawable.pixel_y, drawable.directives
        ));
        if options.fade {
            dir.push_str(FADE);
        }
    }

    if options.clear_background {
        dir.push_str(CLEAR_BACKGROUND);
    }

    log::debug!("composed {} tiles into {} bytes at scale {}", output.drawables.len(), dir.len(), scale);
    Ok(dir)
}
