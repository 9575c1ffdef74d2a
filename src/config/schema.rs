//! Configuration schema types for `drawables.toml`
//!
//! Every section and field is optional; an empty file is a valid config.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::color::{parse_ignore_color, ColorError};
use crate::compiler::{CompileOptions, DEFAULT_TEXTURE};
use crate::single_texture::{SingleTextureOptions, DEFAULT_BASE_SCALE};
use crate::templates::ItemPreset;

/// How images are compiled into drawables
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompileConfig {
    /// Placeholder texture asset path
    #[serde(default = "default_texture")]
    pub texture: String,
    /// Horizontal hand offset in pixels
    #[serde(default)]
    pub hand_x: i32,
    /// Vertical hand offset in pixels
    #[serde(default)]
    pub hand_y: i32,
    /// Color to skip, `RRGGBB` or `RRGGBBAA`; empty for none
    #[serde(default)]
    pub ignore_color: String,
    #[serde(default)]
    pub replace_blank: bool,
    #[serde(default)]
    pub replace_white: bool,
}

impl Default for CompileConfig {
    fn default() -> Self {
        Self {
            texture: default_texture(),
            hand_x: 0,
            hand_y: 0,
            ignore_color: String::new(),
            replace_blank: false,
            replace_white: false,
        }
    }
}

fn default_texture() -> String {
    DEFAULT_TEXTURE.to_string()
}

/// Item descriptor settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItemConfig {
    /// Built-in template to use
    #[serde(default)]
    pub preset: ItemPreset,
    /// Custom JSON template; takes precedence over `preset`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<PathBuf>,
    /// Transformation group for every part; empty for none
    #[serde(default = "default_group")]
    pub group: String,
    /// Replace the inventory icon with the drawables
    #[serde(default)]
    pub inventory_icon: bool,
}

impl Default for ItemConfig {
    fn default() -> Self {
        Self { preset: ItemPreset::default(), template: None, group: default_group(), inventory_icon: false }
    }
}

fn default_group() -> String {
    "weapon".to_string()
}

/// Single texture directive settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SingleTextureConfig {
    /// Largest dimension of the texture the directives will be applied to
    #[serde(default = "default_base_scale")]
    pub base_scale: u32,
    #[serde(default)]
    pub fade: bool,
    /// Turn the white canvas transparent after blending
    #[serde(default = "default_clear_background")]
    pub clear_background: bool,
}

impl Default for SingleTextureConfig {
    fn default() -> Self {
        Self { base_scale: default_base_scale(), fade: false, clear_background: true }
    }
}

fn default_base_scale() -> u32 {
    DEFAULT_BASE_SCALE
}

fn default_clear_background() -> bool {
    true
}

/// Root configuration structure for `drawables.toml`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DrawablesConfig {
    #[serde(default)]
    pub compile: CompileConfig,
    #[serde(default)]
    pub item: ItemConfig,
    #[serde(default)]
    pub single_texture: SingleTextureConfig,
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "compile.ignore_color")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "drawables.toml: '{}' {}", self.field, self.message)
    }
}

impl DrawablesConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        if self.compile.texture.is_empty() {
            errors.push(ConfigValidationError {
                field: "compile.texture".to_string(),
                message: "must be a non-empty asset path".to_string(),
            });
        }

        if let Err(e) = parse_ignore_color(&self.compile.ignore_color) {
            errors.push(ConfigValidationError {
                field: "compile.ignore_color".to_string(),
                message: e.to_string(),
            });
        }

        if self.single_texture.base_scale == 0 {
            errors.push(ConfigValidationError {
                field: "single_texture.base_scale".to_string(),
                message: "must be a positive integer".to_string(),
            });
        }

        errors
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Compile options described by this config.
    pub fn compile_options(&self) -> Result<CompileOptions, ColorError> {
        Ok(CompileOptions {
            hand_offset_x: self.compile.hand_x,
            hand_offset_y: self.compile.hand_y,
            ignore_color: parse_ignore_color(&self.compile.ignore_color)?,
            replace_blank: self.compile.replace_blank,
            replace_white: self.compile.replace_white,
            texture: self.compile.texture.clone(),
        })
    }

    pub fn single_texture_options(&self) -> SingleTextureOptions {
        SingleTextureOptions {
            base_scale: self.single_texture.base_scale,
            fade: self.single_texture.fade,
            clear_background: self.single_texture.clear_background,
        }
    }

    /// The group to put parts in, if any.
    pub fn group(&self) -> Option<&str> {
        Some(self.item.group.as_str()).filter(|g| !g.is_empty())
    }
}
