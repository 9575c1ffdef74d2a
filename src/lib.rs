//! Drawables - Library for turning pixel art into Starbound drawables
//!
//! This library provides functionality to:
//! - Compile an image into 32x8 recolored placeholder tiles
//! - Wrap the tiles in item descriptors and /spawnitem commands
//! - Compose all tiles onto one texture with blend directives
//! - Decode directives back into pixels for previews

pub mod cli;
pub mod color;
pub mod compiler;
pub mod config;
pub mod descriptor;
pub mod directives;
pub mod inventory;
pub mod models;
pub mod output;
pub mod single_texture;
pub mod template;
pub mod templates;
