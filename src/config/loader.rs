//! Configuration loading and discovery for `drawables.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::DrawablesConfig;
use crate::templates::ItemPreset;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name searched for during discovery.
pub const CONFIG_FILE: &str = "drawables.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse drawables.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub texture: Option<String>,
    pub hand_x: Option<i32>,
    pub hand_y: Option<i32>,
    pub ignore_color: Option<String>,
    pub replace_blank: Option<bool>,
    pub replace_white: Option<bool>,
    pub preset: Option<ItemPreset>,
    pub template: Option<PathBuf>,
    pub group: Option<String>,
    pub inventory_icon: Option<bool>,
    pub base_scale: Option<u32>,
    pub fade: Option<bool>,
    pub clear_background: Option<bool>,
}

/// Find drawables.toml by walking up from the current working directory.
///
/// Search order:
/// 1. Walk up from current directory looking for drawables.toml
/// 2. Check XDG_CONFIG_HOME/drawables/drawables.toml (or ~/.config/drawables/drawables.toml)
pub fn find_config() -> Option<PathBuf> {
    if let Ok(cwd) = env::current_dir() {
        if let Some(path) = find_config_from(cwd) {
            return Some(path);
        }
    }

    find_xdg_config()
}

/// Find drawables.toml in XDG config directory.
pub fn find_xdg_config() -> Option<PathBuf> {
    let xdg_config = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok()?;

    let config_path = xdg_config.join("drawables").join(CONFIG_FILE);
    if config_path.exists() {
        Some(config_path)
    } else {
        None
    }
}

/// Find drawables.toml by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration from a drawables.toml file.
///
/// If a path is provided, loads from that file. Otherwise, uses `find_config()`
/// to locate the config file. If no config file is found, returns the defaults.
/// Relative template paths are resolved against the config file's directory.
pub fn load_config(path: Option<&Path>) -> Result<DrawablesConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => {
            log::debug!("loading config from {}", p.display());
            load_config_file(&p)
        }
        None => Ok(DrawablesConfig::default()),
    }
}

/// Load configuration from a specific file path.
fn load_config_file(path: &Path) -> Result<DrawablesConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let mut config: DrawablesConfig = toml::from_str(&contents)?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }

    if let (Some(root), Some(template)) = (path.parent(), config.item.template.as_ref()) {
        config.item.template = Some(resolve_path(root, template));
    }

    Ok(config)
}

/// Merge CLI overrides into a configuration.
///
/// CLI arguments take precedence over config file values. The merged config
/// is validated again, so a bad `--ignore-color` is reported like a bad file value.
pub fn merge_cli_overrides(
    config: &mut DrawablesConfig,
    overrides: &CliOverrides,
) -> Result<(), ConfigError> {
    if let Some(ref texture) = overrides.texture {
        config.compile.texture = texture.clone();
    }
    if let Some(hand_x) = overrides.hand_x {
        config.compile.hand_x = hand_x;
    }
    if let Some(hand_y) = overrides.hand_y {
        config.compile.hand_y = hand_y;
    }
    if let Some(ref ignore_color) = overrides.ignore_color {
        config.compile.ignore_color = ignore_color.clone();
    }
    if let Some(replace_blank) = overrides.replace_blank {
        config.compile.replace_blank = replace_blank;
    }
    if let Some(replace_white) = overrides.replace_white {
        config.compile.replace_white = replace_white;
    }

    if let Some(preset) = overrides.preset {
        config.item.preset = preset;
        // An explicit preset wins over a template inherited from the file.
        if overrides.template.is_none() {
            config.item.template = None;
        }
    }
    if let Some(ref template) = overrides.template {
        config.item.template = Some(template.clone());
    }
    if let Some(ref group) = overrides.group {
        config.item.group = group.clone();
    }
    if let Some(inventory_icon) = overrides.inventory_icon {
        config.item.inventory_icon = inventory_icon;
    }

    if let Some(base_scale) = overrides.base_scale {
        config.single_texture.base_scale = base_scale;
    }
    if let Some(fade) = overrides.fade {
        config.single_texture.fade = fade;
    }
    if let Some(clear_background) = overrides.clear_background {
        config.single_texture.clear_background = clear_background;
    }

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }
    Ok(())
}

/// Resolve a path relative to the directory holding the config file.
///
/// If the path is absolute, returns it unchanged.
pub fn resolve_path(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}
