//! Built-in item templates.
//!
//! Each preset is a JSON item descriptor embedded at build time plus the
//! metadata (item name, short description) stamped onto descriptors built
//! from it. Callers with their own template use [`ItemTemplate::Custom`].
//!
//! # Example
//!
//! ```
//! use drawables::templates::ItemPreset;
//!
//! let preset = ItemPreset::from_str("tesla-staff").unwrap();
//! assert_eq!(preset.metadata().item_name, "teslastaff");
//! ```

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Item a descriptor is built on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ItemPreset {
    /// Common pistol, drawables held like a gun
    #[default]
    Pistol,
    /// Common shortsword
    Shortsword,
    /// Tesla staff
    TeslaStaff,
}

/// Name and description applied to descriptors built from a preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemMetadata {
    pub item_name: &'static str,
    pub short_description: &'static str,
}

impl ItemPreset {
    /// Parse preset name from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pistol" | "commonpistol" => Some(Self::Pistol),
            "shortsword" | "commonshortsword" => Some(Self::Shortsword),
            "tesla-staff" | "teslastaff" | "staff" => Some(Self::TeslaStaff),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Pistol => "pistol",
            Self::Shortsword => "shortsword",
            Self::TeslaStaff => "tesla-staff",
        }
    }

    /// The embedded JSON template.
    pub fn template(&self) -> &'static str {
        match self {
            Self::Pistol => include_str!("pistol.json"),
            Self::Shortsword => include_str!("shortsword.json"),
            Self::TeslaStaff => include_str!("teslastaff.json"),
        }
    }

    pub fn metadata(&self) -> ItemMetadata {
        match self {
            Self::Pistol => {
                ItemMetadata { item_name: "commonpistol", short_description: "Drawable Pistol" }
            }
            Self::Shortsword => ItemMetadata {
                item_name: "commonshortsword",
                short_description: "Drawable Shortsword",
            },
            Self::TeslaStaff => {
                ItemMetadata { item_name: "teslastaff", short_description: "Drawable Staff" }
            }
        }
    }
}

/// Template a descriptor is rendered from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemTemplate {
    Preset(ItemPreset),
    /// Caller-supplied JSON item descriptor, used as-is.
    Custom(String),
}

impl ItemTemplate {
    pub fn source(&self) -> &str {
        match self {
            Self::Preset(preset) => preset.template(),
            Self::Custom(json) => json,
        }
    }

    pub fn metadata(&self) -> Option<ItemMetadata> {
        match self {
            Self::Preset(preset) => Some(preset.metadata()),
            Self::Custom(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_parse_as_json_objects() {
        for preset in ItemPreset::value_variants() {
            let value: serde_json::Value = serde_json::from_str(preset.template()).unwrap();
            assert!(value.is_object(), "{} template is not an object", preset.name());
            assert_eq!(value["name"], preset.metadata().item_name);
        }
    }

    #[test]
    fn test_from_str_accepts_names() {
        for preset in ItemPreset::value_variants() {
            assert_eq!(ItemPreset::from_str(preset.name()), Some(*preset));
        }
        assert_eq!(ItemPreset::from_str("COMMONPISTOL"), Some(ItemPreset::Pistol));
        assert_eq!(ItemPreset::from_str("broadsword"), None);
    }

    #[test]
    fn test_custom_template_has_no_metadata() {
        let template = ItemTemplate::Custom("{}".to_string());
        assert_eq!(template.source(), "{}");
        assert_eq!(template.metadata(), None);
    }

    #[test]
    fn test_preset_serde_names() {
        let preset: ItemPreset = toml::from_str::<std::collections::HashMap<String, ItemPreset>>(
            "p = \"tesla-staff\"",
        )
        .unwrap()["p"];
        assert_eq!(preset, ItemPreset::TeslaStaff);
    }
}
