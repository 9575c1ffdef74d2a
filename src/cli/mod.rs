//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod descriptor;
mod icon;
mod preview;
mod single;

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::compiler::{check_dimensions, compile, CompileError};
use crate::config::{load_config, merge_cli_overrides, CliOverrides, DrawablesConfig};
use crate::models::CompiledOutput;
use crate::templates::ItemPreset;

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Drawables - Turn images into recolor directives and item descriptors
#[derive(Parser)]
#[command(name = "drawables")]
#[command(about = "Drawables - Turn images into recolor directives and item descriptors")]
#[command(version)]
pub struct Cli {
    /// Log what is being done (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file to use instead of the discovered drawables.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Arguments shared by every command that compiles an image
#[derive(Args, Debug, Clone)]
pub struct CompileArgs {
    /// Input image
    pub input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Horizontal hand offset in pixels
    #[arg(long, allow_negative_numbers = true)]
    pub hand_x: Option<i32>,

    /// Vertical hand offset in pixels
    #[arg(long, allow_negative_numbers = true)]
    pub hand_y: Option<i32>,

    /// Color to leave out, RRGGBB or RRGGBBAA (optional '#')
    #[arg(long)]
    pub ignore_color: Option<String>,

    /// Also encode transparent pixels, and replace white with near-white
    #[arg(long)]
    pub replace_blank: bool,

    /// Replace white with near-white
    #[arg(long)]
    pub replace_white: bool,

    /// Placeholder texture asset path
    #[arg(long)]
    pub texture: Option<String>,
}

impl CompileArgs {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            texture: self.texture.clone(),
            hand_x: self.hand_x,
            hand_y: self.hand_y,
            ignore_color: self.ignore_color.clone(),
            replace_blank: self.replace_blank.then_some(true),
            replace_white: self.replace_white.then_some(true),
            ..Default::default()
        }
    }
}

/// Arguments selecting and shaping the item descriptor
#[derive(Args, Debug, Clone)]
pub struct ItemArgs {
    /// Built-in item template (pistol, shortsword, tesla-staff)
    #[arg(long, value_parser = parse_preset)]
    pub preset: Option<ItemPreset>,

    /// Custom JSON item template (overrides --preset)
    #[arg(long)]
    pub template: Option<PathBuf>,

    /// Transformation group for the drawable parts
    #[arg(long, conflicts_with = "no_group")]
    pub group: Option<String>,

    /// Do not put the drawable parts in a transformation group
    #[arg(long)]
    pub no_group: bool,

    /// Replace the inventory icon with the drawables
    #[arg(long)]
    pub inventory_icon: bool,
}

impl ItemArgs {
    fn apply(&self, overrides: &mut CliOverrides) {
        overrides.preset = self.preset;
        overrides.template = self.template.clone();
        overrides.group = if self.no_group { Some(String::new()) } else { self.group.clone() };
        overrides.inventory_icon = self.inventory_icon.then_some(true);
    }
}

/// Parse a preset name, accepting item names such as `commonpistol` too.
fn parse_preset(s: &str) -> Result<ItemPreset, String> {
    ItemPreset::from_str(s).ok_or_else(|| {
        let names: Vec<&str> = ItemPreset::value_variants().iter().map(|p| p.name()).collect();
        format!("unknown preset '{}' (expected one of: {})", s, names.join(", "))
    })
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print an item descriptor (JSON) with one part per drawable
    Descriptor {
        #[command(flatten)]
        compile: CompileArgs,

        #[command(flatten)]
        item: ItemArgs,

        /// Print the JSON on one line
        #[arg(long)]
        compact: bool,
    },

    /// Print a /spawnitem command for the item descriptor
    Command {
        #[command(flatten)]
        compile: CompileArgs,

        #[command(flatten)]
        item: ItemArgs,
    },

    /// Print one directive string that draws the whole image on a single texture
    Single {
        #[command(flatten)]
        compile: CompileArgs,

        /// Largest dimension of the texture the directives are applied to
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        base_scale: Option<u32>,

        /// Fade every tile slightly after blending
        #[arg(long)]
        fade: bool,

        /// Leave the white canvas visible where no tile was drawn
        #[arg(long)]
        keep_background: bool,
    },

    /// Print an inventory icon (JSON) built from the drawables
    Icon {
        #[command(flatten)]
        compile: CompileArgs,

        /// Print the JSON on one line
        #[arg(long)]
        compact: bool,
    },

    /// Rebuild the image from its drawables and save it as PNG
    Preview {
        #[command(flatten)]
        compile: CompileArgs,

        /// Scale output by integer factor (1-16, default: 1)
        #[arg(long, default_value = "1", value_parser = clap::value_parser!(u8).range(1..=16))]
        scale: u8,
    },
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = cli.config.as_deref();
    match cli.command {
        Commands::Descriptor { compile, item, compact } => {
            descriptor::run_descriptor(config, &compile, &item, compact)
        }
        Commands::Command { compile, item } => descriptor::run_command(config, &compile, &item),
        Commands::Single { compile, base_scale, fade, keep_background } => {
            single::run_single(config, &compile, base_scale, fade, keep_background)
        }
        Commands::Icon { compile, compact } => icon::run_icon(config, &compile, compact),
        Commands::Preview { compile, scale } => preview::run_preview(config, &compile, scale),
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    // A second init (e.g. from tests) is harmless.
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .try_init();
}

/// Load config, apply overrides, and compile the input image.
///
/// Errors are reported on stderr; the returned `ExitCode` is what the command should exit with.
pub(crate) fn prepare(
    config_path: Option<&Path>,
    args: &CompileArgs,
    overrides: &CliOverrides,
) -> Result<(DrawablesConfig, CompiledOutput), ExitCode> {
    let mut config = match load_config(config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Err(ExitCode::from(EXIT_INVALID_ARGS));
        }
    };
    if let Err(e) = merge_cli_overrides(&mut config, overrides) {
        eprintln!("Error: {}", e);
        return Err(ExitCode::from(EXIT_INVALID_ARGS));
    }

    let options = match config.compile_options() {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {}", CompileError::from(e));
            return Err(ExitCode::from(EXIT_INVALID_ARGS));
        }
    };

    let image = load_image(&args.input)?;

    match compile(&image, &options) {
        Ok(output) => {
            log::info!(
                "{}: {} drawables from a {}x{} image",
                args.input.display(),
                output.drawables.len(),
                output.image_width,
                output.image_height
            );
            Ok((config, output))
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            Err(ExitCode::from(EXIT_ERROR))
        }
    }
}

/// Read an image, refusing oversized ones before decoding pixel data.
fn load_image(path: &Path) -> Result<image::RgbaImage, ExitCode> {
    let (width, height) = match image::image_dimensions(path) {
        Ok(dims) => dims,
        Err(e) => {
            eprintln!("Error: Cannot read image '{}': {}", path.display(), e);
            return Err(ExitCode::from(EXIT_ERROR));
        }
    };
    if let Err(e) = check_dimensions(width, height) {
        eprintln!("Error: {}", e);
        return Err(ExitCode::from(EXIT_ERROR));
    }

    match image::open(path) {
        Ok(img) => Ok(img.to_rgba8()),
        Err(e) => {
            eprintln!("Error: Cannot decode image '{}': {}", path.display(), e);
            Err(ExitCode::from(EXIT_ERROR))
        }
    }
}

/// Write text output, reporting failures.
pub(crate) fn emit(contents: &str, output: Option<&Path>) -> ExitCode {
    match crate::output::write_text(contents, output) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Serialize JSON either indented or on one line.
pub(crate) fn format_json(value: &serde_json::Value, compact: bool) -> Result<String, serde_json::Error> {
    if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_negative_offsets() {
        let cli = Cli::try_parse_from(["drawables", "descriptor", "a.png", "--hand-x", "-4", "--hand-y", "-1"])
            .unwrap();
        match cli.command {
            Commands::Descriptor { compile, .. } => {
                assert_eq!((compile.hand_x, compile.hand_y), (Some(-4), Some(-1)));
            }
            _ => panic!("expected descriptor command"),
        }
    }

    #[test]
    fn test_group_conflicts_with_no_group() {
        let result =
            Cli::try_parse_from(["drawables", "command", "a.png", "--group", "weapon", "--no-group"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_base_scale_must_be_positive() {
        assert!(Cli::try_parse_from(["drawables", "single", "a.png", "--base-scale", "0"]).is_err());
        assert!(Cli::try_parse_from(["drawables", "single", "a.png", "--base-scale", "32"]).is_ok());
    }

    #[test]
    fn test_preset_accepts_item_names() {
        let cli = Cli::try_parse_from(["drawables", "command", "a.png", "--preset", "commonshortsword"])
            .unwrap();
        match cli.command {
            Commands::Command { item, .. } => assert_eq!(item.preset, Some(ItemPreset::Shortsword)),
            _ => panic!("expected command command"),
        }
        assert!(Cli::try_parse_from(["drawables", "command", "a.png", "--preset", "broadsword"]).is_err());
    }

    #[test]
    fn test_item_args_no_group_clears_group() {
        let args = ItemArgs {
            preset: Some(ItemPreset::TeslaStaff),
            template: None,
            group: None,
            no_group: true,
            inventory_icon: false,
        };
        let mut overrides = CliOverrides::default();
        args.apply(&mut overrides);
        assert_eq!(overrides.group, Some(String::new()));
        assert_eq!(overrides.preset, Some(ItemPreset::TeslaStaff));
        assert_eq!(overrides.inventory_icon, None);
    }

    #[test]
    fn test_format_json() {
        let value = serde_json::json!({"a": [1, 2]});
        assert_eq!(format_json(&value, true).unwrap(), "{\"a\":[1,2]}");
        assert!(format_json(&value, false).unwrap().contains('\n'));
    }
}
