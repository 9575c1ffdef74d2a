//! Descriptor and command implementations

use std::path::Path;
use std::process::ExitCode;

use crate::config::{CliOverrides, DrawablesConfig};
use crate::descriptor::{render_descriptor, to_command};
use crate::models::CompiledOutput;
use crate::templates::ItemTemplate;

use super::{emit, format_json, prepare, CompileArgs, ItemArgs, EXIT_ERROR, EXIT_INVALID_ARGS};

/// Execute the descriptor command
pub fn run_descriptor(
    config_path: Option<&Path>,
    args: &CompileArgs,
    item: &ItemArgs,
    compact: bool,
) -> ExitCode {
    let descriptor = match build_descriptor(config_path, args, item) {
        Ok(descriptor) => descriptor,
        Err(code) => return code,
    };

    match format_json(&descriptor, compact) {
        Ok(text) => emit(&text, args.output.as_deref()),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Execute the command command (prints a /spawnitem line)
pub fn run_command(config_path: Option<&Path>, args: &CompileArgs, item: &ItemArgs) -> ExitCode {
    let descriptor = match build_descriptor(config_path, args, item) {
        Ok(descriptor) => descriptor,
        Err(code) => return code,
    };

    match to_command(&descriptor) {
        Ok(command) => emit(&command, args.output.as_deref()),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn build_descriptor(
    config_path: Option<&Path>,
    args: &CompileArgs,
    item: &ItemArgs,
) -> Result<serde_json::Value, ExitCode> {
    let mut overrides: CliOverrides = args.overrides();
    item.apply(&mut overrides);

    let (config, output) = prepare(config_path, args, &overrides)?;
    if output.is_empty() {
        eprintln!("Warning: '{}' has no visible pixels; the item will have no drawables", args.input.display());
    }

    let template = load_template(&config)?;
    describe(&config, &output, &template)
}

fn load_template(config: &DrawablesConfig) -> Result<ItemTemplate, ExitCode> {
    match config.item.template {
        Some(ref path) => match std::fs::read_to_string(path) {
            Ok(json) => Ok(ItemTemplate::Custom(json)),
            Err(e) => {
                eprintln!("Error: Cannot read template '{}': {}", path.display(), e);
                Err(ExitCode::from(EXIT_INVALID_ARGS))
            }
        },
        None => Ok(ItemTemplate::Preset(config.item.preset)),
    }
}

fn describe(
    config: &DrawablesConfig,
    output: &CompiledOutput,
    template: &ItemTemplate,
) -> Result<serde_json::Value, ExitCode> {
    render_descriptor(output, template, config.group(), config.item.inventory_icon).map_err(|e| {
        eprintln!("Error: {}", e);
        ExitCode::from(EXIT_INVALID_ARGS)
    })
}
