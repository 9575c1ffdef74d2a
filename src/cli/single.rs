//! Single texture command implementation

use std::path::Path;
use std::process::ExitCode;

use crate::config::CliOverrides;
use crate::single_texture::compose_with;

use super::{emit, prepare, CompileArgs, EXIT_ERROR};

/// Execute the single command
///
/// Transparent and white pixels are always encoded here. White becomes
/// near-white so it survives the final clear of the white canvas, which
/// also erases the canvas under tiles that were dropped as empty.
pub fn run_single(
    config_path: Option<&Path>,
    args: &CompileArgs,
    base_scale: Option<u32>,
    fade: bool,
    keep_background: bool,
) -> ExitCode {
    let overrides = CliOverrides {
        replace_blank: Some(true),
        replace_white: Some(true),
        base_scale,
        fade: fade.then_some(true),
        clear_background: keep_background.then_some(false),
        ..args.overrides()
    };

    let (config, output) = match prepare(config_path, args, &overrides) {
        Ok(prepared) => prepared,
        Err(code) => return code,
    };

    match compose_with(&output, &config.single_texture_options()) {
        Ok(directives) => emit(&directives, args.output.as_deref()),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
