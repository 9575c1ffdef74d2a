//! Preview command implementation

use std::path::Path;
use std::process::ExitCode;

use crate::directives::reconstruct;
use crate::output::{preview_path, save_png, scale_image};

use super::{prepare, CompileArgs, EXIT_ERROR, EXIT_SUCCESS};

/// Execute the preview command
pub fn run_preview(config_path: Option<&Path>, args: &CompileArgs, scale: u8) -> ExitCode {
    let (_, output) = match prepare(config_path, args, &args.overrides()) {
        Ok(prepared) => prepared,
        Err(code) => return code,
    };

    let image = match reconstruct(&output) {
        Ok(image) => scale_image(image, scale),
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let path = args.output.clone().unwrap_or_else(|| preview_path(&args.input));
    if let Err(e) = save_png(&image, &path) {
        eprintln!("Error: Failed to save '{}': {}", path.display(), e);
        return ExitCode::from(EXIT_ERROR);
    }

    println!(
        "Saved: {} ({} drawables, {}x{})",
        path.display(),
        output.drawables.len(),
        image.width(),
        image.height()
    );
    ExitCode::from(EXIT_SUCCESS)
}
