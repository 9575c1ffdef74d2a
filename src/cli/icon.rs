//! Inventory icon command implementation

use std::path::Path;
use std::process::ExitCode;

use crate::inventory::inventory_icon_json;

use super::{emit, format_json, prepare, CompileArgs, EXIT_ERROR};

/// Execute the icon command
///
/// Icons are positioned from their own origin, so hand offsets do not apply.
pub fn run_icon(config_path: Option<&Path>, args: &CompileArgs, compact: bool) -> ExitCode {
    let mut overrides = args.overrides();
    overrides.hand_x = Some(0);
    overrides.hand_y = Some(0);

    let (_, output) = match prepare(config_path, args, &overrides) {
        Ok(prepared) => prepared,
        Err(code) => return code,
    };

    match inventory_icon_json(&output).and_then(|icon| format_json(&icon, compact)) {
        Ok(text) => emit(&text, args.output.as_deref()),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
