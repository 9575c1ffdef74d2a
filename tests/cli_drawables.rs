//! CLI integration tests
//!
//! These tests run the drawables binary against small generated PNG files
//! and check stdout, written files and exit codes.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use image::{Rgba, RgbaImage};
use tempfile::TempDir;

/// Get the path to the drawables binary
fn drawables_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_drawables"))
}

/// Write an image into the temp dir and return its path
fn write_png(dir: &Path, name: &str, image: &RgbaImage) -> PathBuf {
    let path = dir.join(name);
    image.save(&path).expect("Failed to write fixture image");
    path
}

/// Run the binary inside `dir`, so no drawables.toml from the repo is picked up
fn run(dir: &Path, args: &[&str]) -> Output {
    Command::new(drawables_binary())
        .args(args)
        .current_dir(dir)
        .env("XDG_CONFIG_HOME", dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute drawables")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn red_dot() -> RgbaImage {
    RgbaImage::from_pixel(1, 1, Rgba([255, 0, 0, 255]))
}

#[test]
fn test_descriptor_for_single_pixel() {
    let dir = TempDir::new().unwrap();
    write_png(dir.path(), "dot.png", &red_dot());

    let output = run(dir.path(), &["descriptor", "dot.png"]);
    assert!(output.status.success(), "descriptor failed: {}", String::from_utf8_lossy(&output.stderr));

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["name"], "commonpistol");
    assert_eq!(json["parameters"]["shortdescription"], "Drawable Pistol");

    let part = &json["parameters"]["animationCustom"]["animatedParts"]["parts"]["D_1"]["properties"];
    assert_eq!(
        part["image"],
        "/objects/outpost/customsign/signplaceholder.png?replace;01000101=FF0000FF"
    );
    assert_eq!(part["centered"], false);
    assert_eq!(part["offset"], serde_json::json!([0.0, 0.0]));
    assert_eq!(part["transformationGroups"], serde_json::json!(["weapon"]));
}

#[test]
fn test_descriptor_hand_offset_and_no_group() {
    let dir = TempDir::new().unwrap();
    write_png(dir.path(), "dot.png", &red_dot());

    let output = run(
        dir.path(),
        &["descriptor", "dot.png", "--hand-x", "-8", "--hand-y", "4", "--no-group", "--compact"],
    );
    assert!(output.status.success());

    let text = stdout(&output);
    assert_eq!(text.trim_end().lines().count(), 1, "--compact prints one line");

    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    let part = &json["parameters"]["animationCustom"]["animatedParts"]["parts"]["D_1"]["properties"];
    assert_eq!(part["offset"], serde_json::json!([-1.0, 0.5]));
    assert_eq!(part["transformationGroups"], serde_json::json!([]));
}

#[test]
fn test_descriptor_custom_template() {
    let dir = TempDir::new().unwrap();
    write_png(dir.path(), "dot.png", &red_dot());
    std::fs::write(dir.path().join("item.json"), r#"{"name": "mything", "parameters": {}}"#).unwrap();

    let output = run(dir.path(), &["descriptor", "dot.png", "--template", "item.json"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["name"], "mything");
    assert_eq!(json["count"], 1);
    assert!(json["parameters"]["animationCustom"]["animatedParts"]["parts"]["D_1"].is_object());
}

#[test]
fn test_command_is_one_line_without_spaces() {
    let dir = TempDir::new().unwrap();
    write_png(dir.path(), "dot.png", &red_dot());

    let output = run(dir.path(), &["command", "dot.png", "--preset", "shortsword"]);
    assert!(output.status.success());

    let text = stdout(&output);
    let command = text.trim_end();
    assert!(command.starts_with("/spawnitem commonshortsword 1 '"), "got: {}", command);
    assert!(command.ends_with('\''));
    assert_eq!(command.matches(' ').count(), 3);
    assert!(!command.contains('\n'));
    assert!(command.contains("?replace;01000101=FF0000FF"));
}

#[test]
fn test_single_texture_header() {
    let dir = TempDir::new().unwrap();
    let image = RgbaImage::from_pixel(64, 8, Rgba([0, 0, 255, 255]));
    write_png(dir.path(), "wide.png", &image);

    let output = run(dir.path(), &["single", "wide.png"]);
    assert!(output.status.success());

    let directives = stdout(&output);
    assert!(directives.starts_with(
        "?setcolor=ffffff?replace;00000000=ffffff;ffffff00=ffffff?setcolor=ffffff?scalenearest=1?crop=0;0;64;8"
    ));
    assert!(directives.contains("?blendmult=/objects/outpost/customsign/signplaceholder.png;0;0?replace;"));
    assert!(directives.contains("?blendmult=/objects/outpost/customsign/signplaceholder.png;-32;0?replace;"));
    assert!(!directives.contains("?fade"));
    assert!(directives.trim_end().ends_with("?replace;ffffffff=00000000"));
}

#[test]
fn test_single_texture_extras() {
    let dir = TempDir::new().unwrap();
    write_png(dir.path(), "dot.png", &red_dot());

    let output = run(dir.path(), &["single", "dot.png", "--fade"]);
    assert!(output.status.success());

    let directives = stdout(&output);
    assert!(directives.contains("?fade;80ff80;0.0001518"));
    assert!(directives.trim_end().ends_with("?replace;ffffffff=00000000"));
}

#[test]
fn test_single_texture_clears_canvas_under_dropped_tile() {
    let dir = TempDir::new().unwrap();
    let image = RgbaImage::from_fn(64, 8, |x, y| match (x, y) {
        (40, 0) => Rgba([255, 255, 255, 255]),
        (x, _) if x < 32 => Rgba([0, 0, 0, 0]),
        _ => Rgba([255, 0, 0, 255]),
    });
    write_png(dir.path(), "half.png", &image);

    let output = run(dir.path(), &["single", "half.png"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let directives = stdout(&output);
    let directives = directives.trim_end();
    // The transparent left tile is dropped, so only the canvas covers it.
    assert_eq!(directives.matches("?blendmult=").count(), 1);
    assert!(directives.contains(";-32;0?replace;"));
    assert!(directives.ends_with("?replace;ffffffff=00000000"));
    assert!(directives.contains("=FEFEFEFF"));
    assert!(!directives.contains("=FFFFFFFF"));
}

#[test]
fn test_single_texture_keep_background() {
    let dir = TempDir::new().unwrap();
    write_png(dir.path(), "dot.png", &red_dot());

    let output = run(dir.path(), &["single", "dot.png", "--keep-background"]);
    assert!(output.status.success());
    assert!(!stdout(&output).contains("ffffffff=00000000"));
}

#[test]
fn test_icon_crops_partial_tile() {
    let dir = TempDir::new().unwrap();
    let image = RgbaImage::from_pixel(40, 10, Rgba([10, 20, 30, 255]));
    write_png(dir.path(), "icon.png", &image);

    let output = run(dir.path(), &["icon", "icon.png", "--hand-x", "5"]);
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let entries = json.as_array().unwrap();
    assert_eq!(entries.len(), 4);
    assert_eq!(entries[0]["position"], serde_json::json!([0, 0]));
    assert!(entries[3]["image"].as_str().unwrap().ends_with("?crop;0;0;8;2"));
}

#[test]
fn test_output_file() {
    let dir = TempDir::new().unwrap();
    write_png(dir.path(), "dot.png", &red_dot());

    let output = run(dir.path(), &["command", "dot.png", "-o", "out/spawn.txt"]);
    assert!(output.status.success());
    assert!(stdout(&output).is_empty());

    let written = std::fs::read_to_string(dir.path().join("out/spawn.txt")).unwrap();
    assert!(written.starts_with("/spawnitem "));
}

#[test]
fn test_preview_rebuilds_image() {
    let dir = TempDir::new().unwrap();
    let image = RgbaImage::from_fn(3, 2, |x, y| Rgba([x as u8 * 50, y as u8 * 100, 7, 255]));
    write_png(dir.path(), "art.png", &image);

    let output = run(dir.path(), &["preview", "art.png", "--scale", "2"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let preview = image::open(dir.path().join("art_preview.png")).unwrap().to_rgba8();
    assert_eq!(preview.dimensions(), (6, 4));
    assert_eq!(*preview.get_pixel(5, 3), *image.get_pixel(2, 1));
    assert_eq!(*preview.get_pixel(0, 0), *image.get_pixel(0, 0));
}

#[test]
fn test_config_file_is_used() {
    let dir = TempDir::new().unwrap();
    write_png(dir.path(), "dot.png", &red_dot());
    std::fs::write(
        dir.path().join("drawables.toml"),
        "[compile]\ntexture = \"/custom.png\"\n\n[item]\npreset = \"tesla-staff\"\n",
    )
    .unwrap();

    let output = run(dir.path(), &["descriptor", "dot.png", "--compact"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let text = stdout(&output);
    assert!(text.contains("\"name\":\"teslastaff\""));
    assert!(text.contains("/custom.png?replace;01000101=FF0000FF"));
}

#[test]
fn test_too_large_image_fails() {
    let dir = TempDir::new().unwrap();
    let image = RgbaImage::from_pixel(256, 129, Rgba([0, 0, 0, 255]));
    write_png(dir.path(), "big.png", &image);

    let output = run(dir.path(), &["descriptor", "big.png"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("33024"));
}

#[test]
fn test_missing_input_fails() {
    let dir = TempDir::new().unwrap();
    let output = run(dir.path(), &["descriptor", "nope.png"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_bad_ignore_color_is_invalid_args() {
    let dir = TempDir::new().unwrap();
    write_png(dir.path(), "dot.png", &red_dot());

    let output = run(dir.path(), &["descriptor", "dot.png", "--ignore-color", "12345"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error"));
}

#[test]
fn test_ignore_color_drops_pixels() {
    let dir = TempDir::new().unwrap();
    let image = RgbaImage::from_fn(2, 1, |x, _| {
        if x == 0 {
            Rgba([255, 0, 255, 255])
        } else {
            Rgba([0, 255, 0, 255])
        }
    });
    write_png(dir.path(), "magenta.png", &image);

    let output = run(dir.path(), &["icon", "magenta.png", "--ignore-color", "#ff00ff", "--compact"]);
    assert!(output.status.success());

    let text = stdout(&output);
    assert!(!text.contains("FF00FFFF"));
    assert!(text.contains("02000101=00FF00FF"));
}
