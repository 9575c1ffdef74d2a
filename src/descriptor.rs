//! Item descriptors and spawn commands
//!
//! A descriptor is an item definition (`name`, `count`, `parameters`) whose
//! `parameters.animationCustom.animatedParts.parts` gets one part per
//! drawable, named `D_1`, `D_2`, ... in drawable order. Each part is placed
//! at the drawable's block position plus the hand offset.

use serde_json::{json, Map, Value};
use thiserror::Error;

use crate::inventory::inventory_icon_json;
use crate::models::CompiledOutput;
use crate::templates::ItemTemplate;

/// Item spawned when a template has no `name`.
pub const DEFAULT_ITEM_NAME: &str = "perfectlygenericitem";

/// Prefix of generated part names.
pub const PART_PREFIX: &str = "D_";

/// Error type for descriptor rendering
#[derive(Debug, Error)]
pub enum DescriptorError {
    /// Template is not valid JSON
    #[error("failed to parse item template: {0}")]
    TemplateParse(#[from] serde_json::Error),
    /// Template is JSON but not shaped like an item descriptor
    #[error("invalid item template: {0}")]
    InvalidTemplate(String),
}

/// Build a descriptor from a JSON template.
///
/// Missing `name` and `count` default to [`DEFAULT_ITEM_NAME`] and 1. When a
/// `group` is given every part joins that transformation group. With
/// `add_inventory_icon` the descriptor's `inventoryIcon` is replaced by the
/// drawables themselves.
pub fn to_descriptor(
    output: &CompiledOutput,
    template: &str,
    group: Option<&str>,
    add_inventory_icon: bool,
) -> Result<Value, DescriptorError> {
    let mut descriptor: Value = serde_json::from_str(template)?;
    let root = descriptor
        .as_object_mut()
        .ok_or_else(|| DescriptorError::InvalidTemplate("root must be an object".to_string()))?;

    root.entry("name").or_insert_with(|| json!(DEFAULT_ITEM_NAME));
    root.entry("count").or_insert_with(|| json!(1));

    let parameters = object_entry(root, "parameters")?;
    let animation = object_entry(parameters, "animationCustom")?;
    let parts = object_entry(object_entry(animation, "animatedParts")?, "parts")?;

    let groups: Vec<&str> = group.filter(|g| !g.is_empty()).into_iter().collect();
    let (offset_x, offset_y) = output.block_offset();

    for (index, drawable) in output.drawables.iter().enumerate() {
        let part = json!({
            "properties": {
                "centered": false,
                "image": drawable.result_image(),
                "offset": [drawable.block_x() + offset_x, drawable.block_y() + offset_y],
                "transformationGroups": groups,
            }
        });
        parts.insert(format!("{}{}", PART_PREFIX, index + 1), part);
    }

    if add_inventory_icon {
        parameters.insert("inventoryIcon".to_string(), inventory_icon_json(output)?);
    }

    log::debug!("descriptor has {} drawable parts", output.drawables.len());
    Ok(descriptor)
}

/// Build a descriptor from a preset or custom template, stamping preset metadata.
pub fn render_descriptor(
    output: &CompiledOutput,
    template: &ItemTemplate,
    group: Option<&str>,
    add_inventory_icon: bool,
) -> Result<Value, DescriptorError> {
    let mut descriptor = to_descriptor(output, template.source(), group, add_inventory_icon)?;
    if let Some(metadata) = template.metadata() {
        descriptor["name"] = json!(metadata.item_name);
        descriptor["parameters"]["shortdescription"] = json!(metadata.short_description);
    }
    Ok(descriptor)
}

/// Render a descriptor as a `/spawnitem` chat command.
///
/// Newlines and spaces are stripped from the parameters so the command
/// survives the game's chat input.
pub fn to_command(descriptor: &Value) -> Result<String, DescriptorError> {
    let name = match descriptor.get("name") {
        None => DEFAULT_ITEM_NAME,
        Some(Value::String(name)) => name.as_str(),
        Some(_) => return Err(DescriptorError::InvalidTemplate("name must be a string".to_string())),
    };
    let parameters = match descriptor.get("parameters") {
        Some(parameters) => serde_json::to_string(parameters)?,
        None => "{}".to_string(),
    };
    let parameters = parameters.replace(['\n', '\r', ' '], "");
    Ok(format!("/spawnitem {} 1 '{}'", name, parameters))
}

/// Get `map[key]` as an object, creating it when absent.
fn object_entry<'a>(
    map: &'a mut Map<String, Value>,
    key: &str,
) -> Result<&'a mut Map<String, Value>, DescriptorError> {
    map.entry(key)
        .or_insert_with(|| Value::Object(Map::new()))
        .as_object_mut()
        .ok_or_else(|| DescriptorError::InvalidTemplate(format!("'{}' must be an object", key)))
}
