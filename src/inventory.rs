//! Inventory icon rendering
//!
//! An inventory icon is a list of `{ image, position }` entries. Tiles on the
//! right or top edge of an image that does not fill whole tiles are cropped
//! to the remainder so the placeholder's unused area does not show.

use serde_json::Value;

use crate::models::{CompiledOutput, Drawable, InventoryIconEntry};
use crate::template::{TILE_HEIGHT, TILE_WIDTH};

/// Build the inventory icon entries for a compiled image, in drawable order.
pub fn inventory_icon(output: &CompiledOutput) -> Vec<InventoryIconEntry> {
    let last_column = output.frame_count_x().saturating_sub(1);
    let last_row = output.frame_count_y().saturating_sub(1);
    let width_rest = output.image_width % TILE_WIDTH;
    let height_rest = output.image_height % TILE_HEIGHT;

    output
        .drawables
        .iter()
        .map(|drawable| {
            let crop_w = drawable.frame_x() == last_column && width_rest != 0;
            let crop_h = drawable.frame_y() == last_row && height_rest != 0;
            let mut image = drawable.result_image();
            if crop_w || crop_h {
                let w = if crop_w { width_rest } else { TILE_WIDTH };
                let h = if crop_h { height_rest } else { TILE_HEIGHT };
                image.push_str(&crop_directive(w, h));
            }
            icon_entry(drawable, image)
        })
        .collect()
}

/// Inventory icon as a JSON array, the shape item descriptors expect.
pub fn inventory_icon_json(output: &CompiledOutput) -> Result<Value, serde_json::Error> {
    serde_json::to_value(inventory_icon(output))
}

fn crop_directive(w: u32, h: u32) -> String {
    format!("?crop;0;0;{};{}", w, h)
}

fn icon_entry(drawable: &Drawable, image: String) -> InventoryIconEntry {
    InventoryIconEntry { image, position: [drawable.pixel_x, drawable.pixel_y] }
}
