//! Per-slot opacity classification of a finished atlas.

use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::atlas::{AtlasLayout, ImageRect};
use crate::hexagon::Hexagon;
use crate::offsets::Slot;

/// How much of a slot rectangle is covered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlotClass {
    /// Every pixel of the rectangle has alpha 255.
    Opaque,
    /// Every pixel of the rectangle has alpha 0.
    Transparent,
    /// Anything else.
    Translucent,
}

impl SlotClass {
    /// Returns `true` for [`SlotClass::Opaque`].
    pub fn is_opaque(self) -> bool {
        self == SlotClass::Opaque
    }

    /// Returns `true` for [`SlotClass::Transparent`].
    pub fn is_transparent(self) -> bool {
        self == SlotClass::Transparent
    }
}

/// Classifies the full rectangle `rect` of `image`.
pub fn classify_rect(image: &RgbaImage, rect: ImageRect) -> SlotClass {
    let mut all_opaque = true;
    let mut all_clear = true;
    for y in rect.y..rect.y + rect.h {
        for x in rect.x..rect.x + rect.w {
            match image.get_pixel(x, y)[3] {
                255 => all_clear = false,
                0 => all_opaque = false,
                _ => return SlotClass::Translucent,
            }
            if !all_opaque && !all_clear {
                return SlotClass::Translucent;
            }
        }
    }
    if all_clear {
        SlotClass::Transparent
    } else {
        SlotClass::Opaque
    }
}

/// Classifies every slot, the dummy included, by scanning its rectangle.
///
/// `image` must already have the atlas dimensions of `layout`.
pub fn classify_slots(image: &RgbaImage, layout: &AtlasLayout) -> Vec<SlotClass> {
    (0..layout.slot_count)
        .map(|s| classify_rect(image, layout.rect(Slot(s))))
        .collect()
}

/// Returns `true` if every pixel inside the hexagon of `slot` has alpha 255.
pub fn silhouette_opaque(image: &RgbaImage, layout: &AtlasLayout, slot: Slot) -> bool {
    let rect = layout.rect(slot);
    let hex = Hexagon::new(layout.half_size);
    (0..rect.h).all(|y| {
        (0..rect.w)
            .filter(|&x| hex.contains(x, y))
            .all(|x| image.get_pixel(rect.x + x, rect.y + y)[3] == 255)
    })
}

/// Class counts `(opaque, transparent, translucent)`.
pub fn summarize(classes: &[SlotClass]) -> (usize, usize, usize) {
    classes.iter().fold((0, 0, 0), |(o, t, l), class| match class {
        SlotClass::Opaque => (o + 1, t, l),
        SlotClass::Transparent => (o, t + 1, l),
        SlotClass::Translucent => (o, t, l + 1),
    })
}
