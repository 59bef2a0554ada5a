//! Block-image atlas: a single RGBA image holding every block image in rows of 16.
//!
//! Each slot owns a `4B × 4B` square at `((slot % 16) · 4B, (slot / 16) · 4B)`.
//! Slot 0 is the dummy image used for unrecognized blocks and is always fully
//! transparent.

use std::fmt;

use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::SLOT_COUNT;
use crate::offsets::Slot;

/// Number of block images per atlas row.
pub const SLOTS_PER_ROW: u32 = 16;

/// Largest accepted half-size. Beyond this the atlas no longer fits comfortably in memory.
pub const MAX_HALF_SIZE: u32 = 128;

// ---------------------------------------------------------------------------
// AtlasError
// ---------------------------------------------------------------------------

/// Errors returned during atlas construction.
#[derive(Debug, Error)]
pub enum AtlasError {
    /// The half-size parameter B is zero or too large.
    #[error("half-size {0} out of range (1..={MAX_HALF_SIZE})")]
    InvalidHalfSize(u32),

    /// A slot index beyond the end of the atlas.
    #[error("slot {slot} out of range (atlas holds {count} slots)")]
    SlotOutOfRange {
        /// Offending slot.
        slot: u16,
        /// Number of slots in the atlas.
        count: u16,
    },

    /// An image whose dimensions don't match what the atlas expects.
    #[error("image is {width}x{height}, expected {expected_width}x{expected_height}")]
    ImageSize {
        /// Actual width.
        width: u32,
        /// Actual height.
        height: u32,
        /// Expected width.
        expected_width: u32,
        /// Expected height.
        expected_height: u32,
    },

    /// A source sheet that can't be cut into tiles.
    #[error("malformed sheet: {0}")]
    MalformedSheet(String),

    /// A synthesis worker thread could not be started.
    #[error("failed to spawn block image worker: {0}")]
    WorkerSpawn(#[source] std::io::Error),

    /// A synthesis worker thread panicked.
    #[error("block image worker panicked")]
    WorkerPanicked,

    /// Configuration validation error.
    #[error("invalid atlas config: {0}")]
    InvalidConfig(String),
}

// ---------------------------------------------------------------------------
// ImageRect
// ---------------------------------------------------------------------------

/// An axis-aligned rectangle in atlas pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageRect {
    /// Left edge.
    pub x: u32,
    /// Top edge.
    pub y: u32,
    /// Width in pixels.
    pub w: u32,
    /// Height in pixels.
    pub h: u32,
}

impl ImageRect {
    /// Creates a rectangle.
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// Returns `true` if the two rectangles share at least one pixel.
    pub fn overlaps(&self, other: &ImageRect) -> bool {
        self.x < other.x + other.w
            && other.x < self.x + self.w
            && self.y < other.y + other.h
            && other.y < self.y + self.h
    }
}

impl fmt::Display for ImageRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}+{}+{}", self.w, self.h, self.x, self.y)
    }
}

// ---------------------------------------------------------------------------
// AtlasLayout
// ---------------------------------------------------------------------------

/// Geometry of an atlas for a given half-size B.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtlasLayout {
    /// Half-size parameter B; every block image is `4B × 4B`.
    pub half_size: u32,
    /// Number of slots the atlas holds.
    pub slot_count: u16,
}

impl AtlasLayout {
    /// Layout for the full block catalog at half-size `half_size`.
    pub fn new(half_size: u32) -> Result<Self, AtlasError> {
        let layout = Self {
            half_size,
            slot_count: SLOT_COUNT,
        };
        layout.validate()?;
        Ok(layout)
    }

    /// Validates the half-size and slot count.
    pub fn validate(&self) -> Result<(), AtlasError> {
        if self.half_size == 0 || self.half_size > MAX_HALF_SIZE {
            return Err(AtlasError::InvalidHalfSize(self.half_size));
        }
        if self.slot_count == 0 {
            return Err(AtlasError::InvalidConfig(
                "atlas must hold at least the dummy slot".to_string(),
            ));
        }
        Ok(())
    }

    /// Side length of one slot rectangle (`4B`).
    pub fn rect_size(&self) -> u32 {
        self.half_size * 4
    }

    /// Side length of a source face tile after resizing (`2B`).
    pub fn face_size(&self) -> u32 {
        self.half_size * 2
    }

    /// Number of slot rows.
    pub fn rows(&self) -> u32 {
        (self.slot_count as u32).div_ceil(SLOTS_PER_ROW)
    }

    /// Atlas width in pixels.
    pub fn width(&self) -> u32 {
        SLOTS_PER_ROW * self.rect_size()
    }

    /// Atlas height in pixels.
    pub fn height(&self) -> u32 {
        self.rows() * self.rect_size()
    }

    /// Returns the bounding rectangle of a slot.
    ///
    /// Slots past the end of the atlas still get a rectangle computed from their
    /// linear index; callers that read pixels check [`AtlasLayout::contains`] first.
    pub fn rect(&self, slot: Slot) -> ImageRect {
        let index = slot.0 as u32;
        let size = self.rect_size();
        ImageRect::new(
            (index % SLOTS_PER_ROW) * size,
            (index / SLOTS_PER_ROW) * size,
            size,
            size,
        )
    }

    /// Returns `true` if `slot` is one of this atlas's slots.
    pub fn contains(&self, slot: Slot) -> bool {
        slot.0 < self.slot_count
    }

    fn check_slot(&self, slot: Slot) -> Result<(), AtlasError> {
        if self.contains(slot) {
            Ok(())
        } else {
            Err(AtlasError::SlotOutOfRange {
                slot: slot.0,
                count: self.slot_count,
            })
        }
    }

    /// Sets every pixel of the dummy slot in `image` to transparent black.
    pub fn clear_dummy(&self, image: &mut RgbaImage) {
        let rect = self.rect(Slot::DUMMY);
        let x_end = (rect.x + rect.w).min(image.width());
        let y_end = (rect.y + rect.h).min(image.height());
        for y in rect.y..y_end {
            for x in rect.x..x_end {
                image.put_pixel(x, y, Rgba([0, 0, 0, 0]));
            }
        }
    }

    /// Checks that `image` has exactly this layout's atlas dimensions.
    pub fn check_atlas_image(&self, image: &RgbaImage) -> Result<(), AtlasError> {
        if image.width() != self.width() || image.height() != self.height() {
            return Err(AtlasError::ImageSize {
                width: image.width(),
                height: image.height(),
                expected_width: self.width(),
                expected_height: self.height(),
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// AtlasBuilder
// ---------------------------------------------------------------------------

/// Assembles block images into an atlas.
pub struct AtlasBuilder {
    layout: AtlasLayout,
    /// The atlas image being assembled, allocated at its final size.
    atlas_image: RgbaImage,
    /// Slots that have received an image.
    placed: Vec<bool>,
}

impl AtlasBuilder {
    /// Creates a builder with a fully transparent atlas of the exact final size.
    pub fn new(layout: AtlasLayout) -> Self {
        let atlas_image = RgbaImage::new(layout.width(), layout.height());
        Self {
            placed: vec![false; layout.slot_count as usize],
            atlas_image,
            layout,
        }
    }

    /// Copies a `4B × 4B` block image into its slot rectangle.
    ///
    /// Placing the dummy slot is allowed but the result is cleared again by
    /// [`AtlasBuilder::build`].
    pub fn place(&mut self, slot: Slot, img: &RgbaImage) -> Result<(), AtlasError> {
        self.layout.check_slot(slot)?;
        let size = self.layout.rect_size();
        if img.width() != size || img.height() != size {
            return Err(AtlasError::ImageSize {
                width: img.width(),
                height: img.height(),
                expected_width: size,
                expected_height: size,
            });
        }

        let rect = self.layout.rect(slot);
        image::imageops::replace(
            &mut self.atlas_image,
            img,
            rect.x as i64,
            rect.y as i64,
        );
        self.placed[slot.0 as usize] = true;
        Ok(())
    }

    /// Returns how many slots have received an image.
    pub fn placed_slots(&self) -> usize {
        self.placed.iter().filter(|&&p| p).count()
    }

    /// Returns a reference to the layout.
    pub fn layout(&self) -> &AtlasLayout {
        &self.layout
    }

    /// Finalizes the atlas, forcing the dummy slot to full transparency.
    pub fn build(mut self) -> RgbaImage {
        self.layout.clear_dummy(&mut self.atlas_image);
        self.atlas_image
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(size: u32, alpha: u8) -> RgbaImage {
        RgbaImage::from_pixel(size, size, Rgba([200, 100, 50, alpha]))
    }

    #[test]
    fn test_atlas_dimensions_follow_half_size() {
        for b in 1..=12 {
            let layout = AtlasLayout::new(b).unwrap();
            assert_eq!(layout.width(), 16 * 4 * b);
            assert_eq!(
                layout.height(),
                (SLOT_COUNT as u32).div_ceil(16) * 4 * b,
                "height mismatch for B={b}"
            );
        }
    }

    #[test]
    fn test_invalid_half_size_rejected() {
        assert!(matches!(
            AtlasLayout::new(0),
            Err(AtlasError::InvalidHalfSize(0))
        ));
        assert!(AtlasLayout::new(MAX_HALF_SIZE + 1).is_err());
        assert!(AtlasLayout::new(MAX_HALF_SIZE).is_ok());
    }

    #[test]
    fn test_slot_rects_do_not_overlap() {
        let layout = AtlasLayout::new(3).unwrap();
        let rects: Vec<ImageRect> = (0..layout.slot_count)
            .map(|s| layout.rect(Slot(s)))
            .collect();
        for (i, a) in rects.iter().enumerate() {
            assert!(a.x + a.w <= layout.width());
            assert!(a.y + a.h <= layout.height());
            for b in &rects[i + 1..] {
                assert!(!a.overlaps(b), "{a} overlaps {b}");
            }
        }
    }

    #[test]
    fn test_rect_from_linear_index() {
        let layout = AtlasLayout::new(2).unwrap();
        assert_eq!(layout.rect(Slot(0)), ImageRect::new(0, 0, 8, 8));
        assert_eq!(layout.rect(Slot(15)), ImageRect::new(120, 0, 8, 8));
        assert_eq!(layout.rect(Slot(17)), ImageRect::new(8, 8, 8, 8));
    }

    #[test]
    fn test_place_writes_only_its_rectangle() {
        let layout = AtlasLayout::new(2).unwrap();
        let mut builder = AtlasBuilder::new(layout);
        builder.place(Slot(18), &solid(8, 255)).unwrap();
        let atlas = builder.build();

        let rect = layout.rect(Slot(18));
        for (x, y, px) in atlas.enumerate_pixels() {
            let inside = x >= rect.x && x < rect.x + rect.w && y >= rect.y && y < rect.y + rect.h;
            assert_eq!(px[3] == 255, inside, "pixel ({x},{y})");
        }
    }

    #[test]
    fn test_place_rejects_wrong_size_and_slot() {
        let layout = AtlasLayout::new(2).unwrap();
        let mut builder = AtlasBuilder::new(layout);
        assert!(matches!(
            builder.place(Slot(1), &solid(7, 255)),
            Err(AtlasError::ImageSize { .. })
        ));
        assert!(matches!(
            builder.place(Slot(SLOT_COUNT), &solid(8, 255)),
            Err(AtlasError::SlotOutOfRange { .. })
        ));
        assert_eq!(builder.placed_slots(), 0);
    }

    #[test]
    fn test_build_clears_dummy_slot() {
        let layout = AtlasLayout::new(2).unwrap();
        let mut builder = AtlasBuilder::new(layout);
        builder.place(Slot::DUMMY, &solid(8, 255)).unwrap();
        let atlas = builder.build();
        let rect = layout.rect(Slot::DUMMY);
        for y in rect.y..rect.y + rect.h {
            for x in rect.x..rect.x + rect.w {
                assert_eq!(atlas.get_pixel(x, y)[3], 0);
            }
        }
    }
}
