//! Block image atlas: isometric hexagonal block images, the variant-key offset table, and per-slot opacity.

mod alpha;
mod atlas;
mod catalog;
mod classify;
mod hexagon;
mod loader;
mod offsets;
mod projector;
mod sheet;
mod synth;

pub use alpha::{AlphaPolicy, DEFAULT_HIGH, DEFAULT_LOW};
pub use atlas::{AtlasBuilder, AtlasError, AtlasLayout, ImageRect, MAX_HALF_SIZE, SLOTS_PER_ROW};
pub use catalog::{Bounds, Faces, SLOT_COUNT, Step, UNUSED_SLOTS, is_unused, recipe};
pub use classify::{SlotClass, classify_rect, classify_slots, silhouette_opaque, summarize};
pub use hexagon::{Face, Hexagon};
pub use loader::{
    AtlasLoadError, AtlasLoader, AtlasOptions, AtlasOrigin, BlockAtlas, FIRE_FILE, ImageDir,
    LoadState, SourceArt, TERRAIN_FILE, prebuilt_file_name,
};
pub use offsets::{KEY_COUNT, OffsetTable, SUB_STATES, Slot, VariantKey};
pub use projector::{
    BlockCanvas, FacePaints, NORTH_SHADE, Paint, Side, TOP_SHADE, WEST_SHADE, blend_over,
    project_cube, shade,
};
pub use sheet::{FIRE_FALLBACK_TILE, SHEET_TILES_PER_ROW, TileRef, TileSheet, Turn};
pub use synth::{render_slot, synthesize_atlas};
