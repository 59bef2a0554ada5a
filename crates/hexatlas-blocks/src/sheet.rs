//! Source sprite sheets cut into face tiles.
//!
//! The terrain sheet is a square image of 16 × 16 tiles. Every tile is resized
//! to `2B × 2B` once, up front, so drawing never resamples again.

use std::borrow::Cow;

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

use crate::atlas::AtlasError;

/// Tiles per row (and per column) of the terrain sheet.
pub const SHEET_TILES_PER_ROW: u32 = 16;

/// Terrain tile used for fire when no fire sheet is supplied.
pub const FIRE_FALLBACK_TILE: u8 = 31;

/// Quarter turns applied to a tile before drawing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Turn {
    /// Unrotated.
    #[default]
    None,
    /// 90° clockwise.
    Quarter,
    /// 180°.
    Half,
    /// 270° clockwise.
    ThreeQuarter,
}

/// A reference to a terrain tile plus the transforms to apply to it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TileRef {
    /// Index into the sheet, row-major.
    pub index: u8,
    /// Per-channel multiplier for greyscale tiles that are tinted at draw time.
    pub tint: Option<[u8; 3]>,
    /// Rotation.
    pub turn: Turn,
}

impl TileRef {
    /// Plain tile.
    pub const fn new(index: u8) -> Self {
        Self {
            index,
            tint: None,
            turn: Turn::None,
        }
    }

    /// Same tile, tinted.
    pub const fn tinted(self, tint: [u8; 3]) -> Self {
        Self {
            tint: Some(tint),
            ..self
        }
    }

    /// Same tile, rotated.
    pub const fn turned(self, turn: Turn) -> Self {
        Self { turn, ..self }
    }
}

/// The terrain sheet (and optional fire sheet) resized to face-tile size.
pub struct TileSheet {
    tiles: Vec<RgbaImage>,
    fire: RgbaImage,
    face_size: u32,
}

impl TileSheet {
    /// Cuts `terrain` into 256 tiles resized to `face_size × face_size`.
    ///
    /// `fire` is a single tile (or a vertical animation strip whose first frame is used).
    pub fn from_images(
        terrain: &RgbaImage,
        fire: Option<&RgbaImage>,
        face_size: u32,
    ) -> Result<Self, AtlasError> {
        if face_size == 0 || !face_size.is_multiple_of(2) {
            return Err(AtlasError::InvalidConfig(format!(
                "face size must be a positive even number, got {face_size}"
            )));
        }
        let (w, h) = terrain.dimensions();
        if w != h {
            return Err(AtlasError::MalformedSheet(format!(
                "terrain sheet must be square, got {w}x{h}"
            )));
        }
        if w == 0 || !w.is_multiple_of(SHEET_TILES_PER_ROW) {
            return Err(AtlasError::MalformedSheet(format!(
                "terrain sheet width {w} is not a positive multiple of {SHEET_TILES_PER_ROW}"
            )));
        }

        let source_tile = w / SHEET_TILES_PER_ROW;
        let tiles = (0..SHEET_TILES_PER_ROW * SHEET_TILES_PER_ROW)
            .map(|i| {
                let x = (i % SHEET_TILES_PER_ROW) * source_tile;
                let y = (i / SHEET_TILES_PER_ROW) * source_tile;
                let tile = imageops::crop_imm(terrain, x, y, source_tile, source_tile).to_image();
                fit(&tile, face_size)
            })
            .collect::<Vec<_>>();

        let fire = match fire {
            Some(img) => {
                let (fw, fh) = img.dimensions();
                if fw == 0 || fh < fw {
                    return Err(AtlasError::MalformedSheet(format!(
                        "fire sheet must be at least as tall as it is wide, got {fw}x{fh}"
                    )));
                }
                let frame = imageops::crop_imm(img, 0, 0, fw, fw).to_image();
                fit(&frame, face_size)
            }
            None => tiles[FIRE_FALLBACK_TILE as usize].clone(),
        };

        Ok(Self {
            tiles,
            fire,
            face_size,
        })
    }

    /// Side length of every tile (`2B`).
    pub fn face_size(&self) -> u32 {
        self.face_size
    }

    /// Untransformed tile.
    pub fn tile(&self, index: u8) -> &RgbaImage {
        &self.tiles[index as usize]
    }

    /// The fire tile.
    pub fn fire(&self) -> &RgbaImage {
        &self.fire
    }

    /// Tile with its tint and rotation applied. Borrows when there is nothing to apply.
    pub fn resolve(&self, tile: TileRef) -> Cow<'_, RgbaImage> {
        let base = self.tile(tile.index);
        if tile.tint.is_none() && tile.turn == Turn::None {
            return Cow::Borrowed(base);
        }

        let mut img = match tile.turn {
            Turn::None => base.clone(),
            Turn::Quarter => imageops::rotate90(base),
            Turn::Half => imageops::rotate180(base),
            Turn::ThreeQuarter => imageops::rotate270(base),
        };
        if let Some(tint) = tile.tint {
            for px in img.pixels_mut() {
                *px = apply_tint(*px, tint);
            }
        }
        Cow::Owned(img)
    }
}

/// Resizes a tile to `size`. Upscaling keeps hard texel edges; downscaling averages.
fn fit(tile: &RgbaImage, size: u32) -> RgbaImage {
    if tile.width() == size && tile.height() == size {
        return tile.clone();
    }
    let filter = if size >= tile.width() {
        FilterType::Nearest
    } else {
        FilterType::Triangle
    };
    imageops::resize(tile, size, size, filter)
}

fn apply_tint(px: Rgba<u8>, tint: [u8; 3]) -> Rgba<u8> {
    let [r, g, b, a] = px.0;
    let mul = |c: u8, t: u8| ((c as u32 * t as u32 + 127) / 255) as u8;
    Rgba([mul(r, tint[0]), mul(g, tint[1]), mul(b, tint[2]), a])
}
