//! Hexagonal projection: paints square face tiles onto a `4B × 4B` block image.
//!
//! Drawing happens in block space `(p, q, h)`, each axis running over
//! `0..=2B` texels: the north face is the plane `q = 2B`, the west face is
//! `p = 2B` and the top is `h = 2B`. A point projects to
//!
//! ```text
//! x = p − q + 2B
//! y = (p + q) / 2 + 2B − h
//! ```
//!
//! Side planes are painted column by column (one source column per image
//! column, one source row per image row); horizontal planes sample the
//! rotated source square under each pixel centre. All writes go through the
//! canvas, which clips to the hexagon, blends source-over and applies the
//! alpha clamp.

use std::ops::Range;

use image::{Rgba, RgbaImage};

use crate::alpha::AlphaPolicy;
use crate::atlas::AtlasError;
use crate::hexagon::Hexagon;

/// Shade multipliers (out of 255) giving the cube its lighting.
pub const TOP_SHADE: u32 = 255;
/// North (left) face shade.
pub const NORTH_SHADE: u32 = 230;
/// West (right) face shade.
pub const WEST_SHADE: u32 = 204;

/// A side of the block, in map compass terms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// Front-left, the plane `q = 2B`.
    North,
    /// Back-right, the plane `q = 0`.
    South,
    /// Back-left, the plane `p = 0`.
    East,
    /// Front-right, the plane `p = 2B`.
    West,
}

/// Texture plus the shading and vertical offset used to paint a plane.
#[derive(Clone, Copy)]
pub struct Paint<'a> {
    tile: &'a RgbaImage,
    shade: u32,
    lift: i64,
}

impl<'a> Paint<'a> {
    /// Unshaded, unlifted paint.
    pub fn new(tile: &'a RgbaImage) -> Self {
        Self {
            tile,
            shade: TOP_SHADE,
            lift: 0,
        }
    }

    /// Multiplies colors by `shade / 255`.
    pub fn shaded(self, shade: u32) -> Self {
        Self { shade, ..self }
    }

    /// Raises the texture by `lift` texels.
    pub fn lifted(self, lift: i64) -> Self {
        Self { lift, ..self }
    }

    #[inline]
    fn texel(&self, col: i64, row: i64) -> Option<Rgba<u8>> {
        let (w, h) = self.tile.dimensions();
        if col < 0 || row < 0 || col >= w as i64 || row >= h as i64 {
            return None;
        }
        Some(shade(*self.tile.get_pixel(col as u32, row as u32), self.shade))
    }
}

/// Textures for the three visible faces of a box. Missing faces are skipped.
#[derive(Clone, Copy, Default)]
pub struct FacePaints<'a> {
    /// Upward face.
    pub top: Option<&'a RgbaImage>,
    /// North (left) face.
    pub north: Option<&'a RgbaImage>,
    /// West (right) face.
    pub west: Option<&'a RgbaImage>,
}

/// A single `4B × 4B` block image under construction.
pub struct BlockCanvas {
    hex: Hexagon,
    policy: AlphaPolicy,
    image: RgbaImage,
}

impl BlockCanvas {
    /// Creates a fully transparent canvas.
    pub fn new(hex: Hexagon, policy: AlphaPolicy) -> Self {
        let size = hex.rect_size();
        Self {
            hex,
            policy,
            image: RgbaImage::new(size, size),
        }
    }

    /// The silhouette this canvas clips to.
    pub fn hexagon(&self) -> Hexagon {
        self.hex
    }

    /// Current image.
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Finishes drawing.
    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Side of the face tiles and of block space (`2B`).
    #[inline]
    fn span(&self) -> i64 {
        2 * self.hex.half_size() as i64
    }

    /// Blends `src` over the pixel at `(x, y)` if it lies inside the hexagon.
    pub fn put(&mut self, x: i64, y: i64, src: Rgba<u8>) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as u32, y as u32);
        if !self.hex.contains(x, y) {
            return;
        }
        let dst = *self.image.get_pixel(x, y);
        let out = self.policy.clamp_pixel(blend_over(dst, src));
        self.image.put_pixel(x, y, out);
    }

    /// Paints a plane of constant `q` (parallel to the north face).
    ///
    /// Source column `p` lands in image column `p + 2B − q`; texel height `h`
    /// reads source row `2B − 1 − (h − lift)`.
    pub fn north_plane(&mut self, paint: Paint<'_>, q: i64, ps: Range<i64>, hs: Range<i64>) {
        let s = self.span();
        let q = q.clamp(0, s);
        for p in clip(ps, s) {
            let x = p + s - q;
            let base = (p + q + 1).div_euclid(2);
            for h in clip(hs.clone(), s) {
                if let Some(px) = paint.texel(p, s - 1 - (h - paint.lift)) {
                    self.put(x, base + s - 1 - h, px);
                }
            }
        }
    }

    /// Paints a plane of constant `p` (parallel to the west face).
    ///
    /// Texel `q` lands in image column `p − q − 1 + 2B` and reads source column `2B − 1 − q`.
    pub fn west_plane(&mut self, paint: Paint<'_>, p: i64, qs: Range<i64>, hs: Range<i64>) {
        let s = self.span();
        let p = p.clamp(0, s);
        for q in clip(qs, s) {
            let x = p - q - 1 + s;
            let base = (p + q + 1).div_euclid(2);
            for h in clip(hs.clone(), s) {
                if let Some(px) = paint.texel(s - 1 - q, s - 1 - (h - paint.lift)) {
                    self.put(x, base + s - 1 - h, px);
                }
            }
        }
    }

    /// Paints the horizontal plane at height `h` over `ps × qs`.
    ///
    /// Covers, column by column, the rows between the plane's back edges and
    /// the tops of the side faces a box of that height would have. Texel
    /// `(p, q)` reads source column `p`, row `q`.
    pub fn top_plane(&mut self, paint: Paint<'_>, h: i64, ps: Range<i64>, qs: Range<i64>) {
        let s = self.span();
        let h = h.clamp(0, s);
        let ps = clip(ps, s);
        let qs = clip(qs, s);
        if ps.is_empty() || qs.is_empty() {
            return;
        }
        let (p0, p1, q0, q1) = (ps.start, ps.end, qs.start, qs.end);
        let drop = s - h;

        for x in (p0 - q1 + s)..(p1 - q0 + s) {
            let back = if x < p0 - q0 + s {
                let q = p0 + s - 1 - x;
                (p0 + q + 1).div_euclid(2)
            } else {
                let p = x - s + q0;
                (p + q0 + 1).div_euclid(2)
            };
            let front = if x < p1 - q1 + s {
                let p = x - s + q1;
                (p + q1 + 1).div_euclid(2)
            } else {
                let q = p1 + s - 1 - x;
                (p1 + q + 1).div_euclid(2)
            };

            for y in (back + drop)..(front + drop) {
                // Inverse projection of the pixel centre, in quarter texels.
                let diff = 2 * x + 1 - 2 * s;
                let sum = 4 * (y - drop) + 2;
                let p = (diff + sum).div_euclid(4).clamp(p0, p1 - 1);
                let q = (sum - diff).div_euclid(4).clamp(q0, q1 - 1);
                if let Some(px) = paint.texel(p, q) {
                    self.put(x, y, px);
                }
            }
        }
    }

    /// Paints an axis-aligned box: its top, north and west faces.
    pub fn cuboid(&mut self, faces: FacePaints<'_>, ps: Range<i64>, qs: Range<i64>, hs: Range<i64>) {
        let s = self.span();
        let (ps, qs, hs) = (clip(ps, s), clip(qs, s), clip(hs, s));
        if ps.is_empty() || qs.is_empty() || hs.is_empty() {
            return;
        }
        if let Some(top) = faces.top {
            self.top_plane(Paint::new(top), hs.end, ps.clone(), qs.clone());
        }
        if let Some(north) = faces.north {
            self.north_plane(
                Paint::new(north).shaded(NORTH_SHADE),
                qs.end,
                ps.clone(),
                hs.clone(),
            );
        }
        if let Some(west) = faces.west {
            self.west_plane(Paint::new(west).shaded(WEST_SHADE), ps.end, qs, hs);
        }
    }

    /// Paints a full cube from its three visible face tiles.
    pub fn cube(&mut self, top: &RgbaImage, north: &RgbaImage, west: &RgbaImage) {
        let s = self.span();
        let faces = FacePaints {
            top: Some(top),
            north: Some(north),
            west: Some(west),
        };
        self.cuboid(faces, 0..s, 0..s, 0..s);
    }

    /// Paints two vertical planes crossing at `(pc, qc)`, back halves first.
    pub fn cross(&mut self, tile: &RgbaImage, pc: i64, qc: i64, lift: i64) {
        let s = self.span();
        let north = Paint::new(tile).shaded(NORTH_SHADE).lifted(lift);
        let west = Paint::new(tile).shaded(WEST_SHADE).lifted(lift);
        let hs = lift.max(0)..s;

        self.north_plane(north, qc, 0..pc, hs.clone());
        self.west_plane(west, pc, 0..qc, hs.clone());
        self.north_plane(north, qc, pc..s, hs.clone());
        self.west_plane(west, pc, qc..s, hs);
    }

    /// Paints a full-size tile on one side of the block.
    pub fn wall(&mut self, tile: &RgbaImage, side: Side) {
        let s = self.span();
        match side {
            Side::North => self.north_plane(Paint::new(tile).shaded(NORTH_SHADE), s, 0..s, 0..s),
            Side::South => self.north_plane(Paint::new(tile).shaded(NORTH_SHADE), 0, 0..s, 0..s),
            Side::East => self.west_plane(Paint::new(tile).shaded(WEST_SHADE), 0, 0..s, 0..s),
            Side::West => self.west_plane(Paint::new(tile).shaded(WEST_SHADE), s, 0..s, 0..s),
        }
    }

    /// Paints a tile on a 45° ramp rising toward `ascent`.
    ///
    /// The ramp is splatted texel by texel, far texels first; ramps rising toward
    /// the viewer-facing sides are seen edge-on.
    pub fn slope(&mut self, tile: &RgbaImage, ascent: Side) {
        let s = self.span();
        let paint = Paint::new(tile);
        for d in 0..(2 * s - 1) {
            for p in 0.max(d - s + 1)..s.min(d + 1) {
                let q = d - p;
                let h = match ascent {
                    Side::West => p + 1,
                    Side::East => s - p,
                    Side::North => q + 1,
                    Side::South => s - q,
                };
                let Some(px) = paint.texel(p, q) else {
                    continue;
                };
                let x = p - q + s;
                let y = (p + q + 2 + 2 * s - 2 * h).div_euclid(2);
                for (dx, dy) in [(-1, 0), (0, 0), (-1, 1), (0, 1)] {
                    self.put(x + dx, y + dy, px);
                }
            }
        }
    }
}

/// Projects three square face tiles onto a full hexagonal block image.
///
/// All three tiles must be `2B × 2B` with the same even side length.
pub fn project_cube(
    top: &RgbaImage,
    north: &RgbaImage,
    west: &RgbaImage,
    policy: AlphaPolicy,
) -> Result<RgbaImage, AtlasError> {
    let size = top.width();
    for tile in [top, north, west] {
        if tile.width() != size || tile.height() != size {
            return Err(AtlasError::ImageSize {
                width: tile.width(),
                height: tile.height(),
                expected_width: size,
                expected_height: size,
            });
        }
    }
    if size < 2 || !size.is_multiple_of(2) {
        return Err(AtlasError::InvalidConfig(format!(
            "face tiles must have an even side of at least 2, got {size}"
        )));
    }

    let mut canvas = BlockCanvas::new(Hexagon::new(size / 2), policy);
    canvas.cube(top, north, west);
    Ok(canvas.into_image())
}

fn clip(r: Range<i64>, s: i64) -> Range<i64> {
    r.start.max(0)..r.end.min(s)
}

/// Multiplies the color channels by `factor / 255`.
#[inline]
pub fn shade(px: Rgba<u8>, factor: u32) -> Rgba<u8> {
    if factor >= 255 {
        return px;
    }
    let [r, g, b, a] = px.0;
    let mul = |c: u8| ((c as u32 * factor + 127) / 255) as u8;
    Rgba([mul(r), mul(g), mul(b), a])
}

/// Source-over compositing of straight-alpha pixels.
pub fn blend_over(dst: Rgba<u8>, src: Rgba<u8>) -> Rgba<u8> {
    let sa = src[3] as u32;
    let da = dst[3] as u32;
    if sa == 0 {
        return dst;
    }
    if sa == 255 || da == 0 {
        return src;
    }

    let inv = 255 - sa;
    let out_a = sa * 255 + da * inv; // scaled by 255
    let mut out = [0u8; 4];
    for (i, c) in out.iter_mut().take(3).enumerate() {
        let num = src[i] as u32 * sa * 255 + dst[i] as u32 * da * inv;
        *c = ((num + out_a / 2) / out_a).min(255) as u8;
    }
    out[3] = ((out_a + 127) / 255).min(255) as u8;
    Rgba(out)
}
