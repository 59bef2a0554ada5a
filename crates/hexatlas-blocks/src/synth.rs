//! Block image synthesis from terrain tiles.
//!
//! Each slot's recipe is painted on its own canvas; slots are independent, so
//! the whole catalog is fanned out over a small worker pool and the finished
//! images are placed into the atlas as they come back.

use std::ops::Range;
use std::sync::Arc;

use image::RgbaImage;
use tracing::{debug, info};

use crate::alpha::AlphaPolicy;
use crate::atlas::{AtlasBuilder, AtlasError, AtlasLayout};
use crate::catalog::{Step, recipe};
use crate::hexagon::Hexagon;
use crate::offsets::Slot;
use crate::projector::{BlockCanvas, FacePaints, Paint, Side};
use crate::sheet::TileSheet;

/// Converts a position in sixteenths of a block to texels.
#[inline]
fn texels(sixteenths: u8, span: i64) -> i64 {
    (sixteenths as i64 * span + 8) / 16
}

/// Converts an extent in sixteenths to texels, keeping non-empty extents non-empty.
fn extent((lo, hi): (u8, u8), span: i64) -> Range<i64> {
    let start = texels(lo, span);
    let end = texels(hi, span);
    if hi > lo && end <= start {
        start..start + 1
    } else {
        start..end
    }
}

fn paint_step(canvas: &mut BlockCanvas, sheet: &TileSheet, step: Step) {
    let span = sheet.face_size() as i64;
    match step {
        Step::Cuboid { faces, bounds } => {
            let top = faces.top.map(|t| sheet.resolve(t));
            let north = faces.north.map(|t| sheet.resolve(t));
            let west = faces.west.map(|t| sheet.resolve(t));
            let paints = FacePaints {
                top: top.as_deref(),
                north: north.as_deref(),
                west: west.as_deref(),
            };
            canvas.cuboid(
                paints,
                extent(bounds.p, span),
                extent(bounds.q, span),
                extent(bounds.h, span),
            );
        }
        Step::Surface { tile, height } => {
            let tile = sheet.resolve(tile);
            canvas.top_plane(Paint::new(&tile), texels(height, span), 0..span, 0..span);
        }
        Step::Cross { tile, p, q, lift } => {
            let tile = sheet.resolve(tile);
            canvas.cross(
                &tile,
                texels(p, span),
                texels(q, span),
                texels(lift, span),
            );
        }
        Step::Wall { tile, side } => {
            let tile = sheet.resolve(tile);
            canvas.wall(&tile, side);
        }
        Step::Slope { tile, ascent } => {
            let tile = sheet.resolve(tile);
            canvas.slope(&tile, ascent);
        }
        Step::Fire => {
            for side in [Side::South, Side::East, Side::North, Side::West] {
                canvas.wall(sheet.fire(), side);
            }
        }
    }
}

/// Paints the block image for `slot`. Slots without a recipe come out fully transparent.
pub fn render_slot(slot: Slot, sheet: &TileSheet, policy: AlphaPolicy) -> RgbaImage {
    let hex = Hexagon::new(sheet.face_size() / 2);
    let mut canvas = BlockCanvas::new(hex, policy);
    for step in recipe(slot) {
        paint_step(&mut canvas, sheet, step);
    }
    canvas.into_image()
}

/// Renders every catalog slot on `workers` threads (0 = one per CPU) and assembles the atlas.
pub fn synthesize_atlas(
    sheet: Arc<TileSheet>,
    layout: AtlasLayout,
    policy: AlphaPolicy,
    workers: usize,
) -> Result<RgbaImage, AtlasError> {
    if sheet.face_size() != layout.face_size() {
        return Err(AtlasError::InvalidConfig(format!(
            "tile sheet face size {} does not match half-size {}",
            sheet.face_size(),
            layout.half_size
        )));
    }

    let slots: Vec<Slot> = (0..layout.slot_count)
        .map(Slot)
        .filter(|&slot| !recipe(slot).is_empty())
        .collect();
    let worker_count = match workers {
        0 => num_cpus::get(),
        n => n,
    }
    .clamp(1, slots.len().max(1));
    debug!(
        "Rendering {} block images on {} workers",
        slots.len(),
        worker_count
    );

    let (task_tx, task_rx) = crossbeam_channel::unbounded::<Slot>();
    let (result_tx, result_rx) = crossbeam_channel::unbounded::<(Slot, RgbaImage)>();
    for &slot in &slots {
        // Receivers are alive until the handles below are joined.
        let _ = task_tx.send(slot);
    }
    drop(task_tx);

    let mut handles = Vec::with_capacity(worker_count);
    for _ in 0..worker_count {
        let rx = task_rx.clone();
        let tx = result_tx.clone();
        let sheet = Arc::clone(&sheet);
        let handle = std::thread::Builder::new()
            .name("block-image-worker".into())
            .spawn(move || {
                while let Ok(slot) = rx.recv() {
                    let img = render_slot(slot, &sheet, policy);
                    if tx.send((slot, img)).is_err() {
                        break;
                    }
                }
            })
            .map_err(AtlasError::WorkerSpawn)?;
        handles.push(handle);
    }
    drop(result_tx);

    let mut builder = AtlasBuilder::new(layout);
    let mut first_error = None;
    for (slot, img) in result_rx.iter() {
        if let Err(e) = builder.place(slot, &img) {
            first_error.get_or_insert(e);
        }
    }

    let mut panicked = false;
    for handle in handles {
        panicked |= handle.join().is_err();
    }
    if panicked {
        return Err(AtlasError::WorkerPanicked);
    }
    if let Some(e) = first_error {
        return Err(e);
    }

    info!(
        "Synthesized {} block images at half-size {}",
        builder.placed_slots(),
        layout.half_size
    );
    Ok(builder.build())
}
