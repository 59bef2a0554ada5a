//! End-to-end atlas creation against image directories on disk.

use hexatlas_blocks::{
    AlphaPolicy, AtlasLoadError, AtlasOptions, AtlasOrigin, BlockAtlas, Hexagon, ImageDir,
    SLOT_COUNT, Slot, TERRAIN_FILE, VariantKey, prebuilt_file_name,
};
use image::{Rgba, RgbaImage};
use tempfile::TempDir;

/// Terrain sheet with every 16×16 tile a distinct color at the given alpha.
fn terrain(alpha: u8) -> RgbaImage {
    RgbaImage::from_fn(256, 256, |x, y| {
        let i = (y / 16) * 16 + x / 16;
        Rgba([i as u8, 80, 255 - i as u8, alpha])
    })
}

fn dir_with_terrain(alpha: u8) -> TempDir {
    let dir = TempDir::new().unwrap();
    terrain(alpha).save(dir.path().join(TERRAIN_FILE)).unwrap();
    dir
}

fn options(b: u32) -> AtlasOptions {
    AtlasOptions {
        workers: 4,
        ..AtlasOptions::new(b)
    }
}

#[test]
fn test_construct_from_terrain_sheet() {
    let dir = dir_with_terrain(255);
    let atlas = BlockAtlas::create(8, dir.path()).unwrap();

    assert_eq!(atlas.origin(), AtlasOrigin::Constructed);
    assert_eq!(atlas.rect_size(), 32);
    assert_eq!(atlas.image().dimensions(), (16 * 32, 15 * 32));
    assert_eq!(atlas.slot_count(), SLOT_COUNT);

    let stone = atlas.get_offset(1, 0);
    assert_eq!(stone, Slot(1));
    assert!(atlas.is_silhouette_opaque(stone));
    // The corners around the hexagon are clear, so the full rectangle is not opaque.
    assert!(!atlas.is_opaque(stone));
    assert!(!atlas.is_transparent(stone));

    // The generated atlas was written back.
    assert!(dir.path().join(prebuilt_file_name(8)).is_file());
}

#[test]
fn test_prebuilt_used_without_terrain() {
    let dir = dir_with_terrain(255);
    let built = BlockAtlas::create(2, dir.path()).unwrap();
    std::fs::remove_file(dir.path().join(TERRAIN_FILE)).unwrap();

    let loaded = BlockAtlas::create(2, dir.path()).unwrap();
    assert_eq!(loaded.origin(), AtlasOrigin::Prebuilt);
    assert_eq!(loaded.image(), built.image());
    assert_eq!(loaded.classes(), built.classes());
}

#[test]
fn test_prebuilt_for_other_half_size_ignored() {
    let dir = dir_with_terrain(255);
    BlockAtlas::create(2, dir.path()).unwrap();
    let atlas = BlockAtlas::create(3, dir.path()).unwrap();
    assert_eq!(atlas.origin(), AtlasOrigin::Constructed);
    assert_eq!(atlas.rect_size(), 12);
}

#[test]
fn test_opaque_prebuilt_dummy_reads_back_transparent() {
    let dir = TempDir::new().unwrap();
    RgbaImage::from_pixel(128, 120, Rgba([200, 10, 10, 255]))
        .save(dir.path().join(prebuilt_file_name(2)))
        .unwrap();

    let atlas = BlockAtlas::create(2, dir.path()).unwrap();
    assert_eq!(atlas.origin(), AtlasOrigin::Prebuilt);
    assert!(atlas.is_transparent(Slot::DUMMY));
    assert_eq!(atlas.image().get_pixel(0, 0)[3], 0);
    assert_eq!(atlas.image().get_pixel(7, 7)[3], 0);

    let supplied = RgbaImage::from_pixel(128, 120, Rgba([200, 10, 10, 255]));
    let atlas = BlockAtlas::from_image(2, supplied, AlphaPolicy::default()).unwrap();
    assert!(atlas.is_transparent(Slot::DUMMY));
    assert_eq!(atlas.image().get_pixel(3, 5)[3], 0);
}

#[test]
fn test_no_sources_fails() {
    let dir = TempDir::new().unwrap();
    let err = BlockAtlas::create(4, dir.path()).unwrap_err();
    assert!(matches!(err, AtlasLoadError::MissingSource { .. }), "{err}");
    // Nothing was written either.
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_garbage_prebuilt_falls_back_to_construction() {
    let dir = dir_with_terrain(255);
    std::fs::write(dir.path().join(prebuilt_file_name(2)), b"not a png").unwrap();
    let atlas = BlockAtlas::create(2, dir.path()).unwrap();
    assert_eq!(atlas.origin(), AtlasOrigin::Constructed);
}

#[test]
fn test_garbage_prebuilt_without_terrain_reports_prebuilt() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(prebuilt_file_name(2)), b"not a png").unwrap();
    let err = BlockAtlas::create(2, dir.path()).unwrap_err();
    assert!(matches!(err, AtlasLoadError::MalformedSource { .. }), "{err}");
}

#[test]
fn test_malformed_terrain_fails() {
    let dir = TempDir::new().unwrap();
    RgbaImage::new(100, 60)
        .save(dir.path().join(TERRAIN_FILE))
        .unwrap();
    let err = BlockAtlas::create(2, dir.path()).unwrap_err();
    assert!(matches!(err, AtlasLoadError::MalformedSource { .. }), "{err}");
}

#[test]
fn test_half_translucent_terrain() {
    let dir = dir_with_terrain(128);
    let atlas = BlockAtlas::create_with(&ImageDir::new(dir.path()), options(2)).unwrap();
    for block_type in [1u8, 3, 20, 45] {
        assert!(!atlas.is_variant_opaque(block_type, 0));
        assert!(!atlas.is_variant_transparent(block_type, 0));
    }
}

#[test]
fn test_atlas_invariants() {
    let dir = dir_with_terrain(255);
    let opts = AtlasOptions {
        save_generated: false,
        ..options(3)
    };
    let atlas = BlockAtlas::create_with(&ImageDir::new(dir.path()), opts).unwrap();
    assert!(!dir.path().join(prebuilt_file_name(3)).exists());

    // Offsets are total and in range; unknown keys hit the dummy.
    for key in VariantKey::all() {
        let slot = atlas.offset(key);
        assert!(slot.0 < atlas.slot_count());
        assert_eq!(slot, atlas.get_offset(key.block_type(), key.sub_state()));
    }
    assert_eq!(atlas.get_offset(255, 0), Slot::DUMMY);

    assert!(atlas.is_transparent(Slot::DUMMY));
    assert!(!atlas.is_opaque(Slot::DUMMY));

    let hex = Hexagon::new(3);
    for s in 0..atlas.slot_count() {
        let slot = Slot(s);
        assert!(!(atlas.is_opaque(slot) && atlas.is_transparent(slot)));
        let rect = atlas.get_rect(slot);
        for y in 0..rect.h {
            for x in 0..rect.w {
                let a = atlas.image().get_pixel(rect.x + x, rect.y + y)[3];
                assert!(!(1..10).contains(&a) && !(246..255).contains(&a));
                if !hex.contains(x, y) {
                    assert_eq!(a, 0, "slot {s} leaks at ({x},{y})");
                }
            }
        }
    }
}

#[test]
fn test_retouch_is_stable_across_reload() {
    let dir = dir_with_terrain(255);
    let first = BlockAtlas::create(2, dir.path()).unwrap();
    let again = BlockAtlas::from_image(2, first.image().clone(), AlphaPolicy::default()).unwrap();
    assert_eq!(again.image(), first.image());
}
