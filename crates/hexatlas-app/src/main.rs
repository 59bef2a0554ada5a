//! `hexatlas`: builds the isometric block image atlas from the command line.
//!
//! Loads `blocks-<B>.png` from the image directory, or constructs it from
//! `terrain.png`, then logs a classification summary and optionally writes
//! the finished atlas.
//!
//! Run with: `cargo run -p hexatlas-app -- --half-size 6 --image-dir images`

mod platform;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use hexatlas_blocks::{AtlasLoadError, BlockAtlas, ImageDir, Slot};
use hexatlas_config::{CliArgs, Config, ConfigError};
use tracing::{error, info};

use crate::platform::PlatformDirs;

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("could not create block atlas: {0}")]
    Atlas(#[from] AtlasLoadError),

    #[error("failed to write {}: {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let dirs = match args.config {
        Some(ref dir) => PlatformDirs::resolve_with_root(dir),
        None => PlatformDirs::resolve(),
    };

    let config = Config::load_or_create(&dirs.config_dir).map(|mut config| {
        config.apply_cli_overrides(&args);
        config
    });

    let log_dir = dirs.create_dirs().is_ok().then_some(dirs.log_dir.as_path());
    hexatlas_log::init_logging(log_dir, cfg!(debug_assertions), config.as_ref().ok());

    let result = config
        .map_err(AppError::from)
        .and_then(|config| run(&config, args.output.as_deref()));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config, output: Option<&Path>) -> Result<(), AppError> {
    config.validate()?;
    info!(
        "Building atlas: half-size {} from {}",
        config.atlas.half_size,
        config.atlas.image_dir.display()
    );

    let source = ImageDir::new(&config.atlas.image_dir);
    let atlas = BlockAtlas::create_with(&source, config.atlas_options())?;
    log_summary(&atlas);

    if let Some(path) = output {
        atlas.image().save(path).map_err(|source| AppError::Output {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Wrote atlas to {}", path.display());
    }
    Ok(())
}

fn log_summary(atlas: &BlockAtlas) {
    let (width, height) = atlas.image().dimensions();
    info!(
        "Atlas {}x{} ({} slots of {}px, {})",
        width,
        height,
        atlas.slot_count(),
        atlas.rect_size(),
        atlas.origin()
    );

    let solid = (1..atlas.slot_count())
        .map(Slot)
        .filter(|&slot| atlas.is_silhouette_opaque(slot))
        .count();
    let clear = atlas
        .classes()
        .iter()
        .filter(|class| class.is_transparent())
        .count();
    info!("{solid} slots have a solid silhouette, {clear} are fully transparent");
}

#[cfg(test)]
mod tests {
    use hexatlas_blocks::TERRAIN_FILE;
    use image::{Rgba, RgbaImage};

    use super::*;

    fn config_for(dir: &Path, half_size: u32) -> Config {
        let mut config = Config::default();
        config.atlas.half_size = half_size;
        config.atlas.image_dir = dir.to_path_buf();
        config.atlas.save_generated = false;
        config
    }

    #[test]
    fn test_run_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        RgbaImage::from_pixel(256, 256, Rgba([90, 90, 90, 255]))
            .save(dir.path().join(TERRAIN_FILE))
            .unwrap();
        let out = dir.path().join("atlas.png");

        run(&config_for(dir.path(), 2), Some(&out)).unwrap();
        let written = image::open(&out).unwrap();
        assert_eq!((written.width(), written.height()), (128, 15 * 8));
    }

    #[test]
    fn test_run_fails_without_sources() {
        let dir = tempfile::tempdir().unwrap();
        let err = run(&config_for(dir.path(), 2), None).unwrap_err();
        assert!(matches!(err, AppError::Atlas(_)));
    }

    #[test]
    fn test_run_rejects_invalid_config() {
        let dir = tempfile::tempdir().unwrap();
        let err = run(&config_for(dir.path(), 0), None).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}
