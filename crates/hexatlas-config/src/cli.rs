//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Builds (or loads) the isometric block image atlas.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "hexatlas", about = "Isometric block image atlas builder")]
pub struct CliArgs {
    /// Half-size B; block images are 4B x 4B pixels.
    #[arg(long)]
    pub half_size: Option<u32>,

    /// Directory with blocks-<B>.png and/or terrain.png.
    #[arg(long)]
    pub image_dir: Option<PathBuf>,

    /// Synthesis threads (0 = one per CPU).
    #[arg(long)]
    pub workers: Option<usize>,

    /// Don't write a constructed atlas back to the image directory.
    #[arg(long)]
    pub no_save: bool,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write the finished atlas image here.
    #[arg(long)]
    pub output: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(b) = args.half_size {
            self.atlas.half_size = b;
        }
        if let Some(ref dir) = args.image_dir {
            self.atlas.image_dir = dir.clone();
        }
        if let Some(workers) = args.workers {
            self.atlas.workers = workers;
        }
        if args.no_save {
            self.atlas.save_generated = false;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
