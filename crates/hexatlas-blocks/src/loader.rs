//! Atlas loading: prebuilt image first, construction from terrain tiles second.
//!
//! [`AtlasLoader`] walks `TryPrebuilt → TryConstruct → Ready | Failed`, trying
//! each transition once. Whatever the source, the ready atlas is retouched and
//! classified by [`BlockAtlas`] before anything is exposed.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::RgbaImage;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::alpha::AlphaPolicy;
use crate::atlas::{AtlasError, AtlasLayout, ImageRect};
use crate::classify::{SlotClass, classify_slots, silhouette_opaque, summarize};
use crate::offsets::{OffsetTable, Slot, VariantKey};
use crate::sheet::TileSheet;
use crate::synth::synthesize_atlas;

/// Raw terrain sheet file name.
pub const TERRAIN_FILE: &str = "terrain.png";
/// Optional fire sheet file name.
pub const FIRE_FILE: &str = "fire.png";

/// File name of the prebuilt atlas for half-size `half_size`.
pub fn prebuilt_file_name(half_size: u32) -> String {
    format!("blocks-{half_size}.png")
}

// ----- Errors -----

/// Errors returned while creating a [`BlockAtlas`].
#[derive(Debug, Error)]
pub enum AtlasLoadError {
    /// A required source image does not exist.
    #[error("source image {name} not found")]
    MissingSource {
        /// File (or source) name.
        name: String,
    },

    /// A source image exists but can't be used.
    #[error("source image {name} is malformed: {reason}")]
    MalformedSource {
        /// File (or source) name.
        name: String,
        /// What is wrong with it.
        reason: String,
    },

    /// Atlas geometry or synthesis error.
    #[error(transparent)]
    Atlas(#[from] AtlasError),

    /// Writing an image failed.
    #[error("failed to write {name}: {source}")]
    Write {
        /// Destination file name.
        name: String,
        /// Underlying encoder error.
        #[source]
        source: image::ImageError,
    },

    /// Filesystem error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// ----- Source art -----

/// Where source images come from.
pub trait SourceArt {
    /// The prebuilt atlas for `half_size`.
    fn prebuilt(&self, half_size: u32) -> Result<RgbaImage, AtlasLoadError>;

    /// The terrain sheet. Required for construction.
    fn terrain(&self) -> Result<RgbaImage, AtlasLoadError>;

    /// The fire sheet, or `None` if there isn't one.
    fn fire(&self) -> Result<Option<RgbaImage>, AtlasLoadError>;

    /// Stores a freshly constructed atlas so later runs can load it directly.
    fn store_prebuilt(&self, half_size: u32, image: &RgbaImage) -> Result<(), AtlasLoadError>;
}

/// Source images in a directory on disk.
#[derive(Clone, Debug)]
pub struct ImageDir {
    root: PathBuf,
}

impl ImageDir {
    /// Uses `root` as the image directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The image directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn read(&self, name: &str) -> Result<RgbaImage, AtlasLoadError> {
        let path = self.root.join(name);
        if !path.is_file() {
            return Err(AtlasLoadError::MissingSource {
                name: path.display().to_string(),
            });
        }
        debug!("Reading {}", path.display());
        let img = image::open(&path).map_err(|e| AtlasLoadError::MalformedSource {
            name: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(img.to_rgba8())
    }
}

impl SourceArt for ImageDir {
    fn prebuilt(&self, half_size: u32) -> Result<RgbaImage, AtlasLoadError> {
        self.read(&prebuilt_file_name(half_size))
    }

    fn terrain(&self) -> Result<RgbaImage, AtlasLoadError> {
        self.read(TERRAIN_FILE)
    }

    fn fire(&self) -> Result<Option<RgbaImage>, AtlasLoadError> {
        match self.read(FIRE_FILE) {
            Ok(img) => Ok(Some(img)),
            Err(AtlasLoadError::MissingSource { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn store_prebuilt(&self, half_size: u32, image: &RgbaImage) -> Result<(), AtlasLoadError> {
        std::fs::create_dir_all(&self.root)?;
        let path = self.root.join(prebuilt_file_name(half_size));
        image
            .save_with_format(&path, image::ImageFormat::Png)
            .map_err(|source| AtlasLoadError::Write {
                name: path.display().to_string(),
                source,
            })?;
        info!("Saved generated atlas to {}", path.display());
        Ok(())
    }
}

// ----- Options -----

/// Settings for [`BlockAtlas::create_with`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AtlasOptions {
    /// Half-size B.
    pub half_size: u32,
    /// Alpha thresholds for drawing and retouch.
    pub alpha: AlphaPolicy,
    /// Synthesis threads; 0 means one per CPU.
    pub workers: usize,
    /// Write a constructed atlas back to the source.
    pub save_generated: bool,
}

impl AtlasOptions {
    /// Default options for half-size `half_size`.
    pub fn new(half_size: u32) -> Self {
        Self {
            half_size,
            alpha: AlphaPolicy::default(),
            workers: 0,
            save_generated: true,
        }
    }
}

// ----- State machine -----

/// Where the ready atlas came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AtlasOrigin {
    /// Loaded as a prebuilt atlas.
    Prebuilt,
    /// Drawn from the terrain sheet.
    Constructed,
    /// Handed in by the caller.
    Supplied,
}

impl fmt::Display for AtlasOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AtlasOrigin::Prebuilt => "prebuilt",
            AtlasOrigin::Constructed => "constructed",
            AtlasOrigin::Supplied => "supplied",
        })
    }
}

/// Loader state.
#[derive(Debug)]
pub enum LoadState {
    /// Looking for a prebuilt atlas.
    TryPrebuilt,
    /// Building from the terrain sheet after the prebuilt atlas was unusable.
    TryConstruct {
        /// Why the prebuilt atlas couldn't be used.
        prebuilt_error: AtlasLoadError,
    },
    /// An atlas image of the right size is available.
    Ready {
        /// Atlas pixels, not yet retouched.
        image: RgbaImage,
        /// Where they came from.
        origin: AtlasOrigin,
    },
    /// No atlas could be produced.
    Failed(AtlasLoadError),
}

impl LoadState {
    /// Returns `true` for `Ready` and `Failed`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, LoadState::Ready { .. } | LoadState::Failed(_))
    }
}

/// Drives [`LoadState`] against a [`SourceArt`].
pub struct AtlasLoader<'a, S: SourceArt + ?Sized> {
    source: &'a S,
    options: AtlasOptions,
    layout: AtlasLayout,
    state: LoadState,
}

impl<'a, S: SourceArt + ?Sized> AtlasLoader<'a, S> {
    /// Starts in [`LoadState::TryPrebuilt`].
    pub fn new(source: &'a S, options: AtlasOptions) -> Result<Self, AtlasLoadError> {
        options.alpha.validate()?;
        let layout = AtlasLayout::new(options.half_size)?;
        Ok(Self {
            source,
            options,
            layout,
            state: LoadState::TryPrebuilt,
        })
    }

    /// Current state.
    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// Atlas geometry being loaded.
    pub fn layout(&self) -> &AtlasLayout {
        &self.layout
    }

    /// Performs one transition. Terminal states are left as they are.
    pub fn step(&mut self) {
        let state = std::mem::replace(&mut self.state, LoadState::TryPrebuilt);
        self.state = match state {
            LoadState::TryPrebuilt => self.try_prebuilt(),
            LoadState::TryConstruct { prebuilt_error } => self.try_construct(prebuilt_error),
            terminal => terminal,
        };
    }

    /// Steps until a terminal state is reached.
    pub fn run(mut self) -> Result<(RgbaImage, AtlasOrigin), AtlasLoadError> {
        loop {
            match self.state {
                LoadState::Ready { image, origin } => return Ok((image, origin)),
                LoadState::Failed(e) => return Err(e),
                _ => self.step(),
            }
        }
    }

    fn try_prebuilt(&self) -> LoadState {
        let b = self.layout.half_size;
        match self.source.prebuilt(b) {
            Ok(image) => match self.layout.check_atlas_image(&image) {
                Ok(()) => {
                    info!("Using prebuilt atlas {}", prebuilt_file_name(b));
                    LoadState::Ready {
                        image,
                        origin: AtlasOrigin::Prebuilt,
                    }
                }
                Err(e) => {
                    warn!("Ignoring {}: {e}", prebuilt_file_name(b));
                    LoadState::TryConstruct {
                        prebuilt_error: AtlasLoadError::MalformedSource {
                            name: prebuilt_file_name(b),
                            reason: e.to_string(),
                        },
                    }
                }
            },
            Err(e) => {
                debug!("No usable prebuilt atlas: {e}");
                LoadState::TryConstruct { prebuilt_error: e }
            }
        }
    }

    fn try_construct(&self, prebuilt_error: AtlasLoadError) -> LoadState {
        let terrain = match self.source.terrain() {
            Ok(img) => img,
            // A broken prebuilt atlas is the more useful thing to report.
            Err(AtlasLoadError::MissingSource { .. })
                if matches!(prebuilt_error, AtlasLoadError::MalformedSource { .. }) =>
            {
                return LoadState::Failed(prebuilt_error);
            }
            Err(e) => return LoadState::Failed(e),
        };
        let fire = match self.source.fire() {
            Ok(fire) => fire,
            Err(e) => return LoadState::Failed(e),
        };

        let sheet = match TileSheet::from_images(&terrain, fire.as_ref(), self.layout.face_size())
        {
            Ok(sheet) => sheet,
            Err(AtlasError::MalformedSheet(reason)) => {
                return LoadState::Failed(AtlasLoadError::MalformedSource {
                    name: TERRAIN_FILE.to_string(),
                    reason,
                });
            }
            Err(e) => return LoadState::Failed(e.into()),
        };

        info!(
            "Constructing block images from {} at half-size {}",
            TERRAIN_FILE, self.layout.half_size
        );
        let image = match synthesize_atlas(
            Arc::new(sheet),
            self.layout,
            self.options.alpha,
            self.options.workers,
        ) {
            Ok(image) => image,
            Err(e) => return LoadState::Failed(e.into()),
        };

        if self.options.save_generated {
            if let Err(e) = self.source.store_prebuilt(self.layout.half_size, &image) {
                warn!("Could not save generated atlas: {e}");
            }
        }
        LoadState::Ready {
            image,
            origin: AtlasOrigin::Constructed,
        }
    }
}

// ----- BlockAtlas -----

/// The finished atlas with its offset table and per-slot classification.
///
/// Immutable once created.
#[derive(Clone, Debug)]
pub struct BlockAtlas {
    image: RgbaImage,
    layout: AtlasLayout,
    offsets: OffsetTable,
    classes: Vec<SlotClass>,
    origin: AtlasOrigin,
}

static_assertions::assert_impl_all!(BlockAtlas: Send, Sync);

impl BlockAtlas {
    /// Loads `blocks-<B>.png` from `image_dir`, or constructs it from `terrain.png`.
    pub fn create(half_size: u32, image_dir: impl AsRef<Path>) -> Result<Self, AtlasLoadError> {
        let source = ImageDir::new(image_dir.as_ref());
        Self::create_with(&source, AtlasOptions::new(half_size))
    }

    /// Like [`BlockAtlas::create`] with explicit options and source.
    pub fn create_with<S: SourceArt + ?Sized>(
        source: &S,
        options: AtlasOptions,
    ) -> Result<Self, AtlasLoadError> {
        let loader = AtlasLoader::new(source, options)?;
        let layout = *loader.layout();
        let (image, origin) = loader.run()?;
        Ok(Self::finish(image, layout, options.alpha, origin))
    }

    /// Wraps an atlas image the caller already has.
    pub fn from_image(
        half_size: u32,
        image: RgbaImage,
        alpha: AlphaPolicy,
    ) -> Result<Self, AtlasLoadError> {
        alpha.validate()?;
        let layout = AtlasLayout::new(half_size)?;
        layout.check_atlas_image(&image)?;
        Ok(Self::finish(image, layout, alpha, AtlasOrigin::Supplied))
    }

    fn finish(
        mut image: RgbaImage,
        layout: AtlasLayout,
        alpha: AlphaPolicy,
        origin: AtlasOrigin,
    ) -> Self {
        // Prebuilt and supplied atlases may carry pixels in the dummy slot.
        layout.clear_dummy(&mut image);
        let touched = alpha.retouch(&mut image);
        let classes = classify_slots(&image, &layout);
        let (opaque, transparent, translucent) = summarize(&classes);
        info!(
            "Block atlas ready ({origin}): {}x{}, {} slots, {opaque} opaque, {transparent} transparent, {translucent} translucent",
            image.width(),
            image.height(),
            layout.slot_count
        );
        debug!("Retouch adjusted {touched} pixels");
        Self {
            image,
            layout,
            offsets: OffsetTable::catalog(),
            classes,
            origin,
        }
    }

    // ----- Lookups -----

    /// Slot for a block type and sub-state. Sub-states above 15 get the dummy.
    pub fn get_offset(&self, block_type: u8, sub_state: u8) -> Slot {
        VariantKey::new(block_type, sub_state).map_or(Slot::DUMMY, |key| self.offset(key))
    }

    /// Slot for a variant key.
    pub fn offset(&self, key: VariantKey) -> Slot {
        self.offsets.get(key)
    }

    /// Class of `slot`, or `None` past the end of the atlas.
    pub fn class(&self, slot: Slot) -> Option<SlotClass> {
        self.classes.get(slot.index()).copied()
    }

    /// Every pixel of the slot rectangle has alpha 255.
    pub fn is_opaque(&self, slot: Slot) -> bool {
        self.class(slot).is_some_and(SlotClass::is_opaque)
    }

    /// Every pixel of the slot rectangle has alpha 0.
    pub fn is_transparent(&self, slot: Slot) -> bool {
        self.class(slot).is_some_and(SlotClass::is_transparent)
    }

    /// [`BlockAtlas::is_opaque`] for a block type and sub-state.
    pub fn is_variant_opaque(&self, block_type: u8, sub_state: u8) -> bool {
        self.is_opaque(self.get_offset(block_type, sub_state))
    }

    /// [`BlockAtlas::is_transparent`] for a block type and sub-state.
    pub fn is_variant_transparent(&self, block_type: u8, sub_state: u8) -> bool {
        self.is_transparent(self.get_offset(block_type, sub_state))
    }

    /// Every pixel inside the slot's hexagon has alpha 255.
    pub fn is_silhouette_opaque(&self, slot: Slot) -> bool {
        self.layout.contains(slot) && silhouette_opaque(&self.image, &self.layout, slot)
    }

    /// Rectangle of `slot` in the atlas image.
    pub fn get_rect(&self, slot: Slot) -> ImageRect {
        self.layout.rect(slot)
    }

    /// Rectangle of the image for a block type and sub-state.
    pub fn block_rect(&self, block_type: u8, sub_state: u8) -> ImageRect {
        self.get_rect(self.get_offset(block_type, sub_state))
    }

    // ----- Accessors -----

    /// Atlas pixels.
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Takes the atlas pixels.
    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Atlas geometry.
    pub fn layout(&self) -> &AtlasLayout {
        &self.layout
    }

    /// The key-to-slot table.
    pub fn offsets(&self) -> &OffsetTable {
        &self.offsets
    }

    /// Per-slot classes, indexed by slot.
    pub fn classes(&self) -> &[SlotClass] {
        &self.classes
    }

    /// Side of one block image (`4B`).
    pub fn rect_size(&self) -> u32 {
        self.layout.rect_size()
    }

    /// Half-size B.
    pub fn half_size(&self) -> u32 {
        self.layout.half_size
    }

    /// Number of slots.
    pub fn slot_count(&self) -> u16 {
        self.layout.slot_count
    }

    /// Where the atlas came from.
    pub fn origin(&self) -> AtlasOrigin {
        self.origin
    }
}
