//! Alpha normalization for block images.
//!
//! Alphas below `low` become 0 and alphas above `high` become 255. The same
//! rule is applied to every pixel as it is drawn and, as the retouch pass, to
//! the finished atlas (which also covers atlases loaded from disk).

use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::atlas::{AtlasError, ImageRect};

/// Default lower bound: alphas below this are treated as fully transparent.
pub const DEFAULT_LOW: u8 = 10;
/// Default upper bound: alphas above this are treated as fully opaque.
pub const DEFAULT_HIGH: u8 = 245;

/// Near-extreme alpha thresholds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlphaPolicy {
    /// Alphas strictly below this are pushed to 0.
    pub low: u8,
    /// Alphas strictly above this are pushed to 255.
    pub high: u8,
}

impl Default for AlphaPolicy {
    fn default() -> Self {
        Self {
            low: DEFAULT_LOW,
            high: DEFAULT_HIGH,
        }
    }
}

impl AlphaPolicy {
    /// Creates a validated policy.
    pub fn new(low: u8, high: u8) -> Result<Self, AtlasError> {
        let policy = Self { low, high };
        policy.validate()?;
        Ok(policy)
    }

    /// `low` must be strictly below `high`, otherwise every alpha would be pushed.
    pub fn validate(&self) -> Result<(), AtlasError> {
        if self.low >= self.high {
            return Err(AtlasError::InvalidConfig(format!(
                "alpha low bound {} must be below high bound {}",
                self.low, self.high
            )));
        }
        Ok(())
    }

    /// Normalizes a single alpha value.
    #[inline]
    pub fn normalize(&self, alpha: u8) -> u8 {
        if alpha < self.low {
            0
        } else if alpha > self.high {
            255
        } else {
            alpha
        }
    }

    /// Returns the pixel with its alpha normalized; color channels are untouched.
    #[inline]
    pub fn clamp_pixel(&self, px: Rgba<u8>) -> Rgba<u8> {
        let [r, g, b, a] = px.0;
        Rgba([r, g, b, self.normalize(a)])
    }

    /// Retouch pass over a whole image. Returns the number of pixels changed.
    pub fn retouch(&self, img: &mut RgbaImage) -> usize {
        let (w, h) = img.dimensions();
        self.retouch_rect(img, ImageRect::new(0, 0, w, h))
    }

    /// Retouch pass limited to one rectangle.
    pub fn retouch_rect(&self, img: &mut RgbaImage, rect: ImageRect) -> usize {
        let mut changed = 0;
        let x_end = (rect.x + rect.w).min(img.width());
        let y_end = (rect.y + rect.h).min(img.height());
        for y in rect.y..y_end {
            for x in rect.x..x_end {
                let px = img.get_pixel_mut(x, y);
                let a = self.normalize(px[3]);
                if a != px[3] {
                    px[3] = a;
                    changed += 1;
                }
            }
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_bounds() {
        let policy = AlphaPolicy::default();
        assert_eq!(policy.normalize(0), 0);
        assert_eq!(policy.normalize(9), 0);
        assert_eq!(policy.normalize(10), 10);
        assert_eq!(policy.normalize(128), 128);
        assert_eq!(policy.normalize(245), 245);
        assert_eq!(policy.normalize(246), 255);
        assert_eq!(policy.normalize(255), 255);
    }

    #[test]
    fn test_no_alpha_survives_in_forbidden_bands() {
        let policy = AlphaPolicy::default();
        for a in 0..=255u8 {
            let n = policy.normalize(a);
            assert!(!(1..10).contains(&n), "alpha {a} -> {n}");
            assert!(!(246..255).contains(&n), "alpha {a} -> {n}");
        }
    }

    #[test]
    fn test_retouch_is_idempotent() {
        let policy = AlphaPolicy::default();
        let mut img = RgbaImage::from_fn(16, 16, |x, y| Rgba([1, 2, 3, (x * 16 + y) as u8]));
        let first = policy.retouch(&mut img);
        assert!(first > 0);
        let once = img.clone();
        assert_eq!(policy.retouch(&mut img), 0);
        assert_eq!(img, once);
    }

    #[test]
    fn test_retouch_keeps_colors_and_translucency() {
        let policy = AlphaPolicy::default();
        let mut img = RgbaImage::from_pixel(2, 1, Rgba([10, 20, 30, 128]));
        img.put_pixel(1, 0, Rgba([10, 20, 30, 250]));
        policy.retouch(&mut img);
        assert_eq!(img.get_pixel(0, 0), &Rgba([10, 20, 30, 128]));
        assert_eq!(img.get_pixel(1, 0), &Rgba([10, 20, 30, 255]));
    }

    #[test]
    fn test_retouch_rect_stays_inside() {
        let policy = AlphaPolicy::default();
        let mut img = RgbaImage::from_pixel(8, 8, Rgba([0, 0, 0, 5]));
        let changed = policy.retouch_rect(&mut img, ImageRect::new(4, 4, 4, 4));
        assert_eq!(changed, 16);
        assert_eq!(img.get_pixel(0, 0)[3], 5);
        assert_eq!(img.get_pixel(7, 7)[3], 0);
    }

    #[test]
    fn test_policy_validation() {
        assert!(AlphaPolicy::new(10, 245).is_ok());
        assert!(AlphaPolicy::new(200, 200).is_err());
        assert!(AlphaPolicy::new(250, 5).is_err());
    }

    #[test]
    fn test_policy_ron_roundtrip() {
        let policy = AlphaPolicy::new(4, 250).unwrap();
        let text = ron::to_string(&policy).unwrap();
        let back: AlphaPolicy = ron::from_str(&text).unwrap();
        assert_eq!(policy, back);
    }
}
