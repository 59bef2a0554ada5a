//! Hexagon silhouette of a block image.
//!
//! A block image is a `4B × 4B` square containing a hexagon made of three
//! faces. Example for B = 3 (U = top, N = left, W = right):
//!
//! ```text
//!      UU
//!    UUUUUU
//!  UUUUUUUUUU
//! NUUUUUUUUUUW
//! NNNUUUUUUWWW
//! NNNNNUUWWWWW
//! NNNNNNWWWWWW
//! NNNNNNWWWWWW
//! NNNNNNWWWWWW
//!  NNNNNWWWWW
//!    NNNWWW
//!      NW
//! ```
//!
//! Every pixel outside the hexagon is fully transparent.

/// One of the three visible faces of a block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Face {
    /// Upward-facing top, the diamond in the upper half.
    Up,
    /// North-facing side, lower-left band.
    North,
    /// West-facing side, lower-right band.
    West,
}

/// Silhouette geometry for half-size B.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Hexagon {
    half_size: u32,
}

impl Hexagon {
    /// Creates the silhouette for half-size `half_size` (must be at least 1).
    pub fn new(half_size: u32) -> Self {
        debug_assert!(half_size >= 1);
        Self { half_size }
    }

    /// Half-size B.
    pub fn half_size(&self) -> u32 {
        self.half_size
    }

    /// Side of the bounding square (`4B`).
    pub fn rect_size(&self) -> u32 {
        self.half_size * 4
    }

    /// Column index folded onto the left half.
    #[inline]
    fn fold(&self, x: u32) -> u32 {
        x.min(self.rect_size() - 1 - x)
    }

    /// First hexagon row in column `x`.
    #[inline]
    pub fn column_top(&self, x: u32) -> u32 {
        (2 * self.half_size - self.fold(x)) / 2
    }

    /// First side-face row in column `x`; rows above it (inside the hexagon) are top face.
    #[inline]
    pub fn side_top(&self, x: u32) -> u32 {
        self.half_size + (self.fold(x) + 1) / 2
    }

    /// One past the last hexagon row in column `x`.
    #[inline]
    pub fn column_bottom(&self, x: u32) -> u32 {
        3 * self.half_size + (self.fold(x) + 1) / 2
    }

    /// Inclusive horizontal span of row `y`, or `None` below the square.
    pub fn row_span(&self, y: u32) -> Option<(u32, u32)> {
        let b = self.half_size;
        let size = self.rect_size();
        if y >= size {
            return None;
        }
        let m = if y < b {
            y
        } else if y < 3 * b {
            return Some((0, size - 1));
        } else {
            size - 1 - y
        };
        Some((2 * b - 1 - 2 * m, 2 * b + 2 * m))
    }

    /// Returns `true` if pixel `(x, y)` lies inside the hexagon.
    #[inline]
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x < self.rect_size() && y >= self.column_top(x) && y < self.column_bottom(x)
    }

    /// The face pixel `(x, y)` belongs to, or `None` outside the hexagon.
    pub fn face_at(&self, x: u32, y: u32) -> Option<Face> {
        if !self.contains(x, y) {
            None
        } else if y < self.side_top(x) {
            Some(Face::Up)
        } else if x < 2 * self.half_size {
            Some(Face::North)
        } else {
            Some(Face::West)
        }
    }

    /// Number of pixels inside the hexagon.
    pub fn area(&self) -> u32 {
        (0..self.rect_size())
            .map(|x| self.column_bottom(x) - self.column_top(x))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(hex: &Hexagon) -> Vec<String> {
        (0..hex.rect_size())
            .map(|y| {
                (0..hex.rect_size())
                    .map(|x| match hex.face_at(x, y) {
                        None => ' ',
                        Some(Face::Up) => 'U',
                        Some(Face::North) => 'N',
                        Some(Face::West) => 'W',
                    })
                    .collect::<String>()
                    .trim_end()
                    .to_string()
            })
            .collect()
    }

    #[test]
    fn test_b3_matches_reference_drawing() {
        let expected = [
            "     UU",
            "   UUUUUU",
            " UUUUUUUUUU",
            "NUUUUUUUUUUW",
            "NNNUUUUUUWWW",
            "NNNNNUUWWWWW",
            "NNNNNNWWWWWW",
            "NNNNNNWWWWWW",
            "NNNNNNWWWWWW",
            " NNNNNWWWWW",
            "   NNNWWW",
            "     NW",
        ];
        assert_eq!(render(&Hexagon::new(3)), expected);
    }

    #[test]
    fn test_row_span_matches_columns() {
        for b in 1..=9 {
            let hex = Hexagon::new(b);
            for y in 0..hex.rect_size() {
                let (x0, x1) = hex.row_span(y).unwrap();
                for x in 0..hex.rect_size() {
                    assert_eq!(
                        hex.contains(x, y),
                        x >= x0 && x <= x1,
                        "B={b} pixel ({x},{y})"
                    );
                }
            }
            assert!(hex.row_span(hex.rect_size()).is_none());
        }
    }

    #[test]
    fn test_silhouette_is_symmetric() {
        for b in 1..=8 {
            let hex = Hexagon::new(b);
            let n = hex.rect_size();
            for y in 0..n {
                for x in 0..n {
                    assert_eq!(hex.contains(x, y), hex.contains(n - 1 - x, y));
                    assert_eq!(hex.contains(x, y), hex.contains(x, n - 1 - y));
                }
            }
        }
    }

    #[test]
    fn test_face_areas() {
        for b in 1..=8 {
            let hex = Hexagon::new(b);
            let mut counts = [0u32; 3];
            for y in 0..hex.rect_size() {
                for x in 0..hex.rect_size() {
                    match hex.face_at(x, y) {
                        Some(Face::Up) => counts[0] += 1,
                        Some(Face::North) => counts[1] += 1,
                        Some(Face::West) => counts[2] += 1,
                        None => {}
                    }
                }
            }
            // Each face holds exactly one (2B)² source tile.
            let tile = 4 * b * b;
            assert_eq!(counts, [tile, tile, tile], "B={b}");
            assert_eq!(hex.area(), 3 * tile);
        }
    }

    #[test]
    fn test_b1_is_smallest_hexagon() {
        let hex = Hexagon::new(1);
        let expected = [" UU", "NUUW", "NNWW", " NW"];
        assert_eq!(render(&hex), expected);
    }
}
