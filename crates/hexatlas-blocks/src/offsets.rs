//! Variant-key to slot mapping.
//!
//! Every `(block type, sub-state)` pair maps to exactly one atlas slot. The
//! table is dense (4096 entries) and starts out explicitly filled with the
//! dummy slot, so anything the catalog doesn't list renders as nothing.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of sub-states per block type.
pub const SUB_STATES: u16 = 16;

/// Total number of variant keys (256 block types × 16 sub-states).
pub const KEY_COUNT: usize = 256 * SUB_STATES as usize;

// ----- Slot -----

/// Index of a block image in the atlas.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Slot(pub u16);

// The offset table holds 4096 of these.
static_assertions::assert_eq_size!(Slot, u16);

impl Slot {
    /// Fully transparent image used for unrecognized blocks.
    pub const DUMMY: Slot = Slot(0);

    /// Slot index as `usize`, for indexing per-slot tables.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ----- VariantKey -----

/// A block type together with its 4-bit sub-state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VariantKey {
    block_type: u8,
    sub_state: u8,
}

impl VariantKey {
    /// Returns `None` when `sub_state` doesn't fit in four bits.
    pub fn new(block_type: u8, sub_state: u8) -> Option<Self> {
        (sub_state < SUB_STATES as u8).then_some(Self {
            block_type,
            sub_state,
        })
    }

    /// Block type id.
    pub fn block_type(self) -> u8 {
        self.block_type
    }

    /// Sub-state (0–15).
    pub fn sub_state(self) -> u8 {
        self.sub_state
    }

    /// Dense index: `block_type * 16 + sub_state`.
    #[inline]
    pub fn index(self) -> usize {
        self.block_type as usize * SUB_STATES as usize + self.sub_state as usize
    }

    /// All 4096 keys in index order.
    pub fn all() -> impl Iterator<Item = VariantKey> {
        (0..=u8::MAX).flat_map(|block_type| {
            (0..SUB_STATES as u8).map(move |sub_state| VariantKey {
                block_type,
                sub_state,
            })
        })
    }
}

// ----- OffsetTable -----

/// Dense `VariantKey → Slot` table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OffsetTable {
    slots: Box<[Slot]>,
}

impl OffsetTable {
    /// A table mapping every key to `default`.
    pub fn filled(default: Slot) -> Self {
        Self {
            slots: vec![default; KEY_COUNT].into_boxed_slice(),
        }
    }

    /// Slot for `key`.
    #[inline]
    pub fn get(&self, key: VariantKey) -> Slot {
        self.slots[key.index()]
    }

    /// Points `key` at `slot`.
    pub fn set(&mut self, key: VariantKey, slot: Slot) {
        self.slots[key.index()] = slot;
    }

    /// Number of keys that don't map to the dummy slot.
    pub fn mapped_keys(&self) -> usize {
        self.slots.iter().filter(|&&s| s != Slot::DUMMY).count()
    }

    /// Largest slot referenced by the table.
    pub fn max_slot(&self) -> Slot {
        self.slots.iter().copied().max().unwrap_or_default()
    }

    fn put(&mut self, block_type: u8, sub_state: u8, slot: u16) {
        let index = block_type as usize * SUB_STATES as usize + sub_state as usize;
        self.slots[index] = Slot(slot);
    }

    /// Maps every sub-state of `block_type` to `slot`.
    fn put_all(&mut self, block_type: u8, slot: u16) {
        for sub_state in 0..SUB_STATES as u8 {
            self.put(block_type, sub_state, slot);
        }
    }

    /// Maps each sub-state through `f`; `None` leaves the dummy in place.
    fn put_with(&mut self, block_type: u8, f: impl Fn(u8) -> Option<u16>) {
        for sub_state in 0..SUB_STATES as u8 {
            if let Some(slot) = f(sub_state) {
                self.put(block_type, sub_state, slot);
            }
        }
    }

    /// The table for the built-in block catalog.
    pub fn catalog() -> Self {
        let mut t = Self::filled(Slot::DUMMY);

        // Plain blocks whose sub-state doesn't change their look.
        const PLAIN: &[(u8, u16)] = &[
            (1, 1),    // stone
            (2, 2),    // grass
            (3, 3),    // dirt
            (4, 4),    // cobblestone
            (5, 5),    // planks
            (6, 6),    // sapling
            (7, 7),    // bedrock
            (12, 20),  // sand
            (13, 21),  // gravel
            (14, 22),  // gold ore
            (15, 23),  // iron ore
            (16, 24),  // coal ore
            (18, 26),  // leaves
            (19, 27),  // sponge
            (20, 28),  // glass
            (21, 221), // lapis ore
            (22, 222), // lapis block
            (24, 226), // sandstone
            (25, 227), // note block
            (37, 30),  // dandelion
            (38, 31),  // rose
            (39, 32),  // brown mushroom
            (40, 33),  // red mushroom
            (41, 34),  // gold block
            (42, 35),  // iron block
            (43, 36),  // double slab
            (44, 37),  // slab
            (45, 38),  // brick
            (46, 39),  // tnt
            (47, 40),  // bookshelf
            (48, 41),  // mossy cobblestone
            (49, 42),  // obsidian
            (51, 189), // fire
            (52, 49),  // spawner
            (54, 54),  // chest
            (55, 55),  // redstone wire
            (56, 56),  // diamond ore
            (57, 57),  // diamond block
            (58, 58),  // workbench
            (60, 67),  // farmland
            (70, 110), // stone pressure plate
            (72, 119), // wood pressure plate
            (73, 120), // redstone ore
            (74, 120), // glowing redstone ore
            (78, 127), // snow layer
            (79, 128), // ice
            (80, 129), // snow block
            (81, 130), // cactus
            (82, 131), // clay
            (83, 132), // reeds
            (84, 133), // jukebox
            (85, 134), // fence
            (87, 136), // netherrack
            (88, 137), // soul sand
            (89, 138), // glowstone
            (90, 139), // portal
            (92, 228), // cake
        ];
        for &(block_type, slot) in PLAIN {
            t.put_all(block_type, slot);
        }

        // Water and lava: 0 is a source, 1–7 falling levels, 8+ falling from above.
        t.put_with(8, |d| Some(if d == 0 || d >= 8 { 8 } else { 8 + d as u16 }));
        t.put_with(9, |d| Some(if d == 0 || d >= 8 { 8 } else { 8 + d as u16 }));
        let lava = |d: u8| {
            Some(match d {
                1..=2 => 17,
                3..=4 => 18,
                5..=7 => 19,
                _ => 16,
            })
        };
        t.put_with(10, lava);
        t.put_with(11, lava);

        t.put_with(17, |d| match d {
            0 => Some(25),
            1 => Some(219),
            2 => Some(220),
            _ => None,
        });

        // Wool colors 1–15 live in their own block of slots.
        t.put_with(35, |d| Some(if d == 0 { 29 } else { 203 + d as u16 }));

        let torch = |floor: u16, south: u16, north: u16, west: u16, east: u16| {
            move |d: u8| match d {
                1 => Some(south),
                2 => Some(north),
                3 => Some(west),
                4 => Some(east),
                5 => Some(floor),
                _ => None,
            }
        };
        t.put_with(50, torch(43, 44, 45, 46, 47));
        t.put_with(75, torch(121, 145, 146, 148, 147));
        t.put_with(76, torch(122, 141, 142, 144, 143));

        t.put_with(53, |d| (d < 4).then_some(50 + d as u16));
        t.put_with(67, |d| (d < 4).then_some(96 + d as u16));

        // Crops grow from slot 66 (just planted) down to 59 (ripe).
        t.put_with(59, |d| (d < 8).then_some(66 - d as u16));

        // Furnaces and dispensers: the front shows on a visible face only when facing W or N.
        let facing = |west: u16, north: u16, hidden: u16| {
            move |d: u8| match d {
                2 | 5 => Some(hidden),
                3 => Some(west),
                4 => Some(north),
                _ => None,
            }
        };
        t.put_with(61, facing(183, 184, 185));
        t.put_with(62, facing(186, 187, 188));
        t.put_with(23, facing(223, 224, 225));

        t.put_with(63, |d| {
            const SIGNS: [u16; 4] = [72, 73, 70, 71];
            Some(SIGNS[((d as usize + 1) / 2) % 4])
        });

        // Doors: the low two bits give the hinge side, bit 2 swings it a quarter turn
        // and bit 3 marks the upper half.
        let door = |base: u16| {
            move |d: u8| {
                let mut side = d & 0x3;
                if d & 0x4 != 0 {
                    side = (side + 1) % 4;
                }
                // Slot order within a door group is S, N, W, E.
                let offset = match side {
                    0 => 1,
                    1 => 3,
                    2 => 0,
                    _ => 2,
                };
                let top = if d & 0x8 != 0 { 4 } else { 0 };
                Some(base + offset + top)
            }
        };
        t.put_with(64, door(74));
        t.put_with(71, door(111));

        t.put_with(65, |d| match d {
            2 => Some(83),
            3 => Some(82),
            4 => Some(85),
            5 => Some(84),
            _ => None,
        });

        t.put_with(66, |d| match d {
            0 => Some(86),
            1 => Some(87),
            2 => Some(200),
            3 => Some(201),
            4 => Some(202),
            5 => Some(203),
            6 => Some(94),
            7 => Some(95),
            8 => Some(92),
            9 => Some(93),
            _ => None,
        });

        t.put_with(68, |d| (2..=5).contains(&d).then_some(98 + d as u16));

        // Levers and buttons keep their powered flag in bit 3.
        t.put_with(69, |d| {
            let d = d & 0x7;
            (1..=6).contains(&d).then_some(193 + d as u16)
        });
        t.put_with(77, |d| {
            let d = d & 0x7;
            (1..=4).contains(&d).then_some(189 + d as u16)
        });

        let pumpkin = |west: u16, north: u16, hidden: u16| {
            move |d: u8| match d {
                0 => Some(west),
                1 => Some(north),
                2 | 3 => Some(hidden),
                _ => None,
            }
        };
        t.put_with(86, pumpkin(135, 154, 153));
        t.put_with(91, pumpkin(140, 156, 155));

        t
    }
}

impl Default for OffsetTable {
    fn default() -> Self {
        Self::catalog()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{SLOT_COUNT, is_unused};

    fn key(block_type: u8, sub_state: u8) -> VariantKey {
        VariantKey::new(block_type, sub_state).unwrap()
    }

    #[test]
    fn test_key_index_is_dense() {
        assert_eq!(key(0, 0).index(), 0);
        assert_eq!(key(1, 0).index(), 16);
        assert_eq!(key(255, 15).index(), KEY_COUNT - 1);
        let all: Vec<_> = VariantKey::all().collect();
        assert_eq!(all.len(), KEY_COUNT);
        for (i, k) in all.iter().enumerate() {
            assert_eq!(k.index(), i);
        }
    }

    #[test]
    fn test_sub_state_must_fit_four_bits() {
        assert!(VariantKey::new(1, 15).is_some());
        assert!(VariantKey::new(1, 16).is_none());
        assert!(VariantKey::new(1, 255).is_none());
    }

    #[test]
    fn test_filled_table_uses_explicit_default() {
        let t = OffsetTable::filled(Slot(7));
        assert!(VariantKey::all().all(|k| t.get(k) == Slot(7)));
    }

    #[test]
    fn test_unlisted_keys_map_to_dummy() {
        let t = OffsetTable::catalog();
        assert_eq!(t.get(key(0, 0)), Slot::DUMMY); // air
        assert_eq!(t.get(key(36, 0)), Slot::DUMMY);
        assert_eq!(t.get(key(93, 3)), Slot::DUMMY);
        assert_eq!(t.get(key(255, 15)), Slot::DUMMY);
        assert_eq!(t.get(key(50, 0)), Slot::DUMMY); // torch without attachment
        assert_eq!(t.get(key(17, 3)), Slot::DUMMY);
    }

    #[test]
    fn test_plain_blocks() {
        let t = OffsetTable::catalog();
        for d in 0..16 {
            assert_eq!(t.get(key(1, d)), Slot(1));
            assert_eq!(t.get(key(92, d)), Slot(228));
        }
        assert_eq!(t.get(key(20, 0)), Slot(28));
        assert_eq!(t.get(key(52, 0)), Slot(49));
    }

    #[test]
    fn test_liquid_levels() {
        let t = OffsetTable::catalog();
        assert_eq!(t.get(key(8, 0)), Slot(8));
        assert_eq!(t.get(key(9, 1)), Slot(9));
        assert_eq!(t.get(key(8, 7)), Slot(15));
        assert_eq!(t.get(key(8, 8)), Slot(8));
        assert_eq!(t.get(key(10, 0)), Slot(16));
        assert_eq!(t.get(key(11, 2)), Slot(17));
        assert_eq!(t.get(key(10, 4)), Slot(18));
        assert_eq!(t.get(key(10, 7)), Slot(19));
        assert_eq!(t.get(key(10, 12)), Slot(16));
    }

    #[test]
    fn test_oriented_blocks() {
        let t = OffsetTable::catalog();
        assert_eq!(t.get(key(35, 0)), Slot(29));
        assert_eq!(t.get(key(35, 1)), Slot(204));
        assert_eq!(t.get(key(35, 15)), Slot(218));
        assert_eq!(t.get(key(50, 5)), Slot(43));
        assert_eq!(t.get(key(76, 3)), Slot(144));
        assert_eq!(t.get(key(59, 0)), Slot(66));
        assert_eq!(t.get(key(59, 7)), Slot(59));
        assert_eq!(t.get(key(61, 3)), Slot(183));
        assert_eq!(t.get(key(23, 5)), Slot(225));
        assert_eq!(t.get(key(66, 9)), Slot(93));
        assert_eq!(t.get(key(68, 5)), Slot(103));
        assert_eq!(t.get(key(69, 0x8 | 6)), Slot(199));
        assert_eq!(t.get(key(77, 0x8 | 1)), Slot(190));
        assert_eq!(t.get(key(91, 1)), Slot(156));
    }

    #[test]
    fn test_doors() {
        let t = OffsetTable::catalog();
        assert_eq!(t.get(key(64, 0)), Slot(75));
        assert_eq!(t.get(key(64, 1)), Slot(77));
        assert_eq!(t.get(key(64, 2)), Slot(74));
        assert_eq!(t.get(key(64, 3)), Slot(76));
        // Open swings a quarter turn.
        assert_eq!(t.get(key(64, 0x4)), Slot(77));
        assert_eq!(t.get(key(64, 0x4 | 3)), Slot(75));
        // Upper half.
        assert_eq!(t.get(key(64, 0x8)), Slot(79));
        assert_eq!(t.get(key(71, 0x8 | 2)), Slot(115));
    }

    #[test]
    fn test_every_slot_is_in_range_and_used() {
        let t = OffsetTable::catalog();
        assert!(t.max_slot().0 < SLOT_COUNT);
        for k in VariantKey::all() {
            let slot = t.get(k);
            assert!(!is_unused(slot), "{k:?} -> unused slot {slot}");
        }
        assert!(t.mapped_keys() > 1000);
    }

    #[test]
    fn test_lookup_is_deterministic() {
        assert_eq!(OffsetTable::catalog(), OffsetTable::catalog());
    }
}
