//! The block catalog: how each atlas slot is drawn from terrain tiles.
//!
//! Every slot has a recipe, a list of [`Step`]s painted back to front. Box
//! extents are given in sixteenths of a block so recipes are independent of
//! the half-size.

use crate::offsets::Slot;
use crate::projector::Side;
use crate::sheet::{TileRef, Turn};

/// Number of slots in the atlas, dummy included.
pub const SLOT_COUNT: u16 = 229;

/// Slots with no block assigned. They stay fully transparent.
pub const UNUSED_SLOTS: &[u16] = &[
    48, 68, 69, 88, 89, 90, 91, 104, 105, 106, 107, 108, 109, 123, 124, 125, 126, 149, 150, 151,
    152,
];

/// Returns `true` for catalog gaps. The dummy slot is not a gap.
pub fn is_unused(slot: Slot) -> bool {
    UNUSED_SLOTS.contains(&slot.0)
}

// ----- Terrain tiles -----

mod tile {
    pub const GRASS_TOP: u8 = 0;
    pub const STONE: u8 = 1;
    pub const DIRT: u8 = 2;
    pub const GRASS_SIDE: u8 = 3;
    pub const PLANKS: u8 = 4;
    pub const SLAB_SIDE: u8 = 5;
    pub const SLAB_TOP: u8 = 6;
    pub const BRICK: u8 = 7;
    pub const TNT_SIDE: u8 = 8;
    pub const TNT_TOP: u8 = 9;
    pub const ROSE: u8 = 12;
    pub const DANDELION: u8 = 13;
    pub const PORTAL: u8 = 14;
    pub const SAPLING: u8 = 15;
    pub const COBBLE: u8 = 16;
    pub const BEDROCK: u8 = 17;
    pub const SAND: u8 = 18;
    pub const GRAVEL: u8 = 19;
    pub const LOG_SIDE: u8 = 20;
    pub const LOG_TOP: u8 = 21;
    pub const IRON_BLOCK: u8 = 22;
    pub const GOLD_BLOCK: u8 = 23;
    pub const DIAMOND_BLOCK: u8 = 24;
    pub const CHEST_TOP: u8 = 25;
    pub const CHEST_SIDE: u8 = 26;
    pub const CHEST_FRONT: u8 = 27;
    pub const RED_MUSHROOM: u8 = 28;
    pub const BROWN_MUSHROOM: u8 = 29;
    pub const GOLD_ORE: u8 = 32;
    pub const IRON_ORE: u8 = 33;
    pub const COAL_ORE: u8 = 34;
    pub const BOOKSHELF: u8 = 35;
    pub const MOSSY: u8 = 36;
    pub const OBSIDIAN: u8 = 37;
    pub const DOUBLE_CHEST_LEFT: u8 = 41;
    pub const DOUBLE_CHEST_RIGHT: u8 = 42;
    pub const WORKBENCH_TOP: u8 = 43;
    pub const FURNACE_FRONT: u8 = 44;
    pub const FURNACE_SIDE: u8 = 45;
    pub const DISPENSER_FRONT: u8 = 46;
    pub const SPONGE: u8 = 48;
    pub const GLASS: u8 = 49;
    pub const DIAMOND_ORE: u8 = 50;
    pub const REDSTONE_ORE: u8 = 51;
    pub const LEAVES: u8 = 52;
    pub const WORKBENCH_SIDE: u8 = 59;
    pub const WORKBENCH_FRONT: u8 = 60;
    pub const FURNACE_LIT: u8 = 61;
    pub const FURNACE_TOP: u8 = 62;
    pub const WOOL: u8 = 64;
    pub const SPAWNER: u8 = 65;
    pub const SNOW: u8 = 66;
    pub const ICE: u8 = 67;
    pub const CACTUS_TOP: u8 = 69;
    pub const CACTUS_SIDE: u8 = 70;
    pub const CLAY: u8 = 72;
    pub const REEDS: u8 = 73;
    pub const JUKEBOX_SIDE: u8 = 74;
    pub const JUKEBOX_TOP: u8 = 75;
    pub const TORCH: u8 = 80;
    pub const WOOD_DOOR_TOP: u8 = 81;
    pub const IRON_DOOR_TOP: u8 = 82;
    pub const LADDER: u8 = 83;
    pub const FARMLAND: u8 = 87;
    pub const CROPS: u8 = 88;
    pub const LEVER: u8 = 96;
    pub const WOOD_DOOR_BOTTOM: u8 = 97;
    pub const IRON_DOOR_BOTTOM: u8 = 98;
    pub const RED_TORCH_ON: u8 = 99;
    pub const PUMPKIN_TOP: u8 = 102;
    pub const NETHERRACK: u8 = 103;
    pub const SOUL_SAND: u8 = 104;
    pub const GLOWSTONE: u8 = 105;
    pub const RAIL_CURVE: u8 = 112;
    pub const RED_TORCH_OFF: u8 = 115;
    pub const PINE_LOG_SIDE: u8 = 116;
    pub const BIRCH_LOG_SIDE: u8 = 117;
    pub const PUMPKIN_SIDE: u8 = 118;
    pub const PUMPKIN_FRONT: u8 = 119;
    pub const JACK_FRONT: u8 = 120;
    pub const CAKE_TOP: u8 = 121;
    pub const CAKE_SIDE: u8 = 122;
    pub const RAIL: u8 = 128;
    pub const LAPIS_BLOCK: u8 = 144;
    pub const LAPIS_ORE: u8 = 160;
    pub const REDSTONE_WIRE: u8 = 164;
    pub const SANDSTONE_TOP: u8 = 176;
    pub const SANDSTONE_SIDE: u8 = 192;
    pub const WATER: u8 = 205;
    pub const LAVA: u8 = 237;
}

/// Terrain tiles for wool colors 1–15.
const WOOL_COLORS: [u8; 15] = [
    210, 194, 178, 162, 146, 130, 114, 225, 209, 193, 177, 161, 145, 129, 113,
];

/// Fixed biome color for the greyscale grass top.
pub const GRASS_TINT: [u8; 3] = [125, 190, 80];
/// Fixed biome color for greyscale leaves.
pub const LEAVES_TINT: [u8; 3] = [95, 160, 60];
/// Color of powered redstone dust.
pub const REDSTONE_TINT: [u8; 3] = [220, 30, 20];

// ----- Steps -----

/// Textures for the visible faces of a box.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Faces {
    /// Upward face.
    pub top: Option<TileRef>,
    /// North (front-left) face.
    pub north: Option<TileRef>,
    /// West (front-right) face.
    pub west: Option<TileRef>,
}

impl Faces {
    /// The same tile on all three faces.
    pub const fn all(tile: TileRef) -> Self {
        Self {
            top: Some(tile),
            north: Some(tile),
            west: Some(tile),
        }
    }

    /// One tile on top, another on both sides.
    pub const fn column(top: TileRef, side: TileRef) -> Self {
        Self {
            top: Some(top),
            north: Some(side),
            west: Some(side),
        }
    }
}

/// Box extents in sixteenths of a block, half-open on each axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bounds {
    /// West–east extent; 16 is the west face.
    pub p: (u8, u8),
    /// South–north extent; 16 is the north face.
    pub q: (u8, u8),
    /// Height.
    pub h: (u8, u8),
}

impl Bounds {
    /// The whole block.
    pub const FULL: Bounds = Bounds {
        p: (0, 16),
        q: (0, 16),
        h: (0, 16),
    };

    /// Full footprint up to `top`.
    pub const fn height(top: u8) -> Self {
        Self {
            h: (0, top),
            ..Self::FULL
        }
    }

    /// Footprint inset by `inset` on every side, up to `top`.
    pub const fn inset(inset: u8, top: u8) -> Self {
        Self {
            p: (inset, 16 - inset),
            q: (inset, 16 - inset),
            h: (0, top),
        }
    }
}

/// One drawing operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// An axis-aligned box.
    Cuboid {
        /// Face textures; `None` faces are left undrawn.
        faces: Faces,
        /// Extents.
        bounds: Bounds,
    },
    /// A horizontal surface spanning the block at `height` sixteenths.
    Surface {
        /// Texture, read with columns running west and rows running north.
        tile: TileRef,
        /// Height in sixteenths.
        height: u8,
    },
    /// Two vertical planes crossing at `(p, q)`.
    Cross {
        /// Texture on both planes.
        tile: TileRef,
        /// Crossing point, in sixteenths.
        p: u8,
        /// Crossing point, in sixteenths.
        q: u8,
        /// Vertical offset in sixteenths.
        lift: u8,
    },
    /// A full-size flat tile on one side of the block.
    Wall {
        /// Texture.
        tile: TileRef,
        /// Side the tile is attached to.
        side: Side,
    },
    /// A tile on a ramp rising toward `ascent`.
    Slope {
        /// Texture.
        tile: TileRef,
        /// Direction the ramp rises toward.
        ascent: Side,
    },
    /// The fire tile on all four sides.
    Fire,
}

// ----- Recipe helpers -----

const fn t(index: u8) -> TileRef {
    TileRef::new(index)
}

fn cuboid(faces: Faces, bounds: Bounds) -> Step {
    Step::Cuboid { faces, bounds }
}

fn cube(index: u8) -> Vec<Step> {
    vec![cuboid(Faces::all(t(index)), Bounds::FULL)]
}

fn column(top: u8, side: u8) -> Vec<Step> {
    vec![cuboid(Faces::column(t(top), t(side)), Bounds::FULL)]
}

/// A full cube whose north and west faces may differ.
fn fronted(top: u8, north: u8, west: u8) -> Vec<Step> {
    let faces = Faces {
        top: Some(t(top)),
        north: Some(t(north)),
        west: Some(t(west)),
    };
    vec![cuboid(faces, Bounds::FULL)]
}

fn cross(tile: TileRef) -> Vec<Step> {
    vec![Step::Cross {
        tile,
        p: 8,
        q: 8,
        lift: 0,
    }]
}

fn liquid(index: u8, height: u8) -> Vec<Step> {
    vec![cuboid(Faces::all(t(index)), Bounds::height(height))]
}

/// Footprint of a slab `depth` sixteenths thick against `side`, spanning `span` along it.
fn against(side: Side, depth: u8, span: (u8, u8)) -> ((u8, u8), (u8, u8)) {
    match side {
        Side::North => (span, (16 - depth, 16)),
        Side::South => (span, (0, depth)),
        Side::East => ((0, depth), span),
        Side::West => ((16 - depth, 16), span),
    }
}

fn plate(side: Side, depth: u8, span: (u8, u8), h: (u8, u8), faces: Faces) -> Step {
    let (p, q) = against(side, depth, span);
    cuboid(faces, Bounds { p, q, h })
}

/// Full slab plus an upper half-block on the side the stairs rise toward.
fn stairs(index: u8, ascent: Side) -> Vec<Step> {
    let faces = Faces::all(t(index));
    vec![
        cuboid(faces, Bounds::height(8)),
        plate(ascent, 8, (0, 16), (8, 16), faces),
    ]
}

/// Torch standing on the floor, or leaning out from the wall on `wall`.
fn torch(index: u8, wall: Option<Side>) -> Vec<Step> {
    let tile = t(index);
    let (p, q, lift) = match wall {
        None => (8, 8, 0),
        Some(Side::North) => (8, 12, 3),
        Some(Side::South) => (8, 4, 3),
        Some(Side::East) => (4, 8, 3),
        Some(Side::West) => (12, 8, 3),
    };
    vec![Step::Cross { tile, p, q, lift }]
}

fn door(index: u8, side: Side) -> Vec<Step> {
    vec![plate(side, 3, (0, 16), (0, 16), Faces::all(t(index)))]
}

fn wall_sign(side: Side) -> Vec<Step> {
    vec![plate(side, 2, (0, 16), (4, 12), Faces::all(t(tile::PLANKS)))]
}

/// Sign on a post. The board runs along `p` when `along_p`, along `q` otherwise;
/// `narrow` shortens it for the diagonal facings.
fn sign_post(along_p: bool, narrow: bool) -> Vec<Step> {
    let planks = Faces::all(t(tile::PLANKS));
    let span = if narrow { (3, 13) } else { (0, 16) };
    let thick = if narrow { (6, 10) } else { (7, 9) };
    let (p, q) = if along_p { (span, thick) } else { (thick, span) };
    vec![
        cuboid(
            planks,
            Bounds {
                p: (7, 9),
                q: (7, 9),
                h: (0, 8),
            },
        ),
        cuboid(planks, Bounds { p, q, h: (8, 16) }),
    ]
}

fn button(wall: Side) -> Vec<Step> {
    vec![plate(wall, 2, (5, 11), (6, 10), Faces::all(t(tile::STONE)))]
}

fn wall_lever(wall: Side) -> Vec<Step> {
    let (p, q) = match wall {
        Side::North => (8, 11),
        Side::South => (8, 5),
        Side::East => (5, 8),
        Side::West => (11, 8),
    };
    vec![
        plate(wall, 3, (5, 11), (3, 13), Faces::all(t(tile::COBBLE))),
        Step::Cross {
            tile: t(tile::LEVER),
            p,
            q,
            lift: 2,
        },
    ]
}

fn ground_lever(along_p: bool) -> Vec<Step> {
    let (p, q) = if along_p { ((4, 12), (5, 11)) } else { ((5, 11), (4, 12)) };
    vec![
        cuboid(Faces::all(t(tile::COBBLE)), Bounds { p, q, h: (0, 3) }),
        Step::Cross {
            tile: t(tile::LEVER),
            p: 8,
            q: 8,
            lift: 0,
        },
    ]
}

/// Fence post with rails toward each side set in `mask` (N = 1, S = 2, E = 4, W = 8).
fn fence(mask: u8) -> Vec<Step> {
    let wood = Faces::all(t(tile::PLANKS));
    let arm = |side: Side| -> [Step; 2] {
        let (p, q) = match side {
            Side::North => ((7, 9), (10, 16)),
            Side::South => ((7, 9), (0, 6)),
            Side::East => ((0, 6), (7, 9)),
            Side::West => ((10, 16), (7, 9)),
        };
        [
            cuboid(wood, Bounds { p, q, h: (6, 9) }),
            cuboid(wood, Bounds { p, q, h: (12, 15) }),
        ]
    };

    let mut steps = Vec::new();
    // Rails behind the post first, then the post, then the rails in front of it.
    for (bit, side) in [(2, Side::South), (4, Side::East)] {
        if mask & bit != 0 {
            steps.extend(arm(side));
        }
    }
    steps.push(cuboid(
        wood,
        Bounds {
            p: (6, 10),
            q: (6, 10),
            h: (0, 16),
        },
    ));
    for (bit, side) in [(1, Side::North), (8, Side::West)] {
        if mask & bit != 0 {
            steps.extend(arm(side));
        }
    }
    steps
}

fn chest(north: Option<u8>, west: Option<u8>, bounds: Bounds) -> Vec<Step> {
    let faces = Faces {
        top: Some(t(tile::CHEST_TOP)),
        north: north.map(t),
        west: west.map(t),
    };
    vec![cuboid(faces, bounds)]
}

/// A full cube with one of the side faces left off.
fn open_cube(index: u8, north: bool, west: bool) -> Vec<Step> {
    let tile = t(index);
    let faces = Faces {
        top: Some(tile),
        north: north.then_some(tile),
        west: west.then_some(tile),
    };
    vec![cuboid(faces, Bounds::FULL)]
}

fn rail(turn: Turn, curve: bool) -> Vec<Step> {
    let index = if curve { tile::RAIL_CURVE } else { tile::RAIL };
    vec![Step::Surface {
        tile: t(index).turned(turn),
        height: 1,
    }]
}

fn ramp(ascent: Side) -> Vec<Step> {
    let turn = match ascent {
        Side::North | Side::South => Turn::None,
        Side::East | Side::West => Turn::Quarter,
    };
    vec![Step::Slope {
        tile: t(tile::RAIL).turned(turn),
        ascent,
    }]
}

// ----- Recipes -----

/// Drawing steps for `slot`, back to front. Empty for the dummy slot, catalog gaps
/// and slots past the end of the atlas.
pub fn recipe(slot: Slot) -> Vec<Step> {
    use tile::*;
    use Side::{East, North, South, West};

    match slot.0 {
        1 => cube(STONE),
        2 => vec![cuboid(
            Faces::column(t(GRASS_TOP).tinted(GRASS_TINT), t(GRASS_SIDE)),
            Bounds::FULL,
        )],
        3 => cube(DIRT),
        4 => cube(COBBLE),
        5 => cube(PLANKS),
        6 => cross(t(SAPLING)),
        7 => cube(BEDROCK),
        8 => cube(WATER),
        s @ 9..=15 => liquid(WATER, 2 * (16 - s as u8)),
        16 => cube(LAVA),
        17 => liquid(LAVA, 12),
        18 => liquid(LAVA, 8),
        19 => liquid(LAVA, 4),
        20 => cube(SAND),
        21 => cube(GRAVEL),
        22 => cube(GOLD_ORE),
        23 => cube(IRON_ORE),
        24 => cube(COAL_ORE),
        25 => column(LOG_TOP, LOG_SIDE),
        26 => vec![cuboid(
            Faces::all(t(LEAVES).tinted(LEAVES_TINT)),
            Bounds::FULL,
        )],
        27 => cube(SPONGE),
        28 => cube(GLASS),
        29 => cube(WOOL),
        30 => cross(t(DANDELION)),
        31 => cross(t(ROSE)),
        32 => cross(t(BROWN_MUSHROOM)),
        33 => cross(t(RED_MUSHROOM)),
        34 => cube(GOLD_BLOCK),
        35 => cube(IRON_BLOCK),
        36 => column(SLAB_TOP, SLAB_SIDE),
        37 => vec![cuboid(
            Faces::column(t(SLAB_TOP), t(SLAB_SIDE)),
            Bounds::height(8),
        )],
        38 => cube(BRICK),
        39 => column(TNT_TOP, TNT_SIDE),
        40 => column(PLANKS, BOOKSHELF),
        41 => cube(MOSSY),
        42 => cube(OBSIDIAN),
        43 => torch(TORCH, None),
        44 => torch(TORCH, Some(North)),
        45 => torch(TORCH, Some(South)),
        46 => torch(TORCH, Some(East)),
        47 => torch(TORCH, Some(West)),
        49 => cube(SPAWNER),
        50 => stairs(PLANKS, South),
        51 => stairs(PLANKS, North),
        52 => stairs(PLANKS, West),
        53 => stairs(PLANKS, East),
        54 => chest(
            Some(CHEST_SIDE),
            Some(CHEST_FRONT),
            Bounds::inset(1, 14),
        ),
        55 => vec![Step::Surface {
            tile: t(REDSTONE_WIRE).tinted(REDSTONE_TINT),
            height: 1,
        }],
        56 => cube(DIAMOND_ORE),
        57 => cube(DIAMOND_BLOCK),
        58 => fronted(WORKBENCH_TOP, WORKBENCH_SIDE, WORKBENCH_FRONT),
        // Ripe crops first: slot 59 is stage 7, slot 66 stage 0.
        s @ 59..=66 => cross(t(CROPS + (66 - s) as u8)),
        67 => vec![cuboid(
            Faces::column(t(FARMLAND), t(DIRT)),
            Bounds::height(15),
        )],
        70 => sign_post(true, false),
        71 => sign_post(true, true),
        72 => sign_post(false, false),
        73 => sign_post(false, true),
        74 => door(WOOD_DOOR_BOTTOM, South),
        75 => door(WOOD_DOOR_BOTTOM, North),
        76 => door(WOOD_DOOR_BOTTOM, West),
        77 => door(WOOD_DOOR_BOTTOM, East),
        78 => door(WOOD_DOOR_TOP, South),
        79 => door(WOOD_DOOR_TOP, North),
        80 => door(WOOD_DOOR_TOP, West),
        81 => door(WOOD_DOOR_TOP, East),
        82 => vec![Step::Wall {
            tile: t(LADDER),
            side: East,
        }],
        83 => vec![Step::Wall {
            tile: t(LADDER),
            side: West,
        }],
        84 => vec![Step::Wall {
            tile: t(LADDER),
            side: North,
        }],
        85 => vec![Step::Wall {
            tile: t(LADDER),
            side: South,
        }],
        86 => rail(Turn::Quarter, false),
        87 => rail(Turn::None, false),
        92 => rail(Turn::Quarter, true),
        93 => rail(Turn::Half, true),
        94 => rail(Turn::ThreeQuarter, true),
        95 => rail(Turn::None, true),
        96 => stairs(COBBLE, South),
        97 => stairs(COBBLE, North),
        98 => stairs(COBBLE, West),
        99 => stairs(COBBLE, East),
        // A sign facing east hangs on the west side of its block.
        100 => wall_sign(West),
        101 => wall_sign(East),
        102 => wall_sign(South),
        103 => wall_sign(North),
        110 => vec![cuboid(Faces::all(t(STONE)), Bounds::inset(1, 1))],
        111 => door(IRON_DOOR_BOTTOM, South),
        112 => door(IRON_DOOR_BOTTOM, North),
        113 => door(IRON_DOOR_BOTTOM, West),
        114 => door(IRON_DOOR_BOTTOM, East),
        115 => door(IRON_DOOR_TOP, South),
        116 => door(IRON_DOOR_TOP, North),
        117 => door(IRON_DOOR_TOP, West),
        118 => door(IRON_DOOR_TOP, East),
        119 => vec![cuboid(Faces::all(t(PLANKS)), Bounds::inset(1, 1))],
        120 => cube(REDSTONE_ORE),
        121 => torch(RED_TORCH_OFF, None),
        122 => torch(RED_TORCH_ON, None),
        127 => vec![cuboid(Faces::all(t(SNOW)), Bounds::height(2))],
        128 => cube(ICE),
        129 => cube(SNOW),
        130 => vec![cuboid(
            Faces::column(t(CACTUS_TOP), t(CACTUS_SIDE)),
            Bounds::inset(1, 16),
        )],
        131 => cube(CLAY),
        132 => cross(t(REEDS)),
        133 => column(JUKEBOX_TOP, JUKEBOX_SIDE),
        134 => fence(0),
        135 => fronted(PUMPKIN_TOP, PUMPKIN_SIDE, PUMPKIN_FRONT),
        136 => cube(NETHERRACK),
        137 => cube(SOUL_SAND),
        138 => cube(GLOWSTONE),
        139 => vec![cuboid(
            Faces::all(t(PORTAL)),
            Bounds {
                p: (0, 16),
                q: (6, 10),
                h: (0, 16),
            },
        )],
        140 => fronted(PUMPKIN_TOP, PUMPKIN_SIDE, JACK_FRONT),
        141 => torch(RED_TORCH_ON, Some(North)),
        142 => torch(RED_TORCH_ON, Some(South)),
        143 => torch(RED_TORCH_ON, Some(West)),
        144 => torch(RED_TORCH_ON, Some(East)),
        145 => torch(RED_TORCH_OFF, Some(North)),
        146 => torch(RED_TORCH_OFF, Some(South)),
        147 => torch(RED_TORCH_OFF, Some(West)),
        148 => torch(RED_TORCH_OFF, Some(East)),
        153 => column(PUMPKIN_TOP, PUMPKIN_SIDE),
        154 => fronted(PUMPKIN_TOP, PUMPKIN_FRONT, PUMPKIN_SIDE),
        155 => column(PUMPKIN_TOP, PUMPKIN_SIDE),
        156 => fronted(PUMPKIN_TOP, JACK_FRONT, PUMPKIN_SIDE),
        157 => vec![Step::Surface {
            tile: t(WATER),
            height: 16,
        }],
        s @ 158..=172 => fence((s - 157) as u8),
        // Halves of a double chest; the joint face is left off.
        173 => chest(
            Some(CHEST_SIDE),
            Some(DOUBLE_CHEST_LEFT),
            Bounds {
                p: (1, 15),
                q: (0, 15),
                h: (0, 14),
            },
        ),
        174 => chest(
            None,
            Some(DOUBLE_CHEST_RIGHT),
            Bounds {
                p: (1, 15),
                q: (1, 16),
                h: (0, 14),
            },
        ),
        175 => chest(
            Some(DOUBLE_CHEST_LEFT),
            None,
            Bounds {
                p: (1, 16),
                q: (1, 15),
                h: (0, 14),
            },
        ),
        176 => chest(
            Some(DOUBLE_CHEST_RIGHT),
            Some(CHEST_SIDE),
            Bounds {
                p: (0, 15),
                q: (1, 15),
                h: (0, 14),
            },
        ),
        177 => chest(
            Some(CHEST_FRONT),
            Some(CHEST_SIDE),
            Bounds::inset(1, 14),
        ),
        178 => open_cube(WATER, true, false),
        179 => open_cube(WATER, false, true),
        180 => vec![Step::Surface {
            tile: t(ICE),
            height: 16,
        }],
        181 => open_cube(ICE, true, false),
        182 => open_cube(ICE, false, true),
        183 => fronted(FURNACE_TOP, FURNACE_SIDE, FURNACE_FRONT),
        184 => fronted(FURNACE_TOP, FURNACE_FRONT, FURNACE_SIDE),
        185 => column(FURNACE_TOP, FURNACE_SIDE),
        186 => fronted(FURNACE_TOP, FURNACE_SIDE, FURNACE_LIT),
        187 => fronted(FURNACE_TOP, FURNACE_LIT, FURNACE_SIDE),
        188 => column(FURNACE_TOP, FURNACE_SIDE),
        189 => vec![Step::Fire],
        // Buttons and wall levers face away from the wall they sit on.
        190 => button(North),
        191 => button(South),
        192 => button(East),
        193 => button(West),
        194 => wall_lever(North),
        195 => wall_lever(South),
        196 => wall_lever(East),
        197 => wall_lever(West),
        198 => ground_lever(true),
        199 => ground_lever(false),
        200 => ramp(South),
        201 => ramp(North),
        202 => ramp(East),
        203 => ramp(West),
        s @ 204..=218 => cube(WOOL_COLORS[(s - 204) as usize]),
        219 => column(LOG_TOP, PINE_LOG_SIDE),
        220 => column(LOG_TOP, BIRCH_LOG_SIDE),
        221 => cube(LAPIS_ORE),
        222 => cube(LAPIS_BLOCK),
        223 => fronted(FURNACE_TOP, FURNACE_SIDE, DISPENSER_FRONT),
        224 => fronted(FURNACE_TOP, DISPENSER_FRONT, FURNACE_SIDE),
        225 => column(FURNACE_TOP, FURNACE_SIDE),
        226 => column(SANDSTONE_TOP, SANDSTONE_SIDE),
        227 => cube(JUKEBOX_SIDE),
        228 => vec![cuboid(
            Faces::column(t(CAKE_TOP), t(CAKE_SIDE)),
            Bounds::inset(1, 8),
        )],
        _ => Vec::new(),
    }
}
