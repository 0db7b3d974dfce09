//! Tile-sheet lookup for classified tiles and overlay markers.
//!
//! Positions are `(column, row)` cells on the dungeon tile sheet.

use serde::{Deserialize, Serialize};

use crate::types::{OverlayMarker, TileKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SheetPos {
    pub column: u8,
    pub row: u8,
}

const fn at(column: u8, row: u8) -> SheetPos {
    SheetPos { column, row }
}

pub const FLOOR: SheetPos = at(1, 1);
pub const WALL_EDGE: SheetPos = at(2, 7);
pub const WALL_PLAIN: SheetPos = at(1, 7);
pub const EXIT: SheetPos = at(5, 7);
pub const FLOWER: SheetPos = at(4, 7);

/// Wall masks up to this value have an open side to the south and use the edge tile.
const WALL_EDGE_MAX_MASK: u8 = 31;

/// Dirt variants keyed by autotile mask, sorted by mask.
const DIRT_VARIANTS: [(u8, SheetPos); 51] = [
    (0, at(7, 6)),
    (2, at(5, 6)),
    (8, at(6, 6)),
    (10, at(8, 5)),
    (11, at(7, 5)),
    (16, at(4, 6)),
    (18, at(2, 6)),
    (22, at(1, 6)),
    (24, at(2, 5)),
    (26, at(8, 4)),
    (27, at(7, 4)),
    (30, at(6, 4)),
    (31, at(5, 4)),
    (64, at(3, 6)),
    (66, at(1, 5)),
    (72, at(6, 5)),
    (74, at(4, 4)),
    (75, at(2, 4)),
    (80, at(4, 5)),
    (82, at(4, 3)),
    (84, at(4, 5)),
    (86, at(3, 3)),
    (88, at(8, 3)),
    (90, at(8, 2)),
    (91, at(7, 2)),
    (94, at(6, 2)),
    (95, at(5, 2)),
    (104, at(5, 5)),
    (106, at(3, 4)),
    (107, at(1, 4)),
    (120, at(6, 3)),
    (122, at(8, 1)),
    (123, at(7, 1)),
    (126, at(6, 1)),
    (127, at(5, 1)),
    (150, at(1, 3)),
    (200, at(6, 5)),
    (208, at(3, 5)),
    (210, at(2, 3)),
    (214, at(1, 3)),
    (216, at(7, 3)),
    (218, at(4, 2)),
    (219, at(3, 2)),
    (222, at(2, 2)),
    (223, at(1, 2)),
    (243, at(2, 3)),
    (248, at(5, 3)),
    (250, at(4, 1)),
    (251, at(3, 1)),
    (254, at(2, 1)),
    (255, at(3, 7)),
];

pub fn dirt_variant(mask: u8) -> Option<SheetPos> {
    DIRT_VARIANTS
        .binary_search_by_key(&mask, |&(key, _)| key)
        .ok()
        .map(|index| DIRT_VARIANTS[index].1)
}

/// Dirt masks without a dedicated variant fall back to plain floor.
pub fn sheet_position(tile: TileKind) -> SheetPos {
    match tile {
        TileKind::Wall(mask) if mask <= WALL_EDGE_MAX_MASK => WALL_EDGE,
        TileKind::Wall(_) => WALL_PLAIN,
        TileKind::Floor | TileKind::Corridor => FLOOR,
        TileKind::Dirt(mask) => dirt_variant(mask).unwrap_or(FLOOR),
    }
}

/// Mobs are entities rather than sheet tiles, so only exit and flower map here.
pub fn marker_sheet_position(marker: OverlayMarker) -> Option<SheetPos> {
    match marker {
        OverlayMarker::Exit => Some(EXIT),
        OverlayMarker::Flower => Some(FLOWER),
        OverlayMarker::None | OverlayMarker::Mob => None,
    }
}
