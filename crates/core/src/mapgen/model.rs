//! The immutable dungeon handed to rendering and entity spawning.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

use crate::types::{OverlayMarker, Pos, Rect, TileKind};

use super::grid::Grid;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DungeonMap {
    pub seed: u64,
    pub width: usize,
    pub height: usize,
    pub tiles: Grid<TileKind>,
    pub overlay: Grid<OverlayMarker>,
    /// Centre of the smallest room; where the player enters.
    pub spawn_point: Pos,
    pub spawn_room: Rect,
    pub exit_room: Rect,
    /// Every room except the spawn room, in carving order.
    pub rooms: Vec<Rect>,
    /// Mob spawns in placement order. Stacked spawns on one cell repeat here.
    pub mob_spawns: Vec<Pos>,
}

impl DungeonMap {
    /// Tiles outside the map read as fully surrounded wall.
    pub fn tile_at(&self, pos: Pos) -> TileKind {
        self.tiles.at(pos).unwrap_or(TileKind::Wall(u8::MAX))
    }

    pub fn marker_at(&self, pos: Pos) -> OverlayMarker {
        self.overlay.at(pos).unwrap_or_default()
    }

    pub fn is_walkable(&self, pos: Pos) -> bool {
        self.tile_at(pos).is_walkable()
    }

    /// Flood fill over walkable tiles from `start`, 4-connected.
    pub fn reachable_from(&self, start: Pos) -> Grid<bool> {
        let mut seen = Grid::filled(self.width, self.height, false);
        if !self.is_walkable(start) {
            return seen;
        }
        seen.set(start.x, start.y, true);
        let mut open = VecDeque::from([start]);
        while let Some(pos) = open.pop_front() {
            for next in [
                Pos { y: pos.y - 1, x: pos.x },
                Pos { y: pos.y, x: pos.x + 1 },
                Pos { y: pos.y + 1, x: pos.x },
                Pos { y: pos.y, x: pos.x - 1 },
            ] {
                if seen.at(next) != Some(false) || !self.is_walkable(next) {
                    continue;
                }
                seen.set(next.x, next.y, true);
                open.push_back(next);
            }
        }
        seen
    }

    /// True when every listed room's centre is reachable from the spawn point.
    pub fn all_rooms_reachable(&self) -> bool {
        let reachable = self.reachable_from(self.spawn_point);
        self.rooms.iter().all(|room| reachable.at(room.center()) == Some(true))
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend(self.seed.to_le_bytes());
        bytes.extend((self.width as u32).to_le_bytes());
        bytes.extend((self.height as u32).to_le_bytes());
        for tile in self.tiles.cells() {
            bytes.extend(match tile {
                TileKind::Wall(mask) => [0, *mask],
                TileKind::Floor => [1, 0],
                TileKind::Corridor => [2, 0],
                TileKind::Dirt(mask) => [3, *mask],
            });
        }
        for marker in self.overlay.cells() {
            bytes.push(match marker {
                OverlayMarker::None => 0,
                OverlayMarker::Exit => 1,
                OverlayMarker::Mob => 2,
                OverlayMarker::Flower => 3,
            });
        }
        bytes.extend(self.spawn_point.y.to_le_bytes());
        bytes.extend(self.spawn_point.x.to_le_bytes());
        for rect in [self.spawn_room, self.exit_room].iter().chain(&self.rooms) {
            for value in [rect.x, rect.y, rect.width, rect.height] {
                bytes.extend(value.to_le_bytes());
            }
        }
        bytes.extend((self.mob_spawns.len() as u32).to_le_bytes());
        for spawn in &self.mob_spawns {
            bytes.extend(spawn.y.to_le_bytes());
            bytes.extend(spawn.x.to_le_bytes());
        }
        bytes
    }

    /// Stable hash of `canonical_bytes`, for comparing runs.
    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }

    /// One line per row: `#` wall, `.` floor, `,` dirt, `=` corridor; overlay
    /// `X` exit, `M` mob, `*` flower; `@` marks the spawn point.
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for pos in self.tiles.positions() {
            let glyph = if pos == self.spawn_point {
                '@'
            } else {
                match (self.marker_at(pos), self.tile_at(pos)) {
                    (OverlayMarker::Exit, _) => 'X',
                    (OverlayMarker::Mob, _) => 'M',
                    (OverlayMarker::Flower, _) => '*',
                    (OverlayMarker::None, TileKind::Wall(_)) => '#',
                    (OverlayMarker::None, TileKind::Floor) => '.',
                    (OverlayMarker::None, TileKind::Dirt(_)) => ',',
                    (OverlayMarker::None, TileKind::Corridor) => '=',
                }
            };
            out.push(glyph);
            if pos.x as usize + 1 == self.width {
                out.push('\n');
            }
        }
        out
    }
}
