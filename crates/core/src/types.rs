use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

/// Axis-aligned integer rectangle. `right()` and `bottom()` are exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(self) -> i32 {
        self.y + self.height
    }

    pub fn area(self) -> i64 {
        i64::from(self.width) * i64::from(self.height)
    }

    pub fn center(self) -> Pos {
        Pos { y: self.y + self.height / 2, x: self.x + self.width / 2 }
    }

    pub fn contains(self, pos: Pos) -> bool {
        pos.x >= self.x && pos.x < self.right() && pos.y >= self.y && pos.y < self.bottom()
    }

    pub fn intersects(self, other: Self) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// True when `inner` sits inside `self` with at least `margin` cells on every side.
    pub fn contains_with_margin(self, inner: Self, margin: i32) -> bool {
        inner.x - self.x >= margin
            && inner.y - self.y >= margin
            && self.right() - inner.right() >= margin
            && self.bottom() - inner.bottom() >= margin
    }
}

/// Base terrain written by carving, corridor connection, erosion and dirt placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Terrain {
    Wall,
    Floor,
    Corridor,
    Dirt,
}

/// Classified tile. Wall and dirt carry their 8-neighbor autotile mask.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    Wall(u8),
    Floor,
    Corridor,
    Dirt(u8),
}

impl TileKind {
    pub fn is_walkable(self) -> bool {
        !matches!(self, Self::Wall(_))
    }

    /// Mobs are kept inside rooms: corridors block them as walls do.
    pub fn blocks_mobs(self) -> bool {
        matches!(self, Self::Wall(_) | Self::Corridor)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OverlayMarker {
    #[default]
    None,
    Exit,
    Mob,
    Flower,
}
