//! Room carving: one randomly sized room per partition leaf.

use crate::config::GeneratorConfig;
use crate::types::{Rect, Terrain};

use super::grid::Grid;
use super::rng::DungeonRng;

/// Carves rooms into a shared base grid and remembers the smallest one.
pub struct RoomCarver<'a> {
    grid: &'a mut Grid<Terrain>,
    min_room_size: i32,
    max_room_size: i32,
    padding: i32,
    rooms: Vec<Rect>,
    smallest: Option<usize>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CarvedRooms {
    /// Every carved room, in carving order.
    pub rooms: Vec<Rect>,
    /// Index of the first room with the minimum area.
    pub smallest: usize,
}

impl CarvedRooms {
    pub fn spawn_room(&self) -> Rect {
        self.rooms[self.smallest]
    }

    /// All rooms except the spawn room, keeping carving order.
    pub fn listed_rooms(&self) -> Vec<Rect> {
        self.rooms
            .iter()
            .enumerate()
            .filter(|&(index, _)| index != self.smallest)
            .map(|(_, room)| *room)
            .collect()
    }
}

impl<'a> RoomCarver<'a> {
    pub fn new(grid: &'a mut Grid<Terrain>, config: &GeneratorConfig) -> Self {
        Self {
            grid,
            min_room_size: config.min_room_size,
            max_room_size: config.max_room_size,
            padding: config.padding,
            rooms: Vec::new(),
            smallest: None,
        }
    }

    pub fn carve_room(&mut self, leaf: Rect, rng: &mut DungeonRng) -> Rect {
        let width = rng.range_inclusive(
            self.min_room_size,
            (leaf.width - 2 * self.padding).min(self.max_room_size),
        );
        let x = place_on_axis(leaf.x, leaf.width, width, self.padding, rng);
        let height = rng.range_inclusive(
            self.min_room_size,
            (leaf.height - 2 * self.padding).min(self.max_room_size),
        );
        let y = place_on_axis(leaf.y, leaf.height, height, self.padding, rng);
        let room = Rect::new(x, y, width, height);

        for row in room.y..room.bottom() {
            for column in room.x..room.right() {
                self.grid.set(column, row, Terrain::Floor);
            }
        }

        let is_smaller = self.smallest.is_none_or(|index| room.area() < self.rooms[index].area());
        if is_smaller {
            self.smallest = Some(self.rooms.len());
        }
        self.rooms.push(room);
        room
    }

    /// Returns `None` when no leaf was carved.
    pub fn finish(self) -> Option<CarvedRooms> {
        let smallest = self.smallest?;
        Some(CarvedRooms { rooms: self.rooms, smallest })
    }
}

/// Picks the room origin along one axis.
///
/// Rooms shorter than half the leaf straddle the leaf centre; the window is
/// clipped to the padding bounds so the margin holds for any leaf size.
/// Longer rooms take a random offset inside the padded span.
fn place_on_axis(
    leaf_start: i32,
    leaf_len: i32,
    room_len: i32,
    padding: i32,
    rng: &mut DungeonRng,
) -> i32 {
    let lowest = leaf_start + padding;
    let highest = leaf_start + leaf_len - padding - room_len;
    if room_len * 2 < leaf_len {
        let center = leaf_start + leaf_len / 2;
        let low = (center - room_len + 1).max(lowest);
        let high = (center - 1).min(highest);
        rng.range_inclusive(low, high)
    } else {
        lowest + rng.range_inclusive(0, leaf_len - room_len - 2 * padding)
    }
}
