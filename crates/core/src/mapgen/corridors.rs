//! Corridor connection along every edge of the partition tree.

use crate::types::{Pos, Rect, Terrain};

use super::grid::Grid;
use super::partition::PartitionNode;

const CORRIDOR_THICKNESS: i32 = 2;

/// Joins the centres of each internal node's children with an L-shaped,
/// two-cell-wide corridor. Only wall cells are overwritten.
pub fn connect(node: &PartitionNode, grid: &mut Grid<Terrain>) {
    let PartitionNode::Internal { left, right, .. } = node else {
        return;
    };

    for segment in corridor_segments(left.rect().center(), right.rect().center()) {
        carve_segment(grid, segment);
    }

    connect(left, grid);
    connect(right, grid);
}

/// The horizontal run sits on `to`'s row; the vertical run on `from`'s column.
pub(super) fn corridor_segments(from: Pos, to: Pos) -> [Rect; 2] {
    let horizontal = Rect::new(
        from.x.min(to.x),
        to.y,
        from.x.abs_diff(to.x) as i32 + 1,
        CORRIDOR_THICKNESS,
    );
    let vertical =
        Rect::new(from.x, from.y.min(to.y), CORRIDOR_THICKNESS, from.y.abs_diff(to.y) as i32);
    [horizontal, vertical]
}

fn carve_segment(grid: &mut Grid<Terrain>, segment: Rect) {
    for y in segment.y..segment.bottom() {
        for x in segment.x..segment.right() {
            if grid.get(x, y) == Some(Terrain::Wall) {
                grid.set(x, y, Terrain::Corridor);
            }
        }
    }
}
