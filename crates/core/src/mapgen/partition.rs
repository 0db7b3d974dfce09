//! Binary space partitioning of the map rectangle into room-sized leaves.

use crate::types::Rect;

use super::rng::DungeonRng;

const SPLIT_ASPECT_LIMIT: f64 = 1.5;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PartitionNode {
    Leaf { rect: Rect },
    Internal { rect: Rect, left: Box<PartitionNode>, right: Box<PartitionNode> },
}

impl PartitionNode {
    pub fn rect(&self) -> Rect {
        match self {
            Self::Leaf { rect } | Self::Internal { rect, .. } => *rect,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf { .. })
    }

    pub fn depth(&self) -> usize {
        match self {
            Self::Leaf { .. } => 1,
            Self::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Partition {
    pub tree: PartitionNode,
    /// Leaf rectangles in depth-first, left-before-right order.
    pub leaves: Vec<Rect>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SplitAxis {
    /// Divides the width: children sit side by side.
    Vertical,
    /// Divides the height: children are stacked.
    Horizontal,
}

pub fn partition(root: Rect, min_node_size: i32, rng: &mut DungeonRng) -> Partition {
    let mut leaves = Vec::new();
    let tree = split_node(root, min_node_size, rng, &mut leaves);
    Partition { tree, leaves }
}

fn split_node(
    rect: Rect,
    min_node_size: i32,
    rng: &mut DungeonRng,
    leaves: &mut Vec<Rect>,
) -> PartitionNode {
    let split_limit = 2 * min_node_size;
    if rect.width <= split_limit && rect.height <= split_limit {
        leaves.push(rect);
        return PartitionNode::Leaf { rect };
    }

    let (first, second) = match choose_axis(rect, split_limit, rng) {
        SplitAxis::Vertical => {
            let first_width = rng.range_inclusive(min_node_size, rect.width - min_node_size);
            (
                Rect::new(rect.x, rect.y, first_width, rect.height),
                Rect::new(rect.x + first_width, rect.y, rect.width - first_width, rect.height),
            )
        }
        SplitAxis::Horizontal => {
            let first_height = rng.range_inclusive(min_node_size, rect.height - min_node_size);
            (
                Rect::new(rect.x, rect.y, rect.width, first_height),
                Rect::new(rect.x, rect.y + first_height, rect.width, rect.height - first_height),
            )
        }
    };

    let left = split_node(first, min_node_size, rng, leaves);
    let right = split_node(second, min_node_size, rng, leaves);
    PartitionNode::Internal { rect, left: Box::new(left), right: Box::new(right) }
}

fn choose_axis(rect: Rect, split_limit: i32, rng: &mut DungeonRng) -> SplitAxis {
    let width = f64::from(rect.width);
    let height = f64::from(rect.height);
    if width / height > SPLIT_ASPECT_LIMIT {
        SplitAxis::Vertical
    } else if height / width > SPLIT_ASPECT_LIMIT {
        SplitAxis::Horizontal
    } else if rect.width > split_limit && rect.height > split_limit {
        if rng.coin() { SplitAxis::Horizontal } else { SplitAxis::Vertical }
    } else if rect.height > split_limit {
        SplitAxis::Horizontal
    } else {
        SplitAxis::Vertical
    }
}
