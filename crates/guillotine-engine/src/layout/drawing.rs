use serde::{Deserialize, Serialize};

use crate::{Axis, Board, LayoutTree, Node};

/// A placed demand board in absolute sheet coordinates.
///
/// The origin is the top-left corner of the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    /// Index of the board in the demand list.
    pub demand: usize,
    pub rotated: bool,
}

/// Flattened form of a [`LayoutTree`], ready for rendering or serialization.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Drawing {
    /// The consumed sheet size.
    pub sheet: Board,
    pub boxes: Vec<Rect>,
}

impl LayoutTree {
    /// Flattens the tree into one absolute rectangle per demand board.
    ///
    /// The second child of a horizontal stack is shifted right by the width
    /// of the first child; the second child of a vertical stack is shifted
    /// down by its height.
    #[must_use]
    pub fn draw(&self) -> Drawing {
        let nodes = self.nodes();
        let Some(root) = nodes.len().checked_sub(1) else {
            return Drawing::default();
        };

        let mut boxes = Vec::with_capacity(nodes.len() / 2 + 1);
        let mut pending = vec![(root, 0, 0)];
        while let Some((index, x, y)) = pending.pop() {
            match nodes[index] {
                Node::Leaf {
                    demand,
                    rotated,
                    board,
                } => boxes.push(Rect {
                    x,
                    y,
                    width: board.width,
                    height: board.height,
                    demand,
                    rotated,
                }),
                Node::Stack {
                    axis,
                    first,
                    second,
                    ..
                } => {
                    let offset = nodes[first].board();
                    let (sx, sy) = match axis {
                        Axis::Horizontal => (x + offset.width, y),
                        Axis::Vertical => (x, y + offset.height),
                    };
                    pending.push((second, sx, sy));
                    pending.push((first, x, y));
                }
            }
        }

        Drawing {
            sheet: nodes[root].board(),
            boxes,
        }
    }
}
