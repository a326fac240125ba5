use crate::{Axis, Board, CutSpec, Genotype};

/// A node of a [`LayoutTree`].
///
/// Child links are indices into the owning tree's node arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node {
    /// A single demand board, as placed.
    Leaf {
        /// Index of the board in the [`CutSpec`] demand list.
        demand: usize,
        rotated: bool,
        board: Board,
    },
    /// Two sub-layouts joined along `axis`.
    Stack {
        axis: Axis,
        first: usize,
        second: usize,
        board: Board,
    },
}

impl Node {
    /// The bounding board of the subtree rooted at this node.
    #[must_use]
    pub fn board(&self) -> Board {
        match *self {
            Self::Leaf { board, .. } | Self::Stack { board, .. } => board,
        }
    }
}

/// A placed demand board, as yielded by [`LayoutTree::leaves`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Leaf {
    pub demand: usize,
    pub rotated: bool,
    pub board: Board,
}

/// Guillotine-cut arrangement decoded from a [`Genotype`].
///
/// The tree is stored as an arena: children always precede their parent and
/// the last node is the root. Every demand board of the spec appears in
/// exactly one leaf.
///
/// # Example
///
/// ```
/// use guillotine_engine::{Axis, Board, CutSpec, Gene, Genotype, LayoutTree, PickConfig};
///
/// let mut spec = CutSpec::new(500);
/// spec.add(200, 100).add(150, 100).add(50, 50);
/// let genotype = Genotype::from_fn(spec.len(), |_| Gene {
///     weight: 0,
///     config: PickConfig { rotated: false, axis: Axis::Horizontal },
/// });
///
/// let tree = LayoutTree::decode(&spec, &genotype);
/// assert_eq!(tree.root_board(), Some(Board::new(400, 100)));
/// assert_eq!(tree.area(), 40_000);
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LayoutTree {
    nodes: Vec<Node>,
}

impl LayoutTree {
    /// Decodes `genotype` into a layout of the boards in `spec`.
    ///
    /// Boards are picked in [`Genotype::pick_order`], each oriented by its
    /// config gene and joined to the layout built so far along its preferred
    /// axis. If that result violates [`CutSpec::fits`], the other axis is
    /// tried; if neither fits, the preferred result is kept. Decoding never
    /// fails.
    ///
    /// # Panics
    ///
    /// Panics if the genotype length differs from the number of demand boards.
    #[must_use]
    pub fn decode(spec: &CutSpec, genotype: &Genotype) -> Self {
        assert_eq!(
            spec.len(),
            genotype.len(),
            "genotype length must match the demand list"
        );

        let genes = genotype.genes();
        let boards = spec.boards();
        let mut nodes = Vec::with_capacity((2 * boards.len()).saturating_sub(1));
        let push_leaf = |nodes: &mut Vec<Node>, demand: usize| {
            let config = genes[demand].config;
            nodes.push(Node::Leaf {
                demand,
                rotated: config.rotated,
                board: config.orient(boards[demand]),
            });
            nodes.len() - 1
        };

        let mut order = genotype.pick_order().into_iter();
        let Some(first) = order.next() else {
            return Self { nodes };
        };
        let mut root = push_leaf(&mut nodes, first);

        for demand in order {
            let leaf = push_leaf(&mut nodes, demand);
            let current = nodes[root].board();
            let piece = nodes[leaf].board();
            let preferred = genes[demand].config.axis;
            let (axis, board) = [preferred, preferred.other()]
                .into_iter()
                .map(|axis| (axis, axis.stack(current, piece)))
                .find(|(_, board)| spec.fits_board(*board))
                .unwrap_or_else(|| (preferred, preferred.stack(current, piece)));
            nodes.push(Node::Stack {
                axis,
                first: root,
                second: leaf,
                board,
            });
            root = nodes.len() - 1;
        }

        Self { nodes }
    }

    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    #[must_use]
    pub fn root(&self) -> Option<&Node> {
        self.nodes.last()
    }

    /// The consumed sheet footprint, or `None` for an empty layout.
    #[must_use]
    pub fn root_board(&self) -> Option<Board> {
        self.root().map(Node::board)
    }

    /// Area of the consumed sheet; zero for an empty layout.
    #[must_use]
    pub fn area(&self) -> u64 {
        self.root_board().map_or(0, Board::area)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates over the placed demand boards in pick order.
    pub fn leaves(&self) -> impl Iterator<Item = Leaf> + '_ {
        self.nodes.iter().filter_map(|node| match *node {
            Node::Leaf {
                demand,
                rotated,
                board,
            } => Some(Leaf {
                demand,
                rotated,
                board,
            }),
            Node::Stack { .. } => None,
        })
    }
}
