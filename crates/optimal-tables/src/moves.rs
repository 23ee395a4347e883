//! Move sets for the operator and switch puzzles.
//!
//! A move set is an ordered list of pure transitions. Each transition either
//! yields a new in-domain state or `None`, which the engine treats as "no
//! edge". Results are never clamped or wrapped.

use std::fmt;

use smallvec::SmallVec;

use crate::codec::{GridShape, Triple, TripleBounds};

/// Ordered collection of deterministic state transitions.
pub trait MoveSet {
    type State: Copy;
    /// Domain the moves validate against; must equal the codec's bounds.
    type Bounds: Copy + PartialEq + fmt::Debug;

    fn bounds(&self) -> Self::Bounds;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Apply move `index` to `state`. `None` means the result leaves the domain.
    fn apply(&self, index: usize, state: Self::State) -> Option<Self::State>;
}

/// The eight operator puzzle buttons, in table-generation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TripleMove {
    Increment,
    Decrement,
    Zero,
    /// `(a, b, c) -> (c, b, a)`
    RotateLeft,
    /// `(a, b, c) -> (c, a, b)`
    RotateRight,
    Negate,
    Sum,
    Product,
}

impl TripleMove {
    pub const ALL: [TripleMove; 8] = [
        TripleMove::Increment,
        TripleMove::Decrement,
        TripleMove::Zero,
        TripleMove::RotateLeft,
        TripleMove::RotateRight,
        TripleMove::Negate,
        TripleMove::Sum,
        TripleMove::Product,
    ];

    /// Raw result before bounds checking; `None` only on `i32` overflow.
    pub fn transform(self, s: Triple) -> Option<Triple> {
        let Triple { a, b, c } = s;
        let next = match self {
            TripleMove::Increment => Triple::new(a, b, c.checked_add(1)?),
            TripleMove::Decrement => Triple::new(a, b, c.checked_sub(1)?),
            TripleMove::Zero => Triple::new(a, b, 0),
            TripleMove::RotateLeft => Triple::new(c, b, a),
            TripleMove::RotateRight => Triple::new(c, a, b),
            TripleMove::Negate => Triple::new(a, b, c.checked_neg()?),
            TripleMove::Sum => Triple::new(a, b, a.checked_add(b)?),
            TripleMove::Product => Triple::new(a, b, a.checked_mul(b)?),
        };
        Some(next)
    }
}

/// Operator puzzle moves validated against a component range.
#[derive(Debug, Clone, Default)]
pub struct TripleMoves {
    bounds: TripleBounds,
}

impl TripleMoves {
    pub fn new(bounds: TripleBounds) -> Self {
        Self { bounds }
    }

    pub fn get(&self, index: usize) -> Option<TripleMove> {
        TripleMove::ALL.get(index).copied()
    }
}

impl MoveSet for TripleMoves {
    type State = Triple;
    type Bounds = TripleBounds;

    fn bounds(&self) -> TripleBounds {
        self.bounds
    }

    fn len(&self) -> usize {
        TripleMove::ALL.len()
    }

    fn apply(&self, index: usize, state: Triple) -> Option<Triple> {
        let next = self.get(index)?.transform(state)?;
        let in_range = self.bounds.contains(next.a)
            && self.bounds.contains(next.b)
            && self.bounds.contains(next.c);
        in_range.then_some(next)
    }
}

/// Toggle shapes for the switch puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridPattern {
    /// 3x3 block around the anchor.
    Block,
    /// Anchor plus its orthogonal neighbours.
    Plus,
    /// Anchor plus its diagonal neighbours.
    Cross,
}

impl GridPattern {
    pub const ALL: [GridPattern; 3] = [GridPattern::Block, GridPattern::Plus, GridPattern::Cross];

    /// `(dx, dy)` offsets from the anchor.
    pub fn offsets(self) -> &'static [(i32, i32)] {
        match self {
            GridPattern::Block => &[
                (-1, -1),
                (0, -1),
                (1, -1),
                (-1, 0),
                (0, 0),
                (1, 0),
                (-1, 1),
                (0, 1),
                (1, 1),
            ],
            GridPattern::Plus => &[(0, -1), (-1, 0), (0, 0), (1, 0), (0, 1)],
            GridPattern::Cross => &[(-1, -1), (-1, 1), (0, 0), (1, -1), (1, 1)],
        }
    }

    /// Bit indices toggled when anchored at `(x, y)`; off-grid cells are dropped.
    pub fn cells(self, shape: &GridShape, x: i32, y: i32) -> SmallVec<[usize; 9]> {
        self.offsets()
            .iter()
            .filter_map(|&(dx, dy)| shape.bit(x + dx, y + dy))
            .collect()
    }

    pub fn mask(self, shape: &GridShape, x: i32, y: i32) -> u32 {
        self.cells(shape, x, y)
            .into_iter()
            .fold(0, |mask, bit| mask | (1u32 << bit))
    }
}

/// One pattern anchored at one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridMove {
    pub pattern: GridPattern,
    pub x: i32,
    pub y: i32,
}

/// Switch puzzle moves: every pattern at every anchor, as precomputed XOR masks.
///
/// Ordered pattern-major, then row `x`, then column `y`.
#[derive(Debug, Clone)]
pub struct GridMoves {
    shape: GridShape,
    moves: Vec<GridMove>,
    masks: Vec<u32>,
}

impl GridMoves {
    pub fn new(shape: GridShape) -> Self {
        let mut moves = Vec::with_capacity(GridPattern::ALL.len() * shape.cells());
        for pattern in GridPattern::ALL {
            for x in 0..shape.rows() as i32 {
                for y in 0..shape.cols() as i32 {
                    moves.push(GridMove { pattern, x, y });
                }
            }
        }
        let masks = moves
            .iter()
            .map(|m| m.pattern.mask(&shape, m.x, m.y))
            .collect();
        Self {
            shape,
            moves,
            masks,
        }
    }

    pub fn get(&self, index: usize) -> Option<GridMove> {
        self.moves.get(index).copied()
    }

    pub fn mask(&self, index: usize) -> Option<u32> {
        self.masks.get(index).copied()
    }
}

impl Default for GridMoves {
    fn default() -> Self {
        Self::new(GridShape::default())
    }
}

impl MoveSet for GridMoves {
    type State = u32;
    type Bounds = GridShape;

    fn bounds(&self) -> GridShape {
        self.shape
    }

    fn len(&self) -> usize {
        self.masks.len()
    }

    fn apply(&self, index: usize, state: u32) -> Option<u32> {
        self.mask(index).map(|mask| state ^ mask)
    }
}
