//! State codecs: dense, order-preserving indices for puzzle states.
//!
//! A codec fixes the size of the state space and maps every in-domain
//! state to exactly one table index (and back). Out-of-domain states are
//! the move set's problem, not the codec's.

use std::fmt;

use serde::Serialize;

use crate::error::{Error, Result};

/// Largest grid (in cells) whose distance table we are willing to allocate.
pub const MAX_GRID_CELLS: usize = 24;

/// Bijection between a finite state domain and `[0, state_count())`.
pub trait StateCodec {
    type State: Copy + PartialEq + fmt::Debug;
    /// Domain description shared with the move set.
    type Bounds: Copy + PartialEq + fmt::Debug;

    fn bounds(&self) -> Self::Bounds;

    /// Number of encodable states (the table length).
    fn state_count(&self) -> usize;

    /// Canonical start state, recorded at distance 0.
    fn start(&self) -> Self::State;

    fn contains(&self, state: Self::State) -> bool;

    /// Table index of an in-domain state.
    fn encode(&self, state: Self::State) -> usize;

    /// State stored at `index`, for `index < state_count()`.
    fn decode(&self, index: usize) -> Self::State;
}

/// Operator puzzle state: three bounded integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Triple {
    pub a: i32,
    pub b: i32,
    pub c: i32,
}

impl Triple {
    pub fn new(a: i32, b: i32, c: i32) -> Self {
        Self { a, b, c }
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.a, self.b, self.c)
    }
}

/// Inclusive value range shared by all three components of a [`Triple`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TripleBounds {
    min: i32,
    max: i32,
}

impl TripleBounds {
    /// Bounds must contain 0 so that `(0, 0, 0)` is representable.
    pub fn new(min: i32, max: i32) -> Result<Self> {
        if min > 0 || max < 0 {
            return Err(Error::InvalidDomain(format!(
                "component range [{min}, {max}] must contain 0"
            )));
        }
        let bounds = Self { min, max };
        let radix = bounds.radix();
        radix
            .checked_mul(radix)
            .and_then(|sq| sq.checked_mul(radix))
            .ok_or_else(|| {
                Error::InvalidDomain(format!("{radix}^3 states do not fit in an index"))
            })?;
        Ok(bounds)
    }

    pub fn min(&self) -> i32 {
        self.min
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    /// Number of distinct values per component.
    pub fn radix(&self) -> usize {
        (i64::from(self.max) - i64::from(self.min) + 1) as usize
    }

    pub fn contains(&self, value: i32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

impl Default for TripleBounds {
    fn default() -> Self {
        Self { min: -99, max: 99 }
    }
}

/// Mixed-radix codec for [`Triple`]: `a*R^2 + b*R + c` after shifting by `-min`.
#[derive(Debug, Clone)]
pub struct TripleCodec {
    bounds: TripleBounds,
    radix: usize,
}

impl TripleCodec {
    pub fn new(bounds: TripleBounds) -> Self {
        Self {
            bounds,
            radix: bounds.radix(),
        }
    }

    pub fn radix(&self) -> usize {
        self.radix
    }

    fn shift(&self, value: i32) -> usize {
        (i64::from(value) - i64::from(self.bounds.min)) as usize
    }

    fn unshift(&self, digit: usize) -> i32 {
        (digit as i64 + i64::from(self.bounds.min)) as i32
    }
}

impl Default for TripleCodec {
    fn default() -> Self {
        Self::new(TripleBounds::default())
    }
}

impl StateCodec for TripleCodec {
    type State = Triple;
    type Bounds = TripleBounds;

    fn bounds(&self) -> TripleBounds {
        self.bounds
    }

    fn state_count(&self) -> usize {
        self.radix * self.radix * self.radix
    }

    fn start(&self) -> Triple {
        Triple::new(0, 0, 0)
    }

    fn contains(&self, state: Triple) -> bool {
        self.bounds.contains(state.a)
            && self.bounds.contains(state.b)
            && self.bounds.contains(state.c)
    }

    fn encode(&self, state: Triple) -> usize {
        debug_assert!(self.contains(state), "{state} outside {:?}", self.bounds);
        (self.shift(state.a) * self.radix + self.shift(state.b)) * self.radix + self.shift(state.c)
    }

    fn decode(&self, index: usize) -> Triple {
        let c = index % self.radix;
        let b = (index / self.radix) % self.radix;
        let a = index / (self.radix * self.radix);
        Triple::new(self.unshift(a), self.unshift(b), self.unshift(c))
    }
}

/// Dimensions of the switch puzzle grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridShape {
    rows: usize,
    cols: usize,
}

impl GridShape {
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        let cells = rows.saturating_mul(cols);
        if cells == 0 || cells > MAX_GRID_CELLS {
            return Err(Error::InvalidDomain(format!(
                "{rows}x{cols} grid must have between 1 and {MAX_GRID_CELLS} cells"
            )));
        }
        Ok(Self { rows, cols })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cells(&self) -> usize {
        self.rows * self.cols
    }

    /// Bit index of cell `(x, y)` (row `x`, column `y`), or `None` off the grid.
    pub fn bit(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.rows || y as usize >= self.cols {
            return None;
        }
        Some(x as usize * self.cols + y as usize)
    }
}

impl Default for GridShape {
    fn default() -> Self {
        Self { rows: 4, cols: 4 }
    }
}

/// Identity codec: a grid bitset already is its own index.
#[derive(Debug, Clone, Default)]
pub struct GridCodec {
    shape: GridShape,
}

impl GridCodec {
    pub fn new(shape: GridShape) -> Self {
        Self { shape }
    }
}

impl StateCodec for GridCodec {
    type State = u32;
    type Bounds = GridShape;

    fn bounds(&self) -> GridShape {
        self.shape
    }

    fn state_count(&self) -> usize {
        1 << self.shape.cells()
    }

    fn start(&self) -> u32 {
        0
    }

    fn contains(&self, state: u32) -> bool {
        (state as usize) < self.state_count()
    }

    fn encode(&self, state: u32) -> usize {
        state as usize
    }

    fn decode(&self, index: usize) -> u32 {
        index as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triple_default_size() {
        let codec = TripleCodec::default();
        assert_eq!(codec.radix(), 199);
        assert_eq!(codec.state_count(), 7_880_599);
    }

    #[test]
    fn test_triple_encode_corners() {
        let codec = TripleCodec::default();
        assert_eq!(codec.encode(Triple::new(-99, -99, -99)), 0);
        assert_eq!(codec.encode(Triple::new(-99, -99, -98)), 1);
        assert_eq!(codec.encode(Triple::new(-99, -98, -99)), 199);
        assert_eq!(codec.encode(Triple::new(99, 99, 99)), codec.state_count() - 1);
        assert_eq!(codec.encode(Triple::new(0, 0, 0)), 99 * 199 * 199 + 99 * 199 + 99);
    }

    #[test]
    fn test_triple_bijection_small_domain() {
        let codec = TripleCodec::new(TripleBounds::new(-2, 3).unwrap());
        for index in 0..codec.state_count() {
            let state = codec.decode(index);
            assert!(codec.contains(state));
            assert_eq!(codec.encode(state), index);
        }
    }

    #[test]
    fn test_triple_contains() {
        let codec = TripleCodec::default();
        assert!(codec.contains(Triple::new(99, -99, 0)));
        assert!(!codec.contains(Triple::new(100, 0, 0)));
        assert!(!codec.contains(Triple::new(0, 0, -100)));
    }

    #[test]
    fn test_triple_bounds_must_contain_zero() {
        assert!(TripleBounds::new(1, 5).is_err());
        assert!(TripleBounds::new(-5, -1).is_err());
        assert!(TripleBounds::new(0, 0).is_ok());
    }

    #[test]
    fn test_grid_identity() {
        let codec = GridCodec::default();
        assert_eq!(codec.state_count(), 65_536);
        assert_eq!(codec.encode(0xBEEF), 0xBEEF);
        assert_eq!(codec.decode(0x1234), 0x1234);
        assert!(!codec.contains(0x1_0000));
    }

    #[test]
    fn test_grid_bit_layout() {
        let shape = GridShape::default();
        assert_eq!(shape.bit(0, 0), Some(0));
        assert_eq!(shape.bit(0, 3), Some(3));
        assert_eq!(shape.bit(1, 0), Some(4));
        assert_eq!(shape.bit(3, 3), Some(15));
        assert_eq!(shape.bit(-1, 0), None);
        assert_eq!(shape.bit(0, 4), None);
    }

    #[test]
    fn test_oversized_grid_is_invalid_domain() {
        let err = GridShape::new(6, 6).unwrap_err();
        assert!(matches!(err, Error::InvalidDomain(_)));
    }

    #[test]
    fn test_full_i32_range_is_invalid_domain() {
        let err = TripleBounds::new(i32::MIN, i32::MAX).unwrap_err();
        assert!(matches!(err, Error::InvalidDomain(_)));
    }

    #[test]
    fn test_bounds_accessors() {
        let bounds = TripleBounds::default();
        assert_eq!((bounds.min(), bounds.max()), (-99, 99));
        let shape = GridShape::default();
        assert_eq!((shape.rows(), shape.cols(), shape.cells()), (4, 4, 16));
    }

    #[test]
    fn test_grid_shape_limits() {
        assert!(GridShape::new(0, 4).is_err());
        assert!(GridShape::new(5, 5).is_err());
        assert!(GridShape::new(2, 3).is_ok());
    }
}
