//! Offline optimal-move tables for the operator and switch puzzles.
//!
//! This crate runs a breadth-first search from each puzzle's canonical
//! start over its whole state space, and writes the minimum move count
//! of every state to disk for constant-time lookup by the puzzle pages.

pub mod codec;
pub mod engine;
pub mod error;
pub mod moves;
pub mod run;
pub mod serialize;
pub mod table;

// Re-export main types
pub use codec::{GridCodec, GridShape, StateCodec, Triple, TripleBounds, TripleCodec};
pub use engine::{BfsEngine, NoProgress, ProgressSink, TracingProgress, Traversal, TraversalStats};
pub use error::{Error, Result};
pub use moves::{GridMove, GridMoves, GridPattern, MoveSet, TripleMove, TripleMoves};
pub use run::{run, Puzzle, PuzzleKind, RunConfig, RunSummary};
pub use serialize::{load_table, write_table, Layout, FLAT_UNIT_NAME};
pub use table::{DistanceTable, UNREACHED};
