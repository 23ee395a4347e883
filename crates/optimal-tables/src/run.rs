//! The compute-and-serialize pipeline for one puzzle.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::codec::{GridCodec, GridShape, StateCodec, TripleBounds, TripleCodec};
use crate::engine::{BfsEngine, TracingProgress, TraversalStats};
use crate::error::{Error, Result};
use crate::moves::{GridMoves, MoveSet, TripleMoves};
use crate::serialize::{load_table, prepare_output_dir, write_table, Layout};
use crate::table::DistanceTable;

/// Which puzzle to tabulate, with its domain bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Puzzle {
    /// Three bounded integers, written one file per first number.
    Operator(TripleBounds),
    /// Toggle grid, written as a single flat file.
    Switch(GridShape),
}

impl Puzzle {
    pub fn kind(&self) -> PuzzleKind {
        match self {
            Puzzle::Operator(_) => PuzzleKind::Operator,
            Puzzle::Switch(_) => PuzzleKind::Switch,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PuzzleKind {
    Operator,
    Switch,
}

/// Configuration for a single run
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub puzzle: Puzzle,
    /// Directory receiving the table units
    pub output_dir: PathBuf,
    /// States between progress log lines (0 disables)
    pub progress_interval: usize,
    /// Re-read the written units and compare with the computed table
    pub verify: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            puzzle: Puzzle::Operator(TripleBounds::default()),
            output_dir: PathBuf::from("optimal"),
            progress_interval: 10_000,
            verify: false,
        }
    }
}

/// Report of a completed run
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub puzzle: PuzzleKind,
    pub state_count: usize,
    pub reached: usize,
    pub unreached: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_distance: Option<i32>,
    /// States per distance, index = distance
    pub histogram: Vec<usize>,
    pub traversal: TraversalStats,
    pub output_dir: PathBuf,
    pub files: Vec<PathBuf>,
    pub verified: bool,
}

/// Traverse, then write the table. Nothing is written unless the traversal completes.
pub fn run(config: &RunConfig) -> Result<RunSummary> {
    match config.puzzle {
        Puzzle::Operator(bounds) => {
            let codec = TripleCodec::new(bounds);
            let moves = TripleMoves::new(bounds);
            let layout = Layout::by_first_component(&codec);
            tabulate(config, &codec, &moves, &layout)
        }
        Puzzle::Switch(shape) => {
            let codec = GridCodec::new(shape);
            let moves = GridMoves::new(shape);
            tabulate(config, &codec, &moves, &Layout::Flat)
        }
    }
}

fn tabulate<C, M>(config: &RunConfig, codec: &C, moves: &M, layout: &Layout) -> Result<RunSummary>
where
    C: StateCodec,
    M: MoveSet<State = C::State, Bounds = C::Bounds>,
{
    info!(puzzle = ?config.puzzle.kind(), states = codec.state_count(), "computing distances");

    let engine = BfsEngine::new(codec, moves)?;
    let mut progress = TracingProgress::every(config.progress_interval);
    let traversal = engine.run(&mut progress)?;
    let table = traversal.table;

    info!(dir = %config.output_dir.display(), "writing to output folder");
    prepare_output_dir(&config.output_dir)?;
    let files = write_table(&table, layout, &config.output_dir)?;

    if config.verify {
        verify_written(&table, layout, &config.output_dir)?;
        info!("output verified");
    }

    let reached = table.reached();
    Ok(RunSummary {
        puzzle: config.puzzle.kind(),
        state_count: table.len(),
        reached,
        unreached: table.len() - reached,
        max_distance: table.max_distance(),
        histogram: table.histogram(),
        traversal: traversal.stats,
        output_dir: config.output_dir.clone(),
        files,
        verified: config.verify,
    })
}

/// Read the units back and require an entry-for-entry match.
pub fn verify_written(table: &DistanceTable, layout: &Layout, dir: &Path) -> Result<()> {
    let loaded = load_table(dir, layout, table.len())?;
    match table
        .entries()
        .iter()
        .zip(loaded.entries())
        .position(|(expected, found)| expected != found)
    {
        Some(index) => Err(Error::VerifyMismatch {
            dir: dir.to_path_buf(),
            index,
        }),
        None => Ok(()),
    }
}
