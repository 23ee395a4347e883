//! Error type shared by every stage of the table pipeline.
//!
//! Nothing here is recoverable mid-run: any error means the output
//! directory must be discarded and the run repeated from scratch.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while configuring, traversing, writing or reading tables.
#[derive(Debug, Error)]
pub enum Error {
    /// Bounds that cannot describe a state domain.
    #[error("invalid domain: {0}")]
    InvalidDomain(String),

    /// Codec and move set were configured for different domains.
    #[error("codec bounds {codec} disagree with move set bounds {moves}")]
    BoundsMismatch { codec: String, moves: String },

    /// The canonical start state cannot be encoded.
    #[error("start state {0} lies outside the codec domain")]
    StartOutOfDomain(String),

    /// The distance table could not be reserved.
    #[error("cannot allocate a distance table of {states} entries")]
    Allocation { states: usize },

    /// A distance no longer fits the table entry type.
    #[error("distance overflow after depth {0}")]
    DistanceOverflow(i32),

    /// Filesystem failure while preparing, writing or reading output.
    #[error("io error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A table unit holds something other than a signed integer.
    #[error("malformed entry {entry:?} at position {position} in {}", path.display())]
    Parse {
        path: PathBuf,
        position: usize,
        entry: String,
    },

    /// A table unit holds the wrong number of entries.
    #[error("{} holds {found} entries, expected {expected}", path.display())]
    UnitLength {
        path: PathBuf,
        found: usize,
        expected: usize,
    },

    /// Output read back from disk differs from the table that was written.
    #[error("table read back from {} differs at index {index}", dir.display())]
    VerifyMismatch { dir: PathBuf, index: usize },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
