//! Error types shared by every stage of the pipeline.
//!
//! Validators report through [`ValidationError`] and never abort the process;
//! the caller decides whether a violation ends the run. Everything else
//! surfaces as [`Error`].

use std::path::PathBuf;

use thiserror::Error;

/// A violated data invariant, with enough context to locate the offending input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("no regions loaded")]
    NoRegions,

    #[error("not contiguous: union area exceeds the sum of region areas by a fraction of {frac:e}")]
    NotContiguous { frac: f64 },

    #[error("not disjoint: the sum of region areas exceeds the union area by a fraction of {frac:e}")]
    NotDisjoint { frac: f64 },

    #[error("row {row}: origin {value:?} is not the tower prefix followed by digits")]
    MalformedOrigin { row: usize, value: String },

    #[error("row {row}: destination {value:?} is not the tower prefix followed by digits")]
    MalformedDestination { row: usize, value: String },

    #[error("row {row}: count {value:?} is not a non-negative integer")]
    MalformedCount { row: usize, value: String },

    #[error("row {row}: origin {origin} follows origin {previous}")]
    OriginDecreased { row: usize, origin: usize, previous: usize },

    #[error("row {row}: destination {destination} does not increase past {previous} for origin {origin}")]
    DestinationNotIncreasing { row: usize, origin: usize, destination: usize, previous: usize },

    #[error("row {row} is {found}, but expected origin {origin} and destination {destination}")]
    UnexpectedRow { row: usize, found: String, origin: usize, destination: usize },

    #[error("expected {expected} rows for {n_towers} towers, found {found}")]
    RowCount { n_towers: usize, expected: usize, found: usize },

    #[error("duplicate record for origin {origin} and destination {destination}")]
    DuplicatePair { origin: usize, destination: usize },

    #[error("record ({origin}, {destination}) is out of range for {n_towers} towers")]
    IndexOutOfRange { origin: usize, destination: usize, n_towers: usize },

    #[error("tower row {row} is named {name:?}, expected {expected:?}")]
    TowerNameMismatch { row: usize, name: String, expected: String },

    #[error("tower {tower} at ({x}, {y}) is not inside cell {tower}")]
    TowerOutsideCell { tower: usize, x: f64, y: f64 },

    #[error("{count} towers but {cells} cells")]
    TowerCellCount { count: usize, cells: usize },

    #[error("no rows found")]
    Empty,
}

/// Errors raised while loading, computing, or persisting matrices.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("format error: {0}")]
    Format(String),

    #[error("invalid data: {0}")]
    Invalid(#[from] ValidationError),

    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("computation cancelled: {0} exceeded its deadline")]
    Cancelled(&'static str),
}

impl Error {
    /// Wrap an I/O error with the path it occurred on.
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    pub(crate) fn format(msg: impl Into<String>) -> Self {
        Self::Format(msg.into())
    }
}

/// Shorthand result type for the pipeline.
pub type Result<T> = std::result::Result<T, Error>;
