//! Error types for Quarry.
//!
//! Every category is fatal: the coordinator reports the error and exits
//! non-zero rather than continue with partial state.

use thiserror::Error;

/// Result type for Quarry operations.
pub type Result<T> = std::result::Result<T, QuarryError>;

/// Errors that can occur while setting up or running a simulation.
#[derive(Error, Debug)]
pub enum QuarryError {
    /// The startup description failed to parse or validate.
    #[error("Malformed input: {0}")]
    MalformedInput(#[from] ScenarioError),
    /// A channel or agent process could not be created, signalled or reaped.
    #[error("Supervision failure: {0}")]
    Supervision(#[from] SupervisionError),
    /// A message on an agent channel was short or invalid.
    #[error("Protocol violation: {0}")]
    Protocol(#[from] ProtocolError),
    /// Other I/O failures (rendering, channel writes).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Startup description errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScenarioError {
    #[error("unexpected end of input while reading {0}")]
    UnexpectedEnd(&'static str),
    #[error("invalid {field}: {token:?}")]
    InvalidNumber { field: &'static str, token: String },
    #[error("{field} must be at least {min}, got {value}")]
    OutOfRange {
        field: &'static str,
        min: i64,
        value: i64,
    },
    #[error("{what} at ({row}, {col}) lies outside the {width}x{height} grid")]
    OutsideGrid {
        what: &'static str,
        row: i32,
        col: i32,
        width: i32,
        height: i32,
    },
    #[error("{what} at ({row}, {col}) overlaps another entity")]
    Overlap {
        what: &'static str,
        row: i32,
        col: i32,
    },
    #[error("{width}x{height} grid exceeds the limit of {max} cells")]
    GridTooLarge { width: i64, height: i64, max: i64 },
    #[error("trailing input: {0:?}")]
    TrailingInput(String),
}

/// Process and channel supervision errors.
#[derive(Error, Debug)]
pub enum SupervisionError {
    #[error("failed to create channel for {kind}: {source}")]
    Channel {
        kind: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to start {kind} program {program}: {source}")]
    Spawn {
        kind: &'static str,
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to signal process {pid}: {source}")]
    Kill {
        pid: u32,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to wait for process {pid}: {source}")]
    Wait {
        pid: u32,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to poll agent channels: {0}")]
    Poll(#[source] std::io::Error),
}

/// Wire protocol errors.
#[derive(Error, Debug)]
pub enum ProtocolError {
    /// The peer closed the channel or stopped mid-record.
    #[error("truncated {record}: expected {expected} bytes, got {got}")]
    Truncated {
        record: &'static str,
        expected: usize,
        got: usize,
    },
    #[error("blocked count {0} outside 0..=4")]
    BlockedCount(i32),
    #[error("read failed: {0}")]
    Read(#[source] std::io::Error),
    #[error("write failed: {0}")]
    Write(#[source] std::io::Error),
}

