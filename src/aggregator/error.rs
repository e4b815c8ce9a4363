//! Error kinds for the aggregation engine (spec §7).

use std::fmt;

/// Failure modes surfaced by the aggregator's internals.
///
/// Every fallible engine entry point (`executor`, `converter`, `merger`,
/// `spill`, `checkpoint`) returns `Result<T, AggError>`; callers at the
/// `PCollection`/`Runner` boundary convert this into `anyhow::Error` via `?`.
#[derive(Debug)]
pub enum AggError {
    /// A method/variant tag was used that the dispatch table does not know
    /// about. Always a programming error.
    UnknownVariant(&'static str),
    /// Allocation failed, or the configured temp-file disk budget was
    /// exceeded before a spill could complete.
    NotEnoughSpace(String),
    /// `max_rows_to_group_by` was exceeded under `OverflowMode::Throw`.
    TooManyRows { limit: usize },
    /// An operation that requires at least one row was given none.
    EmptyData,
    /// The merger was asked to combine two `Variants` with different method
    /// tags.
    CannotMergeDifferentVariants,
    /// An invariant the engine relies on was violated.
    LogicalError(String),
    /// Checkpoint recovery failed (e.g. aggregate-count mismatch).
    RecoverCheckpointFailed(String),
    /// The requested aggregate function is not applicable to the given
    /// argument types.
    AggregateNotApplicable(String),
}

impl fmt::Display for AggError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownVariant(tag) => write!(f, "unknown variant tag: {tag}"),
            Self::NotEnoughSpace(msg) => write!(f, "not enough space: {msg}"),
            Self::TooManyRows { limit } => write!(f, "too many rows (limit {limit})"),
            Self::EmptyData => write!(f, "empty data"),
            Self::CannotMergeDifferentVariants => {
                write!(f, "cannot merge variants with different method tags")
            }
            Self::LogicalError(msg) => write!(f, "logical error: {msg}"),
            Self::RecoverCheckpointFailed(msg) => write!(f, "recover checkpoint failed: {msg}"),
            Self::AggregateNotApplicable(msg) => write!(f, "aggregate not applicable: {msg}"),
        }
    }
}

impl std::error::Error for AggError {}

pub type AggResult<T> = Result<T, AggError>;
