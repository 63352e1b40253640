//! Error types for the split engine.

use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, SplitError>;

/// Errors that can occur while loading a trip or writing reports.
///
/// Arithmetic never fails: zero-participant expenses and unbalanced payers are
/// absorbed by the ledger and only logged.
#[derive(Error, Debug)]
pub enum SplitError {
    /// Failed to open or read the input file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Trip snapshot is not valid JSON or has the wrong shape
    #[error("Invalid trip JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV report writing error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The same traveler name appears twice in the trip
    #[error("Duplicate traveler name {name:?}")]
    DuplicateTraveler { name: String },

    /// Missing input file argument
    #[error("Missing input file argument. Usage: trip-settle <trip.json> [settlements|balances|summary]")]
    MissingArgument,

    /// Report name not recognised
    #[error("Unknown report {0:?}. Expected one of: settlements, balances, summary")]
    UnknownReport(String),
}
