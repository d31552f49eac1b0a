/// Error types for loading the district and observation tables
use thiserror::Error;

/// Which of the two source tables an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Aggregated,
    Unaggregated,
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Table::Aggregated => write!(f, "aggregated"),
            Table::Unaggregated => write!(f, "unaggregated"),
        }
    }
}

/// Failure to load a source table. Always fatal at startup.
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// Source file missing or unreadable
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse CSV
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A required header is absent
    #[error("The {table} table is missing required column `{column}`")]
    MissingColumn { table: Table, column: &'static str },

    /// A cell could not be parsed into its field type
    #[error("Invalid value {value:?} for column `{column}` in the {table} table (line {line})")]
    InvalidValue {
        table: Table,
        column: &'static str,
        line: u64,
        value: String,
    },

    /// The boundary of a district could not be parsed
    #[error("Invalid geometry for district {district}: {reason}")]
    InvalidGeometry { district: String, reason: String },

    /// Two aggregated rows share one district id
    #[error("District {0} appears more than once in the aggregated table")]
    DuplicateDistrict(String),

    /// The in-memory store rejected the data
    #[error("Failed to store dataset: {0}")]
    Storage(String),
}

/// Type alias for Results using DataLoadError
pub type Result<T> = std::result::Result<T, DataLoadError>;
