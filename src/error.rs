//! Error types for loading, selection and rendering

use std::path::PathBuf;

use thiserror::Error;

/// Required columns that are absent from the source header
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing required column(s): {}", .missing.join(", "))]
pub struct SchemaError {
    pub missing: Vec<String>,
}

/// Fatal errors raised while loading the dataset
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot open '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("column '{column}' has no parseable timestamps")]
    UnparseableColumn { column: &'static str },
}

/// A visualization mode name that matches none of the known modes
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown visualization mode '{0}'")]
pub struct InvalidModeError(pub String);

/// A date-range or month selection that cannot be resolved against the axis
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("date range {lo}..={hi} is outside the month axis (0..={max})")]
    OutOfRange { lo: usize, hi: usize, max: usize },

    #[error("month {0} is not on the month axis ({1} to {2})")]
    MonthNotOnAxis(String, String, String),

    #[error("invalid month '{0}' (expected YYYY-MM)")]
    BadMonth(String),

    #[error("dataset has no publish dates, month axis is empty")]
    EmptyAxis,
}

/// Chart rendering failure
#[derive(Debug, Error)]
#[error("failed to render chart: {0}")]
pub struct RenderError(pub String);
