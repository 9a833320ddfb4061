use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::types::LegacyCode;

/// Legacy code that cannot be mapped into the derived identifier space.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    /// Code matches no supported legacy form.
    #[error("legacy code '{0}' is not a numeric, dash-extended, or member identifier")]
    UnrecognizedCodeForm(LegacyCode),
}

/// Closed code table miss.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized {table} code '{code}'")]
pub struct LookupError {
    /// Table name, e.g. `case significance`.
    pub table: &'static str,
    /// Code that was looked up.
    pub code: LegacyCode,
}

/// Failures raised by a versioned store implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Backing file I/O failed.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// A record could not be encoded.
    #[error("failed to serialize store record: {0}")]
    Serialization(#[from] serde_json::Error),
    /// Fact composed into a session id this store never issued.
    #[error("session {0} was never opened on this store")]
    UnknownSession(u64),
    /// The store accepts one commit per run.
    #[error("store sessions were already committed")]
    AlreadyCommitted,
}

/// Error type for file and pipeline failures.
#[derive(Debug, Error)]
pub enum TransformError {
    /// Effective time is not an eight-digit calendar date.
    #[error("{}:{line}: malformed effective time '{value}' (expected YYYYMMDD)", path.display())]
    MalformedDate {
        /// Source file.
        path: PathBuf,
        /// 1-based line.
        line: usize,
        /// Offending column value.
        value: String,
    },
    /// Row width differs from the file's schema.
    #[error(
        "{}:{line}: expected {expected} tab-separated columns, found {found}",
        path.display()
    )]
    ColumnCount {
        /// Source file.
        path: PathBuf,
        /// 1-based line.
        line: usize,
        /// Schema width.
        expected: usize,
        /// Columns in the row.
        found: usize,
    },
    /// A group key reappeared after its group closed.
    #[error(
        "{}:{line}: rows for group '{key}' are not contiguous; input must be sorted by id",
        path.display()
    )]
    UnsortedGroup {
        /// Source file.
        path: PathBuf,
        /// 1-based line of the reappearing row.
        line: usize,
        /// Reopened key.
        key: String,
    },
    /// Closed code table miss on a row.
    #[error("{}:{line}: {source}", path.display())]
    Lookup {
        /// Source file.
        path: PathBuf,
        /// 1-based line.
        line: usize,
        /// Table and code.
        source: LookupError,
    },
    /// Legacy code on a row has no derivable identifier.
    #[error("{}:{line}: {source}", path.display())]
    Identity {
        /// Source file.
        path: PathBuf,
        /// 1-based line.
        line: usize,
        /// Rejected code.
        source: IdentityError,
    },
    /// Reading an input file failed.
    #[error("failed to read '{}': {source}", path.display())]
    Io {
        /// File being read.
        path: PathBuf,
        /// Underlying error.
        source: io::Error,
    },
    /// The store rejected an operation.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// Every attempted file failed.
    #[error("every one of the {0} transformed files failed; nothing was committed")]
    AllFilesFailed(usize),
    /// Invalid run configuration, such as a malformed override table.
    #[error("configuration error: {0}")]
    Configuration(String),
}

/// Row-level failure before file and line context is attached.
#[derive(Debug, Error)]
pub(crate) enum RowError {
    #[error("malformed effective time '{0}'")]
    MalformedDate(String),
    #[error(transparent)]
    Lookup(#[from] LookupError),
    #[error(transparent)]
    Identity(#[from] IdentityError),
}

impl RowError {
    pub(crate) fn at(self, path: &std::path::Path, line: usize) -> TransformError {
        let path = path.to_path_buf();
        match self {
            RowError::MalformedDate(value) => TransformError::MalformedDate { path, line, value },
            RowError::Lookup(source) => TransformError::Lookup { path, line, source },
            RowError::Identity(source) => TransformError::Identity { path, line, source },
        }
    }
}
