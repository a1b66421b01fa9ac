//! Error taxonomy of the selection process.
//!
//! All errors are local and recoverable by the caller. Nothing is silently truncated, reordered
//! or padded: misaligned data is reported as soon as it is detected.

use thiserror::Error;

/// Errors raised while loading, building, pruning, aligning or ranking.
#[derive(Debug, Error)]
pub enum SubgraphError {
    /// adjacency matrix not square or not sized to the vocabulary
    #[error("shape mismatch for {context}: expected {expected}, got {got}")]
    ShapeMismatch {
        context: String,
        expected: String,
        got: String,
    },

    /// pruning asked on an empty collection of graphs
    #[error("empty graph set, nothing to prune")]
    EmptyGraphSet,

    /// embedding matrices with different row counts or vector dimensions
    #[error("dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// selection size must be strictly positive
    #[error("invalid selection size k = {0}, must be > 0")]
    InvalidK(usize),

    /// declared node list of a corpus disagrees with its embedding rows
    #[error("alignment error in corpus {corpus}: {message}")]
    AlignmentError { corpus: String, message: String },

    /// a corpus was asked for but is not in the collection
    #[error("missing corpus {0}")]
    MissingCorpus(String),

    /// vocabulary must not contain a token twice
    #[error("duplicate vocabulary token {token} at ranks {first} and {second}")]
    DuplicateToken {
        token: String,
        first: usize,
        second: usize,
    },

    /// adjacency cell that cannot be an edge weight
    #[error("invalid weight {value} at cell ({row}, {col}) in {context}")]
    InvalidWeight {
        context: String,
        row: usize,
        col: usize,
        value: f64,
    },

    /// a field could not be decoded
    #[error("parse error in {context} at line {line}, field {field}: {message}")]
    Parse {
        context: String,
        line: usize,
        field: usize,
        message: String,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
} // end of enum SubgraphError

pub type SubgraphResult<T> = std::result::Result<T, SubgraphError>;

impl SubgraphError {
    pub(crate) fn shape(context: &str, expected: impl ToString, got: impl ToString) -> Self {
        SubgraphError::ShapeMismatch {
            context: context.to_string(),
            expected: expected.to_string(),
            got: got.to_string(),
        }
    }

    pub(crate) fn alignment(corpus: &str, message: impl ToString) -> Self {
        SubgraphError::AlignmentError {
            corpus: corpus.to_string(),
            message: message.to_string(),
        }
    }
} // end of impl SubgraphError
