use geosmote_helpers::StackError;
use k_nn::KnnError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SmoteError>;

/// Errors that can occur while configuring or running Geometric SMOTE.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SmoteError {
    /// The sampling mode name is not one of `minority`, `majority`, `regular`.
    #[error("Unknown sampling mode {0:?}. Choices are minority, majority, regular")]
    UnknownMode(String),
    /// `k_neighbors` must be at least one
    #[error("k_neighbors must be at least 1")]
    InvalidNeighbors,
    /// The requested class has no rows to anchor synthetic samples on.
    #[error("No points labeled {0} to generate samples from")]
    EmptyPartition(String),
    /// Majority-based radii need at least one point of another class.
    #[error("No points outside class {0} to measure majority radii against")]
    NoOppositeClass(String),
    #[error("Radius matrix must have at least one row and one column")]
    EmptyRadii,
    #[error("Radius {0} is negative or not finite")]
    InvalidRadius(f64),
    #[error("Shape mismatch: {what} expected {expected}, found {found}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },
    /// A sampling target names a class that does not occur in the labels.
    #[error("Class {0} requested for sampling is not present in the labels")]
    UnknownClass(String),
    #[error("Neighbor search failed: {0}")]
    Search(#[from] KnnError),
    #[error("Could not assemble the resampled matrix: {0}")]
    Stack(#[from] StackError),
}
