use ndarray::{Array2, ArrayView2, Axis, CowArray, Ix2, concatenate};
use thiserror::Error;

/// Errors raised while appending rows to a feature matrix.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StackError {
    #[error("cannot append rows with {found} columns to a matrix with {expected} columns")]
    ColumnMismatch { expected: usize, found: usize },
}

/// Storage capability of a feature matrix.
///
/// Resampling reads the input through `to_dense` once and writes the result
/// through `concatenate_rows`, so the sampling code never inspects the
/// representation itself.
pub trait RowStack<F>: Sized {
    /// Whether the matrix stores only its non-zero entries.
    fn is_sparse(&self) -> bool;

    /// A dense view (or copy) of the whole matrix.
    fn to_dense(&self) -> CowArray<'_, F, Ix2>;

    /// A new matrix holding `self` followed by `rows`.
    fn concatenate_rows(&self, rows: ArrayView2<F>) -> Result<Self, StackError>;
}

impl<F: Clone> RowStack<F> for Array2<F> {
    fn is_sparse(&self) -> bool {
        false
    }

    fn to_dense(&self) -> CowArray<'_, F, Ix2> {
        CowArray::from(self.view())
    }

    fn concatenate_rows(&self, rows: ArrayView2<F>) -> Result<Self, StackError> {
        let mismatch = StackError::ColumnMismatch {
            expected: self.ncols(),
            found: rows.ncols(),
        };
        if rows.ncols() != self.ncols() {
            return Err(mismatch);
        }
        concatenate(Axis(0), &[self.view(), rows.view()]).map_err(|_| mismatch)
    }
}
