use std::cmp::Ordering;

use geosmote_helpers::{Distance, Float, L2Dist};
use log::trace;
use ndarray::{Array2, ArrayView1, ArrayView2};
use rayon::prelude::*;
use thiserror::Error;

/// Errors that can occur when fitting or querying a neighbor search.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KnnError {
    /// k cannot be zero for a nearest-neighbor query
    #[error("k cannot be zero for a nearest-neighbor query")]
    InvalidK,
    /// Cannot fit a neighbor search on an empty reference set
    #[error("Cannot fit a neighbor search on an empty reference set")]
    EmptyTrainingSet,
    /// Queried before `fit`
    #[error("Neighbor search queried before it was fitted")]
    NotFitted,
    /// More neighbors requested than there are reference points
    #[error("Expected k <= {n_reference} reference points, got k = {k}")]
    KTooLarge { k: usize, n_reference: usize },
    /// Query points and reference points differ in length
    #[error("Query points have {found} features, reference points have {expected}")]
    MismatchedDimensions { expected: usize, found: usize },
    /// Invalid distance comparison (likely due to NaN values in data)
    #[error("Invalid distance comparison (likely due to NaN values in data)")]
    InvalidDistance,
}

/// Finds the distances from query points to their nearest reference points.
///
/// Implementations are fitted once on a reference set and may then be
/// queried any number of times. Refitting replaces the reference set.
pub trait NeighborSearch<F: Float> {
    /// Stores `reference` as the set that later queries search.
    ///
    /// # Errors
    ///
    /// Returns `KnnError::EmptyTrainingSet` if `reference` has no rows.
    fn fit(&mut self, reference: ArrayView2<F>) -> Result<(), KnnError>;

    /// For every row of `queries`, the distances to its `k` nearest reference
    /// points in ascending order.
    ///
    /// The result has shape `(queries.nrows(), k)`. A query point that is
    /// also a reference point finds itself at distance zero.
    fn kneighbors(&self, queries: ArrayView2<F>, k: usize) -> Result<Array2<F>, KnnError>;
}

/// Exhaustive nearest-neighbor search.
///
/// Every query is compared against every reference point. Queries are
/// processed in parallel.
///
/// # Type Parameters
///
/// * `F`: The float type for the features (e.g., `f32`, `f64`).
/// * `D`: The distance metric, which must implement the `Distance` trait.
#[derive(Debug, Clone)]
pub struct KNearestNeighbors<F, D = L2Dist>
where
    F: Float,
    D: Distance<F>,
{
    reference: Option<Array2<F>>,
    distance: D,
}

impl<F> Default for KNearestNeighbors<F, L2Dist>
where
    F: Float,
{
    fn default() -> Self {
        Self::new(L2Dist)
    }
}

impl<F, D> KNearestNeighbors<F, D>
where
    F: Float,
    D: Distance<F>,
{
    /// Creates an unfitted search using `distance` as the metric.
    pub fn new(distance: D) -> Self {
        Self {
            reference: None,
            distance,
        }
    }

    /// Number of points in the fitted reference set.
    pub fn n_reference(&self) -> Option<usize> {
        self.reference.as_ref().map(|r| r.nrows())
    }

    fn nearest(
        &self,
        reference: ArrayView2<F>,
        query: ArrayView1<F>,
        k: usize,
    ) -> Result<Vec<F>, KnnError> {
        let mut distances: Vec<F> = reference
            .rows()
            .into_iter()
            .map(|point| self.distance.rdistance(point, query))
            .collect();

        if distances.iter().any(|d| d.is_nan()) {
            return Err(KnnError::InvalidDistance);
        }

        // NaN was ruled out above, so the comparison is total.
        let by_distance = |a: &F, b: &F| a.partial_cmp(b).unwrap_or(Ordering::Equal);
        if k < distances.len() {
            distances.select_nth_unstable_by(k - 1, by_distance);
            distances.truncate(k);
        }
        distances.sort_unstable_by(by_distance);

        Ok(distances
            .into_iter()
            .map(|d| self.distance.rdist_to_dist(d))
            .collect())
    }
}

impl<F, D> NeighborSearch<F> for KNearestNeighbors<F, D>
where
    F: Float,
    D: Distance<F> + Sync,
{
    fn fit(&mut self, reference: ArrayView2<F>) -> Result<(), KnnError> {
        if reference.nrows() == 0 {
            return Err(KnnError::EmptyTrainingSet);
        }
        trace!(
            "fitting neighbor search on {} points with {} features",
            reference.nrows(),
            reference.ncols()
        );
        self.reference = Some(reference.to_owned());
        Ok(())
    }

    fn kneighbors(&self, queries: ArrayView2<F>, k: usize) -> Result<Array2<F>, KnnError> {
        let reference = self.reference.as_ref().ok_or(KnnError::NotFitted)?;
        if k == 0 {
            return Err(KnnError::InvalidK);
        }
        if k > reference.nrows() {
            return Err(KnnError::KTooLarge {
                k,
                n_reference: reference.nrows(),
            });
        }
        if queries.ncols() != reference.ncols() {
            return Err(KnnError::MismatchedDimensions {
                expected: reference.ncols(),
                found: queries.ncols(),
            });
        }

        let reference = reference.view();
        let rows = (0..queries.nrows())
            .into_par_iter()
            .map(|i| self.nearest(reference, queries.row(i), k))
            .collect::<Result<Vec<_>, _>>()?;

        let mut distances = Array2::zeros((queries.nrows(), k));
        for (mut out, row) in distances.rows_mut().into_iter().zip(rows) {
            for (slot, d) in out.iter_mut().zip(row) {
                *slot = d;
            }
        }
        Ok(distances)
    }
}
