use geosmote_helpers::Float;
use log::trace;
use ndarray::{Array1, Array2, ArrayView2};
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, StandardNormal};
use rand_xoshiro::Xoshiro256PlusPlus;
use rayon::prelude::*;

use crate::error::{Result, SmoteError};
use crate::sampler::make_geometric_sample;

/// Synthetic rows for one class, with their labels.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticBatch<F, L> {
    pub features: Array2<F>,
    pub labels: Array1<L>,
}

impl<F, L> SyntheticBatch<F, L> {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// One planned draw: the anchor row, the neighbor rank, and the seed of the
/// generator that samples around it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Draw {
    pub row: usize,
    pub col: usize,
    pub seed: u64,
}

/// Maps a flat index into a row-major matrix with `n_cols` columns back to
/// its `(row, col)` pair.
pub fn unravel_index(index: usize, n_cols: usize) -> (usize, usize) {
    (index / n_cols, index % n_cols)
}

fn validate_radii<F: Float>(partition: ArrayView2<F>, radii: ArrayView2<F>) -> Result<()> {
    if radii.nrows() == 0 || radii.ncols() == 0 {
        return Err(SmoteError::EmptyRadii);
    }
    if radii.nrows() != partition.nrows() {
        return Err(SmoteError::ShapeMismatch {
            what: "radius matrix rows",
            expected: partition.nrows(),
            found: radii.nrows(),
        });
    }
    if let Some(&bad) = radii.iter().find(|r| !r.is_finite() || **r < F::zero()) {
        return Err(SmoteError::InvalidRadius(bad.to_f64().unwrap_or(f64::NAN)));
    }
    Ok(())
}

/// Plans `n_samples` draws over a radius matrix.
///
/// One generator seed per draw is taken from `rng` first, then `n_samples`
/// flat indices uniform in `[0, n_points * k)`, with replacement. Each draw
/// owns its seed, so the draws can be executed in any order or in parallel
/// with the same result.
pub fn plan_draws<F, R>(radii: ArrayView2<F>, n_samples: usize, rng: &mut R) -> Result<Vec<Draw>>
where
    F: Float,
    R: Rng,
{
    let (n_points, k) = radii.dim();
    if n_points == 0 || k == 0 {
        return Err(SmoteError::EmptyRadii);
    }

    let seeds: Vec<u64> = (0..n_samples).map(|_| rng.random()).collect();
    let draws = seeds
        .into_iter()
        .map(|seed| {
            let (row, col) = unravel_index(rng.random_range(0..n_points * k), k);
            Draw { row, col, seed }
        })
        .collect();
    Ok(draws)
}

fn sample_draw<F>(partition: ArrayView2<F>, radii: ArrayView2<F>, draw: &Draw) -> Array1<F>
where
    F: Float,
    StandardNormal: Distribution<F>,
{
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(draw.seed);
    let radius = radii[[draw.row, draw.col]];
    make_geometric_sample(partition.row(draw.row), radius, &mut rng)
}

fn empty_batch<F: Float, L>(n_features: usize) -> SyntheticBatch<F, L> {
    SyntheticBatch {
        features: Array2::zeros((0, n_features)),
        labels: Array1::from_vec(Vec::new()),
    }
}

/// Generates `n_samples` synthetic points labeled `label`.
///
/// Each point is drawn uniformly from the ball around a row of `partition`;
/// the ball's radius is one entry of `radii` (row = anchor point, column =
/// neighbor rank), chosen uniformly among all entries. Rows of the result
/// follow the draw order.
///
/// # Errors
///
/// Returns `SmoteError::EmptyRadii` if `radii` has no rows or no columns,
/// `SmoteError::ShapeMismatch` if `radii` and `partition` disagree on the
/// number of points, and `SmoteError::InvalidRadius` for a negative, NaN or
/// infinite radius. A request for zero samples returns an empty batch without
/// inspecting `radii`.
pub fn generate_batch<F, L, R>(
    partition: ArrayView2<F>,
    label: &L,
    radii: ArrayView2<F>,
    n_samples: usize,
    rng: &mut R,
) -> Result<SyntheticBatch<F, L>>
where
    F: Float,
    L: Clone,
    R: Rng,
    StandardNormal: Distribution<F>,
{
    if n_samples == 0 {
        return Ok(empty_batch(partition.ncols()));
    }
    validate_radii(partition, radii)?;

    let draws = plan_draws(radii, n_samples, rng)?;
    trace!("sampling {} draws around {} anchors", draws.len(), partition.nrows());

    let mut features = Array2::zeros((n_samples, partition.ncols()));
    for (mut out, draw) in features.rows_mut().into_iter().zip(&draws) {
        out.assign(&sample_draw(partition, radii, draw));
    }

    Ok(SyntheticBatch {
        features,
        labels: Array1::from_elem(n_samples, label.clone()),
    })
}

/// Parallel counterpart of [`generate_batch`].
///
/// Produces exactly the same batch as `generate_batch` for the same inputs
/// and generator state, since every draw samples with its own pre-derived
/// generator.
pub fn generate_batch_par<F, L, R>(
    partition: ArrayView2<F>,
    label: &L,
    radii: ArrayView2<F>,
    n_samples: usize,
    rng: &mut R,
) -> Result<SyntheticBatch<F, L>>
where
    F: Float,
    L: Clone,
    R: Rng,
    StandardNormal: Distribution<F>,
{
    if n_samples == 0 {
        return Ok(empty_batch(partition.ncols()));
    }
    validate_radii(partition, radii)?;

    let draws = plan_draws(radii, n_samples, rng)?;
    trace!(
        "sampling {} draws around {} anchors in parallel",
        draws.len(),
        partition.nrows()
    );

    let samples: Vec<Array1<F>> = draws
        .par_iter()
        .map(|draw| sample_draw(partition, radii, draw))
        .collect();

    let mut features = Array2::zeros((n_samples, partition.ncols()));
    for (mut out, sample) in features.rows_mut().into_iter().zip(&samples) {
        out.assign(sample);
    }

    Ok(SyntheticBatch {
        features,
        labels: Array1::from_elem(n_samples, label.clone()),
    })
}
