use std::collections::BTreeMap;
use std::fmt::Debug;

use geosmote_helpers::{ClassPartition, Float, RowStack};
use k_nn::{KNearestNeighbors, NeighborSearch};
use log::{debug, info};
use ndarray::{Array1, Array2, ArrayView1, s};
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, StandardNormal};
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::batch::{SyntheticBatch, generate_batch, generate_batch_par};
use crate::config::GeometricSmoteConfig;
use crate::error::{Result, SmoteError};
use crate::mode::compute_radii;
use crate::targets::SamplingTargets;

/// A resampled dataset: the original rows followed by the synthetic ones.
#[derive(Debug, Clone, PartialEq)]
pub struct Resampled<X, L> {
    pub features: X,
    pub labels: Array1<L>,
    /// Synthetic rows appended per class, in the order they were appended.
    pub n_synthetic: BTreeMap<L, usize>,
}

/// Geometric SMOTE oversampler.
///
/// New samples for a class are drawn uniformly from balls centered on the
/// points of that class. Ball radii come from nearest-neighbor distances
/// chosen by the configured [`SamplingMode`](crate::SamplingMode).
///
/// # Type Parameters
///
/// * `S`: The neighbor search used to measure radii (e.g. `KNearestNeighbors`).
#[derive(Debug, Clone)]
pub struct GeometricSmote<S> {
    config: GeometricSmoteConfig,
    search: S,
}

impl<F: Float> GeometricSmote<KNearestNeighbors<F>> {
    /// Creates an oversampler with exhaustive Euclidean neighbor search.
    ///
    /// # Errors
    ///
    /// Returns `SmoteError::InvalidNeighbors` if `config.k_neighbors` is 0.
    pub fn new(config: GeometricSmoteConfig) -> Result<Self> {
        Self::with_search(config, KNearestNeighbors::default())
    }
}

impl<S> GeometricSmote<S> {
    /// Creates an oversampler that measures radii with `search`.
    ///
    /// # Errors
    ///
    /// Returns `SmoteError::InvalidNeighbors` if `config.k_neighbors` is 0.
    pub fn with_search(config: GeometricSmoteConfig, search: S) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, search })
    }

    pub fn config(&self) -> &GeometricSmoteConfig {
        &self.config
    }

    /// Resamples `x`/`y`, seeding the generator from `config.seed`.
    ///
    /// Without a seed a random one is drawn, so results differ between calls.
    pub fn fit_resample<F, L, X, T>(
        &mut self,
        x: &X,
        y: ArrayView1<L>,
        targets: &T,
    ) -> Result<Resampled<X, L>>
    where
        F: Float,
        L: Clone + Ord + Debug,
        X: RowStack<F>,
        T: SamplingTargets<L> + ?Sized,
        S: NeighborSearch<F>,
        StandardNormal: Distribution<F>,
    {
        let seed = self.config.seed.unwrap_or_else(rand::random);
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        self.fit_resample_with_rng(x, y, targets, &mut rng)
    }

    /// Resamples `x`/`y` drawing all randomness from `rng`.
    ///
    /// Classes are processed in ascending label order. For each class with a
    /// positive target the radii are measured, a batch is generated and its
    /// rows and labels are appended after the original data.
    ///
    /// # Errors
    ///
    /// * `SmoteError::ShapeMismatch` if `x` and `y` disagree on the number of rows.
    /// * `SmoteError::UnknownClass` if `targets` names a class missing from `y`.
    /// * `SmoteError::EmptyPartition` / `SmoteError::NoOppositeClass` when a
    ///   class cannot anchor the radii its mode needs.
    /// * `SmoteError::Search` when the neighbor search fails.
    ///
    /// Nothing is returned for classes processed before the failure.
    pub fn fit_resample_with_rng<F, L, X, T, R>(
        &mut self,
        x: &X,
        y: ArrayView1<L>,
        targets: &T,
        rng: &mut R,
    ) -> Result<Resampled<X, L>>
    where
        F: Float,
        L: Clone + Ord + Debug,
        X: RowStack<F>,
        T: SamplingTargets<L> + ?Sized,
        S: NeighborSearch<F>,
        R: Rng,
        StandardNormal: Distribution<F>,
    {
        let dense = x.to_dense();
        let features = dense.view();
        if features.nrows() != y.len() {
            return Err(SmoteError::ShapeMismatch {
                what: "labels",
                expected: features.nrows(),
                found: y.len(),
            });
        }

        let targets = targets.targets(y)?;
        let mut batches: Vec<SyntheticBatch<F, L>> = Vec::with_capacity(targets.len());
        let mut n_synthetic = BTreeMap::new();

        for (label, n_samples) in targets {
            if n_samples == 0 {
                debug!("class {:?}: nothing to generate", label);
                continue;
            }

            let partition = ClassPartition::new(y, label.clone());
            let positive = partition.positive_rows(features);
            let negative = partition.negative_rows(features);

            let radii = compute_radii(
                self.config.mode,
                &mut self.search,
                &label,
                positive.view(),
                negative.view(),
                self.config.k_neighbors,
            )?
            .into_radii()?;

            let batch = if self.config.parallel {
                generate_batch_par(positive.view(), &label, radii.view(), n_samples, rng)?
            } else {
                generate_batch(positive.view(), &label, radii.view(), n_samples, rng)?
            };
            debug!("class {:?}: generated {} samples", label, batch.len());

            n_synthetic.insert(label, batch.len());
            batches.push(batch);
        }

        let total: usize = batches.iter().map(SyntheticBatch::len).sum();
        let mut synthetic = Array2::zeros((total, features.ncols()));
        let mut offset = 0;
        for batch in &batches {
            synthetic
                .slice_mut(s![offset..offset + batch.len(), ..])
                .assign(&batch.features);
            offset += batch.len();
        }

        let labels: Array1<L> = y
            .iter()
            .cloned()
            .chain(batches.iter().flat_map(|batch| batch.labels.iter().cloned()))
            .collect();
        let features = x.concatenate_rows(synthetic.view())?;

        info!(
            "{} mode: resampled {} {} rows into {} ({} synthetic)",
            self.config.mode,
            y.len(),
            if x.is_sparse() { "sparse" } else { "dense" },
            labels.len(),
            total
        );
        Ok(Resampled {
            features,
            labels,
            n_synthetic,
        })
    }
}
