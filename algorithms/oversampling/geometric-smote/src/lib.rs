//! Geometric SMOTE: oversampling by drawing synthetic points uniformly from
//! balls around the points of an under-represented class.
//!
//! The building blocks can be used on their own:
//! [`make_geometric_sample`] draws one point from a ball,
//! [`compute_radii`] measures neighborhood radii for a class, and
//! [`generate_batch`] assembles a batch of samples from a radius matrix.
//! [`GeometricSmote`] ties them together over a labeled dataset.

mod batch;
mod config;
mod error;
mod mode;
mod oversampler;
mod sampler;
mod targets;

pub use batch::{
    Draw, SyntheticBatch, generate_batch, generate_batch_par, plan_draws, unravel_index,
};
pub use config::GeometricSmoteConfig;
pub use error::{Result, SmoteError};
pub use mode::{
    RadiusSource, SamplingMode, compute_radii, is_sorted_radii, majority_radii, minority_radii,
};
pub use oversampler::{GeometricSmote, Resampled};
pub use sampler::{make_geometric_sample, random_direction};
pub use targets::{Balance, MinorityOnly, SamplingTargets};
