pub use geometric_smote::{
    Balance, Draw, GeometricSmote, GeometricSmoteConfig, MinorityOnly, RadiusSource, Resampled,
    SamplingMode, SamplingTargets, SmoteError, SyntheticBatch, compute_radii, generate_batch,
    generate_batch_par, is_sorted_radii, majority_radii, make_geometric_sample, minority_radii,
    plan_draws, random_direction, unravel_index,
};
pub use geosmote_helpers::{
    ClassPartition, Distance, Float, L2Dist, RowStack, StackError, class_counts,
};
pub use k_nn::{KNearestNeighbors, KnnError, NeighborSearch};
