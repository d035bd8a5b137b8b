use geosmote_helpers::Float;
use ndarray::{Array1, ArrayView1};
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

/// Draws a direction uniformly from the unit sphere in `dims` dimensions.
///
/// Normalizes a vector of independent standard-normal values. A zero vector
/// cannot be normalized and is redrawn.
pub fn random_direction<F, R>(dims: usize, rng: &mut R) -> Array1<F>
where
    F: Float,
    R: Rng,
    StandardNormal: Distribution<F>,
{
    loop {
        let normal: Array1<F> = (0..dims).map(|_| rng.sample(StandardNormal)).collect();
        let norm = normal.dot(&normal).sqrt();
        if norm > F::zero() {
            return normal / norm;
        }
    }
}

/// Draws one point uniformly (by volume) from the ball of `radius` around `center`.
///
/// A uniform direction is scaled by `u^(1/d)` with `u` uniform in `[0, 1)`,
/// which spreads the samples evenly over the volume instead of crowding them
/// near the center, then scaled by `radius` and shifted to `center`.
///
/// A zero radius returns `center` unchanged without drawing. With a single
/// feature the direction is `±1`.
pub fn make_geometric_sample<F, R>(center: ArrayView1<F>, radius: F, rng: &mut R) -> Array1<F>
where
    F: Float,
    R: Rng,
    StandardNormal: Distribution<F>,
{
    let dims = center.len();
    if radius == F::zero() || dims == 0 {
        return center.to_owned();
    }

    let on_sphere = random_direction::<F, R>(dims, rng);
    let u: F = rng.random_range(F::zero()..F::one());
    let in_ball = on_sphere * u.powf(F::one() / F::from_count(dims));

    &center + &(in_ball * radius)
}
