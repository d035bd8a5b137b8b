use crate::Float;
use ndarray::ArrayView1;

/// A metric between two feature vectors of equal length.
pub trait Distance<F: Float> {
    /// The true distance between `a` and `b`.
    fn distance(&self, a: ArrayView1<F>, b: ArrayView1<F>) -> F;

    /// A cheaper value with the same ordering as `distance`.
    ///
    /// Use it for ranking only. Defaults to `distance`.
    fn rdistance(&self, a: ArrayView1<F>, b: ArrayView1<F>) -> F {
        self.distance(a, b)
    }

    /// Converts a value produced by `rdistance` back into a true distance.
    fn rdist_to_dist(&self, rdist: F) -> F {
        rdist
    }
}

/// Euclidean distance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct L2Dist;

impl<F: Float> Distance<F> for L2Dist {
    fn distance(&self, a: ArrayView1<F>, b: ArrayView1<F>) -> F {
        self.rdistance(a, b).sqrt()
    }

    // squared Euclidean
    fn rdistance(&self, a: ArrayView1<F>, b: ArrayView1<F>) -> F {
        a.iter()
            .zip(b.iter())
            .map(|(&x, &y)| (x - y) * (x - y))
            .sum()
    }

    fn rdist_to_dist(&self, rdist: F) -> F {
        rdist.sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn test_l2_distance() {
        let a = array![0.0, 0.0];
        let b = array![3.0, 4.0];
        assert_abs_diff_eq!(L2Dist.distance(a.view(), b.view()), 5.0);
        assert_abs_diff_eq!(L2Dist.rdistance(a.view(), b.view()), 25.0);
        assert_abs_diff_eq!(Distance::<f64>::rdist_to_dist(&L2Dist, 25.0), 5.0);
    }

    #[test]
    fn test_l2_distance_to_self_is_zero() {
        let a = array![1.5f32, -2.0, 7.25];
        assert_eq!(L2Dist.distance(a.view(), a.view()), 0.0);
    }
}
