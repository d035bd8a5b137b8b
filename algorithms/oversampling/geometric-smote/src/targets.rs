use std::collections::{BTreeMap, HashMap};
use std::fmt::Debug;
use std::hash::Hash;

use geosmote_helpers::class_counts;
use ndarray::ArrayView1;

use crate::error::{Result, SmoteError};

/// Decides how many synthetic samples each class receives.
pub trait SamplingTargets<L> {
    /// Number of samples to synthesize per class, keyed and ordered by label.
    ///
    /// Classes may map to zero. Every key must occur in `y`.
    fn targets(&self, y: ArrayView1<L>) -> Result<BTreeMap<L, usize>>;
}

fn checked<'a, L, I>(y: ArrayView1<L>, requested: I) -> Result<BTreeMap<L, usize>>
where
    L: Clone + Ord + Debug + 'a,
    I: IntoIterator<Item = (&'a L, &'a usize)>,
{
    let counts = class_counts(y);
    requested
        .into_iter()
        .map(|(label, &n)| {
            if counts.contains_key(label) {
                Ok((label.clone(), n))
            } else {
                Err(SmoteError::UnknownClass(format!("{:?}", label)))
            }
        })
        .collect()
}

/// Explicit per-class sample counts.
impl<L> SamplingTargets<L> for BTreeMap<L, usize>
where
    L: Clone + Ord + Debug,
{
    fn targets(&self, y: ArrayView1<L>) -> Result<BTreeMap<L, usize>> {
        checked(y, self)
    }
}

/// Explicit per-class sample counts.
impl<L> SamplingTargets<L> for HashMap<L, usize>
where
    L: Clone + Ord + Hash + Debug,
{
    fn targets(&self, y: ArrayView1<L>) -> Result<BTreeMap<L, usize>> {
        checked(y, self)
    }
}

/// Oversamples every class up to the size of the largest class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Balance;

impl<L> SamplingTargets<L> for Balance
where
    L: Clone + Ord + Debug,
{
    fn targets(&self, y: ArrayView1<L>) -> Result<BTreeMap<L, usize>> {
        let counts = class_counts(y);
        let majority = counts.values().copied().max().unwrap_or(0);
        Ok(counts
            .into_iter()
            .map(|(label, count)| (label, majority - count))
            .collect())
    }
}

/// Oversamples only the smallest class up to the size of the largest class.
///
/// Ties for the smallest class go to the lowest label. Every other class
/// maps to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MinorityOnly;

impl<L> SamplingTargets<L> for MinorityOnly
where
    L: Clone + Ord + Debug,
{
    fn targets(&self, y: ArrayView1<L>) -> Result<BTreeMap<L, usize>> {
        let counts = class_counts(y);
        let majority = counts.values().copied().max().unwrap_or(0);
        let minority = counts
            .iter()
            .min_by_key(|&(_, &count)| count)
            .map(|(label, _)| label.clone());
        Ok(counts
            .into_iter()
            .map(|(label, count)| {
                let n = if Some(&label) == minority.as_ref() {
                    majority - count
                } else {
                    0
                };
                (label, n)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_balance_fills_up_to_majority() {
        let y = array![0, 0, 0, 0, 1, 2, 2];
        let targets = Balance.targets(y.view()).unwrap();
        assert_eq!(targets, BTreeMap::from([(0, 0), (1, 3), (2, 2)]));
    }

    #[test]
    fn test_balance_on_empty_labels() {
        let y = ndarray::Array1::<i32>::from_vec(vec![]);
        assert!(Balance.targets(y.view()).unwrap().is_empty());
    }

    #[test]
    fn test_explicit_counts() {
        let y = array!["a", "b", "b"];
        let requested = HashMap::from([("a", 4), ("b", 0)]);
        let targets = requested.targets(y.view()).unwrap();
        assert_eq!(targets.into_iter().collect::<Vec<_>>(), vec![("a", 4), ("b", 0)]);
    }

    #[test]
    fn test_explicit_counts_reject_unknown_class() {
        let y = array![1, 1, 2];
        let requested = BTreeMap::from([(3, 5)]);
        assert_eq!(
            requested.targets(y.view()),
            Err(SmoteError::UnknownClass("3".to_string()))
        );
    }

    #[test]
    fn test_minority_only_fills_smallest_class() {
        let y = array![0, 0, 0, 0, 1, 2, 2];
        let targets = MinorityOnly.targets(y.view()).unwrap();
        assert_eq!(targets, BTreeMap::from([(0, 0), (1, 3), (2, 0)]));
    }

    #[test]
    fn test_minority_only_tie_goes_to_lowest_label() {
        let y = array!["c", "c", "c", "b", "a"];
        let targets = MinorityOnly.targets(y.view()).unwrap();
        assert_eq!(targets, BTreeMap::from([("a", 2), ("b", 0), ("c", 0)]));
    }
}
