use ndarray::{Array2, ArrayView1, ArrayView2, Axis};
use std::collections::BTreeMap;
use std::fmt::Debug;

/// Row indices of a feature matrix split by a target class.
///
/// `positive` holds the rows whose label equals the target class and
/// `negative` holds every other row. Both keep the original row order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassPartition<L>
where
    L: Clone + Eq + Debug,
{
    pub label: L,
    pub positive: Vec<usize>,
    pub negative: Vec<usize>,
}

impl<L> ClassPartition<L>
where
    L: Clone + Eq + Debug,
{
    /// Splits the rows of `y` around `label`.
    pub fn new(y: ArrayView1<L>, label: L) -> Self {
        let (positive, negative): (Vec<usize>, Vec<usize>) =
            (0..y.len()).partition(|&i| y[i] == label);
        ClassPartition {
            label,
            positive,
            negative,
        }
    }

    /// Copies the rows of `x` belonging to the target class.
    pub fn positive_rows<F: Clone>(&self, x: ArrayView2<F>) -> Array2<F> {
        x.select(Axis(0), &self.positive)
    }

    /// Copies the rows of `x` belonging to every other class.
    pub fn negative_rows<F: Clone>(&self, x: ArrayView2<F>) -> Array2<F> {
        x.select(Axis(0), &self.negative)
    }
}

/// Counts the occurrences of each label, ordered by label.
pub fn class_counts<L>(y: ArrayView1<L>) -> BTreeMap<L, usize>
where
    L: Clone + Ord,
{
    let mut counts = BTreeMap::new();
    for label in y.iter() {
        *counts.entry(label.clone()).or_insert(0) += 1;
    }
    counts
}
