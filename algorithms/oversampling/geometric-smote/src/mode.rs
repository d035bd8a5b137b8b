use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

use geosmote_helpers::Float;
use k_nn::NeighborSearch;
use log::debug;
use ndarray::{Array2, ArrayView2, s};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::error::{Result, SmoteError};

/// Which class partition(s) the neighborhood radii are measured against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate", rename_all = "lowercase")
)]
pub enum SamplingMode {
    /// Radii are distances from each point to its `k` nearest same-class neighbors.
    Minority,
    /// Radii are distances from each point to the nearest point of any other class.
    Majority,
    /// Both, combined so a ball never extends past the nearest other-class point.
    #[default]
    Regular,
}

impl SamplingMode {
    pub const ALL: [SamplingMode; 3] = [
        SamplingMode::Minority,
        SamplingMode::Majority,
        SamplingMode::Regular,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SamplingMode::Minority => "minority",
            SamplingMode::Majority => "majority",
            SamplingMode::Regular => "regular",
        }
    }

    fn uses_majority(&self) -> bool {
        matches!(self, SamplingMode::Majority | SamplingMode::Regular)
    }
}

impl Display for SamplingMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SamplingMode {
    type Err = SmoteError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        SamplingMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| SmoteError::UnknownMode(s.to_string()))
    }
}

/// Neighborhood radii tagged with the partition(s) they were measured on.
#[derive(Debug, Clone, PartialEq)]
pub enum RadiusSource<F> {
    Minority(Array2<F>),
    Majority(Array2<F>),
    Regular {
        minority: Array2<F>,
        majority: Array2<F>,
    },
}

impl<F: Float> RadiusSource<F> {
    /// Reduces the source to the single radius matrix sampling draws from.
    ///
    /// In `Regular` mode every minority radius is capped by the anchor's
    /// distance to its nearest other-class point:
    /// `min(minority[r, c], majority[r, 0])`.
    pub fn into_radii(self) -> Result<Array2<F>> {
        match self {
            RadiusSource::Minority(radii) | RadiusSource::Majority(radii) => Ok(radii),
            RadiusSource::Regular {
                mut minority,
                majority,
            } => {
                if majority.ncols() == 0 {
                    return Err(SmoteError::EmptyRadii);
                }
                if majority.nrows() != minority.nrows() {
                    return Err(SmoteError::ShapeMismatch {
                        what: "majority radius rows",
                        expected: minority.nrows(),
                        found: majority.nrows(),
                    });
                }
                let nearest_other = majority.column(0);
                for (mut row, &cap) in minority.rows_mut().into_iter().zip(nearest_other) {
                    row.mapv_inplace(|r| r.min(cap));
                }
                Ok(minority)
            }
        }
    }
}

/// Distances from every positive point to its `k_neighbors` nearest
/// positive neighbors, excluding the point itself.
///
/// The search is queried for `k_neighbors + 1` neighbors and the first
/// column, the zero-distance self match, is dropped.
pub fn minority_radii<F, S>(
    search: &mut S,
    positive: ArrayView2<F>,
    k_neighbors: usize,
) -> Result<Array2<F>>
where
    F: Float,
    S: NeighborSearch<F>,
{
    search.fit(positive)?;
    let distances = search.kneighbors(positive, k_neighbors + 1)?;
    Ok(distances.slice(s![.., 1..]).to_owned())
}

/// Distance from every positive point to the nearest negative point.
pub fn majority_radii<F, S>(
    search: &mut S,
    positive: ArrayView2<F>,
    negative: ArrayView2<F>,
) -> Result<Array2<F>>
where
    F: Float,
    S: NeighborSearch<F>,
{
    search.fit(negative)?;
    Ok(search.kneighbors(positive, 1)?)
}

/// Measures the radii `mode` calls for around the points of class `label`.
///
/// `positive` holds the rows of the class, `negative` every other row.
///
/// # Errors
///
/// `SmoteError::EmptyPartition` when `positive` is empty,
/// `SmoteError::NoOppositeClass` when the mode needs other-class points and
/// `negative` is empty, and `SmoteError::Search` when the neighbor search
/// fails (for instance, when `k_neighbors + 1` exceeds the class size).
pub fn compute_radii<F, L, S>(
    mode: SamplingMode,
    search: &mut S,
    label: &L,
    positive: ArrayView2<F>,
    negative: ArrayView2<F>,
    k_neighbors: usize,
) -> Result<RadiusSource<F>>
where
    F: Float,
    L: Debug,
    S: NeighborSearch<F>,
{
    if positive.nrows() == 0 {
        return Err(SmoteError::EmptyPartition(format!("{:?}", label)));
    }
    if mode.uses_majority() && negative.nrows() == 0 {
        return Err(SmoteError::NoOppositeClass(format!("{:?}", label)));
    }

    let source = match mode {
        SamplingMode::Minority => {
            RadiusSource::Minority(minority_radii(search, positive, k_neighbors)?)
        }
        SamplingMode::Majority => {
            RadiusSource::Majority(majority_radii(search, positive, negative)?)
        }
        SamplingMode::Regular => RadiusSource::Regular {
            minority: minority_radii(search, positive, k_neighbors)?,
            majority: majority_radii(search, positive, negative)?,
        },
    };
    debug!(
        "class {:?}: {} radii over {} anchors ({} other-class points)",
        label,
        mode,
        positive.nrows(),
        negative.nrows()
    );
    Ok(source)
}

/// Whether every row of `radii` is non-negative and non-decreasing.
pub fn is_sorted_radii<F: Float>(radii: ArrayView2<F>) -> bool {
    radii.rows().into_iter().all(|row| {
        row.iter().all(|&r| r >= F::zero()) && row.windows(2).into_iter().all(|w| w[0] <= w[1])
    })
}
