//! Minimum spanning tree cost over a small complete distance matrix.
//!
//! The generalized vertex reduction feeds this with the pairwise negative
//! bypass distances between a candidate's neighbours, so the matrix has at
//! most a handful of rows and a naive Prim scan is the fastest option.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::BoundError;

/// A complete distance matrix keyed by node. Rows may include a self entry.
pub type DistanceMatrix<K> = BTreeMap<K, BTreeMap<K, f64>>;

/// Prim-style minimum spanning tree over a [`DistanceMatrix`].
///
/// # Examples
/// ```
/// use std::collections::BTreeMap;
/// use gmwcs_core::MstLowerBound;
///
/// let mut matrix = BTreeMap::new();
/// matrix.insert('a', BTreeMap::from([('b', 2.0), ('c', 5.0)]));
/// matrix.insert('b', BTreeMap::from([('a', 2.0), ('c', 1.0)]));
/// matrix.insert('c', BTreeMap::from([('a', 5.0), ('b', 1.0)]));
///
/// let cost = MstLowerBound::new(&matrix).solve()?;
/// assert_eq!(cost, 3.0);
/// # Ok::<(), gmwcs_core::BoundError>(())
/// ```
#[derive(Debug)]
pub struct MstLowerBound<'m, K> {
    matrix: &'m DistanceMatrix<K>,
}

impl<'m, K: Ord + Copy> MstLowerBound<'m, K> {
    /// Wraps a distance matrix.
    #[must_use]
    pub fn new(matrix: &'m DistanceMatrix<K>) -> Self {
        Self { matrix }
    }

    /// Returns the total cost of a minimum spanning tree.
    ///
    /// # Errors
    /// Returns [`BoundError::TooFewNodes`] for fewer than two rows,
    /// [`BoundError::NotAClique`] when a row lacks another node, and
    /// [`BoundError::NanDistance`] when a distance is NaN.
    pub fn solve(&self) -> Result<f64, BoundError> {
        self.validate()?;

        let mut rows = self.matrix.iter();
        let Some((&start, _)) = rows.next() else {
            return Err(BoundError::TooFewNodes { nodes: 0 });
        };
        let mut tree = BTreeSet::from([start]);
        let mut cost = 0.0;
        while tree.len() < self.matrix.len() {
            let mut best: Option<(K, f64)> = None;
            for member in &tree {
                let Some(near) = self.matrix.get(member) else {
                    continue;
                };
                for (&node, &distance) in near {
                    if tree.contains(&node) || !self.matrix.contains_key(&node) {
                        continue;
                    }
                    if best.is_none_or(|(_, current)| distance < current) {
                        best = Some((node, distance));
                    }
                }
            }
            let Some((node, distance)) = best else {
                break;
            };
            tree.insert(node);
            cost += distance;
        }
        Ok(cost)
    }

    fn validate(&self) -> Result<(), BoundError> {
        let nodes = self.matrix.len();
        if nodes < 2 {
            return Err(BoundError::TooFewNodes { nodes });
        }
        let keys: Vec<K> = self.matrix.keys().copied().collect();
        for (row, (key, near)) in self.matrix.iter().enumerate() {
            for (column, other) in keys.iter().enumerate() {
                if other == key {
                    continue;
                }
                match near.get(other) {
                    None => return Err(BoundError::NotAClique { row, missing: column }),
                    Some(distance) if distance.is_nan() => {
                        return Err(BoundError::NanDistance { row, column });
                    }
                    Some(_) => {}
                }
            }
        }
        Ok(())
    }
}
