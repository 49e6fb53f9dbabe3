//! The owned quadrature rule container produced and consumed by the projection routines.
use itertools::izip;
use nalgebra::{Point, RealField, Scalar};
use serde::{Deserialize, Serialize};

/// An owned quadrature rule for a `D`-dimensional domain.
///
/// A rule is an ordered sequence of (point, weight) pairs, stored as parallel vectors.
/// The order is significant: the batch projections in [`crate::project`] emit their output
/// blocks back to back, and [`crate::DataSetDescriptor`] computes positions inside the
/// flattened sequence. A rule is never mutated after construction; all projection routines
/// return a freshly owned value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quadrature<T: Scalar, const D: usize> {
    weights: Vec<T>,
    points: Vec<Point<T, D>>,
}

impl<T: Scalar, const D: usize> Quadrature<T, D> {
    /// Constructs a rule from parallel weight and point vectors.
    ///
    /// # Panics
    ///
    /// Panics if the two vectors do not have the same length.
    pub fn from_parts(weights: Vec<T>, points: Vec<Point<T, D>>) -> Self {
        assert_eq!(
            weights.len(),
            points.len(),
            "A quadrature rule must have as many weights as points"
        );
        Self { weights, points }
    }

    /// The rule with no points at all.
    ///
    /// Projecting an empty rule yields an empty rule; it is not an error.
    pub fn empty() -> Self {
        Self {
            weights: Vec::new(),
            points: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn weights(&self) -> &[T] {
        &self.weights
    }

    pub fn points(&self) -> &[Point<T, D>] {
        &self.points
    }

    pub fn iter(&self) -> impl Iterator<Item = (&T, &Point<T, D>)> {
        izip!(&self.weights, &self.points)
    }

    /// Consumes the rule and returns its parallel weight and point vectors.
    pub fn into_parts(self) -> (Vec<T>, Vec<Point<T, D>>) {
        (self.weights, self.points)
    }
}

impl<T: Scalar, const D: usize> Default for Quadrature<T, D> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: RealField, const D: usize> Quadrature<T, D> {
    /// Approximates the integral of the given function with this rule.
    pub fn integrate<F>(&self, f: F) -> T
    where
        F: Fn(&Point<T, D>) -> T,
    {
        let mut integral = T::zero();
        for (w, p) in self.iter() {
            integral += f(p) * w.clone();
        }
        integral
    }

    /// The sum of all weights, i.e. the measure the rule assigns to its domain.
    pub fn total_weight(&self) -> T {
        self.weights.iter().fold(T::zero(), |acc, w| acc + w.clone())
    }
}
