//! The feature vector shared by every crate in the workspace. A point is a dense `f32` coordinate
//! tuple tagged with the index of the image it was extracted from.
//! Points are immutable once built, containers own them by value and copies are explicit clones.
use serde::{Deserialize, Serialize};
use std::fmt;

/// The index of the source item (image) a point was extracted from.
pub type PointIndex = usize;

/// A fixed dimension feature vector.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    index: PointIndex,
    coords: Vec<f32>,
}

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Point")
            .field("index", &self.index)
            .field("coords", &self.coords)
            .finish()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{} {:?}", self.index, self.coords)
    }
}

impl Point {
    /// Builds a point, `None` if there are no coordinates.
    pub fn new(coords: Vec<f32>, index: PointIndex) -> Option<Point> {
        if coords.is_empty() {
            None
        } else {
            Some(Point { index, coords })
        }
    }

    /// Copies the coordinates out of a slice.
    pub fn from_slice(coords: &[f32], index: PointIndex) -> Option<Point> {
        Point::new(coords.to_vec(), index)
    }

    /// The source index
    #[inline]
    pub fn index(&self) -> PointIndex {
        self.index
    }

    /// The number of coordinates, always positive
    #[inline]
    pub fn dim(&self) -> usize {
        self.coords.len()
    }

    /// The coordinate on `axis`, `None` if the axis is out of range.
    #[inline]
    pub fn get(&self, axis: usize) -> Option<f32> {
        self.coords.get(axis).copied()
    }

    /// The coordinate on `axis`.
    ///
    /// # Panics
    /// If `axis >= self.dim()`.
    #[inline]
    pub fn coord(&self, axis: usize) -> f32 {
        self.coords[axis]
    }

    /// Borrow the coordinates.
    #[inline]
    pub fn coords(&self) -> &[f32] {
        &self.coords
    }

    /// True if every coordinate is finite
    pub fn is_finite(&self) -> bool {
        self.coords.iter().all(|c| c.is_finite())
    }

    /// The squared L2 distance to another point. Both points must share a dimension.
    #[inline]
    pub fn l2_squared(&self, other: &Point) -> f32 {
        l2_squared(&self.coords, &other.coords)
    }

    /// Gives the coordinates back.
    pub fn into_coords(self) -> Vec<f32> {
        self.coords
    }
}

/// The sum of squared coordinate differences. We never take the root, the ordering is the same.
#[inline]
pub fn l2_squared(x: &[f32], y: &[f32]) -> f32 {
    debug_assert_eq!(x.len(), y.len());
    x.iter()
        .zip(y)
        .map(|(xi, yi)| (xi - yi) * (xi - yi))
        .fold(0.0, |acc, d| acc + d)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    #[test]
    fn empty_coords_are_rejected() {
        assert!(Point::new(vec![], 3).is_none());
        assert!(Point::from_slice(&[], 0).is_none());
    }

    #[test]
    fn accessors() {
        let p = Point::new(vec![1.0, -2.0, 3.5], 7).unwrap();
        assert_eq!(p.index(), 7);
        assert_eq!(p.dim(), 3);
        assert_eq!(p.coord(1), -2.0);
        assert_eq!(p.get(2), Some(3.5));
        assert_eq!(p.get(3), None);
        assert!(p.is_finite());
        assert!(!Point::new(vec![f32::NAN], 0).unwrap().is_finite());
    }

    #[test]
    fn squared_distance() {
        let p = Point::new(vec![0.0, 0.0], 0).unwrap();
        let q = Point::new(vec![3.0, 4.0], 1).unwrap();
        assert_eq!(p.l2_squared(&q), 25.0);
        assert_eq!(q.l2_squared(&p), 25.0);
        assert_eq!(p.l2_squared(&p), 0.0);
    }

    #[test]
    fn clones_are_independent() {
        let p = Point::new(vec![1.0, 2.0], 4).unwrap();
        let q = p.clone();
        assert_eq!(p, q);
        assert_eq!(q.into_coords(), vec![1.0, 2.0]);
        assert_eq!(p.coords(), &[1.0, 2.0]);
    }
}
