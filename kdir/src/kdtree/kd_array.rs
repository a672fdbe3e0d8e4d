/*
* Licensed to Elasticsearch B.V. under one or more contributor
* license agreements. See the NOTICE file distributed with
* this work for additional information regarding copyright
* ownership. Elasticsearch B.V. licenses this file to you under
* the Apache License, Version 2.0 (the "License"); you may
* not use this file except in compliance with the License.
* You may obtain a copy of the License at
*
*  http://www.apache.org/licenses/LICENSE-2.0
*
* Unless required by applicable law or agreed to in writing,
* software distributed under the License is distributed on an
* "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
* KIND, either express or implied.  See the License for the
* specific language governing permissions and limitations
* under the License.
*/

//! The pre-sorted coordinate index the tree is built from.
//!
//! A `KdArray` owns a set of points and, for every axis, the positions of those points sorted by
//! that coordinate. Splitting it by rank along an axis filters each sorted order into two halves
//! in linear time, so the tree never sorts anything after the initial index is built.

use std::cmp::Ordering;

use crate::errors::{KdirError, KdirResult};
use crate::Point;

/// A point set with one sorted permutation of positions per axis.
#[derive(Debug, Clone)]
pub struct KdArray {
    points: Vec<Point>,
    axis_order: Vec<Vec<usize>>,
}

fn reserved<T>(len: usize) -> KdirResult<Vec<T>> {
    let mut v = Vec::new();
    v.try_reserve_exact(len)?;
    Ok(v)
}

impl KdArray {
    /// Indexes a point set. Fails if the set is empty, the dimensions disagree, or a coordinate is
    /// not finite. Equal coordinates keep the order the points were given in.
    pub fn new(points: Vec<Point>) -> KdirResult<KdArray> {
        let dim = match points.first() {
            Some(p) => p.dim(),
            None => {
                return Err(KdirError::InvalidInput(
                    "cannot index an empty point set".to_string(),
                ))
            }
        };
        for (position, point) in points.iter().enumerate() {
            if point.dim() != dim {
                return Err(KdirError::InvalidInput(format!(
                    "point {} has dimension {}, the first point has dimension {}",
                    position,
                    point.dim(),
                    dim
                )));
            }
            if !point.is_finite() {
                return Err(KdirError::InvalidInput(format!(
                    "point {} has a coordinate that is not finite",
                    position
                )));
            }
        }

        let len = points.len();
        let mut axis_order = reserved(dim)?;
        for axis in 0..dim {
            let mut order: Vec<usize> = reserved(len)?;
            order.extend(0..len);
            // Stable, so ties stay in position order. Coordinates are finite here.
            order.sort_by(|&i, &j| {
                points[i]
                    .coord(axis)
                    .partial_cmp(&points[j].coord(axis))
                    .unwrap_or(Ordering::Equal)
            });
            axis_order.push(order);
        }
        Ok(KdArray { points, axis_order })
    }

    /// Same as [`KdArray::new`], but clones the points out of a slice.
    pub fn from_slice(points: &[Point]) -> KdirResult<KdArray> {
        let mut owned = reserved(points.len())?;
        owned.extend_from_slice(points);
        KdArray::new(owned)
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Never true for an array that was successfully built or split
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Dimension shared by every point
    pub fn dim(&self) -> usize {
        self.axis_order.len()
    }

    /// The points, in the order the array holds them
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Positions into [`KdArray::points`] sorted by the coordinate on `axis`.
    pub fn axis_order(&self, axis: usize) -> KdirResult<&[usize]> {
        self.axis_order
            .get(axis)
            .map(|o| &o[..])
            .ok_or_else(|| self.bad_axis(axis))
    }

    /// The point with the given rank on an axis
    fn ranked(&self, axis: usize, rank: usize) -> f32 {
        self.points[self.axis_order[axis][rank]].coord(axis)
    }

    fn bad_axis(&self, axis: usize) -> KdirError {
        KdirError::InvalidInput(format!(
            "axis {} is out of range for dimension {}",
            axis,
            self.dim()
        ))
    }

    /// Largest minus smallest coordinate on `axis`.
    pub fn spread(&self, axis: usize) -> KdirResult<f32> {
        if axis >= self.dim() {
            return Err(self.bad_axis(axis));
        }
        Ok(self.ranked(axis, self.len() - 1) - self.ranked(axis, 0))
    }

    /// The coordinate on `axis` of the point with rank `⌈n/2⌉`, the first point of the high half
    /// of a split. Needs at least two points.
    pub fn median_value(&self, axis: usize) -> KdirResult<f32> {
        if axis >= self.dim() {
            return Err(self.bad_axis(axis));
        }
        if self.len() < 2 {
            return Err(KdirError::InvalidInput(
                "a single point has no median".to_string(),
            ));
        }
        Ok(self.ranked(axis, (self.len() + 1) / 2))
    }

    /// Consumes the array and splits it by rank on `axis`. The low half gets the `⌈n/2⌉` points
    /// that come first in that axis' order, the high half gets the rest. Every other axis' order is
    /// filtered into the halves with positions remapped, so both halves stay sorted.
    ///
    /// Points with the same coordinate as the median may land on either side.
    pub fn split(self, axis: usize) -> KdirResult<(KdArray, KdArray)> {
        if axis >= self.dim() {
            return Err(self.bad_axis(axis));
        }
        let len = self.len();
        if len < 2 {
            return Err(KdirError::InvalidInput(format!(
                "cannot split an array of {} point",
                len
            )));
        }
        let low_len = (len + 1) / 2;
        let high_len = len - low_len;

        let KdArray { points, axis_order } = self;

        let mut in_low: Vec<bool> = reserved(len)?;
        in_low.resize(len, false);
        for &position in &axis_order[axis][..low_len] {
            in_low[position] = true;
        }

        // Positions in the new halves, in the order the parent held the points.
        let mut remapped: Vec<usize> = reserved(len)?;
        let mut low_points = reserved(low_len)?;
        let mut high_points = reserved(high_len)?;
        for (position, point) in points.into_iter().enumerate() {
            if in_low[position] {
                remapped.push(low_points.len());
                low_points.push(point);
            } else {
                remapped.push(high_points.len());
                high_points.push(point);
            }
        }

        let dim = axis_order.len();
        let mut low_order = reserved(dim)?;
        let mut high_order = reserved(dim)?;
        for order in axis_order {
            let mut low: Vec<usize> = reserved(low_len)?;
            let mut high: Vec<usize> = reserved(high_len)?;
            for position in order {
                if in_low[position] {
                    low.push(remapped[position]);
                } else {
                    high.push(remapped[position]);
                }
            }
            low_order.push(low);
            high_order.push(high);
        }

        Ok((
            KdArray {
                points: low_points,
                axis_order: low_order,
            },
            KdArray {
                points: high_points,
                axis_order: high_order,
            },
        ))
    }

    /// Takes the only point out of a one point array.
    pub(crate) fn into_single(self) -> KdirResult<Point> {
        let len = self.len();
        match self.points.into_iter().next() {
            Some(point) if len == 1 => Ok(point),
            _ => Err(KdirError::InvalidInput(format!(
                "expected a single point, the array holds {}",
                len
            ))),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    pub fn random_points(count: usize, dim: usize, seed: u64) -> Vec<Point> {
        let mut rng = SmallRng::seed_from_u64(seed);
        (0..count)
            .map(|i| Point::new((0..dim).map(|_| rng.gen_range(-10.0f32..10.0)).collect(), i).unwrap())
            .collect()
    }

    fn pts(coords: &[&[f32]]) -> Vec<Point> {
        coords
            .iter()
            .enumerate()
            .map(|(i, c)| Point::from_slice(c, i).unwrap())
            .collect()
    }

    fn assert_sorted(array: &KdArray) {
        for axis in 0..array.dim() {
            let order = array.axis_order(axis).unwrap();
            assert_eq!(order.len(), array.len());
            for w in order.windows(2) {
                assert!(array.points()[w[0]].coord(axis) <= array.points()[w[1]].coord(axis));
            }
            let mut seen = order.to_vec();
            seen.sort_unstable();
            assert_eq!(seen, (0..array.len()).collect::<Vec<usize>>());
        }
    }

    #[test]
    fn orders_are_sorted() {
        let array = KdArray::new(pts(&[&[3.0, 1.0], &[1.0, 2.0], &[2.0, 0.0]])).unwrap();
        assert_eq!(array.axis_order(0).unwrap(), &[1, 2, 0]);
        assert_eq!(array.axis_order(1).unwrap(), &[2, 0, 1]);
        assert_sorted(&array);
        assert_sorted(&KdArray::new(random_points(200, 5, 0)).unwrap());
    }

    #[test]
    fn ties_keep_position_order() {
        let array = KdArray::new(pts(&[&[1.0], &[0.0], &[1.0], &[1.0]])).unwrap();
        assert_eq!(array.axis_order(0).unwrap(), &[1, 0, 2, 3]);
    }

    #[test]
    fn rejects_bad_sets() {
        match KdArray::new(vec![]) {
            Err(KdirError::InvalidInput(_)) => {}
            other => panic!("expected invalid input, got {:?}", other),
        }
        match KdArray::new(pts(&[&[1.0, 2.0], &[1.0]])) {
            Err(KdirError::InvalidInput(_)) => {}
            other => panic!("expected invalid input, got {:?}", other),
        }
        match KdArray::new(pts(&[&[1.0, f32::NAN]])) {
            Err(KdirError::InvalidInput(_)) => {}
            other => panic!("expected invalid input, got {:?}", other),
        }
    }

    #[test]
    fn spread_and_median() {
        let array = KdArray::new(pts(&[&[0.0, 0.0], &[1.0, 1.0], &[5.0, 5.0], &[6.0, 6.5]])).unwrap();
        assert_eq!(array.spread(0).unwrap(), 6.0);
        assert_eq!(array.spread(1).unwrap(), 6.5);
        assert_eq!(array.median_value(0).unwrap(), 5.0);
        assert!(array.spread(2).is_err());
        let single = KdArray::new(pts(&[&[1.0]])).unwrap();
        assert_eq!(single.spread(0).unwrap(), 0.0);
        assert!(single.median_value(0).is_err());
    }

    #[test]
    fn split_partitions_by_rank() {
        let points = pts(&[&[4.0, 0.0], &[0.0, 3.0], &[3.0, 1.0], &[1.0, 4.0], &[2.0, 2.0]]);
        let (low, high) = KdArray::new(points).unwrap().split(0).unwrap();
        assert_eq!(low.len(), 3);
        assert_eq!(high.len(), 2);
        let mut low_indexes: Vec<usize> = low.points().iter().map(|p| p.index()).collect();
        low_indexes.sort_unstable();
        assert_eq!(low_indexes, vec![1, 3, 4]);
        let mut high_indexes: Vec<usize> = high.points().iter().map(|p| p.index()).collect();
        high_indexes.sort_unstable();
        assert_eq!(high_indexes, vec![0, 2]);
        assert_sorted(&low);
        assert_sorted(&high);
    }

    #[test]
    fn split_is_a_disjoint_cover() {
        let points = random_points(101, 4, 7);
        for axis in 0..4 {
            let (low, high) = KdArray::new(points.clone()).unwrap().split(axis).unwrap();
            assert_eq!(low.len(), 51);
            assert_eq!(high.len(), 50);
            assert_sorted(&low);
            assert_sorted(&high);
            let max_low = low.points().iter().map(|p| p.coord(axis)).fold(f32::MIN, f32::max);
            let min_high = high.points().iter().map(|p| p.coord(axis)).fold(f32::MAX, f32::min);
            assert!(max_low <= min_high);
            let mut indexes: Vec<usize> = low
                .points()
                .iter()
                .chain(high.points().iter())
                .map(|p| p.index())
                .collect();
            indexes.sort_unstable();
            assert_eq!(indexes, (0..101).collect::<Vec<usize>>());
        }
    }

    #[test]
    fn split_rejects_bad_arguments() {
        let array = KdArray::new(pts(&[&[0.0, 1.0], &[1.0, 0.0]])).unwrap();
        assert!(array.clone().split(2).is_err());
        let (low, _high) = array.split(1).unwrap();
        assert_eq!(low.len(), 1);
        assert_eq!(low.points()[0].index(), 1);
        assert!(low.split(0).is_err());
    }
}
