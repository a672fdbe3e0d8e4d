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

//! A capacity limited, always sorted collection of the best neighbors seen so far.

use std::slice;

use super::query_items::Neighbor;
use crate::errors::{KdirError, KdirResult};

/// Keeps the `capacity` smallest neighbors it has been offered, ordered by distance and then by
/// index. Backed by a sorted `Vec`, insertion is a binary search plus a shift.
///
/// ```rust
/// # use kdir::{BoundedPriorityQueue, Neighbor};
/// let mut queue = BoundedPriorityQueue::new(2).unwrap();
/// queue.enqueue(Neighbor::new(4, 3.0)).unwrap();
/// queue.enqueue(Neighbor::new(1, 0.5)).unwrap();
/// assert!(!queue.enqueue(Neighbor::new(9, 3.0)).unwrap());
/// assert_eq!(queue.peek_min().unwrap().index, 1);
/// ```
#[derive(Debug, Clone)]
pub struct BoundedPriorityQueue {
    items: Vec<Neighbor>,
    capacity: usize,
}

impl BoundedPriorityQueue {
    /// An empty queue that holds at most `capacity` neighbors. The capacity must be positive.
    pub fn new(capacity: usize) -> KdirResult<BoundedPriorityQueue> {
        if capacity == 0 {
            return Err(KdirError::InvalidArgument("queue capacity must be positive"));
        }
        Ok(BoundedPriorityQueue {
            items: Vec::with_capacity(capacity),
            capacity,
        })
    }

    /// Offers a neighbor to the queue. Returns whether it was stored. When the queue is full a
    /// neighbor that isn't strictly smaller than the current maximum is dropped, otherwise it
    /// replaces the maximum. The distance must be non-negative and not NaN, infinity is allowed.
    pub fn enqueue(&mut self, neighbor: Neighbor) -> KdirResult<bool> {
        if !neighbor.is_valid() {
            return Err(KdirError::InvalidArgument(
                "neighbor distances must be non-negative and not NaN",
            ));
        }
        if self.is_full() {
            match self.items.last() {
                Some(max) if neighbor < *max => {
                    self.items.pop();
                }
                _ => return Ok(false),
            }
        }
        let position = self.items.partition_point(|n| *n < neighbor);
        self.items.insert(position, neighbor);
        Ok(true)
    }

    /// Removes and returns the smallest neighbor.
    pub fn dequeue_min(&mut self) -> KdirResult<Neighbor> {
        if self.items.is_empty() {
            return Err(KdirError::Empty);
        }
        Ok(self.items.remove(0))
    }

    /// The smallest neighbor
    pub fn peek_min(&self) -> KdirResult<Neighbor> {
        self.items.first().copied().ok_or(KdirError::Empty)
    }

    /// The largest neighbor, the first to be evicted
    pub fn peek_max(&self) -> KdirResult<Neighbor> {
        self.items.last().copied().ok_or(KdirError::Empty)
    }

    /// Distance of the smallest neighbor
    pub fn min_value(&self) -> KdirResult<f32> {
        self.peek_min().map(|n| n.dist)
    }

    /// Distance of the largest neighbor
    pub fn max_value(&self) -> KdirResult<f32> {
        self.peek_max().map(|n| n.dist)
    }

    /// Number of stored neighbors
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True if nothing is stored
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// True if the queue holds `capacity` neighbors
    pub fn is_full(&self) -> bool {
        self.items.len() == self.capacity
    }

    /// The most neighbors this queue will hold
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Removes everything, the capacity stays.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Removes everything and changes the capacity, which must be positive.
    pub fn set_capacity(&mut self, capacity: usize) -> KdirResult<()> {
        if capacity == 0 {
            return Err(KdirError::InvalidArgument("queue capacity must be positive"));
        }
        self.items.clear();
        self.items.shrink_to(capacity);
        self.items.reserve_exact(capacity);
        self.capacity = capacity;
        Ok(())
    }

    /// The neighbors from smallest to largest
    pub fn iter(&self) -> slice::Iter<'_, Neighbor> {
        self.items.iter()
    }

    /// The neighbors from smallest to largest
    pub fn as_slice(&self) -> &[Neighbor] {
        &self.items
    }

    /// Unpacks the queue into its sorted neighbors.
    pub fn into_vec(self) -> Vec<Neighbor> {
        self.items
    }
}

impl<'a> IntoIterator for &'a BoundedPriorityQueue {
    type Item = &'a Neighbor;
    type IntoIter = slice::Iter<'a, Neighbor>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
