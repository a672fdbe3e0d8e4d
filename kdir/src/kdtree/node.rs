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

use log::trace;

use super::query_tools::{BoundedPriorityQueue, Neighbor};
use crate::Point;

/// A node of the tree. Leaves own exactly one point, internal nodes own both of their children.
#[derive(Debug, Clone)]
pub enum KdNode {
    /// Holds a single point
    Leaf(Point),
    /// Splits its points on one axis
    Internal {
        /// The axis this node splits on
        split_axis: usize,
        /// Coordinate of the first point of the high half, on `split_axis`
        split_value: f32,
        /// The low half
        left: Box<KdNode>,
        /// The high half
        right: Box<KdNode>,
    },
}

impl KdNode {
    /// True if this node has no children
    pub fn is_leaf(&self) -> bool {
        matches!(self, KdNode::Leaf(_))
    }

    /// The point of a leaf
    pub fn point(&self) -> Option<&Point> {
        match self {
            KdNode::Leaf(point) => Some(point),
            KdNode::Internal { .. } => None,
        }
    }

    /// The split axis and value of an internal node
    pub fn split(&self) -> Option<(usize, f32)> {
        match self {
            KdNode::Leaf(_) => None,
            KdNode::Internal {
                split_axis,
                split_value,
                ..
            } => Some((*split_axis, *split_value)),
        }
    }

    /// The low and high children of an internal node
    pub fn children(&self) -> Option<(&KdNode, &KdNode)> {
        match self {
            KdNode::Leaf(_) => None,
            KdNode::Internal { left, right, .. } => Some((&**left, &**right)),
        }
    }

    /// Number of edges on the longest path down to a leaf
    pub fn height(&self) -> usize {
        match self.children() {
            None => 0,
            Some((left, right)) => 1 + left.height().max(right.height()),
        }
    }

    /// Walks the subtree, offering every point that could beat the queue's current worst to the
    /// queue. The near side of a split is searched first, the far side only while the queue has
    /// room or the split plane is closer than the worst neighbor kept so far.
    pub(crate) fn knn(&self, query: &Point, queue: &mut BoundedPriorityQueue) {
        match self {
            KdNode::Leaf(point) => {
                let neighbor = Neighbor::new(point.index(), point.l2_squared(query));
                if let Err(e) = queue.enqueue(neighbor) {
                    trace!("Dropped {}: {}", neighbor, e);
                }
            }
            KdNode::Internal {
                split_axis,
                split_value,
                left,
                right,
            } => {
                let coord = query.coord(*split_axis);
                let (near, far) = if coord <= *split_value {
                    (left, right)
                } else {
                    (right, left)
                };
                near.knn(query, queue);

                let gap = split_value - coord;
                let visit_far = match queue.max_value() {
                    Ok(worst) if queue.is_full() => gap * gap < worst,
                    _ => true,
                };
                if visit_far {
                    far.knn(query, queue);
                }
            }
        }
    }
}

/// Iterates over the leaves of a subtree, left to right.
pub struct Leaves<'a> {
    stack: Vec<&'a KdNode>,
}

impl<'a> Leaves<'a> {
    pub(crate) fn new(root: &'a KdNode) -> Leaves<'a> {
        Leaves { stack: vec![root] }
    }
}

impl<'a> Iterator for Leaves<'a> {
    type Item = &'a Point;

    fn next(&mut self) -> Option<&'a Point> {
        while let Some(node) = self.stack.pop() {
            match node {
                KdNode::Leaf(point) => return Some(point),
                KdNode::Internal { left, right, .. } => {
                    self.stack.push(&**right);
                    self.stack.push(&**left);
                }
            }
        }
        None
    }
}
