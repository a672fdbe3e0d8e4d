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

use super::builders::SplitMethod;
use super::node::{KdNode, Leaves};
use super::query_tools::{BoundedPriorityQueue, Neighbor};
use crate::errors::{KdirError, KdirResult};
use crate::Point;

/// A built KD-tree. It is never modified after it is built, so it can be shared between threads
/// behind an `Arc` while every search brings its own queue.
#[derive(Debug, Clone)]
pub struct KdTree {
    root: KdNode,
    dim: usize,
    len: usize,
    split_method: SplitMethod,
}

impl KdTree {
    pub(crate) fn new(root: KdNode, dim: usize, len: usize, split_method: SplitMethod) -> KdTree {
        KdTree {
            root,
            dim,
            len,
            split_method,
        }
    }

    /// The root node
    pub fn root(&self) -> &KdNode {
        &self.root
    }

    /// Dimension of every point in the tree
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of points, one per leaf
    pub fn len(&self) -> usize {
        self.len
    }

    /// A built tree holds at least one point
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The method used to choose split axes
    pub fn split_method(&self) -> SplitMethod {
        self.split_method
    }

    /// Number of edges on the longest root to leaf path
    pub fn height(&self) -> usize {
        self.root.height()
    }

    /// The points of the tree, in leaf order
    pub fn leaves(&self) -> Leaves<'_> {
        Leaves::new(&self.root)
    }

    fn check_query(&self, query: &Point) -> KdirResult<()> {
        if query.dim() != self.dim {
            return Err(KdirError::InvalidInput(format!(
                "query has dimension {}, the tree has dimension {}",
                query.dim(),
                self.dim
            )));
        }
        if !query.is_finite() {
            return Err(KdirError::InvalidInput(
                "query has a coordinate that is not finite".to_string(),
            ));
        }
        Ok(())
    }

    /// Searches for the nearest neighbors of the query, filling the queue. The queue's capacity is
    /// the number of neighbors found, anything already in it competes with the tree's points.
    /// Distances are squared L2.
    pub fn knn_into(&self, query: &Point, queue: &mut BoundedPriorityQueue) -> KdirResult<()> {
        self.check_query(query)?;
        self.root.knn(query, queue);
        Ok(())
    }

    /// The `k` nearest neighbors of the query, closest first.
    pub fn knn(&self, query: &Point, k: usize) -> KdirResult<Vec<Neighbor>> {
        let mut queue = BoundedPriorityQueue::new(k)?;
        self.knn_into(query, &mut queue)?;
        Ok(queue.into_vec())
    }
}
