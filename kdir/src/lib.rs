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

#![deny(warnings)]
#![warn(missing_docs)]
#![doc(test(attr(allow(unused_variables), deny(warnings))))]

//! # kdir
//! A KD-tree for finding the images most similar to a query image by their local features.
//!
//! Every image is reduced to a set of feature vectors of one shared dimension. All of them go into
//! a single [`KdArray`], which sorts the points once per axis. The [`KdTreeBuilder`] then splits
//! that array by rank, recursively, until every leaf holds one point. A query image's features are
//! each searched for their `k` nearest neighbors with a branch and bound walk that keeps its best
//! candidates in a [`BoundedPriorityQueue`], and every neighbor is a vote for the image it came
//! from, see [`ImageVotes`].
//!
//! ## Split methods
//! The axis a node splits on is picked by one [`SplitMethod`] for the whole tree. `MaxSpread` is
//! the one to use unless you have a reason not to, it takes the axis where the points are most
//! spread out. `Incremental` cycles through the axes by depth and `Random` picks one uniformly,
//! both are cheaper to pick but give looser trees on skewed data.
//!
//! Distances are squared L2 everywhere. The search visits the far side of a split only while the
//! queue has room or the split plane is closer than the worst neighbor kept.
//!
//! ```rust
//! # use kdir::*;
//! let points = vec![
//!     Point::new(vec![0.0, 0.0], 0).unwrap(),
//!     Point::new(vec![1.0, 1.0], 1).unwrap(),
//!     Point::new(vec![5.0, 5.0], 2).unwrap(),
//!     Point::new(vec![6.0, 6.0], 3).unwrap(),
//! ];
//! let tree = KdTreeBuilder::new().build(KdArray::new(points).unwrap()).unwrap();
//! let neighbors = tree.knn(&Point::new(vec![0.1, 0.1], 0).unwrap(), 2).unwrap();
//! assert_eq!(neighbors[0].index, 0);
//! assert_eq!(neighbors[1].index, 1);
//! ```

#[cfg(test)]
#[macro_use]
extern crate assert_approx_eq;

pub mod errors;
pub use errors::{KdirError, KdirResult};

mod kdtree;
pub use kdtree::*;

pub mod query_interface;
pub mod utils;

mod votes;
pub use votes::ImageVotes;

pub use core_kdir::{l2_squared, Point, PointIndex};
