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

use crate::PointIndex;
use std::cmp::Ordering;
use std::fmt;

/// A search result, the index of a point and its squared distance to the query.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Neighbor {
    /// Index of the point, the image it was extracted from
    pub index: PointIndex,
    /// Squared L2 distance to the query
    pub dist: f32,
}

impl Neighbor {
    /// Pairs an index with a squared distance.
    pub fn new(index: PointIndex, dist: f32) -> Neighbor {
        Neighbor { index, dist }
    }

    /// Squared distances between far apart finite points can overflow to infinity, those still
    /// order after every finite distance.
    pub(crate) fn is_valid(&self) -> bool {
        !self.dist.is_nan() && self.dist >= 0.0
    }
}

impl Eq for Neighbor {}

impl Ord for Neighbor {
    fn cmp(&self, other: &Neighbor) -> Ordering {
        self.partial_cmp(other).unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for Neighbor {
    fn partial_cmp(&self, other: &Neighbor) -> Option<Ordering> {
        match self.dist.partial_cmp(&other.dist)? {
            Ordering::Equal => Some(self.index.cmp(&other.index)),
            o => Some(o),
        }
    }
}

impl fmt::Display for Neighbor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}@{}", self.index, self.dist)
    }
}
