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

//! Turns nearest neighbor results into a ranking of images.

use crate::errors::{KdirError, KdirResult};
use crate::{Neighbor, PointIndex};

/// Counts, per image, how many nearest neighbor results came from that image.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageVotes {
    hits: Vec<usize>,
}

impl ImageVotes {
    /// No votes for any of `num_images` images
    pub fn new(num_images: usize) -> ImageVotes {
        ImageVotes {
            hits: vec![0; num_images],
        }
    }

    /// Adds one hit per neighbor to the image it belongs to. Nothing is recorded if an index is
    /// past the last image.
    pub fn record(&mut self, neighbors: &[Neighbor]) -> KdirResult<()> {
        if let Some(n) = neighbors.iter().find(|n| n.index >= self.hits.len()) {
            return Err(KdirError::InvalidInput(format!(
                "neighbor index {} is past the last of {} images",
                n.index,
                self.hits.len()
            )));
        }
        for n in neighbors {
            self.hits[n.index] += 1;
        }
        Ok(())
    }

    /// Adds another tally to this one.
    pub fn merge(&mut self, other: &ImageVotes) -> KdirResult<()> {
        if other.hits.len() != self.hits.len() {
            return Err(KdirError::InvalidInput(format!(
                "cannot merge votes over {} images into votes over {}",
                other.hits.len(),
                self.hits.len()
            )));
        }
        for (a, b) in self.hits.iter_mut().zip(&other.hits) {
            *a += b;
        }
        Ok(())
    }

    /// The hits of every image, by image index
    pub fn hits(&self) -> &[usize] {
        &self.hits
    }

    /// Up to `n` images with the most hits, most first. Ties go to the lower image index.
    pub fn best(&self, n: usize) -> Vec<PointIndex> {
        let mut ranked: Vec<PointIndex> = (0..self.hits.len()).collect();
        // Stable, so equal hits stay in index order.
        ranked.sort_by(|a, b| self.hits[*b].cmp(&self.hits[*a]));
        ranked.truncate(n);
        ranked
    }
}
