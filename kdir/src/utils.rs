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

//! Utility functions for reading configuration and checking search answers

use std::fs::read_to_string;
use std::path::Path;
use yaml_rust::{Yaml, YamlLoader};

use crate::errors::{KdirError, KdirResult};
use crate::*;
use featcloud::errors::ParsingError;

/// Reads the first document of a yaml file.
pub fn load_yaml<P: AsRef<Path>>(path: P) -> KdirResult<Yaml> {
    let file_name = path.as_ref().to_string_lossy().to_string();
    let config = read_to_string(&path)?;
    let mut params_files = YamlLoader::load_from_str(&config).map_err(|_| {
        KdirError::ParsingError(ParsingError::MalformedYamlError {
            file_name: file_name.clone(),
            field: "document".to_string(),
        })
    })?;
    if params_files.is_empty() {
        return Err(KdirError::ParsingError(ParsingError::MissingYamlError {
            file_name,
            field: "document".to_string(),
        }));
    }
    Ok(params_files.swap_remove(0))
}

/// The exact `k` nearest neighbors of the query by exhaustive scan, ordered like a
/// [`BoundedPriorityQueue`] orders them.
pub fn brute_force_knn(points: &[Point], query: &Point, k: usize) -> KdirResult<Vec<Neighbor>> {
    let mut queue = BoundedPriorityQueue::new(k)?;
    for point in points {
        if point.dim() != query.dim() {
            return Err(KdirError::InvalidInput(format!(
                "point of dimension {} compared to a query of dimension {}",
                point.dim(),
                query.dim()
            )));
        }
        queue.enqueue(Neighbor::new(point.index(), point.l2_squared(query)))?;
    }
    Ok(queue.into_vec())
}
