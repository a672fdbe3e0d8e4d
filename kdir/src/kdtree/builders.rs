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

//! Building a tree out of a [`KdArray`], and how each node picks the axis it splits on.

use log::{debug, info};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Instant;
use yaml_rust::Yaml;

use super::kd_array::KdArray;
use super::node::KdNode;
use super::tree::KdTree;
use crate::errors::{KdirError, KdirResult};
use crate::utils::load_yaml;
use featcloud::errors::ParsingError;

/// How a node picks the axis it splits on. Fixed for a whole tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitMethod {
    /// The axis with the largest spread, the lowest such axis on a tie
    MaxSpread,
    /// A uniformly random axis per node
    Random,
    /// The axis after the parent's, wrapping around
    Incremental,
}

impl Default for SplitMethod {
    fn default() -> SplitMethod {
        SplitMethod::MaxSpread
    }
}

impl FromStr for SplitMethod {
    type Err = KdirError;

    fn from_str(s: &str) -> KdirResult<SplitMethod> {
        match s.trim().to_ascii_uppercase().as_str() {
            "MAX_SPREAD" => Ok(SplitMethod::MaxSpread),
            "RANDOM" => Ok(SplitMethod::Random),
            "INCREMENTAL" => Ok(SplitMethod::Incremental),
            _ => Err(KdirError::InvalidInput(format!(
                "unknown split method {:?}, expected MAX_SPREAD, RANDOM or INCREMENTAL",
                s
            ))),
        }
    }
}

impl fmt::Display for SplitMethod {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SplitMethod::MaxSpread => write!(f, "MAX_SPREAD"),
            SplitMethod::Random => write!(f, "RANDOM"),
            SplitMethod::Incremental => write!(f, "INCREMENTAL"),
        }
    }
}

/// A construction object for a KD-tree.
#[derive(Debug, Clone, Default)]
pub struct KdTreeBuilder {
    /// See [`SplitMethod`]
    pub split_method: SplitMethod,
    /// The axis the root treats as its parent's split axis. Defaults to the last axis, so an
    /// incremental tree starts on axis 0. Values past the last axis wrap around, so setting it to
    /// the dimension starts the root on axis 1 instead.
    pub start_axis: Option<usize>,
    /// Seed for the random split method. Seeded from entropy when unset.
    pub rng_seed: Option<u64>,
}

fn malformed(file_name: &str, field: &str) -> KdirError {
    KdirError::ParsingError(ParsingError::MalformedYamlError {
        file_name: file_name.to_string(),
        field: field.to_string(),
    })
}

/// Reads an optional non-negative integer, anything other than an integer or nothing is an error.
fn yaml_usize(params: &Yaml, file_name: &str, field: &str) -> KdirResult<Option<usize>> {
    match &params[field] {
        Yaml::BadValue | Yaml::Null => Ok(None),
        Yaml::Integer(i) if *i >= 0 => Ok(Some(*i as usize)),
        _ => Err(malformed(file_name, field)),
    }
}

impl KdTreeBuilder {
    /// Creates a builder with the max spread split method.
    pub fn new() -> KdTreeBuilder {
        KdTreeBuilder::default()
    }

    /// Reads the builder parameters out of a yaml file. Every key is optional.
    ///
    /// ```yaml
    /// ---
    /// split_method: MAX_SPREAD
    /// start_axis: 0
    /// rng_seed: 42
    /// ```
    pub fn from_yaml<P: AsRef<Path>>(path: P) -> KdirResult<KdTreeBuilder> {
        let file_name = path.as_ref().to_string_lossy().to_string();
        let params = load_yaml(&path)?;
        KdTreeBuilder::from_yaml_params(&params, &file_name)
    }

    /// Reads the builder parameters out of an already parsed yaml document.
    pub fn from_yaml_params(params: &Yaml, file_name: &str) -> KdirResult<KdTreeBuilder> {
        let split_method = match &params["split_method"] {
            Yaml::BadValue | Yaml::Null => SplitMethod::default(),
            Yaml::String(s) => s.parse()?,
            _ => return Err(malformed(file_name, "split_method")),
        };
        let rng_seed = match &params["rng_seed"] {
            Yaml::BadValue | Yaml::Null => None,
            Yaml::Integer(i) => Some(*i as u64),
            _ => return Err(malformed(file_name, "rng_seed")),
        };
        Ok(KdTreeBuilder {
            split_method,
            start_axis: yaml_usize(params, file_name, "start_axis")?,
            rng_seed,
        })
    }

    /// See [`SplitMethod`]
    pub fn set_split_method(&mut self, x: SplitMethod) -> &mut Self {
        self.split_method = x;
        self
    }
    /// See [`KdTreeBuilder::start_axis`]
    pub fn set_start_axis(&mut self, x: usize) -> &mut Self {
        self.start_axis = Some(x);
        self
    }
    /// See [`KdTreeBuilder::rng_seed`]
    pub fn set_rng_seed(&mut self, x: u64) -> &mut Self {
        self.rng_seed = Some(x);
        self
    }

    /// Builds a tree out of the array, consuming it. Random splits draw from a `SmallRng`.
    pub fn build(&self, array: KdArray) -> KdirResult<KdTree> {
        let mut rng = match self.rng_seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        self.build_with_rng(array, &mut rng)
    }

    /// Same as [`KdTreeBuilder::build`], with random splits drawn from the given source.
    pub fn build_with_rng<R: Rng + ?Sized>(&self, array: KdArray, rng: &mut R) -> KdirResult<KdTree> {
        let dim = array.dim();
        let len = array.len();
        let start_axis = self.start_axis.unwrap_or(dim - 1) % dim;
        debug!(
            "Building a tree over {} points of dimension {} with {} splits",
            len, dim, self.split_method
        );

        let start = Instant::now();
        let root = build_node(array, self.split_method, start_axis, rng)?;
        let tree = KdTree::new(root, dim, len, self.split_method);
        info!(
            "Built a tree of height {} over {} points in {:?}",
            tree.height(),
            len,
            start.elapsed()
        );
        Ok(tree)
    }
}

fn select_axis<R: Rng + ?Sized>(
    array: &KdArray,
    method: SplitMethod,
    last_axis: usize,
    rng: &mut R,
) -> KdirResult<usize> {
    let dim = array.dim();
    match method {
        SplitMethod::MaxSpread => {
            let mut best_axis = 0;
            let mut best_spread = array.spread(0)?;
            for axis in 1..dim {
                let spread = array.spread(axis)?;
                if spread > best_spread {
                    best_axis = axis;
                    best_spread = spread;
                }
            }
            Ok(best_axis)
        }
        SplitMethod::Random => Ok(rng.gen_range(0..dim)),
        SplitMethod::Incremental => Ok((last_axis + 1) % dim),
    }
}

fn build_node<R: Rng + ?Sized>(
    array: KdArray,
    method: SplitMethod,
    last_axis: usize,
    rng: &mut R,
) -> KdirResult<KdNode> {
    if array.len() == 1 {
        return Ok(KdNode::Leaf(array.into_single()?));
    }
    let split_axis = select_axis(&array, method, last_axis, rng)?;
    let split_value = array.median_value(split_axis)?;
    let (low, high) = array.split(split_axis)?;
    let left = build_node(low, method, split_axis, rng)?;
    let right = build_node(high, method, split_axis, rng)?;
    Ok(KdNode::Internal {
        split_axis,
        split_value,
        left: Box::new(left),
        right: Box::new(right),
    })
}
