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

//! A numbered collection of images on disk, `DIRECTORY/PREFIX{i}SUFFIX` for `i` in `0..count`.

use log::{debug, info, warn};
use std::path::PathBuf;

use crate::errors::*;
use crate::extractor::FeatureExtractor;
use crate::loaders::write_feats;
use crate::Point;

/// The extension of precomputed feature files
pub const FEATS_EXTENSION: &str = ".feats";

/// Names every image of a dataset and the feature file that goes with it.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageSet {
    /// Directory holding the images, joined to the file name as a plain string prefix
    pub directory: String,
    /// File name prefix, followed by the image index
    pub prefix: String,
    /// Image extension including the dot
    pub suffix: String,
    /// The number of images, indexes run from `0` to `count - 1`
    pub count: usize,
}

impl ImageSet {
    /// Creates a new image set.
    pub fn new<S: Into<String>>(directory: S, prefix: S, suffix: S, count: usize) -> ImageSet {
        ImageSet {
            directory: directory.into(),
            prefix: prefix.into(),
            suffix: suffix.into(),
            count,
        }
    }

    fn with_suffix(&self, index: usize, suffix: &str) -> FeatCloudResult<PathBuf> {
        if index >= self.count {
            return Err(FeatCloudError::index_out_of_range(index, self.count));
        }
        Ok(PathBuf::from(format!(
            "{}{}{}{}",
            self.directory, self.prefix, index, suffix
        )))
    }

    /// The path of the image with the given index
    pub fn image_path(&self, index: usize) -> FeatCloudResult<PathBuf> {
        self.with_suffix(index, &self.suffix)
    }

    /// The path of the feature file of the image with the given index
    pub fn feats_path(&self, index: usize) -> FeatCloudResult<PathBuf> {
        self.with_suffix(index, FEATS_EXTENSION)
    }

    /// Extracts the features of every image. Images whose features can't be opened are skipped
    /// with a warning, any other error is fatal. Returns the points of all images, in image order,
    /// and the number of images that contributed.
    pub fn load_features<E: FeatureExtractor + ?Sized>(
        &self,
        extractor: &E,
    ) -> FeatCloudResult<(Vec<Point>, usize)> {
        self.collect_features(extractor, false)
    }

    /// Same as [`ImageSet::load_features`], and writes each extracted image out to its
    /// [`ImageSet::feats_path`] so later runs can read the features back without an extractor.
    /// Failing to write a feature file is fatal.
    pub fn extract_features<E: FeatureExtractor + ?Sized>(
        &self,
        extractor: &E,
    ) -> FeatCloudResult<(Vec<Point>, usize)> {
        self.collect_features(extractor, true)
    }

    fn collect_features<E: FeatureExtractor + ?Sized>(
        &self,
        extractor: &E,
        persist: bool,
    ) -> FeatCloudResult<(Vec<Point>, usize)> {
        let mut points = Vec::new();
        let mut loaded = 0;
        for i in 0..self.count {
            let path = self.image_path(i)?;
            match extractor.extract(&path, i) {
                Ok(image_points) => {
                    if persist {
                        let feats_path = self.feats_path(i)?;
                        write_feats(&feats_path, i, &image_points)?;
                        debug!("Wrote {} features to {:?}", image_points.len(), feats_path);
                    }
                    points.extend(image_points);
                    loaded += 1;
                }
                Err(FeatCloudError::IoError(e)) => {
                    warn!("Features of image {} ({:?}) could not be read: {}", i, path, e);
                }
                Err(e) => return Err(e),
            }
        }
        info!(
            "Loaded {} features from {} of {} images",
            points.len(),
            loaded,
            self.count
        );
        Ok((points, loaded))
    }
}
