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

//! The seam between the index and whatever turns an image into feature vectors.

use std::path::{Path, PathBuf};

use crate::errors::*;
use crate::loaders::read_feats;
use crate::{Point, PointIndex};

/// Something that can produce the ordered feature vectors of one item. Implementors must hand back
/// points that all share one dimension, tagged with `index`.
pub trait FeatureExtractor: Send + Sync {
    /// Extracts the features of the item at `path`, tagging each with `index`.
    fn extract(&self, path: &Path, index: PointIndex) -> FeatCloudResult<Vec<Point>>;
}

/// Reads precomputed `.feats` files. Given an image path it looks for the sibling file with the
/// `.feats` extension, a path that already ends in `.feats` or `.gz` is read directly.
#[derive(Debug, Clone, Default)]
pub struct FeatsFileExtractor {
    dim: Option<usize>,
}

impl FeatsFileExtractor {
    /// Accepts any dimension, as long as a file is consistent
    pub fn new() -> FeatsFileExtractor {
        FeatsFileExtractor { dim: None }
    }

    /// Rejects files whose points are not `dim` dimensional
    pub fn with_dim(dim: usize) -> FeatsFileExtractor {
        FeatsFileExtractor { dim: Some(dim) }
    }

    /// The file this extractor reads for `path`
    pub fn feats_path(path: &Path) -> PathBuf {
        match path.extension().and_then(|e| e.to_str()) {
            Some("feats") | Some("gz") => path.to_path_buf(),
            _ => path.with_extension("feats"),
        }
    }
}

impl FeatureExtractor for FeatsFileExtractor {
    fn extract(&self, path: &Path, index: PointIndex) -> FeatCloudResult<Vec<Point>> {
        let feats_path = FeatsFileExtractor::feats_path(path);
        let points = read_feats(&feats_path, index)?;
        if let Some(dim) = self.dim {
            if let Some(p) = points.iter().find(|p| p.dim() != dim) {
                return Err(FeatCloudError::dimension_mismatch(
                    dim,
                    p.dim(),
                    feats_path.to_string_lossy().to_string(),
                ));
            }
        }
        Ok(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loaders::write_feats;
    use tempdir::TempDir;

    #[test]
    fn image_path_maps_to_sibling_feats() {
        assert_eq!(
            FeatsFileExtractor::feats_path(Path::new("./images/img4.png")),
            PathBuf::from("./images/img4.feats")
        );
        assert_eq!(
            FeatsFileExtractor::feats_path(Path::new("img4.feats")),
            PathBuf::from("img4.feats")
        );
        assert_eq!(
            FeatsFileExtractor::feats_path(Path::new("img4.feats.gz")),
            PathBuf::from("img4.feats.gz")
        );
    }

    #[test]
    fn configured_dimension_is_enforced() {
        let dir = TempDir::new("extract").unwrap();
        let points = vec![Point::new(vec![1.0, 2.0, 3.0], 0).unwrap()];
        write_feats(dir.path().join("img0.feats"), 0, &points).unwrap();

        let image = dir.path().join("img0.png");
        assert_eq!(FeatsFileExtractor::new().extract(&image, 0).unwrap(), points);
        assert_eq!(
            FeatsFileExtractor::with_dim(3).extract(&image, 0).unwrap(),
            points
        );
        match FeatsFileExtractor::with_dim(2).extract(&image, 0) {
            Err(FeatCloudError::DimensionMismatch { expected, found, .. }) => {
                assert_eq!((expected, found), (2, 3))
            }
            other => panic!("expected a dimension mismatch, got {:?}", other),
        }
    }
}
