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

use flate2::read::GzDecoder;
use log::{debug, warn};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::errors::*;
use crate::{Point, PointIndex};

/// Reads a `.feats` file. The layout is
///
/// ```text
/// IMAGE_INDEX
/// FEATURE_COUNT
/// DIM INDEX C_0 C_1 ... C_{DIM-1}
/// ...
/// ```
///
/// Every point read is tagged with `image_index`, not with the index stored in the file, so a set of
/// files can be renumbered by the caller. Files ending in `.gz` are decompressed on the fly.
pub fn read_feats<P: AsRef<Path>>(path: P, image_index: PointIndex) -> FeatCloudResult<Vec<Point>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    if path.extension().map(|e| e == "gz").unwrap_or(false) {
        parse_feats(path, BufReader::new(GzDecoder::new(file)), image_index)
    } else {
        parse_feats(path, BufReader::new(file), image_index)
    }
}

fn feats_error(path: &Path, line_number: usize, key: &str) -> FeatCloudError {
    FeatCloudError::ParsingError(ParsingError::FeatsReadError {
        file_name: path.to_string_lossy().to_string(),
        line_number,
        key: key.to_string(),
    })
}

fn parse_feats<R: Read>(
    path: &Path,
    reader: BufReader<R>,
    image_index: PointIndex,
) -> FeatCloudResult<Vec<Point>> {
    let mut lines = reader
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l))
        .filter(|(_, l)| l.as_ref().map(|s| !s.trim().is_empty()).unwrap_or(true));

    let mut next_value = |key: &str| -> FeatCloudResult<(usize, usize)> {
        match lines.next() {
            Some((line_number, line)) => {
                let line = line?;
                let value = line
                    .trim()
                    .parse::<usize>()
                    .map_err(|_| feats_error(path, line_number, key))?;
                Ok((line_number, value))
            }
            None => Err(feats_error(path, 0, key)),
        }
    };

    let (_, stored_index) = next_value("the image index")?;
    let (_, count) = next_value("the feature count")?;
    if stored_index != image_index {
        warn!(
            "{:?} was written for image {} but is loaded as image {}",
            path, stored_index, image_index
        );
    }

    let mut points = Vec::with_capacity(count);
    let mut dim: Option<usize> = None;
    for (line_number, line) in lines.by_ref().take(count) {
        let line = line?;
        let mut fields = line.split_whitespace();
        let point_dim = fields
            .next()
            .and_then(|f| f.parse::<usize>().ok())
            .ok_or_else(|| feats_error(path, line_number, "the point dimension"))?;
        fields
            .next()
            .and_then(|f| f.parse::<usize>().ok())
            .ok_or_else(|| feats_error(path, line_number, "the point index"))?;
        let coords = fields
            .map(|f| f.parse::<f32>())
            .collect::<Result<Vec<f32>, _>>()
            .map_err(|_| feats_error(path, line_number, "a coordinate"))?;
        if coords.len() != point_dim {
            return Err(feats_error(path, line_number, "the declared number of coordinates"));
        }
        match dim {
            Some(d) if d != point_dim => {
                return Err(FeatCloudError::dimension_mismatch(
                    d,
                    point_dim,
                    path.to_string_lossy().to_string(),
                ))
            }
            _ => dim = Some(point_dim),
        }
        let point = Point::new(coords, image_index).ok_or_else(|| FeatCloudError::InvalidPoint {
            file_name: path.to_string_lossy().to_string(),
            line_number,
        })?;
        points.push(point);
    }
    if points.len() != count {
        return Err(feats_error(path, 0, "as many features as the header declares"));
    }
    debug!("Read {} features of image {} from {:?}", count, image_index, path);
    Ok(points)
}

/// Writes the points of one image in the `.feats` layout read by [`read_feats`].
pub fn write_feats<P: AsRef<Path>>(
    path: P,
    image_index: PointIndex,
    points: &[Point],
) -> FeatCloudResult<()> {
    let mut out = BufWriter::new(File::create(path.as_ref())?);
    writeln!(out, "{}", image_index)?;
    writeln!(out, "{}", points.len())?;
    for point in points {
        write!(out, "{} {}", point.dim(), point.index())?;
        for c in point.coords() {
            write!(out, " {}", c)?;
        }
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::fs;
    use tempdir::TempDir;

    fn image_points(index: PointIndex) -> Vec<Point> {
        vec![
            Point::new(vec![0.5, 1.25, -3.0], index).unwrap(),
            Point::new(vec![1e-3, 2.0, 7.75], index).unwrap(),
        ]
    }

    #[test]
    fn written_file_reads_back() {
        let dir = TempDir::new("feats").unwrap();
        let path = dir.path().join("img3.feats");
        write_feats(&path, 3, &image_points(3)).unwrap();
        let points = read_feats(&path, 3).unwrap();
        assert_eq!(points, image_points(3));
    }

    #[test]
    fn points_take_the_callers_index() {
        let dir = TempDir::new("feats").unwrap();
        let path = dir.path().join("img3.feats");
        write_feats(&path, 3, &image_points(3)).unwrap();
        let points = read_feats(&path, 11).unwrap();
        assert!(points.iter().all(|p| p.index() == 11));
    }

    #[test]
    fn gzipped_file() {
        let dir = TempDir::new("feats").unwrap();
        let path = dir.path().join("img0.feats.gz");
        let mut encoder = GzEncoder::new(File::create(&path).unwrap(), Compression::default());
        encoder
            .write_all(b"0\n2\n2 0 1.0 2.0\n2 0 3.0 4.0\n")
            .unwrap();
        encoder.finish().unwrap();
        let points = read_feats(&path, 0).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[1].coords(), &[3.0, 4.0]);
    }

    #[test]
    fn short_file_is_an_error() {
        let dir = TempDir::new("feats").unwrap();
        let path = dir.path().join("img0.feats");
        fs::write(&path, "0\n3\n2 0 1.0 2.0\n").unwrap();
        match read_feats(&path, 0) {
            Err(FeatCloudError::ParsingError(ParsingError::FeatsReadError { .. })) => {}
            other => panic!("expected a read error, got {:?}", other),
        }
    }

    #[test]
    fn bad_coordinate_reports_its_line() {
        let dir = TempDir::new("feats").unwrap();
        let path = dir.path().join("img0.feats");
        fs::write(&path, "0\n2\n2 0 1.0 2.0\n2 0 1.0 x\n").unwrap();
        match read_feats(&path, 0) {
            Err(FeatCloudError::ParsingError(ParsingError::FeatsReadError {
                line_number, ..
            })) => assert_eq!(line_number, 4),
            other => panic!("expected a read error, got {:?}", other),
        }
    }

    #[test]
    fn mixed_dimensions_are_rejected() {
        let dir = TempDir::new("feats").unwrap();
        let path = dir.path().join("img0.feats");
        fs::write(&path, "0\n2\n2 0 1.0 2.0\n3 0 1.0 2.0 3.0\n").unwrap();
        match read_feats(&path, 0) {
            Err(FeatCloudError::DimensionMismatch {
                expected, found, ..
            }) => {
                assert_eq!(expected, 2);
                assert_eq!(found, 3);
            }
            other => panic!("expected a dimension mismatch, got {:?}", other),
        }
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = TempDir::new("feats").unwrap();
        match read_feats(dir.path().join("nope.feats"), 0) {
            Err(FeatCloudError::IoError(_)) => {}
            other => panic!("expected an io error, got {:?}", other),
        }
    }
}
