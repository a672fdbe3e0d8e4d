//! An index over a configured image set and the prompt loop that queries it.

use featcloud::{FeatsFileExtractor, FeatureExtractor};
use kdir::query_interface::BulkInterface;
use kdir::{KdArray, PointIndex};
use log::{info, warn};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use crate::config::QueryConfig;
use crate::errors::{QueryError, QueryResult};

/// Typing this instead of a path ends the session
pub const TERMINATE: &str = "<>";

/// A built index and what is needed to answer image queries against it.
pub struct QuerySession<E: FeatureExtractor> {
    config: QueryConfig,
    extractor: E,
    interface: BulkInterface,
    images_loaded: usize,
}

impl<E: FeatureExtractor> QuerySession<E> {
    /// Gathers the features of every configured image and builds the tree over them. In
    /// extraction mode the extractor runs on each image and its output is written to the image's
    /// `.feats` file, otherwise the `.feats` files are read back. Fails if fewer images had
    /// features than the number of similar images each query answers with.
    pub fn new(config: QueryConfig, extractor: E) -> QueryResult<QuerySession<E>> {
        let (points, images_loaded) = if config.extraction_mode {
            config.images.extract_features(&extractor)?
        } else {
            let reader = FeatsFileExtractor::with_dim(config.pca_dimension);
            config.images.load_features(&reader)?
        };
        if images_loaded < config.num_of_similar_images {
            return Err(QueryError::NotEnoughImages {
                found: images_loaded,
                required: config.num_of_similar_images,
            });
        }

        let feature_count = points.len();
        let start = Instant::now();
        let tree = config.builder.build(KdArray::new(points)?)?;
        info!(
            "Indexed {} features of {} images in {:?}",
            feature_count,
            images_loaded,
            start.elapsed()
        );

        Ok(QuerySession {
            config,
            extractor,
            interface: BulkInterface::new(Arc::new(tree)),
            images_loaded,
        })
    }

    /// The configuration the session was built from
    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    /// Number of images that contributed features to the index
    pub fn images_loaded(&self) -> usize {
        self.images_loaded
    }

    /// The images most similar to the query image, best first. Each query feature votes for the
    /// images its nearest neighbors came from.
    pub fn best_images(&self, query: &Path) -> QueryResult<Vec<PointIndex>> {
        let features = self.extractor.extract(query, self.config.images.count)?;
        if features.is_empty() {
            return Err(QueryError::EmptyQuery(query.to_string_lossy().to_string()));
        }
        let votes =
            self.interface
                .votes(&features, self.config.knn, self.config.images.count)?;
        Ok(votes.best(self.config.num_of_similar_images))
    }

    /// Paths of the images most similar to the query image
    pub fn best_image_paths(&self, query: &Path) -> QueryResult<Vec<PathBuf>> {
        self.best_images(query)?
            .into_iter()
            .map(|i| self.config.images.image_path(i).map_err(QueryError::from))
            .collect()
    }

    /// Prompts for image paths until `<>` or the end of the input, answering each with the paths
    /// of its most similar images. A query that can't be answered is logged and skipped.
    pub fn run<R: BufRead, W: Write>(&self, input: R, mut output: W) -> QueryResult<()> {
        let mut queries = input.lines();
        loop {
            writeln!(output, "Please enter an image path:")?;
            output.flush()?;
            let query = match next_query(&mut queries)? {
                Some(q) if q != TERMINATE => q,
                _ => break,
            };
            match self.best_image_paths(Path::new(&query)) {
                Ok(paths) => {
                    writeln!(output, "Best candidates for - {} - are:", query)?;
                    for path in paths {
                        writeln!(output, "{}", path.display())?;
                    }
                }
                Err(e) => warn!("Invalid query {}: {}", query, e),
            }
        }
        writeln!(output, "Exiting...")?;
        output.flush()?;
        Ok(())
    }
}

fn next_query<I: Iterator<Item = std::io::Result<String>>>(
    lines: &mut I,
) -> QueryResult<Option<String>> {
    for line in lines {
        let line = line?;
        let query = line.trim();
        if !query.is_empty() {
            return Ok(Some(query.to_string()));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use featcloud::errors::FeatCloudResult;
    use featcloud::loaders::{read_feats, write_feats};
    use featcloud::ImageSet;
    use kdir::{KdTreeBuilder, Point};
    use std::io::Cursor;
    use tempdir::TempDir;

    const DIM: usize = 10;

    fn feature(image: usize, offset: f32) -> Point {
        let mut coords = vec![0.0; DIM];
        coords[0] = image as f32 * 100.0 + offset;
        coords[1] = offset;
        Point::new(coords, image).unwrap()
    }

    fn config(dir: &TempDir, count: usize, similar: usize) -> QueryConfig {
        QueryConfig {
            images: ImageSet::new(
                format!("{}/", dir.path().to_string_lossy()),
                "img".to_string(),
                ".png".to_string(),
                count,
            ),
            extraction_mode: false,
            pca_dimension: DIM,
            num_of_similar_images: similar,
            knn: 3,
            builder: KdTreeBuilder::new(),
            logger_level: 3,
            logger_filename: "stdout".to_string(),
        }
    }

    /// Images 0..count with five features each, image `i` clustered around `100 * i`.
    fn write_images(dir: &TempDir, count: usize) {
        let images = config(dir, count, 1).images;
        for i in 0..count {
            let points: Vec<Point> = (0..5).map(|j| feature(i, j as f32)).collect();
            write_feats(images.feats_path(i).unwrap(), i, &points).unwrap();
        }
    }

    #[test]
    fn queries_find_their_own_image() {
        let dir = TempDir::new("session").unwrap();
        write_images(&dir, 4);
        let query_path = dir.path().join("query.feats");
        let query: Vec<Point> = (0..4).map(|j| feature(2, j as f32 + 0.5)).collect();
        write_feats(&query_path, 0, &query).unwrap();

        let session = QuerySession::new(config(&dir, 4, 2), FeatsFileExtractor::with_dim(DIM)).unwrap();
        assert_eq!(session.images_loaded(), 4);
        let best = session.best_images(&query_path).unwrap();
        assert_eq!(best.len(), 2);
        assert_eq!(best[0], 2);
    }

    #[test]
    fn too_few_images() {
        let dir = TempDir::new("session").unwrap();
        write_images(&dir, 2);
        match QuerySession::new(config(&dir, 3, 3), FeatsFileExtractor::new()) {
            Err(QueryError::NotEnoughImages { found, required }) => {
                assert_eq!((found, required), (2, 3))
            }
            Err(e) => panic!("expected too few images, got {:?}", e),
            Ok(_) => panic!("expected too few images"),
        }
    }

    #[test]
    fn prompt_loop() {
        let dir = TempDir::new("session").unwrap();
        write_images(&dir, 3);
        let session = QuerySession::new(config(&dir, 3, 1), FeatsFileExtractor::new()).unwrap();

        let image_path = session.config().images.image_path(1).unwrap();
        let input = format!(
            "{}\n\n{}/nothing.png\n<>\n{}\n",
            image_path.display(),
            dir.path().display(),
            image_path.display()
        );
        let mut output = Vec::new();
        session.run(Cursor::new(input), &mut output).unwrap();
        let output = String::from_utf8(output).unwrap();

        let expected = format!(
            "Please enter an image path:\nBest candidates for - {} - are:\n{}\nPlease enter an image path:\nPlease enter an image path:\nExiting...\n",
            image_path.display(),
            image_path.display()
        );
        assert_eq!(output, expected);
    }

    #[test]
    fn input_can_just_end() {
        let dir = TempDir::new("session").unwrap();
        write_images(&dir, 1);
        let session = QuerySession::new(config(&dir, 1, 1), FeatsFileExtractor::new()).unwrap();
        let mut output = Vec::new();
        session.run(Cursor::new(""), &mut output).unwrap();
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "Please enter an image path:\nExiting...\n"
        );
    }

    /// Stands in for an image feature extractor: image `i` gets the features `write_images` gives it.
    struct Clustered;

    impl FeatureExtractor for Clustered {
        fn extract(&self, _path: &Path, index: PointIndex) -> FeatCloudResult<Vec<Point>> {
            Ok((0..5).map(|j| feature(index, j as f32)).collect())
        }
    }

    #[test]
    fn extraction_mode_writes_feature_files() {
        let dir = TempDir::new("session").unwrap();
        let mut extracting = config(&dir, 3, 1);
        extracting.extraction_mode = true;
        let session = QuerySession::new(extracting, Clustered).unwrap();
        assert_eq!(session.images_loaded(), 3);

        let images = &session.config().images;
        for i in 0..3 {
            let written = read_feats(images.feats_path(i).unwrap(), i).unwrap();
            assert_eq!(written, Clustered.extract(Path::new(""), i).unwrap());
        }
        // Query features land past the last image, so the last image is the closest.
        assert_eq!(session.best_images(Path::new("query.png")).unwrap(), vec![2]);

        let reading = QuerySession::new(config(&dir, 3, 1), Clustered).unwrap();
        assert_eq!(reading.images_loaded(), 3);
        assert_eq!(reading.best_images(Path::new("query.png")).unwrap(), vec![2]);
    }
}
