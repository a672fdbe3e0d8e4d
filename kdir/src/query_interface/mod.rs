//! Interfaces that simplify bulk queries

use crate::*;
use rayon::prelude::*;
use rayon::iter::repeat_n;
use std::sync::Arc;

const CHUNK_SIZE: usize = 16;

/// Interface for bulk queries. Handles cloning the tree handle for you, every query gets its own queue.
pub struct BulkInterface {
    tree: Arc<KdTree>,
}

impl BulkInterface {
    /// Creates a new one.
    pub fn new(tree: Arc<KdTree>) -> Self {
        BulkInterface { tree }
    }

    /// The tree the queries run against
    pub fn tree(&self) -> &KdTree {
        &self.tree
    }

    /// Bulk knn, results are in the order of the query points
    pub fn knn(&self, points: &[Point], k: usize) -> Vec<KdirResult<Vec<Neighbor>>> {
        let point_iter = points.par_chunks(CHUNK_SIZE);
        let tree_copies = point_iter.len();
        let chunked_results: Vec<Vec<KdirResult<Vec<Neighbor>>>> = point_iter
            .zip(repeat_n(Arc::clone(&self.tree), tree_copies))
            .map(|(chunk_points, tree)| chunk_points.iter().map(|p| tree.knn(p, k)).collect())
            .collect();

        chunked_results.into_iter().flatten().collect()
    }

    /// Runs a knn query for every point and tallies which of `num_images` images the neighbors
    /// came from. The first failed query fails the whole tally.
    pub fn votes(&self, points: &[Point], k: usize, num_images: usize) -> KdirResult<ImageVotes> {
        let mut votes = ImageVotes::new(num_images);
        for neighbors in self.knn(points, k) {
            votes.record(&neighbors?)?;
        }
        Ok(votes)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::kdtree::kd_array::tests::random_points;

    fn random_tree() -> (Vec<Point>, KdTree) {
        let points = random_points(300, 4, 21);
        let tree = KdTreeBuilder::new()
            .build(KdArray::from_slice(&points).unwrap())
            .unwrap();
        (points, tree)
    }

    #[test]
    fn bulk_knn() {
        let (_points, tree) = random_tree();
        let queries = random_points(50, 4, 22);
        let tree = Arc::new(tree);
        let interface = BulkInterface::new(Arc::clone(&tree));

        let knn_results = interface.knn(&queries, 5);
        assert_eq!(knn_results.len(), queries.len());
        for (query, knn) in queries.iter().zip(knn_results.iter()) {
            let old_knn = tree.knn(query, 5).unwrap();
            for (n1, n2) in knn.as_ref().unwrap().iter().zip(old_knn) {
                assert_approx_eq!(n1.dist, n2.dist);
                assert_eq!(n1.index, n2.index);
            }
        }
    }

    #[test]
    fn bulk_knn_reports_bad_queries() {
        let (_points, tree) = random_tree();
        let interface = BulkInterface::new(Arc::new(tree));
        let queries = vec![
            Point::new(vec![0.0; 4], 0).unwrap(),
            Point::new(vec![0.0; 3], 1).unwrap(),
        ];
        let results = interface.knn(&queries, 2);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
        assert!(interface.knn(&queries[..1], 0)[0].is_err());
        assert!(interface.votes(&queries, 2, 300).is_err());
    }

    #[test]
    fn votes_count_every_neighbor() {
        let (points, tree) = random_tree();
        let interface = BulkInterface::new(Arc::new(tree));
        let votes = interface.votes(&points[..10], 3, 300).unwrap();
        assert_eq!(votes.hits().iter().sum::<usize>(), 30);
        // Each query point is its own nearest neighbor.
        for p in &points[..10] {
            assert!(votes.hits()[p.index()] >= 1);
        }
    }
}
