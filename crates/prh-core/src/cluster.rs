//! One-dimensional density-based clustering.
//!
//! A DBSCAN implementation specialized to points on a line (gap values in
//! seconds). Two points are neighbors when their absolute difference is
//! within `eps`; a point with at least `min_points` neighbors (itself
//! included) is a core point and seeds a cluster, which then absorbs every
//! point density-reachable from it. Points reachable from no core point are
//! noise.
//!
//! Input sizes here are commit counts of a single pull request, so the
//! quadratic region query is fine.

use std::collections::VecDeque;

/// Result of a clustering run over a point set.
///
/// Clusters hold indices into the input slice, in discovery order. Every
/// input index appears in exactly one cluster or in `noise`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clustering {
    pub clusters: Vec<Vec<usize>>,
    pub noise: Vec<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Label {
    Unvisited,
    Noise,
    Cluster(usize),
}

/// Indices of all points within `eps` of `center`, including the point
/// itself.
fn region_query(points: &[i64], center: i64, eps: i64) -> Vec<usize> {
    points
        .iter()
        .enumerate()
        .filter(|&(_, &p)| (p - center).abs() <= eps)
        .map(|(i, _)| i)
        .collect()
}

/// Run DBSCAN over 1-D points.
///
/// `eps` is the neighborhood radius and `min_points` the minimum neighbor
/// count (self included) for a core point. With `min_points = 1` every
/// point is a core point, so the clusters are exactly the connected
/// components under `eps`-chaining and no point is noise.
#[must_use]
pub fn dbscan(points: &[i64], eps: i64, min_points: usize) -> Clustering {
    let mut labels = vec![Label::Unvisited; points.len()];
    let mut clusters: Vec<Vec<usize>> = Vec::new();

    for start in 0..points.len() {
        if labels[start] != Label::Unvisited {
            continue;
        }

        let neighbors = region_query(points, points[start], eps);
        if neighbors.len() < min_points {
            labels[start] = Label::Noise;
            continue;
        }

        let id = clusters.len();
        clusters.push(vec![start]);
        labels[start] = Label::Cluster(id);

        let mut queue: VecDeque<usize> = neighbors.into();
        while let Some(idx) = queue.pop_front() {
            match labels[idx] {
                Label::Cluster(_) => continue,
                Label::Noise => {
                    // Border point: joins the cluster but does not expand it.
                    labels[idx] = Label::Cluster(id);
                    clusters[id].push(idx);
                    continue;
                }
                Label::Unvisited => {}
            }

            labels[idx] = Label::Cluster(id);
            clusters[id].push(idx);

            let reachable = region_query(points, points[idx], eps);
            if reachable.len() >= min_points {
                queue.extend(reachable);
            }
        }
    }

    let noise = labels
        .iter()
        .enumerate()
        .filter(|&(_, &label)| label == Label::Noise)
        .map(|(i, _)| i)
        .collect();

    Clustering { clusters, noise }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(mut cluster: Vec<usize>) -> Vec<usize> {
        cluster.sort_unstable();
        cluster
    }

    #[test]
    fn empty_input_yields_no_clusters() {
        let result = dbscan(&[], 3600, 1);
        assert!(result.clusters.is_empty());
        assert!(result.noise.is_empty());
    }

    #[test]
    fn single_point_forms_its_own_cluster() {
        let result = dbscan(&[18_000], 3600, 1);
        assert_eq!(result.clusters, vec![vec![0]]);
        assert!(result.noise.is_empty());
    }

    #[test]
    fn nearby_points_share_a_cluster() {
        let result = dbscan(&[0, 60, 120], 3600, 1);
        assert_eq!(result.clusters.len(), 1);
        assert_eq!(sorted(result.clusters[0].clone()), vec![0, 1, 2]);
    }

    #[test]
    fn distant_points_split_into_clusters() {
        // 0 and 100 chain together; 18000 is more than eps from both.
        let result = dbscan(&[0, 100, 18_000], 3600, 1);
        assert_eq!(result.clusters.len(), 2);
        assert_eq!(sorted(result.clusters[0].clone()), vec![0, 1]);
        assert_eq!(result.clusters[1], vec![2]);
        assert!(result.noise.is_empty());
    }

    #[test]
    fn chained_reachability_merges_transitively() {
        // Adjacent differences are all within eps=10 even though the
        // endpoints are 40 apart; one cluster via chaining.
        let result = dbscan(&[0, 10, 20, 30, 40], 10, 1);
        assert_eq!(result.clusters.len(), 1);
        assert_eq!(sorted(result.clusters[0].clone()), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn min_points_two_marks_isolated_point_as_noise() {
        let result = dbscan(&[0, 50, 18_000], 3600, 2);
        assert_eq!(result.clusters.len(), 1);
        assert_eq!(sorted(result.clusters[0].clone()), vec![0, 1]);
        assert_eq!(result.noise, vec![2]);
    }

    #[test]
    fn border_point_joins_but_does_not_expand() {
        // With eps=10, min_points=3: {0,5,10} are core; 18 reaches only
        // 10 and itself (2 < 3) so it is a border point absorbed via 10;
        // 30 reaches nothing within eps and stays noise.
        let result = dbscan(&[0, 5, 10, 18, 30], 10, 3);
        assert_eq!(result.clusters.len(), 1);
        assert_eq!(sorted(result.clusters[0].clone()), vec![0, 1, 2, 3]);
        assert_eq!(result.noise, vec![4]);
    }

    #[test]
    fn duplicate_values_cluster_together() {
        let result = dbscan(&[0, 0, 0], 3600, 1);
        assert_eq!(result.clusters.len(), 1);
        assert_eq!(sorted(result.clusters[0].clone()), vec![0, 1, 2]);
    }

    #[test]
    fn every_index_is_clustered_or_noise() {
        let points = [0, 30, 5_000, 5_100, 20_000];
        let result = dbscan(&points, 1000, 2);
        let mut all: Vec<usize> = result.clusters.iter().flatten().copied().collect();
        all.extend(&result.noise);
        all.sort_unstable();
        assert_eq!(all, vec![0, 1, 2, 3, 4]);
    }
}
