//! Seeded k-means over dense vectors
//!
//! 1. k-means++ seeding from a `StdRng` with a fixed seed
//! 2. Assign each row to its nearest centroid (squared Euclidean)
//! 3. Recompute centroids as member means; an empty cluster keeps its centroid
//! 4. Stop when labels settle, the centroid shift drops below tolerance,
//!    or after `max_iterations`

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::core::themes::ThemeError;

/// Default Lloyd iteration cap
pub const KMEANS_MAX_ITERATIONS: usize = 300;

/// Relative convergence tolerance (scaled by mean feature variance)
pub const KMEANS_TOLERANCE: f64 = 1e-4;

/// Result of a k-means run
#[derive(Debug, Clone, PartialEq)]
pub struct KMeansFit {
    pub centroids: Vec<Vec<f64>>,
    /// Cluster index per input row
    pub labels: Vec<usize>,
    pub iterations: usize,
    /// Sum of squared distances to assigned centroids
    pub inertia: f64,
}

impl KMeansFit {
    /// Members per cluster
    pub fn cluster_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.centroids.len()];
        for &label in &self.labels {
            sizes[label] += 1;
        }
        sizes
    }
}

/// k-means configuration
#[derive(Debug, Clone)]
pub struct KMeans {
    pub k: usize,
    pub seed: u64,
    pub max_iterations: usize,
    pub tolerance: f64,
}

impl KMeans {
    pub fn new(k: usize, seed: u64) -> Self {
        Self {
            k,
            seed,
            max_iterations: KMEANS_MAX_ITERATIONS,
            tolerance: KMEANS_TOLERANCE,
        }
    }

    pub fn fit(&self, data: &[Vec<f64>]) -> Result<KMeansFit, ThemeError> {
        let n = data.len();
        if self.k == 0 || self.k > n {
            return Err(ThemeError::InvalidClusterCount { k: self.k, n });
        }
        let dim = data[0].len();
        if data.iter().any(|row| row.len() != dim) {
            return Err(ThemeError::RaggedMatrix);
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut centroids = self.init_plus_plus(data, &mut rng);
        let tol = self.tolerance * mean_variance(data);

        let mut labels = vec![usize::MAX; n];
        let mut iterations = 0;

        while iterations < self.max_iterations {
            iterations += 1;

            let new_labels: Vec<usize> = data.iter().map(|row| nearest(row, &centroids).0).collect();
            let settled = new_labels == labels;
            labels = new_labels;
            if settled {
                break;
            }

            let mut sums = vec![vec![0.0; dim]; self.k];
            let mut sizes = vec![0usize; self.k];
            for (row, &label) in data.iter().zip(&labels) {
                sizes[label] += 1;
                for (s, v) in sums[label].iter_mut().zip(row) {
                    *s += v;
                }
            }

            let mut shift = 0.0;
            for (c, (sum, &size)) in sums.into_iter().zip(&sizes).enumerate() {
                if size == 0 {
                    continue;
                }
                let updated: Vec<f64> = sum.into_iter().map(|s| s / size as f64).collect();
                shift += squared_distance(&centroids[c], &updated);
                centroids[c] = updated;
            }

            if shift <= tol {
                labels = data.iter().map(|row| nearest(row, &centroids).0).collect();
                break;
            }
        }

        let inertia = data
            .iter()
            .zip(&labels)
            .map(|(row, &label)| squared_distance(row, &centroids[label]))
            .sum();

        Ok(KMeansFit { centroids, labels, iterations, inertia })
    }

    /// k-means++: first centre uniform, then sampled proportional to D²
    fn init_plus_plus(&self, data: &[Vec<f64>], rng: &mut StdRng) -> Vec<Vec<f64>> {
        let n = data.len();
        let mut centroids: Vec<Vec<f64>> = Vec::with_capacity(self.k);
        centroids.push(data[rng.gen_range(0..n)].clone());

        while centroids.len() < self.k {
            let d2: Vec<f64> = data.iter().map(|row| nearest(row, &centroids).1).collect();
            let total: f64 = d2.iter().sum();

            let idx = if total <= 0.0 {
                rng.gen_range(0..n)
            } else {
                let target = rng.gen::<f64>() * total;
                let mut acc = 0.0;
                let mut chosen = d2.iter().rposition(|d| *d > 0.0).unwrap_or(n - 1);
                for (i, d) in d2.iter().enumerate() {
                    acc += d;
                    if acc >= target && *d > 0.0 {
                        chosen = i;
                        break;
                    }
                }
                chosen
            };
            centroids.push(data[idx].clone());
        }

        centroids
    }
}

fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

/// (index, squared distance) of the closest centroid; ties go to the lower index
fn nearest(row: &[f64], centroids: &[Vec<f64>]) -> (usize, f64) {
    let mut best = (0, f64::INFINITY);
    for (i, c) in centroids.iter().enumerate() {
        let d = squared_distance(row, c);
        if d < best.1 {
            best = (i, d);
        }
    }
    best
}

fn mean_variance(data: &[Vec<f64>]) -> f64 {
    let n = data.len() as f64;
    let dim = data[0].len();
    if dim == 0 {
        return 0.0;
    }
    let mut total = 0.0;
    for j in 0..dim {
        let mean = data.iter().map(|r| r[j]).sum::<f64>() / n;
        total += data.iter().map(|r| (r[j] - mean).powi(2)).sum::<f64>() / n;
    }
    total / dim as f64
}
