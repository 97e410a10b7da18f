//! Transition probabilities and weighted sampling.

use rand::Rng;

use super::trail::TrailMatrix;
use super::visibility::VisibilityMatrix;
use crate::matrix::Matrix;

/// Row-normalized transition probabilities for one iteration.
///
/// `P_ij = τ_ij^α · η_ij^β / Σ_k τ_ik^α · η_ik^β`. Rows whose weight sum
/// is zero (or not finite) are all zeros; construction then falls back to
/// a uniform choice. Computed once per iteration and shared read-only by
/// every ant of that iteration.
#[derive(Debug, Clone)]
pub struct ProbabilityMatrix {
    values: Matrix,
}

impl ProbabilityMatrix {
    pub fn compute(trail: &TrailMatrix, visibility: &VisibilityMatrix, alpha: f64, beta: f64) -> Self {
        let n = trail.size();
        let mut values = Matrix::new(n);
        for i in 0..n {
            let row = values.row_mut(i);
            for (j, p) in row.iter_mut().enumerate() {
                let w = trail.get(i, j).powf(alpha) * visibility.get(i, j).powf(beta);
                *p = if w.is_finite() { w.max(0.0) } else { 0.0 };
            }
            let sum: f64 = row.iter().sum();
            if sum > 0.0 && sum.is_finite() {
                for p in row.iter_mut() {
                    *p /= sum;
                }
            } else {
                row.fill(0.0);
            }
        }
        Self { values }
    }

    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.values.get(from, to)
    }

    pub fn row(&self, from: usize) -> &[f64] {
        self.values.row(from)
    }

    pub fn size(&self) -> usize {
        self.values.size()
    }

    pub fn as_matrix(&self) -> &Matrix {
        &self.values
    }
}

/// Picks one of `candidates`, weighted by `row[candidate]`.
///
/// The restricted weights are renormalized implicitly; if they sum to zero
/// the choice is uniform among the candidates.
///
/// # Panics
///
/// Panics if `candidates` is empty.
pub fn sample_candidate<R: Rng>(candidates: &[usize], row: &[f64], rng: &mut R) -> usize {
    assert!(!candidates.is_empty(), "cannot sample from empty candidate set");
    if candidates.len() == 1 {
        return candidates[0];
    }

    let total: f64 = candidates.iter().map(|&c| row[c]).sum();
    if !(total > 0.0 && total.is_finite()) {
        return candidates[rng.random_range(0..candidates.len())];
    }

    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for &c in candidates {
        cumulative += row[c];
        if cumulative > threshold {
            return c;
        }
    }

    // floating-point fallback: last candidate with positive weight
    candidates
        .iter()
        .rev()
        .copied()
        .find(|&c| row[c] > 0.0)
        .unwrap_or(candidates[candidates.len() - 1])
}
