//! Static heuristic desirability (η).

use super::config::Visibility;
use crate::instance::{ProblemInstance, DEPOT};
use crate::matrix::Matrix;

/// Read-only visibility matrix, computed once per run.
#[derive(Debug, Clone)]
pub struct VisibilityMatrix {
    values: Matrix,
}

impl VisibilityMatrix {
    /// Derives η from the instance costs.
    ///
    /// Every entry is finite and nonnegative; the diagonal is zero.
    pub fn new(instance: &ProblemInstance, kind: Visibility) -> Self {
        let n = instance.size();
        let mut values = Matrix::new(n);
        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                let d = instance.cost(i, j);
                let eta = match kind {
                    Visibility::InverseDistance => {
                        if d > 0.0 {
                            1.0 / d
                        } else {
                            0.0
                        }
                    }
                    Visibility::Savings { f, g } => {
                        let di0 = instance.cost(i, DEPOT);
                        let d0j = instance.cost(DEPOT, j);
                        di0 + d0j - g * d + f * (di0 - d0j).abs()
                    }
                };
                values.set(i, j, if eta.is_finite() { eta.max(0.0) } else { 0.0 });
            }
        }
        Self { values }
    }

    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.values.get(from, to)
    }

    pub fn size(&self) -> usize {
        self.values.size()
    }

    pub fn as_matrix(&self) -> &Matrix {
        &self.values
    }
}
