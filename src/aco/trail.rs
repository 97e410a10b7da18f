//! Pheromone trail (τ).

use crate::matrix::Matrix;

/// Pheromone intensity per edge.
///
/// Owned by the runner and mutated only through [`TrailMatrix::update`],
/// once per iteration after every ant has finished. Ants never see this
/// type; they read the derived probability matrix instead.
#[derive(Debug, Clone)]
pub struct TrailMatrix {
    values: Matrix,
}

impl TrailMatrix {
    /// Creates an `n×n` trail with every edge at `initial`.
    pub fn new(n: usize, initial: f64) -> Self {
        Self {
            values: Matrix::filled(n, initial),
        }
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

    /// Applies `τ ← τ·(1 − ρ) + aggregate` in one step.
    ///
    /// With `ρ ∈ [0, 1)` and a nonnegative aggregate the trail stays
    /// nonnegative; any rounding below zero is clamped.
    pub fn update(&mut self, rho: f64, aggregate: &Matrix) {
        self.values.scale(1.0 - rho);
        self.values.add_scaled(aggregate, 1.0);
        for i in 0..self.values.size() {
            for v in self.values.row_mut(i) {
                if *v < 0.0 {
                    *v = 0.0;
                }
            }
        }
    }
}
