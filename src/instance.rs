//! Problem instances for TSP and CVRP.

use crate::error::{AcoError, Result};
use crate::matrix::Matrix;

/// Index of the depot in capacitated instances.
pub const DEPOT: usize = 0;

const SYMMETRY_TOLERANCE: f64 = 1e-9;

/// Vehicle capacity and per-node demand of a CVRP instance.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CapacityConstraint {
    demand: Vec<f64>,
    capacity: f64,
}

impl CapacityConstraint {
    /// Demand of every node; `demand()[DEPOT]` is zero.
    pub fn demand(&self) -> &[f64] {
        &self.demand
    }

    /// Vehicle capacity.
    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    /// Total demand over all customers.
    pub fn total_demand(&self) -> f64 {
        self.demand.iter().sum()
    }
}

/// Immutable, validated problem data.
///
/// The cost matrix is square, symmetric, nonnegative and has a zero
/// diagonal. Instances carrying a [`CapacityConstraint`] are solved as
/// CVRP with node [`DEPOT`] as the depot; all others are solved as TSP.
///
/// # Examples
///
/// ```
/// use u_antcolony::ProblemInstance;
///
/// let tsp = ProblemInstance::tsp(vec![
///     vec![0.0, 1.0, 2.0],
///     vec![1.0, 0.0, 1.5],
///     vec![2.0, 1.5, 0.0],
/// ]).unwrap();
/// assert_eq!(tsp.size(), 3);
/// assert!(!tsp.is_capacitated());
///
/// let asymmetric = ProblemInstance::tsp(vec![
///     vec![0.0, 1.0],
///     vec![2.0, 0.0],
/// ]);
/// assert!(asymmetric.is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProblemInstance {
    cost: Matrix,
    constraint: Option<CapacityConstraint>,
}

impl ProblemInstance {
    /// Validates and wraps a TSP cost matrix.
    pub fn tsp(cost: Vec<Vec<f64>>) -> Result<Self> {
        Self::new(cost, None, None)
    }

    /// Validates and wraps a CVRP instance (depot = node 0).
    pub fn vrp(cost: Vec<Vec<f64>>, demand: Vec<f64>, capacity: f64) -> Result<Self> {
        Self::new(cost, Some(demand), Some(capacity))
    }

    /// Generic constructor mirroring loader output.
    ///
    /// `demand` and `capacity` must either both be present or both absent.
    pub fn new(
        cost: Vec<Vec<f64>>,
        demand: Option<Vec<f64>>,
        capacity: Option<f64>,
    ) -> Result<Self> {
        let cost = validate_cost(cost)?;
        let constraint = match (demand, capacity) {
            (None, None) => None,
            (Some(demand), Some(capacity)) => {
                Some(validate_constraint(demand, capacity, cost.size())?)
            }
            _ => return Err(AcoError::IncompleteCapacityConstraint),
        };
        Ok(Self { cost, constraint })
    }

    /// Builds a Euclidean instance from planar coordinates.
    ///
    /// Pass `Some((demand, capacity))` to obtain a CVRP instance; the first
    /// coordinate is the depot.
    pub fn from_coordinates(
        coordinates: &[(f64, f64)],
        constraint: Option<(Vec<f64>, f64)>,
    ) -> Result<Self> {
        let n = coordinates.len();
        let mut cost = vec![vec![0.0; n]; n];
        for i in 0..n {
            for j in (i + 1)..n {
                let (xi, yi) = coordinates[i];
                let (xj, yj) = coordinates[j];
                let d = ((xi - xj).powi(2) + (yi - yj).powi(2)).sqrt();
                cost[i][j] = d;
                cost[j][i] = d;
            }
        }
        match constraint {
            Some((demand, capacity)) => Self::vrp(cost, demand, capacity),
            None => Self::tsp(cost),
        }
    }

    /// Number of nodes.
    pub fn size(&self) -> usize {
        self.cost.size()
    }

    /// Travel cost from `from` to `to`.
    pub fn cost(&self, from: usize, to: usize) -> f64 {
        self.cost.get(from, to)
    }

    /// The full cost matrix.
    pub fn cost_matrix(&self) -> &Matrix {
        &self.cost
    }

    /// Capacity data, present for CVRP instances.
    pub fn constraint(&self) -> Option<&CapacityConstraint> {
        self.constraint.as_ref()
    }

    /// `true` for CVRP instances.
    pub fn is_capacitated(&self) -> bool {
        self.constraint.is_some()
    }

    /// Demand of `node`, zero for TSP instances.
    pub fn demand(&self, node: usize) -> f64 {
        self.constraint.as_ref().map_or(0.0, |c| c.demand[node])
    }
}

fn validate_cost(rows: Vec<Vec<f64>>) -> Result<Matrix> {
    let n = rows.len();
    if n < 2 {
        return Err(AcoError::TooFewNodes(n));
    }
    let mut data = Vec::with_capacity(n * n);
    for (row, values) in rows.into_iter().enumerate() {
        if values.len() != n {
            return Err(AcoError::NonSquare {
                row,
                len: values.len(),
                expected: n,
            });
        }
        data.extend(values);
    }
    let cost = Matrix::from_data(n, data).ok_or(AcoError::TooFewNodes(n))?;

    for i in 0..n {
        for j in 0..n {
            let value = cost.get(i, j);
            if !value.is_finite() || value < 0.0 {
                return Err(AcoError::InvalidCost {
                    from: i,
                    to: j,
                    value,
                });
            }
        }
        let diagonal = cost.get(i, i);
        if diagonal != 0.0 {
            return Err(AcoError::NonZeroDiagonal {
                node: i,
                value: diagonal,
            });
        }
    }

    for i in 0..n {
        for j in (i + 1)..n {
            let forward = cost.get(i, j);
            let backward = cost.get(j, i);
            let scale = forward.abs().max(backward.abs()).max(1.0);
            if (forward - backward).abs() > SYMMETRY_TOLERANCE * scale {
                return Err(AcoError::Asymmetric {
                    from: i,
                    to: j,
                    forward,
                    backward,
                });
            }
        }
    }
    Ok(cost)
}

fn validate_constraint(demand: Vec<f64>, capacity: f64, n: usize) -> Result<CapacityConstraint> {
    if !capacity.is_finite() || capacity <= 0.0 {
        return Err(AcoError::InvalidCapacity(capacity));
    }
    if demand.len() != n {
        return Err(AcoError::DemandLength {
            got: demand.len(),
            expected: n,
        });
    }
    for (node, &d) in demand.iter().enumerate() {
        if !d.is_finite() || d < 0.0 {
            return Err(AcoError::InvalidDemand { node, demand: d });
        }
        if d > capacity {
            return Err(AcoError::DemandExceedsCapacity {
                node,
                demand: d,
                capacity,
            });
        }
    }
    if demand[DEPOT] != 0.0 {
        return Err(AcoError::DepotDemand(demand[DEPOT]));
    }
    Ok(CapacityConstraint { demand, capacity })
}
