//! Tour cost and CVRP route feasibility.
//!
//! A CVRP solution is encoded as one closed path that starts and ends at
//! the depot and re-visits it between vehicle routes:
//! `[0, 3, 1, 0, 2, 4, 0]` is two routes, `[3, 1]` and `[2, 4]`.

use crate::instance::{ProblemInstance, DEPOT};

/// Total cost of traversing `path` edge by edge.
///
/// The path is taken as given; pass a closed path to include the return.
pub fn path_cost(instance: &ProblemInstance, path: &[usize]) -> f64 {
    path.windows(2).map(|w| instance.cost(w[0], w[1])).sum()
}

/// Splits a depot-delimited path into vehicle routes (customers only).
///
/// Empty segments (consecutive depot visits) are dropped.
pub fn split_routes(path: &[usize]) -> Vec<Vec<usize>> {
    path.split(|&node| node == DEPOT)
        .filter(|segment| !segment.is_empty())
        .map(<[usize]>::to_vec)
        .collect()
}

/// Accumulated demand of each route.
pub fn route_loads(instance: &ProblemInstance, routes: &[Vec<usize>]) -> Vec<f64> {
    routes
        .iter()
        .map(|route| route.iter().map(|&c| instance.demand(c)).sum())
        .collect()
}

/// Overload ratio of a set of routes.
///
/// Sum over vehicles of `max(load - capacity, 0) / total_demand`. Zero means
/// every route respects the capacity. TSP instances always return zero.
pub fn unfitness(instance: &ProblemInstance, routes: &[Vec<usize>]) -> f64 {
    let Some(constraint) = instance.constraint() else {
        return 0.0;
    };
    let total = constraint.total_demand();
    if total <= 0.0 {
        return 0.0;
    }
    route_loads(instance, routes)
        .into_iter()
        .map(|load| ((load - constraint.capacity()) / total).max(0.0))
        .sum()
}

/// Returns `true` if every customer `1..n` appears in exactly one route
/// exactly once.
pub fn assigns_each_customer_once(instance: &ProblemInstance, routes: &[Vec<usize>]) -> bool {
    let mut seen = vec![0usize; instance.size()];
    for &node in routes.iter().flatten() {
        if node == DEPOT || node >= seen.len() {
            return false;
        }
        seen[node] += 1;
    }
    seen.iter().skip(1).all(|&count| count == 1)
}
