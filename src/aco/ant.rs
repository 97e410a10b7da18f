//! Tour construction.
//!
//! An [`Ant`] walks the graph one node at a time, guided by the iteration's
//! [`ProbabilityMatrix`]. Two variants share the state machine:
//!
//! - [`AntKind::Tour`]: TSP, every node visited once, closed back to start.
//! - [`AntKind::Route`]: CVRP, customers visited once, vehicle capacity
//!   enforced, depot re-visited to start a new route.
//!
//! State: `prepare` resets the ant at its start node; `advance` performs one
//! move; once no node remains, the closing edge is charged and the deposit
//! is rescaled by `1 / fitness`, after which `has_finished` is `true`.

use rand::Rng;

use super::probability::{sample_candidate, ProbabilityMatrix};
use crate::instance::{ProblemInstance, DEPOT};
use crate::matrix::Matrix;

/// Construction variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AntKind {
    Tour,
    Route,
}

impl AntKind {
    /// Variant matching the instance: `Route` when it is capacitated.
    pub fn for_instance(instance: &ProblemInstance) -> Self {
        if instance.is_capacitated() {
            AntKind::Route
        } else {
            AntKind::Tour
        }
    }
}

/// Shared, read-only data an ant needs while constructing.
#[derive(Debug, Clone, Copy)]
pub struct AntContext<'a> {
    pub instance: &'a ProblemInstance,
    pub probabilities: &'a ProbabilityMatrix,
    pub pheromone_intensity: f64,
    /// Candidate list length (`Route` only).
    pub candidate_count: usize,
}

/// A finished construction: the closed path, its cost and its deposit.
#[derive(Debug, Clone)]
pub struct AntTour {
    pub path: Vec<usize>,
    pub fitness: f64,
    pub deposit: Matrix,
}

/// Per-construction ant state.
#[derive(Debug, Clone)]
pub struct Ant {
    kind: AntKind,
    start: usize,
    current: usize,
    path: Vec<usize>,
    not_visited: Vec<usize>,
    remaining_capacity: f64,
    fitness: f64,
    deposit: Matrix,
    finished: bool,
}

impl Ant {
    /// Creates an ant of `kind` that will start at `start`.
    pub fn new(kind: AntKind, start: usize, n: usize) -> Self {
        Self {
            kind,
            start,
            current: start,
            path: Vec::new(),
            not_visited: Vec::new(),
            remaining_capacity: 0.0,
            fitness: 0.0,
            deposit: Matrix::new(n),
            finished: false,
        }
    }

    /// Resets the ant at its start node.
    pub fn prepare(&mut self, ctx: &AntContext<'_>) {
        let n = ctx.instance.size();
        self.current = self.start;
        self.fitness = 0.0;
        self.finished = false;
        if self.deposit.size() == n {
            self.deposit.scale(0.0);
        } else {
            self.deposit = Matrix::new(n);
        }

        match self.kind {
            AntKind::Tour => {
                self.path = vec![self.start];
                self.not_visited = (0..n).filter(|&v| v != self.start).collect();
                self.remaining_capacity = 0.0;
            }
            AntKind::Route => {
                let capacity = ctx.instance.constraint().map_or(0.0, |c| c.capacity());
                self.path = vec![DEPOT];
                self.not_visited = (0..n).filter(|&v| v != DEPOT && v != self.start).collect();
                self.remaining_capacity = capacity - ctx.instance.demand(self.start);
                if self.start != DEPOT {
                    // the vehicle still leaves from the depot
                    self.traverse(ctx, DEPOT, self.start);
                }
            }
        }

        if self.not_visited.is_empty() {
            self.finish(ctx);
        }
    }

    /// Performs one construction step. No-op once finished.
    pub fn advance<R: Rng>(&mut self, ctx: &AntContext<'_>, rng: &mut R) {
        if self.finished {
            return;
        }
        let next = match self.kind {
            AntKind::Tour => self.next_tour_node(ctx, rng),
            AntKind::Route => self.next_route_node(ctx, rng),
        };
        self.traverse(ctx, self.current, next);
        if let Some(pos) = self.not_visited.iter().position(|&v| v == next) {
            self.not_visited.remove(pos);
        }
        if self.kind == AntKind::Route {
            if next == DEPOT {
                self.remaining_capacity = ctx.instance.constraint().map_or(0.0, |c| c.capacity());
            } else {
                self.remaining_capacity -= ctx.instance.demand(next);
            }
        }
        if self.not_visited.is_empty() {
            self.finish(ctx);
        }
    }

    /// `true` once every node has been visited and the tour closed.
    pub fn has_finished(&self) -> bool {
        self.finished
    }

    /// Runs `prepare` then `advance` until finished.
    pub fn construct<R: Rng>(&mut self, ctx: &AntContext<'_>, rng: &mut R) {
        self.prepare(ctx);
        while !self.has_finished() {
            self.advance(ctx, rng);
        }
    }

    pub fn kind(&self) -> AntKind {
        self.kind
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn current_node(&self) -> usize {
        self.current
    }

    pub fn path(&self) -> &[usize] {
        &self.path
    }

    /// Nodes still to visit (depot excluded for `Route`).
    pub fn nodes_not_visited(&self) -> &[usize] {
        &self.not_visited
    }

    /// Remaining vehicle capacity (`Route` only).
    pub fn remaining_capacity(&self) -> f64 {
        self.remaining_capacity
    }

    /// Accumulated cost; final once finished.
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    pub fn deposit(&self) -> &Matrix {
        &self.deposit
    }

    /// Consumes the ant, yielding its tour.
    pub fn into_tour(self) -> AntTour {
        AntTour {
            path: self.path,
            fitness: self.fitness,
            deposit: self.deposit,
        }
    }

    fn next_tour_node<R: Rng>(&self, ctx: &AntContext<'_>, rng: &mut R) -> usize {
        sample_candidate(&self.not_visited, ctx.probabilities.row(self.current), rng)
    }

    fn next_route_node<R: Rng>(&self, ctx: &AntContext<'_>, rng: &mut R) -> usize {
        let instance = ctx.instance;

        // candidate list: nearest unvisited customers by raw cost
        let mut nearest = self.not_visited.clone();
        if ctx.candidate_count < nearest.len() {
            nearest.sort_by(|&a, &b| {
                instance
                    .cost(self.current, a)
                    .total_cmp(&instance.cost(self.current, b))
                    .then(a.cmp(&b))
            });
            nearest.truncate(ctx.candidate_count);
        }

        let mut candidates: Vec<usize> = nearest
            .into_iter()
            .filter(|&c| instance.demand(c) <= self.remaining_capacity)
            .collect();
        if self.current != DEPOT {
            candidates.push(DEPOT);
        }

        match candidates.as_slice() {
            [] => {
                // at the depot with full capacity every customer fits
                sample_candidate(&self.not_visited, ctx.probabilities.row(self.current), rng)
            }
            [only] => *only,
            _ => sample_candidate(&candidates, ctx.probabilities.row(self.current), rng),
        }
    }

    fn traverse(&mut self, ctx: &AntContext<'_>, from: usize, to: usize) {
        self.path.push(to);
        self.fitness += ctx.instance.cost(from, to);
        self.deposit.set(from, to, ctx.pheromone_intensity);
        self.current = to;
    }

    fn finish(&mut self, ctx: &AntContext<'_>) {
        let home = match self.kind {
            AntKind::Tour => self.start,
            AntKind::Route => DEPOT,
        };
        if self.current != home {
            self.traverse(ctx, self.current, home);
        }
        if self.fitness > 0.0 {
            self.deposit.scale(1.0 / self.fitness);
        }
        self.finished = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aco::config::Visibility;
    use crate::aco::trail::TrailMatrix;
    use crate::aco::visibility::VisibilityMatrix;
    use crate::evaluation::{path_cost, split_routes};
    use crate::random::create_rng;

    fn square() -> ProblemInstance {
        ProblemInstance::tsp(vec![
            vec![0.0, 1.0, 2.0, 2.0],
            vec![1.0, 0.0, 2.0, 2.0],
            vec![2.0, 2.0, 0.0, 1.0],
            vec![2.0, 2.0, 1.0, 0.0],
        ])
        .expect("valid")
    }

    fn line_vrp() -> ProblemInstance {
        let coords = [
            (0.0, 0.0),
            (1.0, 0.0),
            (2.0, 0.0),
            (0.0, 1.0),
            (0.0, 2.0),
            (-1.0, 0.0),
        ];
        ProblemInstance::from_coordinates(&coords, Some((vec![0.0, 1.0, 1.0, 1.0, 1.0, 1.0], 2.0)))
            .expect("valid")
    }

    fn probabilities(instance: &ProblemInstance) -> ProbabilityMatrix {
        let eta = VisibilityMatrix::new(instance, Visibility::InverseDistance);
        let tau = TrailMatrix::new(instance.size(), 0.001);
        ProbabilityMatrix::compute(&tau, &eta, 1.0, 1.0)
    }

    fn context<'a>(
        instance: &'a ProblemInstance,
        probabilities: &'a ProbabilityMatrix,
        candidate_count: usize,
    ) -> AntContext<'a> {
        AntContext {
            instance,
            probabilities,
            pheromone_intensity: 1.0,
            candidate_count,
        }
    }

    #[test]
    fn test_tour_visits_every_node_once() {
        let inst = square();
        let p = probabilities(&inst);
        let ctx = context(&inst, &p, inst.size());
        let mut rng = create_rng(42);

        for start in 0..4 {
            let mut ant = Ant::new(AntKind::Tour, start, 4);
            ant.construct(&ctx, &mut rng);
            let path = ant.path();
            assert_eq!(path.len(), 5);
            assert_eq!(path[0], start);
            assert_eq!(path[4], start);
            let mut inner = path[..4].to_vec();
            inner.sort_unstable();
            assert_eq!(inner, vec![0, 1, 2, 3]);
            assert!((ant.fitness() - path_cost(&inst, path)).abs() < 1e-12);
        }
    }

    #[test]
    fn test_state_transitions() {
        let inst = square();
        let p = probabilities(&inst);
        let ctx = context(&inst, &p, inst.size());
        let mut rng = create_rng(3);

        let mut ant = Ant::new(AntKind::Tour, 2, 4);
        ant.prepare(&ctx);
        assert_eq!(ant.path(), &[2]);
        assert_eq!(ant.nodes_not_visited(), &[0, 1, 3]);
        assert!(!ant.has_finished());

        ant.advance(&ctx, &mut rng);
        assert_eq!(ant.path().len(), 2);
        assert_eq!(ant.nodes_not_visited().len(), 2);
        assert_eq!(ant.current_node(), ant.path()[1]);

        ant.advance(&ctx, &mut rng);
        assert!(!ant.has_finished());
        ant.advance(&ctx, &mut rng);
        assert!(ant.has_finished());
        assert_eq!(ant.current_node(), 2);

        let before = ant.path().to_vec();
        ant.advance(&ctx, &mut rng);
        assert_eq!(ant.path(), before.as_slice());
    }

    #[test]
    fn test_deposit_on_path_edges_scaled_by_fitness() {
        let inst = square();
        let p = probabilities(&inst);
        let ctx = context(&inst, &p, inst.size());
        let mut rng = create_rng(11);

        let mut ant = Ant::new(AntKind::Tour, 0, 4);
        ant.construct(&ctx, &mut rng);
        let edges = ant.path().len() - 1;
        assert_eq!(ant.deposit().count_nonzero(), edges);
        for w in ant.path().windows(2) {
            let d = ant.deposit().get(w[0], w[1]);
            assert!((d - 1.0 / ant.fitness()).abs() < 1e-12);
        }
    }

    #[test]
    fn test_prepare_resets_state() {
        let inst = square();
        let p = probabilities(&inst);
        let ctx = context(&inst, &p, inst.size());
        let mut rng = create_rng(5);

        let mut ant = Ant::new(AntKind::Tour, 1, 4);
        ant.construct(&ctx, &mut rng);
        ant.prepare(&ctx);
        assert_eq!(ant.path(), &[1]);
        assert_eq!(ant.fitness(), 0.0);
        assert_eq!(ant.deposit().count_nonzero(), 0);
        assert!(!ant.has_finished());
    }

    #[test]
    fn test_same_seed_same_tour() {
        let inst = square();
        let p = probabilities(&inst);
        let ctx = context(&inst, &p, inst.size());

        let run = |seed| {
            let mut ant = Ant::new(AntKind::Tour, 0, 4);
            ant.construct(&ctx, &mut create_rng(seed));
            ant.into_tour().path
        };
        assert_eq!(run(9), run(9));
    }

    #[test]
    fn test_route_respects_capacity() {
        let inst = line_vrp();
        let p = probabilities(&inst);
        let ctx = context(&inst, &p, inst.size());
        let mut rng = create_rng(42);

        for start in 0..inst.size() {
            let mut ant = Ant::new(AntKind::Route, start, inst.size());
            ant.prepare(&ctx);
            assert!(ant.remaining_capacity() >= 0.0);
            while !ant.has_finished() {
                ant.advance(&ctx, &mut rng);
                assert!(ant.remaining_capacity() >= 0.0);
            }
            let path = ant.path();
            assert_eq!(path[0], DEPOT);
            assert_eq!(*path.last().expect("non-empty"), DEPOT);
            if start != DEPOT {
                assert_eq!(path[1], start);
            }
            let routes = split_routes(path);
            for route in &routes {
                assert!(route.len() <= 2, "route {route:?} overloads the vehicle");
            }
            let mut customers: Vec<usize> = routes.into_iter().flatten().collect();
            customers.sort_unstable();
            assert_eq!(customers, vec![1, 2, 3, 4, 5]);
            assert!((ant.fitness() - path_cost(&inst, path)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_route_deposit_matches_edges() {
        let inst = line_vrp();
        let p = probabilities(&inst);
        let ctx = context(&inst, &p, inst.size());
        let mut rng = create_rng(8);

        let mut ant = Ant::new(AntKind::Route, 3, inst.size());
        ant.construct(&ctx, &mut rng);
        assert_eq!(ant.deposit().count_nonzero(), ant.path().len() - 1);
        for w in ant.path().windows(2) {
            assert!(ant.deposit().get(w[0], w[1]) > 0.0);
        }
    }

    #[test]
    fn test_route_forced_depot_when_full() {
        // capacity 1: every customer must be followed by the depot
        let coords = [(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)];
        let inst = ProblemInstance::from_coordinates(&coords, Some((vec![0.0, 1.0, 1.0, 1.0], 1.0)))
            .expect("valid");
        let p = probabilities(&inst);
        let ctx = context(&inst, &p, inst.size());
        let mut rng = create_rng(1);

        let mut ant = Ant::new(AntKind::Route, DEPOT, inst.size());
        ant.construct(&ctx, &mut rng);
        let path = ant.path();
        assert_eq!(path.len(), 7);
        for (i, &node) in path.iter().enumerate() {
            assert_eq!(node == DEPOT, i % 2 == 0, "unexpected path {path:?}");
        }
    }

    #[test]
    fn test_candidate_list_restricts_to_nearest() {
        // from the depot only the single nearest customer (1) may be chosen
        let inst = line_vrp();
        let p = probabilities(&inst);
        let ctx = context(&inst, &p, 1);

        for seed in 0..20 {
            let mut ant = Ant::new(AntKind::Route, DEPOT, inst.size());
            ant.prepare(&ctx);
            ant.advance(&ctx, &mut create_rng(seed));
            assert_eq!(ant.path()[1], 1);
        }
    }

    #[test]
    fn test_route_single_customer_start() {
        let inst = ProblemInstance::vrp(vec![vec![0.0, 3.0], vec![3.0, 0.0]], vec![0.0, 1.0], 1.0)
            .expect("valid");
        let p = probabilities(&inst);
        let ctx = context(&inst, &p, inst.size());

        let mut ant = Ant::new(AntKind::Route, 1, 2);
        ant.prepare(&ctx);
        assert!(ant.has_finished());
        assert_eq!(ant.path(), &[0, 1, 0]);
        assert!((ant.fitness() - 6.0).abs() < 1e-12);
    }
}
