//! ACO iteration loop.
//!
//! [`AcoRunner`] orchestrates a fixed number of iterations:
//! probabilities → construct one tour per ant → rank → record best →
//! aggregate deposits → evaporate and reinforce the trail.

use rand::rngs::StdRng;
use rand::Rng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::ant::{Ant, AntContext, AntKind, AntTour};
use super::config::{AcoConfig, StartPolicy};
use super::events::{AcoEvent, AcoObserver, NoopObserver};
use super::probability::ProbabilityMatrix;
use super::trail::TrailMatrix;
use super::update::{aggregate, rank_by_fitness};
use super::visibility::VisibilityMatrix;
use crate::error::Result;
use crate::evaluation::split_routes;
use crate::instance::ProblemInstance;
use crate::matrix::Matrix;
use crate::random::create_rng;

/// Best tour found during a run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution {
    /// Closed path; CVRP paths start and end at the depot.
    pub path: Vec<usize>,

    /// Total traversal cost.
    pub fitness: f64,

    /// Iteration (1-based) in which the tour was first found.
    pub iteration_found: usize,
}

impl Solution {
    /// Vehicle routes of a CVRP path, customers only.
    pub fn routes(&self) -> Vec<Vec<usize>> {
        split_routes(&self.path)
    }
}

/// Result of an ACO run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AcoResult {
    /// Best-so-far solution at the end of the run.
    pub best: Solution,

    /// `(iteration, best fitness of that iteration)` for every iteration.
    pub convergence_history: Vec<(usize, f64)>,

    /// Number of iterations executed.
    pub iterations: usize,
}

impl AcoResult {
    pub fn best_path(&self) -> &[usize] {
        &self.best.path
    }

    pub fn best_fitness(&self) -> f64 {
        self.best.fitness
    }

    /// Relative gap `(best − optimum) / optimum` to a known optimum.
    ///
    /// Returns `None` when `optimum` is not positive.
    pub fn gap(&self, optimum: f64) -> Option<f64> {
        (optimum > 0.0).then(|| (self.best.fitness - optimum) / optimum)
    }
}

/// Executes Ant Colony Optimization.
///
/// # Usage
///
/// ```
/// use u_antcolony::aco::{AcoConfig, AcoRunner};
/// use u_antcolony::ProblemInstance;
///
/// let instance = ProblemInstance::tsp(vec![
///     vec![0.0, 1.0, 2.0, 2.0],
///     vec![1.0, 0.0, 2.0, 2.0],
///     vec![2.0, 2.0, 0.0, 1.0],
///     vec![2.0, 2.0, 1.0, 0.0],
/// ]).unwrap();
/// let config = AcoConfig::default().with_number_of_ants(10).with_iterations(50).with_seed(42);
///
/// let result = AcoRunner::run(&instance, &config).unwrap();
/// assert!((result.best_fitness() - 6.0).abs() < 1e-9);
/// ```
pub struct AcoRunner;

impl AcoRunner {
    /// Runs ACO on `instance`.
    pub fn run(instance: &ProblemInstance, config: &AcoConfig) -> Result<AcoResult> {
        Self::run_with_observer(instance, config, &mut NoopObserver)
    }

    /// Runs ACO, reporting progress to `observer`.
    ///
    /// Fails before the first iteration if the configuration is invalid.
    pub fn run_with_observer<O: AcoObserver + ?Sized>(
        instance: &ProblemInstance,
        config: &AcoConfig,
        observer: &mut O,
    ) -> Result<AcoResult> {
        let n = instance.size();
        config.validate_for(n)?;

        let mut rng = match config.seed {
            Some(seed) => create_rng(seed),
            None => create_rng(rand::random()),
        };

        let kind = AntKind::for_instance(instance);
        let visibility = VisibilityMatrix::new(instance, config.visibility);
        let mut trail = TrailMatrix::new(n, config.initial_trail);
        let candidate_count = config.candidate_count(n);
        let elite_count = config.elite_count();

        let mut best: Option<Solution> = None;
        let mut best_deposit = Matrix::new(n);
        let mut convergence_history = Vec::with_capacity(config.iterations);

        for iteration in 1..=config.iterations {
            let probabilities =
                ProbabilityMatrix::compute(&trail, &visibility, config.alpha, config.beta);
            let ctx = AntContext {
                instance,
                probabilities: &probabilities,
                pheromone_intensity: config.pheromone_intensity,
                candidate_count,
            };

            let seeds = draw_ant_seeds(config, n, &mut rng);
            let tours = construct_tours(&ctx, kind, &seeds, config.parallel);

            let ranked = rank_by_fitness(&tours);
            let top = &tours[ranked[0]];

            let improved = best.as_ref().is_none_or(|b| top.fitness < b.fitness);
            if improved {
                best = Some(Solution {
                    path: top.path.clone(),
                    fitness: top.fitness,
                    iteration_found: iteration,
                });
                best_deposit = top.deposit.clone();
            }
            let best_so_far = best.as_ref().map_or(top.fitness, |b| b.fitness);
            convergence_history.push((iteration, top.fitness));

            observer.on_event(&AcoEvent::IterationCompleted {
                iteration,
                iteration_best: top.fitness,
                best_so_far,
                improved,
            });

            let reinforcement = aggregate(
                config.trail_update,
                &tours,
                &ranked,
                &best_deposit,
                elite_count,
            );
            trail.update(config.evaporation_coefficient, &reinforcement);

            let (min_trail, max_trail) = trail.as_matrix().min_max().unwrap_or((0.0, 0.0));
            observer.on_event(&AcoEvent::TrailUpdated {
                iteration,
                strategy: config.trail_update,
                deposited: reinforcement.sum(),
                min_trail,
                max_trail,
            });
        }

        // iterations >= 1 is validated, so at least one tour was recorded
        let best = best.unwrap_or_else(|| Solution {
            path: Vec::new(),
            fitness: f64::INFINITY,
            iteration_found: 0,
        });

        Ok(AcoResult {
            best,
            convergence_history,
            iterations: config.iterations,
        })
    }
}

/// Draws `(start, seed)` for every ant, in ant order, from the run RNG.
fn draw_ant_seeds(config: &AcoConfig, n: usize, rng: &mut StdRng) -> Vec<(usize, u64)> {
    (0..config.number_of_ants)
        .map(|k| {
            let start = match config.start {
                StartPolicy::Random => rng.random_range(0..n),
                StartPolicy::Fixed(node) => node,
                StartPolicy::RoundRobin => k % n,
            };
            (start, rng.random::<u64>())
        })
        .collect()
}

/// Builds one tour per ant. Each ant owns its RNG, so the result does not
/// depend on whether construction runs in parallel.
fn construct_tours(
    ctx: &AntContext<'_>,
    kind: AntKind,
    seeds: &[(usize, u64)],
    parallel: bool,
) -> Vec<AntTour> {
    let n = ctx.instance.size();
    let build = |&(start, seed): &(usize, u64)| {
        let mut ant = Ant::new(kind, start, n);
        ant.construct(ctx, &mut create_rng(seed));
        ant.into_tour()
    };

    #[cfg(feature = "parallel")]
    {
        if parallel {
            return seeds.par_iter().map(build).collect();
        }
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    seeds.iter().map(build).collect()
}

// ============================================================================
// Tests
// ============================================================================
