//! ACO configuration.

use crate::error::{AcoError, Result};

/// How the iteration's ant deposits are aggregated into the trail update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TrailUpdate {
    /// Sum of every ant's deposit.
    #[default]
    All,

    /// The iteration-best ant's deposit, scaled by the population size.
    Best,

    /// The top `⌊best_rate × ants⌋` deposits plus the global-best deposit
    /// scaled by the number of remaining ants.
    Elitist,
}

/// Static heuristic desirability of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Visibility {
    /// `η_ij = 1 / d_ij`, zero on the diagonal.
    #[default]
    InverseDistance,

    /// Savings form for routing around a depot:
    /// `η_ij = d_i0 + d_0j - g·d_ij + f·|d_i0 - d_0j|`, clamped at zero.
    Savings { f: f64, g: f64 },
}

impl Visibility {
    /// Savings visibility with the usual `f = g = 2`.
    pub fn savings() -> Self {
        Visibility::Savings { f: 2.0, g: 2.0 }
    }
}

/// Where each ant starts its construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StartPolicy {
    /// Uniformly random node per ant.
    #[default]
    Random,

    /// The same node for every ant.
    Fixed(usize),

    /// Ant `k` starts at node `k mod n`.
    RoundRobin,
}

/// Configuration for the Ant Colony Optimization engine.
///
/// # Examples
///
/// ```
/// use u_antcolony::aco::{AcoConfig, TrailUpdate};
///
/// let config = AcoConfig::default()
///     .with_number_of_ants(30)
///     .with_iterations(200)
///     .with_trail_update(TrailUpdate::Elitist)
///     .with_best_rate(0.2)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AcoConfig {
    /// Pheromone weight exponent α.
    pub alpha: f64,

    /// Heuristic weight exponent β.
    pub beta: f64,

    /// Fraction ρ ∈ [0, 1) of the trail removed each iteration.
    pub evaporation_coefficient: f64,

    /// Deposit written on each traversed edge before the `1 / fitness`
    /// rescaling.
    pub pheromone_intensity: f64,

    /// Trail value of every edge before the first iteration.
    pub initial_trail: f64,

    /// Ants per iteration.
    pub number_of_ants: usize,

    /// Fixed iteration budget.
    pub iterations: usize,

    pub trail_update: TrailUpdate,

    /// Elite share for [`TrailUpdate::Elitist`], in [0, 1].
    pub best_rate: f64,

    /// CVRP candidate list size as a share of the node count, in (0, 1].
    /// `1.0` disables the restriction.
    pub candidate_ratio: f64,

    pub visibility: Visibility,

    pub start: StartPolicy,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,

    /// Construct ants on the rayon pool. Requires the `parallel` feature;
    /// results are identical either way.
    pub parallel: bool,
}

impl Default for AcoConfig {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            beta: 1.0,
            evaporation_coefficient: 0.7,
            pheromone_intensity: 1.0,
            initial_trail: 0.001,
            number_of_ants: 20,
            iterations: 100,
            trail_update: TrailUpdate::All,
            best_rate: 0.1,
            candidate_ratio: 1.0,
            visibility: Visibility::InverseDistance,
            start: StartPolicy::Random,
            seed: None,
            parallel: false,
        }
    }
}

impl AcoConfig {
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    pub fn with_evaporation_coefficient(mut self, rho: f64) -> Self {
        self.evaporation_coefficient = rho;
        self
    }

    pub fn with_pheromone_intensity(mut self, q: f64) -> Self {
        self.pheromone_intensity = q;
        self
    }

    pub fn with_initial_trail(mut self, tau0: f64) -> Self {
        self.initial_trail = tau0;
        self
    }

    pub fn with_number_of_ants(mut self, n: usize) -> Self {
        self.number_of_ants = n;
        self
    }

    pub fn with_iterations(mut self, n: usize) -> Self {
        self.iterations = n;
        self
    }

    pub fn with_trail_update(mut self, strategy: TrailUpdate) -> Self {
        self.trail_update = strategy;
        self
    }

    /// Sets the elite share (clamped to [0, 1]).
    pub fn with_best_rate(mut self, rate: f64) -> Self {
        self.best_rate = rate.clamp(0.0, 1.0);
        self
    }

    pub fn with_candidate_ratio(mut self, ratio: f64) -> Self {
        self.candidate_ratio = ratio;
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_start(mut self, start: StartPolicy) -> Self {
        self.start = start;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Number of elite ants for [`TrailUpdate::Elitist`]: `⌊best_rate × ants⌋`.
    pub fn elite_count(&self) -> usize {
        ((self.best_rate * self.number_of_ants as f64).floor() as usize).min(self.number_of_ants)
    }

    /// Candidate list length for an instance of `n` nodes:
    /// `max(1, ⌈candidate_ratio × n⌉)`.
    pub fn candidate_count(&self, n: usize) -> usize {
        ((self.candidate_ratio * n as f64).ceil() as usize).clamp(1, n.max(1))
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(AcoError::InvalidConfig(msg));

        if !self.alpha.is_finite() || self.alpha < 0.0 {
            return invalid(format!("alpha must be finite and nonnegative, got {}", self.alpha));
        }
        if !self.beta.is_finite() || self.beta < 0.0 {
            return invalid(format!("beta must be finite and nonnegative, got {}", self.beta));
        }
        if !(0.0..1.0).contains(&self.evaporation_coefficient) {
            return invalid(format!(
                "evaporation_coefficient must be in [0, 1), got {}",
                self.evaporation_coefficient
            ));
        }
        if !self.pheromone_intensity.is_finite() || self.pheromone_intensity <= 0.0 {
            return invalid(format!(
                "pheromone_intensity must be positive, got {}",
                self.pheromone_intensity
            ));
        }
        if !self.initial_trail.is_finite() || self.initial_trail <= 0.0 {
            return invalid(format!(
                "initial_trail must be positive, got {}",
                self.initial_trail
            ));
        }
        if self.number_of_ants == 0 {
            return invalid("number_of_ants must be at least 1".into());
        }
        if self.iterations == 0 {
            return invalid("iterations must be at least 1".into());
        }
        if !(0.0..=1.0).contains(&self.best_rate) {
            return invalid(format!("best_rate must be in [0, 1], got {}", self.best_rate));
        }
        if !(self.candidate_ratio > 0.0 && self.candidate_ratio <= 1.0) {
            return invalid(format!(
                "candidate_ratio must be in (0, 1], got {}",
                self.candidate_ratio
            ));
        }
        if let Visibility::Savings { f, g } = self.visibility {
            if !f.is_finite() || !g.is_finite() {
                return invalid(format!("savings parameters must be finite, got f={f}, g={g}"));
            }
        }
        Ok(())
    }

    /// Validates the configuration against an instance of `n` nodes.
    pub fn validate_for(&self, n: usize) -> Result<()> {
        self.validate()?;
        if let StartPolicy::Fixed(node) = self.start {
            if node >= n {
                return Err(AcoError::InvalidConfig(format!(
                    "start node {node} out of range for {n} nodes"
                )));
            }
        }
        Ok(())
    }
}
