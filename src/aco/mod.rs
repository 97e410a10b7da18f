//! Ant Colony Optimization (Ant System).
//!
//! A population of ants builds complete tours edge by edge. Each step picks
//! the next node with probability proportional to `τ^α · η^β`, where `τ` is
//! the learned pheromone trail and `η` a static visibility derived from the
//! costs. After every iteration the trail evaporates and is reinforced by
//! the ants' deposits, each scaled by `1 / tour cost`.
//!
//! # Key Types
//!
//! - [`AcoConfig`]: Algorithm parameters (α, β, ρ, ants, iterations, strategy)
//! - [`AcoRunner`]: Executes the iteration loop
//! - [`AcoResult`]: Best solution and convergence history
//! - [`Ant`]: Tour construction state machine (TSP and CVRP variants)
//! - [`TrailUpdate`]: `All`, `Best` or `Elitist` reinforcement
//!
//! # References
//!
//! - Dorigo, Maniezzo & Colorni (1996), "Ant System: Optimization by a
//!   Colony of Cooperating Agents"
//! - Bullnheimer, Hartl & Strauss (1999), "An Improved Ant System Algorithm
//!   for the Vehicle Routing Problem"

mod ant;
mod config;
mod events;
mod probability;
mod runner;
mod trail;
mod update;
mod visibility;

pub use ant::{Ant, AntContext, AntKind, AntTour};
pub use config::{AcoConfig, StartPolicy, TrailUpdate, Visibility};
pub use events::{AcoEvent, AcoObserver, NoopObserver};
pub use probability::{sample_candidate, ProbabilityMatrix};
pub use runner::{AcoResult, AcoRunner, Solution};
pub use trail::TrailMatrix;
pub use update::{aggregate, rank_by_fitness};
pub use visibility::VisibilityMatrix;
