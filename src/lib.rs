//! Ant Colony Optimization for combinatorial routing.
//!
//! Solves the symmetric Traveling Salesman Problem (TSP) and the Capacitated
//! Vehicle Routing Problem (CVRP) with pheromone-guided tour construction:
//!
//! - **Instances**: validated cost matrices, optionally with per-node demand
//!   and a vehicle capacity ([`ProblemInstance`]).
//! - **ACO engine**: Ant System with `All`, `Best` and `Elitist` trail
//!   updates, candidate lists and capacity feasibility ([`aco`]).
//! - **Evaluation**: tour cost, route splitting and overload checks
//!   ([`evaluation`]).
//! - **Loaders**: name → instance registry for callers that own the file
//!   formats ([`LoaderRegistry`]).
//!
//! # Example
//!
//! ```
//! use u_antcolony::aco::{AcoConfig, AcoRunner};
//! use u_antcolony::ProblemInstance;
//!
//! let coords = [(0.0, 0.0), (1.0, 1.0), (2.0, 0.0), (1.0, -1.0), (-1.0, 0.5)];
//! let demand = vec![0.0, 1.0, 1.0, 1.0, 1.0];
//! let instance = ProblemInstance::from_coordinates(&coords, Some((demand, 2.0))).unwrap();
//!
//! let result = AcoRunner::run(&instance, &AcoConfig::default().with_seed(42)).unwrap();
//! for route in result.best.routes() {
//!     assert!(route.len() <= 2);
//! }
//! ```

pub mod aco;
mod error;
pub mod evaluation;
mod instance;
mod loader;
mod matrix;
pub mod random;

pub use error::{AcoError, Result};
pub use instance::{CapacityConstraint, ProblemInstance, DEPOT};
pub use loader::{LoadedProblem, LoaderFn, LoaderRegistry};
pub use matrix::Matrix;
