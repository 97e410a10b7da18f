//! Error type shared by instance validation, configuration and loading.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AcoError>;

/// Errors raised before an ACO run starts.
///
/// Construction itself never fails: once an instance and a configuration
/// have been validated, every ant is guaranteed to complete its tour.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AcoError {
    #[error("cost matrix must have at least 2 nodes, got {0}")]
    TooFewNodes(usize),

    #[error("cost matrix must be square: row {row} has {len} entries, expected {expected}")]
    NonSquare {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("cost ({from}, {to}) must be finite and nonnegative, got {value}")]
    InvalidCost { from: usize, to: usize, value: f64 },

    #[error("cost matrix is asymmetric at ({from}, {to}): {forward} != {backward}")]
    Asymmetric {
        from: usize,
        to: usize,
        forward: f64,
        backward: f64,
    },

    #[error("cost matrix diagonal must be zero, node {node} has {value}")]
    NonZeroDiagonal { node: usize, value: f64 },

    #[error("demand has {got} entries, expected {expected}")]
    DemandLength { got: usize, expected: usize },

    #[error("demand of node {node} must be finite and nonnegative, got {demand}")]
    InvalidDemand { node: usize, demand: f64 },

    #[error("depot demand must be zero, got {0}")]
    DepotDemand(f64),

    #[error("demand of node {node} ({demand}) exceeds vehicle capacity {capacity}")]
    DemandExceedsCapacity {
        node: usize,
        demand: f64,
        capacity: f64,
    },

    #[error("capacity must be positive and finite, got {0}")]
    InvalidCapacity(f64),

    #[error("demand and capacity must be supplied together")]
    IncompleteCapacityConstraint,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("unsupported problem: {0}")]
    UnsupportedProblem(String),
}
