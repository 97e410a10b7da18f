//! End-to-end runs on small instances with known answers.

use u_antcolony::aco::{AcoConfig, AcoEvent, AcoRunner, StartPolicy, TrailUpdate};
use u_antcolony::evaluation::{assigns_each_customer_once, path_cost, route_loads, unfitness};
use u_antcolony::{AcoError, LoadedProblem, LoaderRegistry, ProblemInstance, DEPOT};

fn four_node() -> ProblemInstance {
    ProblemInstance::tsp(vec![
        vec![0.0, 1.0, 2.0, 2.0],
        vec![1.0, 0.0, 2.0, 2.0],
        vec![2.0, 2.0, 0.0, 1.0],
        vec![2.0, 2.0, 1.0, 0.0],
    ])
    .expect("valid")
}

fn five_customer_vrp() -> ProblemInstance {
    let coords = [
        (0.0, 0.0),
        (2.0, 1.0),
        (3.0, -1.0),
        (-1.0, 2.0),
        (-2.0, -1.0),
        (0.5, -3.0),
    ];
    let demand = vec![0.0, 1.0, 1.0, 1.0, 1.0, 1.0];
    ProblemInstance::from_coordinates(&coords, Some((demand, 2.0))).expect("valid")
}

#[test]
fn four_node_tsp_converges_to_optimum() {
    let config = AcoConfig::default()
        .with_number_of_ants(10)
        .with_iterations(50)
        .with_seed(2024);
    let result = AcoRunner::run(&four_node(), &config).expect("valid run");

    assert!((result.best_fitness() - 6.0).abs() < 1e-9);
    // once found, the optimum dominates the colony
    let tail = &result.convergence_history[40..];
    assert!(tail.iter().all(|&(_, f)| (f - 6.0).abs() < 1e-9), "{tail:?}");

    let path = result.best_path();
    let mut inner = path[..4].to_vec();
    inner.sort_unstable();
    assert_eq!(inner, vec![0, 1, 2, 3]);
    assert_eq!(path[0], path[4]);
}

#[test]
fn runs_are_replayable() {
    for strategy in [TrailUpdate::All, TrailUpdate::Best, TrailUpdate::Elitist] {
        let config = AcoConfig::default()
            .with_iterations(25)
            .with_trail_update(strategy)
            .with_seed(77);
        let a = AcoRunner::run(&five_customer_vrp(), &config).expect("valid run");
        let b = AcoRunner::run(&five_customer_vrp(), &config).expect("valid run");
        assert_eq!(a.best_path(), b.best_path());
        assert_eq!(a.best_fitness(), b.best_fitness());
        assert_eq!(a.convergence_history, b.convergence_history);
    }
}

#[test]
fn vrp_routes_cover_customers_within_capacity() {
    let inst = five_customer_vrp();
    let config = AcoConfig::default()
        .with_number_of_ants(6)
        .with_iterations(60)
        .with_start(StartPolicy::RoundRobin)
        .with_trail_update(TrailUpdate::Elitist)
        .with_seed(11);

    let mut iterations_seen = 0usize;
    let result = AcoRunner::run_with_observer(&inst, &config, &mut |e: &AcoEvent| {
        if matches!(e, AcoEvent::IterationCompleted { .. }) {
            iterations_seen += 1;
        }
    })
    .expect("valid run");
    assert_eq!(iterations_seen, 60);

    let path = result.best_path();
    assert_eq!(path[0], DEPOT);
    assert_eq!(path[path.len() - 1], DEPOT);

    let routes = result.best.routes();
    // five unit-demand customers with capacity 2 need at least three vehicles
    assert!(routes.len() >= 3);
    assert!(assigns_each_customer_once(&inst, &routes));
    assert!(route_loads(&inst, &routes).iter().all(|&l| l <= 2.0));
    assert_eq!(unfitness(&inst, &routes), 0.0);
    assert!((path_cost(&inst, path) - result.best_fitness()).abs() < 1e-9);
}

#[test]
fn registry_feeds_runner() {
    let mut registry = LoaderRegistry::new();
    registry.register("four", || Ok(LoadedProblem::new(four_node()).with_known_optimum(6.0)));

    let loaded = registry.load("four").expect("registered");
    let config = AcoConfig::default().with_iterations(30).with_seed(3);
    let result = AcoRunner::run(&loaded.instance, &config).expect("valid run");
    let optimum = loaded.known_optimum.expect("known");
    assert_eq!(result.gap(optimum), Some(0.0));

    assert!(matches!(
        registry.load("dantzig42"),
        Err(AcoError::UnsupportedProblem(_))
    ));
}

#[test]
fn inconsistent_instances_rejected() {
    let cost = vec![vec![0.0, 1.0], vec![1.0, 0.0]];
    assert!(matches!(
        ProblemInstance::vrp(cost.clone(), vec![0.0, 3.0], 2.0),
        Err(AcoError::DemandExceedsCapacity { node: 1, .. })
    ));
    assert!(matches!(
        ProblemInstance::new(cost, Some(vec![0.0, 1.0]), None),
        Err(AcoError::IncompleteCapacityConstraint)
    ));
}
