//! Aggregation of ant deposits into the trail update.

use super::ant::AntTour;
use super::config::TrailUpdate;
use crate::matrix::Matrix;

/// Indices of `tours` sorted by fitness, best first. Ties keep ant order.
pub fn rank_by_fitness(tours: &[AntTour]) -> Vec<usize> {
    let mut ranked: Vec<usize> = (0..tours.len()).collect();
    ranked.sort_by(|&a, &b| tours[a].fitness.total_cmp(&tours[b].fitness));
    ranked
}

/// Builds the reinforcement matrix for one iteration.
///
/// - `All`: sum of every deposit.
/// - `Best`: the iteration-best deposit × `tours.len()`.
/// - `Elitist`: sum of the `elite_count` best deposits plus
///   `global_best` × `(tours.len() − elite_count)`.
///
/// `ranked` must come from [`rank_by_fitness`]. `global_best` is the
/// deposit of the best tour found so far (this iteration included).
///
/// # Panics
///
/// Panics if `tours` is empty.
pub fn aggregate(
    strategy: TrailUpdate,
    tours: &[AntTour],
    ranked: &[usize],
    global_best: &Matrix,
    elite_count: usize,
) -> Matrix {
    assert!(!tours.is_empty(), "cannot aggregate an empty population");
    let n = tours[0].deposit.size();
    let population = tours.len();
    let mut total = Matrix::new(n);

    match strategy {
        TrailUpdate::All => {
            for tour in tours {
                total.add_scaled(&tour.deposit, 1.0);
            }
        }
        TrailUpdate::Best => {
            total.add_scaled(&tours[ranked[0]].deposit, population as f64);
        }
        TrailUpdate::Elitist => {
            let elite = elite_count.min(population);
            for &i in &ranked[..elite] {
                total.add_scaled(&tours[i].deposit, 1.0);
            }
            total.add_scaled(global_best, (population - elite) as f64);
        }
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tour(fitness: f64, edge: (usize, usize)) -> AntTour {
        let mut deposit = Matrix::new(3);
        deposit.set(edge.0, edge.1, 1.0 / fitness);
        AntTour {
            path: vec![],
            fitness,
            deposit,
        }
    }

    fn population() -> Vec<AntTour> {
        vec![tour(4.0, (0, 1)), tour(2.0, (1, 2)), tour(8.0, (2, 0)), tour(2.0, (0, 2))]
    }

    #[test]
    fn test_rank_by_fitness_stable() {
        assert_eq!(rank_by_fitness(&population()), vec![1, 3, 0, 2]);
    }

    #[test]
    fn test_all_sums_every_deposit() {
        let tours = population();
        let ranked = rank_by_fitness(&tours);
        let agg = aggregate(TrailUpdate::All, &tours, &ranked, &Matrix::new(3), 0);
        assert!((agg.get(0, 1) - 0.25).abs() < 1e-12);
        assert!((agg.get(1, 2) - 0.5).abs() < 1e-12);
        assert!((agg.get(2, 0) - 0.125).abs() < 1e-12);
        assert!((agg.get(0, 2) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_best_scales_by_population() {
        let tours = population();
        let ranked = rank_by_fitness(&tours);
        let agg = aggregate(TrailUpdate::Best, &tours, &ranked, &Matrix::new(3), 0);
        assert!((agg.get(1, 2) - 2.0).abs() < 1e-12);
        assert_eq!(agg.count_nonzero(), 1);
    }

    #[test]
    fn test_elitist() {
        let tours = population();
        let ranked = rank_by_fitness(&tours);
        let mut global = Matrix::new(3);
        global.set(1, 0, 1.0);

        let agg = aggregate(TrailUpdate::Elitist, &tours, &ranked, &global, 2);
        assert!((agg.get(1, 2) - 0.5).abs() < 1e-12);
        assert!((agg.get(0, 2) - 0.5).abs() < 1e-12);
        assert_eq!(agg.get(0, 1), 0.0);
        assert!((agg.get(1, 0) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_elitist_without_elite_uses_only_global_best() {
        let tours = population();
        let ranked = rank_by_fitness(&tours);
        let mut global = Matrix::new(3);
        global.set(2, 1, 0.5);

        let agg = aggregate(TrailUpdate::Elitist, &tours, &ranked, &global, 0);
        assert_eq!(agg.count_nonzero(), 1);
        assert!((agg.get(2, 1) - 2.0).abs() < 1e-12);
    }
}
