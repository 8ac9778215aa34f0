//! The evolution engine: configuration in, winner plus history out.
//!
//! [`GeneticAlgorithm`] owns a validated [`GaConfig`] and the objective
//! function, and composes encoding, elitism, crossover, mutation, and
//! inversion into the generational loop. Each epoch builds the next
//! population in full before it replaces the previous one, appends an
//! [`EpochRecord`] to the run history, and carries elites over unchanged.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::chromosome::Chromosome;
use crate::config::GaConfig;
use crate::encoding::Encoding;
use crate::error::GaError;
use crate::operators::distinct_pair;
use crate::selection;
use crate::types::{Objective, Optimization};

/// Statistics of one completed epoch, plus the epoch's best individual.
///
/// Records are append-only: one per epoch, never mutated after the epoch
/// completes. `epoch` is 1-based.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EpochRecord {
    /// 1-based epoch index.
    pub epoch: usize,
    /// Best individual of this epoch's population.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub best: Chromosome,
    /// Fitness of `best`.
    pub best_fitness: f64,
    /// Mean population fitness.
    pub average_fitness: f64,
    /// Highest fitness in the population (regardless of direction).
    pub max_fitness: f64,
    /// Lowest fitness in the population (regardless of direction).
    pub min_fitness: f64,
    /// Population standard deviation of fitness.
    pub std_fitness: f64,
}

/// Result of a completed run.
#[derive(Debug, Clone)]
pub struct GaResult {
    /// Best individual of the final epoch.
    pub winner: Chromosome,
    /// One record per completed epoch, in order.
    pub history: Vec<EpochRecord>,
}

/// Per-epoch observer, invoked after each epoch's record is built.
pub type EpochHook = Box<dyn FnMut(&EpochRecord)>;

/// The GA engine.
///
/// Construction validates the configuration and fails fast; a constructed
/// engine always holds a runnable config and a non-null objective.
///
/// ```
/// use bitga::{GaConfig, GeneticAlgorithm};
///
/// let config = GaConfig::default()
///     .with_n_variables(1)
///     .with_uniform_bounds(0.0, 10.0)
///     .with_epochs(20)
///     .with_seed(42);
/// let mut ga = GeneticAlgorithm::with_fn(config, |x| x[0]).unwrap();
/// let result = ga.run().unwrap();
/// assert_eq!(result.history.len(), 20);
/// ```
pub struct GeneticAlgorithm {
    config: GaConfig,
    encoding: Arc<Encoding>,
    objective: Box<dyn Objective>,
    population: Vec<Chromosome>,
    on_epoch: Option<EpochHook>,
}

impl GeneticAlgorithm {
    /// Builds an engine from a config and an objective.
    ///
    /// Fails with [`GaError::InvalidConfig`] on any config violation and
    /// with [`GaError::MissingObjective`] if `objective` is `None` — the
    /// objective is typically resolved from user input by an interactive
    /// collaborator, so its absence is an input error, not a type error.
    pub fn new(config: GaConfig, objective: Option<Box<dyn Objective>>) -> Result<Self, GaError> {
        config.validate()?;
        let objective = objective.ok_or(GaError::MissingObjective)?;
        let encoding = Arc::new(Encoding::new(config.bounds.clone(), config.precision)?);
        Ok(Self {
            config,
            encoding,
            objective,
            population: Vec::new(),
            on_epoch: None,
        })
    }

    /// Convenience constructor from a plain function or closure.
    pub fn with_fn<F>(config: GaConfig, objective: F) -> Result<Self, GaError>
    where
        F: Fn(&[f64]) -> f64 + 'static,
    {
        Self::new(config, Some(Box::new(objective)))
    }

    /// Registers a hook invoked once per epoch with that epoch's record.
    /// This is the seam for logging and charting collaborators.
    pub fn with_on_epoch(mut self, hook: impl FnMut(&EpochRecord) + 'static) -> Self {
        self.on_epoch = Some(Box::new(hook));
        self
    }

    /// The validated configuration.
    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// The shared encoding derived from bounds and precision.
    pub fn encoding(&self) -> &Arc<Encoding> {
        &self.encoding
    }

    /// The last population produced by [`run`](Self::run); empty before the
    /// first run.
    pub fn population(&self) -> &[Chromosome] {
        &self.population
    }

    /// Executes the full run: initialization, initial evaluation, and
    /// `epochs` generational iterations.
    ///
    /// Returns the final epoch's best individual and the complete history.
    /// Running again starts from a fresh random population; runs are
    /// independent.
    pub fn run(&mut self) -> Result<GaResult, GaError> {
        let mut rng = StdRng::seed_from_u64(self.config.seed.unwrap_or_else(rand::random));
        let size = self.config.population_size;
        let optimization = self.config.optimization;

        let mut population: Vec<Chromosome> = (0..size)
            .map(|_| Chromosome::random(&self.encoding, &mut rng))
            .collect();
        for individual in &mut population {
            individual.evaluate_fitness(&*self.objective);
        }

        let mut history = Vec::with_capacity(self.config.epochs);
        for epoch in 1..=self.config.epochs {
            // Elites seed the next population with their fitness intact.
            let mut next = selection::elite(&population, self.config.elite_p, optimization);

            while next.len() < size {
                // Two distinct parents per pairing; repeats across pairings
                // are allowed.
                let (i, j) = distinct_pair(population.len(), &mut rng);
                let (c1, c2) =
                    self.config
                        .crossover
                        .offspring(&population[i], &population[j], &mut rng)?;

                for child in [c1, c2] {
                    if next.len() >= size {
                        break;
                    }
                    let mutated = self.config.mutation.apply(&child, self.config.p_mutation, &mut rng);
                    let mut offspring =
                        self.config
                            .inversion
                            .maybe_apply(&mutated, self.config.p_inversion, &mut rng);
                    offspring.evaluate_fitness(&*self.objective);
                    next.push(offspring);
                }
            }

            population = next;

            let record = epoch_record(epoch, &population, optimization);
            if let Some(hook) = self.on_epoch.as_mut() {
                hook(&record);
            }
            history.push(record);
        }

        let winner = history
            .last()
            .expect("epochs is validated to be at least 1")
            .best
            .clone();
        self.population = population;
        Ok(GaResult { winner, history })
    }
}

/// Builds the statistics record for one completed epoch.
fn epoch_record(epoch: usize, population: &[Chromosome], optimization: Optimization) -> EpochRecord {
    let fitnesses: Vec<f64> = population
        .iter()
        .map(|c| c.fitness().unwrap_or(optimization.worst()))
        .collect();
    let n = fitnesses.len() as f64;
    let average = fitnesses.iter().sum::<f64>() / n;
    let max = fitnesses.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let min = fitnesses.iter().cloned().fold(f64::INFINITY, f64::min);
    let variance = fitnesses.iter().map(|f| (f - average).powi(2)).sum::<f64>() / n;
    let best = selection::best(population, optimization).clone();
    EpochRecord {
        epoch,
        best_fitness: best.fitness().unwrap_or(optimization.worst()),
        best,
        average_fitness: average,
        max_fitness: max,
        min_fitness: min,
        std_fitness: variance.sqrt(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operators::{Crossover, Mutation};
    use std::cell::Cell;
    use std::rc::Rc;

    fn sum_of(x: &[f64]) -> f64 {
        x.iter().sum()
    }

    #[test]
    fn test_invalid_config_fails_at_construction() {
        let config = GaConfig::default().with_p_mutation(1.5);
        let err = GeneticAlgorithm::with_fn(config, sum_of).err().unwrap();
        assert!(matches!(
            err,
            GaError::InvalidConfig { field: "p_mutation", .. }
        ));
    }

    #[test]
    fn test_bounds_mismatch_fails_at_construction() {
        let config = GaConfig::default()
            .with_n_variables(3)
            .with_bounds(vec![(0.0, 1.0)]);
        let err = GeneticAlgorithm::with_fn(config, sum_of).err().unwrap();
        assert!(matches!(err, GaError::InvalidConfig { field: "bounds", .. }));
    }

    #[test]
    fn test_missing_objective_fails_at_construction() {
        let err = GeneticAlgorithm::new(GaConfig::default(), None).err().unwrap();
        assert!(matches!(err, GaError::MissingObjective));
    }

    #[test]
    fn test_full_elitism_no_variation_keeps_initial_population() {
        // With elite_p = 1.0 and all variation off, the single epoch must
        // return the initial population untouched and pick its maximum.
        let seed = 42;
        let config = GaConfig::default()
            .with_population_size(4)
            .with_n_variables(1)
            .with_bounds(vec![(0.0, 10.0)])
            .with_precision(0)
            .with_epochs(1)
            .with_p_mutation(0.0)
            .with_p_inversion(0.0)
            .with_elite_p(1.0)
            .with_mutation(Mutation::OnePoint)
            .with_optimization(Optimization::Max)
            .with_seed(seed);

        let mut ga = GeneticAlgorithm::with_fn(config, |x| x[0]).unwrap();
        let result = ga.run().unwrap();

        // Replay initialization with the same seed: the engine draws the
        // population before any other randomness.
        let mut replay_rng = StdRng::seed_from_u64(seed);
        let initial: Vec<Chromosome> = (0..4)
            .map(|_| Chromosome::random(ga.encoding(), &mut replay_rng))
            .collect();
        let mut initial_genes: Vec<_> = initial.iter().map(|c| c.genes().to_vec()).collect();
        let mut final_genes: Vec<_> = ga.population().iter().map(|c| c.genes().to_vec()).collect();
        initial_genes.sort_by_key(|genes| genes[0].to_string());
        final_genes.sort_by_key(|genes| genes[0].to_string());
        assert_eq!(initial_genes, final_genes);

        let max_decoded = initial
            .iter()
            .map(|c| c.decode()[0])
            .fold(f64::NEG_INFINITY, f64::max);
        assert_eq!(result.winner.decode()[0], max_decoded);
        assert_eq!(result.history.len(), 1);
    }

    #[test]
    fn test_elitism_keeps_best_fitness_monotonic() {
        let config = GaConfig::default()
            .with_population_size(20)
            .with_n_variables(2)
            .with_uniform_bounds(0.0, 10.0)
            .with_epochs(30)
            .with_p_mutation(0.1)
            .with_elite_p(0.1)
            .with_optimization(Optimization::Max)
            .with_seed(7);
        let mut ga = GeneticAlgorithm::with_fn(config, sum_of).unwrap();
        let result = ga.run().unwrap();

        for window in result.history.windows(2) {
            assert!(
                window[1].best_fitness >= window[0].best_fitness,
                "best fitness regressed: {} -> {}",
                window[0].best_fitness,
                window[1].best_fitness
            );
        }
    }

    #[test]
    fn test_maximization_converges_toward_upper_bound() {
        let config = GaConfig::default()
            .with_population_size(30)
            .with_n_variables(1)
            .with_bounds(vec![(0.0, 10.0)])
            .with_epochs(100)
            .with_p_mutation(0.05)
            .with_elite_p(0.1)
            .with_crossover(Crossover::OnePoint)
            .with_optimization(Optimization::Max)
            .with_seed(42);
        let mut ga = GeneticAlgorithm::with_fn(config, |x| x[0]).unwrap();
        let result = ga.run().unwrap();
        assert!(
            result.winner.fitness().unwrap() > 8.0,
            "expected near-10 winner, got {:?}",
            result.winner.fitness()
        );
    }

    #[test]
    fn test_minimization_converges_toward_lower_bound() {
        let config = GaConfig::default()
            .with_population_size(30)
            .with_n_variables(2)
            .with_uniform_bounds(-5.0, 5.0)
            .with_epochs(100)
            .with_p_mutation(0.05)
            .with_elite_p(0.1)
            .with_optimization(Optimization::Min)
            .with_seed(42);
        let mut ga =
            GeneticAlgorithm::with_fn(config, |x| x.iter().map(|v| v * v).sum::<f64>()).unwrap();
        let result = ga.run().unwrap();
        assert!(
            result.winner.fitness().unwrap() < 2.0,
            "expected near-zero sphere minimum, got {:?}",
            result.winner.fitness()
        );
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let config = GaConfig::default()
            .with_population_size(12)
            .with_epochs(20)
            .with_seed(123);
        let run = |config: GaConfig| {
            let mut ga = GeneticAlgorithm::with_fn(config, sum_of).unwrap();
            ga.run()
                .unwrap()
                .history
                .iter()
                .map(|r| r.best_fitness)
                .collect::<Vec<_>>()
        };
        assert_eq!(run(config.clone()), run(config));
    }

    #[test]
    fn test_history_statistics_are_consistent() {
        let config = GaConfig::default()
            .with_population_size(15)
            .with_epochs(10)
            .with_optimization(Optimization::Min)
            .with_seed(5);
        let mut ga = GeneticAlgorithm::with_fn(config, sum_of).unwrap();
        let result = ga.run().unwrap();

        assert_eq!(result.history.len(), 10);
        for (i, record) in result.history.iter().enumerate() {
            assert_eq!(record.epoch, i + 1);
            assert!(record.min_fitness <= record.average_fitness + 1e-9);
            assert!(record.average_fitness <= record.max_fitness + 1e-9);
            assert!(record.std_fitness >= 0.0);
            // Minimizing: the epoch's best is its minimum.
            assert_eq!(record.best_fitness, record.min_fitness);
            assert_eq!(record.best.fitness(), Some(record.best_fitness));
        }
    }

    #[test]
    fn test_population_size_is_preserved_for_odd_sizes() {
        // Elite count 1 plus pairs of offspring exercises the early stop
        // after the first offspring of a pair.
        let config = GaConfig::default()
            .with_population_size(5)
            .with_epochs(8)
            .with_seed(3);
        let mut ga = GeneticAlgorithm::with_fn(config, sum_of).unwrap();
        ga.run().unwrap();
        assert_eq!(ga.population().len(), 5);
        assert!(ga.population().iter().all(|c| c.fitness().is_some()));
    }

    #[test]
    fn test_on_epoch_hook_fires_once_per_epoch() {
        let calls = Rc::new(Cell::new(0usize));
        let seen = Rc::clone(&calls);
        let config = GaConfig::default().with_epochs(9).with_seed(1);
        let mut ga = GeneticAlgorithm::with_fn(config, sum_of)
            .unwrap()
            .with_on_epoch(move |record| {
                seen.set(seen.get() + 1);
                assert!(record.epoch >= 1);
            });
        ga.run().unwrap();
        assert_eq!(calls.get(), 9);
    }

    #[test]
    fn test_winner_is_final_epoch_best() {
        let config = GaConfig::default()
            .with_population_size(10)
            .with_epochs(15)
            .with_optimization(Optimization::Max)
            .with_seed(11);
        let mut ga = GeneticAlgorithm::with_fn(config, sum_of).unwrap();
        let result = ga.run().unwrap();
        let last = result.history.last().unwrap();
        assert_eq!(result.winner.fitness(), Some(last.best_fitness));
    }

    #[test]
    fn test_rerun_is_independent() {
        let config = GaConfig::default().with_epochs(5).with_seed(2);
        let mut ga = GeneticAlgorithm::with_fn(config, sum_of).unwrap();
        let first = ga.run().unwrap();
        let second = ga.run().unwrap();
        assert_eq!(first.history.len(), second.history.len());
        // Same seed: the second run replays the first.
        assert_eq!(
            first.history.last().unwrap().best_fitness,
            second.history.last().unwrap().best_fitness
        );
    }

    #[test]
    fn test_all_operator_combinations_run() {
        for crossover in [
            Crossover::OnePoint,
            Crossover::TwoPoint,
            Crossover::Uniform { p: 0.5 },
            Crossover::Discrete,
        ] {
            for mutation in [Mutation::OnePoint, Mutation::TwoPoint, Mutation::Boundary] {
                let config = GaConfig::default()
                    .with_population_size(8)
                    .with_epochs(5)
                    .with_crossover(crossover)
                    .with_mutation(mutation)
                    .with_seed(42);
                let mut ga = GeneticAlgorithm::with_fn(config, sum_of).unwrap();
                let result = ga.run().unwrap();
                assert_eq!(result.history.len(), 5, "{crossover:?}/{mutation:?}");
            }
        }
    }
}
