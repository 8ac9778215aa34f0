//! Engine configuration.
//!
//! [`GaConfig`] is read once at engine construction and validated as a whole;
//! the engine never starts with a partially valid config. Builder methods set
//! values as given — out-of-range values are rejected by
//! [`validate`](GaConfig::validate) rather than silently clamped, so a form
//! or CLI collaborator can surface the exact violation to the user.

use crate::encoding::Encoding;
use crate::error::GaError;
use crate::operators::{Crossover, Inversion, Mutation};
use crate::types::Optimization;

/// Configuration for one GA run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of individuals in the population, fixed for the run.
    pub population_size: usize,

    /// Number of decision variables; must equal `bounds.len()`.
    pub n_variables: usize,

    /// Per-variable `(min, max)` bounds, `min < max` strictly.
    pub bounds: Vec<(f64, f64)>,

    /// Decimal digits retained when decoding a gene to a real value.
    /// Together with a bound it determines that variable's gene length.
    pub precision: u32,

    /// Number of epochs the generational loop executes.
    pub epochs: usize,

    /// Per-bit flip probability for one-point mutation, in `[0, 1]`.
    pub p_mutation: f64,

    /// Per-offspring probability of applying inversion, in `[0, 1]`.
    pub p_inversion: f64,

    /// Fraction of the population carried over unchanged each epoch, in
    /// `[0, 1]`. At least one individual always carries over.
    pub elite_p: f64,

    /// Crossover method.
    pub crossover: Crossover,

    /// Mutation method.
    pub mutation: Mutation,

    /// Inversion method.
    pub inversion: Inversion,

    /// Whether fitness is minimized or maximized.
    pub optimization: Optimization,

    /// Random seed for reproducibility. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 10,
            n_variables: 2,
            bounds: vec![(-3.0, 4.0); 2],
            precision: 3,
            epochs: 125,
            p_mutation: 0.09,
            p_inversion: 0.09,
            elite_p: 0.15,
            crossover: Crossover::default(),
            mutation: Mutation::default(),
            inversion: Inversion::default(),
            optimization: Optimization::default(),
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of variables. Call before
    /// [`with_uniform_bounds`](Self::with_uniform_bounds).
    pub fn with_n_variables(mut self, n: usize) -> Self {
        self.n_variables = n;
        self
    }

    /// Sets per-variable bounds explicitly.
    pub fn with_bounds(mut self, bounds: Vec<(f64, f64)>) -> Self {
        self.bounds = bounds;
        self
    }

    /// Applies the same `(min, max)` bound to every variable.
    pub fn with_uniform_bounds(mut self, min: f64, max: f64) -> Self {
        self.bounds = vec![(min, max); self.n_variables];
        self
    }

    /// Sets the decoding precision.
    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }

    /// Sets the number of epochs.
    pub fn with_epochs(mut self, epochs: usize) -> Self {
        self.epochs = epochs;
        self
    }

    /// Sets the per-bit mutation probability.
    pub fn with_p_mutation(mut self, p: f64) -> Self {
        self.p_mutation = p;
        self
    }

    /// Sets the per-offspring inversion probability.
    pub fn with_p_inversion(mut self, p: f64) -> Self {
        self.p_inversion = p;
        self
    }

    /// Sets the elite fraction.
    pub fn with_elite_p(mut self, p: f64) -> Self {
        self.elite_p = p;
        self
    }

    /// Sets the crossover method.
    pub fn with_crossover(mut self, method: Crossover) -> Self {
        self.crossover = method;
        self
    }

    /// Sets the mutation method.
    pub fn with_mutation(mut self, method: Mutation) -> Self {
        self.mutation = method;
        self
    }

    /// Sets the inversion method.
    pub fn with_inversion(mut self, method: Inversion) -> Self {
        self.inversion = method;
        self
    }

    /// Sets the optimization direction.
    pub fn with_optimization(mut self, optimization: Optimization) -> Self {
        self.optimization = optimization;
        self
    }

    /// Sets the random seed for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates every configuration invariant.
    ///
    /// Fails with [`GaError::InvalidConfig`] naming the offending field.
    pub fn validate(&self) -> Result<(), GaError> {
        if self.population_size < 2 {
            return Err(GaError::invalid(
                "population_size",
                format!("must be at least 2, got {}", self.population_size),
            ));
        }
        if self.n_variables == 0 {
            return Err(GaError::invalid("n_variables", "must be at least 1"));
        }
        if self.epochs == 0 {
            return Err(GaError::invalid("epochs", "must be at least 1"));
        }
        if self.bounds.len() != self.n_variables {
            return Err(GaError::invalid(
                "bounds",
                format!(
                    "length must equal n_variables ({}), got {}",
                    self.n_variables,
                    self.bounds.len()
                ),
            ));
        }
        for &bound in &self.bounds {
            // Also rejects degenerate or zero-width-gene bounds.
            Encoding::gene_length(bound, self.precision)?;
        }
        check_probability("p_mutation", self.p_mutation)?;
        check_probability("p_inversion", self.p_inversion)?;
        check_probability("elite_p", self.elite_p)?;
        if let Crossover::Uniform { p } = self.crossover {
            check_probability("crossover", p)?;
        }
        Ok(())
    }
}

fn check_probability(field: &'static str, value: f64) -> Result<(), GaError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(GaError::invalid(
            field,
            format!("must be within [0, 1], got {value}"),
        ));
    }
    Ok(())
}
