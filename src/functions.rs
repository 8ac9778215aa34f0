//! Built-in benchmark objective functions.
//!
//! Every function here has the `fn(&[f64]) -> f64` shape and therefore
//! implements [`Objective`](crate::Objective) directly:
//!
//! ```
//! use bitga::{functions, GaConfig, GeneticAlgorithm, Optimization};
//!
//! let config = GaConfig::default()
//!     .with_n_variables(2)
//!     .with_uniform_bounds(-5.0, 5.0)
//!     .with_epochs(50)
//!     .with_optimization(Optimization::Min)
//!     .with_seed(42);
//! let mut ga = GeneticAlgorithm::with_fn(config, functions::sphere).unwrap();
//! let result = ga.run().unwrap();
//! assert!(result.winner.fitness().unwrap() < 25.0);
//! ```

use std::f64::consts::PI;

/// Sum of the elements. Trivial; handy for tests.
pub fn summation(x: &[f64]) -> f64 {
    x.iter().sum()
}

/// Sphere function: `sum(x_i^2)`, global minimum 0 at the origin.
pub fn sphere(x: &[f64]) -> f64 {
    x.iter().map(|v| v * v).sum()
}

/// Rastrigin function: highly multimodal, global minimum 0 at the origin.
/// Usually evaluated on `[-5.12, 5.12]` per variable.
pub fn rastrigin(x: &[f64]) -> f64 {
    10.0 * x.len() as f64
        + x.iter()
            .map(|v| v * v - 10.0 * (2.0 * PI * v).cos())
            .sum::<f64>()
}

/// McCormick function of two variables, global minimum ≈ -1.9133 at
/// (-0.54719, -1.54719). Usually evaluated on x ∈ [-1.5, 4], y ∈ [-3, 4].
///
/// Extra variables beyond the first two are ignored.
pub fn mccormick(x: &[f64]) -> f64 {
    let (a, b) = (x[0], x[1]);
    (a + b).sin() + (a - b).powi(2) - 1.5 * a + 2.5 * b + 1.0
}

/// Three-variable sample objective: `sin(x) + cos(y) + exp(-z^2)`.
pub fn sample(x: &[f64]) -> f64 {
    x[0].sin() + x[1].cos() + (-x[2] * x[2]).exp()
}
