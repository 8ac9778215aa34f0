//! Binary-encoded genetic algorithm engine.
//!
//! Evolves a population of fixed-precision numeric vectors, encoded as
//! concatenated bit strings, to minimize or maximize a user-supplied
//! objective function.
//!
//! # Core Types
//!
//! - [`Encoding`] / [`Gene`] / [`Chromosome`]: fixed-width binary encoding of
//!   bounded real variables and candidate solutions
//! - [`Crossover`], [`Mutation`], [`Inversion`]: pluggable variation
//!   operators, selectable as tagged enums or parsed from method names
//! - [`Selection`] and the [`selection`] module: elitism and parent-selection
//!   strategies under an explicit [`Optimization`] direction
//! - [`GaConfig`]: validated run parameters with a builder API
//! - [`GeneticAlgorithm`]: the generational loop, producing a [`GaResult`]
//!   with the winner and one [`EpochRecord`] per epoch
//!
//! # Example
//!
//! ```
//! use bitga::{functions, GaConfig, GeneticAlgorithm, Optimization};
//!
//! let config = GaConfig::default()
//!     .with_n_variables(2)
//!     .with_uniform_bounds(-1.5, 4.0)
//!     .with_epochs(60)
//!     .with_optimization(Optimization::Min)
//!     .with_seed(42);
//!
//! let mut ga = GeneticAlgorithm::with_fn(config, functions::mccormick).unwrap();
//! let result = ga.run().unwrap();
//! println!("{}", result.winner);
//! ```
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and
//!   Machine Learning*

mod chromosome;
mod config;
mod encoding;
mod error;
pub mod functions;
mod operators;
mod runner;
pub mod selection;
mod types;

pub use chromosome::Chromosome;
pub use config::GaConfig;
pub use encoding::{Encoding, Gene};
pub use error::GaError;
pub use operators::{Crossover, Inversion, Mutation};
pub use runner::{EpochRecord, GaResult, GeneticAlgorithm};
pub use selection::Selection;
pub use types::{Objective, Optimization};
