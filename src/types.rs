//! Core contracts of the GA engine.
//!
//! [`Objective`] is the single externally supplied dependency: a synchronous,
//! side-effect-free mapping from a decoded solution to a scalar fitness.
//! [`Optimization`] fixes the direction every ranking operation uses.

use std::cmp::Ordering;
use std::str::FromStr;

use crate::error::GaError;

/// A user-supplied objective function.
///
/// Maps an ordered sequence of `n_variables` real numbers to a single fitness
/// value. The engine treats it as a pure black box: it is invoked exactly once
/// per chromosome creation and never retried or memoized.
///
/// Any `Fn(&[f64]) -> f64` closure or function implements this trait:
///
/// ```
/// use bitga::Objective;
///
/// let sum = |x: &[f64]| x.iter().sum::<f64>();
/// assert_eq!(sum.evaluate(&[1.0, 2.0]), 3.0);
/// ```
pub trait Objective {
    /// Computes the fitness of a decoded solution.
    fn evaluate(&self, x: &[f64]) -> f64;
}

impl<F> Objective for F
where
    F: Fn(&[f64]) -> f64,
{
    fn evaluate(&self, x: &[f64]) -> f64 {
        self(x)
    }
}

/// Optimization direction for ranking and selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Optimization {
    /// Lower fitness is better.
    #[default]
    Min,
    /// Higher fitness is better.
    Max,
}

impl Optimization {
    /// Ordering that puts the better of two fitness values first.
    ///
    /// Incomparable values (NaN) compare equal, matching how the engine
    /// sorts populations.
    pub fn better_first(self, a: f64, b: f64) -> Ordering {
        let ord = match self {
            Optimization::Min => a.partial_cmp(&b),
            Optimization::Max => b.partial_cmp(&a),
        };
        ord.unwrap_or(Ordering::Equal)
    }

    /// Returns `true` if `candidate` is strictly better than `incumbent`.
    pub fn is_improvement(self, candidate: f64, incumbent: f64) -> bool {
        self.better_first(candidate, incumbent) == Ordering::Less
    }

    /// The worst representable fitness under this direction.
    ///
    /// Unevaluated individuals sort last when ranked with this sentinel.
    pub fn worst(self) -> f64 {
        match self {
            Optimization::Min => f64::INFINITY,
            Optimization::Max => f64::NEG_INFINITY,
        }
    }
}

impl FromStr for Optimization {
    type Err = GaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "min" => Ok(Optimization::Min),
            "max" => Ok(Optimization::Max),
            other => Err(GaError::invalid(
                "optimization",
                format!("must be \"min\" or \"max\", got {other:?}"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_is_objective() {
        let sphere = |x: &[f64]| x.iter().map(|v| v * v).sum::<f64>();
        assert!((sphere.evaluate(&[3.0, 4.0]) - 25.0).abs() < 1e-12);
    }

    #[test]
    fn test_better_first_min() {
        assert_eq!(Optimization::Min.better_first(1.0, 2.0), Ordering::Less);
        assert_eq!(Optimization::Min.better_first(2.0, 1.0), Ordering::Greater);
        assert_eq!(Optimization::Min.better_first(1.0, 1.0), Ordering::Equal);
    }

    #[test]
    fn test_better_first_max() {
        assert_eq!(Optimization::Max.better_first(2.0, 1.0), Ordering::Less);
        assert_eq!(Optimization::Max.better_first(1.0, 2.0), Ordering::Greater);
    }

    #[test]
    fn test_is_improvement() {
        assert!(Optimization::Min.is_improvement(0.5, 1.0));
        assert!(!Optimization::Min.is_improvement(1.0, 1.0));
        assert!(Optimization::Max.is_improvement(1.5, 1.0));
        assert!(!Optimization::Max.is_improvement(0.5, 1.0));
    }

    #[test]
    fn test_worst_sorts_last() {
        assert_eq!(Optimization::Min.worst(), f64::INFINITY);
        assert_eq!(Optimization::Max.worst(), f64::NEG_INFINITY);
    }

    #[test]
    fn test_parse() {
        assert_eq!("min".parse::<Optimization>().unwrap(), Optimization::Min);
        assert_eq!("max".parse::<Optimization>().unwrap(), Optimization::Max);
        assert!("MAX".parse::<Optimization>().is_err());
    }
}
