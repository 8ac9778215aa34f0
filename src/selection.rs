//! Ranking, elitism, and parent-selection strategies.
//!
//! All strategies take the optimization direction explicitly; there is no
//! implicit minimization assumption. Selection returns indices into the
//! population so callers can draw the same individual more than once,
//! which is intentional for tournament and roulette sampling.

use rand::Rng;

use crate::chromosome::Chromosome;
use crate::types::Optimization;

/// Divisor guard for the roulette transform when minimizing.
const ROULETTE_EPSILON: f64 = 1e-10;

fn fitness_key(chromosome: &Chromosome, optimization: Optimization) -> f64 {
    chromosome.fitness().unwrap_or(optimization.worst())
}

/// The top `max(1, floor(len * elite_p))` individuals, best first.
///
/// Elites are cloned with their fitness intact: genes are unchanged and the
/// objective is pure, so carrying the stale value over is exact and saves an
/// evaluation per elite per epoch.
pub fn elite(
    population: &[Chromosome],
    elite_p: f64,
    optimization: Optimization,
) -> Vec<Chromosome> {
    let count = ((population.len() as f64 * elite_p).floor() as usize).max(1);
    let mut ranked: Vec<&Chromosome> = population.iter().collect();
    ranked.sort_by(|a, b| {
        optimization.better_first(fitness_key(a, optimization), fitness_key(b, optimization))
    });
    ranked.into_iter().take(count).cloned().collect()
}

/// The single extremal individual under the given direction.
///
/// # Panics
/// Panics if `population` is empty.
pub fn best(population: &[Chromosome], optimization: Optimization) -> &Chromosome {
    population
        .iter()
        .min_by(|a, b| {
            optimization.better_first(fitness_key(a, optimization), fitness_key(b, optimization))
        })
        .expect("population must not be empty")
}

/// Parent-selection strategy.
///
/// Not required by the minimal elitist loop, but part of the operator family
/// for callers composing their own reproduction schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Selection {
    /// Top-k truncation: the `num_select` best individuals in rank order.
    Best,
    /// Repeatedly samples `k` distinct individuals and keeps the extremum.
    /// Draws are with replacement across tournaments, so duplicates among
    /// the selected are possible and intentional.
    Tournament(usize),
    /// Fitness-proportionate sampling with replacement. When minimizing,
    /// fitness is first transformed via `1 / (fitness + ε)` so that lower
    /// fitness maps to higher selection weight.
    Roulette,
}

impl Selection {
    /// Selects `num_select` population indices under the given direction.
    ///
    /// # Panics
    /// Panics if `population` is empty.
    pub fn select<R: Rng>(
        &self,
        population: &[Chromosome],
        num_select: usize,
        optimization: Optimization,
        rng: &mut R,
    ) -> Vec<usize> {
        assert!(!population.is_empty(), "cannot select from empty population");
        match self {
            Selection::Best => truncation(population, num_select, optimization),
            Selection::Tournament(k) => {
                (0..num_select)
                    .map(|_| tournament(population, *k, optimization, rng))
                    .collect()
            }
            Selection::Roulette => roulette(population, num_select, optimization, rng),
        }
    }
}

fn truncation(
    population: &[Chromosome],
    num_select: usize,
    optimization: Optimization,
) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..population.len()).collect();
    indices.sort_by(|&a, &b| {
        optimization.better_first(
            fitness_key(&population[a], optimization),
            fitness_key(&population[b], optimization),
        )
    });
    indices.truncate(num_select);
    indices
}

fn tournament<R: Rng>(
    population: &[Chromosome],
    k: usize,
    optimization: Optimization,
    rng: &mut R,
) -> usize {
    let n = population.len();
    let k = k.clamp(1, n);
    // Entrants within one tournament are distinct; winners across
    // tournaments may repeat.
    rand::seq::index::sample(rng, n, k)
        .into_iter()
        .min_by(|&a, &b| {
            optimization.better_first(
                fitness_key(&population[a], optimization),
                fitness_key(&population[b], optimization),
            )
        })
        .expect("tournament size is at least 1")
}

fn roulette<R: Rng>(
    population: &[Chromosome],
    num_select: usize,
    optimization: Optimization,
    rng: &mut R,
) -> Vec<usize> {
    let n = population.len();
    let weights: Vec<f64> = population
        .iter()
        .map(|c| {
            let f = fitness_key(c, optimization);
            match optimization {
                Optimization::Min => 1.0 / (f + ROULETTE_EPSILON),
                Optimization::Max => f,
            }
        })
        .collect();

    let total: f64 = weights.iter().sum();
    if !total.is_finite() || total <= 0.0 {
        // Degenerate weights (all zero, negative, or non-finite): fall back
        // to uniform sampling.
        return (0..num_select).map(|_| rng.random_range(0..n)).collect();
    }

    (0..num_select)
        .map(|_| {
            let threshold = rng.random_range(0.0..total);
            let mut cumulative = 0.0;
            for (i, &w) in weights.iter().enumerate() {
                cumulative += w;
                if cumulative > threshold {
                    return i;
                }
            }
            n - 1 // floating-point fallback
        })
        .collect()
}
