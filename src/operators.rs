//! Variation operators: crossover, mutation, and inversion.
//!
//! Operators are finite enumerations rather than name-dispatched strings, so
//! an invalid method is rejected when the configuration is parsed, not at
//! first use mid-run. Each operator works gene-by-gene on bit strings and
//! never mutates its input; chromosome-level entry points assemble new
//! chromosomes sharing the parents' encoding.

use std::str::FromStr;

use rand::Rng;

use crate::chromosome::Chromosome;
use crate::encoding::Gene;
use crate::error::GaError;

/// Crossover method applied independently to each of the parents' gene pairs.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Crossover {
    /// Single cut point in `[1, len-1]`; tails are swapped.
    OnePoint,
    /// Two cut points `p1 < p2`; the middle segment is swapped.
    TwoPoint,
    /// Each bit pair is swapped independently with probability `p`.
    Uniform { p: f64 },
    /// Each offspring bit is drawn 50/50 from either parent, independently
    /// per child.
    Discrete,
}

impl Default for Crossover {
    fn default() -> Self {
        Crossover::TwoPoint
    }
}

impl Crossover {
    /// Recombines two equal-length genes into two offspring genes.
    ///
    /// Genes too short for the method's cut points pass through unchanged.
    pub fn apply<R: Rng>(&self, g1: &Gene, g2: &Gene, rng: &mut R) -> Result<(Gene, Gene), GaError> {
        if g1.len() != g2.len() {
            return Err(GaError::LengthMismatch {
                left: g1.len(),
                right: g2.len(),
            });
        }
        let n = g1.len();
        let (a, b) = (g1.bits(), g2.bits());
        let pair = match self {
            Crossover::OnePoint => {
                if n < 2 {
                    return Ok((g1.clone(), g2.clone()));
                }
                let point = rng.random_range(1..n);
                let c1 = [&a[..point], &b[point..]].concat();
                let c2 = [&b[..point], &a[point..]].concat();
                (c1, c2)
            }
            Crossover::TwoPoint => {
                if n < 3 {
                    return Ok((g1.clone(), g2.clone()));
                }
                let p1 = rng.random_range(1..=n - 2);
                let p2 = rng.random_range(p1 + 1..=n - 1);
                let c1 = [&a[..p1], &b[p1..p2], &a[p2..]].concat();
                let c2 = [&b[..p1], &a[p1..p2], &b[p2..]].concat();
                (c1, c2)
            }
            Crossover::Uniform { p } => {
                let mut c1 = Vec::with_capacity(n);
                let mut c2 = Vec::with_capacity(n);
                for i in 0..n {
                    if rng.random_range(0.0..1.0) < *p {
                        c1.push(b[i]);
                        c2.push(a[i]);
                    } else {
                        c1.push(a[i]);
                        c2.push(b[i]);
                    }
                }
                (c1, c2)
            }
            Crossover::Discrete => {
                // One independent 50/50 draw per bit per child; the second
                // child is the operator re-run with the parents swapped.
                let draw = |first: &[bool], second: &[bool], rng: &mut R| {
                    (0..n)
                        .map(|i| {
                            if rng.random_bool(0.5) {
                                first[i]
                            } else {
                                second[i]
                            }
                        })
                        .collect::<Vec<_>>()
                };
                let c1 = draw(a, b, &mut *rng);
                let c2 = draw(b, a, &mut *rng);
                (c1, c2)
            }
        };
        Ok((Gene::from_bits(pair.0), Gene::from_bits(pair.1)))
    }

    /// Applies the method to every gene pair of two parents and assembles two
    /// unevaluated offspring sharing the parents' encoding.
    pub fn offspring<R: Rng>(
        &self,
        parent1: &Chromosome,
        parent2: &Chromosome,
        rng: &mut R,
    ) -> Result<(Chromosome, Chromosome), GaError> {
        let mut genes1 = Vec::with_capacity(parent1.genes().len());
        let mut genes2 = Vec::with_capacity(parent1.genes().len());
        for (g1, g2) in parent1.genes().iter().zip(parent2.genes()) {
            let (c1, c2) = self.apply(g1, g2, rng)?;
            genes1.push(c1);
            genes2.push(c2);
        }
        Ok((parent1.with_genes(genes1), parent1.with_genes(genes2)))
    }
}

impl FromStr for Crossover {
    type Err = GaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "one_point" => Ok(Crossover::OnePoint),
            "two_point" => Ok(Crossover::TwoPoint),
            "uniform" => Ok(Crossover::Uniform { p: 0.5 }),
            "discrete" => Ok(Crossover::Discrete),
            other => Err(GaError::UnknownOperator {
                kind: "crossover",
                name: other.to_string(),
            }),
        }
    }
}

/// Mutation method applied to every offspring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Mutation {
    /// Classic bit-flip: each bit flips independently with probability
    /// `p_mutation`.
    #[default]
    OnePoint,
    /// Reverses the bit order between two random positions of each gene.
    /// The name refers to the two cut points, not a point mutation.
    TwoPoint,
    /// Flips only the first and last bit of each gene.
    Boundary,
}

impl Mutation {
    /// Mutates a single gene, returning a new gene of the same width.
    ///
    /// `p_mutation` is only consulted by [`Mutation::OnePoint`]; the other
    /// methods are parameter-free. Genes too short for a method pass through
    /// unchanged.
    pub fn apply_gene<R: Rng>(&self, gene: &Gene, p_mutation: f64, rng: &mut R) -> Gene {
        match self {
            Mutation::OnePoint => Gene::from_bits(
                gene.bits()
                    .iter()
                    .map(|&bit| {
                        if rng.random_range(0.0..1.0) < p_mutation {
                            !bit
                        } else {
                            bit
                        }
                    })
                    .collect(),
            ),
            Mutation::TwoPoint => reverse_between(gene, rng),
            Mutation::Boundary => {
                if gene.len() < 2 {
                    return gene.clone();
                }
                let mut bits = gene.bits().to_vec();
                bits[0] = !bits[0];
                let last = bits.len() - 1;
                bits[last] = !bits[last];
                Gene::from_bits(bits)
            }
        }
    }

    /// Mutates every gene of a chromosome, returning a new unevaluated
    /// chromosome.
    pub fn apply<R: Rng>(&self, chromosome: &Chromosome, p_mutation: f64, rng: &mut R) -> Chromosome {
        let genes = chromosome
            .genes()
            .iter()
            .map(|gene| self.apply_gene(gene, p_mutation, rng))
            .collect();
        chromosome.with_genes(genes)
    }
}

impl FromStr for Mutation {
    type Err = GaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "one_point" => Ok(Mutation::OnePoint),
            "two_point" => Ok(Mutation::TwoPoint),
            "boundary" => Ok(Mutation::Boundary),
            other => Err(GaError::UnknownOperator {
                kind: "mutation",
                name: other.to_string(),
            }),
        }
    }
}

/// Inversion method, gated per offspring by `p_inversion`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Inversion {
    /// Reverses the bit order between two random positions of each gene,
    /// keeping gene boundaries stable.
    #[default]
    TwoPoint,
}

impl Inversion {
    /// Inverts a single gene. Genes shorter than 3 bits pass through
    /// unchanged.
    pub fn apply_gene<R: Rng>(&self, gene: &Gene, rng: &mut R) -> Gene {
        match self {
            Inversion::TwoPoint => reverse_between(gene, rng),
        }
    }

    /// Applies inversion to every gene of the chromosome.
    pub fn apply<R: Rng>(&self, chromosome: &Chromosome, rng: &mut R) -> Chromosome {
        let genes = chromosome
            .genes()
            .iter()
            .map(|gene| self.apply_gene(gene, rng))
            .collect();
        chromosome.with_genes(genes)
    }

    /// Single Bernoulli trial per offspring: with probability `p_inversion`
    /// applies inversion to every gene, otherwise returns the chromosome
    /// unchanged.
    pub fn maybe_apply<R: Rng>(
        &self,
        chromosome: &Chromosome,
        p_inversion: f64,
        rng: &mut R,
    ) -> Chromosome {
        if rng.random_range(0.0..1.0) < p_inversion {
            self.apply(chromosome, rng)
        } else {
            chromosome.clone()
        }
    }
}

impl FromStr for Inversion {
    type Err = GaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "two_point" => Ok(Inversion::TwoPoint),
            other => Err(GaError::UnknownOperator {
                kind: "inversion",
                name: other.to_string(),
            }),
        }
    }
}

/// Reverse the bits between two distinct random positions `i < j`.
fn reverse_between<R: Rng>(gene: &Gene, rng: &mut R) -> Gene {
    let n = gene.len();
    if n < 3 {
        return gene.clone();
    }
    let (i, j) = distinct_pair(n, rng);
    let mut bits = gene.bits().to_vec();
    bits[i..=j].reverse();
    Gene::from_bits(bits)
}

/// Two distinct indices in `0..n`, returned in ascending order.
pub(crate) fn distinct_pair<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    debug_assert!(n >= 2);
    let a = rng.random_range(0..n);
    let mut b = rng.random_range(0..n - 1);
    if b >= a {
        b += 1;
    }
    (a.min(b), a.max(b))
}
