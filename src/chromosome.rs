//! Chromosomes: candidate solutions as ordered gene sequences.

use std::fmt;
use std::sync::Arc;

use rand::Rng;

use crate::encoding::{Encoding, Gene};
use crate::error::GaError;
use crate::types::Objective;

/// One candidate solution: an ordered sequence of binary genes, one per
/// decision variable, plus its fitness once evaluated.
///
/// Chromosomes are immutable once constructed — every variation operator
/// returns a new chromosome sharing the same [`Encoding`]. Fitness is `None`
/// until [`evaluate_fitness`](Chromosome::evaluate_fitness) runs; since the
/// objective is pure, a chromosome's fitness never changes afterwards.
#[derive(Debug, Clone)]
pub struct Chromosome {
    genes: Vec<Gene>,
    encoding: Arc<Encoding>,
    fitness: Option<f64>,
}

impl Chromosome {
    /// Builds a chromosome from explicit genes, checking that the gene count
    /// and every gene width match the encoding.
    pub fn new(genes: Vec<Gene>, encoding: Arc<Encoding>) -> Result<Self, GaError> {
        if genes.len() != encoding.n_variables() {
            return Err(GaError::invalid(
                "genes",
                format!(
                    "expected {} genes to match the number of variables, got {}",
                    encoding.n_variables(),
                    genes.len()
                ),
            ));
        }
        for (i, gene) in genes.iter().enumerate() {
            let expected = encoding.gene_lengths()[i];
            if gene.len() != expected {
                return Err(GaError::invalid(
                    "genes",
                    format!(
                        "gene {i} must be {expected} bits for its bound, got {}",
                        gene.len()
                    ),
                ));
            }
        }
        Ok(Chromosome {
            genes,
            encoding,
            fitness: None,
        })
    }

    /// Draws a random chromosome: a fair coin per bit of every gene.
    pub fn random<R: Rng>(encoding: &Arc<Encoding>, rng: &mut R) -> Self {
        let genes = (0..encoding.n_variables())
            .map(|i| encoding.random_gene(i, rng))
            .collect();
        Chromosome {
            genes,
            encoding: Arc::clone(encoding),
            fitness: None,
        }
    }

    /// Replaces the genes, producing a new unevaluated chromosome with the
    /// same encoding. Used by the variation operators; the caller guarantees
    /// gene widths are unchanged.
    pub(crate) fn with_genes(&self, genes: Vec<Gene>) -> Self {
        Chromosome {
            genes,
            encoding: Arc::clone(&self.encoding),
            fitness: None,
        }
    }

    /// The raw genes, one per variable.
    pub fn genes(&self) -> &[Gene] {
        &self.genes
    }

    /// The shared encoding this chromosome was built against.
    pub fn encoding(&self) -> &Arc<Encoding> {
        &self.encoding
    }

    /// The fitness assigned by the last evaluation, or `None` if the
    /// chromosome has not been evaluated.
    pub fn fitness(&self) -> Option<f64> {
        self.fitness
    }

    /// Decodes every gene to its real value, rounded to the configured
    /// precision. Pure: depends only on genes, bounds, and precision.
    pub fn decode(&self) -> Vec<f64> {
        self.genes
            .iter()
            .enumerate()
            .map(|(i, gene)| self.encoding.decode_gene(i, gene))
            .collect()
    }

    /// Decodes the chromosome, applies the objective, and stores the result.
    pub fn evaluate_fitness(&mut self, objective: &dyn Objective) -> f64 {
        let fitness = objective.evaluate(&self.decode());
        self.fitness = Some(fitness);
        fitness
    }
}

impl fmt::Display for Chromosome {
    /// Raw genes, decoded values formatted to the configured precision, and
    /// fitness if evaluated.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.encoding.precision() as usize;
        write!(f, "[")?;
        for (i, gene) in self.genes.iter().enumerate() {
            if i > 0 {
                write!(f, "|")?;
            }
            write!(f, "{gene}")?;
        }
        write!(f, "] -> [")?;
        for (i, value) in self.decode().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{value:.digits$}")?;
        }
        write!(f, "]")?;
        if let Some(fitness) = self.fitness {
            write!(f, " fitness: {fitness}")?;
        }
        Ok(())
    }
}
