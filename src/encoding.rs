//! Binary encoding of fixed-precision real vectors.
//!
//! Each decision variable is represented by a [`Gene`]: a fixed-width bit
//! string whose width is the minimum number of bits for which the decoded
//! value grid meets the requested decimal precision over the variable's
//! bounds. [`Encoding`] holds the per-variable bounds, the precision, and the
//! precomputed gene lengths; it is shared read-only by every chromosome of a
//! run.

use std::fmt;
use std::str::FromStr;

use rand::Rng;

use crate::error::GaError;

/// The binary encoding of a single decision variable.
///
/// Bits are stored most significant first, matching the usual textbook
/// bit-string notation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gene(Vec<bool>);

impl Gene {
    /// Wraps a raw bit vector.
    pub fn from_bits(bits: Vec<bool>) -> Self {
        Gene(bits)
    }

    /// Draws `len` independent fair-coin bits.
    pub fn random<R: Rng>(len: usize, rng: &mut R) -> Self {
        Gene((0..len).map(|_| rng.random_bool(0.5)).collect())
    }

    /// Number of bits.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the gene has no bits.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The raw bits, most significant first.
    pub fn bits(&self) -> &[bool] {
        &self.0
    }

    /// Interprets the bits as an unsigned base-2 integer.
    ///
    /// Accumulated in `f64` so that genes wider than 64 bits decode without
    /// overflow (at the cost of rounding beyond 53 bits, which is below the
    /// decoded grid resolution anyway).
    pub fn to_integer(&self) -> f64 {
        self.0
            .iter()
            .fold(0.0, |acc, &bit| acc * 2.0 + if bit { 1.0 } else { 0.0 })
    }
}

impl fmt::Display for Gene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.0 {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromStr for Gene {
    type Err = GaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                other => Err(GaError::invalid(
                    "gene",
                    format!("genes are strings of '0' and '1', got {other:?}"),
                )),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Gene)
    }
}

/// Shared encoding parameters for one run: per-variable bounds, decimal
/// precision, and the derived gene lengths.
///
/// Immutable once constructed. Chromosomes hold it behind an `Arc` so that
/// offspring share their parents' encoding without copying.
#[derive(Debug, Clone, PartialEq)]
pub struct Encoding {
    bounds: Vec<(f64, f64)>,
    precision: u32,
    gene_lengths: Vec<usize>,
}

impl Encoding {
    /// Builds an encoding, validating every bound and its derived gene length.
    pub fn new(bounds: Vec<(f64, f64)>, precision: u32) -> Result<Self, GaError> {
        if bounds.is_empty() {
            return Err(GaError::invalid("bounds", "at least one variable is required"));
        }
        let gene_lengths = bounds
            .iter()
            .map(|&b| Self::gene_length(b, precision))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Encoding {
            bounds,
            precision,
            gene_lengths,
        })
    }

    /// Minimum bit width for which the decoded grid over `bound` resolves
    /// `precision` decimal digits: `ceil(log2((max - min) * 10^precision))`.
    pub fn gene_length(bound: (f64, f64), precision: u32) -> Result<usize, GaError> {
        let (lo, hi) = bound;
        if !lo.is_finite() || !hi.is_finite() || lo >= hi {
            return Err(GaError::invalid(
                "bounds",
                format!("each bound must be finite with min < max, got ({lo}, {hi})"),
            ));
        }
        let span = (hi - lo) * 10f64.powi(precision as i32);
        let bits = span.log2().ceil();
        if bits < 1.0 {
            return Err(GaError::invalid(
                "bounds",
                format!(
                    "bound ({lo}, {hi}) with precision {precision} needs a gene of at least 1 bit"
                ),
            ));
        }
        Ok(bits as usize)
    }

    /// Number of decision variables.
    pub fn n_variables(&self) -> usize {
        self.bounds.len()
    }

    /// Per-variable `(min, max)` bounds.
    pub fn bounds(&self) -> &[(f64, f64)] {
        &self.bounds
    }

    /// Decimal digits retained when decoding.
    pub fn precision(&self) -> u32 {
        self.precision
    }

    /// Per-variable gene bit widths.
    pub fn gene_lengths(&self) -> &[usize] {
        &self.gene_lengths
    }

    /// Draws a random gene for variable `var`.
    pub fn random_gene<R: Rng>(&self, var: usize, rng: &mut R) -> Gene {
        Gene::random(self.gene_lengths[var], rng)
    }

    /// Decodes the gene of variable `var` to its real value, rounded to the
    /// configured precision.
    pub fn decode_gene(&self, var: usize, gene: &Gene) -> f64 {
        let (lo, hi) = self.bounds[var];
        let max_int = 2f64.powi(gene.len() as i32) - 1.0;
        let raw = lo + gene.to_integer() * (hi - lo) / max_int;
        round_to(raw, self.precision)
    }
}

/// Rounds to `precision` decimal digits.
pub(crate) fn round_to(value: f64, precision: u32) -> f64 {
    let scale = 10f64.powi(precision as i32);
    (value * scale).round() / scale
}
