//! Sums of singularity terms with term-wise calculus and canonical ordering.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::LookupError;
use crate::singularity::{LimitDirection, SingularityTerm};

/// An ordered sum of [`SingularityTerm`]s.
///
/// Terms are kept sorted by ascending start location, then descending power.
/// Terms sharing the same `(offset, power)` pair are deliberately never
/// merged: consolidating them would reshuffle the deterministic layout the
/// reaction solver depends on. Only exact zero coefficients are ever removed,
/// and only through [`drop_zero_terms`](Self::drop_zero_terms).
///
/// Like [`SingularityTerm`], the expression mutates in place; `Clone` yields
/// a deep, independent copy.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Expression {
    terms: Vec<SingularityTerm>,
}

impl Expression {
    /// Create an empty expression.
    #[must_use]
    pub const fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// Create an expression from a collection of terms, sorted canonically.
    #[must_use]
    pub fn from_terms(terms: Vec<SingularityTerm>) -> Self {
        let mut expression = Self { terms };
        expression.sort_terms();
        expression
    }

    /// View the terms in canonical order.
    #[must_use]
    pub fn terms(&self) -> &[SingularityTerm] {
        &self.terms
    }

    /// Number of terms in the sum.
    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether the expression has no terms.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Sum every term's value at `x`, approaching from the given side.
    #[must_use]
    pub fn evaluate(&self, x: f64, direction: LimitDirection) -> f64 {
        self.terms
            .iter()
            .map(|term| term.evaluate(x, direction))
            .sum()
    }

    /// Evaluate at every sample in `xs`, producing an equal-length vector.
    #[must_use]
    pub fn evaluate_many(&self, xs: &[f64], direction: LimitDirection) -> Vec<f64> {
        xs.iter().map(|&x| self.evaluate(x, direction)).collect()
    }

    /// Integrate every term `n` times.
    ///
    /// Integration raises every power uniformly, so it preserves the
    /// canonical order and no re-sort is needed.
    pub fn integrate(&mut self, n: u32) {
        for term in &mut self.terms {
            term.integrate(n);
        }
    }

    /// Differentiate every term `n` times.
    pub fn differentiate(&mut self, n: u32) {
        for _ in 0..n {
            for term in &mut self.terms {
                term.differentiate();
            }
        }
    }

    /// Add a term, keeping the canonical order.
    pub fn push_term(&mut self, term: SingularityTerm) {
        self.terms.push(term);
        self.sort_terms();
    }

    /// Remove the first term equal to `term`.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::TermNotFound`] when no term matches.
    pub fn remove_term(&mut self, term: &SingularityTerm) -> Result<(), LookupError> {
        match self.terms.iter().position(|candidate| candidate == term) {
            Some(index) => {
                self.terms.remove(index);
                Ok(())
            }
            None => Err(LookupError::TermNotFound { term: *term }),
        }
    }

    /// Absorb every term of `other`, keeping the canonical order.
    pub fn append(&mut self, other: Expression) {
        self.terms.extend(other.terms);
        self.sort_terms();
    }

    /// Multiply every coefficient by `k`.
    pub fn scale(&mut self, k: f64) {
        for term in &mut self.terms {
            term.scale(k);
        }
    }

    /// Remove terms whose coefficient is exactly zero.
    ///
    /// Used after solving to simplify the reconstructed profiles; nearly-zero
    /// coefficients are left alone on purpose.
    pub fn drop_zero_terms(&mut self) {
        self.terms.retain(|term| term.coeff != 0.0);
    }

    /// Stable sort into the canonical order. Idempotent: re-sorting a sorted
    /// expression leaves the term order untouched.
    fn sort_terms(&mut self) {
        self.terms
            .sort_by(|a, b| a.compare_by_location_then_power(b));
    }
}

impl From<SingularityTerm> for Expression {
    fn from(term: SingularityTerm) -> Self {
        Self { terms: vec![term] }
    }
}

impl FromIterator<SingularityTerm> for Expression {
    fn from_iter<I: IntoIterator<Item = SingularityTerm>>(iter: I) -> Self {
        Self::from_terms(iter.into_iter().collect())
    }
}

impl Extend<SingularityTerm> for Expression {
    fn extend<I: IntoIterator<Item = SingularityTerm>>(&mut self, iter: I) {
        self.terms.extend(iter);
        self.sort_terms();
    }
}

impl fmt::Display for Expression {
    /// Canonical signed rendering, one term per line in sorted order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return write!(f, "0");
        }
        for (index, term) in self.terms.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            let sign = if term.coeff < 0.0 { '-' } else { '+' };
            write!(f, "{sign} {}", term.render_magnitude())?;
        }
        Ok(())
    }
}
