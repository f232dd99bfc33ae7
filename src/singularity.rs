//! Singularity-function terms, the atomic unit of the Macaulay method.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Side from which a sample point is approached when a term is evaluated
/// exactly at its own start location.
///
/// A term with power zero jumps from 0 to its coefficient at `x == offset`,
/// so the two one-sided limits differ there. Terms with positive power are
/// continuous at their start location and ignore the direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LimitDirection {
    /// Approach from `x < offset`; a step term reports 0.
    FromBelow,
    /// Approach from `x > offset`; a step term reports its coefficient.
    FromAbove,
}

/// A single Macaulay singularity term `coeff·⟨x−offset⟩^power`.
///
/// The bracket `⟨x−offset⟩^power` is zero for `x < offset` and an ordinary
/// power function for `x ≥ offset`. Negative powers encode point effects that
/// have not yet developed into polynomial terms: a point force is `power ==
/// -1` and a point moment is `power == -2`; both evaluate to zero everywhere
/// until integration raises the power to zero or above.
///
/// Terms are mutated in place by [`integrate`](Self::integrate),
/// [`differentiate`](Self::differentiate) and [`scale`](Self::scale). The
/// type is `Copy`, so snapshot a term before mutating when the original is
/// still needed.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SingularityTerm {
    /// Coefficient of the bracket.
    pub coeff: f64,
    /// Start location of the loading along the beam axis.
    pub offset: f64,
    /// Exponent of the bracket; negative values mark undeveloped point
    /// effects.
    pub power: i32,
}

impl SingularityTerm {
    /// Create a term with explicit coefficient, start location and power.
    #[must_use]
    pub const fn new(coeff: f64, offset: f64, power: i32) -> Self {
        Self {
            coeff,
            offset,
            power,
        }
    }

    /// Apply the power rule `n` times.
    ///
    /// Each step raises the power by one and, only once the power has climbed
    /// above zero, divides the coefficient by the new power. A point load
    /// therefore keeps its magnitude until it becomes a true polynomial term.
    pub fn integrate(&mut self, n: u32) {
        for _ in 0..n {
            self.power += 1;
            if self.power > 0 {
                self.coeff /= f64::from(self.power);
            }
        }
    }

    /// Undo one integration step.
    ///
    /// The coefficient is multiplied by the current power while it is still
    /// positive, then the power drops by one.
    pub fn differentiate(&mut self) {
        if self.power > 0 {
            self.coeff *= f64::from(self.power);
        }
        self.power -= 1;
    }

    /// Evaluate the term at `x`, approaching from the given side.
    ///
    /// Returns 0 when the power is negative or `x` lies left of the start
    /// location. Exactly at the start location the result follows the
    /// requested one-sided limit, which reproduces Heaviside semantics for
    /// step terms.
    ///
    /// # Examples
    /// ```
    /// use beamx::{LimitDirection, SingularityTerm};
    ///
    /// let step = SingularityTerm::new(2.0, 1.0, 0);
    /// assert_eq!(step.evaluate(0.5, LimitDirection::FromAbove), 0.0);
    /// assert_eq!(step.evaluate(1.0, LimitDirection::FromBelow), 0.0);
    /// assert_eq!(step.evaluate(1.0, LimitDirection::FromAbove), 2.0);
    /// assert_eq!(step.evaluate(3.0, LimitDirection::FromBelow), 2.0);
    /// ```
    #[must_use]
    pub fn evaluate(&self, x: f64, direction: LimitDirection) -> f64 {
        if self.power < 0 || x < self.offset {
            return 0.0;
        }
        let value = self.coeff * (x - self.offset).powi(self.power);
        if x > self.offset {
            return value;
        }
        match direction {
            LimitDirection::FromAbove => value,
            LimitDirection::FromBelow => 0.0,
        }
    }

    /// Multiply the coefficient by `k`.
    pub fn scale(&mut self, k: f64) {
        self.coeff *= k;
    }

    /// Canonical ordering: ascending start location, then descending power.
    ///
    /// Terms sharing both fields compare equal here regardless of their
    /// coefficients, so sorting never reorders same-location, same-power
    /// terms.
    #[must_use]
    pub fn compare_by_location_then_power(&self, other: &Self) -> Ordering {
        self.offset
            .total_cmp(&other.offset)
            .then_with(|| other.power.cmp(&self.power))
    }

    /// Rendering with the coefficient's sign stripped, used by the signed
    /// per-line expression display.
    pub(crate) fn render_magnitude(&self) -> String {
        format!("{}<x-{}>^({})", self.coeff.abs(), self.offset, self.power)
    }
}

impl fmt::Display for SingularityTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}<x-{}>^({})", self.coeff, self.offset, self.power)
    }
}

/// Convenience helper for creating [`SingularityTerm`] instances.
///
/// # Examples
/// ```
/// use beamx::term;
///
/// let point_load = term(-1_000.0, 2.0, -1);
/// assert_eq!(point_load.power, -1);
/// ```
#[must_use]
pub const fn term(coeff: f64, offset: f64, power: i32) -> SingularityTerm {
    SingularityTerm::new(coeff, offset, power)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn negative_power_evaluates_to_zero_everywhere() {
        let point_moment = term(300.0, 1.0, -2);
        for x in [-2.0, 0.0, 1.0, 5.0] {
            assert_eq!(point_moment.evaluate(x, LimitDirection::FromBelow), 0.0);
            assert_eq!(point_moment.evaluate(x, LimitDirection::FromAbove), 0.0);
        }
    }

    #[test]
    fn zero_left_of_start_location() {
        let ramp = term(4.0, 2.0, 1);
        assert_eq!(ramp.evaluate(1.999, LimitDirection::FromAbove), 0.0);
        assert_eq!(ramp.evaluate(-10.0, LimitDirection::FromBelow), 0.0);
    }

    #[test]
    fn step_term_follows_the_one_sided_limit_at_its_start() {
        let step = term(7.0, 3.0, 0);
        assert_eq!(step.evaluate(3.0, LimitDirection::FromBelow), 0.0);
        assert_eq!(step.evaluate(3.0, LimitDirection::FromAbove), 7.0);
        // Past the start location the direction is irrelevant.
        assert_eq!(step.evaluate(4.0, LimitDirection::FromBelow), 7.0);
    }

    #[test]
    fn direction_is_a_no_op_for_positive_powers() {
        let ramp = term(4.0, 2.0, 1);
        assert_eq!(ramp.evaluate(2.0, LimitDirection::FromBelow), 0.0);
        assert_eq!(ramp.evaluate(2.0, LimitDirection::FromAbove), 0.0);
        assert_eq!(ramp.evaluate(3.0, LimitDirection::FromAbove), 4.0);
    }

    #[test]
    fn integration_delays_coefficient_division() {
        let mut force = term(-2.0, 1.0, -1);
        force.integrate(1);
        assert_eq!(force, term(-2.0, 1.0, 0));
        force.integrate(1);
        assert_eq!(force, term(-2.0, 1.0, 1));
        force.integrate(1);
        assert_eq!(force, term(-1.0, 1.0, 2));
        force.integrate(1);
        assert_relative_eq!(force.coeff, -1.0 / 3.0);
        assert_eq!(force.power, 3);
    }

    #[test]
    fn multi_step_integration_matches_repeated_single_steps() {
        let mut all_at_once = term(5.0, 0.5, -2);
        let mut one_by_one = all_at_once;
        all_at_once.integrate(4);
        for _ in 0..4 {
            one_by_one.integrate(1);
        }
        assert_eq!(all_at_once, one_by_one);
    }

    #[test]
    fn differentiation_inverts_integration() {
        let original = term(3.5, 1.25, 2);
        let mut round_trip = original;
        round_trip.integrate(1);
        round_trip.differentiate();
        assert_eq!(round_trip, original);

        let negative = term(-8.0, 0.0, -1);
        let mut round_trip = negative;
        round_trip.integrate(1);
        round_trip.differentiate();
        assert_eq!(round_trip, negative);
    }

    #[test]
    fn ordering_is_by_location_then_descending_power() {
        let early = term(1.0, 0.0, -1);
        let late = term(1.0, 2.0, 3);
        assert_eq!(
            early.compare_by_location_then_power(&late),
            Ordering::Less
        );

        let high_power = term(1.0, 2.0, 2);
        let low_power = term(9.0, 2.0, -1);
        assert_eq!(
            high_power.compare_by_location_then_power(&low_power),
            Ordering::Less
        );
        assert_eq!(
            low_power.compare_by_location_then_power(&high_power),
            Ordering::Greater
        );
    }

    #[test]
    fn coefficients_do_not_affect_ordering() {
        let a = term(-5.0, 1.0, 2);
        let b = term(10.0, 1.0, 2);
        assert_eq!(a.compare_by_location_then_power(&b), Ordering::Equal);
    }

    #[test]
    fn display_matches_bracket_notation() {
        let point_load = term(-2.0, 1.5, -1);
        assert_eq!(point_load.to_string(), "-2<x-1.5>^(-1)");
        assert_eq!(point_load.render_magnitude(), "2<x-1.5>^(-1)");
    }
}
