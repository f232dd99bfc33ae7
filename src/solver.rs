//! Assembly and solution of the boundary-condition system for beam reactions.
//!
//! The solver turns supports and applied loads into a square linear system.
//! Each support contributes unknown reaction terms; four integration
//! constants close the system. Integrating the whole collection once per
//! profile level and evaluating it at the level's boundary points yields one
//! equation per known boundary value:
//!
//! * shear and moment vanish at both unloaded beam ends,
//! * slope is pinned to zero at every fixed support,
//! * deflection is zero at every support.

use nalgebra::{DMatrix, DVector};

use crate::beam::{Support, SupportKind};
use crate::errors::SolveError;
use crate::expression::Expression;
use crate::singularity::{LimitDirection, SingularityTerm};

/// Reporting labels for the four integration constants, one per level.
const CONSTANT_LABELS: [&str; 4] = ["C_shear", "C_moment", "C_slope", "C_deflection"];

/// A solved unknown paired with its reporting label.
///
/// Reaction labels are `F_r{i}` (force) and `M_r{i}` (moment), where `i` is
/// the zero-based index of the support in the input order; the four
/// integration constants follow as `C_shear`, `C_moment`, `C_slope` and
/// `C_deflection`.
#[derive(Clone, Debug, PartialEq)]
pub struct SolvedUnknown {
    /// Reporting label for the unknown.
    pub label: String,
    /// Solved value.
    pub value: f64,
}

/// Everything the reaction solve produces: the four profile expressions and
/// the labelled unknown vector.
#[derive(Clone, Debug)]
pub(crate) struct Solution {
    pub unknowns: Vec<SolvedUnknown>,
    pub shear: Expression,
    pub moment: Expression,
    pub slope: Expression,
    pub deflection: Expression,
}

/// An integration constant for one profile level.
///
/// Unlike a Macaulay bracket, a constant acts on the whole axis rather than
/// switching on at a start location; in particular it stays visible when a
/// boundary row is evaluated at `x == 0` from below. Reusing the term power
/// rule keeps the integration bookkeeping in one place: the constant for
/// level `j` starts at power `-(j + 1)` so that it surfaces as a plain 1
/// exactly at its own level.
#[derive(Clone, Copy, Debug)]
struct ConstantBasis {
    term: SingularityTerm,
}

impl ConstantBasis {
    fn for_level(level: i32) -> Self {
        Self {
            term: SingularityTerm::new(1.0, 0.0, -(level + 1)),
        }
    }

    fn integrate(&mut self) {
        self.term.integrate(1);
    }

    /// Evaluate as an ordinary power of `x`, with no one-sided cutoff.
    fn evaluate(&self, x: f64) -> f64 {
        if self.term.power < 0 {
            0.0
        } else {
            self.term.coeff * x.powi(self.term.power)
        }
    }
}

/// Solve for the support reactions and integration constants, then
/// reconstruct the four profile expressions.
///
/// # Errors
///
/// Returns [`SolveError::NotSquare`] when the boundary conditions and
/// unknowns disagree in count, and [`SolveError::Singular`] when the
/// assembled system cannot be inverted (duplicate supports, or too few
/// constraints to pin the beam down).
pub(crate) fn solve(
    length: f64,
    rigidity: f64,
    supports: &[Support],
    load: &Expression,
) -> Result<Solution, SolveError> {
    // One unit-coefficient reaction term per unknown, in support input
    // order: a force for every support, plus a moment for fixed supports.
    let mut reaction_terms: Vec<SingularityTerm> = Vec::new();
    let mut labels: Vec<String> = Vec::new();
    let mut fixed_locations: Vec<f64> = Vec::new();
    let mut support_locations: Vec<f64> = Vec::new();
    for (index, support) in supports.iter().enumerate() {
        support_locations.push(support.location);
        reaction_terms.push(SingularityTerm::new(1.0, support.location, -1));
        labels.push(format!("F_r{index}"));
        if support.kind == SupportKind::Fixed {
            fixed_locations.push(support.location);
            reaction_terms.push(SingularityTerm::new(1.0, support.location, -2));
            labels.push(format!("M_r{index}"));
        }
    }

    let mut constants: Vec<ConstantBasis> = (0..4).map(ConstantBasis::for_level).collect();
    labels.extend(CONSTANT_LABELS.iter().map(|label| (*label).to_owned()));

    // Boundary evaluation points per integration level: shear, moment,
    // slope, deflection.
    let evaluation_points: [Vec<f64>; 4] = [
        vec![0.0, length],
        vec![0.0, length],
        fixed_locations,
        support_locations,
    ];

    let unknown_count = reaction_terms.len() + constants.len();
    let equation_count: usize = evaluation_points.iter().map(Vec::len).sum();
    if equation_count != unknown_count {
        return Err(SolveError::NotSquare {
            equations: equation_count,
            unknowns: unknown_count,
        });
    }

    let mut matrix = DMatrix::<f64>::zeros(equation_count, unknown_count);
    let mut rhs = DVector::<f64>::zeros(equation_count);
    let mut working_load = load.clone();
    let mut row = 0;
    for (level, points) in evaluation_points.iter().enumerate() {
        // Integration accumulates across levels: by level `i` everything has
        // been integrated `i + 1` times.
        for term in &mut reaction_terms {
            term.integrate(1);
        }
        for constant in &mut constants {
            constant.integrate();
        }
        working_load.integrate(1);

        // Slope and deflection rows carry the flexural rigidity; scaling
        // both sides keeps the solved unknowns in load units.
        let row_scale = if level >= 2 { rigidity } else { 1.0 };
        for &x in points {
            let direction = if x == 0.0 {
                LimitDirection::FromBelow
            } else {
                LimitDirection::FromAbove
            };
            for (column, term) in reaction_terms.iter().enumerate() {
                matrix[(row, column)] = term.evaluate(x, direction) / row_scale;
            }
            for (offset, constant) in constants.iter().enumerate() {
                matrix[(row, reaction_terms.len() + offset)] = constant.evaluate(x) / row_scale;
            }
            // The unknowns must cancel the applied load at every boundary
            // point, hence the negation.
            rhs[row] = -working_load.evaluate(x, direction) / row_scale;
            row += 1;
        }
    }

    let solution = matrix.lu().solve(&rhs).ok_or(SolveError::Singular)?;

    // Reconstruct EI·y from the solved unknowns. The reaction terms and
    // constants have been integrated through all four levels already, so
    // scaling each by its solved value and adding the integrated load gives
    // the flexure expression directly.
    let mut flexure = Expression::new();
    for (index, term) in reaction_terms.iter().enumerate() {
        let mut scaled = *term;
        scaled.scale(solution[index]);
        flexure.push_term(scaled);
    }
    for (offset, constant) in constants.iter().enumerate() {
        let mut basis = constant.term;
        basis.scale(solution[reaction_terms.len() + offset]);
        flexure.push_term(basis);
    }
    flexure.append(working_load);
    flexure.drop_zero_terms();

    // Walk back down: deflection and slope undo the rigidity scaling,
    // moment and shear fall out of successive differentiation.
    let mut deflection = flexure.clone();
    deflection.scale(1.0 / rigidity);
    flexure.differentiate(1);
    let mut slope = flexure.clone();
    slope.scale(1.0 / rigidity);
    flexure.differentiate(1);
    let moment = flexure.clone();
    flexure.differentiate(1);
    let shear = flexure;

    let unknowns = labels
        .into_iter()
        .zip(solution.iter())
        .map(|(label, &value)| SolvedUnknown { label, value })
        .collect();

    Ok(Solution {
        unknowns,
        shear,
        moment,
        slope,
        deflection,
    })
}

#[cfg(test)]
mod tests {
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    use super::*;
    use crate::beam::{fixed, pinned};
    use crate::singularity::term;

    fn unknown(solution: &Solution, label: &str) -> f64 {
        solution
            .unknowns
            .iter()
            .find(|candidate| candidate.label == label)
            .unwrap_or_else(|| panic!("unknown {label} present"))
            .value
    }

    #[test]
    fn simply_supported_midspan_load_splits_evenly() {
        let load = Expression::from(term(-1_000.0, 2.0, -1));
        let solution = solve(4.0, 1.0e6, &[pinned(0.0), pinned(4.0)], &load)
            .expect("determinate beam solves");

        assert_relative_eq!(unknown(&solution, "F_r0"), 500.0, epsilon = 1.0e-9);
        assert_relative_eq!(unknown(&solution, "F_r1"), 500.0, epsilon = 1.0e-9);
        // Shear and moment vanish just past the right end.
        assert_abs_diff_eq!(
            solution.shear.evaluate(4.0, LimitDirection::FromAbove),
            0.0,
            epsilon = 1.0e-9
        );
        assert_abs_diff_eq!(
            solution.moment.evaluate(4.0, LimitDirection::FromAbove),
            0.0,
            epsilon = 1.0e-9
        );
    }

    #[test]
    fn midspan_deflection_matches_the_textbook_formula() {
        let length = 4.0;
        let rigidity = 1.6e6;
        let magnitude = 1_000.0;
        let load = Expression::from(term(-magnitude, length / 2.0, -1));
        let solution = solve(length, rigidity, &[pinned(0.0), pinned(length)], &load)
            .expect("determinate beam solves");

        // y_mid = -P L^3 / (48 EI) for a central point load.
        let expected = -magnitude * length.powi(3) / (48.0 * rigidity);
        assert_relative_eq!(
            solution
                .deflection
                .evaluate(length / 2.0, LimitDirection::FromAbove),
            expected,
            max_relative = 1.0e-9
        );
        // Symmetry: the slope is flat at midspan.
        assert_abs_diff_eq!(
            solution
                .slope
                .evaluate(length / 2.0, LimitDirection::FromAbove),
            0.0,
            epsilon = 1.0e-12
        );
    }

    #[test]
    fn cantilever_reactions_balance_the_tip_load() {
        let length = 2.0;
        let load = Expression::from(term(-500.0, length, -1));
        let solution =
            solve(length, 5.0e3, &[fixed(0.0)], &load).expect("cantilever solves");

        assert_relative_eq!(unknown(&solution, "F_r0"), 500.0, epsilon = 1.0e-9);
        assert_relative_eq!(
            unknown(&solution, "M_r0"),
            -500.0 * length,
            epsilon = 1.0e-9
        );
    }

    #[test]
    fn unknowns_are_labelled_in_support_order_then_constants() {
        let load = Expression::from(term(-1.0, 0.5, -1));
        let solution = solve(1.0, 1.0e3, &[pinned(1.0), fixed(0.0)], &load)
            .expect("mixed supports solve");
        let labels: Vec<&str> = solution
            .unknowns
            .iter()
            .map(|unknown| unknown.label.as_str())
            .collect();
        assert_eq!(
            labels,
            vec![
                "F_r0", "F_r1", "M_r1", "C_shear", "C_moment", "C_slope",
                "C_deflection"
            ]
        );
    }

    #[test]
    fn duplicate_supports_make_the_system_singular() {
        let load = Expression::from(term(-10.0, 0.5, -1));
        let error = solve(1.0, 1.0e3, &[pinned(0.25), pinned(0.25)], &load)
            .expect_err("duplicate supports rejected");
        assert_eq!(error, SolveError::Singular);
    }

    #[test]
    fn unsupported_beam_is_singular_rather_than_spurious() {
        let load = Expression::from(term(-10.0, 0.5, -1));
        let error = solve(1.0, 1.0e3, &[], &load).expect_err("no supports rejected");
        assert_eq!(error, SolveError::Singular);
    }

    #[test]
    fn solved_profiles_drop_zero_coefficient_terms() {
        // A load applied exactly at a pinned support is carried entirely by
        // that support; the other reaction and every constant solve to zero
        // and must be pruned from the reconstructed profiles.
        let load = Expression::from(term(-7.0, 4.0, -1));
        let solution = solve(4.0, 1.0e6, &[pinned(0.0), pinned(4.0)], &load)
            .expect("determinate beam solves");
        assert!(solution
            .deflection
            .terms()
            .iter()
            .all(|term| term.coeff != 0.0));
    }
}
