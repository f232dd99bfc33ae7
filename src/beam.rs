//! Beam model construction and profile queries.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{BeamError, LookupError, ValidationError};
use crate::expression::Expression;
use crate::singularity::{LimitDirection, SingularityTerm};
use crate::solver::{self, SolvedUnknown};

/// Kind of support restraining the beam.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupportKind {
    /// Restrains translation only; contributes one unknown reaction force.
    Pinned,
    /// Restrains translation and rotation; contributes an unknown reaction
    /// force and an unknown reaction moment.
    Fixed,
}

/// A support placed along the beam axis.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Support {
    /// Distance from the left end of the beam.
    pub location: f64,
    /// Kind of restraint the support provides.
    pub kind: SupportKind,
}

impl Support {
    /// Create a support with explicit location and kind.
    #[must_use]
    pub const fn new(location: f64, kind: SupportKind) -> Self {
        Self { location, kind }
    }
}

/// Convenience helper for creating pinned [`Support`] instances.
///
/// # Examples
/// ```
/// use beamx::{pinned, SupportKind};
///
/// let support = pinned(0.0);
/// assert_eq!(support.kind, SupportKind::Pinned);
/// ```
#[must_use]
pub const fn pinned(location: f64) -> Support {
    Support::new(location, SupportKind::Pinned)
}

/// Convenience helper for creating fixed [`Support`] instances.
///
/// # Examples
/// ```
/// use beamx::{fixed, SupportKind};
///
/// let clamp = fixed(0.0);
/// assert_eq!(clamp.kind, SupportKind::Fixed);
/// ```
#[must_use]
pub const fn fixed(location: f64) -> Support {
    Support::new(location, SupportKind::Fixed)
}

/// Complete construction contract for a [`BeamModel`].
///
/// Every field is required and validated; there is no fallback to hidden
/// defaults. Loads are given as singularity terms: point forces with power
/// -1, point moments with power -2, distributed loads with power 0 and
/// above.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BeamConfig {
    /// Beam length.
    pub length: f64,
    /// Young's modulus of the beam material.
    pub elastic_modulus: f64,
    /// Second moment of area of the cross-section.
    pub second_moment_of_area: f64,
    /// Supports in the order their reactions should be reported.
    pub supports: Vec<Support>,
    /// Applied loads, excluding the support reactions.
    pub loads: Vec<SingularityTerm>,
}

/// Name of a solved profile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileKind {
    /// Internal shear force along the beam.
    Shear,
    /// Internal bending moment along the beam.
    Moment,
    /// Slope of the deformed beam axis.
    Slope,
    /// Transverse deflection of the beam axis.
    Deflection,
}

impl ProfileKind {
    /// The four profiles in differentiation order, shear first.
    pub const ALL: [ProfileKind; 4] = [
        ProfileKind::Shear,
        ProfileKind::Moment,
        ProfileKind::Slope,
        ProfileKind::Deflection,
    ];

    /// Lowercase name used for lookups and reports.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ProfileKind::Shear => "shear",
            ProfileKind::Moment => "moment",
            ProfileKind::Slope => "slope",
            ProfileKind::Deflection => "deflection",
        }
    }
}

impl fmt::Display for ProfileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ProfileKind {
    type Err = LookupError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "shear" => Ok(ProfileKind::Shear),
            "moment" => Ok(ProfileKind::Moment),
            "slope" => Ok(ProfileKind::Slope),
            "deflection" => Ok(ProfileKind::Deflection),
            _ => Err(LookupError::UnknownProfile {
                name: name.to_owned(),
            }),
        }
    }
}

/// A loaded beam with its four solved profiles.
///
/// Construction validates the configuration, runs the reaction solve once
/// and stores the resulting profile expressions; afterwards the model is a
/// read-only query surface.
#[derive(Clone, Debug)]
pub struct BeamModel {
    length: f64,
    rigidity: f64,
    supports: Vec<Support>,
    load: Expression,
    unknowns: Vec<SolvedUnknown>,
    shear: Expression,
    moment: Expression,
    slope: Expression,
    deflection: Expression,
}

impl BeamModel {
    /// Build a beam model from a full configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for non-positive or non-finite
    /// geometry, rigidity or load inputs, and a
    /// [`SolveError`](crate::SolveError) when the support layout produces an
    /// unsolvable boundary-condition system.
    pub fn new(config: BeamConfig) -> Result<Self, BeamError> {
        let elastic_modulus = config.elastic_modulus;
        if !(elastic_modulus.is_finite() && elastic_modulus > 0.0) {
            return Err(ValidationError::InvalidElasticModulus { elastic_modulus }.into());
        }
        let second_moment = config.second_moment_of_area;
        if !(second_moment.is_finite() && second_moment > 0.0) {
            return Err(ValidationError::InvalidSecondMoment { second_moment }.into());
        }
        Self::with_rigidity(
            config.length,
            elastic_modulus * second_moment,
            config.supports,
            Expression::from_terms(config.loads),
        )
    }

    /// Build a beam model from a precombined flexural rigidity `EI`.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`BeamModel::new`], with the rigidity checked
    /// as a single value.
    pub fn with_rigidity(
        length: f64,
        rigidity: f64,
        supports: Vec<Support>,
        load: Expression,
    ) -> Result<Self, BeamError> {
        if !(length.is_finite() && length > 0.0) {
            return Err(ValidationError::InvalidLength { length }.into());
        }
        if !(rigidity.is_finite() && rigidity > 0.0) {
            return Err(ValidationError::InvalidRigidity { rigidity }.into());
        }
        for (index, support) in supports.iter().enumerate() {
            if !support.location.is_finite() {
                return Err(ValidationError::InvalidSupportLocation {
                    index,
                    location: support.location,
                }
                .into());
            }
        }
        for term in load.terms() {
            if !(term.coeff.is_finite() && term.offset.is_finite()) {
                return Err(ValidationError::InvalidLoadTerm { term: *term }.into());
            }
        }

        let solution = solver::solve(length, rigidity, &supports, &load)?;
        Ok(Self {
            length,
            rigidity,
            supports,
            load,
            unknowns: solution.unknowns,
            shear: solution.shear,
            moment: solution.moment,
            slope: solution.slope,
            deflection: solution.deflection,
        })
    }

    /// Beam length.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Flexural rigidity `EI`.
    #[must_use]
    pub fn rigidity(&self) -> f64 {
        self.rigidity
    }

    /// Supports in their input order.
    #[must_use]
    pub fn supports(&self) -> &[Support] {
        &self.supports
    }

    /// The applied load expression, excluding reactions.
    #[must_use]
    pub fn load(&self) -> &Expression {
        &self.load
    }

    /// Solved reactions and integration constants with their labels.
    #[must_use]
    pub fn unknowns(&self) -> &[SolvedUnknown] {
        &self.unknowns
    }

    /// The solved expression for one profile.
    #[must_use]
    pub fn profile(&self, kind: ProfileKind) -> &Expression {
        match kind {
            ProfileKind::Shear => &self.shear,
            ProfileKind::Moment => &self.moment,
            ProfileKind::Slope => &self.slope,
            ProfileKind::Deflection => &self.deflection,
        }
    }

    /// Look up a profile by its lowercase name.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::UnknownProfile`] for names outside `shear`,
    /// `moment`, `slope` and `deflection`.
    pub fn profile_by_name(&self, name: &str) -> Result<&Expression, LookupError> {
        Ok(self.profile(name.parse()?))
    }

    /// Evaluate a profile at a single station, approaching from above.
    #[must_use]
    pub fn evaluate(&self, kind: ProfileKind, x: f64) -> f64 {
        self.profile(kind).evaluate(x, LimitDirection::FromAbove)
    }

    /// Evaluate a profile at every station in `xs`.
    #[must_use]
    pub fn evaluate_many(&self, kind: ProfileKind, xs: &[f64]) -> Vec<f64> {
        self.profile(kind)
            .evaluate_many(xs, LimitDirection::FromAbove)
    }
}
