//! Error types produced while building, solving and querying beam models.

use thiserror::Error;

use crate::singularity::SingularityTerm;

/// Error returned when a beam configuration is rejected at construction.
///
/// The variants describe the reason the supplied value is rejected so callers
/// can present actionable feedback to users. Validation never falls back to
/// defaults; a partial or malformed configuration is fatal to that instance.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum ValidationError {
    /// Returned when the beam length is zero, negative or non-finite.
    #[error("beam length must be positive and finite (received {length})")]
    InvalidLength {
        /// Rejected beam length.
        length: f64,
    },
    /// Returned when the elastic modulus is zero, negative or non-finite.
    #[error("elastic modulus must be positive and finite (received {elastic_modulus})")]
    InvalidElasticModulus {
        /// Rejected elastic modulus.
        elastic_modulus: f64,
    },
    /// Returned when the second moment of area is zero, negative or
    /// non-finite.
    #[error("second moment of area must be positive and finite (received {second_moment})")]
    InvalidSecondMoment {
        /// Rejected second moment of area.
        second_moment: f64,
    },
    /// Returned when the precombined flexural rigidity is zero, negative or
    /// non-finite.
    #[error("flexural rigidity must be positive and finite (received {rigidity})")]
    InvalidRigidity {
        /// Rejected flexural rigidity.
        rigidity: f64,
    },
    /// Returned when a support sits at a non-finite location.
    #[error("support {index} has a non-finite location ({location})")]
    InvalidSupportLocation {
        /// Zero-based position of the support in the input list.
        index: usize,
        /// Rejected location.
        location: f64,
    },
    /// Returned when a load term carries a non-finite coefficient or start
    /// location.
    #[error("load term {term} has a non-finite coefficient or start location")]
    InvalidLoadTerm {
        /// The offending term.
        term: SingularityTerm,
    },
    /// Returned when a cross-section dimension is zero, negative or
    /// non-finite.
    #[error("{name} must be positive and finite (received {value})")]
    NonPositiveDimension {
        /// Name of the rejected dimension.
        name: &'static str,
        /// Rejected value.
        value: f64,
    },
}

/// Error returned when the boundary-condition system cannot be solved.
///
/// Both variants indicate a modeling problem with the beam configuration, not
/// a numerical one the solver could work around. There is no fallback and no
/// least-squares relaxation.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum SolveError {
    /// Returned when the assembled system has a different number of
    /// equations and unknowns; the support layout over- or under-constrains
    /// the beam.
    #[error("boundary-condition system is not square ({equations} equations for {unknowns} unknowns)")]
    NotSquare {
        /// Number of boundary-condition equations assembled.
        equations: usize,
        /// Number of unknown reactions and integration constants.
        unknowns: usize,
    },
    /// Returned when the assembled system is singular; check for duplicate
    /// or insufficient supports.
    #[error("boundary-condition system is singular; check for duplicate or insufficient supports")]
    Singular,
}

/// Error returned when a query names something that does not exist.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum LookupError {
    /// Returned when a profile name is not one of the four solved profiles.
    #[error("unknown profile {name:?}; valid names are shear, moment, slope and deflection")]
    UnknownProfile {
        /// The unrecognized name.
        name: String,
    },
    /// Returned when a term slated for removal is not present in the
    /// expression.
    #[error("term {term} is not present in this expression")]
    TermNotFound {
        /// The term that was looked up.
        term: SingularityTerm,
    },
}

/// Any error a [`BeamModel`](crate::BeamModel) constructor can produce.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum BeamError {
    /// The configuration was rejected before assembly.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The boundary-condition system could not be solved.
    #[error(transparent)]
    Solve(#[from] SolveError),
}
