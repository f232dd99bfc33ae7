#![warn(clippy::all)]
#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

pub mod beam;
pub mod errors;
pub mod expression;
pub mod report;
pub mod section;
pub mod singularity;
mod solver;

pub use beam::{fixed, pinned, BeamConfig, BeamModel, ProfileKind, Support, SupportKind};
pub use errors::{BeamError, LookupError, SolveError, ValidationError};
pub use expression::Expression;
pub use report::render_summary;
pub use section::CrossSection;
pub use singularity::{term, LimitDirection, SingularityTerm};
pub use solver::SolvedUnknown;
