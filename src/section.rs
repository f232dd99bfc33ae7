//! Second-moment-of-area helpers for common solid cross-sections.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// A solid cross-section with a closed-form second moment of area.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum CrossSection {
    /// Solid rectangle bending about its horizontal centroidal axis.
    Rectangle {
        /// Width of the section, parallel to the bending axis.
        width: f64,
        /// Height of the section, perpendicular to the bending axis.
        height: f64,
    },
    /// Solid circle.
    Circle {
        /// Diameter of the section.
        diameter: f64,
    },
}

impl CrossSection {
    /// Second moment of area about the centroidal bending axis.
    ///
    /// Rectangle: `w·h³/12`. Circle: `π·d⁴/64` for a solid section.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NonPositiveDimension`] for dimensions that
    /// are zero, negative or non-finite.
    ///
    /// # Examples
    /// ```
    /// use beamx::CrossSection;
    ///
    /// let section = CrossSection::Rectangle { width: 0.02, height: 0.03 };
    /// let second_moment = section.second_moment_of_area()?;
    /// assert!(second_moment > 0.0);
    /// # Ok::<(), beamx::ValidationError>(())
    /// ```
    pub fn second_moment_of_area(self) -> Result<f64, ValidationError> {
        match self {
            CrossSection::Rectangle { width, height } => {
                let width = positive("width", width)?;
                let height = positive("height", height)?;
                Ok(width * height.powi(3) / 12.0)
            }
            CrossSection::Circle { diameter } => {
                let diameter = positive("diameter", diameter)?;
                Ok(PI * diameter.powi(4) / 64.0)
            }
        }
    }
}

/// Accept a strictly positive, finite dimension or reject it by name.
fn positive(name: &'static str, value: f64) -> Result<f64, ValidationError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ValidationError::NonPositiveDimension { name, value })
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn rectangle_uses_width_times_height_cubed_over_twelve() {
        let section = CrossSection::Rectangle {
            width: 20.0,
            height: 20.0,
        };
        assert_relative_eq!(
            section.second_moment_of_area().expect("valid dimensions"),
            20.0 * 20.0_f64.powi(3) / 12.0
        );
    }

    #[test]
    fn circle_uses_the_standard_solid_section_formula() {
        let diameter = 0.03;
        let section = CrossSection::Circle { diameter };
        assert_relative_eq!(
            section.second_moment_of_area().expect("valid dimensions"),
            PI * diameter.powi(4) / 64.0
        );
    }

    #[test]
    fn non_positive_dimensions_are_rejected() {
        let flat = CrossSection::Rectangle {
            width: 0.02,
            height: 0.0,
        };
        assert_eq!(
            flat.second_moment_of_area()
                .expect_err("zero height rejected"),
            ValidationError::NonPositiveDimension {
                name: "height",
                value: 0.0
            }
        );

        let inverted = CrossSection::Circle { diameter: -0.03 };
        assert!(matches!(
            inverted
                .second_moment_of_area()
                .expect_err("negative diameter rejected"),
            ValidationError::NonPositiveDimension {
                name: "diameter",
                ..
            }
        ));
    }

    #[test]
    fn sections_round_trip_through_json() {
        let section = CrossSection::Circle { diameter: 0.03 };
        let encoded = serde_json::to_string(&section).expect("section serializes");
        assert_eq!(encoded, r#"{"shape":"circle","diameter":0.03}"#);
        let decoded: CrossSection = serde_json::from_str(&encoded).expect("section parses");
        assert_eq!(decoded, section);
    }
}
