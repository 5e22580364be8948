//! # Dimension normalization
//!
//! Cone radii and box widths reach the payload builder either as typed [`Angle`]s or as
//! free text. [`parse_dimension`] reduces both to an [`Angle`] expressed in one of the three
//! units Gator understands for sizes: arcseconds, arcminutes or degrees.

use crate::{
    irsa_errors::IrsaError,
    units::{Angle, AngleUnit},
};

/// An angular size as supplied by the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum Dimension {
    Text(String),
    Quantity(Angle),
}

impl From<Angle> for Dimension {
    fn from(angle: Angle) -> Self {
        Dimension::Quantity(angle)
    }
}

impl From<&str> for Dimension {
    fn from(text: &str) -> Self {
        Dimension::Text(text.to_string())
    }
}

impl From<String> for Dimension {
    fn from(text: String) -> Self {
        Dimension::Text(text)
    }
}

/// Units accepted by Gator for `radius`/`size` without conversion.
pub fn is_server_unit(unit: AngleUnit) -> bool {
    matches!(
        unit,
        AngleUnit::ArcSecond | AngleUnit::ArcMinute | AngleUnit::Degree
    )
}

/// Normalize an angular size so that its unit is arcsec, arcmin or deg.
///
/// Arguments
/// -----------------
/// * `dim`: a typed angle, or a text angle such as `"5d0m0s"`, `"5h0m0s"` or `"2 arcmin"`.
///
/// Return
/// ----------
/// * Typed angles already in arcsec/arcmin/deg are returned unchanged, other typed angles
///   (radians, hour angle, milliarcseconds) are converted to degrees.
/// * Text angles are parsed and returned in degrees.
/// * [`IrsaError::InvalidUnit`] if the text cannot be read as an angle.
pub fn parse_dimension(dim: impl Into<Dimension>) -> Result<Angle, IrsaError> {
    match dim.into() {
        Dimension::Quantity(angle) if is_server_unit(angle.unit) => Ok(angle),
        Dimension::Quantity(angle) => Ok(angle.to(AngleUnit::Degree)),
        Dimension::Text(text) => {
            let angle: Angle = text.parse()?;
            Ok(angle.to(AngleUnit::Degree))
        }
    }
}
