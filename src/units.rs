//! # Angular units and quantities
//!
//! [`AngleUnit`] enumerates the angular units understood by the query builder and
//! [`Angle`] pairs a magnitude with one of them. Quantities can be built the way they are
//! written on paper:
//!
//! ```rust
//! use irsa::units::{Angle, AngleUnit};
//!
//! let radius = 2.0 * AngleUnit::ArcMinute;
//! assert_eq!(radius.to(AngleUnit::ArcSecond).value, 120.0);
//!
//! let ra: Angle = "5h0m0s".parse().unwrap();
//! assert_eq!(ra.degrees(), 75.0);
//! ```
//!
//! Text angles accept the sexagesimal letter forms (`5h0m0s`, `-1d30m`, `12d`) and
//! `<value><unit>` forms (`2 arcmin`, `0.3rad`, `15"`). A bare number carries no unit and
//! is rejected with [`IrsaError::InvalidUnit`].

use std::{fmt, ops::Mul, str::FromStr};

use nom::{
    branch::alt,
    bytes::complete::take_while1,
    character::complete::{char, multispace1, one_of, space0},
    combinator::{all_consuming, eof, map, map_res, opt, peek, value},
    error::{Error, ErrorKind},
    number::complete::double,
    sequence::{pair, preceded, terminated},
    IResult, Parser,
};

use crate::{
    constants::{ArcSec, Degree, ARCSEC_PER_ARCMIN, ARCSEC_PER_DEG, ARCSEC_PER_HOUR, ARCSEC_PER_RAD},
    irsa_errors::IrsaError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AngleUnit {
    Degree,
    ArcMinute,
    ArcSecond,
    MilliArcSecond,
    Radian,
    HourAngle,
}

impl AngleUnit {
    /// Number of arcseconds in one of this unit.
    pub fn arcsec_factor(self) -> ArcSec {
        match self {
            AngleUnit::Degree => ARCSEC_PER_DEG,
            AngleUnit::ArcMinute => ARCSEC_PER_ARCMIN,
            AngleUnit::ArcSecond => 1.0,
            AngleUnit::MilliArcSecond => 1e-3,
            AngleUnit::Radian => ARCSEC_PER_RAD,
            AngleUnit::HourAngle => ARCSEC_PER_HOUR,
        }
    }

    /// Short name, as sent to the server in `radunits`.
    pub fn as_str(self) -> &'static str {
        match self {
            AngleUnit::Degree => "deg",
            AngleUnit::ArcMinute => "arcmin",
            AngleUnit::ArcSecond => "arcsec",
            AngleUnit::MilliArcSecond => "mas",
            AngleUnit::Radian => "rad",
            AngleUnit::HourAngle => "hourangle",
        }
    }
}

impl fmt::Display for AngleUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AngleUnit {
    type Err = IrsaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "deg" | "degree" | "degrees" | "d" | "°" => Ok(AngleUnit::Degree),
            "arcmin" | "arcminute" | "arcminutes" | "amin" | "'" => Ok(AngleUnit::ArcMinute),
            "arcsec" | "arcsecond" | "arcseconds" | "asec" | "\"" | "''" => {
                Ok(AngleUnit::ArcSecond)
            }
            "mas" => Ok(AngleUnit::MilliArcSecond),
            "rad" | "radian" | "radians" => Ok(AngleUnit::Radian),
            "h" | "hour" | "hours" | "hourangle" => Ok(AngleUnit::HourAngle),
            other => Err(IrsaError::InvalidUnit(other.to_string())),
        }
    }
}

/// An angular quantity: a magnitude tagged with its unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Angle {
    pub value: f64,
    pub unit: AngleUnit,
}

impl Angle {
    pub fn new(value: f64, unit: AngleUnit) -> Self {
        Angle { value, unit }
    }

    /// Express this angle in another unit. Converting to the same unit returns `self` untouched.
    pub fn to(&self, unit: AngleUnit) -> Angle {
        if unit == self.unit {
            return *self;
        }
        Angle::new(
            self.value * self.unit.arcsec_factor() / unit.arcsec_factor(),
            unit,
        )
    }

    pub fn degrees(&self) -> Degree {
        self.to(AngleUnit::Degree).value
    }

    pub fn arcseconds(&self) -> ArcSec {
        self.to(AngleUnit::ArcSecond).value
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

impl Mul<AngleUnit> for f64 {
    type Output = Angle;

    fn mul(self, unit: AngleUnit) -> Angle {
        Angle::new(self, unit)
    }
}

impl FromStr for Angle {
    type Err = IrsaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        all_consuming(signed_angle)
            .parse(s.trim())
            .map(|(_, angle)| angle)
            .map_err(|_| IrsaError::InvalidUnit(s.to_string()))
    }
}

// -------------------------------------------------------------------------------------------------
// nom building blocks, shared with the coordinate parser
// -------------------------------------------------------------------------------------------------

/// Unsigned decimal number: `12`, `12.`, `12.5`, `.5`.
pub(crate) fn unsigned_float(input: &str) -> IResult<&str, f64> {
    preceded(peek(one_of("0123456789.")), double).parse(input)
}

/// Optional leading sign, returned as `±1.0`.
pub(crate) fn sign(input: &str) -> IResult<&str, f64> {
    map(opt(one_of("+-")), |s| if s == Some('-') { -1.0 } else { 1.0 }).parse(input)
}

/// Succeeds without consuming when the next character closes an angle component.
pub(crate) fn component_end(input: &str) -> IResult<&str, ()> {
    peek(alt((
        value((), eof),
        value((), multispace1),
        value((), one_of(",+-")),
    )))
    .parse(input)
}

/// Sexagesimal letter form: `<whole><marker>[<min>m[<sec>[s]]]`, with `marker` one of `markers`.
///
/// Returns the value in the unit of the leading component.
pub(crate) fn sexagesimal<'a>(markers: &'static str, input: &'a str) -> IResult<&'a str, f64> {
    let (input, whole) = terminated(unsigned_float, one_of(markers)).parse(input)?;
    let (input, minutes) = opt(terminated(unsigned_float, one_of("m'"))).parse(input)?;
    let (input, seconds) = match minutes {
        Some(_) => opt(terminated(unsigned_float, opt(one_of("s\"")))).parse(input)?,
        None => (input, None),
    };
    let minutes = minutes.unwrap_or(0.0);
    let seconds = seconds.unwrap_or(0.0);
    if minutes >= 60.0 || seconds >= 60.0 {
        return Err(nom::Err::Error(Error::new(input, ErrorKind::Verify)));
    }
    Ok((input, whole + minutes / 60.0 + seconds / 3600.0))
}

/// `5h0m0s`, in hours.
pub(crate) fn hms_letters(input: &str) -> IResult<&str, f64> {
    sexagesimal("hH", input)
}

/// `41d16m07.5s`, in degrees.
pub(crate) fn dms_letters(input: &str) -> IResult<&str, f64> {
    sexagesimal("dD°", input)
}

/// Colon-separated sexagesimal: `12:34[:56.7]`, in the unit of the leading component.
pub(crate) fn colon_sexagesimal(input: &str) -> IResult<&str, f64> {
    let (input, whole) = terminated(unsigned_float, char(':')).parse(input)?;
    let (input, minutes) = unsigned_float(input)?;
    let (input, seconds) = opt(pair(char(':'), unsigned_float)).parse(input)?;
    let seconds = seconds.map(|(_, s)| s).unwrap_or(0.0);
    if minutes >= 60.0 || seconds >= 60.0 {
        return Err(nom::Err::Error(Error::new(input, ErrorKind::Verify)));
    }
    Ok((input, whole + minutes / 60.0 + seconds / 3600.0))
}

/// `<value>[ ]<unit>`, e.g. `2 arcmin`, `0.3rad`, `15"`.
pub(crate) fn value_with_unit(input: &str) -> IResult<&str, Angle> {
    map_res(
        pair(
            terminated(unsigned_float, space0),
            take_while1(|c: char| c.is_alphabetic() || c == '\'' || c == '"' || c == '°'),
        ),
        |(value, unit): (f64, &str)| unit.parse::<AngleUnit>().map(|unit| Angle::new(value, unit)),
    )
    .parse(input)
}

/// Unsigned angle component carrying an explicit unit.
pub(crate) fn unsigned_angle(input: &str) -> IResult<&str, Angle> {
    alt((
        map(terminated(hms_letters, component_end), |h| {
            Angle::new(h, AngleUnit::HourAngle)
        }),
        map(terminated(dms_letters, component_end), |d| {
            Angle::new(d, AngleUnit::Degree)
        }),
        terminated(value_with_unit, component_end),
    ))
    .parse(input)
}

fn signed_angle(input: &str) -> IResult<&str, Angle> {
    let (input, s) = sign(input)?;
    let (input, angle) = unsigned_angle(input)?;
    Ok((input, Angle::new(s * angle.value, angle.unit)))
}

#[cfg(test)]
mod units_test {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_unit_conversion() {
        assert_eq!((2.0 * AngleUnit::ArcMinute).to(AngleUnit::ArcSecond).value, 120.0);
        assert_eq!((1.5 * AngleUnit::Degree).to(AngleUnit::ArcMinute).value, 90.0);
        assert_eq!((5.0 * AngleUnit::HourAngle).degrees(), 75.0);
        assert_relative_eq!(
            (0.3 * AngleUnit::Radian).degrees(),
            17.188733853924695,
            epsilon = 1e-12
        );
        assert_relative_eq!((1500.0 * AngleUnit::MilliArcSecond).arcseconds(), 1.5);
    }

    #[test]
    fn test_same_unit_is_untouched() {
        let angle = 0.1 * AngleUnit::ArcMinute;
        assert_eq!(angle.to(AngleUnit::ArcMinute), angle);
    }

    #[test]
    fn test_unit_from_str() {
        assert_eq!("arcmin".parse::<AngleUnit>(), Ok(AngleUnit::ArcMinute));
        assert_eq!("degrees".parse::<AngleUnit>(), Ok(AngleUnit::Degree));
        assert_eq!("\"".parse::<AngleUnit>(), Ok(AngleUnit::ArcSecond));
        assert_eq!(
            "parsec".parse::<AngleUnit>(),
            Err(IrsaError::InvalidUnit("parsec".into()))
        );
    }

    #[test]
    fn test_parse_sexagesimal_angle() {
        assert_eq!(
            "5h0m0s".parse::<Angle>().unwrap(),
            Angle::new(5.0, AngleUnit::HourAngle)
        );
        assert_eq!(
            "5d0m0s".parse::<Angle>().unwrap(),
            Angle::new(5.0, AngleUnit::Degree)
        );
        assert_eq!(
            "-1d30m".parse::<Angle>().unwrap(),
            Angle::new(-1.5, AngleUnit::Degree)
        );
        assert_eq!("12d".parse::<Angle>().unwrap().degrees(), 12.0);
        assert_relative_eq!(
            "41d16m07.5s".parse::<Angle>().unwrap().degrees(),
            41.26875,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_unsigned_float_keeps_fraction() {
        assert_eq!(unsigned_float("41.27"), Ok(("", 41.27)));
        assert_eq!(unsigned_float("41.27 "), Ok((" ", 41.27)));
        assert_eq!(unsigned_float(".5"), Ok(("", 0.5)));
        assert_eq!(unsigned_float("12."), Ok(("", 12.0)));
        assert_eq!(unsigned_float("07.50s"), Ok(("s", 7.5)));
        assert!(unsigned_float("-1.0").is_err());
        assert!(unsigned_float("nan").is_err());
    }

    #[test]
    fn test_parse_value_with_unit() {
        assert_eq!(
            "2 arcmin".parse::<Angle>().unwrap(),
            Angle::new(2.0, AngleUnit::ArcMinute)
        );
        assert_eq!(
            "0.3rad".parse::<Angle>().unwrap(),
            Angle::new(0.3, AngleUnit::Radian)
        );
        assert_eq!(
            "5deg".parse::<Angle>().unwrap(),
            Angle::new(5.0, AngleUnit::Degree)
        );
    }

    #[test]
    fn test_parse_invalid_angle() {
        assert!("5".parse::<Angle>().is_err());
        assert!("5 m".parse::<Angle>().is_err());
        assert!("5d75m".parse::<Angle>().is_err());
        assert!("m31".parse::<Angle>().is_err());
    }
}
