//! # Sky coordinates
//!
//! Positions reach the query builder in three shapes: object names (resolved by the
//! server), free-text positions, and typed [`SkyCoord`]s. This module turns the last two
//! into the `"ra dec"` text Gator expects in `objstr`.
//!
//! ## Formatting rule
//!
//! [`format_coords`] concatenates the decimal text of RA and Dec. When Dec is negative its
//! minus sign is the only separator, otherwise a single space is inserted:
//!
//! ```rust
//! use irsa::coordinates::format_coords;
//!
//! assert_eq!(format_coords(10, 10), "10 10");
//! assert_eq!(format_coords(10.0, -11), "10.0-11");
//! ```
//!
//! Integers print without a fractional part, floats always carry one (`75.0`, not `75`).
//!
//! ## Parsing
//!
//! [`parse_coordinates`] reads text as an ICRS position and returns it formatted in decimal
//! degrees; [`is_coordinate`] is the infallible predicate built on it:
//!
//! ```rust
//! use irsa::coordinates::{is_coordinate, parse_coordinates};
//!
//! assert_eq!(parse_coordinates("5h0m0s 0d0m0s").unwrap(), "75.0 0.0");
//! assert!(is_coordinate("5h0m0s 0d0m0s"));
//! assert!(!is_coordinate("m1"));
//! ```
mod frames;
mod parser;

use std::{fmt, str::FromStr};

use tracing::debug;

use crate::{constants::Degree, irsa_errors::IrsaError};
use frames::{fk5_to_icrs, galactic_to_icrs, to_cartesian, to_spherical};
use parser::parse_ra_dec;

/// Celestial reference frames a [`SkyCoord`] can be expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Frame {
    Icrs,
    /// Mean equator and equinox of J2000
    Fk5,
    Galactic,
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Frame::Icrs => "icrs",
            Frame::Fk5 => "fk5",
            Frame::Galactic => "galactic",
        };
        f.write_str(name)
    }
}

impl FromStr for Frame {
    type Err = IrsaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "icrs" => Ok(Frame::Icrs),
            "fk5" | "j2000" => Ok(Frame::Fk5),
            "galactic" | "gal" => Ok(Frame::Galactic),
            _ => Err(IrsaError::CoordinateParse(format!("unknown frame: {s}"))),
        }
    }
}

/// A position on the sky: longitude/latitude in degrees in a given [`Frame`].
///
/// For equatorial frames the longitude is the right ascension and the latitude the
/// declination; for [`Frame::Galactic`] they are `l` and `b`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkyCoord {
    lon: Degree,
    lat: Degree,
    frame: Frame,
}

impl SkyCoord {
    /// Build a position, wrapping the longitude into `[0, 360)`.
    ///
    /// Return
    /// ----------
    /// * [`IrsaError::CoordinateParse`] if the latitude is outside `[-90, 90]` or either
    ///   component is not finite.
    pub fn new(lon: Degree, lat: Degree, frame: Frame) -> Result<Self, IrsaError> {
        if !lon.is_finite() || !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(IrsaError::CoordinateParse(format!(
                "invalid {frame} position ({lon}, {lat})"
            )));
        }
        Ok(SkyCoord {
            lon: lon.rem_euclid(360.0),
            lat,
            frame,
        })
    }

    pub fn icrs(ra: Degree, dec: Degree) -> Result<Self, IrsaError> {
        SkyCoord::new(ra, dec, Frame::Icrs)
    }

    pub fn fk5(ra: Degree, dec: Degree) -> Result<Self, IrsaError> {
        SkyCoord::new(ra, dec, Frame::Fk5)
    }

    pub fn galactic(l: Degree, b: Degree) -> Result<Self, IrsaError> {
        SkyCoord::new(l, b, Frame::Galactic)
    }

    pub fn lon(&self) -> Degree {
        self.lon
    }

    pub fn lat(&self) -> Degree {
        self.lat
    }

    pub fn frame(&self) -> Frame {
        self.frame
    }

    /// The same position expressed in ICRS. ICRS positions are returned unchanged.
    pub fn to_icrs(&self) -> SkyCoord {
        let rotation = match self.frame {
            Frame::Icrs => return *self,
            Frame::Fk5 => fk5_to_icrs(),
            Frame::Galactic => galactic_to_icrs(),
        };
        let (ra, dec) = to_spherical(&(rotation * to_cartesian(self.lon, self.lat)));
        SkyCoord {
            lon: ra,
            lat: dec,
            frame: Frame::Icrs,
        }
    }

    /// ICRS right ascension and declination, in degrees.
    pub fn ra_dec(&self) -> (Degree, Degree) {
        let icrs = self.to_icrs();
        (icrs.lon, icrs.lat)
    }

    /// ICRS position rendered with [`format_coords`].
    pub fn to_icrs_string(&self) -> String {
        let (ra, dec) = self.ra_dec();
        format_coords(ra, dec)
    }
}

impl FromStr for SkyCoord {
    type Err = IrsaError;

    /// Parse a textual ICRS position; see [`parse_coordinates`] for the accepted forms.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (ra, dec) = parse_ra_dec(s)?;
        SkyCoord::icrs(ra, dec)
    }
}

/// Decimal text of a number as sent to the server.
///
/// Integers render as-is, floats always keep a fractional part.
pub trait CoordText {
    fn coord_text(&self) -> String;
}

macro_rules! int_coord_text {
    ($($t:ty),*) => {
        $(impl CoordText for $t {
            fn coord_text(&self) -> String {
                self.to_string()
            }
        })*
    };
}

int_coord_text!(i8, i16, i32, i64, u8, u16, u32, u64, isize, usize);

impl CoordText for f64 {
    fn coord_text(&self) -> String {
        if self.is_nan() {
            return "nan".to_string();
        }
        if self.is_infinite() {
            return if *self > 0.0 { "inf" } else { "-inf" }.to_string();
        }
        let text = self.to_string();
        if text.contains('.') {
            text
        } else {
            format!("{text}.0")
        }
    }
}

impl CoordText for f32 {
    fn coord_text(&self) -> String {
        // the shortest f32 text, not the widened f64 one
        self.to_string()
            .parse::<f64>()
            .map(|v| v.coord_text())
            .unwrap_or_else(|_| self.to_string())
    }
}

/// Join RA and Dec text: a space when Dec is non-negative, Dec's own minus sign otherwise.
///
/// Arguments
/// -----------------
/// * `ra`, `dec`: numbers in decimal degrees.
///
/// Return
/// ----------
/// * `"10 10"` for `(10, 10)`, `"10.0-11"` for `(10.0, -11)`.
pub fn format_coords<R: CoordText, D: CoordText>(ra: R, dec: D) -> String {
    let ra = ra.coord_text();
    let dec = dec.coord_text();
    if dec.starts_with('-') {
        format!("{ra}{dec}")
    } else {
        format!("{ra} {dec}")
    }
}

/// Interpret text as an ICRS position and render it with [`format_coords`].
///
/// Arguments
/// -----------------
/// * `text`: e.g. `"5h0m0s 0d0m0s"`, `"00h42m44.330s +41d16m07.50s"`,
///   `"00:42:44.33 +41:16:07.5"` (RA in hours), `"10.68 41.27"` (degrees).
///
/// Return
/// ----------
/// * `"75.0 0.0"` for `"5h0m0s 0d0m0s"`.
/// * [`IrsaError::CoordinateParse`] if the text is not a sky position.
pub fn parse_coordinates(text: &str) -> Result<String, IrsaError> {
    let coord: SkyCoord = text.parse()?;
    debug!(coordinates = text, "coordinate string interpreted as ICRS");
    Ok(coord.to_icrs_string())
}

/// `true` when [`parse_coordinates`] accepts `text`, `false` for anything else
/// (typically an object name such as `"m1"`).
pub fn is_coordinate(text: &str) -> bool {
    parse_coordinates(text).is_ok()
}
