use nom::{
    branch::alt,
    character::complete::{char, multispace0, multispace1, one_of},
    combinator::{all_consuming, map, peek, value},
    sequence::{delimited, pair, terminated},
    IResult, Parser,
};

use crate::{
    constants::Degree,
    irsa_errors::IrsaError,
    units::{
        colon_sexagesimal, component_end, dms_letters, hms_letters, sign, unsigned_float,
        value_with_unit, Angle, AngleUnit,
    },
};

/// One side of a coordinate pair, before its unit is resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Component {
    /// `5h0m0s`
    Hours(f64),
    /// `41d16m07.5s`
    Degrees(f64),
    /// `00:42:44.3`, hours for RA and degrees for Dec
    Colon(f64),
    /// `10.68deg`, `2 arcmin`
    Quantity(Angle),
    /// `10.68`, decimal degrees
    Decimal(f64),
}

fn component(input: &str) -> IResult<&str, (f64, Component)> {
    let (input, s) = sign(input)?;
    let (input, c) = alt((
        map(terminated(hms_letters, component_end), Component::Hours),
        map(terminated(dms_letters, component_end), Component::Degrees),
        map(terminated(colon_sexagesimal, component_end), Component::Colon),
        map(terminated(value_with_unit, component_end), Component::Quantity),
        map(terminated(unsigned_float, component_end), Component::Decimal),
    ))
    .parse(input)?;
    Ok((input, (s, c)))
}

/// Comma, whitespace, or nothing at all when the second component opens with a sign.
fn separator(input: &str) -> IResult<&str, ()> {
    alt((
        value((), delimited(multispace0, char(','), multispace0)),
        value((), multispace1),
        value((), peek(one_of("+-"))),
    ))
    .parse(input)
}

fn component_pair(input: &str) -> IResult<&str, ((f64, Component), (f64, Component))> {
    all_consuming(terminated(
        pair(terminated(component, separator), component),
        multispace0,
    ))
    .parse(input)
}

fn ra_degrees((s, c): (f64, Component)) -> Degree {
    s * match c {
        Component::Hours(h) | Component::Colon(h) => h * 15.0,
        Component::Degrees(d) | Component::Decimal(d) => d,
        Component::Quantity(angle) => angle.degrees(),
    }
}

/// Declinations are never hour angles.
fn dec_degrees((s, c): (f64, Component)) -> Option<Degree> {
    match c {
        Component::Hours(_) => None,
        Component::Degrees(d) | Component::Decimal(d) | Component::Colon(d) => Some(s * d),
        Component::Quantity(angle) if angle.unit == AngleUnit::HourAngle => None,
        Component::Quantity(angle) => Some(s * angle.degrees()),
    }
}

/// Read a textual sky position as (RA, Dec) in decimal degrees.
///
/// Arguments
/// -----------------
/// * `text`: two angle components separated by whitespace, a comma, or the sign of the
///   declination, e.g. `"00h42m44.330s +41d16m07.50s"`, `"00:42:44.33 +41:16:07.5"`,
///   `"10.68 41.27"`, `"10.68deg,-41.27deg"`.
///
/// Return
/// ----------
/// * `(ra, dec)` in degrees, or [`IrsaError::CoordinateParse`] when the text is not a
///   position or lies outside `0 <= ra < 360`, `-90 <= dec <= 90`.
pub(crate) fn parse_ra_dec(text: &str) -> Result<(Degree, Degree), IrsaError> {
    let (_, (ra, dec)) = component_pair(text.trim())
        .map_err(|_| IrsaError::CoordinateParse(text.to_string()))?;

    let ra = ra_degrees(ra);
    let dec = dec_degrees(dec).ok_or_else(|| IrsaError::CoordinateParse(text.to_string()))?;

    if !(0.0..360.0).contains(&ra) || !(-90.0..=90.0).contains(&dec) {
        return Err(IrsaError::CoordinateParse(text.to_string()));
    }
    Ok((ra, dec))
}
