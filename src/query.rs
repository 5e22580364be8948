//! # Query parameters and payload construction
//!
//! A Gator query is a flat set of GET parameters. This module assembles them from typed
//! inputs:
//!
//! - [`args_to_payload`] produces the keys present in every request (`catalog`, `spatial`,
//!   `outfmt`, `outrows`);
//! - [`parse_spatial`] adds the keys of the chosen [`SpatialMode`] (`objstr`, `radius`,
//!   `radunits`, `size`, `polygon`) and the optional column selection (`selcols`).
//!
//! ```rust
//! use irsa::query::{build_payload, SpatialParams, Target};
//! use irsa::units::AngleUnit;
//!
//! let payload = build_payload(
//!     Some(&Target::from("m31")),
//!     "fp_psc",
//!     "Box",
//!     &SpatialParams::box_width(2.0 * AngleUnit::ArcMinute),
//! )
//! .unwrap();
//! assert_eq!(payload.objstr.as_deref(), Some("m31"));
//! assert_eq!(payload.size, Some(120.0));
//! ```

use std::{fmt, str::FromStr};

use itertools::Itertools;

use crate::{
    config::row_limit,
    constants::{Degree, OUTFMT_VOTABLE},
    coordinates::{parse_coordinates, CoordText, SkyCoord},
    dimension::{parse_dimension, Dimension},
    irsa_errors::IrsaError,
    units::AngleUnit,
};

/// Shape of the spatial constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpatialMode {
    Cone,
    Box,
    Polygon,
    AllSky,
}

impl SpatialMode {
    pub fn as_str(self) -> &'static str {
        match self {
            SpatialMode::Cone => "Cone",
            SpatialMode::Box => "Box",
            SpatialMode::Polygon => "Polygon",
            SpatialMode::AllSky => "All-Sky",
        }
    }

    /// Value of the `spatial` parameter on the wire.
    pub fn server_value(self) -> &'static str {
        match self {
            SpatialMode::AllSky => "NONE",
            other => other.as_str(),
        }
    }
}

impl fmt::Display for SpatialMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SpatialMode {
    type Err = IrsaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Cone" => Ok(SpatialMode::Cone),
            "Box" => Ok(SpatialMode::Box),
            "Polygon" => Ok(SpatialMode::Polygon),
            "All-Sky" => Ok(SpatialMode::AllSky),
            other => Err(IrsaError::InvalidSpatialMode(other.to_string())),
        }
    }
}

/// The position a query is centred on.
#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    /// An object name or a textual position, told apart with
    /// [`is_coordinate`](crate::coordinates::is_coordinate).
    Text(String),
    Coord(SkyCoord),
}

impl Target {
    /// Value of the `objstr` parameter: textual positions and [`SkyCoord`]s are rendered as
    /// ICRS decimal degrees, object names are forwarded verbatim.
    pub fn to_objstr(&self) -> String {
        match self {
            Target::Text(text) => parse_coordinates(text).unwrap_or_else(|_| text.clone()),
            Target::Coord(coord) => coord.to_icrs_string(),
        }
    }
}

impl From<&str> for Target {
    fn from(text: &str) -> Self {
        Target::Text(text.to_string())
    }
}

impl From<String> for Target {
    fn from(text: String) -> Self {
        Target::Text(text)
    }
}

impl From<SkyCoord> for Target {
    fn from(coord: SkyCoord) -> Self {
        Target::Coord(coord)
    }
}

/// One polygon corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Vertex {
    Coord(SkyCoord),
    /// ICRS (ra, dec) in degrees
    Pair(Degree, Degree),
}

impl Vertex {
    /// `"ra dec"`, ICRS degrees with one decimal.
    ///
    /// Return
    /// ----------
    /// * [`IrsaError::CoordinateParse`] if a raw pair lies outside `0 <= ra < 360`,
    ///   `-90 <= dec <= 90`.
    pub fn to_polygon_text(&self) -> Result<String, IrsaError> {
        let (ra, dec) = match self {
            Vertex::Coord(coord) => coord.ra_dec(),
            Vertex::Pair(ra, dec) if (0.0..360.0).contains(ra) => {
                SkyCoord::icrs(*ra, *dec)?.ra_dec()
            }
            Vertex::Pair(ra, dec) => {
                return Err(IrsaError::CoordinateParse(format!(
                    "invalid ICRS position ({ra}, {dec})"
                )))
            }
        };
        Ok(format!("{ra:.1} {dec:.1}"))
    }
}

impl From<(f64, f64)> for Vertex {
    fn from((ra, dec): (f64, f64)) -> Self {
        Vertex::Pair(ra, dec)
    }
}

impl From<SkyCoord> for Vertex {
    fn from(coord: SkyCoord) -> Self {
        Vertex::Coord(coord)
    }
}

/// Shape parameters of a query. Only the field matching the [`SpatialMode`] is read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpatialParams {
    /// Cone radius, 10 arcsec when absent
    pub radius: Option<Dimension>,
    /// Box side length
    pub width: Option<Dimension>,
    /// Polygon corners, in order, not closed
    pub polygon: Option<Vec<Vertex>>,
    /// Restrict the output to these columns
    pub columns: Option<Vec<String>>,
}

impl SpatialParams {
    pub fn cone(radius: impl Into<Dimension>) -> Self {
        SpatialParams {
            radius: Some(radius.into()),
            ..Default::default()
        }
    }

    pub fn box_width(width: impl Into<Dimension>) -> Self {
        SpatialParams {
            width: Some(width.into()),
            ..Default::default()
        }
    }

    pub fn polygon<V: Into<Vertex>>(vertices: impl IntoIterator<Item = V>) -> Self {
        SpatialParams {
            polygon: Some(vertices.into_iter().map(Into::into).collect()),
            ..Default::default()
        }
    }

    pub fn with_columns<S: Into<String>>(mut self, columns: impl IntoIterator<Item = S>) -> Self {
        self.columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }
}

/// GET parameters of one Gator request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryPayload {
    pub catalog: String,
    pub spatial: String,
    pub outfmt: u8,
    pub outrows: usize,
    pub objstr: Option<String>,
    pub radius: Option<f64>,
    pub radunits: Option<String>,
    pub size: Option<f64>,
    pub polygon: Option<String>,
    pub selcols: Option<String>,
}

impl QueryPayload {
    /// Parameters in wire order, absent keys skipped.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("catalog", self.catalog.clone()),
            ("spatial", self.spatial.clone()),
            ("outfmt", self.outfmt.to_string()),
            ("outrows", self.outrows.to_string()),
        ];
        let optional = [
            ("objstr", self.objstr.clone()),
            ("radius", self.radius.map(|r| r.coord_text())),
            ("radunits", self.radunits.clone()),
            ("size", self.size.map(|s| s.coord_text())),
            ("polygon", self.polygon.clone()),
            ("selcols", self.selcols.clone()),
        ];
        pairs.extend(
            optional
                .into_iter()
                .filter_map(|(key, value)| value.map(|v| (key, v))),
        );
        pairs
    }
}

/// Keys common to every query.
///
/// Arguments
/// -----------------
/// * `catalog`: Gator catalog name, e.g. `"fp_psc"`.
/// * `spatial`: one of `Cone`, `Box`, `Polygon`, `All-Sky`.
///
/// Return
/// ----------
/// * `{catalog, spatial, outfmt: 3, outrows: row_limit()}`; `All-Sky` is sent as `NONE`.
/// * [`IrsaError::InvalidSpatialMode`] for any other `spatial` value.
pub fn args_to_payload(catalog: &str, spatial: &str) -> Result<QueryPayload, IrsaError> {
    let mode: SpatialMode = spatial.parse()?;
    Ok(QueryPayload {
        catalog: catalog.to_string(),
        spatial: mode.server_value().to_string(),
        outfmt: OUTFMT_VOTABLE,
        outrows: row_limit(),
        ..Default::default()
    })
}

/// Add the keys of `mode` to `payload`.
///
/// Arguments
/// -----------------
/// * `payload`: payload built by [`args_to_payload`].
/// * `mode`: spatial constraint.
/// * `target`: centre of Cone/Box queries, optional for Polygon, ignored for All-Sky.
/// * `params`: shape parameters.
///
/// Return
/// ----------
/// * [`IrsaError::MissingParameter`] when the mode lacks its target, width or polygon,
///   [`IrsaError::InvalidUnit`] when a size cannot be normalized.
pub fn parse_spatial(
    payload: &mut QueryPayload,
    mode: SpatialMode,
    target: Option<&Target>,
    params: &SpatialParams,
) -> Result<(), IrsaError> {
    match mode {
        SpatialMode::Cone => {
            let target = target.ok_or(IrsaError::MissingParameter("coordinates"))?;
            let radius = match &params.radius {
                Some(radius) => parse_dimension(radius.clone())?,
                None => parse_dimension(10.0 * AngleUnit::ArcSecond)?,
            };
            payload.objstr = Some(target.to_objstr());
            payload.radius = Some(radius.value);
            payload.radunits = Some(radius.unit.to_string());
        }
        SpatialMode::Box => {
            let target = target.ok_or(IrsaError::MissingParameter("coordinates"))?;
            let width = params
                .width
                .clone()
                .ok_or(IrsaError::MissingParameter("width"))?;
            payload.objstr = Some(target.to_objstr());
            payload.size = Some(parse_dimension(width)?.arcseconds());
        }
        SpatialMode::Polygon => {
            let vertices = params
                .polygon
                .as_ref()
                .filter(|vertices| vertices.len() >= 3)
                .ok_or(IrsaError::MissingParameter("polygon"))?;
            payload.objstr = target.map(Target::to_objstr);
            let corners: Vec<String> = vertices
                .iter()
                .map(Vertex::to_polygon_text)
                .collect::<Result<_, _>>()?;
            payload.polygon = Some(corners.join(","));
        }
        SpatialMode::AllSky => {}
    }
    payload.spatial = mode.server_value().to_string();
    payload.selcols = params.columns.as_ref().map(|columns| columns.iter().join(","));
    Ok(())
}

/// Full payload of one query: [`args_to_payload`] followed by [`parse_spatial`].
pub fn build_payload(
    target: Option<&Target>,
    catalog: &str,
    spatial: &str,
    params: &SpatialParams,
) -> Result<QueryPayload, IrsaError> {
    let mut payload = args_to_payload(catalog, spatial)?;
    parse_spatial(&mut payload, spatial.parse()?, target, params)?;
    Ok(payload)
}
