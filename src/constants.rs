//! # Constants and type definitions for the IRSA client
//!
//! This module centralizes the **service endpoints**, **fixed query values**, **angular
//! conversion factors**, and **common type aliases** used throughout the crate.
//!
//! ## Overview
//!
//! - Gator endpoints (catalog query and catalog listing)
//! - Fixed request values (`outfmt`, default timeout, default row limit)
//! - Unit conversions between the angular units accepted by the query builder
//! - Core type aliases used across the crate

use std::time::Duration;

// -------------------------------------------------------------------------------------------------
// Service endpoints and request defaults
// -------------------------------------------------------------------------------------------------

/// Gator catalog query endpoint
pub const IRSA_URL: &str = "https://irsa.ipac.caltech.edu/cgi-bin/Gator/nph-query";

/// Gator catalog listing endpoint
pub const GATOR_LIST_URL: &str = "https://irsa.ipac.caltech.edu/cgi-bin/Gator/nph-scan";

/// Output format code understood by Gator as "VOTable"
pub const OUTFMT_VOTABLE: u8 = 3;

/// Default number of rows requested from the server
pub const DEFAULT_ROW_LIMIT: usize = 500;

/// Default HTTP timeout for one query
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

// -------------------------------------------------------------------------------------------------
// Angular unit conversions
// -------------------------------------------------------------------------------------------------

/// Arcseconds in one degree
pub const ARCSEC_PER_DEG: f64 = 3600.0;

/// Arcseconds in one arcminute
pub const ARCSEC_PER_ARCMIN: f64 = 60.0;

/// Arcseconds in one hour of right ascension (15 degrees)
pub const ARCSEC_PER_HOUR: f64 = 15.0 * ARCSEC_PER_DEG;

/// Arcseconds in one radian
pub const ARCSEC_PER_RAD: f64 = 648_000.0 / std::f64::consts::PI;

/// Arcseconds → radians
pub const RADSEC: f64 = std::f64::consts::PI / 648_000.0;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in arcseconds
pub type ArcSec = f64;
/// Angle in radians
pub type Radian = f64;
/// Gator catalog identifier (e.g. `"fp_psc"`)
pub type CatalogName = String;
