//! # Irsa: catalog query client
//!
//! This module defines the [`Irsa`](crate::irsa::Irsa) struct, the façade that wires together:
//!
//! 1. **Configuration** ([`IrsaConfig`](crate::config::IrsaConfig)): endpoints and timeout.
//! 2. **Transport** ([`Transport`](crate::irsa_env::Transport)): the blocking HTTP GET
//!    capability, [`UreqTransport`](crate::irsa_env::UreqTransport) by default.
//! 3. **Payload construction** ([`build_payload`](crate::query::build_payload)).
//! 4. **Result parsing** ([`parse_votable`](crate::votable::parse_votable)) with the Gator
//!    specific sanity checks.
//!
//! ## Query life cycle
//!
//! ```text
//! Idle ──build payload──▶ PayloadBuilt ──get_query_payload──▶ Payload returned
//!                              │
//!                              └──GET──▶ ResponseReceived ──parse──▶ Table
//! ```
//!
//! Any step may fail; the error is returned to the caller as is. Nothing is retried or cached.
//!
//! ## Typical usage
//!
//! ```rust, no_run
//! use irsa::irsa::Irsa;
//! use irsa::query::SpatialParams;
//! use irsa::units::AngleUnit;
//!
//! let irsa = Irsa::new();
//! let table = irsa
//!     .query_region(
//!         Some("m31".into()),
//!         "fp_psc",
//!         "Cone",
//!         &SpatialParams::cone(2.0 * AngleUnit::ArcMinute),
//!     )
//!     .unwrap();
//! println!("{} sources", table.len());
//! ```
use std::{io::Write, sync::Arc};

use tracing::{debug, warn};

use crate::{
    config::{row_limit, IrsaConfig},
    constants::CatalogName,
    irsa_env::{Transport, UreqTransport},
    irsa_errors::IrsaError,
    query::{build_payload, QueryPayload, SpatialParams, Target},
    votable::{parse_votable, Table},
};

/// Outcome of [`Irsa::query_region_async`].
#[derive(Debug, Clone, PartialEq)]
pub enum QueryResponse {
    /// The request that would have been sent
    Payload(QueryPayload),
    /// Raw body returned by the server
    Raw(String),
}

impl QueryResponse {
    pub fn payload(&self) -> Option<&QueryPayload> {
        match self {
            QueryResponse::Payload(payload) => Some(payload),
            QueryResponse::Raw(_) => None,
        }
    }

    pub fn raw(&self) -> Option<&str> {
        match self {
            QueryResponse::Raw(body) => Some(body),
            QueryResponse::Payload(_) => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Irsa {
    config: IrsaConfig,
    transport: Arc<dyn Transport>,
}

impl Default for Irsa {
    fn default() -> Self {
        Self::new()
    }
}

impl Irsa {
    /// Client with the default endpoints, timeout and a `ureq` transport.
    pub fn new() -> Self {
        Irsa::with_config(IrsaConfig::default())
    }

    pub fn with_config(config: IrsaConfig) -> Self {
        Irsa {
            config,
            transport: Arc::new(UreqTransport::new()),
        }
    }

    /// Client with the default configuration and a custom transport.
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Irsa {
            config: IrsaConfig::default(),
            transport,
        }
    }

    pub fn config(&self) -> &IrsaConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: IrsaConfig) {
        self.config = config;
    }

    /// Build the query and either return it or send it.
    ///
    /// Arguments
    /// -----------------
    /// * `target`: object name, textual position or [`SkyCoord`](crate::coordinates::SkyCoord);
    ///   required for `Cone` and `Box`.
    /// * `catalog`: Gator catalog name, e.g. `"fp_psc"`.
    /// * `spatial`: `Cone`, `Box`, `Polygon` or `All-Sky`.
    /// * `params`: radius, width or polygon, plus optional column selection.
    /// * `get_query_payload`: when `true`, return the payload without touching the network.
    ///
    /// Return
    /// ----------
    /// * [`QueryResponse::Payload`] or [`QueryResponse::Raw`].
    /// * Payload errors ([`IrsaError::InvalidSpatialMode`], ...) before any request is sent,
    ///   transport errors unmodified.
    pub fn query_region_async(
        &self,
        target: Option<Target>,
        catalog: &str,
        spatial: &str,
        params: &SpatialParams,
        get_query_payload: bool,
    ) -> Result<QueryResponse, IrsaError> {
        let payload = build_payload(target.as_ref(), catalog, spatial, params)?;
        if get_query_payload {
            return Ok(QueryResponse::Payload(payload));
        }

        debug!(catalog, spatial, "querying IRSA");
        let body = self.transport.get(
            &self.config.query_url,
            &payload.query_pairs(),
            self.config.timeout,
        )?;
        Ok(QueryResponse::Raw(body))
    }

    /// Send the query and parse the answer.
    ///
    /// Same arguments as [`query_region_async`](Irsa::query_region_async), the payload is
    /// always sent.
    ///
    /// Return
    /// ----------
    /// * The result [`Table`], possibly empty.
    /// * See [`parse_result`] for the server-side failures detected in the body.
    pub fn query_region(
        &self,
        target: Option<Target>,
        catalog: &str,
        spatial: &str,
        params: &SpatialParams,
    ) -> Result<Table, IrsaError> {
        let outrows = row_limit();
        let body = match self.query_region_async(target, catalog, spatial, params, false)? {
            QueryResponse::Raw(body) => body,
            QueryResponse::Payload(_) => {
                return Err(IrsaError::TableParse("no response body to parse".into()))
            }
        };
        let table = parse_result(&body, catalog)?;
        if table.len() >= outrows {
            warn!(
                rows = table.len(),
                "Row limit reached, the result may be truncated: raise it with config::set_row_limit"
            );
        }
        Ok(table)
    }

    /// Catalogs served by Gator, as `(name, description)`.
    pub fn list_catalogs(&self) -> Result<Vec<(CatalogName, String)>, IrsaError> {
        let body = self.transport.get(
            &self.config.catalog_list_url,
            &[("mode", "xml".to_string())],
            self.config.timeout,
        )?;
        let table = parse_result(&body, "")?;

        let names = table
            .column("catname")
            .ok_or_else(|| IrsaError::TableParse("catalog list has no catname column".into()))?;
        let descriptions = table.column("description").unwrap_or_default();

        Ok(names
            .into_iter()
            .enumerate()
            .map(|(i, name)| {
                let description = descriptions.get(i).copied().unwrap_or_default();
                (name.to_string(), description.to_string())
            })
            .collect())
    }

    /// Write `name: description` for every catalog, one per line.
    pub fn print_catalogs<W: Write>(&self, out: &mut W) -> Result<(), IrsaError> {
        for (name, description) in self.list_catalogs()? {
            writeln!(out, "{name}: {description}")?;
        }
        Ok(())
    }
}

/// Check a Gator answer for server-side failures, then read it as a VOTable.
///
/// Arguments
/// -----------------
/// * `body`: raw response text.
/// * `catalog`: requested catalog, for error reporting.
///
/// Return
/// ----------
/// * [`IrsaError::EmptyResponse`], [`IrsaError::CatalogNotFound`],
///   [`IrsaError::MalformedTarget`] or [`IrsaError::TableParse`] when Gator reported a
///   problem in plain text, otherwise the outcome of [`parse_votable`].
pub fn parse_result(body: &str, catalog: &str) -> Result<Table, IrsaError> {
    if body.trim().is_empty() {
        return Err(IrsaError::EmptyResponse);
    }
    if body.contains("The catalog is not on the list") {
        return Err(IrsaError::CatalogNotFound(catalog.to_string()));
    }
    if body.contains("Either wrong or missing coordinate/object name") {
        return Err(IrsaError::MalformedTarget);
    }
    if body.contains("Output table size exceeded") {
        return Err(IrsaError::TableParse(
            "Output table size exceeded, use a smaller search region or fewer columns".into(),
        ));
    }

    let table = parse_votable(body)?;
    if table.is_empty() {
        warn!("Query returned no results, so the table will be empty");
    }
    Ok(table)
}

#[cfg(test)]
mod irsa_test {
    use std::{sync::Mutex, time::Duration};

    use super::*;
    use crate::units::AngleUnit;

    const ONE_ROW: &str = r#"<VOTABLE><RESOURCE><TABLE>
        <FIELD name="ra" datatype="double"/>
        <DATA><TABLEDATA><TR><TD>10.68</TD></TR></TABLEDATA></DATA>
    </TABLE></RESOURCE></VOTABLE>"#;

    /// Records requests and answers every one of them with the same body.
    #[derive(Debug, Default)]
    struct RecordingTransport {
        body: String,
        calls: Mutex<Vec<(String, Vec<(String, String)>)>>,
    }

    impl Transport for RecordingTransport {
        fn get(
            &self,
            url: &str,
            params: &[(&str, String)],
            _timeout: Duration,
        ) -> Result<String, IrsaError> {
            self.calls.lock().unwrap().push((
                url.to_string(),
                params
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.clone()))
                    .collect(),
            ));
            Ok(self.body.clone())
        }
    }

    fn recording(body: &str) -> (Arc<RecordingTransport>, Irsa) {
        let transport = Arc::new(RecordingTransport {
            body: body.to_string(),
            ..Default::default()
        });
        let irsa = Irsa::with_transport(transport.clone());
        (transport, irsa)
    }

    #[test]
    fn test_payload_mode_skips_network() {
        let (transport, irsa) = recording(ONE_ROW);
        let response = irsa
            .query_region_async(
                Some("m31".into()),
                "fp_psc",
                "Cone",
                &SpatialParams::cone(2.0 * AngleUnit::ArcMinute),
                true,
            )
            .unwrap();
        assert_eq!(response.payload().unwrap().radius, Some(2.0));
        assert!(transport.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_request_parameters() {
        let (transport, irsa) = recording(ONE_ROW);
        let response = irsa
            .query_region_async(
                Some("m31".into()),
                "fp_psc",
                "Box",
                &SpatialParams::box_width(2.0 * AngleUnit::ArcMinute),
                false,
            )
            .unwrap();
        assert_eq!(response.raw(), Some(ONE_ROW));

        let calls = transport.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        let (url, params) = &calls[0];
        assert_eq!(url, crate::constants::IRSA_URL);
        assert!(params.contains(&("size".to_string(), "120.0".to_string())));
        assert!(params.contains(&("objstr".to_string(), "m31".to_string())));
    }

    #[test]
    fn test_query_region_sends_one_request() {
        let (transport, irsa) = recording(ONE_ROW);
        let params = SpatialParams::cone(2.0 * AngleUnit::ArcMinute);

        let table = irsa
            .query_region(Some("m31".into()), "fp_psc", "Cone", &params)
            .unwrap();
        assert_eq!(table.get(0, "ra"), Some("10.68"));
        irsa.query_region_async(Some("m31".into()), "fp_psc", "Cone", &params, false)
            .unwrap();

        let calls = transport.calls.lock().unwrap();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], calls[1]);
    }

    #[test]
    fn test_invalid_mode_fails_before_network() {
        let (transport, irsa) = recording(ONE_ROW);
        let result = irsa.query_region(
            Some("m31".into()),
            "fp_psc",
            "Sphere",
            &SpatialParams::default(),
        );
        assert_eq!(result, Err(IrsaError::InvalidSpatialMode("Sphere".into())));
        assert!(transport.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_parse_result_failures() {
        assert_eq!(parse_result("  \n", "fp_psc"), Err(IrsaError::EmptyResponse));
        assert_eq!(
            parse_result("ERROR: The catalog is not on the list", "nope"),
            Err(IrsaError::CatalogNotFound("nope".into()))
        );
        assert_eq!(
            parse_result(
                "[struct stat=\"ERROR\", msg=\"Either wrong or missing coordinate/object name\"]",
                "fp_psc"
            ),
            Err(IrsaError::MalformedTarget)
        );
        assert!(matches!(
            parse_result("Output table size exceeded", "fp_psc"),
            Err(IrsaError::TableParse(_))
        ));
    }

    #[test]
    fn test_list_catalogs() {
        let catalogs = r#"<VOTABLE><RESOURCE><TABLE>
            <FIELD name="catname" datatype="char"/>
            <FIELD name="description" datatype="char"/>
            <DATA><TABLEDATA>
                <TR><TD>fp_psc</TD><TD>2MASS All-Sky Point Source Catalog (PSC)</TD></TR>
                <TR><TD>allwise_p3as_psd</TD><TD>AllWISE Source Catalog</TD></TR>
            </TABLEDATA></DATA>
        </TABLE></RESOURCE></VOTABLE>"#;
        let (transport, irsa) = recording(catalogs);

        let list = irsa.list_catalogs().unwrap();
        assert_eq!(
            list,
            vec![
                (
                    "fp_psc".to_string(),
                    "2MASS All-Sky Point Source Catalog (PSC)".to_string()
                ),
                (
                    "allwise_p3as_psd".to_string(),
                    "AllWISE Source Catalog".to_string()
                ),
            ]
        );
        let calls = transport.calls.lock().unwrap();
        assert_eq!(calls[0].0, crate::constants::GATOR_LIST_URL);
        assert_eq!(calls[0].1, vec![("mode".to_string(), "xml".to_string())]);
        drop(calls);

        let mut out = Vec::new();
        irsa.print_catalogs(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "fp_psc: 2MASS All-Sky Point Source Catalog (PSC)\nallwise_p3as_psd: AllWISE Source Catalog\n"
        );
    }
}
