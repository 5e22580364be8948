use thiserror::Error;

#[derive(Error, Debug)]
pub enum IrsaError {
    #[error("Dimension not in proper units: {0}")]
    InvalidUnit(String),

    #[error("Unable to parse coordinates: {0}")]
    CoordinateParse(String),

    #[error(
        "Unrecognized spatial query type: {0}. Must be one of `Cone`, `Box`, `Polygon`, or `All-Sky`"
    )]
    InvalidSpatialMode(String),

    #[error("Missing required query parameter: {0}")]
    MissingParameter(&'static str),

    #[error("HTTP ureq error: {0}")]
    Transport(#[from] ureq::Error),

    #[error("IRSA server answered with HTTP status {0}")]
    Http(u16),

    #[error("The IRSA server sent back an empty reply")]
    EmptyResponse,

    #[error("Catalog not found: {0}")]
    CatalogNotFound(String),

    #[error("Malformed coordinate/object name")]
    MalformedTarget,

    #[error("Query failed on the server side: {0}")]
    QueryStatus(String),

    #[error("Unable to parse the result table: {0}")]
    TableParse(String),

    #[error("VOTable deserialization error: {0}")]
    VoTableDeserialize(#[from] quick_xml::de::DeError),

    #[error("Unable to perform I/O operation: {0}")]
    IoError(#[from] std::io::Error),
}

impl PartialEq for IrsaError {
    fn eq(&self, other: &Self) -> bool {
        use IrsaError::*;
        match (self, other) {
            (InvalidUnit(a), InvalidUnit(b)) => a == b,
            (CoordinateParse(a), CoordinateParse(b)) => a == b,
            (InvalidSpatialMode(a), InvalidSpatialMode(b)) => a == b,
            (MissingParameter(a), MissingParameter(b)) => a == b,
            (Http(a), Http(b)) => a == b,
            (CatalogNotFound(a), CatalogNotFound(b)) => a == b,
            (QueryStatus(a), QueryStatus(b)) => a == b,
            (TableParse(a), TableParse(b)) => a == b,

            // foreign errors are not comparable: same variant is enough
            (Transport(_), Transport(_)) => true,
            (VoTableDeserialize(_), VoTableDeserialize(_)) => true,
            (IoError(_), IoError(_)) => true,

            (EmptyResponse, EmptyResponse) => true,
            (MalformedTarget, MalformedTarget) => true,

            _ => false,
        }
    }
}
