use std::{
    path::PathBuf,
    sync::{Arc, Mutex},
    time::Duration,
};

use irsa::{irsa::Irsa, irsa_env::Transport, irsa_errors::IrsaError};

pub fn data_path(filename: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(filename)
}

/// Serves `tests/data/<spatial>.xml` for every request, the way Gator would answer.
#[derive(Debug, Default)]
pub struct FixtureTransport {
    pub requests: Mutex<Vec<Vec<(String, String)>>>,
}

impl Transport for FixtureTransport {
    fn get(
        &self,
        _url: &str,
        params: &[(&str, String)],
        _timeout: Duration,
    ) -> Result<String, IrsaError> {
        self.requests.lock().unwrap().push(
            params
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        );

        let spatial = params
            .iter()
            .find(|(key, _)| *key == "spatial")
            .map(|(_, value)| value.as_str())
            .expect("spatial parameter is always sent");
        Ok(std::fs::read_to_string(data_path(&format!("{spatial}.xml")))?)
    }
}

pub fn fixture_irsa() -> (Arc<FixtureTransport>, Irsa) {
    let transport = Arc::new(FixtureTransport::default());
    let irsa = Irsa::with_transport(transport.clone());
    (transport, irsa)
}
