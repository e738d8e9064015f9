//! Blocking HTTP transport.

use crate::loader::{CurveFetcher, TransportError};

/// Performs one plain GET per fetch: no headers, auth or retry.
///
/// Non-success statuses are not transport failures; their bodies are
/// returned and rejected later by the curve parser.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    agent: ureq::Agent,
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpFetcher {
    /// Fetcher with its own connection pool.
    #[must_use]
    pub fn new() -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .into();
        Self { agent }
    }
}

impl CurveFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String, TransportError> {
        let response = self.agent.get(url).call().map_err(to_transport)?;
        log::debug!("GET {url} -> {}", response.status());
        response
            .into_body()
            .read_to_string()
            .map_err(to_transport)
    }
}

#[allow(clippy::needless_pass_by_value)]
fn to_transport(e: ureq::Error) -> TransportError {
    let name = match &e {
        ureq::Error::Io(io) => return super::io_transport_error(io),
        ureq::Error::BadUri(_) => "BadUri",
        ureq::Error::HostNotFound => "HostNotFound",
        ureq::Error::ConnectionFailed => "ConnectionFailed",
        ureq::Error::Timeout(_) => "Timeout",
        _ => "HttpError",
    };
    TransportError::new(name, e.to_string())
}
