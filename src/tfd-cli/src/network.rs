//! HTTP dataset downloads

use std::io::Read;
use std::time::Duration;
use tfd::{FetchError, Fetcher};

/// Blocking fetcher backed by a ureq agent
pub struct HttpFetcher {
    agent: ureq::Agent,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(timeout)
            .user_agent(concat!("tfd-search/", env!("CARGO_PKG_VERSION")))
            .build();
        HttpFetcher { agent }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new(Duration::from_secs(60))
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = match self.agent.get(url).call() {
            Ok(resp) => resp,
            Err(ureq::Error::Status(status, _)) => {
                return Err(FetchError::Status {
                    url: url.to_string(),
                    status,
                })
            }
            Err(err) => {
                return Err(FetchError::Network {
                    url: url.to_string(),
                    reason: err.to_string(),
                })
            }
        };

        // Read the whole body; into_string() caps responses at 10 MB
        let mut body = Vec::new();
        response
            .into_reader()
            .read_to_end(&mut body)
            .map_err(|err| FetchError::Network {
                url: url.to_string(),
                reason: err.to_string(),
            })?;

        tracing::debug!(%url, bytes = body.len(), "downloaded");
        Ok(body)
    }
}
