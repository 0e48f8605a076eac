use std::time::Duration;

use crate::error::{BannerError, BannerResult};

/// Content host serving the banner art.
pub const DEFAULT_BASE_URL: &str = "https://www.bungie.net";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Clone, Debug)]
pub struct FetchConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Blocking HTTP fetcher for encoded asset bytes.
pub struct AssetFetcher {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl AssetFetcher {
    pub fn new(config: &FetchConfig) -> BannerResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.timeout)
            .build()
            .map_err(|e| BannerError::fetch(format!("build http client: {e}")))?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// GET `base_url + path` and return the raw response body.
    ///
    /// `path` is taken verbatim from the resolved record.
    pub fn fetch(&self, path: &str) -> BannerResult<Vec<u8>> {
        let url = if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        };
        tracing::debug!(%url, "fetching asset");

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| BannerError::fetch(format!("GET {url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(BannerError::fetch(format!("GET {url}: HTTP {status}")));
        }

        let bytes = response
            .bytes()
            .map_err(|e| BannerError::fetch(format!("read body of {url}: {e}")))?;
        Ok(bytes.to_vec())
    }
}
