use async_trait::async_trait;
use enver_backend::{RegistryError, ReleaseFetcher, ReleaseInfo};
use log::{debug, info};

pub const DEFAULT_RELEASES_URL: &str = "https://releases.electronjs.org/releases.json";

/// Fetches the release feed over HTTP.
#[derive(Clone)]
pub struct ReleasesClient {
    client: reqwest::Client,
    url: String,
}

impl ReleasesClient {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            url: DEFAULT_RELEASES_URL.to_string(),
        }
    }

    pub fn with_url(mut self, url: String) -> Self {
        self.url = url;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ReleaseFetcher for ReleasesClient {
    async fn fetch_releases(&self) -> Result<Vec<ReleaseInfo>, RegistryError> {
        debug!("Fetching releases from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .header("User-Agent", concat!("enver/", env!("CARGO_PKG_VERSION")))
            .send()
            .await
            .map_err(|e| RegistryError::Network(format!("Failed to fetch releases: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RegistryError::Network(format!(
                "Release feed returned {}",
                status
            )));
        }

        let releases: Vec<ReleaseInfo> = response
            .json()
            .await
            .map_err(|e| RegistryError::Parse(format!("Failed to parse releases: {}", e)))?;

        info!("Fetched {} releases from {}", releases.len(), self.url);
        Ok(releases)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_url() {
        let client = ReleasesClient::new(reqwest::Client::new());
        assert_eq!(client.url(), DEFAULT_RELEASES_URL);
    }

    #[test]
    fn test_custom_url() {
        let client = ReleasesClient::new(reqwest::Client::new())
            .with_url("https://mirror.example/releases.json".to_string());
        assert_eq!(client.url(), "https://mirror.example/releases.json");
    }
}
