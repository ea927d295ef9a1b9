//! GitHub user-lookup backend

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;
use std::time::Duration;
use tokio::time::timeout;

use crate::error::{HandleForgeError, Result};
use crate::registry::{RegistryAnswer, RegistryLookup, ACCEPT_HEADER, USER_AGENT};
use crate::types::CheckConfig;

/// Registry backend querying GitHub's user endpoint
pub struct GithubRegistry {
    client: Client,
    api_base: String,
    timeout: Duration,
}

impl GithubRegistry {
    /// Create a backend with default configuration
    pub fn new() -> Self {
        Self::with_config(&CheckConfig::default())
    }

    /// Create a backend with custom configuration
    pub fn with_config(config: &CheckConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to create configured HTTP client: {}. Using default.", e);
                Client::new()
            });

        Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            timeout: config.timeout,
        }
    }

    fn lookup_url(&self, handle: &str) -> String {
        format!("{}/{}", self.api_base, handle)
    }
}

impl Default for GithubRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RegistryLookup for GithubRegistry {
    async fn lookup(&self, handle: &str) -> Result<RegistryAnswer> {
        let url = self.lookup_url(handle);

        let response = timeout(
            self.timeout,
            self.client.get(&url).header(ACCEPT, ACCEPT_HEADER).send(),
        )
        .await
        .map_err(|_| HandleForgeError::timeout("registry lookup", self.timeout.as_secs()))?
        .map_err(|e| HandleForgeError::network(e.to_string(), None, Some(url.clone())))?;

        let answer = match response.status().as_u16() {
            404 => RegistryAnswer::NotFound,
            200 => RegistryAnswer::Found,
            403 | 429 => RegistryAnswer::Throttled,
            code => RegistryAnswer::Unexpected(code),
        };

        Ok(answer)
    }
}
