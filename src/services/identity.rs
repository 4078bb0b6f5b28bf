use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use crate::core::config::Settings;

/// Verified identity returned by the external provider for a bearer token.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ProviderIdentity {
    pub(crate) subject: String,
    #[serde(default)]
    pub(crate) email: Option<String>,
    #[serde(default)]
    pub(crate) full_name: Option<String>,
}

#[derive(Debug, Error)]
pub(crate) enum IdentityError {
    #[error("identity provider integration is disabled")]
    Disabled,
    #[error("identity token rejected by provider")]
    Rejected,
    #[error("identity provider request failed: {0}")]
    Request(String),
}

#[derive(Debug, Clone)]
pub(crate) struct IdentityService {
    client: Client,
    token_info_url: String,
    enabled: bool,
}

#[derive(Debug, Deserialize)]
struct TokenInfoResponse {
    sub: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

impl IdentityService {
    pub(crate) fn from_settings(settings: &Settings) -> Result<Self> {
        let timeout = Duration::from_secs(settings.identity().timeout_seconds);
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(timeout)
            .build()
            .context("Failed to build identity provider HTTP client")?;

        Ok(Self {
            client,
            token_info_url: settings.identity().token_info_url.clone(),
            enabled: settings.identity().enabled,
        })
    }

    /// Exchange a provider token for a verified identity. Token validation is
    /// entirely the provider's concern; a non-success response means the
    /// token is invalid or expired.
    pub(crate) async fn verify_token(&self, token: &str) -> Result<ProviderIdentity, IdentityError> {
        if !self.enabled || self.token_info_url.is_empty() {
            return Err(IdentityError::Disabled);
        }

        let response = self
            .client
            .post(&self.token_info_url)
            .json(&serde_json::json!({ "token": token }))
            .send()
            .await
            .map_err(|err| IdentityError::Request(err.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(IdentityError::Rejected);
        }
        if !status.is_success() {
            return Err(IdentityError::Request(format!(
                "identity provider returned status {status}"
            )));
        }

        let info = response
            .json::<TokenInfoResponse>()
            .await
            .map_err(|err| IdentityError::Request(err.to_string()))?;

        if info.sub.trim().is_empty() {
            return Err(IdentityError::Rejected);
        }

        Ok(ProviderIdentity { subject: info.sub, email: info.email, full_name: info.name })
    }
}
