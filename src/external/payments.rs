// ABOUTME: Payments provider client constructed from the configured secret key
// ABOUTME: Built at boot when a key is present; no request handler calls it
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright (c) 2025 Quarters Property Software

//! Payments Provider Client
//!
//! A thin HTTP client shell for the payments provider. The server
//! constructs it at startup from `PAYMENTS_PROVIDER_SECRET_KEY`; the REST
//! surface does not currently expose any operation that calls the
//! provider.

use serde::Deserialize;

/// Payments client configuration
#[derive(Debug, Clone)]
pub struct PaymentsClientConfig {
    /// Provider secret key
    pub secret_key: String,
    /// Base URL for the provider API
    pub base_url: String,
}

impl Default for PaymentsClientConfig {
    fn default() -> Self {
        Self {
            secret_key: String::new(),
            base_url: "https://api.payments.example.com/v1".to_string(),
        }
    }
}

/// Charge status as reported by the provider
#[derive(Debug, Clone, Deserialize)]
pub struct ChargeStatus {
    /// Provider-side charge identifier
    pub id: String,
    /// Settlement state
    pub status: String,
}

/// HTTP client for the payments provider
#[derive(Debug, Clone)]
pub struct PaymentsClient {
    http: reqwest::Client,
    config: PaymentsClientConfig,
}

impl PaymentsClient {
    /// Create a client with the given secret key and default base URL
    #[must_use]
    pub fn new(secret_key: String) -> Self {
        Self::with_config(PaymentsClientConfig {
            secret_key,
            ..PaymentsClientConfig::default()
        })
    }

    /// Create a client from full configuration
    #[must_use]
    pub fn with_config(config: PaymentsClientConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Whether a non-empty secret key is configured
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.config.secret_key.is_empty()
    }

    /// Look up a charge by provider id
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the provider rejects the key.
    pub async fn get_charge(&self, charge_id: &str) -> anyhow::Result<ChargeStatus> {
        let url = format!("{}/charges/{charge_id}", self.config.base_url);

        let status = self
            .http
            .get(&url)
            .bearer_auth(&self.config.secret_key)
            .send()
            .await?
            .error_for_status()?
            .json::<ChargeStatus>()
            .await?;

        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_configured() {
        assert!(PaymentsClient::new("sk_test_123".to_string()).is_configured());
        assert!(!PaymentsClient::new(String::new()).is_configured());
    }
}
