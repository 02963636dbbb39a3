//! Transport seam for the Displayer API.
//!
//! The pipeline talks HTTP through [`DisplayerTransport`] so tests can
//! substitute a scripted transport for [`HttpTransport`].

use std::time::Duration;

use async_trait::async_trait;

use crate::error::{BadgesError, BadgesResult};

/// A raw HTTP response, before any pipeline interpretation.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Minimal HTTP surface the badge pipeline needs.
///
/// Implementations return `Ok` for any response the server produced,
/// whatever its status code; `Err(BadgesError::Transport)` is reserved for
/// failures to get a response at all (timeout, connection refused).
#[async_trait]
pub trait DisplayerTransport: Send + Sync {
    async fn post_form(
        &self,
        url: &str,
        fields: &[(&str, &str)],
    ) -> BadgesResult<TransportResponse>;

    async fn get(&self, url: &str) -> BadgesResult<TransportResponse>;
}

#[async_trait]
impl<T: DisplayerTransport + ?Sized> DisplayerTransport for std::sync::Arc<T> {
    async fn post_form(
        &self,
        url: &str,
        fields: &[(&str, &str)],
    ) -> BadgesResult<TransportResponse> {
        (**self).post_form(url, fields).await
    }

    async fn get(&self, url: &str) -> BadgesResult<TransportResponse> {
        (**self).get(url).await
    }
}

/// Production transport backed by a shared [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> BadgesResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BadgesError::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl DisplayerTransport for HttpTransport {
    async fn post_form(
        &self,
        url: &str,
        fields: &[(&str, &str)],
    ) -> BadgesResult<TransportResponse> {
        let resp = self
            .client
            .post(url)
            .header("Accept", "application/json")
            .form(fields)
            .send()
            .await?;

        let status = resp.status().as_u16();
        let body = resp.text().await?;

        Ok(TransportResponse { status, body })
    }

    async fn get(&self, url: &str) -> BadgesResult<TransportResponse> {
        let resp = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = resp.status().as_u16();
        let body = resp.text().await?;

        Ok(TransportResponse { status, body })
    }
}
