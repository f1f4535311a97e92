//! Failover HTTP transport shared by every executor: walks an ordered list of
//! equivalent endpoints with a hard per-attempt timeout.

use crate::error::{Result, RouterError};
use log::{debug, warn};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::{sync::Arc, time::Duration};
use tokio::sync::Semaphore;

/// How a single endpoint attempt is classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// 2xx. Returned to the caller, no further endpoints are tried.
    Success,
    /// 429. Transient; the next endpoint is tried.
    RateLimited,
    /// Any other status from a reachable backend. Returned as-is, no failover.
    Authoritative,
}

pub fn classify_status(status: StatusCode) -> AttemptOutcome {
    if status.is_success() {
        AttemptOutcome::Success
    } else if status == StatusCode::TOO_MANY_REQUESTS {
        AttemptOutcome::RateLimited
    } else {
        AttemptOutcome::Authoritative
    }
}

pub struct FailoverTransport {
    client: Client,
    semaphore: Arc<Semaphore>,
}

impl FailoverTransport {
    pub fn new(max_concurrent: usize) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("solana-quote-router/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RouterError::Config(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self::with_client(client, max_concurrent))
    }

    pub fn with_client(client: Client, max_concurrent: usize) -> Self {
        Self {
            client,
            semaphore: Arc::new(Semaphore::new(max_concurrent.max(1))),
        }
    }

    /// Issues the request built by `build_req` against each URL in order.
    ///
    /// Returns the first 2xx response, or the first authoritative non-2xx
    /// response. 429s and transport failures move on to the next URL. When the
    /// list is exhausted the call fails with `EndpointUnavailable`.
    pub async fn attempt(
        &self,
        backend: &str,
        urls: &[String],
        per_attempt_timeout: Duration,
        build_req: impl Fn(&Client, &str) -> RequestBuilder,
    ) -> Result<Response> {
        let mut last_failure: Option<RouterError> = None;

        for url in urls {
            let _permit = self
                .semaphore
                .acquire()
                .await
                .map_err(|e| RouterError::Http(format!("transport closed: {}", e)))?;

            let request = build_req(&self.client, url).timeout(per_attempt_timeout);
            match request.send().await {
                Ok(response) => match classify_status(response.status()) {
                    AttemptOutcome::Success => {
                        debug!("{} answered from {}", backend, url);
                        return Ok(response);
                    }
                    AttemptOutcome::RateLimited => {
                        warn!("{} rate limited at {}, trying next endpoint", backend, url);
                        last_failure = Some(RouterError::RateLimited(url.clone()));
                    }
                    AttemptOutcome::Authoritative => {
                        warn!("{} returned {} from {}", backend, response.status(), url);
                        return Ok(response);
                    }
                },
                Err(e) => {
                    let err = RouterError::from(e);
                    warn!("{} request to {} failed: {}", backend, url, err);
                    last_failure = Some(err);
                }
            }
        }

        Err(RouterError::EndpointUnavailable(match last_failure {
            Some(err) => format!("{}: {} endpoint(s) exhausted, last failure: {}", backend, urls.len(), err),
            None => format!("{}: no endpoints configured", backend),
        }))
    }
}

/// Decodes a transport response. Non-2xx statuses become `BackendStatus`.
pub async fn decode_json<T: DeserializeOwned>(backend: &str, response: Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(RouterError::BackendStatus {
            backend: backend.to_string(),
            status: status.as_u16(),
            body,
        });
    }
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| {
        RouterError::InvalidResponse(format!("{} returned malformed JSON: {}", backend, e))
    })
}
