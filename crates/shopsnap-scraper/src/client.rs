use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE};
use reqwest::Client;
use serde::de::DeserializeOwned;
use shopsnap_core::FetchPolicy;

use crate::error::ScrapeError;

/// HTTP client for storefront pages and JSON endpoints.
///
/// Every fetch is retried up to the policy's attempt bound with a linearly
/// increasing delay, and every *successful* fetch is followed by a
/// politeness sleep before the body is returned. The politeness delay is
/// the tool's only rate limiting toward the origin server, so it applies
/// unconditionally.
#[derive(Debug)]
pub struct FetchClient {
    client: Client,
    policy: FetchPolicy,
}

/// Pure retry schedule: the delay to wait after failed attempt `attempt`
/// (0-based), or `None` when the attempt budget is spent and the error is
/// terminal.
///
/// The schedule is linear: `backoff_base_ms * (attempt + 1)`.
pub(crate) fn retry_delay(policy: &FetchPolicy, attempt: u32) -> Option<Duration> {
    if attempt + 1 >= policy.max_retries.max(1) {
        return None;
    }
    let factor = u64::from(attempt) + 1;
    Some(Duration::from_millis(
        policy.backoff_base_ms.saturating_mul(factor),
    ))
}

impl FetchClient {
    /// Creates a `FetchClient` with the policy's timeouts, `User-Agent`,
    /// and `Accept-Language` header.
    ///
    /// # Errors
    ///
    /// - [`ScrapeError::InvalidAcceptLanguage`]: the policy's
    ///   `accept_language` is not a valid header value.
    /// - [`ScrapeError::Http`]: the underlying `reqwest::Client` cannot be
    ///   constructed (e.g., invalid TLS config).
    pub fn new(policy: &FetchPolicy) -> Result<Self, ScrapeError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_str(&policy.accept_language).map_err(|_| {
                ScrapeError::InvalidAcceptLanguage {
                    value: policy.accept_language.clone(),
                }
            })?,
        );

        let client = Client::builder()
            .timeout(Duration::from_secs(policy.request_timeout_secs))
            .connect_timeout(Duration::from_secs(policy.connect_timeout_secs))
            .user_agent(&policy.user_agent)
            .default_headers(headers)
            .build()?;
        Ok(Self {
            client,
            policy: policy.clone(),
        })
    }

    /// Fetches `url` and returns the response body as text.
    ///
    /// Non-2xx statuses and network failures both count as failed attempts
    /// and are retried on the linear schedule from [`retry_delay`]. The
    /// error from the final attempt is propagated; callers decide whether
    /// that is fatal for their item or for the whole run.
    ///
    /// # Errors
    ///
    /// - [`ScrapeError::UnexpectedStatus`]: non-2xx on the final attempt.
    /// - [`ScrapeError::Http`]: network or TLS failure on the final attempt.
    pub async fn fetch_text(&self, url: &str) -> Result<String, ScrapeError> {
        let mut attempt = 0u32;
        loop {
            match self.try_fetch(url).await {
                Ok(body) => {
                    if self.policy.politeness_delay_ms > 0 {
                        tokio::time::sleep(Duration::from_millis(self.policy.politeness_delay_ms))
                            .await;
                    }
                    return Ok(body);
                }
                Err(err) => match retry_delay(&self.policy, attempt) {
                    Some(delay) => {
                        tracing::warn!(
                            url,
                            attempt,
                            delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                            error = %err,
                            "fetch failed, retrying after backoff"
                        );
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                    }
                    None => return Err(err),
                },
            }
        }
    }

    /// Fetches `url` and deserializes the body as JSON.
    ///
    /// Transport failures retry via [`Self::fetch_text`]; a body that does
    /// not parse is not retried (refetching would return the same bytes).
    ///
    /// # Errors
    ///
    /// Propagates [`Self::fetch_text`] errors, plus
    /// [`ScrapeError::Deserialize`] when the body is not valid JSON of the
    /// expected shape.
    pub async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ScrapeError> {
        let body = self.fetch_text(url).await?;
        serde_json::from_str::<T>(&body).map_err(|e| ScrapeError::Deserialize {
            context: url.to_owned(),
            source: e,
        })
    }

    /// One GET attempt: no retries, no politeness sleep.
    async fn try_fetch(&self, url: &str) -> Result<String, ScrapeError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::UnexpectedStatus {
                url: url.to_owned(),
                status: status.as_u16(),
            });
        }
        Ok(response.text().await?)
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
