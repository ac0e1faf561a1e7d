//! HTTP client wrapper for the BGG XML API.
//!
//! Requests are spaced at least `rate_limit_delay` apart, and transient
//! failures are retried with exponential backoff.

use std::sync::Mutex;
use std::thread;
use std::time::{Duration, Instant};

use reqwest::blocking::Client;
use reqwest::StatusCode;
use tracing::{debug, error, warn};

use crate::config::Settings;
use crate::error::{BggError, Result};

/// User agent string identifying this client.
const USER_AGENT: &str = concat!("bgg-client/", env!("CARGO_PKG_VERSION"));

/// Minimum delay before retrying a rate-limited (429) request.
pub const RATE_LIMIT_BASE_DELAY: Duration = Duration::from_secs(5);

/// Delay before retry number `attempt` (0-based): `base + factor * 2^attempt`.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use bgg_client::http::retry_delay;
///
/// let factor = Duration::from_millis(500);
/// assert_eq!(retry_delay(0, factor, Duration::ZERO), Duration::from_millis(500));
/// assert_eq!(retry_delay(2, factor, Duration::ZERO), Duration::from_secs(2));
/// assert_eq!(retry_delay(1, factor, Duration::from_secs(5)), Duration::from_secs(6));
/// ```
#[must_use]
pub fn retry_delay(attempt: u32, backoff_factor: Duration, base: Duration) -> Duration {
    let multiplier = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
    base.saturating_add(backoff_factor.saturating_mul(multiplier))
}

/// Blocking HTTP client with rate limiting and retries.
#[derive(Debug)]
pub struct HttpClient {
    client: Client,
    api_token: Option<String>,
    rate_limit_delay: Duration,
    max_retries: u32,
    backoff_factor: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl HttpClient {
    /// Create a client from settings.
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = Client::builder()
            .timeout(settings.request_timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            api_token: settings.api_token.clone(),
            rate_limit_delay: settings.rate_limit_delay,
            max_retries: settings.max_retries,
            backoff_factor: settings.retry_backoff_factor,
            last_request: Mutex::new(None),
        })
    }

    /// GET `url` and return the response body as text.
    ///
    /// Rate limiting (429), queued responses (202), server errors (5xx) and
    /// connection/timeout errors are retried up to `max_retries` times; a 429
    /// always waits at least [`RATE_LIMIT_BASE_DELAY`]. Other failures are
    /// returned immediately. When retries run out, the last failure is
    /// returned.
    pub fn get_text(&self, url: &str) -> Result<String> {
        let mut attempt = 0;

        loop {
            self.wait_for_rate_limit();

            match self.send(url) {
                Ok(body) => return Ok(body),
                Err(e) if e.is_retryable() && attempt < self.max_retries => {
                    let base = match e {
                        BggError::RateLimited { .. } => RATE_LIMIT_BASE_DELAY,
                        _ => Duration::ZERO,
                    };
                    let delay = retry_delay(attempt, self.backoff_factor, base);
                    warn!(
                        error = %e,
                        attempt = attempt + 1,
                        max_retries = self.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        "Request failed, will retry"
                    );
                    thread::sleep(delay);
                    attempt += 1;
                }
                Err(e) => {
                    if e.is_retryable() {
                        error!(error = %e, url, "Max retries exceeded");
                    }
                    return Err(e);
                }
            }
        }
    }

    fn send(&self, url: &str) -> Result<String> {
        debug!(url, "GET");

        let mut request = self.client.get(url);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }
        let response = request.send()?;
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(BggError::RateLimited {
                url: url.to_string(),
            });
        }
        if status == StatusCode::ACCEPTED || !status.is_success() {
            return Err(BggError::Api {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.text()?)
    }

    /// Sleep until `rate_limit_delay` has passed since the previous request.
    fn wait_for_rate_limit(&self) {
        let mut last = self
            .last_request
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.rate_limit_delay {
                let wait = self.rate_limit_delay - elapsed;
                debug!(wait_ms = wait.as_millis() as u64, "Waiting for rate limit");
                thread::sleep(wait);
            }
        }
        *last = Some(Instant::now());
    }
}
