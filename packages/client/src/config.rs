//! Configuration: settings from the environment, endpoint URLs and input
//! validation.

use std::path::PathBuf;
use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use url::Url;

use crate::error::{BggError, Result};

/// Default base URL of the BoardGameGeek XML API2.
pub const BGG_API_BASE_URL: &str = "https://boardgamegeek.com/xmlapi2";

/// Environment variable prefix for all settings.
pub const ENV_PREFIX: &str = "BGG_";

/// HTTP timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Delay between consecutive requests; BGG throttles aggressive clients.
pub const DEFAULT_RATE_LIMIT_DELAY_SECS: f64 = 2.0;

/// Cache time-to-live in seconds.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 3600;

/// Maximum number of retries after the first attempt.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Backoff factor in seconds: retry `n` waits `factor * 2^n`.
pub const DEFAULT_RETRY_BACKOFF_FACTOR: f64 = 0.5;

/// The thing endpoint accepts at most this many IDs per request.
pub const THING_BATCH_SIZE: usize = 20;

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static THING_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[1-9]\d{0,9}$").expect("valid regex"));

/// BGG usernames: letters, digits, underscore, dash, dot and inner spaces.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static USERNAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w.\-]+( [\w.\-]+)*$").expect("valid regex"));

/// Client settings.
///
/// Read from `BGG_*` environment variables by [`Settings::from_env`]; every
/// value has a default, so an empty environment yields [`Settings::default`].
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub api_base_url: Url,
    pub api_token: Option<String>,
    pub username: Option<String>,
    pub request_timeout: Duration,
    pub rate_limit_delay: Duration,
    pub cache_enabled: bool,
    pub cache_ttl: Duration,
    pub cache_dir: PathBuf,
    pub max_retries: u32,
    pub retry_backoff_factor: Duration,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: default_base_url(),
            api_token: None,
            username: None,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            rate_limit_delay: Duration::from_secs_f64(DEFAULT_RATE_LIMIT_DELAY_SECS),
            cache_enabled: true,
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            cache_dir: PathBuf::from(".cache"),
            max_retries: DEFAULT_MAX_RETRIES,
            retry_backoff_factor: Duration::from_secs_f64(DEFAULT_RETRY_BACKOFF_FACTOR),
            log_level: "warn".to_string(),
        }
    }
}

#[allow(clippy::expect_used)] // Constant URL that is guaranteed to be valid
fn default_base_url() -> Url {
    Url::parse(BGG_API_BASE_URL).expect("valid base URL")
}

impl Settings {
    /// Read settings from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`, which maps a full variable name such
    /// as `BGG_CACHE_TTL` to its value.
    ///
    /// Unparseable numbers and flags fall back to their defaults; an invalid
    /// base URL is an error.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |name: &str| lookup(&format!("{ENV_PREFIX}{name}"));
        let defaults = Self::default();

        let api_base_url = match var("API_BASE_URL") {
            Some(raw) => Url::parse(&raw)
                .map_err(|e| BggError::Config(format!("BGG_API_BASE_URL '{raw}': {e}")))?,
            None => defaults.api_base_url,
        };

        let secs = |name: &str, default: Duration| {
            var(name)
                .and_then(|v| v.parse::<f64>().ok())
                .and_then(|v| Duration::try_from_secs_f64(v).ok())
                .unwrap_or(default)
        };

        Ok(Self {
            api_base_url,
            api_token: var("API_TOKEN").filter(|v| !v.is_empty()),
            username: var("USERNAME").filter(|v| !v.is_empty()),
            request_timeout: secs("REQUEST_TIMEOUT", defaults.request_timeout),
            rate_limit_delay: secs("RATE_LIMIT_DELAY", defaults.rate_limit_delay),
            cache_enabled: var("CACHE_ENABLED")
                .map(|v| !matches!(v.to_lowercase().as_str(), "false" | "0" | "no"))
                .unwrap_or(defaults.cache_enabled),
            cache_ttl: secs("CACHE_TTL", defaults.cache_ttl),
            cache_dir: var("CACHE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.cache_dir),
            max_retries: var("MAX_RETRIES")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_retries),
            retry_backoff_factor: secs("RETRY_BACKOFF_FACTOR", defaults.retry_backoff_factor),
            log_level: var("LOG_LEVEL")
                .map(|v| v.to_lowercase())
                .unwrap_or(defaults.log_level),
        })
    }

    pub fn with_api_base_url(mut self, url: Url) -> Self {
        self.api_base_url = url;
        self
    }

    pub fn with_cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = dir.into();
        self
    }

    pub fn with_cache_enabled(mut self, enabled: bool) -> Self {
        self.cache_enabled = enabled;
        self
    }

    pub fn with_rate_limit_delay(mut self, delay: Duration) -> Self {
        self.rate_limit_delay = delay;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_retry_backoff_factor(mut self, factor: Duration) -> Self {
        self.retry_backoff_factor = factor;
        self
    }

    /// Build an endpoint URL below the API base, e.g. `thing`.
    fn endpoint(&self, name: &str) -> Url {
        let mut url = self.api_base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(name);
        }
        url
    }

    /// URL for the `thing` endpoint.
    ///
    /// # Examples
    /// ```
    /// use bgg_client::config::Settings;
    ///
    /// let url = Settings::default().thing_url(&[266192, 174430], true);
    /// assert_eq!(
    ///     url.as_str(),
    ///     "https://boardgamegeek.com/xmlapi2/thing?id=266192%2C174430&type=boardgame&stats=1"
    /// );
    /// ```
    pub fn thing_url(&self, ids: &[u32], include_stats: bool) -> Url {
        let ids = ids
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(",");

        let mut url = self.endpoint("thing");
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("id", &ids).append_pair("type", "boardgame");
            if include_stats {
                query.append_pair("stats", "1");
            }
        }
        url
    }

    /// URL for the `search` endpoint.
    pub fn search_url(&self, query: &str, exact: bool) -> Url {
        let mut url = self.endpoint("search");
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("query", query).append_pair("type", "boardgame");
            if exact {
                pairs.append_pair("exact", "1");
            }
        }
        url
    }

    /// URL for the `collection` endpoint.
    pub fn collection_url(&self, username: &str) -> Url {
        let mut url = self.endpoint("collection");
        url.query_pairs_mut()
            .append_pair("username", username)
            .append_pair("subtype", "boardgame")
            .append_pair("stats", "1");
        url
    }
}

/// Validate a BGG thing ID and parse it.
///
/// # Examples
/// ```
/// use bgg_client::config::validate_thing_id;
///
/// assert_eq!(validate_thing_id("266192").unwrap(), 266192);
/// assert!(validate_thing_id("0").is_err());
/// assert!(validate_thing_id("abc").is_err());
/// ```
pub fn validate_thing_id(id: &str) -> Result<u32> {
    let id = id.trim();
    if !THING_ID_PATTERN.is_match(id) {
        return Err(BggError::InvalidId(id.to_string()));
    }
    id.parse().map_err(|_| BggError::InvalidId(id.to_string()))
}

/// Validate a search query: non-empty after trimming.
pub fn validate_query(query: &str) -> Result<&str> {
    let query = query.trim();
    if query.is_empty() {
        return Err(BggError::InvalidQuery("search query is empty".to_string()));
    }
    Ok(query)
}

/// Validate a BGG username.
pub fn validate_username(username: &str) -> Result<&str> {
    let username = username.trim();
    if USERNAME_PATTERN.is_match(username) {
        Ok(username)
    } else {
        Err(BggError::InvalidQuery(format!("invalid username '{username}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_empty_environment_gives_defaults() {
        let settings = Settings::from_lookup(lookup(&[])).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.rate_limit_delay, Duration::from_secs(2));
        assert_eq!(settings.retry_backoff_factor, Duration::from_millis(500));
    }

    #[test]
    fn test_environment_overrides() {
        let settings = Settings::from_lookup(lookup(&[
            ("BGG_API_BASE_URL", "http://localhost:8080/xmlapi2"),
            ("BGG_CACHE_ENABLED", "false"),
            ("BGG_CACHE_TTL", "60"),
            ("BGG_CACHE_DIR", "/tmp/bgg"),
            ("BGG_MAX_RETRIES", "5"),
            ("BGG_RATE_LIMIT_DELAY", "0.25"),
            ("BGG_LOG_LEVEL", "DEBUG"),
            ("BGG_USERNAME", "alice"),
        ]))
        .unwrap();

        assert_eq!(settings.api_base_url.as_str(), "http://localhost:8080/xmlapi2");
        assert!(!settings.cache_enabled);
        assert_eq!(settings.cache_ttl, Duration::from_secs(60));
        assert_eq!(settings.cache_dir, PathBuf::from("/tmp/bgg"));
        assert_eq!(settings.max_retries, 5);
        assert_eq!(settings.rate_limit_delay, Duration::from_millis(250));
        assert_eq!(settings.log_level, "debug");
        assert_eq!(settings.username.as_deref(), Some("alice"));
    }

    #[test]
    fn test_unparseable_values_fall_back() {
        let settings = Settings::from_lookup(lookup(&[
            ("BGG_MAX_RETRIES", "many"),
            ("BGG_CACHE_TTL", "-5"),
        ]))
        .unwrap();
        assert_eq!(settings.max_retries, DEFAULT_MAX_RETRIES);
        assert_eq!(settings.cache_ttl, Duration::from_secs(DEFAULT_CACHE_TTL_SECS));
    }

    #[test]
    fn test_out_of_range_durations_fall_back() {
        let settings = Settings::from_lookup(lookup(&[
            ("BGG_CACHE_TTL", "1e30"),
            ("BGG_REQUEST_TIMEOUT", "-1"),
            ("BGG_RATE_LIMIT_DELAY", "NaN"),
            ("BGG_RETRY_BACKOFF_FACTOR", "inf"),
        ]))
        .unwrap();
        let defaults = Settings::default();
        assert_eq!(settings.cache_ttl, defaults.cache_ttl);
        assert_eq!(settings.request_timeout, defaults.request_timeout);
        assert_eq!(settings.rate_limit_delay, defaults.rate_limit_delay);
        assert_eq!(settings.retry_backoff_factor, defaults.retry_backoff_factor);
    }

    #[test]
    fn test_invalid_base_url_is_error() {
        let result = Settings::from_lookup(lookup(&[("BGG_API_BASE_URL", "not a url")]));
        assert!(matches!(result, Err(BggError::Config(_))));
    }

    #[test]
    fn test_thing_url_without_stats() {
        let url = Settings::default().thing_url(&[13], false);
        assert_eq!(
            url.as_str(),
            "https://boardgamegeek.com/xmlapi2/thing?id=13&type=boardgame"
        );
    }

    #[test]
    fn test_endpoint_with_trailing_slash_base() {
        let settings = Settings::default()
            .with_api_base_url(Url::parse("http://127.0.0.1:9000/").unwrap());
        assert_eq!(
            settings.search_url("Café International", true).as_str(),
            "http://127.0.0.1:9000/search?query=Caf%C3%A9+International&type=boardgame&exact=1"
        );
    }

    #[test]
    fn test_collection_url() {
        let url = Settings::default().collection_url("alice");
        assert_eq!(
            url.as_str(),
            "https://boardgamegeek.com/xmlapi2/collection?username=alice&subtype=boardgame&stats=1"
        );
    }

    #[test]
    fn test_validate_thing_id() {
        assert_eq!(validate_thing_id(" 174430 ").unwrap(), 174430);
        assert!(validate_thing_id("").is_err());
        assert!(validate_thing_id("-1").is_err());
        assert!(validate_thing_id("01").is_err());
        assert!(validate_thing_id("99999999999").is_err());
    }

    #[test]
    fn test_validate_query_and_username() {
        assert_eq!(validate_query("  wingspan ").unwrap(), "wingspan");
        assert!(validate_query("   ").is_err());
        assert!(validate_username("board_gamer-1").is_ok());
        assert!(validate_username("first last").is_ok());
        assert!(validate_username("bad/name").is_err());
        assert!(validate_username("").is_err());
    }
}
