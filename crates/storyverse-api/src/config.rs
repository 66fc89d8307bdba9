//! Environment configuration, read once at startup.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use storyverse_catalog::DEFAULT_TTL;
use storyverse_catalog::file_store::DEFAULT_CATALOG_FILE;
use storyverse_core::catalog::Medium;
use storyverse_orchestration::ActionPolicy;
use storyverse_resolution::ResolutionOptions;

use crate::error::AppError;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Primary catalog backend. `None` disables it.
    pub database_url: Option<String>,
    /// Secondary, file-backed catalog store.
    pub catalog_file: PathBuf,
    pub catalog_ttl: Duration,
    pub resolution: ResolutionOptions,
    pub policy: ActionPolicy,
}

impl AppConfig {
    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a numeric variable does not parse.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, which returns the value of
    /// a variable if set.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a numeric variable does not parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".to_owned());
        let port: u16 = parse_or(var("PORT"), "PORT", 3000)?;
        let catalog_file =
            var("CATALOG_FILE").map_or_else(|| PathBuf::from(DEFAULT_CATALOG_FILE), PathBuf::from);
        let catalog_ttl = Duration::from_secs(parse_or(
            var("CATALOG_TTL_SECS"),
            "CATALOG_TTL_SECS",
            DEFAULT_TTL.as_secs(),
        )?);

        let defaults = ActionPolicy::default();
        let policy = ActionPolicy::new(
            Duration::from_millis(parse_or(
                var("ACTION_TIMEOUT_MS"),
                "ACTION_TIMEOUT_MS",
                millis(defaults.timeout),
            )?),
            parse_or(
                var("ACTION_MAX_ATTEMPTS"),
                "ACTION_MAX_ATTEMPTS",
                defaults.max_attempts,
            )?,
            Duration::from_millis(parse_or(
                var("ACTION_RETRY_BASE_DELAY_MS"),
                "ACTION_RETRY_BASE_DELAY_MS",
                millis(defaults.retry_base_delay),
            )?),
        );

        Ok(Self {
            host,
            port,
            database_url: var("DATABASE_URL"),
            catalog_file,
            catalog_ttl,
            resolution: resolution_options(
                var("QUERY_PREFERRED_MEDIA").as_deref(),
                var("QUERY_AMBIGUITY_MARGIN").as_deref(),
            ),
            policy,
        })
    }

    /// The socket address to bind.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `host:port` is not a socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))
    }
}

/// Builds resolution options from the raw preference variables. Unknown
/// media and out-of-range or unparsable margins are ignored.
fn resolution_options(preferred_media: Option<&str>, margin: Option<&str>) -> ResolutionOptions {
    let order: Vec<Medium> = preferred_media
        .unwrap_or_default()
        .split(',')
        .filter_map(Medium::parse)
        .collect();
    let options = ResolutionOptions::default().with_preferred_medium_order(order);
    match margin.and_then(|raw| raw.trim().parse::<u32>().ok()) {
        Some(margin) => options.with_ambiguity_margin(margin),
        None => options,
    }
}

fn parse_or<T>(raw: Option<String>, key: &str, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::Config(format!("{key} must be a valid number: {e}"))),
        None => Ok(default),
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
