//! Configuration from the environment (after `.env` is loaded).

use std::env;
use std::sync::Arc;
use std::time::Duration;

use crate::core::viz::{Json5Evaluator, LiteralEvaluator, MountSettings, StrictJsonEvaluator};

const DEFAULT_CHART_LIB_URL: &str = "https://cdn.plot.ly/plotly-2.27.0.min.js";

/// How non-JSON chart literals are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralPolicy {
    /// Accept JavaScript object-literal syntax (JSON5).
    Json5,
    /// JSON only; anything else is shown as a chart error.
    Strict,
}

impl LiteralPolicy {
    pub fn evaluator(self) -> Arc<dyn LiteralEvaluator> {
        match self {
            LiteralPolicy::Json5 => Arc::new(Json5Evaluator),
            LiteralPolicy::Strict => Arc::new(StrictJsonEvaluator),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub mount: MountSettings,
    pub literal_policy: LiteralPolicy,
    /// Script URL of the charting library, used in generated pages.
    pub chart_lib_url: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} must be a whole number of milliseconds, got {value:?}")]
    InvalidDuration { key: &'static str, value: String },
    #[error("ANSWER_RENDER_POLL_INTERVAL_MS must be greater than zero")]
    ZeroPollInterval,
    #[error("ANSWER_RENDER_LITERAL_POLICY must be \"json5\" or \"strict\", got {0:?}")]
    InvalidLiteralPolicy(String),
}

/// Load configuration from the process environment.
pub fn load() -> Result<Config, ConfigError> {
    from_lookup(|key| env::var(key).ok())
}

/// Build a configuration from an arbitrary key lookup. Empty values count as unset.
pub fn from_lookup<F>(lookup: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
    let millis = |key: &'static str, default: Duration| -> Result<Duration, ConfigError> {
        match get(key) {
            None => Ok(default),
            Some(value) => value
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|_| ConfigError::InvalidDuration { key, value }),
        }
    };

    let defaults = MountSettings::default();
    let mount = MountSettings {
        runtime_timeout: millis("ANSWER_RENDER_CHART_TIMEOUT_MS", defaults.runtime_timeout)?,
        poll_interval: millis("ANSWER_RENDER_POLL_INTERVAL_MS", defaults.poll_interval)?,
        mount_delay: millis("ANSWER_RENDER_MOUNT_DELAY_MS", defaults.mount_delay)?,
        default_height: get("ANSWER_RENDER_CHART_HEIGHT").unwrap_or(defaults.default_height),
        default_width: defaults.default_width,
    };
    if mount.poll_interval.is_zero() {
        return Err(ConfigError::ZeroPollInterval);
    }

    let literal_policy = match get("ANSWER_RENDER_LITERAL_POLICY") {
        None => LiteralPolicy::Json5,
        Some(v) if v.eq_ignore_ascii_case("json5") => LiteralPolicy::Json5,
        Some(v) if v.eq_ignore_ascii_case("strict") => LiteralPolicy::Strict,
        Some(v) => return Err(ConfigError::InvalidLiteralPolicy(v)),
    };

    let chart_lib_url =
        get("ANSWER_RENDER_CHART_LIB_URL").unwrap_or_else(|| DEFAULT_CHART_LIB_URL.to_string());

    Ok(Config {
        mount,
        literal_policy,
        chart_lib_url,
    })
}
