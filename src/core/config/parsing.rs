use std::env;
use std::str::FromStr;

use jsonwebtoken::Algorithm;

use super::types::{BindAddress, ConfigError, Environment};

const DEV_ORIGINS: [&str; 3] = ["http://localhost:5173", "http://localhost:3000", "http://localhost:8080"];

/// Reads `key`, treating unset and whitespace-only values alike.
pub(super) fn var(key: &str) -> Option<String> {
    let value = env::var(key).ok()?;
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

pub(super) fn var_or(key: &str, default: &str) -> String {
    var(key).unwrap_or_else(|| default.to_string())
}

pub(super) fn flag(key: &str) -> bool {
    var(key).is_some_and(|value| is_truthy(&value))
}

/// Parses `key` into any `FromStr` number, falling back to `default` when unset.
pub(super) fn number<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match var(key) {
        Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue { field: key, value: raw }),
        None => Ok(default),
    }
}

pub(super) fn bind_address(host: String, port: String) -> Result<BindAddress, ConfigError> {
    match port.parse::<u16>() {
        Ok(parsed) if parsed != 0 && !host.trim().is_empty() => Ok(BindAddress { host, port: parsed }),
        _ => Err(ConfigError::InvalidBind { host, port }),
    }
}

/// Accepts a JSON array or a comma-separated list. Trailing slashes are dropped so
/// `http://a/` matches the `Origin` header browsers send.
pub(super) fn cors_origins(raw: Option<String>) -> Result<Vec<String>, ConfigError> {
    let listed: Vec<String> = match raw {
        Some(raw) if raw.starts_with('[') => {
            serde_json::from_str(&raw).map_err(|_| ConfigError::InvalidCors(raw))?
        }
        Some(raw) => raw.split(',').map(str::to_string).collect(),
        None => Vec::new(),
    };

    let origins: Vec<String> = listed
        .iter()
        .map(|origin| origin.trim().trim_end_matches('/'))
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect();

    if origins.is_empty() {
        return Ok(DEV_ORIGINS.iter().map(|origin| origin.to_string()).collect());
    }
    Ok(origins)
}

pub(super) fn jwt_algorithm(name: &str) -> Result<Algorithm, ConfigError> {
    match name.to_ascii_uppercase().as_str() {
        "HS256" => Ok(Algorithm::HS256),
        "HS384" => Ok(Algorithm::HS384),
        "HS512" => Ok(Algorithm::HS512),
        _ => Err(ConfigError::UnsupportedAlgorithm(name.to_string())),
    }
}

pub(super) fn is_truthy(value: &str) -> bool {
    matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

pub(super) fn environment(raw: Option<String>) -> Environment {
    let Some(raw) = raw else {
        return Environment::Development;
    };

    match raw.to_ascii_lowercase().as_str() {
        "production" | "prod" => Environment::Production,
        "staging" => Environment::Staging,
        "test" | "testing" => Environment::Test,
        _ => Environment::Development,
    }
}
