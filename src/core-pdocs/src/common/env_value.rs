use std::time::Duration;

use crate::errors::{DocsError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Seconds,
    Milliseconds,
}

/// Reads an environment variable as trimmed text. Unset and blank are both `None`.
pub fn env_string(env_var_name: &str) -> Option<String> {
    std::env::var(env_var_name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Retrieves the value of the environment variable as a duration, or `default` when unset.
pub fn env_duration(units: TimeUnit, env_var_name: &str, default: u64) -> Result<Duration> {
    let amount = match env_string(env_var_name) {
        Some(v) => v
            .parse::<u64>()
            .map_err(|e| DocsError::Config(format!("{env_var_name} must be a whole number ({e}): '{v}'")))?,
        None => default,
    };

    let duration = match units {
        TimeUnit::Seconds => Duration::from_secs(amount),
        TimeUnit::Milliseconds => Duration::from_millis(amount),
    };
    Ok(duration)
}

/// Retrieves the value of the environment variable as a strictly positive count.
pub fn env_positive(env_var_name: &str, default: usize) -> Result<usize> {
    let value = match env_string(env_var_name) {
        Some(v) => v
            .parse::<usize>()
            .map_err(|e| DocsError::Config(format!("{env_var_name} must be a whole number ({e}): '{v}'")))?,
        None => default,
    };
    if value == 0 {
        return Err(DocsError::Config(format!("{env_var_name} must be a positive number")));
    }
    Ok(value)
}

/// Comma separated list; empty items are dropped. Falls back to `default` when unset.
pub fn env_list(env_var_name: &str, default: &[&str]) -> Vec<String> {
    match env_string(env_var_name) {
        Some(v) => v
            .split(',')
            .map(|item| item.trim().to_string())
            .filter(|item| !item.is_empty())
            .collect(),
        None => default.iter().map(|item| item.to_string()).collect(),
    }
}
