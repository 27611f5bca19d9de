//! Configuration loading and representation.
//!
//! Values come from environment variables; anything unset falls back to a
//! default. `from_lookup` takes the variable source as a closure so tests can
//! feed values without touching the process environment.

use thiserror::Error;
use tracing::debug;

pub const ARGON2_MEMORY_KIB_VAR: &str = "WARDEN_ARGON2_MEMORY_KIB";
pub const ARGON2_ITERATIONS_VAR: &str = "WARDEN_ARGON2_ITERATIONS";
pub const ARGON2_PARALLELISM_VAR: &str = "WARDEN_ARGON2_PARALLELISM";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {var}: '{value}' ({reason})")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },

    #[error("invalid hasher parameters: {0}")]
    Hasher(String),
}

/// Argon2id cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HasherConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for HasherConfig {
    /// OWASP-recommended Argon2id baseline (19 MiB, 2 passes, 1 lane).
    fn default() -> Self {
        Self {
            memory_kib: 19 * 1024,
            iterations: 2,
            parallelism: 1,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WardenConfig {
    pub hasher: HasherConfig,
}

impl WardenConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = HasherConfig::default();

        let hasher = HasherConfig {
            memory_kib: parse_u32(&lookup, ARGON2_MEMORY_KIB_VAR, defaults.memory_kib)?,
            iterations: parse_u32(&lookup, ARGON2_ITERATIONS_VAR, defaults.iterations)?,
            parallelism: parse_u32(&lookup, ARGON2_PARALLELISM_VAR, defaults.parallelism)?,
        };

        debug!(
            memory_kib = hasher.memory_kib,
            iterations = hasher.iterations,
            parallelism = hasher.parallelism,
            "hasher configuration resolved"
        );

        Ok(Self { hasher })
    }
}

fn parse_u32<F>(lookup: &F, var: &'static str, default: u32) -> Result<u32, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        None => Ok(default),
        Some(raw) => raw.trim().parse::<u32>().map_err(|e| ConfigError::Invalid {
            var,
            value: raw.clone(),
            reason: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn unset_variables_use_defaults() {
        let config = WardenConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, WardenConfig::default());
        assert_eq!(config.hasher.memory_kib, 19456);
    }

    #[test]
    fn variables_override_defaults() {
        let config = WardenConfig::from_lookup(lookup_from(&[
            (ARGON2_MEMORY_KIB_VAR, "4096"),
            (ARGON2_ITERATIONS_VAR, " 3 "),
        ]))
        .unwrap();

        assert_eq!(config.hasher.memory_kib, 4096);
        assert_eq!(config.hasher.iterations, 3);
        assert_eq!(config.hasher.parallelism, 1);
    }

    #[test]
    fn garbage_is_reported_with_the_variable_name() {
        let err = WardenConfig::from_lookup(lookup_from(&[(ARGON2_PARALLELISM_VAR, "many")]))
            .unwrap_err();

        match err {
            ConfigError::Invalid { var, value, .. } => {
                assert_eq!(var, ARGON2_PARALLELISM_VAR);
                assert_eq!(value, "many");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
