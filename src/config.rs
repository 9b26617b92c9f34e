use std::env;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

use crate::distance::Thresholds;
use crate::matching::MatchPolicy;
use crate::offset::{COMPLEX_MODULUS, SIMPLE_MODULUS};
use crate::token::{MAX_TOKEN_SIZE, MIN_TOKEN_SIZE, TokenMode, validate_token_size};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Runtime settings, read from the environment (and `.env` via dotenvy).
#[derive(Debug, Clone, Serialize)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub token_size: usize,
    pub token_mode: TokenMode,
    pub policy: MatchPolicy,
    pub max_matches: usize,
    pub min_matches: usize,
    pub simple_thresholds: Thresholds,
    pub complex_thresholds: Thresholds,
    pub simple_modulus: u64,
    pub complex_modulus: u64,
    pub pending_ttl_secs: i64,
    pub min_token_size: usize,
    pub max_token_size: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            token_size: 4,
            token_mode: TokenMode::SlidingWindow,
            policy: MatchPolicy::Set,
            max_matches: 10,
            min_matches: 1,
            simple_thresholds: Thresholds::SIMPLE,
            complex_thresholds: Thresholds::COMPLEX,
            simple_modulus: SIMPLE_MODULUS,
            complex_modulus: COMPLEX_MODULUS,
            pending_ttl_secs: 900,
            min_token_size: MIN_TOKEN_SIZE,
            max_token_size: MAX_TOKEN_SIZE,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from any key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let d = Settings::default();
        let settings = Self {
            host: lookup("HOST").unwrap_or_else(|| d.host.clone()),
            port: parse_or(&lookup, "PORT", d.port)?,
            token_size: parse_or(&lookup, "TOKEN_SIZE", d.token_size)?,
            token_mode: parse_or(&lookup, "TOKEN_MODE", d.token_mode)?,
            policy: parse_or(&lookup, "MATCH_POLICY", d.policy)?,
            max_matches: parse_or(&lookup, "MAX_MATCHES", d.max_matches)?,
            min_matches: parse_or(&lookup, "MIN_MATCHES", d.min_matches)?,
            simple_thresholds: parse_or(&lookup, "SIMPLE_THRESHOLDS", d.simple_thresholds)?,
            complex_thresholds: parse_or(&lookup, "COMPLEX_THRESHOLDS", d.complex_thresholds)?,
            simple_modulus: parse_or(&lookup, "SIMPLE_MODULUS", d.simple_modulus)?,
            complex_modulus: parse_or(&lookup, "COMPLEX_MODULUS", d.complex_modulus)?,
            pending_ttl_secs: parse_or(&lookup, "PENDING_TTL_SECS", d.pending_ttl_secs)?,
            ..d
        };
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        validate_token_size(self.token_size).map_err(|e| ConfigError::Invalid {
            key: "TOKEN_SIZE",
            reason: e.to_string(),
        })?;
        if self.max_matches == 0 {
            return Err(invalid("MAX_MATCHES", "must be > 0"));
        }
        if self.min_matches > self.max_matches {
            return Err(invalid("MIN_MATCHES", "must not exceed MAX_MATCHES"));
        }
        if self.simple_modulus == 0 {
            return Err(invalid("SIMPLE_MODULUS", "must be > 0"));
        }
        if self.complex_modulus == 0 {
            return Err(invalid("COMPLEX_MODULUS", "must be > 0"));
        }
        if self.pending_ttl_secs <= 0 {
            return Err(invalid("PENDING_TTL_SECS", "must be > 0"));
        }
        Ok(())
    }
}

fn invalid(key: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        key,
        reason: reason.to_string(),
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => {
            raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
                key,
                reason: e.to_string(),
            })
        }
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_pairs(pairs: &[(&str, &str)]) -> Result<Settings, ConfigError> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let s = from_pairs(&[]).unwrap();
        assert_eq!(s.port, 8080);
        assert_eq!(s.token_size, 4);
        assert_eq!(s.simple_thresholds, Thresholds::SIMPLE);
        assert_eq!(s.complex_modulus, 256);
    }

    #[test]
    fn overrides_are_parsed() {
        let s = from_pairs(&[
            ("PORT", "9000"),
            ("TOKEN_SIZE", "6"),
            ("TOKEN_MODE", "chunked"),
            ("MATCH_POLICY", "positional"),
            ("SIMPLE_THRESHOLDS", "2,10,256"),
        ])
        .unwrap();
        assert_eq!(s.port, 9000);
        assert_eq!(s.token_size, 6);
        assert_eq!(s.token_mode, TokenMode::Chunked);
        assert_eq!(s.policy, MatchPolicy::Positional { strict: false });
        assert_eq!(s.simple_thresholds.as_array(), [2, 10, 256]);
    }

    #[test]
    fn bad_values_fail_with_the_key_name() {
        let err = from_pairs(&[("TOKEN_SIZE", "2")]).unwrap_err();
        assert!(err.to_string().contains("TOKEN_SIZE"));

        let err = from_pairs(&[("COMPLEX_THRESHOLDS", "9,8,7")]).unwrap_err();
        assert!(err.to_string().contains("COMPLEX_THRESHOLDS"));

        assert!(from_pairs(&[("PORT", "http")]).is_err());
        assert!(from_pairs(&[("MIN_MATCHES", "20")]).is_err());
        assert!(from_pairs(&[("COMPLEX_MODULUS", "0")]).is_err());
    }
}
