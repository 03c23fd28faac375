use crate::error::ConfigError;
use std::env;
use std::time::Duration;

pub const DEFAULT_GROQ_ENDPOINT: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_GROQ_MODEL: &str = "groq/compound";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    pub groq_api_key: String,
    pub groq_endpoint: String,
    pub groq_model: String,
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let discord_token = lookup("DISCORD_TOKEN")
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing("DISCORD_TOKEN"))?;
        let groq_api_key = lookup("GROQ_API_KEY")
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing("GROQ_API_KEY"))?;

        let groq_endpoint =
            lookup("GROQ_ENDPOINT").unwrap_or_else(|| DEFAULT_GROQ_ENDPOINT.to_string());
        let groq_model = lookup("GROQ_MODEL").unwrap_or_else(|| DEFAULT_GROQ_MODEL.to_string());

        let timeout_secs = match lookup("REQUEST_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "REQUEST_TIMEOUT_SECS",
                value: raw,
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            discord_token,
            groq_api_key,
            groq_endpoint,
            groq_model,
            request_timeout: Duration::from_secs(timeout_secs),
        })
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
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_applied() {
        let config =
            Config::from_lookup(lookup_from(&[("DISCORD_TOKEN", "d"), ("GROQ_API_KEY", "g")]))
                .unwrap();
        assert_eq!(config.groq_endpoint, DEFAULT_GROQ_ENDPOINT);
        assert_eq!(config.groq_model, DEFAULT_GROQ_MODEL);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_missing_credentials() {
        let err = Config::from_lookup(lookup_from(&[("DISCORD_TOKEN", "d")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("GROQ_API_KEY")));

        let err = Config::from_lookup(lookup_from(&[("GROQ_API_KEY", "g")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("DISCORD_TOKEN")));
    }

    #[test]
    fn test_bad_timeout() {
        let err = Config::from_lookup(lookup_from(&[
            ("DISCORD_TOKEN", "d"),
            ("GROQ_API_KEY", "g"),
            ("REQUEST_TIMEOUT_SECS", "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }
}
