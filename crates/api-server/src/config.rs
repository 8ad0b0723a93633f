use anyhow::{Context, Result};

/// Transport settings, read from the environment (and `.env`).
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Single allowed browser origin
    pub cors_origin: String,
    pub body_limit_bytes: usize,
    /// Emit logs as JSON lines (`RUST_LOG_FORMAT=json`)
    pub json_logging: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            cors_origin: "http://localhost:3000".to_string(),
            body_limit_bytes: 10 * 1024 * 1024,
            json_logging: false,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(v) => v.parse().with_context(|| format!("PORT must be a number, got '{v}'"))?,
            None => defaults.port,
        };
        let body_limit_bytes = match lookup("BODY_LIMIT_BYTES") {
            Some(v) => v
                .parse()
                .with_context(|| format!("BODY_LIMIT_BYTES must be a number, got '{v}'"))?,
            None => defaults.body_limit_bytes,
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port,
            cors_origin: lookup("CORS_ORIGIN").unwrap_or(defaults.cors_origin),
            body_limit_bytes,
            json_logging: lookup("RUST_LOG_FORMAT")
                .map(|v| v.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
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
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = ServerConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.bind_address(), "0.0.0.0:5000");
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("PORT", "8080"),
            ("HOST", "127.0.0.1"),
            ("CORS_ORIGIN", "https://app.example.com"),
            ("RUST_LOG_FORMAT", "JSON"),
        ]))
        .unwrap();

        assert_eq!(config.bind_address(), "127.0.0.1:8080");
        assert_eq!(config.cors_origin, "https://app.example.com");
        assert!(config.json_logging);
    }

    #[test]
    fn test_bad_port_is_an_error() {
        let err = ServerConfig::from_lookup(lookup_from(&[("PORT", "http")])).unwrap_err();
        assert!(err.to_string().contains("PORT must be a number"));
    }
}
