//! Server configuration from the environment.
//!
//! A `.env` file in the working directory is loaded first (if present);
//! real environment variables take precedence over it.

pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/slides.db";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 8;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub max_connections: u32,
    /// Insert the demo slides when the table is empty.
    pub seed_demo: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            seed_demo: true,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                log::warn!("Ignoring unreadable .env file: {e}");
            }
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup. Unparseable values fall back to
    /// the default with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Config::default();

        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.database_url);
        let host = lookup("HOST")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.host);
        let port = parse_or("PORT", lookup("PORT"), defaults.port);
        let max_connections = parse_or(
            "DB_MAX_CONNECTIONS",
            lookup("DB_MAX_CONNECTIONS"),
            defaults.max_connections,
        )
        .max(1);
        let seed_demo = match lookup("SEED_DEMO") {
            Some(v) => parse_bool(&v).unwrap_or_else(|| {
                log::warn!("SEED_DEMO={v:?} is not a boolean, using {}", defaults.seed_demo);
                defaults.seed_demo
            }),
            None => defaults.seed_demo,
        };

        Config {
            database_url,
            host,
            port,
            max_connections,
            seed_demo,
        }
    }

    pub fn bind_addr(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}

fn parse_or<T: std::str::FromStr + std::fmt::Display>(key: &str, value: Option<String>, default: T) -> T {
    match value {
        Some(v) => v.trim().parse().unwrap_or_else(|_| {
            log::warn!("{key}={v:?} is invalid, using {default}");
            default
        }),
        None => default,
    }
}

pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn empty_environment_uses_defaults() {
        assert_eq!(config_from(&[]), Config::default());
    }

    #[test]
    fn reads_all_keys() {
        let cfg = config_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("HOST", "0.0.0.0"),
            ("PORT", "8080"),
            ("DB_MAX_CONNECTIONS", "2"),
            ("SEED_DEMO", "off"),
        ]);
        assert_eq!(cfg.database_url, "sqlite::memory:");
        assert_eq!(cfg.bind_addr(), ("0.0.0.0".to_string(), 8080));
        assert_eq!(cfg.max_connections, 2);
        assert!(!cfg.seed_demo);
    }

    #[test]
    fn invalid_values_fall_back() {
        let cfg = config_from(&[("PORT", "http"), ("DB_MAX_CONNECTIONS", "0"), ("SEED_DEMO", "maybe")]);
        assert_eq!(cfg.port, DEFAULT_PORT);
        assert_eq!(cfg.max_connections, 1);
        assert!(cfg.seed_demo);
    }

    #[test]
    fn parse_bool_variants() {
        assert_eq!(parse_bool(" Yes "), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool(""), None);
    }
}
