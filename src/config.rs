use std::time::Duration;

use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// TMDB API key. Catalog calls fail with `MissingCredential` when unset.
    #[serde(default)]
    pub tmdb_api_key: Option<String>,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Redis connection URL. Catalog caching is disabled when unset.
    #[serde(default)]
    pub redis_url: Option<String>,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Seconds a search or playback session may go untouched before it is evicted
    #[serde(default = "default_session_idle_secs")]
    pub session_idle_secs: u64,
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_session_idle_secs() -> u64 {
    30 * 60
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Load configuration from an explicit set of variables
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config = envy::from_iter::<_, Config>(vars)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

        // An empty key is as good as no key
        Ok(Config {
            tmdb_api_key: config.tmdb_api_key.filter(|k| !k.trim().is_empty()),
            ..config
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn session_idle_timeout(&self) -> Duration {
        Duration::from_secs(self.session_idle_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_vars(vars(&[])).unwrap();
        assert_eq!(config.tmdb_api_key, None);
        assert_eq!(config.tmdb_api_url, "https://api.themoviedb.org/3");
        assert_eq!(config.redis_url, None);
        assert_eq!(config.bind_address(), "127.0.0.1:3000");
        assert_eq!(config.session_idle_timeout(), Duration::from_secs(1800));
    }

    #[test]
    fn test_reads_credential_and_overrides() {
        let config = Config::from_vars(vars(&[
            ("TMDB_API_KEY", "abc123"),
            ("REDIS_URL", "redis://cache:6379"),
            ("PORT", "8080"),
            ("SESSION_IDLE_SECS", "90"),
        ]))
        .unwrap();

        assert_eq!(config.tmdb_api_key.as_deref(), Some("abc123"));
        assert_eq!(config.redis_url.as_deref(), Some("redis://cache:6379"));
        assert_eq!(config.port, 8080);
        assert_eq!(config.session_idle_timeout(), Duration::from_secs(90));
    }

    #[test]
    fn test_blank_credential_is_missing() {
        let config = Config::from_vars(vars(&[("TMDB_API_KEY", "   ")])).unwrap();
        assert_eq!(config.tmdb_api_key, None);
    }

    #[test]
    fn test_invalid_port_fails() {
        assert!(Config::from_vars(vars(&[("PORT", "not-a-port")])).is_err());
    }
}
