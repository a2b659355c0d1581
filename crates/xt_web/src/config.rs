use std::net::{Ipv4Addr, SocketAddr};
use xt_core::{Error, Result};

pub const DEFAULT_PORT: u16 = 5000;

/// Server settings read once at startup.
#[derive(Clone, Default)]
pub struct ServerConfig {
    pub port: u16,
    pub news_api_key: Option<String>,
    pub gemini_api_key: Option<String>,
    pub gemini_model: Option<String>,
    pub allowed_origins: Vec<String>,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let port = match get("PORT") {
            Some(port) => port
                .parse()
                .map_err(|_| Error::Configuration(format!("Invalid PORT value: {}", port)))?,
            None => DEFAULT_PORT,
        };

        let allowed_origins = get("FRONTEND_URL")
            .map(|urls| {
                urls.split(',')
                    .map(str::trim)
                    .filter(|u| !u.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            port,
            news_api_key: get("NEWS_API_KEY"),
            gemini_api_key: get("GEMINI_API_KEY"),
            gemini_model: get("GEMINI_MODEL"),
            allowed_origins,
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("port", &self.port)
            .field("news_api_key", &self.news_api_key.as_deref().map(|_| "<redacted>"))
            .field("gemini_api_key", &self.gemini_api_key.as_deref().map(|_| "<redacted>"))
            .field("gemini_model", &self.gemini_model)
            .field("allowed_origins", &self.allowed_origins)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<ServerConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert!(config.news_api_key.is_none());
        assert!(config.gemini_api_key.is_none());
        assert!(config.allowed_origins.is_empty());
    }

    #[test]
    fn test_values() {
        let config = config(&[
            ("PORT", "8080"),
            ("NEWS_API_KEY", "news"),
            ("GEMINI_API_KEY", " "),
            ("FRONTEND_URL", "https://a.example.com, https://b.example.com,"),
        ])
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.news_api_key.as_deref(), Some("news"));
        assert!(config.gemini_api_key.is_none());
        assert_eq!(
            config.allowed_origins,
            vec!["https://a.example.com", "https://b.example.com"]
        );
        assert!(!format!("{:?}", config).contains("news\""));
    }

    #[test]
    fn test_invalid_port() {
        assert!(matches!(config(&[("PORT", "http")]), Err(Error::Configuration(_))));
    }
}
