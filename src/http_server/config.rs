//! HTTP Server Configuration
//!
//! Host, port, and CORS settings for the sandbox API server. Read from
//! the environment like the rest of the configuration, with serde
//! defaults so the struct also deserializes cleanly.

use serde::{Deserialize, Serialize};

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpServerConfig {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 8080)
    #[serde(default = "default_port")]
    pub port: u16,

    /// CORS allowed origins; empty means permissive (development)
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

impl HttpServerConfig {
    /// Reads `HTTP_HOST`, `HTTP_PORT` and `CORS_ORIGINS` (comma-separated)
    /// from the process environment, defaulting where unset
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration from an arbitrary lookup function
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let host = lookup("HTTP_HOST").unwrap_or_else(default_host);
        let port = lookup("HTTP_PORT")
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_else(default_port);
        let cors_origins = lookup("CORS_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();
        Self {
            host,
            port,
            cors_origins,
        }
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HttpServerConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert!(config.cors_origins.is_empty());
    }

    #[test]
    fn test_socket_addr() {
        let config = HttpServerConfig {
            port: 9000,
            ..Default::default()
        };
        assert_eq!(config.socket_addr(), "0.0.0.0:9000");
    }

    #[test]
    fn test_from_lookup() {
        let config = HttpServerConfig::from_lookup(|key| match key {
            "HTTP_HOST" => Some("127.0.0.1".to_string()),
            "HTTP_PORT" => Some("3000".to_string()),
            "CORS_ORIGINS" => Some("http://localhost:5173, http://localhost:3000".to_string()),
            _ => None,
        });
        assert_eq!(config.socket_addr(), "127.0.0.1:3000");
        assert_eq!(config.cors_origins.len(), 2);
    }

    #[test]
    fn test_unparseable_port_falls_back_to_default() {
        let config = HttpServerConfig::from_lookup(|key| match key {
            "HTTP_PORT" => Some("eighty".to_string()),
            _ => None,
        });
        assert_eq!(config.port, 8080);
    }
}
