//! Server configuration loaded from environment variables.

use std::env;

/// Listener settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`)
    pub host: String,
    /// Port (default: `8080`)
    pub port: u16,
}

impl ServerConfig {
    /// Read `WEBOFFICE_HOST` and `WEBOFFICE_PORT`.
    ///
    /// An unparsable port falls back to the default.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            host: env::var("WEBOFFICE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("WEBOFFICE_PORT")
                .ok()
                .and_then(|port| port.parse().ok())
                .unwrap_or(8080),
        }
    }

    /// `host:port`
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address() {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 9000,
        };
        assert_eq!(config.address(), "127.0.0.1:9000");
    }
}
