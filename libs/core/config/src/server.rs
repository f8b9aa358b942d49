use crate::{env_or, ConfigError, FromEnv};
use std::net::Ipv4Addr;

/// Listen address for the HTTP server.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// "host:port" form accepted by `TcpListener::bind`.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: Ipv4Addr::UNSPECIFIED.to_string(),
            port: 8080,
        }
    }
}

/// `HOST` defaults to 0.0.0.0 (all interfaces), `PORT` to 8080.
impl FromEnv for ServerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let host = env_or("HOST", &Ipv4Addr::UNSPECIFIED.to_string());
        let port = env_or("PORT", "8080")
            .parse()
            .map_err(|e: std::num::ParseIntError| ConfigError::Invalid {
                key: "PORT".to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self { host, port })
    }
}
