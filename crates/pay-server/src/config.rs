//! Server Configuration

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_PORT: u16 = 5001;
const DEFAULT_STATIC_DIR: &str = "static";

/// Invalid server settings
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid PORT value: {0}")]
    Port(String),

    #[error("Invalid HOST value: {0}")]
    Host(String),
}

/// Settings read once at startup
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,

    /// Directory served for paths no route matches (built frontend)
    pub static_dir: PathBuf,
}

impl ServerConfig {
    /// Read `HOST`, `PORT` and `STATIC_DIR` from the environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read settings through an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let value = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let host: IpAddr = match value("HOST") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Host(raw))?,
            None => DEFAULT_HOST,
        };

        let port: u16 = match value("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Port(raw))?,
            None => DEFAULT_PORT,
        };

        let static_dir =
            value("STATIC_DIR").map_or_else(|| DEFAULT_STATIC_DIR.into(), PathBuf::from);

        Ok(Self {
            host,
            port,
            static_dir,
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.bind_addr().to_string(), "0.0.0.0:5001");
        assert_eq!(config.static_dir, PathBuf::from("static"));
    }

    #[test]
    fn test_port_from_env() {
        let vars = lookup(&[("PORT", "8080"), ("HOST", "127.0.0.1")]);
        let config = ServerConfig::from_lookup(vars).unwrap();
        assert_eq!(config.bind_addr().to_string(), "127.0.0.1:8080");
    }

    #[test]
    fn test_invalid_port() {
        let err = ServerConfig::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
        assert_eq!(err, ConfigError::Port("eighty".into()));
    }
}
