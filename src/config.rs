use std::net::{AddrParseError, SocketAddr};

use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn address(&self) -> Result<SocketAddr, AddrParseError> {
        format!("{}:{}", self.host, self.port).parse::<SocketAddr>()
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
}

impl Config {
    /// Reads `SERVER__HOST` / `SERVER__PORT`; `FASTAPIPORT` still wins for the port.
    pub fn from_env() -> Result<Self, ::config::ConfigError> {
        ::config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .add_source(
                ::config::Environment::default()
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("server.port", std::env::var("FASTAPIPORT").ok())?
            .build()?
            .try_deserialize()
    }
}
