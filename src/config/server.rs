use crate::config::parse_var;
use crate::core::Result;
use std::thread;

/// Server configuration for HTTP server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,
}

fn default_workers() -> usize {
    thread::available_parallelism().map_or(1, |n| n.get())
}

impl ServerConfig {
    pub fn new(host: String, port: u16) -> Self {
        Self {
            host,
            port,
            workers: default_workers(),
        }
    }

    pub fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Self {
            host: lookup("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_var(lookup, "SERVER_PORT", 8000)?,
            workers: parse_var(lookup, "SERVER_WORKERS", default_workers())?,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
