use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Unsupported query class: {0}")]
    UnsupportedQueryClass(u16),

    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Transport timeout connecting to {server}")]
    TransportTimeout { server: String },

    #[error("All upstream servers are unreachable")]
    TransportAllServersUnreachable,

    #[error("Configuration error: {0}")]
    ConfigError(String),
}
