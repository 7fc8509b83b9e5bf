//! MTA DNS Domain Layer
pub mod config;
pub mod dns_request;
pub mod dns_response;
pub mod errors;
pub mod host_name;
pub mod resolver_failure;
pub mod wire;

pub use config::{Config, ConfigError, LoggingConfig, ResolverConfig};
pub use dns_request::{DnsRequest, DnsRequestKind, PtrOrigin, RequestId, RequestType};
pub use dns_response::{DnsResponse, DnsStatus, NO_PREFERENCE};
pub use errors::DomainError;
pub use host_name::{HostName, HOST_NAME_MAX};
pub use resolver_failure::ResolverFailure;
