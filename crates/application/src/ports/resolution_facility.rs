use async_trait::async_trait;
use futures::future::BoxFuture;
use mta_dns_domain::{DomainError, ResolverFailure};
use std::net::SocketAddr;

/// Completion of a raw protocol query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawAnswer {
    /// The response message as received; empty when none arrived.
    pub data: Vec<u8>,

    /// Resolver-level failure, `None` when the server answered NOERROR with
    /// at least one answer record.
    pub failure: Option<ResolverFailure>,
}

impl RawAnswer {
    pub fn success(data: Vec<u8>) -> Self {
        Self {
            data,
            failure: None,
        }
    }

    pub fn failed(data: Vec<u8>, failure: ResolverFailure) -> Self {
        Self {
            data,
            failure: Some(failure),
        }
    }
}

/// A query that has been issued and completes exactly once.
pub type PendingQuery<'a> = BoxFuture<'a, RawAnswer>;

/// Asynchronous name-resolution facility performing the actual network I/O.
#[async_trait]
pub trait ResolutionFacility: Send + Sync {
    /// Forward lookup. Returned addresses carry port 0.
    async fn lookup_host(&self, host: &str) -> Result<Vec<SocketAddr>, ResolverFailure>;

    /// Reverse lookup of the address part of `address`.
    async fn lookup_ptr(&self, address: SocketAddr) -> Result<String, ResolverFailure>;

    /// Issues a raw query. `Err` means the query could not be started at
    /// all; otherwise the returned future yields the answer.
    fn raw_query(&self, name: &str, class: u16, rtype: u16)
        -> Result<PendingQuery<'_>, DomainError>;
}
