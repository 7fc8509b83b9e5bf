use super::dns_request::{PtrOrigin, RequestId};
use super::host_name::HostName;
use super::resolver_failure::ResolverFailure;
use std::fmt;
use std::net::SocketAddr;

/// Preference attached to addresses that did not come from an MX record.
pub const NO_PREFERENCE: i32 = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DnsStatus {
    Ok,
    /// Transient failure; the caller may try again later.
    Retry,
    /// Malformed or unsupported query, or a permanent failure.
    Invalid,
    /// The queried name does not exist.
    NoName,
    NotFound,
}

impl DnsStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DnsStatus::Ok => "OK",
            DnsStatus::Retry => "RETRY",
            DnsStatus::Invalid => "INVALID",
            DnsStatus::NoName => "NO_NAME",
            DnsStatus::NotFound => "NOT_FOUND",
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, DnsStatus::Ok)
    }
}

impl fmt::Display for DnsStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DnsResponse {
    /// One discovered address of a HOST or MX request.
    HostAddress {
        id: RequestId,
        address: SocketAddr,
        preference: i32,
    },

    /// End of results of a HOST or MX request.
    HostEnd {
        id: RequestId,
        status: DnsStatus,
        last_error: Option<ResolverFailure>,
    },

    Ptr {
        id: RequestId,
        origin: PtrOrigin,
        status: DnsStatus,
        name: Option<HostName>,
    },

    MxPreference {
        id: RequestId,
        status: DnsStatus,
        preference: Option<u16>,
    },
}

impl DnsResponse {
    pub fn id(&self) -> RequestId {
        match self {
            DnsResponse::HostAddress { id, .. }
            | DnsResponse::HostEnd { id, .. }
            | DnsResponse::Ptr { id, .. }
            | DnsResponse::MxPreference { id, .. } => *id,
        }
    }

    /// Whether this is the last response for its request.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, DnsResponse::HostAddress { .. })
    }
}
