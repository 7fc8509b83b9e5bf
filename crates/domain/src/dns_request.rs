use std::fmt;
use std::net::SocketAddr;

/// Opaque token pairing responses with the request that caused them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// Which pipeline asked for a reverse lookup; echoed back in the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PtrOrigin {
    Mta,
    Smtp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestType {
    Host,
    Ptr,
    Mx,
    MxPreference,
}

impl RequestType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestType::Host => "HOST",
            RequestType::Ptr => "PTR",
            RequestType::Mx => "MX",
            RequestType::MxPreference => "MX_PREFERENCE",
        }
    }
}

impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DnsRequestKind {
    Host { host: String },
    Ptr { address: SocketAddr, origin: PtrOrigin },
    Mx { domain: String },
    MxPreference { domain: String, exchange: String },
}

impl DnsRequestKind {
    pub fn request_type(&self) -> RequestType {
        match self {
            DnsRequestKind::Host { .. } => RequestType::Host,
            DnsRequestKind::Ptr { .. } => RequestType::Ptr,
            DnsRequestKind::Mx { .. } => RequestType::Mx,
            DnsRequestKind::MxPreference { .. } => RequestType::MxPreference,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsRequest {
    pub id: RequestId,
    pub kind: DnsRequestKind,
}

impl DnsRequest {
    pub fn host(id: u64, host: impl Into<String>) -> Self {
        Self {
            id: RequestId(id),
            kind: DnsRequestKind::Host { host: host.into() },
        }
    }

    pub fn ptr(id: u64, address: SocketAddr, origin: PtrOrigin) -> Self {
        Self {
            id: RequestId(id),
            kind: DnsRequestKind::Ptr { address, origin },
        }
    }

    pub fn mx(id: u64, domain: impl Into<String>) -> Self {
        Self {
            id: RequestId(id),
            kind: DnsRequestKind::Mx {
                domain: domain.into(),
            },
        }
    }

    pub fn mx_preference(id: u64, domain: impl Into<String>, exchange: impl Into<String>) -> Self {
        Self {
            id: RequestId(id),
            kind: DnsRequestKind::MxPreference {
                domain: domain.into(),
                exchange: exchange.into(),
            },
        }
    }

    pub fn request_type(&self) -> RequestType {
        self.kind.request_type()
    }
}
