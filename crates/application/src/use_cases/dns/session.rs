use mta_dns_domain::{
    DnsResponse, DnsStatus, HostName, RequestId, RequestType, ResolverFailure,
};
use std::net::SocketAddr;

/// State of one inbound request while its lookups are in flight.
///
/// A session is owned by the future handling its request. Sub-lookups are
/// accounted with [`Session::begin_lookup`] before they are issued and
/// [`Session::complete_lookup`] as each completes; [`Session::finish`]
/// consumes the session once the count is back to zero.
#[derive(Debug)]
pub(crate) struct Session {
    id: RequestId,
    request_type: RequestType,
    name: HostName,
    found: usize,
    last_error: Option<ResolverFailure>,
    outstanding: usize,
}

impl Session {
    pub fn new(id: RequestId, request_type: RequestType, name: &str) -> Self {
        Self {
            id,
            request_type,
            name: HostName::new(name),
            found: 0,
            last_error: None,
            outstanding: 0,
        }
    }

    pub fn id(&self) -> RequestId {
        self.id
    }

    pub fn request_type(&self) -> RequestType {
        self.request_type
    }

    pub fn name(&self) -> &HostName {
        &self.name
    }

    pub fn outstanding(&self) -> usize {
        self.outstanding
    }

    pub fn begin_lookup(&mut self) {
        self.outstanding += 1;
    }

    /// Folds one completed host lookup into the session and returns the
    /// address responses it produced.
    pub fn complete_lookup(&mut self, lookup: HostLookup) -> Vec<DnsResponse> {
        debug_assert!(self.outstanding > 0, "lookup completed without begin");
        self.outstanding = self.outstanding.saturating_sub(1);

        match lookup.result {
            Ok(addresses) => {
                self.found += addresses.len();
                addresses
                    .into_iter()
                    .map(|address| DnsResponse::HostAddress {
                        id: self.id,
                        address,
                        preference: lookup.preference,
                    })
                    .collect()
            }
            Err(failure) => {
                self.last_error = Some(failure);
                Vec::new()
            }
        }
    }

    /// Terminal end-of-results response. Consumes the session.
    pub fn finish(self) -> DnsResponse {
        debug_assert_eq!(self.outstanding, 0, "session finished with lookups in flight");

        if self.found > 0 {
            DnsResponse::HostEnd {
                id: self.id,
                status: DnsStatus::Ok,
                last_error: None,
            }
        } else {
            DnsResponse::HostEnd {
                id: self.id,
                status: DnsStatus::NotFound,
                last_error: self.last_error,
            }
        }
    }
}

/// Completed host-address lookup spawned on behalf of a session.
#[derive(Debug)]
pub(crate) struct HostLookup {
    pub preference: i32,
    pub result: Result<Vec<SocketAddr>, ResolverFailure>,
}
