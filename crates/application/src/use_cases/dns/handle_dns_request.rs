use super::session::{HostLookup, Session};
use crate::ports::{RawAnswer, ResolutionFacility, ResponseSink};
use crate::services::{parse_literal, strip_brackets, ErrorMapper};
use futures::stream::{FuturesUnordered, StreamExt};
use mta_dns_domain::wire::{Message, CLASS_IN, TYPE_MX};
use mta_dns_domain::{
    DnsRequest, DnsRequestKind, DnsResponse, DnsStatus, HostName, PtrOrigin, RequestId,
    RequestType, ResolverFailure, NO_PREFERENCE,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{debug, warn};

/// Preference attached to the lookup of the queried name itself when a
/// domain publishes no usable MX records.
const FALLBACK_PREFERENCE: i32 = 0;

/// Runs one inbound request to completion, emitting every response for it
/// on the sink. Exactly one terminal response is sent per request.
pub struct HandleDnsRequestUseCase {
    facility: Arc<dyn ResolutionFacility>,
    sink: Arc<dyn ResponseSink>,
}

impl HandleDnsRequestUseCase {
    pub fn new(facility: Arc<dyn ResolutionFacility>, sink: Arc<dyn ResponseSink>) -> Self {
        Self { facility, sink }
    }

    pub async fn execute(&self, request: DnsRequest) {
        let DnsRequest { id, kind } = request;
        debug!(id = %id, kind = %kind.request_type(), "Handling DNS request");

        match kind {
            DnsRequestKind::Host { host } => self.resolve_host(id, &host).await,
            DnsRequestKind::Ptr { address, origin } => {
                self.resolve_ptr(id, address, origin).await
            }
            DnsRequestKind::Mx { domain } => self.resolve_mx(id, &domain).await,
            DnsRequestKind::MxPreference { domain, exchange } => {
                self.resolve_mx_preference(id, &domain, &exchange).await
            }
        }
    }

    async fn resolve_host(&self, id: RequestId, host: &str) {
        let session = Session::new(id, RequestType::Host, host);
        let lookups = vec![(session.name().to_string(), NO_PREFERENCE)];
        self.join_host_lookups(session, lookups).await;
    }

    async fn resolve_ptr(&self, id: RequestId, address: SocketAddr, origin: PtrOrigin) {
        let response = match self.facility.lookup_ptr(address).await {
            Ok(name) => DnsResponse::Ptr {
                id,
                origin,
                status: DnsStatus::Ok,
                name: Some(HostName::new(&name)),
            },
            Err(failure) => {
                debug!(id = %id, address = %address.ip(), failure = %failure, "Reverse lookup failed");
                DnsResponse::Ptr {
                    id,
                    origin,
                    status: DnsStatus::NotFound,
                    name: None,
                }
            }
        };

        self.sink.send(response);
    }

    async fn resolve_mx(&self, id: RequestId, domain: &str) {
        let session = Session::new(id, RequestType::Mx, domain);

        if let Some(addr) = parse_literal(session.name().as_str()) {
            debug!(id = %id, address = %addr, "Address literal, skipping MX query");
            self.sink.send(DnsResponse::HostAddress {
                id,
                address: SocketAddr::new(addr, 0),
                preference: NO_PREFERENCE,
            });
            self.sink.send(DnsResponse::HostEnd {
                id,
                status: DnsStatus::Ok,
                last_error: None,
            });
            return;
        }

        let pending = match self
            .facility
            .raw_query(session.name().as_str(), CLASS_IN, TYPE_MX)
        {
            Ok(pending) => pending,
            Err(e) => {
                warn!(id = %id, domain = %session.name(), error = %e, "Failed to issue MX query");
                self.sink.send(DnsResponse::HostEnd {
                    id,
                    status: DnsStatus::Invalid,
                    last_error: None,
                });
                return;
            }
        };

        let answer = pending.await;

        match answer.failure {
            None | Some(ResolverFailure::NoData) => {}
            Some(failure) => {
                debug!(id = %id, domain = %session.name(), failure = %failure, "MX query failed");
                self.sink.send(DnsResponse::HostEnd {
                    id,
                    status: ErrorMapper::map_query_failure(failure),
                    last_error: Some(failure),
                });
                return;
            }
        }

        let mut lookups = mx_exchanges(id, &answer);
        drop(answer);

        if lookups.is_empty() {
            debug!(id = %id, domain = %session.name(), "No MX records, falling back to domain");
            lookups.push((session.name().to_string(), FALLBACK_PREFERENCE));
        }

        self.join_host_lookups(session, lookups).await;
    }

    async fn resolve_mx_preference(&self, id: RequestId, domain: &str, exchange: &str) {
        let exchange = HostName::new(exchange);

        let pending = match self.facility.raw_query(domain, CLASS_IN, TYPE_MX) {
            Ok(pending) => pending,
            Err(e) => {
                warn!(id = %id, domain = %domain, error = %e, "Failed to issue MX query");
                self.sink.send(DnsResponse::MxPreference {
                    id,
                    status: DnsStatus::NotFound,
                    preference: None,
                });
                return;
            }
        };

        let answer = pending.await;

        let response = match answer.failure {
            Some(failure) => DnsResponse::MxPreference {
                id,
                status: ErrorMapper::map_query_failure(failure),
                preference: None,
            },
            None => match matching_preference(id, &answer, &exchange) {
                Some(preference) => DnsResponse::MxPreference {
                    id,
                    status: DnsStatus::Ok,
                    preference: Some(preference),
                },
                None => DnsResponse::MxPreference {
                    id,
                    status: DnsStatus::NotFound,
                    preference: None,
                },
            },
        };

        self.sink.send(response);
    }

    /// Issues one host lookup per entry and emits addresses as each one
    /// completes. The end-of-results response is sent once all of them have.
    async fn join_host_lookups(&self, mut session: Session, lookups: Vec<(String, i32)>) {
        let mut pending = FuturesUnordered::new();
        for (host, preference) in lookups {
            session.begin_lookup();
            pending.push(self.lookup_host(host, preference));
        }

        debug!(
            id = %session.id(),
            kind = %session.request_type(),
            lookups = session.outstanding(),
            "Waiting for host lookups"
        );

        while let Some(lookup) = pending.next().await {
            for response in session.complete_lookup(lookup) {
                self.sink.send(response);
            }
        }

        self.sink.send(session.finish());
    }

    async fn lookup_host(&self, host: String, preference: i32) -> HostLookup {
        let result = self.facility.lookup_host(strip_brackets(&host)).await;
        HostLookup { preference, result }
    }
}

/// Exchange names of the MX records in `answer`, without trailing dot,
/// paired with their preference. Decoding stops at the first malformed
/// record.
fn mx_exchanges(id: RequestId, answer: &RawAnswer) -> Vec<(String, i32)> {
    let message = match Message::decode(&answer.data) {
        Ok(message) => message,
        Err(e) => {
            debug!(id = %id, error = %e, "Undecodable MX answer");
            return Vec::new();
        }
    };

    if let Some(e) = message.stopped_by() {
        debug!(id = %id, error = %e, "MX answer decoding stopped early");
    }

    let exchanges = message
        .mx_answers()
        .map(|(preference, exchange)| (exchange.to_host_string(), i32::from(preference)))
        .collect();
    exchanges
}

fn matching_preference(id: RequestId, answer: &RawAnswer, exchange: &HostName) -> Option<u16> {
    let message = match Message::decode(&answer.data) {
        Ok(message) => message,
        Err(e) => {
            debug!(id = %id, error = %e, "Undecodable MX answer");
            return None;
        }
    };

    let preference = message
        .mx_answers()
        .find(|(_, name)| name.matches_host(exchange.as_str()))
        .map(|(preference, _)| preference);
    preference
}
