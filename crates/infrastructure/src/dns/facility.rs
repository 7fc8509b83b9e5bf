//! Resolution facility backed by recursive nameservers over UDP.

use super::forwarding::MessageBuilder;
use super::reverse::reverse_name;
use super::transport::{DnsTransport, UdpTransport};
use async_trait::async_trait;
use futures::FutureExt;
use mta_dns_application::ports::{PendingQuery, RawAnswer, ResolutionFacility};
use mta_dns_domain::wire::message::{RCODE_NOERROR, RCODE_NXDOMAIN, RCODE_SERVFAIL};
use mta_dns_domain::wire::{
    Message, RecordData, WireReader, CLASS_IN, TYPE_A, TYPE_AAAA, TYPE_PTR,
};
use mta_dns_domain::{DomainError, ResolverConfig, ResolverFailure};
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use tracing::debug;

pub struct UpstreamResolutionFacility {
    transports: Vec<Box<dyn DnsTransport>>,
    timeout: Duration,
}

impl UpstreamResolutionFacility {
    pub fn new(config: &ResolverConfig) -> Result<Self, DomainError> {
        let addrs = config.nameserver_addrs().map_err(DomainError::ConfigError)?;
        let payload_size = usize::from(config.udp_payload_size);

        let transports = addrs
            .into_iter()
            .map(|addr| {
                Box::new(UdpTransport::new(addr).with_payload_size(payload_size))
                    as Box<dyn DnsTransport>
            })
            .collect();

        Ok(Self::with_transports(transports, config.query_timeout()))
    }

    pub fn with_transports(transports: Vec<Box<dyn DnsTransport>>, timeout: Duration) -> Self {
        Self {
            transports,
            timeout,
        }
    }

    /// Sends `query` to each nameserver in turn until one answers with the
    /// matching transaction id.
    async fn exchange(&self, id: u16, query: &[u8]) -> Result<Vec<u8>, DomainError> {
        let mut last_error = DomainError::TransportAllServersUnreachable;

        for transport in &self.transports {
            match transport.send(query, self.timeout).await {
                Ok(response) if response_id(&response.bytes) == Some(id) => {
                    return Ok(response.bytes);
                }
                Ok(response) => {
                    debug!(
                        server = %response.server,
                        expected_id = id,
                        "Discarding response with mismatched id"
                    );
                    last_error = DomainError::InvalidDnsResponse(format!(
                        "Mismatched transaction id from {}",
                        response.server
                    ));
                }
                Err(e) => {
                    debug!(server = %transport.server_addr(), error = %e, "Nameserver query failed");
                    last_error = e;
                }
            }
        }

        Err(last_error)
    }

    async fn query(&self, name: String, id: u16, query: Vec<u8>) -> RawAnswer {
        match self.exchange(id, &query).await {
            Ok(data) => classify(data),
            Err(e) => {
                debug!(name = %name, error = %e, "No usable answer from any nameserver");
                RawAnswer::failed(Vec::new(), ResolverFailure::TryAgain)
            }
        }
    }
}

fn response_id(bytes: &[u8]) -> Option<u16> {
    Some(u16::from_be_bytes([*bytes.first()?, *bytes.get(1)?]))
}

/// Resolver-level outcome of a response, from its header alone.
fn classify(data: Vec<u8>) -> RawAnswer {
    let header = match WireReader::new(&data).read_header() {
        Ok(header) => header,
        Err(_) => return RawAnswer::failed(data, ResolverFailure::NoRecovery),
    };

    if !header.is_response() {
        debug!(id = header.id, "Reply without the response flag");
        return RawAnswer::failed(data, ResolverFailure::NoRecovery);
    }

    if header.is_truncated() {
        debug!(id = header.id, "Truncated response, using the partial answer");
    }

    let failure = match header.rcode() {
        RCODE_NOERROR if header.ancount == 0 => ResolverFailure::NoData,
        RCODE_NOERROR => return RawAnswer::success(data),
        RCODE_NXDOMAIN => ResolverFailure::NameNotFound,
        RCODE_SERVFAIL => ResolverFailure::TryAgain,
        _ => ResolverFailure::NoRecovery,
    };

    RawAnswer::failed(data, failure)
}

fn answer_addresses(answer: &RawAnswer) -> Vec<SocketAddr> {
    if answer.failure.is_some() {
        return Vec::new();
    }

    let Ok(message) = Message::decode(&answer.data) else {
        return Vec::new();
    };

    message
        .answers
        .iter()
        .filter_map(|record| match record.data {
            RecordData::A(ip) => Some(SocketAddr::new(IpAddr::V4(ip), 0)),
            RecordData::Aaaa(ip) => Some(SocketAddr::new(IpAddr::V6(ip), 0)),
            _ => None,
        })
        .collect()
}

#[async_trait]
impl ResolutionFacility for UpstreamResolutionFacility {
    async fn lookup_host(&self, host: &str) -> Result<Vec<SocketAddr>, ResolverFailure> {
        if let Ok(ip) = host.parse::<IpAddr>() {
            return Ok(vec![SocketAddr::new(ip, 0)]);
        }

        let (v4, v6) = match (
            self.raw_query(host, CLASS_IN, TYPE_A),
            self.raw_query(host, CLASS_IN, TYPE_AAAA),
        ) {
            (Ok(v4), Ok(v6)) => futures::join!(v4, v6),
            (Err(e), _) | (_, Err(e)) => {
                debug!(host = %host, error = %e, "Failed to issue address query");
                return Err(ResolverFailure::NoRecovery);
            }
        };

        let mut addresses = answer_addresses(&v4);
        addresses.extend(answer_addresses(&v6));

        if addresses.is_empty() {
            return Err(v4.failure.unwrap_or(ResolverFailure::NoData));
        }

        debug!(host = %host, count = addresses.len(), "Host resolved");
        Ok(addresses)
    }

    async fn lookup_ptr(&self, address: SocketAddr) -> Result<String, ResolverFailure> {
        let name = reverse_name(address.ip());

        let pending = self.raw_query(&name, CLASS_IN, TYPE_PTR).map_err(|e| {
            debug!(name = %name, error = %e, "Failed to issue PTR query");
            ResolverFailure::NoRecovery
        })?;
        let answer = pending.await;

        if let Some(failure) = answer.failure {
            return Err(failure);
        }

        let message = Message::decode(&answer.data).map_err(|_| ResolverFailure::NoRecovery)?;

        message
            .answers
            .iter()
            .find_map(|record| match &record.data {
                RecordData::Ptr(target) => Some(target.to_host_string()),
                _ => None,
            })
            .ok_or(ResolverFailure::NoData)
    }

    fn raw_query(
        &self,
        name: &str,
        class: u16,
        rtype: u16,
    ) -> Result<PendingQuery<'_>, DomainError> {
        let (id, query) = MessageBuilder::build_query_with_id(name, class, rtype)?;

        debug!(name = %name, class = class, rtype = rtype, id = id, "Issuing DNS query");

        Ok(self.query(name.to_string(), id, query).boxed())
    }
}
