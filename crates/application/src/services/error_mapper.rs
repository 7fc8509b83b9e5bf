use mta_dns_domain::{DnsStatus, ResolverFailure};

/// Maps resolver failures onto the response status vocabulary.
///
/// Only true failures go through here. A successful query that yields
/// nothing usable is the caller's NOT_FOUND, never a mapped failure.
pub struct ErrorMapper;

impl ErrorMapper {
    pub fn map_query_failure(failure: ResolverFailure) -> DnsStatus {
        match failure {
            ResolverFailure::NameNotFound => DnsStatus::NoName,
            ResolverFailure::NoRecovery | ResolverFailure::NoData => DnsStatus::Invalid,
            ResolverFailure::TryAgain => DnsStatus::Retry,
        }
    }
}
