use thiserror::Error;

/// Failure class reported by the resolution facility for a completed query.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolverFailure {
    /// The name does not exist (NXDOMAIN).
    #[error("name not found")]
    NameNotFound,

    /// The name exists but has no records of the requested type.
    #[error("no data of requested type")]
    NoData,

    /// Non-recoverable server answer (FORMERR, NOTIMP, REFUSED, malformed reply).
    #[error("non-recoverable failure")]
    NoRecovery,

    /// Transient failure (SERVFAIL, timeout, transport error).
    #[error("temporary failure, try again")]
    TryAgain,
}
