//! Bracketed address literals (`[192.0.2.1]`, `[IPv6:2001:db8::1]`) as they
//! appear in place of a domain in mail addresses.

use std::net::{IpAddr, Ipv6Addr};
use tracing::warn;

const IPV6_PREFIX: &str = "[IPv6:";

/// Longest text accepted between the prefix and the closing bracket.
const MAX_LITERAL_LEN: usize = 255;

fn ipv6_tagged(name: &str) -> bool {
    name.get(..IPV6_PREFIX.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(IPV6_PREFIX))
}

/// Parses a bracketed literal numerically. Returns `None` for anything that
/// is not a complete, valid literal.
pub fn parse_literal(name: &str) -> Option<IpAddr> {
    if !name.starts_with('[') {
        return None;
    }

    let ipv6_only = ipv6_tagged(name);
    let rest = if ipv6_only {
        &name[IPV6_PREFIX.len()..]
    } else {
        &name[1..]
    };

    if rest.is_empty() || rest.len() > MAX_LITERAL_LEN {
        return None;
    }
    let inner = rest.strip_suffix(']')?;

    let parsed = if ipv6_only {
        inner.parse::<Ipv6Addr>().map(IpAddr::V6)
    } else {
        inner.parse::<IpAddr>()
    };

    match parsed {
        Ok(addr) => Some(addr),
        Err(e) => {
            warn!(literal = %name, error = %e, "Invalid address literal");
            None
        }
    }
}

/// Host to hand to a forward lookup: brackets and an `IPv6:` tag are
/// removed, anything after the first `]` is dropped.
pub fn strip_brackets(host: &str) -> &str {
    if !host.starts_with('[') {
        return host;
    }

    let inner = if ipv6_tagged(host) {
        &host[IPV6_PREFIX.len()..]
    } else {
        &host[1..]
    };

    match inner.find(']') {
        Some(end) => &inner[..end],
        None => inner,
    }
}
