//! Domain names: decompression from wire messages and presentation format.

use super::reader::DecodeError;
use crate::DomainError;
use std::fmt;
use std::str::FromStr;

/// Maximum length of a name in wire form, root label included (RFC 1035 §2.3.4).
pub const MAX_NAME_LEN: usize = 255;

/// Maximum length of a single label.
pub const MAX_LABEL_LEN: usize = 63;

const POINTER_MASK: u8 = 0xC0;

/// An uncompressed domain name, stored as its length-prefixed label sequence
/// terminated by the zero-length root label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Name {
    wire: Vec<u8>,
}

impl Name {
    pub fn root() -> Self {
        Self { wire: vec![0] }
    }

    pub fn is_root(&self) -> bool {
        self.wire.len() == 1
    }

    /// The uncompressed wire form.
    pub fn as_wire(&self) -> &[u8] {
        &self.wire
    }

    pub fn labels(&self) -> Labels<'_> {
        Labels { rest: &self.wire }
    }

    /// Renders the name in dotted presentation form with a trailing dot,
    /// using at most `capacity` bytes. The root name is `"."`.
    ///
    /// A name that does not fit is cut at the last whole character (escape
    /// sequences are never split), so the result always stays within bounds.
    pub fn to_presentation(&self, capacity: usize) -> String {
        let mut out = String::with_capacity(capacity.min(MAX_NAME_LEN * 4));

        if self.is_root() {
            if capacity > 0 {
                out.push('.');
            }
            return out;
        }

        let mut escaped = String::with_capacity(4);
        for label in self.labels() {
            for &byte in label {
                escaped.clear();
                push_escaped(&mut escaped, byte);
                if out.len() + escaped.len() > capacity {
                    return out;
                }
                out.push_str(&escaped);
            }
            if out.len() + 1 > capacity {
                return out;
            }
            out.push('.');
        }

        out
    }

    /// Presentation form without the trailing dot, as handed to host lookups.
    pub fn to_host_string(&self) -> String {
        let mut host = self.to_string();
        host.pop();
        host
    }

    /// ASCII case-insensitive comparison against a host name without
    /// trailing dot.
    pub fn matches_host(&self, host: &str) -> bool {
        self.to_host_string().eq_ignore_ascii_case(host)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_presentation(usize::MAX))
    }
}

impl FromStr for Name {
    type Err = DomainError;

    /// Parses a plain dotted name (no escapes). A single trailing dot is
    /// accepted; `"."` and `""` are the root.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.strip_suffix('.').unwrap_or(s);
        let mut wire = Vec::with_capacity(trimmed.len() + 2);

        if !trimmed.is_empty() {
            for label in trimmed.split('.') {
                if label.is_empty() || label.len() > MAX_LABEL_LEN {
                    return Err(DomainError::InvalidDomainName(s.to_string()));
                }
                wire.push(label.len() as u8);
                wire.extend_from_slice(label.as_bytes());
            }
        }
        wire.push(0);

        if wire.len() > MAX_NAME_LEN {
            return Err(DomainError::InvalidDomainName(s.to_string()));
        }

        Ok(Self { wire })
    }
}

pub struct Labels<'a> {
    rest: &'a [u8],
}

impl<'a> Iterator for Labels<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        let len = *self.rest.first()? as usize;
        if len == 0 {
            return None;
        }
        let label = &self.rest[1..1 + len];
        self.rest = &self.rest[1 + len..];
        Some(label)
    }
}

fn push_escaped(out: &mut String, byte: u8) {
    match byte {
        b'.' | b'\\' => {
            out.push('\\');
            out.push(byte as char);
        }
        0x21..=0x7e => out.push(byte as char),
        _ => {
            out.push('\\');
            out.push_str(&format!("{byte:03}"));
        }
    }
}

/// Expands the name starting at `offset` in `buf`, following compression
/// pointers.
///
/// Every pointer must target an offset strictly below the start of the
/// segment being expanded; forward and self-referencing pointers are
/// rejected. Since each jump lowers that start, the walk always terminates.
///
/// Returns the name and the furthest offset touched during expansion, which
/// is where the enclosing stream continues.
pub(crate) fn decompress(buf: &[u8], offset: usize) -> Result<(Name, usize), DecodeError> {
    if offset >= buf.len() {
        return Err(DecodeError::BadName);
    }

    let mut wire = Vec::with_capacity(32);
    let mut pos = offset;
    let mut start = offset;
    let mut end = offset;

    loop {
        let len = *buf.get(pos).ok_or(DecodeError::BadName)?;
        if len == 0 {
            break;
        }

        match len & POINTER_MASK {
            POINTER_MASK => {
                if pos + 2 > buf.len() {
                    return Err(DecodeError::BadName);
                }
                let target = usize::from(len & !POINTER_MASK) << 8 | usize::from(buf[pos + 1]);
                if target >= start {
                    return Err(DecodeError::BadName);
                }
                end = end.max(pos + 2);
                pos = target;
                start = target;
            }
            0x00 => {
                let len = usize::from(len);
                if pos + len + 1 > buf.len() {
                    return Err(DecodeError::BadName);
                }
                // Room must remain for the root label.
                if wire.len() + len + 2 > MAX_NAME_LEN {
                    return Err(DecodeError::NameTooLong);
                }
                wire.extend_from_slice(&buf[pos..pos + len + 1]);
                pos += len + 1;
                end = end.max(pos);
            }
            // 0x40 and 0x80 label types
            _ => return Err(DecodeError::BadName),
        }
    }

    wire.push(0);
    Ok((Name { wire }, end.max(pos + 1)))
}
