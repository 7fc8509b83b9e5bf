use super::name::{self, Name};
use std::net::{Ipv4Addr, Ipv6Addr};
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    #[error("too short")]
    TooShort,

    #[error("bad domain name")]
    BadName,

    #[error("domain name too long")]
    NameTooLong,

    #[error("bad rdata length")]
    BadRdataLength,
}

/// Sequential reader over a complete DNS message.
///
/// Each read either advances the offset and returns the value, or records a
/// failure and returns it. The first failure is sticky: every later read
/// returns that same error without touching the buffer, so a caller may chain
/// reads with `?` or issue several and check [`WireReader::status`] once.
#[derive(Debug, Clone)]
pub struct WireReader<'a> {
    buf: &'a [u8],
    offset: usize,
    error: Option<DecodeError>,
}

impl<'a> WireReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self {
            buf,
            offset: 0,
            error: None,
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.offset
    }

    pub fn error(&self) -> Option<DecodeError> {
        self.error
    }

    pub fn status(&self) -> Result<(), DecodeError> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    /// Marks the reader failed. An earlier failure wins.
    pub(crate) fn fail(&mut self, error: DecodeError) -> DecodeError {
        *self.error.get_or_insert(error)
    }

    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], DecodeError> {
        self.status()?;

        if self.remaining() < len {
            return Err(self.fail(DecodeError::TooShort));
        }

        let bytes = &self.buf[self.offset..self.offset + len];
        self.offset += len;
        Ok(bytes)
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    pub fn read_u16(&mut self) -> Result<u16, DecodeError> {
        self.read_array().map(u16::from_be_bytes)
    }

    pub fn read_u32(&mut self) -> Result<u32, DecodeError> {
        self.read_array().map(u32::from_be_bytes)
    }

    pub fn read_ipv4(&mut self) -> Result<Ipv4Addr, DecodeError> {
        self.read_array::<4>().map(Ipv4Addr::from)
    }

    pub fn read_ipv6(&mut self) -> Result<Ipv6Addr, DecodeError> {
        self.read_array::<16>().map(Ipv6Addr::from)
    }

    /// Reads a possibly compressed name at the current offset. The offset
    /// moves past the furthest byte the expansion touched.
    pub fn read_name(&mut self) -> Result<Name, DecodeError> {
        self.status()?;

        match name::decompress(self.buf, self.offset) {
            Ok((name, end)) => {
                self.offset = end;
                Ok(name)
            }
            Err(error) => Err(self.fail(error)),
        }
    }
}
