use super::name::Name;
use super::reader::{DecodeError, WireReader};
use std::net::{Ipv4Addr, Ipv6Addr};

pub const TYPE_A: u16 = 1;
pub const TYPE_NS: u16 = 2;
pub const TYPE_CNAME: u16 = 5;
pub const TYPE_SOA: u16 = 6;
pub const TYPE_PTR: u16 = 12;
pub const TYPE_MX: u16 = 15;
pub const TYPE_AAAA: u16 = 28;

pub const CLASS_IN: u16 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Soa {
    pub mname: Name,
    pub rname: Name,
    pub serial: u32,
    pub refresh: u32,
    pub retry: u32,
    pub expire: u32,
    pub minimum: u32,
}

/// Record payload, decoded according to the record type.
///
/// Types this decoder does not interpret, and A/AAAA outside the Internet
/// class, are kept as a view into the original message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordData<'a> {
    Cname(Name),
    Mx { preference: u16, exchange: Name },
    Ns(Name),
    Ptr(Name),
    Soa(Soa),
    A(Ipv4Addr),
    Aaaa(Ipv6Addr),
    Other(&'a [u8]),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord<'a> {
    pub name: Name,
    pub rtype: u16,
    pub class: u16,
    pub ttl: u32,
    pub data: RecordData<'a>,
}

impl<'a> ResourceRecord<'a> {
    /// Preference and exchange of an MX record.
    pub fn as_mx(&self) -> Option<(u16, &Name)> {
        match &self.data {
            RecordData::Mx {
                preference,
                exchange,
            } => Some((*preference, exchange)),
            _ => None,
        }
    }
}

impl<'a> WireReader<'a> {
    /// Reads one resource record.
    ///
    /// The payload must consume exactly the advertised rdata length; any
    /// other count fails the record with [`DecodeError::BadRdataLength`].
    pub fn read_record(&mut self) -> Result<ResourceRecord<'a>, DecodeError> {
        let name = self.read_name()?;
        let rtype = self.read_u16()?;
        let class = self.read_u16()?;
        let ttl = self.read_u32()?;
        let rdlen = usize::from(self.read_u16()?);

        if self.remaining() < rdlen {
            return Err(self.fail(DecodeError::TooShort));
        }

        let start = self.offset();

        let data = match (rtype, class) {
            (TYPE_CNAME, _) => RecordData::Cname(self.read_name()?),
            (TYPE_MX, _) => RecordData::Mx {
                preference: self.read_u16()?,
                exchange: self.read_name()?,
            },
            (TYPE_NS, _) => RecordData::Ns(self.read_name()?),
            (TYPE_PTR, _) => RecordData::Ptr(self.read_name()?),
            (TYPE_SOA, _) => RecordData::Soa(Soa {
                mname: self.read_name()?,
                rname: self.read_name()?,
                serial: self.read_u32()?,
                refresh: self.read_u32()?,
                retry: self.read_u32()?,
                expire: self.read_u32()?,
                minimum: self.read_u32()?,
            }),
            (TYPE_A, CLASS_IN) => RecordData::A(self.read_ipv4()?),
            (TYPE_AAAA, CLASS_IN) => RecordData::Aaaa(self.read_ipv6()?),
            _ => RecordData::Other(self.read_bytes(rdlen)?),
        };

        if self.offset() - start != rdlen {
            return Err(self.fail(DecodeError::BadRdataLength));
        }

        Ok(ResourceRecord {
            name,
            rtype,
            class,
            ttl,
            data,
        })
    }
}
