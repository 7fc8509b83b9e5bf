use super::name::Name;
use super::reader::{DecodeError, WireReader};
use super::record::ResourceRecord;

pub const RCODE_NOERROR: u8 = 0;
pub const RCODE_SERVFAIL: u8 = 2;
pub const RCODE_NXDOMAIN: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub id: u16,
    pub flags: u16,
    pub qdcount: u16,
    pub ancount: u16,
    pub nscount: u16,
    pub arcount: u16,
}

impl Header {
    pub fn is_response(&self) -> bool {
        self.flags & 0x8000 != 0
    }

    pub fn is_truncated(&self) -> bool {
        self.flags & 0x0200 != 0
    }

    pub fn rcode(&self) -> u8 {
        (self.flags & 0x000F) as u8
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub name: Name,
    pub qtype: u16,
    pub qclass: u16,
}

impl<'a> WireReader<'a> {
    pub fn read_header(&mut self) -> Result<Header, DecodeError> {
        Ok(Header {
            id: self.read_u16()?,
            flags: self.read_u16()?,
            qdcount: self.read_u16()?,
            ancount: self.read_u16()?,
            nscount: self.read_u16()?,
            arcount: self.read_u16()?,
        })
    }

    pub fn read_question(&mut self) -> Result<Question, DecodeError> {
        Ok(Question {
            name: self.read_name()?,
            qtype: self.read_u16()?,
            qclass: self.read_u16()?,
        })
    }
}

/// A decoded DNS response.
///
/// Only the header and question are required to decode. Records are read
/// section by section until the first malformed one; everything before it is
/// kept and the error that stopped the walk is available from
/// [`Message::stopped_by`].
#[derive(Debug, Clone)]
pub struct Message<'a> {
    pub header: Header,
    pub question: Option<Question>,
    pub answers: Vec<ResourceRecord<'a>>,
    pub authority: Vec<ResourceRecord<'a>>,
    pub additional: Vec<ResourceRecord<'a>>,
    stopped_by: Option<DecodeError>,
}

impl<'a> Message<'a> {
    pub fn decode(buf: &'a [u8]) -> Result<Self, DecodeError> {
        let mut reader = WireReader::new(buf);
        let header = reader.read_header()?;

        // Only the first question is read; answers are expected right after it.
        let question = if header.qdcount > 0 {
            Some(reader.read_question()?)
        } else {
            None
        };

        let answers = read_section(&mut reader, header.ancount);
        let authority = read_section(&mut reader, header.nscount);
        let additional = read_section(&mut reader, header.arcount);

        Ok(Self {
            header,
            question,
            answers,
            authority,
            additional,
            stopped_by: reader.error(),
        })
    }

    pub fn stopped_by(&self) -> Option<DecodeError> {
        self.stopped_by
    }

    /// `(preference, exchange)` of every MX record in the answer section, in
    /// message order.
    pub fn mx_answers(&self) -> impl Iterator<Item = (u16, &Name)> + '_ {
        self.answers.iter().filter_map(ResourceRecord::as_mx)
    }
}

fn read_section<'a>(reader: &mut WireReader<'a>, count: u16) -> Vec<ResourceRecord<'a>> {
    let mut records = Vec::new();
    if reader.error().is_some() {
        return records;
    }

    for _ in 0..count {
        match reader.read_record() {
            Ok(record) => records.push(record),
            Err(_) => break,
        }
    }
    records
}
