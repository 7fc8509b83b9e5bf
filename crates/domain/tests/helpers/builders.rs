#![allow(dead_code)]
use std::net::{Ipv4Addr, Ipv6Addr};

pub const TYPE_A: u16 = 1;
pub const TYPE_CNAME: u16 = 5;
pub const TYPE_MX: u16 = 15;
pub const TYPE_AAAA: u16 = 28;
pub const CLASS_IN: u16 = 1;

/// Offset of the question name in a message built by [`WireMessageBuilder`].
pub const QUESTION_OFFSET: u16 = 12;

pub fn encode_name(name: &str) -> Vec<u8> {
    let mut wire = Vec::new();
    for label in name.trim_end_matches('.').split('.').filter(|l| !l.is_empty()) {
        wire.push(label.len() as u8);
        wire.extend_from_slice(label.as_bytes());
    }
    wire.push(0);
    wire
}

pub fn pointer(offset: u16) -> Vec<u8> {
    (0xC000 | offset).to_be_bytes().to_vec()
}

/// Builds DNS responses byte by byte. Names are written uncompressed unless
/// a record is added with an explicit owner encoding; section counts can be
/// overridden to describe more records than are present.
pub struct WireMessageBuilder {
    id: u16,
    flags: u16,
    question: Vec<u8>,
    qdcount: u16,
    answers: Vec<u8>,
    ancount: u16,
    ancount_override: Option<u16>,
}

impl WireMessageBuilder {
    pub fn response(id: u16) -> Self {
        Self {
            id,
            flags: 0x8180,
            question: Vec::new(),
            qdcount: 0,
            answers: Vec::new(),
            ancount: 0,
            ancount_override: None,
        }
    }

    pub fn rcode(mut self, rcode: u8) -> Self {
        self.flags = (self.flags & 0xFFF0) | u16::from(rcode & 0x0F);
        self
    }

    pub fn question(mut self, name: &str, qtype: u16) -> Self {
        self.question.extend_from_slice(&encode_name(name));
        self.question.extend_from_slice(&qtype.to_be_bytes());
        self.question.extend_from_slice(&CLASS_IN.to_be_bytes());
        self.qdcount += 1;
        self
    }

    pub fn record_with_owner(mut self, owner: &[u8], rtype: u16, class: u16, rdata: &[u8]) -> Self {
        self.answers.extend_from_slice(owner);
        self.answers.extend_from_slice(&rtype.to_be_bytes());
        self.answers.extend_from_slice(&class.to_be_bytes());
        self.answers.extend_from_slice(&3600u32.to_be_bytes());
        self.answers.extend_from_slice(&(rdata.len() as u16).to_be_bytes());
        self.answers.extend_from_slice(rdata);
        self.ancount += 1;
        self
    }

    pub fn record(self, owner: &str, rtype: u16, class: u16, rdata: &[u8]) -> Self {
        self.record_with_owner(&encode_name(owner), rtype, class, rdata)
    }

    pub fn mx(self, owner: &str, preference: u16, exchange: &str) -> Self {
        let mut rdata = preference.to_be_bytes().to_vec();
        rdata.extend_from_slice(&encode_name(exchange));
        self.record(owner, TYPE_MX, CLASS_IN, &rdata)
    }

    pub fn a(self, owner: &str, addr: Ipv4Addr) -> Self {
        self.record(owner, TYPE_A, CLASS_IN, &addr.octets())
    }

    pub fn aaaa(self, owner: &str, addr: Ipv6Addr) -> Self {
        self.record(owner, TYPE_AAAA, CLASS_IN, &addr.octets())
    }

    pub fn cname(self, owner: &str, target: &str) -> Self {
        self.record(owner, TYPE_CNAME, CLASS_IN, &encode_name(target))
    }

    /// Appends raw bytes to the answer section without touching the count.
    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.answers.extend_from_slice(bytes);
        self
    }

    pub fn answer_count(mut self, count: u16) -> Self {
        self.ancount_override = Some(count);
        self
    }

    /// Offset at which the next answer record would start.
    pub fn next_answer_offset(&self) -> usize {
        12 + self.question.len() + self.answers.len()
    }

    pub fn build(self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(12 + self.question.len() + self.answers.len());
        buf.extend_from_slice(&self.id.to_be_bytes());
        buf.extend_from_slice(&self.flags.to_be_bytes());
        buf.extend_from_slice(&self.qdcount.to_be_bytes());
        buf.extend_from_slice(&self.ancount_override.unwrap_or(self.ancount).to_be_bytes());
        buf.extend_from_slice(&0u16.to_be_bytes());
        buf.extend_from_slice(&0u16.to_be_bytes());
        buf.extend_from_slice(&self.question);
        buf.extend_from_slice(&self.answers);
        buf
    }
}
