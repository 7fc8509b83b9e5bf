#![allow(dead_code)]

use mta_dns_application::use_cases::HandleDnsRequestUseCase;
use mta_dns_domain::DnsResponse;
use std::sync::Arc;
use tokio::sync::mpsc;

use super::MockResolutionFacility;

fn encode_name(name: &str) -> Vec<u8> {
    let mut wire = Vec::new();
    for label in name.split('.').filter(|l| !l.is_empty()) {
        wire.push(label.len() as u8);
        wire.extend_from_slice(label.as_bytes());
    }
    wire.push(0);
    wire
}

/// Response to an MX query for `domain`, one answer record per entry.
pub fn mx_answer(domain: &str, exchanges: &[(u16, &str)]) -> Vec<u8> {
    let mut buf = vec![0x12, 0x34, 0x81, 0x80, 0, 1];
    buf.extend_from_slice(&(exchanges.len() as u16).to_be_bytes());
    buf.extend_from_slice(&[0, 0, 0, 0]);

    buf.extend_from_slice(&encode_name(domain));
    buf.extend_from_slice(&15u16.to_be_bytes());
    buf.extend_from_slice(&1u16.to_be_bytes());

    for (preference, exchange) in exchanges {
        let mut rdata = preference.to_be_bytes().to_vec();
        rdata.extend_from_slice(&encode_name(exchange));

        buf.extend_from_slice(&encode_name(domain));
        buf.extend_from_slice(&15u16.to_be_bytes());
        buf.extend_from_slice(&1u16.to_be_bytes());
        buf.extend_from_slice(&300u32.to_be_bytes());
        buf.extend_from_slice(&(rdata.len() as u16).to_be_bytes());
        buf.extend_from_slice(&rdata);
    }
    buf
}

/// Response to an MX query whose only answer is an A record.
pub fn a_only_answer(domain: &str) -> Vec<u8> {
    let mut buf = vec![0x12, 0x34, 0x81, 0x80, 0, 1, 0, 1, 0, 0, 0, 0];
    buf.extend_from_slice(&encode_name(domain));
    buf.extend_from_slice(&15u16.to_be_bytes());
    buf.extend_from_slice(&1u16.to_be_bytes());

    buf.extend_from_slice(&encode_name(domain));
    buf.extend_from_slice(&1u16.to_be_bytes());
    buf.extend_from_slice(&1u16.to_be_bytes());
    buf.extend_from_slice(&300u32.to_be_bytes());
    buf.extend_from_slice(&4u16.to_be_bytes());
    buf.extend_from_slice(&[192, 0, 2, 99]);
    buf
}

pub struct Harness {
    pub facility: Arc<MockResolutionFacility>,
    pub use_case: Arc<HandleDnsRequestUseCase>,
    pub responses: mpsc::UnboundedReceiver<DnsResponse>,
}

impl Harness {
    pub fn new(facility: MockResolutionFacility) -> Self {
        let facility = Arc::new(facility);
        let (tx, responses) = mpsc::unbounded_channel();
        let use_case = Arc::new(HandleDnsRequestUseCase::new(
            facility.clone(),
            Arc::new(tx),
        ));
        Self {
            facility,
            use_case,
            responses,
        }
    }

    /// Every response produced so far, in emission order.
    pub fn drain(&mut self) -> Vec<DnsResponse> {
        let mut out = Vec::new();
        while let Ok(response) = self.responses.try_recv() {
            out.push(response);
        }
        out
    }
}
