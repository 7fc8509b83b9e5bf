#![allow(dead_code)]
use std::net::SocketAddr;
use tokio::net::UdpSocket;
use tokio::sync::oneshot;

pub const TYPE_A: u16 = 1;
pub const TYPE_PTR: u16 = 12;
pub const TYPE_MX: u16 = 15;
pub const TYPE_AAAA: u16 = 28;

/// A query as seen by [`MockDnsServer`].
pub struct ReceivedQuery<'a> {
    pub bytes: &'a [u8],
    pub name: String,
    pub qtype: u16,
    question_end: usize,
}

impl<'a> ReceivedQuery<'a> {
    fn parse(bytes: &'a [u8]) -> Option<Self> {
        let mut pos = 12;
        let mut labels = Vec::new();
        loop {
            let len = usize::from(*bytes.get(pos)?);
            pos += 1;
            if len == 0 {
                break;
            }
            labels.push(String::from_utf8_lossy(bytes.get(pos..pos + len)?).into_owned());
            pos += len;
        }
        let qtype = u16::from_be_bytes([*bytes.get(pos)?, *bytes.get(pos + 1)?]);

        Some(Self {
            bytes,
            name: labels.join("."),
            qtype,
            question_end: pos + 4,
        })
    }

    /// Response echoing the question, with the given rcode and answers.
    /// Each answer is `(type, rdata)` owned by the question name.
    pub fn answer(&self, rcode: u8, answers: &[(u16, Vec<u8>)]) -> Vec<u8> {
        let mut response = Vec::with_capacity(512);
        response.extend_from_slice(&self.bytes[0..2]);
        response.push(0x81);
        response.push(0x80 | (rcode & 0x0f));
        response.extend_from_slice(&[0x00, 0x01]);
        response.extend_from_slice(&(answers.len() as u16).to_be_bytes());
        response.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);
        response.extend_from_slice(&self.bytes[12..self.question_end]);

        for (rtype, rdata) in answers {
            response.extend_from_slice(&[0xc0, 0x0c]);
            response.extend_from_slice(&rtype.to_be_bytes());
            response.extend_from_slice(&[0x00, 0x01]);
            response.extend_from_slice(&[0x00, 0x00, 0x00, 0x3c]);
            response.extend_from_slice(&(rdata.len() as u16).to_be_bytes());
            response.extend_from_slice(rdata);
        }
        response
    }
}

pub fn encode_name(name: &str) -> Vec<u8> {
    let mut wire = Vec::new();
    for label in name.split('.').filter(|l| !l.is_empty()) {
        wire.push(label.len() as u8);
        wire.extend_from_slice(label.as_bytes());
    }
    wire.push(0);
    wire
}

pub fn mx_rdata(preference: u16, exchange: &str) -> Vec<u8> {
    let mut rdata = preference.to_be_bytes().to_vec();
    rdata.extend_from_slice(&encode_name(exchange));
    rdata
}

/// UDP nameserver on 127.0.0.1 that answers with whatever the responder
/// returns. `None` means stay silent.
pub struct MockDnsServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn start<F>(responder: F) -> Result<Self, std::io::Error>
    where
        F: Fn(&ReceivedQuery<'_>) -> Option<Vec<u8>> + Send + 'static,
    {
        let socket = UdpSocket::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = socket.local_addr()?;

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            let mut buf = vec![0u8; 512];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            let response = ReceivedQuery::parse(&buf[..len]).and_then(|q| responder(&q));
                            if let Some(response) = response {
                                let _ = socket.send_to(&response, peer).await;
                            }
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
