use mta_dns_domain::DnsResponse;
use tokio::sync::mpsc;
use tracing::debug;

/// Outbound side of the request/response channel.
pub trait ResponseSink: Send + Sync {
    fn send(&self, response: DnsResponse);
}

impl ResponseSink for mpsc::UnboundedSender<DnsResponse> {
    fn send(&self, response: DnsResponse) {
        let id = response.id();
        if mpsc::UnboundedSender::send(self, response).is_err() {
            debug!(id = %id, "Response channel closed, dropping response");
        }
    }
}
