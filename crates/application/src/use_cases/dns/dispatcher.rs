use super::HandleDnsRequestUseCase;
use mta_dns_domain::DnsRequest;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, error, info};

/// Runs one session task per inbound request.
pub struct DnsRequestDispatcher {
    use_case: Arc<HandleDnsRequestUseCase>,
}

impl DnsRequestDispatcher {
    pub fn new(use_case: Arc<HandleDnsRequestUseCase>) -> Self {
        Self { use_case }
    }

    /// Consumes requests until the channel closes, then waits for every
    /// session still in flight.
    pub async fn run(&self, mut requests: mpsc::Receiver<DnsRequest>) {
        let mut sessions: JoinSet<()> = JoinSet::new();
        info!("DNS request dispatcher started");

        loop {
            tokio::select! {
                request = requests.recv() => {
                    let Some(request) = request else { break };
                    let use_case = Arc::clone(&self.use_case);
                    sessions.spawn(async move {
                        use_case.execute(request).await;
                    });
                }
                Some(joined) = sessions.join_next() => {
                    if let Err(e) = joined {
                        error!(error = %e, "DNS session task failed");
                    }
                }
            }
        }

        debug!(in_flight = sessions.len(), "Request channel closed, draining sessions");
        while let Some(joined) = sessions.join_next().await {
            if let Err(e) = joined {
                error!(error = %e, "DNS session task failed");
            }
        }

        info!("DNS request dispatcher stopped");
    }
}
