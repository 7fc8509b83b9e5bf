use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverConfig {
    /// Recursive nameservers, tried in order until one answers.
    #[serde(default = "default_nameservers")]
    pub nameservers: Vec<String>,

    /// Per-nameserver timeout for a single query.
    #[serde(default = "default_query_timeout_ms")]
    pub query_timeout_ms: u64,

    /// Largest UDP response accepted.
    #[serde(default = "default_udp_payload_size")]
    pub udp_payload_size: u16,
}

impl ResolverConfig {
    pub fn query_timeout(&self) -> Duration {
        Duration::from_millis(self.query_timeout_ms)
    }

    /// Nameserver addresses; bare IPs get port 53.
    pub fn nameserver_addrs(&self) -> Result<Vec<SocketAddr>, String> {
        self.nameservers
            .iter()
            .map(|server| {
                server
                    .parse::<SocketAddr>()
                    .or_else(|_| server.parse().map(|ip| SocketAddr::new(ip, 53)))
                    .map_err(|_| format!("Invalid nameserver address '{}'", server))
            })
            .collect()
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            nameservers: default_nameservers(),
            query_timeout_ms: default_query_timeout_ms(),
            udp_payload_size: default_udp_payload_size(),
        }
    }
}

fn default_nameservers() -> Vec<String> {
    vec!["127.0.0.1:53".to_string()]
}

fn default_query_timeout_ms() -> u64 {
    5000
}

fn default_udp_payload_size() -> u16 {
    1232
}
