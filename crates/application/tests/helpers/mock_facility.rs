#![allow(dead_code)]

use async_trait::async_trait;
use futures::FutureExt;
use mta_dns_application::ports::{PendingQuery, RawAnswer, ResolutionFacility};
use mta_dns_domain::{DomainError, ResolverFailure};
use std::collections::{HashMap, HashSet};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// In-memory resolution facility. Unknown names resolve to
/// `NameNotFound`. Host lookups can be held back behind a gate to force a
/// completion order.
#[derive(Default)]
pub struct MockResolutionFacility {
    hosts: Mutex<HashMap<String, Result<Vec<SocketAddr>, ResolverFailure>>>,
    ptrs: Mutex<HashMap<SocketAddr, Result<String, ResolverFailure>>>,
    raw: Mutex<HashMap<(String, u16), RawAnswer>>,
    unissuable: Mutex<HashSet<String>>,
    gates: Mutex<HashMap<String, Arc<Notify>>>,
    host_lookups: Mutex<Vec<String>>,
    raw_queries: Mutex<Vec<(String, u16, u16)>>,
}

impl MockResolutionFacility {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_host(self, host: &str, addresses: &[&str]) -> Self {
        let addresses = addresses
            .iter()
            .map(|a| SocketAddr::new(a.parse().unwrap(), 0))
            .collect();
        self.hosts
            .lock()
            .unwrap()
            .insert(host.to_string(), Ok(addresses));
        self
    }

    pub fn with_host_failure(self, host: &str, failure: ResolverFailure) -> Self {
        self.hosts
            .lock()
            .unwrap()
            .insert(host.to_string(), Err(failure));
        self
    }

    pub fn with_ptr(self, address: SocketAddr, result: Result<&str, ResolverFailure>) -> Self {
        self.ptrs
            .lock()
            .unwrap()
            .insert(address, result.map(str::to_string));
        self
    }

    pub fn with_raw(self, name: &str, rtype: u16, answer: RawAnswer) -> Self {
        self.raw
            .lock()
            .unwrap()
            .insert((name.to_string(), rtype), answer);
        self
    }

    pub fn with_unissuable(self, name: &str) -> Self {
        self.unissuable.lock().unwrap().insert(name.to_string());
        self
    }

    /// Holds lookups of `host` until the returned handle is notified.
    pub fn gate(&self, host: &str) -> Arc<Notify> {
        self.gates
            .lock()
            .unwrap()
            .entry(host.to_string())
            .or_insert_with(|| Arc::new(Notify::new()))
            .clone()
    }

    pub fn host_lookups(&self) -> Vec<String> {
        self.host_lookups.lock().unwrap().clone()
    }

    pub fn raw_queries(&self) -> Vec<(String, u16, u16)> {
        self.raw_queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl ResolutionFacility for MockResolutionFacility {
    async fn lookup_host(&self, host: &str) -> Result<Vec<SocketAddr>, ResolverFailure> {
        self.host_lookups.lock().unwrap().push(host.to_string());

        let gate = self.gates.lock().unwrap().get(host).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        self.hosts
            .lock()
            .unwrap()
            .get(host)
            .cloned()
            .unwrap_or(Err(ResolverFailure::NameNotFound))
    }

    async fn lookup_ptr(&self, address: SocketAddr) -> Result<String, ResolverFailure> {
        self.ptrs
            .lock()
            .unwrap()
            .get(&address)
            .cloned()
            .unwrap_or(Err(ResolverFailure::NameNotFound))
    }

    fn raw_query(
        &self,
        name: &str,
        class: u16,
        rtype: u16,
    ) -> Result<PendingQuery<'_>, DomainError> {
        self.raw_queries
            .lock()
            .unwrap()
            .push((name.to_string(), class, rtype));

        if self.unissuable.lock().unwrap().contains(name) {
            return Err(DomainError::InvalidDomainName(name.to_string()));
        }

        let answer = self
            .raw
            .lock()
            .unwrap()
            .get(&(name.to_string(), rtype))
            .cloned()
            .unwrap_or_else(|| RawAnswer::failed(Vec::new(), ResolverFailure::NameNotFound));

        Ok(async move { answer }.boxed())
    }
}
