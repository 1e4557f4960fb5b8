//! Backend pool management.
//!
//! # Responsibilities
//! - Own the immutable backend set for the process lifetime
//! - Apply the configured load balancing strategy to pick a backend

use crate::config::{LoadBalancingConfig, Strategy};
use crate::load_balancer::{
    LoadBalancer,
    backend::{Backend, BackendSet},
    random::RandomSelector,
    round_robin::RoundRobin,
};

/// Backend set plus the strategy that picks from it.
/// Shared read-only across connection tasks.
#[derive(Debug)]
pub struct BackendPool {
    backends: BackendSet,
    balancer: Box<dyn LoadBalancer>,
}

impl BackendPool {
    pub fn new(backends: BackendSet, balancer: Box<dyn LoadBalancer>) -> Self {
        Self { backends, balancer }
    }

    /// Build a pool using the strategy named in configuration.
    pub fn from_config(backends: BackendSet, config: &LoadBalancingConfig) -> Self {
        let balancer: Box<dyn LoadBalancer> = match config.strategy {
            Strategy::Random => Box::new(RandomSelector::new()),
            Strategy::RoundRobin => Box::new(RoundRobin::new()),
        };
        Self::new(backends, balancer)
    }

    /// Select a backend for one request.
    pub fn select(&self) -> &Backend {
        let index = self.balancer.next_index(self.backends.len());
        let backend = self.backends.get(index);
        tracing::debug!(backend = %backend, index, "Backend selected");
        backend
    }

    pub fn backends(&self) -> &BackendSet {
        &self.backends
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn set(addrs: &[&str]) -> BackendSet {
        BackendSet::new(addrs.iter().map(|a| Backend::new(*a)).collect()).unwrap()
    }

    #[test]
    fn round_robin_pool_rotates() {
        let pool = BackendPool::from_config(
            set(&["a:1", "b:2", "c:3"]),
            &LoadBalancingConfig { strategy: Strategy::RoundRobin },
        );
        let picks: Vec<&str> = (0..4).map(|_| pool.select().address()).collect();
        assert_eq!(picks, vec!["a:1", "b:2", "c:3", "a:1"]);
    }

    #[test]
    fn random_pool_reaches_every_backend() {
        let pool = BackendPool::from_config(set(&["a:1", "b:2"]), &LoadBalancingConfig::default());
        let mut hits: HashMap<&str, usize> = HashMap::new();
        for _ in 0..2_000 {
            *hits.entry(pool.select().address()).or_default() += 1;
        }
        assert_eq!(hits.len(), 2);
        for (addr, count) in hits {
            assert!((800..1200).contains(&count), "{} selected {} times", addr, count);
        }
    }
}
