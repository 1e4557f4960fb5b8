//! Uniform random load balancing strategy.

use std::num::NonZeroUsize;

use rand::Rng;

use crate::load_balancer::LoadBalancer;

/// Picks a backend uniformly at random for every request.
/// Uses the thread-local generator, so concurrent tasks never contend.
#[derive(Debug, Default)]
pub struct RandomSelector;

impl RandomSelector {
    pub fn new() -> Self {
        Self
    }
}

impl LoadBalancer for RandomSelector {
    fn next_index(&self, count: NonZeroUsize) -> usize {
        rand::thread_rng().gen_range(0..count.get())
    }
}
