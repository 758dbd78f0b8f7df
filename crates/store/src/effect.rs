//! The external effect every store operation waits on before committing.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::StoreConfig;

/// Store operation kinds, as seen by the effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Load,
    Create,
    Update,
    Delete,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Load => "load",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }
}

impl core::fmt::Display for Operation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EffectError {
    #[error("{operation} did not complete: {reason}")]
    Failed { operation: Operation, reason: String },
}

/// Side effect performed before a change is committed.
///
/// The store commits only after `run` returns `Ok`; an error rolls the
/// operation back. Implementations may suspend for as long as they like: there
/// is no timeout.
#[async_trait]
pub trait MutationEffect: Send + Sync {
    async fn run(&self, operation: Operation) -> Result<(), EffectError>;
}

/// Sleeps for a configured delay and always succeeds.
#[derive(Debug, Clone)]
pub struct SimulatedLatency {
    load: Duration,
    mutation: Duration,
}

impl SimulatedLatency {
    pub fn new(config: &StoreConfig) -> Self {
        Self {
            load: config.load_latency,
            mutation: config.mutation_latency,
        }
    }

    fn delay_for(&self, operation: Operation) -> Duration {
        match operation {
            Operation::Load => self.load,
            Operation::Create | Operation::Update | Operation::Delete => self.mutation,
        }
    }
}

#[async_trait]
impl MutationEffect for SimulatedLatency {
    async fn run(&self, operation: Operation) -> Result<(), EffectError> {
        let delay = self.delay_for(operation);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn simulated_latency_sleeps_per_operation_kind() {
        let effect = SimulatedLatency::new(&StoreConfig::default());

        let start = tokio::time::Instant::now();
        effect.run(Operation::Load).await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(800));

        let start = tokio::time::Instant::now();
        effect.run(Operation::Delete).await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(500));
    }

    #[test]
    fn effect_error_names_the_operation() {
        let err = EffectError::Failed {
            operation: Operation::Update,
            reason: "backend unavailable".to_string(),
        };
        assert_eq!(err.to_string(), "update did not complete: backend unavailable");
    }
}
