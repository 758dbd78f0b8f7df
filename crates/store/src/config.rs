//! Store configuration loaded from environment variables.

use std::time::Duration;

const DEFAULT_LOAD_LATENCY_MS: u64 = 800;
const DEFAULT_MUTATION_LATENCY_MS: u64 = 500;

/// Simulated latency of the store's external effects.
///
/// Reads from environment variables:
/// - `STOCKROOM_LOAD_LATENCY_MS`: initial load delay (default: `800`)
/// - `STOCKROOM_MUTATION_LATENCY_MS`: create/update/delete delay (default: `500`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub load_latency: Duration,
    pub mutation_latency: Duration,
}

impl StoreConfig {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self {
            load_latency: env_millis("STOCKROOM_LOAD_LATENCY_MS", DEFAULT_LOAD_LATENCY_MS),
            mutation_latency: env_millis(
                "STOCKROOM_MUTATION_LATENCY_MS",
                DEFAULT_MUTATION_LATENCY_MS,
            ),
        }
    }

    /// No latency at all.
    pub fn immediate() -> Self {
        Self {
            load_latency: Duration::ZERO,
            mutation_latency: Duration::ZERO,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            load_latency: Duration::from_millis(DEFAULT_LOAD_LATENCY_MS),
            mutation_latency: Duration::from_millis(DEFAULT_MUTATION_LATENCY_MS),
        }
    }
}

fn env_millis(var: &str, default: u64) -> Duration {
    let millis = std::env::var(var)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default);
    Duration::from_millis(millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = StoreConfig::default();
        assert_eq!(config.load_latency, Duration::from_millis(800));
        assert_eq!(config.mutation_latency, Duration::from_millis(500));
    }

    #[test]
    fn test_immediate_has_no_latency() {
        let config = StoreConfig::immediate();
        assert!(config.load_latency.is_zero());
        assert!(config.mutation_latency.is_zero());
    }

    #[test]
    fn test_unset_variable_uses_default() {
        assert_eq!(
            env_millis("STOCKROOM_TEST_UNSET_LATENCY_VAR", 42),
            Duration::from_millis(42)
        );
    }
}
