//! `stockroom-store`
//!
//! **Responsibility:** the authoritative in-memory product collection.
//!
//! This crate provides:
//! - Versioned, immutable snapshots published over a watch channel
//! - Single-flight initialization from the seed collection
//! - Serialized create/update/delete with an injectable latency effect
//! - Outcome notifications for the UI layer

pub mod clock;
pub mod config;
pub mod effect;
pub mod notify;
pub mod snapshot;
pub mod store;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::StoreConfig;
pub use effect::{EffectError, MutationEffect, Operation, SimulatedLatency};
pub use notify::{MemorySink, Notification, NotificationSink, NullSink, Severity, TracingSink};
pub use snapshot::Snapshot;
pub use store::{ProductStore, ProductStoreBuilder};
