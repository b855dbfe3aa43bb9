//! # tsim-core
//!
//! Core crate for the tick simulator, providing:
//!
//! - **Types** (`types`) — ticks, features, risk/stats records, venues, default universe
//! - **Random numbers** (`rng`) — seeded xorshift64 generator
//! - **Configuration** (`config`) — JSON config deserialization
//! - **Error types** (`error`) — domain-specific `SimError` via thiserror
//! - **CPU affinity** (`cpu_affinity`) — thread-to-core pinning for the hot loops
//! - **Latency** (`latency`) — histogram-based latency statistics
//! - **Time utilities** (`time_util`) — nanosecond timestamps
//! - **Logging** (`logging`) — tracing-based structured logging

pub mod config;
pub mod cpu_affinity;
pub mod error;
pub mod latency;
pub mod logging;
pub mod rng;
pub mod time_util;
pub mod types;

// Re-export types at crate root for convenience.
pub use types::*;
