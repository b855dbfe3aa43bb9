//! Typed error definitions for the tick simulator.
//!
//! Most misuse in this system is clamped to a safe default rather than
//! reported (oversized symbol lists are truncated, unknown symbols get a
//! default price). [`SimError`] covers the remaining cases where no sensible
//! value can be produced. Variants implement `std::error::Error` via
//! `thiserror`, so they convert into `anyhow::Error` at the binary edge.

use thiserror::Error;

/// Domain-specific errors for the tick simulator.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// Configuration parsing or validation error.
    #[error("config error: {0}")]
    Config(String),

    /// The registry has no symbols or no venues, so no valid tick exists.
    #[error("empty universe: {symbols} symbol(s), {venues} venue(s)")]
    EmptyUniverse { symbols: usize, venues: usize },

    /// A symbol index outside the active part of the registry.
    #[error("symbol index {index} out of range (active symbols: {count})")]
    SymbolIndex { index: usize, count: usize },
}

/// Convenience alias used by the library crates.
pub type Result<T> = std::result::Result<T, SimError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_values() {
        let e = SimError::SymbolIndex { index: 70, count: 27 };
        assert_eq!(e.to_string(), "symbol index 70 out of range (active symbols: 27)");

        let e = SimError::EmptyUniverse { symbols: 0, venues: 5 };
        assert_eq!(e.to_string(), "empty universe: 0 symbol(s), 5 venue(s)");
    }

    #[test]
    fn converts_into_anyhow() {
        let e: anyhow::Error = SimError::Config("history_len must be > 0".into()).into();
        assert!(e.to_string().starts_with("config error"));
    }
}
