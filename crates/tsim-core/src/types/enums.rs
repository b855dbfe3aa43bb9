//! Enumerations shared between the stream, config, and runner.

use serde::{Deserialize, Serialize};

/// How a tick stream spaces its output in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PacingMode {
    /// Sleep on the caller thread until each tick is due.
    #[default]
    RealTime,
    /// Advance a virtual clock by the target interval; never sleep.
    Virtual,
}

impl std::fmt::Display for PacingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RealTime => write!(f, "real_time"),
            Self::Virtual => write!(f, "virtual"),
        }
    }
}

/// Lifecycle of a tick stream. `Stopped` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StreamState {
    #[default]
    Created,
    Running,
    Stopped,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pacing_mode_from_config_strings() {
        let m: PacingMode = serde_json::from_str("\"virtual\"").unwrap();
        assert_eq!(m, PacingMode::Virtual);
        let m: PacingMode = serde_json::from_str("\"real_time\"").unwrap();
        assert_eq!(m, PacingMode::RealTime);
        assert_eq!(PacingMode::Virtual.to_string(), "virtual");
    }
}
