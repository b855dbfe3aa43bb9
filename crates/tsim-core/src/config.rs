//! Configuration parsing for the tick simulator.
//!
//! The runner reads its settings from a single JSON file. Every section is
//! optional; anything missing takes the defaults below, so `{}` is a valid
//! config that runs the default 27-symbol universe at 1000 ticks/s.
//!
//! # Example config
//!
//! ```json
//! {
//!   "simulator": { "module_name": "tsim", "log_path": "/tmp/log" },
//!   "generator": {
//!     "ticks_per_second": 5000,
//!     "seed": 42,
//!     "symbols": ["AAPL", "MSFT", "SPY"],
//!     "cpu_affinity": 2
//!   },
//!   "processor": { "history_len": 100, "position_size": 250.0 },
//!   "stream": { "mode": "virtual", "max_ticks": 1000000 }
//! }
//! ```

use serde::Deserialize;

use crate::error::SimError;
use crate::types::{PacingMode, VenueInfo, default_symbols, default_venues};

/// Upper bound for `processor.history_len`.
pub const MAX_HISTORY_LEN: usize = 100_000;

/// Top-level application config, deserialized from a JSON file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Module metadata (name, log path).
    pub simulator: Option<ModuleMeta>,
    pub generator: GeneratorConfig,
    pub processor: ProcessorConfig,
    pub stream: StreamConfig,
}

/// Module metadata block.
#[derive(Debug, Clone, Deserialize)]
pub struct ModuleMeta {
    pub module_name: Option<String>,
    pub log_path: Option<String>,
}

/// Tick generator settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Target rate; 0 means the 1 ms default interval.
    pub ticks_per_second: u32,

    /// Fixed RNG seed for reproducible runs. Clock-seeded when absent.
    pub seed: Option<u64>,

    /// Symbol universe (default: the built-in 27 names). Truncated to 64.
    pub symbols: Option<Vec<String>>,

    /// Venue table (default: the built-in 5 venues). Truncated to 8.
    pub venues: Option<Vec<VenueInfo>>,

    /// CPU core for the producer thread.
    pub cpu_affinity: Option<i32>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self { ticks_per_second: 1_000, seed: None, symbols: None, venues: None, cpu_affinity: None }
    }
}

impl GeneratorConfig {
    pub fn effective_symbols(&self) -> Vec<String> {
        self.symbols.clone().unwrap_or_else(default_symbols)
    }

    pub fn effective_venues(&self) -> Vec<VenueInfo> {
        self.venues.clone().unwrap_or_else(default_venues)
    }
}

/// Feature worker settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProcessorConfig {
    /// Rolling history kept per symbol.
    pub history_len: usize,

    /// Signed position size fed to the risk calculator.
    pub position_size: f32,

    /// Log worker stats every N processed ticks; 0 disables.
    pub stats_interval_ticks: u64,

    /// CPU core for the feature worker thread.
    pub cpu_affinity: Option<i32>,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self { history_len: 100, position_size: 100.0, stats_interval_ticks: 10_000, cpu_affinity: None }
    }
}

/// Stream pacing and run length.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    pub mode: PacingMode,

    /// Stop after this many ticks.
    pub max_ticks: Option<u64>,

    /// Stop after this many seconds of wall time.
    pub duration_sec: Option<u64>,

    /// Producer → feature worker channel bound.
    pub channel_capacity: usize,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self { mode: PacingMode::RealTime, max_ticks: None, duration_sec: None, channel_capacity: 8192 }
    }
}

impl AppConfig {
    /// Reject values that would make the pipeline unusable.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.processor.history_len == 0 {
            return Err(SimError::Config("processor.history_len must be > 0".into()));
        }
        if self.processor.history_len > MAX_HISTORY_LEN {
            return Err(SimError::Config(format!(
                "processor.history_len must be <= {MAX_HISTORY_LEN}, got {}",
                self.processor.history_len
            )));
        }
        if self.stream.channel_capacity == 0 {
            return Err(SimError::Config("stream.channel_capacity must be > 0".into()));
        }
        if let Some(symbols) = &self.generator.symbols
            && symbols.is_empty()
        {
            return Err(SimError::Config("generator.symbols must not be empty".into()));
        }
        if let Some(venues) = &self.generator.venues
            && venues.is_empty()
        {
            return Err(SimError::Config("generator.venues must not be empty".into()));
        }
        Ok(())
    }

    /// Module name from the metadata block, or `default`.
    pub fn module_name(&self, default: &str) -> String {
        self.simulator
            .as_ref()
            .and_then(|m| m.module_name.clone())
            .unwrap_or_else(|| default.to_string())
    }

    pub fn log_path(&self) -> Option<String> {
        self.simulator.as_ref().and_then(|m| m.log_path.clone())
    }
}

/// Load, parse, and validate a JSON config file.
pub fn load_config(path: &std::path::Path) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = serde_json::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let cfg: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg.generator.ticks_per_second, 1_000);
        assert_eq!(cfg.generator.effective_symbols().len(), 27);
        assert_eq!(cfg.generator.effective_venues().len(), 5);
        assert_eq!(cfg.processor.history_len, 100);
        assert_eq!(cfg.stream.mode, PacingMode::RealTime);
        assert_eq!(cfg.module_name("tsim"), "tsim");
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let cfg: AppConfig = serde_json::from_str(
            r#"{
                "simulator": { "module_name": "sim_a", "log_path": "/tmp/sim" },
                "generator": { "seed": 7, "symbols": ["AAPL", "SPY"] },
                "stream": { "mode": "virtual", "max_ticks": 500 }
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.generator.seed, Some(7));
        assert_eq!(cfg.generator.ticks_per_second, 1_000);
        assert_eq!(cfg.generator.effective_symbols(), vec!["AAPL", "SPY"]);
        assert_eq!(cfg.stream.mode, PacingMode::Virtual);
        assert_eq!(cfg.stream.max_ticks, Some(500));
        assert_eq!(cfg.stream.channel_capacity, 8192);
        assert_eq!(cfg.module_name("tsim"), "sim_a");
        assert_eq!(cfg.log_path().as_deref(), Some("/tmp/sim"));
    }

    #[test]
    fn validation_rejects_unusable_values() {
        let cfg: AppConfig = serde_json::from_str(r#"{ "processor": { "history_len": 0 } }"#).unwrap();
        assert!(matches!(cfg.validate(), Err(SimError::Config(_))));

        let cfg: AppConfig = serde_json::from_str(r#"{ "generator": { "symbols": [] } }"#).unwrap();
        assert!(matches!(cfg.validate(), Err(SimError::Config(_))));
    }

    #[test]
    fn validation_bounds_history_len() {
        let cfg: AppConfig =
            serde_json::from_str(r#"{ "processor": { "history_len": 1152921504606846976 } }"#).unwrap();
        assert!(matches!(cfg.validate(), Err(SimError::Config(msg)) if msg.contains("history_len")));

        let mut cfg = AppConfig::default();
        cfg.processor.history_len = MAX_HISTORY_LEN;
        assert!(cfg.validate().is_ok());
        cfg.processor.history_len = MAX_HISTORY_LEN + 1;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn load_config_reads_file() {
        let path = std::env::temp_dir().join(format!("tsim_cfg_{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "generator": { "ticks_per_second": 250 } }"#).unwrap();
        let cfg = load_config(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(cfg.generator.ticks_per_second, 250);
    }

    #[test]
    fn load_config_missing_file_errors() {
        assert!(load_config(std::path::Path::new("/nonexistent/tsim.json")).is_err());
    }
}
