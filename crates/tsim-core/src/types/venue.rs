//! Execution venue economics.

use serde::{Deserialize, Serialize};

/// Static fee and latency profile of one simulated venue.
///
/// The generator only uses the count of venues (venue choice is uniform);
/// fees and latencies are carried for downstream routing logic.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VenueInfo {
    pub name: String,
    pub maker_fee: f32,
    pub taker_fee: f32,
    pub rebate: f32,
    pub base_latency_us: u32,
    pub jitter_range_us: u32,
}

impl VenueInfo {
    pub fn new(name: &str, maker_fee: f32, taker_fee: f32, rebate: f32, base_latency_us: u32, jitter_range_us: u32) -> Self {
        Self {
            name: name.to_string(),
            maker_fee,
            taker_fee,
            rebate,
            base_latency_us,
            jitter_range_us,
        }
    }
}

/// The five US equity venues the simulator ships with.
pub fn default_venues() -> Vec<VenueInfo> {
    vec![
        VenueInfo::new("NYSE", 0.0003, 0.0003, 0.0001, 250, 50),
        VenueInfo::new("NASDAQ", 0.0003, 0.0003, 0.0001, 230, 45),
        VenueInfo::new("ARCA", 0.0002, 0.0003, 0.0002, 240, 40),
        // no maker fee, slower
        VenueInfo::new("IEX", 0.0000, 0.0009, 0.0000, 400, 100),
        VenueInfo::new("CBOE", 0.0002, 0.0003, 0.0001, 280, 60),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_venue_table() {
        let v = default_venues();
        assert_eq!(v.len(), 5);
        assert_eq!(v[3].name, "IEX");
        assert_eq!((v[3].base_latency_us, v[3].jitter_range_us), (400, 100));
    }

    #[test]
    fn deserializes_from_config_json() {
        let v: VenueInfo = serde_json::from_str(
            r#"{"name":"MEMX","maker_fee":0.0001,"taker_fee":0.0003,"rebate":0.0002,"base_latency_us":210,"jitter_range_us":30}"#,
        )
        .unwrap();
        assert_eq!(v.name, "MEMX");
        assert_eq!(v.base_latency_us, 210);
    }
}
