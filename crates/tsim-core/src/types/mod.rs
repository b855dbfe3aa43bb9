//! Core data types: ticks, features, stats snapshots, venues, and the default
//! symbol universe.
//!
//! Everything that crosses the flat-call boundary is `#[repr(C)]` and `Copy`.

pub mod enums;
pub mod features;
pub mod market_data;
pub mod stats;
pub mod symbol;
pub mod venue;

pub use enums::*;
pub use features::*;
pub use market_data::*;
pub use stats::*;
pub use symbol::*;
pub use venue::*;
