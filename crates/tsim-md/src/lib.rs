//! # tsim-md
//!
//! Synthetic market data: tick generation, pacing, and feature extraction.
//!
//! ## Architecture
//!
//! ```text
//! Registry ──► TickGenerator ──► TickStream ──► channel ──► run_feature_loop
//!                  │                                         │
//!                  └─► depth::synthesize                     └─► MarketDataProcessor
//! ```
//!
//! - [`registry`] — fixed-capacity symbol/venue tables and weighted selection
//! - [`generator`] — random-walk tick generator and its counters
//! - [`depth`] — five-level book around a tick
//! - [`stream`] — paced iterator over a generator
//! - [`processor`] — ML features and pre-trade risk
//! - [`pipeline`] — feature worker loop with per-symbol history

pub mod depth;
pub mod generator;
pub mod pipeline;
pub mod processor;
pub mod registry;
pub mod stream;

pub use generator::{GenerationCounters, TickGenerator};
pub use pipeline::{PipelineSummary, SymbolHistory, run_feature_loop};
pub use processor::MarketDataProcessor;
pub use registry::{Registry, SymbolState};
pub use stream::{StopHandle, TickStream};
