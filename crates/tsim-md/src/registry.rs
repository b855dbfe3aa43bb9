//! Symbol and venue registry: the generator's fixed-capacity state tables.
//!
//! Both tables are boxed arrays sized to their capacity with an explicit
//! active count. Oversized inputs are truncated, never rejected, and missing
//! seed-table entries fall back to defaults, so [`Registry::initialize`]
//! cannot fail.

use ahash::AHashMap;
use tracing::info;
use tsim_core::rng::XorShift64;
use tsim_core::types::{VenueInfo, base_price, tick_multiplier};

/// Symbol table capacity.
pub const MAX_SYMBOLS: usize = 64;

/// Venue table capacity.
pub const MAX_VENUES: usize = 8;

/// Mutable simulation state of one instrument.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SymbolState {
    pub current_price: f32,
    /// Per-tick move scale; drawn in `[0.15, 0.45)` at init.
    pub volatility: f32,
    pub avg_volume: u32,
    /// Relative sampling weight.
    pub tick_multiplier: u32,
    pub last_update_ns: u64,
    /// Signed drift, drawn in `[-0.02, 0.02)` at init.
    pub price_trend: f32,
    pub symbol_name: String,
}

/// Capacity-bounded symbol and venue tables plus a name index.
pub struct Registry {
    symbols: Box<[SymbolState; MAX_SYMBOLS]>,
    venues: Box<[VenueInfo; MAX_VENUES]>,
    num_symbols: usize,
    num_venues: usize,
    by_name: AHashMap<String, u32>,
}

impl Registry {
    /// An empty registry. Useless for generation until initialized.
    pub fn new() -> Self {
        Self {
            symbols: Box::new(std::array::from_fn(|_| SymbolState::default())),
            venues: Box::new(std::array::from_fn(|_| VenueInfo::default())),
            num_symbols: 0,
            num_venues: 0,
            by_name: AHashMap::new(),
        }
    }

    /// Replace the whole universe.
    ///
    /// Draws per symbol, in order: volatility, average volume, trend. Slots
    /// past the new active counts are reset so nothing from a previous
    /// universe survives.
    pub fn initialize<S: AsRef<str>>(&mut self, symbol_names: &[S], venue_configs: &[VenueInfo], rng: &mut XorShift64) {
        self.num_symbols = symbol_names.len().min(MAX_SYMBOLS);
        self.num_venues = venue_configs.len().min(MAX_VENUES);
        self.by_name.clear();

        for (i, name) in symbol_names.iter().take(self.num_symbols).enumerate() {
            let name = name.as_ref();
            self.symbols[i] = SymbolState {
                current_price: base_price(i),
                volatility: rng.uniform_f32(0.15, 0.45),
                avg_volume: rng.uniform_u32(10_000, 100_000),
                tick_multiplier: tick_multiplier(i),
                last_update_ns: 0,
                price_trend: rng.uniform_f32(-0.02, 0.02),
                symbol_name: name.to_string(),
            };
            // First registration wins for duplicate names.
            self.by_name.entry(name.to_string()).or_insert(i as u32);
        }
        for slot in &mut self.symbols[self.num_symbols..] {
            *slot = SymbolState::default();
        }

        for (i, venue) in venue_configs.iter().take(self.num_venues).enumerate() {
            self.venues[i] = venue.clone();
        }
        for slot in &mut self.venues[self.num_venues..] {
            *slot = VenueInfo::default();
        }

        if symbol_names.len() > MAX_SYMBOLS || venue_configs.len() > MAX_VENUES {
            info!(
                "registry truncated input: {} -> {} symbols, {} -> {} venues",
                symbol_names.len(),
                self.num_symbols,
                venue_configs.len(),
                self.num_venues,
            );
        }
        info!("registry initialized: {} symbols, {} venues", self.num_symbols, self.num_venues);
    }

    #[inline]
    pub fn num_symbols(&self) -> usize {
        self.num_symbols
    }

    #[inline]
    pub fn num_venues(&self) -> usize {
        self.num_venues
    }

    /// Active symbols in registration order.
    #[inline]
    pub fn symbols(&self) -> &[SymbolState] {
        &self.symbols[..self.num_symbols]
    }

    #[inline]
    pub fn venues(&self) -> &[VenueInfo] {
        &self.venues[..self.num_venues]
    }

    pub fn symbol(&self, idx: usize) -> Option<&SymbolState> {
        self.symbols().get(idx)
    }

    pub fn symbol_mut(&mut self, idx: usize) -> Option<&mut SymbolState> {
        let n = self.num_symbols;
        self.symbols[..n].get_mut(idx)
    }

    pub fn venue(&self, idx: usize) -> Option<&VenueInfo> {
        self.venues().get(idx)
    }

    /// Registration index of a symbol name.
    pub fn symbol_id(&self, name: &str) -> Option<u32> {
        self.by_name.get(name).copied()
    }

    pub fn symbol_name(&self, idx: usize) -> Option<&str> {
        self.symbol(idx).map(|s| s.symbol_name.as_str())
    }

    /// Sum of all active sampling weights.
    pub fn total_weight(&self) -> u32 {
        self.symbols().iter().map(|s| s.tick_multiplier).sum()
    }

    /// Weighted pick for a draw in `[0, total_weight)`.
    ///
    /// Scans in registration order and returns the first symbol whose
    /// cumulative weight exceeds `draw`, so lower indices win at boundaries.
    /// Out-of-range draws select symbol 0.
    pub fn select(&self, draw: u32) -> usize {
        let mut cumulative = 0u32;
        for (i, s) in self.symbols().iter().enumerate() {
            cumulative += s.tick_multiplier;
            if draw < cumulative {
                return i;
            }
        }
        0
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use tsim_core::types::{DEFAULT_BASE_PRICE, DEFAULT_TICK_MULTIPLIER, default_symbols, default_venues};

    use super::*;

    fn registry(symbols: &[String], venues: &[VenueInfo]) -> Registry {
        let mut r = Registry::new();
        r.initialize(symbols, venues, &mut XorShift64::new(11));
        r
    }

    #[test]
    fn default_universe_loads_tables() {
        let r = registry(&default_symbols(), &default_venues());
        assert_eq!(r.num_symbols(), 27);
        assert_eq!(r.num_venues(), 5);
        assert_eq!(r.symbol(0).unwrap().current_price, 227.21);
        assert_eq!(r.symbol(22).unwrap().tick_multiplier, 8);
        assert_eq!(r.symbol_id("SPY"), Some(22));
        assert_eq!(r.symbol_name(1), Some("MSFT"));
        assert_eq!(r.venue(1).unwrap().name, "NASDAQ");
    }

    #[test]
    fn random_fields_within_init_ranges() {
        let r = registry(&default_symbols(), &default_venues());
        for s in r.symbols() {
            assert!((0.15..0.45).contains(&s.volatility), "{}", s.volatility);
            assert!((10_000..=100_000).contains(&s.avg_volume));
            assert!((-0.02..0.02).contains(&s.price_trend));
            assert_eq!(s.last_update_ns, 0);
        }
    }

    #[test]
    fn oversized_inputs_truncate() {
        let symbols: Vec<String> = (0..100).map(|i| format!("SYM{i}")).collect();
        let venues: Vec<VenueInfo> = (0..12).map(|i| VenueInfo::new(&format!("V{i}"), 0.0, 0.0, 0.0, 100, 10)).collect();
        let r = registry(&symbols, &venues);
        assert_eq!(r.num_symbols(), MAX_SYMBOLS);
        assert_eq!(r.num_venues(), MAX_VENUES);
        assert_eq!(r.symbol_id("SYM63"), Some(63));
        assert_eq!(r.symbol_id("SYM64"), None);
    }

    #[test]
    fn positions_past_tables_use_defaults() {
        let symbols: Vec<String> = (0..30).map(|i| format!("S{i}")).collect();
        let r = registry(&symbols, &default_venues());
        assert_eq!(r.symbol(28).unwrap().current_price, DEFAULT_BASE_PRICE);
        assert_eq!(r.symbol(29).unwrap().tick_multiplier, DEFAULT_TICK_MULTIPLIER);
    }

    #[test]
    fn reinitialize_replaces_everything() {
        let mut r = registry(&default_symbols(), &default_venues());
        r.symbol_mut(0).unwrap().current_price = 1.0;

        let small = vec!["XYZ".to_string()];
        r.initialize(&small, &default_venues()[..2], &mut XorShift64::new(5));
        assert_eq!(r.num_symbols(), 1);
        assert_eq!(r.num_venues(), 2);
        assert_eq!(r.symbol(0).unwrap().symbol_name, "XYZ");
        assert_eq!(r.symbol(0).unwrap().current_price, 227.21);
        assert!(r.symbol(1).is_none());
        assert_eq!(r.symbol_id("AAPL"), None);
        assert_eq!(r.total_weight(), 5);
    }

    #[test]
    fn select_is_first_exceeding() {
        let symbols: Vec<String> = ["A", "B", "C"].iter().map(|s| s.to_string()).collect();
        // Weights from the table: 5, 5, 4 -> cumulative 5, 10, 14.
        let r = registry(&symbols, &default_venues());
        assert_eq!(r.total_weight(), 14);
        assert_eq!(r.select(0), 0);
        assert_eq!(r.select(4), 0);
        assert_eq!(r.select(5), 1);
        assert_eq!(r.select(9), 1);
        assert_eq!(r.select(10), 2);
        assert_eq!(r.select(13), 2);
        assert_eq!(r.select(14), 0);
    }

    #[test]
    fn empty_registry() {
        let r = Registry::new();
        assert_eq!(r.num_symbols(), 0);
        assert_eq!(r.total_weight(), 0);
        assert!(r.symbols().is_empty());
        assert_eq!(r.select(0), 0);
    }
}
