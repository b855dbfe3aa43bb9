//! # tsim-ffi
//!
//! Flat C boundary over the generator and processor for host-language
//! embedding (ctypes, cffi, C++).
//!
//! Generators and processors cross the boundary as opaque pointers created
//! and destroyed here. Records cross by value through caller-owned
//! `#[repr(C)]` structs. Every function checks all of its pointers before
//! touching any state and reports failure as `0`; success is `1`.
//!
//! A generator handle must not be used from two threads at once. A
//! processor handle may be shared.

use std::ffi::{CStr, c_char, c_int};

use tracing::warn;
use tsim_core::types::{MarketTick, MlFeatures, PerformanceStats, RiskMetrics, default_venues};
use tsim_md::{MarketDataProcessor, TickGenerator};

const OK: c_int = 1;
const FAIL: c_int = 0;

// ---------------------------------------------------------------------------
// Generator
// ---------------------------------------------------------------------------

/// New clock-seeded generator over the default universe. Free with
/// [`destroy_tick_generator`].
#[unsafe(no_mangle)]
pub extern "C" fn create_tick_generator(ticks_per_second: u32) -> *mut TickGenerator {
    Box::into_raw(Box::new(TickGenerator::new(ticks_per_second)))
}

/// # Safety
/// `generator` must be null or a pointer from [`create_tick_generator`] not
/// yet destroyed.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn destroy_tick_generator(generator: *mut TickGenerator) {
    if !generator.is_null() {
        drop(unsafe { Box::from_raw(generator) });
    }
}

/// Write one tick into `output`. Fails on null pointers or an empty universe.
///
/// # Safety
/// `generator` must be a live handle; `output` must be writable.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn generate_tick_c(generator: *mut TickGenerator, output: *mut MarketTick) -> c_int {
    let (Some(generator), Some(output)) = (unsafe { generator.as_mut() }, unsafe { output.as_mut() }) else {
        return FAIL;
    };
    match generator.generate_tick() {
        Ok(tick) => {
            *output = tick;
            OK
        }
        Err(e) => {
            warn!("generate_tick_c: {e}");
            FAIL
        }
    }
}

/// Fill `count` ticks at `output` on the batch clock.
///
/// # Safety
/// `output` must point to `count` writable ticks.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn generate_tick_batch_c(
    generator: *mut TickGenerator,
    output: *mut MarketTick,
    count: usize,
) -> c_int {
    let Some(generator) = (unsafe { generator.as_mut() }) else {
        return FAIL;
    };
    if output.is_null() {
        return FAIL;
    }
    let out = unsafe { std::slice::from_raw_parts_mut(output, count) };
    match generator.generate_tick_batch(out) {
        Ok(()) => OK,
        Err(e) => {
            warn!("generate_tick_batch_c: {e}");
            FAIL
        }
    }
}

/// Replace the symbol universe with `symbol_count` C strings, keeping the
/// default venues. Nothing changes unless every entry is non-null. Invalid
/// UTF-8 is replaced, not rejected.
///
/// # Safety
/// `symbols` must point to `symbol_count` pointers, each null or a valid
/// NUL-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn initialize_symbols_c(
    generator: *mut TickGenerator,
    symbols: *const *const c_char,
    symbol_count: usize,
) -> c_int {
    let Some(generator) = (unsafe { generator.as_mut() }) else {
        return FAIL;
    };
    if symbols.is_null() {
        return FAIL;
    }

    let raw = unsafe { std::slice::from_raw_parts(symbols, symbol_count) };
    if raw.iter().any(|p| p.is_null()) {
        warn!("initialize_symbols_c: null entry in symbol array");
        return FAIL;
    }
    let names: Vec<String> = raw
        .iter()
        .map(|&p| unsafe { CStr::from_ptr(p) }.to_string_lossy().into_owned())
        .collect();

    generator.initialize_symbols(&names, &default_venues());
    OK
}

/// # Safety
/// `generator` must be a live handle; `output` must be writable.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn get_performance_stats_c(
    generator: *const TickGenerator,
    output: *mut PerformanceStats,
) -> c_int {
    let (Some(generator), Some(output)) = (unsafe { generator.as_ref() }, unsafe { output.as_mut() }) else {
        return FAIL;
    };
    *output = generator.performance_stats();
    OK
}

/// # Safety
/// `generator` must be a live handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn set_target_frequency_c(generator: *mut TickGenerator, ticks_per_second: u32) -> c_int {
    let Some(generator) = (unsafe { generator.as_mut() }) else {
        return FAIL;
    };
    generator.set_target_frequency(ticks_per_second);
    OK
}

// ---------------------------------------------------------------------------
// Processor
// ---------------------------------------------------------------------------

#[unsafe(no_mangle)]
pub extern "C" fn create_processor() -> *mut MarketDataProcessor {
    Box::into_raw(Box::new(MarketDataProcessor::new()))
}

/// # Safety
/// `processor` must be null or a pointer from [`create_processor`] not yet
/// destroyed.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn destroy_processor(processor: *mut MarketDataProcessor) {
    if !processor.is_null() {
        drop(unsafe { Box::from_raw(processor) });
    }
}

/// Features for a single tick with no history.
///
/// # Safety
/// `processor` must be a live handle; `input` readable; `output` writable.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn process_tick_c(
    processor: *const MarketDataProcessor,
    input: *const MarketTick,
    output: *mut MlFeatures,
) -> c_int {
    let (Some(processor), Some(input), Some(output)) =
        (unsafe { processor.as_ref() }, unsafe { input.as_ref() }, unsafe { output.as_mut() })
    else {
        return FAIL;
    };
    *output = processor.process_tick(input, &[]);
    OK
}

/// # Safety
/// `features` must be readable; `output` writable.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn calculate_risk_metrics_c(
    features: *const MlFeatures,
    position_size: f32,
    output: *mut RiskMetrics,
) -> c_int {
    let (Some(features), Some(output)) = (unsafe { features.as_ref() }, unsafe { output.as_mut() }) else {
        return FAIL;
    };
    *output = MarketDataProcessor::calculate_risk_metrics(features, position_size);
    OK
}
