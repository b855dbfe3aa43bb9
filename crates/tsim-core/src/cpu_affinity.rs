//! Pinning the producer and feature-worker threads to CPU cores.
//!
//! Pacing accuracy and the per-tick timings the generator records both
//! suffer when the scheduler migrates the hot thread. Pinning is optional
//! and best effort: failures are logged, never returned.

use tracing::{info, warn};

/// Bind the current thread to `core_id`. Returns whether the OS accepted it.
pub fn bind_to_core(core_id: usize) -> bool {
    let core_ids = core_affinity::get_core_ids().unwrap_or_default();
    let Some(core) = core_ids.get(core_id) else {
        warn!("CPU core {core_id} not available (system has {} cores)", core_ids.len());
        return false;
    };

    let ok = core_affinity::set_for_current(*core);
    if ok {
        info!("bound thread to CPU core {core_id}");
    } else {
        warn!("failed to bind thread to CPU core {core_id}");
    }
    ok
}

/// Config-facing wrapper: `None` or a negative id means "don't pin".
pub fn maybe_bind(core_id: Option<i32>) -> bool {
    match core_id {
        Some(id) if id >= 0 => bind_to_core(id as usize),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_or_negative_is_a_no_op() {
        assert!(!maybe_bind(None));
        assert!(!maybe_bind(Some(-1)));
    }

    #[test]
    fn absurd_core_id_is_rejected() {
        assert!(!bind_to_core(1 << 20));
    }
}
