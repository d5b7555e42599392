//! Session identifiers.

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

/// Identifier shared by every log entry of one client session.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    /// Generate a new session ID.
    pub fn generate() -> Self {
        Self(format!("{:x}-{:x}-{:x}", now_nanos(), next_seed(), next_seed()))
    }

    /// Create from an existing ID string.
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// LCG; only needs to differ between calls, not be unpredictable.
fn next_seed() -> u32 {
    static SEED: AtomicU32 = AtomicU32::new(12345);
    let mut current = SEED.load(Ordering::Relaxed);
    loop {
        let next = current.wrapping_mul(1103515245).wrapping_add(12345);
        match SEED.compare_exchange_weak(current, next, Ordering::Relaxed, Ordering::Relaxed) {
            Ok(_) => return next,
            Err(actual) => current = actual,
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn now_nanos() -> u128 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos()
}

// No system clock in the browser without JS bindings.
#[cfg(target_arch = "wasm32")]
fn now_nanos() -> u128 {
    0
}
