//! Operator stop token
//!
//! A cloneable flag set from outside the control thread (for example by a
//! Ctrl+C handler) and polled by the control loop at its poll points.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Shared stop request flag.
#[derive(Debug, Clone, Default)]
pub struct StopToken(Arc<AtomicBool>);

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl StopToken {
    /// Create a new, untriggered token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a stop. All clones of this token will observe it.
    pub fn trigger(&self) {
        self.0.store(true, Ordering::SeqCst)
    }

    /// Returns true if a stop has been requested.
    pub fn is_triggered(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
