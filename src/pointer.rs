//! Last known pointer position, shared between the input side and the
//! simulation.
//!
//! Both coordinates live in one `AtomicU64`, so a reader never sees the x
//! of one event paired with the y of another, even if input is delivered on
//! a different thread from the frame loop.

use glam::Vec2;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Bit pattern meaning "no position reported yet". Two quiet NaNs, which a
/// real surface coordinate never is.
const UNSET: u64 = u64::MAX;

/// Cloneable handle to a shared pointer position.
///
/// Clones share the same cell: one writer (whoever listens for pointer
/// events) and any number of readers.
#[derive(Debug, Clone)]
pub struct SharedPointer {
    bits: Arc<AtomicU64>,
}

impl SharedPointer {
    /// A pointer that has never been reported.
    pub fn new() -> Self {
        Self {
            bits: Arc::new(AtomicU64::new(UNSET)),
        }
    }

    /// Record a new position in surface-local coordinates.
    ///
    /// Non-finite coordinates are ignored.
    pub fn set(&self, position: Vec2) {
        if !position.is_finite() {
            return;
        }
        let packed = ((position.x.to_bits() as u64) << 32) | position.y.to_bits() as u64;
        self.bits.store(packed, Ordering::Release);
    }

    /// Forget the position, as if it had never been reported.
    pub fn reset(&self) {
        self.bits.store(UNSET, Ordering::Release);
    }

    /// The last reported position, if any.
    pub fn get(&self) -> Option<Vec2> {
        let packed = self.bits.load(Ordering::Acquire);
        if packed == UNSET {
            return None;
        }
        let x = f32::from_bits((packed >> 32) as u32);
        let y = f32::from_bits(packed as u32);
        Some(Vec2::new(x, y))
    }
}

impl Default for SharedPointer {
    fn default() -> Self {
        Self::new()
    }
}
