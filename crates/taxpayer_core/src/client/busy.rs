//! Busy indicator shared between the view and in-flight store calls.

use std::cell::Cell;
use std::rc::Rc;

/// Counts in-flight store calls; busy while the count is non-zero.
///
/// Clones share the same counter, so a renderer (or a test double) can observe
/// the flag while a call is running.
#[derive(Debug, Clone, Default)]
pub struct BusyIndicator {
    in_flight: Rc<Cell<u32>>,
}

impl BusyIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.get() > 0
    }

    /// Marks one call as started; the returned guard marks it finished on drop.
    pub fn begin(&self) -> BusyGuard {
        self.in_flight.set(self.in_flight.get().saturating_add(1));
        BusyGuard {
            in_flight: Rc::clone(&self.in_flight),
        }
    }
}

/// Keeps the indicator busy until dropped.
#[derive(Debug)]
#[must_use = "the call is considered finished as soon as the guard is dropped"]
pub struct BusyGuard {
    in_flight: Rc<Cell<u32>>,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.in_flight.set(self.in_flight.get().saturating_sub(1));
    }
}
