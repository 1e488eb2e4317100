//! Wake and stop signals shared between interrupt context and the tasks.

use crate::pin::EdgeHandler;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

/// Stop request for a task loop. Give each task its own instance.
pub type Shutdown = Signal<CriticalSectionRawMutex, ()>;

/// Single-slot wake channel from the edge interrupt to the sampler.
///
/// Any number of edges arriving while a wake is already pending collapse
/// into that one wake.
pub struct EdgeSignal {
    signal: Signal<CriticalSectionRawMutex, ()>,
}

impl EdgeSignal {
    /// Creates a signal with no pending wake.
    pub const fn new() -> Self {
        Self {
            signal: Signal::new(),
        }
    }

    /// Marks a wake as pending. Safe to call from interrupt context.
    #[inline]
    pub fn notify(&self) {
        self.signal.signal(());
    }

    /// Waits for a pending wake and consumes it.
    pub async fn wait(&self) {
        self.signal.wait().await
    }

    /// Returns `true` if a wake is pending and has not been consumed.
    pub fn is_pending(&self) -> bool {
        self.signal.signaled()
    }

    /// Drops any pending wake.
    pub fn clear(&self) {
        self.signal.reset();
    }
}

impl Default for EdgeSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl EdgeHandler for EdgeSignal {
    fn on_edge(&self) {
        self.notify();
    }
}
