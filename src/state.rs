//! The shared state register between the sampler and the reactor.

use core::cell::Cell;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::RawMutex;

/// Debounced input level, guarded by a lock.
///
/// The value is only reachable through the lock, and each access holds it
/// for a single read or a single write. Only the [`Sampler`](crate::Sampler)
/// can store; everyone else may only load.
///
/// # Type Parameters
/// * `M` - Raw mutex guarding the value (e.g. `CriticalSectionRawMutex`)
pub struct SharedState<M: RawMutex> {
    value: Mutex<M, Cell<bool>>,
}

impl<M: RawMutex> SharedState<M> {
    /// Creates a register holding `false`.
    pub const fn new() -> Self {
        Self {
            value: Mutex::new(Cell::new(false)),
        }
    }

    /// Reads the current value under the lock.
    #[inline]
    pub fn load(&self) -> bool {
        self.value.lock(|value| value.get())
    }

    #[inline]
    pub(crate) fn store(&self, level: bool) {
        self.value.lock(|value| value.set(level));
    }
}

impl<M: RawMutex> Default for SharedState<M> {
    fn default() -> Self {
        Self::new()
    }
}
