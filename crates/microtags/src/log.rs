//! Bounded Entry Storage
//!
//! Fixed array plus count backing every logger; no allocation, no growth.

use crate::error::LogError;
use tracing::warn;

#[derive(Debug, Clone)]
pub(crate) struct Entries<T, const N: usize> {
    items: [T; N],
    count: usize,
}

impl<T: Copy + Default, const N: usize> Entries<T, N> {
    pub(crate) fn new() -> Self {
        Self {
            items: [T::default(); N],
            count: 0,
        }
    }

    pub(crate) fn push(&mut self, item: T) -> Result<(), LogError> {
        let slot = self.items.get_mut(self.count).ok_or_else(|| {
            warn!(capacity = N, "log full, entry dropped");
            LogError::Full { capacity: N }
        })?;
        *slot = item;
        self.count += 1;
        Ok(())
    }

    pub(crate) fn as_slice(&self) -> &[T] {
        &self.items[..self.count]
    }

    pub(crate) fn clear(&mut self) {
        self.count = 0;
    }
}
