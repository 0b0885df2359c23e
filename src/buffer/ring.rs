/*!
 * Ring Storage
 * Byte storage with head/tail cursors and wraparound copies
 */

use super::user::{Fault, UserSink, UserSource};
use crate::core::errors::DeviceError;
use crate::core::limits::MIN_BUFFER_CAPACITY;
use crate::core::types::{DeviceResult, Size};

/// Circular byte storage
///
/// One slot is always left unused so `head == tail` means empty and
/// `tail + 1 == head` (mod capacity) means full. Not synchronized; the
/// owning `SharedBuffer` holds it under its lock.
pub struct Ring {
    storage: Box<[u8]>,
    head: usize,
    tail: usize,
}

impl std::fmt::Debug for Ring {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ring")
            .field("capacity", &self.capacity())
            .field("head", &self.head)
            .field("tail", &self.tail)
            .field("used", &self.used())
            .finish()
    }
}

impl Ring {
    /// Allocate a zeroed ring of `capacity` bytes
    pub fn with_capacity(capacity: Size) -> DeviceResult<Self> {
        Ok(Self::from_storage(Self::allocate(capacity)?))
    }

    /// Allocate zeroed storage for a ring, failing instead of aborting when
    /// memory is unavailable
    ///
    /// `OutOfMemory` only covers a refused reservation. Zeroing touches every
    /// page, so under Linux overcommit a huge capacity that the allocator
    /// accepts can still get the process OOM-killed.
    pub fn allocate(capacity: Size) -> DeviceResult<Box<[u8]>> {
        if capacity < MIN_BUFFER_CAPACITY {
            return Err(DeviceError::invalid_argument(format!(
                "buffer capacity {} is below the minimum of {}",
                capacity, MIN_BUFFER_CAPACITY
            )));
        }

        let mut storage = Vec::new();
        storage
            .try_reserve_exact(capacity)
            .map_err(|_| DeviceError::OutOfMemory {
                requested: capacity,
            })?;
        storage.resize(capacity, 0);
        Ok(storage.into_boxed_slice())
    }

    fn from_storage(storage: Box<[u8]>) -> Self {
        Self {
            storage,
            head: 0,
            tail: 0,
        }
    }

    #[inline]
    pub fn capacity(&self) -> Size {
        self.storage.len()
    }

    #[inline]
    pub fn head(&self) -> usize {
        self.head
    }

    #[inline]
    pub fn tail(&self) -> usize {
        self.tail
    }

    /// Bytes buffered and not yet read
    #[inline]
    pub fn used(&self) -> Size {
        let capacity = self.capacity();
        (self.tail + capacity - self.head) % capacity
    }

    /// Bytes that can be written before the ring is full
    #[inline]
    pub fn free(&self) -> Size {
        self.capacity() - self.used() - 1
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head == self.tail
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.free() == 0
    }

    /// Copy up to `free()` bytes from `src` in at the tail
    ///
    /// Returns the number of bytes accepted. On fault the tail is not moved,
    /// so nothing becomes visible to readers.
    pub fn push_from<S: UserSource + ?Sized>(&mut self, src: &S) -> Result<Size, Fault> {
        let count = src.len().min(self.free());
        let first = count.min(self.capacity() - self.tail);

        src.copy_out(0, &mut self.storage[self.tail..self.tail + first])?;
        if count > first {
            src.copy_out(first, &mut self.storage[..count - first])?;
        }

        self.tail = (self.tail + count) % self.capacity();
        Ok(count)
    }

    /// Copy up to `used()` bytes out from the head into `dst`
    ///
    /// Returns the number of bytes delivered. On fault the head is not moved
    /// and the bytes stay buffered.
    pub fn pop_into<S: UserSink + ?Sized>(&mut self, dst: &mut S) -> Result<Size, Fault> {
        let count = dst.len().min(self.used());
        let first = count.min(self.capacity() - self.head);

        dst.copy_in(0, &self.storage[self.head..self.head + first])?;
        if count > first {
            dst.copy_in(first, &self.storage[..count - first])?;
        }

        self.head = (self.head + count) % self.capacity();
        Ok(count)
    }

    /// Install new storage, discarding buffered bytes and resetting both
    /// cursors. Returns the old storage.
    pub fn replace(&mut self, storage: Box<[u8]>) -> Box<[u8]> {
        self.head = 0;
        self.tail = 0;
        std::mem::replace(&mut self.storage, storage)
    }
}
