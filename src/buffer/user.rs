/*!
 * Caller Buffers
 *
 * Fallible copy seams between the ring and a caller's memory. Plain slices
 * never fault; other implementations (mapped or foreign memory) may.
 */

use crate::core::errors::DeviceError;
use thiserror::Error;

/// A caller buffer could not be accessed
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("caller buffer inaccessible at offset {offset} ({len} bytes)")]
pub struct Fault {
    pub offset: usize,
    pub len: usize,
}

impl From<Fault> for DeviceError {
    fn from(fault: Fault) -> Self {
        DeviceError::Fault(fault.to_string())
    }
}

/// Bytes supplied by a writer
pub trait UserSource {
    /// Number of bytes offered
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy `dst.len()` bytes starting at `offset` into `dst`
    fn copy_out(&self, offset: usize, dst: &mut [u8]) -> Result<(), Fault>;
}

/// Space supplied by a reader
pub trait UserSink {
    /// Number of bytes that fit
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy `src` into the sink starting at `offset`
    fn copy_in(&mut self, offset: usize, src: &[u8]) -> Result<(), Fault>;
}

impl UserSource for [u8] {
    #[inline]
    fn len(&self) -> usize {
        <[u8]>::len(self)
    }

    #[inline]
    fn copy_out(&self, offset: usize, dst: &mut [u8]) -> Result<(), Fault> {
        let src = offset
            .checked_add(dst.len())
            .and_then(|end| self.get(offset..end))
            .ok_or(Fault {
                offset,
                len: dst.len(),
            })?;
        dst.copy_from_slice(src);
        Ok(())
    }
}

impl UserSource for Vec<u8> {
    #[inline]
    fn len(&self) -> usize {
        Vec::len(self)
    }

    #[inline]
    fn copy_out(&self, offset: usize, dst: &mut [u8]) -> Result<(), Fault> {
        self.as_slice().copy_out(offset, dst)
    }
}

impl UserSink for [u8] {
    #[inline]
    fn len(&self) -> usize {
        <[u8]>::len(self)
    }

    #[inline]
    fn copy_in(&mut self, offset: usize, src: &[u8]) -> Result<(), Fault> {
        let dst = offset
            .checked_add(src.len())
            .and_then(|end| self.get_mut(offset..end))
            .ok_or(Fault {
                offset,
                len: src.len(),
            })?;
        dst.copy_from_slice(src);
        Ok(())
    }
}

impl UserSink for Vec<u8> {
    #[inline]
    fn len(&self) -> usize {
        Vec::len(self)
    }

    #[inline]
    fn copy_in(&mut self, offset: usize, src: &[u8]) -> Result<(), Fault> {
        self.as_mut_slice().copy_in(offset, src)
    }
}
