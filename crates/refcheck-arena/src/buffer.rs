//! Owning, aligned, typed buffers.
//!
//! An [`AlignedBuffer`] owns one allocation whose start address is a
//! multiple of a caller-chosen power-of-two alignment. The allocation is
//! released exactly once, when the buffer is dropped.

use std::alloc::Layout;
use std::fmt;
use std::marker::PhantomData;
use std::mem;
use std::ops::{Deref, DerefMut};

use refcheck_core::{Element, NumericKind};

use crate::error::AllocError;
use crate::raw::{self, RawAlloc};

/// Size of a pointer in bytes; the floor for both alignment and size.
pub const POINTER_SIZE: usize = mem::size_of::<*const ()>();

/// Number of [`AlignedBuffer`]s alive on the calling thread.
///
/// Counts buffers allocated and not yet dropped by this thread. Intended
/// for leak assertions in tests.
pub fn live_allocations() -> usize {
    raw::live_count()
}

/// Heap storage for `len` elements of `T`, aligned to `alignment` bytes.
///
/// The allocated capacity may exceed `len` (see
/// [`AlignedBuffer::from_slice`]); only the first `len` elements are
/// visible through the slice accessors.
pub struct AlignedBuffer<T: Element> {
    raw: RawAlloc,
    len: usize,
    _marker: PhantomData<T>,
}

impl<T: Element> AlignedBuffer<T> {
    /// Allocate `count` zeroed elements aligned to `alignment` bytes.
    ///
    /// # Panics
    ///
    /// Panics if `alignment` is not a power of two, is smaller than a
    /// pointer or than `T`, if `count * size_of::<T>()` is smaller than a
    /// pointer, or if the allocation fails.
    pub fn zeroed(count: usize, alignment: usize) -> Self {
        Self::try_zeroed(count, alignment)
            .unwrap_or_else(|e| panic!("aligned allocation failed: {e}"))
    }

    /// Fallible form of [`AlignedBuffer::zeroed`].
    ///
    /// # Errors
    ///
    /// Returns the violated precondition as an [`AllocError`].
    pub fn try_zeroed(count: usize, alignment: usize) -> Result<Self, AllocError> {
        let raw = allocate::<T>(count, alignment)?;
        Ok(Self {
            raw,
            len: count,
            _marker: PhantomData,
        })
    }

    /// Allocate an aligned copy of `data`.
    ///
    /// The allocation is padded up to one pointer's worth of bytes so that
    /// short arrays (including single scalars) can be copied; `len()`
    /// still reports `data.len()`.
    ///
    /// # Panics
    ///
    /// Panics under the same alignment conditions as
    /// [`AlignedBuffer::zeroed`].
    pub fn from_slice(data: &[T], alignment: usize) -> Self {
        Self::try_from_slice(data, alignment)
            .unwrap_or_else(|e| panic!("aligned allocation failed: {e}"))
    }

    /// Fallible form of [`AlignedBuffer::from_slice`].
    ///
    /// # Errors
    ///
    /// Returns [`AllocError::InvalidAlignment`], [`AllocError::SizeOverflow`]
    /// or [`AllocError::OutOfMemory`].
    pub fn try_from_slice(data: &[T], alignment: usize) -> Result<Self, AllocError> {
        let min_count = POINTER_SIZE.div_ceil(mem::size_of::<T>());
        let raw = allocate::<T>(data.len().max(min_count), alignment)?;
        let mut buf = Self {
            raw,
            len: data.len(),
            _marker: PhantomData,
        };
        buf.as_mut_slice().copy_from_slice(data);
        Ok(buf)
    }

    /// Number of visible elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the buffer has no visible elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Alignment of the start address in bytes.
    pub fn alignment(&self) -> usize {
        self.raw.layout().align()
    }

    /// Number of elements the allocation can hold.
    pub fn capacity(&self) -> usize {
        self.raw.layout().size() / mem::size_of::<T>()
    }

    /// Element kind stored in this buffer.
    pub fn kind(&self) -> NumericKind {
        T::KIND
    }

    /// Start address of the buffer.
    pub fn as_ptr(&self) -> *const T {
        self.raw.as_ptr().cast()
    }

    /// The visible elements.
    pub fn as_slice(&self) -> &[T] {
        self.raw.as_slice(self.len)
    }

    /// The visible elements, mutably.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.raw.as_mut_slice(self.len)
    }
}

/// Validate the request and allocate zeroed storage for `count` elements.
fn allocate<T: Element>(count: usize, alignment: usize) -> Result<RawAlloc, AllocError> {
    let element_size = mem::size_of::<T>();
    let minimum = POINTER_SIZE.max(element_size);
    if !alignment.is_power_of_two() || alignment < minimum {
        return Err(AllocError::InvalidAlignment { alignment, minimum });
    }

    let bytes = count
        .checked_mul(element_size)
        .ok_or(AllocError::SizeOverflow {
            count,
            element_size,
        })?;
    if bytes < POINTER_SIZE {
        return Err(AllocError::TooSmall {
            bytes,
            minimum: POINTER_SIZE,
        });
    }

    let layout = Layout::from_size_align(bytes, alignment).map_err(|_| AllocError::SizeOverflow {
        count,
        element_size,
    })?;
    RawAlloc::zeroed(layout).ok_or(AllocError::OutOfMemory { bytes })
}

impl<T: Element> Deref for AlignedBuffer<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T: Element> DerefMut for AlignedBuffer<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T: Element> Clone for AlignedBuffer<T> {
    fn clone(&self) -> Self {
        Self::from_slice(self.as_slice(), self.alignment())
    }
}

impl<T: Element> fmt::Debug for AlignedBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlignedBuffer")
            .field("kind", &T::KIND)
            .field("len", &self.len)
            .field("alignment", &self.alignment())
            .field("data", &self.as_slice())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn zeroed_buffer_is_aligned_and_zero() {
        let buf = AlignedBuffer::<f64>::zeroed(16, 128);
        assert_eq!(buf.len(), 16);
        assert_eq!(buf.alignment(), 128);
        assert_eq!(buf.as_ptr() as usize % 128, 0);
        assert!(buf.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn from_slice_copies_every_element() {
        let buf = AlignedBuffer::from_slice(&[1i32, 2, 3, 4], 64);
        assert_eq!(buf.as_slice(), &[1, 2, 3, 4]);
        assert_eq!(buf.kind(), NumericKind::I32);
    }

    #[test]
    fn from_slice_pads_short_inputs() {
        let buf = AlignedBuffer::from_slice(&[7.5f32], 128);
        assert_eq!(buf.len(), 1);
        assert!(buf.capacity() >= POINTER_SIZE / 4);
        assert_eq!(buf[0], 7.5);
    }

    #[test]
    fn empty_slice_is_allowed() {
        let buf = AlignedBuffer::<f32>::from_slice(&[], 16);
        assert!(buf.is_empty());
        assert!(buf.as_slice().is_empty());
    }

    #[test]
    fn writes_through_deref_mut() {
        let mut buf = AlignedBuffer::<f32>::zeroed(4, 32);
        buf[2] = 3.0;
        buf.as_mut_slice()[3] = 4.0;
        assert_eq!(&buf[..], &[0.0, 0.0, 3.0, 4.0]);
    }

    #[test]
    fn clone_is_independent() {
        let a = AlignedBuffer::from_slice(&[1.0f64, 2.0], 64);
        let mut b = a.clone();
        b[0] = 9.0;
        assert_eq!(a[0], 1.0);
        assert_eq!(b.alignment(), 64);
        assert_ne!(a.as_ptr(), b.as_ptr());
    }

    #[test]
    fn rejects_non_power_of_two_alignment() {
        let err = AlignedBuffer::<f32>::try_zeroed(16, 48).unwrap_err();
        assert!(matches!(err, AllocError::InvalidAlignment { alignment: 48, .. }));
    }

    #[test]
    fn rejects_alignment_below_pointer_size() {
        let err = AlignedBuffer::<f32>::try_zeroed(16, 4).unwrap_err();
        assert_eq!(
            err,
            AllocError::InvalidAlignment {
                alignment: 4,
                minimum: POINTER_SIZE
            }
        );
    }

    #[test]
    fn rejects_request_below_pointer_size() {
        let err = AlignedBuffer::<f32>::try_zeroed(1, 16).unwrap_err();
        assert_eq!(
            err,
            AllocError::TooSmall {
                bytes: 4,
                minimum: POINTER_SIZE
            }
        );
    }

    #[test]
    fn rejects_overflowing_request() {
        let err = AlignedBuffer::<f64>::try_zeroed(usize::MAX / 4, 64).unwrap_err();
        assert!(matches!(err, AllocError::SizeOverflow { .. }));
    }

    #[test]
    #[should_panic(expected = "aligned allocation failed")]
    fn zeroed_panics_on_bad_alignment() {
        let _ = AlignedBuffer::<f64>::zeroed(8, 3);
    }

    #[test]
    fn drop_releases_exactly_once() {
        let before = live_allocations();
        let a = AlignedBuffer::<i32>::zeroed(32, 128);
        let b = a.clone();
        assert_eq!(live_allocations(), before + 2);
        drop(a);
        assert_eq!(live_allocations(), before + 1);
        let none: Option<AlignedBuffer<i32>> = None;
        drop(none);
        drop(b);
        assert_eq!(live_allocations(), before);
    }

    proptest! {
        #[test]
        fn start_address_honours_alignment(count in 2usize..512, shift in 3u32..13) {
            let alignment = 1usize << shift;
            let buf = AlignedBuffer::<f32>::zeroed(count, alignment);
            prop_assert_eq!(buf.as_ptr() as usize % alignment, 0);
            prop_assert_eq!(buf.len(), count);
        }

        #[test]
        fn writes_do_not_touch_neighbours(values in proptest::collection::vec(any::<i32>(), 2..128)) {
            let mut first = AlignedBuffer::<i32>::zeroed(values.len(), 64);
            let second = AlignedBuffer::<i32>::zeroed(values.len(), 64);
            first.copy_from_slice(&values);
            prop_assert_eq!(first.as_slice(), values.as_slice());
            prop_assert!(second.iter().all(|&v| v == 0));
        }
    }
}
