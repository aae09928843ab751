//! Low-level primitives for aligned memory.
//!
//! This is the only module in the crate allowed to contain `unsafe`.
//! Every `unsafe` block carries a `// SAFETY:` comment. The rest of the
//! crate works through [`RawAlloc`], which owns one zeroed allocation and
//! releases it with the exact `Layout` it was created with.

#![allow(unsafe_code)]

use std::alloc::{self, Layout};
use std::cell::Cell;
use std::ptr::NonNull;

thread_local! {
    static LIVE: Cell<usize> = const { Cell::new(0) };
}

/// Number of [`RawAlloc`]s created and not yet dropped on this thread.
pub(crate) fn live_count() -> usize {
    LIVE.with(Cell::get)
}

/// One zeroed heap allocation with a fixed layout.
pub(crate) struct RawAlloc {
    ptr: NonNull<u8>,
    layout: Layout,
}

// SAFETY: `RawAlloc` uniquely owns its allocation; no aliasing pointer
// escapes except through borrows tied to `&self` / `&mut self`.
unsafe impl Send for RawAlloc {}
// SAFETY: shared access only hands out `&[T]`, which is `Sync` for the
// plain numeric element types this crate stores.
unsafe impl Sync for RawAlloc {}

impl RawAlloc {
    /// Allocate zeroed memory for `layout`.
    ///
    /// Returns `None` if the allocator reports failure. `layout` must have
    /// a non-zero size.
    pub(crate) fn zeroed(layout: Layout) -> Option<Self> {
        debug_assert!(layout.size() > 0);
        // SAFETY: callers guarantee a non-zero size; the alignment is a
        // valid power of two because it came from a `Layout`.
        let ptr = unsafe { alloc::alloc_zeroed(layout) };
        let ptr = NonNull::new(ptr)?;
        LIVE.with(|c| c.set(c.get() + 1));
        log::trace!(
            "aligned alloc: {} bytes @ {:p} (align {})",
            layout.size(),
            ptr,
            layout.align()
        );
        Some(Self { ptr, layout })
    }

    pub(crate) fn layout(&self) -> Layout {
        self.layout
    }

    pub(crate) fn as_ptr(&self) -> *const u8 {
        self.ptr.as_ptr()
    }

    /// View the first `len` elements as `&[T]`.
    ///
    /// `T` must be a plain numeric type (every zeroed bit pattern valid),
    /// `len * size_of::<T>()` must fit in the layout, and the layout
    /// alignment must be at least `align_of::<T>()`.
    pub(crate) fn as_slice<T: Copy>(&self, len: usize) -> &[T] {
        assert!(len * std::mem::size_of::<T>() <= self.layout.size());
        assert!(self.layout.align() >= std::mem::align_of::<T>());
        // SAFETY: the region is allocated, zero-initialised, large enough
        // and suitably aligned (checked above); `T` is a numeric type for
        // which all bit patterns are valid. The borrow is tied to `self`.
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr().cast::<T>(), len) }
    }

    /// Mutable counterpart of [`RawAlloc::as_slice`].
    pub(crate) fn as_mut_slice<T: Copy>(&mut self, len: usize) -> &mut [T] {
        assert!(len * std::mem::size_of::<T>() <= self.layout.size());
        assert!(self.layout.align() >= std::mem::align_of::<T>());
        // SAFETY: as in `as_slice`; `&mut self` guarantees exclusivity.
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr().cast::<T>(), len) }
    }
}

impl Drop for RawAlloc {
    fn drop(&mut self) {
        log::trace!("aligned free: {} bytes @ {:p}", self.layout.size(), self.ptr);
        // SAFETY: `ptr` was returned by `alloc_zeroed` with exactly this
        // layout and is released only here, once.
        unsafe { alloc::dealloc(self.ptr.as_ptr(), self.layout) };
        LIVE.with(|c| c.set(c.get().saturating_sub(1)));
    }
}
