//! Per-kind baseline storage.
//!
//! [`BaselineRegistry`] holds at most one reference array per
//! [`NumericKind`]. Setting a baseline transfers ownership of the buffer
//! into the registry and drops whatever was there before; reading never
//! copies.

use indexmap::IndexMap;
use refcheck_arena::AlignedBuffer;
use refcheck_core::{Element, NumericKind};

/// A stored reference array of one of the supported kinds.
#[derive(Clone, Debug)]
pub enum Baseline {
    /// Double-precision baseline.
    F64(AlignedBuffer<f64>),
    /// Single-precision baseline.
    F32(AlignedBuffer<f32>),
    /// 32-bit integer baseline.
    I32(AlignedBuffer<i32>),
}

impl Baseline {
    /// Element kind of the stored array.
    pub fn kind(&self) -> NumericKind {
        match self {
            Self::F64(_) => NumericKind::F64,
            Self::F32(_) => NumericKind::F32,
            Self::I32(_) => NumericKind::I32,
        }
    }

    /// Number of elements in the stored array.
    pub fn len(&self) -> usize {
        match self {
            Self::F64(b) => b.len(),
            Self::F32(b) => b.len(),
            Self::I32(b) => b.len(),
        }
    }

    /// Whether the stored array is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Element types that can be stored in a [`BaselineRegistry`].
///
/// Implemented for every [`Element`]; maps a typed buffer to and from the
/// matching [`Baseline`] variant.
pub trait BaselineElement: Element {
    /// Wrap a typed buffer in its [`Baseline`] variant.
    fn wrap(buffer: AlignedBuffer<Self>) -> Baseline;

    /// Borrow the typed buffer if `baseline` is this kind.
    fn view(baseline: &Baseline) -> Option<&AlignedBuffer<Self>>;

    /// Take the typed buffer if `baseline` is this kind.
    fn unwrap(baseline: Baseline) -> Option<AlignedBuffer<Self>>;
}

macro_rules! impl_baseline_element {
    ($t:ty, $variant:ident) => {
        impl BaselineElement for $t {
            fn wrap(buffer: AlignedBuffer<Self>) -> Baseline {
                Baseline::$variant(buffer)
            }

            fn view(baseline: &Baseline) -> Option<&AlignedBuffer<Self>> {
                match baseline {
                    Baseline::$variant(b) => Some(b),
                    _ => None,
                }
            }

            fn unwrap(baseline: Baseline) -> Option<AlignedBuffer<Self>> {
                match baseline {
                    Baseline::$variant(b) => Some(b),
                    _ => None,
                }
            }
        }
    };
}

impl_baseline_element!(f64, F64);
impl_baseline_element!(f32, F32);
impl_baseline_element!(i32, I32);

/// Single-slot-per-kind store of reference arrays.
///
/// Owned by the harness (one per worker if checks run in parallel); not
/// shared between threads.
#[derive(Clone, Debug, Default)]
pub struct BaselineRegistry {
    slots: IndexMap<NumericKind, Baseline>,
}

impl BaselineRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only view of the baseline for `T`'s kind, if one is set.
    pub fn get<T: BaselineElement>(&self) -> Option<&[T]> {
        self.slots
            .get(&T::KIND)
            .and_then(T::view)
            .map(AlignedBuffer::as_slice)
    }

    /// The stored baseline of `kind`, untyped.
    pub fn get_baseline(&self, kind: NumericKind) -> Option<&Baseline> {
        self.slots.get(&kind)
    }

    /// Install `buffer` as the baseline for `T`'s kind.
    ///
    /// Any previous baseline of that kind is dropped. Returns `true` if
    /// one was replaced.
    pub fn set<T: BaselineElement>(&mut self, buffer: AlignedBuffer<T>) -> bool {
        let previous = self.slots.insert(T::KIND, T::wrap(buffer));
        let replaced = previous.is_some();
        drop(previous);
        replaced
    }

    /// Remove and return the baseline for `T`'s kind.
    pub fn take<T: BaselineElement>(&mut self) -> Option<AlignedBuffer<T>> {
        self.slots.shift_remove(&T::KIND).and_then(T::unwrap)
    }

    /// Whether a baseline of `kind` is set.
    pub fn contains(&self, kind: NumericKind) -> bool {
        self.slots.contains_key(&kind)
    }

    /// Kinds with a baseline, in the order they were first set.
    pub fn kinds(&self) -> impl Iterator<Item = NumericKind> + '_ {
        self.slots.keys().copied()
    }

    /// Number of kinds with a baseline.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether no baseline is set.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Drop every baseline.
    pub fn clear(&mut self) {
        self.slots.clear();
    }
}
