#![forbid(unsafe_code)]

//! Fixed-width resizable primitive stores.
//!
//! A store is a logical sequence of one primitive kind that supports gap insertion and range
//! deletion with shifting, sub-range binary search, single-slot rotation, and a pull-based
//! binary codec. `lamprey` builds its adjacency backends on top of these.

pub mod any;
pub mod bits;
pub mod elem;
pub mod error;
pub mod prim;
pub mod stream;

pub use any::AnyStore;
pub use bits::BitStore;
pub use elem::{Elem, StoreKind};
pub use error::{Error, Result};
pub use prim::{ByteStore, DoubleStore, FloatStore, IntStore, LongStore, Prim, PrimStore};
pub use stream::{ChunkReader, Chunked, StoreChunks, StoreStream};

use std::cmp::Ordering;

/// Smallest backing capacity a store allocates once it holds anything.
pub const MIN_CAPACITY: usize = 8;

/// Outcome of [`Store::b_search`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Search {
    Found(usize),
    /// The key is absent; inserting it at this index keeps the range sorted.
    Vacant(usize),
}

impl Search {
    pub fn found(self) -> Option<usize> {
        match self {
            Search::Found(pos) => Some(pos),
            Search::Vacant(_) => None,
        }
    }

    /// `pos` on a hit, `-(insertion_index + 1)` on a miss.
    pub fn encoded(self) -> isize {
        match self {
            Search::Found(pos) => pos as isize,
            Search::Vacant(pos) => -(pos as isize) - 1,
        }
    }

    pub fn decode(encoded: isize) -> Self {
        if encoded >= 0 {
            Search::Found(encoded as usize)
        } else {
            Search::Vacant((-(encoded + 1)) as usize)
        }
    }
}

/// Common contract of every primitive store.
///
/// All ranges are half-open `[from_incl, upto_excl)`. Out-of-bounds positions and inconsistent
/// ranges are rejected, never clamped.
pub trait Store {
    fn kind(&self) -> StoreKind;

    fn size(&self) -> usize;

    fn capacity(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Opens a `def`-filled gap at `[from_incl, upto_excl)`, shifting the tail up.
    fn ins(&mut self, from_incl: usize, upto_excl: usize, def: Elem) -> Result<()>;

    /// Removes `[from_incl, upto_excl)`, shifting the tail down.
    fn del(&mut self, from_incl: usize, upto_excl: usize) -> Result<()>;

    fn fill(&mut self, from_incl: usize, upto_excl: usize, def: Elem) -> Result<()>;

    fn b_search(&self, from_incl: usize, upto_excl: usize, key: Elem) -> Result<Search>;

    /// Moves the last element of the range to its front, shifting the rest up by one.
    fn rot_up(&mut self, from_incl: usize, upto_excl: usize) -> Result<()>;

    /// Moves the first element of the range to its back, shifting the rest down by one.
    fn rot_down(&mut self, from_incl: usize, upto_excl: usize) -> Result<()>;

    fn get(&self, pos: usize) -> Result<Elem>;

    /// Stores `elem` coerced to this store's kind and returns the previous value.
    fn set(&mut self, pos: usize, elem: Elem) -> Result<Elem>;

    fn clear(&mut self);

    /// Number of payload chunks [`Store::encode_chunk`] produces for the current size.
    ///
    /// A chunk is one element for numeric stores and one packed byte for bit stores.
    fn chunk_count(&self) -> usize;

    /// Writes payload chunk `index` into `out` and returns how many bytes were written.
    fn encode_chunk(&self, index: usize, out: &mut [u8; 8]) -> usize;

    fn get_f64(&self, pos: usize) -> Result<f64> {
        self.get(pos).map(Elem::as_f64)
    }

    fn set_f64(&mut self, pos: usize, value: f64) -> Result<f64> {
        self.set(pos, Elem::Double(value)).map(Elem::as_f64)
    }

    /// Fails with [`Error::TooLarge`] when the size does not fit the 4-byte header.
    fn create_stream(&self) -> Result<StoreStream<'_>>
    where
        Self: Sized,
    {
        stream::check_wire_size(self.size())?;
        Ok(ChunkReader::new(StoreChunks(self)))
    }
}

pub(crate) fn check_pos(pos: usize, size: usize) -> Result<()> {
    if pos < size {
        Ok(())
    } else {
        Err(Error::InvalidPosition { pos, size })
    }
}

/// `0 <= from_incl <= size` and `from_incl <= upto_excl`.
pub(crate) fn check_ins(from_incl: usize, upto_excl: usize, size: usize) -> Result<()> {
    if from_incl <= size && from_incl <= upto_excl {
        Ok(())
    } else {
        Err(Error::InvalidRange {
            from_incl,
            upto_excl,
            size,
        })
    }
}

/// `0 <= from_incl < upto_excl <= size`.
pub(crate) fn check_del(from_incl: usize, upto_excl: usize, size: usize) -> Result<()> {
    if from_incl < upto_excl && upto_excl <= size {
        Ok(())
    } else {
        Err(Error::InvalidRange {
            from_incl,
            upto_excl,
            size,
        })
    }
}

/// `0 <= from_incl <= upto_excl <= size`.
pub(crate) fn check_range(from_incl: usize, upto_excl: usize, size: usize) -> Result<()> {
    if from_incl <= upto_excl && upto_excl <= size {
        Ok(())
    } else {
        Err(Error::InvalidRange {
            from_incl,
            upto_excl,
            size,
        })
    }
}

pub(crate) fn grown_capacity(current: usize, required: usize) -> usize {
    let mut cap = current.max(MIN_CAPACITY);
    while cap < required {
        cap *= 2;
    }
    cap
}

/// Capacity to shrink to after a deletion, if utilization dropped below a quarter.
pub(crate) fn shrunk_capacity(capacity: usize, size: usize) -> Option<usize> {
    if capacity > MIN_CAPACITY && size * 4 < capacity {
        Some((size * 2).max(MIN_CAPACITY))
    } else {
        None
    }
}

pub(crate) fn b_search_by(
    from_incl: usize,
    upto_excl: usize,
    mut compare_at: impl FnMut(usize) -> Ordering,
) -> Search {
    let mut lo = from_incl;
    let mut hi = upto_excl;
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        match compare_at(mid) {
            Ordering::Less => lo = mid + 1,
            Ordering::Greater => hi = mid,
            Ordering::Equal => return Search::Found(mid),
        }
    }
    Search::Vacant(lo)
}
