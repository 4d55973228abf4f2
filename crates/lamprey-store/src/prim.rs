//! Byte-aligned numeric stores.

use crate::elem::{Elem, StoreKind};
use crate::error::Result;
use crate::stream::{PREALLOC_LIMIT, read_bytes, read_size};
use crate::{
    MIN_CAPACITY, Search, Store, b_search_by, check_del, check_ins, check_pos, check_range,
    grown_capacity, shrunk_capacity,
};
use std::cmp::Ordering;
use std::fmt;
use std::io::Read;

/// A primitive that a [`PrimStore`] can hold.
pub trait Prim: Copy + PartialEq + fmt::Debug + 'static {
    const KIND: StoreKind;
    /// Encoded width in bytes.
    const WIDTH: usize;

    fn from_elem(elem: Elem) -> Self;

    fn into_elem(self) -> Elem;

    fn order(&self, other: &Self) -> Ordering;

    fn put_be(self, out: &mut [u8]);

    fn get_be(bytes: &[u8]) -> Self;
}

macro_rules! impl_prim {
    ($t:ty, $kind:ident, $width:expr, $conv:ident, |$v:ident, $o:ident| $order:expr) => {
        impl Prim for $t {
            const KIND: StoreKind = StoreKind::$kind;
            const WIDTH: usize = $width;

            fn from_elem(elem: Elem) -> Self {
                elem.$conv()
            }

            fn into_elem(self) -> Elem {
                Elem::$kind(self)
            }

            fn order(&self, other: &Self) -> Ordering {
                let ($v, $o) = (self, other);
                $order
            }

            fn put_be(self, out: &mut [u8]) {
                out[..$width].copy_from_slice(&self.to_be_bytes());
            }

            fn get_be(bytes: &[u8]) -> Self {
                let mut raw = [0u8; $width];
                raw.copy_from_slice(&bytes[..$width]);
                <$t>::from_be_bytes(raw)
            }
        }
    };
}

impl_prim!(i8, Byte, 1, as_i8, |a, b| a.cmp(b));
impl_prim!(i32, Int, 4, as_i32, |a, b| a.cmp(b));
impl_prim!(i64, Long, 8, as_i64, |a, b| a.cmp(b));
impl_prim!(f32, Float, 4, as_f32, |a, b| a.total_cmp(b));
impl_prim!(f64, Double, 8, as_f64, |a, b| a.total_cmp(b));

/// A resizable sequence of one byte-aligned primitive.
#[derive(Clone, PartialEq)]
pub struct PrimStore<T: Prim> {
    items: Vec<T>,
}

pub type ByteStore = PrimStore<i8>;
pub type IntStore = PrimStore<i32>;
pub type LongStore = PrimStore<i64>;
pub type FloatStore = PrimStore<f32>;
pub type DoubleStore = PrimStore<f64>;

impl<T: Prim> Default for PrimStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Prim> fmt::Debug for PrimStore<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrimStore")
            .field("kind", &T::KIND)
            .field("items", &self.items)
            .finish()
    }
}

impl<T: Prim> PrimStore<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn with_size(size: usize, def: T) -> Self {
        let mut items = Vec::with_capacity(grown_capacity(0, size));
        items.resize(size, def);
        Self { items }
    }

    pub fn from_vec(items: Vec<T>) -> Self {
        Self { items }
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn get_prim(&self, pos: usize) -> Result<T> {
        check_pos(pos, self.items.len())?;
        Ok(self.items[pos])
    }

    pub fn set_prim(&mut self, pos: usize, value: T) -> Result<T> {
        check_pos(pos, self.items.len())?;
        Ok(std::mem::replace(&mut self.items[pos], value))
    }

    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        self.items.iter().copied()
    }

    /// Decodes a stream produced by [`Store::create_stream`] on a store of the same kind.
    pub fn from_stream<R: Read + ?Sized>(r: &mut R) -> Result<Self> {
        let size = read_size(r, "numeric store size")?;
        let mut items = Vec::with_capacity(size.min(PREALLOC_LIMIT));
        let mut raw = [0u8; 8];
        for _ in 0..size {
            read_bytes(r, &mut raw[..T::WIDTH], "numeric store payload")?;
            items.push(T::get_be(&raw[..T::WIDTH]));
        }
        Ok(Self { items })
    }
}

impl<T: Prim> Store for PrimStore<T> {
    fn kind(&self) -> StoreKind {
        T::KIND
    }

    fn size(&self) -> usize {
        self.items.len()
    }

    fn capacity(&self) -> usize {
        self.items.capacity()
    }

    fn ins(&mut self, from_incl: usize, upto_excl: usize, def: Elem) -> Result<()> {
        check_ins(from_incl, upto_excl, self.items.len())?;
        let gap = upto_excl - from_incl;
        if gap == 0 {
            return Ok(());
        }
        let required = self.items.len() + gap;
        if required > self.items.capacity() {
            let capacity = grown_capacity(self.items.capacity(), required);
            tracing::trace!(kind = %T::KIND, capacity, "store grow");
            self.items.reserve_exact(capacity - self.items.len());
        }
        let fill = T::from_elem(def);
        self.items
            .splice(from_incl..from_incl, std::iter::repeat_n(fill, gap));
        Ok(())
    }

    fn del(&mut self, from_incl: usize, upto_excl: usize) -> Result<()> {
        check_del(from_incl, upto_excl, self.items.len())?;
        self.items.drain(from_incl..upto_excl);
        if let Some(capacity) = shrunk_capacity(self.items.capacity(), self.items.len()) {
            tracing::trace!(kind = %T::KIND, capacity, "store shrink");
            self.items.shrink_to(capacity);
        }
        Ok(())
    }

    fn fill(&mut self, from_incl: usize, upto_excl: usize, def: Elem) -> Result<()> {
        check_range(from_incl, upto_excl, self.items.len())?;
        self.items[from_incl..upto_excl].fill(T::from_elem(def));
        Ok(())
    }

    fn b_search(&self, from_incl: usize, upto_excl: usize, key: Elem) -> Result<Search> {
        check_range(from_incl, upto_excl, self.items.len())?;
        let key = T::from_elem(key);
        Ok(b_search_by(from_incl, upto_excl, |i| self.items[i].order(&key)))
    }

    fn rot_up(&mut self, from_incl: usize, upto_excl: usize) -> Result<()> {
        check_range(from_incl, upto_excl, self.items.len())?;
        if upto_excl - from_incl > 1 {
            self.items[from_incl..upto_excl].rotate_right(1);
        }
        Ok(())
    }

    fn rot_down(&mut self, from_incl: usize, upto_excl: usize) -> Result<()> {
        check_range(from_incl, upto_excl, self.items.len())?;
        if upto_excl - from_incl > 1 {
            self.items[from_incl..upto_excl].rotate_left(1);
        }
        Ok(())
    }

    fn get(&self, pos: usize) -> Result<Elem> {
        self.get_prim(pos).map(Prim::into_elem)
    }

    fn set(&mut self, pos: usize, elem: Elem) -> Result<Elem> {
        self.set_prim(pos, T::from_elem(elem)).map(Prim::into_elem)
    }

    fn clear(&mut self) {
        self.items.clear();
        self.items.shrink_to(MIN_CAPACITY);
    }

    fn chunk_count(&self) -> usize {
        self.items.len()
    }

    fn encode_chunk(&self, index: usize, out: &mut [u8; 8]) -> usize {
        self.items[index].put_be(&mut out[..T::WIDTH]);
        T::WIDTH
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_narrowing_saturates() {
        assert_eq!(i8::from_elem(Elem::Double(1e9)), i8::MAX);
        assert_eq!(i32::from_elem(Elem::Double(-1e12)), i32::MIN);
        assert_eq!(i32::from_elem(Elem::Bit(true)), 1);
    }

    #[test]
    fn doubles_order_totally() {
        assert_eq!(1.0f64.order(&2.0), Ordering::Less);
        assert_eq!((-0.0f64).order(&0.0), Ordering::Less);
    }
}
