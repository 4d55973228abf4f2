//! A store whose kind is chosen at runtime.

use crate::bits::BitStore;
use crate::elem::{Elem, StoreKind};
use crate::error::Result;
use crate::prim::{ByteStore, DoubleStore, FloatStore, IntStore, LongStore, Prim, PrimStore};
use crate::{Search, Store};
use std::io::Read;

#[derive(Debug, Clone, PartialEq)]
pub enum AnyStore {
    Bit(BitStore),
    Byte(ByteStore),
    Int(IntStore),
    Long(LongStore),
    Float(FloatStore),
    Double(DoubleStore),
}

macro_rules! dispatch {
    ($value:expr, $s:ident => $body:expr) => {
        match $value {
            AnyStore::Bit($s) => $body,
            AnyStore::Byte($s) => $body,
            AnyStore::Int($s) => $body,
            AnyStore::Long($s) => $body,
            AnyStore::Float($s) => $body,
            AnyStore::Double($s) => $body,
        }
    };
}

impl AnyStore {
    pub fn new(kind: StoreKind) -> Self {
        Self::with_size(kind, 0, Elem::Bit(false))
    }

    pub fn with_size(kind: StoreKind, size: usize, def: Elem) -> Self {
        fn prim<T: Prim>(size: usize, def: Elem) -> PrimStore<T> {
            PrimStore::with_size(size, T::from_elem(def))
        }

        match kind {
            StoreKind::Bit => AnyStore::Bit(BitStore::with_size(size, def.as_bool())),
            StoreKind::Byte => AnyStore::Byte(prim(size, def)),
            StoreKind::Int => AnyStore::Int(prim(size, def)),
            StoreKind::Long => AnyStore::Long(prim(size, def)),
            StoreKind::Float => AnyStore::Float(prim(size, def)),
            StoreKind::Double => AnyStore::Double(prim(size, def)),
        }
    }

    /// Decodes a store stream whose kind is known out-of-band.
    pub fn from_stream<R: Read + ?Sized>(kind: StoreKind, r: &mut R) -> Result<Self> {
        Ok(match kind {
            StoreKind::Bit => AnyStore::Bit(BitStore::from_stream(r)?),
            StoreKind::Byte => AnyStore::Byte(PrimStore::from_stream(r)?),
            StoreKind::Int => AnyStore::Int(PrimStore::from_stream(r)?),
            StoreKind::Long => AnyStore::Long(PrimStore::from_stream(r)?),
            StoreKind::Float => AnyStore::Float(PrimStore::from_stream(r)?),
            StoreKind::Double => AnyStore::Double(PrimStore::from_stream(r)?),
        })
    }

    pub fn as_store(&self) -> &dyn Store {
        dispatch!(self, s => s as &dyn Store)
    }

    pub fn as_store_mut(&mut self) -> &mut dyn Store {
        dispatch!(self, s => s as &mut dyn Store)
    }
}

impl Store for AnyStore {
    fn kind(&self) -> StoreKind {
        dispatch!(self, s => s.kind())
    }

    fn size(&self) -> usize {
        dispatch!(self, s => s.size())
    }

    fn capacity(&self) -> usize {
        dispatch!(self, s => s.capacity())
    }

    fn ins(&mut self, from_incl: usize, upto_excl: usize, def: Elem) -> Result<()> {
        dispatch!(self, s => s.ins(from_incl, upto_excl, def))
    }

    fn del(&mut self, from_incl: usize, upto_excl: usize) -> Result<()> {
        dispatch!(self, s => s.del(from_incl, upto_excl))
    }

    fn fill(&mut self, from_incl: usize, upto_excl: usize, def: Elem) -> Result<()> {
        dispatch!(self, s => s.fill(from_incl, upto_excl, def))
    }

    fn b_search(&self, from_incl: usize, upto_excl: usize, key: Elem) -> Result<Search> {
        dispatch!(self, s => s.b_search(from_incl, upto_excl, key))
    }

    fn rot_up(&mut self, from_incl: usize, upto_excl: usize) -> Result<()> {
        dispatch!(self, s => s.rot_up(from_incl, upto_excl))
    }

    fn rot_down(&mut self, from_incl: usize, upto_excl: usize) -> Result<()> {
        dispatch!(self, s => s.rot_down(from_incl, upto_excl))
    }

    fn get(&self, pos: usize) -> Result<Elem> {
        dispatch!(self, s => s.get(pos))
    }

    fn set(&mut self, pos: usize, elem: Elem) -> Result<Elem> {
        dispatch!(self, s => s.set(pos, elem))
    }

    fn clear(&mut self) {
        dispatch!(self, s => s.clear())
    }

    fn chunk_count(&self) -> usize {
        dispatch!(self, s => s.chunk_count())
    }

    fn encode_chunk(&self, index: usize, out: &mut [u8; 8]) -> usize {
        dispatch!(self, s => s.encode_chunk(index, out))
    }
}
