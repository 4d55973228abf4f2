//! Bit-packed boolean store.

use crate::elem::{Elem, StoreKind};
use crate::error::Result;
use crate::stream::{read_bytes, read_size};
use crate::{
    Search, Store, b_search_by, check_del, check_ins, check_pos, check_range, grown_capacity,
    shrunk_capacity,
};
use std::io::Read;

const WORD_BITS: usize = u64::BITS as usize;

/// A resizable sequence of bits packed into 64-bit words.
///
/// Bits at positions `>= size` are always zero.
#[derive(Debug, Clone, Default)]
pub struct BitStore {
    words: Vec<u64>,
    size: usize,
}

impl PartialEq for BitStore {
    fn eq(&self, other: &Self) -> bool {
        let used = self.size.div_ceil(WORD_BITS);
        self.size == other.size && self.words[..used] == other.words[..used]
    }
}

impl BitStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_size(size: usize, def: bool) -> Self {
        let mut out = Self::new();
        out.ensure_capacity(size);
        out.size = size;
        if def {
            for pos in 0..size {
                out.put(pos, true);
            }
        }
        out
    }

    pub fn get_bit(&self, pos: usize) -> Result<bool> {
        check_pos(pos, self.size)?;
        Ok(self.bit(pos))
    }

    pub fn set_bit(&mut self, pos: usize, value: bool) -> Result<bool> {
        check_pos(pos, self.size)?;
        let prev = self.bit(pos);
        self.put(pos, value);
        Ok(prev)
    }

    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.size).map(|pos| self.bit(pos))
    }

    /// Decodes a stream produced by [`Store::create_stream`] on a bit store.
    pub fn from_stream<R: Read + ?Sized>(r: &mut R) -> Result<Self> {
        let size = read_size(r, "bit store size")?;
        let mut out = Self::new();
        let mut byte = [0u8; 1];
        for chunk in 0..size.div_ceil(8) {
            read_bytes(r, &mut byte, "bit store payload")?;
            out.size = size.min(chunk * 8 + 8);
            out.ensure_capacity(out.size);
            for offset in 0..8 {
                let pos = chunk * 8 + offset;
                if pos < size && byte[0] & (0x80 >> offset) != 0 {
                    out.put(pos, true);
                }
            }
        }
        Ok(out)
    }

    fn bit(&self, pos: usize) -> bool {
        self.words[pos / WORD_BITS] & (1u64 << (pos % WORD_BITS)) != 0
    }

    fn put(&mut self, pos: usize, value: bool) {
        let mask = 1u64 << (pos % WORD_BITS);
        let word = &mut self.words[pos / WORD_BITS];
        if value {
            *word |= mask;
        } else {
            *word &= !mask;
        }
    }

    fn ensure_capacity(&mut self, bits: usize) {
        if bits <= self.words.len() * WORD_BITS {
            return;
        }
        let capacity = grown_capacity(self.words.len() * WORD_BITS, bits);
        tracing::trace!(kind = %StoreKind::Bit, capacity, "store grow");
        self.words.resize(capacity.div_ceil(WORD_BITS), 0);
    }
}

impl Store for BitStore {
    fn kind(&self) -> StoreKind {
        StoreKind::Bit
    }

    fn size(&self) -> usize {
        self.size
    }

    fn capacity(&self) -> usize {
        self.words.len() * WORD_BITS
    }

    fn ins(&mut self, from_incl: usize, upto_excl: usize, def: Elem) -> Result<()> {
        check_ins(from_incl, upto_excl, self.size)?;
        let gap = upto_excl - from_incl;
        if gap == 0 {
            return Ok(());
        }
        self.ensure_capacity(self.size + gap);
        for pos in (from_incl..self.size).rev() {
            let v = self.bit(pos);
            self.put(pos + gap, v);
        }
        self.size += gap;
        let def = def.as_bool();
        for pos in from_incl..upto_excl {
            self.put(pos, def);
        }
        Ok(())
    }

    fn del(&mut self, from_incl: usize, upto_excl: usize) -> Result<()> {
        check_del(from_incl, upto_excl, self.size)?;
        let gap = upto_excl - from_incl;
        for pos in upto_excl..self.size {
            let v = self.bit(pos);
            self.put(pos - gap, v);
        }
        for pos in self.size - gap..self.size {
            self.put(pos, false);
        }
        self.size -= gap;
        if let Some(capacity) = shrunk_capacity(self.capacity(), self.size) {
            tracing::trace!(kind = %StoreKind::Bit, capacity, "store shrink");
            self.words.truncate(capacity.div_ceil(WORD_BITS));
            self.words.shrink_to_fit();
        }
        Ok(())
    }

    fn fill(&mut self, from_incl: usize, upto_excl: usize, def: Elem) -> Result<()> {
        check_range(from_incl, upto_excl, self.size)?;
        let def = def.as_bool();
        for pos in from_incl..upto_excl {
            self.put(pos, def);
        }
        Ok(())
    }

    fn b_search(&self, from_incl: usize, upto_excl: usize, key: Elem) -> Result<Search> {
        check_range(from_incl, upto_excl, self.size)?;
        let key = key.as_bool();
        Ok(b_search_by(from_incl, upto_excl, |pos| self.bit(pos).cmp(&key)))
    }

    fn rot_up(&mut self, from_incl: usize, upto_excl: usize) -> Result<()> {
        check_range(from_incl, upto_excl, self.size)?;
        if upto_excl - from_incl < 2 {
            return Ok(());
        }
        let last = self.bit(upto_excl - 1);
        for pos in (from_incl + 1..upto_excl).rev() {
            let v = self.bit(pos - 1);
            self.put(pos, v);
        }
        self.put(from_incl, last);
        Ok(())
    }

    fn rot_down(&mut self, from_incl: usize, upto_excl: usize) -> Result<()> {
        check_range(from_incl, upto_excl, self.size)?;
        if upto_excl - from_incl < 2 {
            return Ok(());
        }
        let first = self.bit(from_incl);
        for pos in from_incl..upto_excl - 1 {
            let v = self.bit(pos + 1);
            self.put(pos, v);
        }
        self.put(upto_excl - 1, first);
        Ok(())
    }

    fn get(&self, pos: usize) -> Result<Elem> {
        self.get_bit(pos).map(Elem::Bit)
    }

    fn set(&mut self, pos: usize, elem: Elem) -> Result<Elem> {
        self.set_bit(pos, elem.as_bool()).map(Elem::Bit)
    }

    fn clear(&mut self) {
        self.words.clear();
        self.words.shrink_to_fit();
        self.size = 0;
    }

    fn chunk_count(&self) -> usize {
        self.size.div_ceil(8)
    }

    fn encode_chunk(&self, index: usize, out: &mut [u8; 8]) -> usize {
        let mut byte = 0u8;
        for offset in 0..8 {
            let pos = index * 8 + offset;
            if pos < self.size && self.bit(pos) {
                byte |= 0x80 >> offset;
            }
        }
        out[0] = byte;
        1
    }
}
