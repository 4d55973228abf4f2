//! Pull-based binary codec shared by every store.
//!
//! A store stream is a 4-byte big-endian signed size followed by the payload in the store's
//! native width: bit-packed (most significant bit first) for [`crate::BitStore`], big-endian fixed
//! width for numeric stores. Encoding never materializes the payload; [`ChunkReader`] asks its
//! source for one small chunk at a time as the consumer pulls bytes.

use crate::Store;
use crate::elem::{Elem, StoreKind};
use crate::error::{Error, Result};
use std::io::{self, Read};

/// A byte sequence that can be produced in chunks of at most eight bytes.
pub trait Chunked {
    fn chunk_count(&self) -> usize;

    /// Writes chunk `index` into `out` and returns how many bytes were written.
    fn encode_chunk(&self, index: usize, out: &mut [u8; 8]) -> usize;
}

/// Adapts a [`Chunked`] source to [`std::io::Read`].
pub struct ChunkReader<C> {
    source: C,
    next_chunk: usize,
    chunks: usize,
    pending: [u8; 8],
    pending_len: usize,
    pending_pos: usize,
}

impl<C: Chunked> ChunkReader<C> {
    pub fn new(source: C) -> Self {
        let chunks = source.chunk_count();
        Self {
            source,
            next_chunk: 0,
            chunks,
            pending: [0u8; 8],
            pending_len: 0,
            pending_pos: 0,
        }
    }

    /// Total number of bytes this reader yields from its initial position.
    pub fn encoded_len(&self) -> usize {
        let mut scratch = [0u8; 8];
        (0..self.chunks)
            .map(|index| self.source.encode_chunk(index, &mut scratch))
            .sum()
    }
}

impl<C> std::fmt::Debug for ChunkReader<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChunkReader")
            .field("next_chunk", &self.next_chunk)
            .field("chunks", &self.chunks)
            .finish()
    }
}

impl<C: Chunked> Read for ChunkReader<C> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut written = 0;
        while written < buf.len() {
            if self.pending_pos == self.pending_len {
                if self.next_chunk == self.chunks {
                    break;
                }
                self.pending_len = self.source.encode_chunk(self.next_chunk, &mut self.pending);
                self.pending_pos = 0;
                self.next_chunk += 1;
            }
            let n = (buf.len() - written).min(self.pending_len - self.pending_pos);
            buf[written..written + n]
                .copy_from_slice(&self.pending[self.pending_pos..self.pending_pos + n]);
            self.pending_pos += n;
            written += n;
        }
        Ok(written)
    }
}

/// Size header followed by a store's payload chunks.
pub struct StoreChunks<'a>(pub &'a dyn Store);

impl Chunked for StoreChunks<'_> {
    fn chunk_count(&self) -> usize {
        1 + self.0.chunk_count()
    }

    fn encode_chunk(&self, index: usize, out: &mut [u8; 8]) -> usize {
        if index == 0 {
            out[..4].copy_from_slice(&encode_size(self.0.size()));
            4
        } else {
            self.0.encode_chunk(index - 1, out)
        }
    }
}

pub type StoreStream<'a> = ChunkReader<StoreChunks<'a>>;

/// Largest size or index a 4-byte header can carry.
pub const MAX_WIRE_SIZE: usize = i32::MAX as usize;

/// Elements reserved up front while decoding; anything past this grows as bytes arrive.
pub const PREALLOC_LIMIT: usize = 4096;

pub fn check_wire_size(size: usize) -> Result<()> {
    if size <= MAX_WIRE_SIZE {
        Ok(())
    } else {
        Err(Error::TooLarge {
            size,
            limit: MAX_WIRE_SIZE,
        })
    }
}

/// Big-endian signed 32-bit size header.
///
/// Encoders check every size with [`check_wire_size`] before the first byte is produced.
pub fn encode_size(size: usize) -> [u8; 4] {
    match i32::try_from(size) {
        Ok(size) => size.to_be_bytes(),
        Err(_) => {
            debug_assert!(false, "size {size} was not checked against the wire limit");
            [0xFF; 4]
        }
    }
}

/// Reads a size header written by [`encode_size`], rejecting negative values.
pub fn read_size<R: Read + ?Sized>(r: &mut R, context: &'static str) -> Result<usize> {
    let mut raw = [0u8; 4];
    read_bytes(r, &mut raw, context)?;
    let size = i32::from_be_bytes(raw);
    usize::try_from(size).map_err(|_| Error::Corrupt {
        message: format!("negative {context}: {size}"),
    })
}

/// `read_exact`, with end-of-stream reported as [`Error::Truncated`].
pub fn read_bytes<R: Read + ?Sized>(
    r: &mut R,
    buf: &mut [u8],
    context: &'static str,
) -> Result<()> {
    r.read_exact(buf).map_err(|e| {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            Error::Truncated { context }
        } else {
            Error::Io(e)
        }
    })
}

/// Encodes a single byte-aligned value in `kind`'s width. Bits take a whole byte here; packed
/// bit payloads are produced by the callers that own the bit layout.
pub fn encode_elem(kind: StoreKind, elem: Elem, out: &mut [u8; 8]) -> usize {
    match kind.coerce(elem) {
        Elem::Bit(v) => {
            out[0] = u8::from(v);
            1
        }
        Elem::Byte(v) => {
            out[..1].copy_from_slice(&v.to_be_bytes());
            1
        }
        Elem::Int(v) => {
            out[..4].copy_from_slice(&v.to_be_bytes());
            4
        }
        Elem::Long(v) => {
            out[..8].copy_from_slice(&v.to_be_bytes());
            8
        }
        Elem::Float(v) => {
            out[..4].copy_from_slice(&v.to_be_bytes());
            4
        }
        Elem::Double(v) => {
            out[..8].copy_from_slice(&v.to_be_bytes());
            8
        }
    }
}

/// Reads one value written by [`encode_elem`].
pub fn read_elem<R: Read + ?Sized>(
    r: &mut R,
    kind: StoreKind,
    context: &'static str,
) -> Result<Elem> {
    let mut raw = [0u8; 8];
    let width = (kind.width_bits() / 8).max(1);
    read_bytes(r, &mut raw[..width], context)?;
    let mut b4 = [0u8; 4];
    b4.copy_from_slice(&raw[..4]);
    Ok(match kind {
        StoreKind::Bit => Elem::Bit(raw[0] != 0),
        StoreKind::Byte => Elem::Byte(i8::from_be_bytes([raw[0]])),
        StoreKind::Int => Elem::Int(i32::from_be_bytes(b4)),
        StoreKind::Long => Elem::Long(i64::from_be_bytes(raw)),
        StoreKind::Float => Elem::Float(f32::from_be_bytes(b4)),
        StoreKind::Double => Elem::Double(f64::from_be_bytes(raw)),
    })
}
