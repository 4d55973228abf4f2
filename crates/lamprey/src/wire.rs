//! Shared framing of the edge data wire format.
//!
//! Both backends open with `[symmetric: 1B][size: 4B][def_elem: 8B IEEE-754 big-endian]`.
//! Dense streams follow with `size * size` row-major values in the store's native width. Sparse
//! streams follow with `[non_def_count: 4B][leads: size pairs of 4B ints][trails store stream]
//! [data kind tag: 1B][data store stream]`, written from a compacted layout so no row carries
//! spare capacity.

use crate::error::{Error, Result};
use lamprey_store::stream::{encode_size, read_bytes, read_size};
use std::io::Read;

pub const HEADER_LEN: usize = 13;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Header {
    pub symmetric: bool,
    pub size: usize,
    pub def_elem: f64,
}

impl Header {
    pub fn encode(&self) -> [u8; HEADER_LEN] {
        let mut out = [0u8; HEADER_LEN];
        out[0] = u8::from(self.symmetric);
        out[1..5].copy_from_slice(&encode_size(self.size));
        out[5..13].copy_from_slice(&self.def_elem.to_be_bytes());
        out
    }

    pub fn read<R: Read + ?Sized>(r: &mut R) -> Result<Self> {
        let mut flag = [0u8; 1];
        read_bytes(r, &mut flag, "symmetric flag")?;
        let symmetric = match flag[0] {
            0 => false,
            1 => true,
            other => {
                return Err(Error::Decode {
                    message: format!("symmetric flag must be 0 or 1, got {other}"),
                });
            }
        };
        let size = read_size(r, "graph size")?;
        let mut raw = [0u8; 8];
        read_bytes(r, &mut raw, "default element")?;
        Ok(Self {
            symmetric,
            size,
            def_elem: f64::from_be_bytes(raw),
        })
    }
}

/// Reads a signed 4-byte int that must be non-negative.
pub(crate) fn read_index<R: Read + ?Sized>(r: &mut R, context: &'static str) -> Result<usize> {
    Ok(read_size(r, context)?)
}
