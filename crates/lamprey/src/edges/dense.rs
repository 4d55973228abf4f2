//! Full-grid adjacency backend.

use super::{EdgeData, Entry, canonical, check_vertex, same_elem};
use crate::error::{Error, Result};
use crate::wire::Header;
use lamprey_store::stream::{
    ChunkReader, Chunked, PREALLOC_LIMIT, check_wire_size, encode_elem, read_bytes, read_elem,
};
use lamprey_store::{AnyStore, Elem, Store, StoreKind};
use std::io::{self, Read, Write};

/// Adjacency matrix backed by a single store laid out as a `2^bits`-strided grid.
///
/// Symmetric graphs only write the `from <= into` half and mirror reads.
#[derive(Debug, Clone)]
pub struct DenseEdges {
    symmetric: bool,
    def_elem: f64,
    size: usize,
    bits: u32,
    store: AnyStore,
    non_def: usize,
}

impl DenseEdges {
    pub fn new(size: usize, symmetric: bool, def_elem: f64, kind: StoreKind) -> Self {
        let def_elem = kind.coerce_f64(def_elem);
        let bits = stride_bits(size);
        let stride = 1usize << bits;
        Self {
            symmetric,
            def_elem,
            size,
            bits,
            store: AnyStore::with_size(kind, stride * stride, Elem::Double(def_elem)),
            non_def: 0,
        }
    }

    pub fn kind(&self) -> StoreKind {
        self.store.kind()
    }

    /// Row stride of the backing grid, always a power of two `>= size`.
    pub fn stride(&self) -> usize {
        1usize << self.bits
    }

    /// Grows the grid until `vertex` fits a row, re-laying every row at the wider stride.
    pub fn ensure_capacity(&mut self, vertex: usize) -> Result<()> {
        while self.stride() <= vertex {
            let stride = self.stride();
            let next = stride * 2;
            let def = Elem::Double(self.def_elem);
            for row in (0..stride).rev() {
                let at = row * stride + stride;
                self.store.ins(at, at + stride, def)?;
            }
            let tail = self.store.size();
            self.store.ins(tail, next * next, def)?;
            self.bits += 1;
            tracing::trace!(stride = next, "dense grid grow");
        }
        Ok(())
    }

    /// Explicitly grows the vertex count. Shrinking is not supported.
    pub fn resize(&mut self, size: usize) -> Result<()> {
        if size < self.size {
            return Err(Error::Unsupported {
                op: "shrinking resize",
                backend: self.backend_name(),
            });
        }
        if size > 0 {
            self.ensure_capacity(size - 1)?;
        }
        self.size = size;
        Ok(())
    }

    pub fn create_stream(&self) -> Result<DenseStream<'_>> {
        check_wire_size(self.size)?;
        Ok(DenseStream(ChunkReader::new(DenseChunks { edges: self })))
    }

    /// Decodes a dense stream; the store kind is not part of the format and must match the
    /// encoder's.
    pub fn from_stream<R: Read + ?Sized>(r: &mut R, kind: StoreKind) -> Result<Self> {
        let header = Header::read(r)?;
        let size = header.size;
        let cells = grid_cells(size)?;

        // The grid is only allocated once the whole payload has arrived.
        let mut values = Vec::with_capacity(cells.min(PREALLOC_LIMIT));
        if kind == StoreKind::Bit {
            let mut byte = [0u8; 1];
            for chunk in 0..cells.div_ceil(8) {
                read_bytes(r, &mut byte, "dense bit payload")?;
                for offset in 0..(cells - chunk * 8).min(8) {
                    values.push(if byte[0] & (0x80 >> offset) != 0 {
                        1.0
                    } else {
                        0.0
                    });
                }
            }
        } else {
            for _ in 0..cells {
                values.push(read_elem(r, kind, "dense payload")?.as_f64());
            }
        }

        let mut edges = Self::new(size, header.symmetric, header.def_elem, kind);
        for (cell, value) in values.into_iter().enumerate() {
            edges.load_cell(cell / size, cell % size, value)?;
        }
        Ok(edges)
    }

    fn load_cell(&mut self, from: usize, into: usize, value: f64) -> Result<()> {
        if self.symmetric && from > into {
            let mirrored = self.cell(into, from);
            if !same_elem(mirrored, value) {
                return Err(Error::Decode {
                    message: format!(
                        "symmetric payload disagrees at ({from}, {into}): {value} vs {mirrored}"
                    ),
                });
            }
            return Ok(());
        }
        self.set(from, into, value)?;
        Ok(())
    }

    fn index(&self, from: usize, into: usize) -> usize {
        let (from, into) = canonical(self.symmetric, from, into);
        (from << self.bits) | into
    }

    fn cell(&self, from: usize, into: usize) -> f64 {
        match self.store.get_f64(self.index(from, into)) {
            Ok(value) => value,
            Err(_) => {
                debug_assert!(false, "dense cell ({from}, {into}) outside the grid");
                self.def_elem
            }
        }
    }

    fn check(&self, from: usize, into: usize) -> Result<()> {
        check_vertex(from, self.size)?;
        check_vertex(into, self.size)
    }
}

impl EdgeData for DenseEdges {
    fn backend_name(&self) -> &'static str {
        "dense"
    }

    fn size(&self) -> usize {
        self.size
    }

    fn is_symmetric(&self) -> bool {
        self.symmetric
    }

    fn def_elem(&self) -> f64 {
        self.def_elem
    }

    fn get(&self, from: usize, into: usize) -> Result<f64> {
        self.check(from, into)?;
        Ok(self.cell(from, into))
    }

    fn set(&mut self, from: usize, into: usize, elem: f64) -> Result<f64> {
        self.check(from, into)?;
        let elem = self.kind().coerce_f64(elem);
        let index = self.index(from, into);
        let prev = self.store.set_f64(index, elem)?;
        match (
            same_elem(prev, self.def_elem),
            same_elem(elem, self.def_elem),
        ) {
            (true, false) => self.non_def += 1,
            (false, true) => self.non_def -= 1,
            _ => {}
        }
        Ok(prev)
    }

    fn conn_vertexes(&self, vertex: usize) -> Result<Vec<usize>> {
        check_vertex(vertex, self.size)?;
        Ok((0..self.size)
            .filter(|&other| !same_elem(self.cell(vertex, other), self.def_elem))
            .collect())
    }

    fn non_def_iter(&self) -> Box<dyn Iterator<Item = Entry> + '_> {
        let size = self.size;
        let symmetric = self.symmetric;
        Box::new(
            (0..size)
                .flat_map(move |from| {
                    let start = if symmetric { from } else { 0 };
                    (start..size).map(move |into| (from, into))
                })
                .filter_map(move |(from, into)| {
                    let value = self.cell(from, into);
                    (!same_elem(value, self.def_elem)).then(|| Entry::new(from, into, value))
                }),
        )
    }

    fn non_def_count(&self) -> usize {
        self.non_def
    }

    fn clear(&mut self) -> Result<()> {
        let len = self.store.size();
        self.store.fill(0, len, Elem::Double(self.def_elem))?;
        self.non_def = 0;
        Ok(())
    }

    fn proto(&self, size: usize) -> Box<dyn EdgeData> {
        Box::new(Self::new(size, self.symmetric, self.def_elem, self.kind()))
    }

    fn write_wire(&mut self, w: &mut dyn Write) -> Result<u64> {
        Ok(io::copy(&mut self.create_stream()?, w)?)
    }
}

/// Pull-based encoder returned by [`DenseEdges::create_stream`].
pub struct DenseStream<'a>(ChunkReader<DenseChunks<'a>>);

impl Read for DenseStream<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.0.read(buf)
    }
}

struct DenseChunks<'a> {
    edges: &'a DenseEdges,
}

impl DenseChunks<'_> {
    fn payload_chunks(&self) -> usize {
        let cells = self.edges.size * self.edges.size;
        if self.edges.kind() == StoreKind::Bit {
            cells.div_ceil(8)
        } else {
            cells
        }
    }
}

impl Chunked for DenseChunks<'_> {
    fn chunk_count(&self) -> usize {
        2 + self.payload_chunks()
    }

    fn encode_chunk(&self, index: usize, out: &mut [u8; 8]) -> usize {
        let edges = self.edges;
        let size = edges.size;
        match index {
            0 | 1 => {
                let header = Header {
                    symmetric: edges.symmetric,
                    size,
                    def_elem: edges.def_elem,
                }
                .encode();
                let (from, upto) = if index == 0 { (0, 5) } else { (5, 13) };
                out[..upto - from].copy_from_slice(&header[from..upto]);
                upto - from
            }
            _ if edges.kind() == StoreKind::Bit => {
                let first = (index - 2) * 8;
                let mut byte = 0u8;
                for offset in 0..8 {
                    let cell = first + offset;
                    if cell < size * size && edges.cell(cell / size, cell % size) > 0.0 {
                        byte |= 0x80 >> offset;
                    }
                }
                out[0] = byte;
                1
            }
            _ => {
                let cell = index - 2;
                let value = edges.cell(cell / size, cell % size);
                encode_elem(edges.kind(), Elem::Double(value), out)
            }
        }
    }
}

/// Payload cell count of a decoded grid, rejecting sizes whose strided grid cannot be addressed.
fn grid_cells(size: usize) -> Result<usize> {
    let addressable = size
        .checked_next_power_of_two()
        .and_then(|stride| stride.checked_mul(stride));
    match (size.checked_mul(size), addressable) {
        (Some(cells), Some(_)) => Ok(cells),
        _ => Err(Error::Decode {
            message: format!("dense grid of size {size} does not fit in memory"),
        }),
    }
}

fn stride_bits(size: usize) -> u32 {
    let mut bits = 0;
    while (1usize << bits) < size {
        bits += 1;
    }
    bits
}
