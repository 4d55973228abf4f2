//! Per-vertex sorted-run adjacency backend.
//!
//! All rows share two stores: `trails` (neighbor ids) and `data` (values), kept the same length
//! and mutated in lockstep. Row `v` occupies `[start, start + len)` of both, sorted by trail, and
//! owns spare capacity up to the next row's start (or the end of the stores for the last row).
//!
//! Symmetric graphs store an edge under both endpoints' rows so either end can be searched in
//! `O(log degree)`; a reflexive edge is stored once.
//!
//! Changing a row's degree may grow or shrink its capacity, which shifts the start of every later
//! row. That is `O(vertices)` per structural edit; value overwrites stay `O(log degree)`.

use super::{EdgeData, Entry, canonical, check_vertex, same_elem};
use crate::error::{Error, Result};
use crate::wire::{Header, read_index};
use lamprey_store::stream::{
    ChunkReader, Chunked, PREALLOC_LIMIT, check_wire_size, encode_size, read_bytes, read_size,
};
use lamprey_store::{AnyStore, Elem, IntStore, Search, Store, StoreKind};
use std::io::{self, Read, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct Lead {
    start: usize,
    len: usize,
}

#[derive(Debug, Clone)]
pub struct SparseEdges {
    symmetric: bool,
    def_elem: f64,
    leads: Vec<Lead>,
    trails: IntStore,
    data: AnyStore,
    non_def: usize,
}

impl SparseEdges {
    pub fn new(size: usize, symmetric: bool, def_elem: f64, kind: StoreKind) -> Self {
        Self {
            symmetric,
            def_elem: kind.coerce_f64(def_elem),
            leads: vec![Lead::default(); size],
            trails: IntStore::new(),
            data: AnyStore::new(kind),
            non_def: 0,
        }
    }

    pub fn kind(&self) -> StoreKind {
        self.data.kind()
    }

    /// Slots reserved for `vertex`'s row, used or not.
    pub fn row_capacity(&self, vertex: usize) -> Result<usize> {
        check_vertex(vertex, self.leads.len())?;
        Ok(self.capacity_of(vertex))
    }

    /// Explicitly grows the vertex count. Shrinking is not supported.
    pub fn resize(&mut self, size: usize) -> Result<()> {
        if size < self.leads.len() {
            return Err(Error::Unsupported {
                op: "shrinking resize",
                backend: self.backend_name(),
            });
        }
        let end = self.trails.size();
        self.leads.resize(size, Lead { start: end, len: 0 });
        Ok(())
    }

    /// Drops every row's spare capacity so rows are laid out back to back.
    pub fn compactify(&mut self) -> Result<()> {
        let mut slack_total = 0;
        for vertex in (0..self.leads.len()).rev() {
            let lead = self.leads[vertex];
            let capacity = self.capacity_of(vertex);
            if capacity > lead.len {
                let from = lead.start + lead.len;
                let upto = lead.start + capacity;
                self.trails.del(from, upto)?;
                self.data.del(from, upto)?;
                slack_total += capacity - lead.len;
            }
        }

        let mut start = 0;
        for lead in &mut self.leads {
            lead.start = start;
            start += lead.len;
        }
        if slack_total > 0 {
            tracing::trace!(slack = slack_total, "sparse compactify");
        }
        Ok(())
    }

    /// Compacts, then returns a pull-based encoder over the compacted layout.
    pub fn create_stream(&mut self) -> Result<impl Read + '_> {
        self.compactify()?;
        check_wire_size(self.leads.len())?;
        let this: &Self = self;
        let head = ChunkReader::new(SparseHead { edges: this });
        let tag = io::Cursor::new([this.data.kind().tag()]);
        Ok(head
            .chain(this.trails.create_stream()?)
            .chain(tag)
            .chain(this.data.create_stream()?))
    }

    pub fn from_stream<R: Read + ?Sized>(r: &mut R) -> Result<Self> {
        let header = Header::read(r)?;
        let non_def = read_size(r, "non-default count")?;

        let mut leads = Vec::with_capacity(header.size.min(PREALLOC_LIMIT));
        let mut prev_upto = 0;
        for vertex in 0..header.size {
            let from = read_index(r, "lead start")?;
            let upto = read_index(r, "lead end")?;
            if from < prev_upto || upto < from {
                return Err(Error::Decode {
                    message: format!("lead {vertex} window [{from}, {upto}) overlaps or inverts"),
                });
            }
            leads.push(Lead {
                start: from,
                len: upto - from,
            });
            prev_upto = upto;
        }

        let trails = IntStore::from_stream(r)?;
        let mut tag = [0u8; 1];
        read_bytes(r, &mut tag, "data kind tag")?;
        let kind = StoreKind::from_tag(tag[0])?;
        let data = AnyStore::from_stream(kind, r)?;

        if trails.size() != data.size() || prev_upto > trails.size() {
            return Err(Error::Decode {
                message: format!(
                    "trail/data stores disagree: {} trails, {} values, rows end at {prev_upto}",
                    trails.size(),
                    data.size()
                ),
            });
        }

        let edges = Self {
            symmetric: header.symmetric,
            def_elem: kind.coerce_f64(header.def_elem),
            leads,
            trails,
            data,
            non_def,
        };
        edges.validate_rows()?;
        Ok(edges)
    }

    fn validate_rows(&self) -> Result<()> {
        let size = self.leads.len();
        let trails = self.trails.as_slice();
        let mut canonical_count = 0;
        for (vertex, lead) in self.leads.iter().enumerate() {
            let row = &trails[lead.start..lead.start + lead.len];
            for (i, &trail) in row.iter().enumerate() {
                let in_range = usize::try_from(trail).is_ok_and(|t| t < size);
                let ascending = i == 0 || row[i - 1] < trail;
                if !in_range || !ascending {
                    return Err(Error::Decode {
                        message: format!("row {vertex} has an invalid trail {trail}"),
                    });
                }
                if !self.symmetric || vertex <= trail as usize {
                    canonical_count += 1;
                }
            }
        }
        for (vertex, lead) in self.leads.iter().enumerate() {
            for pos in lead.start..lead.start + lead.len {
                let value = self.value_at(pos);
                if same_elem(value, self.def_elem) {
                    return Err(Error::Decode {
                        message: format!("row {vertex} stores the default element"),
                    });
                }
                let trail = self.trail_at(pos);
                if !self.symmetric || trail == vertex {
                    continue;
                }
                let mirrored = match self.find(trail, vertex)? {
                    Search::Found(at) => Some(self.value_at(at)),
                    Search::Vacant(_) => None,
                };
                if !mirrored.is_some_and(|m| same_elem(m, value)) {
                    return Err(Error::Decode {
                        message: format!(
                            "symmetric rows disagree at ({vertex}, {trail}): {value} vs {mirrored:?}"
                        ),
                    });
                }
            }
        }
        if canonical_count != self.non_def {
            return Err(Error::Decode {
                message: format!(
                    "header declares {} non-default entries, rows hold {canonical_count}",
                    self.non_def
                ),
            });
        }
        Ok(())
    }

    fn capacity_of(&self, vertex: usize) -> usize {
        let end = self
            .leads
            .get(vertex + 1)
            .map(|next| next.start)
            .unwrap_or_else(|| self.trails.size());
        end - self.leads[vertex].start
    }

    fn trail_at(&self, pos: usize) -> usize {
        self.trails.as_slice()[pos] as usize
    }

    fn value_at(&self, pos: usize) -> f64 {
        match self.data.get_f64(pos) {
            Ok(value) => value,
            Err(_) => {
                debug_assert!(false, "sparse value slot {pos} outside the data store");
                self.def_elem
            }
        }
    }

    fn find(&self, lead: usize, trail: usize) -> Result<Search> {
        let Lead { start, len } = self.leads[lead];
        Ok(self
            .trails
            .b_search(start, start + len, Elem::Int(trail as i32))?)
    }

    fn row_set(&mut self, lead: usize, trail: usize, elem: f64) -> Result<f64> {
        let remove = same_elem(elem, self.def_elem);
        match self.find(lead, trail)? {
            Search::Found(pos) => {
                let prev = self.value_at(pos);
                if remove {
                    self.row_remove(lead, pos)?;
                } else {
                    self.data.set_f64(pos, elem)?;
                }
                Ok(prev)
            }
            Search::Vacant(pos) => {
                if !remove {
                    self.row_insert(lead, pos, trail, elem)?;
                }
                Ok(self.def_elem)
            }
        }
    }

    fn row_insert(&mut self, lead: usize, pos: usize, trail: usize, elem: f64) -> Result<()> {
        let capacity = self.capacity_of(lead);
        let Lead { start, len } = self.leads[lead];
        if len == capacity {
            let grow = capacity.max(1);
            let end = start + capacity;
            self.trails.ins(end, end + grow, Elem::Int(0))?;
            self.data.ins(end, end + grow, Elem::Double(self.def_elem))?;
            for next in &mut self.leads[lead + 1..] {
                next.start += grow;
            }
            tracing::trace!(lead, capacity = capacity + grow, "sparse row grow");
        }

        let end = start + len;
        self.trails.set(end, Elem::Int(trail as i32))?;
        self.data.set_f64(end, elem)?;
        self.trails.rot_up(pos, end + 1)?;
        self.data.rot_up(pos, end + 1)?;
        self.leads[lead].len += 1;
        Ok(())
    }

    fn row_remove(&mut self, lead: usize, pos: usize) -> Result<()> {
        let Lead { start, len } = self.leads[lead];
        let end = start + len;
        self.trails.rot_down(pos, end)?;
        self.data.rot_down(pos, end)?;
        self.trails.set(end - 1, Elem::Int(0))?;
        self.data.set_f64(end - 1, self.def_elem)?;
        self.leads[lead].len -= 1;

        let len = len - 1;
        let capacity = self.capacity_of(lead);
        if len * 4 < capacity {
            let keep = len * 2;
            let shrink = capacity - keep;
            self.trails.del(start + keep, start + capacity)?;
            self.data.del(start + keep, start + capacity)?;
            for next in &mut self.leads[lead + 1..] {
                next.start -= shrink;
            }
            tracing::trace!(lead, capacity = keep, "sparse row shrink");
        }
        Ok(())
    }

    fn check(&self, from: usize, into: usize) -> Result<()> {
        check_vertex(from, self.leads.len())?;
        check_vertex(into, self.leads.len())
    }
}

impl EdgeData for SparseEdges {
    fn backend_name(&self) -> &'static str {
        "sparse"
    }

    fn size(&self) -> usize {
        self.leads.len()
    }

    fn is_symmetric(&self) -> bool {
        self.symmetric
    }

    fn def_elem(&self) -> f64 {
        self.def_elem
    }

    fn get(&self, from: usize, into: usize) -> Result<f64> {
        self.check(from, into)?;
        Ok(match self.find(from, into)? {
            Search::Found(pos) => self.value_at(pos),
            Search::Vacant(_) => self.def_elem,
        })
    }

    fn set(&mut self, from: usize, into: usize, elem: f64) -> Result<f64> {
        self.check(from, into)?;
        let elem = self.kind().coerce_f64(elem);
        let (from, into) = canonical(self.symmetric, from, into);
        let prev = self.row_set(from, into, elem)?;
        if self.symmetric && from != into {
            self.row_set(into, from, elem)?;
        }
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
        check_vertex(vertex, self.leads.len())?;
        let Lead { start, len } = self.leads[vertex];
        Ok((start..start + len).map(|pos| self.trail_at(pos)).collect())
    }

    fn power(&self, vertex: usize) -> Result<f64> {
        check_vertex(vertex, self.leads.len())?;
        let Lead { start, len } = self.leads[vertex];
        Ok((start..start + len).fold(0.0, |sum, pos| sum + self.value_at(pos)))
    }

    fn non_def_iter(&self) -> Box<dyn Iterator<Item = Entry> + '_> {
        Box::new(
            self.leads
                .iter()
                .enumerate()
                .flat_map(move |(from, lead)| {
                    (lead.start..lead.start + lead.len).map(move |pos| (from, pos))
                })
                .filter_map(move |(from, pos)| {
                    let into = self.trail_at(pos);
                    if self.symmetric && into < from {
                        return None;
                    }
                    Some(Entry::new(from, into, self.value_at(pos)))
                }),
        )
    }

    fn non_def_count(&self) -> usize {
        self.non_def
    }

    fn clear(&mut self) -> Result<()> {
        self.leads.fill(Lead::default());
        self.trails.clear();
        self.data.clear();
        self.non_def = 0;
        Ok(())
    }

    fn proto(&self, size: usize) -> Box<dyn EdgeData> {
        Box::new(Self::new(size, self.symmetric, self.def_elem, self.kind()))
    }

    fn write_wire(&mut self, w: &mut dyn Write) -> Result<u64> {
        let mut stream = self.create_stream()?;
        Ok(io::copy(&mut stream, w)?)
    }
}

/// Header, non-default count and the compacted lead windows.
struct SparseHead<'a> {
    edges: &'a SparseEdges,
}

impl Chunked for SparseHead<'_> {
    fn chunk_count(&self) -> usize {
        3 + self.edges.leads.len()
    }

    fn encode_chunk(&self, index: usize, out: &mut [u8; 8]) -> usize {
        let edges = self.edges;
        match index {
            0 | 1 => {
                let header = Header {
                    symmetric: edges.symmetric,
                    size: edges.leads.len(),
                    def_elem: edges.def_elem,
                }
                .encode();
                let (from, upto) = if index == 0 { (0, 5) } else { (5, 13) };
                out[..upto - from].copy_from_slice(&header[from..upto]);
                upto - from
            }
            2 => {
                out[..4].copy_from_slice(&encode_size(edges.non_def));
                4
            }
            _ => {
                let lead = edges.leads[index - 3];
                out[..4].copy_from_slice(&encode_size(lead.start));
                out[4..8].copy_from_slice(&encode_size(lead.start + lead.len));
                8
            }
        }
    }
}
