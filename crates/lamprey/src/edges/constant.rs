use super::{EdgeData, Entry, check_vertex, same_elem};
use crate::error::{Error, Result};

/// Immutable graph where every position holds the same value.
///
/// Typically used as a uniform distance source next to a separate connectivity graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantEdges {
    size: usize,
    value: f64,
    def_elem: f64,
}

impl ConstantEdges {
    pub fn new(size: usize, value: f64) -> Self {
        Self::with_def_elem(size, value, 0.0)
    }

    pub fn with_def_elem(size: usize, value: f64, def_elem: f64) -> Self {
        Self {
            size,
            value,
            def_elem,
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    fn connected(&self) -> bool {
        !same_elem(self.value, self.def_elem)
    }

    fn unsupported(&self, op: &'static str) -> Error {
        Error::Unsupported {
            op,
            backend: self.backend_name(),
        }
    }
}

impl EdgeData for ConstantEdges {
    fn backend_name(&self) -> &'static str {
        "constant"
    }

    fn size(&self) -> usize {
        self.size
    }

    fn is_symmetric(&self) -> bool {
        true
    }

    fn def_elem(&self) -> f64 {
        self.def_elem
    }

    fn get(&self, from: usize, into: usize) -> Result<f64> {
        check_vertex(from, self.size)?;
        check_vertex(into, self.size)?;
        Ok(self.value)
    }

    fn set(&mut self, _from: usize, _into: usize, _elem: f64) -> Result<f64> {
        Err(self.unsupported("set"))
    }

    fn conn_vertexes(&self, vertex: usize) -> Result<Vec<usize>> {
        check_vertex(vertex, self.size)?;
        Ok(if self.connected() {
            (0..self.size).collect()
        } else {
            Vec::new()
        })
    }

    fn non_def_iter(&self) -> Box<dyn Iterator<Item = Entry> + '_> {
        if !self.connected() {
            return Box::new(std::iter::empty());
        }
        let size = self.size;
        let value = self.value;
        Box::new(
            (0..size).flat_map(move |from| (from..size).map(move |into| Entry::new(from, into, value))),
        )
    }

    fn non_def_count(&self) -> usize {
        if self.connected() {
            self.size * (self.size + 1) / 2
        } else {
            0
        }
    }

    fn total(&self) -> f64 {
        match self.non_def_count() {
            0 => 0.0,
            count => count as f64 * self.value,
        }
    }

    fn clear(&mut self) -> Result<()> {
        Err(self.unsupported("clear"))
    }

    fn proto(&self, size: usize) -> Box<dyn EdgeData> {
        Box::new(Self { size, ..*self })
    }
}
