use super::{DenseEdges, EdgeData, SparseEdges};
use crate::error::{Error, Result};
use lamprey_store::StoreKind;
use serde::{Deserialize, Serialize};
use std::io::Read;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Dense,
    #[default]
    Sparse,
}

/// Chooses the backend and parameters of the edge data built for each graph instance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EdgeDataFactory {
    pub backend: Backend,
    pub symmetric: bool,
    /// Value read at positions that hold no edge.
    pub def_elem: f64,
    /// Width of the stored values.
    pub kind: StoreKind,
}

impl Default for EdgeDataFactory {
    fn default() -> Self {
        Self {
            backend: Backend::Sparse,
            symmetric: false,
            def_elem: 0.0,
            kind: StoreKind::Double,
        }
    }
}

impl EdgeDataFactory {
    pub fn dense() -> Self {
        Self {
            backend: Backend::Dense,
            ..Default::default()
        }
    }

    pub fn sparse() -> Self {
        Self::default()
    }

    pub fn with_symmetric(mut self, symmetric: bool) -> Self {
        self.symmetric = symmetric;
        self
    }

    pub fn with_def_elem(mut self, def_elem: f64) -> Self {
        self.def_elem = def_elem;
        self
    }

    pub fn with_kind(mut self, kind: StoreKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Config {
            message: e.to_string(),
        })
    }

    pub fn create(&self, size: usize) -> Box<dyn EdgeData> {
        match self.backend {
            Backend::Dense => Box::new(DenseEdges::new(
                size,
                self.symmetric,
                self.def_elem,
                self.kind,
            )),
            Backend::Sparse => Box::new(SparseEdges::new(
                size,
                self.symmetric,
                self.def_elem,
                self.kind,
            )),
        }
    }

    /// Decodes a stream written by the configured backend. Symmetry and the default element come
    /// from the stream; the dense store kind comes from this factory.
    pub fn decode<R: Read + ?Sized>(&self, r: &mut R) -> Result<Box<dyn EdgeData>> {
        Ok(match self.backend {
            Backend::Dense => Box::new(DenseEdges::from_stream(r, self.kind)?),
            Backend::Sparse => Box::new(SparseEdges::from_stream(r)?),
        })
    }
}
