#![forbid(unsafe_code)]

//! Weighted adjacency storage and all-pairs shortest paths for overlay network research.
//!
//! Topologies are [`EdgeData`] instances (dense grid, sparse sorted runs, or a constant
//! placeholder) built by an [`EdgeDataFactory`]. [`paths::floyd_warshall`] and [`paths::johnson`]
//! turn them into [`Routes`]; the wire format in [`wire`] is what gets persisted between runs.

pub use lamprey_store as store;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod edges;
pub mod error;
pub mod paths;
pub mod routes;
pub mod stats;
pub mod wire;

pub use edges::{
    Backend, ConstantEdges, DenseEdges, DenseStream, EdgeData, EdgeDataFactory, Entry, SparseEdges,
};
pub use error::{Error, Result};
pub use routes::{Route, Routes};
pub use stats::{DegreeStats, DistanceStats};
