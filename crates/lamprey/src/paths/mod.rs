//! All-pairs shortest paths over [`crate::EdgeData`].
//!
//! Both algorithms take a connectivity graph and an optional distance graph. Connectivity decides
//! which edges exist; their lengths come from the distance graph when given and from the
//! connectivity graph's own weights otherwise.
//!
//! Set `LAMPREY_PATHS_TIMING=1` to print per-phase timings to stderr.

mod floyd_warshall;
mod johnson;

pub use floyd_warshall::floyd_warshall;
pub use johnson::{JohnsonOptions, johnson, johnson_with_options};

use crate::edges::EdgeData;
use crate::error::{Error, Result};

fn timing_enabled() -> bool {
    static ENABLED: std::sync::OnceLock<bool> = std::sync::OnceLock::new();
    *ENABLED.get_or_init(|| {
        std::env::var("LAMPREY_PATHS_TIMING")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    })
}

fn weight_source<'a>(
    conn: &'a dyn EdgeData,
    dist: Option<&'a dyn EdgeData>,
) -> Result<&'a dyn EdgeData> {
    let weights = dist.unwrap_or(conn);
    if weights.size() != conn.size() {
        return Err(Error::SizeMismatch {
            left: conn.size(),
            right: weights.size(),
        });
    }
    Ok(weights)
}
