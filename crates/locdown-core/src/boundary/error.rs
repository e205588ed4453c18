//! Errors raised by the boundary search itself (never by probes).

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    /// Ids start at 1.
    #[error("search must start at an id >= 1")]
    InvalidStart,
    /// The probe never flipped within the probe ceiling.
    #[error("no validity change found after {probes} probes")]
    Exhausted { probes: u32 },
    /// Every id down to 1 probed invalid.
    #[error("no valid id exists")]
    NoValidId,
}
