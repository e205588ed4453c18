//! Max-id discovery over an ordered, unbounded id space.
//!
//! The catalog exposes no "highest id" endpoint, so the boundary is found
//! with pass/fail probes only: an exponential walk away from a starting
//! guess until validity flips, then a binary search inside the bracket.
//!
//! Validity is assumed monotonic (every id up to the boundary is valid,
//! every id above it is not). This is not verified. A catalog with holes
//! (retracted ids inside the valid range) can make the walk stop at the
//! first hole it lands on, and that hole's lower edge is returned as the
//! boundary.

mod error;

pub use error::SearchError;

use std::future::Future;

/// Outcome of probing one id. Transport errors must already be mapped to
/// `Invalid` by the probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validity {
    Valid,
    Invalid,
}

impl Validity {
    pub fn is_valid(self) -> bool {
        self == Validity::Valid
    }
}

impl From<bool> for Validity {
    fn from(valid: bool) -> Self {
        if valid {
            Validity::Valid
        } else {
            Validity::Invalid
        }
    }
}

/// Default ceiling on probes spent walking for a flip.
pub const DEFAULT_MAX_PROBES: u32 = 64;

/// Finds the greatest valid id using an injected async probe.
#[derive(Debug, Clone, Copy)]
pub struct BoundaryFinder {
    max_probes: u32,
}

impl Default for BoundaryFinder {
    fn default() -> Self {
        Self {
            max_probes: DEFAULT_MAX_PROBES,
        }
    }
}

/// Counts probes and answers for the id-0 sentinel without probing.
struct Prober<P> {
    probe: P,
    probes: u32,
}

impl<P, F> Prober<P>
where
    P: FnMut(u64) -> F,
    F: Future<Output = Validity>,
{
    async fn is_valid(&mut self, id: u64) -> bool {
        // Id 0 sits below every real id; treating it as valid lets the
        // downward walk terminate.
        if id == 0 {
            return true;
        }
        self.probes += 1;
        let valid = (self.probe)(id).await.is_valid();
        tracing::trace!(id, valid, "probe");
        valid
    }
}

impl BoundaryFinder {
    /// `max_probes` bounds the exponential walk; 0 is bumped to 1.
    pub fn new(max_probes: u32) -> Self {
        Self {
            max_probes: max_probes.max(1),
        }
    }

    /// Returns the greatest id `b` such that `probe(b)` is valid, starting the
    /// search at `start` (must be ≥ 1).
    ///
    /// Probes are issued one at a time; dropping the returned future between
    /// probes cancels the search.
    pub async fn find<P, F>(&self, start: u64, probe: P) -> Result<u64, SearchError>
    where
        P: FnMut(u64) -> F,
        F: Future<Output = Validity>,
    {
        if start == 0 {
            return Err(SearchError::InvalidStart);
        }
        let mut prober = Prober { probe, probes: 0 };

        let start_valid = prober.is_valid(start).await;
        let upward = start_valid;
        tracing::debug!(start, start_valid, "searching for max id");

        // Exponential walk: offsets 1, 2, 4, 8, ... from `start`.
        let advance = |i: u64, step: u64, probes: u32| {
            if upward {
                i.checked_add(step)
                    .ok_or(SearchError::Exhausted { probes })
            } else {
                Ok(i.saturating_sub(step))
            }
        };
        let mut step: u64 = 1;
        let mut i = advance(start, step, prober.probes)?;
        loop {
            if prober.probes >= self.max_probes {
                return Err(SearchError::Exhausted {
                    probes: prober.probes,
                });
            }
            if prober.is_valid(i).await != start_valid {
                break;
            }
            i = advance(i, step, prober.probes)?;
            step = step.saturating_mul(2);
        }

        let (mut low, mut high) = (start.min(i), start.max(i));
        tracing::debug!(low, high, probes = prober.probes, "bracketed boundary");

        while high - low > 1 {
            let mid = low + (high - low) / 2;
            if prober.is_valid(mid).await {
                low = mid;
            } else {
                high = mid;
            }
        }

        if low == 0 {
            return Err(SearchError::NoValidId);
        }
        tracing::debug!(boundary = low, probes = prober.probes, "found boundary");
        Ok(low)
    }
}
