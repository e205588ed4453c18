//! Id specifiers from the command line and their expansion to concrete ids.
//!
//! A specifier is one of `N`, `A-B` (inclusive), `random` or `randomN`,
//! optionally prefixed with `artist:` or `recording:`. Random specifiers
//! need the catalog's current max id to sample from.

use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::str::FromStr;

use rand::Rng;
use thiserror::Error;

/// Which id space an id lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum IdKind {
    #[default]
    Recording,
    Artist,
}

impl IdKind {
    pub fn as_str(self) -> &'static str {
        match self {
            IdKind::Recording => "recording",
            IdKind::Artist => "artist",
        }
    }

    /// Last known max id, used as the first guess when nothing is cached.
    pub fn seed(self) -> u64 {
        match self {
            IdKind::Recording => 10_330,
            IdKind::Artist => 1,
        }
    }
}

impl fmt::Display for IdKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for IdKind {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "recording" | "recordings" => Ok(IdKind::Recording),
            "artist" | "artists" => Ok(IdKind::Artist),
            other => Err(IdError::UnknownKind(other.to_string())),
        }
    }
}

/// A concrete catalog id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id {
    pub kind: IdKind,
    pub value: u64,
}

impl Id {
    /// File name for this id's download, e.g. `artist-42.bin`.
    pub fn file_name(&self) -> String {
        format!("{}-{}.bin", self.kind, self.value)
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} #{}", self.kind, self.value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdSpec {
    Single(Id),
    Range { kind: IdKind, start: u64, end: u64 },
    Random { kind: IdKind, count: usize },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdError {
    #[error("unrecognized id specifier '{0}'")]
    Unrecognized(String),
    #[error("unknown id kind '{0}'")]
    UnknownKind(String),
    #[error("ids start at 1")]
    Zero,
    #[error("range {start}-{end} is empty")]
    EmptyRange { start: u64, end: u64 },
    #[error("no max {0} id known; cannot pick random ids")]
    MissingMaxId(IdKind),
    #[error("cannot pick {count} distinct ids out of {max}")]
    SampleTooLarge { count: usize, max: u64 },
    #[error("{count} ids requested; at most {limit} per batch")]
    TooMany { count: u64, limit: u64 },
}

/// Ceiling on the number of ids one batch may expand to.
pub const MAX_IDS: u64 = 100_000;

fn parse_positive(s: &str) -> Option<Result<u64, IdError>> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(match s.parse::<u64>() {
        Ok(0) => Err(IdError::Zero),
        Ok(v) => Ok(v),
        Err(_) => Err(IdError::Unrecognized(s.to_string())),
    })
}

impl IdSpec {
    /// Parse `s`, using `default_kind` unless `s` carries a kind prefix.
    pub fn parse_with_kind(s: &str, default_kind: IdKind) -> Result<Self, IdError> {
        let s = s.trim();
        let (kind, body) = if let Some(rest) = s.strip_prefix("artist:") {
            (IdKind::Artist, rest)
        } else if let Some(rest) = s.strip_prefix("recording:") {
            (IdKind::Recording, rest)
        } else {
            (default_kind, s)
        };

        if let Some(value) = parse_positive(body) {
            return Ok(IdSpec::Single(Id { kind, value: value? }));
        }

        if let Some((a, b)) = body.split_once('-') {
            if let (Some(start), Some(end)) = (parse_positive(a), parse_positive(b)) {
                let (start, end) = (start?, end?);
                if start > end {
                    return Err(IdError::EmptyRange { start, end });
                }
                return Ok(IdSpec::Range { kind, start, end });
            }
        }

        if let Some(n) = body.strip_prefix("random") {
            let count = if n.is_empty() {
                1
            } else {
                match parse_positive(n) {
                    Some(Ok(c)) => c as usize,
                    Some(Err(e)) => return Err(e),
                    None => return Err(IdError::Unrecognized(s.to_string())),
                }
            };
            return Ok(IdSpec::Random { kind, count });
        }

        Err(IdError::Unrecognized(s.to_string()))
    }

    pub fn kind(&self) -> IdKind {
        match self {
            IdSpec::Single(id) => id.kind,
            IdSpec::Range { kind, .. } | IdSpec::Random { kind, .. } => *kind,
        }
    }
}

impl FromStr for IdSpec {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IdSpec::parse_with_kind(s, IdKind::default())
    }
}

/// Kinds whose max id must be known before `specs` can be expanded.
pub fn kinds_needing_max_id(specs: &[IdSpec]) -> BTreeSet<IdKind> {
    specs
        .iter()
        .filter(|s| matches!(s, IdSpec::Random { .. }))
        .map(IdSpec::kind)
        .collect()
}

/// Expand specifiers into concrete ids, in specifier order.
///
/// `max_id_for` supplies the catalog max id for random sampling; random
/// picks are distinct within one specifier. Repeated ids keep their first
/// position only. Fails with [`IdError::TooMany`] before allocating if the
/// specifiers ask for more than [`MAX_IDS`] ids.
pub fn expand<F, R>(specs: &[IdSpec], max_id_for: F, rng: &mut R) -> Result<Vec<Id>, IdError>
where
    F: Fn(IdKind) -> Option<u64>,
    R: Rng + ?Sized,
{
    let mut requested = 0u64;
    let mut reserve = |count: u64| {
        requested = requested.saturating_add(count);
        if requested > MAX_IDS {
            Err(IdError::TooMany {
                count: requested,
                limit: MAX_IDS,
            })
        } else {
            Ok(())
        }
    };

    let mut ids = Vec::new();
    for spec in specs {
        match *spec {
            IdSpec::Single(id) => {
                reserve(1)?;
                ids.push(id);
            }
            IdSpec::Range { kind, start, end } => {
                reserve(end.saturating_sub(start).saturating_add(1))?;
                ids.extend((start..=end).map(|value| Id { kind, value }));
            }
            IdSpec::Random { kind, count } => {
                reserve(count as u64)?;
                let max = max_id_for(kind).ok_or(IdError::MissingMaxId(kind))?;
                if count as u64 > max {
                    return Err(IdError::SampleTooLarge { count, max });
                }
                let picks = rand::seq::index::sample(rng, max as usize, count);
                ids.extend(picks.into_iter().map(|i| Id {
                    kind,
                    value: i as u64 + 1,
                }));
            }
        }
    }

    let mut seen = HashSet::with_capacity(ids.len());
    ids.retain(|id| seen.insert(*id));
    Ok(ids)
}
