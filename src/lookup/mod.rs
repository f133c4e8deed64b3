mod network;

pub use network::MmrLookup;

use anyhow::{Context, Result};
use log::{info, warn};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::domain::{PlayerPool, PlayerProfile, PlayerRecord, RatingSource};
use crate::errors::{self, BalanceError, LookupError};

/// Source of player ratings, queried once per player before a search
pub trait RatingLookup {
    fn lookup(&mut self, identity: &str) -> Result<f64, LookupError>;
}

impl<L: RatingLookup + ?Sized> RatingLookup for Box<L> {
    fn lookup(&mut self, identity: &str) -> Result<f64, LookupError> {
        (**self).lookup(identity)
    }
}

/// Ratings known up front, e.g. from a `{ "name": 1234.0 }` file
#[derive(Debug, Clone, Default)]
pub struct StaticRatings {
    ratings: HashMap<String, f64>,
}

impl StaticRatings {
    pub fn new(ratings: HashMap<String, f64>) -> Self {
        Self { ratings }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).with_context(|| errors::read_context(path))?;
        let ratings = serde_json::from_str(&content).with_context(|| errors::parse_context("ratings file"))?;
        Ok(Self::new(ratings))
    }
}

impl RatingLookup for StaticRatings {
    fn lookup(&mut self, identity: &str) -> Result<f64, LookupError> {
        self.ratings
            .get(identity)
            .copied()
            .ok_or_else(|| LookupError::unavailable(identity, "not in ratings file"))
    }
}

/// A rating together with where it came from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedRating {
    pub value: f64,
    pub source: RatingSource,
}

/// Wraps a lookup and substitutes `fallback` whenever it fails
pub struct RatingResolver<L> {
    lookup: L,
    fallback: f64,
}

impl<L: RatingLookup> RatingResolver<L> {
    pub fn new(lookup: L, fallback: f64) -> Self {
        Self { lookup, fallback }
    }

    pub fn resolve(&mut self, identity: &str) -> ResolvedRating {
        match self.lookup.lookup(identity) {
            Ok(value) if value.is_finite() => ResolvedRating {
                value,
                source: RatingSource::Lookup,
            },
            Ok(value) => self.fall_back(identity, &format!("lookup returned {}", value)),
            Err(e) => self.fall_back(identity, &e.to_string()),
        }
    }

    /// Resolve every record's rating and build the pool
    pub fn resolve_pool(&mut self, records: &[PlayerRecord]) -> Result<PlayerPool, BalanceError> {
        let players = records
            .iter()
            .map(|record| self.resolve_record(record))
            .collect::<Result<Vec<_>, _>>()?;

        let fallbacks = players
            .iter()
            .filter(|p| p.rating_source() == RatingSource::Fallback)
            .count();
        info!("Resolved {} ratings ({} fallback)", players.len(), fallbacks);

        Ok(PlayerPool::new(players)?)
    }

    fn resolve_record(&mut self, record: &PlayerRecord) -> Result<PlayerProfile, BalanceError> {
        let rating = self.resolve(&record.identity);
        let profile = PlayerProfile::new(record.identity.clone(), record.affinity, rating.value, rating.source)?;
        Ok(profile)
    }

    fn fall_back(&self, identity: &str, reason: &str) -> ResolvedRating {
        warn!("Using fallback rating {} for {}: {}", self.fallback, identity, reason);
        ResolvedRating {
            value: self.fallback,
            source: RatingSource::Fallback,
        }
    }
}
