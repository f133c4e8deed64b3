use serde::Serialize;
use std::collections::HashSet;
use std::hash::{Hash, Hasher};

use crate::errors::{PreconditionError, ValidationError};

pub const POOL_SIZE: usize = 10;
pub const TEAM_SIZE: usize = 5;

/// Role slot within a team. Top, jungle and mid are solo lanes,
/// carry and support share the bot lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Top,
    Jungle,
    Mid,
    Carry,
    Support,
}

impl Role {
    pub const ALL: [Role; TEAM_SIZE] = [Role::Top, Role::Jungle, Role::Mid, Role::Carry, Role::Support];

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn is_bot(&self) -> bool {
        matches!(self, Role::Carry | Role::Support)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Role::Top => "top",
            Role::Jungle => "jungle",
            Role::Mid => "mid",
            Role::Carry => "carry",
            Role::Support => "support",
        }
    }
}

/// Per-role preference strengths, indexed by `Role::index`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RoleAffinity([u8; TEAM_SIZE]);

impl RoleAffinity {
    pub fn from_values(identity: &str, values: [u8; TEAM_SIZE], max_affinity: u8) -> Result<Self, ValidationError> {
        if let Some(&value) = values.iter().find(|&&v| v > max_affinity) {
            return Err(ValidationError::OutOfRange {
                identity: identity.to_string(),
                value,
                max: max_affinity,
            });
        }
        Ok(Self(values))
    }

    /// Parse a preference string such as "52314", one digit per role
    pub fn parse(identity: &str, text: &str, max_affinity: u8) -> Result<Self, ValidationError> {
        let digits = parse_digits(identity, text.trim())?;
        let values: [u8; TEAM_SIZE] = digits.try_into().map_err(|digits: Vec<u8>| {
            ValidationError::WrongLength {
                identity: identity.to_string(),
                len: digits.len(),
            }
        })?;
        Self::from_values(identity, values, max_affinity)
    }

    pub fn for_role(&self, role: Role) -> u8 {
        self.0[role.index()]
    }

    pub fn values(&self) -> [u8; TEAM_SIZE] {
        self.0
    }
}

fn parse_digits(identity: &str, text: &str) -> Result<Vec<u8>, ValidationError> {
    text.chars()
        .map(|c| {
            c.to_digit(10)
                .map(|d| d as u8)
                .ok_or_else(|| ValidationError::NonNumeric {
                    identity: identity.to_string(),
                    found: c,
                })
        })
        .collect()
}

/// Where a player's rating came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RatingSource {
    Lookup,
    Fallback,
}

/// Immutable per-player data. Equality and hashing use the identity only.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerProfile {
    identity: String,
    affinity: RoleAffinity,
    rating: f64,
    rating_source: RatingSource,
}

impl PlayerProfile {
    pub fn new(
        identity: impl Into<String>,
        affinity: RoleAffinity,
        rating: f64,
        rating_source: RatingSource,
    ) -> Result<Self, ValidationError> {
        let identity = identity.into();

        if identity.trim().is_empty() {
            return Err(ValidationError::EmptyIdentity);
        }
        if !rating.is_finite() {
            return Err(ValidationError::InvalidRating { identity, rating });
        }

        Ok(Self {
            identity,
            affinity,
            rating,
            rating_source,
        })
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn affinity(&self) -> &RoleAffinity {
        &self.affinity
    }

    pub fn affinity_for(&self, role: Role) -> u8 {
        self.affinity.for_role(role)
    }

    pub fn rating(&self) -> f64 {
        self.rating
    }

    pub fn rating_source(&self) -> RatingSource {
        self.rating_source
    }
}

impl PartialEq for PlayerProfile {
    fn eq(&self, other: &Self) -> bool {
        self.identity == other.identity
    }
}

impl Eq for PlayerProfile {}

impl Hash for PlayerProfile {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity.hash(state);
    }
}

/// Exactly ten distinct players. A player's position in the pool is its
/// dense index, used by the search instead of the profile itself.
#[derive(Debug, Clone)]
pub struct PlayerPool {
    players: Vec<PlayerProfile>,
}

impl PlayerPool {
    pub fn new(players: Vec<PlayerProfile>) -> Result<Self, PreconditionError> {
        if players.len() != POOL_SIZE {
            return Err(PreconditionError::PoolSize {
                expected: POOL_SIZE,
                actual: players.len(),
            });
        }

        let mut seen = HashSet::new();
        for player in &players {
            if !seen.insert(player.identity()) {
                return Err(PreconditionError::DuplicateIdentity(player.identity().to_string()));
            }
        }

        Ok(Self { players })
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn player(&self, index: usize) -> &PlayerProfile {
        &self.players[index]
    }

    pub fn players(&self) -> &[PlayerProfile] {
        &self.players
    }

    pub fn lineup(&self, order: &[usize; TEAM_SIZE]) -> Lineup<'_> {
        order.map(|index| self.player(index))
    }
}

/// Borrowed team in slot order, used while scoring candidates
pub type Lineup<'a> = [&'a PlayerProfile; TEAM_SIZE];

/// Five players in role order: slot `i` plays `Role::ALL[i]`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamAssignment {
    players: [PlayerProfile; TEAM_SIZE],
}

impl TeamAssignment {
    pub fn new(players: [PlayerProfile; TEAM_SIZE]) -> Self {
        Self { players }
    }

    pub fn from_pool(pool: &PlayerPool, order: &[usize; TEAM_SIZE]) -> Self {
        Self::new(order.map(|index| pool.player(index).clone()))
    }

    pub fn player(&self, role: Role) -> &PlayerProfile {
        &self.players[role.index()]
    }

    pub fn players(&self) -> &[PlayerProfile; TEAM_SIZE] {
        &self.players
    }

    pub fn lineup(&self) -> Lineup<'_> {
        self.players.each_ref()
    }

    pub fn identities(&self) -> Vec<&str> {
        self.players.iter().map(PlayerProfile::identity).collect()
    }

    pub fn slots(&self) -> impl Iterator<Item = (Role, &PlayerProfile)> {
        Role::ALL.into_iter().zip(self.players.iter())
    }
}

/// Outcome of one optimization run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub team_1: TeamAssignment,
    pub team_2: TeamAssignment,
    pub total_cost: f64,
    pub worst_lane_gap: f64,
    pub fill_penalty: f64,
    pub lane_gaps: [f64; 4],
}
