use clap::ValueEnum;
use serde::Serialize;

use crate::errors::ValidationError;

/// How the two bot lane ratings of a team are combined before comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BotLaneAggregate {
    Sum,
    Mean,
}

impl BotLaneAggregate {
    pub fn combine(&self, first: f64, second: f64) -> f64 {
        match self {
            BotLaneAggregate::Sum => first + second,
            BotLaneAggregate::Mean => (first + second) / 2.0,
        }
    }
}

/// Whether role slots follow the group order or are searched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RoleSearch {
    Fixed,
    Exhaustive,
}

/// Named presets for the two balancing variants in use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum BalanceProfile {
    /// Weight 300, summed bot lane, roles fixed by order, fallback 1100
    #[default]
    Classic,
    /// Weight 500, averaged bot lane, roles searched, fallback 1000
    Searched,
}

impl BalanceProfile {
    pub fn balance_settings(&self) -> BalanceSettings {
        match self {
            BalanceProfile::Classic => BalanceSettings {
                fill_weight: 300.0,
                max_affinity: 5,
                bot_lane_aggregate: BotLaneAggregate::Sum,
                role_search: RoleSearch::Fixed,
            },
            BalanceProfile::Searched => BalanceSettings {
                fill_weight: 500.0,
                max_affinity: 5,
                bot_lane_aggregate: BotLaneAggregate::Mean,
                role_search: RoleSearch::Exhaustive,
            },
        }
    }

    pub fn fallback_rating(&self) -> f64 {
        match self {
            BalanceProfile::Classic => 1100.0,
            BalanceProfile::Searched => 1000.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalanceSettings {
    pub fill_weight: f64,
    pub max_affinity: u8,
    pub bot_lane_aggregate: BotLaneAggregate,
    pub role_search: RoleSearch,
}

impl Default for BalanceSettings {
    fn default() -> Self {
        BalanceProfile::default().balance_settings()
    }
}

impl BalanceSettings {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.fill_weight.is_finite() || self.fill_weight < 0.0 {
            return Err(ValidationError::InvalidSetting {
                name: "fill_weight",
                reason: format!("{} is not a finite non-negative number", self.fill_weight),
            });
        }

        // Preference strings carry one digit per role
        if self.max_affinity == 0 || self.max_affinity > 9 {
            return Err(ValidationError::InvalidSetting {
                name: "max_affinity",
                reason: format!("{} is outside 1..=9", self.max_affinity),
            });
        }

        Ok(())
    }
}

pub struct LookupSettings {
    pub base_url: String,
    pub user_agent: &'static str,
    pub timeout_secs: u64,
    pub rate_limit_ms: u64,
    pub fallback_rating: f64,
    pub cache_dir: String,
}

impl Default for LookupSettings {
    fn default() -> Self {
        Self {
            base_url: "https://na.whatismymmr.com/api/v1/summoner".to_string(),
            user_agent: "LaneBalancer/0.1",
            timeout_secs: 30,
            rate_limit_ms: 250,
            fallback_rating: BalanceProfile::default().fallback_rating(),
            cache_dir: std::env::var("LANE_BALANCER_CACHE_DIR")
                .unwrap_or_else(|_| "cache".to_string()),
        }
    }
}

pub struct AppConfig {
    pub balance: BalanceSettings,
    pub lookup: LookupSettings,
    pub parallel: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self::from_profile(BalanceProfile::default())
    }

    pub fn from_profile(profile: BalanceProfile) -> Self {
        let lookup = LookupSettings {
            fallback_rating: profile.fallback_rating(),
            ..LookupSettings::default()
        };

        Self {
            balance: profile.balance_settings(),
            lookup,
            parallel: false,
        }
    }
}
