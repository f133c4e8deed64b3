use serde::Serialize;

use crate::config::{BalanceSettings, BotLaneAggregate};
use crate::domain::{Lineup, Role, TeamAssignment};

pub const LANE_COUNT: usize = 4;
const BOT_LANE: usize = 3;

/// Cost of one fully assigned team split
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Score {
    pub total_cost: f64,
    pub worst_lane_gap: f64,
    pub fill_penalty: f64,
    pub lane_gaps: [f64; LANE_COUNT],
}

impl Score {
    /// Combine the integer fill deficit of both teams with their lane gaps.
    /// The deficit is weighted once, so the result does not depend on the
    /// order in which slots were visited.
    pub fn from_parts(total_deficit: u32, lane_gaps: [f64; LANE_COUNT], settings: &BalanceSettings) -> Self {
        let fill_penalty = settings.fill_weight * f64::from(total_deficit);
        let worst_lane_gap = worst_gap(&lane_gaps);

        Self {
            total_cost: fill_penalty + worst_lane_gap,
            worst_lane_gap,
            fill_penalty,
            lane_gaps,
        }
    }
}

pub fn evaluate(team_1: &TeamAssignment, team_2: &TeamAssignment, settings: &BalanceSettings) -> Score {
    score_lineups(&team_1.lineup(), &team_2.lineup(), settings)
}

pub fn score_lineups(team_1: &Lineup<'_>, team_2: &Lineup<'_>, settings: &BalanceSettings) -> Score {
    let deficit = fill_deficit(team_1, settings.max_affinity) + fill_deficit(team_2, settings.max_affinity);
    let gaps = lane_gaps(team_1, team_2, settings.bot_lane_aggregate);
    Score::from_parts(deficit, gaps, settings)
}

/// Affinity points missing from a perfect fit, summed over the team's slots
pub fn fill_deficit(team: &Lineup<'_>, max_affinity: u8) -> u32 {
    Role::ALL
        .iter()
        .zip(team.iter())
        .map(|(&role, player)| u32::from(max_affinity.saturating_sub(player.affinity_for(role))))
        .sum()
}

pub fn lane_gaps(team_1: &Lineup<'_>, team_2: &Lineup<'_>, aggregate: BotLaneAggregate) -> [f64; LANE_COUNT] {
    let mut gaps = [0.0; LANE_COUNT];

    for (lane, gap) in gaps.iter_mut().enumerate().take(BOT_LANE) {
        *gap = (team_1[lane].rating() - team_2[lane].rating()).abs();
    }
    gaps[BOT_LANE] = (bot_lane_rating(team_1, aggregate) - bot_lane_rating(team_2, aggregate)).abs();

    gaps
}

fn bot_lane_rating(team: &Lineup<'_>, aggregate: BotLaneAggregate) -> f64 {
    aggregate.combine(
        team[Role::Carry.index()].rating(),
        team[Role::Support.index()].rating(),
    )
}

fn worst_gap(gaps: &[f64; LANE_COUNT]) -> f64 {
    gaps.iter().copied().fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BalanceProfile, RoleSearch};
    use crate::domain::{PlayerProfile, RatingSource, RoleAffinity};

    fn player(name: &str, prefs: &str, rating: f64) -> PlayerProfile {
        let affinity = RoleAffinity::parse(name, prefs, 5).unwrap();
        PlayerProfile::new(name, affinity, rating, RatingSource::Lookup).unwrap()
    }

    fn team(prefix: &str, prefs: [&str; 5], ratings: [f64; 5]) -> TeamAssignment {
        let players: Vec<_> = (0..5)
            .map(|i| player(&format!("{prefix}{i}"), prefs[i], ratings[i]))
            .collect();
        TeamAssignment::new(players.try_into().unwrap())
    }

    fn settings(aggregate: BotLaneAggregate) -> BalanceSettings {
        BalanceSettings {
            fill_weight: 300.0,
            max_affinity: 5,
            bot_lane_aggregate: aggregate,
            role_search: RoleSearch::Fixed,
        }
    }

    #[test]
    fn test_perfect_fit_equal_ratings_costs_nothing() {
        let blue = team("b", ["55555"; 5], [1200.0; 5]);
        let red = team("r", ["55555"; 5], [1200.0; 5]);
        let score = evaluate(&blue, &red, &settings(BotLaneAggregate::Sum));

        assert_eq!(score.total_cost, 0.0);
        assert_eq!(score.worst_lane_gap, 0.0);
    }

    #[test]
    fn test_fill_penalty_counts_missing_affinity_per_slot() {
        // Slot 0 wants top at 3 (deficit 2), slot 4 wants support at 0 (deficit 5)
        let blue = team("b", ["35555", "55555", "55555", "55555", "55550"], [1000.0; 5]);
        let red = team("r", ["55555", "51555", "55555", "55555", "55555"], [1000.0; 5]);
        let score = evaluate(&blue, &red, &settings(BotLaneAggregate::Sum));

        assert_eq!(score.fill_penalty, 300.0 * (2.0 + 5.0 + 4.0));
        assert_eq!(score.total_cost, score.fill_penalty);
    }

    #[test]
    fn test_bot_lane_sum_and_mean() {
        let blue = team("b", ["55555"; 5], [1000.0, 1000.0, 1000.0, 1200.0, 1400.0]);
        let red = team("r", ["55555"; 5], [1000.0, 1000.0, 1000.0, 1000.0, 1000.0]);

        let summed = evaluate(&blue, &red, &settings(BotLaneAggregate::Sum));
        assert_eq!(summed.lane_gaps, [0.0, 0.0, 0.0, 600.0]);
        assert_eq!(summed.worst_lane_gap, 600.0);
        assert_eq!(summed.total_cost, 600.0);

        let averaged = evaluate(&blue, &red, &settings(BotLaneAggregate::Mean));
        assert_eq!(averaged.lane_gaps, [0.0, 0.0, 0.0, 300.0]);
        assert_eq!(averaged.total_cost, 300.0);
    }

    #[test]
    fn test_worst_lane_dominates() {
        let blue = team("b", ["55555"; 5], [1500.0, 1100.0, 1000.0, 1000.0, 1000.0]);
        let red = team("r", ["55555"; 5], [1000.0, 1000.0, 1000.0, 1000.0, 1000.0]);
        let score = evaluate(&blue, &red, &settings(BotLaneAggregate::Sum));

        assert_eq!(score.lane_gaps, [500.0, 100.0, 0.0, 0.0]);
        assert_eq!(score.worst_lane_gap, 500.0);
    }

    #[test]
    fn test_swapping_teams_keeps_cost() {
        let blue = team("b", ["12345", "54321", "00000", "55555", "33333"], [900.0, 1300.0, 1250.0, 800.0, 1700.0]);
        let red = team("r", ["11111", "22222", "54321", "12345", "50505"], [1100.0, 1000.0, 1400.0, 1600.0, 950.0]);

        for profile in [BalanceProfile::Classic, BalanceProfile::Searched] {
            let settings = profile.balance_settings();
            assert_eq!(evaluate(&blue, &red, &settings), evaluate(&red, &blue, &settings));
        }
    }
}
