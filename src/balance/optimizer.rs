use log::{debug, info};
use rayon::prelude::*;

use super::cost::{self, Score};
use super::partition::{Partition, PartitionEnumerator};
use super::roles::RoleAssigner;
use crate::config::BalanceSettings;
use crate::domain::{MatchResult, PlayerPool, PlayerProfile, TEAM_SIZE, TeamAssignment};
use crate::errors::{BalanceError, PreconditionError, ValidationError};

/// Position of a candidate in sequential enumeration order:
/// (partition, team 1 ordering, team 2 ordering)
pub type CandidateIndex = (usize, usize, usize);

#[derive(Debug, Clone, Copy)]
pub struct Candidate {
    pub index: CandidateIndex,
    pub team_1: [usize; TEAM_SIZE],
    pub team_2: [usize; TEAM_SIZE],
    pub score: Score,
}

impl Candidate {
    /// Lower cost wins; equal costs go to the earlier candidate
    fn beats(&self, other: &Candidate) -> bool {
        self.score.total_cost < other.score.total_cost
            || (self.score.total_cost == other.score.total_cost && self.index < other.index)
    }
}

/// Slot order of one team together with its fill deficit
struct ScoredOrdering<'a> {
    order: [usize; TEAM_SIZE],
    lineup: [&'a PlayerProfile; TEAM_SIZE],
    deficit: u32,
}

pub fn optimize_players(players: Vec<PlayerProfile>, settings: &BalanceSettings) -> Result<MatchResult, BalanceError> {
    let pool = PlayerPool::new(players)?;
    optimize(&pool, settings)
}

/// Search every split and role assignment sequentially
pub fn optimize(pool: &PlayerPool, settings: &BalanceSettings) -> Result<MatchResult, BalanceError> {
    let assigner = prepare(pool, settings)?;
    let mut best: Option<Candidate> = None;

    for (partition_index, partition) in PartitionEnumerator::mirror_free().enumerate() {
        let Some(candidate) = best_in_partition(pool, partition_index, partition, &assigner, settings) else {
            continue;
        };

        if best.is_none_or(|current| candidate.score.total_cost < current.score.total_cost) {
            debug!(
                "New best at partition {}: cost {:.1} (worst lane gap {:.1})",
                partition_index, candidate.score.total_cost, candidate.score.worst_lane_gap
            );
            best = Some(candidate);
        }
    }

    finish(pool, best)
}

/// Same result as `optimize`, with partitions spread over the rayon pool
pub fn optimize_parallel(pool: &PlayerPool, settings: &BalanceSettings) -> Result<MatchResult, BalanceError> {
    let assigner = prepare(pool, settings)?;
    let partitions: Vec<Partition> = PartitionEnumerator::mirror_free().collect();

    let best = partitions
        .par_iter()
        .enumerate()
        .filter_map(|(partition_index, &partition)| {
            best_in_partition(pool, partition_index, partition, &assigner, settings)
        })
        .reduce_with(|left, right| if right.beats(&left) { right } else { left });

    finish(pool, best)
}

/// Best candidate within one split, first one wins on equal cost
pub fn best_in_partition(
    pool: &PlayerPool,
    partition_index: usize,
    partition: Partition,
    assigner: &RoleAssigner,
    settings: &BalanceSettings,
) -> Option<Candidate> {
    let first = score_orderings(pool, partition.group_a(), assigner, settings);
    let second = score_orderings(pool, partition.group_b(), assigner, settings);
    let mut best: Option<Candidate> = None;

    for (i, team_1) in first.iter().enumerate() {
        for (j, team_2) in second.iter().enumerate() {
            let gaps = cost::lane_gaps(&team_1.lineup, &team_2.lineup, settings.bot_lane_aggregate);
            let score = Score::from_parts(team_1.deficit + team_2.deficit, gaps, settings);

            if best.is_none_or(|current| score.total_cost < current.score.total_cost) {
                best = Some(Candidate {
                    index: (partition_index, i, j),
                    team_1: team_1.order,
                    team_2: team_2.order,
                    score,
                });
            }
        }
    }

    best
}

fn score_orderings<'a>(
    pool: &'a PlayerPool,
    group: [usize; TEAM_SIZE],
    assigner: &RoleAssigner,
    settings: &BalanceSettings,
) -> Vec<ScoredOrdering<'a>> {
    assigner
        .assignments(group)
        .map(|order| {
            let lineup = pool.lineup(&order);
            let deficit = cost::fill_deficit(&lineup, settings.max_affinity);
            ScoredOrdering { order, lineup, deficit }
        })
        .collect()
}

fn prepare(pool: &PlayerPool, settings: &BalanceSettings) -> Result<RoleAssigner, BalanceError> {
    settings.validate()?;
    check_affinities(pool, settings.max_affinity)?;

    let assigner = RoleAssigner::new(settings.role_search);
    info!(
        "Balancing {} players: {} splits, {} role orderings per team",
        pool.len(),
        PartitionEnumerator::mirror_free().count(),
        assigner.len()
    );

    Ok(assigner)
}

/// Preferences above `max_affinity` would otherwise score as a perfect fit
fn check_affinities(pool: &PlayerPool, max_affinity: u8) -> Result<(), ValidationError> {
    for player in pool.players() {
        if let Some(value) = player.affinity().values().into_iter().find(|&v| v > max_affinity) {
            return Err(ValidationError::OutOfRange {
                identity: player.identity().to_string(),
                value,
                max: max_affinity,
            });
        }
    }
    Ok(())
}

fn finish(pool: &PlayerPool, best: Option<Candidate>) -> Result<MatchResult, BalanceError> {
    let best = best.ok_or(PreconditionError::NoCandidate)?;
    info!(
        "Best split found: cost {:.1}, fill penalty {:.1}, worst lane gap {:.1}",
        best.score.total_cost, best.score.fill_penalty, best.score.worst_lane_gap
    );

    Ok(MatchResult {
        team_1: TeamAssignment::from_pool(pool, &best.team_1),
        team_2: TeamAssignment::from_pool(pool, &best.team_2),
        total_cost: best.score.total_cost,
        worst_lane_gap: best.score.worst_lane_gap,
        fill_penalty: best.score.fill_penalty,
        lane_gaps: best.score.lane_gaps,
    })
}
