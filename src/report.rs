use anyhow::{Context, Result};
use colored::Colorize;

use crate::domain::{MatchResult, PlayerProfile, RatingSource, Role};

const LANE_NAMES: [&str; 4] = ["top", "jungle", "mid", "bot"];

pub fn render_json(result: &MatchResult) -> Result<String> {
    serde_json::to_string_pretty(result).context("Failed to serialize match result")
}

/// Side-by-side table of both teams followed by the cost breakdown
pub fn render_table(result: &MatchResult) -> String {
    let mut lines = vec![format!(
        "{:<8} {:<28} {:<28}",
        "",
        "Team 1".blue().bold(),
        "Team 2".red().bold()
    )];
    lines.extend(Role::ALL.into_iter().map(|role| {
        format!(
            "{:<8} {:<28} {:<28}",
            role.as_str(),
            describe(result.team_1.player(role), role),
            describe(result.team_2.player(role), role),
        )
    }));

    lines.push(String::new());
    lines.extend(
        LANE_NAMES
            .iter()
            .zip(result.lane_gaps)
            .map(|(lane, gap)| format!("{:<8} gap {:.1}", lane, gap)),
    );
    lines.push(format!("fill penalty   {:.1}", result.fill_penalty));
    lines.push(format!("worst lane gap {:.1}", result.worst_lane_gap));
    lines.push(format!("{} {:.1}", "total cost    ".bold(), result.total_cost));

    lines.join("\n")
}

fn describe(player: &PlayerProfile, role: Role) -> String {
    let marker = match player.rating_source() {
        RatingSource::Lookup => "",
        RatingSource::Fallback => "*",
    };
    format!(
        "{} ({:.0}{}, {})",
        player.identity(),
        player.rating(),
        marker,
        player.affinity_for(role)
    )
}
