use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::config::{BalanceProfile, BotLaneAggregate, RoleSearch};

#[derive(Parser, Debug)]
#[command(author, version, about = "Split ten players into two balanced five-player teams")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Balance the ten players listed in a record file
    Balance {
        /// `name: 12345` text records, or a JSON export of user records
        file: PathBuf,

        #[command(flatten)]
        options: BalanceOptions,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Look up the rating used for one player
    Rating {
        /// Player name as known to the rating service
        name: String,

        #[command(flatten)]
        options: BalanceOptions,
    },
    /// Print shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Overrides applied on top of the selected profile
#[derive(Args, Debug, Clone, PartialEq)]
pub struct BalanceOptions {
    /// Preset for every balancing knob
    #[arg(long, value_enum, default_value_t = BalanceProfile::Classic)]
    pub profile: BalanceProfile,

    /// Penalty per missing affinity point
    #[arg(long)]
    pub fill_weight: Option<f64>,

    /// Highest affinity value a preference digit may take
    #[arg(long)]
    pub max_affinity: Option<u8>,

    /// How the two bot lane ratings are combined
    #[arg(long, value_enum)]
    pub bot_lane: Option<BotLaneAggregate>,

    /// Keep roles in input order or search every assignment
    #[arg(long, value_enum)]
    pub role_search: Option<RoleSearch>,

    /// Rating used when a lookup fails or is ambiguous
    #[arg(long)]
    pub fallback_rating: Option<f64>,

    /// JSON file of known ratings; skips the network lookup
    #[arg(long)]
    pub ratings: Option<PathBuf>,

    /// Drop cached lookup responses before resolving ratings
    #[arg(long)]
    pub refresh_cache: bool,

    /// Spread the search over all cores
    #[arg(long)]
    pub parallel: bool,
}
