pub mod settings;

pub use settings::{AppConfig, BalanceProfile, BalanceSettings, BotLaneAggregate, LookupSettings, RoleSearch};
