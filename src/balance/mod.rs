pub mod cost;
pub mod optimizer;
pub mod partition;
pub mod roles;

pub use cost::{Score, evaluate};
pub use optimizer::{optimize, optimize_parallel, optimize_players};
pub use partition::{Partition, PartitionEnumerator};
pub use roles::RoleAssigner;
