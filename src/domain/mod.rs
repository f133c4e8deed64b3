pub mod models;
pub mod records;

pub use models::*;
pub use records::{PlayerRecord, UserRecord, load_records};
