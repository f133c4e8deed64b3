pub mod mmr_client;
pub mod models;

pub use mmr_client::MmrClient;
pub use models::MmrResponse;
