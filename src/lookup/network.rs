use anyhow::Result;
use tokio::runtime::Runtime;

use super::RatingLookup;
use crate::api::MmrClient;
use crate::cache::Cache;
use crate::config::LookupSettings;
use crate::errors::LookupError;

/// Blocking adapter over the async MMR client
pub struct MmrLookup {
    runtime: Runtime,
    client: MmrClient,
}

impl MmrLookup {
    pub fn new(settings: &LookupSettings, cache: Option<Cache>) -> Result<Self> {
        let runtime = Runtime::new()?;
        let client = MmrClient::new(settings, cache)?;
        Ok(Self { runtime, client })
    }
}

impl RatingLookup for MmrLookup {
    fn lookup(&mut self, identity: &str) -> Result<f64, LookupError> {
        let fetched = self.runtime.block_on(self.client.fetch_rating(identity));

        match fetched {
            Ok(Some(rating)) => Ok(rating),
            Ok(None) => Err(LookupError::Ambiguous(identity.to_string())),
            Err(e) => Err(LookupError::unavailable(identity, format!("{:#}", e))),
        }
    }
}
