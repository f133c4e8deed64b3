use crate::api::models::MmrResponse;
use crate::cache::Cache;
use crate::config::LookupSettings;
use crate::errors;
use crate::http::RateLimitedClient;
use anyhow::{Context, Result};
use log::{info, warn};
use serde_json::Value;

/// Client for the summoner MMR estimate service
pub struct MmrClient {
    client: RateLimitedClient,
    base_url: String,
    cache: Option<Cache>,
}

impl MmrClient {
    pub fn new(settings: &LookupSettings, cache: Option<Cache>) -> Result<Self> {
        let client = RateLimitedClient::new(settings.user_agent, settings.timeout_secs, settings.rate_limit_ms)?;
        Ok(Self {
            client,
            base_url: settings.base_url.clone(),
            cache,
        })
    }

    /// Fetch the raw response for a summoner name
    pub async fn fetch_raw(&mut self, identity: &str) -> Result<String> {
        let url = build_summoner_url(&self.base_url, identity);
        info!("Looking up rating for {} at {}", identity, url);
        self.client.get_text(&url).await
    }

    /// Resolve a rating, reusing a cached response when there is one.
    /// `Ok(None)` means the service answered but had no trustworthy estimate.
    pub async fn fetch_rating(&mut self, identity: &str) -> Result<Option<f64>> {
        let value = match self.load_cached(identity)? {
            Some(value) => value,
            None => {
                let text = self.fetch_raw(identity).await?;
                let value: Value = serde_json::from_str(&text)
                    .with_context(|| errors::parse_context("rating response"))?;
                self.store_cached(identity, &value);
                value
            }
        };

        let response: MmrResponse = serde_json::from_value(value)
            .with_context(|| format!("Failed to map rating response for {}", identity))?;

        Ok(response.rating())
    }

    fn load_cached(&self, identity: &str) -> Result<Option<Value>> {
        match &self.cache {
            Some(cache) => cache.load_raw(identity),
            None => Ok(None),
        }
    }

    fn store_cached(&self, identity: &str, value: &Value) {
        let Some(cache) = &self.cache else {
            return;
        };

        if let Err(e) = cache.save_raw(identity, value) {
            warn!("Failed to cache rating response for {}: {:?}", identity, e);
        }
    }
}

/// Words of the name are URL-encoded and joined with '+'
pub fn build_summoner_url(base_url: &str, identity: &str) -> String {
    let name = identity
        .split_whitespace()
        .map(|word| urlencoding::encode(word).into_owned())
        .collect::<Vec<_>>()
        .join("+");
    format!("{}?name={}", base_url, name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_summoner_url_joins_words() {
        let url = build_summoner_url("https://na.whatismymmr.com/api/v1/summoner", "Core  JJ");
        assert_eq!(url, "https://na.whatismymmr.com/api/v1/summoner?name=Core+JJ");
    }

    #[test]
    fn test_build_summoner_url_encodes_words() {
        let url = build_summoner_url("http://mmr.test/summoner", "Zoë&co x");
        assert_eq!(url, "http://mmr.test/summoner?name=Zo%C3%AB%26co+x");
    }

    #[tokio::test]
    async fn test_fetch_rating_uses_cached_response() {
        let dir = tempfile::tempdir().unwrap();
        let cache = Cache::new(dir.path()).unwrap();
        cache
            .save_raw("Faker", &serde_json::json!({"normal": {"avg": 2750, "warn": false}}))
            .unwrap();

        // Unroutable base URL: any request would fail
        let settings = LookupSettings {
            base_url: "http://127.0.0.1:9/summoner".to_string(),
            ..LookupSettings::default()
        };
        let mut client = MmrClient::new(&settings, Some(cache)).unwrap();

        assert_eq!(client.fetch_rating("Faker").await.unwrap(), Some(2750.0));
    }
}
