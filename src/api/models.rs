use serde::Deserialize;

/// Response of the summoner MMR endpoint
#[derive(Debug, Deserialize)]
pub struct MmrResponse {
    #[serde(default)]
    pub normal: Option<QueueEstimate>,
    #[serde(default)]
    pub ranked: Option<QueueEstimate>,
}

/// Estimate for one queue; `warn` marks too few recent games
#[derive(Debug, Deserialize)]
pub struct QueueEstimate {
    pub avg: Option<f64>,
    #[serde(default = "default_warn")]
    pub warn: bool,
}

fn default_warn() -> bool {
    true
}

impl QueueEstimate {
    fn trusted_average(&self) -> Option<f64> {
        if self.warn { None } else { self.avg }
    }
}

impl MmrResponse {
    /// Normal queue first, ranked second; `None` when neither is trustworthy
    pub fn rating(&self) -> Option<f64> {
        [&self.normal, &self.ranked]
            .into_iter()
            .flatten()
            .find_map(QueueEstimate::trusted_average)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> MmrResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_prefers_normal_queue() {
        let response = parse(r#"{"normal": {"avg": 1320, "warn": false}, "ranked": {"avg": 1500, "warn": false}}"#);
        assert_eq!(response.rating(), Some(1320.0));
    }

    #[test]
    fn test_falls_back_to_ranked_queue() {
        let response = parse(r#"{"normal": {"avg": 1320, "warn": true}, "ranked": {"avg": 1500, "warn": false}}"#);
        assert_eq!(response.rating(), Some(1500.0));
    }

    #[test]
    fn test_no_trusted_queue() {
        let response = parse(r#"{"normal": {"avg": null, "warn": true}, "ranked": {"warn": true}}"#);
        assert_eq!(response.rating(), None);

        let empty = parse(r#"{"error": {"code": 100, "message": "Summoner not found"}}"#);
        assert_eq!(empty.rating(), None);
    }
}
