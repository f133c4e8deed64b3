use anyhow::{Context, Result};
use log::debug;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// File cache of raw rating service responses, one JSON file per player
pub struct Cache {
    raw_dir: PathBuf,
}

impl Cache {
    pub fn new<P: AsRef<Path>>(cache_dir: P) -> Result<Self> {
        let raw_dir = cache_dir.as_ref().join("raw");

        fs::create_dir_all(&raw_dir).context("Failed to create raw cache directory")?;

        Ok(Self { raw_dir })
    }

    /// Save a raw response for `identity`
    pub fn save_raw(&self, identity: &str, data: &Value) -> Result<()> {
        let file_path = self.build_raw_path(identity);
        self.write_json(&file_path, data)?;
        debug!("Saved raw response to cache: {}", file_path.display());
        Ok(())
    }

    /// Load the raw response for `identity`, if one was cached
    pub fn load_raw(&self, identity: &str) -> Result<Option<Value>> {
        let file_path = self.build_raw_path(identity);
        self.read_json_opt(&file_path)
    }

    /// Drop every cached response, leaving the rest of the cache directory alone
    pub fn clear(&self) -> Result<()> {
        fs::remove_dir_all(&self.raw_dir).context("Failed to clear cache")?;
        fs::create_dir_all(&self.raw_dir).context("Failed to recreate cache directory")?;
        Ok(())
    }

    // --- Helper Methods ---

    fn build_raw_path(&self, identity: &str) -> PathBuf {
        // Player names may contain spaces, slashes and non-ASCII letters
        let key = urlencoding::encode(identity).into_owned();
        self.raw_dir.join(format!("{}.json", key))
    }

    fn write_json(&self, path: &Path, data: &Value) -> Result<()> {
        let json = serde_json::to_string_pretty(data)?;
        fs::write(path, json).context("Failed to write cache file")?;
        Ok(())
    }

    fn read_json_opt(&self, path: &Path) -> Result<Option<Value>> {
        if !path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(path)?;
        let data = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse cached JSON from {:?}", path))?;
        Ok(Some(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cache_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let cache = Cache::new(dir.path()).unwrap();
        let response = json!({"normal": {"avg": 1450, "warn": false}});

        cache.save_raw("Core JJ", &response).unwrap();

        assert_eq!(cache.load_raw("Core JJ").unwrap(), Some(response));
        assert_eq!(cache.load_raw("Faker").unwrap(), None);
    }

    #[test]
    fn test_cache_keys_are_safe_file_names() {
        let dir = tempfile::tempdir().unwrap();
        let cache = Cache::new(dir.path()).unwrap();

        cache.save_raw("../escape", &json!({})).unwrap();
        assert!(cache.load_raw("../escape").unwrap().is_some());
        assert!(!dir.path().join("escape.json").exists());
    }

    #[test]
    fn test_clear_removes_entries() {
        let dir = tempfile::tempdir().unwrap();
        let cache = Cache::new(dir.path().join("lookups")).unwrap();

        cache.save_raw("Faker", &json!({"ranked": {"avg": 2900}})).unwrap();
        cache.clear().unwrap();

        assert_eq!(cache.load_raw("Faker").unwrap(), None);
    }

    #[test]
    fn test_clear_keeps_other_files() {
        let dir = tempfile::tempdir().unwrap();
        let notes = dir.path().join("notes.txt");
        fs::write(&notes, "keep me").unwrap();
        let cache = Cache::new(dir.path()).unwrap();

        cache.save_raw("Faker", &json!({})).unwrap();
        cache.clear().unwrap();

        assert!(notes.exists());
        assert!(dir.path().join("raw").is_dir());
        assert_eq!(cache.load_raw("Faker").unwrap(), None);
    }

    #[test]
    fn test_identities_differing_in_case_have_separate_entries() {
        let dir = tempfile::tempdir().unwrap();
        let cache = Cache::new(dir.path()).unwrap();

        cache.save_raw("Faker", &json!({"ranked": {"avg": 2900}})).unwrap();
        cache.save_raw("faker", &json!({"ranked": {"avg": 1200}})).unwrap();

        assert_eq!(cache.load_raw("Faker").unwrap(), Some(json!({"ranked": {"avg": 2900}})));
        assert_eq!(cache.load_raw("faker").unwrap(), Some(json!({"ranked": {"avg": 1200}})));
    }
}
