use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::domain::models::RoleAffinity;
use crate::errors::{self, ValidationError};

const RECORD_SEPARATOR: &str = ": ";

/// A player before its rating has been resolved
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerRecord {
    pub identity: String,
    pub affinity: RoleAffinity,
}

/// Account record as exported by the room service
#[derive(Debug, Deserialize)]
pub struct UserRecord {
    pub username: String,
    #[serde(default)]
    pub preferences: Option<String>,
}

/// Load records from a `.json` user export or a `name: 12345` text file
pub fn load_records(path: &Path, max_affinity: u8) -> Result<Vec<PlayerRecord>> {
    let content = fs::read_to_string(path).with_context(|| errors::read_context(path))?;

    if is_json_file(path) {
        let users: Vec<UserRecord> =
            serde_json::from_str(&content).with_context(|| errors::parse_context("user records"))?;
        Ok(parse_user_records(&users, max_affinity)?)
    } else {
        Ok(parse_text_records(&content, max_affinity)?)
    }
}

pub fn parse_text_records(content: &str, max_affinity: u8) -> Result<Vec<PlayerRecord>, ValidationError> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| parse_text_line(idx + 1, line, max_affinity))
        .collect()
}

pub fn parse_text_line(line_number: usize, line: &str, max_affinity: u8) -> Result<PlayerRecord, ValidationError> {
    let (identity, preferences) = line
        .trim()
        .split_once(RECORD_SEPARATOR)
        .ok_or(ValidationError::MalformedRecord { line: line_number })?;

    build_record(identity, preferences, max_affinity)
}

pub fn parse_user_records(users: &[UserRecord], max_affinity: u8) -> Result<Vec<PlayerRecord>, ValidationError> {
    users
        .iter()
        .map(|user| parse_user_record(user, max_affinity))
        .collect()
}

fn parse_user_record(user: &UserRecord, max_affinity: u8) -> Result<PlayerRecord, ValidationError> {
    let preferences = user
        .preferences
        .as_deref()
        .ok_or_else(|| ValidationError::MissingPreferences {
            identity: user.username.clone(),
        })?;

    build_record(&user.username, preferences, max_affinity)
}

fn build_record(identity: &str, preferences: &str, max_affinity: u8) -> Result<PlayerRecord, ValidationError> {
    let identity = identity.trim();
    if identity.is_empty() {
        return Err(ValidationError::EmptyIdentity);
    }

    let affinity = RoleAffinity::parse(identity, preferences, max_affinity)?;

    Ok(PlayerRecord {
        identity: identity.to_string(),
        affinity,
    })
}

fn is_json_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_text_records_skips_blank_lines() {
        let content = "Faker: 55555\n\n  Doublelift : 00050 \nCore JJ: 00005\n";
        let records = parse_text_records(content, 5).unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].identity, "Faker");
        assert_eq!(records[1].identity, "Doublelift");
        assert_eq!(records[1].affinity.values(), [0, 0, 0, 5, 0]);
        assert_eq!(records[2].identity, "Core JJ");
    }

    #[test]
    fn test_parse_text_line_without_separator() {
        let err = parse_text_records("Faker: 55555\nFaker55555\n", 5).unwrap_err();
        assert_eq!(err, ValidationError::MalformedRecord { line: 2 });
    }

    #[test]
    fn test_parse_text_line_short_preferences() {
        let err = parse_text_line(1, "Faker: 5555", 5).unwrap_err();
        assert!(matches!(err, ValidationError::WrongLength { len: 4, .. }));
    }

    #[test]
    fn test_parse_text_line_empty_identity() {
        let err = parse_text_line(1, " : 55555", 5);
        assert!(err.is_err());
    }

    #[test]
    fn test_parse_user_records_requires_preferences() {
        let users: Vec<UserRecord> =
            serde_json::from_str(r#"[{"username": "a", "preferences": "12345"}, {"username": "b"}]"#).unwrap();
        let err = parse_user_records(&users, 5).unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingPreferences {
                identity: "b".to_string()
            }
        );
    }

    #[test]
    fn test_load_records_detects_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("room.json");
        fs::write(&path, r#"[{"username": "Caps", "preferences": "05500"}]"#).unwrap();

        let records = load_records(&path, 5).unwrap();
        assert_eq!(records[0].identity, "Caps");
        assert_eq!(records[0].affinity.values(), [0, 5, 5, 0, 0]);
    }
}
