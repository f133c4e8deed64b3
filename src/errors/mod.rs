use thiserror::Error;

/// Malformed player or configuration data, rejected before a pool is built
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("preferences for '{identity}' must have 5 digits, got {len}")]
    WrongLength { identity: String, len: usize },

    #[error("preferences for '{identity}' contain non-numeric character '{found}'")]
    NonNumeric { identity: String, found: char },

    #[error("preference {value} for '{identity}' exceeds the maximum of {max}")]
    OutOfRange { identity: String, value: u8, max: u8 },

    #[error("player '{identity}' has no preferences set")]
    MissingPreferences { identity: String },

    #[error("rating {rating} for '{identity}' is not a finite number")]
    InvalidRating { identity: String, rating: f64 },

    #[error("player identity must not be empty")]
    EmptyIdentity,

    #[error("line {line} is not a 'name: preferences' record")]
    MalformedRecord { line: usize },

    #[error("invalid setting {name}: {reason}")]
    InvalidSetting { name: &'static str, reason: String },
}

/// Fatal conditions checked before any search begins
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PreconditionError {
    #[error("a match needs exactly {expected} players, got {actual}")]
    PoolSize { expected: usize, actual: usize },

    #[error("player '{0}' appears more than once")]
    DuplicateIdentity(String),

    #[error("search finished without producing a candidate")]
    NoCandidate,
}

/// Anything that stops an optimization run before it produces a result
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BalanceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Precondition(#[from] PreconditionError),
}

/// Recoverable rating lookup failure, replaced by the fallback rating
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LookupError {
    #[error("rating for '{identity}' is unavailable: {reason}")]
    Unavailable { identity: String, reason: String },

    #[error("rating for '{0}' is ambiguous")]
    Ambiguous(String),
}

impl LookupError {
    pub fn unavailable(identity: &str, reason: impl ToString) -> Self {
        LookupError::Unavailable {
            identity: identity.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Add context to fetch errors
pub fn fetch_context(url: &str) -> String {
    format!("Failed to fetch from: {}", url)
}

/// Add context to parse errors
pub fn parse_context(data_type: &str) -> String {
    format!("Failed to parse {}", data_type)
}

/// Add context to file read errors
pub fn read_context(path: &std::path::Path) -> String {
    format!("Failed to read {}", path.display())
}
