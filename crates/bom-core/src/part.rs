use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length of a part identifier, per the item master's key column width.
pub const PART_ID_MAX_LEN: usize = 20;

/// Stable identifier for a part/component.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Part(pub String);

impl Part {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `false` if the identifier exceeds the item master's column width.
    pub fn is_valid(&self) -> bool {
        !self.0.is_empty() && self.0.len() <= PART_ID_MAX_LEN
    }
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Part {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Part {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}
