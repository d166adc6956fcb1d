//! Runtime platform identifiers.

use serde::{Deserialize, Serialize};

/// Identifier of the platform the host is running on (e.g. "android", "ios").
///
/// Opaque on purpose: any string is accepted, including the empty one.
/// Comparison is exact, so "Android" and "android" are different platforms.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Platform(String);

impl Platform {
    pub const ANDROID: &'static str = "android";

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is(&self, id: &str) -> bool {
        self.0 == id
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Platform {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for Platform {
    fn from(id: String) -> Self {
        Self(id)
    }
}
