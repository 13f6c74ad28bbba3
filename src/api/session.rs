use serde::Deserialize;

/// Name of the header carrying the session credential.
pub const AUTH_HEADER: &str = "x-pbx-authentication";

/// Short-lived credential pair returned by `auth.json`.
///
/// Owned by the orchestrator for exactly one run and passed into every
/// authorized call; never persisted. The provider does not report an expiry,
/// the pair is assumed valid for the whole run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Session {
    pub key: String,
    pub key_id: String,
}

impl Session {
    /// Wire form of the credential: `{key_id}:{key}`.
    pub fn header_value(&self) -> String {
        format!("{}:{}", self.key_id, self.key)
    }
}
