//! Actor roles
//!
//! The role claim arrives from the authentication collaborator with every
//! call. Nothing here is cached between calls.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActorRole {
    User,
    Administrator,
    /// A claim this crate does not know. Grants nothing.
    Unrecognized(String),
}

impl ActorRole {
    /// Maps a claim tag to a role. English and legacy Spanish tags are accepted.
    pub fn from_claim(claim: &str) -> Self {
        match claim.trim() {
            "user" | "usuario" => ActorRole::User,
            "administrator" | "administrador" => ActorRole::Administrator,
            other => ActorRole::Unrecognized(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ActorRole::User => "user",
            ActorRole::Administrator => "administrator",
            ActorRole::Unrecognized(claim) => claim,
        }
    }

    pub fn can_update_reports(&self) -> bool {
        matches!(self, ActorRole::Administrator)
    }
}

impl fmt::Display for ActorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for ActorRole {
    fn from(claim: String) -> Self {
        Self::from_claim(&claim)
    }
}

impl From<ActorRole> for String {
    fn from(role: ActorRole) -> Self {
        role.as_str().to_string()
    }
}
