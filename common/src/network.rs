//! Network access policy.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Reachability class reported by the platform's network policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NetworkAccessBehavior {
    /// Unrestricted connection.
    #[default]
    Normal,
    /// Metered connection; web traffic needs explicit user consent.
    OptIn,
    /// No connectivity.
    Offline,
}

impl NetworkAccessBehavior {
    /// Whether a web fetch may run under this policy.
    ///
    /// `metered_override` is the user's consent to fetch on a metered link.
    pub fn permits_web(&self, metered_override: bool) -> bool {
        match self {
            NetworkAccessBehavior::Normal => true,
            NetworkAccessBehavior::OptIn => metered_override,
            NetworkAccessBehavior::Offline => false,
        }
    }
}

impl fmt::Display for NetworkAccessBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NetworkAccessBehavior::Normal => "normal",
            NetworkAccessBehavior::OptIn => "opt-in",
            NetworkAccessBehavior::Offline => "offline",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for NetworkAccessBehavior {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(NetworkAccessBehavior::Normal),
            "opt-in" | "optin" | "metered" => Ok(NetworkAccessBehavior::OptIn),
            "offline" => Ok(NetworkAccessBehavior::Offline),
            other => Err(format!("Unknown network behavior: {}", other)),
        }
    }
}
