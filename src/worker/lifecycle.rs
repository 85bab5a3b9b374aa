//! Worker lifecycle states

use std::fmt;

use serde::{Deserialize, Serialize};

/// Where a worker is in its lifecycle.
///
/// ```text
/// Parsed -> Installing -> Installed -> Activating -> Activated
///               |
///               +-> Redundant (install failed)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LifecycleState {
    Parsed,
    Installing,
    Installed,
    Activating,
    Activated,
    Redundant,
}

impl LifecycleState {
    /// Only an activated worker intercepts requests
    pub fn serves_fetches(self) -> bool {
        self == LifecycleState::Activated
    }

    pub fn can_install(self) -> bool {
        self == LifecycleState::Parsed
    }

    pub fn can_activate(self) -> bool {
        self == LifecycleState::Installed
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LifecycleState::Parsed => "parsed",
            LifecycleState::Installing => "installing",
            LifecycleState::Installed => "installed",
            LifecycleState::Activating => "activating",
            LifecycleState::Activated => "activated",
            LifecycleState::Redundant => "redundant",
        };
        f.write_str(name)
    }
}
