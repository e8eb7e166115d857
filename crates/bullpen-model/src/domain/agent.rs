use std::fmt;

use serde::{Deserialize, Serialize};

/// The fixed roster of known agents.
///
/// The roster is closed: registry entries whose agent id does not resolve to
/// one of these members are dropped during status resolution, never errored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentId {
    Fred,
    Scout,
    Dusty,
    Hugh,
    Teky,
    Buzz,
    Mac,
    Dale,
    Rex,
    Karen,
    Cash,
}

impl AgentId {
    /// Every roster member, in display order.
    pub const ALL: [AgentId; 11] = [
        AgentId::Fred,
        AgentId::Scout,
        AgentId::Dusty,
        AgentId::Hugh,
        AgentId::Teky,
        AgentId::Buzz,
        AgentId::Mac,
        AgentId::Dale,
        AgentId::Rex,
        AgentId::Karen,
        AgentId::Cash,
    ];

    /// Lowercase wire name, also used for report file names.
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentId::Fred => "fred",
            AgentId::Scout => "scout",
            AgentId::Dusty => "dusty",
            AgentId::Hugh => "hugh",
            AgentId::Teky => "teky",
            AgentId::Buzz => "buzz",
            AgentId::Mac => "mac",
            AgentId::Dale => "dale",
            AgentId::Rex => "rex",
            AgentId::Karen => "karen",
            AgentId::Cash => "cash",
        }
    }

    /// Emoji badge shown next to the agent in the board and report views.
    pub fn emoji(&self) -> &'static str {
        match self {
            AgentId::Fred => "⭐",
            AgentId::Scout => "🔭",
            AgentId::Dusty => "🌾",
            AgentId::Hugh => "🤖",
            AgentId::Teky => "💻",
            AgentId::Buzz => "⚡",
            AgentId::Mac => "🔧",
            AgentId::Dale => "📈",
            AgentId::Rex => "🔐",
            AgentId::Karen => "📋",
            AgentId::Cash => "💰",
        }
    }

    /// Resolve a public roster name. Unknown names are `None`, a filter
    /// step for registry entries rather than an error.
    pub fn from_name(name: &str) -> Option<AgentId> {
        AgentId::ALL.into_iter().find(|a| a.as_str() == name)
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Liveness tier derived from the recency of an agent's most recent job run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    /// A run landed inside the working window.
    Working,
    /// Has run before, but not recently enough to count as working.
    Idle,
    /// No usable signal, or the last run is older than the idle window.
    Offline,
}
