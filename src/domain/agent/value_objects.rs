use serde::{Deserialize, Serialize};

/// Execution status of an agent as seen by the UI
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentStatus {
    /// Agent has not started, or has been reset
    #[default]
    Idle,
    /// Agent is working and may publish thinking text
    Thinking,
    /// Agent is blocked on a human decision
    Waiting,
    /// Agent finished
    Complete,
    /// Agent reported an error
    Error,
}

impl std::fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AgentStatus::Idle => write!(f, "idle"),
            AgentStatus::Thinking => write!(f, "thinking"),
            AgentStatus::Waiting => write!(f, "waiting"),
            AgentStatus::Complete => write!(f, "complete"),
            AgentStatus::Error => write!(f, "error"),
        }
    }
}

/// Impact rating of a suggested resume change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Impact {
    High,
    Medium,
    Low,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_status_is_idle() {
        assert_eq!(AgentStatus::default(), AgentStatus::Idle);
    }

    #[test]
    fn status_display() {
        assert_eq!(AgentStatus::Idle.to_string(), "idle");
        assert_eq!(AgentStatus::Thinking.to_string(), "thinking");
        assert_eq!(AgentStatus::Waiting.to_string(), "waiting");
        assert_eq!(AgentStatus::Complete.to_string(), "complete");
        assert_eq!(AgentStatus::Error.to_string(), "error");
    }

    #[test]
    fn status_parses_from_wire_format() {
        let status: AgentStatus = serde_json::from_str("\"complete\"").unwrap();
        assert_eq!(status, AgentStatus::Complete);
    }
}
