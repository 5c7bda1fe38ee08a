use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A logged increment to an agent's progress
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contribution {
    pub timestamp: DateTime<Utc>,
    pub description: String,
    /// New completion minus previous completion; negative when progress moves back
    pub value: i32,
}

/// Progress slice for one agent, stored under `<agent>_progress`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentProgress {
    pub completion_status: i32,
    #[serde(default)]
    pub contributions: Vec<Contribution>,
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_action: Option<String>,
    #[serde(default)]
    pub analyzing: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thinking: Option<String>,
}

/// A functional update over an [`AgentProgress`] slice
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressOp {
    Update { completion: i32, description: String },
    Thinking(String),
    CurrentAction(String),
    StartAnalyzing,
    StopAnalyzing,
}

impl AgentProgress {
    /// Key under which an agent's progress slice is stored
    pub fn slice_key(agent_name: &str) -> String {
        format!("{agent_name}_progress")
    }

    /// Applies `op` and stamps `last_updated` with `at`
    ///
    /// Completion values are not range-checked.
    pub fn apply(&mut self, op: ProgressOp, at: DateTime<Utc>) {
        match op {
            ProgressOp::Update {
                completion,
                description,
            } => {
                self.contributions.push(Contribution {
                    timestamp: at,
                    description,
                    value: completion - self.completion_status,
                });
                self.completion_status = completion;
            }
            ProgressOp::Thinking(text) => self.thinking = Some(text),
            ProgressOp::CurrentAction(text) => self.current_action = Some(text),
            ProgressOp::StartAnalyzing => {
                self.analyzing = true;
                self.completion_status = 0;
            }
            ProgressOp::StopAnalyzing => {
                self.analyzing = false;
                self.completion_status = 100;
            }
        }
        self.last_updated = Some(at);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn update(completion: i32, description: &str) -> ProgressOp {
        ProgressOp::Update {
            completion,
            description: description.to_string(),
        }
    }

    #[test]
    fn slice_key_appends_progress_suffix() {
        assert_eq!(AgentProgress::slice_key("resume_agent"), "resume_agent_progress");
    }

    #[test]
    fn update_logs_delta_against_previous_completion() {
        let mut progress = AgentProgress::default();
        let now = Utc::now();

        progress.apply(update(30, "parsed sections"), now);
        progress.apply(update(45, "matched keywords"), now);

        assert_eq!(progress.completion_status, 45);
        assert_eq!(progress.contributions.len(), 2);
        assert_eq!(progress.contributions[0].value, 30);
        assert_eq!(progress.contributions[1].value, 15);
        assert_eq!(progress.contributions[1].description, "matched keywords");
        assert_eq!(progress.last_updated, Some(now));
    }

    #[test]
    fn update_moving_backwards_logs_negative_delta() {
        let mut progress = AgentProgress {
            completion_status: 80,
            ..Default::default()
        };

        progress.apply(update(60, "re-scoring"), Utc::now());

        assert_eq!(progress.contributions[0].value, -20);
    }

    #[test]
    fn out_of_range_completion_passes_through() {
        let mut progress = AgentProgress::default();

        progress.apply(update(140, "overshoot"), Utc::now());

        assert_eq!(progress.completion_status, 140);
    }

    #[test]
    fn thinking_does_not_touch_completion() {
        let mut progress = AgentProgress {
            completion_status: 40,
            ..Default::default()
        };

        progress.apply(ProgressOp::Thinking("comparing keywords".to_string()), Utc::now());

        assert_eq!(progress.completion_status, 40);
        assert_eq!(progress.thinking.as_deref(), Some("comparing keywords"));
        assert!(progress.contributions.is_empty());
        assert!(progress.last_updated.is_some());
    }

    #[test]
    fn current_action_is_stamped() {
        let mut progress = AgentProgress::default();

        progress.apply(ProgressOp::CurrentAction("Searching...".to_string()), Utc::now());

        assert_eq!(progress.current_action.as_deref(), Some("Searching..."));
        assert!(progress.last_updated.is_some());
    }

    #[test]
    fn start_then_stop_analyzing_completes() {
        let mut progress = AgentProgress {
            completion_status: 55,
            ..Default::default()
        };

        progress.apply(ProgressOp::StartAnalyzing, Utc::now());
        assert!(progress.analyzing);
        assert_eq!(progress.completion_status, 0);

        progress.apply(ProgressOp::StopAnalyzing, Utc::now());
        assert!(!progress.analyzing);
        assert_eq!(progress.completion_status, 100);
    }
}
