use serde::{Deserialize, Deserializer, Serialize};

use super::results::AgentResults;
use super::value_objects::AgentStatus;
use crate::domain::approval::{ApprovalData, ApprovalType};

/// Snapshot of one agent's execution
///
/// Records are replaced wholesale in the store; callers that want to change a
/// single field clone the current record, edit it, and set it back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentState {
    pub name: String,
    #[serde(default)]
    pub status: AgentStatus,
    /// 0-100, monotonic by convention only
    #[serde(default, deserialize_with = "clamped_percentage")]
    pub completion_percentage: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_task: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thinking: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<AgentResults>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default)]
    pub waiting_for_approval: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approval_type: Option<ApprovalType>,
}

/// Accept any JSON number, rounded and clamped into 0-100
fn clamped_percentage<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    let clamped = value.round().clamp(0.0, 100.0);
    if clamped != value.round() {
        tracing::warn!(value, "Completion percentage out of range, clamping");
    }
    Ok(clamped as u8)
}

impl AgentState {
    /// The implicit record for an agent nobody has written yet
    pub fn idle(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: AgentStatus::Idle,
            completion_percentage: 0,
            current_task: None,
            thinking: None,
            results: None,
            error: None,
            waiting_for_approval: false,
            approval_type: None,
        }
    }

    pub fn with_status(mut self, status: AgentStatus, completion_percentage: u8) -> Self {
        self.status = status;
        self.completion_percentage = completion_percentage;
        self
    }

    pub fn with_task(mut self, current_task: impl Into<String>, thinking: impl Into<String>) -> Self {
        self.current_task = Some(current_task.into());
        self.thinking = Some(thinking.into());
        self
    }

    pub fn with_results(mut self, results: AgentResults) -> Self {
        self.results = Some(results);
        self
    }

    pub fn awaiting(mut self, approval_type: ApprovalType) -> Self {
        self.status = AgentStatus::Waiting;
        self.waiting_for_approval = true;
        self.approval_type = Some(approval_type);
        self
    }

    /// Approval request carried by this update, if the agent is waiting on one
    pub fn pending_approval(&self) -> Option<&ApprovalData> {
        if !self.waiting_for_approval {
            return None;
        }
        self.results.as_ref().and_then(AgentResults::approval_data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::agent::results::ResumeAnalysis;
    use crate::domain::approval::ResumeApprovalData;

    fn resume_approval() -> ApprovalData {
        ApprovalData::ResumeImprovements(ResumeApprovalData {
            improvements: vec![],
            original_resume: "before".to_string(),
            improved_resume: "after".to_string(),
        })
    }

    #[test]
    fn idle_state_serializes_to_minimal_record() {
        let json = serde_json::to_value(AgentState::idle("resume_agent")).unwrap();

        assert_eq!(json["name"], "resume_agent");
        assert_eq!(json["status"], "idle");
        assert_eq!(json["completion_percentage"], 0);
        assert!(json.get("results").is_none());
    }

    #[test]
    fn missing_fields_default_on_deserialize() {
        let state: AgentState = serde_json::from_str(r#"{"name":"job_search_agent"}"#).unwrap();

        assert_eq!(state, AgentState::idle("job_search_agent"));
    }

    #[test]
    fn pending_approval_requires_waiting_flag() {
        let results = AgentResults::ResumeAnalysis(ResumeAnalysis {
            approval_data: Some(resume_approval()),
            ..Default::default()
        });
        let state = AgentState::idle("resume_agent").with_results(results);

        assert!(state.pending_approval().is_none());

        let waiting = state.awaiting(ApprovalType::ResumeImprovements);
        assert_eq!(waiting.status, AgentStatus::Waiting);
        assert_eq!(waiting.pending_approval(), Some(&resume_approval()));
    }

    #[test]
    fn pushed_percentage_is_rounded_and_clamped() {
        let parse = |value: &str| {
            let json = format!(r#"{{"name":"resume_agent","completion_percentage":{}}}"#, value);
            serde_json::from_str::<AgentState>(&json).unwrap().completion_percentage
        };

        assert_eq!(parse("120"), 100);
        assert_eq!(parse("-5"), 0);
        assert_eq!(parse("33.5"), 34);
        assert_eq!(parse("42"), 42);
    }
}
