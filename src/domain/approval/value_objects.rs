use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::agent::{JobListing, ResumeImprovement};

/// Kind of human decision an agent can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalType {
    ResumeImprovements,
    JobApplication,
}

impl std::fmt::Display for ApprovalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApprovalType::ResumeImprovements => write!(f, "resume_improvements"),
            ApprovalType::JobApplication => write!(f, "job_application"),
        }
    }
}

/// A pending human-decision request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ApprovalData {
    ResumeImprovements(ResumeApprovalData),
    JobApplication(JobApplicationApprovalData),
}

impl ApprovalData {
    pub fn approval_type(&self) -> ApprovalType {
        match self {
            ApprovalData::ResumeImprovements(_) => ApprovalType::ResumeImprovements,
            ApprovalData::JobApplication(_) => ApprovalType::JobApplication,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeApprovalData {
    pub improvements: Vec<ResumeImprovement>,
    pub original_resume: String,
    pub improved_resume: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobApplicationApprovalData {
    pub job: JobListing,
    pub cover_letter: String,
    pub resume: String,
    pub application_details: ApplicationDetails,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationDetails {
    pub email: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub additional_questions: BTreeMap<String, String>,
}

/// The human's answer to a pending approval
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalDecision {
    pub approved: bool,
    #[serde(default)]
    pub feedback: Option<String>,
}

impl ApprovalDecision {
    pub fn approve() -> Self {
        Self {
            approved: true,
            feedback: None,
        }
    }

    pub fn reject(feedback: impl Into<String>) -> Self {
        Self {
            approved: false,
            feedback: Some(feedback.into()),
        }
    }
}

/// Decision as forwarded to the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalSubmission {
    pub approval_id: String,
    pub approved: bool,
    #[serde(default)]
    pub feedback: Option<String>,
}

/// Backend acknowledgement of a submitted decision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalAck {
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

/// When the approval slot is cleared after a submission
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClearPolicy {
    /// Clear whether or not the backend accepted the decision
    #[default]
    Always,
    /// Keep the approval pending when the backend call fails
    OnSuccess,
}

impl std::str::FromStr for ClearPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "always" => Ok(ClearPolicy::Always),
            "on_success" => Ok(ClearPolicy::OnSuccess),
            other => Err(format!("unknown approval clear policy: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approval_data_is_tagged_by_type() {
        let data = ApprovalData::ResumeImprovements(ResumeApprovalData {
            improvements: vec![],
            original_resume: "a".to_string(),
            improved_resume: "b".to_string(),
        });

        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["type"], "resume_improvements");
        assert_eq!(data.approval_type(), ApprovalType::ResumeImprovements);
    }

    #[test]
    fn submission_uses_camel_case_keys() {
        let submission = ApprovalSubmission {
            approval_id: "approval-1".to_string(),
            approved: false,
            feedback: Some("too long".to_string()),
        };

        let json = serde_json::to_value(&submission).unwrap();
        assert_eq!(json["approvalId"], "approval-1");
        assert_eq!(json["feedback"], "too long");
    }

    #[test]
    fn clear_policy_parses() {
        assert_eq!("always".parse::<ClearPolicy>().unwrap(), ClearPolicy::Always);
        assert_eq!("ON_SUCCESS".parse::<ClearPolicy>().unwrap(), ClearPolicy::OnSuccess);
        assert!("sometimes".parse::<ClearPolicy>().is_err());
    }
}
