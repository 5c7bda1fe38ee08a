use serde::{Deserialize, Serialize};

use super::value_objects::Impact;
use crate::domain::approval::ApprovalData;

/// Typed output of an agent, one variant per agent kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AgentResults {
    ResumeAnalysis(ResumeAnalysis),
    JobSearch(JobSearchResults),
}

impl AgentResults {
    /// Approval request attached to the results, if the agent produced one
    pub fn approval_data(&self) -> Option<&ApprovalData> {
        match self {
            AgentResults::ResumeAnalysis(analysis) => analysis.approval_data.as_ref(),
            AgentResults::JobSearch(search) => search.approval_data.as_ref(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeAnalysis {
    #[serde(default)]
    pub strengths: Vec<ResumeStrength>,
    #[serde(default)]
    pub weaknesses: Vec<ResumeWeakness>,
    #[serde(default)]
    pub keyword_matches: Vec<KeywordMatch>,
    #[serde(default)]
    pub improvements: Vec<ResumeImprovement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ats_score: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approval_data: Option<ApprovalData>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeStrength {
    pub text: String,
    /// 0-100
    pub confidence: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeWeakness {
    pub text: String,
    pub confidence: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordMatch {
    pub keyword: String,
    pub found: bool,
    pub importance: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeImprovement {
    pub section: String,
    pub original_text: String,
    pub improved_text: String,
    pub reason: String,
    pub impact: Impact,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobSearchResults {
    #[serde(default)]
    pub criteria: JobSearchCriteria,
    #[serde(default)]
    pub listings: Vec<JobListing>,
    #[serde(default)]
    pub total_results: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approval_data: Option<ApprovalData>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobSearchCriteria {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<SalaryRange>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalaryRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobListing {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    #[serde(default)]
    pub remote: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
    pub description: String,
    /// 0-100
    pub match_score: u8,
    pub posted_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_url: Option<String>,
}
