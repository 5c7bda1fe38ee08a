// Scripted event sequences replayed by the mock event source
//
// Each script is versioned data, not behavior: the mock source decides timing.

use serde_json::{json, Value};

use super::tasks::TaskRegistry;
use crate::domain::agent::{
    AgentResults, AgentState, AgentStatus, Impact, JobListing, JobSearchCriteria,
    JobSearchResults, KeywordMatch, ResumeAnalysis, ResumeImprovement, ResumeStrength,
    ResumeWeakness,
};
use crate::domain::approval::{
    ApplicationDetails, ApprovalData, ApprovalType, JobApplicationApprovalData,
    ResumeApprovalData,
};
use crate::domain::task::{NewTask, Task, TaskStatus};

pub const RESUME_AGENT: &str = "resume_agent";
pub const JOB_SEARCH_AGENT: &str = "job_search_agent";

pub mod library {
    use super::*;

    pub fn resume_analysis_steps() -> Vec<AgentState> {
        let thinking = |completion, task: &str, thinking: &str| {
            AgentState::idle(RESUME_AGENT)
                .with_status(AgentStatus::Thinking, completion)
                .with_task(task, thinking)
        };

        let partial = ResumeAnalysis {
            keyword_matches: keyword_matches(),
            ..Default::default()
        };
        let scored = ResumeAnalysis {
            keyword_matches: keyword_matches(),
            strengths: strengths(),
            weaknesses: weaknesses(),
            improvements: improvements(),
            ats_score: Some(78),
            approval_data: None,
        };
        let complete = ResumeAnalysis {
            approval_data: Some(resume_approval_request()),
            ..scored.clone()
        };

        vec![
            thinking(
                10,
                "Parsing resume content",
                "Analyzing resume structure and identifying sections...",
            ),
            thinking(
                25,
                "Identifying sections",
                "Found sections: Summary, Work Experience, Education, Skills.",
            ),
            thinking(
                40,
                "Analyzing content",
                "Analyzing work experience: Found 3 positions.\nLooking for quantifiable achievements...",
            ),
            thinking(
                60,
                "Analyzing skills",
                "Identified core skills: JavaScript, React, TypeScript, Next.js, Node.js",
            ),
            thinking(
                75,
                "Matching keywords",
                "Missing important keywords: CI/CD, Jest, Redux",
            )
            .with_results(AgentResults::ResumeAnalysis(partial)),
            thinking(
                95,
                "Finalizing analysis",
                "Calculating ATS compatibility score...\nGenerating improvement suggestions...",
            )
            .with_results(AgentResults::ResumeAnalysis(scored)),
            AgentState::idle(RESUME_AGENT)
                .with_status(AgentStatus::Complete, 100)
                .with_results(AgentResults::ResumeAnalysis(complete))
                .awaiting(ApprovalType::ResumeImprovements),
        ]
    }

    pub fn resume_approval_request() -> ApprovalData {
        ApprovalData::ResumeImprovements(ResumeApprovalData {
            improvements: improvements(),
            original_resume: "Senior Frontend Developer with 5+ years experience in React, \
                              TypeScript and Next.js"
                .to_string(),
            improved_resume: "Senior Frontend Developer with 5+ years building React, \
                              TypeScript and Next.js applications; CI/CD, Jest and Redux"
                .to_string(),
        })
    }

    pub fn task_registry_steps() -> Vec<TaskRegistry> {
        use TaskStatus::*;

        let analyze = |status| task("task-1", "Analyze Resume", RESUME_AGENT, status, &[]);
        let approve =
            |status| task("task-2", "Resume Improvement Approval", "human", status, &["task-1"]);
        let search = |status| task("task-3", "Find Matching Jobs", JOB_SEARCH_AGENT, status, &["task-2"]);

        [
            vec![analyze(InProgress)],
            vec![analyze(Completed), approve(InProgress)],
            vec![analyze(Completed), approve(Completed), search(InProgress)],
            vec![analyze(Completed), approve(Completed), search(Completed)],
        ]
        .into_iter()
        .map(|tasks| TaskRegistry::from_tasks(tasks.into_iter().flatten().collect()))
        .collect()
    }

    pub fn job_search_steps() -> Vec<AgentState> {
        let criteria = JobSearchCriteria {
            role: Some("Senior Frontend Developer".to_string()),
            location: Some("San Francisco, CA".to_string()),
            skills: vec!["React".to_string(), "TypeScript".to_string()],
            remote: Some(true),
            ..Default::default()
        };
        let found = JobSearchResults {
            criteria: criteria.clone(),
            listings: vec![job_listing()],
            total_results: 1,
            approval_data: None,
        };

        vec![
            AgentState::idle(JOB_SEARCH_AGENT)
                .with_status(AgentStatus::Thinking, 20)
                .with_task("Searching job boards", "Querying listings for Senior Frontend Developer..."),
            AgentState::idle(JOB_SEARCH_AGENT)
                .with_status(AgentStatus::Thinking, 60)
                .with_task("Scoring matches", "Comparing requirements with resume keywords...")
                .with_results(AgentResults::JobSearch(JobSearchResults {
                    criteria,
                    ..Default::default()
                })),
            AgentState::idle(JOB_SEARCH_AGENT)
                .with_status(AgentStatus::Complete, 100)
                .with_results(AgentResults::JobSearch(JobSearchResults {
                    approval_data: Some(job_application_request()),
                    ..found
                }))
                .awaiting(ApprovalType::JobApplication),
        ]
    }

    pub fn job_application_request() -> ApprovalData {
        ApprovalData::JobApplication(JobApplicationApprovalData {
            job: job_listing(),
            cover_letter: "I am excited to apply for the Senior Frontend Developer role..."
                .to_string(),
            resume: "Senior Frontend Developer with 5+ years experience".to_string(),
            application_details: ApplicationDetails {
                email: "candidate@example.com".to_string(),
                name: "Alex Candidate".to_string(),
                phone: None,
                additional_questions: Default::default(),
            },
        })
    }

    /// Fixed response of the copilot runtime endpoint
    pub fn copilot_payload() -> Value {
        let registry = TaskRegistry::from_tasks(
            [
                task("analyze_resume", "analyze_resume", RESUME_AGENT, TaskStatus::Completed, &[]),
                task(
                    "find_matching_jobs",
                    "find_matching_jobs",
                    JOB_SEARCH_AGENT,
                    TaskStatus::InProgress,
                    &[],
                ),
            ]
            .into_iter()
            .flatten()
            .collect(),
        );
        let now = chrono::Utc::now();

        json!({
            "id": "mock-response",
            "response": "This is a mock response from the copilot runtime. In the full \
                         implementation, this would connect to the CareerHQ agent system.",
            "state": {
                "task_registry": registry,
                "resume_agent_progress": {
                    "completion_status": 100,
                    "analyzing": false,
                    "contributions": [],
                    "last_updated": now,
                    "strengths": [
                        "Strong technical background",
                        "Clear project descriptions",
                        "Quantified achievements"
                    ],
                    "improvements": [
                        "Add more keywords from job descriptions",
                        "Shorten bullet points",
                        "Add certifications section"
                    ]
                },
                "job_search_agent_progress": {
                    "completion_status": 30,
                    "searching": true,
                    "contributions": [],
                    "last_updated": now,
                    "current_action": "Searching for matching jobs...",
                    "thinking": "Analyzing job requirements and comparing with resume keywords..."
                }
            }
        })
    }

    fn task(
        id: &str,
        name: &str,
        assigned_to: &str,
        status: TaskStatus,
        depends_on: &[&str],
    ) -> Option<Task> {
        Task::new(
            NewTask::named(name)
                .with_id(id)
                .assigned_to(assigned_to)
                .depends_on(depends_on)
                .with_status(status),
        )
        .ok()
    }

    fn keyword_matches() -> Vec<KeywordMatch> {
        [
            ("JavaScript", true, 95, Some("Skills section")),
            ("React", true, 90, Some("Skills and Work Experience")),
            ("TypeScript", true, 85, Some("Skills section")),
            ("CI/CD", false, 75, None),
            ("Jest", false, 70, None),
            ("Redux", false, 65, None),
        ]
        .into_iter()
        .map(|(keyword, found, importance, context)| KeywordMatch {
            keyword: keyword.to_string(),
            found,
            importance,
            context: context.map(str::to_string),
        })
        .collect()
    }

    fn strengths() -> Vec<ResumeStrength> {
        vec![
            ResumeStrength {
                text: "Strong technical background with modern frontend technologies".to_string(),
                confidence: 90,
                section: Some("Skills".to_string()),
            },
            ResumeStrength {
                text: "Quantified achievements in previous roles".to_string(),
                confidence: 85,
                section: Some("Work Experience".to_string()),
            },
        ]
    }

    fn weaknesses() -> Vec<ResumeWeakness> {
        vec![ResumeWeakness {
            text: "Missing important keywords for the target role".to_string(),
            confidence: 85,
            section: Some("Skills".to_string()),
            suggestion: Some("Add missing keywords like CI/CD, Jest, and Redux".to_string()),
        }]
    }

    fn improvements() -> Vec<ResumeImprovement> {
        vec![
            ResumeImprovement {
                section: "Work Experience".to_string(),
                original_text: "Developed and maintained multiple React-based web applications"
                    .to_string(),
                improved_text: "Developed 5+ React applications, increasing user engagement by 32%"
                    .to_string(),
                reason: "Original bullet point lacks specific metrics".to_string(),
                impact: Impact::High,
            },
            ResumeImprovement {
                section: "Skills".to_string(),
                original_text: "JavaScript, React, TypeScript, Next.js, Node.js".to_string(),
                improved_text: "JavaScript, React, TypeScript, Next.js, Node.js, Redux, Jest, CI/CD"
                    .to_string(),
                reason: "Missing keywords that are often screened by ATS".to_string(),
                impact: Impact::High,
            },
            ResumeImprovement {
                section: "Education".to_string(),
                original_text: "Bachelor of Science in Computer Science".to_string(),
                improved_text: "Bachelor of Science in Computer Science\nRelevant coursework: \
                                Data Structures, Web Development"
                    .to_string(),
                reason: "Education section lacks details about relevant coursework".to_string(),
                impact: Impact::Medium,
            },
        ]
    }

    fn job_listing() -> JobListing {
        JobListing {
            id: "job-1".to_string(),
            title: "Senior Frontend Developer".to_string(),
            company: "TechCorp".to_string(),
            location: "San Francisco, CA".to_string(),
            remote: true,
            salary: Some("$150,000 - $180,000".to_string()),
            description: "Build modern web applications with React and TypeScript.".to_string(),
            match_score: 92,
            posted_date: "2024-03-01".to_string(),
            application_url: None,
        }
    }
}
