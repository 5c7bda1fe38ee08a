// Agent domain module
// Agent state records, typed results, and progress slices

pub mod agent_state;
pub mod progress;
pub mod results;
pub mod value_objects;

pub use agent_state::AgentState;
pub use progress::{AgentProgress, Contribution, ProgressOp};
pub use results::{
    AgentResults, JobListing, JobSearchCriteria, JobSearchResults, KeywordMatch,
    ResumeAnalysis, ResumeImprovement, ResumeStrength, ResumeWeakness, SalaryRange,
};
pub use value_objects::{AgentStatus, Impact};
