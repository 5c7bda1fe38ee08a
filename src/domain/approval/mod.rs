// Approval domain module
// Human-in-the-loop decision requests and their outcomes

pub mod value_objects;

pub use value_objects::{
    ApplicationDetails, ApprovalAck, ApprovalData, ApprovalDecision, ApprovalSubmission,
    ApprovalType, ClearPolicy, JobApplicationApprovalData, ResumeApprovalData,
};
