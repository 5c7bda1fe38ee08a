use async_trait::async_trait;

use crate::domain::approval::{ApprovalAck, ApprovalSubmission};

/// Port for forwarding approval decisions to the backend
///
/// Implementations handle transport details; the approval workflow decides
/// what a failure means for the pending slot.
#[async_trait]
pub trait ApprovalGateway: Send + Sync {
    /// Submit a decision and return the backend's acknowledgement
    async fn submit(&self, submission: &ApprovalSubmission) -> Result<ApprovalAck, String>;
}
