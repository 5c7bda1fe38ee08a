use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::approval::{ApprovalAck, ApprovalSubmission};
use crate::domain::gateways::ApprovalGateway;

pub const APPROVED_MESSAGE: &str = "Approval confirmed.";
pub const REJECTED_MESSAGE: &str = "Changes rejected.";

/// In-process ApprovalGateway used in mock mode
///
/// Accepts every decision with the same acknowledgement the backend's mock
/// endpoint sends, and keeps the submissions for inspection.
#[derive(Debug, Default)]
pub struct LocalApprovalGateway {
    submissions: Mutex<Vec<ApprovalSubmission>>,
}

impl LocalApprovalGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acknowledgement for a decision
    pub fn acknowledge(approved: bool) -> ApprovalAck {
        ApprovalAck {
            success: true,
            message: if approved { APPROVED_MESSAGE } else { REJECTED_MESSAGE }.to_string(),
        }
    }

    pub fn submissions(&self) -> Vec<ApprovalSubmission> {
        self.submissions.lock().clone()
    }
}

#[async_trait]
impl ApprovalGateway for LocalApprovalGateway {
    async fn submit(&self, submission: &ApprovalSubmission) -> Result<ApprovalAck, String> {
        tracing::info!(
            approval_id = %submission.approval_id,
            approved = submission.approved,
            "Recorded approval decision locally"
        );
        self.submissions.lock().push(submission.clone());
        Ok(Self::acknowledge(submission.approved))
    }
}
