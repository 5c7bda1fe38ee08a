use std::sync::Arc;

use chrono::Utc;

use super::errors::{SyncError, SyncResult};
use super::state::{AgentStore, StoreCommand};
use crate::domain::approval::{
    ApprovalAck, ApprovalData, ApprovalDecision, ApprovalSubmission, ApprovalType, ClearPolicy,
};
use crate::domain::gateways::ApprovalGateway;

/// A registered approval prompt: shown only for pending approvals of its type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApprovalAction {
    pub name: String,
    pub approval_type: ApprovalType,
}

impl ApprovalAction {
    pub fn new(name: impl Into<String>, approval_type: ApprovalType) -> Self {
        Self {
            name: name.into(),
            approval_type,
        }
    }
}

/// Outcome of a successfully submitted decision
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApprovalOutcome {
    pub approval_id: String,
    pub ack: ApprovalAck,
}

/// Human-in-the-loop gate over the store's single approval slot
///
/// # Behavior
/// - `request` replaces whatever is pending; there is no queue
/// - `render` yields output only while an approval of the action's type waits
/// - `submit` forwards the decision to the gateway, then clears the slot
///   according to the configured [`ClearPolicy`]
#[derive(Clone)]
pub struct ApprovalWorkflow {
    store: Arc<AgentStore>,
    gateway: Arc<dyn ApprovalGateway>,
    clear_policy: ClearPolicy,
}

impl ApprovalWorkflow {
    pub fn new(store: Arc<AgentStore>, gateway: Arc<dyn ApprovalGateway>) -> Self {
        Self {
            store,
            gateway,
            clear_policy: ClearPolicy::default(),
        }
    }

    pub fn with_clear_policy(mut self, clear_policy: ClearPolicy) -> Self {
        self.clear_policy = clear_policy;
        self
    }

    pub fn clear_policy(&self) -> ClearPolicy {
        self.clear_policy
    }

    /// Ask the human for a decision, replacing any pending request
    pub fn request(&self, approval: ApprovalData) -> SyncResult<()> {
        tracing::info!(approval_type = %approval.approval_type(), "Approval requested");
        self.store
            .dispatch(StoreCommand::SetPendingApproval(Some(approval)))
            .map(|_| ())
    }

    pub fn pending(&self) -> Option<ApprovalData> {
        self.store.pending_approval()
    }

    /// Produce the prompt for `action` if an approval of its type is pending
    pub fn render<R>(
        &self,
        action: &ApprovalAction,
        render: impl FnOnce(&ApprovalData) -> R,
    ) -> Option<R> {
        let pending = self.store.pending_approval()?;
        if pending.approval_type() != action.approval_type {
            return None;
        }
        tracing::debug!(action = %action.name, "Rendering approval prompt");
        Some(render(&pending))
    }

    /// Forward the human's decision and release the slot
    ///
    /// The approval id is synthesized client-side as `approval-<unix millis>`.
    /// A newer request that arrived while the gateway call was in flight is
    /// left in the slot.
    pub async fn submit(&self, decision: ApprovalDecision) -> SyncResult<ApprovalOutcome> {
        let pending = self
            .store
            .pending_approval()
            .ok_or(SyncError::NoPendingApproval)?;

        let submission = ApprovalSubmission {
            approval_id: format!("approval-{}", Utc::now().timestamp_millis()),
            approved: decision.approved,
            feedback: decision.feedback,
        };

        let result = match self.gateway.submit(&submission).await {
            Ok(ack) if ack.success => Ok(ack),
            Ok(ack) => Err(format!("backend rejected decision: {}", ack.message)),
            Err(e) => Err(e),
        };

        match result {
            Ok(ack) => {
                self.release(pending)?;
                tracing::info!(
                    approval_id = %submission.approval_id,
                    approved = submission.approved,
                    "Approval decision submitted"
                );
                Ok(ApprovalOutcome {
                    approval_id: submission.approval_id,
                    ack,
                })
            }
            Err(e) => {
                tracing::error!(
                    approval_id = %submission.approval_id,
                    error = %e,
                    "Failed to submit approval"
                );
                if self.clear_policy == ClearPolicy::Always {
                    self.release(pending)?;
                }
                Err(SyncError::ApprovalSubmissionFailed(e))
            }
        }
    }

    fn release(&self, submitted: ApprovalData) -> SyncResult<()> {
        self.store
            .dispatch(StoreCommand::ResolveApproval(submitted))
            .map(|_| ())
    }
}
