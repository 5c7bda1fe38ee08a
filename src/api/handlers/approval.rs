use axum::{extract::rejection::JsonRejection, extract::State, Json};

use super::parse_body;
use crate::api::errors::ApiError;
use crate::api::state::AppState;
use crate::domain::approval::{ApprovalAck, ApprovalDecision, ApprovalSubmission};
use crate::infrastructure::gateways::LocalApprovalGateway;

/// Accept a human decision
///
/// POST /api/approval
///
/// Always acknowledges. A pending approval in the server store is released
/// through the approval workflow.
pub async fn submit_approval(
    State(state): State<AppState>,
    payload: Result<Json<ApprovalSubmission>, JsonRejection>,
) -> Result<Json<ApprovalAck>, ApiError> {
    let submission = parse_body(payload, "Failed to submit approval decision")?;
    tracing::info!(
        approval_id = %submission.approval_id,
        approved = submission.approved,
        "Approval decision received"
    );

    if state.approvals.pending().is_some() {
        let decision = ApprovalDecision {
            approved: submission.approved,
            feedback: submission.feedback.clone(),
        };
        if let Err(e) = state.approvals.submit(decision).await {
            tracing::error!(error = %e, "Failed to release pending approval");
        }
    }

    Ok(Json(LocalApprovalGateway::acknowledge(submission.approved)))
}
