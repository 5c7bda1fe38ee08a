use async_trait::async_trait;
use reqwest::Client;

use crate::domain::approval::{ApprovalAck, ApprovalSubmission};
use crate::domain::gateways::ApprovalGateway;

/// HTTP implementation of ApprovalGateway
///
/// Posts decisions to `{base_url}/api/approval` on a CareerHQ backend.
pub struct HttpApprovalGateway {
    client: Client,
    base_url: String,
}

impl HttpApprovalGateway {
    /// Creates a new HttpApprovalGateway
    ///
    /// # Arguments
    /// * `base_url` - Backend origin, with or without a trailing slash
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    fn endpoint(&self) -> String {
        format!("{}/api/approval", self.base_url)
    }
}

#[async_trait]
impl ApprovalGateway for HttpApprovalGateway {
    async fn submit(&self, submission: &ApprovalSubmission) -> Result<ApprovalAck, String> {
        tracing::debug!(approval_id = %submission.approval_id, "Posting approval decision");

        let response = self
            .client
            .post(self.endpoint())
            .json(submission)
            .send()
            .await
            .map_err(|e| format!("Failed to reach approval endpoint: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(format!("Approval endpoint returned {}: {}", status.as_u16(), body));
        }

        response
            .json::<ApprovalAck>()
            .await
            .map_err(|e| format!("Failed to decode approval response: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn submission() -> ApprovalSubmission {
        ApprovalSubmission {
            approval_id: "approval-1700000000000".to_string(),
            approved: false,
            feedback: Some("Too long".to_string()),
        }
    }

    #[tokio::test]
    async fn test_submit_posts_camel_case_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/approval"))
            .and(body_json(json!({
                "approvalId": "approval-1700000000000",
                "approved": false,
                "feedback": "Too long"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "message": "Changes rejected."
            })))
            .expect(1)
            .mount(&server)
            .await;

        let gateway = HttpApprovalGateway::new(format!("{}/", server.uri()));
        let ack = gateway.submit(&submission()).await.unwrap();

        assert!(ack.success);
        assert_eq!(ack.message, "Changes rejected.");
    }

    #[tokio::test]
    async fn test_submit_reports_server_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/approval"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "error": "Failed to submit approval decision"
            })))
            .mount(&server)
            .await;

        let gateway = HttpApprovalGateway::new(server.uri());
        let err = gateway.submit(&submission()).await.unwrap_err();

        assert!(err.contains("500"));
        assert!(err.contains("Failed to submit approval decision"));
    }
}
