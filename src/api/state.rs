use std::sync::Arc;

use crate::agents::approval::ApprovalWorkflow;
use crate::agents::state::AgentStore;
use crate::config::Config;
use crate::infrastructure::gateways::LocalApprovalGateway;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<AgentStore>,
    pub config: Arc<Config>,
    pub approvals: ApprovalWorkflow,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self::with_store(Arc::new(AgentStore::new()), config)
    }

    /// Serve an existing store, e.g. one fed by a connection manager
    pub fn with_store(store: Arc<AgentStore>, config: Config) -> Self {
        let approvals = ApprovalWorkflow::new(store.clone(), Arc::new(LocalApprovalGateway::new()))
            .with_clear_policy(config.approval_clear_policy);

        Self {
            store,
            config: Arc::new(config),
            approvals,
        }
    }
}
