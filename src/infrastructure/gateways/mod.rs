// Gateway implementations
// Adapters that implement domain gateway interfaces

pub mod http_approval_gateway;
pub mod local_approval_gateway;

pub use http_approval_gateway::HttpApprovalGateway;
pub use local_approval_gateway::LocalApprovalGateway;
