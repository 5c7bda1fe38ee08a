// Outbound ports implemented by the infrastructure layer

pub mod approval_gateway;

pub use approval_gateway::ApprovalGateway;
