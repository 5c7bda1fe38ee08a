// Domain layer module exports
// Following Hexagonal Architecture and DDD principles
// Domain is independent of transport and runtime concerns

pub mod agent;
pub mod approval;
pub mod gateways;
pub mod task;
