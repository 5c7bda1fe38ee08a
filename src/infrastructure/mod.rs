// Infrastructure layer module
// Contains adapters for the CareerHQ backend: the push channel and approval gateways
// Follows Hexagonal Architecture

pub mod channels;
pub mod gateways;
