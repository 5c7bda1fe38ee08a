// Agent state sync engine
//
// Store, task registry, progress and approval operations, plus the event
// channels that push backend updates into the store.

pub mod approval;
pub mod channel;
pub mod errors;
pub mod events;
pub mod manager;
pub mod messages;
pub mod mock_source;
pub mod progress;
pub mod scripts;
pub mod state;
pub mod tasks;

// Re-export main types
pub use approval::{ApprovalAction, ApprovalOutcome, ApprovalWorkflow};
pub use channel::{EventChannel, EventStream, MockChannel};
pub use errors::{SyncError, SyncResult};
pub use events::{ConnectionStatus, StateEvent};
pub use manager::ConnectionManager;
pub use messages::{FrameDecoder, StreamFrame};
pub use mock_source::{MockEventSource, MockTiming};
pub use progress::AgentProgressHandle;
pub use state::{AgentStore, StoreChange, StoreCommand};
pub use tasks::TaskRegistry;
