// Agent state store
//
// Single source of truth for agent records, progress slices, the task registry,
// the approval slot and the connection flag. Shared by `Arc`, mutated only
// through `StoreCommand`s, each applied under one write lock.

use std::collections::HashMap;

use chrono::Utc;
use parking_lot::RwLock;
use tokio::sync::broadcast;

use super::errors::{SyncError, SyncResult};
use super::events::StateEvent;
use super::tasks::TaskRegistry;
use crate::domain::agent::{AgentProgress, AgentState, ProgressOp};
use crate::domain::approval::ApprovalData;
use crate::domain::task::{NewTask, TaskEvent, TaskStatus};

const CHANGE_CHANNEL_CAPACITY: usize = 256;

/// A mutation of the store
#[derive(Debug, Clone)]
pub enum StoreCommand {
    /// Replace the full record for an agent; no field-level merge
    SetAgentState { name: String, state: AgentState },
    /// Apply a functional update to an agent's progress slice
    UpdateProgress { agent: String, op: ProgressOp },
    SetTaskRegistry(TaskRegistry),
    AddTask(NewTask),
    UpdateTaskStatus { name: String, status: TaskStatus },
    /// Replace (or clear) the single pending approval
    SetPendingApproval(Option<ApprovalData>),
    /// Clear the slot only if it still holds this approval
    ResolveApproval(ApprovalData),
    SetConnected(bool),
}

/// Notification sent to subscribers after a command is applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreChange {
    Agent(String),
    /// Carries the slice key, e.g. `resume_agent_progress`
    Progress(String),
    Tasks,
    Approval,
    Connection,
}

/// Result of a dispatched command
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Applied {
    /// `None` when the command changed nothing
    pub change: Option<StoreChange>,
    pub task_event: Option<TaskEvent>,
}

#[derive(Debug, Default)]
struct StoreState {
    agents: HashMap<String, AgentState>,
    progress: HashMap<String, AgentProgress>,
    task_registry: TaskRegistry,
    pending_approval: Option<ApprovalData>,
    connected: bool,
}

#[derive(Debug)]
pub struct AgentStore {
    state: RwLock<StoreState>,
    changes: broadcast::Sender<StoreChange>,
}

impl Default for AgentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentStore {
    pub fn new() -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            state: RwLock::new(StoreState::default()),
            changes,
        }
    }

    /// Apply a command atomically and notify subscribers
    pub fn dispatch(&self, command: StoreCommand) -> SyncResult<Applied> {
        let applied = {
            let mut state = self.state.write();
            Self::apply_command(&mut state, command)?
        };

        if let Some(change) = &applied.change {
            // No subscribers is fine
            let _ = self.changes.send(change.clone());
        }
        Ok(applied)
    }

    fn apply_command(state: &mut StoreState, command: StoreCommand) -> SyncResult<Applied> {
        let applied = match command {
            StoreCommand::SetAgentState { name, state: record } => {
                tracing::debug!(agent = %name, status = %record.status, "Agent state set");
                state.agents.insert(name.clone(), record);
                Applied {
                    change: Some(StoreChange::Agent(name)),
                    task_event: None,
                }
            }
            StoreCommand::UpdateProgress { agent, op } => {
                let key = AgentProgress::slice_key(&agent);
                state
                    .progress
                    .entry(key.clone())
                    .or_default()
                    .apply(op, Utc::now());
                Applied {
                    change: Some(StoreChange::Progress(key)),
                    task_event: None,
                }
            }
            StoreCommand::SetTaskRegistry(registry) => {
                state.task_registry = registry;
                Applied {
                    change: Some(StoreChange::Tasks),
                    task_event: None,
                }
            }
            StoreCommand::AddTask(new_task) => {
                let event = state.task_registry.add_task(new_task)?;
                Applied {
                    change: Some(StoreChange::Tasks),
                    task_event: Some(event),
                }
            }
            StoreCommand::UpdateTaskStatus { name, status } => {
                let event = state.task_registry.update_task_status(&name, status)?;
                Applied {
                    change: event.as_ref().map(|_| StoreChange::Tasks),
                    task_event: event,
                }
            }
            StoreCommand::SetPendingApproval(approval) => {
                if let (Some(existing), Some(incoming)) = (&state.pending_approval, &approval) {
                    tracing::debug!(
                        replaced = %existing.approval_type(),
                        incoming = %incoming.approval_type(),
                        "Replacing pending approval"
                    );
                }
                state.pending_approval = approval;
                Applied {
                    change: Some(StoreChange::Approval),
                    task_event: None,
                }
            }
            StoreCommand::ResolveApproval(submitted) => {
                if state.pending_approval.as_ref() == Some(&submitted) {
                    state.pending_approval = None;
                    Applied {
                        change: Some(StoreChange::Approval),
                        task_event: None,
                    }
                } else {
                    tracing::debug!("Pending approval changed during submission, keeping it");
                    Applied::default()
                }
            }
            StoreCommand::SetConnected(connected) => {
                state.connected = connected;
                Applied {
                    change: Some(StoreChange::Connection),
                    task_event: None,
                }
            }
        };
        Ok(applied)
    }

    /// Translate a pushed stream event into store commands
    pub fn apply_event(&self, event: StateEvent) -> SyncResult<()> {
        match event {
            StateEvent::Connection(status) => {
                self.dispatch(StoreCommand::SetConnected(status.is_connected()))?;
            }
            StateEvent::AgentUpdate(record) => {
                let approval = record.pending_approval().cloned();
                self.set_agent_state(record.name.clone(), record)?;
                if let Some(approval) = approval {
                    self.dispatch(StoreCommand::SetPendingApproval(Some(approval)))?;
                }
            }
            StateEvent::TaskUpdate(registry) => {
                self.dispatch(StoreCommand::SetTaskRegistry(registry))?;
            }
            StateEvent::ApprovalRequest(approval) => {
                self.dispatch(StoreCommand::SetPendingApproval(Some(approval)))?;
            }
        }
        Ok(())
    }

    // ===== Command shorthands =====

    pub fn set_agent_state(&self, name: impl Into<String>, state: AgentState) -> SyncResult<()> {
        self.dispatch(StoreCommand::SetAgentState {
            name: name.into(),
            state,
        })
        .map(|_| ())
    }

    pub fn add_task(&self, new_task: NewTask) -> SyncResult<TaskEvent> {
        let applied = self.dispatch(StoreCommand::AddTask(new_task))?;
        applied
            .task_event
            .ok_or_else(|| SyncError::InvalidTask("task was not registered".to_string()))
    }

    pub fn update_task_status(
        &self,
        name: impl Into<String>,
        status: TaskStatus,
    ) -> SyncResult<Option<TaskEvent>> {
        self.dispatch(StoreCommand::UpdateTaskStatus {
            name: name.into(),
            status,
        })
        .map(|applied| applied.task_event)
    }

    pub fn set_connected(&self, connected: bool) -> SyncResult<()> {
        self.dispatch(StoreCommand::SetConnected(connected)).map(|_| ())
    }

    // ===== Read views =====

    /// Current record for `name`, or the idle default if none was written
    pub fn get_agent_state(&self, name: &str) -> AgentState {
        self.state
            .read()
            .agents
            .get(name)
            .cloned()
            .unwrap_or_else(|| AgentState::idle(name))
    }

    pub fn has_agent(&self, name: &str) -> bool {
        self.state.read().agents.contains_key(name)
    }

    pub fn agents(&self) -> Vec<AgentState> {
        let state = self.state.read();
        let mut agents: Vec<AgentState> = state.agents.values().cloned().collect();
        agents.sort_by(|a, b| a.name.cmp(&b.name));
        agents
    }

    /// Progress slice for an agent, defaulted when untouched
    pub fn progress(&self, agent: &str) -> AgentProgress {
        self.state
            .read()
            .progress
            .get(&AgentProgress::slice_key(agent))
            .cloned()
            .unwrap_or_default()
    }

    pub fn task_registry(&self) -> TaskRegistry {
        self.state.read().task_registry.clone()
    }

    pub fn pending_approval(&self) -> Option<ApprovalData> {
        self.state.read().pending_approval.clone()
    }

    pub fn is_connected(&self) -> bool {
        self.state.read().connected
    }

    /// Receive a notification for every applied change
    pub fn subscribe(&self) -> broadcast::Receiver<StoreChange> {
        self.changes.subscribe()
    }
}
