// Task domain module
// Contains the task entity, its status state machine, and registry events

#![allow(clippy::module_inception)]

pub mod events;
pub mod task;
pub mod value_objects;

// Re-export main types for convenience
pub use events::TaskEvent;
pub use task::{NewTask, Task};
pub use value_objects::TaskStatus;
