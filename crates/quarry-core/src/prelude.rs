//! Convenience re-exports.

pub use crate::error::{ProtocolError, QuarryError, Result, ScenarioError, SupervisionError};
pub use crate::types::*;
pub use crate::wire::{MoveRequest, PerceptionMessage, MAX_BLOCKED};
