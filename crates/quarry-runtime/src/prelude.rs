//! Convenience re-exports.

pub use crate::arbiter::{death_sweep, Death, DeathCause, MoveOutcome, RejectReason};
pub use crate::event_loop::EventLoop;
pub use crate::events::{Outcome, SimEvent, SimulationStats};
pub use crate::grid::{Cell, GridState};
pub use crate::registry::{AgentRegistry, AgentState};
pub use crate::render::render_grid;
pub use crate::scenario::{AgentSeed, Scenario};
pub use crate::supervisor::{AgentHandle, AgentProgram, ProcessSupervisor};
pub use crate::world::World;
pub use quarry_core::prelude::*;
