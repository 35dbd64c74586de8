//! # Quarry Runtime
//!
//! The coordinator. It owns the grid, supervises one process per agent and
//! arbitrates every move.
//!
//! Each round:
//! 1. Wait until at least one live agent channel is readable
//! 2. Read one move request from every ready channel, in id order, and
//!    apply it; answer each with a fresh perception
//! 3. Sweep for captured preys and starved hunters, terminating their
//!    processes
//! 4. Render the grid if anything changed
//!
//! The run ends when either population is gone, or when no live agent can
//! make progress.

pub mod grid;
pub mod registry;
pub mod world;
pub mod scenario;
pub mod supervisor;
pub mod poll;
pub mod perception;
pub mod arbiter;
pub mod events;
pub mod render;
pub mod event_loop;
pub mod prelude;
