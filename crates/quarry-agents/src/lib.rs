//! # Quarry Agents
//!
//! The decision procedures that run inside each agent process:
//!
//! - **Hunter**: takes the first open direction in a fixed compass order
//! - **Prey**: only moves when the move strictly opens distance to the
//!   nearest hunter, and answers after a short random delay
//!
//! [`driver::run_agent`] wires a policy to a byte channel. The
//! `quarry-hunter` and `quarry-prey` binaries run it over stdin/stdout,
//! which the coordinator binds to a private socket.

pub mod policy;
pub mod driver;
pub mod process;
pub mod prelude;
