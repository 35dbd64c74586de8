//! # Quarry Core
//!
//! Shared vocabulary for the coordinator and the agent processes:
//!
//! - **types**: coordinates, directions, agent identity and grid bounds
//! - **wire**: the fixed-size binary records exchanged over each agent channel
//! - **error**: the fail-fast error taxonomy used by every crate
//!
//! ## Quick Start
//!
//! ```rust
//! use quarry_core::prelude::*;
//!
//! let bounds = Bounds::new(5, 5);
//! let here = Coordinate::new(1, 1);
//! assert!(bounds.is_interior(here));
//! assert!(!bounds.is_interior(here.step(Direction::North)));
//! ```

pub mod types;
pub mod wire;
pub mod error;
pub mod prelude;
