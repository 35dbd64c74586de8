//! Convenience re-exports.

pub use crate::driver::{run_agent, Jitter};
pub use crate::policy::{HunterPolicy, Policy, PreyPolicy};
