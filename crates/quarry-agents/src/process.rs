//! Shared entry point for the agent binaries.

use crate::driver::{run_agent, Jitter};
use crate::policy::Policy;
use anyhow::{Context, Result};
use clap::Parser;
use quarry_core::types::Bounds;
use std::io;
use tracing_subscriber::EnvFilter;

/// Startup parameters handed over by the coordinator.
#[derive(Parser, Debug)]
#[command(about = "Quarry agent process: speaks the perception/move protocol on stdin/stdout")]
pub struct AgentArgs {
    /// Grid width in cells
    pub width: i32,
    /// Grid height in cells
    pub height: i32,
}

impl AgentArgs {
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.width, self.height)
    }
}

/// Run `policy` over stdin/stdout until the coordinator closes the channel.
///
/// Logs go to stderr, which the agent shares with the coordinator.
pub fn serve_stdio<P: Policy>(policy: P, jitter: Option<Jitter>) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut reader = stdin.lock();
    let mut writer = stdout.lock();
    run_agent(&policy, &mut reader, &mut writer, jitter)
        .with_context(|| format!("{} agent protocol failure", policy.kind()))?;
    Ok(())
}
