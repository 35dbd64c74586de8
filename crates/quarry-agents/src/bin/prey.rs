//! Prey agent process.

use anyhow::Result;
use clap::Parser;
use quarry_agents::driver::Jitter;
use quarry_agents::policy::PreyPolicy;
use quarry_agents::process::{serve_stdio, AgentArgs};

fn main() -> Result<()> {
    let args = AgentArgs::parse();
    serve_stdio(PreyPolicy::new(args.bounds()), Some(Jitter::prey()))
}
