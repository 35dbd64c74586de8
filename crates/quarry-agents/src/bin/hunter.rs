//! Hunter agent process.

use anyhow::Result;
use clap::Parser;
use quarry_agents::policy::HunterPolicy;
use quarry_agents::process::{serve_stdio, AgentArgs};

fn main() -> Result<()> {
    let args = AgentArgs::parse();
    serve_stdio(HunterPolicy::new(args.bounds()), None)
}
