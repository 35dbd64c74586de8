//! CLI command implementations.

pub mod check;
pub mod init;
pub mod run;

use anyhow::{Context, Result};
use quarry_core::error::QuarryError;
use quarry_runtime::scenario::Scenario;
use quarry_runtime::world::World;
use std::io::Read;

/// Read a scenario from `source`, or stdin for `None` and `"-"`, and lay
/// out the initial world.
pub fn load_world(source: Option<&str>) -> Result<(Scenario, World)> {
    let (origin, text) = match source {
        None | Some("-") => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read scenario from stdin")?;
            ("stdin".to_string(), text)
        }
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read scenario: {path}"))?;
            (path.to_string(), text)
        }
    };
    let scenario = Scenario::parse(&text)
        .map_err(QuarryError::from)
        .with_context(|| format!("Invalid scenario in {origin}"))?;
    let world = World::from_scenario(&scenario)
        .map_err(QuarryError::from)
        .with_context(|| format!("Invalid scenario in {origin}"))?;
    Ok((scenario, world))
}
