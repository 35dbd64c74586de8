//! Validate a scenario without spawning any agent.

use anyhow::Result;
use colored::Colorize;
use quarry_core::types::{AgentKind, INTERIOR_MARGIN};
use quarry_runtime::render::render_grid;

use super::load_world;

pub fn run(scenario: Option<&str>) -> Result<()> {
    let (scenario, world) = load_world(scenario)?;

    let span = |extent: i32| (extent - 2 * INTERIOR_MARGIN).max(0);
    let interior = span(scenario.bounds.width) * span(scenario.bounds.height);
    println!("{}", render_grid(&world).trim_end());
    eprintln!("{} Scenario is valid", "✓".green().bold());
    eprintln!(
        "  Grid:      {}x{} ({} interior cells)",
        scenario.bounds.width,
        scenario.bounds.height,
        interior.to_string().cyan()
    );
    eprintln!("  Obstacles: {}", scenario.obstacles.len().to_string().cyan());
    eprintln!(
        "  Hunters:   {} (total energy {})",
        world.live_count(AgentKind::Hunter).to_string().cyan(),
        scenario.hunters.iter().map(|h| h.energy).sum::<i64>().to_string().cyan()
    );
    eprintln!("  Preys:     {}", world.live_count(AgentKind::Prey).to_string().cyan());
    Ok(())
}
