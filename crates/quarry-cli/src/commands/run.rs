//! Run a simulation to completion.

use anyhow::{Context, Result};
use colored::Colorize;
use quarry_core::types::AgentKind;
use quarry_runtime::events::{Outcome, SimulationStats};
use quarry_runtime::event_loop::EventLoop;
use quarry_runtime::supervisor::ProcessSupervisor;
use std::io::{self, Write};
use tracing::debug;

use super::load_world;
use crate::config::Config;
use crate::SummaryFormat;

pub fn run(
    config: &Config,
    scenario: Option<&str>,
    no_render: bool,
    summary: SummaryFormat,
) -> Result<()> {
    let (scenario, world) = load_world(scenario)?;
    let hunters = world.live_count(AgentKind::Hunter);
    let preys = world.live_count(AgentKind::Prey);

    let hunter = config.agents.hunter()?;
    let prey = config.agents.prey()?;
    debug!(hunter = %hunter.program.display(), prey = %prey.program.display(), "agent programs");
    let supervisor = ProcessSupervisor::new(scenario.bounds, hunter, prey);

    let sink: Box<dyn Write> = if no_render || !config.render.enabled {
        Box::new(io::sink())
    } else {
        Box::new(io::stdout().lock())
    };

    let stats = EventLoop::new(world, supervisor, sink)
        .run()
        .context("Simulation failed")?;

    match summary {
        SummaryFormat::Json => {
            let json = serde_json::to_string_pretty(&stats).context("Failed to serialize stats")?;
            eprintln!("{json}");
        }
        SummaryFormat::Text => print_summary(&stats, hunters, preys),
    }
    Ok(())
}

fn print_summary(stats: &SimulationStats, hunters: usize, preys: usize) {
    let outcome = match stats.outcome {
        Some(Outcome::Stalemate) => Outcome::Stalemate.describe().yellow(),
        Some(outcome) => outcome.describe().green(),
        None => "unfinished".red(),
    };
    eprintln!();
    eprintln!("{} Simulation complete: {}", "✓".green().bold(), outcome.bold());
    eprintln!("  Agents:      {} hunters, {} preys", hunters.to_string().cyan(), preys.to_string().cyan());
    eprintln!("  Rounds:      {}", stats.rounds.to_string().cyan());
    eprintln!("  Frames:      {}", stats.renders.to_string().cyan());
    eprintln!(
        "  Moves:       {} accepted, {} rejected",
        stats.moves_accepted.to_string().green(),
        stats.moves_rejected.to_string().yellow()
    );
    eprintln!(
        "  Captures:    {} ({} energy transferred)",
        stats.captures.to_string().cyan(),
        stats.energy_transferred.to_string().cyan()
    );
    eprintln!("  Starvations: {}", stats.starvations.to_string().cyan());
}
