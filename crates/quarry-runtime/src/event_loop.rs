//! The coordinator's main loop.
//!
//! A round is one drain, one sweep and at most one render. Agents are served
//! in id order within a round, so arbitration is deterministic for a given
//! set of ready requests.

use crate::arbiter::{self, DeathCause, MoveOutcome};
use crate::events::{Outcome, SimEvent, SimulationStats};
use crate::perception;
use crate::poll;
use crate::render::render_grid;
use crate::supervisor::{AgentHandle, ProcessSupervisor};
use crate::world::World;
use quarry_core::error::{Result, SupervisionError};
use quarry_core::types::{AgentId, AgentKind};
use std::io::Write;
use std::os::fd::{AsRawFd, RawFd};
use tracing::{debug, info, warn};

pub struct EventLoop<W: Write> {
    world: World,
    supervisor: ProcessSupervisor,
    sink: W,
    stats: SimulationStats,
    history: Vec<SimEvent>,
    /// Bumped whenever the grid or the population changes.
    epoch: u64,
    /// Epoch of the perception each agent last received.
    seen: Vec<u64>,
    /// Epoch at which each agent last had a move refused, if it was deciding
    /// on an up-to-date perception at the time.
    stalled_at: Vec<Option<u64>>,
}

impl<W: Write> EventLoop<W> {
    pub fn new(world: World, supervisor: ProcessSupervisor, sink: W) -> Self {
        let n = world.agents.len();
        Self {
            world,
            supervisor,
            sink,
            stats: SimulationStats::default(),
            history: Vec::new(),
            epoch: 0,
            seen: vec![0; n],
            stalled_at: vec![None; n],
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn history(&self) -> &[SimEvent] {
        &self.history
    }

    pub fn stats(&self) -> &SimulationStats {
        &self.stats
    }

    /// The final world and the render sink.
    pub fn into_parts(self) -> (World, W) {
        (self.world, self.sink)
    }

    /// Run to completion. Every agent process still alive when the run ends,
    /// normally or not, is terminated before this returns.
    pub fn run(&mut self) -> Result<SimulationStats> {
        let result = self.run_inner();
        match result {
            Ok(outcome) => {
                self.shutdown()?;
                self.stats.outcome = Some(outcome);
                info!(
                    outcome = outcome.describe(),
                    rounds = self.stats.rounds,
                    captures = self.stats.captures,
                    starvations = self.stats.starvations,
                    "simulation finished"
                );
                Ok(self.stats.clone())
            }
            Err(err) => {
                warn!(error = %err, "simulation aborted");
                if let Err(cleanup) = self.shutdown() {
                    warn!(error = %cleanup, "cleanup after failure also failed");
                }
                Err(err)
            }
        }
    }

    fn run_inner(&mut self) -> Result<Outcome> {
        self.start()?;
        loop {
            if let Some(outcome) = self.outcome() {
                return Ok(outcome);
            }
            if self.is_stalemate() {
                info!(epoch = self.epoch, "no live agent can make progress");
                return Ok(Outcome::Stalemate);
            }
            self.round()?;
        }
    }

    /// Sweep hunters that start with no energy, spawn every remaining agent
    /// in id order, hand each its first perception, then draw the initial
    /// grid.
    fn start(&mut self) -> Result<()> {
        info!(
            width = self.world.bounds().width,
            height = self.world.bounds().height,
            hunters = self.world.live_count(AgentKind::Hunter),
            preys = self.world.live_count(AgentKind::Prey),
            "simulation starting"
        );
        self.resolve()?;
        let ids: Vec<AgentId> = self.world.agents.live().map(|a| a.id).collect();
        for &id in &ids {
            let Some(kind) = self.world.agents.kind_of(id) else {
                continue;
            };
            let handle = self.supervisor.spawn(kind)?;
            if let Some(agent) = self.world.agents.get_mut(id) {
                agent.attach(handle);
            }
        }
        for &id in &ids {
            self.send_perception(id)?;
        }
        self.render()
    }

    fn round(&mut self) -> Result<()> {
        let mut dirty = self.drain()?;
        dirty |= self.resolve()?;
        if dirty {
            self.render()?;
        }
        debug_assert!(
            self.world.inconsistencies().is_empty(),
            "grid and registry disagree after the sweep"
        );

        let round = self.stats.rounds + 1;
        self.emit(SimEvent::RoundComplete {
            round,
            hunters_alive: self.world.live_count(AgentKind::Hunter),
            preys_alive: self.world.live_count(AgentKind::Prey),
            dirty,
        });
        Ok(())
    }

    /// Wait for at least one ready channel, then serve every ready agent once.
    fn drain(&mut self) -> Result<bool> {
        let (ids, fds): (Vec<AgentId>, Vec<RawFd>) = self
            .world
            .agents
            .live()
            .filter_map(|a| a.handle().map(|h| (a.id, h.as_raw_fd())))
            .unzip();
        let ready = poll::wait_readable(&fds).map_err(SupervisionError::Poll)?;

        let mut dirty = false;
        for (id, _) in ids.into_iter().zip(ready).filter(|(_, r)| *r) {
            dirty |= self.serve(id)?;
        }
        Ok(dirty)
    }

    /// Read one request from `id`, arbitrate it and answer with a fresh
    /// perception. Returns whether the grid changed.
    fn serve(&mut self, id: AgentId) -> Result<bool> {
        let Some(agent) = self.world.agents.get_mut(id) else {
            return Ok(false);
        };
        let kind = agent.kind;
        let Some(handle) = agent.handle_mut() else {
            return Ok(false);
        };
        let request = handle.receive()?;

        let moved = match arbiter::apply(&mut self.world, id, request.requested) {
            MoveOutcome::Moved { from, to } => {
                debug!(agent = %id, %kind, %from, %to, "move accepted");
                self.epoch += 1;
                self.emit(SimEvent::Moved { id, kind, from, to });
                true
            }
            MoveOutcome::Rejected(reason) => {
                debug!(agent = %id, %kind, requested = %request.requested, ?reason, "move rejected");
                if self.seen[id.index()] == self.epoch {
                    self.stalled_at[id.index()] = Some(self.epoch);
                }
                self.emit(SimEvent::Rejected {
                    id,
                    kind,
                    target: request.requested,
                    reason,
                });
                false
            }
        };

        self.send_perception(id)?;
        Ok(moved)
    }

    /// Remove captured preys and starved hunters and stop their processes.
    fn resolve(&mut self) -> Result<bool> {
        let deaths = arbiter::death_sweep(&mut self.world);
        if deaths.is_empty() {
            return Ok(false);
        }
        self.epoch += 1;

        for death in deaths {
            match death.cause {
                DeathCause::Captured { by, energy } => {
                    info!(prey = %death.id, hunter = ?by.map(|h| h.0), energy, at = %death.at, "prey captured");
                    self.emit(SimEvent::Captured {
                        prey: death.id,
                        hunter: by,
                        energy,
                    });
                }
                DeathCause::Starved => {
                    info!(hunter = %death.id, at = %death.at, "hunter starved");
                    self.emit(SimEvent::Starved {
                        hunter: death.id,
                        at: death.at,
                    });
                }
            }
            if let Some(handle) = death.handle {
                self.supervisor.terminate(handle)?;
            }
        }
        Ok(true)
    }

    fn send_perception(&mut self, id: AgentId) -> Result<()> {
        let message = perception::build(&self.world, id);
        let epoch = self.epoch;
        let Some(handle) = self.world.agents.get_mut(id).and_then(|a| a.handle_mut()) else {
            return Ok(());
        };
        handle.send(&message)?;
        self.seen[id.index()] = epoch;
        Ok(())
    }

    fn render(&mut self) -> Result<()> {
        self.sink.write_all(render_grid(&self.world).as_bytes())?;
        self.sink.flush()?;
        self.stats.renders += 1;
        Ok(())
    }

    fn emit(&mut self, event: SimEvent) {
        self.stats.record(&event);
        self.history.push(event);
    }

    fn outcome(&self) -> Option<Outcome> {
        Outcome::from_populations(
            self.world.live_count(AgentKind::Hunter),
            self.world.live_count(AgentKind::Prey),
        )
    }

    /// Every live agent was refused while looking at the current world.
    /// Policies are deterministic, so none of them will ever move again.
    fn is_stalemate(&self) -> bool {
        let mut live = self.world.agents.live().peekable();
        live.peek().is_some() && live.all(|a| self.stalled_at[a.id.index()] == Some(self.epoch))
    }

    /// Terminate every process that is still running.
    fn shutdown(&mut self) -> Result<()> {
        let handles: Vec<AgentHandle> = self
            .world
            .agents
            .iter_mut()
            .filter_map(|a| a.take_handle())
            .collect();
        let mut first_err = None;
        for handle in handles {
            if let Err(err) = self.supervisor.terminate(handle) {
                warn!(error = %err, "failed to terminate agent");
                first_err.get_or_insert(err);
            }
        }
        debug!(epoch = self.epoch, "all agents terminated");
        match first_err {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
