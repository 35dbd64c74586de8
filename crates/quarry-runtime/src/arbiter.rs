//! Move arbitration and the per-round death sweep.
//!
//! `apply` never resolves captures or starvation. A hunter that lands on a
//! prey simply overwrites the prey's cell; the sweep that runs after all of a
//! round's moves notices the prey's cell no longer holds its id.

use crate::grid::Cell;
use crate::supervisor::AgentHandle;
use crate::world::World;
use quarry_core::types::{AgentId, AgentKind, Coordinate};
use serde::Serialize;

/// Why a requested move was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RejectReason {
    /// Target is on the reserved margin or off the grid.
    OutsideInterior,
    Obstacle,
    /// Target holds an agent of the mover's own kind, the mover included.
    SameKind,
    /// Only hunters may enter an occupied cell.
    HunterOccupied,
    /// The mover's cell was taken by a hunter this round; it awaits the sweep.
    PendingCapture,
    Dead,
}

/// Result of one `apply` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved { from: Coordinate, to: Coordinate },
    Rejected(RejectReason),
}

impl MoveOutcome {
    pub fn moved(&self) -> bool {
        matches!(self, MoveOutcome::Moved { .. })
    }
}

/// Whether an agent of `kind` may move onto `target`, ignoring its own
/// state. Shared with perception so that "blocked" means exactly "would be
/// rejected".
///
/// Only a hunter may enter an occupied cell, and only one holding a prey. A
/// prey targeting a hunter gets [`RejectReason::HunterOccupied`], so after
/// every sweep each live agent's cell holds its own id.
pub fn check_target(world: &World, kind: AgentKind, target: Coordinate) -> Result<(), RejectReason> {
    if !world.bounds().is_interior(target) {
        return Err(RejectReason::OutsideInterior);
    }
    match world.grid.get(target) {
        None => Err(RejectReason::OutsideInterior),
        Some(Cell::Empty) => Ok(()),
        Some(Cell::Obstacle) => Err(RejectReason::Obstacle),
        Some(Cell::Occupied(other)) => match world.agents.kind_of(other) {
            Some(k) if k == kind => Err(RejectReason::SameKind),
            Some(AgentKind::Prey) => Ok(()),
            _ => Err(RejectReason::HunterOccupied),
        },
    }
}

/// Validate and apply `id`'s request to move to `target`.
///
/// On success the target cell takes the mover's id, the source cell is
/// cleared if it still holds that id, and a hunter spends one energy. On
/// rejection nothing changes.
pub fn apply(world: &mut World, id: AgentId, target: Coordinate) -> MoveOutcome {
    let (kind, from) = match world.agents.get(id) {
        Some(agent) if agent.is_alive() => (agent.kind, agent.position),
        _ => return MoveOutcome::Rejected(RejectReason::Dead),
    };
    if world.grid.occupant(from) != Some(id) {
        return MoveOutcome::Rejected(RejectReason::PendingCapture);
    }
    if let Err(reason) = check_target(world, kind, target) {
        return MoveOutcome::Rejected(reason);
    }

    world.grid.set(target, Cell::Occupied(id));
    world.grid.clear_if_owned(from, id);
    if let Some(agent) = world.agents.get_mut(id) {
        agent.position = target;
        if agent.kind == AgentKind::Hunter {
            agent.energy = agent.energy.saturating_sub(1);
        }
    }
    MoveOutcome::Moved { from, to: target }
}

/// How an agent died.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DeathCause {
    Captured { by: Option<AgentId>, energy: i64 },
    Starved,
}

/// One agent removed by the sweep. The handle, if the agent had one, must be
/// released by the caller.
#[derive(Debug)]
pub struct Death {
    pub id: AgentId,
    pub kind: AgentKind,
    pub at: Coordinate,
    pub cause: DeathCause,
    pub handle: Option<AgentHandle>,
}

/// Resolve captures, then starvation. Already-dead agents are skipped, so
/// running the sweep twice changes nothing the second time.
pub fn death_sweep(world: &mut World) -> Vec<Death> {
    let mut deaths = Vec::new();

    let captured: Vec<(AgentId, Coordinate)> = world
        .agents
        .live()
        .filter(|a| a.kind == AgentKind::Prey && world.grid.occupant(a.position) != Some(a.id))
        .map(|a| (a.id, a.position))
        .collect();

    for (prey_id, at) in captured {
        let captor = world
            .grid
            .occupant(at)
            .filter(|&other| world.agents.kind_of(other) == Some(AgentKind::Hunter));
        let Some(prey) = world.agents.get_mut(prey_id) else {
            continue;
        };
        let energy = prey.energy;
        let handle = prey.kill();
        if let Some(hunter) = captor.and_then(|h| world.agents.get_mut(h)) {
            hunter.energy = hunter.energy.saturating_add(energy);
        }
        deaths.push(Death {
            id: prey_id,
            kind: AgentKind::Prey,
            at,
            cause: DeathCause::Captured { by: captor, energy },
            handle,
        });
    }

    let starved: Vec<(AgentId, Coordinate)> = world
        .agents
        .live()
        .filter(|a| a.kind == AgentKind::Hunter && a.energy <= 0)
        .map(|a| (a.id, a.position))
        .collect();

    for (hunter_id, at) in starved {
        world.grid.clear_if_owned(at, hunter_id);
        let handle = world.agents.get_mut(hunter_id).and_then(|h| h.kill());
        deaths.push(Death {
            id: hunter_id,
            kind: AgentKind::Hunter,
            at,
            cause: DeathCause::Starved,
            handle,
        });
    }

    deaths
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::Scenario;

    fn world(description: &str) -> World {
        World::from_scenario(&Scenario::parse(description).unwrap()).unwrap()
    }

    fn c(row: i32, col: i32) -> Coordinate {
        Coordinate::new(row, col)
    }

    #[test]
    fn accepted_hunter_move_costs_one_energy() {
        // hunter 0 at (1,1) energy 3, prey 1 at (3,3)
        let mut w = world("5 5 0 1 1 1 3 1 3 3 2");
        let outcome = apply(&mut w, AgentId(0), c(1, 2));
        assert_eq!(outcome, MoveOutcome::Moved { from: c(1, 1), to: c(1, 2) });
        assert_eq!(w.agents.get(AgentId(0)).unwrap().energy, 2);
        assert_eq!(w.grid.get(c(1, 1)), Some(Cell::Empty));
        assert_eq!(w.grid.occupant(c(1, 2)), Some(AgentId(0)));
        assert!(w.inconsistencies().is_empty());
    }

    #[test]
    fn prey_moves_are_free() {
        let mut w = world("5 5 0 1 1 1 3 1 3 3 2");
        assert!(apply(&mut w, AgentId(1), c(2, 3)).moved());
        assert_eq!(w.agents.get(AgentId(1)).unwrap().energy, 2);
    }

    #[test]
    fn rejected_moves_change_nothing() {
        // obstacle at (1,2), hunters at (1,1) and (2,1), prey at (3,3)
        let mut w = world("5 5 1 1 2 2 1 1 3 2 1 3 1 3 3 2");
        let cases = [
            (c(0, 1), RejectReason::OutsideInterior),
            (c(1, 2), RejectReason::Obstacle),
            (c(2, 1), RejectReason::SameKind),
            (c(1, 1), RejectReason::SameKind),
            (c(9, 9), RejectReason::OutsideInterior),
        ];
        for (target, reason) in cases {
            assert_eq!(apply(&mut w, AgentId(0), target), MoveOutcome::Rejected(reason));
            let hunter = w.agents.get(AgentId(0)).unwrap();
            assert_eq!(hunter.energy, 3);
            assert_eq!(hunter.position, c(1, 1));
        }
        assert_eq!(w.grid.get(c(1, 2)), Some(Cell::Obstacle));
        assert!(w.inconsistencies().is_empty());
    }

    #[test]
    fn prey_cannot_enter_hunter_cell() {
        let mut w = world("5 5 0 1 2 2 3 1 2 3 1");
        assert_eq!(
            apply(&mut w, AgentId(1), c(2, 2)),
            MoveOutcome::Rejected(RejectReason::HunterOccupied)
        );
    }

    #[test]
    fn capture_is_resolved_by_the_sweep() {
        // hunter at (2,2) energy 3, prey at (2,3) energy 5
        let mut w = world("5 5 0 1 2 2 3 1 2 3 5");
        assert!(apply(&mut w, AgentId(0), c(2, 3)).moved());

        // Not resolved yet: the prey is still alive, pending capture.
        assert!(w.agents.get(AgentId(1)).unwrap().is_alive());
        assert_eq!(w.inconsistencies(), vec![AgentId(1)]);
        assert_eq!(
            apply(&mut w, AgentId(1), c(1, 3)),
            MoveOutcome::Rejected(RejectReason::PendingCapture)
        );

        let deaths = death_sweep(&mut w);
        assert_eq!(deaths.len(), 1);
        assert_eq!(deaths[0].id, AgentId(1));
        assert_eq!(
            deaths[0].cause,
            DeathCause::Captured { by: Some(AgentId(0)), energy: 5 }
        );
        assert_eq!(w.agents.get(AgentId(0)).unwrap().energy, 2 + 5);
        assert_eq!(w.grid.occupant(c(2, 3)), Some(AgentId(0)));
        assert_eq!(w.live_count(AgentKind::Prey), 0);
        assert!(w.inconsistencies().is_empty());

        // Energy is transferred exactly once.
        assert!(death_sweep(&mut w).is_empty());
        assert_eq!(w.agents.get(AgentId(0)).unwrap().energy, 7);
    }

    #[test]
    fn starving_hunter_is_removed_and_cell_cleared() {
        let mut w = world("5 5 0 1 2 2 1 1 3 3 1");
        assert!(apply(&mut w, AgentId(0), c(1, 2)).moved());
        assert_eq!(w.agents.get(AgentId(0)).unwrap().energy, 0);

        let deaths = death_sweep(&mut w);
        assert_eq!(deaths.len(), 1);
        assert_eq!(deaths[0].cause, DeathCause::Starved);
        assert_eq!(deaths[0].at, c(1, 2));
        assert_eq!(w.grid.get(c(1, 2)), Some(Cell::Empty));
        assert_eq!(w.live_count(AgentKind::Hunter), 0);
        assert_eq!(apply(&mut w, AgentId(0), c(2, 2)), MoveOutcome::Rejected(RejectReason::Dead));
    }

    #[test]
    fn capture_on_last_energy_saves_the_hunter() {
        // hunter energy 1 steps onto a prey carrying 4
        let mut w = world("5 5 0 1 2 2 1 1 2 3 4");
        assert!(apply(&mut w, AgentId(0), c(2, 3)).moved());
        let deaths = death_sweep(&mut w);
        assert_eq!(deaths.len(), 1);
        assert_eq!(deaths[0].kind, AgentKind::Prey);
        assert_eq!(w.agents.get(AgentId(0)).unwrap().energy, 4);
        assert_eq!(w.live_count(AgentKind::Hunter), 1);
    }

    #[test]
    fn zero_energy_hunter_starves_without_moving() {
        let mut w = world("5 5 0 1 2 2 0 1 3 3 1");
        let deaths = death_sweep(&mut w);
        assert_eq!(deaths.len(), 1);
        assert_eq!(deaths[0].cause, DeathCause::Starved);
    }

    #[test]
    fn inherited_energy_saturates() {
        let mut w = world("5 5 0 1 2 2 9223372036854775806 1 2 3 5");
        assert!(apply(&mut w, AgentId(0), c(2, 3)).moved());
        assert_eq!(w.agents.get(AgentId(0)).unwrap().energy, i64::MAX - 2);

        let deaths = death_sweep(&mut w);
        assert_eq!(deaths[0].cause, DeathCause::Captured { by: Some(AgentId(0)), energy: 5 });
        assert_eq!(w.agents.get(AgentId(0)).unwrap().energy, i64::MAX);
    }
}
