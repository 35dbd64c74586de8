//! Decision procedures for the two agent kinds.
//!
//! A policy sees nothing but the perception the coordinator sends it and the
//! grid bounds it was started with. Both policies are pure functions of
//! those two inputs.

use quarry_core::types::{AgentKind, Bounds, Coordinate, Direction};
use quarry_core::wire::PerceptionMessage;

/// Chooses the next requested cell from a perception.
pub trait Policy {
    fn kind(&self) -> AgentKind;

    /// The cell to request next. Returning the current position means "stay".
    fn decide(&self, perception: &PerceptionMessage) -> Coordinate;
}

/// Walks the compass in a fixed order and takes the first open cell.
#[derive(Debug, Clone, Copy)]
pub struct HunterPolicy {
    bounds: Bounds,
}

impl HunterPolicy {
    pub fn new(bounds: Bounds) -> Self {
        Self { bounds }
    }
}

impl Policy for HunterPolicy {
    fn kind(&self) -> AgentKind {
        AgentKind::Hunter
    }

    fn decide(&self, perception: &PerceptionMessage) -> Coordinate {
        let here = perception.position;
        Direction::ALL
            .iter()
            .map(|dir| here.step(*dir))
            .find(|&target| open(self.bounds, perception, target))
            // Every direction closed: stay put.
            .unwrap_or(here)
    }
}

/// Moves only when that strictly widens the gap to the nearest hunter.
#[derive(Debug, Clone, Copy)]
pub struct PreyPolicy {
    bounds: Bounds,
}

impl PreyPolicy {
    pub fn new(bounds: Bounds) -> Self {
        Self { bounds }
    }
}

impl Policy for PreyPolicy {
    fn kind(&self) -> AgentKind {
        AgentKind::Prey
    }

    fn decide(&self, perception: &PerceptionMessage) -> Coordinate {
        let here = perception.position;
        let threat = perception.adversary;
        if !threat.is_valid() {
            return here;
        }
        let current = here.manhattan(threat);
        Direction::ALL
            .iter()
            .map(|dir| here.step(*dir))
            .find(|&target| {
                open(self.bounds, perception, target) && target.manhattan(threat) > current
            })
            .unwrap_or(here)
    }
}

fn open(bounds: Bounds, perception: &PerceptionMessage, target: Coordinate) -> bool {
    bounds.is_interior(target) && !perception.is_blocked(target)
}
