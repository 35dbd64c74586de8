//! Events emitted by the event loop and the statistics folded from them.

use crate::arbiter::RejectReason;
use quarry_core::types::{AgentId, AgentKind, Coordinate};
use serde::Serialize;

/// Something that happened during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SimEvent {
    /// A move request was accepted.
    Moved { id: AgentId, kind: AgentKind, from: Coordinate, to: Coordinate },
    /// A move request was refused; the agent stays where it was.
    Rejected { id: AgentId, kind: AgentKind, target: Coordinate, reason: RejectReason },
    /// A prey was removed by the sweep. `hunter` is the occupant credited
    /// with `energy`, if the cell held one.
    Captured { prey: AgentId, hunter: Option<AgentId>, energy: i64 },
    /// A hunter ran out of energy.
    Starved { hunter: AgentId, at: Coordinate },
    /// One drain-sweep-render pass finished.
    RoundComplete { round: u64, hunters_alive: usize, preys_alive: usize, dirty: bool },
}

/// Why the run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Every prey was captured; hunters remain.
    PreysExhausted,
    /// Every hunter starved; preys remain.
    HuntersExhausted,
    /// Neither population has a live agent.
    BothExhausted,
    /// Every live agent was refused since the grid last changed.
    Stalemate,
}

impl Outcome {
    /// The outcome implied by the live populations, if either is empty.
    pub fn from_populations(hunters: usize, preys: usize) -> Option<Self> {
        match (hunters, preys) {
            (0, 0) => Some(Outcome::BothExhausted),
            (0, _) => Some(Outcome::HuntersExhausted),
            (_, 0) => Some(Outcome::PreysExhausted),
            _ => None,
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            Outcome::PreysExhausted => "all preys captured",
            Outcome::HuntersExhausted => "all hunters starved",
            Outcome::BothExhausted => "no agents left",
            Outcome::Stalemate => "stalemate",
        }
    }
}

/// Run totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SimulationStats {
    pub rounds: u64,
    pub renders: u64,
    pub moves_accepted: u64,
    pub moves_rejected: u64,
    pub captures: u64,
    pub starvations: u64,
    pub energy_transferred: i64,
    pub outcome: Option<Outcome>,
}

impl SimulationStats {
    pub fn record(&mut self, event: &SimEvent) {
        match event {
            SimEvent::Moved { .. } => self.moves_accepted += 1,
            SimEvent::Rejected { .. } => self.moves_rejected += 1,
            SimEvent::Captured { hunter, energy, .. } => {
                self.captures += 1;
                if hunter.is_some() {
                    self.energy_transferred = self.energy_transferred.saturating_add(*energy);
                }
            }
            SimEvent::Starved { .. } => self.starvations += 1,
            SimEvent::RoundComplete { round, .. } => self.rounds = *round,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_follows_populations() {
        assert_eq!(Outcome::from_populations(2, 3), None);
        assert_eq!(Outcome::from_populations(0, 3), Some(Outcome::HuntersExhausted));
        assert_eq!(Outcome::from_populations(1, 0), Some(Outcome::PreysExhausted));
        assert_eq!(Outcome::from_populations(0, 0), Some(Outcome::BothExhausted));
    }

    #[test]
    fn stats_fold_events() {
        let mut stats = SimulationStats::default();
        let events = [
            SimEvent::Moved {
                id: AgentId(0),
                kind: AgentKind::Hunter,
                from: Coordinate::new(1, 1),
                to: Coordinate::new(1, 2),
            },
            SimEvent::Rejected {
                id: AgentId(1),
                kind: AgentKind::Prey,
                target: Coordinate::new(0, 3),
                reason: RejectReason::OutsideInterior,
            },
            SimEvent::Captured { prey: AgentId(1), hunter: Some(AgentId(0)), energy: 4 },
            SimEvent::Captured { prey: AgentId(2), hunter: None, energy: 9 },
            SimEvent::Starved { hunter: AgentId(0), at: Coordinate::new(1, 2) },
            SimEvent::RoundComplete { round: 3, hunters_alive: 0, preys_alive: 0, dirty: true },
        ];
        for event in &events {
            stats.record(event);
        }
        assert_eq!(stats.moves_accepted, 1);
        assert_eq!(stats.moves_rejected, 1);
        assert_eq!(stats.captures, 2);
        assert_eq!(stats.energy_transferred, 4);
        assert_eq!(stats.starvations, 1);
        assert_eq!(stats.rounds, 3);
    }

    #[test]
    fn stats_serialize_with_snake_case_outcome() {
        let stats = SimulationStats {
            outcome: Some(Outcome::HuntersExhausted),
            ..Default::default()
        };
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["outcome"], "hunters_exhausted");
        assert_eq!(json["renders"], 0);
    }
}
