//! The owned simulation state: grid plus registry.
//!
//! One `World` value is created at startup and threaded through the event
//! loop, arbitration and perception. Nothing else holds simulation state.

use crate::grid::{Cell, GridState};
use crate::registry::AgentRegistry;
use crate::scenario::Scenario;
use quarry_core::error::ScenarioError;
use quarry_core::types::{AgentId, AgentKind, Bounds, Coordinate};

#[derive(Debug)]
pub struct World {
    pub grid: GridState,
    pub agents: AgentRegistry,
}

impl World {
    pub fn new(bounds: Bounds) -> Self {
        Self {
            grid: GridState::new(bounds),
            agents: AgentRegistry::new(),
        }
    }

    /// Build the initial world. Hunters get the lowest ids, in input order,
    /// followed by preys.
    pub fn from_scenario(scenario: &Scenario) -> Result<Self, ScenarioError> {
        let mut world = Self::new(scenario.bounds);
        for &obstacle in &scenario.obstacles {
            world.add_obstacle(obstacle)?;
        }
        for seed in &scenario.hunters {
            world.add_agent(AgentKind::Hunter, seed.position, seed.energy)?;
        }
        for seed in &scenario.preys {
            world.add_agent(AgentKind::Prey, seed.position, seed.energy)?;
        }
        Ok(world)
    }

    pub fn bounds(&self) -> Bounds {
        self.grid.bounds()
    }

    pub fn add_obstacle(&mut self, at: Coordinate) -> Result<(), ScenarioError> {
        self.check_free("obstacle", at)?;
        self.grid.place_obstacle(at);
        Ok(())
    }

    pub fn add_agent(
        &mut self,
        kind: AgentKind,
        at: Coordinate,
        energy: i64,
    ) -> Result<AgentId, ScenarioError> {
        self.check_free(kind.name(), at)?;
        let id = self.agents.register(kind, at, energy);
        self.grid.set(at, Cell::Occupied(id));
        Ok(id)
    }

    fn check_free(&self, what: &'static str, at: Coordinate) -> Result<(), ScenarioError> {
        let bounds = self.bounds();
        match self.grid.get(at) {
            None => Err(ScenarioError::OutsideGrid {
                what,
                row: at.row,
                col: at.col,
                width: bounds.width,
                height: bounds.height,
            }),
            Some(Cell::Empty) => Ok(()),
            Some(_) => Err(ScenarioError::Overlap {
                what,
                row: at.row,
                col: at.col,
            }),
        }
    }

    pub fn live_count(&self, kind: AgentKind) -> usize {
        self.agents.live_count(kind)
    }

    /// Live agents whose recorded cell does not hold their own id. Between a
    /// capture and the next death sweep this lists the captured prey;
    /// otherwise it is empty.
    pub fn inconsistencies(&self) -> Vec<AgentId> {
        self.agents
            .live()
            .filter(|a| self.grid.occupant(a.position) != Some(a.id))
            .map(|a| a.id)
            .collect()
    }
}
