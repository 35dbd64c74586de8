//! Agent registry: every agent's position, energy, liveness and handle.

use crate::supervisor::AgentHandle;
use quarry_core::types::{AgentId, AgentKind, Coordinate};

/// Coordinator-side record of one agent.
#[derive(Debug)]
pub struct AgentState {
    pub id: AgentId,
    pub kind: AgentKind,
    pub position: Coordinate,
    /// Hunters spend one unit per accepted move; a prey's energy is what its
    /// captor gains.
    pub energy: i64,
    alive: bool,
    handle: Option<AgentHandle>,
}

impl AgentState {
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn handle(&self) -> Option<&AgentHandle> {
        self.handle.as_ref()
    }

    pub fn handle_mut(&mut self) -> Option<&mut AgentHandle> {
        self.handle.as_mut()
    }

    pub fn attach(&mut self, handle: AgentHandle) {
        self.handle = Some(handle);
    }

    /// Detach the process handle. Yields it at most once.
    pub fn take_handle(&mut self) -> Option<AgentHandle> {
        self.handle.take()
    }

    /// Mark dead for good: invalid position, no energy. The handle is
    /// returned so the caller can release it.
    pub fn kill(&mut self) -> Option<AgentHandle> {
        self.alive = false;
        self.position = Coordinate::INVALID;
        self.energy = 0;
        self.take_handle()
    }
}

/// All agents, indexed by id.
#[derive(Debug, Default)]
pub struct AgentRegistry {
    agents: Vec<AgentState>,
}

impl AgentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a live agent and assign the next id.
    pub fn register(&mut self, kind: AgentKind, position: Coordinate, energy: i64) -> AgentId {
        let id = AgentId(self.agents.len() as u32);
        self.agents.push(AgentState {
            id,
            kind,
            position,
            energy,
            alive: true,
            handle: None,
        });
        id
    }

    pub fn get(&self, id: AgentId) -> Option<&AgentState> {
        self.agents.get(id.index())
    }

    pub fn get_mut(&mut self, id: AgentId) -> Option<&mut AgentState> {
        self.agents.get_mut(id.index())
    }

    pub fn kind_of(&self, id: AgentId) -> Option<AgentKind> {
        self.get(id).map(|a| a.kind)
    }

    /// All agents in id order, dead ones included.
    pub fn iter(&self) -> impl Iterator<Item = &AgentState> {
        self.agents.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut AgentState> {
        self.agents.iter_mut()
    }

    /// Live agents in id order.
    pub fn live(&self) -> impl Iterator<Item = &AgentState> {
        self.agents.iter().filter(|a| a.alive)
    }

    pub fn live_count(&self, kind: AgentKind) -> usize {
        self.live().filter(|a| a.kind == kind).count()
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}
