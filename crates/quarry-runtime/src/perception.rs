//! Perception encoder: the bounded view handed to an agent.

use crate::arbiter::check_target;
use crate::world::World;
use quarry_core::types::{AgentId, Coordinate, Direction};
use quarry_core::wire::PerceptionMessage;

/// Build the perception for `id`'s next decision.
///
/// The adversary is the live agent of the opposite kind closest by
/// Manhattan distance; ties go to the lowest id. Neighbours are scanned
/// north, east, south, west; an interior neighbour is reported as blocked
/// when a move onto it would be rejected. The result depends only on the
/// world snapshot.
pub fn build(world: &World, id: AgentId) -> PerceptionMessage {
    let Some(agent) = world.agents.get(id) else {
        return PerceptionMessage::new(Coordinate::INVALID, Coordinate::INVALID);
    };
    let here = agent.position;
    let enemy = agent.kind.opposite();

    let adversary = world
        .agents
        .live()
        .filter(|other| other.kind == enemy)
        // min_by_key keeps the first minimum, and live() runs in id order.
        .min_by_key(|other| here.manhattan(other.position))
        .map(|other| other.position)
        .unwrap_or(Coordinate::INVALID);

    let mut perception = PerceptionMessage::new(here, adversary);
    for dir in Direction::ALL {
        let neighbour = here.step(dir);
        if world.bounds().is_interior(neighbour)
            && check_target(world, agent.kind, neighbour).is_err()
        {
            perception.block(neighbour);
        }
    }
    perception
}
