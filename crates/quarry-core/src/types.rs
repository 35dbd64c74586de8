//! Shared types used by the coordinator and the agent processes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Width of the reserved band along every edge of the grid.
///
/// Cells inside this band are never legal move targets, whatever they hold.
/// The rendered border sits outside the grid, so a 5×5 grid has the playable
/// interior rows and columns `1..=3`.
pub const INTERIOR_MARGIN: i32 = 1;

/// A cell position. `row` is the `x` of the startup description and the wire
/// records, `col` is the `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinate {
    pub row: i32,
    pub col: i32,
}

impl Coordinate {
    /// Position carried by dead agents and by perceptions without an adversary.
    pub const INVALID: Coordinate = Coordinate { row: -1, col: -1 };

    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// The orthogonal neighbour in `direction`.
    pub fn step(self, direction: Direction) -> Self {
        let (dr, dc) = direction.offset();
        Self::new(self.row + dr, self.col + dc)
    }

    pub fn manhattan(self, other: Coordinate) -> i32 {
        (self.row - other.row).abs() + (self.col - other.col).abs()
    }

    pub fn is_valid(self) -> bool {
        self != Self::INVALID
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// One of the four orthogonal moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Fixed scan order shared by perception and both policies.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Row/column delta. North decreases the row.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (-1, 0),
            Direction::East => (0, 1),
            Direction::South => (1, 0),
            Direction::West => (0, -1),
        }
    }
}

/// Dense identifier of an agent. Hunters are numbered first, in input order,
/// followed by preys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AgentId(pub u32);

impl AgentId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "agent-{}", self.0)
    }
}

/// The two populations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgentKind {
    Hunter,
    Prey,
}

impl AgentKind {
    pub fn opposite(self) -> Self {
        match self {
            AgentKind::Hunter => AgentKind::Prey,
            AgentKind::Prey => AgentKind::Hunter,
        }
    }

    /// Glyph used by the text renderer.
    pub fn glyph(self) -> char {
        match self {
            AgentKind::Hunter => 'H',
            AgentKind::Prey => 'P',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AgentKind::Hunter => "hunter",
            AgentKind::Prey => "prey",
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Grid dimensions, the only startup parameters an agent process receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: i32,
    pub height: i32,
}

impl Bounds {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Whether `coord` addresses a cell of the grid at all.
    pub fn contains(&self, coord: Coordinate) -> bool {
        coord.row >= 0 && coord.row < self.height && coord.col >= 0 && coord.col < self.width
    }

    /// Whether `coord` lies inside the playable interior, i.e. at least
    /// [`INTERIOR_MARGIN`] cells away from every edge.
    pub fn is_interior(&self, coord: Coordinate) -> bool {
        coord.row >= INTERIOR_MARGIN
            && coord.row < self.height - INTERIOR_MARGIN
            && coord.col >= INTERIOR_MARGIN
            && coord.col < self.width - INTERIOR_MARGIN
    }
}
