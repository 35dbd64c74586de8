//! Startup description parser.
//!
//! The description is a whitespace-separated list of integers:
//!
//! ```text
//! width height
//! obstacle_count   (x y) × obstacle_count
//! hunter_count     (x y energy) × hunter_count
//! prey_count       (x y energy) × prey_count
//! ```
//!
//! `x` is the row and `y` the column. Placement checks (inside the grid, no
//! overlaps) happen when the scenario is turned into a [`World`](crate::world::World).

use quarry_core::error::ScenarioError;
use quarry_core::types::{Bounds, Coordinate};
use std::str::{FromStr, SplitWhitespace};

/// Largest grid, in cells, a description may ask for.
pub const MAX_GRID_CELLS: i64 = 1 << 24;

/// Initial placement of one agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentSeed {
    pub position: Coordinate,
    pub energy: i64,
}

/// A parsed startup description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    pub bounds: Bounds,
    pub obstacles: Vec<Coordinate>,
    pub hunters: Vec<AgentSeed>,
    pub preys: Vec<AgentSeed>,
}

impl Scenario {
    pub fn parse(input: &str) -> Result<Self, ScenarioError> {
        let mut tokens = Tokens {
            inner: input.split_whitespace(),
        };

        let width = tokens.bounded("width", 1)?;
        let height = tokens.bounded("height", 1)?;
        match width.checked_mul(height) {
            Some(cells) if cells <= MAX_GRID_CELLS => {}
            _ => {
                return Err(ScenarioError::GridTooLarge {
                    width,
                    height,
                    max: MAX_GRID_CELLS,
                })
            }
        }
        let bounds = Bounds::new(to_i32("width", width)?, to_i32("height", height)?);

        let obstacle_count = tokens.bounded("obstacle count", 0)?;
        let mut obstacles = Vec::new();
        for _ in 0..obstacle_count {
            obstacles.push(tokens.coordinate("obstacle")?);
        }

        let hunters = tokens.seeds("hunter", "hunter count", "hunter energy")?;
        let preys = tokens.seeds("prey", "prey count", "prey energy")?;

        if let Some(extra) = tokens.inner.next() {
            return Err(ScenarioError::TrailingInput(extra.to_string()));
        }

        Ok(Self {
            bounds,
            obstacles,
            hunters,
            preys,
        })
    }
}

impl FromStr for Scenario {
    type Err = ScenarioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

struct Tokens<'a> {
    inner: SplitWhitespace<'a>,
}

impl<'a> Tokens<'a> {
    fn number(&mut self, field: &'static str) -> Result<i64, ScenarioError> {
        let token = self
            .inner
            .next()
            .ok_or(ScenarioError::UnexpectedEnd(field))?;
        token.parse().map_err(|_| ScenarioError::InvalidNumber {
            field,
            token: token.to_string(),
        })
    }

    fn bounded(&mut self, field: &'static str, min: i64) -> Result<i64, ScenarioError> {
        let value = self.number(field)?;
        if value < min {
            return Err(ScenarioError::OutOfRange { field, min, value });
        }
        Ok(value)
    }

    fn coordinate(&mut self, what: &'static str) -> Result<Coordinate, ScenarioError> {
        let row = to_i32(what, self.number(what)?)?;
        let col = to_i32(what, self.number(what)?)?;
        Ok(Coordinate::new(row, col))
    }

    fn seeds(
        &mut self,
        what: &'static str,
        count_field: &'static str,
        energy_field: &'static str,
    ) -> Result<Vec<AgentSeed>, ScenarioError> {
        let count = self.bounded(count_field, 0)?;
        let mut seeds = Vec::new();
        for _ in 0..count {
            let position = self.coordinate(what)?;
            let energy = self.bounded(energy_field, 0)?;
            seeds.push(AgentSeed { position, energy });
        }
        Ok(seeds)
    }
}

fn to_i32(field: &'static str, value: i64) -> Result<i32, ScenarioError> {
    i32::try_from(value).map_err(|_| ScenarioError::InvalidNumber {
        field,
        token: value.to_string(),
    })
}
