//! Grid state: the authoritative cell array.

use quarry_core::types::{AgentId, Bounds, Coordinate};

/// Contents of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    /// Placed at startup, never changes afterwards.
    Obstacle,
    Occupied(AgentId),
}

/// Row-major `height × width` array of cells.
#[derive(Debug, Clone)]
pub struct GridState {
    bounds: Bounds,
    cells: Vec<Cell>,
}

impl GridState {
    /// An all-empty grid. Non-positive dimensions yield an empty grid.
    pub fn new(bounds: Bounds) -> Self {
        let len = bounds.width.max(0) as usize * bounds.height.max(0) as usize;
        Self {
            bounds,
            cells: vec![Cell::Empty; len],
        }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn index(&self, coord: Coordinate) -> Option<usize> {
        if self.bounds.contains(coord) {
            Some(coord.row as usize * self.bounds.width as usize + coord.col as usize)
        } else {
            None
        }
    }

    /// `None` outside the grid.
    pub fn get(&self, coord: Coordinate) -> Option<Cell> {
        self.index(coord).map(|i| self.cells[i])
    }

    pub fn occupant(&self, coord: Coordinate) -> Option<AgentId> {
        match self.get(coord) {
            Some(Cell::Occupied(id)) => Some(id),
            _ => None,
        }
    }

    /// Write `cell` at `coord`. Obstacles and out-of-grid coordinates are
    /// left untouched; returns whether the write happened.
    pub fn set(&mut self, coord: Coordinate, cell: Cell) -> bool {
        match self.index(coord) {
            Some(i) if self.cells[i] != Cell::Obstacle => {
                self.cells[i] = cell;
                true
            }
            _ => false,
        }
    }

    pub fn place_obstacle(&mut self, coord: Coordinate) -> bool {
        match self.index(coord) {
            Some(i) => {
                self.cells[i] = Cell::Obstacle;
                true
            }
            None => false,
        }
    }

    /// Empty the cell only if it still holds `id`. A captor that has since
    /// moved in keeps its claim.
    pub fn clear_if_owned(&mut self, coord: Coordinate, id: AgentId) -> bool {
        if self.occupant(coord) == Some(id) {
            self.set(coord, Cell::Empty)
        } else {
            false
        }
    }

    /// Rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.bounds.width.max(1) as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_empty() {
        let grid = GridState::new(Bounds::new(4, 3));
        assert_eq!(grid.rows().count(), 3);
        assert!(grid.rows().all(|row| row.len() == 4));
        assert!(grid.rows().flatten().all(|c| *c == Cell::Empty));
    }

    #[test]
    fn row_major_addressing() {
        let mut grid = GridState::new(Bounds::new(4, 3));
        grid.set(Coordinate::new(2, 1), Cell::Occupied(AgentId(7)));
        let rows: Vec<&[Cell]> = grid.rows().collect();
        assert_eq!(rows[2][1], Cell::Occupied(AgentId(7)));
        assert_eq!(grid.occupant(Coordinate::new(2, 1)), Some(AgentId(7)));
    }

    #[test]
    fn obstacles_are_immutable() {
        let mut grid = GridState::new(Bounds::new(3, 3));
        let at = Coordinate::new(1, 1);
        assert!(grid.place_obstacle(at));
        assert!(!grid.set(at, Cell::Occupied(AgentId(0))));
        assert!(!grid.set(at, Cell::Empty));
        assert_eq!(grid.get(at), Some(Cell::Obstacle));
    }

    #[test]
    fn out_of_grid_is_none() {
        let mut grid = GridState::new(Bounds::new(3, 3));
        assert_eq!(grid.get(Coordinate::new(3, 0)), None);
        assert_eq!(grid.get(Coordinate::INVALID), None);
        assert!(!grid.set(Coordinate::new(0, 3), Cell::Empty));
    }

    #[test]
    fn clear_only_own_cell() {
        let mut grid = GridState::new(Bounds::new(3, 3));
        let at = Coordinate::new(1, 1);
        grid.set(at, Cell::Occupied(AgentId(1)));
        assert!(!grid.clear_if_owned(at, AgentId(2)));
        assert_eq!(grid.occupant(at), Some(AgentId(1)));
        assert!(grid.clear_if_owned(at, AgentId(1)));
        assert_eq!(grid.get(at), Some(Cell::Empty));
    }
}
