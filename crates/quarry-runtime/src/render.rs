//! Text rendering of the grid.

use crate::grid::Cell;
use crate::world::World;

/// Draw the whole grid, border included, as newline-terminated lines.
///
/// ```text
/// +-----+
/// |H    |
/// |  X  |
/// |    P|
/// +-----+
/// ```
pub fn render_grid(world: &World) -> String {
    let bounds = world.bounds();
    let width = bounds.width.max(0) as usize;
    let border = format!("+{}+\n", "-".repeat(width));

    let mut out = String::with_capacity((width + 3) * (bounds.height.max(0) as usize + 2));
    out.push_str(&border);
    for row in world.grid.rows() {
        out.push('|');
        out.extend(row.iter().map(|&cell| glyph(world, cell)));
        out.push_str("|\n");
    }
    out.push_str(&border);
    out
}

fn glyph(world: &World, cell: Cell) -> char {
    match cell {
        Cell::Empty => ' ',
        Cell::Obstacle => 'X',
        Cell::Occupied(id) => world.agents.kind_of(id).map_or('?', |kind| kind.glyph()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::Scenario;

    #[test]
    fn draws_border_agents_and_obstacles() {
        let scenario = Scenario::parse("5 4 1 2 2 1 1 1 3 1 2 3 1").unwrap();
        let world = World::from_scenario(&scenario).unwrap();
        assert_eq!(
            render_grid(&world),
            "+-----+\n\
             |     |\n\
             | H   |\n\
             |  XP |\n\
             |     |\n\
             +-----+\n"
        );
    }

    #[test]
    fn one_line_per_row_plus_borders() {
        let world = World::new(quarry_core::types::Bounds::new(7, 3));
        let text = render_grid(&world);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines.iter().all(|l| l.chars().count() == 9));
    }
}
