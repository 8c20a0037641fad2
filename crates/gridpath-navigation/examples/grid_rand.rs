use gridpath_navigation::{GridIndex, NavigationError, Pathfinder, PathfinderConfig, WorldPoint};
use rand::Rng;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 20x20 grid of 0.1 unit cells centered on (1, 1)
    let config = PathfinderConfig::new(20, 20)
        .with_cell_size(0.1)
        .with_origin(WorldPoint::new(1.0, 1.0));
    let mut pathfinder = Pathfinder::new(&config)?;

    let mut rng = rand::rng();
    let num_obstacles = 25;
    let max_obstacle_size = 3;

    println!("Generating {} random obstacles...", num_obstacles);
    for _ in 0..num_obstacles {
        let column = rng.random_range(0..20);
        let row = rng.random_range(0..20);
        let width = rng.random_range(1..=max_obstacle_size);
        let height = rng.random_range(1..=max_obstacle_size);

        // Cells past the edge are ignored by the grid
        for c in column..column + width {
            for r in row..row + height {
                pathfinder.set_walkable_at(GridIndex::new(c, r), false);
            }
        }
    }
    print!("{}", pathfinder.grid());

    // Demonstrate world coordinate conversion
    let grid = pathfinder.grid();
    let world_pos = WorldPoint::new(0.55, 1.23);
    let index = grid.world_to_grid(&world_pos);
    let back = grid.grid_to_world(index.column, index.row);
    println!(
        "\nWorld position ({:.2}, {:.2}) maps to cell {}, whose center is ({:.2}, {:.2})",
        world_pos.x, world_pos.y, index, back.x, back.y
    );

    let half_width = grid.columns() as f32 * grid.cell_size() * 0.5;
    let half_height = grid.rows() as f32 * grid.cell_size() * 0.5;
    println!("\nGrid bounds:");
    println!(
        "Min world coordinates: ({:.2}, {:.2})",
        grid.origin().x - half_width,
        grid.origin().y - half_height
    );
    println!(
        "Max world coordinates: ({:.2}, {:.2})",
        grid.origin().x + half_width,
        grid.origin().y + half_height
    );

    let start = GridIndex::new(0, 0);
    let goal = GridIndex::new(19, 19);
    pathfinder.set_walkable_at(start, true);
    pathfinder.set_walkable_at(goal, true);

    match pathfinder.find_path_between(start, goal) {
        Ok(result) => {
            println!("\n{}", result);
            print!("{}", pathfinder.grid().render_path(&result.cells));
        }
        Err(NavigationError::NoPathFound { nodes_explored }) => {
            println!("\nObstacles cut the grid in two ({} cells explored).", nodes_explored);
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
