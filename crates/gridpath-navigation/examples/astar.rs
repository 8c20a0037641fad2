use anyhow::Context;
use gridpath_navigation::{GridIndex, Pathfinder, PathfinderConfig};

fn main() -> anyhow::Result<()> {
    // 10x10 grid, 1 world unit per cell, centered on the world origin
    let mut pathfinder =
        Pathfinder::new(&PathfinderConfig::new(10, 10)).context("failed to build the pathfinder")?;

    let obstacles = vec![
        (1, 1), (2, 1), (7, 1), (8, 1),
        (4, 2),
        (2, 3), (3, 3), (4, 3), (5, 3), (7, 3),
        (5, 4), (7, 4),
        (1, 5), (2, 5), (3, 5), (5, 5), (7, 5), (8, 5),
        (3, 6),
        (1, 7), (3, 7), (5, 7), (6, 7), (7, 7),
        (1, 8), (8, 8),
        (3, 9), (4, 9), (5, 9),
    ];
    for (column, row) in obstacles {
        pathfinder.set_walkable_at(GridIndex::new(column, row), false);
    }

    let start = GridIndex::new(0, 0);
    let goal = GridIndex::new(9, 9);

    println!("{}", pathfinder.grid());
    println!("Start: {}", start);
    println!("Goal: {}", goal);

    match pathfinder.find_path_between(start, goal) {
        Ok(result) => {
            println!("\nPath found with {} waypoints!", result.len());
            println!("\nGrid with path:");
            print!("{}", pathfinder.grid().render_path(&result.cells));
        }
        Err(e) => println!("\n{}", e),
    }

    Ok(())
}
