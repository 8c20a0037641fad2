use gridpath_navigation::{Pathfinder, PathfinderConfig, WorldPoint};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG=gridpath_navigation=trace shows every expanded cell
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    println!("A* Pathfinding with Detailed Results Example");
    println!("============================================");

    // 8x8 grid of 0.5 unit cells; the grid spans [-2, 2) on both axes
    let config = PathfinderConfig::new(8, 8).with_cell_size(0.5);
    let mut pathfinder = Pathfinder::new(&config)?;

    // A wall with a single gap at the top
    println!("\nSetting up obstacles...");
    for row in 0..7 {
        let wall = pathfinder.grid().grid_to_world(3, row);
        pathfinder.set_walkable(wall, false);
    }

    print!("\n{}", pathfinder.grid());

    let start = WorldPoint::new(-1.8, -1.8);
    let goal = WorldPoint::new(1.8, -1.8);
    println!("\nStart: ({:.2}, {:.2})", start.x, start.y);
    println!("Goal: ({:.2}, {:.2})", goal.x, goal.y);

    println!("\nPerforming A* pathfinding...");
    let result = pathfinder.find_path_detailed(start, goal)?;
    println!("\n{}", result);

    println!("\nPath waypoints:");
    for (i, (cell, point)) in result.cells.iter().zip(&result.waypoints).enumerate() {
        println!("  {}: cell {} at ({:.2}, {:.2})", i, cell, point.x, point.y);
    }

    println!("\nPath visualization:");
    print!("{}", pathfinder.grid().render_path(&result.cells));

    // Searches against an endpoint off the grid are rejected, not attempted
    let off_grid = WorldPoint::new(5.0, 5.0);
    if let Err(e) = pathfinder.find_path(start, off_grid) {
        println!("\nOff-grid goal: {}", e);
    }

    #[cfg(feature = "serde")]
    {
        println!("\nSerialization example:");
        let json = serde_json::to_string_pretty(&result)?;
        println!("PathResult as JSON:");
        println!("{}", json);
    }

    Ok(())
}
