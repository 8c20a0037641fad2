mod settings;

use anyhow::Context;
use gridpath_navigation::{NavigationError, Pathfinder};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| settings::DEFAULT_CONFIG_PATH.to_string());
    let config = settings::load_config(&path)
        .with_context(|| format!("failed to load configuration from {path}"))?;

    let mut pathfinder =
        Pathfinder::new(&config.grid).context("invalid grid configuration")?;

    for cell in config.scenario.obstacle_cells() {
        if !pathfinder.set_walkable_at(cell, false) {
            warn!("Obstacle {} lies outside the grid, skipping", cell);
        }
    }

    let start = config.scenario.start_point();
    let target = config.scenario.target_point();
    info!(
        "Searching from ({:.2}, {:.2}) to ({:.2}, {:.2})",
        start.x, start.y, target.x, target.y
    );

    print!("{}", pathfinder.grid());

    match pathfinder.find_path_detailed(start, target) {
        Ok(result) => {
            println!("\n{}", result);
            for point in &result.waypoints {
                println!("  ({:.2}, {:.2})", point.x, point.y);
            }
            println!();
            print!("{}", pathfinder.grid().render_path(&result.cells));
        }
        Err(NavigationError::NoPathFound { nodes_explored }) => {
            warn!("Target unreachable after exploring {} cells", nodes_explored);
            println!("\nNo path between the configured endpoints.");
        }
        Err(e) => {
            error!("Search rejected: {}", e);
            return Err(e).context("search could not be started");
        }
    }

    Ok(())
}
