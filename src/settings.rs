use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat, builder::DefaultState};
use gridpath_navigation::{GridIndex, PathfinderConfig, WorldPoint};
use serde::Deserialize;
use tracing::{error, info};

pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";
const ENV_PREFIX: &str = "GRIDPATH";

/// Everything the demo binary reads from its configuration file.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub grid: PathfinderConfig,
    pub scenario: ScenarioConfig,
}

/// Obstacles and endpoints of the search to run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    pub obstacles: Vec<[i32; 2]>,
    pub start: [f32; 2],
    pub target: [f32; 2],
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            obstacles: Vec::new(),
            start: [0.0, 0.0],
            target: [0.0, 0.0],
        }
    }
}

impl ScenarioConfig {
    pub fn obstacle_cells(&self) -> impl Iterator<Item = GridIndex> + '_ {
        self.obstacles.iter().copied().map(GridIndex::from)
    }

    pub fn start_point(&self) -> WorldPoint {
        WorldPoint::new(self.start[0], self.start[1])
    }

    pub fn target_point(&self) -> WorldPoint {
        WorldPoint::new(self.target[0], self.target[1])
    }
}

/// Loads `path` as TOML, then applies `GRIDPATH__SECTION__KEY` environment overrides.
pub fn load_config(path: &str) -> Result<AppConfig, ConfigError> {
    info!("Attempting to load configuration from {}", path);

    let builder = Config::builder().add_source(File::new(path, FileFormat::Toml).required(true));

    match finish(builder) {
        Ok(config) => {
            info!("Successfully loaded configuration: {:?}", config);
            Ok(config)
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            Err(e)
        }
    }
}

fn finish(builder: ConfigBuilder<DefaultState>) -> Result<AppConfig, ConfigError> {
    builder
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_toml(source: &str) -> Result<AppConfig, ConfigError> {
        finish(Config::builder().add_source(File::from_str(source, FileFormat::Toml)))
    }

    #[test]
    fn test_full_config() {
        let config = from_toml(
            r#"
            [grid]
            columns = 6
            rows = 4
            cell_size = 0.25
            origin = [1.0, -1.0]
            diagonal_movement = false

            [scenario]
            obstacles = [[1, 2], [3, 0]]
            start = [0.5, 0.5]
            target = [1.5, -1.25]
            "#,
        )
        .unwrap();

        assert_eq!(config.grid.columns, 6);
        assert_eq!(config.grid.rows, 4);
        assert_eq!(config.grid.cell_size, 0.25);
        assert_eq!(config.grid.origin, WorldPoint::new(1.0, -1.0));
        assert!(!config.grid.diagonal_movement);

        let cells: Vec<GridIndex> = config.scenario.obstacle_cells().collect();
        assert_eq!(cells, vec![GridIndex::new(1, 2), GridIndex::new(3, 0)]);
        assert_eq!(config.scenario.start_point(), WorldPoint::new(0.5, 0.5));
        assert_eq!(config.scenario.target_point(), WorldPoint::new(1.5, -1.25));
    }

    #[test]
    fn test_missing_keys_fall_back_to_defaults() {
        let config = from_toml("[grid]\ncolumns = 3\n").unwrap();
        assert_eq!(config.grid.columns, 3);
        assert_eq!(config.grid.rows, PathfinderConfig::default().rows);
        assert!(config.grid.diagonal_movement);
        assert_eq!(config.scenario, ScenarioConfig::default());
    }

    #[test]
    fn test_bundled_default_parses() {
        let source = include_str!("../config/default.toml");
        let config = from_toml(source).unwrap();
        assert!(config.grid.validate().is_ok());
        assert!(!config.scenario.obstacles.is_empty());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(load_config("config/does-not-exist.toml").is_err());
    }
}
