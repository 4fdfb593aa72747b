use crate::error::ConfigError;
use crate::physics::math::Scalar;
use crate::scenarios::{ScenarioKind, ScenarioParams};
use bevy::log::{info, warn};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Prefix for environment overrides, e.g. `GRAVITAS_PHYSICS__TIME_STEP=0.5`
pub const ENV_PREFIX: &str = "GRAVITAS";

const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(default)]
pub struct SimulationConfig {
    pub physics: PhysicsConfig,
    pub bounds: BoundsConfig,
    pub scenario: ScenarioConfig,
    pub spawn: SpawnConfig,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct PhysicsConfig {
    pub gravitational_constant: Scalar,
    pub time_step: Scalar,
    pub merge_distance_factor: Scalar,
    pub trail_update_interval: u64,
    pub boundary_reflection: bool,
    pub initial_seed: Option<u64>,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravitational_constant: 0.001,
            time_step: 1.0,
            merge_distance_factor: 0.8,
            trail_update_interval: 4,
            boundary_reflection: false,
            initial_seed: None,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct BoundsConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for BoundsConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 800,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ScenarioConfig {
    pub kind: ScenarioKind,
    pub particle_count: usize,
    pub planet_count: usize,
    pub orbiter_count: usize,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            kind: ScenarioKind::RandomScatter,
            particle_count: 50,
            planet_count: 5,
            orbiter_count: 100,
        }
    }
}

/// How user-drawn slingshots turn into bodies
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct SpawnConfig {
    /// Velocity per unit of drag length
    pub velocity_scale: Scalar,
    /// Mass is the hold duration raised to this power
    pub mass_exponent: Scalar,
    pub trail_capacity: usize,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            velocity_scale: 0.02,
            mass_exponent: 3.0,
            trail_capacity: 20,
        }
    }
}

impl SimulationConfig {
    /// Load configuration from a file, falling back to defaults if the file doesn't exist
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    warn!(
                        "Failed to parse config file {}: {}. Using defaults.",
                        path.display(),
                        e
                    );
                    Self::default()
                }
            },
            Err(_) => {
                info!("Config file {} not found. Using defaults.", path.display());
                Self::default()
            }
        }
    }

    /// Load configuration from a file, failing on a missing or malformed file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Location of the per-user configuration file, if the platform has one
    pub fn user_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "gravitas").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Load defaults, overlaid by the user configuration file and then by
    /// `GRAVITAS_*` environment variables
    pub fn load_from_user_config() -> Self {
        let path = Self::user_config_path();
        if path.is_none() {
            warn!("Could not determine the user configuration directory");
        }

        match Self::load_layered(path.as_deref()) {
            Ok(config) => {
                if let Some(path) = path.filter(|p| p.exists()) {
                    info!("Loaded configuration from {}", path.display());
                }
                config
            }
            Err(e) => {
                warn!("{}. Using defaults.", e);
                Self::default()
            }
        }
    }

    /// Layers an optional TOML file and the environment over the defaults
    pub fn load_layered(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(
                config::File::from(path)
                    .format(config::FileFormat::Toml)
                    .required(false),
            );
        }

        let layered = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(layered.try_deserialize()?)
    }

    /// Save configuration to a file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    /// Save configuration to the per-user location
    pub fn save_to_user_config(&self) -> Result<PathBuf, ConfigError> {
        let path = Self::user_config_path().ok_or(ConfigError::NoConfigDirectory)?;
        self.save(&path)?;
        Ok(path)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn scenario_params(&self) -> ScenarioParams {
        ScenarioParams {
            kind: self.scenario.kind,
            width: self.bounds.width,
            height: self.bounds.height,
            gravitational_constant: self.physics.gravitational_constant,
            particle_count: self.scenario.particle_count,
            planet_count: self.scenario.planet_count,
            orbiter_count: self.scenario.orbiter_count,
        }
    }
}
