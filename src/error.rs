//! Error types for the physics core and configuration loading

use crate::components::BodyId;
use crate::physics::math::Scalar;
use std::fmt;

/// Contract violations raised by the physics core
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// A body would be created with, or merged into, a non-positive or non-finite mass
    InvalidMass { mass: Scalar },
    /// A merge plan referenced a body that is not in the collection it was applied to
    CollectionMutationHazard { index: usize, len: usize },
    /// A tick produced a non-finite position or velocity
    NonFiniteState { id: BodyId },
    /// A scenario needs more than one grid point but the world is a single point
    DegenerateBounds { width: u32, height: u32 },
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::InvalidMass { mass } => {
                write!(f, "Invalid body mass {mass}: mass must be positive and finite")
            }
            SimulationError::CollectionMutationHazard { index, len } => write!(
                f,
                "Merge plan references body index {index} but the collection holds {len} bodies"
            ),
            SimulationError::NonFiniteState { id } => {
                write!(f, "Body {} reached a non-finite position or velocity", id.0)
            }
            SimulationError::DegenerateBounds { width, height } => write!(
                f,
                "World of {width}x{height} has no room for orbiters around its centre"
            ),
        }
    }
}

impl std::error::Error for SimulationError {}

/// Configuration load and save failures
#[derive(Debug)]
pub enum ConfigError {
    /// Configuration file could not be read or written
    Io(std::io::Error),
    /// Configuration file is not valid TOML for `SimulationConfig`
    Parse(toml::de::Error),
    /// Configuration could not be rendered as TOML
    Serialize(toml::ser::Error),
    /// Layered sources (user file, environment) could not be merged
    Source(config::ConfigError),
    /// No home directory could be determined for the user configuration
    NoConfigDirectory,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "Failed to access configuration file: {e}"),
            ConfigError::Parse(e) => write!(f, "Failed to parse configuration: {e}"),
            ConfigError::Serialize(e) => write!(f, "Failed to serialize configuration: {e}"),
            ConfigError::Source(e) => write!(f, "Failed to merge configuration sources: {e}"),
            ConfigError::NoConfigDirectory => {
                write!(f, "Could not determine the user configuration directory")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Serialize(e) => Some(e),
            ConfigError::Source(e) => Some(e),
            ConfigError::NoConfigDirectory => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(e: toml::ser::Error) -> Self {
        ConfigError::Serialize(e)
    }
}

impl From<config::ConfigError> for ConfigError {
    fn from(e: config::ConfigError) -> Self {
        ConfigError::Source(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_mass_message() {
        let err = SimulationError::InvalidMass { mass: -1.0 };
        assert_eq!(
            err.to_string(),
            "Invalid body mass -1: mass must be positive and finite"
        );
    }

    #[test]
    fn test_non_finite_state_message() {
        let err = SimulationError::NonFiniteState { id: BodyId(3) };
        assert!(err.to_string().contains("Body 3"));
    }

    #[test]
    fn test_degenerate_bounds_message() {
        let err = SimulationError::DegenerateBounds {
            width: 0,
            height: 0,
        };
        assert!(err.to_string().contains("0x0"));
    }

    #[test]
    fn test_config_error_source_chain() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = ConfigError::from(io);
        assert!(std::error::Error::source(&err).is_some());
        assert!(std::error::Error::source(&ConfigError::NoConfigDirectory).is_none());
    }
}
