use crate::data_io::{CachePolicyKind, GridCache, DEFAULT_CACHE_EXTENSION};
use crate::math::BoundaryPolicy;
use clap::ArgMatches;
use std::path::PathBuf;

/// Fixed physical and storage constants
#[derive(Clone, Debug)]
pub struct Constants {
    /// Speed of sound in air (m/s)
    pub speed_of_sound: f64,
    /// Reciprocal of `speed_of_sound` (s/m), handed to the wind-resistance model
    pub inverse_speed_of_sound: f64,
    /// Extension appended to a source path to locate its cache artifact
    pub cache_extension: String,
}

impl Default for Constants {
    fn default() -> Self {
        let speed_of_sound = 343.0;
        Self {
            speed_of_sound,
            inverse_speed_of_sound: 1.0 / speed_of_sound,
            cache_extension: DEFAULT_CACHE_EXTENSION.to_string(),
        }
    }
}

/// Weather subsystem configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub constants: Constants,
    /// Weather CSV files, one grid each
    pub inputs: Vec<PathBuf>,
    /// Stations per time block in every input file
    pub station_count: usize,
    /// Whether grids are read from and written to cache artifacts
    pub use_cache: bool,
    pub cache_policy: CachePolicyKind,
    /// Behaviour for queries outside a grid's sampled range
    pub boundary: BoundaryPolicy,
    /// Threads used to build grids; 1 builds sequentially
    pub num_threads: usize,
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            constants: Constants::default(),
            inputs: Vec::new(),
            station_count: 1,
            use_cache: true,
            cache_policy: CachePolicyKind::default(),
            boundary: BoundaryPolicy::default(),
            num_threads: 1,
            verbose: false,
        }
    }
}

impl Config {
    /// Build a configuration from parsed command line arguments.
    ///
    /// Expects the arguments registered by the `solar_weather` binary:
    /// `input`, `stations`, `cache-policy`, `boundary`, `threads`,
    /// `no-cache` and `verbose`.
    pub fn from_matches(matches: &ArgMatches) -> Result<Self, String> {
        let inputs: Vec<PathBuf> = matches
            .get_many::<String>("input")
            .ok_or("At least one input file is required")?
            .map(PathBuf::from)
            .collect();

        let station_count = *matches
            .get_one::<usize>("stations")
            .ok_or("Station count is required")?;

        let cache_policy = matches
            .get_one::<String>("cache-policy")
            .map(|s| s.parse::<CachePolicyKind>())
            .transpose()?
            .unwrap_or_default();

        let boundary = matches
            .get_one::<String>("boundary")
            .map(|s| s.parse::<BoundaryPolicy>())
            .transpose()?
            .unwrap_or_default();

        let num_threads = matches.get_one::<usize>("threads").copied().unwrap_or(1);

        let config = Self {
            constants: Constants::default(),
            inputs,
            station_count,
            use_cache: !matches.get_flag("no-cache"),
            cache_policy,
            boundary,
            num_threads,
            verbose: matches.get_flag("verbose"),
        };

        config.validate()?;

        Ok(config)
    }

    /// Cache configured with this config's policy and extension
    pub fn grid_cache(&self) -> GridCache {
        GridCache::with_policy(self.cache_policy.into_policy())
            .with_extension(self.constants.cache_extension.clone())
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<(), String> {
        if self.station_count == 0 {
            return Err("Station count must be positive".to_string());
        }
        if self.num_threads == 0 {
            return Err("Thread count must be positive".to_string());
        }
        if self.inputs.is_empty() {
            return Err("At least one input file is required".to_string());
        }
        for input in &self.inputs {
            if !input.exists() {
                return Err(format!("Input file does not exist: {}", input.display()));
            }
            if !input.is_file() {
                return Err(format!("Input path is not a file: {}", input.display()));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(inputs: Vec<PathBuf>) -> Config {
        Config {
            inputs,
            station_count: 3,
            ..Config::default()
        }
    }

    #[test]
    fn test_inverse_speed_of_sound() {
        let constants = Constants::default();
        assert!((constants.inverse_speed_of_sound * constants.speed_of_sound - 1.0).abs() < 1e-15);
    }

    #[test]
    fn test_validation_success_with_file() {
        // Cargo.toml always exists at the package root during tests
        let config = config_with(vec![PathBuf::from("Cargo.toml")]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_failure_with_directory() {
        let config = config_with(vec![PathBuf::from("src")]);
        assert!(config.validate().unwrap_err().contains("not a file"));
    }

    #[test]
    fn test_validation_nonexistent_path() {
        let config = config_with(vec![PathBuf::from("nonexistent_weather_12345.csv")]);
        assert!(config.validate().unwrap_err().contains("does not exist"));
    }

    #[test]
    fn test_validation_zero_stations() {
        let config = Config {
            station_count: 0,
            ..config_with(vec![PathBuf::from("Cargo.toml")])
        };
        assert!(config.validate().unwrap_err().contains("Station count"));
    }

    #[test]
    fn test_grid_cache_uses_configured_extension() {
        let mut config = Config::default();
        config.constants.cache_extension = "grid".to_string();
        assert_eq!(
            config.grid_cache().cache_path("w.csv"),
            PathBuf::from("w.csv.grid")
        );
    }
}
