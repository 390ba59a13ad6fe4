use serde::Deserialize;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::fence::SeedPolicy;
use crate::geometry::Point;
use crate::location::DEFAULT_DISTANCE_FILTER_M;

/// Span shown around a known user location
pub const LOCATED_DELTA: f64 = 0.01;

/// Visible map region: center plus lat/lon extent in degrees
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Region {
    pub lat: f64,
    pub lon: f64,
    #[serde(default = "default_lat_delta")]
    pub lat_delta: f64,
    #[serde(default = "default_lon_delta")]
    pub lon_delta: f64,
}

impl Region {
    /// Tight region around a located position
    pub fn around(p: Point) -> Self {
        Self {
            lat: p.lat,
            lon: p.lon,
            lat_delta: LOCATED_DELTA,
            lon_delta: LOCATED_DELTA,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.lat, self.lon)
    }
}

impl Default for Region {
    fn default() -> Self {
        Self {
            lat: 37.78825,
            lon: -122.4324,
            lat_delta: default_lat_delta(),
            lon_delta: default_lon_delta(),
        }
    }
}

fn default_lat_delta() -> f64 {
    0.0922
}
fn default_lon_delta() -> f64 {
    0.0421
}
fn default_distance_filter() -> f64 {
    DEFAULT_DISTANCE_FILTER_M
}
fn default_high_accuracy() -> bool {
    true
}
fn default_verbose() -> bool {
    false
}

#[derive(Debug, Deserialize)]
pub struct FileConfig {
    #[serde(default = "default_distance_filter")]
    pub distance_filter_m: f64,
    /// Informational: requested sensor mode, echoed in the verbose summary.
    /// Replayed samples carry their own precision, so nothing filters on it.
    #[serde(default = "default_high_accuracy")]
    pub high_accuracy: bool,
    #[serde(default)]
    pub seed: SeedPolicy,
    #[serde(default = "default_verbose")]
    pub verbose: bool,
    #[serde(default)]
    pub default_region: Region,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            distance_filter_m: default_distance_filter(),
            high_accuracy: default_high_accuracy(),
            seed: SeedPolicy::default(),
            verbose: default_verbose(),
            default_region: Region::default(),
        }
    }
}

impl FileConfig {
    /// Load from the first config file found in the standard locations
    pub fn load() -> Option<Self> {
        for path in get_config_paths() {
            if path.exists()
                && let Ok(contents) = std::fs::read_to_string(&path)
            {
                match toml::from_str(&contents) {
                    Ok(config) => return Some(config),
                    Err(e) => {
                        eprintln!("Warning: Failed to parse config file {:?}: {}", path, e);
                    }
                }
            }
        }
        None
    }

    /// Load an explicitly requested config file; any failure is an error
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&contents).context("Failed to parse config file")
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("fencewatch.toml"));
    paths.push(PathBuf::from(".fencewatch.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("fencewatch").join("config.toml"));
        paths.push(config_dir.join("fencewatch.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".fencewatch.toml"));
        paths.push(home.join(".config").join("fencewatch").join("config.toml"));
    }

    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert_eq!(config.distance_filter_m, 10.0);
        assert!(config.high_accuracy);
        assert_eq!(config.seed, SeedPolicy::Unknown);
        assert!(!config.verbose);
        assert_eq!(config.default_region, Region::default());
    }

    #[test]
    fn test_full_file() {
        let config: FileConfig = toml::from_str(
            r#"
distance_filter_m = 25.0
high_accuracy = false
seed = "outside"
verbose = true

[default_region]
lat = 51.5
lon = -0.12
"#,
        )
        .unwrap();

        assert_eq!(config.distance_filter_m, 25.0);
        assert!(!config.high_accuracy);
        assert_eq!(config.seed, SeedPolicy::Outside);
        assert!(config.verbose);
        assert_eq!(config.default_region.lat, 51.5);
        assert_eq!(config.default_region.lat_delta, 0.0922);
    }

    #[test]
    fn test_from_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("fencewatch.toml");
        std::fs::write(&path, "distance_filter_m = 5.0\n").unwrap();

        let config = FileConfig::from_path(&path).unwrap();
        assert_eq!(config.distance_filter_m, 5.0);
    }

    #[test]
    fn test_from_path_bad_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "seed = \"sometimes\"\n").unwrap();

        assert!(FileConfig::from_path(&path).is_err());
    }

    #[test]
    fn test_region_around_location() {
        let r = Region::around(Point::new(1.0, 2.0));
        assert_eq!(r.center(), Point::new(1.0, 2.0));
        assert_eq!(r.lat_delta, 0.01);
        assert_eq!(r.lon_delta, 0.01);
    }

    #[test]
    fn test_config_paths_start_local() {
        let paths = get_config_paths();
        assert_eq!(paths[0], PathBuf::from("fencewatch.toml"));
    }
}
