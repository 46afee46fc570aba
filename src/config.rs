use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::city::City;
use crate::error::Result;

/// One city's raw trip file and where its condensed form lives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub city: City,
    pub raw: PathBuf,
    pub condensed: PathBuf,
}

/// The set of datasets the batch commands work on.
///
/// Stored as a JSON file:
/// ```json
/// {
///   "datasets": [
///     { "city": "NYC", "raw": "data/NYC-CitiBike-2016.csv", "condensed": "data/NYC-2016-Summary.csv" }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetConfig {
    datasets: Vec<Dataset>,
}

impl DatasetConfig {
    /// Loads the config from a JSON file at `path`.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Loads `path` if given, otherwise the 2016 files under `./data/`.
    pub fn load_or_default(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn get(&self, city: City) -> Option<&Dataset> {
        self.datasets.iter().find(|d| d.city == city)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Dataset> {
        self.datasets.iter()
    }
}

impl Default for DatasetConfig {
    fn default() -> Self {
        let dataset = |city, raw: &str, condensed: &str| Dataset {
            city,
            raw: PathBuf::from(raw),
            condensed: PathBuf::from(condensed),
        };

        DatasetConfig {
            datasets: vec![
                dataset(
                    City::Nyc,
                    "./data/NYC-CitiBike-2016.csv",
                    "./data/NYC-2016-Summary.csv",
                ),
                dataset(
                    City::Chicago,
                    "./data/Chicago-Divvy-2016.csv",
                    "./data/Chicago-2016-Summary.csv",
                ),
                dataset(
                    City::Washington,
                    "./data/Washington-CapitalBikeshare-2016.csv",
                    "./data/Washington-2016-Summary.csv",
                ),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    #[test]
    fn test_default_covers_every_city() {
        let config = DatasetConfig::default();
        for city in City::ALL {
            assert!(config.get(city).is_some());
        }
        assert_eq!(
            config.get(City::Chicago).unwrap().raw,
            PathBuf::from("./data/Chicago-Divvy-2016.csv")
        );
    }

    #[test]
    fn test_load_from_json_file() {
        let path = format!("{}/bike_share_stats_test_config.json", env::temp_dir().display());
        fs::write(
            &path,
            r#"{"datasets":[{"city":"Washington","raw":"w.csv","condensed":"w-summary.csv"}]}"#,
        )
        .unwrap();

        let config = DatasetConfig::load_or_default(Some(path.as_str())).unwrap();
        assert_eq!(config.iter().count(), 1);
        assert_eq!(
            config.get(City::Washington).unwrap().condensed,
            PathBuf::from("w-summary.csv")
        );
        assert!(config.get(City::Nyc).is_none());

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_missing_file_fails() {
        assert!(DatasetConfig::load("/definitely/not/here.json").is_err());
    }
}
