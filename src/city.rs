use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Source system whose raw trip layout a file follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum City {
    #[serde(rename = "NYC")]
    Nyc,
    Chicago,
    Washington,
}

impl City {
    pub const ALL: [City; 3] = [City::Nyc, City::Chicago, City::Washington];

    pub fn name(&self) -> &'static str {
        match self {
            City::Nyc => "NYC",
            City::Chicago => "Chicago",
            City::Washington => "Washington",
        }
    }

    /// Infers the city from a data file name such as `NYC-CitiBike-2016.csv`,
    /// using the text before the first `-`.
    pub fn from_path(path: &Path) -> Option<City> {
        let file_name = path.file_name()?.to_str()?;
        let prefix = file_name.split('-').next()?;
        prefix.parse().ok()
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for City {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nyc" => Ok(City::Nyc),
            "chicago" => Ok(City::Chicago),
            "washington" => Ok(City::Washington),
            _ => Err(format!(
                "unknown city {s:?}, expected one of NYC, Chicago, Washington"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("NYC".parse::<City>().unwrap(), City::Nyc);
        assert_eq!("nyc".parse::<City>().unwrap(), City::Nyc);
        assert_eq!("CHICAGO".parse::<City>().unwrap(), City::Chicago);
        assert_eq!("Washington".parse::<City>().unwrap(), City::Washington);
        assert!("Boston".parse::<City>().is_err());
    }

    #[test]
    fn test_from_path_uses_file_name_prefix() {
        assert_eq!(
            City::from_path(Path::new("./data/NYC-CitiBike-2016.csv")),
            Some(City::Nyc)
        );
        assert_eq!(
            City::from_path(Path::new("data/Washington-CapitalBikeshare-2016.csv")),
            Some(City::Washington)
        );
        assert_eq!(
            City::from_path(Path::new("Chicago-2016-Summary.csv")),
            Some(City::Chicago)
        );
        assert_eq!(City::from_path(Path::new("trips.csv")), None);
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&City::ALL).unwrap();
        assert_eq!(json, r#"["NYC","Chicago","Washington"]"#);
        let city: City = serde_json::from_str(r#""Washington""#).unwrap();
        assert_eq!(city, City::Washington);
    }
}
