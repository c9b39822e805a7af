//! Countries with postal-code snapshots.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Countries a snapshot can be loaded for.
///
/// The tag doubles as the snapshot file prefix, so adding a country here
/// is all it takes to wire a new dataset in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Country {
    Germany,
    Austria,
    Switzerland,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown country '{0}'")]
pub struct UnknownCountry(pub String);

impl Country {
    /// ISO 3166-1 alpha-2 code
    pub fn alpha2(&self) -> &'static str {
        match self {
            Country::Germany => "de",
            Country::Austria => "at",
            Country::Switzerland => "ch",
        }
    }

    /// Lowercase name used in snapshot file names
    pub fn slug(&self) -> &'static str {
        match self {
            Country::Germany => "germany",
            Country::Austria => "austria",
            Country::Switzerland => "switzerland",
        }
    }
}

impl std::fmt::Display for Country {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

impl std::str::FromStr for Country {
    type Err = UnknownCountry;

    /// Accepts the slug or the alpha-2 code, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "germany" | "de" => Ok(Country::Germany),
            "austria" | "at" => Ok(Country::Austria),
            "switzerland" | "ch" => Ok(Country::Switzerland),
            _ => Err(UnknownCountry(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_slug_and_alpha2() {
        assert_eq!("germany".parse::<Country>().unwrap(), Country::Germany);
        assert_eq!("DE".parse::<Country>().unwrap(), Country::Germany);
        assert_eq!("Switzerland".parse::<Country>().unwrap(), Country::Switzerland);
        assert_eq!("at".parse::<Country>().unwrap(), Country::Austria);
    }

    #[test]
    fn test_parse_unknown() {
        let err = "atlantis".parse::<Country>().unwrap_err();
        assert_eq!(err, UnknownCountry("atlantis".to_string()));
    }

    #[test]
    fn test_display_matches_slug() {
        assert_eq!(Country::Germany.to_string(), "germany");
        assert_eq!(Country::Austria.alpha2(), "at");
    }
}
