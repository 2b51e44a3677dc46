use serde::Deserialize;
use std::fmt;
use std::fmt::Formatter;

pub const MAX_CITY_NAME_LEN: usize = 20;

/// Destination name, silently truncated to [`MAX_CITY_NAME_LEN`] characters.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub struct City(String);

impl City {
    pub fn new(name: &str) -> City {
        City(name.chars().take(MAX_CITY_NAME_LEN).collect())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.0.clear();
    }
}

impl From<String> for City {
    fn from(name: String) -> Self {
        if name.chars().count() <= MAX_CITY_NAME_LEN {
            City(name)
        } else {
            City::new(&name)
        }
    }
}

impl From<&str> for City {
    fn from(name: &str) -> Self {
        City::new(name)
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncates_long_names() {
        let city = City::new("Llanfairpwllgwyngyllgogerychwyrndrobwll");
        assert_eq!(city.as_str(), "Llanfairpwllgwyngyll");
        assert_eq!(city.as_str().chars().count(), MAX_CITY_NAME_LEN);
    }

    #[test]
    fn test_truncation_counts_characters() {
        let city = City::new("Zürich-Zürich-Zürich-Zürich");
        assert_eq!(city.as_str(), "Zürich-Zürich-Zürich");
    }

    #[test]
    fn test_short_names_unchanged() {
        assert_eq!(City::new("Toronto"), City::from("Toronto".to_string()));
        assert!(City::default().is_empty());
    }

    #[test]
    fn test_deserialize_truncates() {
        let city: City = serde_json::from_str("\"Aaaaaaaaaaaaaaaaaaaaaaaaaaaaaa\"").unwrap();
        assert_eq!(city.as_str().len(), MAX_CITY_NAME_LEN);
    }
}
