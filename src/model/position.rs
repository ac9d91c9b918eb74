use serde::Deserialize;

/// The position of a feature of interest as entered in the wizard.
///
/// A non-empty `group` wins over `coordinates`.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Position {
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
}

/// Explicit coordinates of a position.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
pub struct Coordinates {
    pub epsg_code: u32,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
}

impl Position {
    pub fn from_group(group: &str) -> Self {
        Self {
            group: Some(group.into()),
            coordinates: None,
        }
    }

    pub fn from_coordinates(coordinates: Coordinates) -> Self {
        Self {
            group: None,
            coordinates: Some(coordinates),
        }
    }

    /// The group identifier, if it is set and not empty.
    pub fn group_reference(&self) -> Option<&str> {
        self.group.as_deref().filter(|group| !group.is_empty())
    }
}
