use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::AssemblyError;

/// The kinds of resources a measured value column relates to.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "String")]
pub enum Category {
    FeatureOfInterest,
    ObservedProperty,
    UnitOfMeasurement,
    Sensor,
}

impl Category {
    /// All categories in the order the wizard resolves them.
    pub const RESOLUTION_ORDER: [Category; 4] = [
        Category::FeatureOfInterest,
        Category::ObservedProperty,
        Category::UnitOfMeasurement,
        Category::Sensor,
    ];

    /// The category that is resolved after this one.
    pub fn next(self) -> Option<Category> {
        match self {
            Category::FeatureOfInterest => Some(Category::ObservedProperty),
            Category::ObservedProperty => Some(Category::UnitOfMeasurement),
            Category::UnitOfMeasurement => Some(Category::Sensor),
            Category::Sensor => None,
        }
    }

    /// Only features of interest carry a position.
    pub fn is_spatial(self) -> bool {
        self == Category::FeatureOfInterest
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Category::FeatureOfInterest => "Feature of Interest",
            Category::ObservedProperty => "Observed Property",
            Category::UnitOfMeasurement => "Unit of Measurement",
            Category::Sensor => "Sensor",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Category {
    type Err = AssemblyError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "FeatureOfInterest" | "foi" => Ok(Category::FeatureOfInterest),
            "ObservedProperty" | "obsprop" => Ok(Category::ObservedProperty),
            "UnitOfMeasurement" | "uom" => Ok(Category::UnitOfMeasurement),
            "Sensor" | "sensor" => Ok(Category::Sensor),
            _ => Err(AssemblyError::UnknownCategory { name: name.into() }),
        }
    }
}

impl TryFrom<String> for Category {
    type Error = AssemblyError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        name.parse()
    }
}
