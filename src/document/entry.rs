use log::debug;

use crate::error::AssemblyError;
use crate::model::{Category, Position, Resource, ResourceKind};

/// A resource as it is recorded in the export document.
#[derive(Clone, Debug, PartialEq)]
pub struct ResourceEntry {
    pub category: Category,
    pub payload: ResourcePayload,
    /// Only set for features of interest.
    pub position: Option<PositionEntry>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ResourcePayload {
    Manual(ManualPayload),
    Generated(GeneratedPayload),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ManualPayload {
    pub id: String,
    pub name: String,
    pub uri: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GeneratedPayload {
    pub id: String,
    pub use_as_prefix: bool,
    /// Only present when `use_as_prefix` is set.
    pub uri_prefix: Option<String>,
    pub concat_string: String,
    pub numbers: Vec<usize>,
}

/// Either a reference to a shared position group or explicit coordinates.
#[derive(Clone, Debug, PartialEq)]
pub enum PositionEntry {
    Group(String),
    Explicit {
        epsg_code: u32,
        altitude: f64,
        latitude: f64,
        longitude: f64,
    },
}

impl ResourceEntry {
    pub fn from_resource(resource: &Resource) -> Self {
        Self {
            category: resource.category,
            payload: ResourcePayload::from_resource(resource),
            position: None,
        }
    }

    pub fn id(&self) -> &str {
        self.payload.id()
    }

    pub fn is_generated(&self) -> bool {
        matches!(self.payload, ResourcePayload::Generated(_))
    }

    /// Replace the payload with the one of `resource`.
    ///
    /// The identifier keeps the spelling it was first recorded with, since column
    /// back-references point to it.
    pub fn update_payload(&mut self, resource: &Resource) {
        let id = self.id().to_string();
        self.payload = ResourcePayload::from_resource(resource);
        self.payload.set_id(id);
    }

    /// Merge a position into this entry. `None` leaves the entry untouched.
    pub fn merge_position(&mut self, position: Option<&Position>) -> Result<(), AssemblyError> {
        let position = match position {
            Some(position) => position,
            None => {
                debug!("No position for {}: skip merging", self.id());
                return Ok(());
            }
        };

        debug!("BEFORE: position of {}: {:?}", self.id(), self.position);

        self.position = Some(if let Some(group) = position.group_reference() {
            PositionEntry::Group(group.into())
        } else if let Some(coordinates) = position.coordinates {
            PositionEntry::Explicit {
                epsg_code: coordinates.epsg_code,
                altitude: coordinates.altitude,
                latitude: coordinates.latitude,
                longitude: coordinates.longitude,
            }
        } else {
            return Err(AssemblyError::InvalidState {
                reason: format!(
                    "position of {} has neither a group nor coordinates",
                    self.id()
                ),
            });
        });

        debug!("AFTER: position of {}: {:?}", self.id(), self.position);

        Ok(())
    }
}

impl ResourcePayload {
    fn from_resource(resource: &Resource) -> Self {
        match &resource.kind {
            ResourceKind::Manual(manual) => ResourcePayload::Manual(ManualPayload {
                id: resource.id.clone(),
                name: manual.name.clone(),
                uri: manual.uri.clone(),
            }),
            ResourceKind::Generated(generated) => ResourcePayload::Generated(GeneratedPayload {
                id: resource.id.clone(),
                use_as_prefix: generated.use_name_after_prefix_as_uri,
                uri_prefix: generated
                    .uri_prefix
                    .clone()
                    .filter(|_| generated.use_name_after_prefix_as_uri),
                concat_string: generated.concat_string.clone(),
                numbers: generated.related_columns.clone(),
            }),
        }
    }

    pub fn id(&self) -> &str {
        match self {
            ResourcePayload::Manual(manual) => &manual.id,
            ResourcePayload::Generated(generated) => &generated.id,
        }
    }

    fn set_id(&mut self, id: String) {
        match self {
            ResourcePayload::Manual(manual) => manual.id = id,
            ResourcePayload::Generated(generated) => generated.id = id,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::model::{Coordinates, GeneratedResource};

    use super::*;

    const COORDINATES: Coordinates = Coordinates {
        epsg_code: 4326,
        latitude: 51.9,
        longitude: 7.6,
        altitude: 60.0,
    };

    fn feature() -> ResourceEntry {
        ResourceEntry::from_resource(&Resource::manual(
            Category::FeatureOfInterest,
            "foi_1",
            "Weather station",
            "http://example.org/foi/1",
        ))
    }

    #[test]
    fn group_replaces_coordinates() {
        let mut entry = feature();

        entry
            .merge_position(Some(&Position::from_coordinates(COORDINATES)))
            .unwrap();
        entry
            .merge_position(Some(&Position::from_group("station_group")))
            .unwrap();

        assert_eq!(
            entry.position,
            Some(PositionEntry::Group("station_group".into()))
        );
    }

    #[test]
    fn coordinates_replace_group() {
        let mut entry = feature();

        entry
            .merge_position(Some(&Position::from_group("station_group")))
            .unwrap();
        entry
            .merge_position(Some(&Position::from_coordinates(COORDINATES)))
            .unwrap();

        assert_eq!(
            entry.position,
            Some(PositionEntry::Explicit {
                epsg_code: 4326,
                altitude: 60.0,
                latitude: 51.9,
                longitude: 7.6,
            })
        );
    }

    #[test]
    fn empty_group_falls_back_to_coordinates() {
        let mut entry = feature();
        let position = Position {
            group: Some("".into()),
            coordinates: Some(COORDINATES),
        };

        entry.merge_position(Some(&position)).unwrap();

        assert!(matches!(
            entry.position,
            Some(PositionEntry::Explicit { epsg_code: 4326, .. })
        ));
    }

    #[test]
    fn missing_position_is_a_no_op() {
        let mut entry = feature();
        entry
            .merge_position(Some(&Position::from_group("g")))
            .unwrap();

        entry.merge_position(None).unwrap();

        assert_eq!(entry.position, Some(PositionEntry::Group("g".into())));
    }

    #[test]
    fn inconsistent_position_is_rejected() {
        let mut entry = feature();

        let error = entry.merge_position(Some(&Position::default())).unwrap_err();

        assert!(matches!(error, AssemblyError::InvalidState { .. }));
        assert_eq!(entry.position, None);
    }

    #[test]
    fn prefix_is_dropped_without_flag() {
        let resource = Resource::generated(
            Category::Sensor,
            "sensor_gen",
            GeneratedResource {
                use_name_after_prefix_as_uri: false,
                uri_prefix: Some("http://example.org/sensor/".into()),
                concat_string: "_".into(),
                related_columns: vec![4, 1],
            },
        );

        let entry = ResourceEntry::from_resource(&resource);

        assert_eq!(
            entry.payload,
            ResourcePayload::Generated(GeneratedPayload {
                id: "sensor_gen".into(),
                use_as_prefix: false,
                uri_prefix: None,
                concat_string: "_".into(),
                numbers: vec![4, 1],
            })
        );
    }
}
