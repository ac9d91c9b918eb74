use std::fmt;

use serde::Deserialize;

use crate::model::{Category, Position};

/// A feature of interest, observed property, unit of measurement or sensor.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Resource {
    pub category: Category,
    /// XML-safe identifier, unique within the category.
    pub id: String,
    pub kind: ResourceKind,
    /// Only read for features of interest.
    #[serde(default)]
    pub position: Option<Position>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Manual(ManualResource),
    Generated(GeneratedResource),
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ManualResource {
    pub name: String,
    pub uri: String,
}

/// A resource whose URI is concatenated from column values during import.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct GeneratedResource {
    #[serde(default)]
    pub use_name_after_prefix_as_uri: bool,
    #[serde(default)]
    pub uri_prefix: Option<String>,
    #[serde(default)]
    pub concat_string: String,
    pub related_columns: Vec<usize>,
}

impl Resource {
    pub fn manual(category: Category, id: &str, name: &str, uri: &str) -> Self {
        Self {
            category,
            id: id.into(),
            kind: ResourceKind::Manual(ManualResource {
                name: name.into(),
                uri: uri.into(),
            }),
            position: None,
        }
    }

    pub fn generated(category: Category, id: &str, generated: GeneratedResource) -> Self {
        Self {
            category,
            id: id.into(),
            kind: ResourceKind::Generated(generated),
            position: None,
        }
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    pub fn is_generated(&self) -> bool {
        matches!(self.kind, ResourceKind::Generated(_))
    }

    /// Identifiers are case-insensitive tokens.
    pub fn has_id(&self, id: &str) -> bool {
        self.id.eq_ignore_ascii_case(id)
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.kind {
            ResourceKind::Manual(manual) => {
                write!(f, "{} \"{}\" [{}]", self.category, manual.name, self.id)
            }
            ResourceKind::Generated(generated) => write!(
                f,
                "{} generated from columns {:?} [{}]",
                self.category, generated.related_columns, self.id
            ),
        }
    }
}
