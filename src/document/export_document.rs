use failure::Error;
use log::{debug, info, trace};

use crate::document::entry_index::{EntryIndex, EntrySlot};
use crate::document::ResourceEntry;
use crate::error::AssemblyError;
use crate::model::{Category, LinkOutcome, MeasuredValueColumn, Resource};

/// The import configuration that is assembled step by step during a wizard session.
#[derive(Debug, Default)]
pub struct ExportDocument {
    entries: Vec<ResourceEntry>,
    index: EntryIndex,
    columns: Vec<MeasuredValueColumn>,
}

impl ExportDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a measured value column. Registering a column twice has no effect.
    pub fn add_measured_value_column(&mut self, index: usize) -> bool {
        if self.column(index).is_some() {
            return false;
        }

        self.columns.push(MeasuredValueColumn::new(index));
        true
    }

    /// Insert the resource or update the entry with the same category and identifier.
    ///
    /// Features of interest also get their position merged. A failing merge leaves
    /// the document unchanged.
    pub fn upsert_resource(
        &mut self,
        category: Category,
        resource: &Resource,
    ) -> Result<&ResourceEntry, Error> {
        trace!("upsert_resource({}, {})", category, resource.id);

        if resource.category != category {
            return Err(AssemblyError::InvalidState {
                reason: format!("{} cannot be stored as {}", resource, category),
            }
            .into());
        }
        if resource.id.is_empty() {
            return Err(AssemblyError::invalid_state("resource identifier is empty").into());
        }

        let mut entry = match self.index.get(category, &resource.id) {
            Some(slot) => {
                let mut entry = self.entries[slot].clone();
                entry.update_payload(resource);
                entry
            }
            None => ResourceEntry::from_resource(resource),
        };

        if category.is_spatial() {
            entry.merge_position(resource.position.as_ref())?;
        } else if resource.position.is_some() {
            debug!("Ignore position of {} since it is not spatial", resource);
        }

        let slot = match self.index.slot_for(category, &resource.id) {
            EntrySlot::New(slot) => {
                debug!("Added new {} entry `{}`", category, resource.id);
                self.entries.push(entry);
                slot
            }
            EntrySlot::Existing(slot) => {
                self.entries[slot] = entry;
                slot
            }
        };

        Ok(&self.entries[slot])
    }

    /// Record that `column` relates to the resource `id` of `category`.
    ///
    /// The resource must have been upserted before.
    pub fn link_column_to_resource(
        &mut self,
        column: usize,
        category: Category,
        id: &str,
    ) -> Result<LinkOutcome, Error> {
        trace!("link_column_to_resource({}, {}, {})", column, category, id);

        let slot = self
            .index
            .get(category, id)
            .ok_or_else(|| AssemblyError::ResourceNotFound {
                category,
                identifier: id.into(),
            })?;
        // back-references use the spelling of the entry
        let id = self.entries[slot].id().to_string();

        let measured_value = self
            .columns
            .iter_mut()
            .find(|measured_value| measured_value.index() == column)
            .ok_or(AssemblyError::ColumnNotFound { column })?;

        let outcome = measured_value.link(category, &id);
        if outcome == LinkOutcome::Linked {
            debug!("Added new related {} `{}` to column {}", category, id, column);
        }

        Ok(outcome)
    }

    /// Drop the back-reference from `column` to the resource `id` of `category`.
    ///
    /// Entries are never removed, only links that the user deselected. Returns
    /// whether a back-reference was removed.
    pub fn unlink_column_from_resource(
        &mut self,
        column: usize,
        category: Category,
        id: &str,
    ) -> Result<bool, Error> {
        trace!("unlink_column_from_resource({}, {}, {})", column, category, id);

        let measured_value = self
            .columns
            .iter_mut()
            .find(|measured_value| measured_value.index() == column)
            .ok_or(AssemblyError::ColumnNotFound { column })?;

        let removed = measured_value.unlink(category, id);
        if removed {
            debug!("Removed related {} `{}` from column {}", category, id, column);
        }

        Ok(removed)
    }

    /// Upsert a resource and link it to a measured value column in one go.
    pub fn add_related_resource(
        &mut self,
        resource: &Resource,
        column: usize,
    ) -> Result<LinkOutcome, Error> {
        let id = self
            .upsert_resource(resource.category, resource)?
            .id()
            .to_string();
        let outcome = self.link_column_to_resource(column, resource.category, &id)?;

        info!("Related resource updated/added: {}", resource);

        Ok(outcome)
    }

    pub fn entry(&self, category: Category, id: &str) -> Option<&ResourceEntry> {
        self.index.get(category, id).map(|slot| &self.entries[slot])
    }

    /// All entries of a category in insertion order.
    pub fn entries_of(&self, category: Category) -> impl Iterator<Item = &ResourceEntry> {
        self.entries
            .iter()
            .filter(move |entry| entry.category == category)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn column(&self, index: usize) -> Option<&MeasuredValueColumn> {
        self.columns
            .iter()
            .find(|measured_value| measured_value.index() == index)
    }

    pub fn columns(&self) -> &[MeasuredValueColumn] {
        &self.columns
    }
}
