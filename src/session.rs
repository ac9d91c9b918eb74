use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use failure::Error;
use log::{debug, info, trace, warn};
use serde::Deserialize;

use crate::assignment::{is_manual_assignment_required, next_unassigned_resource};
use crate::document::ExportDocument;
use crate::error::AssemblyError;
use crate::model::{Category, MeasuredValueColumn, Resource};

/// This struct reflects a recorded wizard session.
#[derive(Debug, Deserialize)]
pub struct SessionModel {
    pub measured_values: Vec<usize>,
    pub resources: Vec<Resource>,
    #[serde(default)]
    pub assignments: Vec<Assignment>,
}

/// A resource that the user assigned to a selection of columns.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Assignment {
    pub category: Category,
    pub resource: String,
    pub columns: Vec<usize>,
}

impl SessionModel {
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);

        Ok(serde_json::from_reader(reader)?)
    }
}

/// Drives resource assignment and document assembly for one wizard session.
#[derive(Debug)]
pub struct WizardSession {
    measured_values: Vec<MeasuredValueColumn>,
    resources: BTreeMap<Category, Vec<Resource>>,
    document: ExportDocument,
}

impl WizardSession {
    pub fn new(measured_values: &[usize], resources: Vec<Resource>) -> Self {
        let mut document = ExportDocument::new();
        for &index in measured_values {
            document.add_measured_value_column(index);
        }

        let mut by_category: BTreeMap<Category, Vec<Resource>> = BTreeMap::new();
        for resource in resources {
            by_category
                .entry(resource.category)
                .or_default()
                .push(resource);
        }

        Self {
            measured_values: measured_values
                .iter()
                .map(|&index| MeasuredValueColumn::new(index))
                .collect(),
            resources: by_category,
            document,
        }
    }

    pub fn from_model(model: &SessionModel) -> Self {
        Self::new(&model.measured_values, model.resources.clone())
    }

    /// Resolve every category and return the first resource that needs manual assignment.
    ///
    /// Categories with a single resource are linked to all columns on the way.
    pub fn first_pending_resource(&mut self) -> Result<Option<&Resource>, Error> {
        let mut pending = None;

        for &category in &Category::RESOLUTION_ORDER {
            let candidates = self
                .resources
                .get(&category)
                .map(Vec::as_slice)
                .unwrap_or(&[]);

            let required =
                is_manual_assignment_required(category, candidates, &mut self.measured_values)?;

            if required && pending.is_none() {
                pending = next_unassigned_resource(category, candidates, &self.measured_values)?;
            }
        }

        Ok(pending)
    }

    /// The next resource to offer, starting with the resources of `from`.
    pub fn next_pending_resource(&self, from: Category) -> Result<Option<&Resource>, Error> {
        let mut category = Some(from);

        while let Some(current) = category {
            let next =
                next_unassigned_resource(current, self.candidates(current), &self.measured_values)?;
            if next.is_some() {
                return Ok(next);
            }

            category = current.next();
        }

        Ok(None)
    }

    /// Link a resource to a selection of measured value columns.
    pub fn assign(&mut self, category: Category, id: &str, columns: &[usize]) -> Result<(), Error> {
        trace!("assign({}, {}, {:?})", category, id, columns);

        let id = self.resource(category, id)?.id.clone();
        self.check_columns(columns)?;

        for measured_value in self
            .measured_values
            .iter_mut()
            .filter(|measured_value| columns.contains(&measured_value.index()))
        {
            measured_value.link(category, &id);
        }

        Ok(())
    }

    /// Drop the links of a resource to a selection of columns.
    ///
    /// Links already written to the document are dropped as well; its entries stay.
    pub fn unassign(
        &mut self,
        category: Category,
        id: &str,
        columns: &[usize],
    ) -> Result<(), Error> {
        trace!("unassign({}, {}, {:?})", category, id, columns);

        self.resource(category, id)?;
        self.check_columns(columns)?;

        for measured_value in self
            .measured_values
            .iter_mut()
            .filter(|measured_value| columns.contains(&measured_value.index()))
        {
            measured_value.unlink(category, id);
        }

        for &column in columns {
            self.document
                .unlink_column_from_resource(column, category, id)?;
        }

        Ok(())
    }

    /// Columns without any link of the given category.
    pub fn unassigned_columns(&self, category: Category) -> Vec<usize> {
        self.measured_values
            .iter()
            .filter(|measured_value| !measured_value.is_linked(category))
            .map(MeasuredValueColumn::index)
            .collect()
    }

    /// Write every assigned resource and its column links into the document.
    pub fn assemble(&mut self) -> Result<&ExportDocument, Error> {
        for measured_value in &self.measured_values {
            for &category in &Category::RESOLUTION_ORDER {
                for id in measured_value.related(category) {
                    let resource = Self::find_resource(&self.resources, category, id)?;
                    self.document
                        .add_related_resource(resource, measured_value.index())?;
                }
            }
        }

        Ok(&self.document)
    }

    /// Replay recorded assignments and assemble the document.
    pub fn run(&mut self, assignments: &[Assignment]) -> Result<&ExportDocument, Error> {
        let mut pending = self.first_pending_resource()?.map(Self::key);

        for assignment in assignments {
            if let Some((category, id)) = &pending {
                if *category != assignment.category || !id.eq_ignore_ascii_case(&assignment.resource)
                {
                    debug!(
                        "Assignment of {} `{}` differs from offered `{}`",
                        assignment.category, assignment.resource, id
                    );
                }
            }

            self.assign(
                assignment.category,
                &assignment.resource,
                &assignment.columns,
            )?;

            pending = self
                .next_pending_resource(assignment.category)?
                .map(Self::key);
        }

        if let Some((category, id)) = pending {
            warn!("{} `{}` is not assigned to any column", category, id);
        }

        for &category in &Category::RESOLUTION_ORDER {
            let unassigned = self.unassigned_columns(category);
            if !self.candidates(category).is_empty() && !unassigned.is_empty() {
                warn!("Columns {:?} have no related {}", unassigned, category);
            }
        }

        let document = self.assemble()?;
        info!(
            "Assembled {} resources for {} measured value columns",
            document.len(),
            document.columns().len()
        );

        Ok(document)
    }

    pub fn measured_values(&self) -> &[MeasuredValueColumn] {
        &self.measured_values
    }

    pub fn document(&self) -> &ExportDocument {
        &self.document
    }

    fn candidates(&self, category: Category) -> &[Resource] {
        self.resources
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn resource(&self, category: Category, id: &str) -> Result<&Resource, AssemblyError> {
        Self::find_resource(&self.resources, category, id)
    }

    fn find_resource<'r>(
        resources: &'r BTreeMap<Category, Vec<Resource>>,
        category: Category,
        id: &str,
    ) -> Result<&'r Resource, AssemblyError> {
        resources
            .get(&category)
            .and_then(|candidates| candidates.iter().find(|resource| resource.has_id(id)))
            .ok_or_else(|| AssemblyError::ResourceNotFound {
                category,
                identifier: id.into(),
            })
    }

    fn check_columns(&self, columns: &[usize]) -> Result<(), AssemblyError> {
        match columns.iter().find(|&&column| {
            !self
                .measured_values
                .iter()
                .any(|measured_value| measured_value.index() == column)
        }) {
            Some(column) => Err(AssemblyError::InvalidState {
                reason: format!("column {} is not a measured value", column),
            }),
            None => Ok(()),
        }
    }

    fn key(resource: &Resource) -> (Category, String) {
        (resource.category, resource.id.clone())
    }
}
