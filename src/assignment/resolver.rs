use failure::Error;
use log::{debug, trace};

use crate::error::AssemblyError;
use crate::model::{Category, MeasuredValueColumn, Resource};

/// Decide whether the resources of a category must be assigned to columns manually.
///
/// A single candidate is linked to every measured value column right away.
pub fn is_manual_assignment_required(
    category: Category,
    candidates: &[Resource],
    measured_values: &mut [MeasuredValueColumn],
) -> Result<bool, Error> {
    trace!("is_manual_assignment_required({})", category);

    check_input(category, candidates, measured_values)?;

    match candidates {
        [] => {
            debug!(
                "Skip manual assignment for {} since there are not any",
                category
            );
            Ok(false)
        }
        [resource] => {
            debug!(
                "Skip manual assignment for {} since there is just {}",
                category, resource
            );
            for measured_value in measured_values.iter_mut() {
                measured_value.link(category, &resource.id);
            }
            Ok(false)
        }
        _ => Ok(true),
    }
}

/// Return the first candidate that is not linked to any column yet.
///
/// Returns `None` once every column has a link of this category, or once every
/// candidate has been linked at least once.
pub fn next_unassigned_resource<'r>(
    category: Category,
    candidates: &'r [Resource],
    measured_values: &[MeasuredValueColumn],
) -> Result<Option<&'r Resource>, Error> {
    trace!("next_unassigned_resource({})", category);

    check_input(category, candidates, measured_values)?;

    let any_column_unassigned = measured_values
        .iter()
        .any(|measured_value| !measured_value.is_linked(category));
    if !any_column_unassigned {
        return Ok(None);
    }

    Ok(candidates.iter().find(|resource| {
        !measured_values
            .iter()
            .any(|measured_value| measured_value.is_linked_to(category, &resource.id))
    }))
}

fn check_input(
    category: Category,
    candidates: &[Resource],
    measured_values: &[MeasuredValueColumn],
) -> Result<(), AssemblyError> {
    if measured_values.is_empty() {
        return Err(AssemblyError::invalid_state(
            "there are no measured value columns to assign resources to",
        ));
    }

    if let Some(stray) = candidates.iter().find(|c| c.category != category) {
        return Err(AssemblyError::InvalidState {
            reason: format!("{} is not a candidate for {}", stray, category),
        });
    }

    Ok(())
}
