use std::collections::BTreeMap;

use crate::model::Category;

/// The result of linking a column to a resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkOutcome {
    Linked,
    AlreadyLinked,
}

/// A table column carrying observation values and its resource back-references.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeasuredValueColumn {
    index: usize,
    related: BTreeMap<Category, Vec<String>>,
}

impl MeasuredValueColumn {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            related: BTreeMap::new(),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// The identifiers this column refers to for the given category, in link order.
    pub fn related(&self, category: Category) -> &[String] {
        self.related
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_linked(&self, category: Category) -> bool {
        !self.related(category).is_empty()
    }

    pub fn is_linked_to(&self, category: Category, id: &str) -> bool {
        self.related(category)
            .iter()
            .any(|related| related.eq_ignore_ascii_case(id))
    }

    /// Append a back-reference unless an equal one (ignoring case) exists.
    pub fn link(&mut self, category: Category, id: &str) -> LinkOutcome {
        if self.is_linked_to(category, id) {
            return LinkOutcome::AlreadyLinked;
        }

        self.related.entry(category).or_default().push(id.into());

        LinkOutcome::Linked
    }

    /// Remove a back-reference. Returns whether one was removed.
    pub fn unlink(&mut self, category: Category, id: &str) -> bool {
        match self.related.get_mut(&category) {
            Some(ids) => {
                let before = ids.len();
                ids.retain(|related| !related.eq_ignore_ascii_case(id));
                before != ids.len()
            }
            None => false,
        }
    }
}
