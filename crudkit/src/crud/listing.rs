//! Listing view model
//!
//! A grid-like view over the current item set with zero-or-one selection.
//! Columns are auto-created from the domain schema unless the controller is
//! told otherwise.

use convert_case::{Case, Casing};

use crate::schema::CrudModel;

/// One listing column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Bound property name
    pub property: &'static str,
    /// Header text
    pub header: String,
}

/// Items plus selection state backing the grid
#[derive(Debug, Clone)]
pub struct Listing<T> {
    columns: Vec<Column>,
    items: Vec<T>,
    selected: Option<usize>,
}

impl<T: CrudModel> Listing<T> {
    /// Create a listing; with `auto_columns` one column per schema property.
    #[must_use]
    pub fn new(auto_columns: bool) -> Self {
        let columns = if auto_columns {
            T::properties()
                .iter()
                .map(|p| Column {
                    property: p.name,
                    header: p.name.to_case(Case::Title),
                })
                .collect()
        } else {
            Vec::new()
        };
        Self {
            columns,
            items: Vec::new(),
            selected: None,
        }
    }

    /// Listing columns
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Current items
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Number of rows
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.items.len()
    }

    /// Replace the item set, preserving the selection when the previously
    /// selected item still exists (by equality).
    pub fn set_items(&mut self, items: Vec<T>) {
        let previously_selected = self.selected().cloned();
        self.items = items;
        self.selected = previously_selected
            .and_then(|item| self.items.iter().position(|candidate| *candidate == item));
    }

    /// Index of the selected row, if any
    #[must_use]
    pub const fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// The selected item, if any
    #[must_use]
    pub fn selected(&self) -> Option<&T> {
        self.selected.and_then(|index| self.items.get(index))
    }

    /// Select a row by index; returns whether the index was valid.
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.items.len() {
            self.selected = Some(index);
            true
        } else {
            false
        }
    }

    /// Select an item by equality; returns its index when found.
    pub fn select_item(&mut self, item: &T) -> Option<usize> {
        let index = self.items.iter().position(|candidate| candidate == item);
        if index.is_some() {
            self.selected = index;
        }
        index
    }

    /// Clear the selection.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }
}
