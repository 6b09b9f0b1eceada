//! Controller-level options

use serde::{Deserialize, Serialize};

/// Per-operation toolbar visibility
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct OperationVisibility {
    /// Show the find-all (refresh) button
    pub find_all: bool,
    /// Show the add button
    pub add: bool,
    /// Show the update button
    pub update: bool,
    /// Show the delete button
    pub delete: bool,
}

impl Default for OperationVisibility {
    fn default() -> Self {
        Self {
            find_all: true,
            add: true,
            update: true,
            delete: true,
        }
    }
}

/// Options of a [`CrudGrid`](crate::crud::CrudGrid)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GridOptions {
    /// Format of the row-count notification; `{}` is replaced by the count
    pub row_count_caption: String,

    /// Notification after a successful add or update
    pub saved_message: String,

    /// Notification after a successful delete
    pub deleted_message: String,

    /// Whether notifications are emitted at all
    pub show_notifications: bool,

    /// Selecting a row opens an editable update form directly, skipping the
    /// read-only preview
    pub click_row_to_update: bool,

    /// Auto-create listing columns from the schema
    pub auto_columns: bool,

    /// Window size requested from a lazy data provider on refresh
    pub lazy_page_size: usize,

    /// Toolbar button visibility
    pub operations: OperationVisibility,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            row_count_caption: "{} item(s) found".to_string(),
            saved_message: "Item saved".to_string(),
            deleted_message: "Item deleted".to_string(),
            show_notifications: true,
            click_row_to_update: false,
            auto_columns: true,
            lazy_page_size: 100,
            operations: OperationVisibility::default(),
        }
    }
}

impl GridOptions {
    /// Render the row-count notification for `count` items.
    #[must_use]
    pub fn format_row_count(&self, count: usize) -> String {
        self.row_count_caption.replacen("{}", &count.to_string(), 1)
    }
}
