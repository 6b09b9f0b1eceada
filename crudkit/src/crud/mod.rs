//! CRUD orchestration
//!
//! The controller ([`CrudGrid`]) owns a listing view and drives the
//! add/update/delete/read flows against caller-supplied data operations.
//! All persistence lives behind [`CrudDataSource`]; this layer invokes each
//! operation synchronously and reacts to its result in-line.

pub mod controller;
pub mod listing;
pub mod options;

pub use controller::{CrudGrid, CrudState, Effect, ToolbarState};
pub use listing::{Column, Listing};
pub use options::{GridOptions, OperationVisibility};

use crate::error::CrudError;

/// CRUD operation kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrudOperation {
    /// Read-only detail view
    Read,
    /// Create a new item
    Add,
    /// Edit the selected item
    Update,
    /// Delete the selected item (after confirmation)
    Delete,
}

impl CrudOperation {
    /// Canonical lowercase name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Add => "add",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

impl std::fmt::Display for CrudOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One value per CRUD operation, with no shared mutation between them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PerOperation<V> {
    /// Value for [`CrudOperation::Read`]
    pub read: V,
    /// Value for [`CrudOperation::Add`]
    pub add: V,
    /// Value for [`CrudOperation::Update`]
    pub update: V,
    /// Value for [`CrudOperation::Delete`]
    pub delete: V,
}

impl<V> PerOperation<V> {
    /// Value for one operation
    #[must_use]
    pub const fn get(&self, operation: CrudOperation) -> &V {
        match operation {
            CrudOperation::Read => &self.read,
            CrudOperation::Add => &self.add,
            CrudOperation::Update => &self.update,
            CrudOperation::Delete => &self.delete,
        }
    }

    /// Mutable value for one operation
    pub fn get_mut(&mut self, operation: CrudOperation) -> &mut V {
        match operation {
            CrudOperation::Read => &mut self.read,
            CrudOperation::Add => &mut self.add,
            CrudOperation::Update => &mut self.update,
            CrudOperation::Delete => &mut self.delete,
        }
    }
}

/// Caller-supplied data operations
///
/// The controller owns no persistence state, only this handle. Implementors
/// signal a recoverable failure with [`CrudError::OperationFailed`]; any
/// other error is treated as unexpected and re-raised to the host after the
/// listing has been refreshed.
pub trait CrudDataSource<T> {
    /// Return all items for the listing.
    fn find_all(&mut self) -> Result<Vec<T>, CrudError>;

    /// Persist a new item, returning it as stored.
    fn add(&mut self, item: T) -> Result<T, CrudError>;

    /// Persist changes to an item, returning it as stored.
    fn update(&mut self, item: T) -> Result<T, CrudError>;

    /// Delete an item.
    fn delete(&mut self, item: &T) -> Result<(), CrudError>;
}

/// Paged item source, the lazy alternative to `find_all`
///
/// Windowing and any concurrency are entirely the provider's business; the
/// controller only asks for a count and pages.
pub trait LazyDataProvider<T> {
    /// Total number of items.
    fn size(&mut self) -> Result<usize, CrudError>;

    /// Fetch a window of items.
    fn fetch(&mut self, offset: usize, limit: usize) -> Result<Vec<T>, CrudError>;
}

/// Caller-supplied sink for errors raised during commit
///
/// When installed, it replaces the default display-and-conditionally-reraise
/// behavior; the error is considered handled.
pub type ErrorListener = Box<dyn Fn(CrudOperation, &CrudError)>;

/// Fallible factory for fresh domain objects in the add flow
pub type InstanceFactory<T> = Box<dyn Fn() -> Result<T, CrudError>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_display() {
        assert_eq!(CrudOperation::Add.to_string(), "add");
        assert_eq!(CrudOperation::Delete.as_str(), "delete");
    }

    #[test]
    fn test_per_operation_access() {
        let mut per_op = PerOperation {
            read: 0,
            add: 1,
            update: 2,
            delete: 3,
        };
        assert_eq!(*per_op.get(CrudOperation::Update), 2);
        *per_op.get_mut(CrudOperation::Read) = 9;
        assert_eq!(per_op.read, 9);
    }
}
