//! crudkit: Declarative CRUD scaffolding for typed domain objects
//!
//! Point the library at a plain struct and it produces the full editing
//! surface around it: a listing with auto-generated columns, per-operation
//! forms with sensible default widgets, two-way binding with validation,
//! and a controller that drives the add/update/delete/read flows against
//! caller-supplied data operations.
//!
//! Everything is renderer-agnostic. Forms and listings are plain data, the
//! controller returns explicit side-effect commands, and the host decides
//! how to draw them — terminal, web, or tests.
//!
//! # Quick Start
//!
//! ```rust
//! use crudkit::prelude::*;
//!
//! #[derive(Debug, Default, Clone, PartialEq, validator::Validate, CrudModel)]
//! struct User {
//!     #[validate(length(min = 1))]
//!     name: String,
//!     age: i32,
//! }
//!
//! struct Users(Vec<User>);
//!
//! impl CrudDataSource<User> for Users {
//!     fn find_all(&mut self) -> Result<Vec<User>, CrudError> {
//!         Ok(self.0.clone())
//!     }
//!     fn add(&mut self, user: User) -> Result<User, CrudError> {
//!         self.0.push(user.clone());
//!         Ok(user)
//!     }
//!     fn update(&mut self, user: User) -> Result<User, CrudError> {
//!         Ok(user)
//!     }
//!     fn delete(&mut self, _user: &User) -> Result<(), CrudError> {
//!         Ok(())
//!     }
//! }
//!
//! fn main() -> Result<(), CrudError> {
//!     let mut grid = CrudGrid::new(Users(Vec::new()))?;
//!     grid.refresh()?;
//!
//!     grid.add_clicked()?;
//!     if let Some(form) = grid.form_mut() {
//!         form.set_text("name", "Ann");
//!         form.set_text("age", "30");
//!     }
//!     let effects = grid.commit_form()?;
//!     assert_eq!(grid.listing().row_count(), 1);
//!     assert!(!effects.is_empty());
//!     Ok(())
//! }
//! ```

// Lint configuration is handled at the workspace level in Cargo.toml

pub mod crud;
pub mod error;
pub mod forms;
pub mod schema;

#[cfg(test)]
pub mod testing;

pub use crudkit_macros::{CrudEnum, CrudModel};

pub mod prelude {
    //! Convenience re-exports for common types and traits

    pub use crate::crud::{
        CrudDataSource, CrudGrid, CrudOperation, CrudState, Effect, GridOptions,
        LazyDataProvider, Listing, OperationVisibility,
    };
    pub use crate::error::CrudError;
    pub use crate::forms::{
        CrudForm, CrudFormFactory, FieldKind, FormConfig, FormField, InputType, SelectOption,
        ValidationFailure,
    };
    pub use crate::schema::{
        CrudEnum, CrudModel, CrudSchema, FieldValue, Property, PropertyError, ValueKind,
    };
}
