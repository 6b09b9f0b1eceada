//! Form generation and binding
//!
//! Widgets are renderer-agnostic descriptions ([`FormField`]); the binder
//! connects them to domain properties and moves values in both directions,
//! and the factory assembles complete per-operation forms with buttons and
//! captions. Nothing in this module touches a real UI toolkit.

pub mod binder;
pub mod config;
pub mod convert;
pub mod factory;
pub mod field;

pub use binder::{BoundForm, FieldError, ValidationFailure};
pub use config::{FieldCreationListener, FieldProvider, FormConfig};
pub use factory::{Button, ButtonIcon, CrudForm, CrudFormFactory, DEFAULT_VALIDATION_ERROR_MESSAGE};
pub use field::{FieldFlags, FieldKind, FormField, InputType, SelectOption};
