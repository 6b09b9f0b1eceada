//! Domain schema capability
//!
//! A domain type becomes editable by exposing a compile-time property list
//! ([`CrudSchema`]) and by-name accessors ([`CrudModel`]). Both are normally
//! generated with `#[derive(CrudModel)]` from `crudkit-macros`; hand-written
//! implementations work the same way and are useful for types whose fields
//! do not map one-to-one onto widgets.

use chrono::NaiveDate;
use thiserror::Error;
use validator::Validate;

pub use crudkit_macros::{CrudEnum, CrudModel};

/// Closed set of value kinds a property can have
///
/// The kind decides the default widget and the string conversion applied
/// when binding. Resolved once at configuration time, never per instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Boolean flag
    Bool,
    /// Free-form text
    Text,
    /// Single character
    Char,
    /// Machine-word integer (`i8` through `i64` and friends)
    Int,
    /// Wide integer (`i128`, `u64`)
    BigInt,
    /// Floating-point number
    Float,
    /// Calendar date without time zone
    Date,
    /// Closed enumeration rendered as a dropdown
    Select {
        /// Variant names, in declaration order
        variants: &'static [&'static str],
    },
}

impl ValueKind {
    /// Whether values of this kind parse with the numeric converter
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Int | Self::BigInt | Self::Float)
    }
}

/// Runtime value of a single property, mirroring [`ValueKind`]
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Boolean flag
    Bool(bool),
    /// Free-form text
    Text(String),
    /// Single character
    Char(char),
    /// Machine-word integer
    Int(i64),
    /// Wide integer
    BigInt(i128),
    /// Floating-point number
    Float(f64),
    /// Calendar date
    Date(NaiveDate),
    /// Selected enumeration variant, by name
    Choice(String),
}

impl FieldValue {
    /// Name of the carried kind, for diagnostics
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Text(_) => "text",
            Self::Char(_) => "char",
            Self::Int(_) => "int",
            Self::BigInt(_) => "bigint",
            Self::Float(_) => "float",
            Self::Date(_) => "date",
            Self::Choice(_) => "choice",
        }
    }
}

/// Immutable descriptor of one domain property
///
/// Discovered once per domain type, at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Property {
    /// Field name as declared on the struct
    pub name: &'static str,
    /// Resolved value kind
    pub kind: ValueKind,
}

/// Compile-time property discovery
///
/// The returned slice is in declaration order and stable; it seeds the
/// default visible-property list of every form configuration.
pub trait CrudSchema {
    /// All editable properties of the type, each exactly once.
    fn properties() -> &'static [Property];
}

/// By-name property access for form binding
///
/// `Validate` is the commit-time constraint hook: when a form configuration
/// enables validation, the binder runs it against the candidate object
/// before any field is written back.
pub trait CrudModel: CrudSchema + Default + Clone + PartialEq + Validate {
    /// Read a property value, or `None` for an unknown property.
    fn get(&self, property: &str) -> Option<FieldValue>;

    /// Write a property value.
    fn set(&mut self, property: &str, value: FieldValue) -> Result<(), PropertyError>;
}

/// Enumeration capability for `Select` properties
pub trait CrudEnum: Sized {
    /// Variant names, in declaration order
    const VARIANTS: &'static [&'static str];

    /// Name of the current variant.
    fn as_variant(&self) -> &'static str;

    /// Parse a variant by name.
    fn from_variant(variant: &str) -> Option<Self>;
}

/// Failure writing a property through [`CrudModel::set`]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PropertyError {
    /// No property with the given name
    #[error("unknown property `{0}`")]
    Unknown(String),

    /// The value's kind does not match the property's declared kind
    #[error("value kind `{kind}` does not match property `{property}`")]
    KindMismatch {
        /// Target property
        property: String,
        /// Kind of the rejected value
        kind: &'static str,
    },

    /// The value does not fit the property's integer width
    #[error("value out of range for property `{0}`")]
    OutOfRange(String),

    /// No enumeration variant with the given name
    #[error("`{variant}` is not a variant of property `{property}`")]
    UnknownVariant {
        /// Target property
        property: String,
        /// Rejected variant name
        variant: String,
    },
}

impl PropertyError {
    /// Unknown-property error.
    pub fn unknown(property: impl Into<String>) -> Self {
        Self::Unknown(property.into())
    }

    /// Kind-mismatch error.
    pub fn kind_mismatch(property: impl Into<String>, kind: &'static str) -> Self {
        Self::KindMismatch {
            property: property.into(),
            kind,
        }
    }

    /// Out-of-range error for narrow integer fields.
    pub fn out_of_range(property: impl Into<String>) -> Self {
        Self::OutOfRange(property.into())
    }

    /// Unknown-variant error for `Select` properties.
    pub fn unknown_variant(property: impl Into<String>, variant: impl Into<String>) -> Self {
        Self::UnknownVariant {
            property: property.into(),
            variant: variant.into(),
        }
    }
}
