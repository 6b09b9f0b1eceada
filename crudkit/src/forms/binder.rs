//! Two-way form binding
//!
//! [`BoundForm`] wires widgets to domain properties by name. Loading is a
//! one-shot copy from the object into the widgets; write-back is an explicit
//! [`BoundForm::try_commit`] returning `Result` — a validation failure is an
//! expected outcome, not an exception, and never mutates the object.

use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

use convert_case::{Case, Casing};

use crate::error::CrudError;
use crate::forms::config::FormConfig;
use crate::forms::convert;
use crate::forms::factory::build_field;
use crate::forms::field::FormField;
use crate::schema::{CrudModel, FieldValue, ValueKind};

/// One widget-level problem found during commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Property the widget is bound to
    pub property: String,
    /// User-facing message
    pub message: String,
}

/// Commit rejected; the domain object was left untouched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    /// Generic validation-error message from the configuration
    pub message: String,
    /// Per-widget details
    pub field_errors: Vec<FieldError>,
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

struct Binding {
    property: String,
    kind: ValueKind,
}

/// A set of widgets bound to one domain object's properties
pub struct BoundForm<T> {
    fields: Vec<FormField>,
    bindings: Vec<Binding>,
    use_validation: bool,
    validation_error_message: String,
    read_only: bool,
    _marker: PhantomData<T>,
}

impl<T: CrudModel> BoundForm<T> {
    /// Build widgets for every visible property, in configuration order.
    ///
    /// Captions use the configured override when present, else a Title Case
    /// transform of the property name. `read_only` is invocation-driven
    /// (true for READ and DELETE confirmation forms); the disabled-property
    /// set affects only the enabled state, never the read-only attribute.
    /// The first widget of an editable form receives autofocus.
    pub fn bind(
        config: &FormConfig,
        validation_error_message: impl Into<String>,
        read_only: bool,
    ) -> Result<Self, CrudError> {
        let schema: HashMap<&str, ValueKind> = T::properties()
            .iter()
            .map(|p| (p.name, p.kind))
            .collect();

        let mut fields = Vec::new();
        let mut bindings = Vec::new();
        for (index, property) in config.visible_properties().iter().enumerate() {
            let kind = *schema
                .get(property.as_str())
                .ok_or_else(|| CrudError::PropertyType {
                    property: property.clone(),
                })?;

            let mut field = build_field(property, kind, config);
            let caption = config
                .field_caption(index)
                .map_or_else(|| property.to_case(Case::Title), ToOwned::to_owned);
            field.label = Some(caption);
            field.flags.readonly = read_only;
            if config.is_disabled(property) {
                field.flags.disabled = true;
            }
            if let Some(listener) = config.creation_listener(property) {
                listener(&mut field);
            }

            bindings.push(Binding {
                property: property.clone(),
                kind,
            });
            fields.push(field);
        }

        if !read_only {
            if let Some(first) = fields.first_mut() {
                first.flags.autofocus = true;
            }
        }

        Ok(Self {
            fields,
            bindings,
            use_validation: config.use_validation(),
            validation_error_message: validation_error_message.into(),
            read_only,
            _marker: PhantomData,
        })
    }

    /// One-shot copy of current values from the object into the widgets.
    pub fn load(&mut self, object: &T) {
        for (field, binding) in self.fields.iter_mut().zip(&self.bindings) {
            let Some(value) = object.get(&binding.property) else {
                continue;
            };
            if let FieldValue::Bool(checked) = value {
                field.set_checked(checked);
            } else {
                field.set_text(convert::value_to_text(&value));
            }
        }
    }

    /// Convert and write widget values back into the object.
    ///
    /// All conversions run first; when validation is enabled the converted
    /// candidate is checked against the type's declared constraints. Only a
    /// fully successful commit mutates `object`.
    pub fn try_commit(&self, object: &mut T) -> Result<(), ValidationFailure> {
        let mut candidate = object.clone();
        let mut errors = Vec::new();

        for (field, binding) in self.fields.iter().zip(&self.bindings) {
            let value = if field.is_checkbox() {
                FieldValue::Bool(field.is_checked())
            } else {
                match convert::text_to_value(binding.kind, field.text()) {
                    Ok(value) => value,
                    Err(message) => {
                        errors.push(FieldError {
                            property: binding.property.clone(),
                            message: message.to_string(),
                        });
                        continue;
                    }
                }
            };
            if let Err(err) = candidate.set(&binding.property, value) {
                errors.push(FieldError {
                    property: binding.property.clone(),
                    message: err.to_string(),
                });
            }
        }

        if errors.is_empty() && self.use_validation {
            if let Err(violations) = candidate.validate() {
                for (property, field_errors) in violations.field_errors() {
                    for err in field_errors {
                        errors.push(FieldError {
                            property: property.to_string(),
                            message: err
                                .message
                                .as_ref()
                                .map_or_else(|| err.code.to_string(), ToString::to_string),
                        });
                    }
                }
            }
        }

        if errors.is_empty() {
            *object = candidate;
            Ok(())
        } else {
            Err(ValidationFailure {
                message: self.validation_error_message.clone(),
                field_errors: errors,
            })
        }
    }

    /// Bound widgets, in configuration order
    #[must_use]
    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    /// Mutable access to the widget bound to `property`
    pub fn field_mut(&mut self, property: &str) -> Option<&mut FormField> {
        self.fields.iter_mut().find(|f| f.name == property)
    }

    /// Whether the form was bound read-only
    #[must_use]
    pub const fn is_read_only(&self) -> bool {
        self.read_only
    }
}

impl<T> fmt::Debug for BoundForm<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundForm")
            .field("fields", &self.fields)
            .field("use_validation", &self.use_validation)
            .field("read_only", &self.read_only)
            .finish_non_exhaustive()
    }
}
