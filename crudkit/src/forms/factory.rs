//! Auto-generated CRUD forms
//!
//! [`CrudFormFactory`] owns one [`FormConfig`] per operation plus the
//! button and caption records, and assembles a [`CrudForm`] — bound widgets
//! with an operation button and a cancel button — for any object.

use std::fmt;
use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

use crate::crud::{CrudOperation, PerOperation};
use crate::error::CrudError;
use crate::forms::binder::{BoundForm, ValidationFailure};
use crate::forms::config::FormConfig;
use crate::forms::field::{FormField, InputType, SelectOption};
use crate::schema::{CrudModel, ValueKind};

/// Default generic validation-error message
pub const DEFAULT_VALIDATION_ERROR_MESSAGE: &str = "Please fix the errors and try again";

/// Build the widget for one property.
///
/// Resolution order: explicit field provider, explicit field-kind override,
/// then the built-in default chosen from the property's value kind.
pub(crate) fn build_field(property: &str, kind: ValueKind, config: &FormConfig) -> FormField {
    if let Some(provider) = config.field_provider(property) {
        return provider.build_field();
    }
    if let Some(kind_override) = config.field_kind_override(property) {
        let mut field = FormField::input(property, InputType::Text);
        field.kind = kind_override.clone();
        return field;
    }
    match kind {
        ValueKind::Bool => FormField::checkbox(property),
        ValueKind::Select { variants } => FormField::select(
            property,
            variants
                .iter()
                .map(|v| SelectOption::new(*v, *v))
                .collect(),
        ),
        ValueKind::Int | ValueKind::BigInt | ValueKind::Float => {
            FormField::input(property, InputType::Number)
        }
        ValueKind::Date => FormField::date_picker(property),
        ValueKind::Char | ValueKind::Text => FormField::input(property, InputType::Text),
    }
}

/// Icon tag for an operation or toolbar button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ButtonIcon {
    /// Confirmation check mark
    Check,
    /// Trash can
    Trash,
    /// Plus sign
    Plus,
    /// Pencil
    Pencil,
    /// Refresh arrows
    Refresh,
}

/// A renderer-agnostic button handle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    /// Caption text
    pub caption: String,
    /// Optional icon tag
    pub icon: Option<ButtonIcon>,
    /// Style class names
    pub style_classes: Vec<String>,
}

impl Button {
    fn new(caption: &str, icon: Option<ButtonIcon>) -> Self {
        Self {
            caption: caption.to_string(),
            icon,
            style_classes: Vec::new(),
        }
    }
}

/// One operation's renderable form: bound widgets plus footer buttons
pub struct CrudForm<T> {
    /// Operation this form was built for
    pub operation: CrudOperation,
    /// Form caption
    pub caption: String,
    /// Operation (commit) button; absent when no commit path exists
    pub operation_button: Option<Button>,
    /// Cancel button; absent when no cancel path exists
    pub cancel_button: Option<Button>,
    form: BoundForm<T>,
}

impl<T: CrudModel> CrudForm<T> {
    /// Bound widgets, in configuration order
    #[must_use]
    pub fn fields(&self) -> &[FormField] {
        self.form.fields()
    }

    /// Type text into the widget bound to `property`.
    pub fn set_text(&mut self, property: &str, text: impl Into<String>) {
        if let Some(field) = self.form.field_mut(property) {
            field.set_text(text);
        }
    }

    /// Toggle the checkbox bound to `property`.
    pub fn set_checked(&mut self, property: &str, checked: bool) {
        if let Some(field) = self.form.field_mut(property) {
            field.set_checked(checked);
        }
    }

    /// Mutable access to the widget bound to `property`
    pub fn field_mut(&mut self, property: &str) -> Option<&mut FormField> {
        self.form.field_mut(property)
    }

    /// Attempt to write widget values back into `object`.
    ///
    /// On failure nothing is mutated; the caller surfaces the failure's
    /// generic message and keeps the form open.
    pub fn commit(&self, object: &mut T) -> Result<(), ValidationFailure> {
        self.form.try_commit(object)
    }

    /// Whether the form was built read-only
    #[must_use]
    pub const fn is_read_only(&self) -> bool {
        self.form.is_read_only()
    }
}

impl<T> fmt::Debug for CrudForm<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CrudForm")
            .field("operation", &self.operation)
            .field("caption", &self.caption)
            .field("operation_button", &self.operation_button)
            .field("cancel_button", &self.cancel_button)
            .finish_non_exhaustive()
    }
}

/// Factory assembling auto-generated forms for every CRUD operation
pub struct CrudFormFactory<T> {
    configs: PerOperation<FormConfig>,
    buttons: PerOperation<Button>,
    form_captions: PerOperation<String>,
    cancel_caption: String,
    validation_error_message: String,
    _marker: PhantomData<T>,
}

impl<T: CrudModel> CrudFormFactory<T> {
    /// Build a factory with one independent configuration per operation,
    /// each seeded from the domain type's schema.
    pub fn new() -> Result<Self, CrudError> {
        Ok(Self {
            configs: PerOperation {
                read: FormConfig::for_schema::<T>()?,
                add: FormConfig::for_schema::<T>()?,
                update: FormConfig::for_schema::<T>()?,
                delete: FormConfig::for_schema::<T>()?,
            },
            buttons: PerOperation {
                read: Button::new("Ok", None),
                add: Button::new("Add", Some(ButtonIcon::Check)),
                update: Button::new("Update", Some(ButtonIcon::Check)),
                delete: Button::new("Yes, delete", Some(ButtonIcon::Trash)),
            },
            form_captions: PerOperation {
                read: "Details".to_string(),
                add: "New item".to_string(),
                update: "Edit item".to_string(),
                delete: "Confirm deletion".to_string(),
            },
            cancel_caption: "Cancel".to_string(),
            validation_error_message: DEFAULT_VALIDATION_ERROR_MESSAGE.to_string(),
            _marker: PhantomData,
        })
    }

    /// Configuration of one operation's form
    #[must_use]
    pub fn config(&self, operation: CrudOperation) -> &FormConfig {
        self.configs.get(operation)
    }

    /// Mutable configuration of one operation's form
    pub fn config_mut(&mut self, operation: CrudOperation) -> &mut FormConfig {
        self.configs.get_mut(operation)
    }

    /// Set one operation button's caption.
    pub fn set_button_caption(&mut self, operation: CrudOperation, caption: impl Into<String>) {
        self.buttons.get_mut(operation).caption = caption.into();
    }

    /// Set one operation button's icon.
    pub fn set_button_icon(&mut self, operation: CrudOperation, icon: Option<ButtonIcon>) {
        self.buttons.get_mut(operation).icon = icon;
    }

    /// Add a style class to one operation's button.
    pub fn add_button_style(&mut self, operation: CrudOperation, class: impl Into<String>) {
        self.buttons.get_mut(operation).style_classes.push(class.into());
    }

    /// Set one operation's form caption.
    pub fn set_form_caption(&mut self, operation: CrudOperation, caption: impl Into<String>) {
        *self.form_captions.get_mut(operation) = caption.into();
    }

    /// Set the cancel button's caption.
    pub fn set_cancel_caption(&mut self, caption: impl Into<String>) {
        self.cancel_caption = caption.into();
    }

    /// Set the generic validation-error message.
    pub fn set_validation_error_message(&mut self, message: impl Into<String>) {
        self.validation_error_message = message.into();
    }

    /// Assemble a form for `operation`, loaded from `object`.
    ///
    /// `with_operation_button` and `with_cancel_button` reflect whether the
    /// embedding controller registered the corresponding flow; a button
    /// without a flow is omitted entirely.
    pub fn build_form(
        &self,
        operation: CrudOperation,
        object: &T,
        read_only: bool,
        with_operation_button: bool,
        with_cancel_button: bool,
    ) -> Result<CrudForm<T>, CrudError> {
        let config = self.configs.get(operation);
        let mut form = BoundForm::bind(config, self.validation_error_message.clone(), read_only)?;
        form.load(object);

        Ok(CrudForm {
            operation,
            caption: self.form_captions.get(operation).clone(),
            operation_button: with_operation_button
                .then(|| self.buttons.get(operation).clone()),
            cancel_button: with_cancel_button.then(|| Button {
                caption: self.cancel_caption.clone(),
                icon: None,
                style_classes: Vec::new(),
            }),
            form,
        })
    }
}

impl<T> fmt::Debug for CrudFormFactory<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CrudFormFactory")
            .field("cancel_caption", &self.cancel_caption)
            .field("validation_error_message", &self.validation_error_message)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::field::FieldKind;
    use crate::testing::{person, Person};

    #[test]
    fn test_default_button_records() {
        let factory = CrudFormFactory::<Person>::new().unwrap();
        let form = factory
            .build_form(CrudOperation::Delete, &person("Ann", 30), true, true, true)
            .unwrap();
        let button = form.operation_button.unwrap();
        assert_eq!(button.caption, "Yes, delete");
        assert_eq!(button.icon, Some(ButtonIcon::Trash));
        assert_eq!(form.cancel_button.unwrap().caption, "Cancel");
    }

    #[test]
    fn test_buttons_omitted_without_flows() {
        let factory = CrudFormFactory::<Person>::new().unwrap();
        let form = factory
            .build_form(CrudOperation::Read, &person("Ann", 30), true, true, false)
            .unwrap();
        assert!(form.operation_button.is_some());
        assert!(form.cancel_button.is_none());
    }

    #[test]
    fn test_field_kind_override() {
        let mut factory = CrudFormFactory::<Person>::new().unwrap();
        factory
            .config_mut(CrudOperation::Add)
            .set_field_kind("age", FieldKind::Input(InputType::Text));
        let form = factory
            .build_form(CrudOperation::Add, &person("Ann", 30), false, true, true)
            .unwrap();
        assert_eq!(
            form.fields()[1].kind,
            FieldKind::Input(InputType::Text)
        );
    }

    #[test]
    fn test_provider_takes_precedence() {
        let mut factory = CrudFormFactory::<Person>::new().unwrap();
        factory
            .config_mut(CrudOperation::Add)
            .set_field_kind("name", FieldKind::DatePicker);
        factory
            .config_mut(CrudOperation::Add)
            .set_field_provider("name", || FormField::input("name", InputType::Text));
        let form = factory
            .build_form(CrudOperation::Add, &person("Ann", 30), false, true, true)
            .unwrap();
        assert_eq!(form.fields()[0].kind, FieldKind::Input(InputType::Text));
    }

    #[test]
    fn test_form_loads_values() {
        let factory = CrudFormFactory::<Person>::new().unwrap();
        let form = factory
            .build_form(CrudOperation::Update, &person("Ann", 30), false, true, true)
            .unwrap();
        assert_eq!(form.fields()[0].text(), "Ann");
        assert_eq!(form.fields()[1].text(), "30");
    }

    #[test]
    fn test_configs_are_independent() {
        let mut factory = CrudFormFactory::<Person>::new().unwrap();
        factory
            .config_mut(CrudOperation::Update)
            .set_visible_properties(["age"]);
        assert_eq!(
            factory.config(CrudOperation::Add).visible_properties(),
            ["name", "age"]
        );
        assert_eq!(
            factory.config(CrudOperation::Update).visible_properties(),
            ["age"]
        );
    }
}
