//! Per-operation form configuration
//!
//! Each CRUD operation owns an independent [`FormConfig`]; narrowing the
//! visible properties of the update form never affects the add form.

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::error::CrudError;
use crate::forms::field::{FieldKind, FormField};
use crate::schema::CrudSchema;

/// Caller-side widget instantiation for a single property
///
/// Closures work directly: any `Fn() -> FormField` is a provider.
pub trait FieldProvider {
    /// Build the widget for the bound property.
    fn build_field(&self) -> FormField;
}

impl<F: Fn() -> FormField> FieldProvider for F {
    fn build_field(&self) -> FormField {
        self()
    }
}

/// Post-creation hook invoked once per built field
pub type FieldCreationListener = Box<dyn Fn(&mut FormField)>;

/// Configuration of one operation's form
///
/// Seeded from the domain type's schema; callers may narrow, reorder and
/// decorate from there.
pub struct FormConfig {
    visible_properties: Vec<String>,
    field_captions: Vec<String>,
    disabled_properties: HashSet<String>,
    field_kinds: HashMap<String, FieldKind>,
    field_providers: HashMap<String, Box<dyn FieldProvider>>,
    creation_listeners: HashMap<String, FieldCreationListener>,
    use_validation: bool,
}

impl FormConfig {
    /// Seed a configuration from a domain type's schema.
    ///
    /// The default visible-property list is every schema property in
    /// declaration order. Fails with [`CrudError::Introspection`] when the
    /// type exposes no properties at all.
    pub fn for_schema<T: CrudSchema>() -> Result<Self, CrudError> {
        let properties = T::properties();
        if properties.is_empty() {
            return Err(CrudError::Introspection(
                "domain type exposes no editable properties".into(),
            ));
        }
        Ok(Self {
            visible_properties: properties.iter().map(|p| p.name.to_string()).collect(),
            field_captions: Vec::new(),
            disabled_properties: HashSet::new(),
            field_kinds: HashMap::new(),
            field_providers: HashMap::new(),
            creation_listeners: HashMap::new(),
            use_validation: false,
        })
    }

    /// Narrow or reorder the visible properties.
    pub fn set_visible_properties<S: Into<String>>(&mut self, properties: impl IntoIterator<Item = S>) {
        self.visible_properties = properties.into_iter().map(Into::into).collect();
    }

    /// Set captions parallel to the visible-property list.
    ///
    /// When empty (the default), captions fall back to a Title Case
    /// transform of the property name.
    pub fn set_field_captions<S: Into<String>>(&mut self, captions: impl IntoIterator<Item = S>) {
        self.field_captions = captions.into_iter().map(Into::into).collect();
    }

    /// Disable a property's widget (still shown, still bound).
    pub fn disable_property(&mut self, property: impl Into<String>) {
        self.disabled_properties.insert(property.into());
    }

    /// Override the widget kind for a property.
    pub fn set_field_kind(&mut self, property: impl Into<String>, kind: FieldKind) {
        self.field_kinds.insert(property.into(), kind);
    }

    /// Override widget construction for a property entirely.
    pub fn set_field_provider(
        &mut self,
        property: impl Into<String>,
        provider: impl FieldProvider + 'static,
    ) {
        self.field_providers
            .insert(property.into(), Box::new(provider));
    }

    /// Register a post-creation hook for a property's widget.
    pub fn on_field_created(
        &mut self,
        property: impl Into<String>,
        listener: impl Fn(&mut FormField) + 'static,
    ) {
        self.creation_listeners
            .insert(property.into(), Box::new(listener));
    }

    /// Validate the domain object's declared constraints before commit.
    pub fn set_use_validation(&mut self, use_validation: bool) {
        self.use_validation = use_validation;
    }

    /// Visible properties, in widget-creation and focus order
    #[must_use]
    pub fn visible_properties(&self) -> &[String] {
        &self.visible_properties
    }

    /// Caption override for the i-th visible property, if any
    #[must_use]
    pub fn field_caption(&self, index: usize) -> Option<&str> {
        self.field_captions.get(index).map(String::as_str)
    }

    /// Whether the property's widget is disabled
    #[must_use]
    pub fn is_disabled(&self, property: &str) -> bool {
        self.disabled_properties.contains(property)
    }

    pub(crate) fn field_kind_override(&self, property: &str) -> Option<&FieldKind> {
        self.field_kinds.get(property)
    }

    pub(crate) fn field_provider(&self, property: &str) -> Option<&dyn FieldProvider> {
        self.field_providers.get(property).map(Box::as_ref)
    }

    pub(crate) fn creation_listener(&self, property: &str) -> Option<&FieldCreationListener> {
        self.creation_listeners.get(property)
    }

    /// Whether declared constraints are checked at commit time
    #[must_use]
    pub const fn use_validation(&self) -> bool {
        self.use_validation
    }
}

impl fmt::Debug for FormConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormConfig")
            .field("visible_properties", &self.visible_properties)
            .field("field_captions", &self.field_captions)
            .field("disabled_properties", &self.disabled_properties)
            .field("use_validation", &self.use_validation)
            .finish_non_exhaustive()
    }
}
