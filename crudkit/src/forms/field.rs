//! Form field types and widget configuration
//!
//! Defines the widget kinds the field factory can produce and the
//! attributes a bound field carries. A [`FormField`] is a renderer-agnostic
//! widget handle: the host toolkit decides how to draw it.

/// Field attribute flags grouped for better ergonomics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldFlags {
    /// Whether field is read-only
    pub readonly: bool,
    /// Whether field is disabled
    pub disabled: bool,
    /// Autofocus this field
    pub autofocus: bool,
}

/// Input widget types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputType {
    /// Text input (default)
    #[default]
    Text,
    /// Numeric input
    Number,
}

impl InputType {
    /// Get the canonical type name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
        }
    }
}

impl std::fmt::Display for InputType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Option for select dropdowns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    /// Value submitted on selection
    pub value: String,
    /// Display text
    pub label: String,
}

impl SelectOption {
    /// Create a new select option
    #[must_use]
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Kind of form field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// Standard input field
    Input(InputType),
    /// Checkbox
    Checkbox {
        /// Whether checkbox is checked
        checked: bool,
    },
    /// Select dropdown
    Select {
        /// Available options
        options: Vec<SelectOption>,
    },
    /// Date picker; the raw value is an ISO-8601 date string
    DatePicker,
}

impl Default for FieldKind {
    fn default() -> Self {
        Self::Input(InputType::default())
    }
}

/// A form field with all its attributes
#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    /// Field name (matches the bound property)
    pub name: String,
    /// Field kind (input, checkbox, select, date picker)
    pub kind: FieldKind,
    /// Label text
    pub label: Option<String>,
    /// Current raw value, for all kinds except checkbox
    pub value: Option<String>,
    /// Field attribute flags (readonly, disabled, autofocus)
    pub flags: FieldFlags,
    /// Full-width layout hint (on by default)
    pub full_width: bool,
}

impl FormField {
    /// Create a new input field
    #[must_use]
    pub fn input(name: impl Into<String>, input_type: InputType) -> Self {
        Self::new(name, FieldKind::Input(input_type))
    }

    /// Create a new checkbox field
    #[must_use]
    pub fn checkbox(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Checkbox { checked: false })
    }

    /// Create a new select field
    #[must_use]
    pub fn select(name: impl Into<String>, options: Vec<SelectOption>) -> Self {
        Self::new(name, FieldKind::Select { options })
    }

    /// Create a new date picker field
    #[must_use]
    pub fn date_picker(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::DatePicker)
    }

    fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            label: None,
            value: None,
            flags: FieldFlags::default(),
            full_width: true,
        }
    }

    /// Current raw text value, empty if unset
    #[must_use]
    pub fn text(&self) -> &str {
        self.value.as_deref().unwrap_or("")
    }

    /// Set the raw text value (what a user types or picks)
    pub fn set_text(&mut self, value: impl Into<String>) {
        self.value = Some(value.into());
    }

    /// Whether a checkbox field is checked; `false` for other kinds
    #[must_use]
    pub const fn is_checked(&self) -> bool {
        matches!(self.kind, FieldKind::Checkbox { checked: true })
    }

    /// Set the checked state of a checkbox field; no-op for other kinds
    pub fn set_checked(&mut self, value: bool) {
        if let FieldKind::Checkbox { ref mut checked } = self.kind {
            *checked = value;
        }
    }

    /// Check if this field is an input type
    #[must_use]
    pub const fn is_input(&self) -> bool {
        matches!(self.kind, FieldKind::Input(_))
    }

    /// Check if this field is a checkbox
    #[must_use]
    pub const fn is_checkbox(&self) -> bool {
        matches!(self.kind, FieldKind::Checkbox { .. })
    }

    /// Check if this field is a select
    #[must_use]
    pub const fn is_select(&self) -> bool {
        matches!(self.kind, FieldKind::Select { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_type_as_str() {
        assert_eq!(InputType::Text.as_str(), "text");
        assert_eq!(InputType::Number.as_str(), "number");
    }

    #[test]
    fn test_form_field_input() {
        let field = FormField::input("email", InputType::Text);
        assert_eq!(field.name, "email");
        assert!(field.is_input());
        assert!(!field.is_checkbox());
        assert!(field.full_width);
    }

    #[test]
    fn test_checkbox_toggle() {
        let mut field = FormField::checkbox("active");
        assert!(!field.is_checked());
        field.set_checked(true);
        assert!(field.is_checked());
    }

    #[test]
    fn test_text_value() {
        let mut field = FormField::input("name", InputType::Text);
        assert_eq!(field.text(), "");
        field.set_text("Ann");
        assert_eq!(field.text(), "Ann");
    }

    #[test]
    fn test_select_options() {
        let field = FormField::select(
            "color",
            vec![
                SelectOption::new("Red", "Red"),
                SelectOption::new("Green", "Green"),
            ],
        );
        assert!(field.is_select());
        let FieldKind::Select { options } = &field.kind else {
            panic!("expected select");
        };
        assert_eq!(options.len(), 2);
    }
}
