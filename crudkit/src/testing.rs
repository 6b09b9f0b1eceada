//! Shared fixtures for the unit tests

use validator::{Validate, ValidationError, ValidationErrors};

use crate::crud::CrudDataSource;
use crate::error::CrudError;
use crate::schema::{CrudModel, CrudSchema, FieldValue, Property, PropertyError, ValueKind};

/// Hand-wired domain type; the derive macro has its own coverage in the
/// integration tests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Person {
    pub name: String,
    pub age: i32,
}

impl CrudSchema for Person {
    fn properties() -> &'static [Property] {
        const PROPERTIES: &[Property] = &[
            Property {
                name: "name",
                kind: ValueKind::Text,
            },
            Property {
                name: "age",
                kind: ValueKind::Int,
            },
        ];
        PROPERTIES
    }
}

impl CrudModel for Person {
    fn get(&self, property: &str) -> Option<FieldValue> {
        match property {
            "name" => Some(FieldValue::Text(self.name.clone())),
            "age" => Some(FieldValue::Int(i64::from(self.age))),
            _ => None,
        }
    }

    fn set(&mut self, property: &str, value: FieldValue) -> Result<(), PropertyError> {
        match (property, value) {
            ("name", FieldValue::Text(text)) => {
                self.name = text;
                Ok(())
            }
            ("age", FieldValue::Int(int)) => {
                self.age = i32::try_from(int).map_err(|_| PropertyError::out_of_range("age"))?;
                Ok(())
            }
            ("name" | "age", other) => Err(PropertyError::kind_mismatch(property, other.kind())),
            _ => Err(PropertyError::unknown(property)),
        }
    }
}

impl Validate for Person {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.name.trim().is_empty() {
            let mut error = ValidationError::new("length");
            error.message = Some("Name is required".into());
            errors.add("name", error);
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

pub fn person(name: &str, age: i32) -> Person {
    Person {
        name: name.to_string(),
        age,
    }
}

/// Vec-backed data source with per-operation failure injection
///
/// Updates and deletes key on the person's name.
#[derive(Default)]
pub struct InMemorySource {
    items: Vec<Person>,
    find_all_calls: usize,
    add_error: Option<CrudError>,
    update_error: Option<CrudError>,
    delete_error: Option<CrudError>,
}

impl InMemorySource {
    pub fn with_items(items: Vec<Person>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    pub fn find_all_calls(&self) -> usize {
        self.find_all_calls
    }

    pub fn fail_add_known(&mut self, message: &str) {
        self.add_error = Some(CrudError::operation_failed(message));
    }

    pub fn fail_update_known(&mut self, message: &str) {
        self.update_error = Some(CrudError::operation_failed(message));
    }

    pub fn fail_delete_known(&mut self, message: &str) {
        self.delete_error = Some(CrudError::operation_failed(message));
    }

    pub fn fail_delete_unexpected(&mut self, message: &str) {
        self.delete_error = Some(CrudError::unexpected(message));
    }
}

impl CrudDataSource<Person> for InMemorySource {
    fn find_all(&mut self) -> Result<Vec<Person>, CrudError> {
        self.find_all_calls += 1;
        Ok(self.items.clone())
    }

    fn add(&mut self, item: Person) -> Result<Person, CrudError> {
        if let Some(err) = self.add_error.take() {
            return Err(err);
        }
        self.items.push(item.clone());
        Ok(item)
    }

    fn update(&mut self, item: Person) -> Result<Person, CrudError> {
        if let Some(err) = self.update_error.take() {
            return Err(err);
        }
        let slot = self
            .items
            .iter_mut()
            .find(|candidate| candidate.name == item.name)
            .ok_or_else(|| CrudError::operation_failed("no such person"))?;
        *slot = item.clone();
        Ok(item)
    }

    fn delete(&mut self, item: &Person) -> Result<(), CrudError> {
        if let Some(err) = self.delete_error.take() {
            return Err(err);
        }
        self.items.retain(|candidate| candidate.name != item.name);
        Ok(())
    }
}
