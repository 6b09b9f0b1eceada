//! CRUD controller
//!
//! [`CrudGrid`] drives the listing and the operation lifecycles. Every user
//! action is an explicit transition method taking the current state and
//! returning the side-effect commands ([`Effect`]) the host should render,
//! so the whole flow is deterministic and testable without a live UI.
//!
//! All transitions run synchronously on the caller's thread; data-operation
//! callbacks may block or fail, and this layer only reacts to their results
//! in-line. Errors are contained per operation: a known operation failure
//! reconciles the listing and keeps the form open, an unexpected error is
//! re-raised to the host after the listing has been refreshed.

use tracing::{debug, error};

use crate::crud::listing::Listing;
use crate::crud::options::GridOptions;
use crate::crud::{CrudDataSource, CrudOperation, ErrorListener, InstanceFactory, LazyDataProvider};
use crate::error::CrudError;
use crate::forms::factory::{CrudForm, CrudFormFactory};
use crate::schema::CrudModel;

/// Controller state over the listing view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrudState {
    /// No selection, list populated
    Listing,
    /// Exactly one row selected
    Selected,
    /// A form is displayed over or beside the listing
    FormOpen(CrudOperation),
}

/// Side-effect command for the host to render
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Display the currently open form
    ShowForm {
        /// Operation the form belongs to
        operation: CrudOperation,
        /// Form caption
        caption: String,
    },
    /// Hide any displayed form
    HideForm,
    /// Show a notification, when notifications are enabled
    Notify(String),
    /// Scroll the listing to a row
    ScrollTo(usize),
}

/// Visibility and enablement of one toolbar button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonState {
    /// Whether the button is shown
    pub visible: bool,
    /// Whether the button is clickable
    pub enabled: bool,
}

/// Toolbar state derived from selection and options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolbarState {
    /// Find-all (refresh) button
    pub find_all: ButtonState,
    /// Add button
    pub add: ButtonState,
    /// Update button
    pub update: ButtonState,
    /// Delete button
    pub delete: ButtonState,
}

enum Retrieval<T> {
    Eager,
    Lazy(Box<dyn LazyDataProvider<T>>),
}

struct OpenForm<T> {
    form: CrudForm<T>,
    working: T,
}

/// Listing plus CRUD orchestration over a data source
pub struct CrudGrid<T: CrudModel, S: CrudDataSource<T>> {
    source: S,
    listing: Listing<T>,
    form_factory: CrudFormFactory<T>,
    options: GridOptions,
    retrieval: Retrieval<T>,
    instance_factory: Option<InstanceFactory<T>>,
    error_listener: Option<ErrorListener>,
    open_form: Option<OpenForm<T>>,
}

impl<T: CrudModel, S: CrudDataSource<T>> CrudGrid<T, S> {
    /// Create a controller with default options and an auto-generated form
    /// factory.
    pub fn new(source: S) -> Result<Self, CrudError> {
        Ok(Self::with_parts(
            source,
            CrudFormFactory::new()?,
            GridOptions::default(),
        ))
    }

    /// Create a controller from explicit parts.
    #[must_use]
    pub fn with_parts(source: S, form_factory: CrudFormFactory<T>, options: GridOptions) -> Self {
        Self {
            source,
            listing: Listing::new(options.auto_columns),
            form_factory,
            options,
            retrieval: Retrieval::Eager,
            instance_factory: None,
            error_listener: None,
            open_form: None,
        }
    }

    /// Install a lazy paged provider; `find_all` is no longer consulted.
    pub fn set_lazy_provider(&mut self, provider: impl LazyDataProvider<T> + 'static) {
        self.retrieval = Retrieval::Lazy(Box::new(provider));
    }

    /// Install a factory for fresh objects in the add flow.
    ///
    /// The default uses `T::default()` and cannot fail; a failing custom
    /// factory aborts the add flow with a logged, non-fatal error.
    pub fn set_instance_factory(
        &mut self,
        factory: impl Fn() -> Result<T, CrudError> + 'static,
    ) {
        self.instance_factory = Some(Box::new(factory));
    }

    /// Install an error sink replacing the default display-and-reraise
    /// behavior for commit-time errors.
    pub fn set_error_listener(
        &mut self,
        listener: impl Fn(CrudOperation, &CrudError) + 'static,
    ) {
        self.error_listener = Some(Box::new(listener));
    }

    /// The form factory, for configuring captions, buttons and fields
    #[must_use]
    pub fn form_factory(&self) -> &CrudFormFactory<T> {
        &self.form_factory
    }

    /// Mutable form factory
    pub fn form_factory_mut(&mut self) -> &mut CrudFormFactory<T> {
        &mut self.form_factory
    }

    /// Controller options
    #[must_use]
    pub const fn options(&self) -> &GridOptions {
        &self.options
    }

    /// Mutable controller options
    pub fn options_mut(&mut self) -> &mut GridOptions {
        &mut self.options
    }

    /// The listing view model
    #[must_use]
    pub const fn listing(&self) -> &Listing<T> {
        &self.listing
    }

    /// The data source
    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Mutable data source
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// The currently open form, if any
    #[must_use]
    pub fn form(&self) -> Option<&CrudForm<T>> {
        self.open_form.as_ref().map(|open| &open.form)
    }

    /// Mutable access to the currently open form (to enter values)
    pub fn form_mut(&mut self) -> Option<&mut CrudForm<T>> {
        self.open_form.as_mut().map(|open| &mut open.form)
    }

    /// Current controller state
    #[must_use]
    pub fn state(&self) -> CrudState {
        if let Some(open) = &self.open_form {
            CrudState::FormOpen(open.form.operation)
        } else if self.listing.selected_index().is_some() {
            CrudState::Selected
        } else {
            CrudState::Listing
        }
    }

    /// Toolbar state: update/delete are enabled iff exactly one row is
    /// selected; add/find-all are always enabled.
    #[must_use]
    pub fn toolbar(&self) -> ToolbarState {
        let row_selected = self.listing.selected_index().is_some();
        let operations = self.options.operations;
        ToolbarState {
            find_all: ButtonState {
                visible: operations.find_all,
                enabled: true,
            },
            add: ButtonState {
                visible: operations.add,
                enabled: true,
            },
            update: ButtonState {
                visible: operations.update,
                enabled: row_selected,
            },
            delete: ButtonState {
                visible: operations.delete,
                enabled: row_selected,
            },
        }
    }

    /// Reload the item set from the data source or the lazy provider.
    pub fn refresh(&mut self) -> Result<(), CrudError> {
        let items = match &mut self.retrieval {
            Retrieval::Eager => self.source.find_all()?,
            Retrieval::Lazy(provider) => provider.fetch(0, self.options.lazy_page_size)?,
        };
        debug!(count = items.len(), "listing reloaded");
        self.listing.set_items(items);
        Ok(())
    }

    fn total_count(&mut self) -> Result<usize, CrudError> {
        match &mut self.retrieval {
            Retrieval::Eager => Ok(self.listing.row_count()),
            Retrieval::Lazy(provider) => provider.size(),
        }
    }

    /// Find-all button: clear selection, reload, report the item count.
    pub fn find_all_clicked(&mut self) -> Result<Vec<Effect>, CrudError> {
        self.listing.clear_selection();
        self.open_form = None;
        self.refresh()?;
        let count = self.total_count()?;
        let mut effects = vec![Effect::HideForm];
        if self.options.show_notifications {
            effects.push(Effect::Notify(self.options.format_row_count(count)));
        }
        Ok(effects)
    }

    /// Row selection: opens a read-only detail form, or an editable update
    /// form in click-row-to-update mode.
    pub fn select_row(&mut self, index: usize) -> Result<Vec<Effect>, CrudError> {
        if !self.listing.select(index) {
            return Ok(Vec::new());
        }
        if self.options.click_row_to_update {
            return self.update_clicked();
        }
        let Some(working) = self.listing.selected().cloned() else {
            return Ok(Vec::new());
        };
        // The READ form's "Ok" button clears the selection; it has no
        // separate cancel path.
        self.show_form(CrudOperation::Read, working, true, false)
    }

    /// Row deselection: back to the plain listing.
    pub fn deselect(&mut self) -> Vec<Effect> {
        self.listing.clear_selection();
        self.open_form = None;
        vec![Effect::HideForm]
    }

    /// Add button: open an ADD form over a freshly constructed object.
    ///
    /// A failing instance factory aborts the transition; the error is
    /// logged and the listing and selection are left unchanged.
    pub fn add_clicked(&mut self) -> Result<Vec<Effect>, CrudError> {
        let instance = match &self.instance_factory {
            Some(factory) => match factory() {
                Ok(instance) => instance,
                Err(err) => {
                    error!(error = %err, "could not construct a new domain object; add flow aborted");
                    return Ok(Vec::new());
                }
            },
            None => T::default(),
        };
        self.show_form(CrudOperation::Add, instance, false, true)
    }

    /// Update button: open an editable UPDATE form over the selected item.
    pub fn update_clicked(&mut self) -> Result<Vec<Effect>, CrudError> {
        let Some(working) = self.listing.selected().cloned() else {
            return Ok(Vec::new());
        };
        self.show_form(CrudOperation::Update, working, false, true)
    }

    /// Delete button: open a read-only confirmation form over the selected
    /// item.
    pub fn delete_clicked(&mut self) -> Result<Vec<Effect>, CrudError> {
        let Some(working) = self.listing.selected().cloned() else {
            return Ok(Vec::new());
        };
        self.show_form(CrudOperation::Delete, working, true, true)
    }

    fn show_form(
        &mut self,
        operation: CrudOperation,
        working: T,
        read_only: bool,
        with_cancel_button: bool,
    ) -> Result<Vec<Effect>, CrudError> {
        let form =
            self.form_factory
                .build_form(operation, &working, read_only, true, with_cancel_button)?;
        let caption = form.caption.clone();
        self.open_form = Some(OpenForm { form, working });
        Ok(vec![Effect::ShowForm { operation, caption }])
    }

    /// Cancel button: close the form without committing.
    ///
    /// Restores the prior selection, except in click-row-to-update mode
    /// where cancel clears the selection.
    pub fn cancel_form(&mut self) -> Vec<Effect> {
        if self.open_form.take().is_none() {
            return Vec::new();
        }
        if self.options.click_row_to_update {
            self.listing.clear_selection();
        }
        vec![Effect::HideForm]
    }

    /// Operation button: commit the open form.
    ///
    /// Validation failure keeps the form open and reports the configured
    /// generic message without touching the domain object or the data
    /// source. On data-source success the listing refreshes, the affected
    /// object is re-selected for ADD/UPDATE, and the form closes unless in
    /// click-row-to-update mode. A known operation failure refreshes the
    /// listing but keeps the form and selection; an unexpected error
    /// refreshes the listing and is then re-raised (or routed to the
    /// installed error listener).
    pub fn commit_form(&mut self) -> Result<Vec<Effect>, CrudError> {
        let Some(open) = self.open_form.as_mut() else {
            return Ok(Vec::new());
        };
        let operation = open.form.operation;

        if operation == CrudOperation::Read {
            self.open_form = None;
            self.listing.clear_selection();
            return Ok(vec![Effect::HideForm]);
        }

        if matches!(operation, CrudOperation::Add | CrudOperation::Update) {
            if let Err(failure) = open.form.commit(&mut open.working) {
                return Ok(vec![Effect::Notify(failure.message)]);
            }
        }

        let working = open.working.clone();
        let result = match operation {
            CrudOperation::Add => self.source.add(working).map(Some),
            CrudOperation::Update => self.source.update(working).map(Some),
            CrudOperation::Delete => self.source.delete(&working).map(|()| None),
            CrudOperation::Read => unreachable!("read handled above"),
        };

        match result {
            Ok(stored) => {
                self.refresh()?;
                let mut effects = Vec::new();
                match operation {
                    CrudOperation::Add | CrudOperation::Update => {
                        if let Some(stored) = stored {
                            // Clear first so host selection handling fires
                            // even when the same row ends up selected again.
                            self.listing.clear_selection();
                            if let Some(index) = self.listing.select_item(&stored) {
                                effects.push(Effect::ScrollTo(index));
                            }
                        }
                    }
                    CrudOperation::Delete => self.listing.clear_selection(),
                    CrudOperation::Read => {}
                }
                if !self.options.click_row_to_update {
                    self.open_form = None;
                    effects.push(Effect::HideForm);
                }
                if self.options.show_notifications {
                    let message = if operation == CrudOperation::Delete {
                        self.options.deleted_message.clone()
                    } else {
                        self.options.saved_message.clone()
                    };
                    effects.push(Effect::Notify(message));
                }
                Ok(effects)
            }
            Err(err) if err.is_known_failure() => {
                // Reconcile with the backing state; the form stays open and
                // the selection is untouched.
                self.refresh()?;
                if let Some(listener) = &self.error_listener {
                    listener(operation, &err);
                    Ok(Vec::new())
                } else {
                    Ok(vec![Effect::Notify(err.to_string())])
                }
            }
            Err(err) => {
                self.refresh()?;
                if let Some(listener) = &self.error_listener {
                    listener(operation, &err);
                    Ok(Vec::new())
                } else {
                    Err(err)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{person, InMemorySource, Person};

    fn grid(items: Vec<Person>) -> CrudGrid<Person, InMemorySource> {
        let mut grid = CrudGrid::new(InMemorySource::with_items(items)).unwrap();
        grid.refresh().unwrap();
        grid
    }

    #[test]
    fn test_initial_state_is_listing() {
        let grid = grid(vec![person("Ann", 30)]);
        assert_eq!(grid.state(), CrudState::Listing);
        assert!(!grid.toolbar().update.enabled);
        assert!(!grid.toolbar().delete.enabled);
        assert!(grid.toolbar().add.enabled);
        assert!(grid.toolbar().find_all.enabled);
    }

    #[test]
    fn test_select_opens_read_form() {
        let mut grid = grid(vec![person("Ann", 30)]);
        let effects = grid.select_row(0).unwrap();
        assert_eq!(grid.state(), CrudState::FormOpen(CrudOperation::Read));
        assert!(matches!(
            effects[0],
            Effect::ShowForm {
                operation: CrudOperation::Read,
                ..
            }
        ));
        let form = grid.form().unwrap();
        assert!(form.is_read_only());
        assert!(form.cancel_button.is_none());
        assert!(grid.toolbar().update.enabled);
        assert!(grid.toolbar().delete.enabled);
    }

    #[test]
    fn test_read_form_ok_clears_selection() {
        let mut grid = grid(vec![person("Ann", 30)]);
        grid.select_row(0).unwrap();
        let effects = grid.commit_form().unwrap();
        assert_eq!(effects, vec![Effect::HideForm]);
        assert_eq!(grid.state(), CrudState::Listing);
    }

    #[test]
    fn test_invalid_row_is_ignored() {
        let mut grid = grid(vec![person("Ann", 30)]);
        assert!(grid.select_row(5).unwrap().is_empty());
        assert_eq!(grid.state(), CrudState::Listing);
    }

    #[test]
    fn test_update_clicked_without_selection_is_ignored() {
        let mut grid = grid(vec![person("Ann", 30)]);
        assert!(grid.update_clicked().unwrap().is_empty());
        assert!(grid.delete_clicked().unwrap().is_empty());
    }

    #[test]
    fn test_add_commit_refreshes_and_selects() {
        let mut grid = grid(vec![person("Ann", 30)]);
        grid.add_clicked().unwrap();
        assert_eq!(grid.state(), CrudState::FormOpen(CrudOperation::Add));

        let form = grid.form_mut().unwrap();
        form.set_text("name", "Bob");
        form.set_text("age", "40");
        let effects = grid.commit_form().unwrap();

        assert_eq!(grid.listing().row_count(), 2);
        assert_eq!(grid.listing().selected(), Some(&person("Bob", 40)));
        assert_eq!(grid.state(), CrudState::Selected);
        assert!(effects.contains(&Effect::HideForm));
        assert!(effects.contains(&Effect::Notify("Item saved".into())));
    }

    #[test]
    fn test_add_validation_failure_keeps_form_open() {
        let mut grid = grid(vec![]);
        grid.add_clicked().unwrap();
        let form = grid.form_mut().unwrap();
        form.set_text("name", "Bob");
        form.set_text("age", "abc");

        let effects = grid.commit_form().unwrap();
        assert_eq!(grid.state(), CrudState::FormOpen(CrudOperation::Add));
        assert_eq!(
            effects,
            vec![Effect::Notify("Please fix the errors and try again".into())]
        );
        assert_eq!(grid.listing().row_count(), 0);
    }

    #[test]
    fn test_failing_instance_factory_aborts_add() {
        let mut grid = grid(vec![person("Ann", 30)]);
        grid.set_instance_factory(|| {
            Err(CrudError::Instantiation("no default for Person".into()))
        });
        let effects = grid.add_clicked().unwrap();
        assert!(effects.is_empty());
        assert_eq!(grid.state(), CrudState::Listing);
        assert_eq!(grid.listing().row_count(), 1);
    }

    #[test]
    fn test_update_commit_reselects_updated_item() {
        let mut grid = grid(vec![person("Ann", 30), person("Bob", 40)]);
        grid.select_row(1).unwrap();
        grid.update_clicked().unwrap();
        grid.form_mut().unwrap().set_text("age", "41");

        let effects = grid.commit_form().unwrap();
        assert_eq!(grid.listing().selected(), Some(&person("Bob", 41)));
        assert!(effects.iter().any(|e| matches!(e, Effect::ScrollTo(_))));
    }

    #[test]
    fn test_delete_commit_clears_selection() {
        let mut grid = grid(vec![person("Ann", 30)]);
        grid.select_row(0).unwrap();
        grid.delete_clicked().unwrap();
        assert!(grid.form().unwrap().is_read_only());

        let effects = grid.commit_form().unwrap();
        assert_eq!(grid.listing().row_count(), 0);
        assert_eq!(grid.state(), CrudState::Listing);
        assert!(effects.contains(&Effect::Notify("Item deleted".into())));
    }

    #[test]
    fn test_known_failure_keeps_form_and_selection() {
        let mut grid = grid(vec![person("Ann", 30)]);
        grid.select_row(0).unwrap();
        grid.delete_clicked().unwrap();
        grid.source_mut().fail_delete_known("row is referenced");

        let effects = grid.commit_form().unwrap();
        assert_eq!(grid.state(), CrudState::FormOpen(CrudOperation::Delete));
        assert_eq!(grid.listing().selected(), Some(&person("Ann", 30)));
        assert_eq!(effects, vec![Effect::Notify("row is referenced".into())]);
    }

    #[test]
    fn test_unexpected_failure_is_reraised_after_refresh() {
        let mut grid = grid(vec![person("Ann", 30)]);
        grid.select_row(0).unwrap();
        grid.delete_clicked().unwrap();
        grid.source_mut().fail_delete_unexpected("connection lost");

        let err = grid.commit_form().unwrap_err();
        assert!(!err.is_known_failure());
        // the refresh ran before the error was re-raised
        assert_eq!(grid.source_mut().find_all_calls(), 2);
    }

    #[test]
    fn test_error_listener_contains_unexpected_errors() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let seen: Rc<RefCell<Vec<String>>> = Rc::default();
        let mut grid = grid(vec![person("Ann", 30)]);
        let sink = Rc::clone(&seen);
        grid.set_error_listener(move |operation, err| {
            sink.borrow_mut().push(format!("{operation}: {err}"));
        });
        grid.select_row(0).unwrap();
        grid.delete_clicked().unwrap();
        grid.source_mut().fail_delete_unexpected("connection lost");

        let effects = grid.commit_form().unwrap();
        assert!(effects.is_empty());
        assert_eq!(
            seen.borrow().as_slice(),
            ["delete: unexpected error: connection lost"]
        );
    }

    #[test]
    fn test_find_all_reports_row_count() {
        let mut grid = grid(vec![person("Ann", 30), person("Bob", 40)]);
        grid.select_row(0).unwrap();
        let effects = grid.find_all_clicked().unwrap();
        assert_eq!(grid.state(), CrudState::Listing);
        assert_eq!(
            effects,
            vec![
                Effect::HideForm,
                Effect::Notify("2 item(s) found".into())
            ]
        );
    }

    #[test]
    fn test_click_row_to_update_opens_editable_form() {
        let mut grid = grid(vec![person("Ann", 30)]);
        grid.options_mut().click_row_to_update = true;
        grid.select_row(0).unwrap();

        let form = grid.form().unwrap();
        assert_eq!(form.operation, CrudOperation::Update);
        assert!(!form.is_read_only());
    }

    #[test]
    fn test_click_row_to_update_cancel_clears_selection() {
        let mut grid = grid(vec![person("Ann", 30)]);
        grid.options_mut().click_row_to_update = true;
        grid.select_row(0).unwrap();

        let effects = grid.cancel_form();
        assert_eq!(effects, vec![Effect::HideForm]);
        assert_eq!(grid.state(), CrudState::Listing);
    }

    #[test]
    fn test_cancel_restores_prior_selection() {
        let mut grid = grid(vec![person("Ann", 30)]);
        grid.select_row(0).unwrap();
        grid.update_clicked().unwrap();

        grid.cancel_form();
        assert_eq!(grid.state(), CrudState::Selected);
        assert_eq!(grid.listing().selected_index(), Some(0));
    }

    #[test]
    fn test_lazy_provider_drives_refresh_and_count() {
        struct Pages;
        impl LazyDataProvider<Person> for Pages {
            fn size(&mut self) -> Result<usize, CrudError> {
                Ok(250)
            }
            fn fetch(&mut self, offset: usize, limit: usize) -> Result<Vec<Person>, CrudError> {
                assert_eq!(offset, 0);
                Ok((0..limit.min(3))
                    .map(|i| person(&format!("p{i}"), i as i32))
                    .collect())
            }
        }

        let mut grid = grid(vec![]);
        grid.set_lazy_provider(Pages);
        let effects = grid.find_all_clicked().unwrap();
        assert_eq!(grid.listing().row_count(), 3);
        assert!(effects.contains(&Effect::Notify("250 item(s) found".into())));
    }
}
