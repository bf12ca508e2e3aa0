//! View state - every piece of interactive state in one place
//!
//! Tables, query inputs, edit forms, dropdowns and the modal stack are
//! plain fields here. Components read this to draw; `App` mutates it in
//! response to actions.

use super::catalog::{self, search_input_id};
use super::dialog::{self, DialogArgs, DialogKind};
use super::dropdown::DropdownGroup;
use super::form::Form;
use super::modal::{Modal, ModalStack};
use super::record::Dataset;
use super::table::{PaginationControls, Table, PAGE_SIZE};
use crate::error::{ViewError, ViewResult};
use std::collections::HashMap;
use std::time::Instant;
use tracing::debug;

/// Text input bound to a table's filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryInput {
    pub id: String,
    pub value: String,
}

/// Layout options that shape the view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewOptions {
    pub page_size: usize,
    /// Whether the item form carries the optional created-at field
    pub show_created_at: bool,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            page_size: PAGE_SIZE,
            show_created_at: true,
        }
    }
}

#[derive(Debug)]
pub struct ViewState {
    pub page_size: usize,
    tables: Vec<Table>,
    inputs: Vec<QueryInput>,
    forms: HashMap<DialogKind, Form>,
    pub dropdowns: DropdownGroup,
    pub modals: ModalStack,
}

impl ViewState {
    pub fn new(data: &Dataset, options: ViewOptions) -> Self {
        let tables = catalog::build_tables(data);
        let inputs = tables
            .iter()
            .map(|t| QueryInput {
                id: search_input_id(&t.id),
                value: String::new(),
            })
            .collect();
        let forms = DialogKind::all()
            .into_iter()
            .map(|kind| {
                let include_optional = kind != DialogKind::Item || options.show_created_at;
                (kind, dialog::build_form(kind.spec(), include_optional))
            })
            .collect();
        Self {
            // A zero page would hide every row
            page_size: if options.page_size == 0 {
                PAGE_SIZE
            } else {
                options.page_size
            },
            tables,
            inputs,
            forms,
            dropdowns: DropdownGroup::new(catalog::build_dropdowns()),
            modals: ModalStack::new(),
        }
    }

    /// One-time startup pass: paginate every table longer than a page
    ///
    /// Returns the ids of the tables that were paginated.
    pub fn wire(&mut self) -> Vec<String> {
        let page_size = self.page_size;
        let mut paginated = Vec::new();
        for table in &mut self.tables {
            if table.len() > page_size {
                table.paginate(1, page_size);
                paginated.push(table.id.clone());
            }
        }
        paginated
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Tables
    // ─────────────────────────────────────────────────────────────────────────

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn table(&self, id: &str) -> ViewResult<&Table> {
        self.tables
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| ViewError::UnknownTable(id.to_string()))
    }

    fn table_mut(&mut self, id: &str) -> ViewResult<&mut Table> {
        self.tables
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| ViewError::UnknownTable(id.to_string()))
    }

    /// Show one page of a table and regenerate its controls
    pub fn paginate(&mut self, table_id: &str, page: usize) -> ViewResult<PaginationControls> {
        let page_size = self.page_size;
        let controls = self.table_mut(table_id)?.paginate(page, page_size).clone();
        debug!(table = table_id, page, total = controls.total_pages, "paginated");
        Ok(controls)
    }

    pub fn query_input(&self, id: &str) -> ViewResult<&QueryInput> {
        self.inputs
            .iter()
            .find(|i| i.id == id)
            .ok_or_else(|| ViewError::UnknownInput(id.to_string()))
    }

    pub fn query_input_mut(&mut self, id: &str) -> ViewResult<&mut QueryInput> {
        self.inputs
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| ViewError::UnknownInput(id.to_string()))
    }

    /// Filter a table by the current text of a query input
    ///
    /// Returns the number of matching rows.
    pub fn filter(&mut self, input_id: &str, table_id: &str) -> ViewResult<usize> {
        let query = self.query_input(input_id)?.value.clone();
        let matching = self.table_mut(table_id)?.filter(&query);
        debug!(table = table_id, query = %query, matching, "filtered");
        Ok(matching)
    }

    /// Rebuild rows after the dataset changed
    ///
    /// Paginated tables are paginated again at their current page so the
    /// page count reflects the new row count.
    pub fn refresh_rows(&mut self, data: &Dataset) {
        let page_size = self.page_size;
        for table in &mut self.tables {
            if let Some(rows) = catalog::rows_for(&table.id, data) {
                table.replace_rows(rows);
            }
            if let Some(page) = table.current_page() {
                table.paginate(page, page_size);
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Dialogs and forms
    // ─────────────────────────────────────────────────────────────────────────

    pub fn form(&self, kind: DialogKind) -> &Form {
        &self.forms[&kind]
    }

    pub fn form_mut(&mut self, kind: DialogKind) -> &mut Form {
        self.forms
            .entry(kind)
            .or_insert_with(|| dialog::build_form(kind.spec(), true))
    }

    pub fn form_by_id(&mut self, form_id: &str) -> ViewResult<&mut Form> {
        self.forms
            .values_mut()
            .find(|f| f.id == form_id)
            .ok_or_else(|| ViewError::UnknownForm(form_id.to_string()))
    }

    /// Fill a dialog's form and show it
    ///
    /// `id` names the edited record; creation dialogs pass `None`.
    pub fn open_dialog(
        &mut self,
        kind: DialogKind,
        id: Option<i64>,
        args: &DialogArgs,
    ) -> ViewResult<()> {
        let spec = kind.spec();
        dialog::populate(self.form_mut(kind), spec, id, args)?;
        self.modals.show(Modal::Dialog(kind));
        debug!(dialog = spec.modal_id, id = ?id, "dialog opened");
        Ok(())
    }

    /// Hide one dialog; returns whether it was shown
    pub fn close_dialog(&mut self, kind: DialogKind) -> bool {
        self.modals.hide(&Modal::Dialog(kind))
    }

    pub fn is_dialog_open(&self, kind: DialogKind) -> bool {
        self.modals.contains(&Modal::Dialog(kind))
    }

    /// Check a form's required fields, marking the blank ones
    pub fn validate(&mut self, form_id: &str) -> ViewResult<bool> {
        Ok(self.form_by_id(form_id)?.validate())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Dropdowns
    // ─────────────────────────────────────────────────────────────────────────

    pub fn toggle_dropdown(&mut self, id: &str, now: Instant) -> ViewResult<bool> {
        self.dropdowns.toggle(id, now)
    }

    pub fn tick(&mut self, now: Instant) {
        self.dropdowns.tick(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::catalog::{KITS, RETURNS, SPARE_PARTS};
    use crate::model::form::FieldMark;
    use crate::model::record::{Item, ReturnRecord, SPARE_PART};

    fn part(id: i64, name: &str) -> Item {
        Item {
            id,
            serial: format!("SP{id:03}"),
            item_name: name.to_string(),
            item_type: SPARE_PART.to_string(),
            admin: "Inventory".to_string(),
            created_at: None,
            units_imported: 10,
            units_installed: 1,
            units_available: 9,
        }
    }

    fn dataset(parts: usize) -> Dataset {
        Dataset {
            items: (0..parts as i64).map(|i| part(i, "Throttle")).collect(),
            returns: vec![ReturnRecord {
                id: 1,
                date: "2024-01-25".into(),
                item_serial: "15092501".into(),
                personnel: "John Doe".into(),
                status: "pending".into(),
                notes: "Kit returned for maintenance".into(),
                processed_date: None,
                condition_rating: 5,
            }],
            replacements: Vec::new(),
        }
    }

    #[test]
    fn test_wire_paginates_only_oversized_tables() {
        let mut view = ViewState::new(&dataset(51), ViewOptions::default());
        assert_eq!(view.wire(), vec![SPARE_PARTS.to_string()]);
        assert_eq!(view.table(SPARE_PARTS).unwrap().visible_count(), 50);
        assert!(view.table(RETURNS).unwrap().controls().is_none());
    }

    #[test]
    fn test_paginate_unknown_table_fails() {
        let mut view = ViewState::new(&dataset(1), ViewOptions::default());
        assert_eq!(
            view.paginate("nope", 1),
            Err(ViewError::UnknownTable("nope".to_string()))
        );
    }

    #[test]
    fn test_filter_reads_query_input() {
        let mut view = ViewState::new(&dataset(3), ViewOptions::default());
        view.query_input_mut("returns_search").unwrap().value = "MAINTENANCE".into();
        assert_eq!(view.filter("returns_search", RETURNS).unwrap(), 1);
        view.query_input_mut("returns_search").unwrap().value = "zzz".into();
        assert_eq!(view.filter("returns_search", RETURNS).unwrap(), 0);
        assert_eq!(view.table(RETURNS).unwrap().visible_count(), 0);
    }

    #[test]
    fn test_filter_unknown_ids_fail() {
        let mut view = ViewState::new(&dataset(1), ViewOptions::default());
        assert!(matches!(
            view.filter("missing", RETURNS),
            Err(ViewError::UnknownInput(_))
        ));
        assert!(matches!(
            view.filter("returns_search", "missing"),
            Err(ViewError::UnknownTable(_))
        ));
    }

    #[test]
    fn test_open_and_close_dialog() {
        let mut view = ViewState::new(&dataset(1), ViewOptions::default());
        let item = part(0, "Throttle");
        view.open_dialog(DialogKind::Item, Some(0), &DialogArgs::for_item(&item))
            .unwrap();
        assert!(view.is_dialog_open(DialogKind::Item));
        assert_eq!(view.form(DialogKind::Item).action, "/update_item/0");
        assert_eq!(view.form(DialogKind::Item).value("item_name"), Some("Throttle"));

        assert!(view.close_dialog(DialogKind::Item));
        assert!(!view.is_dialog_open(DialogKind::Item));
    }

    #[test]
    fn test_item_form_without_created_at() {
        let options = ViewOptions {
            show_created_at: false,
            ..Default::default()
        };
        let view = ViewState::new(&dataset(1), options);
        assert!(view.form(DialogKind::Item).field("created_at").is_none());
        assert!(view.form(DialogKind::Return).field("date").is_some());
    }

    #[test]
    fn test_validate_by_form_id() {
        let mut view = ViewState::new(&dataset(1), ViewOptions::default());
        assert!(!view.validate("edit_replacement_form").unwrap());
        let form = view.form(DialogKind::Replacement);
        assert_eq!(form.field("date").unwrap().mark, FieldMark::Error);
        assert!(matches!(
            view.validate("nope"),
            Err(ViewError::UnknownForm(_))
        ));
    }

    #[test]
    fn test_refresh_rows_repaginates() {
        let mut view = ViewState::new(&dataset(120), ViewOptions::default());
        view.wire();
        view.paginate(SPARE_PARTS, 3).unwrap();
        view.refresh_rows(&dataset(60));
        let table = view.table(SPARE_PARTS).unwrap();
        let controls = table.controls().unwrap();
        assert_eq!(controls.current, 3);
        assert_eq!(controls.total_pages, 2);
        assert_eq!(table.visible_count(), 0);
        assert!(view.table(KITS).unwrap().is_empty());
    }

    #[test]
    fn test_zero_page_size_keeps_rows_visible() {
        let options = ViewOptions {
            page_size: 0,
            ..Default::default()
        };
        let mut view = ViewState::new(&dataset(3), options);
        assert_eq!(view.page_size, PAGE_SIZE);
        assert!(view.wire().is_empty());
        assert_eq!(view.table(SPARE_PARTS).unwrap().visible_count(), 3);
    }

    #[test]
    fn test_open_creation_dialog() {
        let mut view = ViewState::new(&dataset(1), ViewOptions::default());
        let args = DialogArgs::new().with("item_type", Some(SPARE_PART.into()));
        view.open_dialog(DialogKind::NewItem, None, &args).unwrap();
        assert!(view.is_dialog_open(DialogKind::NewItem));
        let form = view.form(DialogKind::NewItem);
        assert_eq!(form.action, "/add_item");
        assert_eq!(form.value("units_imported"), Some("0"));

        assert!(view
            .open_dialog(DialogKind::Return, None, &DialogArgs::new())
            .is_err());
        assert!(!view.is_dialog_open(DialogKind::Return));
    }
}
