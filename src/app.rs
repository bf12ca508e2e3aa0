//! Root application component
//!
//! The App struct implements the Component trait, acting as the root component
//! that delegates event handling and rendering to child components.
//! `App::update` is the one dispatch table: every action ends in a
//! view-model transition, a submission, or a follow-up action.

use crate::action::Action;
use crate::component::Component;
use crate::components::dropdown::{self, nav_lines, NavLine};
use crate::components::layout::contains;
use crate::components::{
    draw_home_screen, ConfirmDialog, EditDialog, Focus, HomeComponent, HomeRenderContext,
    TableComponent,
};
use crate::config::Config;
use crate::error::{ViewError, ViewResult};
use crate::model::catalog::{self, search_input_id, KITS};
use crate::model::link::{self, LinkOutcome, DELETE_PROMPT};
use crate::model::modal::Modal;
use crate::model::record::CONVERSION_KIT;
use crate::model::{
    Dataset, DialogArgs, DialogKind, InventorySummary, RecordFamily, RecordRef, ViewOptions,
    ViewState,
};
use crate::services::{self, routes, Route, Submission, SubmissionSink};
use anyhow::Result;
use chrono::Local;
use crossterm::event::{
    KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{layout::Rect, Frame};
use std::fmt::Display;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info, warn};

// ═══════════════════════════════════════════════════════════════════════════════
// App Struct
// ═══════════════════════════════════════════════════════════════════════════════

/// Main application state - coordinates between components
pub struct App {
    /// Records behind the tables
    pub data: Dataset,

    /// Tables, forms, dropdowns and modals
    pub view: ViewState,

    /// Stock figures, recomputed after each local echo
    pub summary: InventorySummary,

    /// Where form posts and confirmed links go
    sink: Box<dyn SubmissionSink>,

    /// Directory CSV exports are written to
    pub export_dir: PathBuf,

    /// Flag to indicate the app should quit
    pub should_quit: bool,

    /// Error message to display
    pub error: Option<String>,

    /// Status message to display
    pub status_message: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // Child Components
    // ─────────────────────────────────────────────────────────────────────────
    pub home: HomeComponent,
    pub table: TableComponent,
    pub edit_dialog: EditDialog,
    pub confirm_dialog: ConfirmDialog,
}

impl App {
    pub fn new(config: &Config, data: Dataset, sink: Box<dyn SubmissionSink>) -> App {
        let options = ViewOptions {
            page_size: config.page_size,
            show_created_at: config.show_created_at,
        };
        let view = ViewState::new(&data, options);
        let summary = InventorySummary::from_dataset(&data);

        Self {
            data,
            view,
            summary,
            sink,
            export_dir: PathBuf::from("."),
            should_quit: false,
            error: None,
            status_message: None,
            home: HomeComponent::new(KITS),
            table: TableComponent::new(),
            edit_dialog: EditDialog::new(),
            confirm_dialog: ConfirmDialog,
        }
    }

    pub fn with_export_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.export_dir = dir.into();
        self
    }

    fn visible_count(&self) -> usize {
        self.view
            .table(&self.home.active_table)
            .map(|t| t.visible_count())
            .unwrap_or(0)
    }

    /// Record behind the selected row of the active table
    fn selected_record(&self) -> Option<RecordRef> {
        let table = self.view.table(&self.home.active_table).ok()?;
        let position = self.home.selected?;
        table.visible_rows().nth(position).map(|(_, row)| row.record)
    }

    /// Dialog on top of the modal stack, if the top modal is a dialog
    fn top_dialog(&self) -> Option<DialogKind> {
        match self.view.modals.top() {
            Some(Modal::Dialog(kind)) => Some(*kind),
            _ => None,
        }
    }

    /// Paginate action for the active table's next or previous control
    fn page_step(&self, forward: bool) -> Option<Action> {
        let table_id = self.home.active_table.clone();
        let controls = self.view.table(&table_id).ok()?.controls()?;
        let page = if forward {
            controls.next
        } else {
            controls.previous
        }?;
        Some(Action::Paginate { table_id, page })
    }

    fn report(&mut self, error: impl Display) {
        let message = error.to_string();
        warn!(error = %message, "action failed");
        self.error = Some(message);
    }

    /// Fill a dialog from the record's current values and show it
    fn open_editor(&mut self, kind: DialogKind, record: RecordRef) -> ViewResult<()> {
        let id = record.id;
        let args = match kind {
            DialogKind::Item => self.data.item(id).map(DialogArgs::for_item),
            DialogKind::ReturnStatus => self
                .data
                .return_record(id)
                .map(DialogArgs::for_return_status),
            DialogKind::Return => self.data.return_record(id).map(DialogArgs::for_return),
            DialogKind::Replacement => self.data.replacement(id).map(DialogArgs::for_replacement),
            _ => None,
        }
        .ok_or(ViewError::UnknownRecord {
            kind: record.family.name(),
            id,
        })?;
        self.view.open_dialog(kind, Some(id), &args)
    }

    /// Show a creation dialog; dated forms start on today
    fn open_creator(&mut self, kind: DialogKind, args: DialogArgs) {
        let today = Local::now().format("%Y-%m-%d").to_string();
        let args = args.with("date", Some(today));
        if let Err(e) = self.view.open_dialog(kind, None, &args) {
            self.report(e);
        }
    }

    /// Serial of the selected row when it is a conversion kit
    fn selected_kit_serial(&self) -> Option<String> {
        let record = self.selected_record()?;
        if record.family != RecordFamily::Item {
            return None;
        }
        self.data
            .item(record.id)
            .filter(|item| item.item_type == CONVERSION_KIT)
            .map(|item| item.serial.clone())
    }

    /// Re-run the active table's filter from its query input
    fn apply_filter(&mut self) {
        let table_id = self.home.active_table.clone();
        match self.view.filter(&search_input_id(&table_id), &table_id) {
            Ok(_) => {
                let visible = self.visible_count();
                self.home.select_first(visible);
            }
            Err(e) => self.report(e),
        }
    }

    /// Hand a submission to the sink, then echo it into the dataset
    ///
    /// Returns whether the sink accepted it.
    fn submit(&mut self, submission: Submission) -> bool {
        if let Err(e) = self.sink.submit(&submission) {
            self.report(format!("Failed to submit {}: {}", submission.action, e));
            return false;
        }
        info!(
            method = ?submission.method,
            action = %submission.action,
            "submission sent"
        );

        let today = Local::now().date_naive();
        let applied = Route::parse(&submission.action)
            .and_then(|route| routes::apply(&mut self.data, route, &submission.fields, today));
        match applied {
            Ok(()) => {
                self.view.refresh_rows(&self.data);
                self.summary = InventorySummary::from_dataset(&self.data);
                let visible = self.visible_count();
                self.home.clamp_selection(visible);
                self.error = None;
                self.status_message = Some(format!("Submitted {}", submission.action));
            }
            Err(e) => self.report(e),
        }
        true
    }

    fn handle_click(&mut self, column: u16, row: u16) -> Option<Action> {
        if let Some(modal) = self.view.modals.top().cloned() {
            // Only edit dialogs close on a backdrop click
            if let Modal::Dialog(kind) = modal {
                let outside = self
                    .edit_dialog
                    .area(kind)
                    .is_some_and(|area| !contains(area, column, row));
                if outside {
                    return Some(Action::CloseDialog(kind));
                }
            }
            return None;
        }

        let hitboxes = self.home.hitboxes;
        if let Some(page) = hitboxes.controls.page_at(column, row) {
            return Some(Action::Paginate {
                table_id: self.home.active_table.clone(),
                page,
            });
        }
        if contains(hitboxes.nav, column, row) {
            let lines = nav_lines(&self.view.dropdowns).len();
            if let Some(index) = dropdown::line_at(hitboxes.nav, row, lines) {
                self.home.focus = Focus::Nav;
                self.home.nav_cursor = index;
                return Some(Action::NavSelect);
            }
            return None;
        }
        if contains(hitboxes.table, column, row) {
            let visible = self.visible_count();
            if let Some(index) = self.table.row_at(hitboxes.table, row, visible) {
                self.home.focus = Focus::Table;
                self.home.selected = Some(index);
            }
        }
        None
    }

    fn handle_search_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Enter => Some(Action::ExitSearchMode),
            KeyCode::Backspace => Some(Action::SearchBackspace),
            KeyCode::Char(c) => Some(Action::SearchInput(c)),
            _ => None,
        };
        Ok(action)
    }

    fn draw_modal(&mut self, frame: &mut Frame, area: Rect, modal: &Modal) -> Result<()> {
        match modal {
            Modal::Dialog(kind) => {
                self.edit_dialog
                    .draw_with_form(frame, area, *kind, self.view.form(*kind))?;
            }
            Modal::ConfirmDelete { path } => {
                self.confirm_dialog
                    .draw_with_prompt(frame, area, "Delete?", DELETE_PROMPT, Some(path))?;
            }
            Modal::QuitConfirm => self.confirm_dialog.draw(frame, area)?,
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for App {
    fn init(&mut self) -> Result<()> {
        let paginated = self.view.wire();
        let visible = self.visible_count();
        self.home.select_first(visible);
        info!(
            tables = self.view.tables().len(),
            paginated = ?paginated,
            "Inventory view loaded successfully"
        );
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(Some(Action::ForceQuit));
        }

        // A key press acknowledges the last message
        self.error = None;
        self.status_message = None;

        if let Some(modal) = self.view.modals.top().cloned() {
            match modal {
                Modal::Dialog(kind) => Ok(EditDialog::key_action(kind, key)),
                Modal::ConfirmDelete { .. } | Modal::QuitConfirm => {
                    self.confirm_dialog.handle_key_event(key)
                }
            }
        } else if self.home.search_mode {
            self.handle_search_key_event(key)
        } else {
            self.home.handle_key_event(key)
        }
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        let action = match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => Some(Action::Click(mouse.column, mouse.row)),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        if action != Action::Tick {
            debug!(action = %action, "dispatch");
        }

        match action {
            // ─────────────────────────────────────────────────────────────────
            // App Lifecycle
            // ─────────────────────────────────────────────────────────────────
            Action::Tick => self.view.tick(Instant::now()),
            Action::Resize(_, _) => {}
            Action::ForceQuit => {
                self.should_quit = true;
            }
            Action::OpenQuitDialog => {
                self.view.modals.push(Modal::QuitConfirm);
            }

            // ─────────────────────────────────────────────────────────────────
            // Table navigation
            // ─────────────────────────────────────────────────────────────────
            Action::NextRow => {
                let visible = self.visible_count();
                self.home.next(visible);
            }
            Action::PrevRow => {
                let visible = self.visible_count();
                self.home.previous(visible);
            }
            Action::FirstRow => {
                let visible = self.visible_count();
                self.home.select_first(visible);
            }
            Action::LastRow => {
                let visible = self.visible_count();
                self.home.select_last(visible);
            }
            Action::Paginate { table_id, page } => match self.view.paginate(&table_id, page) {
                Ok(_) => {
                    if table_id == self.home.active_table {
                        let visible = self.visible_count();
                        self.home.select_first(visible);
                    }
                }
                Err(e) => self.report(e),
            },
            Action::NextPage => return Ok(self.page_step(true)),
            Action::PrevPage => return Ok(self.page_step(false)),
            Action::ShowTable(table_id) => match self.view.table(&table_id) {
                Ok(table) => {
                    let visible = table.visible_count();
                    self.home.show_table(&table_id, visible);
                }
                Err(e) => self.report(e),
            },

            // ─────────────────────────────────────────────────────────────────
            // Navigation menu
            // ─────────────────────────────────────────────────────────────────
            Action::ToggleFocus => self.home.toggle_focus(),
            Action::NavUp => {
                let lines = nav_lines(&self.view.dropdowns).len();
                self.home.nav_up(lines);
            }
            Action::NavDown => {
                let lines = nav_lines(&self.view.dropdowns).len();
                self.home.nav_down(lines);
            }
            Action::NavSelect => {
                let lines = nav_lines(&self.view.dropdowns);
                return Ok(match lines.get(self.home.nav_cursor) {
                    Some(NavLine::Header(id)) => Some(Action::ToggleDropdown(id.clone())),
                    Some(NavLine::Entry(table_id)) => Some(Action::ShowTable(table_id.clone())),
                    None => None,
                });
            }
            Action::ToggleDropdown(id) => {
                match self.view.toggle_dropdown(&id, Instant::now()) {
                    Ok(open) => debug!(dropdown = %id, open, "dropdown toggled"),
                    Err(e) => self.report(e),
                }
                let lines = nav_lines(&self.view.dropdowns).len();
                self.home.clamp_nav(lines);
            }

            // ─────────────────────────────────────────────────────────────────
            // Search
            // ─────────────────────────────────────────────────────────────────
            Action::EnterSearchMode => self.home.search_mode = true,
            Action::ExitSearchMode => self.home.search_mode = false,
            Action::SearchInput(c) => {
                let input_id = search_input_id(&self.home.active_table);
                match self.view.query_input_mut(&input_id) {
                    Ok(input) => input.value.push(c),
                    Err(e) => self.report(e),
                }
                self.apply_filter();
            }
            Action::SearchBackspace => {
                let input_id = search_input_id(&self.home.active_table);
                match self.view.query_input_mut(&input_id) {
                    Ok(input) => {
                        input.value.pop();
                    }
                    Err(e) => self.report(e),
                }
                self.apply_filter();
            }

            // ─────────────────────────────────────────────────────────────────
            // Records
            // ─────────────────────────────────────────────────────────────────
            Action::EditSelected => {
                let Some(record) = self.selected_record() else {
                    self.status_message = Some("No row selected".to_string());
                    return Ok(None);
                };
                let kind = match record.family {
                    RecordFamily::Item => DialogKind::Item,
                    RecordFamily::Return => DialogKind::Return,
                    RecordFamily::Replacement => DialogKind::Replacement,
                };
                if let Err(e) = self.open_editor(kind, record) {
                    self.report(e);
                }
            }
            Action::EditReturnStatus => match self.selected_record() {
                Some(record) if record.family == RecordFamily::Return => {
                    if let Err(e) = self.open_editor(DialogKind::ReturnStatus, record) {
                        self.report(e);
                    }
                }
                _ => self.status_message = Some("Select a return to change its status".to_string()),
            },
            Action::ProcessSelected => match self.selected_record() {
                Some(record) if record.family == RecordFamily::Return => {
                    return Ok(Some(Action::Navigate(
                        Route::ProcessReturn(record.id).to_string(),
                    )));
                }
                _ => self.status_message = Some("Select a return to process".to_string()),
            },
            Action::DeleteSelected => {
                if let Some(record) = self.selected_record() {
                    return Ok(Some(Action::Navigate(catalog::delete_path(record))));
                }
                self.status_message = Some("No row selected".to_string());
            }
            Action::NewRecord => match catalog::create_kind(&self.home.active_table) {
                Some(kind) => self.open_creator(kind, DialogArgs::new()),
                None => self.status_message = Some("Nothing to add here".to_string()),
            },
            Action::AllocateSelected => match self.selected_kit_serial() {
                Some(serial) => {
                    let args = DialogArgs::new().with("new_item_serial", Some(serial));
                    self.open_creator(DialogKind::NewAllocation, args);
                }
                None => self.status_message = Some("Select a kit to allocate".to_string()),
            },
            Action::Navigate(path) => match link::guard(&path) {
                LinkOutcome::Confirm(path) => {
                    self.view.modals.push(Modal::ConfirmDelete { path });
                }
                LinkOutcome::Proceed(path) => {
                    self.submit(Submission::get(path));
                }
            },
            Action::ExportTable => {
                let table_id = self.home.active_table.clone();
                let path = self
                    .export_dir
                    .join(services::default_export_name(&table_id));
                let exported = self
                    .view
                    .table(&table_id)
                    .map_err(anyhow::Error::from)
                    .and_then(|table| services::export_visible(table, &path));
                match exported {
                    Ok(rows) => {
                        info!(table = %table_id, rows, path = %path.display(), "exported");
                        self.status_message =
                            Some(format!("Exported {} rows to {}", rows, path.display()));
                    }
                    Err(e) => self.report(format!("Export failed: {}", e)),
                }
            }

            // ─────────────────────────────────────────────────────────────────
            // Dialogs
            // ─────────────────────────────────────────────────────────────────
            Action::CloseDialog(kind) => {
                self.view.close_dialog(kind);
            }
            Action::FieldNext => {
                if let Some(kind) = self.top_dialog() {
                    self.view.form_mut(kind).focus_next();
                }
            }
            Action::FieldPrev => {
                if let Some(kind) = self.top_dialog() {
                    self.view.form_mut(kind).focus_prev();
                }
            }
            Action::FieldInput(c) => {
                if let Some(kind) = self.top_dialog() {
                    self.view.form_mut(kind).input(c);
                }
            }
            Action::FieldBackspace => {
                if let Some(kind) = self.top_dialog() {
                    self.view.form_mut(kind).backspace();
                }
            }
            Action::FieldCycle(forward) => {
                if let Some(kind) = self.top_dialog() {
                    self.view.form_mut(kind).cycle_choice(forward);
                }
            }
            Action::SubmitForm => {
                let Some(kind) = self.top_dialog() else {
                    return Ok(None);
                };
                match self.view.validate(kind.spec().form_id) {
                    Ok(true) => {
                        let form = self.view.form(kind);
                        let submission = Submission::post(form.action.clone(), form.payload());
                        if self.submit(submission) {
                            self.view.close_dialog(kind);
                        }
                    }
                    Ok(false) => {
                        self.status_message = Some("Please fill in all required fields".to_string());
                    }
                    Err(e) => self.report(e),
                }
            }
            Action::CloseModal => {
                self.view.modals.pop();
            }
            Action::ConfirmModal => match self.view.modals.top().cloned() {
                Some(Modal::QuitConfirm) => return Ok(Some(Action::ForceQuit)),
                Some(Modal::ConfirmDelete { path }) => {
                    self.view.modals.pop();
                    self.submit(Submission::get(path));
                }
                Some(Modal::Dialog(_)) => return Ok(Some(Action::SubmitForm)),
                None => {}
            },

            // ─────────────────────────────────────────────────────────────────
            // Mouse
            // ─────────────────────────────────────────────────────────────────
            Action::Click(column, row) => return Ok(self.handle_click(column, row)),
        }

        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let ctx = HomeRenderContext {
            view: &self.view,
            summary: &self.summary,
            error: self.error.as_deref(),
            status_message: self.status_message.as_deref(),
        };
        draw_home_screen(frame, area, &mut self.home, &mut self.table, &ctx)?;

        // Every shown modal, bottom to top
        let modals: Vec<Modal> = self.view.modals.iter().cloned().collect();
        for modal in &modals {
            self.draw_modal(frame, area, modal)?;
        }
        Ok(())
    }
}
