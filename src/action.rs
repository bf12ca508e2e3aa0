//! Action enum - All possible application actions
//!
//! Actions are discrete operations that the application can perform.
//! Key and mouse events become Actions, and `App::update` is the single
//! place that turns them into state changes.

use crate::model::DialogKind;
use std::fmt;

/// All possible actions in the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Regular tick for transitions
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
    /// Force quit without confirmation
    ForceQuit,
    /// Open quit confirmation dialog
    OpenQuitDialog,

    // ─────────────────────────────────────────────────────────────────────────
    // Table navigation
    // ─────────────────────────────────────────────────────────────────────────
    /// Move to next visible row
    NextRow,
    /// Move to previous visible row
    PrevRow,
    /// Jump to first visible row
    FirstRow,
    /// Jump to last visible row
    LastRow,
    /// Show a page of a table
    Paginate { table_id: String, page: usize },
    /// Follow the active table's "next" control
    NextPage,
    /// Follow the active table's "previous" control
    PrevPage,
    /// Make a table the active one
    ShowTable(String),

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation menu
    // ─────────────────────────────────────────────────────────────────────────
    /// Move focus between the menu and the table
    ToggleFocus,
    NavUp,
    NavDown,
    /// Activate the highlighted menu line
    NavSelect,
    /// Open or close one dropdown
    ToggleDropdown(String),

    // ─────────────────────────────────────────────────────────────────────────
    // Search
    // ─────────────────────────────────────────────────────────────────────────
    EnterSearchMode,
    ExitSearchMode,
    /// Type into the active table's query input
    SearchInput(char),
    SearchBackspace,

    // ─────────────────────────────────────────────────────────────────────────
    // Records
    // ─────────────────────────────────────────────────────────────────────────
    /// Open the edit dialog for the selected row
    EditSelected,
    /// Open the status dialog for the selected return
    EditReturnStatus,
    /// Mark the selected return as processed
    ProcessSelected,
    /// Follow the selected row's delete link
    DeleteSelected,
    /// Open the creation dialog for the active table
    NewRecord,
    /// Open an allocation prefilled with the selected kit
    AllocateSelected,
    /// Follow a link to a submission target
    Navigate(String),
    /// Write the active table's visible rows to CSV
    ExportTable,

    // ─────────────────────────────────────────────────────────────────────────
    // Dialogs
    // ─────────────────────────────────────────────────────────────────────────
    CloseDialog(DialogKind),
    FieldNext,
    FieldPrev,
    FieldInput(char),
    FieldBackspace,
    /// Step a choice field forward (true) or back
    FieldCycle(bool),
    /// Validate and submit the top dialog's form
    SubmitForm,
    /// Close the current modal
    CloseModal,
    /// Confirm the current modal action
    ConfirmModal,

    // ─────────────────────────────────────────────────────────────────────────
    // Mouse
    // ─────────────────────────────────────────────────────────────────────────
    /// Left click at a terminal cell (column, row)
    Click(u16, u16),
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::ForceQuit => write!(f, "ForceQuit"),
            Action::OpenQuitDialog => write!(f, "OpenQuitDialog"),
            Action::NextRow => write!(f, "NextRow"),
            Action::PrevRow => write!(f, "PrevRow"),
            Action::FirstRow => write!(f, "FirstRow"),
            Action::LastRow => write!(f, "LastRow"),
            Action::Paginate { table_id, page } => {
                write!(f, "Paginate({}, {})", table_id, page)
            }
            Action::NextPage => write!(f, "NextPage"),
            Action::PrevPage => write!(f, "PrevPage"),
            Action::ShowTable(id) => write!(f, "ShowTable({})", id),
            Action::ToggleFocus => write!(f, "ToggleFocus"),
            Action::NavUp => write!(f, "NavUp"),
            Action::NavDown => write!(f, "NavDown"),
            Action::NavSelect => write!(f, "NavSelect"),
            Action::ToggleDropdown(id) => write!(f, "ToggleDropdown({})", id),
            Action::EnterSearchMode => write!(f, "EnterSearchMode"),
            Action::ExitSearchMode => write!(f, "ExitSearchMode"),
            Action::SearchInput(c) => write!(f, "SearchInput('{}')", c),
            Action::SearchBackspace => write!(f, "SearchBackspace"),
            Action::EditSelected => write!(f, "EditSelected"),
            Action::EditReturnStatus => write!(f, "EditReturnStatus"),
            Action::ProcessSelected => write!(f, "ProcessSelected"),
            Action::DeleteSelected => write!(f, "DeleteSelected"),
            Action::NewRecord => write!(f, "NewRecord"),
            Action::AllocateSelected => write!(f, "AllocateSelected"),
            Action::Navigate(path) => write!(f, "Navigate({})", path),
            Action::ExportTable => write!(f, "ExportTable"),
            Action::CloseDialog(kind) => write!(f, "CloseDialog({:?})", kind),
            Action::FieldNext => write!(f, "FieldNext"),
            Action::FieldPrev => write!(f, "FieldPrev"),
            Action::FieldInput(c) => write!(f, "FieldInput('{}')", c),
            Action::FieldBackspace => write!(f, "FieldBackspace"),
            Action::FieldCycle(forward) => write!(f, "FieldCycle({})", forward),
            Action::SubmitForm => write!(f, "SubmitForm"),
            Action::CloseModal => write!(f, "CloseModal"),
            Action::ConfirmModal => write!(f, "ConfirmModal"),
            Action::Click(x, y) => write!(f, "Click({}, {})", x, y),
        }
    }
}
