//! Model layer - centralized state management
//!
//! This module contains all state-related types:
//! - `Dataset` - the inventory records being viewed
//! - `ViewState` - tables, forms, dropdowns and modals built over the records
//! - `ModalStack` - Modal overlay management
//! - `InventorySummary` - stock figures over the records

pub mod catalog;
pub mod dialog;
pub mod dropdown;
pub mod form;
pub mod link;
pub mod modal;
pub mod record;
pub mod summary;
pub mod table;
pub mod view;

// Re-export commonly used types
pub use dialog::{DialogArgs, DialogKind};
pub use form::{FieldKind, FieldMark, Form};
pub use record::{Dataset, RecordFamily, RecordRef};
pub use summary::InventorySummary;
pub use table::{PaginationControls, Table};
pub use view::{ViewOptions, ViewState};
