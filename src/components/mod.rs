//! UI Components
//!
//! Each component encapsulates its own state, event handling, and rendering logic.
//! Components communicate through Actions rather than direct state mutation.

pub mod confirm_dialog;
pub mod dropdown;
pub mod edit_dialog;
pub mod home;
pub mod layout;
pub mod pagination;
pub mod summary;
pub mod table;

pub use confirm_dialog::ConfirmDialog;
pub use edit_dialog::EditDialog;
pub use home::{draw_home_screen, Focus, HomeComponent, HomeRenderContext};
pub use layout::{calculate_main_layout, centered_popup};
pub use table::TableComponent;
