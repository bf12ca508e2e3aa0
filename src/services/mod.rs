//! Services outside the view model
//!
//! This module contains the pieces that touch the outside world:
//! - Submission targets and their local echo
//! - Submission delivery to the outbox
//! - Dataset snapshot loading
//! - CSV export

pub mod export;
pub mod outbox;
pub mod routes;
pub mod snapshot;

pub use export::{default_export_name, export_visible};
pub use outbox::{JsonlOutbox, Submission, SubmissionSink};
pub use routes::Route;
pub use snapshot::{load_snapshot, sample};
