//! Per-session coordination of widgets, session state and the URL.

pub mod operations;
pub mod types;

pub use operations::SyncContext;
pub use types::{SyncScope, SyncSettings};
