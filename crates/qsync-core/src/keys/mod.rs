//! Key set resolution and the export blacklist.

pub mod blacklist;
pub mod errors;
pub mod resolver;

pub use blacklist::Blacklist;
pub use errors::KeyFilterError;
pub use resolver::{ExportPolicy, KeyArg, KeySelector};
