//! Writing session state back into the query string.

pub mod callbacks;
pub mod chain;
pub mod permalink;

pub use callbacks::{add_qs_callback, clear_qs_callback, set_qs_callback, update_qs_callback};
pub use chain::{Callback, CallbackChain, CallbackFn};
pub use permalink::make_permalink;
