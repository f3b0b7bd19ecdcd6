//! qsync-core: two-way sync between widget session state and the URL query string
//!
//! Widgets read their initial value from the query string when a page is
//! opened, and callbacks write session state back so the URL can be shared
//! or bookmarked.
//!
//! # Main Entry Points
//!
//! - [`context::SyncContext`] - widget bootstrap and export for one session
//! - [`writer`] - query-string callbacks and permalinks
//! - [`keys`] - key selection and the blacklist
//! - [`codec`] - decoding query-string text into typed values
//! - [`config`] - configuration management
//!
//! ```
//! use qsync_core::{SyncContext, Value, WidgetArgs, str_values};
//!
//! let mut ctx = SyncContext::in_memory("?color=green");
//! let color = ctx
//!     .selectbox_qs(
//!         WidgetArgs::new("Color").key("color"),
//!         str_values(["red", "green"]),
//!         Some(0),
//!     )
//!     .unwrap();
//! assert_eq!(color, Value::from("green"));
//! ```

pub mod codec;
pub mod config;
pub mod context;
pub mod errors;
pub mod events;
pub mod keys;
pub mod logging;
pub mod query;
pub mod session;
pub mod value;
pub mod widgets;
pub mod writer;

// Re-export commonly used types at crate root for convenience
pub use codec::{Codec, CodecError, ConfigWarning, NumericType, make_enum_codec};
pub use config::QsyncConfig;
pub use context::{SyncContext, SyncScope, SyncSettings};
pub use errors::{QsyncError, SyncError, SyncResult};
pub use keys::{Blacklist, ExportPolicy, KeyArg, KeySelector};
pub use query::{MemoryQueryParams, QueryParams, read_index, read_list, read_scalar};
pub use session::{MemorySessionState, SessionState};
pub use value::{EnumMember, EnumType, OptionKind, Value, ensure_list, str_values};
pub use widgets::{HeadlessRenderer, NumberDefault, WidgetArgs, WidgetRenderer};
pub use writer::{
    Callback, CallbackChain, add_qs_callback, clear_qs_callback, make_permalink, set_qs_callback,
    update_qs_callback,
};

pub use logging::init_logging;
