//! Widget bootstrap: merge URL values, defaults and option sets into session
//! state before the host renders each widget.

pub mod autoupdate;
pub mod errors;
pub mod renderer;
pub mod scalar;
pub mod selection;
pub mod types;
pub mod validation;

pub use autoupdate::compose_on_change;
pub use errors::WidgetError;
pub use renderer::{HeadlessRenderer, WidgetRenderer};
pub use scalar::infer_numeric_type;
pub use types::{NumberDefault, WidgetArgs, WidgetDefault, WidgetKind, WidgetRequest};
pub use validation::{ensure_no_none_options, require_key};
