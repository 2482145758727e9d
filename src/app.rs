//! Application module: exposes the view model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model`; it wraps the transport and keeps the
//! few bits of state that belong to the terminal UI (the list cursor).

mod model;

pub use model::*;
