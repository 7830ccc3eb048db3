//! Layout, focus and tag engine of ldwm.
// We deny clippy pedantic lints, primarily to keep code as correct as possible.
#![warn(clippy::pedantic)]
// Each of these lints are globally allowed because they otherwise make a lot
// of noise.
#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::must_use_candidate,
    clippy::module_name_repetitions,
    clippy::default_trait_access
)]
pub mod bar;
mod command;
pub mod config;
mod display_action;
mod display_event;
pub mod display_servers;
pub mod errors;
mod event_loop;
mod handlers;
pub mod layouts;
pub mod models;
pub mod state;
pub mod utils;

pub use command::Command;
pub use config::{Config, Keybind, Mousebind};
pub use display_action::{CursorShape, DisplayAction, WindowState};
pub use display_event::{DisplayEvent, PropertyChange, StateAction};
pub use display_servers::DisplayServer;
pub use errors::{LdwmError, Result};
pub use models::Handle;
pub use models::Manager;
pub use models::Mode;
pub use state::State;
pub use utils::child_process;

/// Version string shown in the bar when no status text is set.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
