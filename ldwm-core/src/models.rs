//! Objects (such as clients and the monitor) the engine works on.
mod client;
mod client_registry;
mod manager;
mod mode;
mod monitor;
mod pertag;
mod rule;
mod size_hints;
mod tag;
mod window_info;
mod xyhw;

pub use client::{Client, Handle, WindowHandle, BROKEN};
#[cfg(test)]
pub(crate) use client::MockHandle;
pub use client_registry::{ClientId, ClientRegistry};
pub use manager::Manager;
pub use mode::{Drag, Mode};
pub use monitor::Monitor;
pub use pertag::Pertag;
pub use rule::Rule;
pub use size_hints::{constrain, HintBounds, SizeHints};
pub use tag::{TagMask, Tags, MAX_TAGS};
pub use window_info::{ConfigureRequest, WindowInfo, WmHints};
pub use xyhw::Xyhw;
