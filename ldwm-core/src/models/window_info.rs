//! What a display server reports about a window.
use super::{Handle, SizeHints, WindowHandle, Xyhw};
use serde::{Deserialize, Serialize};

/// The `WM_HINTS` fields the engine cares about.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WmHints {
    pub urgent: bool,
    /// The input hint, when the client set one.
    pub input: Option<bool>,
}

impl WmHints {
    /// Clients that explicitly refuse input never get the input focus.
    pub const fn never_focus(&self) -> bool {
        matches!(self.input, Some(false))
    }
}

/// A window about to be managed, with its queried attributes and properties.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct WindowInfo<H: Handle> {
    #[serde(bound = "")]
    pub handle: WindowHandle<H>,
    pub geometry: Xyhw,
    pub border: i32,
    pub title: Option<String>,
    pub class: Option<String>,
    pub instance: Option<String>,
    #[serde(bound = "")]
    pub transient_for: Option<WindowHandle<H>>,
    pub size_hints: SizeHints,
    pub wm_hints: WmHints,
    /// `_NET_WM_STATE` already holds fullscreen.
    pub fullscreen: bool,
    /// `_NET_WM_WINDOW_TYPE` is dialog.
    pub dialog: bool,
}

impl<H: Handle> WindowInfo<H> {
    pub fn new(handle: WindowHandle<H>, geometry: Xyhw) -> Self {
        Self {
            handle,
            geometry,
            border: 0,
            title: None,
            class: None,
            instance: None,
            transient_for: None,
            size_hints: SizeHints::default(),
            wm_hints: WmHints::default(),
            fullscreen: false,
            dialog: false,
        }
    }
}

/// A client's request to change its geometry or stacking. Unset fields were not requested.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConfigureRequest<H: Handle> {
    #[serde(bound = "")]
    pub handle: WindowHandle<H>,
    pub x: Option<i32>,
    pub y: Option<i32>,
    pub w: Option<i32>,
    pub h: Option<i32>,
    pub border: Option<i32>,
    #[serde(bound = "")]
    pub sibling: Option<WindowHandle<H>>,
    pub stack_mode: Option<i32>,
}

impl<H: Handle> ConfigureRequest<H> {
    /// Only the position was requested.
    pub const fn is_move_only(&self) -> bool {
        (self.x.is_some() || self.y.is_some()) && self.w.is_none() && self.h.is_none()
    }
}
