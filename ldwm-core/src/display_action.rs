use crate::bar::Bar;
use crate::config::Keybind;
use crate::models::{ConfigureRequest, Handle, WindowHandle, Xyhw};
use serde::{Deserialize, Serialize};

/// ICCCM `WM_STATE` values.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum WindowState {
    Withdrawn,
    Normal,
    Iconic,
}

/// Pointer shapes used while grabbing the pointer.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum CursorShape {
    Normal,
    Move,
    Resize,
}

/// These are responses from the Window manager.
/// The display server should act on these actions.
#[allow(clippy::large_enum_variant)]
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum DisplayAction<H: Handle> {
    /// Apply geometry and border width to a client and tell it about them.
    #[serde(bound = "")]
    ResizeClient {
        handle: WindowHandle<H>,
        geometry: Xyhw,
        border: i32,
    },

    /// Only tell a client its current geometry, with a synthetic `ConfigureNotify`.
    #[serde(bound = "")]
    SendConfigureNotify {
        handle: WindowHandle<H>,
        geometry: Xyhw,
        border: i32,
    },

    /// Move a window without resizing it. Used for showing and hiding.
    #[serde(bound = "")]
    MoveWindow(WindowHandle<H>, i32, i32),

    /// Move and resize a window, leaving the border alone.
    #[serde(bound = "")]
    MoveResizeWindow(WindowHandle<H>, Xyhw),

    #[serde(bound = "")]
    SetBorderWidth(WindowHandle<H>, i32),

    #[serde(bound = "")]
    SetBorderColor {
        handle: WindowHandle<H>,
        focused: bool,
    },

    /// Start listening to a newly managed window.
    #[serde(bound = "")]
    AddedWindow(WindowHandle<H>),

    /// Grab the configured client buttons (focused) or every button (unfocused).
    #[serde(bound = "")]
    GrabButtons {
        handle: WindowHandle<H>,
        focused: bool,
    },

    /// Tell a window that it is to become focused.
    #[serde(bound = "")]
    WindowTakeFocus {
        handle: WindowHandle<H>,
        never_focus: bool,
    },

    /// Focus the root window and clear the active window.
    FocusRoot,

    /// Clear the urgency hint of a window.
    #[serde(bound = "")]
    ClearUrgency(WindowHandle<H>),

    /// Raises a given window.
    #[serde(bound = "")]
    MoveToTop(WindowHandle<H>),

    /// Stack the windows below the bar, first in the list right below it.
    #[serde(bound = "")]
    StackBelowBar(Vec<WindowHandle<H>>),

    /// Throw away pending enter events caused by our own window moves.
    DiscardEnterEvents,

    /// Nicely ask a window if it would please close at its convenience.
    #[serde(bound = "")]
    KillWindow(WindowHandle<H>),

    #[serde(bound = "")]
    MapWindow(WindowHandle<H>),

    #[serde(bound = "")]
    SetClientState(WindowHandle<H>, WindowState),

    /// Set or clear `_NET_WM_STATE_FULLSCREEN`.
    #[serde(bound = "")]
    SetFullscreenState(WindowHandle<H>, bool),

    /// Replace `_NET_CLIENT_LIST`.
    #[serde(bound = "")]
    UpdateClientList(Vec<WindowHandle<H>>),

    /// Forward a configure request of a window we do not manage.
    #[serde(bound = "")]
    ConfigureUnmanaged(ConfigureRequest<H>),

    /// Hand a window back: restore its border, drop our grabs and withdraw it.
    #[serde(bound = "")]
    ReleaseWindow {
        handle: WindowHandle<H>,
        border: i32,
    },

    /// Grab the pointer for a drag. Replies with `ChangeToNormalMode` when the grab fails.
    GrabPointer(CursorShape),

    UngrabPointer,

    /// Warp the pointer to a point relative to a window.
    #[serde(bound = "")]
    WarpPointer(WindowHandle<H>, i32, i32),

    /// Regrab the configured keys.
    GrabKeys(Vec<Keybind>),

    MoveResizeBar(Xyhw),

    DrawBar(Bar),
}
