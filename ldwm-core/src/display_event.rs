use crate::models::{ConfigureRequest, Handle, SizeHints, WindowHandle, WindowInfo, WmHints};
use crate::utils::modmask_lookup::{Button, ModMask};
use serde::{Deserialize, Serialize};

/// `_NET_WM_STATE` client message actions.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum StateAction {
    Remove,
    Add,
    Toggle,
}

/// A property of a window (or of the root window) that changed.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum PropertyChange<H: Handle> {
    /// `WM_NAME` of the root window.
    StatusText(Option<String>),
    #[serde(bound = "")]
    Title(WindowHandle<H>, Option<String>),
    #[serde(bound = "")]
    TransientFor(WindowHandle<H>, Option<WindowHandle<H>>),
    #[serde(bound = "")]
    NormalHints(WindowHandle<H>, SizeHints),
    #[serde(bound = "")]
    WmHints(WindowHandle<H>, WmHints),
    #[serde(bound = "")]
    WindowType {
        handle: WindowHandle<H>,
        fullscreen: bool,
        dialog: bool,
    },
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum DisplayEvent<H: Handle> {
    /// A window asked to be mapped.
    #[serde(bound = "")]
    WindowCreate(WindowInfo<H>),
    #[serde(bound = "")]
    WindowDestroy(WindowHandle<H>),
    #[serde(bound = "")]
    WindowUnmap {
        handle: WindowHandle<H>,
        synthetic: bool,
    },
    #[serde(bound = "")]
    ConfigureRequest(ConfigureRequest<H>),
    /// The root window changed size.
    ScreenResize(i32, i32),
    /// The pointer entered a window normally.
    #[serde(bound = "")]
    EnterNotify(WindowHandle<H>),
    /// A window took the input focus.
    #[serde(bound = "")]
    FocusIn(WindowHandle<H>),
    /// The bar needs repainting.
    Expose,
    /// A grabbed key was pressed. Carries the keysym name and the pointer position on the root
    /// window.
    KeyCombo {
        modmask: ModMask,
        key: String,
        x: i32,
        y: i32,
    },
    /// A grabbed button was pressed on a client window, or on the root window when there is no
    /// handle. Carries the pointer position on the root window.
    #[serde(bound = "")]
    MouseCombo {
        modmask: ModMask,
        button: Button,
        handle: Option<WindowHandle<H>>,
        x: i32,
        y: i32,
    },
    /// A button was pressed on the bar, `x` pixels from its left edge.
    BarClick {
        modmask: ModMask,
        button: Button,
        x: i32,
    },
    /// Pointer motion during a grab, on root coordinates.
    Motion(i32, i32),
    ButtonRelease,
    /// The keyboard mapping changed.
    MappingNotify,
    #[serde(bound = "")]
    PropertyChange(PropertyChange<H>),
    #[serde(bound = "")]
    FullscreenRequest {
        handle: WindowHandle<H>,
        action: StateAction,
    },
    /// `_NET_ACTIVE_WINDOW` request.
    #[serde(bound = "")]
    ActivateRequest(WindowHandle<H>),
    ChangeToNormalMode,
}

impl<H: Handle> DisplayEvent<H> {
    /// Events still handled while a window is dragged. Others wait for the button release.
    pub const fn passes_drag(&self) -> bool {
        matches!(
            self,
            Self::Motion(..)
                | Self::ButtonRelease
                | Self::ConfigureRequest(_)
                | Self::Expose
                | Self::WindowCreate(_)
                | Self::ChangeToNormalMode
        )
    }
}
