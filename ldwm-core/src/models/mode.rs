use super::{Handle, WindowHandle, Xyhw};
use serde::{Deserialize, Serialize};

/// Pointer and window positions captured when a drag starts.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Drag<H: Handle> {
    #[serde(bound = "")]
    pub handle: WindowHandle<H>,
    pub pointer_origin: (i32, i32),
    pub window_origin: Xyhw,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode<H: Handle> {
    #[serde(bound = "")]
    MovingWindow(Drag<H>),
    #[serde(bound = "")]
    ResizingWindow(Drag<H>),
    #[default]
    Normal,
}

impl<H: Handle> Mode<H> {
    pub const fn drag(&self) -> Option<&Drag<H>> {
        match self {
            Self::MovingWindow(drag) | Self::ResizingWindow(drag) => Some(drag),
            Self::Normal => None,
        }
    }

    pub const fn is_normal(&self) -> bool {
        matches!(self, Self::Normal)
    }
}
