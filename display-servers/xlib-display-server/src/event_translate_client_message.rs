use crate::XlibWindowHandle;

use super::{DisplayEvent, XWrap};
use ldwm_core::models::WindowHandle;
use ldwm_core::StateAction;
use std::os::raw::c_long;

use x11_dl::xlib;

pub fn from_event(
    xw: &XWrap,
    event: &xlib::XClientMessageEvent,
) -> Option<DisplayEvent<XlibWindowHandle>> {
    tracing::trace!(
        window = event.window,
        message = xw.atoms.get_name(event.message_type),
        "ClientMessage"
    );
    let handle = WindowHandle(XlibWindowHandle(event.window));

    if event.message_type == xw.atoms.NetWMState {
        let fullscreen = xw.atoms.NetWMStateFullscreen as c_long;
        if event.data.get_long(1) != fullscreen && event.data.get_long(2) != fullscreen {
            return None;
        }
        let action = state_action(event.data.get_long(0))?;
        return Some(DisplayEvent::FullscreenRequest { handle, action });
    }
    if event.message_type == xw.atoms.NetActiveWindow {
        return Some(DisplayEvent::ActivateRequest(handle));
    }
    None
}

/// `_NET_WM_STATE_REMOVE`, `_NET_WM_STATE_ADD` and `_NET_WM_STATE_TOGGLE`.
const fn state_action(value: c_long) -> Option<StateAction> {
    match value {
        0 => Some(StateAction::Remove),
        1 => Some(StateAction::Add),
        2 => Some(StateAction::Toggle),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_actions_follow_ewmh_numbers() {
        assert_eq!(state_action(0), Some(StateAction::Remove));
        assert_eq!(state_action(1), Some(StateAction::Add));
        assert_eq!(state_action(2), Some(StateAction::Toggle));
        assert_eq!(state_action(3), None);
    }
}
