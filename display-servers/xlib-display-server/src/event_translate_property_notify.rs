use crate::XlibWindowHandle;

use super::{DisplayEvent, XWrap};
use ldwm_core::models::WindowHandle;
use ldwm_core::PropertyChange;

use x11_dl::xlib;

pub fn from_event(
    xw: &XWrap,
    event: &xlib::XPropertyEvent,
) -> Option<DisplayEvent<XlibWindowHandle>> {
    if event.window == xw.root {
        if event.atom != xlib::XA_WM_NAME {
            return None;
        }
        let text = xw.get_status_text();
        return Some(DisplayEvent::PropertyChange(PropertyChange::StatusText(
            text,
        )));
    }
    if event.state == xlib::PropertyDelete {
        return None;
    }
    tracing::trace!(
        window = event.window,
        atom = event.atom,
        "PropertyNotify"
    );

    let window = event.window;
    let handle = WindowHandle(XlibWindowHandle(window));
    let change = match event.atom {
        xlib::XA_WM_TRANSIENT_FOR => {
            let parent = xw
                .get_transient_for(window)
                .map(|parent| WindowHandle(XlibWindowHandle(parent)));
            PropertyChange::TransientFor(handle, parent)
        }
        xlib::XA_WM_NORMAL_HINTS => PropertyChange::NormalHints(handle, xw.get_size_hints(window)),
        xlib::XA_WM_HINTS => PropertyChange::WmHints(handle, xw.get_wm_hints(window)),
        xlib::XA_WM_NAME => PropertyChange::Title(handle, xw.get_window_name(window)),
        atom if atom == xw.atoms.NetWMName => {
            PropertyChange::Title(handle, xw.get_window_name(window))
        }
        atom if atom == xw.atoms.NetWMWindowType => {
            let (fullscreen, dialog) = xw.get_window_type(window);
            PropertyChange::WindowType {
                handle,
                fullscreen,
                dialog,
            }
        }
        _ => return None,
    };
    Some(DisplayEvent::PropertyChange(change))
}
