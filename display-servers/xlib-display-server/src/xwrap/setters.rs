//! `XWrap` setters.
use super::{ICONIC_STATE, NORMAL_STATE, WITHDRAWN_STATE};
use crate::XWrap;
use ldwm_core::WindowState;
use std::os::raw::{c_long, c_uint, c_ulong};
use x11_dl::xlib;

impl XWrap {
    // Public functions.

    /// Appends a window property.
    // `XChangeProperty`: https://tronche.com/gui/x/xlib/window-information/XChangeProperty.html
    pub fn append_property_long(
        &self,
        window: xlib::Window,
        property: xlib::Atom,
        r#type: xlib::Atom,
        data: &[c_long],
    ) {
        self.change_property_long(window, property, r#type, xlib::PropModeAppend, data);
    }

    /// Replaces a window property.
    // `XChangeProperty`: https://tronche.com/gui/x/xlib/window-information/XChangeProperty.html
    pub fn replace_property_long(
        &self,
        window: xlib::Window,
        property: xlib::Atom,
        r#type: xlib::Atom,
        data: &[c_long],
    ) {
        self.change_property_long(window, property, r#type, xlib::PropModeReplace, data);
    }

    /// Rebuilds `_NET_CLIENT_LIST` from the managed windows.
    // `XDeleteProperty`: https://tronche.com/gui/x/xlib/window-information/XDeleteProperty.html
    pub fn set_client_list(&self, windows: &[xlib::Window]) {
        unsafe {
            (self.xlib.XDeleteProperty)(self.display, self.root, self.atoms.NetClientList);
        }
        for &window in windows {
            self.append_property_long(
                self.root,
                self.atoms.NetClientList,
                xlib::XA_WINDOW,
                &[window as c_long],
            );
        }
    }

    /// Sets the `WM_STATE` of a window.
    pub fn set_wm_state(&self, window: xlib::Window, state: WindowState) {
        let state = match state {
            WindowState::Withdrawn => WITHDRAWN_STATE,
            WindowState::Normal => NORMAL_STATE,
            WindowState::Iconic => ICONIC_STATE,
        };
        let data = [state, 0];
        self.replace_property_long(window, self.atoms.WMState, self.atoms.WMState, &data);
    }

    /// Sets `_NET_WM_STATE` to fullscreen or to nothing.
    pub fn set_fullscreen_state(&self, window: xlib::Window, fullscreen: bool) {
        let data: &[c_long] = if fullscreen {
            &[self.atoms.NetWMStateFullscreen as c_long]
        } else {
            &[]
        };
        self.replace_property_long(window, self.atoms.NetWMState, xlib::XA_ATOM, data);
    }

    /// Paints the border of a window in the focused or the normal colour.
    // `XSetWindowBorder`: https://tronche.com/gui/x/xlib/window/XSetWindowBorder.html
    pub fn set_window_border_color(&self, window: xlib::Window, focused: bool) {
        let color = if focused {
            self.colors.focused_border
        } else {
            self.colors.normal_border
        };
        unsafe { (self.xlib.XSetWindowBorder)(self.display, window, opaque(color)) };
    }

    /// Sets a windows configuration.
    // `XConfigureWindow`: https://tronche.com/gui/x/xlib/window/XConfigureWindow.html
    pub fn set_window_config(
        &self,
        window: xlib::Window,
        mut window_changes: xlib::XWindowChanges,
        unlock: c_uint,
    ) {
        unsafe { (self.xlib.XConfigureWindow)(self.display, window, unlock, &mut window_changes) };
    }

    /// Drops the urgency hint of a window.
    // `XSetWMHints`: https://tronche.com/gui/x/xlib/ICC/client-to-window-manager/XSetWMHints.html
    pub fn clear_urgency(&self, window: xlib::Window) {
        if let Some(mut wmh) = self.get_wmhints(window) {
            if wmh.flags & xlib::XUrgencyHint == 0 {
                return;
            }
            wmh.flags &= !xlib::XUrgencyHint;
            unsafe { (self.xlib.XSetWMHints)(self.display, window, &mut wmh) };
        }
    }

    // Internal functions.

    fn change_property_long(
        &self,
        window: xlib::Window,
        property: xlib::Atom,
        r#type: xlib::Atom,
        mode: i32,
        data: &[c_long],
    ) {
        unsafe {
            (self.xlib.XChangeProperty)(
                self.display,
                window,
                property,
                r#type,
                32,
                mode,
                data.as_ptr().cast::<u8>(),
                data.len() as i32,
            );
        }
    }
}

/// Forces the alpha byte of a pixel to 0xff so compositors draw the border.
const fn opaque(color: c_ulong) -> c_ulong {
    color | 0xff00_0000
}
