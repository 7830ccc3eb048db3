//! Xlib calls related to a window.
use crate::{XWrap, XlibWindowHandle};
use ldwm_core::models::{ConfigureRequest, Xyhw};
use ldwm_core::WindowState;
use std::os::raw::{c_int, c_long, c_uint, c_ulong};
use x11_dl::xlib;

impl XWrap {
    /// Applies geometry and border width to a client, then tells it about them.
    pub fn resize_client(&self, window: xlib::Window, geometry: Xyhw, border: i32) {
        let changes = xlib::XWindowChanges {
            x: geometry.x,
            y: geometry.y,
            width: geometry.w,
            height: geometry.h,
            border_width: border,
            sibling: 0,    // Not unlocked.
            stack_mode: 0, // Not unlocked.
        };
        let unlock = xlib::CWX | xlib::CWY | xlib::CWWidth | xlib::CWHeight | xlib::CWBorderWidth;
        self.set_window_config(window, changes, u32::from(unlock));
        self.configure(window, geometry, border);
        self.sync();
    }

    /// Send a synthetic `XConfigureEvent` for a window to X.
    pub fn configure(&self, window: xlib::Window, geometry: Xyhw, border: i32) {
        let mut configure_event: xlib::XConfigureEvent = unsafe { std::mem::zeroed() };
        configure_event.type_ = xlib::ConfigureNotify;
        configure_event.display = self.display;
        configure_event.event = window;
        configure_event.window = window;
        configure_event.x = geometry.x;
        configure_event.y = geometry.y;
        configure_event.width = geometry.w;
        configure_event.height = geometry.h;
        configure_event.border_width = border;
        configure_event.above = 0;
        configure_event.override_redirect = 0;
        self.send_xevent(
            window,
            0,
            xlib::StructureNotifyMask,
            &mut configure_event.into(),
        );
    }

    /// Forwards a configure request of a window we do not manage, as asked.
    pub fn configure_unmanaged(&self, request: &ConfigureRequest<XlibWindowHandle>) {
        let (changes, unlock) = window_changes(request);
        self.set_window_config(request.handle.0 .0, changes, unlock);
        self.sync();
    }

    // `XMoveWindow`: https://tronche.com/gui/x/xlib/window/XMoveWindow.html
    pub fn move_window(&self, window: xlib::Window, x: i32, y: i32) {
        unsafe { (self.xlib.XMoveWindow)(self.display, window, x, y) };
    }

    // `XMoveResizeWindow`: https://tronche.com/gui/x/xlib/window/XMoveResizeWindow.html
    pub fn move_resize_window(&self, window: xlib::Window, x: i32, y: i32, w: u32, h: u32) {
        unsafe {
            (self.xlib.XMoveResizeWindow)(self.display, window, x, y, w, h);
        }
    }

    pub fn set_border_width(&self, window: xlib::Window, border: i32) {
        let mut changes: xlib::XWindowChanges = unsafe { std::mem::zeroed() };
        changes.border_width = border;
        self.set_window_config(window, changes, u32::from(xlib::CWBorderWidth));
    }

    /// Stacks the windows right below the bar, each one below the one before it.
    pub fn stack_below_bar(&self, windows: &[xlib::Window]) {
        let mut changes: xlib::XWindowChanges = unsafe { std::mem::zeroed() };
        changes.stack_mode = xlib::Below;
        changes.sibling = self.bar_window();
        let unlock = u32::from(xlib::CWSibling | xlib::CWStackMode);
        for &window in windows {
            self.set_window_config(window, changes, unlock);
            changes.sibling = window;
        }
    }

    // `XMapWindow`: https://tronche.com/gui/x/xlib/window/XMapWindow.html
    pub fn map_window(&self, window: xlib::Window) {
        unsafe { (self.xlib.XMapWindow)(self.display, window) };
    }

    /// Raise a window.
    // `XRaiseWindow`: https://tronche.com/gui/x/xlib/window/XRaiseWindow.html
    pub fn move_to_top(&self, window: xlib::Window) {
        unsafe { (self.xlib.XRaiseWindow)(self.display, window) };
    }

    /// Kills a window.
    // `XSetCloseDownMode`: https://tronche.com/gui/x/xlib/display/XSetCloseDownMode.html
    // `XKillClient`: https://tronche.com/gui/x/xlib/window-and-session-manager/XKillClient.html
    pub fn kill_window(&self, window: xlib::Window) {
        // Nicely ask the window to close.
        if self.send_xevent_atom(window, self.atoms.WMDelete) {
            return;
        }
        // Force kill the window.
        self.with_server_grabbed(|xw| unsafe {
            (xw.xlib.XSetCloseDownMode)(xw.display, xlib::DestroyAll);
            (xw.xlib.XKillClient)(xw.display, window);
        });
    }

    /// Gives a window back: original border, no button grabs, withdrawn.
    // `XUngrabButton`: https://tronche.com/gui/x/xlib/input/XUngrabButton.html
    pub fn release_window(&self, window: xlib::Window, border: i32) {
        self.with_server_grabbed(|xw| {
            xw.set_border_width(window, border);
            unsafe {
                (xw.xlib.XUngrabButton)(
                    xw.display,
                    xlib::AnyButton as c_uint,
                    xlib::AnyModifier,
                    window,
                );
            }
            xw.set_wm_state(window, WindowState::Withdrawn);
        });
    }

    /// Focuses a window.
    // `XSetInputFocus`: https://tronche.com/gui/x/xlib/input/XSetInputFocus.html
    pub fn focus(&self, window: xlib::Window, never_focus: bool) {
        if !never_focus {
            unsafe {
                (self.xlib.XSetInputFocus)(
                    self.display,
                    window,
                    xlib::RevertToPointerRoot,
                    xlib::CurrentTime,
                );
            }
            // Mark this window as the `_NET_ACTIVE_WINDOW`
            self.replace_property_long(
                self.root,
                self.atoms.NetActiveWindow,
                xlib::XA_WINDOW,
                &[window as c_long],
            );
        }
        // Tell the window to take focus
        self.send_xevent_atom(window, self.atoms.WMTakeFocus);
    }

    /// Hands the input focus to the root window.
    // `XSetInputFocus`: https://tronche.com/gui/x/xlib/input/XSetInputFocus.html
    // `XDeleteProperty`: https://tronche.com/gui/x/xlib/window-information/XDeleteProperty.html
    pub fn focus_root(&self) {
        unsafe {
            (self.xlib.XSetInputFocus)(
                self.display,
                self.root,
                xlib::RevertToPointerRoot,
                xlib::CurrentTime,
            );
            (self.xlib.XDeleteProperty)(self.display, self.root, self.atoms.NetActiveWindow);
        }
    }

    /// Drops the enter events our own moves caused.
    // `XCheckMaskEvent`: https://tronche.com/gui/x/xlib/event-handling/manipulating-event-queue/XCheckMaskEvent.html
    pub fn discard_enter_events(&self) {
        self.sync();
        let mut event: xlib::XEvent = unsafe { std::mem::zeroed() };
        while unsafe { (self.xlib.XCheckMaskEvent)(self.display, xlib::EnterWindowMask, &mut event) }
            != 0
        {}
    }

    /// Change a windows attributes.
    // `XChangeWindowAttributes`: https://tronche.com/gui/x/xlib/window/XChangeWindowAttributes.html
    pub fn change_window_attributes(
        &self,
        window: xlib::Window,
        mask: c_ulong,
        mut attrs: xlib::XSetWindowAttributes,
    ) {
        unsafe {
            (self.xlib.XChangeWindowAttributes)(self.display, window, mask, &mut attrs);
        }
    }

    /// Subscribe to an event of a window.
    // `XSelectInput`: https://tronche.com/gui/x/xlib/event-handling/XSelectInput.html
    pub fn subscribe_to_event(&self, window: xlib::Window, mask: c_long) {
        unsafe { (self.xlib.XSelectInput)(self.display, window, mask) };
    }

    /// Subscribe to the wanted events of a managed window.
    pub fn subscribe_to_window_events(&self, window: xlib::Window) {
        let mask = xlib::EnterWindowMask
            | xlib::FocusChangeMask
            | xlib::PropertyChangeMask
            | xlib::StructureNotifyMask;
        self.subscribe_to_event(window, mask);
    }
}

/// The changes and value mask for the fields a configure request carries.
fn window_changes(request: &ConfigureRequest<XlibWindowHandle>) -> (xlib::XWindowChanges, c_uint) {
    let mut changes: xlib::XWindowChanges = unsafe { std::mem::zeroed() };
    let mut unlock: c_uint = 0;
    let mut set = |value: Option<i32>, field: &mut c_int, flag: u16| {
        if let Some(value) = value {
            *field = value;
            unlock |= u32::from(flag);
        }
    };
    set(request.x, &mut changes.x, xlib::CWX);
    set(request.y, &mut changes.y, xlib::CWY);
    set(request.w, &mut changes.width, xlib::CWWidth);
    set(request.h, &mut changes.height, xlib::CWHeight);
    set(request.border, &mut changes.border_width, xlib::CWBorderWidth);
    set(request.stack_mode, &mut changes.stack_mode, xlib::CWStackMode);
    if let Some(sibling) = request.sibling {
        changes.sibling = sibling.0 .0;
        unlock |= u32::from(xlib::CWSibling);
    }
    (changes, unlock)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ldwm_core::models::WindowHandle;

    #[test]
    fn only_requested_fields_are_unlocked() {
        let request = ConfigureRequest {
            handle: WindowHandle(XlibWindowHandle(7)),
            x: Some(10),
            h: Some(300),
            sibling: Some(WindowHandle(XlibWindowHandle(9))),
            ..ConfigureRequest::default()
        };
        let (changes, unlock) = window_changes(&request);
        assert_eq!(
            unlock,
            u32::from(xlib::CWX | xlib::CWHeight | xlib::CWSibling)
        );
        assert_eq!(changes.x, 10);
        assert_eq!(changes.height, 300);
        assert_eq!(changes.sibling, 9);
    }

    #[test]
    fn an_empty_request_changes_nothing() {
        let request = ConfigureRequest {
            handle: WindowHandle(XlibWindowHandle(7)),
            ..ConfigureRequest::default()
        };
        let (_, unlock) = window_changes(&request);
        assert_eq!(unlock, 0);
    }
}
