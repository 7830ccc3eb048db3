//! Xlib calls related to a mouse.
use super::{BUTTONMASK, MOUSEMASK};
use crate::XWrap;
use ldwm_core::CursorShape;
use std::os::raw::c_uint;
use x11_dl::xlib;

impl XWrap {
    /// Grabs the client buttons on the focused window, and every button on the others so a click
    /// focuses them.
    pub fn grab_mouse_clicks(&mut self, window: xlib::Window, is_focused: bool) {
        self.update_numlock_mask();
        self.ungrab_buttons(window);
        if !is_focused {
            self.grab_button(window, xlib::AnyButton as c_uint, xlib::AnyModifier);
        }
        for (button, modifiers) in self.client_buttons.clone() {
            for mask in self.lock_variants(modifiers) {
                self.grab_button(window, button, mask);
            }
        }
    }

    /// Grabs the button with the modifier for a window.
    // `XGrabButton`: https://tronche.com/gui/x/xlib/input/XGrabButton.html
    pub fn grab_button(&self, window: xlib::Window, button: c_uint, modifiers: c_uint) {
        unsafe {
            (self.xlib.XGrabButton)(
                self.display,
                button,
                modifiers,
                window,
                0,
                BUTTONMASK as c_uint,
                xlib::GrabModeAsync,
                xlib::GrabModeAsync,
                0,
                0,
            );
        }
    }

    /// Cleans all currently grabbed buttons of a window.
    // `XUngrabButton`: https://tronche.com/gui/x/xlib/input/XUngrabButton.html
    pub fn ungrab_buttons(&self, window: xlib::Window) {
        unsafe {
            (self.xlib.XUngrabButton)(
                self.display,
                xlib::AnyButton as c_uint,
                xlib::AnyModifier,
                window,
            );
        }
    }

    /// Grabs the pointer for a drag and shows `shape`. Returns whether the grab succeeded.
    // `XGrabPointer`: https://tronche.com/gui/x/xlib/input/XGrabPointer.html
    pub fn grab_pointer(&mut self, shape: CursorShape) -> bool {
        let status = unsafe {
            (self.xlib.XGrabPointer)(
                self.display,
                self.root,
                0,
                MOUSEMASK as c_uint,
                xlib::GrabModeAsync,
                xlib::GrabModeAsync,
                0,
                self.cursors.get(shape),
                xlib::CurrentTime,
            )
        };
        self.pointer_grabbed = status == xlib::GrabSuccess;
        self.pointer_grabbed
    }

    /// Ungrab the cursor.
    // `XUngrabPointer`: https://tronche.com/gui/x/xlib/input/XUngrabPointer.html
    pub fn ungrab_pointer(&mut self) {
        unsafe { (self.xlib.XUngrabPointer)(self.display, xlib::CurrentTime) };
        self.pointer_grabbed = false;
    }

    /// Move the cursor to a point relative to a window.
    // `XWarpPointer`: https://tronche.com/gui/x/xlib/input/XWarpPointer.html
    pub fn warp_pointer(&self, window: xlib::Window, x: i32, y: i32) {
        unsafe {
            (self.xlib.XWarpPointer)(self.display, 0, window, 0, 0, 0, 0, x, y);
        }
    }
}
