//! Xlib calls related to a keyboard.
use super::to_cstring;
use crate::error::{Result, XlibError};
use crate::XWrap;
use ldwm_core::utils::modmask_lookup::ModMask;
use ldwm_core::Keybind;
use std::ffi::CStr;
use std::os::raw::{c_int, c_uint, c_ulong};
use std::slice;
use x11_dl::{keysym, xlib};

impl XWrap {
    /// Grabs the configured key combos on the root window, with and without the lock keys.
    // `XStringToKeysym`: https://tronche.com/gui/x/xlib/utilities/keyboard/XStringToKeysym.html
    // `XUngrabKey`: https://tronche.com/gui/x/xlib/input/XUngrabKey.html
    pub fn grab_keys(&mut self, keybinds: &[Keybind]) {
        self.update_numlock_mask();
        // Cleanup key grabs.
        unsafe {
            (self.xlib.XUngrabKey)(self.display, xlib::AnyKey, xlib::AnyModifier, self.root);
        }

        for keybind in keybinds {
            let name = to_cstring(&keybind.key);
            let keysym = unsafe { (self.xlib.XStringToKeysym)(name.as_ptr()) };
            if keysym == 0 {
                tracing::warn!(key = %keybind.key, "unknown keysym name");
                continue;
            }
            let modifiers = c_uint::from(keybind.modmask.bits());
            for mask in self.lock_variants(modifiers) {
                self.grab_key(keysym, mask);
            }
        }
    }

    /// Grabs the keysym with the modifier on the root window.
    // `XKeysymToKeycode`: https://tronche.com/gui/x/xlib/utilities/keyboard/XKeysymToKeycode.html
    // `XGrabKey`: https://tronche.com/gui/x/xlib/input/XGrabKey.html
    fn grab_key(&self, keysym: c_ulong, modifiers: c_uint) {
        let code = unsafe { (self.xlib.XKeysymToKeycode)(self.display, keysym) };
        if code == 0 {
            return;
        }
        unsafe {
            (self.xlib.XGrabKey)(
                self.display,
                c_int::from(code),
                modifiers,
                self.root,
                1,
                xlib::GrabModeAsync,
                xlib::GrabModeAsync,
            );
        }
    }

    /// Finds the modifier bit `Num_Lock` is mapped to.
    // `XGetModifierMapping`: https://tronche.com/gui/x/xlib/input/XGetModifierMapping.html
    // `XFreeModifiermap`: https://tronche.com/gui/x/xlib/input/XFreeModifiermap.html
    pub fn update_numlock_mask(&mut self) {
        self.numlock_mask = 0;
        unsafe {
            let modmap = (self.xlib.XGetModifierMapping)(self.display);
            if modmap.is_null() {
                return;
            }
            let per_modifier = (*modmap).max_keypermod.max(0) as usize;
            let numlock = (self.xlib.XKeysymToKeycode)(
                self.display,
                c_ulong::from(keysym::XK_Num_Lock),
            );
            if per_modifier > 0 && !(*modmap).modifiermap.is_null() {
                let codes = slice::from_raw_parts((*modmap).modifiermap, 8 * per_modifier);
                if let Some(index) = codes.iter().position(|&code| code != 0 && code == numlock) {
                    self.numlock_mask = 1 << (index / per_modifier);
                }
            }
            (self.xlib.XFreeModifiermap)(modmap);
        }
    }

    /// A modifier mask combined with every state of the lock keys.
    pub(crate) const fn lock_variants(&self, modifiers: c_uint) -> [c_uint; 4] {
        [
            modifiers,
            modifiers | xlib::LockMask,
            modifiers | self.numlock_mask,
            modifiers | self.numlock_mask | xlib::LockMask,
        ]
    }

    /// The modifiers of an event state, without the lock keys.
    pub fn clean_mask(&self, state: c_uint) -> ModMask {
        clean_mask(state, self.numlock_mask)
    }

    /// Name of the keysym on the first level of a keycode.
    // `XkbKeycodeToKeysym`: https://linux.die.net/man/3/xkbkeycodetokeysym
    // `XKeysymToString`: https://tronche.com/gui/x/xlib/utilities/keyboard/XKeysymToString.html
    #[must_use]
    pub fn keysym_name(&self, keycode: c_uint) -> Option<String> {
        // Not using XKeycodeToKeysym because deprecated.
        let sym = unsafe { (self.xlib.XkbKeycodeToKeysym)(self.display, keycode as u8, 0, 0) };
        if sym == 0 {
            return None;
        }
        let name = unsafe { (self.xlib.XKeysymToString)(sym) };
        if name.is_null() {
            return None;
        }
        Some(unsafe { CStr::from_ptr(name) }.to_string_lossy().into_owned())
    }

    /// Updates the keyboard mapping.
    /// # Errors
    ///
    /// Will error if updating the keyboard failed.
    // `XRefreshKeyboardMapping`: https://tronche.com/gui/x/xlib/utilities/keyboard/XRefreshKeyboardMapping.html
    pub fn refresh_keyboard(&self, evt: &mut xlib::XMappingEvent) -> Result<()> {
        let status = unsafe { (self.xlib.XRefreshKeyboardMapping)(evt) };
        if status == 0 {
            Err(XlibError::FailedStatus)
        } else {
            Ok(())
        }
    }
}

fn clean_mask(state: c_uint, numlock_mask: c_uint) -> ModMask {
    let modifiers = xlib::ShiftMask
        | xlib::ControlMask
        | xlib::Mod1Mask
        | xlib::Mod2Mask
        | xlib::Mod3Mask
        | xlib::Mod4Mask
        | xlib::Mod5Mask;
    let state = state & !(numlock_mask | xlib::LockMask) & modifiers;
    ModMask::from_bits_truncate(state as u16)
}
