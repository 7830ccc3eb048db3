//! `XWrap` getters.
use super::{to_cstring, MAX_PROPERTY_VALUE_LEN};
use crate::error::{Result, XlibError};
use crate::{XWrap, XlibWindowHandle};
use ldwm_core::models::{SizeHints, WindowHandle, WindowInfo, WmHints, Xyhw};
use std::ffi::CStr;
use std::os::raw::{c_char, c_int, c_long, c_uchar, c_uint, c_ulong};
use std::{ptr, slice};
use x11_dl::xlib;

impl XWrap {
    // Public functions.

    /// Returns the next `Xevent` of the xserver.
    // `XNextEvent`: https://tronche.com/gui/x/xlib/event-handling/manipulating-event-queue/XNextEvent.html
    #[must_use]
    pub fn get_next_event(&self) -> xlib::XEvent {
        unsafe {
            let mut event: xlib::XEvent = std::mem::zeroed();
            (self.xlib.XNextEvent)(self.display, &mut event);
            event
        }
    }

    /// Returns the pixel value of a colour spec such as `#005577`.
    /// # Errors
    ///
    /// Errors if the colour cannot be parsed or allocated.
    // `XDefaultColormap`: https://tronche.com/gui/x/xlib/display/display-macros.html#DefaultColormap
    // `XAllocNamedColor`: https://tronche.com/gui/x/xlib/color/XAllocNamedColor.html
    pub fn get_color(&self, name: &str) -> Result<c_ulong> {
        let spec = to_cstring(name);
        unsafe {
            let cmap = (self.xlib.XDefaultColormap)(self.display, self.screen);
            let mut screen_color: xlib::XColor = std::mem::zeroed();
            let mut exact_color: xlib::XColor = std::mem::zeroed();
            let status = (self.xlib.XAllocNamedColor)(
                self.display,
                cmap,
                spec.as_ptr(),
                &mut screen_color,
                &mut exact_color,
            );
            if status == 0 {
                return Err(XlibError::ColorUnavailable(name.to_owned()));
            }
            Ok(screen_color.pixel)
        }
    }

    /// Returns the attributes of a window.
    /// # Errors
    ///
    /// Will error if window status is 0 (no attributes).
    // `XGetWindowAttributes`: https://tronche.com/gui/x/xlib/window-information/XGetWindowAttributes.html
    pub fn get_window_attrs(&self, window: xlib::Window) -> Result<xlib::XWindowAttributes> {
        let mut attrs: xlib::XWindowAttributes = unsafe { std::mem::zeroed() };
        let status = unsafe { (self.xlib.XGetWindowAttributes)(self.display, window, &mut attrs) };
        if status == 0 {
            return Err(XlibError::FailedStatus);
        }
        Ok(attrs)
    }

    /// Returns the transient parent of a window.
    // `XGetTransientForHint`: https://tronche.com/gui/x/xlib/ICC/client-to-window-manager/XGetTransientForHint.html
    #[must_use]
    pub fn get_transient_for(&self, window: xlib::Window) -> Option<xlib::Window> {
        let mut transient: xlib::Window = 0;
        let status =
            unsafe { (self.xlib.XGetTransientForHint)(self.display, window, &mut transient) };
        (status > 0 && transient != 0).then_some(transient)
    }

    /// Returns the instance and class of `WM_CLASS`.
    // `XGetClassHint`: https://tronche.com/gui/x/xlib/ICC/client-to-window-manager/XGetClassHint.html
    #[must_use]
    pub fn get_window_class(&self, window: xlib::Window) -> (Option<String>, Option<String>) {
        unsafe {
            let mut class_return: xlib::XClassHint = std::mem::zeroed();
            let status = (self.xlib.XGetClassHint)(self.display, window, &mut class_return);
            if status == 0 {
                return (None, None);
            }
            let take = |raw: *mut c_char| {
                if raw.is_null() {
                    return None;
                }
                let text = CStr::from_ptr(raw).to_string_lossy().into_owned();
                (self.xlib.XFree)(raw.cast());
                Some(text)
            };
            let instance = take(class_return.res_name);
            let class = take(class_return.res_class);
            (instance, class)
        }
    }

    /// Returns a windows name, `_NET_WM_NAME` first.
    #[must_use]
    pub fn get_window_name(&self, window: xlib::Window) -> Option<String> {
        self.get_text_prop(window, self.atoms.NetWMName)
            .or_else(|| self.get_text_prop(window, xlib::XA_WM_NAME))
    }

    /// Returns the status text, kept in `WM_NAME` of the root window.
    #[must_use]
    pub fn get_status_text(&self) -> Option<String> {
        self.get_text_prop(self.root, xlib::XA_WM_NAME)
    }

    /// Returns the `WM_HINTS` of a window.
    // `XGetWMHints`: https://tronche.com/gui/x/xlib/ICC/client-to-window-manager/XGetWMHints.html
    #[must_use]
    pub fn get_wmhints(&self, window: xlib::Window) -> Option<xlib::XWMHints> {
        unsafe {
            let hints_ptr: *mut xlib::XWMHints = (self.xlib.XGetWMHints)(self.display, window);
            if hints_ptr.is_null() {
                return None;
            }
            let hints: xlib::XWMHints = *hints_ptr;
            (self.xlib.XFree)(hints_ptr.cast());
            Some(hints)
        }
    }

    /// Returns the parts of `WM_HINTS` the engine uses.
    #[must_use]
    pub fn get_wm_hints(&self, window: xlib::Window) -> WmHints {
        self.get_wmhints(window)
            .map(|hints| wm_hints_from(&hints))
            .unwrap_or_default()
    }

    /// Returns the normalised `WM_NORMAL_HINTS` of a window.
    // `XGetWMNormalHints`: https://tronche.com/gui/x/xlib/ICC/client-to-window-manager/XGetWMNormalHints.html
    #[must_use]
    pub fn get_size_hints(&self, window: xlib::Window) -> SizeHints {
        let mut xsize: xlib::XSizeHints = unsafe { std::mem::zeroed() };
        let mut supplied: c_long = 0;
        let status = unsafe {
            (self.xlib.XGetWMNormalHints)(self.display, window, &mut xsize, &mut supplied)
        };
        if status == 0 {
            // Treat missing hints like dwm: as if only `PSize` was set.
            xsize.flags = xlib::PSize;
        }
        size_hints_from(&xsize)
    }

    /// Returns the `WM_STATE` of a window.
    #[must_use]
    pub fn get_wm_state(&self, window: xlib::Window) -> Option<c_long> {
        self.get_property_longs(window, self.atoms.WMState, self.atoms.WMState)
            .first()
            .copied()
    }

    /// Returns the atoms held by an atom list property of a window.
    #[must_use]
    pub fn get_atoms(&self, window: xlib::Window, property: xlib::Atom) -> Vec<xlib::Atom> {
        self.get_property_longs(window, property, xlib::XA_ATOM)
            .into_iter()
            .map(|atom| atom as xlib::Atom)
            .collect()
    }

    /// Whether `_NET_WM_STATE` holds fullscreen and `_NET_WM_WINDOW_TYPE` is dialog.
    #[must_use]
    pub fn get_window_type(&self, window: xlib::Window) -> (bool, bool) {
        let fullscreen = self
            .get_atoms(window, self.atoms.NetWMState)
            .contains(&self.atoms.NetWMStateFullscreen);
        let dialog = self.get_atoms(window, self.atoms.NetWMWindowType).first()
            == Some(&self.atoms.NetWMWindowTypeDialog);
        (fullscreen, dialog)
    }

    /// Returns the children of the root window, bottom first.
    // `XQueryTree`: https://tronche.com/gui/x/xlib/window-information/XQueryTree.html
    #[must_use]
    pub fn get_windows(&self) -> Vec<xlib::Window> {
        unsafe {
            let mut root_return: xlib::Window = 0;
            let mut parent_return: xlib::Window = 0;
            let mut array: *mut xlib::Window = ptr::null_mut();
            let mut length: c_uint = 0;
            let status = (self.xlib.XQueryTree)(
                self.display,
                self.root,
                &mut root_return,
                &mut parent_return,
                &mut array,
                &mut length,
            );
            if status == 0 || array.is_null() {
                return vec![];
            }
            let windows = slice::from_raw_parts(array, length as usize).to_vec();
            (self.xlib.XFree)(array.cast());
            windows
        }
    }

    /// Collects everything the engine needs to manage a window.
    #[must_use]
    pub fn get_window_info(
        &self,
        window: xlib::Window,
        attrs: &xlib::XWindowAttributes,
    ) -> WindowInfo<XlibWindowHandle> {
        let handle = WindowHandle(XlibWindowHandle(window));
        let geometry = Xyhw::new(attrs.x, attrs.y, attrs.width, attrs.height);
        let (instance, class) = self.get_window_class(window);
        let (fullscreen, dialog) = self.get_window_type(window);
        WindowInfo {
            border: attrs.border_width,
            title: self.get_window_name(window),
            class,
            instance,
            transient_for: self
                .get_transient_for(window)
                .map(|parent| WindowHandle(XlibWindowHandle(parent))),
            size_hints: self.get_size_hints(window),
            wm_hints: self.get_wm_hints(window),
            fullscreen,
            dialog,
            ..WindowInfo::new(handle, geometry)
        }
    }

    // Internal functions.

    /// Returns a format 32 property of a window.
    // `XGetWindowProperty`: https://tronche.com/gui/x/xlib/window-information/XGetWindowProperty.html
    fn get_property_longs(
        &self,
        window: xlib::Window,
        property: xlib::Atom,
        r#type: xlib::Atom,
    ) -> Vec<c_long> {
        let mut format_return: c_int = 0;
        let mut nitems_return: c_ulong = 0;
        let mut type_return: xlib::Atom = 0;
        let mut bytes_after_return: c_ulong = 0;
        let mut prop_return: *mut c_uchar = ptr::null_mut();
        unsafe {
            let status = (self.xlib.XGetWindowProperty)(
                self.display,
                window,
                property,
                0,
                MAX_PROPERTY_VALUE_LEN / 4,
                xlib::False,
                r#type,
                &mut type_return,
                &mut format_return,
                &mut nitems_return,
                &mut bytes_after_return,
                &mut prop_return,
            );
            if status != i32::from(xlib::Success) || prop_return.is_null() {
                return vec![];
            }
            let values = if format_return == 32 {
                #[allow(clippy::cast_ptr_alignment)]
                slice::from_raw_parts(prop_return.cast::<c_long>(), nitems_return as usize)
                    .to_vec()
            } else {
                vec![]
            };
            (self.xlib.XFree)(prop_return.cast());
            values
        }
    }

    /// Returns a text property for a window.
    // `XGetTextProperty`: https://tronche.com/gui/x/xlib/ICC/client-to-window-manager/XGetTextProperty.html
    // `XmbTextPropertyToTextList`: https://tronche.com/gui/x/xlib/ICC/client-to-window-manager/XmbTextPropertyToTextList.html
    fn get_text_prop(&self, window: xlib::Window, atom: xlib::Atom) -> Option<String> {
        unsafe {
            let mut text_prop: xlib::XTextProperty = std::mem::zeroed();
            let status = (self.xlib.XGetTextProperty)(self.display, window, &mut text_prop, atom);
            if status == 0 || text_prop.value.is_null() {
                return None;
            }
            let text = if text_prop.nitems == 0 {
                None
            } else if text_prop.encoding == xlib::XA_STRING {
                Some(
                    CStr::from_ptr(text_prop.value.cast::<c_char>())
                        .to_string_lossy()
                        .into_owned(),
                )
            } else {
                let mut list: *mut *mut c_char = ptr::null_mut();
                let mut count: c_int = 0;
                let converted = (self.xlib.XmbTextPropertyToTextList)(
                    self.display,
                    &text_prop,
                    &mut list,
                    &mut count,
                );
                let mut text = None;
                if converted >= i32::from(xlib::Success) && count > 0 && !list.is_null() {
                    if !(*list).is_null() {
                        text = Some(CStr::from_ptr(*list).to_string_lossy().into_owned());
                    }
                    (self.xlib.XFreeStringList)(list);
                }
                text
            };
            (self.xlib.XFree)(text_prop.value.cast());
            text
        }
    }
}

/// Normalises `WM_NORMAL_HINTS`: base falls back to min, min falls back to base.
pub(crate) fn size_hints_from(size: &xlib::XSizeHints) -> SizeHints {
    let flags = size.flags;
    let has = |flag: c_long| flags & flag != 0;
    let mut hints = SizeHints::default();
    if has(xlib::PBaseSize) {
        hints.base_w = size.base_width;
        hints.base_h = size.base_height;
    } else if has(xlib::PMinSize) {
        hints.base_w = size.min_width;
        hints.base_h = size.min_height;
    }
    if has(xlib::PResizeInc) {
        hints.inc_w = size.width_inc;
        hints.inc_h = size.height_inc;
    }
    if has(xlib::PMaxSize) {
        hints.max_w = size.max_width;
        hints.max_h = size.max_height;
    }
    if has(xlib::PMinSize) {
        hints.min_w = size.min_width;
        hints.min_h = size.min_height;
    } else if has(xlib::PBaseSize) {
        hints.min_w = size.base_width;
        hints.min_h = size.base_height;
    }
    if has(xlib::PAspect) && size.min_aspect.x != 0 && size.max_aspect.y != 0 {
        hints.min_aspect = size.min_aspect.y as f32 / size.min_aspect.x as f32;
        hints.max_aspect = size.max_aspect.x as f32 / size.max_aspect.y as f32;
    }
    hints
}

pub(crate) fn wm_hints_from(hints: &xlib::XWMHints) -> WmHints {
    WmHints {
        urgent: hints.flags & xlib::XUrgencyHint != 0,
        input: (hints.flags & xlib::InputHint != 0).then_some(hints.input != 0),
    }
}
