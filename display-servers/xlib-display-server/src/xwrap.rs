//! A wrapper around calls to xlib and X related functions.
// We allow this _ because if we don't we'll receive an error that it isn't read on _task_guard.
#![allow(clippy::used_underscore_binding)]
// We allow this so that extern "C" functions are not flagged as confusing. The current placement
// allows for easy reading.
#![allow(clippy::items_after_statements)]
// We allow this because _y_ and _x_ are intentionally similar. Changing it makes the code noisy.
#![allow(clippy::similar_names)]
use crate::error::{Result, XlibError};

use super::xatom::XAtom;
use super::xcursor::XCursor;
use ldwm_core::bar::Click;
use ldwm_core::config::{ColorPair, Config, Theme, STATUS_SCHEMES};
use std::ffi::CString;
use std::os::raw::{c_int, c_long, c_uint, c_ulong};
use std::ptr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};
use tokio::sync::{oneshot, Notify};
use tokio::time::Duration;

use x11_dl::xlib;

mod bar;
mod getters;
mod keyboard;
mod mouse;
mod setters;
mod window;

pub use bar::XFont;
use bar::BarSurface;

type WindowStateConst = c_long;
pub const WITHDRAWN_STATE: WindowStateConst = 0;
pub const NORMAL_STATE: WindowStateConst = 1;
pub const ICONIC_STATE: WindowStateConst = 2;
const MAX_PROPERTY_VALUE_LEN: c_long = 4096;

pub const ROOT_EVENT_MASK: c_long = xlib::SubstructureRedirectMask
    | xlib::SubstructureNotifyMask
    | xlib::ButtonPressMask
    | xlib::PointerMotionMask
    | xlib::EnterWindowMask
    | xlib::LeaveWindowMask
    | xlib::StructureNotifyMask
    | xlib::PropertyChangeMask;

const BUTTONMASK: c_long = xlib::ButtonPressMask | xlib::ButtonReleaseMask;
const MOUSEMASK: c_long = BUTTONMASK | xlib::PointerMotionMask;

const X_CONFIGUREWINDOW: u8 = 12;
const X_GRABBUTTON: u8 = 28;
const X_GRABKEY: u8 = 33;
const X_SETINPUTFOCUS: u8 = 42;
const X_COPYAREA: u8 = 62;
const X_POLYSEGMENT: u8 = 66;
const X_POLYFILLRECTANGLE: u8 = 70;
const X_POLYTEXT8: u8 = 74;

type XErrorHandler =
    Option<unsafe extern "C" fn(*mut xlib::Display, *mut xlib::XErrorEvent) -> c_int>;

/// Xlib's own handler, which reports the error and exits.
static XLIB_ERROR_HANDLER: OnceLock<XErrorHandler> = OnceLock::new();
static OTHER_WM_RUNNING: AtomicBool = AtomicBool::new(false);

// This is allowed for now as const extern fns
// are not yet stable (1.56.0, 16 Sept 2021)
// see issue #64926 <https://github.com/rust-lang/rust/issues/64926> for more information.
#[allow(clippy::missing_const_for_fn)]
pub extern "C" fn on_error_from_xlib(
    display: *mut xlib::Display,
    er: *mut xlib::XErrorEvent,
) -> c_int {
    let err = unsafe { *er };
    let ec = err.error_code;
    let rc = err.request_code;
    let ba = ec == xlib::BadAccess;
    let bd = ec == xlib::BadDrawable;
    let bm = ec == xlib::BadMatch;

    if ec == xlib::BadWindow
        || (rc == X_CONFIGUREWINDOW && bm)
        || (rc == X_GRABBUTTON && ba)
        || (rc == X_GRABKEY && ba)
        || (rc == X_SETINPUTFOCUS && bm)
        || (rc == X_COPYAREA && bd)
        || (rc == X_POLYSEGMENT && bd)
        || (rc == X_POLYFILLRECTANGLE && bd)
        || (rc == X_POLYTEXT8 && bd)
    {
        return 0;
    }
    tracing::error!(
        request_code = rc,
        error_code = ec,
        "fatal error from the X server"
    );
    match XLIB_ERROR_HANDLER.get() {
        Some(Some(default)) => unsafe { default(display, er) },
        _ => 0,
    }
}

pub extern "C" fn on_error_from_xlib_dummy(
    _: *mut xlib::Display,
    _: *mut xlib::XErrorEvent,
) -> c_int {
    0
}

/// Any error while selecting `SubstructureRedirectMask` on the root means it is taken.
extern "C" fn on_startup_error(_: *mut xlib::Display, _: *mut xlib::XErrorEvent) -> c_int {
    OTHER_WM_RUNNING.store(true, Ordering::SeqCst);
    -1
}

/// Foreground and background pixels of a colour scheme.
#[derive(Clone, Copy, Debug, Default)]
pub struct SchemeColors {
    pub fg: c_ulong,
    pub bg: c_ulong,
}

#[derive(Clone, Debug, Default)]
pub struct Colors {
    pub focused_border: c_ulong,
    pub normal_border: c_ulong,
    pub normal: SchemeColors,
    pub selected: SchemeColors,
    pub status: [SchemeColors; STATUS_SCHEMES],
}

/// Contains Xserver information and origins.
pub struct XWrap {
    xlib: xlib::Xlib,
    display: *mut xlib::Display,
    screen: c_int,
    pub root: xlib::Window,
    pub atoms: XAtom,
    cursors: XCursor,
    colors: Colors,
    font: XFont,
    bar: BarSurface,
    /// Modifier bit the `Num_Lock` key is mapped to.
    numlock_mask: c_uint,
    /// Buttons and modifiers bound on client windows.
    client_buttons: Vec<(c_uint, c_uint)>,
    /// The pointer is grabbed for a drag.
    pub pointer_grabbed: bool,
    _task_guard: oneshot::Receiver<()>,
    pub task_notify: Arc<Notify>,
}

impl XWrap {
    /// Opens the display, takes over the root window and prepares the bar.
    ///
    /// # Errors
    ///
    /// Fails when Xlib cannot be loaded, the display cannot be opened, another window manager
    /// owns the root window, or the font or a colour of the theme cannot be loaded.
    // `XOpenDisplay`: https://tronche.com/gui/x/xlib/display/opening.html
    // `XConnectionNumber`: https://tronche.com/gui/x/xlib/display/display-macros.html#ConnectionNumber
    // `XDefaultRootWindow`: https://tronche.com/gui/x/xlib/display/display-macros.html#DefaultRootWindow
    pub fn new(config: &impl Config) -> Result<Self> {
        const SERVER: mio::Token = mio::Token(0);
        let xlib = xlib::Xlib::open().map_err(|err| XlibError::Library(err.to_string()))?;
        unsafe {
            libc::setlocale(libc::LC_CTYPE, b"\0".as_ptr().cast());
            if (xlib.XSupportsLocale)() == 0 {
                tracing::warn!("no locale support, falling back to core fonts");
            }
        }
        let display = unsafe { (xlib.XOpenDisplay)(ptr::null()) };
        if display.is_null() {
            return Err(XlibError::DisplayUnavailable);
        }
        if let Err(err) = check_other_wm(&xlib, display) {
            unsafe { (xlib.XCloseDisplay)(display) };
            return Err(err);
        }

        let fd = unsafe { (xlib.XConnectionNumber)(display) };

        let (guard, _task_guard) = oneshot::channel();
        let notify = Arc::new(Notify::new());
        let task_notify = notify.clone();

        let mut poll = mio::Poll::new()?;
        let mut events = mio::Events::with_capacity(1);
        poll.registry().register(
            &mut mio::unix::SourceFd(&fd),
            SERVER,
            mio::Interest::READABLE,
        )?;
        let timeout = Duration::from_millis(100);
        tokio::task::spawn_blocking(move || loop {
            if guard.is_closed() {
                return;
            }

            if let Err(err) = poll.poll(&mut events, Some(timeout)) {
                tracing::warn!("Xlib socket poll failed with {:?}", err);
                continue;
            }

            events
                .iter()
                .filter(|event| SERVER == event.token())
                .for_each(|_| notify.notify_one());
        });

        let theme = config.theme();
        let screen = unsafe { (xlib.XDefaultScreen)(display) };
        let root = unsafe { (xlib.XRootWindow)(display, screen) };
        let font = XFont::load(&xlib, display, &theme.font)?;
        let atoms = XAtom::new(&xlib, display);
        let cursors = XCursor::new(&xlib, display);
        let (screen_w, _) = screen_size(&xlib, display, screen);
        let bar = BarSurface::new(
            &xlib,
            display,
            screen,
            root,
            (screen_w, font.height() + 2),
            &font,
            cursors.normal,
        );
        let client_buttons = config
            .mousebinds()
            .iter()
            .filter(|bind| bind.click == Click::ClientWin)
            .map(|bind| (bind.button.number(), c_uint::from(bind.modmask.bits())))
            .collect();

        let mut xw = Self {
            xlib,
            display,
            screen,
            root,
            atoms,
            cursors,
            colors: Colors::default(),
            font,
            bar,
            numlock_mask: 0,
            client_buttons,
            pointer_grabbed: false,
            _task_guard,
            task_notify,
        };
        xw.colors = xw.load_colors(&theme)?;
        xw.init();
        Ok(xw)
    }

    /// Selects the root events and advertises what we support.
    // `XChangeWindowAttributes`: https://tronche.com/gui/x/xlib/window/XChangeWindowAttributes.html
    // `XDeleteProperty`: https://tronche.com/gui/x/xlib/window-information/XDeleteProperty.html
    fn init(&self) {
        let supported: Vec<c_long> = self
            .atoms
            .net_supported()
            .iter()
            .map(|&atom| atom as c_long)
            .collect();
        self.replace_property_long(
            self.root,
            self.atoms.NetSupported,
            xlib::XA_ATOM,
            &supported,
        );
        unsafe {
            (self.xlib.XDeleteProperty)(self.display, self.root, self.atoms.NetClientList);
        }

        let mut attrs: xlib::XSetWindowAttributes = unsafe { std::mem::zeroed() };
        attrs.cursor = self.cursors.normal;
        attrs.event_mask = ROOT_EVENT_MASK;
        self.change_window_attributes(self.root, xlib::CWEventMask | xlib::CWCursor, attrs);
        self.subscribe_to_event(self.root, ROOT_EVENT_MASK);
        self.sync();
    }

    /// Allocates every colour of the theme.
    fn load_colors(&self, theme: &Theme) -> Result<Colors> {
        let pair = |pair: &ColorPair| -> Result<SchemeColors> {
            Ok(SchemeColors {
                fg: self.get_color(&pair.foreground)?,
                bg: self.get_color(&pair.background)?,
            })
        };
        let mut status = [SchemeColors::default(); STATUS_SCHEMES];
        for (slot, colors) in status.iter_mut().zip(&theme.status) {
            *slot = pair(colors)?;
        }
        Ok(Colors {
            focused_border: self.get_color(&theme.focused_border)?,
            normal_border: self.get_color(&theme.normal_border)?,
            normal: pair(&theme.normal)?,
            selected: pair(&theme.selected)?,
            status,
        })
    }

    /// Width and height of the default screen.
    pub fn screen_size(&self) -> (i32, i32) {
        screen_size(&self.xlib, self.display, self.screen)
    }

    /// Send a xevent atom for a window to X.
    // `XSendEvent`: https://tronche.com/gui/x/xlib/event-handling/XSendEvent.html
    fn send_xevent_atom(&self, window: xlib::Window, atom: xlib::Atom) -> bool {
        if self.can_send_xevent_atom(window, atom) {
            let mut msg: xlib::XClientMessageEvent = unsafe { std::mem::zeroed() };
            msg.type_ = xlib::ClientMessage;
            msg.window = window;
            msg.message_type = self.atoms.WMProtocols;
            msg.format = 32;
            msg.data.set_long(0, atom as c_long);
            msg.data.set_long(1, xlib::CurrentTime as c_long);
            let mut ev: xlib::XEvent = msg.into();
            self.send_xevent(window, 0, xlib::NoEventMask, &mut ev);
            return true;
        }
        false
    }

    /// Send a xevent for a window to X.
    // `XSendEvent`: https://tronche.com/gui/x/xlib/event-handling/XSendEvent.html
    pub fn send_xevent(
        &self,
        window: xlib::Window,
        propogate: i32,
        mask: c_long,
        event: &mut xlib::XEvent,
    ) {
        unsafe { (self.xlib.XSendEvent)(self.display, window, propogate, mask, event) };
    }

    /// Returns whether a window can recieve a xevent atom.
    // `XGetWMProtocols`: https://tronche.com/gui/x/xlib/ICC/client-to-window-manager/XGetWMProtocols.html
    fn can_send_xevent_atom(&self, window: xlib::Window, atom: xlib::Atom) -> bool {
        unsafe {
            let mut array: *mut xlib::Atom = ptr::null_mut();
            let mut length: c_int = 0;
            let status: xlib::Status =
                (self.xlib.XGetWMProtocols)(self.display, window, &mut array, &mut length);
            if status == 0 || array.is_null() {
                return false;
            }
            let protocols: &[xlib::Atom] = std::slice::from_raw_parts(array, length as usize);
            let supported = protocols.contains(&atom);
            (self.xlib.XFree)(array.cast());
            supported
        }
    }

    /// Runs `f` with the server grabbed and errors ignored, for windows that may be gone.
    // `XGrabServer`: https://tronche.com/gui/x/xlib/window-and-session-manager/XGrabServer.html
    // `XUngrabServer`: https://tronche.com/gui/x/xlib/window-and-session-manager/XUngrabServer.html
    fn with_server_grabbed(&self, f: impl FnOnce(&Self)) {
        unsafe {
            (self.xlib.XGrabServer)(self.display);
            (self.xlib.XSetErrorHandler)(Some(on_error_from_xlib_dummy));
        }
        f(self);
        self.sync();
        unsafe {
            (self.xlib.XSetErrorHandler)(Some(on_error_from_xlib));
            (self.xlib.XUngrabServer)(self.display);
        }
    }

    /// Flush and sync the xserver.
    // `XSync`: https://tronche.com/gui/x/xlib/event-handling/XSync.html
    pub fn sync(&self) {
        unsafe { (self.xlib.XSync)(self.display, xlib::False) };
    }

    /// Flush the xserver.
    // `XFlush`: https://tronche.com/gui/x/xlib/event-handling/XFlush.html
    pub fn flush(&self) {
        unsafe { (self.xlib.XFlush)(self.display) };
    }

    /// Returns how many events are waiting.
    // `XPending`: https://tronche.com/gui/x/xlib/event-handling/XPending.html
    #[must_use]
    pub fn queue_len(&self) -> i32 {
        unsafe { (self.xlib.XPending)(self.display) }
    }
}

impl Drop for XWrap {
    // `XSetInputFocus`: https://tronche.com/gui/x/xlib/input/XSetInputFocus.html
    // `XCloseDisplay`: https://tronche.com/gui/x/xlib/display/XCloseDisplay.html
    fn drop(&mut self) {
        self.font.free(&self.xlib, self.display);
        self.bar.free(&self.xlib, self.display);
        self.cursors.free(&self.xlib, self.display);
        unsafe {
            (self.xlib.XUngrabKey)(self.display, xlib::AnyKey, xlib::AnyModifier, self.root);
            self.sync();
            (self.xlib.XSetInputFocus)(
                self.display,
                xlib::PointerRoot as xlib::Window,
                xlib::RevertToPointerRoot,
                xlib::CurrentTime,
            );
            (self.xlib.XDeleteProperty)(self.display, self.root, self.atoms.NetActiveWindow);
            (self.xlib.XCloseDisplay)(self.display);
        }
    }
}

/// Fails when another window manager already selected `SubstructureRedirectMask` on the root.
// `XSetErrorHandler`: https://tronche.com/gui/x/xlib/event-handling/protocol-errors/XSetErrorHandler.html
// `XSelectInput`: https://tronche.com/gui/x/xlib/event-handling/XSelectInput.html
fn check_other_wm(xlib: &xlib::Xlib, display: *mut xlib::Display) -> Result<()> {
    unsafe {
        let default = (xlib.XSetErrorHandler)(Some(on_startup_error));
        _ = XLIB_ERROR_HANDLER.set(default);
        (xlib.XSelectInput)(
            display,
            (xlib.XDefaultRootWindow)(display),
            xlib::SubstructureRedirectMask,
        );
        (xlib.XSync)(display, xlib::False);
        (xlib.XSetErrorHandler)(Some(on_error_from_xlib));
        (xlib.XSync)(display, xlib::False);
    }
    if OTHER_WM_RUNNING.load(Ordering::SeqCst) {
        return Err(XlibError::OtherWindowManager);
    }
    Ok(())
}

// `XDisplayWidth`: https://tronche.com/gui/x/xlib/display/display-macros.html#DisplayWidth
fn screen_size(xlib: &xlib::Xlib, display: *mut xlib::Display, screen: c_int) -> (i32, i32) {
    unsafe {
        (
            (xlib.XDisplayWidth)(display, screen),
            (xlib.XDisplayHeight)(display, screen),
        )
    }
}

/// Converts a string for Xlib, dropping interior nul bytes.
pub(crate) fn to_cstring(text: &str) -> CString {
    CString::new(text.replace('\0', "")).unwrap_or_default()
}
