//! Xlib display server for ldwm.
// allow casting types
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

mod error;
mod event_translate;
mod event_translate_client_message;
mod event_translate_property_notify;
mod xatom;
mod xcursor;
mod xwrap;

use serde::{Deserialize, Serialize};
pub use error::XlibError;
pub use xwrap::XWrap;

use self::xwrap::ICONIC_STATE;
use event_translate::XEvent;
use futures::prelude::*;
use ldwm_core::bar::Bar;
use ldwm_core::config::Config;
use ldwm_core::models::{ConfigureRequest, Handle, WindowHandle, WindowInfo, Xyhw};
use ldwm_core::{
    CursorShape, DisplayAction, DisplayEvent, DisplayServer, Keybind, LdwmError, WindowState,
};
use std::pin::Pin;

use x11_dl::xlib;

#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct XlibWindowHandle(pub xlib::Window);
impl Handle for XlibWindowHandle {}

pub struct XlibDisplayServer {
    xw: XWrap,
}

impl DisplayServer<XlibWindowHandle> for XlibDisplayServer {
    fn new(config: &impl Config) -> ldwm_core::Result<Self> {
        let xw = XWrap::new(config).map_err(LdwmError::from)?;
        Ok(Self { xw })
    }

    fn screen_size(&self) -> (i32, i32) {
        self.xw.screen_size()
    }

    fn font_height(&self) -> i32 {
        self.xw.font_height()
    }

    fn text_width(&self, text: &str) -> i32 {
        self.xw.text_width(text)
    }

    fn scan(&mut self) -> Vec<WindowInfo<XlibWindowHandle>> {
        let windows = self.xw.get_windows();
        let (transients, others): (Vec<_>, Vec<_>) = windows
            .into_iter()
            .filter_map(|window| self.scannable(window))
            .partition(|info| info.transient_for.is_some());
        tracing::debug!(
            windows = others.len(),
            transients = transients.len(),
            "adopting existing windows"
        );
        others.into_iter().chain(transients).collect()
    }

    fn get_next_events(&mut self) -> Vec<DisplayEvent<XlibWindowHandle>> {
        let mut events = vec![];

        let events_in_queue = self.xw.queue_len();
        for _ in 0..events_in_queue {
            let xlib_event = self.xw.get_next_event();
            let event = XEvent(&mut self.xw, xlib_event).into();
            if let Some(e) = event {
                tracing::trace!("DisplayEvent: {:?}", e);
                events.push(e);
            }
        }

        events
    }

    fn execute_action(
        &mut self,
        act: DisplayAction<XlibWindowHandle>,
    ) -> Option<DisplayEvent<XlibWindowHandle>> {
        tracing::trace!("DisplayAction: {:?}", act);
        let xw = &mut self.xw;
        let event: Option<DisplayEvent<XlibWindowHandle>> = match act {
            DisplayAction::ResizeClient {
                handle,
                geometry,
                border,
            } => from_resize_client(xw, handle, geometry, border),
            DisplayAction::SendConfigureNotify {
                handle,
                geometry,
                border,
            } => from_send_configure_notify(xw, handle, geometry, border),
            DisplayAction::MoveWindow(h, x, y) => from_move_window(xw, h, x, y),
            DisplayAction::MoveResizeWindow(h, g) => from_move_resize_window(xw, h, g),
            DisplayAction::SetBorderWidth(h, b) => from_set_border_width(xw, h, b),
            DisplayAction::SetBorderColor { handle, focused } => {
                from_set_border_color(xw, handle, focused)
            }
            DisplayAction::AddedWindow(h) => from_added_window(xw, h),
            DisplayAction::GrabButtons { handle, focused } => from_grab_buttons(xw, handle, focused),
            DisplayAction::WindowTakeFocus {
                handle,
                never_focus,
            } => from_window_take_focus(xw, handle, never_focus),
            DisplayAction::FocusRoot => from_focus_root(xw),
            DisplayAction::ClearUrgency(h) => from_clear_urgency(xw, h),
            DisplayAction::MoveToTop(h) => from_move_to_top(xw, h),
            DisplayAction::StackBelowBar(hs) => from_stack_below_bar(xw, &hs),
            DisplayAction::DiscardEnterEvents => from_discard_enter_events(xw),
            DisplayAction::KillWindow(h) => from_kill_window(xw, h),
            DisplayAction::MapWindow(h) => from_map_window(xw, h),
            DisplayAction::SetClientState(h, s) => from_set_client_state(xw, h, s),
            DisplayAction::SetFullscreenState(h, f) => from_set_fullscreen_state(xw, h, f),
            DisplayAction::UpdateClientList(hs) => from_update_client_list(xw, &hs),
            DisplayAction::ConfigureUnmanaged(r) => from_configure_unmanaged(xw, &r),
            DisplayAction::ReleaseWindow { handle, border } => {
                from_release_window(xw, handle, border)
            }
            DisplayAction::GrabPointer(shape) => from_grab_pointer(xw, shape),
            DisplayAction::UngrabPointer => from_ungrab_pointer(xw),
            DisplayAction::WarpPointer(h, x, y) => from_warp_pointer(xw, h, x, y),
            DisplayAction::GrabKeys(keybinds) => from_grab_keys(xw, &keybinds),
            DisplayAction::MoveResizeBar(g) => from_move_resize_bar(xw, g),
            DisplayAction::DrawBar(bar) => from_draw_bar(xw, &bar),
        };
        if event.is_some() {
            tracing::trace!("DisplayEvent: {:?}", event);
        }
        event
    }

    fn wait_readable(&self) -> Pin<Box<dyn Future<Output = ()>>> {
        let task_notify = self.xw.task_notify.clone();
        Box::pin(async move {
            task_notify.notified().await;
        })
    }

    fn flush(&self) {
        self.xw.flush();
    }
}

impl XlibDisplayServer {
    /// A window mapped before we started, or iconified, that we should manage.
    fn scannable(&self, window: xlib::Window) -> Option<WindowInfo<XlibWindowHandle>> {
        let attrs = self.xw.get_window_attrs(window).ok()?;
        if attrs.override_redirect != 0 {
            return None;
        }
        let viewable = attrs.map_state == xlib::IsViewable;
        if !viewable && self.xw.get_wm_state(window) != Some(ICONIC_STATE) {
            return None;
        }
        Some(self.xw.get_window_info(window, &attrs))
    }
}

// Display actions.
fn from_resize_client(
    xw: &mut XWrap,
    handle: WindowHandle<XlibWindowHandle>,
    geometry: Xyhw,
    border: i32,
) -> Option<DisplayEvent<XlibWindowHandle>> {
    xw.resize_client(handle.0 .0, geometry, border);
    None
}

fn from_send_configure_notify(
    xw: &mut XWrap,
    handle: WindowHandle<XlibWindowHandle>,
    geometry: Xyhw,
    border: i32,
) -> Option<DisplayEvent<XlibWindowHandle>> {
    xw.configure(handle.0 .0, geometry, border);
    None
}

fn from_move_window(
    xw: &mut XWrap,
    handle: WindowHandle<XlibWindowHandle>,
    x: i32,
    y: i32,
) -> Option<DisplayEvent<XlibWindowHandle>> {
    xw.move_window(handle.0 .0, x, y);
    None
}

fn from_move_resize_window(
    xw: &mut XWrap,
    handle: WindowHandle<XlibWindowHandle>,
    geometry: Xyhw,
) -> Option<DisplayEvent<XlibWindowHandle>> {
    xw.move_resize_window(
        handle.0 .0,
        geometry.x,
        geometry.y,
        geometry.w.max(1) as u32,
        geometry.h.max(1) as u32,
    );
    None
}

fn from_set_border_width(
    xw: &mut XWrap,
    handle: WindowHandle<XlibWindowHandle>,
    border: i32,
) -> Option<DisplayEvent<XlibWindowHandle>> {
    xw.set_border_width(handle.0 .0, border);
    None
}

fn from_set_border_color(
    xw: &mut XWrap,
    handle: WindowHandle<XlibWindowHandle>,
    focused: bool,
) -> Option<DisplayEvent<XlibWindowHandle>> {
    xw.set_window_border_color(handle.0 .0, focused);
    None
}

fn from_added_window(
    xw: &mut XWrap,
    handle: WindowHandle<XlibWindowHandle>,
) -> Option<DisplayEvent<XlibWindowHandle>> {
    xw.subscribe_to_window_events(handle.0 .0);
    None
}

fn from_grab_buttons(
    xw: &mut XWrap,
    handle: WindowHandle<XlibWindowHandle>,
    focused: bool,
) -> Option<DisplayEvent<XlibWindowHandle>> {
    xw.grab_mouse_clicks(handle.0 .0, focused);
    None
}

fn from_window_take_focus(
    xw: &mut XWrap,
    handle: WindowHandle<XlibWindowHandle>,
    never_focus: bool,
) -> Option<DisplayEvent<XlibWindowHandle>> {
    xw.focus(handle.0 .0, never_focus);
    None
}

fn from_focus_root(xw: &mut XWrap) -> Option<DisplayEvent<XlibWindowHandle>> {
    xw.focus_root();
    None
}

fn from_clear_urgency(
    xw: &mut XWrap,
    handle: WindowHandle<XlibWindowHandle>,
) -> Option<DisplayEvent<XlibWindowHandle>> {
    xw.clear_urgency(handle.0 .0);
    None
}

fn from_move_to_top(
    xw: &mut XWrap,
    handle: WindowHandle<XlibWindowHandle>,
) -> Option<DisplayEvent<XlibWindowHandle>> {
    xw.move_to_top(handle.0 .0);
    None
}

fn from_stack_below_bar(
    xw: &mut XWrap,
    handles: &[WindowHandle<XlibWindowHandle>],
) -> Option<DisplayEvent<XlibWindowHandle>> {
    let windows: Vec<xlib::Window> = handles.iter().map(|h| h.0 .0).collect();
    xw.stack_below_bar(&windows);
    None
}

fn from_discard_enter_events(xw: &mut XWrap) -> Option<DisplayEvent<XlibWindowHandle>> {
    xw.discard_enter_events();
    None
}

fn from_kill_window(
    xw: &mut XWrap,
    handle: WindowHandle<XlibWindowHandle>,
) -> Option<DisplayEvent<XlibWindowHandle>> {
    xw.kill_window(handle.0 .0);
    None
}

fn from_map_window(
    xw: &mut XWrap,
    handle: WindowHandle<XlibWindowHandle>,
) -> Option<DisplayEvent<XlibWindowHandle>> {
    xw.map_window(handle.0 .0);
    None
}

fn from_set_client_state(
    xw: &mut XWrap,
    handle: WindowHandle<XlibWindowHandle>,
    state: WindowState,
) -> Option<DisplayEvent<XlibWindowHandle>> {
    xw.set_wm_state(handle.0 .0, state);
    None
}

fn from_set_fullscreen_state(
    xw: &mut XWrap,
    handle: WindowHandle<XlibWindowHandle>,
    fullscreen: bool,
) -> Option<DisplayEvent<XlibWindowHandle>> {
    xw.set_fullscreen_state(handle.0 .0, fullscreen);
    None
}

fn from_update_client_list(
    xw: &mut XWrap,
    handles: &[WindowHandle<XlibWindowHandle>],
) -> Option<DisplayEvent<XlibWindowHandle>> {
    let windows: Vec<xlib::Window> = handles.iter().map(|h| h.0 .0).collect();
    xw.set_client_list(&windows);
    None
}

fn from_configure_unmanaged(
    xw: &mut XWrap,
    request: &ConfigureRequest<XlibWindowHandle>,
) -> Option<DisplayEvent<XlibWindowHandle>> {
    xw.configure_unmanaged(request);
    None
}

fn from_release_window(
    xw: &mut XWrap,
    handle: WindowHandle<XlibWindowHandle>,
    border: i32,
) -> Option<DisplayEvent<XlibWindowHandle>> {
    xw.release_window(handle.0 .0, border);
    None
}

fn from_grab_pointer(
    xw: &mut XWrap,
    shape: CursorShape,
) -> Option<DisplayEvent<XlibWindowHandle>> {
    if xw.grab_pointer(shape) {
        return None;
    }
    tracing::debug!("pointer grab failed, dropping the drag");
    Some(DisplayEvent::ChangeToNormalMode)
}

fn from_ungrab_pointer(xw: &mut XWrap) -> Option<DisplayEvent<XlibWindowHandle>> {
    xw.ungrab_pointer();
    None
}

fn from_warp_pointer(
    xw: &mut XWrap,
    handle: WindowHandle<XlibWindowHandle>,
    x: i32,
    y: i32,
) -> Option<DisplayEvent<XlibWindowHandle>> {
    xw.warp_pointer(handle.0 .0, x, y);
    None
}

fn from_grab_keys(
    xw: &mut XWrap,
    keybinds: &[Keybind],
) -> Option<DisplayEvent<XlibWindowHandle>> {
    xw.grab_keys(keybinds);
    None
}

fn from_move_resize_bar(
    xw: &mut XWrap,
    geometry: Xyhw,
) -> Option<DisplayEvent<XlibWindowHandle>> {
    xw.move_resize_bar(geometry);
    None
}

fn from_draw_bar(xw: &mut XWrap, bar: &Bar) -> Option<DisplayEvent<XlibWindowHandle>> {
    xw.draw_bar(bar);
    None
}
