use crate::XlibWindowHandle;

use super::{event_translate_client_message, event_translate_property_notify, DisplayEvent, XWrap};
use ldwm_core::models::{ConfigureRequest, WindowHandle};
use ldwm_core::utils::modmask_lookup::Button;
use x11_dl::xlib;

pub struct XEvent<'a>(pub &'a mut XWrap, pub xlib::XEvent);

impl<'a> From<XEvent<'a>> for Option<DisplayEvent<XlibWindowHandle>> {
    fn from(x_event: XEvent) -> Self {
        let raw_event = x_event.1;
        let grabbed = x_event.0.pointer_grabbed;

        match raw_event.get_type() {
            // New window wants to be mapped.
            xlib::MapRequest => from_map_request(&x_event),
            // Window is unmapped.
            xlib::UnmapNotify => Some(from_unmap_event(raw_event)),
            // Window is destroyed.
            xlib::DestroyNotify => Some(from_destroy_notify(raw_event)),
            // Window is taking focus.
            xlib::FocusIn => Some(from_focus_in(raw_event)),
            // Window client message.
            xlib::ClientMessage => from_client_message(&x_event),
            // Window property notify.
            xlib::PropertyNotify => from_property_notify(&x_event),
            // Window configure request.
            xlib::ConfigureRequest => Some(from_configure_request(raw_event)),
            // The root window changed.
            xlib::ConfigureNotify => from_configure_notify(&x_event),
            // Mouse entered notify.
            xlib::EnterNotify => from_enter_notify(&x_event),
            // The bar needs repainting.
            xlib::Expose => from_expose(raw_event),
            // Grabbed key pressed.
            xlib::KeyPress => from_key_press(&x_event),
            // Mouse button pressed.
            xlib::ButtonPress => Some(from_button_press(&x_event)),
            // Mouse motion during a drag.
            xlib::MotionNotify if grabbed => Some(from_motion_notify(raw_event)),
            // Mouse button released, ends a drag. A quick click may queue the release before
            // the drag's pointer grab, so it is passed on even without one.
            xlib::ButtonRelease => Some(DisplayEvent::ButtonRelease),
            // Keyboard mapping changed.
            xlib::MappingNotify => from_mapping_notify(x_event),
            _other => None,
        }
    }
}

fn from_map_request(x_event: &XEvent) -> Option<DisplayEvent<XlibWindowHandle>> {
    let xw = &x_event.0;
    let event = xlib::XMapRequestEvent::from(x_event.1);
    // Windows that ask not to be managed are left alone.
    let attrs = xw.get_window_attrs(event.window).ok()?;
    if attrs.override_redirect != 0 {
        return None;
    }
    Some(DisplayEvent::WindowCreate(
        xw.get_window_info(event.window, &attrs),
    ))
}

fn from_unmap_event(raw_event: xlib::XEvent) -> DisplayEvent<XlibWindowHandle> {
    let event = xlib::XUnmapEvent::from(raw_event);
    DisplayEvent::WindowUnmap {
        handle: WindowHandle(XlibWindowHandle(event.window)),
        synthetic: event.send_event != xlib::False,
    }
}

fn from_destroy_notify(raw_event: xlib::XEvent) -> DisplayEvent<XlibWindowHandle> {
    let event = xlib::XDestroyWindowEvent::from(raw_event);
    DisplayEvent::WindowDestroy(WindowHandle(XlibWindowHandle(event.window)))
}

fn from_focus_in(raw_event: xlib::XEvent) -> DisplayEvent<XlibWindowHandle> {
    let event = xlib::XFocusChangeEvent::from(raw_event);
    DisplayEvent::FocusIn(WindowHandle(XlibWindowHandle(event.window)))
}

fn from_client_message(x_event: &XEvent) -> Option<DisplayEvent<XlibWindowHandle>> {
    let event = xlib::XClientMessageEvent::from(x_event.1);
    event_translate_client_message::from_event(x_event.0, &event)
}

fn from_property_notify(x_event: &XEvent) -> Option<DisplayEvent<XlibWindowHandle>> {
    let event = xlib::XPropertyEvent::from(x_event.1);
    event_translate_property_notify::from_event(x_event.0, &event)
}

fn from_configure_request(raw_event: xlib::XEvent) -> DisplayEvent<XlibWindowHandle> {
    let event = xlib::XConfigureRequestEvent::from(raw_event);
    DisplayEvent::ConfigureRequest(configure_request_from(&event))
}

/// Keeps only the fields the client asked to change.
fn configure_request_from(
    event: &xlib::XConfigureRequestEvent,
) -> ConfigureRequest<XlibWindowHandle> {
    let mask = event.value_mask;
    let requested = |flag: u16| mask & std::os::raw::c_ulong::from(flag) != 0;
    ConfigureRequest {
        handle: WindowHandle(XlibWindowHandle(event.window)),
        x: requested(xlib::CWX).then_some(event.x),
        y: requested(xlib::CWY).then_some(event.y),
        w: requested(xlib::CWWidth).then_some(event.width),
        h: requested(xlib::CWHeight).then_some(event.height),
        border: requested(xlib::CWBorderWidth).then_some(event.border_width),
        sibling: requested(xlib::CWSibling).then_some(WindowHandle(XlibWindowHandle(event.above))),
        stack_mode: requested(xlib::CWStackMode).then_some(event.detail),
    }
}

fn from_configure_notify(x_event: &XEvent) -> Option<DisplayEvent<XlibWindowHandle>> {
    let event = xlib::XConfigureEvent::from(x_event.1);
    if event.window != x_event.0.root {
        return None;
    }
    Some(DisplayEvent::ScreenResize(event.width, event.height))
}

fn from_enter_notify(x_event: &XEvent) -> Option<DisplayEvent<XlibWindowHandle>> {
    let event = xlib::XCrossingEvent::from(x_event.1);
    let passing = event.mode != xlib::NotifyNormal || event.detail == xlib::NotifyInferior;
    if passing && event.window != x_event.0.root {
        return None;
    }
    Some(DisplayEvent::EnterNotify(WindowHandle(XlibWindowHandle(
        event.window,
    ))))
}

fn from_expose(raw_event: xlib::XEvent) -> Option<DisplayEvent<XlibWindowHandle>> {
    let event = xlib::XExposeEvent::from(raw_event);
    (event.count == 0).then_some(DisplayEvent::Expose)
}

fn from_key_press(x_event: &XEvent) -> Option<DisplayEvent<XlibWindowHandle>> {
    let xw = &x_event.0;
    let event = xlib::XKeyEvent::from(x_event.1);
    let key = xw.keysym_name(event.keycode)?;
    Some(DisplayEvent::KeyCombo {
        modmask: xw.clean_mask(event.state),
        key,
        x: event.x_root,
        y: event.y_root,
    })
}

fn from_button_press(x_event: &XEvent) -> DisplayEvent<XlibWindowHandle> {
    let xw = &x_event.0;
    let event = xlib::XButtonPressedEvent::from(x_event.1);
    let modmask = xw.clean_mask(event.state);
    let button = Button::from_number(event.button);
    if event.window == xw.bar_window() {
        return DisplayEvent::BarClick {
            modmask,
            button,
            x: event.x,
        };
    }
    let handle = (event.window != xw.root).then_some(WindowHandle(XlibWindowHandle(event.window)));
    DisplayEvent::MouseCombo {
        modmask,
        button,
        handle,
        x: event.x_root,
        y: event.y_root,
    }
}

fn from_motion_notify(raw_event: xlib::XEvent) -> DisplayEvent<XlibWindowHandle> {
    let event = xlib::XMotionEvent::from(raw_event);
    DisplayEvent::Motion(event.x_root, event.y_root)
}

fn from_mapping_notify(x_event: XEvent) -> Option<DisplayEvent<XlibWindowHandle>> {
    let xw = x_event.0;
    let mut event = xlib::XMappingEvent::from(x_event.1);
    if let Err(err) = xw.refresh_keyboard(&mut event) {
        tracing::warn!(?err, "could not refresh the keyboard mapping");
    }
    (event.request == xlib::MappingKeyboard).then_some(DisplayEvent::MappingNotify)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configure_request(mask: u16) -> xlib::XConfigureRequestEvent {
        let mut event: xlib::XConfigureRequestEvent = unsafe { std::mem::zeroed() };
        event.window = 42;
        event.x = 5;
        event.y = 6;
        event.width = 640;
        event.height = 480;
        event.border_width = 3;
        event.above = 7;
        event.detail = xlib::Above;
        event.value_mask = std::os::raw::c_ulong::from(mask);
        event
    }

    #[test]
    fn configure_requests_keep_only_masked_fields() {
        let request = configure_request_from(&configure_request(xlib::CWX | xlib::CWY));
        assert_eq!(request.handle, WindowHandle(XlibWindowHandle(42)));
        assert_eq!((request.x, request.y), (Some(5), Some(6)));
        assert_eq!((request.w, request.h), (None, None));
        assert!(request.is_move_only());
    }

    #[test]
    fn stacking_fields_come_through() {
        let request = configure_request_from(&configure_request(
            xlib::CWSibling | xlib::CWStackMode | xlib::CWBorderWidth,
        ));
        assert_eq!(request.sibling, Some(WindowHandle(XlibWindowHandle(7))));
        assert_eq!(request.stack_mode, Some(xlib::Above));
        assert_eq!(request.border, Some(3));
        assert!(!request.is_move_only());
    }
}
