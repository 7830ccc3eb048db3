use super::{Config, DisplayEvent, Manager, Mode};
use crate::display_action::DisplayAction;
use crate::display_servers::DisplayServer;
use crate::models::Handle;

impl<H: Handle, C: Config, SERVER: DisplayServer<H>> Manager<H, C, SERVER> {
    /// Process a single event and apply its changes to the manager.
    pub fn display_event_handler(&mut self, event: DisplayEvent<H>) {
        let event = if self.state.mode.is_normal() {
            event
        } else {
            match self.drag_event_handler(event) {
                Some(event) => event,
                None => return,
            }
        };

        let state = &mut self.state;
        match event {
            DisplayEvent::WindowCreate(info) => state.manage(info),
            DisplayEvent::WindowDestroy(handle) => state.window_destroy(&handle),
            DisplayEvent::WindowUnmap { handle, synthetic } => {
                state.window_unmap(&handle, synthetic);
            }
            DisplayEvent::ConfigureRequest(request) => state.configure_request(request),
            DisplayEvent::ScreenResize(w, h) => state.screen_resize(w, h),
            DisplayEvent::EnterNotify(handle) => state.enter_notify(&handle),
            DisplayEvent::FocusIn(handle) => state.focus_in(&handle),
            DisplayEvent::Expose => state.bar_dirty = true,
            DisplayEvent::KeyCombo { modmask, key, x, y } => {
                state.pointer = (x, y);
                self.key_combo_handler(modmask, &key);
            }
            DisplayEvent::MouseCombo {
                modmask,
                button,
                handle,
                x,
                y,
            } => self.mouse_combo_handler(modmask, button, handle, x, y),
            DisplayEvent::BarClick { modmask, button, x } => {
                self.bar_click_handler(modmask, button, x);
            }
            DisplayEvent::Motion(x, y) => state.pointer = (x, y),
            DisplayEvent::ButtonRelease | DisplayEvent::ChangeToNormalMode => {}
            DisplayEvent::MappingNotify => {
                let keybinds = state.keybinds.clone();
                state.actions.push_back(DisplayAction::GrabKeys(keybinds));
            }
            DisplayEvent::PropertyChange(change) => state.property_change(change),
            DisplayEvent::FullscreenRequest { handle, action } => {
                state.fullscreen_request(&handle, action);
            }
            DisplayEvent::ActivateRequest(handle) => state.activate(&handle),
        }
    }

    /// While a window is dragged only motion, the release and a few requests are handled.
    /// Button and enter events are dropped, everything else waits for the drag to end.
    /// Returns the events to handle as usual.
    fn drag_event_handler(&mut self, event: DisplayEvent<H>) -> Option<DisplayEvent<H>> {
        match event {
            DisplayEvent::Motion(x, y) => {
                self.state.pointer = (x, y);
                match self.state.mode {
                    Mode::MovingWindow(drag) => self.state.move_motion(&drag, x, y),
                    Mode::ResizingWindow(drag) => self.state.resize_motion(&drag, x, y),
                    Mode::Normal => {}
                }
                None
            }
            DisplayEvent::ButtonRelease => {
                self.state.end_drag();
                self.replay_deferred();
                None
            }
            DisplayEvent::ChangeToNormalMode => {
                tracing::debug!("pointer grab refused, dropping the drag");
                self.state.mode = Mode::Normal;
                self.replay_deferred();
                None
            }
            DisplayEvent::MouseCombo { .. }
            | DisplayEvent::BarClick { .. }
            | DisplayEvent::EnterNotify(_) => None,
            event if event.passes_drag() => Some(event),
            event => {
                self.state.deferred.push(event);
                None
            }
        }
    }

    fn replay_deferred(&mut self) {
        let deferred = std::mem::take(&mut self.state.deferred);
        for event in deferred {
            self.display_event_handler(event);
        }
    }
}
