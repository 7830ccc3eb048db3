#![allow(clippy::wildcard_imports)]

use super::*;
use crate::display_action::CursorShape;
use crate::models::Drag;
use crate::state::State;

impl<H: Handle> State<H> {
    /// Starts resizing the selected client from its bottom right corner.
    pub fn start_resize(&mut self) {
        self.start_drag(CursorShape::Resize);
    }

    /// Sizes the client so its bottom right corner follows the pointer.
    pub(crate) fn resize_motion(&mut self, drag: &Drag<H>, x: i32, y: i32) {
        let Some(id) = self.monitor.clients.win_to_client(&drag.handle) else {
            return;
        };
        let wa = self.monitor.work_area;
        let snap = self.snap;
        let arranges = self.arrangement().arranges();
        let client = &self.monitor.clients[id];
        let nw = (x - drag.window_origin.x - 2 * client.border + 1).max(1);
        let nh = (y - drag.window_origin.y - 2 * client.border + 1).max(1);

        if nw <= wa.w
            && nh <= wa.h
            && !client.is_floating
            && arranges
            && ((nw - client.geometry.w).abs() > snap || (nh - client.geometry.h).abs() > snap)
        {
            self.toggle_client_floating(id);
        }

        let client = &self.monitor.clients[id];
        if !arranges || client.is_floating {
            let geometry = Xyhw::new(client.geometry.x, client.geometry.y, nw, nh);
            self.resize(id, geometry, true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display_action::DisplayAction;

    #[test]
    fn resizing_follows_the_pointer() {
        let mut manager = Manager::new_test(vec![]);
        let id = manager.state.add_test_client(1);
        manager.state.monitor.clients[id].is_floating = true;
        manager.state.monitor.clients[id].geometry = Xyhw::new(100, 100, 300, 200);
        manager.state.focus(Some(id));
        manager.command_handler(&Command::ResizeMouse);
        assert!(manager
            .state
            .actions
            .contains(&DisplayAction::WarpPointer(WindowHandle(1), 300, 200)));

        manager.display_event_handler(DisplayEvent::Motion(601, 501));
        assert_eq!(
            manager.state.monitor.clients[id].geometry,
            Xyhw::new(100, 100, 500, 400)
        );

        manager.state.actions.clear();
        manager.display_event_handler(DisplayEvent::ButtonRelease);
        assert_eq!(
            manager.state.actions.front(),
            Some(&DisplayAction::WarpPointer(WindowHandle(1), 500, 400))
        );
    }

    #[test]
    fn sizes_never_drop_below_one() {
        let mut manager = Manager::new_test(vec![]);
        let id = manager.state.add_test_client(1);
        manager.state.monitor.clients[id].is_floating = true;
        manager.state.monitor.clients[id].geometry = Xyhw::new(100, 100, 300, 200);
        manager.state.focus(Some(id));
        manager.command_handler(&Command::ResizeMouse);
        manager.display_event_handler(DisplayEvent::Motion(0, 0));
        // floored at the bar height after the size hints
        let geometry = manager.state.monitor.clients[id].geometry;
        assert_eq!((geometry.w, geometry.h), (18, 18));
    }

    #[test]
    fn resizing_a_tiled_client_past_the_snap_floats_it() {
        let mut manager = Manager::new_test(vec![]);
        let id = manager.state.add_test_client(1);
        manager.state.focus(Some(id));
        manager.state.arrange();
        manager.command_handler(&Command::ResizeMouse);
        manager.display_event_handler(DisplayEvent::Motion(800, 600));
        assert!(manager.state.monitor.clients[id].is_floating);
    }
}
