#![allow(clippy::wildcard_imports)]

use super::*;
use crate::display_action::{CursorShape, DisplayAction};
use crate::models::Drag;
use crate::state::State;

impl<H: Handle> State<H> {
    /// Starts dragging the selected client with the pointer.
    pub fn start_move(&mut self) {
        self.start_drag(CursorShape::Move);
    }

    pub(crate) fn start_drag(&mut self, cursor: CursorShape) {
        let Some(sel) = self.monitor.sel() else {
            return;
        };
        let client = &self.monitor.clients[sel];
        if client.is_fullscreen {
            return;
        }
        let drag = Drag {
            handle: client.handle,
            pointer_origin: self.pointer,
            window_origin: client.geometry,
        };
        self.restack();
        self.actions.push_back(DisplayAction::GrabPointer(cursor));
        self.mode = match cursor {
            CursorShape::Resize => {
                let client = &self.monitor.clients[sel];
                self.actions.push_back(DisplayAction::WarpPointer(
                    client.handle,
                    client.geometry.w + client.border - 1,
                    client.geometry.h + client.border - 1,
                ));
                Mode::ResizingWindow(drag)
            }
            CursorShape::Move | CursorShape::Normal => Mode::MovingWindow(drag),
        };
    }

    /// Follows the pointer, snapping to the edges of the usable area. A tiled client dragged
    /// further than the snap distance starts floating.
    pub(crate) fn move_motion(&mut self, drag: &Drag<H>, x: i32, y: i32) {
        let Some(id) = self.monitor.clients.win_to_client(&drag.handle) else {
            return;
        };
        let wa = self.monitor.work_area;
        let snap = self.snap;
        let arranges = self.arrangement().arranges();
        let mut nx = drag.window_origin.x + (x - drag.pointer_origin.0);
        let mut ny = drag.window_origin.y + (y - drag.pointer_origin.1);

        let client = &self.monitor.clients[id];
        if nx >= wa.x && nx <= wa.right() && ny >= wa.y && ny <= wa.bottom() {
            if (wa.x - nx).abs() < snap {
                nx = wa.x;
            } else if (wa.right() - (nx + client.width())).abs() < snap {
                nx = wa.right() - client.width();
            }
            if (wa.y - ny).abs() < snap {
                ny = wa.y;
            } else if (wa.bottom() - (ny + client.height())).abs() < snap {
                ny = wa.bottom() - client.height();
            }
            if !client.is_floating
                && arranges
                && ((nx - client.geometry.x).abs() > snap || (ny - client.geometry.y).abs() > snap)
            {
                self.toggle_client_floating(id);
            }
        }

        let client = &self.monitor.clients[id];
        if !arranges || client.is_floating {
            let geometry = Xyhw::new(nx, ny, client.geometry.w, client.geometry.h);
            self.resize(id, geometry, true);
        }
    }

    /// Releases the pointer after a drag.
    pub fn end_drag(&mut self) {
        if let Mode::ResizingWindow(drag) = self.mode {
            if let Some(id) = self.monitor.clients.win_to_client(&drag.handle) {
                let client = &self.monitor.clients[id];
                self.actions.push_back(DisplayAction::WarpPointer(
                    client.handle,
                    client.geometry.w + client.border - 1,
                    client.geometry.h + client.border - 1,
                ));
            }
        }
        if !self.mode.is_normal() {
            self.actions.push_back(DisplayAction::UngrabPointer);
            self.actions.push_back(DisplayAction::DiscardEnterEvents);
        }
        self.mode = Mode::Normal;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floating_manager() -> (
        Manager<
            crate::models::MockHandle,
            crate::config::TestConfig,
            crate::display_servers::MockDisplayServer<crate::models::MockHandle>,
        >,
        ClientId,
    ) {
        let mut manager = Manager::new_test(vec![]);
        let id = manager.state.add_test_client(1);
        manager.state.monitor.clients[id].is_floating = true;
        manager.state.monitor.clients[id].geometry = Xyhw::new(200, 200, 300, 200);
        manager.state.focus(Some(id));
        (manager, id)
    }

    #[test]
    fn moving_follows_the_pointer() {
        let (mut manager, id) = floating_manager();
        manager.state.pointer = (250, 250);
        manager.command_handler(&Command::MoveMouse);
        assert!(matches!(manager.state.mode, Mode::MovingWindow(_)));

        manager.display_event_handler(DisplayEvent::Motion(350, 300));
        assert_eq!(
            manager.state.monitor.clients[id].geometry,
            Xyhw::new(300, 250, 300, 200)
        );
    }

    #[test]
    fn moving_snaps_to_the_edges() {
        let (mut manager, id) = floating_manager();
        manager.state.pointer = (250, 250);
        manager.command_handler(&Command::MoveMouse);
        // lands at x = 5, within the snap distance of the left edge
        manager.display_event_handler(DisplayEvent::Motion(55, 300));
        assert_eq!(manager.state.monitor.clients[id].geometry.x, 0);

        // right edge: 1920 - 302 = 1618 is the snapped position
        manager.display_event_handler(DisplayEvent::Motion(250 + 1612 - 200, 300));
        assert_eq!(manager.state.monitor.clients[id].geometry.x, 1618);
    }

    #[test]
    fn dragging_a_tiled_client_floats_it() {
        let mut manager = Manager::new_test(vec![]);
        let id = manager.state.add_test_client(1);
        manager.state.focus(Some(id));
        manager.state.arrange();
        manager.state.pointer = (100, 100);
        manager.command_handler(&Command::MoveMouse);

        manager.display_event_handler(DisplayEvent::Motion(105, 105));
        assert!(!manager.state.monitor.clients[id].is_floating);
        manager.display_event_handler(DisplayEvent::Motion(300, 300));
        assert!(manager.state.monitor.clients[id].is_floating);
        assert_eq!(manager.state.monitor.clients[id].geometry.x, 200);
    }

    #[test]
    fn fullscreen_clients_cannot_be_dragged() {
        let (mut manager, id) = floating_manager();
        manager.state.monitor.clients[id].is_fullscreen = true;
        manager.command_handler(&Command::MoveMouse);
        assert!(manager.state.mode.is_normal());
    }

    #[test]
    fn release_ends_the_drag() {
        let (mut manager, _) = floating_manager();
        manager.command_handler(&Command::MoveMouse);
        manager.state.actions.clear();
        manager.display_event_handler(DisplayEvent::ButtonRelease);
        assert!(manager.state.mode.is_normal());
        let actions: Vec<_> = manager.state.actions.drain(..).collect();
        assert_eq!(
            actions,
            vec![DisplayAction::UngrabPointer, DisplayAction::DiscardEnterEvents]
        );
    }
}
