#![allow(clippy::wildcard_imports)]

use super::*;
use crate::display_action::DisplayAction;
use crate::models::constrain;
use crate::state::State;

impl<H: Handle> State<H> {
    /// Shows the clients of the current view, hides the others and lays the view out.
    pub fn arrange(&mut self) {
        self.show_hide();
        self.reset_symbol();
        self.arrangement().apply(self);
        self.restack();
    }

    /// Moves visible clients into place top-down and hidden clients off screen bottom-up.
    fn show_hide(&mut self) {
        let tagset = self.monitor.tagset();
        let floating_layout = !self.arrangement().arranges();
        let stack: Vec<ClientId> = self.monitor.clients.stack_iter().collect();

        for &id in &stack {
            let client = &self.monitor.clients[id];
            if !client.is_visible(tagset) {
                continue;
            }
            let geometry = client.geometry;
            let needs_hints = (floating_layout || client.is_floating) && !client.is_fullscreen;
            self.actions
                .push_back(DisplayAction::MoveWindow(client.handle, geometry.x, geometry.y));
            if needs_hints {
                self.resize(id, geometry, false);
            }
        }

        for &id in stack.iter().rev() {
            let client = &self.monitor.clients[id];
            if client.is_visible(tagset) {
                continue;
            }
            self.actions.push_back(DisplayAction::MoveWindow(
                client.handle,
                -2 * client.width(),
                client.geometry.y,
            ));
        }
    }

    /// Raises the selection when it floats and keeps tiled clients below the bar in focus order.
    pub fn restack(&mut self) {
        self.bar_dirty = true;
        let Some(sel) = self.monitor.sel() else {
            return;
        };
        let arranges = self.arrangement().arranges();
        let selected = &self.monitor.clients[sel];
        if selected.is_floating || !arranges {
            self.actions.push_back(DisplayAction::MoveToTop(selected.handle));
        }
        if arranges {
            let tagset = self.monitor.tagset();
            let clients = &self.monitor.clients;
            let tiled = clients
                .stack_iter()
                .map(|id| &clients[id])
                .filter(|c| !c.is_floating && c.is_visible(tagset))
                .map(|c| c.handle)
                .collect();
            self.actions.push_back(DisplayAction::StackBelowBar(tiled));
        }
        self.actions.push_back(DisplayAction::DiscardEnterEvents);
    }

    /// Moves and resizes a client within its size hints. Nothing happens when the constrained
    /// geometry equals the current one.
    pub fn resize(&mut self, id: ClientId, geometry: Xyhw, interact: bool) {
        let bounds = self.hint_bounds();
        let Some(client) = self.monitor.clients.get(id) else {
            return;
        };
        let (geometry, changed) = constrain(client, geometry, interact, &bounds);
        if changed {
            self.resize_client(id, geometry);
        }
    }

    /// Applies `geometry` as is, remembering the previous one.
    pub(crate) fn resize_client(&mut self, id: ClientId, geometry: Xyhw) {
        let client = &mut self.monitor.clients[id];
        client.old_geometry = client.geometry;
        client.geometry = geometry;
        self.actions.push_back(DisplayAction::ResizeClient {
            handle: client.handle,
            geometry,
            border: client.border,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layouts::Arrangement;

    #[test]
    fn hidden_clients_are_moved_off_screen() {
        let mut manager = Manager::new_test(vec!["1".to_owned(), "2".to_owned()]);
        let shown = manager.state.add_test_client(1);
        let hidden = manager.state.add_test_client(2);
        manager.state.monitor.clients[hidden].tags = crate::models::TagMask::single(1);
        manager.state.monitor.clients[hidden].geometry = Xyhw::new(10, 30, 100, 50);
        manager.state.arrange();

        let width = manager.state.monitor.clients[hidden].width();
        assert!(manager
            .state
            .actions
            .contains(&DisplayAction::MoveWindow(WindowHandle(2), -2 * width, 30)));
        let shown = &manager.state.monitor.clients[shown];
        assert_eq!(shown.geometry.x, 0);
        assert_eq!(shown.geometry.w, 1920 - 2);
    }

    #[test]
    fn shown_floating_clients_are_kept_in_the_work_area() {
        let mut manager = Manager::new_test(vec![]);
        let id = manager.state.add_test_client(1);
        manager.state.monitor.clients[id].is_floating = true;
        manager.state.monitor.clients[id].geometry = Xyhw::new(100, -500, 300, 200);
        manager.state.arrange();

        // a drag may leave the bar covered, showing a client never does
        let work_area = manager.state.monitor.work_area;
        assert_eq!(
            manager.state.monitor.clients[id].geometry,
            Xyhw::new(100, work_area.y, 300, 200)
        );
    }

    #[test]
    fn tiled_clients_are_stacked_in_focus_order() {
        let mut manager = Manager::new_test(vec![]);
        let first = manager.state.add_test_client(1);
        manager.state.add_test_client(2);
        manager.state.focus(Some(first));
        manager.state.actions.clear();
        manager.state.restack();

        let actions: Vec<_> = manager.state.actions.drain(..).collect();
        assert_eq!(
            actions,
            vec![
                DisplayAction::StackBelowBar(vec![WindowHandle(1), WindowHandle(2)]),
                DisplayAction::DiscardEnterEvents,
            ]
        );
    }

    #[test]
    fn floating_selection_is_raised() {
        let mut manager = Manager::new_test(vec![]);
        let id = manager.state.add_test_client(1);
        manager.state.monitor.clients[id].is_floating = true;
        manager.state.focus(Some(id));
        manager.state.actions.clear();
        manager.state.restack();
        assert_eq!(
            manager.state.actions.front(),
            Some(&DisplayAction::MoveToTop(WindowHandle(1)))
        );
    }

    #[test]
    fn floating_layout_keeps_geometry() {
        let mut manager = Manager::new_test(vec![]);
        let id = manager.state.add_test_client(1);
        manager.state.monitor.clients[id].geometry = Xyhw::new(100, 100, 300, 200);
        manager.state.monitor.set_layout(Some(2));
        assert_eq!(manager.state.arrangement(), Arrangement::Floating);
        manager.state.arrange();

        assert_eq!(manager.state.monitor.clients[id].geometry, Xyhw::new(100, 100, 300, 200));
        assert_eq!(manager.state.monitor.ltsymbol, "><>");
    }

    #[test]
    fn unchanged_resizes_are_dropped() {
        let mut manager = Manager::new_test(vec![]);
        let id = manager.state.add_test_client(1);
        manager.state.arrange();
        manager.state.actions.clear();
        let geometry = manager.state.monitor.clients[id].geometry;
        manager.state.resize(id, geometry, false);
        assert!(manager.state.actions.is_empty());
    }
}
