#![allow(clippy::wildcard_imports)]

use super::*;
use crate::display_action::DisplayAction;
use crate::display_servers::DisplayServer;
use crate::layouts::LayoutId;
use crate::state::State;
use crate::utils::child_process::exec_shell;

impl<H: Handle, C: Config, SERVER: DisplayServer<H>> Manager<H, C, SERVER> {
    /// Processes a command and invokes the associated function.
    pub fn command_handler(&mut self, command: &Command) {
        tracing::trace!(?command, "running command");
        let state = &mut self.state;
        match command {
            Command::Spawn(shell_command) => {
                exec_shell(shell_command, &mut self.children);
            }
            Command::FocusStack(direction) => state.focus_stack(*direction),
            Command::IncNMaster(delta) => state.inc_nmaster(*delta),
            Command::SetMFact(value) => state.set_mfact(*value),
            Command::Zoom => state.zoom(),
            Command::View(mask) => state.view(*mask),
            Command::ToggleView(mask) => state.toggle_view(*mask),
            Command::Tag(mask) => state.tag(*mask),
            Command::ToggleTag(mask) => state.toggle_tag(*mask),
            Command::KillClient => state.kill_client(),
            Command::SetLayout(layout) => state.set_layout(*layout),
            Command::ToggleFloating => state.toggle_floating(),
            Command::ToggleBar => state.toggle_bar(),
            Command::MoveMouse => state.start_move(),
            Command::ResizeMouse => state.start_resize(),
            Command::Quit => state.running = false,
        }
    }
}

impl<H: Handle> State<H> {
    /// Swaps the selection into the master slot. The master itself trades places with the next
    /// tiled client.
    pub fn zoom(&mut self) {
        let Some(sel) = self.monitor.sel() else {
            return;
        };
        if !self.arrangement().arranges() || self.monitor.clients[sel].is_floating {
            return;
        }
        let tagset = self.monitor.tagset();
        let clients = &self.monitor.clients;
        let mut target = sel;
        if clients.next_tiled(clients.head(), tagset) == Some(sel) {
            match clients.next_tiled(clients.next_of(sel), tagset) {
                Some(next) => target = next,
                None => return,
            }
        }
        self.pop(target);
    }

    /// Moves a client to the head of the list and focuses it.
    pub(crate) fn pop(&mut self, id: ClientId) {
        self.monitor.clients.detach(id);
        self.monitor.clients.attach(id);
        self.focus(Some(id));
        self.arrange();
    }

    pub fn inc_nmaster(&mut self, delta: i32) {
        self.monitor.inc_nmaster(delta);
        self.arrange();
    }

    pub fn set_mfact(&mut self, value: f32) {
        if !self.arrangement().arranges() {
            return;
        }
        if self.monitor.set_mfact(value) {
            self.arrange();
        }
    }

    pub fn set_layout(&mut self, layout: Option<LayoutId>) {
        if let Some(layout) = layout {
            if layout >= self.layouts.len() {
                tracing::warn!(layout, "no such layout");
                return;
            }
        }
        self.monitor.set_layout(layout);
        self.reset_symbol();
        if self.monitor.sel().is_some() {
            self.arrange();
        } else {
            self.bar_dirty = true;
        }
    }

    /// Flips the selection between floating and tiled. Fixed size clients always float and
    /// fullscreen ones are left alone.
    pub fn toggle_floating(&mut self) {
        if let Some(sel) = self.monitor.sel() {
            self.toggle_client_floating(sel);
        }
    }

    pub(crate) fn toggle_client_floating(&mut self, id: ClientId) {
        let client = &mut self.monitor.clients[id];
        if client.is_fullscreen {
            return;
        }
        client.is_floating = !client.is_floating || client.is_fixed;
        if client.is_floating {
            let geometry = client.geometry;
            self.resize(id, geometry, false);
        }
        self.arrange();
    }

    pub fn toggle_bar(&mut self) {
        self.monitor.show_bar = !self.monitor.show_bar;
        self.monitor.update_bar_pos(self.bar_height);
        self.move_bar();
        self.arrange();
    }

    pub fn kill_client(&mut self) {
        if let Some(sel) = self.monitor.sel() {
            let handle = self.monitor.clients[sel].handle;
            self.actions.push_back(DisplayAction::KillWindow(handle));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TagMask;

    #[test]
    fn zoom_moves_the_selection_to_master() {
        let mut manager = Manager::new_test(vec![]);
        let a = manager.state.add_test_client(1);
        let b = manager.state.add_test_client(2);
        let c = manager.state.add_test_client(3);
        manager.state.focus(Some(a));
        manager.command_handler(&Command::Zoom);
        let order: Vec<_> = manager.state.monitor.clients.iter().collect();
        assert_eq!(order, vec![a, c, b]);
        assert_eq!(manager.state.monitor.sel(), Some(a));

        // zooming the master swaps in the next tiled client
        manager.command_handler(&Command::Zoom);
        let order: Vec<_> = manager.state.monitor.clients.iter().collect();
        assert_eq!(order, vec![c, a, b]);
        assert_eq!(manager.state.monitor.sel(), Some(c));
    }

    #[test]
    fn zoom_needs_a_second_tiled_client() {
        let mut manager = Manager::new_test(vec![]);
        let a = manager.state.add_test_client(1);
        manager.state.focus(Some(a));
        manager.state.actions.clear();
        manager.command_handler(&Command::Zoom);
        assert!(manager.state.actions.is_empty());
    }

    #[test]
    fn zoom_is_ignored_for_floating_clients_and_layouts() {
        let mut manager = Manager::new_test(vec![]);
        let a = manager.state.add_test_client(1);
        let b = manager.state.add_test_client(2);
        manager.state.focus(Some(a));
        manager.state.monitor.clients[a].is_floating = true;
        manager.command_handler(&Command::Zoom);
        assert_eq!(manager.state.monitor.clients.head(), Some(b));

        manager.state.monitor.clients[a].is_floating = false;
        manager.command_handler(&Command::SetLayout(Some(2)));
        manager.command_handler(&Command::Zoom);
        assert_eq!(manager.state.monitor.clients.head(), Some(b));
    }

    #[test]
    fn zoom_without_clients_does_nothing() {
        let mut manager = Manager::new_test(vec![]);
        manager.command_handler(&Command::Zoom);
        assert!(manager.state.actions.is_empty());
    }

    #[test]
    fn layouts_toggle_and_update_the_symbol() {
        let mut manager = Manager::new_test(vec![]);
        manager.command_handler(&Command::SetLayout(Some(3)));
        assert_eq!(manager.state.monitor.ltsymbol, "[M]");
        manager.command_handler(&Command::SetLayout(None));
        assert_eq!(manager.state.monitor.ltsymbol, "[]=");
        assert_eq!(manager.state.monitor.layout(), 0);
        manager.command_handler(&Command::SetLayout(None));
        assert_eq!(manager.state.monitor.layout(), 3);
    }

    #[test]
    fn unknown_layouts_are_ignored() {
        let mut manager = Manager::new_test(vec![]);
        manager.command_handler(&Command::SetLayout(Some(42)));
        assert_eq!(manager.state.monitor.layout(), 0);
    }

    #[test]
    fn mfact_is_frozen_in_the_floating_layout() {
        let mut manager = Manager::new_test(vec![]);
        manager.command_handler(&Command::SetLayout(Some(2)));
        manager.command_handler(&Command::SetMFact(0.1));
        assert!((manager.state.monitor.mfact - 0.55).abs() < f32::EPSILON);

        manager.command_handler(&Command::SetLayout(Some(0)));
        manager.command_handler(&Command::SetMFact(1.3));
        assert!((manager.state.monitor.mfact - 0.3).abs() < 1e-6);
    }

    #[test]
    fn nmaster_changes_the_master_column() {
        let mut manager = Manager::new_test(vec![]);
        let a = manager.state.add_test_client(1);
        let b = manager.state.add_test_client(2);
        manager.command_handler(&Command::IncNMaster(1));
        let clients = &manager.state.monitor.clients;
        assert_eq!(clients[a].geometry.x, clients[b].geometry.x);
        manager.command_handler(&Command::IncNMaster(-5));
        assert_eq!(manager.state.monitor.nmaster, 0);
    }

    #[test]
    fn fixed_clients_stay_floating() {
        let mut manager = Manager::new_test(vec![]);
        let a = manager.state.add_test_client(1);
        manager.state.focus(Some(a));
        manager.command_handler(&Command::ToggleFloating);
        assert!(manager.state.monitor.clients[a].is_floating);
        manager.command_handler(&Command::ToggleFloating);
        assert!(!manager.state.monitor.clients[a].is_floating);

        manager.state.monitor.clients[a].is_fixed = true;
        manager.command_handler(&Command::ToggleFloating);
        manager.command_handler(&Command::ToggleFloating);
        assert!(manager.state.monitor.clients[a].is_floating);
    }

    #[test]
    fn hiding_the_bar_grows_the_work_area() {
        let mut manager = Manager::new_test(vec![]);
        manager.command_handler(&Command::ToggleBar);
        assert_eq!(manager.state.monitor.work_area.h, 1080);
        assert_eq!(manager.state.monitor.bar_y, -manager.state.bar_height);
        manager.command_handler(&Command::ToggleBar);
        assert_eq!(manager.state.monitor.work_area.y, manager.state.bar_height);
    }

    #[test]
    fn kill_asks_the_selected_window_to_close() {
        let mut manager = Manager::new_test(vec![]);
        manager.command_handler(&Command::KillClient);
        assert!(manager.state.actions.is_empty());
        let a = manager.state.add_test_client(1);
        manager.state.focus(Some(a));
        manager.command_handler(&Command::KillClient);
        assert_eq!(
            manager.state.actions.back(),
            Some(&DisplayAction::KillWindow(WindowHandle(1)))
        );
    }

    #[test]
    fn tag_commands_reach_the_state() {
        let mut manager = Manager::new_test(vec!["1".to_owned(), "2".to_owned()]);
        manager.command_handler(&Command::View(TagMask::single(1)));
        assert_eq!(manager.state.monitor.tagset(), TagMask::single(1));
        manager.command_handler(&Command::ToggleView(TagMask::single(0)));
        assert_eq!(manager.state.monitor.tagset(), TagMask(0b11));
    }

    #[test]
    fn quit_stops_the_loop() {
        let mut manager = Manager::new_test(vec![]);
        manager.command_handler(&Command::Quit);
        assert!(!manager.state.running);
    }
}
