use crate::models::Handle;
use crate::state::State;

impl<H: Handle> State<H> {
    /// The root window changed size. Relays out everything when the size really differs.
    pub fn screen_resize(&mut self, w: i32, h: i32) {
        if !self.monitor.update_geometry(w, h, self.bar_height) {
            return;
        }
        tracing::info!(w, h, "screen resized");
        self.move_bar();
        self.focus(None);
        self.arrange();
    }
}

#[cfg(test)]
mod tests {
    use crate::models::{Manager, Xyhw};
    use crate::DisplayAction;

    #[test]
    fn resizing_the_screen_moves_the_bar_and_clients() {
        let mut manager = Manager::new_test(vec![]);
        let id = manager.state.add_test_client(1);
        manager.state.screen_resize(1280, 720);

        assert_eq!(manager.state.monitor.work_area, Xyhw::new(0, 18, 1280, 702));
        assert!(manager
            .state
            .actions
            .contains(&DisplayAction::MoveResizeBar(Xyhw::new(0, 0, 1280, 18))));
        assert_eq!(manager.state.monitor.clients[id].geometry.w, 1278);
    }

    #[test]
    fn same_size_is_ignored() {
        let mut manager = Manager::new_test(vec![]);
        manager.state.screen_resize(1920, 1080);
        assert!(manager.state.actions.is_empty());
    }
}
