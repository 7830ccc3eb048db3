use super::{Command, Config, Manager, WindowHandle};
use crate::bar::{self, Click};
use crate::display_servers::DisplayServer;
use crate::models::{Handle, TagMask};
use crate::utils::modmask_lookup::{Button, ModMask};

impl<H: Handle, C: Config, SERVER: DisplayServer<H>> Manager<H, C, SERVER> {
    /// Runs every key binding for `key` whose modifiers match, ignoring lock keys.
    pub fn key_combo_handler(&mut self, modmask: ModMask, key: &str) {
        let commands: Vec<Command> = self
            .state
            .keybinds
            .iter()
            .filter(|k| k.key == key && k.modmask.clean() == modmask.clean())
            .map(|k| k.command.clone())
            .collect();
        for command in &commands {
            self.command_handler(command);
        }
    }

    /// A grabbed button was pressed on a client or on the root window. Clients are focused
    /// before their bindings run.
    pub fn mouse_combo_handler(
        &mut self,
        modmask: ModMask,
        button: Button,
        handle: Option<WindowHandle<H>>,
        x: i32,
        y: i32,
    ) {
        self.state.pointer = (x, y);
        let client = handle.and_then(|h| self.state.monitor.clients.win_to_client(&h));
        let click = match client {
            Some(id) => {
                self.state.focus(Some(id));
                Click::ClientWin
            }
            None => Click::RootWin,
        };
        self.run_mousebinds(click, modmask, button, TagMask::EMPTY);
    }

    pub fn bar_click_handler(&mut self, modmask: ModMask, button: Button, x: i32) {
        let server = &self.display_server;
        let (click, tag) = bar::classify(&self.state, x, |text| server.text_width(text));
        tracing::trace!(?click, x, "bar clicked");
        self.run_mousebinds(click, modmask, button, tag);
    }

    /// Runs the button bindings for `click`. Tag bar bindings without a tag act on `tag`.
    fn run_mousebinds(&mut self, click: Click, modmask: ModMask, button: Button, tag: TagMask) {
        let commands: Vec<Command> = self
            .state
            .mousebinds
            .iter()
            .filter(|b| {
                b.click == click && b.button == button && b.modmask.clean() == modmask.clean()
            })
            .map(|b| match click {
                Click::TagBar => b.command.clone().with_clicked_tag(tag),
                _ => b.command.clone(),
            })
            .collect();
        for command in &commands {
            self.command_handler(command);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{Keybind, TestConfig};
    use crate::display_servers::mock_display_server::{CHAR_WIDTH, FONT_HEIGHT};
    use crate::models::{Manager, Mode, TagMask, WindowHandle};
    use crate::utils::modmask_lookup::{Button, ModMask};
    use crate::Command;

    #[test]
    fn lock_keys_do_not_break_bindings() {
        let mut manager = Manager::new_test_with(TestConfig {
            tags: vec!["1".to_owned(), "2".to_owned()],
            keybinds: vec![Keybind {
                modmask: ModMask::Super,
                key: "2".to_owned(),
                command: Command::View(TagMask::single(1)),
            }],
            ..TestConfig::default()
        });
        manager.key_combo_handler(ModMask::Super | ModMask::NumLock | ModMask::Lock, "2");
        assert_eq!(manager.state.monitor.tagset(), TagMask::single(1));

        manager.key_combo_handler(ModMask::Super | ModMask::Shift, "1");
        assert_eq!(manager.state.monitor.tagset(), TagMask::single(1));
    }

    #[test]
    fn every_matching_key_binding_runs() {
        let bind = |command| Keybind {
            modmask: ModMask::Super,
            key: "x".to_owned(),
            command,
        };
        let mut manager = Manager::new_test_with(TestConfig {
            keybinds: vec![bind(Command::IncNMaster(1)), bind(Command::IncNMaster(1))],
            ..TestConfig::default()
        });
        manager.key_combo_handler(ModMask::Super, "x");
        assert_eq!(manager.state.monitor.nmaster, 3);
    }

    #[test]
    fn clicking_a_client_focuses_it_and_starts_a_drag() {
        let mut manager = Manager::new_test(vec![]);
        let a = manager.state.add_test_client(1);
        manager.state.add_test_client(2);
        manager.mouse_combo_handler(
            ModMask::Super,
            Button::Button1,
            Some(WindowHandle(1)),
            40,
            50,
        );
        assert_eq!(manager.state.monitor.sel(), Some(a));
        match manager.state.mode {
            Mode::MovingWindow(drag) => assert_eq!(drag.pointer_origin, (40, 50)),
            _ => panic!("expected a move"),
        }
    }

    #[test]
    fn clicking_the_root_window_runs_no_client_bindings() {
        let mut manager = Manager::new_test(vec![]);
        manager.state.add_test_client(1);
        manager.mouse_combo_handler(ModMask::Super, Button::Button1, None, 0, 0);
        assert!(manager.state.mode.is_normal());
    }

    #[test]
    fn clicking_a_tag_views_it() {
        let mut manager = Manager::new_test(vec!["1".to_owned(), "2".to_owned(), "3".to_owned()]);
        let tag_width = CHAR_WIDTH + FONT_HEIGHT;
        manager.bar_click_handler(ModMask::Zero, Button::Button1, 2 * tag_width + 1);
        assert_eq!(manager.state.monitor.tagset(), TagMask::single(2));
    }

    #[test]
    fn clicking_the_layout_symbol_toggles_layouts() {
        let mut manager = Manager::new_test(vec!["1".to_owned()]);
        let tag_width = CHAR_WIDTH + FONT_HEIGHT;
        manager.bar_click_handler(ModMask::Zero, Button::Button1, tag_width + 1);
        assert_eq!(manager.state.monitor.layout(), 1);
    }
}
