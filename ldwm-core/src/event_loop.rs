use crate::bar::Bar;
use crate::config::Config;
use crate::models::Handle;
use crate::{DisplayAction, DisplayEvent, DisplayServer, Manager};
use std::collections::VecDeque;
use std::sync::atomic::Ordering;

impl<H: Handle, C: Config, SERVER: DisplayServer<H>> Manager<H, C, SERVER> {
    /// Takes over the windows that already exist and handles events until a quit command.
    /// Every window is handed back before this returns.
    pub async fn start_event_loop(&mut self) {
        let keybinds = self.state.keybinds.clone();
        self.state.actions.push_back(DisplayAction::GrabKeys(keybinds));
        self.state.move_bar();
        for info in self.display_server.scan() {
            self.state.manage(info);
        }
        self.state.focus(None);
        self.state.arrange();

        let mut event_buffer = VecDeque::new();
        while self.state.running {
            self.update_bar();
            self.execute_actions(&mut event_buffer);
            self.display_server.flush();

            // Events read while executing actions never wake the socket watcher.
            if event_buffer.is_empty() {
                event_buffer.extend(self.display_server.get_next_events());
            }

            tokio::select! {
                _ = self.display_server.wait_readable(), if event_buffer.is_empty() => {
                    event_buffer.extend(self.display_server.get_next_events());
                }
                else => {
                    if let Some(event) = event_buffer.pop_front() {
                        self.display_event_handler(event);
                    }
                }
            }

            if self.reap_requested.swap(false, Ordering::SeqCst) {
                self.children.reap();
            }
        }

        tracing::info!("releasing all windows");
        self.state.teardown();
        self.execute_actions(&mut event_buffer);
        self.display_server.flush();
    }

    fn update_bar(&mut self) {
        if !self.state.bar_dirty {
            return;
        }
        self.state.bar_dirty = false;
        let server = &self.display_server;
        let bar = Bar::build(&self.state, |text| server.text_width(text));
        self.state.actions.push_back(DisplayAction::DrawBar(bar));
    }

    /// Performs the actions requested by the handlers. Replies from the display server are
    /// handled before any other pending event.
    fn execute_actions(&mut self, event_buffer: &mut VecDeque<DisplayEvent<H>>) {
        let mut replies = vec![];
        while let Some(action) = self.state.actions.pop_front() {
            if matches!(action, DisplayAction::DiscardEnterEvents) {
                event_buffer.retain(|event| !matches!(event, DisplayEvent::EnterNotify(_)));
            }
            if let Some(event) = self.display_server.execute_action(action) {
                replies.push(event);
            }
        }
        for event in replies.into_iter().rev() {
            event_buffer.push_front(event);
        }
    }
}
