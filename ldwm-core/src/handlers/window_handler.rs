#![allow(clippy::wildcard_imports)]

use super::*;
use crate::display_action::{DisplayAction, WindowState};
use crate::display_event::{PropertyChange, StateAction};
use crate::models::{Client, ConfigureRequest, TagMask, WindowInfo, WmHints, BROKEN};
use crate::state::{default_status, State};

impl<H: Handle> State<H> {
    /// Takes a new top-level window under management and selects it.
    pub fn manage(&mut self, info: WindowInfo<H>) {
        let handle = info.handle;
        if self.monitor.clients.win_to_client(&handle).is_some() {
            return;
        }
        tracing::debug!(?handle, title = ?info.title, "managing window");

        let mut client = Client::new(handle);
        client.set_title(info.title.as_deref());
        self.apply_rules(&mut client, &info);
        client.geometry = info.geometry;
        client.old_geometry = info.geometry;
        client.old_border = info.border;
        client.geometry = self.clamp_new_window(&client);
        client.border = self.border_width;
        let geometry = client.geometry;
        let id = self.monitor.clients.insert(client);

        self.actions
            .push_back(DisplayAction::SetBorderWidth(handle, self.border_width));
        self.actions.push_back(DisplayAction::SetBorderColor {
            handle,
            focused: true,
        });
        self.actions.push_back(DisplayAction::SendConfigureNotify {
            handle,
            geometry,
            border: self.border_width,
        });
        self.update_window_type(id, info.fullscreen, info.dialog);
        self.monitor.clients[id].set_size_hints(info.size_hints);
        self.update_wm_hints(id, info.wm_hints);
        self.actions.push_back(DisplayAction::AddedWindow(handle));
        self.actions.push_back(DisplayAction::GrabButtons {
            handle,
            focused: false,
        });

        let client = &mut self.monitor.clients[id];
        if !client.is_floating {
            client.is_floating = info.transient_for.is_some() || client.is_fixed;
            client.old_state = client.is_floating;
        }
        if client.is_floating {
            self.actions.push_back(DisplayAction::MoveToTop(handle));
        }
        let geometry = client.geometry;
        self.monitor.clients.attach(id);
        self.monitor.clients.attach_stack(id);
        self.update_client_list();

        // Some clients only map correctly after a configure, so park them off screen first.
        let parked = Xyhw::new(
            geometry.x + 2 * self.monitor.screen.w,
            geometry.y,
            geometry.w,
            geometry.h,
        );
        self.actions
            .push_back(DisplayAction::MoveResizeWindow(handle, parked));
        self.actions
            .push_back(DisplayAction::SetClientState(handle, WindowState::Normal));
        if let Some(sel) = self.monitor.sel() {
            self.unfocus(sel);
        }
        self.monitor.clients.sel = Some(id);
        self.arrange();
        self.actions.push_back(DisplayAction::MapWindow(handle));
        self.focus(None);
    }

    /// Picks tags and floating state from the first matching rules. Every matching rule adds
    /// its tags; the last one decides floating.
    fn apply_rules(&self, client: &mut Client<H>, info: &WindowInfo<H>) {
        let class = info.class.as_deref().unwrap_or(BROKEN);
        let instance = info.instance.as_deref().unwrap_or(BROKEN);
        let mut tags = TagMask::EMPTY;
        client.is_floating = false;
        for rule in self
            .rules
            .iter()
            .filter(|r| r.matches(class, instance, &client.name))
        {
            client.is_floating = rule.floating;
            tags = tags | rule.tags;
        }
        let tags = tags & self.all_tags();
        client.tags = if tags.is_empty() {
            self.monitor.tagset()
        } else {
            tags
        };
    }

    /// Keeps a new window on screen, and off the bar when its centre would cover it.
    fn clamp_new_window(&self, client: &Client<H>) -> Xyhw {
        let screen = self.monitor.screen;
        let wa = self.monitor.work_area;
        let mut geometry = client.geometry;
        if geometry.x + client.width() > screen.right() {
            geometry.x = screen.right() - client.width();
        }
        if geometry.y + client.height() > screen.bottom() {
            geometry.y = screen.bottom() - client.height();
        }
        geometry.x = geometry.x.max(screen.x);
        let centre = geometry.x + geometry.w / 2;
        let covers_bar = self.monitor.bar_y == screen.y && centre >= wa.x && centre < wa.right();
        geometry.y = geometry
            .y
            .max(if covers_bar { self.bar_height } else { screen.y });
        geometry
    }

    /// Stops managing a client. Windows that still exist get their border back and are
    /// withdrawn.
    pub fn unmanage(&mut self, id: ClientId, destroyed: bool) {
        self.release(id, destroyed);
        self.focus(None);
        self.update_client_list();
        self.arrange();
    }

    fn release(&mut self, id: ClientId, destroyed: bool) {
        let tagset = self.monitor.tagset();
        self.monitor.clients.detach(id);
        self.monitor.clients.detach_stack(id, tagset);
        let Some(client) = self.monitor.clients.remove(id) else {
            return;
        };
        tracing::debug!(handle = ?client.handle, destroyed, "unmanaging window");
        if !destroyed {
            self.actions.push_back(DisplayAction::ReleaseWindow {
                handle: client.handle,
                border: client.old_border,
            });
        }
    }

    pub fn window_destroy(&mut self, handle: &WindowHandle<H>) {
        if let Some(id) = self.monitor.clients.win_to_client(handle) {
            self.unmanage(id, true);
        }
    }

    /// A client withdrew its window. Synthetic unmaps only mark it withdrawn.
    pub fn window_unmap(&mut self, handle: &WindowHandle<H>, synthetic: bool) {
        let Some(id) = self.monitor.clients.win_to_client(handle) else {
            return;
        };
        if synthetic {
            self.actions
                .push_back(DisplayAction::SetClientState(*handle, WindowState::Withdrawn));
        } else {
            self.unmanage(id, false);
        }
    }

    pub fn update_client_list(&mut self) {
        let clients = &self.monitor.clients;
        let handles = clients.iter().map(|id| clients[id].handle).collect();
        self.actions
            .push_back(DisplayAction::UpdateClientList(handles));
    }

    /// Makes a client cover the whole screen without a border, or restores it.
    /// Requests matching the current state are ignored.
    pub fn set_fullscreen(&mut self, id: ClientId, fullscreen: bool) {
        let screen = self.monitor.screen;
        let client = &mut self.monitor.clients[id];
        if client.is_fullscreen == fullscreen {
            return;
        }
        let handle = client.handle;
        self.actions
            .push_back(DisplayAction::SetFullscreenState(handle, fullscreen));
        client.is_fullscreen = fullscreen;
        if fullscreen {
            client.old_state = client.is_floating;
            client.old_border = client.border;
            client.border = 0;
            client.is_floating = true;
            self.resize_client(id, screen);
            self.actions.push_back(DisplayAction::MoveToTop(handle));
        } else {
            client.is_floating = client.old_state;
            client.border = client.old_border;
            client.geometry = client.old_geometry;
            let geometry = client.old_geometry;
            self.resize_client(id, geometry);
            self.arrange();
        }
    }

    /// `_NET_WM_STATE` fullscreen request from a client.
    pub fn fullscreen_request(&mut self, handle: &WindowHandle<H>, action: StateAction) {
        let Some(id) = self.monitor.clients.win_to_client(handle) else {
            return;
        };
        let fullscreen = match action {
            StateAction::Add => true,
            StateAction::Remove => false,
            StateAction::Toggle => !self.monitor.clients[id].is_fullscreen,
        };
        self.set_fullscreen(id, fullscreen);
    }

    /// A pager asked for a client to become active: show its tags and make it the master.
    pub fn activate(&mut self, handle: &WindowHandle<H>) {
        let Some(id) = self.monitor.clients.win_to_client(handle) else {
            return;
        };
        let tags = self.monitor.clients[id].tags;
        if !tags.intersects(self.monitor.tagset()) {
            let all = self.all_tags();
            self.monitor.view(tags, all);
        }
        self.pop(id);
    }

    pub fn configure_request(&mut self, request: ConfigureRequest<H>) {
        let Some(id) = self.monitor.clients.win_to_client(&request.handle) else {
            self.actions
                .push_back(DisplayAction::ConfigureUnmanaged(request));
            return;
        };
        let floating_layout = !self.arrangement().arranges();
        let screen = self.monitor.screen;
        let tagset = self.monitor.tagset();
        let client = &mut self.monitor.clients[id];

        if let Some(border) = request.border {
            client.border = border;
        } else if client.is_floating || floating_layout {
            let mut geometry = client.geometry;
            if let Some(x) = request.x {
                client.old_geometry.x = geometry.x;
                geometry.x = screen.x + x;
            }
            if let Some(y) = request.y {
                client.old_geometry.y = geometry.y;
                geometry.y = screen.y + y;
            }
            if let Some(w) = request.w {
                client.old_geometry.w = geometry.w;
                geometry.w = w;
            }
            if let Some(h) = request.h {
                client.old_geometry.h = geometry.h;
                geometry.h = h;
            }
            let bw = client.border;
            if geometry.x + geometry.w > screen.right() && client.is_floating {
                geometry.x = screen.x + (screen.w / 2 - (geometry.w + 2 * bw) / 2);
            }
            if geometry.y + geometry.h > screen.bottom() && client.is_floating {
                geometry.y = screen.y + (screen.h / 2 - (geometry.h + 2 * bw) / 2);
            }
            client.geometry = geometry;
            if request.is_move_only() {
                self.actions.push_back(DisplayAction::SendConfigureNotify {
                    handle: client.handle,
                    geometry,
                    border: bw,
                });
            }
            if client.is_visible(tagset) {
                self.actions
                    .push_back(DisplayAction::MoveResizeWindow(client.handle, geometry));
            }
        } else {
            self.actions.push_back(DisplayAction::SendConfigureNotify {
                handle: client.handle,
                geometry: client.geometry,
                border: client.border,
            });
        }
    }

    pub fn property_change(&mut self, change: PropertyChange<H>) {
        let handle = match &change {
            PropertyChange::StatusText(text) => {
                self.status_text = text
                    .as_deref()
                    .filter(|t| !t.is_empty())
                    .map_or_else(default_status, str::to_owned);
                self.bar_dirty = true;
                return;
            }
            PropertyChange::Title(handle, _)
            | PropertyChange::TransientFor(handle, _)
            | PropertyChange::NormalHints(handle, _)
            | PropertyChange::WmHints(handle, _)
            | PropertyChange::WindowType { handle, .. } => *handle,
        };
        let Some(id) = self.monitor.clients.win_to_client(&handle) else {
            return;
        };

        match change {
            PropertyChange::StatusText(_) => {}
            PropertyChange::Title(_, title) => {
                self.monitor.clients[id].set_title(title.as_deref());
                if self.monitor.sel() == Some(id) {
                    self.bar_dirty = true;
                }
            }
            PropertyChange::TransientFor(_, parent) => {
                let parent_managed = parent
                    .map_or(false, |p| self.monitor.clients.win_to_client(&p).is_some());
                let client = &mut self.monitor.clients[id];
                if !client.is_floating && parent_managed {
                    client.is_floating = true;
                    self.arrange();
                }
            }
            PropertyChange::NormalHints(_, hints) => {
                self.monitor.clients[id].set_size_hints(hints);
            }
            PropertyChange::WmHints(_, hints) => {
                self.update_wm_hints(id, hints);
                self.bar_dirty = true;
            }
            PropertyChange::WindowType {
                fullscreen, dialog, ..
            } => self.update_window_type(id, fullscreen, dialog),
        }
    }

    fn update_window_type(&mut self, id: ClientId, fullscreen: bool, dialog: bool) {
        if fullscreen {
            self.set_fullscreen(id, true);
        }
        if dialog {
            self.monitor.clients[id].is_floating = true;
        }
    }

    /// Urgency of the selected client is cleared on the window instead of being recorded.
    fn update_wm_hints(&mut self, id: ClientId, hints: WmHints) {
        let is_sel = self.monitor.sel() == Some(id);
        let client = &mut self.monitor.clients[id];
        if is_sel && hints.urgent {
            self.actions
                .push_back(DisplayAction::ClearUrgency(client.handle));
        } else {
            client.is_urgent = hints.urgent;
        }
        client.never_focus = hints.never_focus();
    }

    /// Hands every window back before exiting.
    pub fn teardown(&mut self) {
        let all = self.all_tags();
        self.view(all);
        while let Some(id) = self.monitor.clients.stack_head() {
            self.release(id, false);
        }
        self.monitor.clients.sel = None;
        self.actions.push_back(DisplayAction::GrabKeys(Vec::new()));
        self.actions.push_back(DisplayAction::FocusRoot);
        self.update_client_list();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TestConfig;
    use crate::models::{Rule, SizeHints};

    fn window(handle: i32) -> WindowInfo<crate::models::MockHandle> {
        WindowInfo::new(WindowHandle(handle), Xyhw::new(100, 100, 400, 300))
    }

    #[test]
    fn managed_windows_are_selected_and_tiled() {
        let mut manager = Manager::new_test(vec!["1".to_owned(), "2".to_owned()]);
        manager.state.manage(window(1));
        manager.state.manage(window(2));

        let sel = manager.state.monitor.sel().expect("a client is selected");
        let client = &manager.state.monitor.clients[sel];
        assert_eq!(client.handle, WindowHandle(2));
        assert_eq!(client.tags, TagMask::single(0));
        assert_eq!(client.border, 1);
        // newest client is the master
        assert_eq!(client.geometry.x, 0);
        assert!(manager
            .state
            .actions
            .contains(&DisplayAction::MapWindow(WindowHandle(2))));
        assert!(manager
            .state
            .actions
            .contains(&DisplayAction::UpdateClientList(vec![
                WindowHandle(2),
                WindowHandle(1)
            ])));
    }

    #[test]
    fn managing_twice_is_ignored() {
        let mut manager = Manager::new_test(vec![]);
        manager.state.manage(window(1));
        manager.state.manage(window(1));
        assert_eq!(manager.state.monitor.clients.len(), 1);
    }

    #[test]
    fn rules_place_and_float_windows() {
        let mut manager = Manager::new_test_with(TestConfig {
            tags: vec!["1".to_owned(), "2".to_owned(), "3".to_owned()],
            rules: vec![Rule {
                class: Some("Firefox".to_owned()),
                tags: TagMask::single(1),
                floating: true,
                ..Rule::default()
            }],
            ..TestConfig::default()
        });
        let mut info = window(1);
        info.class = Some("Firefox".to_owned());
        manager.state.manage(info);

        let id = manager
            .state
            .monitor
            .clients
            .win_to_client(&WindowHandle(1))
            .expect("managed");
        let client = &manager.state.monitor.clients[id];
        assert_eq!(client.tags, TagMask::single(1));
        assert!(client.is_floating);
        // placed on a hidden tag, so nothing is selected
        assert_eq!(manager.state.monitor.sel(), None);
    }

    #[test]
    fn transient_and_fixed_windows_float() {
        let mut manager = Manager::new_test(vec![]);
        let mut dialog = window(1);
        dialog.transient_for = Some(WindowHandle(7));
        manager.state.manage(dialog);
        let mut fixed = window(2);
        fixed.size_hints = SizeHints {
            min_w: 50,
            max_w: 50,
            min_h: 50,
            max_h: 50,
            ..SizeHints::default()
        };
        manager.state.manage(fixed);

        let clients = &manager.state.monitor.clients;
        assert!(clients.iter().all(|id| clients[id].is_floating));
    }

    #[test]
    fn new_windows_stay_off_the_bar() {
        let mut manager = Manager::new_test(vec![]);
        let mut info = window(1);
        info.geometry = Xyhw::new(3000, 0, 400, 300);
        info.transient_for = Some(WindowHandle(9));
        manager.state.manage(info);
        let id = manager.state.monitor.sel().expect("selected");
        let geometry = manager.state.monitor.clients[id].geometry;
        assert_eq!(geometry.x, 1920 - 400);
        assert_eq!(geometry.y, manager.state.bar_height);
    }

    #[test]
    fn killing_the_only_client_focuses_root() {
        let mut manager = Manager::new_test(vec![]);
        manager.state.manage(window(1));
        manager.command_handler(&Command::KillClient);
        assert!(manager
            .state
            .actions
            .contains(&DisplayAction::KillWindow(WindowHandle(1))));
        manager.state.actions.clear();

        manager.state.window_destroy(&WindowHandle(1));
        assert_eq!(manager.state.monitor.sel(), None);
        assert!(manager.state.monitor.clients.is_empty());
        assert!(manager.state.actions.contains(&DisplayAction::FocusRoot));
        assert!(!manager
            .state
            .actions
            .iter()
            .any(|a| matches!(a, DisplayAction::ReleaseWindow { .. })));
    }

    #[test]
    fn unmapped_windows_are_released() {
        let mut manager = Manager::new_test(vec![]);
        let mut info = window(1);
        info.border = 3;
        manager.state.manage(info);
        manager.state.window_unmap(&WindowHandle(1), true);
        assert_eq!(manager.state.monitor.clients.len(), 1);

        manager.state.window_unmap(&WindowHandle(1), false);
        assert!(manager.state.monitor.clients.is_empty());
        assert!(manager.state.actions.contains(&DisplayAction::ReleaseWindow {
            handle: WindowHandle(1),
            border: 3
        }));
    }

    #[test]
    fn fullscreen_round_trip_restores_the_client() {
        let mut manager = Manager::new_test(vec![]);
        manager.state.manage(window(1));
        manager.state.manage(window(2));
        let id = manager.state.monitor.sel().expect("selected");
        let before = manager.state.monitor.clients[id].geometry;

        manager
            .state
            .fullscreen_request(&WindowHandle(2), StateAction::Toggle);
        let client = &manager.state.monitor.clients[id];
        assert!(client.is_fullscreen && client.is_floating);
        assert_eq!(client.border, 0);
        assert_eq!(client.geometry, Xyhw::new(0, 0, 1920, 1080));

        // adding again changes nothing
        manager.state.actions.clear();
        manager
            .state
            .fullscreen_request(&WindowHandle(2), StateAction::Add);
        assert!(manager.state.actions.is_empty());

        manager
            .state
            .fullscreen_request(&WindowHandle(2), StateAction::Remove);
        let client = &manager.state.monitor.clients[id];
        assert!(!client.is_fullscreen && !client.is_floating);
        assert_eq!(client.border, 1);
        assert_eq!(client.geometry, before);
    }

    #[test]
    fn configure_requests_of_tiled_clients_are_refused() {
        let mut manager = Manager::new_test(vec![]);
        manager.state.manage(window(1));
        let id = manager.state.monitor.sel().expect("selected");
        let geometry = manager.state.monitor.clients[id].geometry;
        manager.state.actions.clear();

        manager.state.configure_request(ConfigureRequest {
            handle: WindowHandle(1),
            w: Some(10),
            ..ConfigureRequest::default()
        });
        assert_eq!(manager.state.monitor.clients[id].geometry, geometry);
        assert_eq!(
            manager.state.actions.pop_front(),
            Some(DisplayAction::SendConfigureNotify {
                handle: WindowHandle(1),
                geometry,
                border: 1
            })
        );
    }

    #[test]
    fn floating_clients_may_configure_themselves() {
        let mut manager = Manager::new_test(vec![]);
        let mut info = window(1);
        info.dialog = true;
        manager.state.manage(info);
        let id = manager.state.monitor.sel().expect("selected");
        manager.state.actions.clear();

        manager.state.configure_request(ConfigureRequest {
            handle: WindowHandle(1),
            x: Some(50),
            y: Some(60),
            ..ConfigureRequest::default()
        });
        let geometry = manager.state.monitor.clients[id].geometry;
        assert_eq!((geometry.x, geometry.y), (50, 60));
        let actions: Vec<_> = manager.state.actions.drain(..).collect();
        assert_eq!(
            actions,
            vec![
                DisplayAction::SendConfigureNotify {
                    handle: WindowHandle(1),
                    geometry,
                    border: 1
                },
                DisplayAction::MoveResizeWindow(WindowHandle(1), geometry),
            ]
        );

        // oversized requests are centred
        manager.state.configure_request(ConfigureRequest {
            handle: WindowHandle(1),
            w: Some(1900),
            ..ConfigureRequest::default()
        });
        let geometry = manager.state.monitor.clients[id].geometry;
        assert_eq!(geometry.x, 960 - (1900 + 2) / 2);
    }

    #[test]
    fn unmanaged_configure_requests_are_forwarded() {
        let mut manager = Manager::new_test(vec![]);
        let request = ConfigureRequest {
            handle: WindowHandle(5),
            x: Some(1),
            border: Some(4),
            ..ConfigureRequest::default()
        };
        manager.state.configure_request(request);
        assert_eq!(
            manager.state.actions.back(),
            Some(&DisplayAction::ConfigureUnmanaged(request))
        );
    }

    #[test]
    fn status_text_falls_back_to_the_version() {
        let mut manager = Manager::new_test(vec![]);
        manager
            .state
            .property_change(PropertyChange::StatusText(Some("12:00".to_owned())));
        assert_eq!(manager.state.status_text, "12:00");
        manager
            .state
            .property_change(PropertyChange::StatusText(Some(String::new())));
        assert_eq!(manager.state.status_text, default_status());
    }

    #[test]
    fn urgency_is_recorded_for_unfocused_clients_only() {
        let mut manager = Manager::new_test(vec![]);
        manager.state.manage(window(1));
        manager.state.manage(window(2));
        let urgent = WmHints {
            urgent: true,
            input: Some(false),
        };
        manager
            .state
            .property_change(PropertyChange::WmHints(WindowHandle(1), urgent));
        manager
            .state
            .property_change(PropertyChange::WmHints(WindowHandle(2), urgent));

        let clients = &manager.state.monitor.clients;
        let first = clients.win_to_client(&WindowHandle(1)).expect("managed");
        let second = clients.win_to_client(&WindowHandle(2)).expect("managed");
        assert!(clients[first].is_urgent);
        assert!(!clients[second].is_urgent);
        assert!(clients[second].never_focus);
        assert!(manager
            .state
            .actions
            .contains(&DisplayAction::ClearUrgency(WindowHandle(2))));
    }

    #[test]
    fn transient_for_a_managed_window_floats() {
        let mut manager = Manager::new_test(vec![]);
        manager.state.manage(window(1));
        manager.state.manage(window(2));
        manager.state.property_change(PropertyChange::TransientFor(
            WindowHandle(2),
            Some(WindowHandle(8)),
        ));
        let id = manager.state.monitor.sel().expect("selected");
        assert!(!manager.state.monitor.clients[id].is_floating);

        manager.state.property_change(PropertyChange::TransientFor(
            WindowHandle(2),
            Some(WindowHandle(1)),
        ));
        assert!(manager.state.monitor.clients[id].is_floating);
    }

    #[test]
    fn activating_a_hidden_client_shows_it() {
        let mut manager = Manager::new_test(vec!["1".to_owned(), "2".to_owned()]);
        manager.state.manage(window(1));
        manager.state.manage(window(2));
        manager.state.view(TagMask::single(1));
        manager.state.activate(&WindowHandle(1));

        assert_eq!(manager.state.monitor.tagset(), TagMask::single(0));
        let sel = manager.state.monitor.sel().expect("selected");
        assert_eq!(manager.state.monitor.clients[sel].handle, WindowHandle(1));
        assert_eq!(manager.state.monitor.clients.head(), Some(sel));
    }

    #[test]
    fn teardown_releases_every_window() {
        let mut manager = Manager::new_test(vec!["1".to_owned(), "2".to_owned()]);
        manager.state.manage(window(1));
        manager.state.manage(window(2));
        manager.state.tag(TagMask::single(1));
        manager.state.teardown();

        assert!(manager.state.monitor.clients.is_empty());
        let released = manager
            .state
            .actions
            .iter()
            .filter(|a| matches!(a, DisplayAction::ReleaseWindow { .. }))
            .count();
        assert_eq!(released, 2);
        assert_eq!(
            manager.state.actions.back(),
            Some(&DisplayAction::UpdateClientList(vec![]))
        );
    }
}
