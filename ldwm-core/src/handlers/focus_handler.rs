#![allow(clippy::wildcard_imports)]

use super::*;
use crate::display_action::DisplayAction;
use crate::state::State;

impl<H: Handle> State<H> {
    /// Selects `id`, or the most recently focused visible client when `id` is none or hidden.
    /// With nothing to select the root window takes the input focus.
    pub fn focus(&mut self, id: Option<ClientId>) {
        let tagset = self.monitor.tagset();
        let clients = &self.monitor.clients;
        let target = id
            .filter(|&id| clients.get(id).map_or(false, |c| c.is_visible(tagset)))
            .or_else(|| clients.stack_iter().find(|&c| clients[c].is_visible(tagset)));

        if let Some(sel) = self.monitor.sel() {
            if Some(sel) != target {
                self.unfocus(sel);
            }
        }

        match target {
            Some(id) => {
                if self.monitor.clients[id].is_urgent {
                    self.clear_urgent(id);
                }
                self.monitor.clients.detach_stack(id, tagset);
                self.monitor.clients.attach_stack(id);
                let client = &self.monitor.clients[id];
                let handle = client.handle;
                let never_focus = client.never_focus;
                self.actions.push_back(DisplayAction::GrabButtons {
                    handle,
                    focused: true,
                });
                self.actions.push_back(DisplayAction::SetBorderColor {
                    handle,
                    focused: true,
                });
                self.actions.push_back(DisplayAction::WindowTakeFocus {
                    handle,
                    never_focus,
                });
            }
            None => self.actions.push_back(DisplayAction::FocusRoot),
        }
        self.monitor.clients.sel = target;
        self.bar_dirty = true;
    }

    /// Drops the focused look of a client.
    pub(crate) fn unfocus(&mut self, id: ClientId) {
        let Some(client) = self.monitor.clients.get(id) else {
            return;
        };
        let handle = client.handle;
        self.actions.push_back(DisplayAction::GrabButtons {
            handle,
            focused: false,
        });
        self.actions.push_back(DisplayAction::SetBorderColor {
            handle,
            focused: false,
        });
    }

    fn clear_urgent(&mut self, id: ClientId) {
        let client = &mut self.monitor.clients[id];
        client.is_urgent = false;
        self.actions
            .push_back(DisplayAction::ClearUrgency(client.handle));
    }

    /// Moves the selection through the visible clients in list order, wrapping at both ends.
    pub fn focus_stack(&mut self, direction: i32) {
        let Some(sel) = self.monitor.sel() else {
            return;
        };
        let visible: Vec<ClientId> = self.monitor.clients.visible(self.monitor.tagset()).collect();
        let Some(index) = visible.iter().position(|&id| id == sel) else {
            return;
        };
        let target = if direction > 0 {
            visible.get(index + 1).or_else(|| visible.first())
        } else {
            index
                .checked_sub(1)
                .and_then(|i| visible.get(i))
                .or_else(|| visible.last())
        };
        if let Some(&target) = target {
            self.focus(Some(target));
            self.restack();
        }
    }

    /// Some clients grab the input focus on their own. Hand it back to the selection.
    pub fn focus_in(&mut self, handle: &WindowHandle<H>) {
        let Some(sel) = self.monitor.sel() else {
            return;
        };
        let client = &self.monitor.clients[sel];
        if client.handle != *handle {
            self.actions.push_back(DisplayAction::WindowTakeFocus {
                handle: client.handle,
                never_focus: client.never_focus,
            });
        }
    }

    /// Focus follows the pointer into managed windows.
    pub fn enter_notify(&mut self, handle: &WindowHandle<H>) {
        let Some(id) = self.monitor.clients.win_to_client(handle) else {
            return;
        };
        if self.monitor.sel() != Some(id) {
            self.focus(Some(id));
        }
    }
}
