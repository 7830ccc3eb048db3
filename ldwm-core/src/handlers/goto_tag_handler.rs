#![allow(clippy::wildcard_imports)]

use super::*;
use crate::models::TagMask;
use crate::state::State;

impl<H: Handle> State<H> {
    /// Shows exactly the tags in `mask`. An empty mask returns to the previous view.
    pub fn view(&mut self, mask: TagMask) {
        let all = self.all_tags();
        if self.monitor.view(mask, all) {
            self.focus(None);
            self.arrange();
        }
    }

    /// Adds or removes tags from the current view. Never leaves the view empty.
    pub fn toggle_view(&mut self, mask: TagMask) {
        let all = self.all_tags();
        if self.monitor.toggle_view(mask, all) {
            self.focus(None);
            self.arrange();
        }
    }

    /// Moves the selected client to the tags in `mask`.
    pub fn tag(&mut self, mask: TagMask) {
        let mask = mask & self.all_tags();
        let Some(sel) = self.monitor.sel() else {
            return;
        };
        if mask.is_empty() {
            return;
        }
        self.monitor.clients[sel].tags = mask;
        self.focus(None);
        self.arrange();
    }

    /// Adds or removes tags of the selected client. A client always keeps at least one tag.
    pub fn toggle_tag(&mut self, mask: TagMask) {
        let Some(sel) = self.monitor.sel() else {
            return;
        };
        let tags = self.monitor.clients[sel].tags ^ (mask & self.all_tags());
        if tags.is_empty() {
            return;
        }
        self.monitor.clients[sel].tags = tags;
        self.focus(None);
        self.arrange();
    }
}
